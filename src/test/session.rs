//! A complete build session: a framework module, the module being annotated, and the
//! attribute types a factory needs.

use std::sync::Arc;

use crate::{
    annotator::{AnnotatorConfig, CustomAttributeFactory, WellKnownType, WellKnownTypes},
    metadata::{
        method::MethodRc,
        module::{Module, ModuleRc},
        signatures::TypeSignature,
        typesystem::{CilTypeRc, TypeRegistry, TypeSource},
    },
    test::module_registry,
    Result,
};

const RUNTIME: &str = "System.Runtime.dll";
const TARGET: &str = "Lib.dll";
const COMPILER_SERVICES: &str = "System.Runtime.CompilerServices";

pub struct Session {
    /// Framework definitions
    pub runtime: TypeRegistry,
    /// Types of the module being annotated, including its references into `runtime`
    pub target: TypeRegistry,
    pub module: ModuleRc,

    pub compiler_generated_def: CilTypeRc,
    pub attribute_usage_def: CilTypeRc,
    pub attribute_targets_def: CilTypeRc,
    pub reference_assembly_def: CilTypeRc,

    pub embedded: CilTypeRc,
    pub nullable: CilTypeRc,
    pub nullable_context: CilTypeRc,
    pub nullable_public_only: CilTypeRc,

    pub nullable_byte_ctor: MethodRc,
    pub nullable_array_ctor: MethodRc,
}

impl Session {
    pub fn new() -> Self {
        Self::build(true)
    }

    /// The target's `ReferenceAssemblyAttribute` reference is never linked to its definition
    pub fn with_unlinked_reference_assembly_attribute() -> Self {
        Self::build(false)
    }

    fn build(link_reference_assembly: bool) -> Self {
        let runtime = module_registry(RUNTIME);
        let target = module_registry(TARGET);
        let module = Arc::new(Module::new(TARGET));

        let compiler_generated_def = runtime
            .create_type(COMPILER_SERVICES, "CompilerGeneratedAttribute", 0)
            .unwrap();
        runtime.create_constructor(&compiler_generated_def, Vec::new());

        let attribute_targets_def = runtime.create_type("System", "AttributeTargets", 0).unwrap();
        let attribute_usage_def = runtime
            .create_type("System", "AttributeUsageAttribute", 0)
            .unwrap();
        runtime.create_constructor(
            &attribute_usage_def,
            vec![TypeSignature::ValueType(attribute_targets_def.token)],
        );

        let reference_assembly_def = runtime
            .create_type(COMPILER_SERVICES, "ReferenceAssemblyAttribute", 0)
            .unwrap();
        runtime.create_constructor(&reference_assembly_def, Vec::new());
        runtime.create_constructor(&reference_assembly_def, vec![TypeSignature::String]);

        for definition in [
            &compiler_generated_def,
            &attribute_usage_def,
            &attribute_targets_def,
            &reference_assembly_def,
        ] {
            let reference = target
                .create_type_ref(
                    &definition.namespace,
                    &definition.name,
                    TypeSource::AssemblyRef("System.Runtime".into()),
                )
                .unwrap();
            if link_reference_assembly || !Arc::ptr_eq(definition, &reference_assembly_def) {
                reference.set_definition(definition).unwrap();
            }
        }

        let embedded = target
            .create_type("Microsoft.CodeAnalysis", "EmbeddedAttribute", 0)
            .unwrap();
        target.create_constructor(&embedded, Vec::new());

        let nullable = target
            .create_type(COMPILER_SERVICES, "NullableAttribute", 0)
            .unwrap();
        let nullable_byte_ctor = target.create_constructor(&nullable, vec![TypeSignature::U1]);
        let nullable_array_ctor = target.create_constructor(
            &nullable,
            vec![TypeSignature::sz_array(TypeSignature::U1)],
        );

        let nullable_context = target
            .create_type(COMPILER_SERVICES, "NullableContextAttribute", 0)
            .unwrap();
        target.create_constructor(&nullable_context, vec![TypeSignature::U1]);

        let nullable_public_only = target
            .create_type(COMPILER_SERVICES, "NullablePublicOnlyAttribute", 0)
            .unwrap();
        target.create_constructor(&nullable_public_only, vec![TypeSignature::Boolean]);

        Session {
            runtime,
            target,
            module,
            compiler_generated_def,
            attribute_usage_def,
            attribute_targets_def,
            reference_assembly_def,
            embedded,
            nullable,
            nullable_context,
            nullable_public_only,
            nullable_byte_ctor,
            nullable_array_ctor,
        }
    }

    /// The well-known table as the target module sees it
    pub fn well_known(&self) -> WellKnownTypes {
        let table = WellKnownTypes::resolve(self.module.clone(), &self.target).unwrap();
        assert!(table
            .get(WellKnownType::AttributeTargets)
            .unwrap()
            .is_reference());
        table
    }

    pub fn factory(&self) -> CustomAttributeFactory {
        CustomAttributeFactory::new(
            self.well_known(),
            self.embedded.clone(),
            self.nullable.clone(),
            self.nullable_context.clone(),
            self.nullable_public_only.clone(),
        )
    }

    pub fn factory_with_config(&self, config: &AnnotatorConfig) -> Result<CustomAttributeFactory> {
        CustomAttributeFactory::with_config(
            self.well_known(),
            self.embedded.clone(),
            self.nullable.clone(),
            self.nullable_context.clone(),
            self.nullable_public_only.clone(),
            config,
        )
    }

    /// A factory whose `NullableContextAttribute` is the type `create` adds to the target
    pub fn factory_with_nullable_context<F>(&self, create: F) -> CustomAttributeFactory
    where
        F: FnOnce(&TypeRegistry) -> CilTypeRc,
    {
        CustomAttributeFactory::new(
            self.well_known(),
            self.embedded.clone(),
            self.nullable.clone(),
            create(&self.target),
            self.nullable_public_only.clone(),
        )
    }
}
