//! Framework types the annotator needs to reference.
//!
//! A [`WellKnownTypes`] table is assembled once per build session and never changes
//! afterwards. Entries may be type references; the factory resolves them to their
//! definitions when it needs their constructors.

use std::collections::HashMap;

use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::{
    metadata::{
        module::ModuleRc,
        typesystem::{CilPrimitiveKind, CilTypeRc, TypeRegistry},
    },
    Error, Result,
};

/// The framework types a [`WellKnownTypes`] table can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum WellKnownType {
    /// `System.Runtime.CompilerServices.CompilerGeneratedAttribute`
    CompilerGeneratedAttribute,
    /// `System.AttributeUsageAttribute`
    AttributeUsageAttribute,
    /// `System.AttributeTargets`
    AttributeTargets,
    /// `System.Runtime.CompilerServices.ReferenceAssemblyAttribute`
    ReferenceAssemblyAttribute,
}

impl WellKnownType {
    /// Namespace the type is declared in
    #[must_use]
    pub fn namespace(self) -> &'static str {
        match self {
            WellKnownType::CompilerGeneratedAttribute
            | WellKnownType::ReferenceAssemblyAttribute => "System.Runtime.CompilerServices",
            WellKnownType::AttributeUsageAttribute | WellKnownType::AttributeTargets => "System",
        }
    }

    /// Simple name of the type
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// `Namespace.Name`
    #[must_use]
    pub fn fullname(self) -> String {
        format!("{}.{}", self.namespace(), self.name())
    }
}

/// Immutable table of resolved framework types for one build session
pub struct WellKnownTypes {
    module: ModuleRc,
    byte: CilTypeRc,
    boolean: CilTypeRc,
    types: HashMap<WellKnownType, CilTypeRc>,
}

impl WellKnownTypes {
    /// Start a table for `module` with the given primitive handles
    #[must_use]
    pub fn new(module: ModuleRc, byte: CilTypeRc, boolean: CilTypeRc) -> Self {
        WellKnownTypes {
            module,
            byte,
            boolean,
            types: HashMap::new(),
        }
    }

    /// Add (or replace) the handle for `kind`
    #[must_use]
    pub fn with_type(mut self, kind: WellKnownType, ty: CilTypeRc) -> Self {
        self.types.insert(kind, ty);
        self
    }

    /// Build a complete table by looking every well-known type up in `registry`
    ///
    /// The registry is typically the target module's own graph, where framework types
    /// appear as references linked to their definitions.
    ///
    /// # Errors
    /// Returns [`Error::WellKnownTypeMissing`] for the first type the registry does not hold
    /// and [`Error::TypeNotFound`] if the registry lacks its primitives.
    pub fn resolve(module: ModuleRc, registry: &TypeRegistry) -> Result<Self> {
        let byte = registry.get_primitive(CilPrimitiveKind::U1)?;
        let boolean = registry.get_primitive(CilPrimitiveKind::Boolean)?;

        let mut table = Self::new(module, byte, boolean);
        for kind in WellKnownType::iter() {
            let fullname = kind.fullname();
            let ty = registry
                .get_by_fullname(&fullname)
                .ok_or(Error::WellKnownTypeMissing(fullname))?;
            table.types.insert(kind, ty);
        }

        Ok(table)
    }

    /// The module records are built for
    #[must_use]
    pub fn module(&self) -> &ModuleRc {
        &self.module
    }

    /// `System.Byte`
    #[must_use]
    pub fn byte(&self) -> &CilTypeRc {
        &self.byte
    }

    /// `System.Boolean`
    #[must_use]
    pub fn boolean(&self) -> &CilTypeRc {
        &self.boolean
    }

    /// The handle registered for `kind`
    ///
    /// # Errors
    /// Returns [`Error::WellKnownTypeMissing`] if no handle was supplied.
    pub fn get(&self, kind: WellKnownType) -> Result<&CilTypeRc> {
        self.types
            .get(&kind)
            .ok_or_else(|| Error::WellKnownTypeMissing(kind.fullname()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        metadata::{module::Module, typesystem::TypeSource},
        test::module_registry,
    };

    #[test]
    fn test_names() {
        assert_eq!(
            WellKnownType::CompilerGeneratedAttribute.fullname(),
            "System.Runtime.CompilerServices.CompilerGeneratedAttribute"
        );
        assert_eq!(
            WellKnownType::AttributeTargets.fullname(),
            "System.AttributeTargets"
        );
        assert_eq!(
            WellKnownType::ReferenceAssemblyAttribute.to_string(),
            "ReferenceAssemblyAttribute"
        );
    }

    #[test]
    fn test_resolve_from_registry() {
        let registry = module_registry("Lib.dll");
        for kind in WellKnownType::iter() {
            registry
                .create_type_ref(
                    kind.namespace(),
                    kind.name(),
                    TypeSource::AssemblyRef("System.Runtime".into()),
                )
                .unwrap();
        }

        let table =
            WellKnownTypes::resolve(Arc::new(Module::new("Lib.dll")), &registry).unwrap();
        assert_eq!(table.byte().name, "Byte");
        assert_eq!(table.boolean().name, "Boolean");
        assert_eq!(
            table.get(WellKnownType::AttributeTargets).unwrap().fullname(),
            "System.AttributeTargets"
        );
    }

    #[test]
    fn test_resolve_reports_missing_type() {
        let registry = module_registry("Lib.dll");
        registry
            .create_type_ref(
                "System.Runtime.CompilerServices",
                "CompilerGeneratedAttribute",
                TypeSource::AssemblyRef("System.Runtime".into()),
            )
            .unwrap();

        match WellKnownTypes::resolve(Arc::new(Module::new("Lib.dll")), &registry) {
            Err(Error::WellKnownTypeMissing(name)) => {
                assert_eq!(name, "System.AttributeUsageAttribute");
            }
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("table should be incomplete"),
        }
    }

    #[test]
    fn test_get_missing_kind() {
        let registry = module_registry("Lib.dll");
        let table = WellKnownTypes::new(
            Arc::new(Module::new("Lib.dll")),
            registry.get_primitive(CilPrimitiveKind::U1).unwrap(),
            registry.get_primitive(CilPrimitiveKind::Boolean).unwrap(),
        );

        assert!(matches!(
            table.get(WellKnownType::ReferenceAssemblyAttribute),
            Err(Error::WellKnownTypeMissing(_))
        ));

        let attribute = registry
            .create_type(
                "System.Runtime.CompilerServices",
                "ReferenceAssemblyAttribute",
                0,
            )
            .unwrap();
        let table = table.with_type(WellKnownType::ReferenceAssemblyAttribute, attribute.clone());
        assert_eq!(
            table
                .get(WellKnownType::ReferenceAssemblyAttribute)
                .unwrap()
                .token,
            attribute.token
        );
        assert!(table.get(WellKnownType::AttributeTargets).is_err());
    }
}
