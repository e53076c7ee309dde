//! Shared fixtures for the unit tests.

mod session;

pub use session::Session;

use crate::metadata::{
    module::MethodReference,
    typesystem::{CilTypeRc, TypeRegistry, TypeSource},
};

/// `public hidebysig specialname rtspecialname`
pub const CTOR_FLAGS: u32 = 0x0006 | 0x0080 | 0x0800 | 0x1000;

/// An empty registry for the module `name`
pub fn module_registry(name: &str) -> TypeRegistry {
    TypeRegistry::new(TypeSource::Module(name.to_string()))
}

/// Add a type reference to `target` that resolves to `definition`
pub fn reference_to(target: &TypeRegistry, definition: &CilTypeRc) -> CilTypeRc {
    let assembly = match &definition.source {
        TypeSource::Module(name) => name.trim_end_matches(".dll").to_string(),
        other => format!("{other:?}"),
    };

    let reference = target
        .create_type_ref(
            &definition.namespace,
            &definition.name,
            TypeSource::AssemblyRef(assembly),
        )
        .unwrap();
    reference.set_definition(definition).unwrap();
    reference
}

/// A top-level type with one generic parameter per entry of `params`
pub fn generic_type(
    registry: &TypeRegistry,
    namespace: &str,
    name: &str,
    params: &[&str],
) -> CilTypeRc {
    let ty = registry.create_type(namespace, name, 0).unwrap();
    for param in params {
        registry.add_generic_param(&ty, param);
    }
    ty
}

/// The parameterless constructor of a fresh local attribute type
pub fn local_constructor(registry: &TypeRegistry) -> MethodReference {
    let ty = registry
        .create_type("Microsoft.CodeAnalysis", "EmbeddedAttribute", 0)
        .unwrap();
    MethodReference::Definition(registry.create_constructor(&ty, Vec::new()))
}
