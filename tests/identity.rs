//! Integration tests for type identity across independently loaded modules.

use std::collections::HashMap;

use refasm_annotator::{prelude::*, Result};

fn registry(name: &str) -> TypeRegistry {
    TypeRegistry::new(TypeSource::Module(name.to_string()))
}

/// Lays out the same surface in both modules:
/// `Lib.Collections.List<T>`, `Lib.Collections.List<T>/Enumerator`, `Lib.Util` and
/// `Lib.Util/Helper/Cache`.
fn populate(types: &TypeRegistry) -> Result<()> {
    let list = types.create_type("Lib.Collections", "List`1", 0)?;
    types.add_generic_param(&list, "T");
    types.create_nested_type(&list, "Enumerator", 0)?;

    let util = types.create_type("Lib", "Util", 0)?;
    let helper = types.create_nested_type(&util, "Helper", 0)?;
    types.create_nested_type(&helper, "Cache", 0)?;
    Ok(())
}

#[test]
fn test_reference_surface_pairs_with_implementation() -> Result<()> {
    let reference = registry("Lib.Ref.dll");
    let implementation = registry("Lib.dll");
    populate(&reference)?;
    populate(&implementation)?;
    implementation.create_type("Lib", "InternalOnly", 0)?;

    let matches = match_types(&reference, &implementation);
    assert_eq!(matches.pairs.len(), 5);
    assert!(matches.unmatched_left.is_empty());
    assert_eq!(matches.unmatched_right.len(), 1);
    assert_eq!(matches.unmatched_right[0].fullname(), "Lib.InternalOnly");

    for (left, right) in &matches.pairs {
        assert_eq!(left.fullname(), right.fullname());
        assert!(TypeIdentityComparer::equals(Some(left), Some(right)));
        assert_eq!(
            TypeIdentityComparer::hash(Some(left)),
            TypeIdentityComparer::hash(Some(right))
        );
    }
    Ok(())
}

#[test]
fn test_arity_and_nesting_separate_types() -> Result<()> {
    let reference = registry("Lib.Ref.dll");
    let implementation = registry("Lib.dll");

    let generic = reference.create_type("N", "Foo", 0)?;
    reference.add_generic_param(&generic, "T");
    implementation.create_type("N", "Foo", 0)?;

    let outer = reference.create_type("N", "Outer", 0)?;
    reference.create_nested_type(&outer, "Bar", 0)?;
    implementation.create_type("", "Bar", 0)?;

    let matches = match_types(&reference, &implementation);
    let paired: Vec<String> = matches
        .pairs
        .iter()
        .map(|(left, _)| left.fullname())
        .collect();
    assert!(!paired.contains(&"N.Foo".to_string()));
    assert!(!paired.contains(&"N.Outer/Bar".to_string()));
    assert_eq!(matches.unmatched_right.len(), 2);
    Ok(())
}

#[test]
fn test_equivalent_type_as_map_key() -> Result<()> {
    let reference = registry("Lib.Ref.dll");
    let implementation = registry("Lib.dll");
    populate(&reference)?;
    populate(&implementation)?;

    let by_identity: HashMap<EquivalentType, Token> = implementation
        .declared_types()
        .into_iter()
        .map(|ty| {
            let token = ty.token;
            (EquivalentType(ty), token)
        })
        .collect();

    for ty in reference.declared_types() {
        let token = by_identity
            .get(&EquivalentType(ty.clone()))
            .copied()
            .expect("every reference type has an implementation");
        let counterpart = implementation.get(&token).expect("registered");
        assert_eq!(counterpart.fullname(), ty.fullname());
    }
    Ok(())
}

#[test]
fn test_type_references_compare_by_shape() -> Result<()> {
    let runtime = registry("System.Runtime.dll");
    let target = registry("Lib.dll");

    let definition = runtime.create_type("System", "Attribute", 0)?;
    let reference = target.create_type_ref(
        "System",
        "Attribute",
        TypeSource::AssemblyRef("System.Runtime".into()),
    )?;

    assert!(TypeIdentityComparer::equals(
        Some(&definition),
        Some(&reference)
    ));
    assert!(!TypeIdentityComparer::equals(Some(&definition), None));
    assert!(TypeIdentityComparer::equals(None, None));
    assert_eq!(TypeIdentityComparer::hash(None), 0);
    Ok(())
}
