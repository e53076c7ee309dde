//! Structural identity of type declarations across independently loaded graphs.
//!
//! Two declarations are considered the same type when they agree on nestedness, their
//! enclosing declarations are the same type, and namespace, name and generic arity match.
//! Base types, members, attributes, accessibility and generic constraints are ignored, which
//! is what pairing a reference assembly with its implementation needs.
//!
//! The hash only mixes the simple names along the enclosing chain. It is consistent with the
//! equality (equal declarations always hash equal) but collides more often than it has to;
//! equality stays the authority.
//!
//! Both operations walk the enclosing chain iteratively, so arbitrarily deep nesting cannot
//! exhaust the stack.

use std::{
    hash::{DefaultHasher, Hash, Hasher},
    sync::Arc,
};

use crate::metadata::typesystem::{CilType, CilTypeRc};

/// Equality and hash over [`CilType`] declarations by identity shape
///
/// `None` stands for "no declaration" and is only equal to another `None`.
pub struct TypeIdentityComparer;

impl TypeIdentityComparer {
    /// Whether `a` and `b` denote the same declaration
    #[must_use]
    pub fn equals(a: Option<&CilTypeRc>, b: Option<&CilTypeRc>) -> bool {
        let mut left = a.cloned();
        let mut right = b.cloned();

        loop {
            let (x, y) = match (left, right) {
                (None, None) => return true,
                (Some(x), Some(y)) => (x, y),
                _ => return false,
            };

            if Arc::ptr_eq(&x, &y) {
                return true;
            }

            if x.is_nested() != y.is_nested() || !Self::same_shape(&x, &y) {
                return false;
            }

            if !x.is_nested() {
                return true;
            }

            left = x.enclosing();
            right = y.enclosing();
        }
    }

    /// Identity hash of `declaration`; `0` for `None`
    #[must_use]
    pub fn hash(declaration: Option<&CilTypeRc>) -> u64 {
        let mut hash = 0;

        let mut current = declaration.cloned();
        while let Some(ty) = current {
            hash ^= Self::name_hash(&ty.name);
            current = ty.enclosing();
        }

        hash
    }

    fn same_shape(x: &CilType, y: &CilType) -> bool {
        x.namespace == y.namespace
            && x.name == y.name
            && x.generic_param_count() == y.generic_param_count()
    }

    fn name_hash(name: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        hasher.finish()
    }
}

/// A [`CilTypeRc`] compared and hashed by [`TypeIdentityComparer`]
///
/// Lets declarations from different registries key the same `HashMap`:
///
/// ```rust
/// use std::collections::HashMap;
/// use refasm_annotator::metadata::typesystem::{EquivalentType, TypeRegistry, TypeSource};
///
/// let left = TypeRegistry::new(TypeSource::Module("A.dll".into()));
/// let right = TypeRegistry::new(TypeSource::Module("B.dll".into()));
///
/// let mut seen = HashMap::new();
/// seen.insert(EquivalentType(left.create_type("N", "Foo", 0)?), "left");
///
/// let probe = EquivalentType(right.create_type("N", "Foo", 0)?);
/// assert_eq!(seen.get(&probe), Some(&"left"));
/// # Ok::<(), refasm_annotator::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct EquivalentType(pub CilTypeRc);

impl PartialEq for EquivalentType {
    fn eq(&self, other: &Self) -> bool {
        TypeIdentityComparer::equals(Some(&self.0), Some(&other.0))
    }
}

impl Eq for EquivalentType {}

impl Hash for EquivalentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        TypeIdentityComparer::hash(Some(&self.0)).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            token::{Token, TABLE},
            typesystem::{TypeRegistry, TypeSource},
        },
        test::{generic_type, module_registry},
    };

    fn pair() -> (TypeRegistry, TypeRegistry) {
        (module_registry("Lib.Ref.dll"), module_registry("Lib.dll"))
    }

    #[test]
    fn test_absent_declarations() {
        let (left, _) = pair();
        let foo = left.create_type("N", "Foo", 0).unwrap();

        assert!(TypeIdentityComparer::equals(None, None));
        assert!(!TypeIdentityComparer::equals(None, Some(&foo)));
        assert!(!TypeIdentityComparer::equals(Some(&foo), None));
        assert_eq!(TypeIdentityComparer::hash(None), 0);
    }

    #[test]
    fn test_reflexive_and_symmetric() {
        let (left, right) = pair();
        let a = left.create_type("N", "Foo", 0).unwrap();
        let b = right.create_type("N", "Foo", 0).unwrap();
        let c = right.create_type("N", "Bar", 0).unwrap();

        for x in [&a, &b, &c] {
            assert!(TypeIdentityComparer::equals(Some(x), Some(x)));
            for y in [&a, &b, &c] {
                assert_eq!(
                    TypeIdentityComparer::equals(Some(x), Some(y)),
                    TypeIdentityComparer::equals(Some(y), Some(x))
                );
            }
        }
    }

    #[test]
    fn test_same_shape_across_graphs() {
        let (left, right) = pair();
        let a = left.create_type("N", "Foo", 0).unwrap();
        let b = right.create_type("N", "Foo", 0).unwrap();

        assert_ne!(a.source, b.source);
        assert!(TypeIdentityComparer::equals(Some(&a), Some(&b)));
        assert_eq!(
            TypeIdentityComparer::hash(Some(&a)),
            TypeIdentityComparer::hash(Some(&b))
        );
    }

    #[test]
    fn test_generic_arity_mismatch() {
        let (left, right) = pair();
        let a = generic_type(&left, "N", "Foo", &["T"]);
        let b = right.create_type("N", "Foo", 0).unwrap();

        assert!(!TypeIdentityComparer::equals(Some(&a), Some(&b)));
        // arity is not part of the hash
        assert_eq!(
            TypeIdentityComparer::hash(Some(&a)),
            TypeIdentityComparer::hash(Some(&b))
        );
    }

    #[test]
    fn test_generic_param_names_ignored() {
        let (left, right) = pair();
        let a = generic_type(&left, "N", "Foo", &["T"]);
        let b = generic_type(&right, "N", "Foo", &["TItem"]);

        assert!(TypeIdentityComparer::equals(Some(&a), Some(&b)));
    }

    #[test]
    fn test_namespace_and_name_case_sensitive() {
        let (left, right) = pair();
        let a = left.create_type("N", "Foo", 0).unwrap();
        let b = right.create_type("n", "Foo", 0).unwrap();
        let c = right.create_type("N", "foo", 0).unwrap();

        assert!(!TypeIdentityComparer::equals(Some(&a), Some(&b)));
        assert!(!TypeIdentityComparer::equals(Some(&a), Some(&c)));
    }

    #[test]
    fn test_nested_never_equals_top_level() {
        let (left, right) = pair();
        let outer = left.create_type("N", "Outer", 0).unwrap();
        let nested = left.create_nested_type(&outer, "Foo", 0).unwrap();
        let top_level = right.create_type("", "Foo", 0).unwrap();

        assert!(!TypeIdentityComparer::equals(Some(&nested), Some(&top_level)));
        assert!(!TypeIdentityComparer::equals(Some(&top_level), Some(&nested)));
    }

    #[test]
    fn test_nested_compares_enclosing_chain() {
        let (left, right) = pair();
        let outer_a = left.create_type("N", "Outer", 0).unwrap();
        let inner_a = left.create_nested_type(&outer_a, "Inner", 0).unwrap();

        let outer_b = right.create_type("N", "Outer", 0).unwrap();
        let inner_b = right.create_nested_type(&outer_b, "Inner", 0).unwrap();

        let other_outer = right.create_type("M", "Outer", 0).unwrap();
        let inner_c = right.create_nested_type(&other_outer, "Inner", 0).unwrap();

        assert!(TypeIdentityComparer::equals(Some(&inner_a), Some(&inner_b)));
        assert_eq!(
            TypeIdentityComparer::hash(Some(&inner_a)),
            TypeIdentityComparer::hash(Some(&inner_b))
        );
        assert!(!TypeIdentityComparer::equals(Some(&inner_a), Some(&inner_c)));
    }

    #[test]
    fn test_hash_combines_enclosing() {
        let (left, _) = pair();
        let outer = left.create_type("N", "Outer", 0).unwrap();
        let inner = left.create_nested_type(&outer, "Inner", 0).unwrap();

        assert_eq!(
            TypeIdentityComparer::hash(Some(&inner)),
            TypeIdentityComparer::hash(Some(&outer))
                ^ TypeIdentityComparer::name_hash("Inner")
        );
    }

    #[test]
    fn test_deep_nesting_terminates() {
        // Built by hand: the chain has to outlive the test without a registry re-indexing
        // every full name.
        let build = |module: &str| {
            let source = TypeSource::Module(module.into());
            let mut chain: Vec<CilTypeRc> = vec![Arc::new(CilType::new(
                Token::from_parts(TABLE::TYPE_DEF, 1),
                "N",
                "Level",
                source.clone(),
                0,
            ))];
            for row in 2..100_000 {
                let nested = Arc::new(CilType::new(
                    Token::from_parts(TABLE::TYPE_DEF, row),
                    "",
                    "Level",
                    source.clone(),
                    0,
                ));
                nested.set_enclosing(&chain[chain.len() - 1]).unwrap();
                chain.push(nested);
            }
            chain
        };

        let a = build("Lib.Ref.dll");
        let b = build("Lib.dll");
        let (deepest_a, deepest_b) = (&a[a.len() - 1], &b[b.len() - 1]);
        assert!(TypeIdentityComparer::equals(Some(deepest_a), Some(deepest_b)));
        assert_eq!(
            TypeIdentityComparer::hash(Some(deepest_a)),
            TypeIdentityComparer::hash(Some(deepest_b))
        );
        assert!(!TypeIdentityComparer::equals(Some(deepest_a), Some(&b[b.len() - 2])));
    }

    #[test]
    fn test_equivalent_type_key() {
        use std::collections::HashSet;

        let (left, right) = pair();
        let mut set = HashSet::new();
        set.insert(EquivalentType(left.create_type("N", "Foo", 0).unwrap()));
        set.insert(EquivalentType(right.create_type("N", "Foo", 0).unwrap()));
        set.insert(EquivalentType(right.create_type("N", "Bar", 0).unwrap()));

        assert_eq!(set.len(), 2);
        assert!(set.contains(&EquivalentType(
            TypeRegistry::new(TypeSource::Unknown)
                .create_type("N", "Bar", 0)
                .unwrap()
        )));
    }
}
