//! Pairing the declarations of two registries by type identity.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::metadata::typesystem::{CilTypeRc, EquivalentType, TypeRegistry};

/// Result of [`match_types`]
#[derive(Debug, Default)]
pub struct TypeMatches {
    /// Identity-equal `(left, right)` pairs, in left token order
    pub pairs: Vec<(CilTypeRc, CilTypeRc)>,
    /// Declarations of the left registry without a counterpart
    pub unmatched_left: Vec<CilTypeRc>,
    /// Declarations of the right registry without a counterpart
    pub unmatched_right: Vec<CilTypeRc>,
}

/// Pair every declaration of `left` with its identity-equal declaration in `right`
///
/// Each declaration is used at most once. When one side holds several identity-equal
/// declarations they are paired in token order and the surplus is reported as unmatched.
/// Primitive types registered by the registries themselves are not considered.
#[must_use]
pub fn match_types(left: &TypeRegistry, right: &TypeRegistry) -> TypeMatches {
    let right_types = right.declared_types();
    let mut index: HashMap<EquivalentType, Vec<usize>> = HashMap::with_capacity(right_types.len());
    for (position, ty) in right_types.iter().enumerate() {
        index
            .entry(EquivalentType(ty.clone()))
            .or_default()
            .push(position);
    }

    let left_types = left.declared_types();
    let candidates: Vec<Option<&Vec<usize>>> = left_types
        .par_iter()
        .map(|ty| index.get(&EquivalentType(ty.clone())))
        .collect();

    let mut used = vec![false; right_types.len()];
    let mut matches = TypeMatches::default();
    for (ty, candidates) in left_types.iter().zip(candidates) {
        let free = candidates.and_then(|positions| positions.iter().find(|&&p| !used[p]));
        match free {
            Some(&position) => {
                used[position] = true;
                matches
                    .pairs
                    .push((ty.clone(), right_types[position].clone()));
            }
            None => matches.unmatched_left.push(ty.clone()),
        }
    }

    matches.unmatched_right = right_types
        .into_iter()
        .zip(used)
        .filter_map(|(ty, used)| (!used).then_some(ty))
        .collect();

    debug!(
        left = ?left.source(),
        right = ?right.source(),
        pairs = matches.pairs.len(),
        unmatched_left = matches.unmatched_left.len(),
        unmatched_right = matches.unmatched_right.len(),
        "matched type declarations"
    );

    matches
}
