//! The expression tree data model.
//!
//! An [`Expression`] is a sum of [`Term`]s, a term is a product / quotient of [`Power`]s, and a
//! power is an exponent tower of [`Factor`]s. All nodes are immutable values: every operation that
//! looks like it changes a node returns a new one.
//!
//! Equality and hashing are order-insensitive for the commutative collections (the terms of an
//! expression and the powers of a term), so that `x + y` and `y + x` are the same key in a hash
//! map.

mod convert;
pub mod equation;
pub mod expression;
pub mod factor;
mod fmt;
pub mod function;
pub mod power;
pub mod term;

pub use equation::Equation;
pub use expression::{AddOp, Expression, SingleExpression};
pub use factor::Factor;
pub use function::SymbolicFunction;
pub use power::Power;
pub use term::{MulOp, Term};

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Returns true if both slices contain the same elements the same number of times, in any order.
pub(crate) fn multiset_eq<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut used = vec![false; b.len()];
    a.iter().all(|item| {
        let found = b
            .iter()
            .enumerate()
            .position(|(i, other)| !used[i] && item == other);
        match found {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}

/// Hashes a collection so that the result does not depend on the order of its items.
pub(crate) fn hash_unordered<T: Hash, H: Hasher>(items: impl ExactSizeIterator<Item = T>, state: &mut H) {
    let len = items.len();
    let sum = items.fold(0u64, |sum, item| {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        sum.wrapping_add(hasher.finish())
    });
    state.write_u64(sum);
    state.write_usize(len);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiset_counts_duplicates() {
        assert!(multiset_eq(&[1, 2, 2], &[2, 1, 2]));
        assert!(!multiset_eq(&[1, 1, 2], &[1, 2, 2]));
        assert!(!multiset_eq(&[1, 2], &[1, 2, 3]));
    }

    #[test]
    fn unordered_hash_ignores_order() {
        let hash = |items: &[&str]| {
            let mut hasher = DefaultHasher::new();
            hash_unordered(items.iter(), &mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&["a", "b", "c"]), hash(&["c", "a", "b"]));
        assert_ne!(hash(&["a", "b"]), hash(&["a", "b", "b"]));
    }
}
