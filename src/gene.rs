//! Candidate-solution representation.
//!
//! A [`Gene`] is an ordered, index-addressable sequence of allele values plus
//! two pieces of engine-owned metadata: a cached fitness score and a survival
//! age. The allele store is a sparse, auto-extending vector: reads past the
//! current length yield a configured null value, and writes past the current
//! length grow the sequence, filling the gap with that null value.
//!
//! The fitness cache is the load-bearing part of the contract: it is cleared
//! exactly when an allele write changes a value, so a pure fitness function
//! never needs to be re-run for an untouched gene.

use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single candidate solution: allele sequence + fitness cache + age.
///
/// `A` is the allele type — any clonable, comparable value (integers and bits
/// being the common cases).
///
/// # Fitness cache
///
/// `fitness` starts as `None` and is set by whoever evaluates the gene
/// (normally the solver). [`set`](Gene::set) clears it whenever the written
/// value differs from the prior value at that index; writing the same value
/// leaves the cache intact.
///
/// # Equality and hashing
///
/// `PartialEq`/`Eq`/`Hash` cover the allele sequence only (order-sensitive),
/// so genes can be used as set or map keys by strategies that deduplicate
/// candidates. Fitness, age, and the null value do not participate.
///
/// # Examples
///
/// ```
/// use evogen::gene::Gene;
///
/// let mut g: Gene<i64> = Gene::new(0);
/// g.set(2, 7);                  // auto-extends: [0, 0, 7]
/// assert_eq!(g.len(), 3);
/// assert_eq!(*g.get(1), 0);
/// assert_eq!(*g.get(99), 0);    // reads past the end yield the null value
///
/// g.fitness = Some(1.5);
/// g.set(2, 7);                  // same value: cache untouched
/// assert_eq!(g.fitness, Some(1.5));
/// g.set(2, 8);                  // changed value: cache cleared
/// assert_eq!(g.fitness, None);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gene<A> {
    alleles: Vec<A>,
    null_val: A,

    /// Cached fitness score; `None` until computed.
    ///
    /// Owned by whoever currently holds the gene (the solver, or the strategy
    /// processing it). Cleared automatically by value-changing allele writes.
    pub fitness: Option<f64>,

    /// Number of generations this gene has survived. Starts at 0.
    pub age: u32,
}

impl<A> Gene<A> {
    /// Creates an empty gene with the given null/fill value.
    pub fn new(null_val: A) -> Self {
        Self {
            alleles: Vec::new(),
            null_val,
            fitness: None,
            age: 0,
        }
    }

    /// Creates a gene from an existing allele sequence.
    pub fn from_alleles(null_val: A, alleles: Vec<A>) -> Self {
        Self {
            alleles,
            null_val,
            fitness: None,
            age: 0,
        }
    }

    /// Number of alleles currently stored.
    pub fn len(&self) -> usize {
        self.alleles.len()
    }

    /// Returns `true` if no alleles are stored.
    pub fn is_empty(&self) -> bool {
        self.alleles.is_empty()
    }

    /// Read-only view of the allele sequence.
    pub fn alleles(&self) -> &[A] {
        &self.alleles
    }

    /// The configured null/fill value.
    pub fn null_val(&self) -> &A {
        &self.null_val
    }

    /// Iterates over the stored alleles.
    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.alleles.iter()
    }

    /// Returns the allele at `index`, or the null value past the end.
    pub fn get(&self, index: usize) -> &A {
        self.alleles.get(index).unwrap_or(&self.null_val)
    }

    /// Appends an allele, clearing the fitness cache.
    ///
    /// Appending changes the sequence length, so any cached score is stale
    /// regardless of the appended value.
    pub fn push(&mut self, value: A) {
        self.alleles.push(value);
        self.fitness = None;
    }
}

impl<A: Clone + PartialEq> Gene<A> {
    /// Writes `value` at `index`, auto-extending with the null value.
    ///
    /// Intermediate positions created by the extension are filled with clones
    /// of the null value. The fitness cache is cleared iff the prior value at
    /// `index` — the null value, for a first-time write past the end —
    /// differs from `value`.
    pub fn set(&mut self, index: usize, value: A) {
        if index >= self.alleles.len() {
            self.alleles.resize(index + 1, self.null_val.clone());
        }
        if self.alleles[index] != value {
            self.fitness = None;
        }
        self.alleles[index] = value;
    }
}

impl<A: PartialEq> PartialEq for Gene<A> {
    fn eq(&self, other: &Self) -> bool {
        self.alleles == other.alleles
    }
}

impl<A: Eq> Eq for Gene<A> {}

impl<A: Hash> Hash for Gene<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.alleles.hash(state);
    }
}

impl<A: fmt::Debug> fmt::Display for Gene<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fitness {
            Some(fit) => write!(f, "<fit={}, age={}, alleles={:?}>", fit, self.age, self.alleles),
            None => write!(f, "<fit=?, age={}, alleles={:?}>", self.age, self.alleles),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    // ---- Sparse read/write ----

    #[test]
    fn test_get_past_end_returns_null_val() {
        let g: Gene<i64> = Gene::from_alleles(-1, vec![3, 4]);
        assert_eq!(*g.get(0), 3);
        assert_eq!(*g.get(1), 4);
        assert_eq!(*g.get(2), -1);
        assert_eq!(*g.get(1000), -1);
    }

    #[test]
    fn test_set_auto_extends_with_null_val() {
        let mut g: Gene<i64> = Gene::new(0);
        g.set(3, 9);
        assert_eq!(g.alleles(), &[0, 0, 0, 9]);
        assert_eq!(g.len(), 4);
    }

    #[test]
    fn test_set_in_bounds_overwrites() {
        let mut g: Gene<i64> = Gene::from_alleles(0, vec![1, 2, 3]);
        g.set(1, 5);
        assert_eq!(g.alleles(), &[1, 5, 3]);
    }

    // ---- Fitness cache invalidation ----

    #[test]
    fn test_same_value_write_keeps_cache() {
        let mut g: Gene<i64> = Gene::from_alleles(0, vec![1, 2, 3]);
        g.fitness = Some(6.0);
        g.set(1, 2);
        assert_eq!(g.fitness, Some(6.0));
    }

    #[test]
    fn test_changed_value_write_clears_cache() {
        let mut g: Gene<i64> = Gene::from_alleles(0, vec![1, 2, 3]);
        g.fitness = Some(6.0);
        g.set(1, 7);
        assert_eq!(g.fitness, None);
    }

    #[test]
    fn test_extension_write_of_null_val_keeps_cache() {
        // The freshly filled slot holds the null value, so writing the null
        // value there is a same-value write.
        let mut g: Gene<i64> = Gene::from_alleles(0, vec![1]);
        g.fitness = Some(1.0);
        g.set(4, 0);
        assert_eq!(g.fitness, Some(1.0));
        assert_eq!(g.len(), 5);
    }

    #[test]
    fn test_extension_write_of_other_value_clears_cache() {
        let mut g: Gene<i64> = Gene::from_alleles(0, vec![1]);
        g.fitness = Some(1.0);
        g.set(4, 2);
        assert_eq!(g.fitness, None);
    }

    #[test]
    fn test_push_clears_cache() {
        let mut g: Gene<i64> = Gene::new(0);
        g.fitness = Some(0.0);
        g.push(1);
        assert_eq!(g.fitness, None);
        assert_eq!(g.alleles(), &[1]);
    }

    // ---- Equality and hashing ----

    #[test]
    fn test_eq_over_alleles_only() {
        let mut a: Gene<i64> = Gene::from_alleles(0, vec![1, 0, 1]);
        let mut b: Gene<i64> = Gene::from_alleles(9, vec![1, 0, 1]);
        a.fitness = Some(2.0);
        b.age = 7;
        assert_eq!(a, b);

        let c: Gene<i64> = Gene::from_alleles(0, vec![1, 1, 0]);
        assert_ne!(a, c); // order-sensitive
    }

    #[test]
    fn test_usable_as_set_key() {
        let mut set: HashSet<Gene<i64>> = HashSet::new();
        set.insert(Gene::from_alleles(0, vec![1, 2]));
        set.insert(Gene::from_alleles(0, vec![1, 2]));
        set.insert(Gene::from_alleles(0, vec![2, 1]));
        assert_eq!(set.len(), 2);
    }

    // ---- Metadata ----

    #[test]
    fn test_new_gene_metadata() {
        let g: Gene<i64> = Gene::new(0);
        assert_eq!(g.age, 0);
        assert_eq!(g.fitness, None);
        assert!(g.is_empty());
    }

    #[test]
    fn test_display() {
        let mut g: Gene<i64> = Gene::from_alleles(0, vec![1, 0]);
        assert_eq!(g.to_string(), "<fit=?, age=0, alleles=[1, 0]>");
        g.fitness = Some(1.0);
        g.age = 3;
        assert_eq!(g.to_string(), "<fit=1, age=3, alleles=[1, 0]>");
    }

    // ---- Properties ----

    proptest! {
        #[test]
        fn prop_set_then_get_roundtrips(index in 0usize..64, value in -100i64..100) {
            let mut g: Gene<i64> = Gene::new(0);
            g.set(index, value);
            prop_assert_eq!(*g.get(index), value);
            prop_assert_eq!(g.len(), index + 1);
        }

        #[test]
        fn prop_cache_cleared_iff_value_changed(
            alleles in proptest::collection::vec(-10i64..10, 1..16),
            index in 0usize..16,
            value in -10i64..10,
        ) {
            let mut g: Gene<i64> = Gene::from_alleles(0, alleles);
            g.fitness = Some(42.0);
            let prior = g.get(index).clone();
            g.set(index, value);
            if prior == value {
                prop_assert_eq!(g.fitness, Some(42.0));
            } else {
                prop_assert_eq!(g.fitness, None);
            }
        }

        #[test]
        fn prop_gap_filled_with_null_val(index in 1usize..32) {
            let mut g: Gene<i64> = Gene::new(-7);
            g.set(index, 1);
            for i in 0..index {
                prop_assert_eq!(*g.get(i), -7);
            }
        }
    }
}
