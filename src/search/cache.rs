//! Decision memoization keyed by aisle-subset identity.

use fixedbitset::FixedBitSet;
use std::collections::HashMap;

use super::individual::UNEVALUATED;

/// The decoder's verdict for one aisle subset: the optimal productivity
/// and the order assignment that achieves it.
///
/// Caching the assignment alongside the score means a cache hit can
/// reconstruct a complete, checkpointable solution — not just its value.
#[derive(Debug, Clone)]
pub struct CachedDecision {
    /// Optimal productivity, or [`UNEVALUATED`] for a known-infeasible
    /// subset.
    pub productivity: f64,
    /// Order indices of the optimal selection; empty when infeasible.
    pub orders: Vec<usize>,
}

impl CachedDecision {
    /// Marks a subset as known infeasible.
    pub fn infeasible() -> Self {
        Self {
            productivity: UNEVALUATED,
            orders: Vec::new(),
        }
    }
}

/// Memoization store mapping an aisle subset to its decoded decision.
///
/// The key is the gene bitset itself — a canonical, order-independent
/// representation, so two individuals selecting the same aisles through
/// different construction orders share one entry. Entries are never
/// evicted; the store lives for exactly one optimization run.
#[derive(Debug, Default)]
pub struct DecisionCache {
    entries: HashMap<FixedBitSet, CachedDecision>,
    hits: u64,
    misses: u64,
}

impl DecisionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached decision for `subset`, if present.
    pub fn lookup(&mut self, subset: &FixedBitSet) -> Option<&CachedDecision> {
        match self.entries.get(subset) {
            Some(decision) => {
                self.hits += 1;
                Some(decision)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores the decision for `subset`. Later stores for the same subset
    /// overwrite, but the decoder never re-solves a cached subset.
    pub fn store(&mut self, subset: FixedBitSet, decision: CachedDecision) {
        self.entries.insert(subset, decision);
    }

    /// Number of distinct subsets decided so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups that found an entry.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that missed.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
