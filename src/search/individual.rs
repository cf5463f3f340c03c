//! Candidate solution: a binary aisle-selection vector.

use fixedbitset::FixedBitSet;
use rand::Rng;

use crate::bias::AisleBiasTable;
use crate::model::WaveSolution;

/// Productivity sentinel for unevaluated, empty, or infeasible
/// individuals. Compares below every real productivity.
pub const UNEVALUATED: f64 = f64::NEG_INFINITY;

/// A candidate solution in the evolutionary population.
///
/// The gene bitset is the canonical, order-independent identity of the
/// aisle subset — it doubles as the decision-cache key. `used_orders` and
/// `productivity` are written by the decoder; `Clone` produces the
/// defensive deep copy taken whenever an individual is recorded as the
/// running best.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// Aisle-selection genes, one bit per aisle.
    pub genes: FixedBitSet,
    /// Order indices chosen by the exact decoder; empty until decoded.
    pub used_orders: Vec<usize>,
    /// Units picked per aisle opened; [`UNEVALUATED`] until decoded.
    pub productivity: f64,
}

impl Individual {
    /// Creates an empty individual with `n_aisles` genes, all off.
    pub fn new(n_aisles: usize) -> Self {
        Self {
            genes: FixedBitSet::with_capacity(n_aisles),
            used_orders: Vec::new(),
            productivity: UNEVALUATED,
        }
    }

    /// Populates the gene vector from the bias table.
    ///
    /// Draws one uniform value to select heuristic I, II, or III (equal
    /// thirds of `[0, 1)`), then switches each gene on independently with
    /// the selected heuristic's per-aisle probability.
    pub fn encode<R: Rng>(&mut self, bias: &AisleBiasTable, rng: &mut R) {
        let pick = rng.random_range(0.0..1.0);
        let heuristic = if pick < 0.33 {
            0
        } else if pick < 0.66 {
            1
        } else {
            2
        };
        let rates = bias.heuristic(heuristic);

        self.genes.clear();
        for (aisle, &rate) in rates.iter().enumerate() {
            if rng.random_range(0.0..1.0) < rate {
                self.genes.insert(aisle);
            }
        }
    }

    /// Indices of the selected aisles, ascending.
    pub fn selected_aisles(&self) -> Vec<usize> {
        self.genes.ones().collect()
    }

    /// Number of selected aisles.
    pub fn selected_aisle_count(&self) -> usize {
        self.genes.count_ones(..)
    }

    /// Whether no aisle is selected.
    pub fn is_empty_selection(&self) -> bool {
        self.genes.is_clear()
    }

    /// Whether the decoder produced a real productivity for this
    /// individual.
    pub fn is_evaluated(&self) -> bool {
        self.productivity.is_finite()
    }

    /// Snapshot of this individual as a standalone solution.
    pub fn to_solution(&self) -> WaveSolution {
        WaveSolution {
            orders: self.used_orders.clone(),
            aisles: self.selected_aisles(),
            productivity: self.productivity,
        }
    }
}
