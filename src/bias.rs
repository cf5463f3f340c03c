//! Aisle sampling heuristics.
//!
//! Three per-aisle probability vectors steer the random encoder when it
//! draws fresh aisle-selection vectors. Each value is a probability in
//! `[0, 1]` that the corresponding aisle is switched on:
//!
//! - **Heuristic I**: mean fraction-of-order-served — how much of an
//!   average order the aisle could serve on its own, averaged over the
//!   whole order catalog.
//! - **Heuristic II**: a constant low rate, producing sparse subsets that
//!   keep the denominator (aisles opened) small.
//! - **Heuristic III**: demand-weighted fraction-served — like I, but
//!   large orders weigh more.
//!
//! The table is read-only once built. The search treats it as an input;
//! [`AisleBiasTable::from_instance`] derives it from the catalogs.

use serde::{Deserialize, Serialize};

use crate::model::WaveInstance;

/// Number of sampling heuristics in the table.
pub const N_HEURISTICS: usize = 3;

/// Switch-on rate used by heuristic II for every aisle.
const SPARSE_RATE: f64 = 0.05;

/// Three parallel per-aisle probability vectors, one per heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AisleBiasTable {
    rates: [Vec<f64>; N_HEURISTICS],
}

impl AisleBiasTable {
    /// Builds a table from three explicit rate vectors.
    ///
    /// All three must have the same length (one entry per aisle); call
    /// [`validate`](Self::validate) to check ranges.
    pub fn new(mean_served: Vec<f64>, sparse: Vec<f64>, weighted_served: Vec<f64>) -> Self {
        Self {
            rates: [mean_served, sparse, weighted_served],
        }
    }

    /// Derives the table from an instance's catalogs.
    pub fn from_instance(instance: &WaveInstance) -> Self {
        let n_aisles = instance.n_aisles();
        let n_orders = instance.n_orders();
        let mut mean_served = vec![0.0; n_aisles];
        let mut weighted_served = vec![0.0; n_aisles];

        for (a, aisle) in instance.aisles().iter().enumerate() {
            let mut weighted_sum = 0.0;
            let mut total_weight = 0.0;
            for order in instance.orders() {
                let total_units = order.total_units();
                let served: u64 = aisle
                    .items()
                    .map(|(item, stock)| u64::from(order.quantity(item).min(stock)))
                    .sum();
                let fraction = if total_units > 0 {
                    served as f64 / total_units as f64
                } else {
                    0.0
                };
                mean_served[a] += fraction;
                weighted_sum += fraction * total_units as f64;
                total_weight += total_units as f64;
            }
            if n_orders > 0 {
                mean_served[a] /= n_orders as f64;
            }
            weighted_served[a] = if total_weight > 0.0 {
                weighted_sum / total_weight
            } else {
                0.0
            };
        }

        Self::new(mean_served, vec![SPARSE_RATE; n_aisles], weighted_served)
    }

    /// The rate vector of heuristic `index` (0, 1, or 2).
    pub fn heuristic(&self, index: usize) -> &[f64] {
        &self.rates[index]
    }

    /// Number of aisles covered by the table.
    pub fn n_aisles(&self) -> usize {
        self.rates[0].len()
    }

    /// Validates vector lengths and that every rate lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.rates[0].len();
        for (h, rates) in self.rates.iter().enumerate() {
            if rates.len() != n {
                return Err(format!(
                    "heuristic {h} has {} entries, expected {n}",
                    rates.len()
                ));
            }
            for (a, &rate) in rates.iter().enumerate() {
                if !(0.0..=1.0).contains(&rate) {
                    return Err(format!("heuristic {h}, aisle {a}: rate {rate} outside [0, 1]"));
                }
            }
        }
        Ok(())
    }
}
