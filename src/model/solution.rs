//! Wave solution and feasibility verification.

use serde::{Deserialize, Serialize};

use super::WaveInstance;

/// A complete wave selection: the chosen orders, the opened aisles, and
/// the resulting productivity (units picked / aisles opened).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSolution {
    /// Indices of the selected orders.
    pub orders: Vec<usize>,
    /// Indices of the opened aisles.
    pub aisles: Vec<usize>,
    /// Units picked divided by aisles opened.
    pub productivity: f64,
}

impl WaveSolution {
    /// Total units requested by the selected orders.
    pub fn total_units(&self, instance: &WaveInstance) -> u64 {
        self.orders
            .iter()
            .map(|&i| instance.order(i).total_units())
            .sum()
    }

    /// Verifies the solution against the instance invariants:
    ///
    /// - for every item, demand over the selected orders does not exceed
    ///   stock over the opened aisles;
    /// - total units lie within the wave bounds, inclusive;
    /// - productivity equals units / aisle count.
    pub fn verify(&self, instance: &WaveInstance) -> Result<(), String> {
        if self.aisles.is_empty() {
            return Err("no aisles opened".into());
        }
        let mut stock = vec![0u64; instance.n_items()];
        for &a in &self.aisles {
            for (item, qty) in instance.aisle(a).items() {
                stock[item] += qty as u64;
            }
        }
        let mut demand = vec![0u64; instance.n_items()];
        for &o in &self.orders {
            for (item, qty) in instance.order(o).items() {
                demand[item] += qty as u64;
            }
        }
        for item in 0..instance.n_items() {
            if demand[item] > stock[item] {
                return Err(format!(
                    "item {item}: demand {} exceeds stock {}",
                    demand[item], stock[item]
                ));
            }
        }
        let units = self.total_units(instance);
        if !instance.bounds().contains(units) {
            return Err(format!(
                "wave size {units} outside bounds [{}, {}]",
                instance.bounds().lower,
                instance.bounds().upper
            ));
        }
        let expected = units as f64 / self.aisles.len() as f64;
        if (self.productivity - expected).abs() > 1e-9 {
            return Err(format!(
                "productivity {} does not match units/aisles = {expected}",
                self.productivity
            ));
        }
        Ok(())
    }
}
