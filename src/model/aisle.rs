//! Storage aisle model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A storage aisle: item index → available quantity.
///
/// Immutable after load. Stock is not consumed by the optimizer — the
/// search only ever compares aggregate stock against aggregate demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aisle {
    stock: HashMap<usize, u32>,
}

impl Aisle {
    /// Creates an aisle from an item→quantity map.
    pub fn new(stock: HashMap<usize, u32>) -> Self {
        Self { stock }
    }

    /// Creates an aisle from `(item, quantity)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, u32)>) -> Self {
        Self {
            stock: pairs.into_iter().collect(),
        }
    }

    /// Available quantity of `item` (0 if the aisle does not stock it).
    pub fn stock(&self, item: usize) -> u32 {
        self.stock.get(&item).copied().unwrap_or(0)
    }

    /// Iterates over `(item, quantity)` entries.
    pub fn items(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.stock.iter().map(|(&item, &qty)| (item, qty))
    }

    /// Number of distinct items stocked.
    pub fn item_count(&self) -> usize {
        self.stock.len()
    }

    /// Whether the aisle stocks nothing.
    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}
