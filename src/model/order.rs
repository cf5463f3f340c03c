//! Customer order model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A customer order: item index → requested quantity.
///
/// Item keys are unique and iteration order carries no meaning.
/// Immutable after load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    quantities: HashMap<usize, u32>,
}

impl Order {
    /// Creates an order from an item→quantity map.
    pub fn new(quantities: HashMap<usize, u32>) -> Self {
        Self { quantities }
    }

    /// Creates an order from `(item, quantity)` pairs.
    ///
    /// Duplicate items keep the last quantity seen.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, u32)>) -> Self {
        Self {
            quantities: pairs.into_iter().collect(),
        }
    }

    /// Requested quantity of `item` (0 if the order does not contain it).
    pub fn quantity(&self, item: usize) -> u32 {
        self.quantities.get(&item).copied().unwrap_or(0)
    }

    /// Iterates over `(item, quantity)` entries.
    pub fn items(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.quantities.iter().map(|(&item, &qty)| (item, qty))
    }

    /// Total units requested across all items.
    pub fn total_units(&self) -> u64 {
        self.quantities.values().map(|&q| q as u64).sum()
    }

    /// Number of distinct items in the order.
    pub fn item_count(&self) -> usize {
        self.quantities.len()
    }

    /// Whether the order requests nothing.
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_units() {
        let order = Order::from_pairs([(0, 2), (3, 5)]);
        assert_eq!(order.total_units(), 7);
        assert_eq!(order.item_count(), 2);
    }

    #[test]
    fn test_missing_item_quantity_is_zero() {
        let order = Order::from_pairs([(1, 4)]);
        assert_eq!(order.quantity(1), 4);
        assert_eq!(order.quantity(0), 0);
    }

    #[test]
    fn test_empty_order() {
        let order = Order::default();
        assert!(order.is_empty());
        assert_eq!(order.total_units(), 0);
    }
}
