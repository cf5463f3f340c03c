//! Problem instance: immutable catalogs plus wave-size bounds.

use serde::{Deserialize, Serialize};

use super::{Aisle, Order};

/// Inclusive lower/upper bounds on the total units picked in one wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveBounds {
    /// Minimum total units (inclusive).
    pub lower: u64,
    /// Maximum total units (inclusive).
    pub upper: u64,
}

impl WaveBounds {
    /// Creates a bounds pair.
    pub fn new(lower: u64, upper: u64) -> Self {
        Self { lower, upper }
    }

    /// Whether `units` lies within the bounds, inclusive on both ends.
    pub fn contains(&self, units: u64) -> bool {
        self.lower <= units && units <= self.upper
    }
}

/// An immutable wave-picking problem instance.
///
/// Owns the order and aisle catalogs, the size of the item universe, and
/// the wave-size bounds. Built once before the search starts and shared
/// read-only by every component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveInstance {
    orders: Vec<Order>,
    aisles: Vec<Aisle>,
    n_items: usize,
    bounds: WaveBounds,
}

impl WaveInstance {
    /// Creates an instance. Call [`validate`](Self::validate) before
    /// handing it to the search.
    pub fn new(orders: Vec<Order>, aisles: Vec<Aisle>, n_items: usize, bounds: WaveBounds) -> Self {
        Self {
            orders,
            aisles,
            n_items,
            bounds,
        }
    }

    /// The order catalog.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The aisle catalog.
    pub fn aisles(&self) -> &[Aisle] {
        &self.aisles
    }

    /// Order at `index`.
    pub fn order(&self, index: usize) -> &Order {
        &self.orders[index]
    }

    /// Aisle at `index`.
    pub fn aisle(&self, index: usize) -> &Aisle {
        &self.aisles[index]
    }

    /// Number of orders.
    pub fn n_orders(&self) -> usize {
        self.orders.len()
    }

    /// Number of aisles.
    pub fn n_aisles(&self) -> usize {
        self.aisles.len()
    }

    /// Size of the item universe; valid item indices are `0..n_items`.
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Wave-size bounds.
    pub fn bounds(&self) -> WaveBounds {
        self.bounds
    }

    /// Total units requested by each order, indexed by order.
    pub fn order_units(&self) -> Vec<u64> {
        self.orders.iter().map(|o| o.total_units()).collect()
    }

    /// Validates the instance for consistency.
    ///
    /// Checks that every item index referenced by an order or aisle is
    /// inside `0..n_items` and that the bounds are ordered.
    pub fn validate(&self) -> Result<(), String> {
        if self.bounds.lower > self.bounds.upper {
            return Err(format!(
                "wave bounds out of order: lower ({}) > upper ({})",
                self.bounds.lower, self.bounds.upper
            ));
        }
        for (i, order) in self.orders.iter().enumerate() {
            for (item, _) in order.items() {
                if item >= self.n_items {
                    return Err(format!("order {i}: item index {item} out of range"));
                }
            }
        }
        for (a, aisle) in self.aisles.iter().enumerate() {
            for (item, _) in aisle.items() {
                if item >= self.n_items {
                    return Err(format!("aisle {a}: item index {item} out of range"));
                }
            }
        }
        Ok(())
    }
}
