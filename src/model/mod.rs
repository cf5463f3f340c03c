//! Problem catalog for the wave-picking domain.
//!
//! Immutable in-memory representation of a problem instance — customer
//! orders, storage aisles, the item universe, and the wave-size bounds —
//! plus the solution type and its feasibility verification.
//!
//! All catalogs are built once (by the `io` parser or by hand in tests)
//! and never mutated during a search.

mod aisle;
mod instance;
mod order;
mod solution;

pub use aisle::Aisle;
pub use instance::{WaveBounds, WaveInstance};
pub use order::Order;
pub use solution::WaveSolution;
