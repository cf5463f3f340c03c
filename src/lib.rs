//! Warehouse wave-picking optimizer.
//!
//! Selects a subset of storage aisles to open and a subset of customer
//! orders to pick from them, maximizing **productivity** — units picked
//! divided by aisles opened — subject to per-item stock feasibility and
//! inclusive bounds on the total units in the wave.
//!
//! The engine is a hybrid matheuristic:
//!
//! - **Evolutionary outer search**: a biased random-key style population
//!   loop over binary aisle-selection vectors, with elite preservation,
//!   mutant injection, and biased uniform crossover.
//! - **Exact inner decode**: for a fixed aisle subset, the optimal order
//!   selection is a small boolean linear program, solved to proven
//!   optimality by an external oracle (HiGHS by default).
//! - **Decision cache**: decodes are memoized by unordered subset
//!   identity, so each distinct aisle subset is solved at most once per
//!   run.
//!
//! Improving solutions are checkpointed as they are found, making the
//! optimizer safely interruptible: the last checkpoint written before
//! termination is the answer.
//!
//! # Modules
//!
//! - **`model`**: Problem catalog — `Order`, `Aisle`, `WaveBounds`,
//!   `WaveInstance`, `WaveSolution`
//! - **`bias`**: Per-aisle sampling probabilities that steer the random
//!   encoder
//! - **`lp`**: Boolean LP modeling layer and the exact-solver oracle
//! - **`search`**: The evolutionary core — individuals, decoder, cache,
//!   population controller
//! - **`io`**: Instance text format and checkpoint/solution output
//!
//! # References
//!
//! - Bean (1994), "Genetic algorithms and random keys for sequencing and
//!   optimization"
//! - Goncalves & Resende (2011), "Biased random-key genetic algorithms for
//!   combinatorial optimization", *J. Heuristics* 17(5), 487–525

pub mod bias;
pub mod io;
pub mod lp;
pub mod model;
pub mod search;
