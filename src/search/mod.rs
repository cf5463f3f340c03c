//! Hybrid evolutionary search over aisle subsets.
//!
//! The outer loop is a biased random-key style genetic algorithm in which
//! a chromosome is a binary aisle-selection vector: elites are carried
//! between generations, mutants are re-sampled from the bias table, and
//! the rest of the population is filled by biased uniform crossover.
//!
//! The inner step is exact: for a fixed aisle subset the optimal order
//! selection is a boolean linear program, handed to the `lp` oracle and
//! memoized in a [`DecisionCache`] so no subset is ever solved twice.
//!
//! The controller checkpoints every strict improvement through a
//! [`CheckpointSink`] and enforces a wall-clock budget cooperatively —
//! at improvement points and at the top of every generation.
//!
//! # References
//!
//! - Goncalves & Resende (2011), "Biased random-key genetic algorithms
//!   for combinatorial optimization", *J. Heuristics* 17(5), 487–525

mod cache;
mod config;
mod decoder;
mod individual;
mod runner;

pub use cache::{CachedDecision, DecisionCache};
pub use config::SearchConfig;
pub use decoder::WaveDecoder;
pub use individual::{Individual, UNEVALUATED};
pub use runner::{CheckpointSink, NullSink, SearchResult, SearchRunner, StopReason};
