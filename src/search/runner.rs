//! Population controller: the evolutionary loop.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::cache::DecisionCache;
use super::config::SearchConfig;
use super::decoder::WaveDecoder;
use super::individual::{Individual, UNEVALUATED};
use crate::bias::AisleBiasTable;
use crate::lp::LpSolver;
use crate::model::{WaveInstance, WaveSolution};

/// Receives the best solution every time it strictly improves.
///
/// The sink is called many times per run and must overwrite its previous
/// output each time: the optimizer is an anytime algorithm, and the last
/// write before termination is the answer. A write failure aborts the
/// run.
pub trait CheckpointSink {
    fn record(&mut self, solution: &WaveSolution) -> io::Result<()>;
}

/// Sink that discards every checkpoint.
#[derive(Debug, Default)]
pub struct NullSink;

impl CheckpointSink for NullSink {
    fn record(&mut self, _solution: &WaveSolution) -> io::Result<()> {
        Ok(())
    }
}

/// Why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// All configured generations completed.
    GenerationsExhausted,
    /// The wall-clock budget dropped below the reserve threshold.
    TimeBudget,
    /// The cancellation token was set.
    Cancelled,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best solution found, if any individual ever decoded feasibly.
    pub best: Option<WaveSolution>,
    /// Fully completed generations.
    pub generations: usize,
    /// Why the run stopped.
    pub stop_reason: StopReason,
    /// Distinct aisle subsets decided during the run.
    pub cache_entries: usize,
    /// Decodes served from the cache.
    pub cache_hits: u64,
}

/// Wall-clock budget read at cooperative checkpoints.
struct TimeBudget {
    started: Instant,
    budget: Duration,
    reserve: Duration,
}

impl TimeBudget {
    fn new(budget_ms: u64, reserve_ms: u64) -> Self {
        Self {
            started: Instant::now(),
            budget: Duration::from_millis(budget_ms),
            reserve: Duration::from_millis(reserve_ms),
        }
    }

    fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started.elapsed())
    }

    /// Whether the remaining budget has dropped into the reserve.
    fn nearly_exhausted(&self) -> bool {
        self.remaining() <= self.reserve
    }
}

/// Executes the evolutionary search.
///
/// # Usage
///
/// ```ignore
/// let solver = HighsLpSolver::new();
/// let mut sink = FileCheckpoint::new("wave.out");
/// let result = SearchRunner::run(&instance, &bias, &solver, &mut sink, &config)?;
/// ```
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the search to completion.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`SearchConfig::validate`] first to get a descriptive error).
    pub fn run<S: LpSolver, K: CheckpointSink>(
        instance: &WaveInstance,
        bias: &AisleBiasTable,
        solver: &S,
        sink: &mut K,
        config: &SearchConfig,
    ) -> io::Result<SearchResult> {
        Self::run_with_cancel(instance, bias, solver, sink, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// The token is honored cooperatively: at the top of every generation
    /// and after every improving individual.
    pub fn run_with_cancel<S: LpSolver, K: CheckpointSink>(
        instance: &WaveInstance,
        bias: &AisleBiasTable,
        solver: &S,
        sink: &mut K,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> io::Result<SearchResult> {
        config.validate().expect("invalid SearchConfig");

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };

        let budget = TimeBudget::new(config.time_budget_ms, config.reserve_ms);
        let decoder = WaveDecoder::new(instance, solver);
        let mut cache = DecisionCache::new();

        let n_aisles = instance.n_aisles();
        let pop_size = config.population_size;
        let elite_count = config.elite_count();
        let mutant_count = config.mutant_count();

        let mut best: Option<Individual> = None;
        let mut population: Vec<Individual> = Vec::with_capacity(pop_size);
        let mut generations = 0usize;
        let mut stop_reason = StopReason::GenerationsExhausted;

        'search: for generation in 0..config.n_generations {
            if let Some(flag) = &cancel {
                if flag.load(Ordering::Relaxed) {
                    stop_reason = StopReason::Cancelled;
                    break 'search;
                }
            }
            if budget.nearly_exhausted() {
                stop_reason = StopReason::TimeBudget;
                break 'search;
            }

            if generation == 0 {
                for _ in 0..pop_size {
                    let mut fresh = Individual::new(n_aisles);
                    fresh.encode(bias, &mut rng);
                    decoder.decode(&mut fresh, &mut cache);
                    let out_of_time = record_improvement(&fresh, &mut best, sink, &budget)?;
                    population.push(fresh);
                    if out_of_time {
                        stop_reason = StopReason::TimeBudget;
                        break 'search;
                    }
                }
            } else {
                // Stable sort: equal-productivity individuals keep their
                // previous relative order.
                population.sort_by(|a, b| {
                    b.productivity
                        .partial_cmp(&a.productivity)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

                let mut next: Vec<Individual> = Vec::with_capacity(pop_size);
                next.extend(population[..elite_count].iter().cloned());

                for _ in 0..mutant_count {
                    let mut mutant = Individual::new(n_aisles);
                    mutant.encode(bias, &mut rng);
                    decoder.decode(&mut mutant, &mut cache);
                    let out_of_time = record_improvement(&mutant, &mut best, sink, &budget)?;
                    next.push(mutant);
                    if out_of_time {
                        stop_reason = StopReason::TimeBudget;
                        break 'search;
                    }
                }

                while next.len() < pop_size {
                    let elite_parent = &population[rng.random_range(0..elite_count)];
                    let other_parent = &population[rng.random_range(elite_count..pop_size)];
                    let mut child = crossover(
                        elite_parent,
                        other_parent,
                        config.elite_inheritance_prob,
                        &mut rng,
                    );
                    decoder.decode(&mut child, &mut cache);
                    let out_of_time = record_improvement(&child, &mut best, sink, &budget)?;
                    next.push(child);
                    if out_of_time {
                        stop_reason = StopReason::TimeBudget;
                        break 'search;
                    }
                }

                population = next;
            }

            generations = generation + 1;
            tracing::debug!(
                generation,
                best = best.as_ref().map_or(UNEVALUATED, |b| b.productivity),
                cached_subsets = cache.len(),
                "generation complete"
            );
        }

        tracing::info!(
            generations,
            stop_reason = ?stop_reason,
            best = best.as_ref().map_or(UNEVALUATED, |b| b.productivity),
            cache_entries = cache.len(),
            cache_hits = cache.hits(),
            "search finished"
        );

        Ok(SearchResult {
            best: best.map(|b| b.to_solution()),
            generations,
            stop_reason,
            cache_entries: cache.len(),
            cache_hits: cache.hits(),
        })
    }
}

/// Biased uniform crossover: each gene comes from the elite parent with
/// probability `elite_inheritance_prob`, otherwise from the other parent.
fn crossover<R: Rng>(
    elite: &Individual,
    other: &Individual,
    elite_inheritance_prob: f64,
    rng: &mut R,
) -> Individual {
    let n_aisles = elite.genes.len();
    let mut child = Individual::new(n_aisles);
    for gene in 0..n_aisles {
        let source = if rng.random_range(0.0..1.0) < elite_inheritance_prob {
            elite
        } else {
            other
        };
        child.genes.set(gene, source.genes.contains(gene));
    }
    child
}

/// If `candidate` strictly beats the incumbent, deep-copies it into the
/// best slot and checkpoints it. Returns whether the budget has dropped
/// into the reserve after the checkpoint.
fn record_improvement<K: CheckpointSink>(
    candidate: &Individual,
    best: &mut Option<Individual>,
    sink: &mut K,
    budget: &TimeBudget,
) -> io::Result<bool> {
    let incumbent = best.as_ref().map_or(UNEVALUATED, |b| b.productivity);
    if candidate.productivity <= incumbent {
        return Ok(false);
    }

    // Defensive copy: population slots are rebuilt every generation and
    // must not alias the recorded best.
    let snapshot = candidate.clone();
    sink.record(&snapshot.to_solution())?;
    tracing::info!(
        productivity = snapshot.productivity,
        orders = snapshot.used_orders.len(),
        aisles = snapshot.selected_aisle_count(),
        "new best solution"
    );
    *best = Some(snapshot);
    Ok(budget.nearly_exhausted())
}
