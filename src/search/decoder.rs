//! Exact order-selection decoding for a fixed aisle subset.

use fixedbitset::FixedBitSet;

use super::cache::{CachedDecision, DecisionCache};
use super::individual::Individual;
use crate::lp::{BoolLp, LinearRow, LpSolver, ObjectiveSense};
use crate::model::WaveInstance;

/// Decodes an individual's aisle subset into the provably optimal order
/// selection and its productivity.
///
/// For each subset the decoder formulates one boolean LP — maximize
/// `Σ units_i · x_i / |aisles|` subject to per-item stock rows and the
/// two-sided wave-size row — and submits it to the oracle. Results are
/// memoized in the [`DecisionCache`], so each distinct subset costs at
/// most one oracle call per run.
pub struct WaveDecoder<'a, S: LpSolver> {
    instance: &'a WaveInstance,
    solver: &'a S,
    /// Total units per order, precomputed once.
    order_units: Vec<u64>,
    /// Per-item list of `(order, quantity)` demands, precomputed once.
    item_demands: Vec<Vec<(usize, u32)>>,
}

impl<'a, S: LpSolver> WaveDecoder<'a, S> {
    pub fn new(instance: &'a WaveInstance, solver: &'a S) -> Self {
        let order_units = instance.order_units();
        let mut item_demands = vec![Vec::new(); instance.n_items()];
        for (i, order) in instance.orders().iter().enumerate() {
            for (item, qty) in order.items() {
                item_demands[item].push((i, qty));
            }
        }
        Self {
            instance,
            solver,
            order_units,
            item_demands,
        }
    }

    /// Resolves `individual`'s order selection and productivity.
    ///
    /// An empty aisle selection short-circuits to the sentinel without
    /// touching the oracle or the cache. A cache hit copies both the
    /// score and the stored order assignment. A miss solves, then caches
    /// the outcome — including the sentinel for infeasible subsets, so
    /// known-dead subsets are never re-solved.
    pub fn decode(&self, individual: &mut Individual, cache: &mut DecisionCache) {
        let open = individual.selected_aisle_count();
        if open == 0 {
            return;
        }

        if let Some(hit) = cache.lookup(&individual.genes) {
            individual.productivity = hit.productivity;
            individual.used_orders = hit.orders.clone();
            return;
        }

        let decision = self.solve_subset(&individual.genes, open);
        individual.productivity = decision.productivity;
        individual.used_orders = decision.orders.clone();
        cache.store(individual.genes.clone(), decision);
    }

    fn solve_subset(&self, subset: &FixedBitSet, open: usize) -> CachedDecision {
        let bounds = self.instance.bounds();
        let n_orders = self.instance.n_orders();

        // Aggregate stock per item across the open aisles.
        let mut stock = vec![0u64; self.instance.n_items()];
        for aisle in subset.ones() {
            for (item, qty) in self.instance.aisle(aisle).items() {
                stock[item] += qty as u64;
            }
        }

        let mut lp = BoolLp::new(n_orders, ObjectiveSense::Maximize);
        let per_aisle = 1.0 / open as f64;
        for (i, &units) in self.order_units.iter().enumerate() {
            lp.set_objective_coefficient(i, units as f64 * per_aisle);
        }

        for (item, demands) in self.item_demands.iter().enumerate() {
            if demands.is_empty() {
                continue;
            }
            let terms = demands.iter().map(|&(i, qty)| (i, qty as f64)).collect();
            lp.add_row(LinearRow::upper_bounded(terms, stock[item] as f64));
        }

        let wave_terms = self
            .order_units
            .iter()
            .enumerate()
            .map(|(i, &units)| (i, units as f64))
            .collect();
        lp.add_row(LinearRow::bounded(
            wave_terms,
            bounds.lower as f64,
            bounds.upper as f64,
        ));

        let solution = self.solver.solve(&lp);
        if !solution.is_optimal() {
            tracing::debug!(status = ?solution.status, aisles = open, "subset has no optimal selection");
            return CachedDecision::infeasible();
        }

        let orders: Vec<usize> = solution
            .assignment
            .iter()
            .enumerate()
            .filter_map(|(i, &chosen)| chosen.then_some(i))
            .collect();
        let units: u64 = orders.iter().map(|&i| self.order_units[i]).sum();
        CachedDecision {
            // Recomputed from the assignment so the invariant
            // productivity == units / |aisles| holds exactly.
            productivity: units as f64 / open as f64,
            orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::{HighsLpSolver, LpSolution, LpStatus};
    use crate::model::{Aisle, Order, WaveBounds};
    use std::cell::Cell;

    fn tiny_instance() -> WaveInstance {
        WaveInstance::new(
            vec![Order::from_pairs([(0, 2)]), Order::from_pairs([(1, 3)])],
            vec![Aisle::from_pairs([(0, 2)]), Aisle::from_pairs([(1, 3)])],
            2,
            WaveBounds::new(1, 5),
        )
    }

    fn individual_with(n_aisles: usize, aisles: &[usize]) -> Individual {
        let mut individual = Individual::new(n_aisles);
        for &a in aisles {
            individual.genes.insert(a);
        }
        individual
    }

    /// Oracle stub that replays a fixed solution and counts calls.
    struct ScriptedSolver {
        solution: LpSolution,
        calls: Cell<u64>,
    }

    impl ScriptedSolver {
        fn new(solution: LpSolution) -> Self {
            Self {
                solution,
                calls: Cell::new(0),
            }
        }

        fn optimal(assignment: Vec<bool>) -> Self {
            Self::new(LpSolution {
                status: LpStatus::Optimal,
                objective_value: None,
                assignment,
                solve_time_ms: 0,
            })
        }

        fn infeasible() -> Self {
            Self::new(LpSolution::empty(LpStatus::Infeasible))
        }
    }

    impl LpSolver for ScriptedSolver {
        fn solve(&self, _model: &BoolLp) -> LpSolution {
            self.calls.set(self.calls.get() + 1);
            self.solution.clone()
        }
    }

    #[test]
    fn test_empty_selection_skips_oracle_and_cache() {
        let instance = tiny_instance();
        let solver = ScriptedSolver::optimal(vec![true, true]);
        let decoder = WaveDecoder::new(&instance, &solver);
        let mut cache = DecisionCache::new();

        let mut individual = Individual::new(2);
        decoder.decode(&mut individual, &mut cache);

        assert!(!individual.is_evaluated());
        assert!(individual.used_orders.is_empty());
        assert_eq!(solver.calls.get(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_decode_computes_productivity_from_assignment() {
        let instance = tiny_instance();
        let solver = ScriptedSolver::optimal(vec![true, true]);
        let decoder = WaveDecoder::new(&instance, &solver);
        let mut cache = DecisionCache::new();

        let mut individual = individual_with(2, &[0, 1]);
        decoder.decode(&mut individual, &mut cache);

        assert_eq!(individual.used_orders, vec![0, 1]);
        assert!((individual.productivity - 2.5).abs() < 1e-12);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_same_subset_hits_cache_and_restores_orders() {
        let instance = tiny_instance();
        let solver = ScriptedSolver::optimal(vec![true, true]);
        let decoder = WaveDecoder::new(&instance, &solver);
        let mut cache = DecisionCache::new();

        let mut first = individual_with(2, &[0, 1]);
        decoder.decode(&mut first, &mut cache);

        // Same subset, genes switched on in the opposite order.
        let mut second = individual_with(2, &[1, 0]);
        decoder.decode(&mut second, &mut cache);

        assert_eq!(solver.calls.get(), 1);
        assert_eq!(second.productivity, first.productivity);
        assert_eq!(second.used_orders, first.used_orders);
    }

    #[test]
    fn test_infeasible_subset_cached_as_sentinel() {
        let instance = tiny_instance();
        let solver = ScriptedSolver::infeasible();
        let decoder = WaveDecoder::new(&instance, &solver);
        let mut cache = DecisionCache::new();

        let mut individual = individual_with(2, &[0]);
        decoder.decode(&mut individual, &mut cache);
        assert!(!individual.is_evaluated());
        assert!(individual.used_orders.is_empty());
        assert_eq!(cache.len(), 1);

        // Known-infeasible subsets are not re-solved.
        let mut again = individual_with(2, &[0]);
        decoder.decode(&mut again, &mut cache);
        assert_eq!(solver.calls.get(), 1);
        assert!(!again.is_evaluated());
    }

    #[test]
    fn test_exact_decode_scenarios() {
        let instance = tiny_instance();
        let solver = HighsLpSolver::new();
        let decoder = WaveDecoder::new(&instance, &solver);
        let mut cache = DecisionCache::new();

        // Both aisles open: both orders fit, 5 units over 2 aisles.
        let mut both = individual_with(2, &[0, 1]);
        decoder.decode(&mut both, &mut cache);
        assert!((both.productivity - 2.5).abs() < 1e-9);
        assert!(both.to_solution().verify(&instance).is_ok());

        // Only aisle 0: order 1 cannot be served.
        let mut only_first = individual_with(2, &[0]);
        decoder.decode(&mut only_first, &mut cache);
        assert!((only_first.productivity - 2.0).abs() < 1e-9);
        assert_eq!(only_first.used_orders, vec![0]);
        assert!(only_first.to_solution().verify(&instance).is_ok());
    }

    #[test]
    fn test_exact_decode_infeasible_bounds() {
        // No order combination sums to exactly 10 units.
        let instance = WaveInstance::new(
            vec![Order::from_pairs([(0, 2)]), Order::from_pairs([(1, 3)])],
            vec![Aisle::from_pairs([(0, 2)]), Aisle::from_pairs([(1, 3)])],
            2,
            WaveBounds::new(10, 10),
        );
        let solver = HighsLpSolver::new();
        let decoder = WaveDecoder::new(&instance, &solver);
        let mut cache = DecisionCache::new();

        let mut individual = individual_with(2, &[0, 1]);
        decoder.decode(&mut individual, &mut cache);
        assert!(!individual.is_evaluated());
        assert!(individual.used_orders.is_empty());
    }
}
