//! LP solver interface and the HiGHS-backed implementation.

use good_lp::{default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable};
use std::time::Instant;

use super::model::{BoolLp, ObjectiveSense};

/// Status of the oracle after a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LpStatus {
    /// Proven optimal solution found.
    Optimal,
    /// No feasible assignment exists.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
    /// Model failed validation.
    ModelInvalid,
    /// No solution produced for any other reason.
    Unknown,
}

/// Solution returned by an [`LpSolver`].
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Solver status.
    pub status: LpStatus,
    /// Objective value (only for [`LpStatus::Optimal`]).
    pub objective_value: Option<f64>,
    /// Per-variable assignment; empty unless optimal.
    pub assignment: Vec<bool>,
    /// Solve time in milliseconds.
    pub solve_time_ms: u128,
}

impl LpSolution {
    /// An empty (assignment-free) solution with the given status.
    pub fn empty(status: LpStatus) -> Self {
        Self {
            status,
            objective_value: None,
            assignment: Vec::new(),
            solve_time_ms: 0,
        }
    }

    /// Whether the solve proved optimality.
    pub fn is_optimal(&self) -> bool {
        self.status == LpStatus::Optimal
    }
}

/// Exact-solver oracle over boolean linear programs.
///
/// The oracle is synchronous and blocking, holds no state between calls,
/// and offers no mid-solve cancellation. Anything other than
/// [`LpStatus::Optimal`] is treated by callers as "no usable solution".
pub trait LpSolver {
    /// Solves the model to proven optimality, or reports why it could not.
    fn solve(&self, model: &BoolLp) -> LpSolution;
}

/// Exact MILP solver backed by HiGHS through `good_lp`.
#[derive(Debug, Default)]
pub struct HighsLpSolver;

impl HighsLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl LpSolver for HighsLpSolver {
    fn solve(&self, model: &BoolLp) -> LpSolution {
        if model.validate().is_err() {
            return LpSolution::empty(LpStatus::ModelInvalid);
        }

        let start = Instant::now();

        let mut vars = variables!();
        let xs: Vec<Variable> = (0..model.n_vars)
            .map(|i| vars.add(variable().binary().name(format!("x_{i}"))))
            .collect();

        let objective = model
            .objective
            .iter()
            .zip(&xs)
            .fold(Expression::from(0.0), |acc, (&c, &x)| acc + c * x);

        let mut problem = match model.sense {
            ObjectiveSense::Maximize => vars.maximise(objective),
            ObjectiveSense::Minimize => vars.minimise(objective),
        }
        .using(default_solver);

        for row in &model.rows {
            let sum = row
                .terms
                .iter()
                .fold(Expression::from(0.0), |acc, &(i, c)| acc + c * xs[i]);
            if let Some(lower) = row.lower {
                problem.add_constraint(sum.clone().geq(lower));
            }
            if let Some(upper) = row.upper {
                problem.add_constraint(sum.leq(upper));
            }
        }

        match problem.solve() {
            Ok(solution) => {
                let assignment: Vec<bool> =
                    xs.iter().map(|&x| solution.value(x) > 0.5).collect();
                let objective_value = model
                    .objective
                    .iter()
                    .zip(&assignment)
                    .filter(|(_, &chosen)| chosen)
                    .map(|(&c, _)| c)
                    .sum();
                LpSolution {
                    status: LpStatus::Optimal,
                    objective_value: Some(objective_value),
                    assignment,
                    solve_time_ms: start.elapsed().as_millis(),
                }
            }
            Err(ResolutionError::Infeasible) => {
                let mut out = LpSolution::empty(LpStatus::Infeasible);
                out.solve_time_ms = start.elapsed().as_millis();
                out
            }
            Err(ResolutionError::Unbounded) => {
                let mut out = LpSolution::empty(LpStatus::Unbounded);
                out.solve_time_ms = start.elapsed().as_millis();
                out
            }
            Err(error) => {
                tracing::warn!(%error, "oracle returned no solution");
                let mut out = LpSolution::empty(LpStatus::Unknown);
                out.solve_time_ms = start.elapsed().as_millis();
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::LinearRow;

    #[test]
    fn test_solve_simple_maximization() {
        // maximize 2·x0 + 3·x1 subject to x0 + x1 <= 1
        let mut lp = BoolLp::new(2, ObjectiveSense::Maximize);
        lp.set_objective_coefficient(0, 2.0);
        lp.set_objective_coefficient(1, 3.0);
        lp.add_row(LinearRow::upper_bounded(vec![(0, 1.0), (1, 1.0)], 1.0));

        let solution = HighsLpSolver::new().solve(&lp);
        assert!(solution.is_optimal());
        assert_eq!(solution.assignment, vec![false, true]);
        assert!((solution.objective_value.unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_solve_two_sided_row() {
        // exactly one of x0, x1 must be chosen; prefer the cheaper one
        let mut lp = BoolLp::new(2, ObjectiveSense::Minimize);
        lp.set_objective_coefficient(0, 1.0);
        lp.set_objective_coefficient(1, 4.0);
        lp.add_row(LinearRow::bounded(vec![(0, 1.0), (1, 1.0)], 1.0, 1.0));

        let solution = HighsLpSolver::new().solve(&lp);
        assert!(solution.is_optimal());
        assert_eq!(solution.assignment, vec![true, false]);
    }

    #[test]
    fn test_solve_infeasible() {
        // x0 >= 1 and x0 <= 0 cannot both hold
        let mut lp = BoolLp::new(1, ObjectiveSense::Maximize);
        lp.add_row(LinearRow {
            terms: vec![(0, 1.0)],
            lower: Some(1.0),
            upper: None,
        });
        lp.add_row(LinearRow::upper_bounded(vec![(0, 1.0)], 0.0));

        let solution = HighsLpSolver::new().solve(&lp);
        assert_eq!(solution.status, LpStatus::Infeasible);
        assert!(solution.assignment.is_empty());
    }

    #[test]
    fn test_solve_invalid_model() {
        let mut lp = BoolLp::new(1, ObjectiveSense::Maximize);
        lp.add_row(LinearRow::upper_bounded(vec![(9, 1.0)], 1.0));

        let solution = HighsLpSolver::new().solve(&lp);
        assert_eq!(solution.status, LpStatus::ModelInvalid);
    }
}
