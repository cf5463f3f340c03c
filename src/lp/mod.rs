//! Boolean linear programming: the exact-solver oracle.
//!
//! The decoder formulates order selection as a linear program over boolean
//! decision variables and submits it to an [`LpSolver`]. The solver is a
//! black box to the rest of the crate: it either proves optimality and
//! returns an assignment, or reports that no (optimal) solution exists.
//!
//! [`HighsLpSolver`] is the default implementation, backed by the HiGHS
//! MILP solver through `good_lp`. Alternative oracles (or test stubs) only
//! need to implement the one-method [`LpSolver`] trait.

mod model;
mod solver;

pub use model::{BoolLp, LinearRow, ObjectiveSense};
pub use solver::{HighsLpSolver, LpSolution, LpSolver, LpStatus};
