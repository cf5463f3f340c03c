//! Boolean LP model definition.

/// Direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// One linear constraint row over the model's boolean variables:
/// `lower <= Σ coeff · x <= upper`, with either side optional.
#[derive(Debug, Clone)]
pub struct LinearRow {
    /// `(variable index, coefficient)` pairs; variables absent from the
    /// row have coefficient zero.
    pub terms: Vec<(usize, f64)>,
    /// Lower bound on the row value (`None` = unbounded below).
    pub lower: Option<f64>,
    /// Upper bound on the row value (`None` = unbounded above).
    pub upper: Option<f64>,
}

impl LinearRow {
    /// A one-sided row `Σ coeff · x <= upper`.
    pub fn upper_bounded(terms: Vec<(usize, f64)>, upper: f64) -> Self {
        Self {
            terms,
            lower: None,
            upper: Some(upper),
        }
    }

    /// A two-sided row `lower <= Σ coeff · x <= upper`.
    pub fn bounded(terms: Vec<(usize, f64)>, lower: f64, upper: f64) -> Self {
        Self {
            terms,
            lower: Some(lower),
            upper: Some(upper),
        }
    }
}

/// A linear program in which every decision variable is boolean.
///
/// # Examples
///
/// ```
/// use wave_pick::lp::{BoolLp, LinearRow, ObjectiveSense};
///
/// // maximize 2·x0 + 3·x1 subject to x0 + x1 <= 1
/// let mut lp = BoolLp::new(2, ObjectiveSense::Maximize);
/// lp.set_objective_coefficient(0, 2.0);
/// lp.set_objective_coefficient(1, 3.0);
/// lp.add_row(LinearRow::upper_bounded(vec![(0, 1.0), (1, 1.0)], 1.0));
/// assert!(lp.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BoolLp {
    /// Number of boolean decision variables.
    pub n_vars: usize,
    /// Direction of optimization.
    pub sense: ObjectiveSense,
    /// Objective coefficient per variable.
    pub objective: Vec<f64>,
    /// Constraint rows.
    pub rows: Vec<LinearRow>,
}

impl BoolLp {
    /// Creates a model with a zero objective and no rows.
    pub fn new(n_vars: usize, sense: ObjectiveSense) -> Self {
        Self {
            n_vars,
            sense,
            objective: vec![0.0; n_vars],
            rows: Vec::new(),
        }
    }

    /// Sets the objective coefficient of one variable.
    pub fn set_objective_coefficient(&mut self, var: usize, coefficient: f64) {
        self.objective[var] = coefficient;
    }

    /// Appends a constraint row.
    pub fn add_row(&mut self, row: LinearRow) {
        self.rows.push(row);
    }

    /// Number of constraint rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Validates the model for consistency.
    ///
    /// Checks objective length, variable indices, finite coefficients,
    /// and that each row carries at least one bound with `lower <= upper`.
    pub fn validate(&self) -> Result<(), String> {
        if self.n_vars == 0 {
            return Err("model has no variables".into());
        }
        if self.objective.len() != self.n_vars {
            return Err(format!(
                "objective has {} coefficients, expected {}",
                self.objective.len(),
                self.n_vars
            ));
        }
        for (r, row) in self.rows.iter().enumerate() {
            if row.lower.is_none() && row.upper.is_none() {
                return Err(format!("row {r} has no bounds"));
            }
            if let (Some(lo), Some(hi)) = (row.lower, row.upper) {
                if lo > hi {
                    return Err(format!("row {r}: lower bound {lo} > upper bound {hi}"));
                }
            }
            for &(var, coefficient) in &row.terms {
                if var >= self.n_vars {
                    return Err(format!("row {r}: variable index {var} out of range"));
                }
                if !coefficient.is_finite() {
                    return Err(format!("row {r}: non-finite coefficient for variable {var}"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_creation() {
        let mut lp = BoolLp::new(3, ObjectiveSense::Maximize);
        lp.set_objective_coefficient(0, 1.0);
        lp.add_row(LinearRow::upper_bounded(vec![(0, 1.0), (2, 2.0)], 4.0));
        lp.add_row(LinearRow::bounded(vec![(1, 1.0)], 0.0, 1.0));

        assert_eq!(lp.row_count(), 2);
        assert!(lp.validate().is_ok());
    }

    #[test]
    fn test_validate_no_variables() {
        let lp = BoolLp::new(0, ObjectiveSense::Minimize);
        assert!(lp.validate().is_err());
    }

    #[test]
    fn test_validate_variable_out_of_range() {
        let mut lp = BoolLp::new(1, ObjectiveSense::Maximize);
        lp.add_row(LinearRow::upper_bounded(vec![(5, 1.0)], 1.0));
        assert!(lp.validate().is_err());
    }

    #[test]
    fn test_validate_unbounded_row() {
        let mut lp = BoolLp::new(1, ObjectiveSense::Maximize);
        lp.add_row(LinearRow {
            terms: vec![(0, 1.0)],
            lower: None,
            upper: None,
        });
        assert!(lp.validate().is_err());
    }

    #[test]
    fn test_validate_crossed_bounds() {
        let mut lp = BoolLp::new(1, ObjectiveSense::Maximize);
        lp.add_row(LinearRow::bounded(vec![(0, 1.0)], 2.0, 1.0));
        assert!(lp.validate().is_err());
    }
}
