//! Linear expressions over model variables.

use crate::model::VarId;

/// A linear expression `Σ coeff · var + constant`.
///
/// Duplicate variables are allowed; the model aggregates coefficients when
/// the expression is turned into a row.
#[derive(Debug, Clone, Default)]
pub struct LinearExpr {
    pub(crate) terms: Vec<(VarId, f64)>,
    pub(crate) constant: f64,
}

impl LinearExpr {
    /// The empty expression (constant 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// A single `1 · var` term.
    pub fn var(var: VarId) -> Self {
        LinearExpr {
            terms: vec![(var, 1.0)],
            constant: 0.0,
        }
    }

    /// The unweighted sum of the given variables.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        LinearExpr {
            terms: vars.into_iter().map(|v| (v, 1.0)).collect(),
            constant: 0.0,
        }
    }

    /// Adds `coeff · var`.
    pub fn add_term(&mut self, var: VarId, coeff: f64) -> &mut Self {
        self.terms.push((var, coeff));
        self
    }

    /// Adds a constant offset.
    pub fn add_constant(&mut self, value: f64) -> &mut Self {
        self.constant += value;
        self
    }

    /// Number of (unaggregated) terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the expression has no variable terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_collects_unit_terms() {
        let vars = [VarId(0), VarId(1), VarId(2)];
        let expr = LinearExpr::sum(vars);
        assert_eq!(expr.len(), 3);
        assert!(expr.terms.iter().all(|&(_, c)| c == 1.0));
    }

    #[test]
    fn add_term_and_constant_accumulate() {
        let mut expr = LinearExpr::new();
        expr.add_term(VarId(4), 2.5).add_constant(1.0);
        expr.add_constant(0.5);
        assert_eq!(expr.len(), 1);
        assert_eq!(expr.constant, 1.5);
    }
}
