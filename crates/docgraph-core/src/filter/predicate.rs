//! Opaque, backend-evaluable predicates.

use super::eval::FilterEvaluator;
use super::expr::FilterExpr;
use crate::storage::Record;

/// A compiled predicate handed to `scan_where`.
///
/// The constructor is crate-private: only the filter interpreter and the
/// visibility policy can produce one, so a storage adapter can never be
/// handed a client-shaped value.
#[derive(Debug, Clone)]
pub struct Predicate {
    expr: FilterExpr,
}

impl Predicate {
    /// Compile a validated expression into a predicate.
    pub(crate) fn new(expr: FilterExpr) -> Self {
        Self { expr }
    }

    /// Evaluate the predicate against a record.
    pub fn matches(&self, record: &Record) -> bool {
        FilterEvaluator::evaluate(&self.expr, record)
    }
}
