//! Filter evaluation against stored records.

use super::expr::FilterExpr;
use crate::storage::Record;
use docgraph_proto::Value;

/// Evaluates filter expressions against records.
///
/// Both storage adapters evaluate through this one type, so filter
/// semantics are identical regardless of backend.
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Evaluate a filter expression against a record.
    ///
    /// A comparison against a missing field does not match, for equality
    /// and inequality alike; `Exists` and `NotFlagged` are the only
    /// operators that can match an absent field.
    pub fn evaluate(expr: &FilterExpr, record: &Record) -> bool {
        match expr {
            FilterExpr::Eq { field, value } => {
                record.get(field).map(|v| v == value).unwrap_or(false)
            }
            FilterExpr::Ne { field, value } => {
                record.get(field).map(|v| v != value).unwrap_or(false)
            }
            FilterExpr::Contains { field, needle } => {
                matches!(record.get(field), Some(Value::String(s)) if s.contains(needle.as_str()))
            }
            FilterExpr::Pattern { field, pattern } => {
                // Validated patterns carry no metacharacters, so an
                // unanchored match is exactly containment.
                matches!(record.get(field), Some(Value::String(s)) if s.contains(pattern.as_str()))
            }
            FilterExpr::Exists { field, expected } => {
                let present = matches!(record.get(field), Some(v) if !v.is_null());
                present == *expected
            }
            FilterExpr::NotFlagged { field } => {
                !matches!(record.get(field), Some(Value::Bool(true)))
            }
            FilterExpr::And(exprs) => exprs.iter().all(|e| Self::evaluate(e, record)),
        }
    }
}
