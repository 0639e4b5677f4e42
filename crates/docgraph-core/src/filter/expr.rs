//! Internal filter expression IR.

use docgraph_proto::Value;

/// A validated filter expression over one collection's records.
///
/// This IR is constructed only by the filter interpreter and the
/// visibility policy; client input never deserializes into it directly.
/// `NotFlagged` exists for policy use and has no client-facing operator.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Field equals value exactly.
    Eq { field: String, value: Value },
    /// Field is present and not equal to value.
    Ne { field: String, value: Value },
    /// String field contains the needle, case-sensitively.
    Contains { field: String, needle: String },
    /// String field matches a validated alphanumeric pattern
    /// (unanchored, so containment).
    Pattern { field: String, pattern: String },
    /// Field presence matches the expectation (null counts as absent).
    Exists { field: String, expected: bool },
    /// Field is not boolean true; a missing field counts as clear.
    NotFlagged { field: String },
    /// All conditions must hold.
    And(Vec<FilterExpr>),
}

impl FilterExpr {
    /// Create an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterExpr::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a not-equal filter.
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterExpr::Ne {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a substring filter.
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        FilterExpr::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Create a pattern filter. The pattern must already be validated.
    pub fn pattern(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        FilterExpr::Pattern {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    /// Create a presence filter.
    pub fn exists(field: impl Into<String>, expected: bool) -> Self {
        FilterExpr::Exists {
            field: field.into(),
            expected,
        }
    }

    /// Create a flag-clear filter.
    pub fn not_flagged(field: impl Into<String>) -> Self {
        FilterExpr::NotFlagged {
            field: field.into(),
        }
    }

    /// Create an AND combination.
    pub fn and(exprs: Vec<FilterExpr>) -> Self {
        FilterExpr::And(exprs)
    }
}
