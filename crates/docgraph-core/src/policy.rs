//! Visibility policy for the document graph.
//!
//! A document is visible only while its confidentiality flag is clear.
//! The policy compiles to a filter fragment that is AND-combined with any
//! user filter before predicate compilation, so every collection-returning
//! path applies it the same way; [`is_visible`] re-checks single records
//! at the by-key gate and before assembly.

use crate::filter::{FilterEvaluator, FilterExpr};
use crate::schema::{Collection, CONFIDENTIAL_FIELD};
use crate::storage::Record;

/// The visibility filter for a collection, if it has one.
///
/// Documents require the confidentiality flag to be clear (a missing flag
/// counts as clear). Users carry no visibility policy.
pub fn visibility_filter(collection: Collection) -> Option<FilterExpr> {
    match collection {
        Collection::Documents => Some(FilterExpr::not_flagged(CONFIDENTIAL_FIELD)),
        Collection::Users => None,
    }
}

/// Combine an optional user filter with the visibility filter.
///
/// The visibility filter must always be applied, so when both are present
/// they are AND'd together.
pub fn combine_filters(
    user_filter: Option<FilterExpr>,
    policy_filter: Option<FilterExpr>,
) -> Option<FilterExpr> {
    match (user_filter, policy_filter) {
        (None, None) => None,
        (Some(f), None) => Some(f),
        (None, Some(p)) => Some(p),
        (Some(user), Some(policy)) => Some(FilterExpr::and(vec![user, policy])),
    }
}

/// Check a single record against the collection's visibility policy.
pub fn is_visible(collection: Collection, record: &Record) -> bool {
    match visibility_filter(collection) {
        Some(filter) => FilterEvaluator::evaluate(&filter, record),
        None => true,
    }
}
