//! Type-specific extractors. Shared contract: take one classified component,
//! return its flat sub-records in order, leaving unavailable fields absent.
//! Rank stamping and failure handling live in the dispatcher, not here.

pub mod footer;
pub mod general;
pub mod images;
pub mod knowledge_rhs;
pub mod people_also_ask;
pub mod searches_related;
pub mod top_stories;

use crate::parser::results::ParsedResult;

/// Drop records with no title, url, or text. A component that structurally
/// matched but yielded nothing extractable should not appear as an empty
/// placeholder. Local to parsers that opt in, not a pipeline rule.
pub(crate) fn drop_empty(records: Vec<ParsedResult>) -> Vec<ParsedResult> {
    records.into_iter().filter(|r| !r.is_empty()).collect()
}

pub(crate) fn nonempty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}
