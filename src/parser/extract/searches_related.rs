use anyhow::Result;

use super::{drop_empty, nonempty};
use crate::parser::components::Component;
use crate::parser::dom::{self, AttrMatch};
use crate::parser::results::ParsedResult;

/// Parse a related-searches component: one record per suggested query.
/// Suggestion anchors point back into the engine's own search endpoint,
/// which is what distinguishes them from outbound links in the same block.
pub fn parse(cmpt: &Component) -> Result<Vec<ParsedResult>> {
    let mut parsed = Vec::new();
    for a in dom::find_all(cmpt.elem, "a", &[("href", AttrMatch::Present)]) {
        let Some(href) = dom::get_attr(a, "href") else {
            continue;
        };
        if !href.starts_with("/search") {
            continue;
        }
        let mut rec = ParsedResult::new("searches_related");
        rec.text = nonempty(dom::get_text(a, " ", true));
        rec.url = Some(href);
        parsed.push(rec);
    }
    Ok(drop_empty(parsed))
}

// ── Tests ──
