use anyhow::Result;

use super::nonempty;
use crate::parser::components::Component;
use crate::parser::dom::{self, AttrMatch};
use crate::parser::results::ParsedResult;

/// Parse the filtered-results notice: the notice text plus the
/// repeat-the-search-with-omitted-results link when present.
pub fn parse_omitted_notice(cmpt: &Component) -> Result<Vec<ParsedResult>> {
    let mut rec = ParsedResult::new("omitted_notice");
    rec.text = nonempty(dom::get_text(cmpt.elem, " ", true));
    rec.url = dom::find_first(cmpt.elem, "a", &[("href", AttrMatch::Present)])
        .and_then(dom::get_link);
    Ok(vec![rec])
}

// ── Tests ──
