use anyhow::Result;

use super::nonempty;
use crate::parser::components::Component;
use crate::parser::dom::{self, AttrMatch};
use crate::parser::results::ParsedResult;

/// Parse the right-hand-side knowledge panel into a single record: entity
/// title, description text, and the description's source link. The panel is
/// kept even when sparse; its presence on the page is itself a result.
pub fn parse(cmpt: &Component) -> Result<Vec<ParsedResult>> {
    let el = cmpt.elem;

    let mut rec = ParsedResult::new("knowledge_rhs");
    rec.title = dom::find_first(el, "div", &[("data-attrid", AttrMatch::Exact("title"))])
        .or_else(|| dom::find_first(el, "h2", &[("data-attrid", AttrMatch::Exact("title"))]))
        .map(|t| dom::get_text(t, " ", true))
        .and_then(nonempty);
    rec.sub_type = dom::find_first(el, "div", &[("data-attrid", AttrMatch::Exact("subtitle"))])
        .map(|t| dom::get_text(t, " ", true))
        .and_then(nonempty);

    if let Some(desc) = dom::find_first(el, "div", &[("class", AttrMatch::Exact("kno-rdesc"))]) {
        rec.text = nonempty(dom::get_text(desc, " ", true));
        rec.url = dom::find_first(desc, "a", &[("href", AttrMatch::Present)]).and_then(dom::get_link);
    }

    Ok(vec![rec])
}

// ── Tests ──
