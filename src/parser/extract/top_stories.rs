use anyhow::Result;
use scraper::ElementRef;

use super::{drop_empty, nonempty};
use crate::parser::components::Component;
use crate::parser::dom::{self, AttrMatch};
use crate::parser::results::ParsedResult;

/// Parse a news-carousel component. Each story card is an anchor carrying a
/// heading-role title div; the source name sits in a `MgUUmf` span or a cite.
pub fn parse(cmpt: &Component) -> Result<Vec<ParsedResult>> {
    let cards: Vec<ElementRef> = dom::find_all(cmpt.elem, "a", &[("href", AttrMatch::Present)])
        .into_iter()
        .filter(|a| dom::find_first(*a, "div", &[("role", AttrMatch::Exact("heading"))]).is_some())
        .collect();

    let parsed = cards.into_iter().map(parse_card).collect();
    Ok(drop_empty(parsed))
}

fn parse_card(card: ElementRef) -> ParsedResult {
    let mut rec = ParsedResult::new("top_stories");
    rec.title = dom::find_first(card, "div", &[("role", AttrMatch::Exact("heading"))])
        .map(|h| dom::get_text(h, " ", true))
        .and_then(nonempty);
    rec.url = dom::get_link(card);
    rec.cite = dom::find_first(card, "span", &[("class", AttrMatch::Exact("MgUUmf"))])
        .or_else(|| dom::find_first(card, "cite", &[]))
        .map(|c| dom::get_text(c, " ", true))
        .and_then(nonempty);
    rec
}

// ── Tests ──
