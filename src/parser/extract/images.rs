use anyhow::Result;
use scraper::ElementRef;

use super::{drop_empty, nonempty};
use crate::parser::components::Component;
use crate::parser::dom::{self, AttrMatch};
use crate::parser::results::ParsedResult;

/// Parse an image-gallery component into one record per image tile.
///
/// Three tiers, told apart by structural markers: "small" thumbnails with
/// short labels inside an expandable container, "multimedia" carousel items
/// with no text labels, and the default "medium" titled tiles with links.
/// Sub-ranks continue across tiers so they stay unique in the component.
pub fn parse(cmpt: &Component) -> Result<Vec<ParsedResult>> {
    let el = cmpt.elem;
    let mut parsed = Vec::new();

    // Small images: thumbnails with text labels
    if dom::find_first(el, "g-expandable-container", &[]).is_some() {
        let subs = dom::find_all(el, "a", &[("class", AttrMatch::Exact("dgdd6c"))]);
        for (sub_rank, sub) in subs.into_iter().enumerate() {
            parsed.push(parse_small(sub, sub_rank));
        }
    }

    if dom::find_first(el, "g-scrolling-carousel", &[]).is_some() {
        // Medium images or video previews, no text labels
        let subs = dom::find_all(el, "div", &[("class", AttrMatch::Exact("eA0Zlc"))]);
        let offset = parsed.len();
        for (i, sub) in subs.into_iter().enumerate() {
            parsed.push(parse_multimedia(sub, offset + i));
        }
    } else {
        // Medium images with titles and urls
        let subs = dom::find_all(el, "div", &[("class", AttrMatch::Exact("eA0Zlc"))]);
        let offset = parsed.len();
        for (i, sub) in subs.into_iter().enumerate() {
            parsed.push(parse_medium(sub, offset + i));
        }
    }

    Ok(drop_empty(parsed))
}

fn base(sub_type: &str, sub_rank: usize) -> ParsedResult {
    let mut rec = ParsedResult::new("images");
    rec.sub_type = Some(sub_type.to_string());
    rec.sub_rank = sub_rank;
    rec
}

fn parse_small(sub: ElementRef, sub_rank: usize) -> ParsedResult {
    let mut rec = base("small", sub_rank);
    rec.title = dom::find_first(sub, "div", &[("class", AttrMatch::Exact("xlY4q"))])
        .map(|d| dom::get_text(d, " ", true))
        .and_then(nonempty);
    rec
}

fn parse_multimedia(sub: ElementRef, sub_rank: usize) -> ParsedResult {
    let mut rec = base("multimedia", sub_rank);
    rec.title = img_alt(sub);
    rec.url = img_url(sub);
    rec
}

fn parse_medium(sub: ElementRef, sub_rank: usize) -> ParsedResult {
    let link = dom::find_first(sub, "a", &[("class", AttrMatch::Exact("EZAeBe"))]);

    let mut rec = base("medium", sub_rank);
    rec.title = link
        .map(|a| dom::get_text(a, " ", true))
        .and_then(nonempty)
        .or_else(|| img_alt(sub));
    rec.url = link.and_then(dom::get_link).or_else(|| img_url(sub));
    rec.cite = dom::find_first(sub, "div", &[("class", AttrMatch::Exact("ptes9b"))])
        .map(|d| dom::get_text(d, " ", true))
        .and_then(nonempty);
    rec
}

// Image tiles carry their landing page on the container, not the <img>.
fn img_url(sub: ElementRef) -> Option<String> {
    dom::get_attr(sub, "data-lpage")
}

fn img_alt(sub: ElementRef) -> Option<String> {
    dom::find_first(sub, "img", &[])
        .and_then(|img| dom::get_attr(img, "alt"))
        .map(|alt| format!("alt-text: {alt}"))
}

// ── Tests ──
