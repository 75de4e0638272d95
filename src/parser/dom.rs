use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

static REDIRECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/url\?(?:.*&)?(?:q|url)=([^&]+)").unwrap());

/// Attribute predicate for [`find_all`]. `class` comparisons are by token
/// (any listed token present); every other attribute compares the full value.
#[derive(Debug, Clone, Copy)]
pub enum AttrMatch<'a> {
    Exact(&'a str),
    AnyOf(&'a [&'a str]),
    Present,
}

/// Find all descendants with the given tag name whose attributes satisfy
/// every predicate. Absence of matches yields an empty vec, never an error.
pub fn find_all<'a>(
    el: ElementRef<'a>,
    tag: &str,
    attrs: &[(&str, AttrMatch)],
) -> Vec<ElementRef<'a>> {
    el.descendants()
        .skip(1) // descendants() starts with the node itself
        .filter_map(ElementRef::wrap)
        .filter(|d| d.value().name() == tag)
        .filter(|d| attrs.iter().all(|(name, m)| attr_matches(*d, name, m)))
        .collect()
}

/// First descendant matching tag + attribute predicates, in document order.
pub fn find_first<'a>(
    el: ElementRef<'a>,
    tag: &str,
    attrs: &[(&str, AttrMatch)],
) -> Option<ElementRef<'a>> {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|d| d.value().name() == tag)
        .find(|d| attrs.iter().all(|(name, m)| attr_matches(*d, name, m)))
}

fn attr_matches(el: ElementRef, name: &str, m: &AttrMatch) -> bool {
    if name == "class" {
        let mut classes = el.value().classes();
        return match m {
            AttrMatch::Exact(v) => classes.any(|c| c == *v),
            AttrMatch::AnyOf(vs) => classes.any(|c| vs.contains(&c)),
            AttrMatch::Present => el.value().attr("class").is_some(),
        };
    }
    match (el.value().attr(name), m) {
        (Some(v), AttrMatch::Exact(want)) => v == *want,
        (Some(v), AttrMatch::AnyOf(wants)) => wants.contains(&v),
        (Some(_), AttrMatch::Present) => true,
        (None, _) => false,
    }
}

/// Joined text content. With `trim`, each fragment is trimmed and empty
/// fragments are skipped before joining.
pub fn get_text(el: ElementRef, sep: &str, trim: bool) -> String {
    if trim {
        el.text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(sep)
    } else {
        el.text().collect::<Vec<_>>().join(sep)
    }
}

pub fn get_attr(el: ElementRef, name: &str) -> Option<String> {
    el.value().attr(name).map(str::to_string)
}

/// Link target of an anchor, with engine-internal redirects unwrapped.
pub fn get_link(el: ElementRef) -> Option<String> {
    get_attr(el, "href").map(|href| unwrap_redirect(&href))
}

/// Unwrap `/url?q=https://target&sa=...` redirect links to their target.
/// Anything else passes through unchanged.
pub fn unwrap_redirect(url: &str) -> String {
    match REDIRECT_RE.captures(url) {
        Some(caps) => caps[1].to_string(),
        None => url.to_string(),
    }
}

// ── Tests ──
