use scraper::ElementRef;

use super::dom::{self, AttrMatch};
use super::vocabulary::{Marker, Pattern, Vocabulary};

pub const UNKNOWN: &str = "unknown";

// Marker fingerprints are checked on the component root and on descendants
// down to this depth.
const MARKER_DEPTH: usize = 4;

/// Classify a main-flow component. Ordered fallback, first match wins:
/// structural markers, then level-2 header phrases, then level-3, then
/// `unknown`. Total: always returns a type, never fails.
pub fn classify(vocab: &Vocabulary, cmpt: ElementRef) -> String {
    if let Some(t) = classify_by_marker(&vocab.markers, cmpt) {
        return t;
    }
    for level in [2u8, 3] {
        if let Some(t) = classify_by_header(vocab, cmpt, level) {
            return t;
        }
    }
    UNKNOWN.to_string()
}

/// Classify a footer-region component against the footer marker list only.
pub fn classify_footer(vocab: &Vocabulary, cmpt: ElementRef) -> String {
    classify_by_marker(&vocab.footer_markers, cmpt).unwrap_or_else(|| UNKNOWN.to_string())
}

fn classify_by_marker(markers: &[Marker], cmpt: ElementRef) -> Option<String> {
    markers
        .iter()
        .find(|m| node_matches(m, cmpt) || any_descendant_matches(m, cmpt, MARKER_DEPTH))
        .map(|m| m.cmpt_type.to_string())
}

fn any_descendant_matches(m: &Marker, el: ElementRef, depth: usize) -> bool {
    if depth == 0 {
        return false;
    }
    el.children()
        .filter_map(ElementRef::wrap)
        .any(|c| node_matches(m, c) || any_descendant_matches(m, c, depth - 1))
}

fn node_matches(m: &Marker, el: ElementRef) -> bool {
    if el.value().name() != m.tag {
        return false;
    }
    match &m.pattern {
        Pattern::Exact(v) => el.value().attr(m.attr) == Some(*v),
        Pattern::ClassToken(v) => m.attr == "class" && el.value().classes().any(|c| c == *v),
        Pattern::Prefix(p) => el.value().attr(m.attr).is_some_and(|v| v.starts_with(p)),
    }
}

// Header candidates come in several equivalent structural encodings: a
// semantic h-tag with a heading role or a recognized styling class, or a
// generic div carrying the aria level/role signature.
fn classify_by_header(vocab: &Vocabulary, cmpt: ElementRef, level: u8) -> Option<String> {
    let phrases = vocab.phrases(level);
    if phrases.is_empty() {
        return None;
    }

    let htag = format!("h{level}");
    let aria = level.to_string();

    let mut headers = Vec::new();
    headers.extend(dom::find_all(cmpt, &htag, &[("role", AttrMatch::Exact("heading"))]));
    headers.extend(dom::find_all(cmpt, &htag, &[("class", AttrMatch::AnyOf(&["O3JH7", "q8U8x"]))]));
    headers.extend(dom::find_all(
        cmpt,
        "div",
        &[
            ("aria-level", AttrMatch::Exact(aria.as_str())),
            ("role", AttrMatch::Exact("heading")),
        ],
    ));
    headers.extend(dom::find_all(
        cmpt,
        "div",
        &[
            ("aria-level", AttrMatch::Exact(aria.as_str())),
            ("class", AttrMatch::Exact("XmmGVd")),
        ],
    ));

    // Strict starts-with: tolerates trailing counts and punctuation, rejects
    // phrases buried inside longer headings. Case-insensitive because engines
    // vary header capitalization across locales and experiments.
    for header in headers {
        let text = dom::get_text(header, "", false);
        let text = text.trim().to_lowercase();
        for (phrase, label) in phrases {
            if text.starts_with(&phrase.to_lowercase()) {
                return Some(label.clone());
            }
        }
    }
    None
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_div(doc: &Html) -> ElementRef<'_> {
        dom::find_first(doc.root_element(), "div", &[]).unwrap()
    }

    fn classify_html(html: &str) -> String {
        let doc = Html::parse_document(html);
        classify(&Vocabulary::builtin(), first_div(&doc))
    }

    #[test]
    fn h2_exact_phrase() {
        let t = classify_html(r#"<div><h2 role="heading">Top stories</h2></div>"#);
        assert_eq!(t, "top_stories");
    }

    #[test]
    fn h2_prefix_with_trailing_text() {
        let t = classify_html(r#"<div><h2 role="heading">Top Stories Update</h2></div>"#);
        assert_eq!(t, "top_stories");
        let t = classify_html(r#"<div><h2 role="heading">Top stories · 10 articles</h2></div>"#);
        assert_eq!(t, "top_stories");
    }

    #[test]
    fn leading_text_does_not_match() {
        let t = classify_html(r#"<div><h2 role="heading">The Top stories</h2></div>"#);
        assert_eq!(t, UNKNOWN);
    }

    #[test]
    fn aria_div_encoding_matches() {
        let t = classify_html(
            r#"<div><div aria-level="2" role="heading">People also ask</div></div>"#,
        );
        assert_eq!(t, "people_also_ask");
    }

    #[test]
    fn styled_h2_encoding_matches() {
        let t = classify_html(r#"<div><h2 class="q8U8x">Videos</h2></div>"#);
        assert_eq!(t, "videos");
    }

    #[test]
    fn plain_h2_is_not_a_candidate() {
        // No heading role, no recognized class: the text is never read.
        let t = classify_html(r#"<div><h2>Top stories</h2></div>"#);
        assert_eq!(t, UNKNOWN);
    }

    #[test]
    fn level2_checked_before_level3() {
        // The h2 matches nothing; the h3 resolves via the level-3 table.
        let t = classify_html(
            r#"<div>
                 <h2 role="heading">Something unrecognized</h2>
                 <h3 role="heading">Images for kittens</h3>
               </div>"#,
        );
        assert_eq!(t, "images");
    }

    #[test]
    fn level2_wins_when_both_match() {
        let t = classify_html(
            r#"<div>
                 <h2 role="heading">Videos</h2>
                 <h3 role="heading">Images for kittens</h3>
               </div>"#,
        );
        assert_eq!(t, "videos");
    }

    #[test]
    fn structural_marker_beats_header_text() {
        let t = classify_html(
            r#"<div><div class="kp-wholepage"><h2 role="heading">Videos</h2></div></div>"#,
        );
        assert_eq!(t, "knowledge");
    }

    #[test]
    fn marker_on_component_root() {
        let doc = Html::parse_document(r#"<div id="imagebox_bigimages"></div>"#);
        let t = classify(&Vocabulary::builtin(), first_div(&doc));
        assert_eq!(t, "images");
    }

    #[test]
    fn prefix_marker() {
        let t = classify_html(r#"<div><div id="tadsb"><span>Ad</span></div></div>"#);
        assert_eq!(t, "ad");
    }

    #[test]
    fn no_signal_is_unknown_and_deterministic() {
        let html = r#"<div><p>plain content</p></div>"#;
        let a = classify_html(html);
        let b = classify_html(html);
        assert_eq!(a, UNKNOWN);
        assert_eq!(a, b);
    }

    #[test]
    fn footer_marker_classification() {
        let vocab = Vocabulary::builtin();
        let doc = Html::parse_document(r#"<div id="bres"><a href="/search?q=x">x</a></div>"#);
        assert_eq!(classify_footer(&vocab, first_div(&doc)), "searches_related");

        let doc = Html::parse_document(r#"<div><p>pagination</p></div>"#);
        assert_eq!(classify_footer(&vocab, first_div(&doc)), UNKNOWN);
    }

    #[test]
    fn related_prefix_order_is_declaration_order() {
        // "Related searches" also starts with "Related"; both map to
        // searches_related either way.
        let t = classify_html(r#"<div><h2 role="heading">Related searches</h2></div>"#);
        assert_eq!(t, "searches_related");
    }
}
