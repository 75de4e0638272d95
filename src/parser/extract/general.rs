use anyhow::Result;
use scraper::ElementRef;

use super::{drop_empty, nonempty};
use crate::parser::components::Component;
use crate::parser::dom::{self, AttrMatch};
use crate::parser::results::ParsedResult;

/// Parse an organic web result. One component can stack several results
/// (site-links blocks and the like), each in its own `div.g` wrapper; a
/// bare component with no wrappers is treated as a single result.
pub fn parse(cmpt: &Component) -> Result<Vec<ParsedResult>> {
    let el = cmpt.elem;
    let wrappers = dom::find_all(el, "div", &[("class", AttrMatch::Exact("g"))]);
    let subs = if wrappers.is_empty() { vec![el] } else { wrappers };

    let parsed = subs
        .into_iter()
        .map(parse_result)
        .collect();
    Ok(drop_empty(parsed))
}

fn parse_result(sub: ElementRef) -> ParsedResult {
    let mut rec = ParsedResult::new("general");
    rec.title = dom::find_first(sub, "h3", &[])
        .map(|h| dom::get_text(h, " ", true))
        .and_then(nonempty);
    rec.url = dom::find_first(sub, "a", &[("href", AttrMatch::Present)]).and_then(dom::get_link);
    rec.text = dom::find_first(sub, "div", &[("class", AttrMatch::Exact("VwiC3b"))])
        .map(|d| dom::get_text(d, " ", true))
        .and_then(nonempty);
    rec.cite = dom::find_first(sub, "cite", &[])
        .map(|c| dom::get_text(c, " ", true))
        .and_then(nonempty);
    rec
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::components::Section;
    use scraper::Html;

    fn parse_html(html: &str) -> Vec<ParsedResult> {
        let doc = Html::parse_document(html);
        let elem = dom::find_first(doc.root_element(), "div", &[]).unwrap();
        let cmpt = Component {
            elem,
            section: Section::Main,
            cmpt_type: "general".to_string(),
            cmpt_rank: 0,
        };
        parse(&cmpt).unwrap()
    }

    #[test]
    fn single_result_fields() {
        let recs = parse_html(
            r#"<div>
                 <div class="g">
                   <a href="/url?q=https://example.com/article&sa=U"><h3>Example article</h3></a>
                   <cite>example.com</cite>
                   <div class="VwiC3b">A snippet about the article.</div>
                 </div>
               </div>"#,
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title.as_deref(), Some("Example article"));
        assert_eq!(recs[0].url.as_deref(), Some("https://example.com/article"));
        assert_eq!(recs[0].text.as_deref(), Some("A snippet about the article."));
        assert_eq!(recs[0].cite.as_deref(), Some("example.com"));
    }

    #[test]
    fn bare_component_without_wrapper() {
        let recs = parse_html(
            r#"<div><a href="https://example.com"><h3>Bare result</h3></a></div>"#,
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title.as_deref(), Some("Bare result"));
    }

    #[test]
    fn stacked_results_stay_in_order() {
        let recs = parse_html(
            r#"<div>
                 <div class="g"><a href="https://a.example"><h3>First</h3></a></div>
                 <div class="g"><a href="https://b.example"><h3>Second</h3></a></div>
               </div>"#,
        );
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title.as_deref(), Some("First"));
        assert_eq!(recs[1].title.as_deref(), Some("Second"));
    }

    #[test]
    fn contentless_wrapper_is_dropped() {
        let recs = parse_html(r#"<div><div class="g"><span></span></div></div>"#);
        assert!(recs.is_empty());
    }
}
