use anyhow::Result;

use super::{drop_empty, nonempty};
use crate::parser::components::Component;
use crate::parser::dom::{self, AttrMatch};
use crate::parser::results::ParsedResult;

/// Parse a related-questions component: one record per question, question
/// text in the `text` field. Answers are collapsed client-side and rarely
/// present in the static tree, so only the questions are extracted.
pub fn parse(cmpt: &Component) -> Result<Vec<ParsedResult>> {
    let questions =
        dom::find_all(cmpt.elem, "div", &[("class", AttrMatch::Exact("related-question-pair"))]);

    let parsed = questions
        .into_iter()
        .map(|q| {
            let mut rec = ParsedResult::new("people_also_ask");
            rec.text = nonempty(dom::get_text(q, " ", true));
            rec
        })
        .collect();
    Ok(drop_empty(parsed))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::components::Section;
    use scraper::Html;

    #[test]
    fn one_record_per_question() {
        let doc = Html::parse_document(
            r#"<div>
                 <h2 role="heading">People also ask</h2>
                 <div class="related-question-pair">Why is the sky blue?</div>
                 <div class="related-question-pair">How tall is Everest?</div>
               </div>"#,
        );
        let elem = dom::find_first(doc.root_element(), "div", &[]).unwrap();
        let cmpt = Component {
            elem,
            section: Section::Main,
            cmpt_type: "people_also_ask".to_string(),
            cmpt_rank: 0,
        };
        let recs = parse(&cmpt).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].text.as_deref(), Some("Why is the sky blue?"));
        assert_eq!(recs[1].text.as_deref(), Some("How tall is Everest?"));
    }
}
