use std::collections::HashMap;

use anyhow::{ensure, Result};
use tracing::warn;

use super::classify::UNKNOWN;
use super::components::{Component, Section};
use super::dom;
use super::extract;
use super::results::ParsedResult;

/// A type-specific extraction operation. Returns the component's flat
/// sub-records; `sub_rank` and `cmpt_rank` are stamped by the dispatcher.
pub type ParserFn = fn(&Component) -> Result<Vec<ParsedResult>>;

/// String-keyed map from semantic type to parsing operation, plus an
/// independently extensible sub-registry for footer-section components.
/// Constructed once, shared read-only across page parses.
pub struct ParserRegistry {
    main: HashMap<String, ParserFn>,
    footer: HashMap<String, ParserFn>,
}

impl ParserRegistry {
    pub fn empty() -> Self {
        Self {
            main: HashMap::new(),
            footer: HashMap::new(),
        }
    }

    /// Registry with every implemented parser installed. Types that classify
    /// but have no entry here resolve through the not-implemented sentinel.
    pub fn builtin() -> Self {
        let mut r = Self::empty();
        r.register("images", extract::images::parse);
        r.register("general", extract::general::parse);
        r.register("top_stories", extract::top_stories::parse);
        r.register("people_also_ask", extract::people_also_ask::parse);
        r.register("searches_related", extract::searches_related::parse);
        r.register("knowledge_rhs", extract::knowledge_rhs::parse);
        r.register_footer("searches_related", extract::searches_related::parse);
        r.register_footer("omitted_notice", extract::footer::parse_omitted_notice);
        r
    }

    pub fn register(&mut self, cmpt_type: &str, parser: ParserFn) {
        self.main.insert(cmpt_type.to_string(), parser);
    }

    pub fn register_footer(&mut self, cmpt_type: &str, parser: ParserFn) {
        self.footer.insert(cmpt_type.to_string(), parser);
    }

    fn resolve(&self, cmpt: &Component) -> Option<ParserFn> {
        let table = match cmpt.section {
            Section::Footer => &self.footer,
            _ => &self.main,
        };
        table.get(cmpt.cmpt_type.as_str()).copied()
    }
}

/// Dispatch one classified component to its parser and stamp ranks.
///
/// A parser failure is converted into a single error-tagged record here and
/// never aborts the page: downstream components are parsed regardless. The
/// only fatal case is an empty classified type, which signals a bug in
/// extraction rather than a data problem.
pub fn parse_component(registry: &ParserRegistry, cmpt: &Component) -> Result<Vec<ParsedResult>> {
    ensure!(
        !cmpt.cmpt_type.is_empty(),
        "empty component type at rank {}",
        cmpt.cmpt_rank
    );

    let parser = match registry.resolve(cmpt) {
        Some(f) => f,
        None if cmpt.cmpt_type == UNKNOWN => return Ok(vec![parse_unknown(cmpt)]),
        None => return Ok(vec![parse_not_implemented(cmpt)]),
    };

    let mut parsed = match parser(cmpt) {
        Ok(records) => records,
        Err(e) => {
            warn!(
                cmpt_rank = cmpt.cmpt_rank,
                cmpt_type = %cmpt.cmpt_type,
                "parser failed: {e:#}"
            );
            let mut rec = ParsedResult::new(&cmpt.cmpt_type);
            rec.cmpt_rank = cmpt.cmpt_rank;
            rec.error = Some(format!("{e:#}"));
            return Ok(vec![rec]);
        }
    };

    for (sub_rank, rec) in parsed.iter_mut().enumerate() {
        rec.sub_rank = sub_rank;
        rec.cmpt_rank = cmpt.cmpt_rank;
    }
    Ok(parsed)
}

// Every unknown component still surfaces in output instead of disappearing.
fn parse_unknown(cmpt: &Component) -> ParsedResult {
    let mut rec = ParsedResult::new(UNKNOWN);
    rec.cmpt_rank = cmpt.cmpt_rank;
    let text = dom::get_text(cmpt.elem, "<|>", true);
    rec.text = (!text.is_empty()).then_some(text);
    rec
}

// Recognized but unparsed: distinct from a true unknown via the error field.
fn parse_not_implemented(cmpt: &Component) -> ParsedResult {
    let mut rec = ParsedResult::new(&cmpt.cmpt_type);
    rec.cmpt_rank = cmpt.cmpt_rank;
    rec.text = Some(dom::get_text(cmpt.elem, "<|>", true));
    rec.error = Some("not implemented".to_string());
    rec
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn component<'a>(doc: &'a Html, section: Section, cmpt_type: &str, rank: usize) -> Component<'a> {
        let elem = dom::find_first(doc.root_element(), "div", &[]).unwrap();
        Component {
            elem,
            section,
            cmpt_type: cmpt_type.to_string(),
            cmpt_rank: rank,
        }
    }

    #[test]
    fn unknown_sentinel_surfaces_text() {
        let doc = Html::parse_document("<div><p>mystery</p><p>block</p></div>");
        let cmpt = component(&doc, Section::Main, UNKNOWN, 3);
        let recs = parse_component(&ParserRegistry::builtin(), &cmpt).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].cmpt_type, "unknown");
        assert_eq!(recs[0].cmpt_rank, 3);
        assert_eq!(recs[0].text.as_deref(), Some("mystery<|>block"));
        assert!(recs[0].error.is_none());
    }

    #[test]
    fn not_implemented_sentinel_keeps_type() {
        let doc = Html::parse_document("<div>tweet tweet</div>");
        let cmpt = component(&doc, Section::Main, "twitter", 1);
        let recs = parse_component(&ParserRegistry::builtin(), &cmpt).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].cmpt_type, "twitter");
        assert_eq!(recs[0].error.as_deref(), Some("not implemented"));
    }

    #[test]
    fn footer_types_resolve_through_footer_registry_only() {
        // "navigation" exists nowhere: footer dispatch must not fall back to
        // the main registry, so it lands on the not-implemented sentinel.
        let doc = Html::parse_document(r#"<div role="navigation">1 2 3</div>"#);
        let cmpt = component(&doc, Section::Footer, "navigation", 9);
        let recs = parse_component(&ParserRegistry::builtin(), &cmpt).unwrap();
        assert_eq!(recs[0].error.as_deref(), Some("not implemented"));
    }

    #[test]
    fn parser_error_becomes_record_not_failure() {
        fn always_fails(_: &Component) -> Result<Vec<ParsedResult>> {
            anyhow::bail!("selector went sideways")
        }
        let mut registry = ParserRegistry::empty();
        registry.register("broken", always_fails);

        let doc = Html::parse_document("<div>x</div>");
        let cmpt = component(&doc, Section::Main, "broken", 2);
        let recs = parse_component(&registry, &cmpt).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].cmpt_type, "broken");
        assert_eq!(recs[0].cmpt_rank, 2);
        assert!(recs[0].error.as_deref().unwrap().contains("selector went sideways"));
    }

    #[test]
    fn empty_type_is_fatal() {
        let doc = Html::parse_document("<div>x</div>");
        let cmpt = component(&doc, Section::Main, "", 0);
        assert!(parse_component(&ParserRegistry::builtin(), &cmpt).is_err());
    }

    #[test]
    fn dispatcher_stamps_sub_ranks() {
        fn three_records(_: &Component) -> Result<Vec<ParsedResult>> {
            Ok(vec![
                ParsedResult::new("fake"),
                ParsedResult::new("fake"),
                ParsedResult::new("fake"),
            ])
        }
        let mut registry = ParserRegistry::empty();
        registry.register("fake", three_records);

        let doc = Html::parse_document("<div>x</div>");
        let cmpt = component(&doc, Section::Main, "fake", 5);
        let recs = parse_component(&registry, &cmpt).unwrap();
        let subs: Vec<usize> = recs.iter().map(|r| r.sub_rank).collect();
        assert_eq!(subs, vec![0, 1, 2]);
        assert!(recs.iter().all(|r| r.cmpt_rank == 5));
    }
}
