pub mod classify;
pub mod components;
pub mod dom;
pub mod extract;
pub mod registry;
pub mod results;
pub mod vocabulary;

use std::collections::HashSet;

use anyhow::Result;
use scraper::Html;
use tracing::debug;

use components::{Component, Section};
use registry::ParserRegistry;
use results::ParsedResult;
use vocabulary::Vocabulary;

use crate::db::SerpPage;

/// The parse pipeline: segmentation → classification → dispatch → assembly.
///
/// Owns the immutable vocabulary, registry, and exclusion set for a run.
/// Everything here is read-only after construction, so one `SerpParser` is
/// safely shared across threads parsing independent pages.
pub struct SerpParser {
    vocabulary: Vocabulary,
    registry: ParserRegistry,
    excluded: HashSet<String>,
}

impl Default for SerpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SerpParser {
    pub fn new() -> Self {
        Self::with_parts(
            Vocabulary::builtin(),
            ParserRegistry::builtin(),
            ["directions"].into_iter().map(String::from).collect(),
        )
    }

    /// Assemble a pipeline from explicit parts; lets tests substitute
    /// vocabularies and registries without any shared global state.
    pub fn with_parts(
        vocabulary: Vocabulary,
        registry: ParserRegistry,
        excluded: HashSet<String>,
    ) -> Self {
        Self {
            vocabulary,
            registry,
            excluded,
        }
    }

    /// Parse a full results page into an ordered list of flat records.
    ///
    /// The returned list is either complete (possibly containing unknown,
    /// not-implemented, and error-tagged records) or the whole parse fails;
    /// individual components are never silently dropped, except for types
    /// in the exclusion set, which are skipped before rank assignment.
    pub fn parse(
        &self,
        doc: &Html,
        serp_id: Option<&str>,
        crawl_id: Option<&str>,
    ) -> Result<Vec<ParsedResult>> {
        let cmpts = components::extract_components(doc);

        let mut parsed = Vec::new();
        for (cmpt_rank, (section, elem)) in cmpts.into_iter().enumerate() {
            let cmpt_type = match section {
                Section::Main => classify::classify(&self.vocabulary, elem),
                Section::Footer => classify::classify_footer(&self.vocabulary, elem),
                Section::KnowledgeRhs => section.as_str().to_string(),
            };

            if self.excluded.contains(&cmpt_type) {
                debug!(cmpt_rank, %cmpt_type, "skipping excluded component");
                continue;
            }

            let cmpt = Component {
                elem,
                section,
                cmpt_type,
                cmpt_rank,
            };
            parsed.extend(registry::parse_component(&self.registry, &cmpt)?);
        }

        for (serp_rank, rec) in parsed.iter_mut().enumerate() {
            rec.serp_rank = serp_rank;
            if let Some(id) = serp_id {
                rec.serp_id = Some(id.to_string());
            }
            if let Some(id) = crawl_id {
                rec.crawl_id = Some(id.to_string());
            }
        }

        Ok(parsed)
    }

    pub fn parse_html(
        &self,
        html: &str,
        serp_id: Option<&str>,
        crawl_id: Option<&str>,
    ) -> Result<Vec<ParsedResult>> {
        let doc = Html::parse_document(html);
        self.parse(&doc, serp_id, crawl_id)
    }
}

/// Parse one stored page into flat result records.
pub fn process_page(parser: &SerpParser, page: &SerpPage) -> Result<Vec<ParsedResult>> {
    parser.parse_html(&page.html, Some(&page.serp_id), page.crawl_id.as_deref())
}

// ── Tests ──
