//! Declarative classification data: canonical header phrases and structural
//! attribute fingerprints, declared as `type -> signals` tables and inverted
//! into ordered lookup lists at load time. The tables are data, not control
//! flow; adding a type means adding an entry here, nothing else.

/// Bumped whenever the phrase or marker data changes shape or content.
pub const VOCABULARY_VERSION: &str = "2026-08";

/// A structural fingerprint identifying a component type without reading text.
#[derive(Debug, Clone)]
pub struct Marker {
    pub cmpt_type: &'static str,
    pub tag: &'static str,
    pub attr: &'static str,
    pub pattern: Pattern,
}

#[derive(Debug, Clone)]
pub enum Pattern {
    /// Attribute value equals the string.
    Exact(&'static str),
    /// `class` attribute contains the token.
    ClassToken(&'static str),
    /// Attribute value starts with the string.
    Prefix(&'static str),
}

// type -> level-2 header phrases (e.g. <h2>Top stories</h2>)
const H2_PHRASES: &[(&str, &[&str])] = &[
    ("directions", &["Directions"]),
    ("discussions_and_forums", &["Discussions and forums"]),
    (
        "general",
        &[
            "Complementary Results",
            "Resultados de la Web",
            "Web Result with Site Links",
            "Web results",
        ],
    ),
    ("jobs", &["Jobs"]),
    (
        "knowledge",
        &[
            "Calculator Result",
            "Featured snippet from the web",
            "Finance Results",
            "From sources across the web",
            "Knowledge Result",
            "Resultado de traducci\u{f3}n",
            "Sports Results",
            "Translation Result",
            "Unit Converter",
            "Weather Result",
        ],
    ),
    ("local_news", &["Local news"]),
    ("local_results", &["Local Results"]),
    ("map_results", &["Map Results"]),
    ("omitted_notice", &["Notices about Filtered Results"]),
    ("people_also_ask", &["People also ask"]),
    ("perspectives", &["Perspectives & opinions", "Perspectives"]),
    (
        "searches_related",
        &[
            "Additional searches",
            "More searches",
            "Other searches",
            "People also search for",
            "Related",
            "Related searches",
            "Related to this search",
        ],
    ),
    ("top_stories", &["Top stories"]),
    ("twitter", &["Twitter Results"]),
    ("videos", &["Videos"]),
];

// type -> level-3 header phrases (e.g. <h3>Images for</h3>)
const H3_PHRASES: &[(&str, &[&str])] = &[
    ("images", &["Images for"]),
    ("latest_from", &["Latest from"]),
    ("products", &["Popular products"]),
    ("news_quotes", &["Quotes in the news"]),
    ("recipes", &["Recipes"]),
    ("searches_related", &["Related searches"]),
    ("scholarly_articles", &["Scholarly articles for"]),
    ("top_stories", &["Top stories"]),
    ("videos", &["Videos"]),
    ("view_more_news", &["View more news"]),
    ("view_more_videos", &["View more videos"]),
];

const fn marker(cmpt_type: &'static str, tag: &'static str, attr: &'static str, pattern: Pattern) -> Marker {
    Marker { cmpt_type, tag, attr, pattern }
}

const MAIN_MARKERS: &[Marker] = &[
    marker("ad", "div", "id", Pattern::Prefix("tads")),
    marker("images", "div", "id", Pattern::Exact("imagebox_bigimages")),
    marker("images", "div", "id", Pattern::Exact("iur")),
    marker("knowledge", "div", "class", Pattern::ClassToken("kp-wholepage")),
    marker("map_results", "div", "class", Pattern::ClassToken("lu_map_section")),
    marker("local_results", "div", "class", Pattern::ClassToken("VkpGBb")),
    marker("people_also_ask", "div", "class", Pattern::ClassToken("related-question-pair")),
    marker("twitter", "div", "class", Pattern::ClassToken("eejeod")),
];

// Footer region children carry no headers; they are typed by marker only.
const FOOTER_MARKERS: &[Marker] = &[
    marker("searches_related", "div", "id", Pattern::Exact("bres")),
    marker("searches_related", "div", "id", Pattern::Exact("brs")),
    marker("omitted_notice", "p", "id", Pattern::Exact("ofr")),
    marker("omitted_notice", "div", "id", Pattern::Exact("ofr")),
    marker("navigation", "div", "role", Pattern::Exact("navigation")),
    marker("navigation", "table", "id", Pattern::Exact("nav")),
];

/// Immutable classification tables, constructed once and shared read-only
/// across every classification in a run.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub markers: Vec<Marker>,
    pub footer_markers: Vec<Marker>,
    h2_phrases: Vec<(String, String)>,
    h3_phrases: Vec<(String, String)>,
}

impl Vocabulary {
    pub fn builtin() -> Self {
        Self {
            markers: MAIN_MARKERS.to_vec(),
            footer_markers: FOOTER_MARKERS.to_vec(),
            h2_phrases: invert(H2_PHRASES),
            h3_phrases: invert(H3_PHRASES),
        }
    }

    /// Empty tables; for assembling test vocabularies.
    pub fn empty() -> Self {
        Self {
            markers: Vec::new(),
            footer_markers: Vec::new(),
            h2_phrases: Vec::new(),
            h3_phrases: Vec::new(),
        }
    }

    /// (phrase, type) pairs for a heading level, in declaration order.
    pub fn phrases(&self, level: u8) -> &[(String, String)] {
        match level {
            2 => &self.h2_phrases,
            3 => &self.h3_phrases,
            _ => &[],
        }
    }

    pub fn add_phrase(&mut self, level: u8, phrase: &str, cmpt_type: &str) {
        let pairs = match level {
            2 => &mut self.h2_phrases,
            3 => &mut self.h3_phrases,
            _ => return,
        };
        pairs.push((phrase.to_string(), cmpt_type.to_string()));
    }
}

// Invert {type: [phrase, ...]} to ordered [(phrase, type), ...].
fn invert(table: &[(&str, &[&str])]) -> Vec<(String, String)> {
    table
        .iter()
        .flat_map(|(label, phrases)| {
            phrases.iter().map(move |p| (p.to_string(), label.to_string()))
        })
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inversion_preserves_declaration_order() {
        let v = Vocabulary::builtin();
        let phrases: Vec<&str> = v.phrases(2).iter().map(|(p, _)| p.as_str()).collect();
        let related = phrases.iter().position(|p| *p == "Related").unwrap();
        let related_searches = phrases.iter().position(|p| *p == "Related searches").unwrap();
        assert!(related < related_searches);
    }

    #[test]
    fn h2_and_h3_tables_are_distinct() {
        let v = Vocabulary::builtin();
        assert!(v.phrases(2).iter().any(|(p, t)| p == "Top stories" && t == "top_stories"));
        assert!(v.phrases(3).iter().any(|(p, t)| p == "Images for" && t == "images"));
        assert!(!v.phrases(3).iter().any(|(p, _)| p == "People also ask"));
        assert!(v.phrases(4).is_empty());
    }

    #[test]
    fn footer_markers_cover_notice_and_related() {
        let v = Vocabulary::builtin();
        assert!(v.footer_markers.iter().any(|m| m.cmpt_type == "omitted_notice"));
        assert!(v.footer_markers.iter().any(|m| m.cmpt_type == "searches_related"));
    }
}
