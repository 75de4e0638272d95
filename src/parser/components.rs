use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static RSO: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div#rso").unwrap());
static CENTER_COL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div#center_col").unwrap());
static RHS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div#rhs").unwrap());
static BOTSTUFF: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div#botstuff").unwrap());

/// Structurally pre-identified page region. Main-flow components get their
/// type from the classifier at parse time; the other regions are known from
/// structure alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Main,
    KnowledgeRhs,
    Footer,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Main => "main",
            Section::KnowledgeRhs => "knowledge_rhs",
            Section::Footer => "footer",
        }
    }
}

/// One classified result block, immutable once built.
#[derive(Debug, Clone)]
pub struct Component<'a> {
    pub elem: ElementRef<'a>,
    pub section: Section,
    pub cmpt_type: String,
    pub cmpt_rank: usize,
}

/// Segment the page into (section, node) pairs in page order: results-column
/// children first, then the right-hand side panel, then footer children.
///
/// Region roots are claimed before the main sweep so a node inside the side
/// panel or footer is never also emitted as a main-flow component, and a
/// region's interior is never re-extracted as siblings of its root.
pub fn extract_components(doc: &Html) -> Vec<(Section, ElementRef<'_>)> {
    let rhs = doc.select(&RHS).next();
    let footer = doc.select(&BOTSTUFF).next();
    let claimed: Vec<ElementRef> = rhs.into_iter().chain(footer).collect();

    let mut cmpts = Vec::new();

    let column = doc
        .select(&RSO)
        .next()
        .or_else(|| doc.select(&CENTER_COL).next());
    if let Some(column) = column {
        for child in column.children().filter_map(ElementRef::wrap) {
            if matches!(child.value().name(), "script" | "style") {
                continue;
            }
            if inside_claimed(child, &claimed) {
                continue;
            }
            cmpts.push((Section::Main, child));
        }
    }

    if let Some(rhs) = rhs {
        cmpts.push((Section::KnowledgeRhs, rhs));
    }

    if let Some(footer) = footer {
        for child in footer.children().filter_map(ElementRef::wrap) {
            if matches!(child.value().name(), "script" | "style") {
                continue;
            }
            cmpts.push((Section::Footer, child));
        }
    }

    cmpts
}

fn inside_claimed(el: ElementRef, claimed: &[ElementRef]) -> bool {
    claimed
        .iter()
        .any(|root| root.id() == el.id() || el.ancestors().any(|a| a.id() == root.id()))
}

// ── Tests ──
