use serde::Serialize;

/// One flat output record. A component expands into an ordered sequence of
/// these; unavailable fields stay `None` and are omitted from serialization.
///
/// Rank invariants per page: `serp_rank` is contiguous 0..n-1 in list order,
/// `(cmpt_rank, sub_rank)` pairs are unique.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedResult {
    #[serde(rename = "type")]
    pub cmpt_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    pub cmpt_rank: usize,
    pub sub_rank: usize,
    pub serp_rank: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serp_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawl_id: Option<String>,
}

impl ParsedResult {
    pub fn new(cmpt_type: &str) -> Self {
        Self {
            cmpt_type: cmpt_type.to_string(),
            ..Default::default()
        }
    }

    /// True when no content field was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.text.is_none()
    }
}

// ── Tests ──
