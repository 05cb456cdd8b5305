//! Response envelope and search backend wire models.

use serde::{Deserialize, Serialize};

/// Complete response body for a dimension search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub count: u64,
    pub limit: usize,
    pub offset: usize,
    pub items: Vec<SearchResultItem>,
}

/// A single dimension option in the result page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub code: String,
    pub dimension_option_url: String,
    pub has_data: bool,
    pub label: String,
    pub number_of_children: u64,
    pub matches: Matches,
}

/// Match spans per highlighted field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Matches {
    #[serde(default)]
    pub code: Vec<MatchSpan>,
    #[serde(default)]
    pub label: Vec<MatchSpan>,
}

/// Half-open character offsets into the original, marker-free field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

/// Raw search backend response, reduced to the parts the gateway reads.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendResponse {
    pub hits: BackendHits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendHits {
    /// Total matching document count, not the page length
    pub total: u64,
    #[serde(default)]
    pub hits: Vec<BackendHit>,
}

/// One backend hit: the stored source plus optional highlight fragments.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendHit {
    #[serde(rename = "_source")]
    pub source: DimensionOption,
    #[serde(default)]
    pub highlight: Option<HighlightFragments>,
}

/// Stored fields of a dimension option document.
#[derive(Debug, Clone, Deserialize)]
pub struct DimensionOption {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub has_data: bool,
    #[serde(default)]
    pub number_of_children: u64,
}

/// Marker-wrapped copies of matched field values, in backend order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HighlightFragments {
    #[serde(default)]
    pub code: Vec<String>,
    #[serde(default)]
    pub label: Vec<String>,
}
