//! Assembly of the public result envelope from raw backend hits.

use crate::highlight::{self, HighlightMarkers};
use crate::models::{
    BackendResponse, HighlightFragments, Matches, SearchResultItem, SearchResults,
};
use crate::query::SearchRequest;
use dimsearch_common::Result;

/// Path identifiers of the dataset version being searched, used to build
/// each item's dimension option URL.
#[derive(Debug, Clone, Copy)]
pub struct SearchPath<'a> {
    pub dataset_id: &'a str,
    pub edition: &'a str,
    pub version: &'a str,
    pub dimension: &'a str,
}

/// Build the response envelope from the backend's raw hit list.
///
/// `count` is the backend-reported total matching document count; items
/// keep the backend's relevance order.
pub fn build_search_results(
    request: &SearchRequest,
    path: SearchPath<'_>,
    host: &str,
    markers: HighlightMarkers,
    response: BackendResponse,
) -> Result<SearchResults> {
    let mut items = Vec::with_capacity(response.hits.hits.len());
    for hit in response.hits.hits {
        let matches = match_spans_for(hit.highlight.as_ref(), markers)?;
        items.push(SearchResultItem {
            dimension_option_url: format!(
                "{}/datasets/{}/editions/{}/versions/{}/dimensions/{}/options/{}",
                host, path.dataset_id, path.edition, path.version, path.dimension, hit.source.code,
            ),
            code: hit.source.code,
            has_data: hit.source.has_data,
            label: hit.source.label,
            number_of_children: hit.source.number_of_children,
            matches,
        });
    }

    Ok(SearchResults {
        count: response.hits.total,
        limit: request.limit,
        offset: request.offset,
        items,
    })
}

// A field may come back as several fragments; their spans are concatenated
// in the order the backend returned them.
fn match_spans_for(
    fragments: Option<&HighlightFragments>,
    markers: HighlightMarkers,
) -> Result<Matches> {
    let mut matches = Matches::default();
    let Some(fragments) = fragments else {
        return Ok(matches);
    };
    for fragment in &fragments.code {
        matches.code.extend(highlight::match_spans(fragment, markers)?);
    }
    for fragment in &fragments.label {
        matches.label.extend(highlight::match_spans(fragment, markers)?);
    }
    Ok(matches)
}
