//! Recomputation of highlight fragments into character-offset match spans.
//!
//! The search backend returns each matched field as a copy of the original
//! value with matched substrings wrapped in reserved control-character
//! markers. The gateway strips the markers and reports half-open character
//! offsets on the unmarked value, so clients never see the markers and the
//! offsets stay stable regardless of encoding.

use crate::models::MatchSpan;
use dimsearch_common::{Error, Result};

/// Delimiters wrapped around matched substrings by the backend. These are
/// part of the backend contract rather than content, so they live here as a
/// single definition shared by the query builder and the recomputer.
#[derive(Debug, Clone, Copy)]
pub struct HighlightMarkers {
    pub start: &'static str,
    pub end: &'static str,
}

impl Default for HighlightMarkers {
    fn default() -> Self {
        Self {
            start: "\u{1}S",
            end: "\u{1}E",
        }
    }
}

/// Compute the match spans of a single highlight fragment.
///
/// Offsets count characters, not bytes, and refer to the marker-free
/// string. Adjacent start/end markers yield a zero-length span. Unbalanced
/// markers mean the backend violated its contract; that is surfaced as an
/// error rather than silently producing wrong offsets.
pub fn match_spans(fragment: &str, markers: HighlightMarkers) -> Result<Vec<MatchSpan>> {
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;
    let mut chars = 0usize;
    let mut rest = fragment;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(markers.start) {
            if open.is_some() {
                return Err(Error::MalformedHighlight(format!(
                    "nested start marker at character {}",
                    chars
                )));
            }
            open = Some(chars);
            rest = after;
        } else if let Some(after) = rest.strip_prefix(markers.end) {
            let start = open.take().ok_or_else(|| {
                Error::MalformedHighlight(format!("unmatched end marker at character {}", chars))
            })?;
            spans.push(MatchSpan { start, end: chars });
            rest = after;
        } else {
            let c = rest.chars().next().unwrap_or_default();
            chars += 1;
            rest = &rest[c.len_utf8()..];
        }
    }

    if open.is_some() {
        return Err(Error::MalformedHighlight(
            "unterminated start marker".to_string(),
        ));
    }
    Ok(spans)
}

/// Remove the markers from a fragment, recovering the original field value.
pub fn strip_markers(fragment: &str, markers: HighlightMarkers) -> String {
    fragment.replace(markers.start, "").replace(markers.end, "")
}
