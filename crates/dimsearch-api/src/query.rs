//! Query string validation for the search endpoint.

use dimsearch_common::{Error, Result};
use serde::Deserialize;

/// Raw query string values as received on the wire. Numeric parameters are
/// kept as strings so parse failures can be reported back verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// A validated, bounded search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub limit: usize,
    pub offset: usize,
}

/// Limits applied during validation.
#[derive(Debug, Clone, Copy)]
pub struct QueryBounds {
    pub default_limit: usize,
    pub max_offset: usize,
}

/// Validate raw parameters into a [`SearchRequest`].
///
/// `limit` falls back to the configured default when absent; `offset`
/// defaults to zero and may not exceed `max_offset` (inclusive bound).
pub fn validate(params: &SearchParams, bounds: QueryBounds) -> Result<SearchRequest> {
    let term = match params.q.as_deref() {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => return Err(Error::EmptyQuery),
    };

    let limit = match params.limit.as_deref() {
        Some(raw) => parse_param("limit", raw)?,
        None => bounds.default_limit,
    };

    let offset = match params.offset.as_deref() {
        Some(raw) => parse_param("offset", raw)?,
        None => 0,
    };
    if offset > bounds.max_offset {
        return Err(Error::OffsetTooLarge {
            max: bounds.max_offset,
        });
    }

    Ok(SearchRequest {
        term,
        limit,
        offset,
    })
}

// Negative values fail usize parsing and so are rejected exactly like
// non-numeric input.
fn parse_param(param: &'static str, raw: &str) -> Result<usize> {
    raw.parse().map_err(|e: std::num::ParseIntError| {
        Error::InvalidParameter {
            param,
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: QueryBounds = QueryBounds {
        default_limit: 20,
        max_offset: 1000,
    };

    fn params(q: Option<&str>, limit: Option<&str>, offset: Option<&str>) -> SearchParams {
        SearchParams {
            q: q.map(String::from),
            limit: limit.map(String::from),
            offset: offset.map(String::from),
        }
    }

    #[test]
    fn valid_parameters_pass_through_unchanged() {
        let request = validate(&params(Some("term"), Some("5"), Some("40")), BOUNDS).unwrap();
        assert_eq!(
            request,
            SearchRequest {
                term: "term".to_string(),
                limit: 5,
                offset: 40,
            }
        );
    }

    #[test]
    fn absent_limit_uses_default_and_absent_offset_is_zero() {
        let request = validate(&params(Some("term"), None, None), BOUNDS).unwrap();
        assert_eq!(request.limit, 20);
        assert_eq!(request.offset, 0);
    }

    #[test]
    fn missing_or_empty_query_is_rejected() {
        for p in [params(None, None, None), params(Some(""), None, None)] {
            let err = validate(&p, BOUNDS).unwrap_err();
            assert!(matches!(err, Error::EmptyQuery));
            assert_eq!(err.to_string(), "search term empty");
        }
    }

    #[test]
    fn non_numeric_limit_is_an_invalid_parameter() {
        let err = validate(&params(Some("term"), Some("four"), None), BOUNDS).unwrap_err();
        match err {
            Error::InvalidParameter { param, .. } => assert_eq!(param, "limit"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_offset_is_rejected_like_non_numeric() {
        let err = validate(&params(Some("term"), None, Some("-1")), BOUNDS).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { param: "offset", .. }));
    }

    #[test]
    fn offset_bound_is_inclusive() {
        let ok = validate(&params(Some("term"), None, Some("1000")), BOUNDS).unwrap();
        assert_eq!(ok.offset, 1000);

        let err = validate(&params(Some("term"), None, Some("1001")), BOUNDS).unwrap_err();
        assert!(matches!(err, Error::OffsetTooLarge { max: 1000 }));
        assert_eq!(
            err.to_string(),
            "the maximum offset has been reached, the offset cannot be more than 1000"
        );
    }
}
