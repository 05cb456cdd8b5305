//! Error types for the dimension-search gateway.

use thiserror::Error;

/// Result type alias for dimension-search operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the dimension-search gateway.
#[derive(Error, Debug)]
pub enum Error {
    /// The `q` query parameter was absent or empty
    #[error("search term empty")]
    EmptyQuery,

    /// A query parameter failed to parse as a non-negative integer
    #[error("{message}")]
    InvalidParameter { param: &'static str, message: String },

    /// The requested offset exceeds the configured maximum
    #[error("the maximum offset has been reached, the offset cannot be more than {max}")]
    OffsetTooLarge { max: usize },

    /// Resource missing upstream or in the search backend
    #[error("not found: {0}")]
    NotFound(String),

    /// A collaborator (search backend, dataset service, queue) failed
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Highlight fragment with unbalanced markers; a backend-contract
    /// violation, never mapped to a client error
    #[error("malformed highlight fragment: {0}")]
    MalformedHighlight(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// True for errors caused by the client's own request parameters.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyQuery | Error::InvalidParameter { .. } | Error::OffsetTooLarge { .. }
        )
    }

    /// True for core-logic or backend-contract violations, logged apart
    /// from ordinary upstream unavailability.
    pub fn is_defect(&self) -> bool {
        matches!(self, Error::MalformedHighlight(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Upstream(format!("response deserialization failed: {}", e))
    }
}
