/// Errors raised while talking to GitHub or reading the workflow event.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// Required data is absent from the event or an API response.
    #[error("missing data: {0}")]
    MissingData(String),

    /// The event payload or an API response has an unexpected shape.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("GitHub API returned {status} for {url}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
        /// Response body, as returned.
        message: String,
    },

    /// A local file (e.g. the event payload) could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for GitHub operations.
pub type GithubResult<T> = Result<T, GithubError>;
