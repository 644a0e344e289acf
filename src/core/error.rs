use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// Cookie or crumb acquisition failed.
    #[error("Auth error: {0}")]
    Auth(String),

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// The symbol is empty or whitespace-only and is rejected before any request is made.
    #[error("invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// The batch deadline elapsed before this symbol's fetch completed.
    #[error("batch deadline elapsed while fetching {0}")]
    Deadline(String),
}

impl FetchError {
    /// Whether this is a transport-level (HTTP) failure, as opposed to a
    /// decode or provider-data failure. Transport failures carry an
    /// `HTTPError: ` prefix when reported in batch output.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }
}
