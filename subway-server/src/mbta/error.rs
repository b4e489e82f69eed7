//! MBTA client error types.

/// Errors from the MBTA HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum MbtaError {
    /// HTTP request failed (connectivity, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the API and retries exhausted
    #[error("rate limited by the MBTA API")]
    RateLimited,

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response envelope has no usable `data` array
    #[error("response has no usable `data` field")]
    MissingData,
}

impl MbtaError {
    /// Whether the retrying fetcher may try this request again.
    ///
    /// Rate limiting, transport failures, and body parse failures are
    /// transient; any other API status is taken at its word.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            MbtaError::Http(_) | MbtaError::RateLimited | MbtaError::Json { .. }
        )
    }
}
