//! Error types for the font extraction core.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core.
///
/// CSS problems never become an `Error`: they are recorded as
/// [`ParseError`](crate::ParseError) diagnostics and parsing continues.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A URL could not be parsed or has no host.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl Error {
    /// Create an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }
}
