//! Error types for the storefront crates.

/// Domain-level errors (invalid values).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid country code: {0}")]
    InvalidCountryCode(String),
}

/// Failures reported by an external data source (geocoder, rate provider).
///
/// The converter never propagates these; they are logged and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status {status} from {source_name}")]
    Status { source_name: &'static str, status: u16 },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("No country in geocoder response")]
    MissingCountry,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
