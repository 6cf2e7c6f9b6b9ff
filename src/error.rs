use thiserror::Error;

/// Application level error type used throughout the crate.
///
/// Errors only arise at the configuration-loading boundary. Row
/// validation itself is total: malformed condition expressions and
/// dangling object references surface as row classifications, never
/// as errors.
#[derive(Error, Debug)]
pub enum ZoneError {
    /// I/O related failure
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error while decoding stored JSON properties
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient alias over [`Result`] using [`ZoneError`]
pub type Result<T> = std::result::Result<T, ZoneError>;
