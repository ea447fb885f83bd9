//! Wire parser error types

use thiserror::Error;

/// Boxed error cause carried inside a parse failure.
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by the wire-format parsers
#[derive(Error, Debug)]
pub enum WireError {
    /// IO error while reading the input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML is not well-formed
    #[error("XML error: {0}")]
    Xml(String),

    /// Input does not match any supported wire format.
    ///
    /// This is a negative probe result consumed by format auto-selection
    /// upstream, not a parse failure.
    #[error("Input does not match a supported wire format")]
    FormatMismatch,

    /// Field extraction failed; the whole parse fails, no partial record
    #[error("Parse failure for provider {provider}: {cause}")]
    ParseFailure {
        /// Ingest provider identity, for diagnostics
        provider: String,
        /// Original failure
        #[source]
        cause: Cause,
    },
}

impl WireError {
    /// Wrap any extraction failure with the provider identity.
    pub fn parse_failure(provider: &str, cause: impl Into<Cause>) -> Self {
        WireError::ParseFailure {
            provider: provider.to_string(),
            cause: cause.into(),
        }
    }
}

/// Result type alias using WireError
pub type Result<T> = std::result::Result<T, WireError>;
