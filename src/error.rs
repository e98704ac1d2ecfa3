//! Error types for the Enigma library.

use thiserror::Error;

/// Errors produced by the Enigma library.
///
/// Every variant carries a short description of the offending input so the
/// command-line driver can report it on a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Malformed cycle notation or configuration text.
    #[error("format error: {0}")]
    Format(String),
    /// Alphabet lookup outside its bounds (index or symbol not present).
    #[error("range error: {0}")]
    Range(String),
    /// Rotor selection, rotor positioning, or machine shape is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Operation not allowed in the current machine or rotor state.
    #[error("state error: {0}")]
    State(String),
    /// Reading messages or writing converted text failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for EnigmaError {
    fn from(err: std::io::Error) -> Self {
        EnigmaError::Io(err.to_string())
    }
}

impl EnigmaError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        EnigmaError::Format(msg.into())
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        EnigmaError::Range(msg.into())
    }

    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        EnigmaError::Configuration(msg.into())
    }

    pub(crate) fn state(msg: impl Into<String>) -> Self {
        EnigmaError::State(msg.into())
    }
}
