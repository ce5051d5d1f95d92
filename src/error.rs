//! Error types for chat log parsing

use thiserror::Error;

/// Errors that can occur around the parsing pipeline.
///
/// The pipeline itself never fails on malformed lines; these variants cover
/// the file and options collaborators and the one contract violation the
/// date orderer can detect.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A date token did not split into day, month and year
    #[error("Malformed date token '{input}': expected 3 components, found {found}")]
    MalformedDate { input: String, found: usize },

    /// Failed to read the chat export
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The chat export is not valid UTF-8
    #[error("Chat export is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The JSON options document could not be loaded
    #[error("Invalid parse options: {0}")]
    Options(#[from] serde_json::Error),
}

/// Result type for chat log parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
