//! Definition of the highlighter's error and result.

use std::sync::PoisonError;

use thiserror::Error;

/// The library's failure based error enum
#[derive(Debug, Error)]
pub enum HighlightError {
    /// The token stream of the current document could not be read.
    ///
    /// Only the highlighting of the current document is aborted; callers
    /// typically fall back to displaying the untouched text.
    #[error("Failed to read the token stream: '{0}'")]
    TokenStream(String),
    /// Invalid argument was passed by the user.
    #[error("An invalid argument was passed: '{0}'")]
    InvalidArgument(String),
    /// Highlight options could not be deserialized.
    #[error("Failed to deserialize highlight options: '{0}'")]
    Deserialization(#[from] serde_json::Error),
    /// A thread holding the lock panicked and poisoned the lock.
    #[error("A thread holding the lock panicked and poisoned the lock")]
    Poisoned,
}

impl<Guard> From<PoisonError<Guard>> for HighlightError {
    fn from(_: PoisonError<Guard>) -> HighlightError {
        HighlightError::Poisoned
    }
}

impl From<regex::Error> for HighlightError {
    fn from(error: regex::Error) -> HighlightError {
        HighlightError::InvalidArgument(format!("Invalid pattern. {error}"))
    }
}
