//! Individual error records and the loose inputs accepted by bulk adds.

use serde::{Deserialize, Serialize};

use super::ErrorCode;

/// A single coded error message.
///
/// Two entries are equal when both their code and message are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable, possibly localised, message.
    pub message: String,
}

impl ErrorEntry {
    /// Creates an entry from a code and a message.
    #[must_use]
    pub fn new(code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// An error awaiting insertion through [`super::ErrorCollection::add_multiple`].
///
/// The message is treated as a message-or-key: it is offered to the
/// localiser first and defaults to the code when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpec {
    /// Error code to record.
    pub code: ErrorCode,
    /// Message or translation key; `None` falls back to the code.
    pub message: Option<String>,
}

impl ErrorSpec {
    /// Pairs a code with an optional message or key.
    #[must_use]
    pub fn new(code: impl Into<ErrorCode>, message: Option<String>) -> Self {
        Self {
            code: code.into(),
            message,
        }
    }
}

impl From<ErrorEntry> for ErrorSpec {
    fn from(entry: ErrorEntry) -> Self {
        Self::new(entry.code, Some(entry.message))
    }
}

impl From<&ErrorEntry> for ErrorSpec {
    fn from(entry: &ErrorEntry) -> Self {
        Self::new(entry.code.clone(), Some(entry.message.clone()))
    }
}

impl From<ErrorCode> for ErrorSpec {
    fn from(code: ErrorCode) -> Self {
        Self::new(code, None)
    }
}

impl From<&'static str> for ErrorSpec {
    fn from(code: &'static str) -> Self {
        Self::new(code, None)
    }
}

impl<C: Into<ErrorCode>> From<(C, &str)> for ErrorSpec {
    fn from((code, message): (C, &str)) -> Self {
        Self::new(code, Some(message.to_owned()))
    }
}

impl<C: Into<ErrorCode>> From<(C, String)> for ErrorSpec {
    fn from((code, message): (C, String)) -> Self {
        Self::new(code, Some(message))
    }
}

impl<C: Into<ErrorCode>> From<(C, Option<&str>)> for ErrorSpec {
    fn from((code, message): (C, Option<&str>)) -> Self {
        Self::new(code, message.map(str::to_owned))
    }
}
