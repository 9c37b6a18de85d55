//! Primary error enum for command invocation and error merging.

use thiserror::Error;

use crate::errors::Attribute;

/// Result alias for operations that can only fail through misuse.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors raised when the library is used incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CommandError {
    /// A runner was asked to invoke its command a second time.
    #[error("command `{command}` has already been invoked")]
    AlreadyInvoked {
        /// Type name of the command owned by the runner.
        command: &'static str,
    },

    /// The merge source does not expose any errors.
    #[error("merge source does not expose an error collection")]
    MissingErrors,

    /// Messages and detail records could not be paired positionally.
    #[error(
        "cannot pair errors for '{attribute}': {messages} message(s) but {details} detail record(s)"
    )]
    MismatchedDetails {
        /// Attribute whose lists disagree.
        attribute: Attribute,
        /// Number of messages reported for the attribute.
        messages: usize,
        /// Number of detail records reported for the attribute.
        details: usize,
    },
}
