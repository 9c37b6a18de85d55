//! Deprecated spellings of [`CommandContext`] operations.
//!
//! Each alias logs a warning and forwards to the current method.

use super::exit::SubcommandFailed;
use super::{Command, CommandContext};
use crate::error::CommandResult;
use crate::errors::{Attribute, ErrorCode, ErrorCollection, ErrorSource};

fn warn_deprecated(alias: &'static str, replacement: &'static str) {
    tracing::warn!(alias, replacement, "deprecated command context alias used");
}

impl CommandContext {
    /// Removes every recorded error.
    #[deprecated(since = "1.0.0", note = "use `errors_mut().clear()` instead")]
    pub fn clear_errors(&mut self) {
        warn_deprecated("clear_errors", "errors_mut().clear()");
        self.errors_mut().clear();
    }

    /// Records an error.
    #[deprecated(since = "1.0.0", note = "use `errors_mut().add(..)` instead")]
    pub fn add_error(
        &mut self,
        attribute: impl Into<Attribute>,
        code: impl Into<ErrorCode>,
        message_or_key: Option<&str>,
    ) -> &mut ErrorCollection {
        warn_deprecated("add_error", "errors_mut().add(..)");
        self.errors_mut().add(attribute, code, message_or_key)
    }

    /// Copies errors from `source`.
    ///
    /// # Errors
    ///
    /// Fails like [`ErrorCollection::merge_from`].
    #[deprecated(since = "1.0.0", note = "use `errors_mut().merge_from(..)` instead")]
    pub fn merge_errors_from<S>(&mut self, source: &S) -> CommandResult<()>
    where
        S: ErrorSource + ?Sized,
    {
        warn_deprecated("merge_errors_from", "errors_mut().merge_from(..)");
        self.errors_mut().merge_from(source)
    }

    /// Returns `true` when `attribute` has an error with `code`.
    #[deprecated(since = "1.0.0", note = "use `errors().exists(..)` instead")]
    #[must_use]
    pub fn has_error(&self, attribute: impl AsRef<str>, code: impl AsRef<str>) -> bool {
        warn_deprecated("has_error", "errors().exists(..)");
        self.errors().exists(attribute, code)
    }

    /// Errors recorded so far.
    #[deprecated(since = "1.0.0", note = "use `errors()` instead")]
    #[must_use]
    pub fn full_errors(&self) -> &ErrorCollection {
        warn_deprecated("full_errors", "errors()");
        self.errors()
    }

    /// Runs `command` as a sub-command.
    ///
    /// # Errors
    ///
    /// Fails like [`CommandContext::assert_subcommand`].
    #[deprecated(since = "1.0.0", note = "use `assert_subcommand(..)` instead")]
    pub fn assert_sub<S>(&mut self, command: S) -> Result<S::Output, SubcommandFailed<S::Output>>
    where
        S: Command + 'static,
    {
        warn_deprecated("assert_sub", "assert_subcommand(..)");
        self.assert_subcommand(command)
    }
}
