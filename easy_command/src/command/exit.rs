//! Early-exit signals returned from [`super::Command::perform`].

use std::fmt;

/// Signal that stops a command body and makes the invocation fail.
///
/// Produced by [`super::CommandContext::abort`] and converted from
/// [`AssertionFailed`] or [`SubcommandFailed`] by `?`. Only the runner that
/// owns the command consumes it; it never escapes an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "return the exit from `perform` to stop the command"]
pub struct Exit<T> {
    result: Option<T>,
}

impl<T> Exit<T> {
    pub(crate) const fn new(result: Option<T>) -> Self {
        Self { result }
    }

    /// Attaches the value reported by the resulting failure.
    pub fn with_result(mut self, result: T) -> Self {
        self.result = Some(result);
        self
    }

    /// The value attached with [`Self::with_result`], if any.
    #[must_use]
    pub const fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Consumes the signal, returning the attached value.
    #[must_use]
    pub fn into_result(self) -> Option<T> {
        self.result
    }
}

/// Returned by [`super::CommandContext::assert`] when errors are present.
///
/// Converts into an [`Exit`] of any result type, so `ctx.assert()?` works in
/// every command body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use = "propagate the failed assertion with `?`"]
pub struct AssertionFailed;

impl<T> From<AssertionFailed> for Exit<T> {
    fn from(_: AssertionFailed) -> Self {
        Self::new(None)
    }
}

impl fmt::Display for AssertionFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("command recorded errors")
    }
}

/// Returned by [`super::CommandContext::assert_subcommand`] when the child
/// failed.
///
/// The child's errors have already been merged into the parent. The child's
/// result, if any, travels along and becomes the parent's failure value when
/// the types line up.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "propagate the failed sub-command with `?`"]
pub struct SubcommandFailed<U> {
    result: Option<U>,
}

impl<U> SubcommandFailed<U> {
    pub(crate) const fn new(result: Option<U>) -> Self {
        Self { result }
    }

    /// The child's partial or abort-supplied result.
    #[must_use]
    pub const fn result(&self) -> Option<&U> {
        self.result.as_ref()
    }

    /// Consumes the signal, returning the child's result.
    #[must_use]
    pub fn into_result(self) -> Option<U> {
        self.result
    }

    /// Converts into the parent's exit, dropping the child's result.
    pub fn into_exit<T>(self) -> Exit<T> {
        drop(self.result);
        Exit::new(None)
    }

    /// Converts into the parent's exit, mapping the child's result.
    pub fn map_result<T>(self, map: impl FnOnce(U) -> T) -> Exit<T> {
        Exit::new(self.result.map(map))
    }
}

impl<T, U: Into<T>> From<SubcommandFailed<U>> for Exit<T> {
    fn from(failed: SubcommandFailed<U>) -> Self {
        Self::new(failed.result.map(Into::into))
    }
}
