//! State handed to [`super::Command::perform`].

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::exit::{AssertionFailed, Exit, SubcommandFailed};
use super::hooks::{FinishedCommand, HookCascade, run_all};
use super::runner::execute;
use super::{Command, DEFAULT_I18N_SCOPE};
use crate::errors::{Attribute, ErrorCode, ErrorCollection};
use crate::localizer::{LocalizationArgs, Localizer};
use crate::outcome::Outcome;

/// Per-invocation state of a command.
///
/// The error collection is created on first mutable access and inherits the
/// context's localiser and i18n scope. Sub-commands run with a context of
/// their own that shares the localiser but uses the child's scope.
pub struct CommandContext {
    errors: Option<ErrorCollection>,
    localizer: Option<Arc<dyn Localizer>>,
    scope: Cow<'static, str>,
    is_sub_command: bool,
    sub_commands: Vec<Box<dyn HookCascade>>,
}

impl CommandContext {
    pub(crate) fn new(scope: impl Into<Cow<'static, str>>) -> Self {
        Self {
            errors: None,
            localizer: None,
            scope: scope.into(),
            is_sub_command: false,
            sub_commands: Vec::new(),
        }
    }

    fn sub_command(localizer: Option<Arc<dyn Localizer>>, scope: &'static str) -> Self {
        Self {
            localizer,
            is_sub_command: true,
            ..Self::new(scope)
        }
    }

    pub(crate) fn set_localizer(&mut self, localizer: Arc<dyn Localizer>) {
        if let Some(errors) = self.errors.take() {
            self.errors = Some(errors.with_localizer(Arc::clone(&localizer)));
        }
        self.localizer = Some(localizer);
    }

    pub(crate) fn set_i18n_scope(&mut self, scope: Cow<'static, str>) {
        if let Some(errors) = self.errors.take() {
            self.errors = Some(errors.with_scope(scope.clone()));
        }
        self.scope = scope;
    }

    /// Errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &ErrorCollection {
        self.errors.as_ref().unwrap_or(ErrorCollection::empty())
    }

    /// Mutable access to the errors, creating the collection if needed.
    pub fn errors_mut(&mut self) -> &mut ErrorCollection {
        let localizer = self.localizer.as_ref();
        let scope = &self.scope;
        self.errors.get_or_insert_with(|| {
            let errors = ErrorCollection::new().with_scope(scope.clone());
            match localizer {
                Some(shared) => errors.with_localizer(Arc::clone(shared)),
                None => errors,
            }
        })
    }

    /// Scope under which error messages are localised.
    #[must_use]
    pub fn i18n_scope(&self) -> &str {
        &self.scope
    }

    /// Returns `true` when the command runs inside another command.
    #[must_use]
    pub const fn is_sub_command(&self) -> bool {
        self.is_sub_command
    }

    /// Records an error and returns the exit that stops the command.
    ///
    /// ```
    /// use easy_command::{Command, CommandContext, Flow};
    ///
    /// struct Withdraw(u32);
    ///
    /// impl Command for Withdraw {
    ///     type Output = u32;
    ///
    ///     fn perform(&mut self, ctx: &mut CommandContext) -> Flow<u32> {
    ///         if self.0 > 100 {
    ///             return Err(ctx.abort("amount", "too_large", Some("is too large")));
    ///         }
    ///         Ok(100 - self.0)
    ///     }
    /// }
    ///
    /// let outcome = Withdraw(500).call();
    /// assert!(outcome.errors().exists("amount", "too_large"));
    /// assert_eq!(outcome.value(), None);
    /// ```
    pub fn abort<T>(
        &mut self,
        attribute: impl Into<Attribute>,
        code: impl Into<ErrorCode>,
        message_or_key: Option<&str>,
    ) -> Exit<T> {
        self.errors_mut().add(attribute, code, message_or_key);
        Exit::new(None)
    }

    /// Like [`Self::abort`], forwarding interpolation arguments to the
    /// localiser.
    pub fn abort_with_args<T>(
        &mut self,
        attribute: impl Into<Attribute>,
        code: impl Into<ErrorCode>,
        message_or_key: Option<&str>,
        args: &LocalizationArgs<'_>,
    ) -> Exit<T> {
        self.errors_mut()
            .add_with_args(attribute, code, message_or_key, args);
        Exit::new(None)
    }

    /// Stops the command when any error has been recorded.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionFailed`] when the error collection is not empty.
    pub fn assert(&self) -> Result<(), AssertionFailed> {
        if self.errors().is_empty() {
            Ok(())
        } else {
            Err(AssertionFailed)
        }
    }

    /// Like [`Self::assert`], reporting `result` as the failure value.
    ///
    /// # Errors
    ///
    /// Returns an [`Exit`] carrying `result` when errors are present.
    pub fn assert_with_result<T>(&self, result: T) -> Result<(), Exit<T>> {
        self.assert()
            .map_err(|failed| Exit::from(failed).with_result(result))
    }

    /// Runs `command` as a sub-command and returns its result.
    ///
    /// The child shares this context's localiser and uses its own
    /// [`Command::I18N_SCOPE`]. Its success hook is deferred until the
    /// top-level command succeeds.
    ///
    /// # Errors
    ///
    /// When the child fails its errors are merged into this context and
    /// [`SubcommandFailed`] is returned; propagate it with `?` to stop the
    /// parent.
    pub fn assert_subcommand<S>(
        &mut self,
        command: S,
    ) -> Result<S::Output, SubcommandFailed<S::Output>>
    where
        S: Command + 'static,
    {
        let mut child = command;
        let mut context = Self::sub_command(self.localizer.clone(), S::I18N_SCOPE);
        let outcome = execute(&mut child, &mut context);
        self.sub_commands.push(Box::new(FinishedCommand::new(
            child,
            context.sub_commands,
            outcome.is_success(),
        )));

        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => {
                let (result, errors) = failure.into_parts();
                self.errors_mut().absorb(&errors);
                Err(SubcommandFailed::new(result))
            }
        }
    }

    pub(crate) fn run_success_hooks(&mut self) {
        run_all(&mut self.sub_commands);
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new(DEFAULT_I18N_SCOPE)
    }
}

impl fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("errors", self.errors())
            .field("scope", &self.scope)
            .field("is_sub_command", &self.is_sub_command)
            .field("sub_commands", &self.sub_commands.len())
            .finish_non_exhaustive()
    }
}
