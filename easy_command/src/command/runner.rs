//! Drives a command through a single invocation.

use std::any::type_name;
use std::borrow::Cow;
use std::sync::Arc;

use super::{Command, CommandContext};
use crate::error::{CommandError, CommandResult};
use crate::errors::ErrorCollection;
use crate::localizer::Localizer;
use crate::outcome::Outcome;

/// Lifecycle of a [`CommandRunner`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvocationState {
    /// `invoke` has not been called yet.
    #[default]
    NotInvoked,
    /// The command body is executing.
    Running,
    /// The command finished without errors.
    Succeeded,
    /// The command recorded errors or exited early.
    Failed,
}

/// Owns a command and its context for one invocation.
///
/// Use the runner instead of [`Command::call`] to configure localisation,
/// pre-seed errors, or inspect the command after it ran.
///
/// ```
/// use easy_command::{Command, CommandContext, CommandRunner, Flow, InvocationState};
///
/// struct Noop;
///
/// impl Command for Noop {
///     type Output = ();
///
///     fn perform(&mut self, _ctx: &mut CommandContext) -> Flow<()> {
///         Ok(())
///     }
/// }
///
/// let mut runner = CommandRunner::new(Noop);
/// runner.errors_mut().add("base", "locked", Some("Account is locked"));
///
/// let outcome = runner.invoke()?;
/// assert!(outcome.is_failure());
/// assert_eq!(runner.state(), InvocationState::Failed);
/// assert!(runner.invoke().is_err());
/// # Ok::<(), easy_command::CommandError>(())
/// ```
#[derive(Debug)]
pub struct CommandRunner<C> {
    command: C,
    context: CommandContext,
    state: InvocationState,
}

impl<C: Command> CommandRunner<C> {
    /// Wraps `command` with a fresh context using [`Command::I18N_SCOPE`].
    pub fn new(command: C) -> Self {
        Self {
            command,
            context: CommandContext::new(C::I18N_SCOPE),
            state: InvocationState::NotInvoked,
        }
    }

    /// Localises error messages through `localizer`.
    #[must_use]
    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.context.set_localizer(localizer);
        self
    }

    /// Overrides the scope used for message lookups.
    #[must_use]
    pub fn with_i18n_scope(mut self, scope: impl Into<Cow<'static, str>>) -> Self {
        self.context.set_i18n_scope(scope.into());
        self
    }

    /// Errors recorded by the command so far.
    #[must_use]
    pub fn errors(&self) -> &ErrorCollection {
        self.context.errors()
    }

    /// Mutable access to the command's errors.
    pub fn errors_mut(&mut self) -> &mut ErrorCollection {
        self.context.errors_mut()
    }

    /// Where the runner is in its lifecycle.
    #[must_use]
    pub const fn state(&self) -> InvocationState {
        self.state
    }

    /// The wrapped command.
    #[must_use]
    pub const fn command(&self) -> &C {
        &self.command
    }

    /// Consumes the runner, returning the command.
    #[must_use]
    pub fn into_command(self) -> C {
        self.command
    }

    /// Runs the command and reports its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::AlreadyInvoked`] when called a second time.
    pub fn invoke(&mut self) -> CommandResult<Outcome<C::Output>> {
        if self.state != InvocationState::NotInvoked {
            return Err(CommandError::AlreadyInvoked {
                command: type_name::<C>(),
            });
        }
        self.state = InvocationState::Running;
        let outcome = execute(&mut self.command, &mut self.context);
        self.state = if outcome.is_success() {
            InvocationState::Succeeded
        } else {
            InvocationState::Failed
        };
        Ok(outcome)
    }
}

/// Runs `command` against `context` and folds the result into an outcome.
///
/// Success hooks run only for a top-level command: sub-command hooks are
/// deferred to the parent's cascade.
pub(crate) fn execute<C: Command>(
    command: &mut C,
    context: &mut CommandContext,
) -> Outcome<C::Output> {
    let name = type_name::<C>();
    let sub_command = context.is_sub_command();
    tracing::debug!(command = name, sub_command, "invoking command");

    let outcome = match command.perform(context) {
        Ok(value) if context.errors().is_empty() => Outcome::success(value),
        Ok(value) => Outcome::failure_with(Some(value), context.errors().clone()),
        Err(exit) if context.errors().is_empty() => Outcome::failure(exit.into_result()),
        Err(exit) => Outcome::failure_with(exit.into_result(), context.errors().clone()),
    };

    if outcome.is_success() && !sub_command {
        context.run_success_hooks();
        command.on_success();
    }

    tracing::debug!(
        command = name,
        sub_command,
        success = outcome.is_success(),
        "command finished"
    );
    outcome
}
