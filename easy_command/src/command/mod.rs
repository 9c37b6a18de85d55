//! The command protocol.
//!
//! A command is any type implementing [`Command`]. Its domain logic lives in
//! [`Command::perform`], which receives a [`CommandContext`] for recording
//! errors, exiting early and running sub-commands. A [`CommandRunner`] (or
//! the one-step [`Command::call`]) turns the body's result into an
//! [`Outcome`] and, on success, runs the deferred success hooks of every
//! sub-command before the command's own.

use std::sync::Arc;

use crate::localizer::Localizer;
use crate::outcome::Outcome;

mod context;
mod exit;
mod hooks;
mod legacy;
mod runner;

pub use context::CommandContext;
pub use exit::{AssertionFailed, Exit, SubcommandFailed};
pub use runner::{CommandRunner, InvocationState};

use runner::execute;

/// Scope used for message lookups unless a command overrides
/// [`Command::I18N_SCOPE`].
pub const DEFAULT_I18N_SCOPE: &str = "errors.messages";

/// Return type of [`Command::perform`]: a result, or an early exit.
pub type Flow<T> = Result<T, Exit<T>>;

/// A fallible operation whose invocation yields an [`Outcome`].
///
/// # Examples
///
/// ```rust
/// use easy_command::{Command, CommandContext, Flow};
///
/// struct Divide {
///     numerator: i64,
///     denominator: i64,
/// }
///
/// impl Command for Divide {
///     type Output = i64;
///
///     fn perform(&mut self, ctx: &mut CommandContext) -> Flow<i64> {
///         if self.denominator == 0 {
///             ctx.errors_mut().add("denominator", "zero", Some("must not be zero"));
///         }
///         ctx.assert()?;
///         Ok(self.numerator.div_euclid(self.denominator))
///     }
/// }
///
/// assert_eq!(Divide { numerator: 9, denominator: 3 }.call().into_value(), Some(3));
///
/// let outcome = Divide { numerator: 9, denominator: 0 }.call();
/// assert_eq!(outcome.errors().full_messages(), ["Denominator must not be zero"]);
/// ```
pub trait Command {
    /// Value produced by a successful invocation.
    type Output;

    /// Scope under which this command's error messages are localised.
    const I18N_SCOPE: &'static str = DEFAULT_I18N_SCOPE;

    /// Runs the domain logic.
    ///
    /// Returning `Ok` with errors recorded still makes the invocation fail,
    /// keeping the value as the failure's partial result.
    ///
    /// # Errors
    ///
    /// Returns an [`Exit`] to stop the command early; the invocation then
    /// fails with the errors recorded so far.
    fn perform(&mut self, ctx: &mut CommandContext) -> Flow<Self::Output>;

    /// Called once the top-level invocation has succeeded.
    ///
    /// For sub-commands the hook is deferred until the outermost command
    /// succeeds, and never runs when the sub-command itself failed.
    fn on_success(&mut self) {}

    /// Invokes the command without localisation.
    fn call(self) -> Outcome<Self::Output>
    where
        Self: Sized,
    {
        let mut command = self;
        execute(&mut command, &mut CommandContext::new(Self::I18N_SCOPE))
    }

    /// Invokes the command, localising messages through `localizer`.
    fn call_with(self, localizer: Arc<dyn Localizer>) -> Outcome<Self::Output>
    where
        Self: Sized,
    {
        let mut command = self;
        let mut context = CommandContext::new(Self::I18N_SCOPE);
        context.set_localizer(localizer);
        execute(&mut command, &mut context)
    }
}
