//! Steps accepted by [`super::Outcome::then`].

use std::marker::PhantomData;

use super::Outcome;
use crate::command::Command;

/// Something that turns a successful result into the next outcome.
pub trait Step<T> {
    /// Runs the step with the previous result.
    fn call(self, input: T) -> Outcome<T>;
}

impl<T, F> Step<T> for F
where
    F: FnOnce(T) -> Outcome<T>,
{
    fn call(self, input: T) -> Outcome<T> {
        self(input)
    }
}

/// Step that builds a command from the previous result and invokes it.
#[derive(Debug, Clone, Copy)]
pub struct CommandStep<F, C> {
    build: F,
    command: PhantomData<fn() -> C>,
}

/// Chains a command constructor.
///
/// ```
/// use easy_command::{Command, CommandContext, Flow, Outcome, command_step};
///
/// struct Double(i32);
///
/// impl Command for Double {
///     type Output = i32;
///
///     fn perform(&mut self, _ctx: &mut CommandContext) -> Flow<i32> {
///         Ok(self.0 * 2)
///     }
/// }
///
/// let outcome = Outcome::success(5) | command_step(Double) | command_step(Double);
/// assert_eq!(outcome, Outcome::success(20));
/// ```
pub const fn command_step<T, F, C>(build: F) -> CommandStep<F, C>
where
    F: FnOnce(T) -> C,
    C: Command<Output = T>,
{
    CommandStep {
        build,
        command: PhantomData,
    }
}

impl<T, F, C> Step<T> for CommandStep<F, C>
where
    F: FnOnce(T) -> C,
    C: Command<Output = T>,
{
    fn call(self, input: T) -> Outcome<T> {
        (self.build)(input).call()
    }
}
