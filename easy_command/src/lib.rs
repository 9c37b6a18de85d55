//! Commands as values with explicit outcomes.
//!
//! A type implementing [`Command`] puts its domain logic in
//! [`Command::perform`]. Invoking it always yields an [`Outcome`]: either
//! [`Outcome::Success`] with the result, or [`Outcome::Failure`] carrying an
//! [`ErrorCollection`] of coded, optionally localised messages grouped by
//! attribute. Command bodies can exit early with
//! [`CommandContext::abort`] and [`CommandContext::assert`], and compose
//! other commands with [`CommandContext::assert_subcommand`], whose errors
//! are folded into the parent automatically.
//!
//! ```rust
//! use easy_command::{Command, CommandContext, Flow};
//!
//! struct Register {
//!     email: String,
//! }
//!
//! impl Command for Register {
//!     type Output = String;
//!
//!     fn perform(&mut self, ctx: &mut CommandContext) -> Flow<String> {
//!         if !self.email.contains('@') {
//!             ctx.errors_mut().add("email", "invalid", Some("is invalid"));
//!         }
//!         ctx.assert()?;
//!         Ok(self.email.to_lowercase())
//!     }
//! }
//!
//! let outcome = Register { email: String::from("nobody") }.call();
//! assert!(outcome.is_failure());
//! assert_eq!(outcome.errors().full_messages(), ["Email is invalid"]);
//! ```

mod command;
mod error;
mod errors;
mod localizer;
mod outcome;

pub use command::{
    AssertionFailed, Command, CommandContext, CommandRunner, DEFAULT_I18N_SCOPE, Exit, Flow,
    InvocationState, SubcommandFailed,
};
pub use error::{CommandError, CommandResult};
pub use errors::{
    Attribute, ErrorCode, ErrorCollection, ErrorDetail, ErrorEntry, ErrorShape, ErrorSource,
    ErrorSpec, ValidationReport,
};
pub use fluent_bundle::FluentValue;
pub use localizer::{
    FluentBundleSource, FluentLocalizer, FluentLocalizerBuilder, FluentLocalizerError,
    FormattingIssue, FormattingIssueReporter, LocalizationArgs, Localizer, NoOpLocalizer,
    scoped_key,
};
pub use outcome::{CommandStep, Failure, Outcome, Step, command_step};
pub use unic_langid::{LanguageIdentifier, langid};
