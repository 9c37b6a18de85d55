//! Explicit success and failure outcomes.
//!
//! Every invocation of a command produces an [`Outcome`]. Callers branch on
//! it with [`Outcome::on_success`] / [`Outcome::on_failure`], or build
//! pipelines with [`Outcome::then`] (also spelled `outcome | step`), where
//! the first failure short-circuits the rest of the chain.

mod chain;
mod types;

pub use chain::{CommandStep, Step, command_step};
pub use types::{Failure, Outcome};
