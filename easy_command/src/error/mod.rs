//! Programming errors surfaced to host code.
//!
//! Domain failures never travel through this module: they are accumulated in
//! an [`crate::ErrorCollection`] and reported through
//! [`crate::Outcome::Failure`]. The types here describe misuse of the library
//! itself, so they are returned as `Err` and left for the host to handle.

mod types;

pub use types::{CommandError, CommandResult};
