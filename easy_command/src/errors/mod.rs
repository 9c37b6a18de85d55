//! Structured error accumulation.
//!
//! An [`ErrorCollection`] maps attributes to ordered, deduplicated lists of
//! coded messages. It is the normal failure channel of a command: adding an
//! error never interrupts control flow, it only decides how the invocation
//! will be reported.

mod collection;
mod entry;
mod ident;
mod source;

pub use collection::ErrorCollection;
pub use entry::{ErrorEntry, ErrorSpec};
pub use ident::{Attribute, ErrorCode};
pub use source::{ErrorDetail, ErrorShape, ErrorSource, ValidationReport};

#[cfg(test)]
mod tests;
