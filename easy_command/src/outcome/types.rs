//! The [`Outcome`] enum and its failure payload.

use std::fmt;

use crate::errors::{Attribute, ErrorCode, ErrorCollection, ErrorShape, ErrorSource};

use super::Step;

/// Result of invoking a command.
///
/// Outcomes are immutable: the callback helpers observe the payload by
/// reference and hand the outcome back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an outcome reports whether the command failed"]
pub enum Outcome<T> {
    /// The command ran without recording errors.
    Success(T),
    /// The command recorded errors or exited early.
    Failure(Failure<T>),
}

/// Payload of a failed outcome: an optional partial result plus errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure<T> {
    value: Option<T>,
    errors: ErrorCollection,
}

impl<T> Failure<T> {
    /// Creates a failure whose errors hold the synthetic `result`/`failure`
    /// entry.
    ///
    /// ```
    /// use easy_command::Failure;
    ///
    /// let failure = Failure::new(5);
    /// assert_eq!(failure.value(), Some(&5));
    /// assert!(failure.errors().exists("result", "failure"));
    /// ```
    pub fn new(value: impl Into<Option<T>>) -> Self {
        let mut errors = ErrorCollection::new();
        errors.add(Attribute::RESULT, ErrorCode::FAILURE, None);
        Self {
            value: value.into(),
            errors,
        }
    }

    /// Replaces the failure's errors.
    #[must_use]
    pub fn with_errors(mut self, errors: ErrorCollection) -> Self {
        self.errors = errors;
        self
    }

    /// The partial or abort-supplied result, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consumes the failure, returning its result.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Errors explaining the failure.
    #[must_use]
    pub const fn errors(&self) -> &ErrorCollection {
        &self.errors
    }

    /// Splits the failure into its result and errors.
    #[must_use]
    pub fn into_parts(self) -> (Option<T>, ErrorCollection) {
        (self.value, self.errors)
    }
}

impl<T> fmt::Display for Failure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command failed: {}", self.errors.full_messages().join("; "))
    }
}

impl<T: fmt::Debug> std::error::Error for Failure<T> {}

impl<T> Outcome<T> {
    /// Wraps a successful result.
    pub const fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Builds a failure carrying only the synthetic `result`/`failure` error.
    pub fn failure(value: impl Into<Option<T>>) -> Self {
        Self::Failure(Failure::new(value))
    }

    /// Builds a failure carrying `errors`.
    pub fn failure_with(value: impl Into<Option<T>>, errors: ErrorCollection) -> Self {
        Self::Failure(Failure::new(value).with_errors(errors))
    }

    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`Outcome::Failure`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The result carried by either variant.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(failure) => failure.value(),
        }
    }

    /// Consumes the outcome, returning the result carried by either variant.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(failure) => failure.into_value(),
        }
    }

    /// Errors of a failure; empty for a success.
    #[must_use]
    pub const fn errors(&self) -> &ErrorCollection {
        match self {
            Self::Success(_) => ErrorCollection::empty(),
            Self::Failure(failure) => failure.errors(),
        }
    }

    /// Calls `callback` with the result when successful.
    pub fn on_success(self, callback: impl FnOnce(&T)) -> Self {
        if let Self::Success(value) = &self {
            callback(value);
        }
        self
    }

    /// Calls `callback` with the errors when failed.
    pub fn on_failure(self, callback: impl FnOnce(&ErrorCollection)) -> Self {
        if let Self::Failure(failure) = &self {
            callback(failure.errors());
        }
        self
    }

    /// Feeds a successful result into `step` and returns the step's outcome.
    ///
    /// A failure is returned unchanged and `step` is never called.
    ///
    /// ```
    /// use easy_command::Outcome;
    ///
    /// let doubled = Outcome::success(5).then(|n: i32| Outcome::success(n * 2));
    /// assert_eq!(doubled, Outcome::success(10));
    ///
    /// let failed = Outcome::<i32>::failure(None).then(|n: i32| Outcome::success(n * 2));
    /// assert!(failed.is_failure());
    /// ```
    pub fn then<S: Step<T>>(self, step: S) -> Self {
        match self {
            Self::Success(value) => step.call(value),
            failure @ Self::Failure(_) => failure,
        }
    }

    /// Converts the outcome into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the [`Failure`] payload for a failed outcome.
    pub fn into_result(self) -> Result<T, Failure<T>> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(failure) => Err(failure),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Failure<T>> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T, S: Step<T>> std::ops::BitOr<S> for Outcome<T> {
    type Output = Self;

    fn bitor(self, step: S) -> Self {
        self.then(step)
    }
}

impl<T> ErrorSource for Outcome<T> {
    fn error_shape(&self) -> Option<ErrorShape<'_>> {
        Some(ErrorShape::Native(self.errors()))
    }
}

impl<T> ErrorSource for Failure<T> {
    fn error_shape(&self) -> Option<ErrorShape<'_>> {
        Some(ErrorShape::Native(&self.errors))
    }
}
