//! Ordered, deduplicated error collection.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::{Attribute, ErrorCode, ErrorEntry, ErrorShape, ErrorSource, ErrorSpec};
use crate::error::{CommandError, CommandResult};
use crate::localizer::{LocalizationArgs, Localizer};

type AttributeErrors = (Attribute, Vec<ErrorEntry>);

static EMPTY: ErrorCollection = ErrorCollection::new();

/// Errors accumulated by a command, grouped by attribute.
///
/// Attributes keep the order in which they first received an error and each
/// attribute's list never holds two equal entries. Messages are resolved
/// through the optional [`Localizer`] when the collection has one; otherwise
/// the message or key is stored verbatim.
///
/// # Examples
///
/// ```
/// use easy_command::ErrorCollection;
///
/// let mut errors = ErrorCollection::new();
/// errors.add("email", "invalid", Some("bad format"));
/// errors.add("email", "invalid", Some("bad format"));
///
/// assert_eq!(errors.get("email").map(<[_]>::len), Some(1));
/// assert!(errors.exists("email", "invalid"));
/// assert_eq!(errors.full_messages(), ["Email bad format"]);
/// ```
#[derive(Clone, Default)]
pub struct ErrorCollection {
    entries: Vec<AttributeErrors>,
    localizer: Option<Arc<dyn Localizer>>,
    scope: Option<Cow<'static, str>>,
}

impl ErrorCollection {
    /// Creates an empty collection without localisation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            localizer: None,
            scope: None,
        }
    }

    /// Shared empty collection, used where an outcome carries no errors.
    #[must_use]
    pub const fn empty() -> &'static Self {
        &EMPTY
    }

    /// Attaches the localiser consulted by [`Self::add`].
    #[must_use]
    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = Some(localizer);
        self
    }

    /// Sets the scope under which message keys are looked up.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<Cow<'static, str>>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Returns the lookup scope, if any.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Records an error for `attribute`.
    ///
    /// `message_or_key` is first offered to the localiser as a key; when no
    /// translation exists it is used verbatim. It defaults to the code.
    /// Adding an entry that is already present is a no-op.
    pub fn add(
        &mut self,
        attribute: impl Into<Attribute>,
        code: impl Into<ErrorCode>,
        message_or_key: Option<&str>,
    ) -> &mut Self {
        self.add_localized(attribute.into(), code.into(), message_or_key, None)
    }

    /// Records an error, forwarding `args` as interpolation arguments to the
    /// localiser.
    pub fn add_with_args(
        &mut self,
        attribute: impl Into<Attribute>,
        code: impl Into<ErrorCode>,
        message_or_key: Option<&str>,
        args: &LocalizationArgs<'_>,
    ) -> &mut Self {
        self.add_localized(attribute.into(), code.into(), message_or_key, Some(args))
    }

    fn add_localized(
        &mut self,
        attribute: Attribute,
        code: ErrorCode,
        message_or_key: Option<&str>,
        args: Option<&LocalizationArgs<'_>>,
    ) -> &mut Self {
        let message = self.localize(message_or_key.unwrap_or_else(|| code.as_str()), args);
        self.push(attribute, ErrorEntry { code, message });
        self
    }

    fn localize(&self, key: &str, args: Option<&LocalizationArgs<'_>>) -> String {
        match &self.localizer {
            Some(localizer) => localizer.message(key, self.scope(), args, key),
            None => key.to_owned(),
        }
    }

    fn push(&mut self, attribute: Attribute, entry: ErrorEntry) {
        if let Some((_, list)) = self.entries.iter_mut().find(|(name, _)| *name == attribute) {
            if list.contains(&entry) {
                tracing::trace!(%attribute, code = %entry.code, "duplicate error ignored");
            } else {
                list.push(entry);
            }
        } else {
            self.entries.push((attribute, vec![entry]));
        }
    }

    /// Returns `true` when `attribute` has an error with `code`.
    #[must_use]
    pub fn exists(&self, attribute: impl AsRef<str>, code: impl AsRef<str>) -> bool {
        let wanted = code.as_ref();
        self.get(attribute)
            .is_some_and(|list| list.iter().any(|entry| entry.code == *wanted))
    }

    /// Copies every error exposed by `source` into this collection.
    ///
    /// Native collections are copied entry by entry. Message/detail reports
    /// are paired positionally and replayed through [`Self::add_multiple`].
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::MissingErrors`] when `source` exposes no
    /// errors, or [`CommandError::MismatchedDetails`] when a report's message
    /// and detail lists cannot be paired.
    pub fn merge_from<S>(&mut self, source: &S) -> CommandResult<()>
    where
        S: ErrorSource + ?Sized,
    {
        match source.error_shape() {
            Some(ErrorShape::Native(other)) => {
                self.absorb(other);
                Ok(())
            }
            Some(ErrorShape::Detailed(report)) => {
                self.add_multiple(report.paired()?);
                Ok(())
            }
            None => Err(CommandError::MissingErrors),
        }
    }

    pub(crate) fn absorb(&mut self, other: &Self) {
        for (attribute, list) in &other.entries {
            for entry in list {
                self.push(attribute.clone(), entry.clone());
            }
        }
    }

    /// Adds several errors at once.
    ///
    /// Each item pairs an attribute with its errors; errors may be
    /// [`ErrorEntry`] records, `(code, message)` pairs, `(code, None)` pairs
    /// or bare codes. Every error goes through [`Self::add`].
    pub fn add_multiple<I, A, L, E>(&mut self, errors: I) -> &mut Self
    where
        I: IntoIterator<Item = (A, L)>,
        A: Into<Attribute>,
        L: IntoIterator<Item = E>,
        E: Into<ErrorSpec>,
    {
        for (attribute, specs) in errors {
            let name: Attribute = attribute.into();
            for spec in specs {
                let ErrorSpec { code, message } = spec.into();
                self.add_localized(name.clone(), code, message.as_deref(), None);
            }
        }
        self
    }

    /// Renders every entry as a sentence, in insertion order.
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(attribute, list)| {
                list.iter()
                    .map(move |entry| Self::full_message(attribute, &entry.message))
            })
            .collect()
    }

    /// Prefixes `message` with the humanised attribute name.
    ///
    /// Errors on [`Attribute::BASE`] render as the bare message.
    ///
    /// ```
    /// use easy_command::{Attribute, ErrorCollection};
    ///
    /// let attribute = Attribute::from("address.post_code");
    /// assert_eq!(
    ///     ErrorCollection::full_message(&attribute, "is invalid"),
    ///     "Address_post_code is invalid",
    /// );
    /// assert_eq!(ErrorCollection::full_message(&Attribute::BASE, "nope"), "nope");
    /// ```
    #[must_use]
    pub fn full_message(attribute: &Attribute, message: &str) -> String {
        if *attribute == Attribute::BASE {
            return message.to_owned();
        }
        format!("{} {message}", humanize(attribute.as_str()))
    }

    /// Returns the errors recorded for `attribute`.
    #[must_use]
    pub fn get(&self, attribute: impl AsRef<str>) -> Option<&[ErrorEntry]> {
        let wanted = attribute.as_ref();
        self.entries
            .iter()
            .find(|(name, _)| *name == *wanted)
            .map(|(_, list)| list.as_slice())
    }

    /// Returns `true` when `attribute` has at least one error.
    #[must_use]
    pub fn contains_attribute(&self, attribute: impl AsRef<str>) -> bool {
        self.get(attribute).is_some()
    }

    /// Iterates over attributes and their errors in insertion order.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = (&Attribute, &[ErrorEntry])> {
        self.into_iter()
    }

    /// Iterates over the attributes that carry errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.iter().map(|(name, _)| name)
    }

    /// Returns `true` when no error has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of entries across all attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, list)| list.len()).sum()
    }

    /// Removes every recorded error, keeping the localiser and scope.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn humanize(name: &str) -> String {
    let underscored = name.replace('.', "_");
    let mut chars = underscored.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

impl PartialEq for ErrorCollection {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for ErrorCollection {}

impl fmt::Debug for ErrorCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for ErrorCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (attribute, list) in &self.entries {
            map.serialize_entry(attribute, list)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a ErrorCollection {
    type Item = (&'a Attribute, &'a [ErrorEntry]);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, AttributeErrors>,
        fn(&'a AttributeErrors) -> (&'a Attribute, &'a [ErrorEntry]),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(|(name, list)| (name, list.as_slice()))
    }
}

impl ErrorSource for ErrorCollection {
    fn error_shape(&self) -> Option<ErrorShape<'_>> {
        Some(ErrorShape::Native(self))
    }
}
