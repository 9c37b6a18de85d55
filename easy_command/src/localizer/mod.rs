//! Localisation of error messages.
//!
//! [`Localizer`] is the translation capability consulted by
//! [`crate::ErrorCollection::add`]. It is injected explicitly: a collection
//! without a localiser keeps messages verbatim, and a localiser that returns
//! `None` lets the caller fall back to the untranslated key.

use fluent_bundle::{FluentArgs, FluentError, FluentValue};
use fluent_syntax::parser::ParserError;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use unic_langid::{LanguageIdentifier, langid};

mod fluent;
use fluent::{BundleWithLocale, normalize_identifier};

/// Interpolation arguments forwarded to localisation lookups.
///
/// In Fluent-backed scenarios the map keys correspond to the placeholder names
/// declared in the `.ftl` resources.
pub type LocalizationArgs<'value> = HashMap<&'value str, FluentValue<'value>>;

/// Resolves error message keys into translated text.
///
/// The trait is object-safe so error collections can hold it behind
/// `Arc<dyn Localizer>` and share one instance across many commands.
pub trait Localizer: Send + Sync {
    /// Looks up `key` inside `scope`, returning `None` when no translation
    /// exists.
    fn lookup(
        &self,
        key: &str,
        scope: Option<&str>,
        args: Option<&LocalizationArgs<'_>>,
    ) -> Option<String>;

    /// Resolves the message and returns `fallback` when no translation exists.
    ///
    /// # Examples
    /// ```rust
    /// use easy_command::{LocalizationArgs, Localizer};
    ///
    /// struct AlwaysFallback;
    ///
    /// impl Localizer for AlwaysFallback {
    ///     fn lookup(
    ///         &self,
    ///         _key: &str,
    ///         _scope: Option<&str>,
    ///         _args: Option<&LocalizationArgs<'_>>,
    ///     ) -> Option<String> {
    ///         None
    ///     }
    /// }
    ///
    /// let localizer = AlwaysFallback;
    /// assert_eq!(localizer.message("blank", None, None, "blank"), "blank");
    /// ```
    fn message(
        &self,
        key: &str,
        scope: Option<&str>,
        args: Option<&LocalizationArgs<'_>>,
        fallback: &str,
    ) -> String {
        self.lookup(key, scope, args)
            .unwrap_or_else(|| fallback.to_owned())
    }
}

/// Joins a scope and a key into the dotted identifier used by catalogues.
///
/// ```rust
/// use easy_command::scoped_key;
///
/// assert_eq!(scoped_key(Some("errors.messages"), "blank"), "errors.messages.blank");
/// assert_eq!(scoped_key(None, "blank"), "blank");
/// ```
#[must_use]
pub fn scoped_key<'a>(scope: Option<&str>, key: &'a str) -> Cow<'a, str> {
    match scope {
        Some(prefix) if !prefix.is_empty() => Cow::Owned(format!("{prefix}.{key}")),
        _ => Cow::Borrowed(key),
    }
}

/// Localiser that declines to translate anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpLocalizer;

impl NoOpLocalizer {
    /// Creates a new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Localizer for NoOpLocalizer {
    fn lookup(
        &self,
        _key: &str,
        _scope: Option<&str>,
        _args: Option<&LocalizationArgs<'_>>,
    ) -> Option<String> {
        None
    }
}

/// Denotes which bundle produced a localisation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluentBundleSource {
    /// Application-provided catalogue layered over the defaults.
    Consumer,
    /// Embedded catalogue shipped with the crate.
    Default,
}

/// Formatting failure encountered while resolving a Fluent pattern.
#[derive(Debug, Clone)]
pub struct FormattingIssue {
    /// Fully scoped identifier that failed to resolve.
    pub id: String,
    /// Locale associated with the bundle.
    pub locale: LanguageIdentifier,
    /// Bundle that produced the failure.
    pub source: FluentBundleSource,
    /// Errors emitted by Fluent.
    pub errors: Vec<FluentError>,
}

/// Reporter invoked when Fluent raises formatting errors.
pub type FormattingIssueReporter = Arc<dyn Fn(&FormattingIssue) + Send + Sync>;

/// Fluent-powered localiser layering consumer catalogues over embedded
/// defaults.
///
/// Lookups join the scope and key with `.` and then normalise dots to `-`,
/// so `errors.messages` + `blank` resolves the Fluent message
/// `errors-messages-blank`. Catalogue authors may write the dotted form; it
/// is normalised when resources are loaded.
pub struct FluentLocalizer {
    consumer: Option<BundleWithLocale>,
    defaults: Option<BundleWithLocale>,
    report_issue: FormattingIssueReporter,
}

/// Builds a [`FluentLocalizer`].
pub struct FluentLocalizerBuilder {
    locale: LanguageIdentifier,
    consumer_resources: Vec<&'static str>,
    report_issue: FormattingIssueReporter,
    use_defaults: bool,
}

/// Errors surfaced when constructing a [`FluentLocalizer`].
#[derive(Debug, Error)]
pub enum FluentLocalizerError {
    /// Requested a locale without embedded resources.
    #[error("no embedded Fluent resources exist for locale {locale}")]
    UnsupportedLocale {
        /// Locale requested by the caller.
        locale: LanguageIdentifier,
    },

    /// Failed to parse Fluent text into resources.
    #[error("failed to parse {catalogue:?} resources for {locale}")]
    Parser {
        /// Locale associated with the catalogue.
        locale: LanguageIdentifier,
        /// Which catalogue failed.
        catalogue: FluentBundleSource,
        /// Parser errors emitted by Fluent.
        errors: Vec<ParserError>,
    },

    /// Fluent rejected a resource while registering it in the bundle.
    #[error("failed to register {catalogue:?} resources for {locale}")]
    Registration {
        /// Locale associated with the catalogue.
        locale: LanguageIdentifier,
        /// Which catalogue failed.
        catalogue: FluentBundleSource,
        /// Errors returned by Fluent during registration.
        errors: Vec<FluentError>,
    },
}

impl FluentLocalizer {
    /// Starts building a localiser for the provided locale.
    ///
    /// # Examples
    /// ```rust
    /// use easy_command::{FluentLocalizer, Localizer, langid};
    ///
    /// let localizer = FluentLocalizer::builder(langid!("en-US"))
    ///     .try_build()
    ///     .expect("embedded resources should be valid");
    /// assert_eq!(
    ///     localizer.lookup("blank", Some("errors.messages"), None).as_deref(),
    ///     Some("can't be blank"),
    /// );
    /// ```
    #[must_use]
    pub fn builder(locale: LanguageIdentifier) -> FluentLocalizerBuilder {
        FluentLocalizerBuilder::new(locale)
    }

    /// Builds a localiser using only the embedded catalogue for the locale.
    ///
    /// # Errors
    ///
    /// Returns [`FluentLocalizerError::UnsupportedLocale`] when no embedded
    /// catalogue exists for the locale, or propagates parsing and
    /// registration failures.
    pub fn embedded(locale: LanguageIdentifier) -> Result<Self, FluentLocalizerError> {
        Self::builder(locale).try_build()
    }

    /// Builds an English (en-US) localiser with the provided consumer
    /// resources layered over the embedded messages.
    ///
    /// # Errors
    ///
    /// Returns [`FluentLocalizerError`] when a resource fails to parse or
    /// register.
    pub fn with_en_us_defaults(
        resources: impl IntoIterator<Item = &'static str>,
    ) -> Result<Self, FluentLocalizerError> {
        Self::builder(langid!("en-US"))
            .with_consumer_resources(resources)
            .try_build()
    }
}

impl Localizer for FluentLocalizer {
    fn lookup(
        &self,
        key: &str,
        scope: Option<&str>,
        args: Option<&LocalizationArgs<'_>>,
    ) -> Option<String> {
        let full_key = scoped_key(scope, key);
        let id = normalize_identifier(&full_key);
        let fluent_args = args.map(fluent_args_from);

        for bundle in [self.consumer.as_ref(), self.defaults.as_ref()]
            .into_iter()
            .flatten()
        {
            let Some(pattern) = bundle
                .bundle
                .get_message(&id)
                .and_then(|message| message.value())
            else {
                continue;
            };

            let mut errors = Vec::new();
            let rendered = bundle
                .bundle
                .format_pattern(pattern, fluent_args.as_ref(), &mut errors);
            if errors.is_empty() {
                return Some(rendered.into_owned());
            }

            (self.report_issue)(&FormattingIssue {
                id: full_key.clone().into_owned(),
                locale: bundle.locale.clone(),
                source: bundle.kind,
                errors,
            });
        }

        tracing::trace!(id = %full_key, "no Fluent translation found");
        None
    }
}

impl fmt::Debug for FluentLocalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluentLocalizer")
            .field(
                "consumer",
                &self.consumer.as_ref().map(|bundle| &bundle.locale),
            )
            .field(
                "defaults",
                &self.defaults.as_ref().map(|bundle| &bundle.locale),
            )
            .field("report_issue", &"<formatter>")
            .finish()
    }
}

#[must_use]
fn default_reporter() -> FormattingIssueReporter {
    Arc::new(|issue: &FormattingIssue| {
        tracing::warn!(
            id = %issue.id,
            locale = %issue.locale,
            source = ?issue.source,
            errors = ?issue.errors,
            "failed to format Fluent message"
        );
    })
}

fn fluent_args_from<'a>(args: &'a LocalizationArgs<'a>) -> FluentArgs<'a> {
    let mut fluent_args = FluentArgs::with_capacity(args.len());
    for (name, value) in args {
        fluent_args.set(*name, value.clone());
    }
    fluent_args
}
