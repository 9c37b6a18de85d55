//! Fluent bundle construction and identifier normalisation.

use fluent_bundle::FluentResource;
use fluent_bundle::concurrent::FluentBundle;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

use super::{
    FluentBundleSource, FluentLocalizer, FluentLocalizerBuilder, FluentLocalizerError,
    FormattingIssueReporter,
};

pub(super) struct BundleWithLocale {
    pub(super) locale: LanguageIdentifier,
    pub(super) bundle: FluentBundle<Arc<FluentResource>>,
    pub(super) kind: FluentBundleSource,
}

impl fmt::Debug for BundleWithLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleWithLocale")
            .field("locale", &self.locale)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

const EN_US_CATALOGUE: &str = include_str!("../../locales/en-US/messages.ftl");
const JA_CATALOGUE: &str = include_str!("../../locales/ja/messages.ftl");

static EN_US_RESOURCES: [&str; 1] = [EN_US_CATALOGUE];
static JA_RESOURCES: [&str; 1] = [JA_CATALOGUE];

pub(super) fn default_resources(locale: &LanguageIdentifier) -> Option<&'static [&'static str]> {
    match locale.language.as_str() {
        "en" => Some(&EN_US_RESOURCES),
        "ja" => Some(&JA_RESOURCES),
        _ => None,
    }
}

pub(super) fn bundle_from_resources(
    locale: &LanguageIdentifier,
    resources: &[&'static str],
    catalogue: FluentBundleSource,
) -> Result<BundleWithLocale, FluentLocalizerError> {
    let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
    // Plain text output: interpolated values are not wrapped in Unicode
    // isolation marks.
    bundle.set_use_isolating(false);

    for resource in resources {
        let parsed = FluentResource::try_new(normalize_resource_ids(resource)).map_err(
            |(_resource, errors)| FluentLocalizerError::Parser {
                locale: locale.clone(),
                catalogue,
                errors,
            },
        )?;
        bundle
            .add_resource(Arc::new(parsed))
            .map_err(|errors| FluentLocalizerError::Registration {
                locale: locale.clone(),
                catalogue,
                errors,
            })?;
    }

    Ok(BundleWithLocale {
        locale: locale.clone(),
        bundle,
        kind: catalogue,
    })
}

/// Maps a dotted key such as `errors.messages.blank` onto the Fluent
/// identifier `errors-messages-blank`.
pub(super) fn normalize_identifier(id: &str) -> Cow<'_, str> {
    if id.contains('.') {
        Cow::Owned(id.replace('.', "-"))
    } else {
        Cow::Borrowed(id)
    }
}

/// Rewrites dotted top-level message identifiers in a Fluent resource.
pub(super) fn normalize_resource_ids(resource: &str) -> String {
    resource
        .lines()
        .map(normalize_id_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_message_identifier(id: &str) -> bool {
    let mut chars = id.chars();
    chars.next().is_some_and(char::is_alphabetic)
        && chars.all(|ch| ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.'))
}

fn normalize_id_line(line: &str) -> Cow<'_, str> {
    // Comments, blank lines and indented continuation lines (attributes,
    // variants, multiline values) are left untouched.
    if line.starts_with(|ch: char| ch.is_whitespace() || ch == '#') || line.is_empty() {
        return Cow::Borrowed(line);
    }
    let Some((left, right)) = line.split_once('=') else {
        return Cow::Borrowed(line);
    };
    let id = left.trim_end();
    if !id.contains('.') || !is_message_identifier(id) {
        return Cow::Borrowed(line);
    }
    let padding = left.get(id.len()..).unwrap_or_default();
    Cow::Owned(format!("{}{padding}={right}", normalize_identifier(id)))
}

impl FluentLocalizerBuilder {
    /// Creates a builder for the requested locale.
    #[must_use]
    pub fn new(locale: LanguageIdentifier) -> Self {
        Self {
            locale,
            consumer_resources: Vec::new(),
            report_issue: super::default_reporter(),
            use_defaults: true,
        }
    }

    /// Adds consumer-provided Fluent resources to layer over the defaults.
    #[must_use]
    pub fn with_consumer_resources(
        mut self,
        resources: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        self.consumer_resources.extend(resources);
        self
    }

    /// Disables the embedded catalogue, leaving consumer resources only.
    #[must_use]
    pub const fn disable_defaults(mut self) -> Self {
        self.use_defaults = false;
        self
    }

    /// Installs a hook to report formatting issues surfaced by Fluent.
    #[must_use]
    pub fn with_error_reporter(mut self, reporter: FormattingIssueReporter) -> Self {
        self.report_issue = reporter;
        self
    }

    /// Builds the [`FluentLocalizer`].
    ///
    /// # Errors
    ///
    /// Returns [`FluentLocalizerError`] if the embedded catalogue is missing
    /// for the locale, or if any catalogue fails to parse or register.
    pub fn try_build(self) -> Result<FluentLocalizer, FluentLocalizerError> {
        let defaults = if self.use_defaults {
            let resources = default_resources(&self.locale).ok_or_else(|| {
                FluentLocalizerError::UnsupportedLocale {
                    locale: self.locale.clone(),
                }
            })?;
            Some(bundle_from_resources(
                &self.locale,
                resources,
                FluentBundleSource::Default,
            )?)
        } else {
            None
        };

        let consumer = if self.consumer_resources.is_empty() {
            None
        } else {
            Some(bundle_from_resources(
                &self.locale,
                &self.consumer_resources,
                FluentBundleSource::Consumer,
            )?)
        };

        Ok(FluentLocalizer {
            consumer,
            defaults,
            report_issue: self.report_issue,
        })
    }
}

impl fmt::Debug for FluentLocalizerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluentLocalizerBuilder")
            .field("locale", &self.locale)
            .field("consumer_resources_len", &self.consumer_resources.len())
            .field("use_defaults", &self.use_defaults)
            .field("report_issue", &"<formatter>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use unic_langid::langid;

    #[rstest]
    #[case::en_us(langid!("en-US"), true)]
    #[case::en_gb(langid!("en-GB"), true)]
    #[case::ja(langid!("ja-JP"), true)]
    #[case::fr(langid!("fr-FR"), false)]
    fn embedded_catalogues_match_on_language(
        #[case] locale: LanguageIdentifier,
        #[case] expected: bool,
    ) {
        assert_eq!(default_resources(&locale).is_some(), expected);
    }

    #[rstest]
    #[case::dotted("errors.messages.blank = x", "errors-messages-blank = x")]
    #[case::padded("a.b   =  y", "a-b   =  y")]
    #[case::plain("blank = z", "blank = z")]
    #[case::comment("# a.b = c", "# a.b = c")]
    #[case::indented("    .label = Label", "    .label = Label")]
    #[case::term("-term.id = Term", "-term.id = Term")]
    #[case::unicode("ключ.значение = Привет", "ключ-значение = Привет")]
    fn normalises_top_level_ids(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_resource_ids(input), expected);
    }

    #[test]
    fn embedded_catalogues_parse() {
        for locale in [langid!("en-US"), langid!("ja")] {
            let resources = default_resources(&locale).expect("catalogue exists");
            bundle_from_resources(&locale, resources, FluentBundleSource::Default)
                .expect("embedded catalogue should parse");
        }
    }
}
