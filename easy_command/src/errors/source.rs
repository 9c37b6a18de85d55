//! Sources that [`ErrorCollection::merge_from`] can import errors from.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

use super::{Attribute, ErrorCode, ErrorCollection, ErrorSpec};
use crate::error::{CommandError, CommandResult};

/// The two layouts accepted when merging errors.
#[derive(Debug, Clone, Copy)]
pub enum ErrorShape<'a> {
    /// A collection of the crate's own type.
    Native(&'a ErrorCollection),
    /// Messages and codes held in parallel per-attribute lists.
    Detailed(&'a ValidationReport),
}

/// Anything exposing errors that another collection may merge.
///
/// Returning `None` means the value has no errors to offer at all, which
/// [`ErrorCollection::merge_from`] reports as
/// [`CommandError::MissingErrors`].
pub trait ErrorSource {
    /// Returns the errors in one of the supported layouts.
    fn error_shape(&self) -> Option<ErrorShape<'_>>;
}

impl<T: ErrorSource> ErrorSource for Option<T> {
    fn error_shape(&self) -> Option<ErrorShape<'_>> {
        self.as_ref().and_then(ErrorSource::error_shape)
    }
}

/// Detail record paired with a message, naming the error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Code of the error the message at the same position describes.
    pub error: ErrorCode,
}

impl ErrorDetail {
    /// Creates a detail record for `error`.
    #[must_use]
    pub fn new(error: impl Into<ErrorCode>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Validation errors in the "messages plus details" layout.
///
/// Messages and detail records for an attribute are paired by position: the
/// first message is described by the first detail, and so on. This is the
/// layout validation libraries commonly emit as JSON:
///
/// ```
/// use easy_command::{ErrorCollection, ValidationReport};
///
/// let report: ValidationReport = serde_json::from_str(
///     r#"{
///         "messages": { "name": ["Bad name!"] },
///         "details": { "name": [{ "error": "bad_name" }] }
///     }"#,
/// )?;
///
/// let mut errors = ErrorCollection::new();
/// errors.merge_from(&report)?;
/// assert!(errors.exists("name", "bad_name"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    #[serde(with = "ordered_map", default)]
    messages: Vec<(Attribute, Vec<String>)>,
    #[serde(with = "ordered_map", default)]
    details: Vec<(Attribute, Vec<ErrorDetail>)>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            details: Vec::new(),
        }
    }

    /// Records a message and its code for `attribute`, keeping both lists
    /// aligned.
    pub fn push(
        &mut self,
        attribute: impl Into<Attribute>,
        code: impl Into<ErrorCode>,
        message: impl Into<String>,
    ) -> &mut Self {
        let name: Attribute = attribute.into();
        let detail = ErrorDetail::new(code);
        with_list(&mut self.details, name.clone(), |list| list.push(detail));
        let text = message.into();
        with_list(&mut self.messages, name, |list| list.push(text));
        self
    }

    /// Replaces the messages reported for `attribute`.
    pub fn set_messages(
        &mut self,
        attribute: impl Into<Attribute>,
        messages: impl IntoIterator<Item = String>,
    ) -> &mut Self {
        with_list(&mut self.messages, attribute.into(), |list| {
            list.clear();
            list.extend(messages);
        });
        self
    }

    /// Replaces the detail records reported for `attribute`.
    pub fn set_details(
        &mut self,
        attribute: impl Into<Attribute>,
        details: impl IntoIterator<Item = ErrorDetail>,
    ) -> &mut Self {
        with_list(&mut self.details, attribute.into(), |list| {
            list.clear();
            list.extend(details);
        });
        self
    }

    /// Messages reported for `attribute`.
    #[must_use]
    pub fn messages(&self, attribute: impl AsRef<str>) -> &[String] {
        find(&self.messages, attribute.as_ref())
    }

    /// Detail records reported for `attribute`.
    #[must_use]
    pub fn details(&self, attribute: impl AsRef<str>) -> &[ErrorDetail] {
        find(&self.details, attribute.as_ref())
    }

    /// Returns `true` when the report carries no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.iter().all(|(_, list)| list.is_empty())
    }

    /// Pairs every message with its detail record.
    ///
    /// Attributes are visited in message order; details for attributes
    /// without messages are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::MismatchedDetails`] when an attribute's message
    /// and detail lists differ in length.
    pub fn paired(&self) -> CommandResult<Vec<(Attribute, Vec<ErrorSpec>)>> {
        self.messages
            .iter()
            .map(|(attribute, messages)| {
                let details = self.details(attribute);
                if details.len() != messages.len() {
                    return Err(CommandError::MismatchedDetails {
                        attribute: attribute.clone(),
                        messages: messages.len(),
                        details: details.len(),
                    });
                }
                let specs = messages
                    .iter()
                    .zip(details)
                    .map(|(message, detail)| {
                        ErrorSpec::new(detail.error.clone(), Some(message.clone()))
                    })
                    .collect();
                Ok((attribute.clone(), specs))
            })
            .collect()
    }
}

impl ErrorSource for ValidationReport {
    fn error_shape(&self) -> Option<ErrorShape<'_>> {
        Some(ErrorShape::Detailed(self))
    }
}

fn find<'a, V>(lists: &'a [(Attribute, Vec<V>)], attribute: &str) -> &'a [V] {
    lists
        .iter()
        .find(|(name, _)| *name == *attribute)
        .map(|(_, list)| list.as_slice())
        .unwrap_or_default()
}

fn with_list<V>(
    lists: &mut Vec<(Attribute, Vec<V>)>,
    attribute: Attribute,
    update: impl FnOnce(&mut Vec<V>),
) {
    if let Some((_, list)) = lists.iter_mut().find(|(name, _)| *name == attribute) {
        update(list);
    } else {
        let mut list = Vec::new();
        update(&mut list);
        lists.push((attribute, list));
    }
}

/// Serde adapter preserving the key order of a JSON-style object.
mod ordered_map {
    use super::{
        Deserialize, Deserializer, MapAccess, PhantomData, Serialize, SerializeMap, Serializer,
        Visitor, fmt,
    };

    pub(super) fn serialize<K, V, S>(entries: &[(K, V)], serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize,
        V: Serialize,
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    /// Repeated keys are folded into the first occurrence's list.
    pub(super) fn deserialize<'de, K, V, D>(deserializer: D) -> Result<Vec<(K, Vec<V>)>, D::Error>
    where
        K: Deserialize<'de> + PartialEq,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        struct OrderedVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for OrderedVisitor<K, V>
        where
            K: Deserialize<'de> + PartialEq,
            V: Deserialize<'de>,
        {
            type Value = Vec<(K, Vec<V>)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Self::Value =
                    Vec::with_capacity(access.size_hint().unwrap_or_default());
                while let Some((key, list)) = access.next_entry::<K, Vec<V>>()? {
                    if let Some((_, known)) =
                        entries.iter_mut().find(|(existing, _)| *existing == key)
                    {
                        known.extend(list);
                        continue;
                    }
                    entries.push((key, list));
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}
