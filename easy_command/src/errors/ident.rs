//! Symbol-like identifiers for attributes and error codes.

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;

macro_rules! symbol_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Builds the identifier from a static string without allocating.
            #[must_use]
            pub const fn from_static(name: &'static str) -> Self {
                Self(Cow::Borrowed(name))
            }

            /// Returns the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&'static str> for $name {
            fn from(name: &'static str) -> Self {
                Self::from_static(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(Cow::Owned(name))
            }
        }

        impl From<&$name> for $name {
            fn from(name: &$name) -> Self {
                name.clone()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

symbol_newtype!(
    /// Key naming the field an error belongs to.
    ///
    /// [`Attribute::BASE`] is reserved for errors about the whole object.
    Attribute
);

symbol_newtype!(
    /// Machine-readable error code, compared by value.
    ///
    /// Codes supplied as `&str` or `String` normalise to the same identifier,
    /// so `"invalid"` and `String::from("invalid")` are interchangeable.
    ErrorCode
);

impl Attribute {
    /// Attribute for errors that concern the object as a whole.
    pub const BASE: Self = Self::from_static("base");

    /// Attribute carried by the synthetic entry of a bare failure.
    pub const RESULT: Self = Self::from_static("result");
}

impl ErrorCode {
    /// Code carried by the synthetic entry of a bare failure.
    pub const FAILURE: Self = Self::from_static("failure");
}
