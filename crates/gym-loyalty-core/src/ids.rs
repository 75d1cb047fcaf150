//! Identifier types for gym loyalty records.
//!
//! The remote gym API owns every identifier, so they are opaque here: a
//! non-empty string, with integer ids from the API accepted and stringified.
//!
//! # Macro-based ID Types
//!
//! The `opaque_id_type!` macro keeps serialization, parsing, and display
//! consistent across all record identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire form of an identifier: the API sends either text or an integer.
#[doc(hidden)]
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Textual identifier.
    Text(String),
    /// Integer primary key.
    Number(i64),
}

/// Macro to define an opaque identifier type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `String` with implementations for:
/// - `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize` (as string), `Deserialize` (from string or integer)
/// - `FromStr`, `Display`, `Debug`
/// - `TryFrom<String>`, `Into<String>`, `AsRef<str>`
///
/// # Example
///
/// ```ignore
/// opaque_id_type!(MyId, "A custom identifier type.");
/// let parsed: MyId = "42".parse().unwrap();
/// ```
macro_rules! opaque_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "RawId", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an identifier, rejecting blank input.
            ///
            /// # Errors
            ///
            /// Returns [`IdError::Empty`] if the value is empty or whitespace.
            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(IdError::Empty);
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Return the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<RawId> for $name {
            type Error = IdError;

            fn try_from(value: RawId) -> Result<Self, Self::Error> {
                match value {
                    RawId::Text(text) => Self::new(text),
                    RawId::Number(n) => Self::new(n.to_string()),
                }
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id_type!(ClientId, "A gym client (member) identifier.");
opaque_id_type!(AttendanceId, "A check-in record identifier.");
opaque_id_type!(
    SubscriptionId,
    "A subscription identifier.\n\nEach subscription is one purchased plan period for a client."
);
opaque_id_type!(PlanId, "A catalog plan identifier.");
opaque_id_type!(RewardId, "A loyalty reward identifier.");

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input was empty or whitespace.
    #[error("identifier must not be empty")]
    Empty,
}
