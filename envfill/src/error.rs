//! Error types for environment variable loading

use crate::coerce::CoerceError;

/// Errors that can occur while filling a struct from the environment.
///
/// Every failure identifies the environment variable key and the dotted
/// field path it belongs to, so a bad deployment can be fixed without
/// reading the program's source. The `Display` output spans multiple
/// lines, one attribute per line.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The value handed to the loader cannot be filled at all.
    ///
    /// Derived implementations rule this out at compile time; it remains
    /// for hand-written [`EnvFill`](crate::EnvFill) implementations that
    /// discover a bad target at runtime.
    #[error("invalid target: {message}")]
    InvalidTarget {
        /// Description of what was wrong with the target
        message: String,
    },

    /// A field marked `required` had no value in the source and no default.
    #[error("environment variable {key} is required but was not set\nfield: {path}")]
    RequiredMissing {
        /// Environment variable key that was looked up
        key: String,
        /// Dotted path of the field inside the struct
        path: String,
    },

    /// A raw value was found but could not be converted to the field type.
    #[error("environment variable {key} is invalid\nfield: {path}\nexpected: {expected}\nreceived: {value:?}")]
    Parse {
        /// Environment variable key that was looked up
        key: String,
        /// Dotted path of the field inside the struct
        path: String,
        /// Name of the type the field declares
        expected: &'static str,
        /// The raw string that failed to convert
        value: String,
        /// The underlying conversion failure
        #[source]
        source: CoerceError,
    },

    /// A keyed field has a type the loader cannot convert into.
    #[error("environment variable {key} has an unsupported type\nfield: {path}\nexpected: {expected}")]
    UnsupportedType {
        /// Environment variable key that was looked up
        key: String,
        /// Dotted path of the field inside the struct
        path: String,
        /// Name of the unconvertible type
        expected: &'static str,
    },
}

impl Error {
    /// Create an invalid-target error from a hand-written
    /// [`EnvFill`](crate::EnvFill) implementation.
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            message: message.into(),
        }
    }

    pub(crate) fn required_missing(key: &str, path: &str) -> Self {
        Self::RequiredMissing {
            key: key.to_owned(),
            path: path.to_owned(),
        }
    }

    pub(crate) fn parse(
        key: &str,
        path: &str,
        expected: &'static str,
        value: &str,
        source: CoerceError,
    ) -> Self {
        Self::Parse {
            key: key.to_owned(),
            path: path.to_owned(),
            expected,
            value: value.to_owned(),
            source,
        }
    }

    pub(crate) fn unsupported_type(key: &str, path: &str, expected: &'static str) -> Self {
        Self::UnsupportedType {
            key: key.to_owned(),
            path: path.to_owned(),
            expected,
        }
    }
}
