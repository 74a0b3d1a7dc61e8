//! Field traversal: how a struct exposes its annotated fields

use std::fmt;

use crate::coerce::{Coerce, CoerceError};
use crate::error::Error;

/// Callback invoked once per annotated field, in declaration order.
pub type Visitor<'v> = dyn FnMut(Field<'_>) -> Result<(), Error> + 'v;

/// A struct whose fields can be filled from an environment-like source.
///
/// Deriving this trait is the normal route:
///
/// ```rust
/// use envfill::EnvFill;
///
/// #[derive(Default, EnvFill)]
/// struct Config {
///     #[conf(key = "PORT", default = "8080")]
///     pub port: u16,
/// }
/// ```
///
/// The derived implementation yields one [`Field`] per annotated field and
/// recurses into records marked `nested` or `flatten`. Implementing the
/// trait by hand is possible for targets the derive cannot express; such
/// implementations must visit fields in declaration order and stop at the
/// first visitor error.
pub trait EnvFill {
    /// Walk every annotated field under `prefix`, handing each one to
    /// `visitor`. Returns the first error the visitor produces.
    fn walk_fields(&mut self, prefix: &str, visitor: &mut Visitor<'_>) -> Result<(), Error>;
}

/// Append `name` to a dotted field path.
///
/// Used by derived [`EnvFill`] implementations to build the paths that
/// appear in error messages, e.g. `join_path("server", "port")` is
/// `"server.port"`.
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        let mut path = String::with_capacity(prefix.len() + 1 + name.len());
        path.push_str(prefix);
        path.push('.');
        path.push_str(name);
        path
    }
}

/// One annotated field, as seen by a [`Visitor`].
///
/// Carries the annotation (key, default, required) together with the
/// field's dotted path and a writable [`Slot`] for its storage.
pub struct Field<'a> {
    key: &'static str,
    default: Option<&'static str>,
    required: bool,
    path: String,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// Assemble a field descriptor. Derived code calls this; hand-written
    /// [`EnvFill`] implementations may do the same.
    pub fn new(
        key: &'static str,
        default: Option<&'static str>,
        required: bool,
        path: String,
        slot: Slot<'a>,
    ) -> Self {
        Field {
            key,
            default,
            required,
            path,
            slot,
        }
    }

    /// The environment variable key to look up.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The declared fallback value, if any.
    pub fn default_value(&self) -> Option<&'static str> {
        self.default
    }

    /// Whether the load must fail when neither source nor default provide
    /// a value.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Dotted path of the field inside the root struct.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of the type this field declares.
    pub fn expected(&self) -> &'static str {
        self.slot.expected()
    }

    pub(crate) fn assign(&mut self, raw: &str) -> Result<(), AssignError> {
        self.slot.assign(raw)
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("default", &self.default)
            .field("required", &self.required)
            .field("path", &self.path)
            .field("expected", &self.expected())
            .finish_non_exhaustive()
    }
}

/// Writable storage for one field.
///
/// A slot either points at a value of a convertible type or records that
/// the field's type is outside the convertible set. The distinction is
/// baked in when the slot is built, so assignment never has to inspect
/// types at runtime.
pub struct Slot<'a> {
    repr: Repr<'a>,
}

enum Repr<'a> {
    Value {
        expected: &'static str,
        target: &'a mut dyn AssignRaw,
    },
    Unsupported {
        expected: &'static str,
    },
}

impl<'a> Slot<'a> {
    /// A slot for a field whose type implements [`Coerce`].
    pub fn value<T: Coerce>(expected: &'static str, target: &'a mut T) -> Self {
        Slot {
            repr: Repr::Value { expected, target },
        }
    }

    /// A slot for a field whose type cannot be converted. Assigning to it
    /// always fails; the load surfaces that as
    /// [`Error::UnsupportedType`](crate::Error::UnsupportedType).
    pub fn unsupported(expected: &'static str) -> Self {
        Slot {
            repr: Repr::Unsupported { expected },
        }
    }

    /// Name of the type behind this slot.
    pub fn expected(&self) -> &'static str {
        match &self.repr {
            Repr::Value { expected, .. } => expected,
            Repr::Unsupported { expected } => expected,
        }
    }

    /// Whether assignment can succeed at all.
    pub fn is_supported(&self) -> bool {
        matches!(self.repr, Repr::Value { .. })
    }

    fn assign(&mut self, raw: &str) -> Result<(), AssignError> {
        match &mut self.repr {
            Repr::Value { target, .. } => target.assign_raw(raw).map_err(AssignError::Coerce),
            Repr::Unsupported { .. } => Err(AssignError::Unsupported),
        }
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("expected", &self.expected())
            .field("supported", &self.is_supported())
            .finish()
    }
}

#[derive(Debug)]
pub(crate) enum AssignError {
    Unsupported,
    Coerce(CoerceError),
}

trait AssignRaw {
    fn assign_raw(&mut self, raw: &str) -> Result<(), CoerceError>;
}

impl<T: Coerce> AssignRaw for T {
    fn assign_raw(&mut self, raw: &str) -> Result<(), CoerceError> {
        *self = T::coerce(raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "port"), "port");
        assert_eq!(join_path("server", "port"), "server.port");
        assert_eq!(join_path("app.server", "port"), "app.server.port");
    }

    #[test]
    fn test_value_slot_assigns_in_place() {
        let mut port: u16 = 0;
        let mut slot = Slot::value("u16", &mut port);
        assert!(slot.is_supported());
        assert_eq!(slot.expected(), "u16");
        slot.assign("8080").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_value_slot_reports_coercion_failure() {
        let mut port: u16 = 7;
        let mut slot = Slot::value("u16", &mut port);
        assert!(matches!(slot.assign("nope"), Err(AssignError::Coerce(_))));
        assert_eq!(port, 7, "failed assignment must leave the value alone");
    }

    #[test]
    fn test_unsupported_slot_never_assigns() {
        let mut slot = Slot::unsupported("HashMap<String, String>");
        assert!(!slot.is_supported());
        assert_eq!(slot.expected(), "HashMap<String, String>");
        assert!(matches!(slot.assign("x"), Err(AssignError::Unsupported)));
    }

    #[test]
    fn test_field_accessors() {
        let mut debug = false;
        let field = Field::new(
            "DEBUG",
            Some("false"),
            true,
            "debug".to_owned(),
            Slot::value("bool", &mut debug),
        );
        assert_eq!(field.key(), "DEBUG");
        assert_eq!(field.default_value(), Some("false"));
        assert!(field.required());
        assert_eq!(field.path(), "debug");
        assert_eq!(field.expected(), "bool");
    }
}
