//! Value resolution: source first, then default, then required check

use crate::error::Error;
use crate::source::Source;
use crate::walk::Field;

/// Where a field's raw value came from, or that it has none.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Resolved {
    /// The source had the key. An empty string is still a hit.
    Source(String),
    /// The source missed but the annotation declares a default.
    Default(&'static str),
    /// No value anywhere and the field is optional; leave it untouched.
    Unset,
}

pub(crate) fn resolve<S>(source: &S, field: &Field<'_>) -> Result<Resolved, Error>
where
    S: Source + ?Sized,
{
    if let Some(value) = source.lookup(field.key()) {
        return Ok(Resolved::Source(value));
    }
    if let Some(default) = field.default_value() {
        return Ok(Resolved::Default(default));
    }
    if field.required() {
        return Err(Error::required_missing(field.key(), field.path()));
    }
    Ok(Resolved::Unset)
}
