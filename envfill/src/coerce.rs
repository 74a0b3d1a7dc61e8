//! Conversion from raw environment strings into field values

use std::time::Duration;

use crate::duration::{self, DurationError};

mod sealed {
    pub trait Sealed {}
}

/// Types that can be produced from a raw environment variable string.
///
/// The set of implementations is closed: strings, booleans, the primitive
/// integer and float types, [`Duration`], and `Vec<T>` where `T` is any of
/// the scalars. Fields of any other type must either carry no key or the
/// load fails with [`Error::UnsupportedType`](crate::Error::UnsupportedType).
///
/// Booleans accept exactly `1`, `t`, `T`, `TRUE`, `true`, `True` and their
/// false counterparts. Unsigned integers reject a leading sign, including
/// `+`. Durations use unit-suffixed strings such as `"300ms"` or `"1.5h"`.
/// Strings are taken verbatim with no trimming.
pub trait Coerce: sealed::Sealed + Sized {
    /// Convert `raw` into a value of this type.
    fn coerce(raw: &str) -> Result<Self, CoerceError>;
}

/// Marker for [`Coerce`] types that may appear as list elements.
///
/// Everything except `Vec` itself is a scalar, so lists nest exactly one
/// level deep.
pub trait Scalar: Coerce {}

/// Why a raw string could not be converted into the field's type.
#[derive(Debug, thiserror::Error)]
pub enum CoerceError {
    /// The string is not one of the accepted boolean literals.
    #[error("invalid boolean literal {0:?}")]
    Bool(String),

    /// The string is not a valid integer for the target width.
    #[error(transparent)]
    Int(#[from] std::num::ParseIntError),

    /// An unsigned target was given an explicitly signed value.
    #[error("unsigned value {0:?} must not carry a sign")]
    UnsignedSign(String),

    /// The string is not a valid floating point number.
    #[error(transparent)]
    Float(#[from] std::num::ParseFloatError),

    /// The string is not a valid duration.
    #[error(transparent)]
    Duration(#[from] DurationError),

    /// One element of a comma-separated list failed to convert.
    #[error("element {index}: {source}")]
    Element {
        /// Position of the failing element, counted from 1
        index: usize,
        /// The scalar conversion failure for that element
        source: Box<CoerceError>,
    },
}

impl sealed::Sealed for String {}
impl Coerce for String {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_owned())
    }
}
impl Scalar for String {}

impl sealed::Sealed for bool {}
impl Coerce for bool {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            other => Err(CoerceError::Bool(other.to_owned())),
        }
    }
}
impl Scalar for bool {}

macro_rules! coerce_signed {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}
        impl Coerce for $ty {
            fn coerce(raw: &str) -> Result<Self, CoerceError> {
                raw.parse::<$ty>().map_err(CoerceError::Int)
            }
        }
        impl Scalar for $ty {}
    )*};
}

macro_rules! coerce_unsigned {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}
        impl Coerce for $ty {
            fn coerce(raw: &str) -> Result<Self, CoerceError> {
                if raw.starts_with('+') || raw.starts_with('-') {
                    return Err(CoerceError::UnsignedSign(raw.to_owned()));
                }
                raw.parse::<$ty>().map_err(CoerceError::Int)
            }
        }
        impl Scalar for $ty {}
    )*};
}

macro_rules! coerce_float {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}
        impl Coerce for $ty {
            fn coerce(raw: &str) -> Result<Self, CoerceError> {
                raw.parse::<$ty>().map_err(CoerceError::Float)
            }
        }
        impl Scalar for $ty {}
    )*};
}

coerce_signed!(i8, i16, i32, i64, i128, isize);
coerce_unsigned!(u8, u16, u32, u64, u128, usize);
coerce_float!(f32, f64);

impl sealed::Sealed for Duration {}
impl Coerce for Duration {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        duration::parse(raw).map_err(CoerceError::Duration)
    }
}
impl Scalar for Duration {}

impl<T: Scalar> sealed::Sealed for Vec<T> {}
impl<T: Scalar> Coerce for Vec<T> {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        trimmed
            .split(',')
            .enumerate()
            .map(|(position, part)| {
                T::coerce(part.trim()).map_err(|cause| CoerceError::Element {
                    index: position + 1,
                    source: Box::new(cause),
                })
            })
            .collect()
    }
}
