//! Fill plain structs from environment variables
//!
//! `envfill` populates the fields of an ordinary struct from environment
//! variables, driven entirely by per-field annotations: which variable to
//! read, an optional default, and whether the field is required.
//!
//! The struct stays a plain struct. Nothing about it changes except that
//! [`load`] can write into it, so the same type can be built by hand in
//! tests or filled from the environment in production.
//!
//! # Features
//!
//! - **Declarative**: annotate fields, derive [`EnvFill`], call [`load`]
//! - **Typed**: strings, booleans, integers, floats, [`Duration`](std::time::Duration),
//!   and flat `Vec`s of those, converted with strict syntax rules
//! - **Nested**: sub-structs compose with `nested` (dotted paths) or
//!   `flatten` (no extra path segment)
//! - **Diagnosable**: every failure names the variable, the field path,
//!   the expected type, and the rejected value
//!
//! # Resolution order
//!
//! For each annotated field, in declaration order:
//!
//! 1. Look the key up in the source. A hit wins, even when the value is
//!    the empty string.
//! 2. Otherwise use the declared `default`, if there is one.
//! 3. Otherwise fail if the field is `required`.
//! 4. Otherwise leave the field exactly as it was.
//!
//! The first failure stops the load. Fields already written keep their
//! values; the load is not transactional.
//!
//! # Example
//!
//! ```rust
//! use envfill::EnvFill;
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Default, EnvFill)]
//! struct Config {
//!     #[conf(key = "APP_NAME", default = "my-app")]
//!     pub name: String,
//!
//!     #[conf(key = "PORT", default = "8080")]
//!     pub port: u16,
//!
//!     #[conf(key = "DATABASE_URL", required)]
//!     pub database_url: String,
//! }
//!
//! # fn main() -> Result<(), envfill::Error> {
//! // Tests can use any string map as the source; production code calls
//! // envfill::load(&mut config) to read the process environment.
//! let source = HashMap::from([
//!     ("PORT", "9090"),
//!     ("DATABASE_URL", "postgres://localhost/app"),
//! ]);
//!
//! let mut config = Config::default();
//! envfill::load_from(&source, &mut config)?;
//!
//! assert_eq!(config.name, "my-app");
//! assert_eq!(config.port, 9090);
//! assert_eq!(config.database_url, "postgres://localhost/app");
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[conf(key = "VAR")]`
//!
//! Marks a field for filling and names the environment variable to read.
//! Fields without a key (or with a blank one) are left alone. The key is
//! trimmed, so `key = " PORT "` reads `PORT`.
//!
//! ## `#[conf(default = "...")]`
//!
//! The raw string to use when the variable is not set. Defaults go
//! through the same conversion as real values, so `default = "30s"` on a
//! `Duration` field works. Bare numeric and boolean literals are accepted
//! too (`default = 8080`); values that are not plain literals, such as
//! negative numbers, must be spelled as strings (`default = "-1"`).
//!
//! ```rust
//! # use envfill::EnvFill;
//! use std::time::Duration;
//!
//! #[derive(Default, EnvFill)]
//! struct Config {
//!     #[conf(key = "TIMEOUT", default = "30s")]
//!     pub timeout: Duration,
//!
//!     #[conf(key = "WORKERS", default = 4)]
//!     pub workers: usize,
//! }
//!
//! # fn main() -> Result<(), envfill::Error> {
//! # let mut config = Config::default();
//! # envfill::load_from(&std::collections::HashMap::<&str, &str>::new(), &mut config)?;
//! # assert_eq!(config.timeout, Duration::from_secs(30));
//! # assert_eq!(config.workers, 4);
//! # Ok(())
//! # }
//! ```
//!
//! ## `#[conf(required)]`
//!
//! Fail the load when neither the source nor a default provides a value.
//! A default on the same field means the variable can still be omitted,
//! so combining the two only documents intent.
//!
//! ## `#[conf(nested)]` and `#[conf(flatten)]`
//!
//! Recurse into a field whose type also implements [`EnvFill`]. With
//! `nested` the field name becomes a path segment (`server.port` in
//! error messages); with `flatten` the sub-struct's fields report their
//! own names only. Neither affects which environment variables are read;
//! keys are always taken verbatim from the leaf annotations.
//!
//! A field that has both a key and `nested` is treated as a leaf: its key
//! wins and the sub-struct is not recursed into.
//!
//! ```rust
//! # use envfill::EnvFill;
//! #[derive(Default, EnvFill)]
//! struct Server {
//!     #[conf(key = "SERVER_HOST", default = "localhost")]
//!     pub host: String,
//! }
//!
//! #[derive(Default, EnvFill)]
//! struct Config {
//!     #[conf(nested)]
//!     pub server: Server,
//! }
//! ```
//!
//! # Errors
//!
//! Failures render one attribute per line so they can be pasted straight
//! into an incident report:
//!
//! ```text
//! environment variable PORT is invalid
//! field: server.port
//! expected: u16
//! received: "not-a-port"
//! ```

mod coerce;
mod duration;
mod error;
mod resolve;
mod source;
mod walk;

pub use coerce::{Coerce, CoerceError, Scalar};
pub use duration::DurationError;
pub use error::Error;
pub use source::{ProcessEnv, Source};
pub use walk::{join_path, EnvFill, Field, Slot, Visitor};

pub use envfill_derive::EnvFill;

use resolve::Resolved;

/// Fill `target` from the process environment.
///
/// Equivalent to [`load_from`] with [`ProcessEnv`] as the source.
///
/// # Errors
///
/// Returns the first [`Error`] encountered; fields visited before the
/// failure keep whatever was assigned to them.
pub fn load<T>(target: &mut T) -> Result<(), Error>
where
    T: EnvFill + ?Sized,
{
    load_from(&ProcessEnv, target)
}

/// Fill `target` from an arbitrary [`Source`].
///
/// Fields are visited in declaration order. For each one the source is
/// consulted first, then the declared default; a field with neither is
/// an error if `required` and untouched otherwise.
///
/// ```rust
/// use envfill::EnvFill;
/// use std::collections::HashMap;
///
/// #[derive(Default, EnvFill)]
/// struct Config {
///     #[conf(key = "RETRIES", default = "3")]
///     pub retries: u32,
/// }
///
/// # fn main() -> Result<(), envfill::Error> {
/// let source = HashMap::from([("RETRIES", "5")]);
/// let mut config = Config::default();
/// envfill::load_from(&source, &mut config)?;
/// assert_eq!(config.retries, 5);
/// # Ok(())
/// # }
/// ```
pub fn load_from<S, T>(source: &S, target: &mut T) -> Result<(), Error>
where
    S: Source + ?Sized,
    T: EnvFill + ?Sized,
{
    target.walk_fields("", &mut |mut field| {
        // Hand-written implementations may yield blank keys; such fields
        // do not participate.
        if field.key().trim().is_empty() {
            return Ok(());
        }
        let raw = match resolve::resolve(source, &field)? {
            Resolved::Source(value) => value,
            Resolved::Default(value) => value.to_owned(),
            Resolved::Unset => return Ok(()),
        };
        match field.assign(&raw) {
            Ok(()) => Ok(()),
            Err(walk::AssignError::Unsupported) => Err(Error::unsupported_type(
                field.key(),
                field.path(),
                field.expected(),
            )),
            Err(walk::AssignError::Coerce(cause)) => Err(Error::parse(
                field.key(),
                field.path(),
                field.expected(),
                &raw,
                cause,
            )),
        }
    })
}

/// Fill `target` from the process environment, panicking on failure.
///
/// Intended for program startup where a bad environment should abort
/// immediately; the panic message is the rendered [`Error`].
///
/// ```rust,no_run
/// use envfill::EnvFill;
///
/// #[derive(Default, EnvFill)]
/// struct Config {
///     #[conf(key = "DATABASE_URL", required)]
///     pub database_url: String,
/// }
///
/// let mut config = Config::default();
/// envfill::must_load(&mut config);
/// ```
pub fn must_load<T>(target: &mut T)
where
    T: EnvFill + ?Sized,
{
    if let Err(err) = load(target) {
        panic!("{err}");
    }
}
