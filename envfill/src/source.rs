//! Key/value sources that loads can read from

use std::borrow::Borrow;
use std::collections::HashMap;
use std::env;
use std::hash::{BuildHasher, Hash};

/// Where raw values come from during a load.
///
/// The process environment is the usual source, but anything keyed by
/// string works: tests pass a `HashMap` so they never have to mutate
/// global process state.
pub trait Source {
    /// Look up `key`, returning the raw value if the source has one.
    ///
    /// `Some("")` means the key is present with an empty value, which the
    /// loader treats as a real value and not as missing.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The live process environment.
///
/// A variable that is set but empty is present; a variable whose value
/// is not valid Unicode is treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl<K, V, S> Source for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| value.as_ref().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_map_source_with_str_keys() {
        let source = HashMap::from([("PORT", "8080"), ("EMPTY", "")]);
        assert_eq!(source.lookup("PORT"), Some("8080".to_owned()));
        assert_eq!(source.lookup("EMPTY"), Some(String::new()));
        assert_eq!(source.lookup("ABSENT"), None);
    }

    #[test]
    fn test_map_source_with_owned_keys() {
        let source: HashMap<String, String> =
            HashMap::from([("HOST".to_owned(), "localhost".to_owned())]);
        assert_eq!(source.lookup("HOST"), Some("localhost".to_owned()));
    }

    #[test]
    #[serial]
    fn test_process_env_source() {
        env::set_var("ENVFILL_SOURCE_TEST", "present");
        assert_eq!(
            ProcessEnv.lookup("ENVFILL_SOURCE_TEST"),
            Some("present".to_owned())
        );

        env::set_var("ENVFILL_SOURCE_TEST", "");
        assert_eq!(
            ProcessEnv.lookup("ENVFILL_SOURCE_TEST"),
            Some(String::new())
        );

        env::remove_var("ENVFILL_SOURCE_TEST");
        assert_eq!(ProcessEnv.lookup("ENVFILL_SOURCE_TEST"), None);
    }
}
