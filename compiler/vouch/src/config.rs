//! Asserter settings read from the environment.

use vouch_eval::DEFAULT_MAX_ARRAY_ELEMENTS;
use vouch_fmt::DEFAULT_LENGTH_HINT;

/// Rendering and evaluation limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Budget, in characters, for one rendered value.
    pub length_hint: usize,
    /// Cap on the elements one array creation may allocate.
    pub max_array_elements: usize,
}

impl Config {
    pub const LENGTH_HINT_VAR: &'static str = "VOUCH_LENGTH_HINT";
    pub const MAX_ARRAY_ELEMENTS_VAR: &'static str = "VOUCH_MAX_ARRAY_ELEMENTS";

    /// Defaults, overridden by `VOUCH_LENGTH_HINT` and
    /// `VOUCH_MAX_ARRAY_ELEMENTS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    ///
    /// Values that are not non-negative integers are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str, default: usize| match lookup(name) {
            None => default,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(variable = name, value = %raw, "ignoring invalid setting");
                default
            }),
        };
        Config {
            length_hint: read(Self::LENGTH_HINT_VAR, DEFAULT_LENGTH_HINT),
            max_array_elements: read(Self::MAX_ARRAY_ELEMENTS_VAR, DEFAULT_MAX_ARRAY_ELEMENTS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            length_hint: DEFAULT_LENGTH_HINT,
            max_array_elements: DEFAULT_MAX_ARRAY_ELEMENTS,
        }
    }
}
