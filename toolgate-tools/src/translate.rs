//! Translation callbacks used to localise tool text at declaration time.

use std::collections::HashMap;
use std::ffi::OsString;

/// Translation callback: `(key, fallback) -> text`.
pub type Translator = dyn Fn(&str, &str) -> String + Send + Sync;

/// Translator that always returns the declared fallback text.
///
/// Used wherever an inventory is needed purely for its structure, such as
/// rendering help text.
#[must_use]
pub fn passthrough(_key: &str, fallback: &str) -> String {
    fallback.to_owned()
}

/// Key-to-text overrides consulted before falling back to declared text.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    overrides: HashMap<String, String>,
}

impl TranslationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override for `key`.
    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), text.into());
        self
    }

    /// Collects overrides from variables named `{prefix}{KEY}`.
    ///
    /// Keys are stored without the prefix so that
    /// `TOOLGATE_TEXT_TOOL_GET_ME_DESCRIPTION` with prefix `TOOLGATE_TEXT_`
    /// overrides key `TOOL_GET_ME_DESCRIPTION`.
    pub fn from_vars<I>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let overrides = vars
            .into_iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(prefix)
                    .filter(|key| !key.is_empty())
                    .map(|key| (key.to_owned(), value))
            })
            .collect();
        Self { overrides }
    }

    /// Collects overrides from raw OS pairs, skipping any that are not UTF-8.
    pub fn from_os_vars<I>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_vars(
            prefix,
            vars.into_iter()
                .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?))),
        )
    }

    /// Collects overrides from the process environment.
    #[must_use]
    pub fn from_env(prefix: &str) -> Self {
        Self::from_os_vars(prefix, std::env::vars_os())
    }

    /// Number of overrides held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Returns `true` when no overrides are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Looks up `key`, falling back to `fallback` on a miss.
    #[must_use]
    pub fn translate(&self, key: &str, fallback: &str) -> String {
        self.overrides
            .get(key)
            .cloned()
            .unwrap_or_else(|| fallback.to_owned())
    }
}
