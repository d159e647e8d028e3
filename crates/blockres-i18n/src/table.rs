//! # Design
//!
//! - Translations come from a static `locales.json` data file in the user-data directory.
//! - Shape is validated on load: message key -> locale code -> localized string.
//! - Ordered maps keep lookups and debug output deterministic.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{TranslationError, TranslationResult};
use crate::locale::LocaleCode;

/// File name of the translations source inside the user-data directory.
pub const TRANSLATIONS_FILE: &str = "locales.json";

/// Immutable message table covering every locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    messages: BTreeMap<String, BTreeMap<String, String>>,
}

impl TranslationTable {
    /// Load the table from a `locales.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Read`] if the file cannot be read and
    /// [`TranslationError::Parse`] if it does not match the expected shape.
    pub fn load(path: &Path) -> TranslationResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| TranslationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = serde_json::from_str::<Self>(&raw).map_err(|source| {
            TranslationError::Parse {
                path: Some(path.to_path_buf()),
                source,
            }
        })?;
        debug!(
            path = %path.display(),
            keys = table.messages.len(),
            "loaded translation table"
        );
        Ok(table)
    }

    /// Parse the table from an in-memory JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Parse`] if the document does not match the expected shape.
    pub fn from_json_str(raw: &str) -> TranslationResult<Self> {
        serde_json::from_str(raw).map_err(|source| TranslationError::Parse { path: None, source })
    }

    /// Localized text for `key` in exactly `locale`, without any fallback.
    #[must_use]
    pub fn lookup(&self, key: &str, locale: LocaleCode) -> Option<&str> {
        self.messages
            .get(key)
            .and_then(|variants| variants.get(locale.as_str()))
            .map(String::as_str)
    }

    /// Number of message keys in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the table holds no message keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
