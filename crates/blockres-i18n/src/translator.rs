//! # Design
//!
//! - A translator is bound to one locale and a shared table; clones are cheap.
//! - Lookups fall back to the default locale, then to the raw key, and never fail.
//! - Missing keys are logged at debug level so partial translations stay quiet.

use std::sync::Arc;

use tracing::debug;

use crate::locale::{DEFAULT_LOCALE, LocaleCode};
use crate::table::TranslationTable;

/// Message lookup bound to a single locale.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: LocaleCode,
    table: Arc<TranslationTable>,
}

/// Build a translator for `locale` over the full translation table.
#[must_use]
pub fn make_translator(locale: LocaleCode, table: &Arc<TranslationTable>) -> Translator {
    Translator {
        locale,
        table: Arc::clone(table),
    }
}

impl Translator {
    /// Locale this translator resolves messages for.
    #[must_use]
    pub const fn locale(&self) -> LocaleCode {
        self.locale
    }

    /// Resolve `key`, falling back to the default locale and then to the key itself.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        if let Some(text) = self.table.lookup(key, self.locale) {
            return text.to_string();
        }
        if self.locale != DEFAULT_LOCALE
            && let Some(text) = self.table.lookup(key, DEFAULT_LOCALE)
        {
            debug!(
                key,
                locale = self.locale.as_str(),
                "translation missing; using default locale"
            );
            return text.to_string();
        }
        debug!(
            key,
            locale = self.locale.as_str(),
            "translation missing; using raw key"
        );
        key.to_string()
    }

    /// Resolve `key` and substitute `{name}` placeholders from `args`.
    ///
    /// The message is scanned once, so argument values are inserted verbatim.
    /// Placeholders without a matching argument are left untouched.
    #[must_use]
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = self.translate(key);
        let mut text = String::with_capacity(template.len());
        let mut rest = template.as_str();
        while let Some(open) = rest.find('{') {
            text.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let substitution = after.find('}').and_then(|close| {
                let name = &after[..close];
                args.iter()
                    .find(|(arg, _)| *arg == name)
                    .map(|(_, value)| (close, *value))
            });
            let Some((close, value)) = substitution else {
                text.push('{');
                rest = after;
                continue;
            };
            text.push_str(value);
            rest = &after[close + 1..];
        }
        text.push_str(rest);
        text
    }
}
