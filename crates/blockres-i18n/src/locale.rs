//! Fixed list of locales the resource server publishes catalogs for.

use std::fmt::{self, Display, Formatter};

/// Locale codes with a precomputed catalog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocaleCode {
    /// English.
    En,
    /// Simplified Chinese.
    ZhCn,
}

/// Locale consulted when the requested locale has no entry for a key.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

impl LocaleCode {
    /// Every supported locale, in publication order.
    pub const ALL: [Self; 2] = [Self::En, Self::ZhCn];

    /// Wire code used in translation files and request paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhCn => "zh-cn",
        }
    }

    /// Exact match against the supported codes; no negotiation is attempted.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.as_str() == code)
    }
}

impl Display for LocaleCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
