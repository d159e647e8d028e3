#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Locale codes, translation tables, and translators used to localize catalogs.
//!
//! Layout: `locale.rs` (supported locale list), `table.rs` (`locales.json`
//! loading), `translator.rs` (per-locale lookup with key fallback).

pub mod error;
pub mod locale;
pub mod table;
pub mod translator;

pub use error::{TranslationError, TranslationResult};
pub use locale::{DEFAULT_LOCALE, LocaleCode};
pub use table::{TRANSLATIONS_FILE, TranslationTable};
pub use translator::{Translator, make_translator};
