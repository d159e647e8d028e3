//! # Design
//!
//! - Every `(catalog, locale)` cell is assembled and serialised once, before any request.
//! - The index is immutable after construction and shared read-only across requests.
//! - Any failing cell fails the whole build; a partially populated index is never returned.
//! - Cells are stored as `Bytes` so serving a document is a reference-count bump.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use blockres_i18n::{LocaleCode, TranslationTable, make_translator};
use bytes::Bytes;
use tracing::info;

use crate::assembler::CatalogAssembler;
use crate::error::{IndexError, IndexResult};
use crate::model::CatalogType;

/// Precomputed JSON text for every catalog and supported locale.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    cells: HashMap<(CatalogType, LocaleCode), Bytes>,
    locales: Vec<LocaleCode>,
}

impl CatalogIndex {
    /// Assemble and serialise every catalog for every locale in `locales`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::MissingAssembler`] or [`IndexError::DuplicateAssembler`]
    /// when `assemblers` does not cover each catalog exactly once, and
    /// [`IndexError::Assembly`] or [`IndexError::Serialize`] for the first cell that fails.
    pub fn build(
        base_path: &Path,
        assemblers: &[Box<dyn CatalogAssembler>],
        locales: &[LocaleCode],
        table: &Arc<TranslationTable>,
    ) -> IndexResult<Self> {
        let assemblers = assemblers_by_catalog(assemblers)?;
        let mut unique_locales = Vec::with_capacity(locales.len());
        for locale in locales {
            if !unique_locales.contains(locale) {
                unique_locales.push(*locale);
            }
        }

        let mut cells = HashMap::with_capacity(unique_locales.len() * assemblers.len());
        for &locale in &unique_locales {
            let translator = make_translator(locale, table);
            for assembler in &assemblers {
                let catalog = assembler.catalog_type();
                let document = assembler
                    .assemble_data(base_path, &translator)
                    .map_err(|source| IndexError::Assembly {
                        catalog,
                        locale,
                        source,
                    })?;
                let body = serde_json::to_vec(&document).map_err(|source| {
                    IndexError::Serialize {
                        catalog,
                        locale,
                        source,
                    }
                })?;
                info!(
                    catalog = catalog.tag(),
                    locale = locale.as_str(),
                    bytes = body.len(),
                    "catalog document prepared"
                );
                cells.insert((catalog, locale), Bytes::from(body));
            }
        }

        Ok(Self {
            cells,
            locales: unique_locales,
        })
    }

    /// Serialised document for one cell.
    #[must_use]
    pub fn get(&self, catalog: CatalogType, locale: LocaleCode) -> Option<&Bytes> {
        self.cells.get(&(catalog, locale))
    }

    /// Serialised document addressed by raw catalog tag and locale code.
    #[must_use]
    pub fn lookup(&self, tag: &str, locale_code: &str) -> Option<&Bytes> {
        let catalog = CatalogType::from_tag(tag)?;
        let locale = LocaleCode::from_code(locale_code)?;
        self.get(catalog, locale)
    }

    /// Locales the index was built for.
    #[must_use]
    pub fn locales(&self) -> &[LocaleCode] {
        &self.locales
    }

    /// Number of populated cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the index holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn assemblers_by_catalog(
    assemblers: &[Box<dyn CatalogAssembler>],
) -> IndexResult<Vec<&dyn CatalogAssembler>> {
    let mut ordered = Vec::with_capacity(CatalogType::ALL.len());
    for catalog in CatalogType::ALL {
        let mut matching = assemblers
            .iter()
            .filter(|assembler| assembler.catalog_type() == catalog);
        let assembler = matching
            .next()
            .ok_or(IndexError::MissingAssembler { catalog })?;
        if matching.next().is_some() {
            return Err(IndexError::DuplicateAssembler { catalog });
        }
        ordered.push(&**assembler);
    }
    Ok(ordered)
}
