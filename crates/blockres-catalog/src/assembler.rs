//! Assembler contract and the built-in device/extension assemblers.

use std::path::Path;

use blockres_i18n::Translator;
use serde_json::Value;

use crate::error::AssemblyError;
use crate::manifest::{self, ManifestLayout};
use crate::model::{CatalogType, Document};

/// Builds one catalog document for one locale from a user-data directory.
///
/// Implementations must not mutate shared state: the index may invoke them for
/// several locales and relies on identical inputs producing identical documents.
pub trait CatalogAssembler: Send + Sync {
    /// Catalog this assembler owns.
    fn catalog_type(&self) -> CatalogType;

    /// Scan `base_path` and return the catalog localized through `translator`.
    ///
    /// # Errors
    ///
    /// Returns an [`AssemblyError`] when the source files cannot be read or are malformed.
    fn assemble_data(
        &self,
        base_path: &Path,
        translator: &Translator,
    ) -> Result<Document, AssemblyError>;
}

/// Assembles `devices/*/index.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceAssembler;

impl DeviceAssembler {
    const LAYOUT: ManifestLayout = ManifestLayout {
        catalog: CatalogType::Devices,
        id_field: "deviceId",
    };
}

impl CatalogAssembler for DeviceAssembler {
    fn catalog_type(&self) -> CatalogType {
        Self::LAYOUT.catalog
    }

    fn assemble_data(
        &self,
        base_path: &Path,
        translator: &Translator,
    ) -> Result<Document, AssemblyError> {
        manifest::scan(base_path, Self::LAYOUT, translator).map(Value::Array)
    }
}

/// Assembles `extensions/*/index.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionAssembler;

impl ExtensionAssembler {
    const LAYOUT: ManifestLayout = ManifestLayout {
        catalog: CatalogType::Extensions,
        id_field: "extensionId",
    };
}

impl CatalogAssembler for ExtensionAssembler {
    fn catalog_type(&self) -> CatalogType {
        Self::LAYOUT.catalog
    }

    fn assemble_data(
        &self,
        base_path: &Path,
        translator: &Translator,
    ) -> Result<Document, AssemblyError> {
        manifest::scan(base_path, Self::LAYOUT, translator).map(Value::Array)
    }
}

/// Assemblers for every catalog the server publishes.
#[must_use]
pub fn default_assemblers() -> Vec<Box<dyn CatalogAssembler>> {
    vec![Box::new(DeviceAssembler), Box::new(ExtensionAssembler)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use blockres_i18n::{LocaleCode, TranslationTable, make_translator};
    use blockres_test_support::UserDataFixture;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn default_assemblers_cover_every_catalog() {
        let tags: Vec<_> = default_assemblers()
            .iter()
            .map(|assembler| assembler.catalog_type())
            .collect();
        assert_eq!(tags, CatalogType::ALL.to_vec());
    }

    #[test]
    fn device_and_extension_assemblers_localize_samples() -> Result<()> {
        let fixture = UserDataFixture::sample()?;
        let table = TranslationTable::load(&fixture.path().join("locales.json"))?;
        let translator = make_translator(LocaleCode::ZhCn, &Arc::new(table));

        let devices = DeviceAssembler.assemble_data(fixture.path(), &translator)?;
        assert_eq!(devices[0]["deviceId"], json!("arduinoUno"));
        assert_eq!(devices[0]["greeting"], json!("你好"));
        assert_eq!(devices[0]["iconURL"], json!("devices/arduinoUno/icon.png"));

        let extensions = ExtensionAssembler.assemble_data(fixture.path(), &translator)?;
        assert_eq!(extensions[0]["name"], json!("舵机"));
        assert_eq!(extensions[0]["description"], json!("驱动 9 号引脚上的舵机"));
        assert_eq!(extensions[0]["iconURL"], json!("extensions/servo/servo.png"));
        Ok(())
    }
}
