//! Index construction against on-disk user-data directories.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use blockres_catalog::{AssemblyError, CatalogIndex, CatalogType, IndexError, default_assemblers};
use blockres_i18n::{LocaleCode, TranslationTable};
use blockres_test_support::UserDataFixture;
use blockres_test_support::fixtures::{sample_device, sample_extension, sample_translations};
use serde_json::{Value, json};

fn build(fixture: &UserDataFixture) -> Result<CatalogIndex> {
    let table = TranslationTable::load(&fixture.path().join("locales.json"))?;
    Ok(CatalogIndex::build(
        fixture.path(),
        &default_assemblers(),
        &LocaleCode::ALL,
        &Arc::new(table),
    )?)
}

fn cell(index: &CatalogIndex, catalog: CatalogType, locale: LocaleCode) -> Result<Value> {
    let body = index
        .get(catalog, locale)
        .ok_or_else(|| anyhow!("missing cell {catalog}/{locale}"))?;
    Ok(serde_json::from_slice(body)?)
}

#[test]
fn every_catalog_and_locale_has_valid_json() -> Result<()> {
    let fixture = UserDataFixture::sample()?;
    let index = build(&fixture)?;
    assert_eq!(index.len(), CatalogType::ALL.len() * LocaleCode::ALL.len());
    for catalog in CatalogType::ALL {
        for locale in LocaleCode::ALL {
            let document = cell(&index, catalog, locale)?;
            assert!(document.is_array(), "{catalog}/{locale} is not an array");
        }
    }
    Ok(())
}

#[test]
fn greeting_is_localized_per_locale() -> Result<()> {
    let fixture = UserDataFixture::sample()?;
    let index = build(&fixture)?;
    let en = index
        .lookup("devices", "en")
        .ok_or_else(|| anyhow!("missing devices/en"))?;
    let zh = index
        .lookup("devices", "zh-cn")
        .ok_or_else(|| anyhow!("missing devices/zh-cn"))?;
    assert!(String::from_utf8(en.to_vec())?.contains(r#""greeting":"Hello""#));
    assert!(String::from_utf8(zh.to_vec())?.contains(r#""greeting":"你好""#));
    Ok(())
}

#[test]
fn identical_sources_produce_identical_bytes() -> Result<()> {
    let first = UserDataFixture::sample()?;
    let second = UserDataFixture::sample()?;
    let index_a = build(&first)?;
    let index_b = build(&second)?;
    let index_c = build(&first)?;
    for catalog in CatalogType::ALL {
        for locale in LocaleCode::ALL {
            let a = index_a.get(catalog, locale);
            assert!(a.is_some());
            assert_eq!(a, index_b.get(catalog, locale));
            assert_eq!(a, index_c.get(catalog, locale));
        }
    }
    Ok(())
}

#[test]
fn missing_translation_key_falls_back_to_raw_key() -> Result<()> {
    let fixture = UserDataFixture::new()?;
    fixture.write_translations(&json!({"hello": {"en": "Hello"}}))?;
    fixture.write_device(
        "uno",
        &json!({"deviceId": "uno", "name": {"$t": "device.uno.untranslated"}}),
    )?;
    let index = build(&fixture)?;
    for locale in LocaleCode::ALL {
        let devices = cell(&index, CatalogType::Devices, locale)?;
        assert_eq!(devices[0]["name"], json!("device.uno.untranslated"));
    }
    Ok(())
}

#[test]
fn malformed_manifest_fails_the_whole_build() -> Result<()> {
    let fixture = UserDataFixture::new()?;
    fixture.write_translations(&sample_translations())?;
    fixture.write_device("arduinoUno", &sample_device())?;
    fixture.write_file("extensions/broken/index.json", b"{\"extensionId\": ")?;
    let table = Arc::new(TranslationTable::load(&fixture.path().join("locales.json"))?);
    let err = CatalogIndex::build(fixture.path(), &default_assemblers(), &LocaleCode::ALL, &table);
    match err {
        Err(IndexError::Assembly {
            catalog: CatalogType::Extensions,
            locale: LocaleCode::En,
            source: AssemblyError::ParseManifest { .. },
        }) => Ok(()),
        other => Err(anyhow!("unexpected build result: {other:?}")),
    }
}

#[test]
fn catalogs_without_sources_publish_empty_arrays() -> Result<()> {
    let fixture = UserDataFixture::new()?;
    fixture.write_translations(&sample_translations())?;
    fixture.write_extension("servo", &sample_extension())?;
    let index = build(&fixture)?;
    for locale in LocaleCode::ALL {
        assert_eq!(cell(&index, CatalogType::Devices, locale)?, json!([]));
        assert_eq!(
            cell(&index, CatalogType::Extensions, locale)?[0]["extensionId"],
            json!("servo")
        );
    }
    Ok(())
}
