//! # Design
//!
//! - Each catalog entry is a directory holding an `index.json` manifest.
//! - Entries are visited in sorted directory order so documents are reproducible.
//! - `{"$t": key}` objects are replaced by translated text; relative asset paths are
//!   rewritten to be servable from the user-data root.
//! - Directories without a manifest are skipped; malformed manifests abort the scan.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use blockres_i18n::Translator;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::AssemblyError;
use crate::model::{CatalogType, Document};

/// Manifest file expected inside every catalog entry directory.
pub const MANIFEST_FILE: &str = "index.json";

const MESSAGE_KEY: &str = "$t";
const MESSAGE_ARGS: &str = "$args";

/// Manifest fields holding asset paths relative to the entry directory.
pub const ASSET_FIELDS: &[&str] = &["iconURL", "connectionIconURL", "connectionSmallIconURL"];

/// Describes where a catalog lives on disk and how its manifests are identified.
#[derive(Debug, Clone, Copy)]
pub struct ManifestLayout {
    /// Catalog whose directory is scanned.
    pub catalog: CatalogType,
    /// Field every manifest must carry as its unique identifier.
    pub id_field: &'static str,
}

/// Scan `<base>/<catalog tag>/*/index.json` and return the localized manifests.
///
/// # Errors
///
/// Returns an [`AssemblyError`] if the catalog directory cannot be listed or any
/// manifest is unreadable, malformed, lacks its id, or repeats another entry's id.
pub fn scan(
    base_path: &Path,
    layout: ManifestLayout,
    translator: &Translator,
) -> Result<Vec<Document>, AssemblyError> {
    let root = base_path.join(layout.catalog.tag());
    if !root.is_dir() {
        warn!(
            catalog = layout.catalog.tag(),
            path = %root.display(),
            "catalog directory missing; publishing empty catalog"
        );
        return Ok(Vec::new());
    }

    let mut entries = list_entry_dirs(&root)?;
    entries.sort();

    let mut seen = BTreeSet::new();
    let mut documents = Vec::with_capacity(entries.len());
    for entry in entries {
        let manifest_path = entry.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            warn!(
                catalog = layout.catalog.tag(),
                path = %entry.display(),
                "catalog entry has no manifest; skipping"
            );
            continue;
        }
        let (id, document) = load_entry(&entry, &manifest_path, layout, translator)?;
        if !seen.insert(id.clone()) {
            return Err(AssemblyError::DuplicateId {
                path: manifest_path,
                id,
            });
        }
        documents.push(document);
    }

    debug!(
        catalog = layout.catalog.tag(),
        locale = translator.locale().as_str(),
        entries = documents.len(),
        "catalog scanned"
    );
    Ok(documents)
}

fn list_entry_dirs(root: &Path) -> Result<Vec<PathBuf>, AssemblyError> {
    let read_dir_error = |source: io::Error| AssemblyError::ReadDir {
        path: root.to_path_buf(),
        source,
    };
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

fn load_entry(
    entry: &Path,
    manifest_path: &Path,
    layout: ManifestLayout,
    translator: &Translator,
) -> Result<(String, Document), AssemblyError> {
    let invalid = |reason: &'static str| AssemblyError::InvalidManifest {
        path: manifest_path.to_path_buf(),
        reason,
    };

    let raw = fs::read(manifest_path).map_err(|source| AssemblyError::ReadManifest {
        path: manifest_path.to_path_buf(),
        source,
    })?;
    let manifest: Value =
        serde_json::from_slice(&raw).map_err(|source| AssemblyError::ParseManifest {
            path: manifest_path.to_path_buf(),
            source,
        })?;
    let Value::Object(fields) = manifest else {
        return Err(invalid("manifest_not_object"));
    };

    let id = match fields.get(layout.id_field) {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        Some(_) => return Err(invalid("id_not_string")),
        None => return Err(invalid("id_missing")),
    };
    let dir_name = entry
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| invalid("entry_name_not_utf8"))?;

    let mut fields = localize_object(fields, translator).map_err(invalid)?;
    rewrite_asset_paths(&mut fields, layout.catalog, dir_name);
    Ok((id, Value::Object(fields)))
}

fn localize(value: Value, translator: &Translator) -> Result<Value, &'static str> {
    match value {
        Value::Object(map) if map.contains_key(MESSAGE_KEY) => {
            render_message(&map, translator).map(Value::String)
        }
        Value::Object(map) => localize_object(map, translator).map(Value::Object),
        Value::Array(items) => items
            .into_iter()
            .map(|item| localize(item, translator))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Ok(other),
    }
}

fn localize_object(
    map: Map<String, Value>,
    translator: &Translator,
) -> Result<Map<String, Value>, &'static str> {
    map.into_iter()
        .map(|(name, value)| localize(value, translator).map(|value| (name, value)))
        .collect()
}

fn render_message(map: &Map<String, Value>, translator: &Translator) -> Result<String, &'static str> {
    let Some(Value::String(key)) = map.get(MESSAGE_KEY) else {
        return Err("message_key_not_string");
    };
    if map.keys().any(|name| name != MESSAGE_KEY && name != MESSAGE_ARGS) {
        return Err("message_ref_unknown_field");
    }
    let args = match map.get(MESSAGE_ARGS) {
        None => Vec::new(),
        Some(Value::Object(args)) => args
            .iter()
            .map(|(name, value)| match value {
                Value::String(text) => Ok((name.as_str(), text.clone())),
                Value::Number(number) => Ok((name.as_str(), number.to_string())),
                _ => Err("message_arg_not_scalar"),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err("message_args_not_object"),
    };
    let args: Vec<(&str, &str)> = args
        .iter()
        .map(|(name, value)| (*name, value.as_str()))
        .collect();
    Ok(translator.format(key, &args))
}

fn rewrite_asset_paths(fields: &mut Map<String, Value>, catalog: CatalogType, dir_name: &str) {
    for field in ASSET_FIELDS {
        if let Some(Value::String(asset)) = fields.get_mut(*field)
            && is_relative_asset(asset)
        {
            let relative = asset.trim_start_matches("./");
            *asset = format!("{}/{dir_name}/{relative}", catalog.tag());
        }
    }
}

fn is_relative_asset(asset: &str) -> bool {
    !asset.is_empty()
        && !asset.starts_with('/')
        && !asset.starts_with("data:")
        && !asset.contains("://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use blockres_i18n::{LocaleCode, TranslationTable, make_translator};
    use blockres_test_support::UserDataFixture;
    use serde_json::json;
    use std::sync::Arc;

    const DEVICES: ManifestLayout = ManifestLayout {
        catalog: CatalogType::Devices,
        id_field: "deviceId",
    };

    fn translator(locale: LocaleCode) -> Result<Translator> {
        let table = TranslationTable::from_json_str(
            r#"{"hello": {"en": "Hello", "zh-cn": "你好"}, "pin": {"en": "Pin {n}"}}"#,
        )?;
        Ok(make_translator(locale, &Arc::new(table)))
    }

    #[test]
    fn localize_replaces_nested_message_refs() -> Result<()> {
        let value = json!({
            "greeting": {"$t": "hello"},
            "menu": [{"label": {"$t": "pin", "$args": {"n": 3}}}, "plain"],
            "count": 2
        });
        let localized = localize(value, &translator(LocaleCode::ZhCn)?)
            .map_err(|reason| anyhow::anyhow!(reason))?;
        assert_eq!(
            localized,
            json!({
                "greeting": "你好",
                "menu": [{"label": "Pin 3"}, "plain"],
                "count": 2
            })
        );
        Ok(())
    }

    #[test]
    fn malformed_message_refs_are_rejected() -> Result<()> {
        let translator = translator(LocaleCode::En)?;
        assert_eq!(
            localize(json!({"$t": 1}), &translator),
            Err("message_key_not_string")
        );
        assert_eq!(
            localize(json!({"$t": "hello", "extra": true}), &translator),
            Err("message_ref_unknown_field")
        );
        assert_eq!(
            localize(json!({"$t": "hello", "$args": []}), &translator),
            Err("message_args_not_object")
        );
        assert_eq!(
            localize(json!({"$t": "hello", "$args": {"x": null}}), &translator),
            Err("message_arg_not_scalar")
        );
        Ok(())
    }

    #[test]
    fn relative_assets_are_rewritten_under_entry_dir() {
        let mut fields = Map::new();
        fields.insert("iconURL".into(), json!("./icon.png"));
        fields.insert("connectionIconURL".into(), json!("https://cdn.example/icon.png"));
        fields.insert("connectionSmallIconURL".into(), json!("/static/small.png"));
        fields.insert("helpLink".into(), json!("docs.html"));
        rewrite_asset_paths(&mut fields, CatalogType::Devices, "uno");
        assert_eq!(fields["iconURL"], json!("devices/uno/icon.png"));
        assert_eq!(
            fields["connectionIconURL"],
            json!("https://cdn.example/icon.png")
        );
        assert_eq!(fields["connectionSmallIconURL"], json!("/static/small.png"));
        assert_eq!(fields["helpLink"], json!("docs.html"));
    }

    #[test]
    fn scan_orders_entries_and_skips_dirs_without_manifest() -> Result<()> {
        let fixture = UserDataFixture::new()?;
        fixture.write_device("zeta", &json!({"deviceId": "zeta"}))?;
        fixture.write_device("alpha", &json!({"deviceId": "alpha", "iconURL": "a.png"}))?;
        fixture.write_file("devices/empty/readme.txt", b"no manifest here")?;
        fixture.write_file("devices/stray.json", b"{}")?;

        let documents = scan(fixture.path(), DEVICES, &translator(LocaleCode::En)?)?;
        assert_eq!(
            documents,
            vec![
                json!({"deviceId": "alpha", "iconURL": "devices/alpha/a.png"}),
                json!({"deviceId": "zeta"}),
            ]
        );
        Ok(())
    }

    #[test]
    fn scan_missing_catalog_dir_yields_empty_catalog() -> Result<()> {
        let fixture = UserDataFixture::new()?;
        let documents = scan(fixture.path(), DEVICES, &translator(LocaleCode::En)?)?;
        assert!(documents.is_empty());
        Ok(())
    }

    #[test]
    fn scan_rejects_manifest_without_id() -> Result<()> {
        let fixture = UserDataFixture::new()?;
        let path = fixture.write_device("uno", &json!({"name": "Uno"}))?;
        let err = scan(fixture.path(), DEVICES, &translator(LocaleCode::En)?);
        assert!(matches!(
            err,
            Err(AssemblyError::InvalidManifest { path: reported, reason: "id_missing" }) if reported == path
        ));
        Ok(())
    }

    #[test]
    fn scan_rejects_non_object_manifest() -> Result<()> {
        let fixture = UserDataFixture::new()?;
        fixture.write_device("uno", &json!(["deviceId"]))?;
        let err = scan(fixture.path(), DEVICES, &translator(LocaleCode::En)?);
        assert!(matches!(
            err,
            Err(AssemblyError::InvalidManifest {
                reason: "manifest_not_object",
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn scan_rejects_invalid_json() -> Result<()> {
        let fixture = UserDataFixture::new()?;
        fixture.write_file("devices/uno/index.json", b"{ deviceId: ")?;
        let err = scan(fixture.path(), DEVICES, &translator(LocaleCode::En)?);
        assert!(matches!(err, Err(AssemblyError::ParseManifest { .. })));
        Ok(())
    }

    #[test]
    fn scan_rejects_duplicate_ids() -> Result<()> {
        let fixture = UserDataFixture::new()?;
        fixture.write_device("a", &json!({"deviceId": "uno"}))?;
        fixture.write_device("b", &json!({"deviceId": "uno"}))?;
        let err = scan(fixture.path(), DEVICES, &translator(LocaleCode::En)?);
        assert!(matches!(err, Err(AssemblyError::DuplicateId { id, .. }) if id == "uno"));
        Ok(())
    }
}
