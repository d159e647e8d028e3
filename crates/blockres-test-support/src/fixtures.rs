//! Temporary user-data directories populated with translations and catalog manifests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tempfile::TempDir;

/// User-data directory that is removed when the fixture is dropped.
#[derive(Debug)]
pub struct UserDataFixture {
    dir: TempDir,
}

impl UserDataFixture {
    /// Create an empty user-data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("failed to create user-data tempdir")?;
        Ok(Self { dir })
    }

    /// User-data directory populated with one device, one extension, and their translations.
    ///
    /// # Errors
    ///
    /// Returns an error if any fixture file cannot be written.
    pub fn sample() -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write_translations(&sample_translations())?;
        fixture.write_device("arduinoUno", &sample_device())?;
        fixture.write_extension("servo", &sample_extension())?;
        fixture.write_file("devices/arduinoUno/icon.png", b"uno-icon")?;
        Ok(fixture)
    }

    /// Root of the user-data directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `locales.json` with the supplied table.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_translations(&self, table: &Value) -> Result<PathBuf> {
        self.write_json("locales.json", table)
    }

    /// Write `devices/<dir>/index.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be written.
    pub fn write_device(&self, dir: &str, manifest: &Value) -> Result<PathBuf> {
        self.write_json(&format!("devices/{dir}/index.json"), manifest)
    }

    /// Write `extensions/<dir>/index.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be written.
    pub fn write_extension(&self, dir: &str, manifest: &Value) -> Result<PathBuf> {
        self.write_json(&format!("extensions/{dir}/index.json"), manifest)
    }

    /// Write arbitrary bytes relative to the user-data root, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories or the file cannot be written.
    pub fn write_file(&self, relative: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create '{}'", parent.display()))?;
        }
        fs::write(&path, contents)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        Ok(path)
    }

    fn write_json(&self, relative: &str, value: &Value) -> Result<PathBuf> {
        let body = serde_json::to_vec_pretty(value).context("failed to encode fixture json")?;
        self.write_file(relative, &body)
    }
}

/// Translation table used by [`UserDataFixture::sample`].
#[must_use]
pub fn sample_translations() -> Value {
    json!({
        "hello": {"en": "Hello", "zh-cn": "你好"},
        "device.arduinoUno.name": {"en": "Arduino Uno", "zh-cn": "Arduino Uno 开发板"},
        "extension.servo.name": {"en": "Servo", "zh-cn": "舵机"},
        "extension.servo.description": {
            "en": "Drive a servo on pin {pin}",
            "zh-cn": "驱动 {pin} 号引脚上的舵机"
        }
    })
}

/// Device manifest used by [`UserDataFixture::sample`].
#[must_use]
pub fn sample_device() -> Value {
    json!({
        "deviceId": "arduinoUno",
        "name": {"$t": "device.arduinoUno.name"},
        "greeting": {"$t": "hello"},
        "type": "arduino",
        "iconURL": "icon.png",
        "tags": ["arduino", "kit"],
        "featured": true
    })
}

/// Extension manifest used by [`UserDataFixture::sample`].
#[must_use]
pub fn sample_extension() -> Value {
    json!({
        "extensionId": "servo",
        "name": {"$t": "extension.servo.name"},
        "description": {"$t": "extension.servo.description", "$args": {"pin": "9"}},
        "iconURL": "servo.png",
        "supportDevice": ["arduinoUno"],
        "version": "1.0.0"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_fixture_writes_expected_layout() -> Result<()> {
        let fixture = UserDataFixture::sample()?;
        let root = fixture.path();
        assert!(root.join("locales.json").is_file());
        assert!(root.join("devices/arduinoUno/index.json").is_file());
        assert!(root.join("extensions/servo/index.json").is_file());
        assert_eq!(fs::read(root.join("devices/arduinoUno/icon.png"))?, b"uno-icon");
        Ok(())
    }

    #[test]
    fn fixture_directory_is_removed_on_drop() -> Result<()> {
        let fixture = UserDataFixture::new()?;
        let root = fixture.path().to_path_buf();
        drop(fixture);
        assert!(!root.exists());
        Ok(())
    }
}
