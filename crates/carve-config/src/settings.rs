//! Layered settings: built-in defaults, then `carve.toml`, then `CARVE_*`
//! environment variables.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::command::{ExportFormat, ExportSet};
use crate::error::{ConfigError, Result};
use crate::parser::{NamePolicy, ParseOptions};

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "carve.toml";

const ENV_PREFIX: &str = "CARVE_";
const ENV_KEYS: [&str; 4] = ["out_dir", "minify", "exports", "names"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory for default-named output files.
    pub out_dir: PathBuf,
    /// Run the reducer unless a command says `-d`.
    pub minify: bool,
    /// Export formats for commands without `exports=`.
    pub exports: Vec<String>,
    pub names: NamePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            minify: false,
            exports: ExportFormat::ALL
                .iter()
                .map(|format| format.as_str().to_string())
                .collect(),
            names: NamePolicy::Permissive,
        }
    }
}

impl Settings {
    /// Finds `carve.toml` in `root`.
    pub fn discover(root: &Path) -> Option<PathBuf> {
        let path = root.join(SETTINGS_FILE);
        path.is_file().then_some(path)
    }

    /// The provider stack without extracting it.
    ///
    /// An explicit `config_path` must exist; otherwise `carve.toml` is used
    /// when `root` has one.
    pub fn figment(root: &Path, config_path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        let file = match config_path {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::settings(
                    format!("config file {} does not exist", path.display()),
                    "Pass an existing file to --config",
                ));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(root),
        };

        if let Some(path) = file {
            tracing::debug!("loading settings from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS)))
    }

    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        Self::figment(root, config_path)?.extract().map_err(|e| {
            ConfigError::settings(
                e.to_string(),
                "Check carve.toml syntax and field types",
            )
        })
    }

    pub fn export_set(&self) -> ExportSet {
        ExportSet::from_names(&self.exports)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            names: self.names,
            default_exports: self.export_set(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path(), None).unwrap();
        assert_eq!(settings.out_dir, PathBuf::from("."));
        assert!(!settings.minify);
        assert_eq!(settings.export_set(), ExportSet::default());
        assert_eq!(settings.parse_options(), ParseOptions::default());
    }

    #[test]
    fn test_discovered_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            "out_dir = \"dist\"\nminify = true\nexports = [\"amd\"]\nnames = \"strict\"\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path(), None).unwrap();
        assert_eq!(settings.out_dir, PathBuf::from("dist"));
        assert!(settings.minify);
        assert_eq!(settings.export_set().to_string(), "amd");
        assert_eq!(settings.parse_options().names, NamePolicy::Strict);
    }

    #[test]
    fn test_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("release.toml");
        fs::write(&path, "exports = []\n").unwrap();

        let settings = Settings::load(Path::new("/nonexistent"), Some(&path)).unwrap();
        assert!(settings.export_set().is_none());

        let missing = dir.path().join("missing.toml");
        let err = Settings::load(dir.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Settings { .. }));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "minfy = true\n").unwrap();
        let err = Settings::load(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("minfy"));
    }

    #[test]
    fn test_unreadable_file_is_a_settings_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), [0xff, 0xfe, 0x00]).unwrap();

        let err = Settings::load(dir.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Settings { .. }));
        assert_eq!(err.token(), None);
    }
}
