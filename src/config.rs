#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Run configuration: defaults, JSON overrides, and loading.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use bon::Builder;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;

/// Key for directory names pruned from the walk.
pub const EXCLUDE_FOLDERS: &str = "exclude_folders";
/// Key for file basenames skipped during the walk.
pub const EXCLUDE_FILES: &str = "exclude_files";
/// Key for dropping `__dunder__` functions from extraction.
pub const SKIP_MAGIC_FUNCS: &str = "skip_magic_funcs";
/// Key for dropping `_private` functions from extraction.
pub const SKIP_PRIVATE_FUNCS: &str = "skip_private_funcs";
/// Key selecting the percent-only report.
pub const REPORT_PERCENT_ONLY: &str = "report_percent_only";
/// Key disabling module docstring reporting.
pub const SKIP_MODULES: &str = "skip_modules";
/// Key disabling class reporting and aggregation.
pub const SKIP_CLASSES: &str = "skip_classes";
/// Key disabling function reporting and aggregation.
pub const SKIP_FUNCTIONS: &str = "skip_functions";

/// Folder names pruned when no override is given.
fn default_exclude_folders() -> BTreeSet<String> {
    BTreeSet::from(["venv".to_string()])
}

/// Reasons a configuration document could not be used.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// The document could not be read.
    #[error("Could not read config file {}: {source}", path.display())]
    Read {
        /// Path of the document.
        path:   PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("Could not parse config file {}: {source}", path.display())]
    Parse {
        /// Path of the document.
        path:   PathBuf,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },

    /// The document is valid JSON but not an object.
    #[error("Config file {} must contain a JSON object", path.display())]
    NotAnObject {
        /// Path of the document.
        path: PathBuf,
    },
}

/// Resolved settings for one analysis run.
///
/// A `Config` is a value: every merge produces a new one and the defaults
/// are rebuilt on every call to [`Config::default`], so nothing leaks
/// between runs in the same process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Config {
    /// Directory names pruned anywhere in the walk.
    #[builder(default = default_exclude_folders())]
    exclude_folders:     BTreeSet<String>,
    /// File basenames skipped during the walk.
    #[builder(default)]
    exclude_files:       BTreeSet<String>,
    /// Drop `__dunder__` functions from extraction.
    #[builder(default = true)]
    skip_magic_funcs:    bool,
    /// Drop `_private` functions from extraction.
    #[builder(default = true)]
    skip_private_funcs:  bool,
    /// Render the one-line-per-file summary instead of violations.
    #[builder(default = false)]
    report_percent_only: bool,
    /// Omit module docstring violations.
    #[builder(default = false)]
    skip_modules:        bool,
    /// Omit class violations and the class total.
    #[builder(default = false)]
    skip_classes:        bool,
    /// Omit function violations and the function total.
    #[builder(default = false)]
    skip_functions:      bool,
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

impl Config {
    /// Directory names pruned anywhere in the walk.
    pub fn exclude_folders(&self) -> &BTreeSet<String> {
        &self.exclude_folders
    }

    /// File basenames skipped during the walk.
    pub fn exclude_files(&self) -> &BTreeSet<String> {
        &self.exclude_files
    }

    /// Whether `__dunder__` functions are dropped from extraction.
    pub fn skip_magic_funcs(&self) -> bool {
        self.skip_magic_funcs
    }

    /// Whether `_private` functions are dropped from extraction.
    pub fn skip_private_funcs(&self) -> bool {
        self.skip_private_funcs
    }

    /// Whether the percent-only report is selected.
    pub fn report_percent_only(&self) -> bool {
        self.report_percent_only
    }

    /// Whether module docstring violations are omitted.
    pub fn skip_modules(&self) -> bool {
        self.skip_modules
    }

    /// Whether class violations and totals are omitted.
    pub fn skip_classes(&self) -> bool {
        self.skip_classes
    }

    /// Whether function violations and totals are omitted.
    pub fn skip_functions(&self) -> bool {
        self.skip_functions
    }

    /// Returns a new config with every recognized, well-typed key of
    /// `overrides` applied on top of `self`.
    ///
    /// Unknown keys are ignored. A recognized key whose value has the wrong
    /// type keeps the current value.
    pub fn merged(&self, overrides: &Map<String, Value>) -> Config {
        let mut config = self.clone();

        for (key, value) in overrides {
            match key.as_str() {
                EXCLUDE_FOLDERS => assign(&mut config.exclude_folders, key, value),
                EXCLUDE_FILES => assign(&mut config.exclude_files, key, value),
                SKIP_MAGIC_FUNCS => assign(&mut config.skip_magic_funcs, key, value),
                SKIP_PRIVATE_FUNCS => assign(&mut config.skip_private_funcs, key, value),
                REPORT_PERCENT_ONLY => assign(&mut config.report_percent_only, key, value),
                SKIP_MODULES => assign(&mut config.skip_modules, key, value),
                SKIP_CLASSES => assign(&mut config.skip_classes, key, value),
                SKIP_FUNCTIONS => assign(&mut config.skip_functions, key, value),
                _ => tracing::trace!("Ignoring unrecognized config key `{key}`"),
            }
        }

        config
    }

    /// Reads a JSON override document and merges it onto the defaults.
    pub fn try_load(path: &Path) -> Result<Config, ConfigLoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&text).map_err(|source| ConfigLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let overrides = document
            .as_object()
            .ok_or_else(|| ConfigLoadError::NotAnObject {
                path: path.to_path_buf(),
            })?;

        Ok(Config::default().merged(overrides))
    }

    /// Loads the override document if one is given, falling back to the
    /// defaults on any failure. Failures only show up in debug logs.
    pub fn load_or_default(path: Option<&Path>) -> Config {
        let Some(path) = path else {
            return Config::default();
        };

        match Config::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default config: {e}");
                Config::default()
            }
        }
    }
}

/// Overwrites `slot` with `value` when it deserializes into the slot's type.
fn assign<T: DeserializeOwned>(slot: &mut T, key: &str, value: &Value) {
    match T::deserialize(value) {
        Ok(v) => *slot = v,
        Err(e) => tracing::debug!("Ignoring config key `{key}` with unexpected value: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn names<const N: usize>(items: [&str; N]) -> BTreeSet<String> {
        items.into_iter().map(String::from).collect()
    }

    fn overrides(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.exclude_folders(), &names(["venv"]));
        assert!(config.exclude_files().is_empty());
        assert!(config.skip_magic_funcs());
        assert!(config.skip_private_funcs());
        assert!(!config.report_percent_only());
        assert!(!config.skip_modules());
        assert!(!config.skip_classes());
        assert!(!config.skip_functions());
    }

    #[test]
    fn merge_applies_every_recognized_key() {
        let merged = Config::default().merged(&overrides(json!({
            "exclude_folders": ["build", ".tox"],
            "exclude_files": ["setup.py"],
            "skip_magic_funcs": false,
            "skip_private_funcs": false,
            "report_percent_only": true,
            "skip_modules": true,
            "skip_classes": true,
            "skip_functions": true,
        })));

        let expected = Config::builder()
            .exclude_folders(names(["build", ".tox"]))
            .exclude_files(names(["setup.py"]))
            .skip_magic_funcs(false)
            .skip_private_funcs(false)
            .report_percent_only(true)
            .skip_modules(true)
            .skip_classes(true)
            .skip_functions(true)
            .build();
        assert_eq!(merged, expected);
    }

    #[test]
    fn merge_ignores_unknown_and_ill_typed_keys() {
        let merged = Config::default().merged(&overrides(json!({
            "colour": "always",
            "skip_magic_funcs": "no",
            "exclude_folders": "venv",
            "skip_classes": true,
        })));

        assert_eq!(merged, Config::builder().skip_classes(true).build());
    }

    #[test]
    fn merge_leaves_the_template_untouched() {
        let template = Config::default();
        let _ = template.merged(&overrides(json!({ "exclude_folders": [] })));
        assert_eq!(template, Config::default());
        assert!(Config::default().exclude_folders().contains("venv"));
    }

    #[test]
    fn missing_document_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("pydoccov-config-that-does-not-exist.json");
        assert!(matches!(Config::try_load(&path), Err(ConfigLoadError::Read { .. })));
        assert_eq!(Config::load_or_default(Some(&path)), Config::default());
        assert_eq!(Config::load_or_default(None), Config::default());
    }
}
