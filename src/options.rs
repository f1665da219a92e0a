use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_LIBRARY_MARKER: &str = "@primer/components";
pub const DEFAULT_STYLE_ATTRIBUTE: &str = "sx";

/// What to do with a system prop written as a bare string, e.g. `color="red"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BareLiteralPolicy {
    /// Leave the prop where it is and keep it out of the style object
    #[default]
    Skip,
    /// Move the string into the style object like any other literal
    Migrate,
}

/// What to do when a system prop holds an expression that cannot be migrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnsupportedValuePolicy {
    /// Leave that one prop in place; the rest of the element still migrates
    #[default]
    SkipEntry,
    /// Leave the whole element untouched
    AbortElement,
}

/// Failure to load a JSON options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    /// Substring identifying the component library in import paths
    pub library_marker: String,
    /// Name of the prop receiving the merged object
    pub style_attribute: String,
    pub bare_literal_policy: BareLiteralPolicy,
    pub unsupported_value_policy: UnsupportedValuePolicy,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            library_marker: DEFAULT_LIBRARY_MARKER.to_string(),
            style_attribute: DEFAULT_STYLE_ATTRIBUTE.to_string(),
            bare_literal_policy: BareLiteralPolicy::default(),
            unsupported_value_policy: UnsupportedValuePolicy::default(),
        }
    }
}

impl TransformOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let options = TransformOptions::from_json(r#"{ "barePolicyTypo": 1 }"#);
        // unknown keys are tolerated
        let options = options.unwrap();
        assert_eq!(options, TransformOptions::default());
        assert_eq!(options.library_marker, "@primer/components");
        assert_eq!(options.style_attribute, "sx");
    }

    #[test]
    fn test_policies_parse_kebab_case() {
        let options = TransformOptions::from_json(
            r#"{ "bareLiteralPolicy": "migrate", "unsupportedValuePolicy": "abort-element", "styleAttribute": "css" }"#,
        )
        .unwrap();
        assert_eq!(options.bare_literal_policy, BareLiteralPolicy::Migrate);
        assert_eq!(options.unsupported_value_policy, UnsupportedValuePolicy::AbortElement);
        assert_eq!(options.style_attribute, "css");
        assert_eq!(options.library_marker, DEFAULT_LIBRARY_MARKER);
    }

    #[test]
    fn test_config_file_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        let err = TransformOptions::from_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ \"styleAttribute\": ").unwrap();
        let err = TransformOptions::from_file(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().starts_with("invalid config"));

        let good = dir.path().join("sx.json");
        fs::write(&good, r#"{ "styleAttribute": "css" }"#).unwrap();
        let options = TransformOptions::from_file(&good).unwrap();
        assert_eq!(options.style_attribute, "css");
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(TransformOptions::from_json(r#"{ "bareLiteralPolicy": "drop" }"#).is_err());
    }
}
