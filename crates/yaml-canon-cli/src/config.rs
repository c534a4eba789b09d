//! `.yaml-canon.toml` loading.
//!
//! ```toml
//! columns = 100
//! paranoid = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use yaml_canon::LintOptions;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".yaml-canon.toml";

/// Settings read from a config file. Unset fields fall back to
/// [`LintOptions::default`].
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub columns: Option<usize>,
    pub paranoid: Option<bool>,
}

impl ConfigFile {
    /// Read `explicit`, or the default file if it exists. An explicit path
    /// that cannot be read is an error; a missing default file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.is_file() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Combine with command-line overrides. Flags win over the file.
    pub fn into_options(self, columns: Option<usize>, no_paranoid: bool) -> LintOptions {
        let defaults = LintOptions::default();
        LintOptions {
            columns: columns.or(self.columns).unwrap_or(defaults.columns),
            paranoid: !no_paranoid && self.paranoid.unwrap_or(defaults.paranoid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let config = ConfigFile {
            columns: Some(100),
            paranoid: Some(true),
        };
        let options = config.into_options(Some(60), true);
        assert_eq!(options.columns, 60);
        assert!(!options.paranoid);
    }

    #[test]
    fn test_defaults_fill_gaps() {
        let options = ConfigFile::default().into_options(None, false);
        assert_eq!(options, LintOptions::default());
    }

    #[test]
    fn test_parse_toml() {
        let config: ConfigFile = toml::from_str("columns = 120\n").unwrap();
        assert_eq!(config.columns, Some(120));
        assert_eq!(config.paranoid, None);
        assert!(toml::from_str::<ConfigFile>("width = 3\n").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canon.toml");
        fs::write(&path, "paranoid = false\ncolumns = 40\n").unwrap();
        let config = ConfigFile::load(Some(&path)).unwrap();
        assert_eq!(
            config,
            ConfigFile {
                columns: Some(40),
                paranoid: Some(false),
            }
        );
        assert!(ConfigFile::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
