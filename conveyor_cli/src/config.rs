//! Layered CLI configuration.
//!
//! Sources, lowest to highest precedence:
//!
//! 1. Built-in defaults ([`CliConfig::default`])
//! 2. `conveyor.toml` in the working directory, or the file given with `--config`
//! 3. `CONVEYOR_*` environment variables (`__` separates nested keys)
//!
//! ```toml
//! log_level = "debug"
//! product = "slider_bed"
//! catalog_path = "catalog/nord.json"
//! vendor = "NORD"
//!
//! [parameters]
//! safety_factor = 2.0
//! ```
//!
//! `CONVEYOR_PARAMETERS__SAFETY_FACTOR=2.0` overrides the same key from the
//! environment.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use conveyor_core::bom::DEFAULT_VENDOR;
use conveyor_core::parameters::ParameterOverrides;
use conveyor_core::vocabulary::ProductKey;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "conveyor.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CONVEYOR_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Product family used when a command does not name one
    pub product: ProductKey,
    /// Vendor component catalog (JSON array of rows)
    pub catalog_path: Option<PathBuf>,
    /// Vendor queried during BOM resolution
    pub vendor: String,
    /// Caller parameter overrides applied to every calculation
    pub parameters: ParameterOverrides,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_level: "warn".to_string(),
            product: ProductKey::default(),
            catalog_path: None,
            vendor: DEFAULT_VENDOR.to_string(),
            parameters: ParameterOverrides::default(),
        }
    }
}

impl CliConfig {
    /// Load defaults, then the config file, then the environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Self::figment(&file)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("failed to load configuration from {}", file.display()))
    }

    /// Defaults and file only
    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(CliConfig::default())).merge(Toml::file(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn from_file_only(contents: &str) -> CliConfig {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        CliConfig::figment(file.path()).extract().unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.product, ProductKey::BeltConveyor);
        assert_eq!(config.vendor, "NORD");
        assert!(config.catalog_path.is_none());
        assert_eq!(config.parameters, ParameterOverrides::default());
    }

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config: CliConfig = CliConfig::figment(&dir.path().join("conveyor.toml")).extract().unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = from_file_only(
            r#"
            log_level = "debug"
            product = "slider_bed"
            catalog_path = "catalog/nord.json"

            [parameters]
            safety_factor = 2.0
            "#,
        );
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.product, ProductKey::SliderBed);
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog/nord.json")));
        assert_eq!(config.parameters.safety_factor, Some(2.0));
        assert_eq!(config.parameters.friction_coeff, None);
        assert_eq!(config.vendor, "NORD");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_bad_product_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"product = \"forklift\"").unwrap();
        assert!(CliConfig::figment(file.path()).extract::<CliConfig>().is_err());
    }
}
