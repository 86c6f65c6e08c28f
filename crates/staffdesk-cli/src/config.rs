//! CLI configuration file (`staffdesk.toml`)
//!
//! ```toml
//! [registry]
//! max_depth = 16
//! strict_w4_totals = true
//!
//! [logging]
//! filter = "staffdesk=debug"
//! json = false
//! ```
//!
//! Every key is optional; a missing file is only an error when it was named
//! explicitly with `--config`.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use staffdesk_schema::RegistryConfig;
use std::path::Path;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "staffdesk.toml";

/// Top-level CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit one JSON object per event
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns error on malformed TOML or unknown keys
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("invalid staffdesk configuration")
    }

    /// Load `path`, or `staffdesk.toml` from the working directory if present
    ///
    /// # Errors
    /// Returns error if an explicit path is unreadable, or any file found is malformed
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::read(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config = Config::from_toml(
            r#"
            [registry]
            strict_w4_totals = true

            [logging]
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.registry.max_depth, 32);
        assert!(config.registry.strict_w4_totals);
        assert!(config.logging.json);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn unknown_table_is_rejected() {
        assert!(Config::from_toml("[server]\nport = 80\n").is_err());
    }
}
