//! # Configuration
//!
//! Optional YAML file. Lookup order: `--config`, then `$BELLE_CONFIG`, then
//! built-in defaults. An explicitly named file that does not exist is an
//! error; no file at all is not.
//!
//! ```yaml
//! tax:
//!   tps_rate_percent: 5.0
//!   tvq_rate_percent: 9.975
//! logging:
//!   json: false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use belle_core::{BelleError, TaxRateConfig};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "BELLE_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BelleConfig {
    /// Tax rates used by the receipt commands.
    pub tax: TaxRateConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable ones.
    pub json: bool,
}

impl BelleConfig {
    /// Load from `explicit`, else from `$BELLE_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, BelleError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, BelleError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BelleError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
            .map_err(|e| BelleError::Config(format!("{}: {e}", path.display())))
    }

    /// Parse and validate YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, BelleError> {
        // An empty file deserializes as YAML null.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| BelleError::Config(e.to_string()))?;
        config.tax.validate()?;
        Ok(config)
    }
}
