//! TOML-based advisor configuration.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level advisor configuration parsed from TOML.
///
/// All fields have defaults matching the stock setup (REE public API, a
/// standard 7.4 kW AC charger). Load from TOML with
/// [`AdvisorConfig::from_toml_file`] or use [`AdvisorConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdvisorConfig {
    /// Upstream price-source parameters.
    pub source: SourceConfig,
    /// Charger and request defaults.
    pub charger: ChargerConfig,
}

/// Upstream price-source parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Base URL of the REE APIDATOS service.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://apidatos.ree.es/es/datos".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Charger and request defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChargerConfig {
    /// Charger power used to derive a duration from an energy amount (kW).
    pub power_kw: f32,
    /// Energy assumed when a request does not specify one (kWh).
    pub default_energy_kwh: f32,
}

impl Default for ChargerConfig {
    fn default() -> Self {
        Self {
            power_kw: 7.4,
            default_energy_kwh: 10.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"charger.power_kw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl AdvisorConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.source.base_url.is_empty() {
            errors.push(ConfigError {
                field: "source.base_url".into(),
                message: "must not be empty".into(),
            });
        }
        if self.source.timeout_secs == 0 {
            errors.push(ConfigError {
                field: "source.timeout_secs".into(),
                message: "must be > 0".into(),
            });
        }
        if self.charger.power_kw <= 0.0 {
            errors.push(ConfigError {
                field: "charger.power_kw".into(),
                message: "must be > 0".into(),
            });
        }
        if self.charger.default_energy_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "charger.default_energy_kwh".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}
