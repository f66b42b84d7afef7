//! Configuration management for chp-inspector
//!
//! Config stored at: ~/.config/chp-inspector/config.json

use chp_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use chp_domain::model::DEFAULT_CARRIER_NAME;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Carrier name used for new records
    #[serde(default = "default_carrier_name")]
    pub carrier_name: String,

    /// Prefix of generated file names
    #[serde(default = "default_form_code")]
    pub form_code: String,

    /// Emit fillable checkbox and text fields
    #[serde(default = "default_true")]
    pub interactive_fields: bool,

    /// Directory for generated documents (defaults to the working directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Fleet master file (.toml or .csv); built-in fleet when unset
    #[serde(default)]
    pub fleet_file: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_carrier_name() -> String {
    DEFAULT_CARRIER_NAME.to_string()
}

fn default_form_code() -> String {
    "CHP108A".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            carrier_name: default_carrier_name(),
            form_code: default_form_code(),
            interactive_fields: true,
            output_dir: None,
            fleet_file: None,
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`]
    pub const KEYS: [&'static str; 6] = [
        "carrier_name",
        "form_code",
        "interactive_fields",
        "output_dir",
        "fleet_file",
        "output_format",
    ];

    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("chp-inspector");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Directory generated documents are written to
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path, default when the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Update a single key from its string form. An empty value resets
    /// optional paths.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "carrier_name" => self.carrier_name = value.to_string(),
            "form_code" => {
                if value.trim().is_empty() {
                    return Err(ConfigError::ParseError("form_code cannot be empty".into()).into());
                }
                self.form_code = value.trim().to_string();
            }
            "interactive_fields" => {
                self.interactive_fields = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(ConfigError::ParseError(format!(
                            "interactive_fields expects true/false, got '{}'",
                            other
                        ))
                        .into())
                    }
                }
            }
            "output_dir" => self.output_dir = optional_path(value),
            "fleet_file" => self.fleet_file = optional_path(value),
            "output_format" => {
                self.output_format = match value.trim().to_ascii_lowercase().as_str() {
                    "table" => OutputFormat::Table,
                    "json" => OutputFormat::Json,
                    other => {
                        return Err(ConfigError::ParseError(format!(
                            "output_format expects table or json, got '{}'",
                            other
                        ))
                        .into())
                    }
                }
            }
            other => return Err(ConfigError::UnknownKey(other.to_string()).into()),
        }
        Ok(())
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    (!value.is_empty()).then(|| PathBuf::from(value))
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CHP 108A Inspector Configuration")?;
        writeln!(f, "================================")?;
        writeln!(f)?;
        writeln!(f, "Carrier name:       {}", self.carrier_name)?;
        writeln!(f, "Form code:          {}", self.form_code)?;
        writeln!(f, "Interactive fields: {}", self.interactive_fields)?;
        writeln!(f, "Output dir:         {}", self.output_dir().display())?;
        writeln!(
            f,
            "Fleet file:         {}",
            self.fleet_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        )?;
        writeln!(f, "Output format:      {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:        {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.form_code, "CHP108A");
        assert!(config.interactive_fields);
        assert_eq!(config.carrier_name, DEFAULT_CARRIER_NAME);
        assert_eq!(config.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"form_code": "CHP108"}"#).unwrap();
        assert_eq!(config.form_code, "CHP108");
        assert!(config.interactive_fields);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_set_keys() {
        let mut config = Config::default();
        config.set("interactive_fields", "off").unwrap();
        assert!(!config.interactive_fields);
        config.set("fleet_file", "fleet.toml").unwrap();
        assert_eq!(config.fleet_file, Some(PathBuf::from("fleet.toml")));
        config.set("fleet_file", "").unwrap();
        assert_eq!(config.fleet_file, None);
        config.set("output_format", "JSON").unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_values() {
        let mut config = Config::default();
        assert!(config.set("backend", "gemini").is_err());
        assert!(config.set("interactive_fields", "maybe").is_err());
        assert!(config.set("form_code", "  ").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let mut config = Config::default();
        config.carrier_name = "Golden State Coach".to_string();
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_corrupt_config_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
