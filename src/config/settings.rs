//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;

use super::ConfigError;
use crate::eagle::SUPPORTED_DEVICES;

/// Root configuration structure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Board file used when `--board` is not given.
    #[serde(default)]
    pub board_path: Option<PathBuf>,

    /// `eaglecon` executable used when `--eagle` is not given.
    #[serde(default)]
    pub eagle_path: Option<PathBuf>,

    /// CAM devices that do not trigger an unsupported-device warning.
    #[serde(default = "default_supported_devices")]
    pub supported_devices: Vec<String>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_path: None,
            eagle_path: None,
            supported_devices: default_supported_devices(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming `supported_devices` if the list
    /// is empty, has a blank entry, or repeats a device.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const KEY: &str = "supported_devices";

        if self.supported_devices.is_empty() {
            return Err(ConfigError::invalid(KEY, "must list at least one device"));
        }

        let mut seen = HashSet::new();
        for (index, device) in self.supported_devices.iter().enumerate() {
            if device.trim().is_empty() {
                return Err(ConfigError::invalid(
                    KEY,
                    format!("entry {index} is an empty device name"),
                ));
            }
            if !seen.insert(device.as_str()) {
                return Err(ConfigError::invalid(
                    KEY,
                    format!("device \"{device}\" is listed more than once"),
                ));
            }
        }
        Ok(())
    }
}

fn default_supported_devices() -> Vec<String> {
    SUPPORTED_DEVICES.iter().map(ToString::to_string).collect()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.supported_devices, SUPPORTED_DEVICES);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "board_path": "boards/schema.brd",
            "eagle_path": "/opt/eagle/eaglecon",
            "supported_devices": ["EXCELLON", "GERBER_RS274X", "PS"],
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.board_path, Some(PathBuf::from("boards/schema.brd")));
        assert_eq!(config.eagle_path, Some(PathBuf::from("/opt/eagle/eaglecon")));
        assert_eq!(config.supported_devices.len(), 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn default_matches_empty_file() {
        let config = Config::default();
        assert!(config.board_path.is_none());
        assert_eq!(config.supported_devices, SUPPORTED_DEVICES);
    }

    fn validation_message(json: &str) -> String {
        let config: Config = serde_json::from_str(json).unwrap();
        match config.validate() {
            Err(ConfigError::Invalid { key, message }) => {
                assert_eq!(key, "supported_devices");
                message
            }
            other => panic!("expected an invalid supported_devices, got {other:?}"),
        }
    }

    #[test]
    fn reject_empty_device_list() {
        let message = validation_message(r#"{"supported_devices": []}"#);
        assert_eq!(message, "must list at least one device");
    }

    #[test]
    fn reject_blank_device_name() {
        let message = validation_message(r#"{"supported_devices": ["EXCELLON", " "]}"#);
        assert_eq!(message, "entry 1 is an empty device name");
    }

    #[test]
    fn reject_duplicate_device() {
        let message = validation_message(r#"{"supported_devices": ["EXCELLON", "EXCELLON"]}"#);
        assert!(message.contains("\"EXCELLON\" is listed more than once"));
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
