//! Configuration file loading and parsing.
//!
//! The configuration file is optional. It is searched in the following order:
//!
//! 1. Path specified via `--config` CLI flag (must exist)
//! 2. Default location, used only if present:
//!    - **Linux/macOS:** `~/.cam2gerber/config.json`
//!    - **Windows:** `%USERPROFILE%\.cam2gerber\config.json`
//!
//! # Example Configuration
//!
//! ```json
//! {
//!     "board_path": "boards/schema.brd",
//!     "eagle_path": "/opt/eagle-6.5.0/bin/eagle",
//!     "supported_devices": ["EXCELLON", "GERBER_RS274X"],
//!     "logging": { "level": "info" }
//! }
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{Config, LoggingConfig};

use std::path::{Path, PathBuf};

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.cam2gerber/`
/// - **Windows:** `%USERPROFILE%\.cam2gerber\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".cam2gerber"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads and parses the configuration file.
///
/// If `path` is `None`, uses the platform-specific default location, and
/// falls back to built-in defaults when no file is there.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given configuration file cannot be found
/// - The file cannot be read
/// - The JSON is malformed
/// - Fields are invalid
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound {
                    path: p.to_path_buf(),
                });
            }
            p.to_path_buf()
        }
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    tracing::debug!(path = %config_path.display(), "Loading configuration");

    let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Read {
        path: config_path.clone(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: config_path.clone(),
        source: e,
    })?;

    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn default_config_path_exists() {
        let path = default_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("config.json"));
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let path = Path::new("/nonexistent/cam2gerber.json");
        let err = load_config(Some(path)).unwrap_err();
        assert!(matches!(&err, ConfigError::NotFound { path: p } if p == path));
        assert!(err.to_string().contains("--config"));
    }

    #[test]
    fn load_explicit_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"eagle_path": "/opt/eagle/eaglecon"}}"#).unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.eagle_path, Some(PathBuf::from("/opt/eagle/eaglecon")));
    }

    #[test]
    fn malformed_config_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"$schema": "cam2gerber.schema.json"}}"#).unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn invalid_devices_rejected_on_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"supported_devices": ["EXCELLON", ""]}}"#).unwrap();
        let result = load_config(Some(file.path()));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "supported_devices", .. })
        ));
    }
}
