//! Error types for configuration loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the JSON configuration file.
///
/// A missing file at the default location is not an error; only a path given
/// with `--config` has to exist.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file named by `--config` does not exist.
    #[error("Configuration file given with --config does not exist: \"{path}\"")]
    NotFound {
        /// Path given on the command line.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("Unable to read the configuration file \"{path}\"")]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid JSON or has unknown keys.
    #[error("Configuration file \"{path}\" is malformed: {source}")]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying JSON error, with line and column.
        #[source]
        source: serde_json::Error,
    },

    /// A key parsed but holds a value cam2gerber cannot use.
    #[error("Invalid \"{key}\" in the configuration file: {message}")]
    Invalid {
        /// The offending configuration key.
        key: &'static str,
        /// What is wrong with its value.
        message: String,
    },
}

impl ConfigError {
    /// Creates an [`Invalid`](Self::Invalid) error for `key`.
    pub fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_flag() {
        let error = ConfigError::NotFound {
            path: PathBuf::from("/etc/cam2gerber.json"),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file given with --config does not exist: \"/etc/cam2gerber.json\""
        );
    }

    #[test]
    fn invalid_names_the_key() {
        let error = ConfigError::invalid("supported_devices", "must list at least one device");
        assert!(matches!(
            error,
            ConfigError::Invalid { key: "supported_devices", .. }
        ));
        assert_eq!(
            error.to_string(),
            "Invalid \"supported_devices\" in the configuration file: must list at least one device"
        );
    }
}
