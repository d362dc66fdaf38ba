//! Error types for CAM job parsing.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for CAM job operations.
pub type CamResult<T> = Result<T, CamError>;

/// Errors that can occur while reading or parsing a CAM job file.
#[derive(Debug, Error)]
pub enum CamError {
    /// Failed to open or read the file.
    #[error("Unable to open the CAM file path \"{path}\"")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file contained no lines.
    #[error("CAM file is empty")]
    Empty,

    /// The header line was not `[CAM Processor Job]`.
    #[error("File was not a CAM processor job (found {found:?})")]
    NotACamJob {
        /// The first line of the file.
        found: String,
    },

    /// No `Section=` declarations followed the header.
    #[error("No sections found in the CAM file")]
    NoSections,

    /// A section tag that was not declared in the header.
    #[error("Section not found: {tag:?} is not a declared section")]
    UnknownSection {
        /// The line found where a declared tag was expected.
        tag: String,
    },

    /// A required field was missing or empty.
    #[error("{field} not found in section [{section}]")]
    MissingField {
        /// Tag of the section being parsed.
        section: String,
        /// Name of the missing field.
        field: &'static str,
    },
}

impl CamError {
    /// Creates a file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(section: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            section: section.into(),
            field,
        }
    }

    /// Returns `true` for conditions reported as warnings rather than errors.
    ///
    /// An undeclared section tag ends section parsing but keeps everything
    /// parsed before it.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::UnknownSection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let err = CamError::missing_field("Drill", "Device");
        assert_eq!(err.to_string(), "Device not found in section [Drill]");
    }

    #[test]
    fn only_unknown_section_is_warning() {
        assert!(CamError::UnknownSection { tag: "x".into() }.is_warning());
        assert!(!CamError::NoSections.is_warning());
        assert!(!CamError::missing_field("a", "Layers").is_warning());
    }
}
