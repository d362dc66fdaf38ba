//! EAGLE CAM job file handling.
//!
//! A CAM job (`.cam`) describes the manufacturing outputs of a board: one
//! section per Gerber or Excellon file. The format is line oriented:
//!
//! ```text
//! [CAM Processor Job]
//! Description[en]="Gerber data for 2 layer boards"
//! Section=Sec1
//! Section=Sec2
//!
//! [Sec1]
//! Name[en]="Component side"
//! Device="GERBER_RS274X"
//! Output="%N.cmp"
//! Flags="0 0 0 1 0 1 1"
//! Emulate="0"
//! Offset="0.0mil 0.0mil"
//! Layers=" 1 17 18"
//! ...
//! ```
//!
//! Each section block follows a blank line and lists its fields in a fixed
//! order; see [`parser`] for the required and optional fields.

pub mod cursor;
pub mod error;
pub mod field;
pub mod matchers;
pub mod parser;

pub use cursor::LineCursor;
pub use error::{CamError, CamResult};
pub use field::{FieldValue, Localized};
pub use parser::{parse_job, ParsedJob, Section, JOB_HEADER};

use std::path::Path;

/// Reads and parses a CAM job file.
///
/// The file is decoded as UTF-8, falling back to Windows-1252 (EAGLE on
/// Windows writes CAM files in the system code page).
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to parse; see
/// [`parse_job`].
pub fn read_job(path: impl AsRef<Path>) -> CamResult<ParsedJob> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| CamError::file_read(path, e))?;
    parse_job(&decode(&bytes))
}

/// Decodes CAM file bytes.
#[must_use]
pub fn decode(bytes: &[u8]) -> String {
    std::str::from_utf8(bytes).map_or_else(
        |_| {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        },
        str::to_string,
    )
}
