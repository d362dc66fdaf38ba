//! Output file name placeholders.
//!
//! CAM output and wheel names may contain placeholders that EAGLE expands
//! from the board file path:
//!
//! - `%N` - board file name without extension
//! - `%E` - board file extension without the dot
//! - `%P` - directory of the board file
//! - `%H` - user home directory
//! - `%%` - a literal `%`

use std::path::{Path, PathBuf};

/// Replacement values for the name placeholders of one board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    /// `%N`: board file name without directory or extension.
    pub name: String,
    /// `%E`: board file extension without the dot.
    pub extension: String,
    /// `%P`: directory of the board file.
    pub directory: String,
    /// `%H`: the user's home directory.
    pub home: String,
}

impl Substitutions {
    /// Derives substitutions from a board path and the user's home directory.
    #[must_use]
    pub fn from_board(board: &Path) -> Self {
        Self::with_home(board, dirs::home_dir().unwrap_or_default())
    }

    /// Derives substitutions from a board path and an explicit home directory.
    #[must_use]
    pub fn with_home(board: &Path, home: impl Into<PathBuf>) -> Self {
        let lossy = |s: Option<&std::ffi::OsStr>| s.map(|s| s.to_string_lossy().into_owned());
        Self {
            name: lossy(board.file_stem()).unwrap_or_default(),
            extension: lossy(board.extension()).unwrap_or_default(),
            directory: board
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            home: home.into().to_string_lossy().into_owned(),
        }
    }

    /// Expands the placeholders of `template` in a single pass.
    ///
    /// Replacement text is never rescanned, and unknown `%` sequences are
    /// kept as written.
    #[must_use]
    pub fn expand(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                result.push(c);
                continue;
            }
            let replacement = match chars.peek() {
                Some('N') => self.name.as_str(),
                Some('E') => self.extension.as_str(),
                Some('P') => self.directory.as_str(),
                Some('H') => self.home.as_str(),
                Some('%') => "%",
                _ => {
                    result.push('%');
                    continue;
                }
            };
            result.push_str(replacement);
            chars.next();
        }
        result
    }
}

/// Expands the placeholders of an output name template for `board`.
///
/// The template is returned unchanged when the board path is empty.
#[must_use]
pub fn output_name(template: &str, board: &Path) -> String {
    if board.as_os_str().is_empty() {
        return template.to_string();
    }
    Substitutions::from_board(board).expand(template)
}
