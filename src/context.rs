//! Per-run state shared by the parser, the command builder and the driver.
//!
//! Every warning and error of a run is recorded here. The driver prints them
//! as they arrive; the final summary and the process exit status are derived
//! from the counts.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::eagle::layers::{self, LayerMap};

/// Severity of a recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Reported, and the run goes on unchanged.
    Warning,
    /// Something the run needed is missing; later steps still run.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A warning or error recorded during a run.
///
/// Displays as the line the driver prints, `*** Warning: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Whether this counts as a warning or an error.
    pub severity: Severity,
    /// Message without the `*** Warning: ` prefix.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*** {}: {}", self.severity, self.message)
    }
}

/// Warning and error totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    /// Warnings recorded so far.
    pub warnings: usize,
    /// Errors recorded so far.
    pub errors: usize,
}

impl Counts {
    /// Returns `true` if nothing was reported.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.warnings == 0 && self.errors == 0
    }
}

/// State of one run.
#[derive(Debug, Default)]
pub struct RunContext {
    counts: Counts,
    diagnostics: Vec<Diagnostic>,
    layer_maps: HashMap<PathBuf, LayerMap>,
}

impl RunContext {
    /// Creates an empty run context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(severity = %Severity::Warning, "{message}");
        self.counts.warnings += 1;
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    /// Records an error.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(severity = %Severity::Error, "{message}");
        self.counts.errors += 1;
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            message,
        });
    }

    /// Returns the warning and error totals so far.
    #[must_use]
    pub const fn counts(&self) -> Counts {
        self.counts
    }

    /// Returns every diagnostic recorded so far, oldest first.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the layer map of a board file, loading it on first use.
    ///
    /// A board that cannot be read records one error and is remembered as
    /// having no layers.
    pub fn board_layers(&mut self, board: &Path) -> &LayerMap {
        if !self.layer_maps.contains_key(board) {
            let map = match layers::load_layer_map(board) {
                Ok(map) => {
                    tracing::debug!(board = %board.display(), count = map.len(), "Loaded board layers");
                    map
                }
                Err(e) => {
                    self.error(format!(
                        "Unable to open the board file \"{}\": {e}",
                        board.display()
                    ));
                    LayerMap::new()
                }
            };
            self.layer_maps.insert(board.to_path_buf(), map);
        }
        &self.layer_maps[board]
    }

    /// Inserts a layer map for `board` without reading the file.
    pub fn set_board_layers(&mut self, board: impl Into<PathBuf>, map: LayerMap) {
        self.layer_maps.insert(board.into(), map);
    }
}
