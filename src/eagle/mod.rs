//! `eaglecon` command construction.
//!
//! EAGLE's command line CAM processor renders one output file per call. This
//! module translates a parsed CAM section into that call:
//!
//! - [`naming`] - output and wheel file name placeholders
//! - [`layers`] - board layer declarations and layer filtering
//! - [`flags`] - plot flag options
//! - [`offset`] - output offsets in inches
//! - [`command`] - the complete command line

pub mod command;
pub mod flags;
pub mod layers;
pub mod naming;
pub mod offset;

pub use command::{command_line, is_supported_device, EagleCommand};
pub use flags::PlotFlags;
pub use layers::LayerMap;

/// Output devices that produce a complete command line.
pub const SUPPORTED_DEVICES: [&str; 3] = ["EXCELLON", "GERBER_RS274X", "GERBER_RS274X_25"];

/// Default `eaglecon` path of an EAGLE 6.5.0 installation on Windows.
pub const DEFAULT_EAGLE_PATH: &str = r"C:\Program Files (x86)\EAGLE-6.5.0\bin\eaglecon.exe";

/// Default board file path.
pub const DEFAULT_BOARD_PATH: &str = "./schema.brd";
