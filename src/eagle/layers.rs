//! Board layer declarations.
//!
//! An EAGLE board file declares its layers as
//!
//! ```text
//! <layer number="1" name="Top" color="4" fill="1" visible="yes" active="yes"/>
//! ```
//!
//! Only lines of that shape are read; the rest of the file is ignored and
//! never parsed as XML.

use std::io;
use std::path::Path;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::context::RunContext;

/// Layer number → layer name, in declaration order.
pub type LayerMap = IndexMap<String, String>;

fn layer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^\s*<layer number="([0-9]+)" name="([^"]+)""#)
            .expect("layer pattern is a valid regex")
    })
}

/// Scans board file text for layer declarations.
#[must_use]
pub fn parse_layer_map(text: &str) -> LayerMap {
    let pattern = layer_pattern();
    text.lines()
        .filter_map(|line| pattern.captures(line))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Reads a board file and scans it for layer declarations.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_layer_map(board: &Path) -> io::Result<LayerMap> {
    let bytes = std::fs::read(board)?;
    Ok(parse_layer_map(&String::from_utf8_lossy(&bytes)))
}

/// Keeps the requested layers that the board declares.
///
/// `requested` is a whitespace-separated list of layer numbers or names. A
/// layer is kept if it matches either a number or a name in `map`; every
/// other layer records a warning naming `section_name`.
///
/// The result starts with a space and joins the kept layers with spaces, the
/// form `eaglecon` expects after the board path.
pub fn filter_layers(
    requested: &str,
    map: &LayerMap,
    section_name: &str,
    ctx: &mut RunContext,
) -> String {
    let mut valid = Vec::new();
    for layer in requested.split_whitespace() {
        if map.contains_key(layer) || map.values().any(|name| name == layer) {
            valid.push(layer);
        } else {
            ctx.warning(format!(
                "Eagle layer {layer} in the CAM tab named '{section_name}' is not a layer listed in the board file."
            ));
        }
    }
    format!(" {}", valid.join(" "))
}

/// Looks up the board's layers through the run context, then filters.
pub fn valid_layers(
    requested: &str,
    board: &Path,
    section_name: &str,
    ctx: &mut RunContext,
) -> String {
    let map = ctx.board_layers(board).clone();
    filter_layers(requested, &map, section_name, ctx)
}
