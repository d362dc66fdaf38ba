//! CAM output offsets.
//!
//! The `Offset` field holds two lengths with units, such as
//! `"100mil 50mil"`. `eaglecon` takes offsets in inches.

use std::sync::OnceLock;

use regex::Regex;

/// A linear unit accepted in CAM offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Mil,
    Millimetre,
    Centimetre,
    Inch,
}

impl Unit {
    /// Parses a unit suffix.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "mil" => Some(Self::Mil),
            "mm" => Some(Self::Millimetre),
            "cm" => Some(Self::Centimetre),
            "inch" => Some(Self::Inch),
            _ => None,
        }
    }

    /// Inches per unit.
    #[must_use]
    pub fn inches(self) -> f64 {
        match self {
            Self::Mil => 0.001,
            Self::Millimetre => 1.0 / 25.4,
            Self::Centimetre => 1.0 / 2.54,
            Self::Inch => 1.0,
        }
    }
}

fn offset_pattern() -> &'static Regex {
    const NUMBER: &str = r"[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?";
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"^({NUMBER})(\S+)\s({NUMBER})(\S+)$"))
            .expect("offset pattern is a valid regex")
    })
}

/// Converts one number and unit suffix to inches.
///
/// Unknown units convert to zero.
fn to_inches(number: &str, suffix: &str) -> f64 {
    let value: f64 = number.parse().unwrap_or(0.0);
    Unit::from_suffix(suffix).map_or(0.0, |unit| value * unit.inches())
}

/// Parses an `Offset` field value into `(x, y)` inches.
///
/// Returns `(0.0, 0.0)` if the value is not two lengths with units.
#[must_use]
pub fn parse_offset(value: &str) -> (f64, f64) {
    offset_pattern().captures(value).map_or((0.0, 0.0), |caps| {
        (to_inches(&caps[1], &caps[2]), to_inches(&caps[3], &caps[4]))
    })
}

/// Formats the `-x`/`-y` options for an offset; zero offsets are omitted.
#[must_use]
pub fn offset_options((x, y): (f64, f64)) -> String {
    let mut options = String::new();
    if x != 0.0 {
        options.push_str(&format!(" -x{x}"));
    }
    if y != 0.0 {
        options.push_str(&format!(" -y{y}"));
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn mils() {
        assert!(approx_eq(parse_offset("100mil 50mil"), (0.1, 0.05)));
    }

    #[test]
    fn inches() {
        assert!(approx_eq(parse_offset("1inch 0inch"), (1.0, 0.0)));
    }

    #[test]
    fn metric() {
        assert!(approx_eq(parse_offset("25.4mm 2.54cm"), (1.0, 1.0)));
    }

    #[test]
    fn signed_and_exponent() {
        assert!(approx_eq(parse_offset("-1.5e3mil +.5inch"), (-1.5, 0.5)));
    }

    #[test]
    fn unknown_unit_is_zero() {
        assert!(approx_eq(parse_offset("10pt 1inch"), (0.0, 1.0)));
    }

    #[test]
    fn malformed_offset_is_zero() {
        assert_eq!(parse_offset("100mil"), (0.0, 0.0));
        assert_eq!(parse_offset(""), (0.0, 0.0));
        assert_eq!(parse_offset("mil mil"), (0.0, 0.0));
    }

    #[test]
    fn zero_offsets_emit_nothing() {
        assert_eq!(offset_options((0.0, 0.0)), "");
        assert_eq!(offset_options((0.5, 0.0)), " -x0.5");
        assert_eq!(offset_options((0.0, -0.25)), " -y-0.25");
    }
}
