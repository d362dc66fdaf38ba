//! CAM plot flags.
//!
//! The `Flags` field of a CAM section holds seven space-separated digits, one
//! per CAM processor option:
//!
//! | Position | Option | Meaning                    | Default |
//! |----------|--------|----------------------------|---------|
//! | 1        | `-m`   | Mirror output              | off     |
//! | 2        | `-r`   | Rotate output 90 degrees   | off     |
//! | 3        | `-u`   | Rotate output 180 degrees  | off     |
//! | 4        | `-c`   | Positive coordinates       | on      |
//! | 5        | `-q`   | Quick plot                 | off     |
//! | 6        | `-O`   | Optimize pen movement      | on      |
//! | 7        | `-f`   | Fill pads                  | on      |
//!
//! Only options that differ from their default are passed to `eaglecon`.

use bitflags::bitflags;

bitflags! {
    /// CAM processor plot options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlotFlags: u8 {
        const MIRROR = 1 << 0;
        const ROTATE = 1 << 1;
        const UPSIDE_DOWN = 1 << 2;
        const POSITIVE_COORDINATES = 1 << 3;
        const QUICK_PLOT = 1 << 4;
        const OPTIMIZE = 1 << 5;
        const FILL_PADS = 1 << 6;
    }
}

/// Options in `Flags` field order, with their `eaglecon` letters.
const OPTIONS: [(PlotFlags, char); 7] = [
    (PlotFlags::MIRROR, 'm'),
    (PlotFlags::ROTATE, 'r'),
    (PlotFlags::UPSIDE_DOWN, 'u'),
    (PlotFlags::POSITIVE_COORDINATES, 'c'),
    (PlotFlags::QUICK_PLOT, 'q'),
    (PlotFlags::OPTIMIZE, 'O'),
    (PlotFlags::FILL_PADS, 'f'),
];

impl Default for PlotFlags {
    fn default() -> Self {
        Self::POSITIVE_COORDINATES | Self::OPTIMIZE | Self::FILL_PADS
    }
}

impl PlotFlags {
    /// Parses a `Flags` field value such as `"0 0 0 1 0 1 1"`.
    ///
    /// A `1` turns an option on and any other digit turns it off. Missing
    /// trailing positions keep their default; extra positions are ignored.
    #[must_use]
    pub fn from_cam(value: &str) -> Self {
        let mut flags = Self::default();
        for ((flag, _), digit) in OPTIONS.iter().zip(value.split_whitespace()) {
            flags.set(*flag, digit == "1");
        }
        flags
    }

    /// Returns the `eaglecon` options for every flag that differs from the
    /// default, each preceded by a space.
    #[must_use]
    pub fn to_options(self) -> String {
        let defaults = Self::default();
        OPTIONS
            .iter()
            .filter(|(flag, _)| self.contains(*flag) != defaults.contains(*flag))
            .map(|(flag, letter)| {
                let sign = if self.contains(*flag) { '+' } else { '-' };
                format!(" -{letter}{sign}")
            })
            .collect()
    }
}

/// Converts a `Flags` field value to `eaglecon` options.
#[must_use]
pub fn flag_options(value: &str) -> String {
    PlotFlags::from_cam(value).to_options()
}
