//! `eaglecon` command lines for CAM sections.
//!
//! One command renders one section:
//!
//! ```text
//! "<eaglecon>"<flags> -X -d"<device>" -o"<output>"[ -W"<wheel>"][ -x<x>][ -y<y>] "<board>" <layers>
//! ```

use std::fmt;
use std::path::Path;

use crate::cam::{FieldValue, Section};
use crate::context::RunContext;

use super::flags::flag_options;
use super::layers::valid_layers;
use super::naming::output_name;
use super::offset::{offset_options, parse_offset};

/// An `eaglecon` invocation, before it is rendered to a command line.
#[derive(Debug, Clone, PartialEq)]
pub struct EagleCommand {
    /// Path of the `eaglecon` executable.
    pub eagle: String,
    /// Plot flag options, each with a leading space.
    pub flags: String,
    /// CAM output device, e.g. `GERBER_RS274X`.
    pub device: String,
    /// Expanded output file name.
    pub output: String,
    /// Expanded aperture wheel file name.
    pub wheel: Option<String>,
    /// Offset in inches.
    pub offset: (f64, f64),
    /// Path of the board file.
    pub board: String,
    /// Board layers to plot, with a leading space.
    pub layers: String,
}

impl EagleCommand {
    /// Builds the command for `section`.
    ///
    /// Layers that the board does not declare are dropped with a warning.
    pub fn for_section(
        section: &Section,
        board: &Path,
        eagle: &Path,
        ctx: &mut RunContext,
    ) -> Self {
        let wheel = section
            .wheel
            .as_ref()
            .map(|w| output_name(w.text(), board))
            .filter(|w| !w.is_empty());

        Self {
            eagle: eagle.display().to_string(),
            flags: flag_options(section.flags.text()),
            device: section.device.text().to_string(),
            output: output_name(section.output.text(), board),
            wheel,
            offset: parse_offset(section.offset.text()),
            board: board.display().to_string(),
            layers: valid_layers(
                section.layers.text(),
                board,
                section.display_name(),
                ctx,
            ),
        }
    }

    /// Offset options, each with a leading space; zero offsets are omitted.
    #[must_use]
    pub fn offset_options(&self) -> String {
        offset_options(self.offset)
    }
}

impl fmt::Display for EagleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\"{} -X -d\"{}\" -o\"{}\"",
            self.eagle, self.flags, self.device, self.output
        )?;
        if let Some(wheel) = &self.wheel {
            write!(f, " -W\"{wheel}\"")?;
        }
        write!(f, "{} \"{}\" {}", self.offset_options(), self.board, self.layers)
    }
}

/// Builds the command line for `section`.
pub fn command_line(
    section: &Section,
    board: &Path,
    eagle: &Path,
    ctx: &mut RunContext,
) -> String {
    EagleCommand::for_section(section, board, eagle, ctx).to_string()
}

/// Returns `true` if `device` is one of `supported`.
#[must_use]
pub fn is_supported_device<S: AsRef<str>>(device: &FieldValue, supported: &[S]) -> bool {
    supported.iter().any(|d| d.as_ref() == device.text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cam::parse_job;
    use crate::eagle::layers::LayerMap;

    const JOB: &str = "\
[CAM Processor Job]
Section=Sec1

[Sec1]
Name[en]=\"Component side\"
Device=\"GERBER_RS274X\"
Wheel=\"\"
Output=\"%N.cmp\"
Flags=\"1 0 0 1 0 1 1\"
Emulate=\"0\"
Offset=\"100mil 0mil\"
Layers=\" 1 17 99\"
";

    fn context() -> RunContext {
        let mut ctx = RunContext::new();
        let mut map = LayerMap::new();
        map.insert("1".to_string(), "Top".to_string());
        map.insert("17".to_string(), "Pads".to_string());
        ctx.set_board_layers("/boards/acme.brd", map);
        ctx
    }

    #[test]
    fn build_gerber_command() {
        let job = parse_job(JOB).unwrap();
        let mut ctx = context();
        let line = command_line(
            &job.sections[0],
            Path::new("/boards/acme.brd"),
            Path::new("/opt/eagle/eaglecon"),
            &mut ctx,
        );
        assert_eq!(
            line,
            r#""/opt/eagle/eaglecon" -m+ -X -d"GERBER_RS274X" -o"acme.cmp" -x0.1 "/boards/acme.brd"  1 17"#
        );
        assert_eq!(ctx.counts().warnings, 1);
    }

    #[test]
    fn wheel_option() {
        let text = JOB.replace("Wheel=\"\"", "Wheel=\"%N.whl\"");
        let job = parse_job(&text).unwrap();
        let mut ctx = context();
        let command = EagleCommand::for_section(
            &job.sections[0],
            Path::new("/boards/acme.brd"),
            Path::new("eaglecon"),
            &mut ctx,
        );
        assert_eq!(command.wheel.as_deref(), Some("acme.whl"));
        assert!(command
            .to_string()
            .contains(r#" -o"acme.cmp" -W"acme.whl" -x0.1 "#));
    }

    #[test]
    fn supported_devices() {
        let supported = ["EXCELLON", "GERBER_RS274X"];
        assert!(is_supported_device(&FieldValue::from("EXCELLON"), &supported));
        assert!(!is_supported_device(&FieldValue::from("PS"), &supported));
    }
}
