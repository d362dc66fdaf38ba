//! CAM job parser.
//!
//! Fields inside a section carry no delimiters, so they are read in the
//! fixed order the EAGLE CAM processor writes them.

use super::cursor::LineCursor;
use super::error::{CamError, CamResult};
use super::field::{FieldValue, Localized};
use super::matchers;

/// Header tag on the first line of every CAM job file.
pub const JOB_HEADER: &str = "CAM Processor Job";

/// A parsed CAM job.
#[derive(Debug, Default)]
pub struct ParsedJob {
    /// Job description, by language code.
    pub description: Localized,
    /// Section names declared by `Section=` lines.
    pub declared: Vec<String>,
    /// Sections parsed completely, in file order.
    pub sections: Vec<Section>,
    /// Why section parsing ended before the end of the file, if it did.
    pub stopped: Option<CamError>,
}

impl ParsedJob {
    /// Looks up a parsed section by its tag.
    #[must_use]
    pub fn section(&self, tag: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.tag == tag)
    }
}

/// One output of a CAM job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The bracketed tag that opened the section.
    pub tag: String,
    /// Tab name shown in the CAM processor.
    pub name: Option<FieldValue>,
    /// Message EAGLE shows before processing the section.
    pub prompt: Option<FieldValue>,
    /// Output device, such as `GERBER_RS274X` or `EXCELLON`.
    pub device: FieldValue,
    /// Aperture wheel file.
    pub wheel: Option<FieldValue>,
    /// Drill rack file.
    pub rack: Option<FieldValue>,
    /// Output scale factor.
    pub scale: Option<FieldValue>,
    /// Output filename template, see [`crate::eagle::naming`].
    pub output: FieldValue,
    /// Seven space-separated plot flag digits.
    pub flags: FieldValue,
    /// Aperture emulation switch.
    pub emulate: FieldValue,
    /// X and Y offsets with units, such as `0.0mil 0.0mil`.
    pub offset: FieldValue,
    /// Schematic sheet number.
    pub sheet: Option<FieldValue>,
    /// Aperture and drill tolerances.
    pub tolerance: Option<FieldValue>,
    /// Pen diameter for plotter devices.
    pub pen: Option<FieldValue>,
    /// Page size for plotter devices.
    pub page: Option<FieldValue>,
    /// Layer numbers, space-separated with a leading space.
    pub layers: FieldValue,
    /// Pen colour per layer.
    pub colors: Option<FieldValue>,
}

impl Section {
    /// Name used in diagnostics.
    ///
    /// Prefers the English name, then any name, then the section tag.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_ref()
            .map(FieldValue::text)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.tag.as_str())
    }
}

/// Parses the text of a CAM job file.
///
/// # Errors
///
/// Returns an error if the text is empty, does not start with the
/// `[CAM Processor Job]` header, or declares no sections. Problems inside
/// the section blocks do not fail the parse; they end it early and are
/// reported through [`ParsedJob::stopped`].
pub fn parse_job(text: &str) -> CamResult<ParsedJob> {
    let mut cursor = LineCursor::new(text);
    if cursor.is_empty() {
        return Err(CamError::Empty);
    }

    let header = cursor.peek().unwrap_or_default();
    if cursor.take(matchers::bracketed) != Some(JOB_HEADER) {
        return Err(CamError::NotACamJob {
            found: header.to_string(),
        });
    }

    let description = matchers::repeated_localized(&mut cursor, "Description");

    let mut declared = Vec::new();
    while let Some(name) = cursor.take(|line| matchers::key_equals_value(line, "Section")) {
        declared.push(name.to_string());
    }
    if declared.is_empty() {
        return Err(CamError::NoSections);
    }
    tracing::debug!(sections = ?declared, "CAM job header parsed");

    let mut job = ParsedJob {
        description,
        declared,
        sections: Vec::new(),
        stopped: None,
    };

    while !cursor.at_end() {
        if !cursor.at_blank() {
            break;
        }
        cursor.advance();
        if cursor.only_blank_remaining() {
            break;
        }

        let line = cursor.peek().unwrap_or_default();
        let tag = match cursor.take(matchers::bracketed) {
            Some(tag) if job.declared.iter().any(|d| d == tag) => tag,
            _ => {
                job.stopped = Some(CamError::UnknownSection {
                    tag: line.to_string(),
                });
                break;
            }
        };

        match parse_section(&mut cursor, tag) {
            Ok(section) => {
                tracing::debug!(tag, line = cursor.line_number(), "Parsed CAM section");
                job.sections.push(section);
            }
            Err(e) => {
                job.stopped = Some(e);
                break;
            }
        }
    }

    Ok(job)
}

/// Parses the fields of one section, after its tag.
fn parse_section(cursor: &mut LineCursor<'_>, tag: &str) -> CamResult<Section> {
    let name = optional_field(cursor, "Name");
    let prompt = optional_field(cursor, "Prompt");
    let device = required(cursor, tag, "Device")?;
    let wheel = optional_field(cursor, "Wheel");
    let rack = optional_field(cursor, "Rack");
    let scale = optional_field(cursor, "Scale");
    let output = required(cursor, tag, "Output")?;
    let flags = required(cursor, tag, "Flags")?;
    let emulate = required(cursor, tag, "Emulate")?;
    let offset = required(cursor, tag, "Offset")?;
    let sheet = optional_field(cursor, "Sheet");
    let tolerance = optional_field(cursor, "Tolerance");
    let pen = optional_field(cursor, "Pen");
    let page = optional_field(cursor, "Page");
    let layers = required(cursor, tag, "Layers")?;
    let colors = optional_field(cursor, "Colors");

    Ok(Section {
        tag: tag.to_string(),
        name,
        prompt,
        device,
        wheel,
        rack,
        scale,
        output,
        flags,
        emulate,
        offset,
        sheet,
        tolerance,
        pen,
        page,
        layers,
        colors,
    })
}

fn optional_field(cursor: &mut LineCursor<'_>, key: &str) -> Option<FieldValue> {
    matchers::field(cursor, key).filter(|v| !v.is_empty())
}

fn required(cursor: &mut LineCursor<'_>, tag: &str, key: &'static str) -> CamResult<FieldValue> {
    optional_field(cursor, key).ok_or_else(|| CamError::missing_field(tag, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRILL: &str = "\
[CAM Processor Job]
Description[en]=\"Drill data\"
Section=Sec1

[Sec1]
Name[en]=\"Drill File\"
Prompt=\"\"
Device=\"EXCELLON\"
Wheel=\".whl\"
Rack=\"\"
Scale=1
Output=\"%N.drd\"
Flags=\"0 0 0 1 0 1 1\"
Emulate=\"0\"
Offset=\"0.0mil 0.0mil\"
Sheet=1
Tolerance=\"0 0 0 0 0 0\"
Pen=\"0.0mil\"
Page=\"12000.0mil 8000.0mil\"
Layers=\" 44 45\"
Colors=\" 1 1 1 1\"
";

    #[test]
    fn parse_single_section() {
        let job = parse_job(DRILL).unwrap();
        assert_eq!(job.description["en"], "Drill data");
        assert_eq!(job.declared, vec!["Sec1"]);
        assert!(job.stopped.is_none());
        assert_eq!(job.sections.len(), 1);

        let section = &job.sections[0];
        assert_eq!(section.tag, "Sec1");
        assert_eq!(section.display_name(), "Drill File");
        assert_eq!(section.prompt, None);
        assert_eq!(section.rack, None);
        assert_eq!(section.device.text(), "EXCELLON");
        assert_eq!(section.wheel.as_ref().map(FieldValue::text), Some(".whl"));
        assert_eq!(section.layers.text(), " 44 45");
        assert_eq!(section.colors.as_ref().map(FieldValue::text), Some(" 1 1 1 1"));
    }

    #[test]
    fn wrong_header() {
        let err = parse_job("[Something Else]\nSection=Sec1\n").unwrap_err();
        assert!(matches!(err, CamError::NotACamJob { found } if found == "[Something Else]"));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(parse_job(""), Err(CamError::Empty)));
    }

    #[test]
    fn no_declared_sections() {
        let err = parse_job("[CAM Processor Job]\nDescription[en]=\"x\"\n\n[Sec1]\n").unwrap_err();
        assert!(matches!(err, CamError::NoSections));
    }

    #[test]
    fn missing_required_field_stops_parsing() {
        let text = DRILL.replace("Device=\"EXCELLON\"\n", "");
        let job = parse_job(&text).unwrap();
        assert!(job.sections.is_empty());
        assert!(matches!(
            job.stopped,
            Some(CamError::MissingField { ref section, field: "Device" }) if section == "Sec1"
        ));
    }

    #[test]
    fn empty_required_field_is_missing() {
        let text = DRILL.replace("Layers=\" 44 45\"", "Layers=");
        let job = parse_job(&text).unwrap();
        assert!(job.sections.is_empty());
        assert!(matches!(
            job.stopped,
            Some(CamError::MissingField { field: "Layers", .. })
        ));
    }

    #[test]
    fn undeclared_tag_stops_with_warning() {
        let text = DRILL.replace("[Sec1]", "[Sec9]");
        let job = parse_job(&text).unwrap();
        assert!(job.sections.is_empty());
        let stopped = job.stopped.unwrap();
        assert!(stopped.is_warning());
    }

    #[test]
    fn trailing_blank_lines_are_ignored() {
        let text = format!("{DRILL}\n\n");
        let job = parse_job(&text).unwrap();
        assert_eq!(job.sections.len(), 1);
        assert!(job.stopped.is_none());
    }

    #[test]
    fn display_name_falls_back_to_tag() {
        let text = DRILL.replace("Name[en]=\"Drill File\"\n", "");
        let job = parse_job(&text).unwrap();
        assert_eq!(job.sections[0].display_name(), "Sec1");
    }
}
