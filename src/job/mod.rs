//! Running a CAM job.
//!
//! The driver parses the CAM file, then builds and runs one `eaglecon`
//! command per section, in file order. Each command finishes before the next
//! is built. Problems are recorded in the [`RunContext`] and never stop the
//! remaining sections.
//!
//! Progress is written to `out`, with each warning or error on its own line
//! as soon as it is recorded:
//!
//! ```text
//! *** Warning: Eagle layer 99 in the CAM tab named 'Component side' is not a layer listed in the board file.
//! "eaglecon" -X -d"GERBER_RS274X" -o"board.cmp" "board.brd"  1 17 18
//! return code: 0
//! *** CAM job completed with 1 warnings and 0 errors. ***
//! ```

pub mod runner;

pub use runner::{CommandRunner, ShellRunner};

use std::io::{self, Write};
use std::path::PathBuf;

use crate::cam::{self, CamError};
use crate::config::Config;
use crate::context::{Counts, RunContext};
use crate::eagle::{self, EagleCommand};

/// Inputs of one CAM job run.
#[derive(Debug, Clone)]
pub struct JobOptions {
    /// Path of the `.cam` file.
    pub cam: PathBuf,
    /// Path of the `.brd` file.
    pub board: PathBuf,
    /// Path of the `eaglecon` executable.
    pub eagle: PathBuf,
    /// Devices that `eaglecon` is known to render with these options.
    pub supported_devices: Vec<String>,
    /// Print the commands without running them.
    pub dry_run: bool,
}

impl JobOptions {
    /// Creates options with the default supported devices.
    pub fn new(
        cam: impl Into<PathBuf>,
        board: impl Into<PathBuf>,
        eagle: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cam: cam.into(),
            board: board.into(),
            eagle: eagle.into(),
            supported_devices: crate::eagle::SUPPORTED_DEVICES
                .iter()
                .map(ToString::to_string)
                .collect(),
            dry_run: false,
        }
    }

    /// Resolves the board and `eaglecon` paths for a run.
    ///
    /// A path given on the command line wins over the configuration file,
    /// which wins over [`DEFAULT_BOARD_PATH`](crate::eagle::DEFAULT_BOARD_PATH)
    /// and [`DEFAULT_EAGLE_PATH`](crate::eagle::DEFAULT_EAGLE_PATH). The
    /// supported devices always come from `config`.
    #[must_use]
    pub fn resolve(
        cam: PathBuf,
        board: Option<PathBuf>,
        eagle: Option<PathBuf>,
        config: &Config,
    ) -> Self {
        let board = board
            .or_else(|| config.board_path.clone())
            .unwrap_or_else(|| PathBuf::from(crate::eagle::DEFAULT_BOARD_PATH));
        let eagle = eagle
            .or_else(|| config.eagle_path.clone())
            .unwrap_or_else(|| PathBuf::from(crate::eagle::DEFAULT_EAGLE_PATH));

        Self {
            cam,
            board,
            eagle,
            supported_devices: config.supported_devices.clone(),
            dry_run: false,
        }
    }
}

/// How far a job got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// The CAM file could not be parsed; no command ran.
    NotRun,
    /// Every parsed section was processed.
    Completed {
        /// Number of sections processed.
        sections: usize,
    },
}

/// Outcome of a job run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobReport {
    /// How far the job got.
    pub status: JobStatus,
    /// Warnings and errors of the whole run.
    pub counts: Counts,
}

impl JobReport {
    /// Returns `true` if the job ran with no warnings and no errors.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        matches!(self.status, JobStatus::Completed { .. }) && self.counts.is_clean()
    }
}

/// Runs a CAM job.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn run_job(
    options: &JobOptions,
    ctx: &mut RunContext,
    runner: &mut dyn CommandRunner,
    out: &mut dyn Write,
) -> io::Result<JobReport> {
    let mut reported = ctx.diagnostics().len();
    check_paths(options, ctx);

    let job = match cam::read_job(&options.cam) {
        Ok(job) => job,
        Err(e) => {
            report_parse_error(&e, options, ctx);
            write_diagnostics(ctx, &mut reported, out)?;
            writeln!(out, "*** CAM job did not run. ***")?;
            return Ok(JobReport {
                status: JobStatus::NotRun,
                counts: ctx.counts(),
            });
        }
    };

    if let Some(stop) = &job.stopped {
        if stop.is_warning() {
            ctx.warning(stop.to_string());
        } else {
            ctx.error(stop.to_string());
        }
    }
    write_diagnostics(ctx, &mut reported, out)?;

    tracing::info!(
        cam = %options.cam.display(),
        sections = job.sections.len(),
        "Running CAM job"
    );

    for section in &job.sections {
        let command = EagleCommand::for_section(section, &options.board, &options.eagle, ctx);
        let line = command.to_string();
        write_diagnostics(ctx, &mut reported, out)?;
        writeln!(out, "{line}")?;

        if !eagle::is_supported_device(&section.device, &options.supported_devices) {
            ctx.warning(format!(
                "Device \"{}\" is not supported, and the generated command line may be missing parameters. Only {} are supported.",
                section.device,
                supported_list(&options.supported_devices)
            ));
            write_diagnostics(ctx, &mut reported, out)?;
        }

        if !options.dry_run {
            match runner.run(&line) {
                Ok(code) => {
                    writeln!(out, "return code: {code}")?;
                    if code < 0 {
                        ctx.warning(format!("Eagle CAD return code = {code}."));
                    }
                }
                Err(e) => ctx.error(format!(
                    "Unable to run the command for section [{}]: {e}",
                    section.tag
                )),
            }
        }
        write_diagnostics(ctx, &mut reported, out)?;
    }

    let counts = ctx.counts();
    writeln!(
        out,
        "*** CAM job completed with {} warnings and {} errors. ***",
        counts.warnings, counts.errors
    )?;

    Ok(JobReport {
        status: JobStatus::Completed {
            sections: job.sections.len(),
        },
        counts,
    })
}

/// Writes the diagnostics recorded since the last call, one per line.
fn write_diagnostics(
    ctx: &RunContext,
    reported: &mut usize,
    out: &mut dyn Write,
) -> io::Result<()> {
    for diagnostic in &ctx.diagnostics()[*reported..] {
        writeln!(out, "{diagnostic}")?;
    }
    *reported = ctx.diagnostics().len();
    Ok(())
}

fn check_paths(options: &JobOptions, ctx: &mut RunContext) {
    if !options.board.exists() {
        ctx.error(format!(
            "The board file path \"{}\" does not exist.",
            options.board.display()
        ));
    }
    if !options.dry_run && !options.eagle.exists() {
        ctx.error(format!(
            "The file \"{}\" does not exist.  Please specify the \"eaglecon.exe\" path using the -e parameter.",
            options.eagle.display()
        ));
    }
}

fn report_parse_error(e: &CamError, options: &JobOptions, ctx: &mut RunContext) {
    match e {
        CamError::FileRead { .. } => ctx.error(e.to_string()),
        _ => ctx.error(format!("{}: {e}", options.cam.display())),
    }
}

fn supported_list(devices: &[String]) -> String {
    devices
        .iter()
        .map(|d| format!("\"{d}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
