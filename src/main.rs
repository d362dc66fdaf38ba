//! cam2gerber: run an EAGLE CAM job from the command line
//!
//! Generates extended Gerber and Excellon drill files for a board by running
//! `eaglecon` once per section of a `.cam` file.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use cam2gerber::config;
use cam2gerber::context::RunContext;
use cam2gerber::job::{self, JobOptions, ShellRunner};

/// Run an EAGLE CAM job to produce Gerber and Excellon files.
///
/// Reads the `.cam` job file and runs one `eaglecon` command per section.
#[derive(Parser, Debug)]
#[command(name = "cam2gerber")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the (.cam) CAM job file
    #[arg(short, long, value_name = "FILE")]
    cam: PathBuf,

    /// Path of the (.brd) board file [default: ./schema.brd]
    #[arg(short, long, value_name = "FILE")]
    board: Option<PathBuf>,

    /// Path of the 'eaglecon.exe' file
    /// [default: C:\Program Files (x86)\EAGLE-6.5.0\bin\eaglecon.exe]
    #[arg(short, long, value_name = "FILE")]
    eagle: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Print the commands without running them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    let cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    let mut options = JobOptions::resolve(args.cam, args.board, args.eagle, &cfg);
    options.dry_run = args.dry_run;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        cam = %options.cam.display(),
        board = %options.board.display(),
        eagle = %options.eagle.display(),
        "Starting cam2gerber"
    );

    let mut ctx = RunContext::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = job::run_job(&options, &mut ctx, &mut ShellRunner, &mut out)
        .and_then(|report| out.flush().map(|()| report));

    match result {
        Ok(report) if report.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "Failed to write output");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn parse_short_options() {
        let args =
            Args::try_parse_from(["cam2gerber", "-c", "job.cam", "-b", "a.brd", "-n"]).unwrap();
        assert_eq!(args.cam, PathBuf::from("job.cam"));
        assert_eq!(args.board, Some(PathBuf::from("a.brd")));
        assert!(args.eagle.is_none());
        assert!(args.dry_run);
    }

    #[test]
    fn cam_is_required() {
        assert!(Args::try_parse_from(["cam2gerber", "-b", "a.brd"]).is_err());
    }

    #[test]
    fn log_level_from_flags() {
        assert_eq!(get_log_level(0, true, "debug"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "info"), Level::INFO);
        assert_eq!(get_log_level(2, false, "warn"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "bogus"), Level::WARN);
    }
}
