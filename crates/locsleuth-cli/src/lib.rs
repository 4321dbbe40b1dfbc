/// locsleuth CLI — argument handling, scan orchestration, exit-code policy.
///
/// The frontend stays thin: parse the command line, drive the scan on the
/// background scanner thread while draining progress messages, consolidate,
/// render to stdout. Every fatal error is printed to stderr with its cause
/// chain and mapped to the documented exit code.
pub mod args;
pub mod report;

use args::Args;
use clap::Parser;
use locsleuth_core::consolidate::consolidate;
use locsleuth_core::error::ScanError;
use locsleuth_core::model::count::format_count;
use locsleuth_core::scanner::progress::ScanProgress;
use locsleuth_core::scanner::start_scan;

use std::error::Error;
use std::io::{self, BufWriter, Write};
use thiserror::Error as ThisError;
use tracing::{debug, info};

/// Fatal CLI failures, unified so [`run`] can map them to exit codes.
#[derive(Debug, ThisError)]
enum CliError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("cannot write the report")]
    Report(#[from] io::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Scan(err) => err.exit_code(),
            CliError::Report(_) => 1,
        }
    }
}

/// Parse arguments, run the scan, print the report.
/// Returns the process exit code.
pub fn run() -> i32 {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version land here too; only genuine usage
            // errors (missing path, unknown flag) exit non-zero.
            let is_usage_error = err.use_stderr();
            let _ = err.print();
            return if is_usage_error { 1 } else { 0 };
        }
    };

    match execute(&args) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            err.exit_code()
        }
    }
}

fn execute(args: &Args) -> Result<(), CliError> {
    let handle = start_scan(args.path.clone());

    // Drain progress until the scan thread hangs up its sender.
    for message in handle.progress_rx.iter() {
        match message {
            ScanProgress::Update {
                stats,
                current_path,
            } => {
                debug!(
                    dirs = stats.dirs_scanned,
                    files = stats.files_counted,
                    lines = stats.lines_counted,
                    %current_path,
                    "scanning"
                );
            }
            ScanProgress::Complete { stats, duration } => {
                info!(
                    "counted {} lines in {} files across {} directories in {duration:?}",
                    format_count(stats.lines_counted),
                    format_count(stats.files_counted),
                    format_count(stats.dirs_scanned),
                );
            }
        }
    }

    let mut outcome = handle.join()?;
    consolidate(&mut outcome.tree);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.json {
        report::render_json(&outcome.tree, &mut out)?;
    } else {
        report::render_text(&outcome.tree, &mut out)?;
    }
    out.flush()?;
    Ok(())
}
