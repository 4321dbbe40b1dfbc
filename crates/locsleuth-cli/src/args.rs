/// Command-line arguments.
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "locsleuth",
    version,
    about = "Count C/C++ source lines per directory, biggest first"
)]
pub struct Args {
    /// Root directory to scan.
    pub path: PathBuf,

    /// Emit the report as JSON instead of the indented text table.
    #[arg(long)]
    pub json: bool,
}
