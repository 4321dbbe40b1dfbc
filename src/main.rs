//! locsleuth — hierarchical C/C++ line counter.
//!
//! Thin binary entry point. All logic lives in the `locsleuth-core`
//! and `locsleuth-cli` crates.

use tracing_subscriber::EnvFilter;

fn main() {
    // Initialise structured logging. Diagnostics go to stderr so stdout
    // carries nothing but the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LOCSLEUTH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("locsleuth starting");

    std::process::exit(locsleuth_cli::run());
}
