/// locsleuth Core — scanning, consolidation, and data model.
///
/// This crate contains all business logic with zero CLI dependencies.
/// It is designed to be reusable across different frontends (CLI, TUI, GUI).
///
/// # Modules
///
/// - [`model`] — Arena-allocated directory tree and supporting types.
/// - [`scanner`] — Recursive filesystem walk with progress reporting.
/// - [`consolidate`] — Bottom-up folding of line totals and sibling ordering.
/// - [`error`] — Fatal error taxonomy and its process exit codes.
pub mod consolidate;
pub mod error;
pub mod model;
pub mod scanner;
