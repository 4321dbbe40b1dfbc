/// Scan progress reporting — lightweight messages sent from the scan
/// thread to the frontend via a crossbeam channel.
use super::walk::ScanStats;
use std::time::Duration;

/// Progress updates sent from the scan thread.
///
/// The tree itself is not in these messages; it comes back through
/// [`super::ScanHandle::join`] once the walk has finished.
#[derive(Debug)]
pub enum ScanProgress {
    /// Periodic update with running totals.
    Update {
        stats: ScanStats,
        current_path: String,
    },
    /// The walk finished without error.
    Complete { stats: ScanStats, duration: Duration },
}
