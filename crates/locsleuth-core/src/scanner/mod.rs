/// Scanner module — orchestrates the filesystem walk.
///
/// The walk itself is sequential and recursive. It can run on the calling
/// thread ([`scan`]) or on a dedicated scanner thread ([`start_scan`]) so
/// a frontend can drain progress messages while the filesystem is read.
///
/// The aggregation tree is reserved to its full capacity and locked
/// against growth *before* the walk starts. Combined with the per-node
/// atomic accumulators, that is what keeps node references stable if the
/// walk is ever split across parallel workers.
pub mod progress;
pub mod walk;

use crate::error::ScanError;
use crate::model::DirTree;
use progress::ScanProgress;
pub use walk::{count_lines, ScanStats, SOURCE_SUFFIXES};

use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Maximum number of directories one scan may visit.
///
/// This is the arena reservation, and therefore a hard ceiling: walking
/// past it is a deterministic [`crate::error::TreeError::CapacityExceeded`],
/// never a reallocation and never silent truncation.
pub const MAX_DIRECTORIES: usize = 100_000;

/// Maximum number of progress messages that may queue up in the channel.
///
/// The frontend drains the channel from its main loop. If it falls behind
/// for longer than this buffer allows, the scanner blocks on `send` rather
/// than consuming unbounded heap.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 1_024;

/// Result of a completed walk: the populated (not yet consolidated) tree
/// plus the walk's running totals.
#[derive(Debug)]
pub struct ScanOutcome {
    pub tree: DirTree,
    pub stats: ScanStats,
    pub duration: Duration,
}

/// Handle to a scan running on a background thread. The frontend reads
/// progress from `progress_rx` and collects the result with [`join`].
///
/// [`join`]: ScanHandle::join
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    /// Join handle carrying the scan result.
    thread: thread::JoinHandle<Result<ScanOutcome, ScanError>>,
}

impl ScanHandle {
    /// Wait for the scan thread to finish and take its result.
    pub fn join(self) -> Result<ScanOutcome, ScanError> {
        self.thread.join().expect("scanner thread panicked")
    }
}

/// Scan `root` synchronously on the calling thread with the default
/// directory ceiling.
pub fn scan(root: &Path) -> Result<ScanOutcome, ScanError> {
    scan_with_capacity(root, MAX_DIRECTORIES)
}

/// Scan `root` synchronously with an explicit node ceiling.
pub fn scan_with_capacity(root: &Path, max_nodes: usize) -> Result<ScanOutcome, ScanError> {
    scan_inner(root, max_nodes, None)
}

/// Start a scan of `root` on a dedicated scanner thread.
///
/// Progress messages arrive on the handle's channel; the final tree (or
/// the fatal error) comes back through [`ScanHandle::join`].
pub fn start_scan(root: PathBuf) -> ScanHandle {
    let (progress_tx, progress_rx) = crossbeam_channel::bounded(PROGRESS_CHANNEL_CAPACITY);

    let thread = thread::Builder::new()
        .name("locsleuth-scanner".into())
        .spawn(move || {
            info!("starting scan of {}", root.display());
            let outcome = scan_inner(&root, MAX_DIRECTORIES, Some(&progress_tx));
            if let Ok(outcome) = &outcome {
                let _ = progress_tx.send(ScanProgress::Complete {
                    stats: outcome.stats,
                    duration: outcome.duration,
                });
            }
            outcome
        })
        .expect("failed to spawn scanner thread");

    ScanHandle {
        progress_rx,
        thread,
    }
}

fn scan_inner(
    root: &Path,
    max_nodes: usize,
    progress: Option<&Sender<ScanProgress>>,
) -> Result<ScanOutcome, ScanError> {
    let start = Instant::now();

    // Reserve and freeze the arena before the first node is created.
    let mut tree = DirTree::reserve(max_nodes)?;
    let mut walker = walk::Walker::new(&mut tree, progress);
    walker.scan_directory(None, root)?;
    let stats = walker.into_stats();

    let duration = start.elapsed();
    info!(
        dirs = stats.dirs_scanned,
        files = stats.files_counted,
        lines = stats.lines_counted,
        ?duration,
        "walk complete"
    );

    Ok(ScanOutcome {
        tree,
        stats,
        duration,
    })
}
