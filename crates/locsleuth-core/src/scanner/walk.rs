/// Recursive directory walker — the sequential scan phase.
///
/// Every successfully scanned directory yields exactly one `DirNode`,
/// empty directories included. Per-file line counts are added to the
/// *owning* directory's node only; ancestor totals are filled in later by
/// consolidation. Counts go through the node's atomic accumulator, so the
/// same walk can later be split across worker threads scanning sibling
/// subtrees without touching this code's contract.
use crate::error::ScanError;
use crate::model::{DirTree, NodeIndex};
use crate::scanner::progress::ScanProgress;

use compact_str::CompactString;
use crossbeam_channel::Sender;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::warn;

/// Suffixes recognised as C/C++ source text. Case-sensitive, fixed.
pub const SOURCE_SUFFIXES: [&str; 4] = [".c", ".h", ".cpp", ".hpp"];

/// Chunk size for the line-counting read loop.
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Directory entries processed between progress messages.
const PROGRESS_UPDATE_INTERVAL: u64 = 256;

/// Running totals for one walk.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanStats {
    /// Matching source files whose lines were counted.
    pub files_counted: u64,
    /// Directories visited — each one owns a tree node.
    pub dirs_scanned: u64,
    /// Newline bytes seen across all counted files.
    pub lines_counted: u64,
}

/// Does this file name carry one of the recognised source suffixes?
fn is_source_file(name: &str) -> bool {
    SOURCE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Count raw line-feed bytes in a file, reading in fixed-size chunks.
///
/// No normalisation: a final line without a trailing newline is not
/// counted, and `\r` is just another byte.
pub fn count_lines(path: &Path) -> Result<u64, ScanError> {
    let mut file = File::open(path).map_err(|source| ScanError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut chunk = [0u8; READ_CHUNK_SIZE];
    let mut lines: u64 = 0;
    loop {
        let read = match file.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(ScanError::FileOpen {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        lines += chunk[..read].iter().filter(|&&byte| byte == b'\n').count() as u64;
    }
    Ok(lines)
}

/// State threaded through the recursive walk.
pub(crate) struct Walker<'a> {
    tree: &'a mut DirTree,
    progress: Option<&'a Sender<ScanProgress>>,
    stats: ScanStats,
    entries_seen: u64,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(tree: &'a mut DirTree, progress: Option<&'a Sender<ScanProgress>>) -> Self {
        Self {
            tree,
            progress,
            stats: ScanStats::default(),
            entries_seen: 0,
        }
    }

    pub(crate) fn into_stats(self) -> ScanStats {
        self.stats
    }

    /// Scan one directory into a fresh node under `parent` (tree root when
    /// `parent` is `None`), recursing into subdirectories.
    pub(crate) fn scan_directory(
        &mut self,
        parent: Option<NodeIndex>,
        path: &Path,
    ) -> Result<NodeIndex, ScanError> {
        // The root keeps the path exactly as the caller supplied it;
        // children are labelled by their path segment.
        let name = match parent {
            None => CompactString::new(path.to_string_lossy()),
            Some(_) => {
                CompactString::new(path.file_name().unwrap_or(path.as_os_str()).to_string_lossy())
            }
        };
        let node = match parent {
            None => self.tree.insert_root(name)?,
            Some(p) => self.tree.insert_child(p, name)?,
        };
        self.stats.dirs_scanned += 1;

        let entries = std::fs::read_dir(path).map_err(|source| ScanError::DirOpen {
            path: path.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Mid-listing enumeration failure: the entry itself is
                    // unusable but the directory handle survives.
                    warn!("skipping unreadable entry in {}: {err}", path.display());
                    continue;
                }
            };

            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            // Hidden entries, which also covers the `.`/`..` pseudo-entries
            // on platforms that report them.
            if file_name.starts_with('.') {
                continue;
            }
            self.entries_seen += 1;

            let entry_path = entry.path();
            // stat, following symlinks like the classic walk does.
            let metadata =
                std::fs::metadata(&entry_path).map_err(|source| ScanError::Metadata {
                    path: entry_path.clone(),
                    source,
                })?;

            if metadata.is_dir() {
                self.scan_directory(Some(node), &entry_path)?;
            } else if metadata.is_file() && is_source_file(&file_name) {
                let lines = count_lines(&entry_path)?;
                // Credit the owning directory only; ancestors are filled
                // in by consolidation.
                self.tree.get(node).add_file_lines(lines);
                self.stats.files_counted += 1;
                self.stats.lines_counted += lines;
            }

            if self.entries_seen.is_multiple_of(PROGRESS_UPDATE_INTERVAL) {
                self.send_update(&entry_path);
            }
        }

        Ok(node)
    }

    fn send_update(&self, current: &Path) {
        if let Some(tx) = self.progress {
            let _ = tx.send(ScanProgress::Update {
                stats: self.stats,
                current_path: current.to_string_lossy().into_owned(),
            });
        }
    }
}
