/// A single scanned directory in the arena-allocated aggregation tree.
///
/// Nodes are stored in a flat `Vec<DirNode>` for cache-friendly traversal.
/// Parent-child relationships use indices rather than pointers, and the
/// arena never reallocates once scanning starts, so a `NodeIndex` handed
/// out during the walk stays valid while sibling subtrees are still being
/// inserted elsewhere.
use compact_str::CompactString;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lightweight index into the arena `Vec<DirNode>`.
///
/// Uses `u32` to keep nodes small — supports up to ~4 billion directories,
/// far beyond the configured node ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new `NodeIndex` from a `usize`, panicking if it exceeds `u32::MAX`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One directory and its line counters.
///
/// Children form a singly-linked list via [`first_child`]/[`next_sibling`];
/// `last_child` lets insertion append at the tail so sibling iteration
/// order equals insertion order. That ordering is what the stable sort in
/// consolidation uses to break ties deterministically.
///
/// The two counters are atomics: during the walk, files in one directory
/// (and, under a future parallel scan, several workers at once) all add
/// into the same node without locking.
#[derive(Debug)]
pub struct DirNode {
    /// Path segment for child directories; the user-supplied path for the root.
    pub name: CompactString,

    /// Lines directly contained in this directory's own matching files.
    /// Written by the scanner via relaxed `fetch_add`.
    file_lines: AtomicU64,

    /// Consolidated subtree total. Recomputed from scratch on every
    /// consolidation pass, which is what makes the pass idempotent.
    total_lines: AtomicU64,

    /// Number of ancestors (root = 0).
    pub depth: u16,

    /// Index of the parent node. `None` for the scan root.
    pub parent: Option<NodeIndex>,

    /// First child in insertion order.
    pub first_child: Option<NodeIndex>,

    /// Last child — insertion appends here.
    pub last_child: Option<NodeIndex>,

    /// Next sibling under the same parent.
    pub next_sibling: Option<NodeIndex>,
}

impl DirNode {
    /// Create a fresh node with zeroed counters.
    pub fn new(name: CompactString, parent: Option<NodeIndex>, depth: u16) -> Self {
        Self {
            name,
            file_lines: AtomicU64::new(0),
            total_lines: AtomicU64::new(0),
            depth,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }

    /// Atomically add lines found in one of this directory's own files.
    ///
    /// Relaxed ordering: no other memory effect depends on this add's
    /// visibility, only on all adds completing before consolidation starts.
    #[inline]
    pub fn add_file_lines(&self, lines: u64) {
        self.file_lines.fetch_add(lines, Ordering::Relaxed);
    }

    /// Lines directly contained in this directory's own files.
    #[inline]
    pub fn file_lines(&self) -> u64 {
        self.file_lines.load(Ordering::Relaxed)
    }

    /// Consolidated total for this directory and everything beneath it.
    /// Meaningful only after [`crate::consolidate::consolidate`] has run.
    #[inline]
    pub fn total_lines(&self) -> u64 {
        self.total_lines.load(Ordering::Relaxed)
    }

    /// Restart the total from the directly-contained count, discarding any
    /// previously folded child totals.
    #[inline]
    pub fn reset_total(&self) {
        self.total_lines
            .store(self.file_lines.load(Ordering::Relaxed), Ordering::Relaxed);
    }

    /// Atomically fold a child's consolidated total into this node.
    #[inline]
    pub fn add_to_total(&self, lines: u64) {
        self.total_lines.fetch_add(lines, Ordering::Relaxed);
    }
}
