/// Fatal error taxonomy.
///
/// None of these are recovered: every variant terminates the run. Variants
/// carry the offending path plus the underlying `io::Error` so the frontend
/// can print a useful message before exiting with the matching code.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Structural failures of the aggregation tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The up-front arena reservation could not be satisfied.
    #[error("cannot reserve storage for {requested} directory nodes")]
    Reserve { requested: usize },

    /// Insertion was attempted past the frozen capacity. A hard ceiling,
    /// never silent truncation: node references stay valid only because
    /// the arena never reallocates after the reservation.
    #[error("directory limit of {max_nodes} nodes exceeded")]
    CapacityExceeded { max_nodes: usize },

    /// `insert_root` was called on a tree that already has a root.
    #[error("tree root is already set")]
    RootAlreadySet,
}

/// Everything that can abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A directory could not be opened for listing.
    #[error("cannot open {} as a directory", path.display())]
    DirOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A matched source file could not be opened or read as text.
    #[error("cannot open {} as a text file", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entry's type/metadata could not be queried.
    #[error("cannot stat {}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The aggregation tree refused to grow (reservation or capacity).
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ScanError {
    /// Process exit code for this error.
    ///
    /// `1` for unreadable files and directories, `2` for metadata query
    /// failures. Usage errors (handled by the CLI before a scan starts)
    /// also exit with `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::Metadata { .. } => 2,
            ScanError::DirOpen { .. } | ScanError::FileOpen { .. } | ScanError::Tree(_) => 1,
        }
    }
}
