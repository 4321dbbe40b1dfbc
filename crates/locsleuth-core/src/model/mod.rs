/// Data model for the locsleuth aggregation tree.
///
/// Re-exports the arena-allocated tree structure and supporting types.
pub mod count;
pub mod dir_node;
pub mod dir_tree;

pub use dir_node::{DirNode, NodeIndex};
pub use dir_tree::DirTree;
