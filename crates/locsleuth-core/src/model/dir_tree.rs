/// Arena-backed directory tree with capacity frozen at construction.
///
/// All nodes live in a single `Vec<DirNode>` that is reserved to its maximum
/// size up front and never grows past it. Insertion therefore never
/// reallocates, which keeps every issued `NodeIndex` (and any `&DirNode`
/// derived from one) valid while other insertions and atomic count updates
/// proceed. That stability is the whole point of the design: a future
/// parallel scanner can hold references into the arena while sibling
/// subtrees are still being built.
use super::dir_node::{DirNode, NodeIndex};
use crate::error::TreeError;
use compact_str::CompactString;

/// The aggregation tree produced by a scan: one node per directory.
#[derive(Debug)]
pub struct DirTree {
    /// Arena: every node in a flat, cache-friendly vector.
    nodes: Vec<DirNode>,
    /// Hard ceiling on node count, fixed at reservation time.
    max_nodes: usize,
    /// Root node index, set exactly once.
    root: Option<NodeIndex>,
}

impl DirTree {
    /// Create an empty tree whose arena is reserved for up to `max_nodes`
    /// nodes and locked against any growth beyond that.
    ///
    /// The reservation happens before any node reference is handed out, so
    /// no later insertion can relocate the arena.
    pub fn reserve(max_nodes: usize) -> Result<Self, TreeError> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(max_nodes)
            .map_err(|_| TreeError::Reserve {
                requested: max_nodes,
            })?;
        Ok(Self {
            nodes,
            max_nodes,
            root: None,
        })
    }

    /// Set the tree's single root.
    pub fn insert_root(&mut self, name: CompactString) -> Result<NodeIndex, TreeError> {
        if self.root.is_some() {
            return Err(TreeError::RootAlreadySet);
        }
        let idx = self.alloc(DirNode::new(name, None, 0))?;
        self.root = Some(idx);
        Ok(idx)
    }

    /// Append a new child under `parent`, at the tail of its sibling list.
    ///
    /// Tail insertion keeps sibling iteration order equal to insertion
    /// order, which the stable consolidation sort relies on for
    /// deterministic tie-breaking.
    pub fn insert_child(
        &mut self,
        parent: NodeIndex,
        name: CompactString,
    ) -> Result<NodeIndex, TreeError> {
        let depth = self.nodes[parent.idx()].depth + 1;
        let idx = self.alloc(DirNode::new(name, Some(parent), depth))?;

        match self.nodes[parent.idx()].last_child {
            Some(prev) => self.nodes[prev.idx()].next_sibling = Some(idx),
            None => self.nodes[parent.idx()].first_child = Some(idx),
        }
        self.nodes[parent.idx()].last_child = Some(idx);
        Ok(idx)
    }

    /// Push a node into the arena, enforcing the frozen capacity.
    fn alloc(&mut self, node: DirNode) -> Result<NodeIndex, TreeError> {
        if self.nodes.len() >= self.max_nodes {
            return Err(TreeError::CapacityExceeded {
                max_nodes: self.max_nodes,
            });
        }
        let idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(node);
        Ok(idx)
    }

    /// Get a node by index. O(1); valid for the tree's whole lifetime.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> &DirNode {
        &self.nodes[index.idx()]
    }

    /// Mutable access to a node. Counter updates do not need this — the
    /// atomic accumulators work through [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> &mut DirNode {
        &mut self.nodes[index.idx()]
    }

    /// Parent of a node. O(1); `None` for the root.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.nodes[index.idx()].parent
    }

    /// The root node, if one has been inserted.
    #[inline]
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree contains no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the direct children of a node, in sibling order.
    pub fn children(&self, parent: NodeIndex) -> ChildIter<'_> {
        ChildIter {
            tree: self,
            current: self.nodes[parent.idx()].first_child,
        }
    }

    /// Lazy parent-before-children traversal of the whole tree.
    /// Each call yields a fresh sequence.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Lazy children-before-parent traversal of the whole tree.
    /// Each call yields a fresh sequence.
    pub fn post_order(&self) -> PostOrder<'_> {
        PostOrder {
            tree: self,
            stack: self.root.map(|r| (r, false)).into_iter().collect(),
        }
    }

    /// Stable in-place reorder of `parent`'s direct children using the
    /// supplied total order. Descendants' internal order is untouched;
    /// ties keep their insertion order.
    pub fn sort_children_by<F>(&mut self, parent: NodeIndex, mut cmp: F)
    where
        F: FnMut(&DirNode, &DirNode) -> std::cmp::Ordering,
    {
        let mut children: Vec<NodeIndex> = self.children(parent).collect();
        if children.len() < 2 {
            return;
        }

        let nodes = &self.nodes;
        children.sort_by(|&a, &b| cmp(&nodes[a.idx()], &nodes[b.idx()]));

        // Re-link the sibling list without moving nodes in the arena.
        self.nodes[parent.idx()].first_child = children.first().copied();
        self.nodes[parent.idx()].last_child = children.last().copied();
        for pair in children.windows(2) {
            self.nodes[pair[0].idx()].next_sibling = Some(pair[1]);
        }
        if let Some(&last) = children.last() {
            self.nodes[last.idx()].next_sibling = None;
        }
    }
}

/// Iterator over the children of a node.
pub struct ChildIter<'a> {
    tree: &'a DirTree,
    current: Option<NodeIndex>,
}

impl Iterator for ChildIter<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let idx = self.current?;
        self.current = self.tree.nodes[idx.idx()].next_sibling;
        Some(idx)
    }
}

/// Lazy pre-order traversal (parent before children).
pub struct PreOrder<'a> {
    tree: &'a DirTree,
    stack: Vec<NodeIndex>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let idx = self.stack.pop()?;
        // Push children, then reverse the pushed slice so the first child
        // ends up on top of the stack and is yielded next.
        let pushed_at = self.stack.len();
        let mut child = self.tree.nodes[idx.idx()].first_child;
        while let Some(c) = child {
            self.stack.push(c);
            child = self.tree.nodes[c.idx()].next_sibling;
        }
        self.stack[pushed_at..].reverse();
        Some(idx)
    }
}

/// Lazy post-order traversal (children before parent).
pub struct PostOrder<'a> {
    tree: &'a DirTree,
    /// `(node, children_done)` — a node is yielded the second time it is
    /// popped, after its whole subtree has been emitted.
    stack: Vec<(NodeIndex, bool)>,
}

impl Iterator for PostOrder<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        while let Some((idx, children_done)) = self.stack.pop() {
            if children_done {
                return Some(idx);
            }
            self.stack.push((idx, true));
            let pushed_at = self.stack.len();
            let mut child = self.tree.nodes[idx.idx()].first_child;
            while let Some(c) = child {
                self.stack.push((c, false));
                child = self.tree.nodes[c.idx()].next_sibling;
            }
            self.stack[pushed_at..].reverse();
        }
        None
    }
}
