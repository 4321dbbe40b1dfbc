/// Bottom-up consolidation — one sweep that turns "lines directly in this
/// directory" into "lines in this directory and everything beneath it",
/// and orders every sibling group biggest-first.
///
/// Totals are recomputed from scratch on every call (each node's total is
/// re-seeded from its directly-contained count before any folding), so
/// running consolidation twice in a row changes nothing.
use crate::model::{DirTree, NodeIndex};

/// Fold child totals into parents and sort every sibling group by
/// descending total, in a single post-order sweep.
///
/// Post-order guarantees the ordering the fold needs: a node's children
/// have all folded into it before it folds into its own parent, and by the
/// time a node's children are sorted their totals are final. The folds use
/// relaxed atomic adds — nothing orders against them except the walk
/// having finished first, which the caller's `&mut` access already proves.
pub fn consolidate(tree: &mut DirTree) {
    // Re-seed every total from the directly-contained count. This is what
    // makes repeated consolidation idempotent instead of doubling.
    for idx in tree.pre_order() {
        tree.get(idx).reset_total();
    }

    // The sibling sort relinks the tree while we iterate, so materialise
    // the post-order sequence once up front.
    let order: Vec<NodeIndex> = tree.post_order().collect();
    for idx in order {
        let total = tree.get(idx).total_lines();
        if let Some(parent) = tree.parent_of(idx) {
            tree.get(parent).add_to_total(total);
        }
        tree.sort_children_by(idx, |a, b| b.total_lines().cmp(&a.total_lines()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;

    fn name(s: &str) -> CompactString {
        CompactString::new(s)
    }

    /// root(2 own) -> a(3 own) -> a1(7 own), root -> b(5 own)
    fn build_tree() -> (DirTree, NodeIndex, NodeIndex, NodeIndex, NodeIndex) {
        let mut tree = DirTree::reserve(8).unwrap();
        let root = tree.insert_root(name("root")).unwrap();
        let a = tree.insert_child(root, name("a")).unwrap();
        let b = tree.insert_child(root, name("b")).unwrap();
        let a1 = tree.insert_child(a, name("a1")).unwrap();
        tree.get(root).add_file_lines(2);
        tree.get(a).add_file_lines(3);
        tree.get(b).add_file_lines(5);
        tree.get(a1).add_file_lines(7);
        (tree, root, a, b, a1)
    }

    #[test]
    fn totals_bubble_up_to_every_ancestor() {
        let (mut tree, root, a, b, a1) = build_tree();
        consolidate(&mut tree);

        assert_eq!(tree.get(a1).total_lines(), 7);
        assert_eq!(tree.get(a).total_lines(), 10);
        assert_eq!(tree.get(b).total_lines(), 5);
        assert_eq!(tree.get(root).total_lines(), 17);
        // Directly-contained counts are left untouched.
        assert_eq!(tree.get(root).file_lines(), 2);
        assert_eq!(tree.get(a).file_lines(), 3);
    }

    #[test]
    fn siblings_are_ordered_biggest_first() {
        let (mut tree, root, a, b, _a1) = build_tree();
        consolidate(&mut tree);

        // a totals 10, b totals 5 — a must now come first.
        let kids: Vec<_> = tree.children(root).collect();
        assert_eq!(kids, vec![a, b]);

        let mut last = u64::MAX;
        for child in tree.children(root) {
            let total = tree.get(child).total_lines();
            assert!(total <= last, "sibling order must be non-increasing");
            last = total;
        }
    }

    #[test]
    fn consolidation_is_idempotent() {
        let (mut tree, root, a, b, a1) = build_tree();
        consolidate(&mut tree);
        let first: Vec<u64> = [root, a, b, a1]
            .iter()
            .map(|&i| tree.get(i).total_lines())
            .collect();
        let first_order: Vec<_> = tree.pre_order().collect();

        consolidate(&mut tree);
        let second: Vec<u64> = [root, a, b, a1]
            .iter()
            .map(|&i| tree.get(i).total_lines())
            .collect();
        let second_order: Vec<_> = tree.pre_order().collect();

        assert_eq!(first, second);
        assert_eq!(first_order, second_order);
    }

    #[test]
    fn ties_keep_insertion_order_across_runs() {
        let mut tree = DirTree::reserve(8).unwrap();
        let root = tree.insert_root(name("root")).unwrap();
        let x = tree.insert_child(root, name("x")).unwrap();
        let y = tree.insert_child(root, name("y")).unwrap();
        let z = tree.insert_child(root, name("z")).unwrap();
        tree.get(x).add_file_lines(4);
        tree.get(y).add_file_lines(9);
        tree.get(z).add_file_lines(4);

        consolidate(&mut tree);
        let kids: Vec<_> = tree.children(root).collect();
        assert_eq!(kids, vec![y, x, z]);

        consolidate(&mut tree);
        let again: Vec<_> = tree.children(root).collect();
        assert_eq!(again, kids);
    }

    #[test]
    fn lone_root_consolidates_to_its_own_lines() {
        let mut tree = DirTree::reserve(2).unwrap();
        let root = tree.insert_root(name("root")).unwrap();
        tree.get(root).add_file_lines(12);
        consolidate(&mut tree);
        assert_eq!(tree.get(root).total_lines(), 12);
        assert_eq!(tree.children(root).count(), 0);
    }

    #[test]
    fn empty_tree_is_a_no_op() {
        let mut tree = DirTree::reserve(4).unwrap();
        consolidate(&mut tree);
        assert!(tree.is_empty());
    }

    #[test]
    fn deep_chain_accumulates_through_every_level() {
        let mut tree = DirTree::reserve(16).unwrap();
        let mut current = tree.insert_root(name("d0")).unwrap();
        let root = current;
        for i in 1..10 {
            current = tree
                .insert_child(current, name(&format!("d{i}")))
                .unwrap();
            tree.get(current).add_file_lines(1);
        }
        consolidate(&mut tree);
        assert_eq!(tree.get(root).total_lines(), 9);
    }
}
