/// Report rendering — read-only consumers of the consolidated tree.
///
/// Both renderers walk the tree in pre-order, so they must run strictly
/// after consolidation: before it, totals hold only directly-contained
/// counts and sibling groups are still in insertion order.
use locsleuth_core::model::{DirTree, NodeIndex};
use serde::Serialize;
use std::io::{self, Write};

/// Column width of the depth-marker field. Deeper nodes simply overflow
/// it — a display artefact, not a data concern.
const MARKER_COLUMNS: usize = 8;

/// Width of the right-justified line-count column.
const COUNT_COLUMNS: usize = 6;

/// Render the classic indented text report: one line per directory,
/// `+` markers for depth, consolidated total, then the name.
pub fn render_text<W: Write>(tree: &DirTree, out: &mut W) -> io::Result<()> {
    for idx in tree.pre_order() {
        let node = tree.get(idx);
        let markers = "+".repeat(node.depth as usize);
        writeln!(
            out,
            "{markers:<MARKER_COLUMNS$}{:>COUNT_COLUMNS$} {}",
            node.total_lines(),
            node.name
        )?;
    }
    Ok(())
}

/// One directory in the JSON report, children already biggest-first.
#[derive(Serialize)]
struct ReportNode<'a> {
    name: &'a str,
    lines: u64,
    children: Vec<ReportNode<'a>>,
}

fn build_node(tree: &DirTree, idx: NodeIndex) -> ReportNode<'_> {
    let node = tree.get(idx);
    ReportNode {
        name: node.name.as_str(),
        lines: node.total_lines(),
        children: tree.children(idx).map(|c| build_node(tree, c)).collect(),
    }
}

/// Render the report as a nested JSON object mirroring the sorted tree.
pub fn render_json<W: Write>(tree: &DirTree, out: &mut W) -> io::Result<()> {
    let root = tree.root().map(|r| build_node(tree, r));
    serde_json::to_writer_pretty(&mut *out, &root)?;
    writeln!(out)?;
    Ok(())
}
