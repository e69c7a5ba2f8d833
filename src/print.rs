//! ASCII pretty-printers for both structures.
//!
//! These render to any [`fmt::Write`] so the interpreter can dump to stdout
//! and the tests can dump to a `String`. The core types stay free of any
//! presentation concern; the printers reach the structures only through
//! crate-internal traversal.

use std::fmt;

use crate::scapegoat::ScapegoatTree;
use crate::skiplist::SkipList;

// ---------------------------------------------------------------------------
// Tree Rows
// ---------------------------------------------------------------------------

/// Renders the tree one depth at a time: a connector row of `/` and `\`
/// glyphs, then the keys at that depth, with the leading pad shrinking as
/// the depth grows.
///
/// ```text
///        2
///      /   \
///      1   3
/// ```
///
/// An empty tree renders nothing.
pub fn tree_rows<K, W>(tree: &ScapegoatTree<K>, out: &mut W) -> fmt::Result
where
	K: Ord + fmt::Display,
	W: fmt::Write,
{
	let Some(root) = tree.root_index() else {
		return Ok(());
	};
	let rows = tree.height() * 2;
	for depth in 0..rows {
		write_row(tree, root, rows, depth, out)?;
	}
	Ok(())
}

/// Collects the keys present at `depth`, with `None` marking a missing
/// child position so the connector glyphs keep their left/right alternation.
fn collect_line<K>(
	tree: &ScapegoatTree<K>,
	idx: usize,
	depth: isize,
	vals: &mut Vec<Option<String>>,
) where
	K: Ord + fmt::Display,
{
	let node = tree.node(idx);
	if depth <= 0 {
		vals.push(Some(node.key.to_string()));
		return;
	}
	match node.left {
		Some(left) => collect_line(tree, left, depth - 1, vals),
		None if depth - 1 <= 0 => vals.push(None),
		None => {}
	}
	match node.right {
		Some(right) => collect_line(tree, right, depth - 1, vals),
		None if depth - 1 <= 0 => vals.push(None),
		None => {}
	}
}

fn write_row<K, W>(
	tree: &ScapegoatTree<K>,
	root: usize,
	rows: usize,
	depth: usize,
	out: &mut W,
) -> fmt::Result
where
	K: Ord + fmt::Display,
	W: fmt::Write,
{
	let mut vals = Vec::new();
	collect_line(tree, root, depth as isize, &mut vals);
	let pad = (rows - depth) * 2;

	if vals.len() > 1 {
		// Connector row; the toggle alternates over every child position,
		// missing ones included, so each glyph leans the right way.
		let mut toggle = true;
		let mut first = true;
		for val in &vals {
			if val.is_some() {
				let glyph = if toggle { '/' } else { '\\' };
				if first {
					write!(out, "{glyph:>pad$}   ")?;
					first = false;
				} else {
					write!(out, "{glyph}   ")?;
				}
			}
			toggle = !toggle;
		}
		out.write_char('\n')?;
	}

	let mut first = true;
	for val in vals.iter().flatten() {
		if first {
			write!(out, "{val:>pad$}   ")?;
			first = false;
		} else {
			write!(out, "{val}   ")?;
		}
	}
	out.write_char('\n')
}

// ---------------------------------------------------------------------------
// List Layers
// ---------------------------------------------------------------------------

/// Renders the list one layer per line, top level first, skipping layers
/// with an empty chain:
///
/// ```text
/// Layer 2: <4|forty> -> NULL
/// Layer 1: <2|twenty> -> <4|forty> -> <7|seventy> -> NULL
/// ```
pub fn list_layers<K, V, W>(list: &SkipList<K, V>, out: &mut W) -> fmt::Result
where
	K: Ord + fmt::Display,
	V: fmt::Display,
	W: fmt::Write,
{
	for level in (0..=list.active_level_ceiling()).rev() {
		let mut cur = list.link(None, level);
		if cur.is_none() {
			continue;
		}
		write!(out, "Layer {}: ", level + 1)?;
		while let Some(idx) = cur {
			let node = list.node(idx);
			write!(out, "<{}|{}> -> ", node.key, node.value)?;
			cur = node.forward[level];
		}
		out.write_str("NULL\n")?;
	}
	Ok(())
}

/// Keys-only variant of [`list_layers`], used by the interpreter's final
/// dump.
pub fn list_layers_keys<K, V, W>(list: &SkipList<K, V>, out: &mut W) -> fmt::Result
where
	K: Ord + fmt::Display,
	W: fmt::Write,
{
	for level in (0..=list.active_level_ceiling()).rev() {
		let mut layer = list.level_iter(level).peekable();
		if layer.peek().is_none() {
			continue;
		}
		write!(out, "Layer {}: ", level + 1)?;
		for key in layer {
			write!(out, "<{key}> -> ")?;
		}
		out.write_str("NULL\n")?;
	}
	Ok(())
}
