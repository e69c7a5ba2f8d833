//! # Line-Command Interpreter
//!
//! Drives either structure from a line-oriented command stream:
//!
//! ```text
//! I <key>    insert
//! D <key>    delete
//! S <key>    search
//! ```
//!
//! Every command answers one line - `S` on success, `F - <reason>` on
//! failure - and end of input triggers a blank line followed by a full dump
//! of the structure (tree rows, or the list's layers keys-only).
//!
//! The skip list maps an insert of an existing key to `F - Duplicate key`
//! even though the list itself treats it as an in-place update; the value
//! is still replaced. That keeps the two structures' command surfaces
//! identical.
//!
//! Sessions run over any [`BufRead`]/[`Write`] pair, so tests feed byte
//! slices and capture `Vec<u8>` instead of touching stdin. Malformed lines
//! (unknown command, missing or unparsable key) answer `F - Invalid command`
//! and the session continues.

use std::io::{self, BufRead, Write};

use crate::print;
use crate::{ScapegoatTree, SkipList};

enum Command {
	Insert,
	Delete,
	Search,
}

/// Splits a line into its command and key; `None` on anything malformed.
/// Tokens past the first two are ignored.
fn parse(line: &str) -> Option<(Command, i64)> {
	let mut tokens = line.split_whitespace();
	let command = match tokens.next()? {
		"I" => Command::Insert,
		"D" => Command::Delete,
		"S" => Command::Search,
		_ => return None,
	};
	let key = tokens.next()?.parse().ok()?;
	Some((command, key))
}

/// Runs a tree session to end of input, then dumps the tree.
pub fn run_tree_session<R, W>(
	tree: &mut ScapegoatTree<i64>,
	input: R,
	out: &mut W,
) -> io::Result<()>
where
	R: BufRead,
	W: Write,
{
	for line in input.lines() {
		let line = line?;
		match parse(&line) {
			Some((Command::Insert, key)) => {
				if tree.insert(key) {
					writeln!(out, "S")?;
				} else {
					writeln!(out, "F - Duplicate key")?;
				}
			}
			Some((Command::Delete, key)) => {
				if tree.remove(&key) {
					writeln!(out, "S")?;
				} else {
					writeln!(out, "F - Key not found")?;
				}
			}
			Some((Command::Search, key)) => {
				if tree.get(&key).is_some() {
					writeln!(out, "S")?;
				} else {
					writeln!(out, "F - Key not found")?;
				}
			}
			None => writeln!(out, "F - Invalid command")?,
		}
	}

	writeln!(out)?;
	let mut dump = String::new();
	print::tree_rows(tree, &mut dump).map_err(|_| io::Error::other("tree dump failed"))?;
	out.write_all(dump.as_bytes())
}

/// Runs a list session to end of input, then dumps the list's layers.
/// Inserted keys carry a unit value of 1, matching the command surface
/// (the protocol has no value field).
pub fn run_list_session<R, W>(
	list: &mut SkipList<i64, i64>,
	input: R,
	out: &mut W,
) -> io::Result<()>
where
	R: BufRead,
	W: Write,
{
	for line in input.lines() {
		let line = line?;
		match parse(&line) {
			Some((Command::Insert, key)) => {
				if list.insert(key, 1).is_none() {
					writeln!(out, "S")?;
				} else {
					writeln!(out, "F - Duplicate key")?;
				}
			}
			Some((Command::Delete, key)) => {
				if list.remove(&key).is_some() {
					writeln!(out, "S")?;
				} else {
					writeln!(out, "F - Key not found")?;
				}
			}
			Some((Command::Search, key)) => {
				if list.get(&key).is_some() {
					writeln!(out, "S")?;
				} else {
					writeln!(out, "F - Key not found")?;
				}
			}
			None => writeln!(out, "F - Invalid command")?,
		}
	}

	writeln!(out)?;
	let mut dump = String::new();
	print::list_layers_keys(list, &mut dump).map_err(|_| io::Error::other("list dump failed"))?;
	out.write_all(dump.as_bytes())
}
