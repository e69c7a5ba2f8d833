//! # Skip List
//!
//! An ordered map over comparable keys using randomized auxiliary forward
//! links across multiple levels. Level 0 is a plain sorted linked chain
//! holding every entry; each higher level is a sparser shortcut chain over
//! the same nodes, so a search descends from the top level and skips most of
//! the list before dropping to level 0.
//!
//! ## Design Overview
//!
//! **Drawn levels**: every node draws a level at creation by independent
//! Bernoulli trials with success probability `p`, truncated at a hard
//! `level_cap` fixed at construction. The node's forward array is sized to
//! the drawn level once and never resized.
//!
//! **Active ceiling**: the highest level currently linked into the search
//! structure. It trails the ideal level count `l(size) = log(size)/log(1/p)`
//! with hysteresis: an insert raises the ceiling by one when
//! `floor(l(size))` pulls more than one ahead, a removal lowers it by one
//! when `ceil(l(size))` falls behind. A raise scans the old top chain and
//! activates the **latent** slots - forward capacity nodes drew above the
//! ceiling of their day - rather than reallocating any node; a lower is a
//! pure bound change, since every level's chain is a superset of the one
//! above it.
//!
//! ```text
//!   level 2          ┌────────────────► [9]          (latent in [4])
//!   level 1   head ──► [4] ────────────► [9] ──► ∅
//!   level 0   head ──► [2] ─► [4] ─► [7] ─► [9] ─► ∅
//! ```
//!
//! ### Storage
//!
//! Nodes live in a slab arena addressed by stable indices; forward links are
//! index arrays (`Option<usize>`), the head sentinel keeps its own forward
//! array of length exactly `ceiling + 1`, and removal is slot invalidation.
//! There is no owning/non-owning pointer distinction to get wrong: the arena
//! owns everything, the level chains are just indices into it.
//!
//! ## Basic Usage
//!
//! ```
//! use thicket::SkipList;
//!
//! let mut list: SkipList<i64, &str> = SkipList::new(32);
//! assert_eq!(list.insert(1, "one"), None);
//! assert_eq!(list.insert(1, "uno"), Some("one")); // update, not an error
//!
//! assert_eq!(list.get(&1), Some(&"uno"));
//! assert_eq!(list.remove(&1), Some("uno"));
//! assert!(list.is_empty());
//! ```

use std::borrow::Borrow;
use std::cell::Cell;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::{smallvec, SmallVec};

use crate::error::ConfigError;
use crate::iter::{ListIter, ListLevelIter};

/// Default promotion probability.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

// ---------------------------------------------------------------------------
// Arena Types
// ---------------------------------------------------------------------------

/// A list node. `forward.len()` equals the drawn level + 1 and never
/// changes; entries above the active ceiling are latent.
pub(crate) struct Node<K, V> {
	pub(crate) key: K,
	pub(crate) value: V,
	pub(crate) forward: SmallVec<[Option<usize>; 4]>,
}

/// A slab slot: a live node or a link in the free list.
enum Slot<K, V> {
	Occupied(Node<K, V>),
	Free(Option<usize>),
}

// ---------------------------------------------------------------------------
// Core List Structure
// ---------------------------------------------------------------------------

/// An ordered map backed by a probabilistic multi-level linked list with a
/// dynamically adjusted active level count.
///
/// Keys need `Ord`. All operations are strictly single-threaded and run to
/// completion; wrap the list externally if it must be shared.
///
/// # Result Semantics
///
/// - [`insert`](Self::insert) returns the previous value when the key was
///   already present (the value is replaced in place and the size does not
///   change - deliberately not a duplicate error, in contrast to the tree).
/// - [`remove`](Self::remove) returns the removed value, or `None` on a miss.
/// - [`get`](Self::get) returns a reference to the stored value.
pub struct SkipList<K, V> {
	/// Node slab. Forward links index into it.
	slots: Vec<Slot<K, V>>,
	/// Head of the free-slot chain.
	free_head: Option<usize>,
	/// The head sentinel's forward array; length is always `ceiling + 1`.
	head: SmallVec<[Option<usize>; 4]>,
	/// Highest level currently linked into the search structure.
	ceiling: usize,
	/// Hard upper bound on any node's drawn level. Immutable.
	level_cap: usize,
	/// Promotion probability, strictly within (0, 1).
	probability: f64,
	/// Current entry count.
	size: usize,
	rng: SmallRng,
	/// Comparison counter for the analysis driver; search takes `&self`.
	comparisons: Cell<u64>,
}

impl<K: Ord, V> SkipList<K, V> {
	// -----------------------------------------------------------------------
	// Construction
	// -----------------------------------------------------------------------

	/// Creates an empty list with the default promotion probability (0.5)
	/// and an OS-seeded level generator.
	pub fn new(level_cap: usize) -> Self {
		match Self::with_probability(level_cap, DEFAULT_PROBABILITY) {
			Ok(list) => list,
			Err(_) => unreachable!("default probability is in range"),
		}
	}

	/// Creates an empty list with the given promotion probability.
	///
	/// `probability` must lie strictly between 0 and 1; anything else
	/// (including NaN) is rejected. A `level_cap` of 0 is legal and yields a
	/// degenerate single-level list.
	pub fn with_probability(level_cap: usize, probability: f64) -> Result<Self, ConfigError> {
		Self::from_rng(level_cap, probability, SmallRng::from_os_rng())
	}

	/// Creates an empty list with a deterministic level generator. Two lists
	/// built from the same seed and the same operation sequence have
	/// identical shapes, which is what the shape-sensitive tests rely on.
	pub fn with_seed(level_cap: usize, probability: f64, seed: u64) -> Result<Self, ConfigError> {
		Self::from_rng(level_cap, probability, SmallRng::seed_from_u64(seed))
	}

	fn from_rng(level_cap: usize, probability: f64, rng: SmallRng) -> Result<Self, ConfigError> {
		if !(probability > 0.0 && probability < 1.0) {
			return Err(ConfigError::PromotionProbability(probability));
		}
		Ok(SkipList {
			slots: Vec::new(),
			free_head: None,
			head: smallvec![None],
			ceiling: 0,
			level_cap,
			probability,
			size: 0,
			rng,
			comparisons: Cell::new(0),
		})
	}

	// -----------------------------------------------------------------------
	// Metadata
	// -----------------------------------------------------------------------

	/// Returns the number of entries in the list.
	pub fn len(&self) -> usize {
		self.size
	}

	/// Returns `true` if the list holds no entries.
	pub fn is_empty(&self) -> bool {
		self.size == 0
	}

	/// Returns the highest level currently linked into the structure.
	pub fn active_level_ceiling(&self) -> usize {
		self.ceiling
	}

	/// Returns the hard upper bound on drawn levels.
	pub fn level_cap(&self) -> usize {
		self.level_cap
	}

	/// Returns the promotion probability the list was constructed with.
	pub fn probability(&self) -> f64 {
		self.probability
	}

	/// Ideal level count `log(size) / log(1/p)` for the current size.
	/// Only meaningful for `size >= 1`; callers guard.
	fn ideal_levels(&self) -> f64 {
		(self.size as f64).ln() / (1.0 / self.probability).ln()
	}

	// -----------------------------------------------------------------------
	// Instrumentation
	// -----------------------------------------------------------------------

	/// Comparisons performed by searches since the last reset.
	pub fn comparisons(&self) -> u64 {
		self.comparisons.get()
	}

	/// Clears the comparison counter.
	pub fn reset_comparisons(&self) {
		self.comparisons.set(0);
	}

	// -----------------------------------------------------------------------
	// Arena Plumbing
	// -----------------------------------------------------------------------

	pub(crate) fn node(&self, idx: usize) -> &Node<K, V> {
		match &self.slots[idx] {
			Slot::Occupied(node) => node,
			Slot::Free(_) => unreachable!("dangling node index"),
		}
	}

	fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
		match &mut self.slots[idx] {
			Slot::Occupied(node) => node,
			Slot::Free(_) => unreachable!("dangling node index"),
		}
	}

	/// Forward link at `level` out of either the head (`None`) or a node.
	pub(crate) fn link(&self, from: Option<usize>, level: usize) -> Option<usize> {
		match from {
			None => self.head[level],
			Some(idx) => self.node(idx).forward[level],
		}
	}

	fn set_link(&mut self, from: Option<usize>, level: usize, to: Option<usize>) {
		match from {
			None => self.head[level] = to,
			Some(idx) => self.node_mut(idx).forward[level] = to,
		}
	}

	fn alloc(&mut self, key: K, value: V, drawn_level: usize) -> usize {
		let node = Node {
			key,
			value,
			forward: smallvec![None; drawn_level + 1],
		};
		match self.free_head {
			Some(idx) => {
				self.free_head = match &self.slots[idx] {
					Slot::Free(next) => *next,
					Slot::Occupied(_) => unreachable!("free list points at live node"),
				};
				self.slots[idx] = Slot::Occupied(node);
				idx
			}
			None => {
				self.slots.push(Slot::Occupied(node));
				self.slots.len() - 1
			}
		}
	}

	fn release(&mut self, idx: usize) -> Node<K, V> {
		let slot = std::mem::replace(&mut self.slots[idx], Slot::Free(self.free_head));
		self.free_head = Some(idx);
		match slot {
			Slot::Occupied(node) => node,
			Slot::Free(_) => unreachable!("released a free slot"),
		}
	}

	// -----------------------------------------------------------------------
	// Level Drawing
	// -----------------------------------------------------------------------

	/// Independent Bernoulli trials with success probability `p`, truncated
	/// at the level cap: a geometric draw.
	fn draw_level(&mut self) -> usize {
		let mut level = 0;
		while level < self.level_cap && self.rng.random::<f64>() < self.probability {
			level += 1;
		}
		level
	}

	// -----------------------------------------------------------------------
	// Search
	// -----------------------------------------------------------------------

	/// Looks up a key and returns a reference to its value.
	///
	/// Counts one comparison per forward-pointer examination plus one final
	/// equality check toward [`comparisons`](Self::comparisons).
	pub fn get<Q>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		let mut cur: Option<usize> = None;
		for level in (0..=self.ceiling).rev() {
			while let Some(next) = self.link(cur, level) {
				self.comparisons.set(self.comparisons.get() + 1);
				if self.node(next).key.borrow() < key {
					cur = Some(next);
				} else {
					break;
				}
			}
		}
		let candidate = self.link(cur, 0);
		self.comparisons.set(self.comparisons.get() + 1);
		match candidate {
			Some(idx) if self.node(idx).key.borrow() == key => Some(&self.node(idx).value),
			_ => None,
		}
	}

	/// Returns `true` if the list contains the key.
	pub fn contains_key<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		self.get(key).is_some()
	}

	/// Records, for every active level, the last node strictly before `key`
	/// (`None` meaning the head). The returned index is the key's level-0
	/// successor candidate.
	fn find_update(&self, key: &K, update: &mut SmallVec<[Option<usize>; 8]>) -> Option<usize> {
		update.clear();
		update.resize(self.ceiling + 1, None);
		let mut cur: Option<usize> = None;
		for level in (0..=self.ceiling).rev() {
			while let Some(next) = self.link(cur, level) {
				if self.node(next).key < *key {
					cur = Some(next);
				} else {
					break;
				}
			}
			update[level] = cur;
		}
		self.link(cur, 0)
	}

	// -----------------------------------------------------------------------
	// Insertion
	// -----------------------------------------------------------------------

	/// Inserts a key-value pair.
	///
	/// If the key exists, its value is replaced in place and the old value
	/// returned; the size and every link stay as they were. Otherwise a new
	/// node is spliced in at every level from 0 up to the smaller of its
	/// drawn level and the active ceiling - capacity above the ceiling stays
	/// latent until a later ceiling raise activates it.
	///
	/// After a fresh insert the ceiling is raised by one if
	/// `floor(l(size))` has pulled more than one level ahead of it.
	pub fn insert(&mut self, key: K, value: V) -> Option<V> {
		let mut update: SmallVec<[Option<usize>; 8]> = SmallVec::new();
		let candidate = self.find_update(&key, &mut update);

		if let Some(idx) = candidate {
			if self.node(idx).key == key {
				return Some(std::mem::replace(&mut self.node_mut(idx).value, value));
			}
		}

		let drawn = self.draw_level();
		let idx = self.alloc(key, value, drawn);
		for level in 0..=drawn.min(self.ceiling) {
			let next = self.link(update[level], level);
			self.node_mut(idx).forward[level] = next;
			self.set_link(update[level], level, Some(idx));
		}
		self.size += 1;

		if self.ceiling < self.level_cap
			&& self.ideal_levels().floor() as usize > self.ceiling + 1
		{
			self.raise_ceiling();
		}
		None
	}

	/// Activates one more level: scans the current top chain for nodes whose
	/// forward arrays already extend past the ceiling (latent capacity from
	/// earlier draws) and links them into the new top level, terminated from
	/// the head through the last promoted node.
	fn raise_ceiling(&mut self) {
		let old_top = self.ceiling;
		let new_top = old_top + 1;
		self.head.push(None);

		let mut prev: Option<usize> = None;
		let mut cur = self.link(None, old_top);
		while let Some(idx) = cur {
			if self.node(idx).forward.len() > new_top {
				self.set_link(prev, new_top, Some(idx));
				prev = Some(idx);
			}
			cur = self.link(Some(idx), old_top);
		}
		// Clears the last promoted node's stale latent entry as well.
		self.set_link(prev, new_top, None);
		self.ceiling = new_top;
	}

	// -----------------------------------------------------------------------
	// Removal
	// -----------------------------------------------------------------------

	/// Removes a key, returning its value if it was present.
	///
	/// The node is unlinked from every level up to the smaller of its drawn
	/// level and the active ceiling; latent references above the ceiling are
	/// never read before a later ceiling raise rewrites them, so the slot
	/// can be freed immediately. If `ceil(l(size))` then falls below the
	/// ceiling's window, the ceiling drops by one - a pure bound change,
	/// since each level's chain is a superset of the one above.
	pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		let mut update: SmallVec<[Option<usize>; 8]> = SmallVec::new();
		update.resize(self.ceiling + 1, None);
		let mut cur: Option<usize> = None;
		for level in (0..=self.ceiling).rev() {
			while let Some(next) = self.link(cur, level) {
				if self.node(next).key.borrow() < key {
					cur = Some(next);
				} else {
					break;
				}
			}
			update[level] = cur;
		}

		let target = self.link(cur, 0)?;
		if self.node(target).key.borrow() != key {
			return None;
		}

		let top = (self.node(target).forward.len() - 1).min(self.ceiling);
		for level in 0..=top {
			let next = self.node(target).forward[level];
			self.set_link(update[level], level, next);
		}
		let node = self.release(target);
		self.size -= 1;

		if self.size > 0
			&& self.ceiling > 0
			&& (self.ideal_levels().ceil() as usize) < self.ceiling + 1
		{
			self.ceiling -= 1;
			self.head.truncate(self.ceiling + 1);
		}
		Some(node.value)
	}

	/// Removes every entry, releasing the whole slab.
	pub fn clear(&mut self) {
		self.slots.clear();
		self.free_head = None;
		self.head.clear();
		self.head.push(None);
		self.ceiling = 0;
		self.size = 0;
	}

	// -----------------------------------------------------------------------
	// Traversal
	// -----------------------------------------------------------------------

	/// Returns an iterator over `(key, value)` pairs in ascending key order
	/// (the level-0 chain).
	pub fn iter(&self) -> ListIter<'_, K, V> {
		ListIter::new(self)
	}

	/// Returns an iterator over the keys linked at the given level. Levels
	/// above the active ceiling yield nothing. This is the per-level
	/// sequence the layer printer consumes.
	pub fn level_iter(&self, level: usize) -> ListLevelIter<'_, K, V> {
		ListLevelIter::new(self, level)
	}

	// -----------------------------------------------------------------------
	// Invariant Checking (test support)
	// -----------------------------------------------------------------------

	/// Panics if any structural invariant is violated. Checks:
	///
	/// - the head array length is exactly `ceiling + 1` and the ceiling
	///   never exceeds the level cap;
	/// - level 0 is strictly ascending and holds exactly `len()` entries;
	/// - every active level is strictly ascending and links exactly the
	///   nodes whose forward arrays reach it;
	/// - the slab accounts for every slot (live + free, no leaks);
	/// - for `p <= 1/2`, the ceiling sits within one level of the ideal
	///   target.
	pub fn assert_invariants(&self) {
		assert_eq!(self.head.len(), self.ceiling + 1, "head array length");
		assert!(self.ceiling <= self.level_cap, "ceiling above level cap");

		let mut live = 0;
		for level in 0..=self.ceiling {
			let mut chain = 0;
			let mut prev: Option<&K> = None;
			let mut cur = self.link(None, level);
			while let Some(idx) = cur {
				let node = self.node(idx);
				assert!(
					node.forward.len() > level,
					"node linked above its drawn level"
				);
				if let Some(prev_key) = prev {
					assert!(*prev_key < node.key, "level {level} not strictly ascending");
				}
				prev = Some(&node.key);
				chain += 1;
				assert!(chain <= self.size, "cycle in level {level}");
				cur = node.forward[level];
			}
			if level == 0 {
				assert_eq!(chain, self.size, "level-0 count != size");
				live = chain;
			} else {
				let reaching = (0..self.slots.len())
					.filter(|&i| matches!(&self.slots[i], Slot::Occupied(n) if n.forward.len() > level))
					.count();
				assert_eq!(chain, reaching, "level {level} misses latent-capable nodes");
			}
		}

		let mut free = 0;
		let mut cursor = self.free_head;
		while let Some(idx) = cursor {
			free += 1;
			cursor = match &self.slots[idx] {
				Slot::Free(next) => *next,
				Slot::Occupied(_) => panic!("free list points at live node"),
			};
			assert!(free <= self.slots.len(), "free list cycle");
		}
		assert_eq!(self.slots.len(), live + free, "leaked slab slots");

		// One ceiling step per operation only keeps pace when l(size) moves
		// by at most one per element, which holds for p <= 1/2.
		if self.size > 0 && self.probability <= 0.5 {
			let ideal = self.ideal_levels().floor() as usize;
			assert!(self.ceiling <= ideal, "ceiling above ideal target");
			if self.ceiling < self.level_cap {
				assert!(ideal <= self.ceiling + 1, "ceiling lags ideal target");
			}
		}
	}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
