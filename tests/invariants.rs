//! # Invariant Tests
//!
//! Randomized operation streams and boundary configurations, with the
//! structural invariants validated after every single operation. Slower per
//! operation than the integration workloads, so the streams are shorter.

use rand::{rngs::StdRng, Rng, SeedableRng};
use thicket::{ScapegoatTree, SkipList};

fn height_bound(size: usize, alpha: f64) -> usize {
	((size as f64).ln() / (1.0 / alpha).ln()).floor() as usize
}

// ===========================================================================
// Tree Height Bound
// ===========================================================================

/// Sorted input forces a reconstruction roughly every time the depth bound
/// is crossed; the height must re-enter the bound each time.
#[test]
fn tree_height_bound_holds_under_sorted_input() {
	for alpha in [0.55, 0.57, 0.7, 0.9] {
		let mut tree = ScapegoatTree::with_alpha(alpha).unwrap();
		for k in 0..512 {
			tree.insert(k);
			tree.assert_invariants();
			if tree.len() >= 2 {
				assert!(
					tree.height() <= height_bound(tree.len(), alpha) + 1,
					"alpha {alpha}: height {} exceeds bound at size {}",
					tree.height(),
					tree.len()
				);
			}
		}
	}
}

#[test]
fn tree_random_stream_keeps_invariants_every_step() {
	let mut tree = ScapegoatTree::new();
	let mut rng = StdRng::seed_from_u64(7);

	for _ in 0..3_000 {
		let key: i64 = rng.random_range(0..200);
		match rng.random_range(0..3) {
			0 => {
				tree.insert(key);
			}
			1 => {
				tree.remove(&key);
			}
			_ => {
				tree.get(&key);
			}
		}
		tree.assert_invariants();
	}
}

/// Alpha close to either end of the open interval is legal; close to 1 the
/// tree degrades gracefully toward an unbalanced BST, close to 0.5 it
/// rebuilds aggressively.
#[test]
fn tree_boundary_alphas_behave() {
	let mut eager = ScapegoatTree::with_alpha(0.501).unwrap();
	let mut lazy = ScapegoatTree::with_alpha(0.999).unwrap();
	for k in 0..256 {
		eager.insert(k);
		lazy.insert(k);
		eager.assert_invariants();
		lazy.assert_invariants();
	}
	assert!(
		eager.restructure_count() > lazy.restructure_count(),
		"a tighter alpha must rebuild at least as often"
	);
	assert_eq!(
		eager.iter().copied().collect::<Vec<_>>(),
		lazy.iter().copied().collect::<Vec<_>>()
	);
}

#[test]
fn tree_duplicate_heavy_stream_never_mutates_on_rejects() {
	let mut tree = ScapegoatTree::new();
	let mut rng = StdRng::seed_from_u64(11);

	for _ in 0..2_000 {
		// Tiny key space: most inserts are duplicates.
		let key: i64 = rng.random_range(0..16);
		let had = tree.contains(&key);
		let inserted = tree.insert(key);
		assert_eq!(inserted, !had);
		tree.assert_invariants();
	}
	assert!(tree.len() <= 16);
}

/// The post-deletion trigger must keep the tree no deeper than one past the
/// bound for the shrunken size, because the full rebuild fires before the
/// size drifts far from the high-water mark.
#[test]
fn tree_shrink_phase_rebuild_restores_balance() {
	let mut tree = ScapegoatTree::new();
	for k in 0..1_024 {
		tree.insert(k);
	}
	for k in 0..1_000 {
		tree.remove(&k);
		tree.assert_invariants();
	}
	assert_eq!(tree.len(), 24);
	assert!(tree.height() <= height_bound(24, 0.57) + 1);
}

// ===========================================================================
// List Ceiling Window
// ===========================================================================

#[test]
fn list_random_stream_keeps_invariants_every_step() {
	let mut list = SkipList::with_seed(32, 0.5, 13).unwrap();
	let mut rng = StdRng::seed_from_u64(17);

	for _ in 0..3_000 {
		let key: i64 = rng.random_range(0..200);
		match rng.random_range(0..3) {
			0 => {
				list.insert(key, key);
			}
			1 => {
				list.remove(&key);
			}
			_ => {
				list.get(&key);
			}
		}
		list.assert_invariants();
	}
}

/// The ceiling must trail `floor(l(size))` by at most one in either
/// direction across a full grow-then-shrink cycle.
#[test]
fn list_ceiling_tracks_ideal_levels_with_hysteresis() {
	let mut list = SkipList::with_seed(32, 0.5, 19).unwrap();
	let ideal = |size: usize| ((size as f64).ln() / 2f64.ln()).floor() as usize;

	for k in 0..2_048i64 {
		list.insert(k, k);
		let target = ideal(list.len());
		let ceiling = list.active_level_ceiling();
		assert!(target <= ceiling + 1, "ceiling {ceiling} lags target {target}");
		assert!(ceiling <= target, "ceiling {ceiling} ahead of target {target}");
	}
	for k in 0..2_047i64 {
		list.remove(&k);
		if !list.is_empty() {
			let target = ideal(list.len());
			assert!(list.active_level_ceiling() <= target);
		}
		list.assert_invariants();
	}
	assert_eq!(list.active_level_ceiling(), 0);
}

#[test]
fn list_boundary_probabilities_behave() {
	// Near-zero: almost everything stays at level 0.
	let mut flat = SkipList::with_seed(32, 0.001, 23).unwrap();
	// Near-one: draws hit the cap almost every time.
	let mut tall = SkipList::with_seed(8, 0.999, 23).unwrap();

	for k in 0..512i64 {
		flat.insert(k, k);
		tall.insert(k, k);
		flat.assert_invariants();
		tall.assert_invariants();
	}
	assert!(tall.active_level_ceiling() <= 8);
	for k in 0..512i64 {
		assert_eq!(flat.get(&k), Some(&k));
		assert_eq!(tall.get(&k), Some(&k));
	}
}

#[test]
fn list_level_cap_zero_degenerates_to_linked_list() {
	let mut list: SkipList<i64, i64> = SkipList::with_seed(0, 0.5, 29).unwrap();
	for k in 0..256 {
		list.insert(k, -k);
		list.assert_invariants();
	}
	assert_eq!(list.active_level_ceiling(), 0);
	for k in 0..256 {
		assert_eq!(list.get(&k), Some(&-k));
	}
	for k in 0..256 {
		assert_eq!(list.remove(&k), Some(-k));
		list.assert_invariants();
	}
	assert!(list.is_empty());
}

#[test]
fn list_update_heavy_stream_never_relinks() {
	let mut list = SkipList::with_seed(32, 0.5, 31).unwrap();
	let mut rng = StdRng::seed_from_u64(37);

	for k in 0..64i64 {
		list.insert(k, 0);
	}
	let shape: Vec<Vec<i64>> = (0..=list.active_level_ceiling())
		.map(|level| list.level_iter(level).copied().collect())
		.collect();

	for _ in 0..1_000 {
		let key = rng.random_range(0..64i64);
		let value = rng.random::<i64>();
		assert!(list.insert(key, value).is_some());
		assert_eq!(list.get(&key), Some(&value));
	}

	// Updates replace values only; every level chain is untouched.
	let after: Vec<Vec<i64>> = (0..=list.active_level_ceiling())
		.map(|level| list.level_iter(level).copied().collect())
		.collect();
	assert_eq!(shape, after);
	assert_eq!(list.len(), 64);
	list.assert_invariants();
}
