//! # Error Types
//!
//! The only fallible surface in this crate is construction: both structures
//! take tuning parameters whose valid ranges are open intervals, and a value
//! outside the range makes the structure's balancing criterion meaningless
//! rather than merely slow. Everything after construction communicates
//! through plain return values - a duplicate insert, a missed removal, or a
//! failed search is an ordinary outcome, not an error.
//!
//! ## Why the ranges are open
//!
//! - A tree balance factor of exactly `0.5` (or below) demands that both
//!   children of every node hold at most half its weight, which no split of
//!   an even-sized subtree can satisfy; a factor of `1.0` never flags any
//!   node, so the height bound degenerates.
//! - A promotion probability of `0.0` never promotes (the list collapses to
//!   a linked list), and `1.0` promotes unboundedly.

use thiserror::Error;

/// Errors raised when constructing a structure with invalid parameters.
///
/// A `ConfigError` is fatal to the instance being constructed and nothing
/// else; no already-built structure is ever invalidated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
	/// The tree balance factor must lie strictly between 0.5 and 1.
	#[error("balance factor {0} outside (0.5, 1)")]
	BalanceFactor(f64),

	/// The skip list promotion probability must lie strictly between 0 and 1.
	#[error("promotion probability {0} outside (0, 1)")]
	PromotionProbability(f64),
}

/// A Result type alias using our custom Error type.
pub type Result<T> = std::result::Result<T, ConfigError>;
