//! Debounce scheduler (spec.md §4.8 "Debounce scheduler").
//!
//! A new `didChange` supersedes any pending analysis by simply bumping
//! `last_change` again — the caller just needs to know when the quiet
//! period has elapsed for every open document.

use std::time::{Duration, Instant};

use z3dk_common::cst::DEBOUNCE_WINDOW_MS;

/// The debounce window itself, shared with [`z3dk_common::cst::DEBOUNCE_WINDOW_MS`]
/// so the CLI and the LSP never drift apart on this constant.
pub const WINDOW: Duration = Duration::from_millis(DEBOUNCE_WINDOW_MS);

/// True once `last_change` is old enough that a full re-analysis pass may
/// run for the document it belongs to.
#[must_use]
pub fn is_quiet(last_change: Instant, now: Instant) -> bool {
	now.saturating_duration_since(last_change) >= WINDOW
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn not_quiet_immediately_after_a_change() {
		let now = Instant::now();
		assert!(!is_quiet(now, now));
	}

	#[test]
	fn quiet_once_the_window_elapses() {
		let now = Instant::now();
		let later = now + WINDOW + Duration::from_millis(1);
		assert!(is_quiet(now, later));
	}
}
