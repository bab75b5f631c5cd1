//! ORG-collision pass (spec.md §4.7 pass 1).
//!
//! Flags *any* overlap between written blocks as an error. This is
//! deliberately conservative: an assembler that legitimately re-enters the
//! same region via `pushpc`/`pullpc` will trip this pass too (spec.md §9's
//! open question notes this as a known limitation, not a bug to fix here).

use crate::assemble::WrittenBlock;
use crate::error::Diagnostic;

/// Sort `blocks` by start address and report one error per overlap between
/// consecutive ranges.
#[must_use]
pub fn run(blocks: &[WrittenBlock]) -> Vec<(WrittenBlock, Diagnostic)> {
	let mut sorted: Vec<&WrittenBlock> = blocks.iter().collect();
	sorted.sort_by_key(|b| b.snes_offset.raw());

	let mut diagnostics = Vec::new();
	for pair in sorted.windows(2) {
		let [prev, next] = pair else { continue };
		let prev_range = prev.snes_range();
		if next.snes_range().start < prev_range.end {
			diagnostics.push((
				**next,
				Diagnostic::error(format!(
					"written block at ${:06X} overlaps block at ${:06X}..${:06X}",
					next.snes_offset.raw(),
					prev_range.start,
					prev_range.end
				)),
			));
		}
	}
	diagnostics
}

#[cfg(test)]
mod tests {
	use z3dk_common::address::Address;

	use super::*;

	fn block(snes: u32, len: usize) -> WrittenBlock {
		WrittenBlock {
			pc_offset: 0,
			snes_offset: Address::new(snes),
			num_bytes: len,
		}
	}

	#[test]
	fn no_overlap_is_clean() {
		let blocks = [block(0x008000, 4), block(0x008004, 4)];
		assert!(run(&blocks).is_empty());
	}

	#[test]
	fn overlap_reports_one_error() {
		let blocks = [block(0x008000, 8), block(0x008004, 4)];
		let diagnostics = run(&blocks);
		assert_eq!(diagnostics.len(), 1);
		assert!(diagnostics[0].1.is_error());
	}
}
