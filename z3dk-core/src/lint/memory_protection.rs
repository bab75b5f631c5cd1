//! Memory-protection pass (spec.md §4.7 pass 5).

use z3dk_common::address::Address;

use crate::assemble::WrittenBlock;
use crate::error::Diagnostic;

/// A configured forbidden address range, e.g. reserved SRAM or another
/// romhack's claimed free space.
#[derive(Debug, Clone)]
pub struct MemoryRange {
	pub start: Address,
	pub end: Address,
	pub reason: String,
}

impl MemoryRange {
	#[must_use]
	pub fn intersects(&self, range: &std::ops::Range<u32>) -> bool {
		range.start < self.end.raw() && self.start.raw() < range.end
	}
}

/// Report an error for every written block that intersects a configured
/// [`MemoryRange`].
#[must_use]
pub fn run(blocks: &[WrittenBlock], ranges: &[MemoryRange]) -> Vec<(WrittenBlock, Diagnostic)> {
	let mut diagnostics = Vec::new();
	for block in blocks {
		let span = block.snes_range();
		for range in ranges {
			if range.intersects(&span) {
				diagnostics.push((
					*block,
					Diagnostic::error(format!(
						"write at ${:06X}..${:06X} intersects protected range ${:06X}..${:06X} ({})",
						span.start,
						span.end,
						range.start.raw(),
						range.end.raw(),
						range.reason
					)),
				));
			}
		}
	}
	diagnostics
}

#[cfg(test)]
mod tests {
	use super::*;

	fn block(snes: u32, len: usize) -> WrittenBlock {
		WrittenBlock {
			pc_offset: 0,
			snes_offset: Address::new(snes),
			num_bytes: len,
		}
	}

	#[test]
	fn intersecting_write_is_an_error() {
		let ranges = [MemoryRange {
			start: Address::new(0x7E0000),
			end: Address::new(0x7E2000),
			reason: "save state buffer".to_string(),
		}];
		let blocks = [block(0x7E0010, 4)];
		let diagnostics = run(&blocks, &ranges);
		assert_eq!(diagnostics.len(), 1);
		assert!(diagnostics[0].1.is_error());
	}

	#[test]
	fn disjoint_write_is_clean() {
		let ranges = [MemoryRange {
			start: Address::new(0x7E0000),
			end: Address::new(0x7E2000),
			reason: "save state buffer".to_string(),
		}];
		let blocks = [block(0x008000, 4)];
		assert!(run(&blocks, &ranges).is_empty());
	}
}
