//! Authorized-hook enforcement pass (spec.md §4.7 pass 4).

use crate::assemble::WrittenBlock;
use crate::error::Diagnostic;
use crate::hooks::HookManifest;

/// Warn for every written block whose start doesn't coincide with a known
/// hook address.
#[must_use]
pub fn run(blocks: &[WrittenBlock], known_hooks: &HookManifest) -> Vec<(WrittenBlock, Diagnostic)> {
	blocks
		.iter()
		.filter(|block| !known_hooks.is_known(block.snes_offset))
		.map(|block| {
			(
				*block,
				Diagnostic::warning(format!(
					"write at ${:06X} does not start at a known hook address",
					block.snes_offset.raw()
				)),
			)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use z3dk_common::address::Address;

	use super::*;

	#[test]
	fn unknown_write_warns() {
		let manifest: HookManifest =
			serde_json::from_str(r#"{"hooks":[{"address":"0x008000"}]}"#).unwrap();
		let blocks = [WrittenBlock {
			pc_offset: 0,
			snes_offset: Address::new(0x008010),
			num_bytes: 4,
		}];
		let diagnostics = run(&blocks, &manifest);
		assert_eq!(diagnostics.len(), 1);
	}

	#[test]
	fn known_write_is_silent() {
		let manifest: HookManifest =
			serde_json::from_str(r#"{"hooks":[{"address":"0x008000"}]}"#).unwrap();
		let blocks = [WrittenBlock {
			pc_offset: 0,
			snes_offset: Address::new(0x008000),
			num_bytes: 4,
		}];
		assert!(run(&blocks, &manifest).is_empty());
	}
}
