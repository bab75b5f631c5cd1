//! Executable commands (spec.md §4.8 "Commands").

use z3dk_core::assemble::WrittenBlock;

use crate::workspace::Workspace;

/// `z3dk.getBankUsage`: the deduplicated set of written blocks from the
/// most recent analysis pass, sorted by SNES offset.
pub const GET_BANK_USAGE: &str = "z3dk.getBankUsage";

/// Emulator-link commands are proxied straight to the client rather than
/// handled here (spec.md §4.8: out of scope for the server itself).
pub const EMULATOR_COMMAND_PREFIX: &str = "z3dk.emulator.";

#[must_use]
pub fn get_bank_usage(workspace: &Workspace) -> Vec<WrittenBlock> {
	let blocks = workspace.last_written_blocks.lock().unwrap();
	let mut deduped: Vec<WrittenBlock> = Vec::new();
	for block in blocks.iter() {
		if !deduped.contains(block) {
			deduped.push(*block);
		}
	}
	deduped.sort_by_key(|b| b.snes_offset);
	deduped
}

/// True if `command` is one the server proxies to the client unchanged.
#[must_use]
pub fn is_emulator_command(command: &str) -> bool {
	command.starts_with(EMULATOR_COMMAND_PREFIX)
}

#[cfg(test)]
mod tests {
	use z3dk_common::address::Address;

	use super::*;

	#[test]
	fn deduplicates_identical_blocks() {
		let workspace = Workspace::new(std::path::PathBuf::from("/tmp"), z3dk_core::Config::default());
		let block = WrittenBlock { pc_offset: 0, snes_offset: Address::new(0x008000), num_bytes: 4 };
		*workspace.last_written_blocks.lock().unwrap() = vec![block, block];
		assert_eq!(get_bank_usage(&workspace).len(), 1);
	}

	#[test]
	fn recognizes_emulator_command_prefix() {
		assert!(is_emulator_command("z3dk.emulator.readByte"));
		assert!(!is_emulator_command(GET_BANK_USAGE));
	}
}
