//! The assembler collaborator's source map (spec.md §3, §6): the bridge from
//! a decoded SNES address back to the `(file, line)` that produced it, used
//! to place lint diagnostics (spec.md §4.7) and to drive go-to-definition.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use z3dk_common::address::Address;

/// One file referenced by a [`SourceMap`], identified by the collaborator's
/// own numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
	pub id: u32,
	pub crc: u32,
	pub path: PathBuf,
}

/// One address-to-source mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
	pub address: Address,
	pub file_id: u32,
	pub line: usize,
}

/// `files` plus `entries`, exactly mirroring the collaborator contract's
/// `source_map` field (spec.md §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMap {
	pub files: Vec<SourceFile>,
	pub entries: Vec<SourceEntry>,
}

impl SourceMap {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn file_path(&self, file_id: u32) -> Option<&PathBuf> {
		self.files.iter().find(|f| f.id == file_id).map(|f| &f.path)
	}

	/// The first entry recorded for `address`, used by [`Self::find_entry`]
	/// to place lint diagnostics (spec.md §4.7's "Diagnostic location").
	#[must_use]
	pub fn find_entry(&self, address: Address) -> Option<&SourceEntry> {
		self.entries.iter().find(|entry| entry.address == address)
	}

	/// The first entry whose address equals `address`, used by
	/// go-to-definition to resolve a label back to its defining line
	/// (spec.md §4.8 Definition).
	#[must_use]
	pub fn entry_for_address(&self, address: Address) -> Option<&SourceEntry> {
		self.find_entry(address)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn finds_the_first_matching_entry() {
		let map = SourceMap {
			files: vec![SourceFile {
				id: 1,
				crc: 0,
				path: PathBuf::from("main.asm"),
			}],
			entries: vec![
				SourceEntry {
					address: Address::new(0x008000),
					file_id: 1,
					line: 10,
				},
				SourceEntry {
					address: Address::new(0x008000),
					file_id: 1,
					line: 99,
				},
			],
		};
		let entry = map.find_entry(Address::new(0x008000)).unwrap();
		assert_eq!(entry.line, 10);
		assert_eq!(map.file_path(1), Some(&PathBuf::from("main.asm")));
	}

	#[test]
	fn missing_address_returns_none() {
		let map = SourceMap::new();
		assert!(map.find_entry(Address::new(0x008000)).is_none());
	}
}
