//! The assembler collaborator contract (spec.md §6).
//!
//! This crate never assembles anything. The lint engine and the LSP both
//! consume an [`AssembleResult`] produced by an external collaborator (a
//! real 65816 assembler) — these types exist so both can depend on a single,
//! shared shape for that boundary instead of each inventing their own.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use z3dk_common::address::{Address, Mapper};

use crate::error::Diagnostic;
use crate::sourcemap::SourceMap;

/// An in-memory overlay for a file the collaborator should read instead of
/// the copy on disk — how the LSP feeds open-but-unsaved buffers into the
/// assembler (spec.md §4.8 step 3).
#[derive(Debug, Clone)]
pub struct MemoryFile {
	pub path: PathBuf,
	pub contents: String,
}

/// Input to the assembler collaborator.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
	pub patch_path: PathBuf,
	pub rom_data: Vec<u8>,
	pub include_paths: Vec<PathBuf>,
	pub defines: Vec<(String, Option<String>)>,
	pub std_includes_path: Option<PathBuf>,
	pub std_defines_path: Option<PathBuf>,
	pub memory_files: Vec<MemoryFile>,
}

/// A named label as reported by the collaborator, including whether
/// anything referenced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledLabel {
	pub name: String,
	pub address: Address,
	pub used: bool,
}

/// A named `!define`/constant as reported by the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledDefine {
	pub name: String,
	pub value: String,
}

/// A contiguous span of ROM bytes written by one assembly pass — the unit
/// the lint engine's ORG-collision, hook, and memory-protection passes all
/// operate on (spec.md §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenBlock {
	pub pc_offset: usize,
	pub snes_offset: Address,
	pub num_bytes: usize,
}

impl WrittenBlock {
	/// The half-open SNES address range this block covers.
	#[must_use]
	pub fn snes_range(&self) -> std::ops::Range<u32> {
		let start = self.snes_offset.raw();
		start..start + self.num_bytes as u32
	}
}

/// Output of the assembler collaborator: everything the lint engine and the
/// LSP need, in one shape, regardless of which underlying assembler
/// produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssembleResult {
	pub success: bool,
	pub diagnostics: Vec<Diagnostic>,
	pub prints: Vec<String>,
	pub labels: Vec<AssembledLabel>,
	pub defines: Vec<AssembledDefine>,
	pub written_blocks: Vec<WrittenBlock>,
	pub rom_data: Vec<u8>,
	pub rom_size: usize,
	pub mapper: Option<Mapper>,
	pub source_map: SourceMap,
	pub wla_symbols: Option<String>,
	pub nocash_symbols: Option<String>,
}

impl AssembleResult {
	/// True if any reported diagnostic is an error — batch tools exit
	/// nonzero on this (spec.md §7).
	#[must_use]
	pub fn has_error_diagnostics(&self) -> bool {
		self.diagnostics.iter().any(Diagnostic::is_error)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn written_block_range_is_half_open() {
		let block = WrittenBlock {
			pc_offset: 0,
			snes_offset: Address::new(0x008000),
			num_bytes: 4,
		};
		assert_eq!(block.snes_range(), 0x008000..0x008004);
	}

	#[test]
	fn has_error_diagnostics_checks_severity() {
		let mut result = AssembleResult::default();
		result.diagnostics.push(Diagnostic::warning("unused symbol"));
		assert!(!result.has_error_diagnostics());
		result.diagnostics.push(Diagnostic::error("org collision"));
		assert!(result.has_error_diagnostics());
	}
}
