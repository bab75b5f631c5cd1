//! Analysis/lint engine (spec.md §4.7): consumes an [`AssembleResult`] and
//! reports diagnostics without ever touching ROM bytes on disk itself.

pub mod decode_pass;
pub mod hooks_pass;
pub mod memory_protection;
pub mod org_collision;

use std::collections::HashMap;

use z3dk_common::address::Address;

pub use decode_pass::{DecodeOptions, StateOverride, parse_assume_comment};
pub use memory_protection::MemoryRange;

use crate::assemble::AssembleResult;
use crate::error::Diagnostic;
use crate::flags::Width;
use crate::hooks::HookManifest;

/// Every toggle and piece of configuration the lint passes read (spec.md
/// §4.7, §6).
#[derive(Debug, Clone)]
pub struct LintOptions {
	pub default_m_width: Width,
	pub default_x_width: Width,
	pub warn_unknown_width: bool,
	pub warn_branch_outside_bank: bool,
	pub warn_org_collision: bool,
	pub warn_unauthorized_hook: bool,
	pub warn_unused_symbols: bool,
	pub known_hooks: Option<HookManifest>,
	pub prohibited_memory_ranges: Vec<MemoryRange>,
	pub state_overrides: HashMap<Address, StateOverride>,
}

impl Default for LintOptions {
	fn default() -> Self {
		Self {
			default_m_width: Width::W8,
			default_x_width: Width::W8,
			warn_unknown_width: true,
			warn_branch_outside_bank: true,
			warn_org_collision: true,
			warn_unauthorized_hook: false,
			warn_unused_symbols: false,
			known_hooks: None,
			prohibited_memory_ranges: Vec::new(),
			state_overrides: HashMap::new(),
		}
	}
}

/// Run every enabled pass over `result`, placing each diagnostic via
/// [`AssembleResult::source_map`] when an entry exists for its address
/// (spec.md §4.7 "Diagnostic location").
#[must_use]
pub fn run(result: &AssembleResult, options: &LintOptions) -> Vec<Diagnostic> {
	let mut diagnostics = Vec::new();

	if options.warn_org_collision {
		for (block, diagnostic) in org_collision::run(&result.written_blocks) {
			diagnostics.push(place(result, block.snes_offset, diagnostic));
		}
	}

	let decode_options = DecodeOptions {
		default_m_width: options.default_m_width,
		default_x_width: options.default_x_width,
		warn_unknown_width: options.warn_unknown_width,
		warn_branch_outside_bank: options.warn_branch_outside_bank,
		state_overrides: options.state_overrides.clone(),
	};
	for (address, diagnostic) in decode_pass::run(&result.rom_data, &result.written_blocks, &decode_options) {
		diagnostics.push(place(result, address, diagnostic));
	}

	if options.warn_unauthorized_hook {
		if let Some(known_hooks) = &options.known_hooks {
			for (block, diagnostic) in hooks_pass::run(&result.written_blocks, known_hooks) {
				diagnostics.push(place(result, block.snes_offset, diagnostic));
			}
		}
	}

	if !options.prohibited_memory_ranges.is_empty() {
		for (block, diagnostic) in
			memory_protection::run(&result.written_blocks, &options.prohibited_memory_ranges)
		{
			diagnostics.push(place(result, block.snes_offset, diagnostic));
		}
	}

	if options.warn_unused_symbols {
		for label in &result.labels {
			if !label.used {
				diagnostics.push(place(
					result,
					label.address,
					Diagnostic::warning(format!("label '{}' is never referenced", label.name)),
				));
			}
		}
	}

	diagnostics
}

fn place(result: &AssembleResult, address: Address, diagnostic: Diagnostic) -> Diagnostic {
	match result.source_map.find_entry(address) {
		Some(entry) => {
			let file = result.source_map.file_path(entry.file_id).cloned();
			diagnostic.at(file.unwrap_or_default(), entry.line, 1)
		}
		None => diagnostic,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::assemble::WrittenBlock;
	use crate::sourcemap::{SourceEntry, SourceFile, SourceMap};
	use std::path::PathBuf;

	#[test]
	fn org_collision_is_placed_via_source_map() {
		let mut result = AssembleResult::default();
		result.written_blocks = vec![
			WrittenBlock {
				pc_offset: 0,
				snes_offset: Address::new(0x008000),
				num_bytes: 8,
			},
			WrittenBlock {
				pc_offset: 4,
				snes_offset: Address::new(0x008004),
				num_bytes: 4,
			},
		];
		result.source_map = SourceMap {
			files: vec![SourceFile {
				id: 1,
				crc: 0,
				path: PathBuf::from("main.asm"),
			}],
			entries: vec![SourceEntry {
				address: Address::new(0x008004),
				file_id: 1,
				line: 7,
			}],
		};

		let options = LintOptions::default();
		let diagnostics = run(&result, &options);
		let org = diagnostics.iter().find(|d| d.message.contains("overlaps")).unwrap();
		assert_eq!(org.line, Some(7));
		assert_eq!(org.file, Some(PathBuf::from("main.asm")));
	}
}
