//! Per-block linear decode pass (spec.md §4.7 passes 2-3).
//!
//! Decodes each written block exactly as the disassembler would, but emits
//! diagnostics instead of text. `; assume m:8 x:16` comments let a romhack
//! author pin the processor width state at a specific address when the
//! linear decode can't otherwise know it (e.g. a block entered via a
//! `JMP (addr)` the assembler couldn't trace).

use std::collections::HashMap;

use z3dk_common::address::Address;

use crate::assemble::WrittenBlock;
use crate::disasm::apply_flag_transition;
use crate::error::Diagnostic;
use crate::flags::{ProcessorWidthState, Width};
use crate::instructions::{AddressingMode, opcode_info};

/// A pinned `m`/`x` width at one address, parsed from an `; assume` comment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateOverride {
	pub m: Option<Width>,
	pub x: Option<Width>,
}

/// Parse `; assume m:8 x:16`-style comment text (the part after `; assume`,
/// or the whole line — both are tolerated) into a [`StateOverride`].
/// Returns `None` if neither `m:` nor `x:` is present.
#[must_use]
pub fn parse_assume_comment(text: &str) -> Option<StateOverride> {
	let text = text.trim().strip_prefix(';').unwrap_or(text).trim();
	let text = text.strip_prefix("assume").unwrap_or(text).trim();

	let mut override_ = StateOverride::default();
	let mut found = false;
	for token in text.split_whitespace() {
		if let Some(value) = token.strip_prefix("m:") {
			override_.m = width_from_str(value);
			found |= override_.m.is_some();
		} else if let Some(value) = token.strip_prefix("x:") {
			override_.x = width_from_str(value);
			found |= override_.x.is_some();
		}
	}
	found.then_some(override_)
}

fn width_from_str(value: &str) -> Option<Width> {
	match value {
		"8" => Some(Width::W8),
		"16" => Some(Width::W16),
		_ => None,
	}
}

/// Options governing passes 2-3.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	pub default_m_width: Width,
	pub default_x_width: Width,
	pub warn_unknown_width: bool,
	pub warn_branch_outside_bank: bool,
	pub state_overrides: HashMap<Address, StateOverride>,
}

/// Decode every block in `blocks` against `rom_data`, returning one
/// `(address, diagnostic)` pair per finding.
#[must_use]
pub fn run(rom_data: &[u8], blocks: &[WrittenBlock], options: &DecodeOptions) -> Vec<(Address, Diagnostic)> {
	let mut diagnostics = Vec::new();
	for block in blocks {
		decode_block(rom_data, block, options, &mut diagnostics);
	}
	diagnostics
}

fn decode_block(
	rom_data: &[u8],
	block: &WrittenBlock,
	options: &DecodeOptions,
	diagnostics: &mut Vec<(Address, Diagnostic)>,
) {
	let mut state = ProcessorWidthState::from_defaults(options.default_m_width, options.default_x_width);
	let mut offset = block.pc_offset;
	let end = block.pc_offset + block.num_bytes;
	let bank = block.snes_offset.raw() & 0xFF0000;

	while offset < end && offset < rom_data.len() {
		let snes = Address::new(bank | ((block.snes_offset.raw() + (offset - block.pc_offset) as u32) & 0xFFFF));

		if let Some(override_) = options.state_overrides.get(&snes) {
			if let Some(m) = override_.m {
				state.m_width = m;
				state.m_known = true;
			}
			if let Some(x) = override_.x {
				state.x_width = x;
				state.x_known = true;
			}
		}

		let opcode = rom_data[offset];
		let info = opcode_info(opcode);
		let operand_size = info.addressing_mode.operand_size(state.m_width, state.x_width);
		if offset + 1 + operand_size > end || offset + 1 + operand_size > rom_data.len() {
			break;
		}
		let operand_bytes = &rom_data[offset + 1..offset + 1 + operand_size];

		if options.warn_unknown_width {
			if info.addressing_mode == AddressingMode::ImmediateM && !state.m_known {
				diagnostics.push((snes, Diagnostic::warning("accumulator width is unknown at this point")));
			}
			if info.addressing_mode == AddressingMode::ImmediateX && !state.x_known {
				diagnostics.push((snes, Diagnostic::warning("index-register width is unknown at this point")));
			}
		}

		if options.warn_branch_outside_bank && info.addressing_mode == AddressingMode::Relative8 {
			let offset_value = i32::from(operand_bytes[0] as i8);
			let local_pc = snes.raw() & 0xFFFF;
			let target = (local_pc as i32 + 1 + operand_size as i32 + offset_value) as u32 & 0xFFFF;
			if !(0x8000..=0xFFFF).contains(&target) {
				diagnostics.push((snes, Diagnostic::warning("branch target leaves the current bank")));
			}
		}

		apply_flag_transition(&mut state, info.mnemonic, operand_bytes);
		offset += 1 + operand_size;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn options() -> DecodeOptions {
		DecodeOptions {
			default_m_width: Width::W8,
			default_x_width: Width::W8,
			warn_unknown_width: true,
			warn_branch_outside_bank: true,
			state_overrides: HashMap::new(),
		}
	}

	#[test]
	fn parses_assume_comment() {
		let override_ = parse_assume_comment("; assume m:8 x:16").unwrap();
		assert_eq!(override_.m, Some(Width::W8));
		assert_eq!(override_.x, Some(Width::W16));
	}

	#[test]
	fn non_assume_comment_parses_to_none() {
		assert!(parse_assume_comment("; just a comment").is_none());
	}

	#[test]
	fn branch_outside_bank_warns() {
		let mut rom = vec![0u8; 0x8000];
		rom[0x7FFE] = 0x10; // BPL
		rom[0x7FFF] = 0x7F; // branch target well outside bank-local range
		let block = WrittenBlock {
			pc_offset: 0x7FFE,
			snes_offset: Address::new(0x00FFFE),
			num_bytes: 2,
		};
		let diagnostics = run(&rom, &[block], &options());
		assert_eq!(diagnostics.len(), 1);
	}

	#[test]
	fn unknown_immediate_m_warns_without_override() {
		let mut rom = vec![0u8; 4];
		rom[0] = 0x28; // PLP
		rom[1] = 0xA9; // LDA #imm (ImmediateM)
		rom[2] = 0x00;
		let block = WrittenBlock {
			pc_offset: 0,
			snes_offset: Address::new(0x008000),
			num_bytes: 3,
		};
		let diagnostics = run(&rom, &[block], &options());
		assert!(diagnostics.iter().any(|(_, d)| d.message.contains("accumulator width")));
	}

	#[test]
	fn state_override_pins_width() {
		let mut rom = vec![0u8; 4];
		rom[0] = 0xA9; // LDA #imm
		rom[1] = 0x00;
		let mut overrides = HashMap::new();
		overrides.insert(Address::new(0x008000), StateOverride {
			m: Some(Width::W8),
			x: None,
		});
		let mut opts = options();
		opts.state_overrides = overrides;
		let block = WrittenBlock {
			pc_offset: 0,
			snes_offset: Address::new(0x008000),
			num_bytes: 2,
		};
		let diagnostics = run(&rom, &[block], &opts);
		assert!(diagnostics.is_empty());
	}
}
