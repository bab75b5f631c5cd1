//! Linear bank-by-bank disassembly (spec.md §4.4).

pub mod hookcomment;
pub mod operand;

use std::io::Write as _;
use std::path::PathBuf;

use z3dk_common::address::{Address, pc_to_snes_lorom};

use crate::error::CoreResult;
use crate::flags::{ProcessorWidthState, Width};
use crate::hooks::HookManifest;
use crate::instructions::{Mnemonic, opcode_info};
use crate::symbols::LabelIndex;

/// Input to a disassembly run. Only LoROM mapping is implemented (spec.md
/// §4.4's "Only LoROM mapping is specified").
#[derive(Debug, Clone)]
pub struct DisasmOptions {
	pub bank_start: u8,
	pub bank_end: u8,
	pub default_m_width: Width,
	pub default_x_width: Width,
	pub output_dir: PathBuf,
}

/// Disassemble `rom` into one `bank_XX.asm` file per bank under
/// `options.output_dir`, using `labels` for operand substitution and
/// `hooks` for hook-comment emission.
///
/// # Errors
/// Propagates any I/O failure writing an output file.
pub fn run(
	rom: &[u8],
	labels: &LabelIndex,
	hooks: Option<&HookManifest>,
	options: &DisasmOptions,
) -> CoreResult<()> {
	std::fs::create_dir_all(&options.output_dir)?;
	for bank in options.bank_start..=options.bank_end {
		let pc_start = usize::from(bank) * 0x8000;
		if pc_start >= rom.len() {
			break;
		}
		let text = disassemble_bank(rom, bank, labels, hooks, options);
		let path = options.output_dir.join(format!("bank_{bank:02x}.asm"));
		let mut file = std::fs::File::create(&path)?;
		file.write_all(text.as_bytes())?;
	}
	Ok(())
}

/// Disassemble a single bank's bytes to text, without touching the
/// filesystem — the piece `run` and tests both exercise.
#[must_use]
pub fn disassemble_bank(
	rom: &[u8],
	bank: u8,
	labels: &LabelIndex,
	hooks: Option<&HookManifest>,
	options: &DisasmOptions,
) -> String {
	let mut state = ProcessorWidthState::from_defaults(options.default_m_width, options.default_x_width);
	let mut pc = usize::from(bank) * 0x8000;
	let end = (pc + 0x8000).min(rom.len());

	let bank_start_snes = pc_to_snes_lorom(pc);
	let mut out = format!("; bank {bank:02X}\norg ${:06X}\n\n", bank_start_snes.raw());

	while pc < end {
		let snes = pc_to_snes_lorom(pc);

		for name in labels.lookup_all(snes) {
			out.push_str(name);
			out.push_str(":\n");
		}

		if let Some(manifest) = hooks {
			for hook in &manifest.hooks {
				if hook.resolved_address() == snes {
					out.push_str(&hookcomment::format(hook));
				}
			}
		}

		let opcode = rom[pc];
		let info = opcode_info(opcode);
		let operand_size = info.addressing_mode.operand_size(state.m_width, state.x_width);

		if pc + 1 + operand_size > end {
			out.push_str(&format!("  db ${opcode:02X}\n"));
			pc += 1;
			continue;
		}

		let operand_bytes = &rom[pc + 1..pc + 1 + operand_size];
		let operand_text =
			operand::format(info.addressing_mode, operand_bytes, snes, state.m_width, state.x_width, labels);

		if operand_text.is_empty() {
			out.push_str(&format!("  {}\n", info.mnemonic));
		} else {
			out.push_str(&format!("  {} {}\n", info.mnemonic, operand_text));
		}

		apply_flag_transition(&mut state, info.mnemonic, operand_bytes);
		pc += 1 + operand_size;
	}

	out
}

/// Update `state` per the flag-inference rules of spec.md §4.4.3. Shared
/// with the lint engine's per-block decode pass (spec.md §4.7), which
/// applies the identical transition table.
pub(crate) fn apply_flag_transition(
	state: &mut ProcessorWidthState,
	mnemonic: Mnemonic,
	operand_bytes: &[u8],
) {
	match mnemonic {
		Mnemonic::Rep => state.rep(operand_bytes[0]),
		Mnemonic::Sep => state.sep(operand_bytes[0]),
		Mnemonic::Xce => state.xce(),
		Mnemonic::Plp | Mnemonic::Rti => state.mark_unknown(),
		_ => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn options() -> DisasmOptions {
		DisasmOptions {
			bank_start: 0,
			bank_end: 0,
			default_m_width: Width::W8,
			default_x_width: Width::W8,
			output_dir: PathBuf::new(),
		}
	}

	#[test]
	fn flag_inference_scenario() {
		// SEP #$30 ; LDA #$01 ; REP #$30 ; LDA #$0000
		let mut rom = vec![0u8; 0x8000];
		rom[0..9].copy_from_slice(&[0xE2, 0x30, 0xA9, 0x01, 0xC2, 0x30, 0xA9, 0x00, 0x00]);
		let labels = LabelIndex::new();
		let text = disassemble_bank(&rom, 0, &labels, None, &options());
		assert!(text.contains("SEP #$30"));
		assert!(text.contains("LDA #$01\n"));
		assert!(text.contains("REP #$30"));
		assert!(text.contains("LDA #$0000"));
	}

	#[test]
	fn label_substitution_on_branch() {
		let mut rom = vec![0u8; 0x8000];
		rom[0] = 0x10; // BPL
		rom[1] = 0x05;
		let mut labels = LabelIndex::new();
		labels.add_label(Address::new(0x008007), "End");
		let text = disassemble_bank(&rom, 0, &labels, None, &options());
		assert!(text.contains("BPL End"));
	}

	#[test]
	fn bank_end_truncation_emits_db() {
		let mut rom = vec![0u8; 0x8000];
		rom[0x7FFF] = 0xAD; // LDA absolute, needs 2 operand bytes, none remain
		let labels = LabelIndex::new();
		let text = disassemble_bank(&rom, 0, &labels, None, &options());
		assert!(text.contains("db $AD"));
	}

	#[test]
	fn header_includes_bank_and_org() {
		let rom = vec![0xEAu8; 0x8000];
		let labels = LabelIndex::new();
		let text = disassemble_bank(&rom, 0, &labels, None, &options());
		assert!(text.starts_with("; bank 00\norg $008000\n\n"));
	}
}
