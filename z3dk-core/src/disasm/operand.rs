//! Operand formatting (spec.md §4.4.2).

use z3dk_common::address::Address;

use crate::flags::Width;
use crate::instructions::AddressingMode;
use crate::symbols::LabelIndex;

fn le16(bytes: &[u8]) -> u16 {
	u16::from_le_bytes([bytes[0], bytes[1]])
}

fn le24(bytes: &[u8]) -> u32 {
	u32::from(bytes[0]) | (u32::from(bytes[1]) << 8) | (u32::from(bytes[2]) << 16)
}

/// Resolve a bank-relative 16-bit value to its label, falling back to the
/// `$7E`/`$7F` WRAM mirrors before giving up (spec.md §4.4.2 "Absolute/
/// absolute-indexed").
fn label_or_hex16(labels: &LabelIndex, bank: u32, value: u16) -> String {
	let direct = Address::new(bank | u32::from(value));
	if let Some(name) = labels.lookup(direct) {
		return name.to_string();
	}
	for wram_bank in [0x7E_0000u32, 0x7F_0000u32] {
		let mirrored = Address::new(wram_bank | u32::from(value));
		if let Some(name) = labels.lookup(mirrored) {
			return name.to_string();
		}
	}
	format!("${value:04X}")
}

fn label_or_hex24(labels: &LabelIndex, address: Address) -> String {
	labels.lookup(address).map_or_else(|| format!("${:06X}", address.raw()), str::to_string)
}

/// Format `operand_bytes` (already sliced to the decoded instruction's
/// operand length) for `mode` at `snes` (the instruction's own address),
/// given the current widths and label index. Returns an empty string for
/// modes with no operand text (`Implied`, `Accumulator`).
#[must_use]
pub fn format(
	mode: AddressingMode,
	operand_bytes: &[u8],
	snes: Address,
	m_width: Width,
	x_width: Width,
	labels: &LabelIndex,
) -> String {
	use AddressingMode::{
		Absolute, AbsoluteIndexedIndirect, AbsoluteIndirect, AbsoluteIndirectLong, AbsoluteLong,
		AbsoluteLongX, AbsoluteX, AbsoluteY, Accumulator, BlockMove, DirectPage,
		DirectPageIndexedIndirectX, DirectPageIndirect, DirectPageIndirectIndexedY,
		DirectPageIndirectLong, DirectPageIndirectLongIndexedY, DirectPageX, DirectPageY,
		Immediate8, Immediate16, ImmediateM, ImmediateX, Implied, Relative8, RelativeLong,
		StackRelative, StackRelativeIndirectIndexedY,
	};

	let bank = snes.raw() & 0xFF0000;

	match mode {
		Implied | Accumulator => String::new(),
		Immediate8 => format!("#${:02X}", operand_bytes[0]),
		Immediate16 => format!("#${:04X}", le16(operand_bytes)),
		ImmediateM => match m_width {
			Width::W8 => format!("#${:02X}", operand_bytes[0]),
			Width::W16 => format!("#${:04X}", le16(operand_bytes)),
		},
		ImmediateX => match x_width {
			Width::W8 => format!("#${:02X}", operand_bytes[0]),
			Width::W16 => format!("#${:04X}", le16(operand_bytes)),
		},
		Relative8 | RelativeLong => {
			let operand_size = operand_bytes.len();
			let offset: i32 = if operand_size == 1 {
				i32::from(operand_bytes[0] as i8)
			} else {
				i32::from(le16(operand_bytes) as i16)
			};
			let next_pc = snes.raw() as i64 + 1 + operand_size as i64 + i64::from(offset);
			let target = Address::new(bank | (next_pc as u32 & 0xFFFF));
			labels.lookup(target).map_or_else(|| format!("${:06X}", target.raw()), str::to_string)
		}
		DirectPage => format!("${:02X}", operand_bytes[0]),
		DirectPageX => format!("${:02X},X", operand_bytes[0]),
		DirectPageY => format!("${:02X},Y", operand_bytes[0]),
		DirectPageIndirect => format!("(${:02X})", operand_bytes[0]),
		DirectPageIndirectLong => format!("[${:02X}]", operand_bytes[0]),
		DirectPageIndexedIndirectX => format!("(${:02X},X)", operand_bytes[0]),
		DirectPageIndirectIndexedY => format!("(${:02X}),Y", operand_bytes[0]),
		DirectPageIndirectLongIndexedY => format!("[${:02X}],Y", operand_bytes[0]),
		StackRelative => format!("${:02X},S", operand_bytes[0]),
		StackRelativeIndirectIndexedY => format!("(${:02X},S),Y", operand_bytes[0]),
		Absolute => label_or_hex16(labels, bank, le16(operand_bytes)),
		AbsoluteX => format!("{},X", label_or_hex16(labels, bank, le16(operand_bytes))),
		AbsoluteY => format!("{},Y", label_or_hex16(labels, bank, le16(operand_bytes))),
		AbsoluteLong => label_or_hex24(labels, Address::new(le24(operand_bytes))),
		AbsoluteLongX => format!("{},X", label_or_hex24(labels, Address::new(le24(operand_bytes)))),
		AbsoluteIndirect => format!("(${:04X})", le16(operand_bytes)),
		AbsoluteIndirectLong => format!("[${:04X}]", le16(operand_bytes)),
		AbsoluteIndexedIndirect => format!("(${:04X},X)", le16(operand_bytes)),
		BlockMove => format!("${:02X},${:02X}", operand_bytes[0], operand_bytes[1]),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn relative_branch_uses_label_when_registered() {
		let mut labels = LabelIndex::new();
		labels.add_label(Address::new(0x008007), "End");
		let text =
			format(AddressingMode::Relative8, &[0x05], Address::new(0x008000), Width::W8, Width::W8, &labels);
		assert_eq!(text, "End");
	}

	#[test]
	fn relative_branch_falls_back_to_hex() {
		let labels = LabelIndex::new();
		let text =
			format(AddressingMode::Relative8, &[0x05], Address::new(0x008000), Width::W8, Width::W8, &labels);
		assert_eq!(text, "$008007");
	}

	#[test]
	fn absolute_resolves_through_wram_mirror() {
		let mut labels = LabelIndex::new();
		labels.add_label(Address::new(0x7E0010), "PlayerState");
		let text =
			format(AddressingMode::Absolute, &[0x10, 0x00], Address::new(0x008000), Width::W8, Width::W8, &labels);
		assert_eq!(text, "PlayerState");
	}

	#[test]
	fn immediate_m_respects_width() {
		let labels = LabelIndex::new();
		let narrow =
			format(AddressingMode::ImmediateM, &[0x01], Address::new(0x008000), Width::W8, Width::W8, &labels);
		assert_eq!(narrow, "#$01");
		let wide = format(
			AddressingMode::ImmediateM,
			&[0x00, 0x00],
			Address::new(0x008000),
			Width::W16,
			Width::W16,
			&labels,
		);
		assert_eq!(wide, "#$0000");
	}

	#[test]
	fn block_move_prints_both_banks() {
		let labels = LabelIndex::new();
		let text =
			format(AddressingMode::BlockMove, &[0x7E, 0x00], Address::new(0x008000), Width::W8, Width::W8, &labels);
		assert_eq!(text, "$7E,$00");
	}
}
