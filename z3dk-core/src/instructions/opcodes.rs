//! 65816 opcode mnemonics and the 256-entry opcode table (spec.md §4.1).
//!
//! The table is the single source of truth shared by the disassembler, the
//! lint engine's per-block decode pass, and the language server's semantic
//! token classifier — none of them may maintain their own copy of
//! opcode-to-mnemonic knowledge.

use std::fmt;
use std::sync::LazyLock;

use crate::instructions::addressing::AddressingMode;

/// 65816 instruction mnemonics, including the enhancements over the 6502/65C02
/// (`BRL`, `COP`, `JML`, `JSL`, `MVN`/`MVP`, `PEA`/`PEI`/`PER`, `PHB`/`PHD`/`PHK`,
/// `PLB`/`PLD`, `REP`/`SEP`, `RTL`, `TCD`/`TCS`/`TDC`/`TSC`, `TXY`/`TYX`, `WAI`,
/// `WDM`, `XBA`, `XCE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
	Adc,
	And,
	Asl,
	Bcc,
	Bcs,
	Beq,
	Bit,
	Bmi,
	Bne,
	Bpl,
	Bra,
	Brk,
	Brl,
	Bvc,
	Bvs,
	Clc,
	Cld,
	Cli,
	Clv,
	Cmp,
	Cop,
	Cpx,
	Cpy,
	Dec,
	Dex,
	Dey,
	Eor,
	Inc,
	Inx,
	Iny,
	Jml,
	Jmp,
	Jsl,
	Jsr,
	Lda,
	Ldx,
	Ldy,
	Lsr,
	Mvn,
	Mvp,
	Nop,
	Ora,
	Pea,
	Pei,
	Per,
	Pha,
	Phb,
	Phd,
	Phk,
	Php,
	Phx,
	Phy,
	Pla,
	Plb,
	Pld,
	Plp,
	Plx,
	Ply,
	Rep,
	Rol,
	Ror,
	Rti,
	Rtl,
	Rts,
	Sbc,
	Sec,
	Sed,
	Sei,
	Sep,
	Sta,
	Stp,
	Stx,
	Sty,
	Stz,
	Tax,
	Tay,
	Tcd,
	Tcs,
	Tdc,
	Trb,
	Tsb,
	Tsc,
	Tsx,
	Txa,
	Txs,
	Txy,
	Tya,
	Tyx,
	Wai,
	Wdm,
	Xba,
	Xce,
}

impl fmt::Display for Mnemonic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl Mnemonic {
	/// The canonical upper-case mnemonic text, as emitted by the
	/// disassembler and matched (case-insensitively) by completion.
	#[must_use]
	pub fn name(self) -> &'static str {
		match self {
			Self::Adc => "ADC",
			Self::And => "AND",
			Self::Asl => "ASL",
			Self::Bcc => "BCC",
			Self::Bcs => "BCS",
			Self::Beq => "BEQ",
			Self::Bit => "BIT",
			Self::Bmi => "BMI",
			Self::Bne => "BNE",
			Self::Bpl => "BPL",
			Self::Bra => "BRA",
			Self::Brk => "BRK",
			Self::Brl => "BRL",
			Self::Bvc => "BVC",
			Self::Bvs => "BVS",
			Self::Clc => "CLC",
			Self::Cld => "CLD",
			Self::Cli => "CLI",
			Self::Clv => "CLV",
			Self::Cmp => "CMP",
			Self::Cop => "COP",
			Self::Cpx => "CPX",
			Self::Cpy => "CPY",
			Self::Dec => "DEC",
			Self::Dex => "DEX",
			Self::Dey => "DEY",
			Self::Eor => "EOR",
			Self::Inc => "INC",
			Self::Inx => "INX",
			Self::Iny => "INY",
			Self::Jml => "JML",
			Self::Jmp => "JMP",
			Self::Jsl => "JSL",
			Self::Jsr => "JSR",
			Self::Lda => "LDA",
			Self::Ldx => "LDX",
			Self::Ldy => "LDY",
			Self::Lsr => "LSR",
			Self::Mvn => "MVN",
			Self::Mvp => "MVP",
			Self::Nop => "NOP",
			Self::Ora => "ORA",
			Self::Pea => "PEA",
			Self::Pei => "PEI",
			Self::Per => "PER",
			Self::Pha => "PHA",
			Self::Phb => "PHB",
			Self::Phd => "PHD",
			Self::Phk => "PHK",
			Self::Php => "PHP",
			Self::Phx => "PHX",
			Self::Phy => "PHY",
			Self::Pla => "PLA",
			Self::Plb => "PLB",
			Self::Pld => "PLD",
			Self::Plp => "PLP",
			Self::Plx => "PLX",
			Self::Ply => "PLY",
			Self::Rep => "REP",
			Self::Rol => "ROL",
			Self::Ror => "ROR",
			Self::Rti => "RTI",
			Self::Rtl => "RTL",
			Self::Rts => "RTS",
			Self::Sbc => "SBC",
			Self::Sec => "SEC",
			Self::Sed => "SED",
			Self::Sei => "SEI",
			Self::Sep => "SEP",
			Self::Sta => "STA",
			Self::Stp => "STP",
			Self::Stx => "STX",
			Self::Sty => "STY",
			Self::Stz => "STZ",
			Self::Tax => "TAX",
			Self::Tay => "TAY",
			Self::Tcd => "TCD",
			Self::Tcs => "TCS",
			Self::Tdc => "TDC",
			Self::Trb => "TRB",
			Self::Tsb => "TSB",
			Self::Tsc => "TSC",
			Self::Tsx => "TSX",
			Self::Txa => "TXA",
			Self::Txs => "TXS",
			Self::Txy => "TXY",
			Self::Tya => "TYA",
			Self::Tyx => "TYX",
			Self::Wai => "WAI",
			Self::Wdm => "WDM",
			Self::Xba => "XBA",
			Self::Xce => "XCE",
		}
	}

	/// A one-line description, as shown by hover (spec.md §4.8 Hover).
	#[must_use]
	pub fn description(self) -> &'static str {
		match self {
			Self::Adc => "Add with Carry",
			Self::And => "AND Accumulator with Memory",
			Self::Asl => "Arithmetic Shift Left",
			Self::Bcc => "Branch if Carry Clear",
			Self::Bcs => "Branch if Carry Set",
			Self::Beq => "Branch if Equal",
			Self::Bit => "Test Bits",
			Self::Bmi => "Branch if Minus",
			Self::Bne => "Branch if Not Equal",
			Self::Bpl => "Branch if Plus",
			Self::Bra => "Branch Always",
			Self::Brk => "Software Break",
			Self::Brl => "Branch Always Long",
			Self::Bvc => "Branch if Overflow Clear",
			Self::Bvs => "Branch if Overflow Set",
			Self::Clc => "Clear Carry Flag",
			Self::Cld => "Clear Decimal Mode Flag",
			Self::Cli => "Clear Interrupt Disable Flag",
			Self::Clv => "Clear Overflow Flag",
			Self::Cmp => "Compare Accumulator with Memory",
			Self::Cop => "Co-Processor Enable",
			Self::Cpx => "Compare X Register with Memory",
			Self::Cpy => "Compare Y Register with Memory",
			Self::Dec => "Decrement",
			Self::Dex => "Decrement X Register",
			Self::Dey => "Decrement Y Register",
			Self::Eor => "Exclusive-OR Accumulator with Memory",
			Self::Inc => "Increment",
			Self::Inx => "Increment X Register",
			Self::Iny => "Increment Y Register",
			Self::Jml => "Jump Long",
			Self::Jmp => "Jump",
			Self::Jsl => "Jump to Subroutine Long",
			Self::Jsr => "Jump to Subroutine",
			Self::Lda => "Load Accumulator from Memory",
			Self::Ldx => "Load X Register from Memory",
			Self::Ldy => "Load Y Register from Memory",
			Self::Lsr => "Logical Shift Right",
			Self::Mvn => "Block Move Negative",
			Self::Mvp => "Block Move Positive",
			Self::Nop => "No Operation",
			Self::Ora => "OR Accumulator with Memory",
			Self::Pea => "Push Effective Absolute Address",
			Self::Pei => "Push Effective Indirect Address",
			Self::Per => "Push Effective PC-Relative Address",
			Self::Pha => "Push Accumulator",
			Self::Phb => "Push Data Bank Register",
			Self::Phd => "Push Direct Page Register",
			Self::Phk => "Push Program Bank Register",
			Self::Php => "Push Processor Status",
			Self::Phx => "Push X Register",
			Self::Phy => "Push Y Register",
			Self::Pla => "Pull Accumulator",
			Self::Plb => "Pull Data Bank Register",
			Self::Pld => "Pull Direct Page Register",
			Self::Plp => "Pull Processor Status",
			Self::Plx => "Pull X Register",
			Self::Ply => "Pull Y Register",
			Self::Rep => "Reset Processor Status Bits",
			Self::Rol => "Rotate Left",
			Self::Ror => "Rotate Right",
			Self::Rti => "Return from Interrupt",
			Self::Rtl => "Return from Subroutine Long",
			Self::Rts => "Return from Subroutine",
			Self::Sbc => "Subtract with Borrow from Accumulator",
			Self::Sec => "Set Carry Flag",
			Self::Sed => "Set Decimal Mode Flag",
			Self::Sei => "Set Interrupt Disable Flag",
			Self::Sep => "Set Processor Status Bits",
			Self::Sta => "Store Accumulator to Memory",
			Self::Stp => "Stop the Processor",
			Self::Stx => "Store X Register to Memory",
			Self::Sty => "Store Y Register to Memory",
			Self::Stz => "Store Zero to Memory",
			Self::Tax => "Transfer Accumulator to X Register",
			Self::Tay => "Transfer Accumulator to Y Register",
			Self::Tcd => "Transfer 16-bit Accumulator to Direct Page Register",
			Self::Tcs => "Transfer 16-bit Accumulator to Stack Pointer",
			Self::Tdc => "Transfer Direct Page Register to 16-bit Accumulator",
			Self::Trb => "Test and Reset Bits",
			Self::Tsb => "Test and Set Bits",
			Self::Tsc => "Transfer Stack Pointer to 16-bit Accumulator",
			Self::Tsx => "Transfer Stack Pointer to X Register",
			Self::Txa => "Transfer X Register to Accumulator",
			Self::Txs => "Transfer X Register to Stack Pointer",
			Self::Txy => "Transfer X Register to Y Register",
			Self::Tya => "Transfer Y Register to Accumulator",
			Self::Tyx => "Transfer Y Register to X Register",
			Self::Wai => "Wait for Interrupt",
			Self::Wdm => "Reserved for Future Expansion",
			Self::Xba => "Exchange B and A Accumulator Bytes",
			Self::Xce => "Exchange Carry and Emulation Flags",
		}
	}

	/// Processor flags this instruction affects, as a short `NVMXDIZC`-style
	/// label for hover text. Not exhaustive for every implied side effect
	/// (e.g. `XCE` swaps E but that is not one of the eight status bits).
	#[must_use]
	pub fn flags_affected(self) -> &'static str {
		match self {
			Self::Adc | Self::Sbc => "NVZC",
			Self::And | Self::Eor | Self::Ora | Self::Bit => "NZV",
			Self::Asl | Self::Lsr | Self::Rol | Self::Ror => "NZC",
			Self::Cmp | Self::Cpx | Self::Cpy => "NZC",
			Self::Dec | Self::Dex | Self::Dey | Self::Inc | Self::Inx | Self::Iny => "NZ",
			Self::Lda | Self::Ldx | Self::Ldy | Self::Tax | Self::Tay | Self::Txa | Self::Tya
			| Self::Tsx | Self::Txy | Self::Tyx | Self::Tdc | Self::Tcd | Self::Plx | Self::Ply
			| Self::Pla => "NZ",
			Self::Clc | Self::Sec => "C",
			Self::Cld | Self::Sed => "D",
			Self::Cli | Self::Sei => "I",
			Self::Clv => "V",
			Self::Rep | Self::Sep => "NVMXDIZC",
			Self::Plp | Self::Rti => "NVMXDIZC",
			Self::Trb | Self::Tsb => "Z",
			Self::Xce => "CE",
			_ => "-",
		}
	}

	/// Base cycle count before any addressing-mode penalty (see
	/// [`AddressingMode`] for the penalties this does not model exactly —
	/// page-boundary crossings and native/emulation mode both shift real
	/// hardware timing by a cycle).
	#[must_use]
	pub fn base_cycles(self) -> u8 {
		match self {
			Self::Brk | Self::Cop | Self::Rti | Self::Jsr | Self::Jsl | Self::Rts | Self::Rtl => 6,
			Self::Pha | Self::Phx | Self::Phy | Self::Phb | Self::Phd | Self::Phk | Self::Php
			| Self::Pla | Self::Plx | Self::Ply | Self::Plb | Self::Pld | Self::Plp => 3,
			Self::Mvn | Self::Mvp => 7,
			_ => 2,
		}
	}
}

/// A decoded opcode byte: its mnemonic and addressing mode. This is the
/// per-byte payload of the 256-entry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
	pub mnemonic: Mnemonic,
	pub addressing_mode: AddressingMode,
}

impl OpcodeInfo {
	#[must_use]
	pub const fn new(mnemonic: Mnemonic, addressing_mode: AddressingMode) -> Self {
		Self {
			mnemonic,
			addressing_mode,
		}
	}
}

/// The 256-entry opcode table, built once and shared by every consumer.
pub static OPCODE_TABLE: LazyLock<[OpcodeInfo; 256]> =
	LazyLock::new(|| std::array::from_fn(|byte| decode_byte(byte as u8)));

/// Look up the mnemonic and addressing mode for an opcode byte. Total over
/// `0..=255` — every byte value decodes to *some* instruction, including the
/// reserved/unofficial slots (`WDM`, `COP`, `STP`, `WAI`).
#[must_use]
pub fn opcode_info(byte: u8) -> OpcodeInfo {
	OPCODE_TABLE[byte as usize]
}

#[rustfmt::skip]
fn decode_byte(byte: u8) -> OpcodeInfo {
	use AddressingMode::{
		Absolute as ABS, AbsoluteIndexedIndirect as ABSXI, AbsoluteIndirect as ABSI,
		AbsoluteIndirectLong as ABSIL, AbsoluteLong as ABSL, AbsoluteLongX as ABSLX,
		AbsoluteX as ABSX, AbsoluteY as ABSY, Accumulator as ACC, BlockMove as BM,
		DirectPage as DP, DirectPageIndexedIndirectX as DPXI, DirectPageIndirect as DPI,
		DirectPageIndirectIndexedY as DPIY, DirectPageIndirectLong as DPIL,
		DirectPageIndirectLongIndexedY as DPILY, DirectPageX as DPX, DirectPageY as DPY,
		Immediate8 as I8, Immediate16 as I16, ImmediateM as IMM, ImmediateX as IMX,
		Implied as IMP, Relative8 as REL, RelativeLong as RELL, StackRelative as SR,
		StackRelativeIndirectIndexedY as SRIY,
	};
	use Mnemonic as M;

	let (mnemonic, mode) = match byte {
		0x00 => (M::Brk, I8), 0x01 => (M::Ora, DPXI), 0x02 => (M::Cop, I8), 0x03 => (M::Ora, SR),
		0x04 => (M::Tsb, DP), 0x05 => (M::Ora, DP), 0x06 => (M::Asl, DP), 0x07 => (M::Ora, DPIL),
		0x08 => (M::Php, IMP), 0x09 => (M::Ora, IMM), 0x0A => (M::Asl, ACC), 0x0B => (M::Phd, IMP),
		0x0C => (M::Tsb, ABS), 0x0D => (M::Ora, ABS), 0x0E => (M::Asl, ABS), 0x0F => (M::Ora, ABSL),

		0x10 => (M::Bpl, REL), 0x11 => (M::Ora, DPIY), 0x12 => (M::Ora, DPI), 0x13 => (M::Ora, SRIY),
		0x14 => (M::Trb, DP), 0x15 => (M::Ora, DPX), 0x16 => (M::Asl, DPX), 0x17 => (M::Ora, DPILY),
		0x18 => (M::Clc, IMP), 0x19 => (M::Ora, ABSY), 0x1A => (M::Inc, ACC), 0x1B => (M::Tcs, IMP),
		0x1C => (M::Trb, ABS), 0x1D => (M::Ora, ABSX), 0x1E => (M::Asl, ABSX), 0x1F => (M::Ora, ABSLX),

		0x20 => (M::Jsr, ABS), 0x21 => (M::And, DPXI), 0x22 => (M::Jsl, ABSL), 0x23 => (M::And, SR),
		0x24 => (M::Bit, DP), 0x25 => (M::And, DP), 0x26 => (M::Rol, DP), 0x27 => (M::And, DPIL),
		0x28 => (M::Plp, IMP), 0x29 => (M::And, IMM), 0x2A => (M::Rol, ACC), 0x2B => (M::Pld, IMP),
		0x2C => (M::Bit, ABS), 0x2D => (M::And, ABS), 0x2E => (M::Rol, ABS), 0x2F => (M::And, ABSL),

		0x30 => (M::Bmi, REL), 0x31 => (M::And, DPIY), 0x32 => (M::And, DPI), 0x33 => (M::And, SRIY),
		0x34 => (M::Bit, DPX), 0x35 => (M::And, DPX), 0x36 => (M::Rol, DPX), 0x37 => (M::And, DPILY),
		0x38 => (M::Sec, IMP), 0x39 => (M::And, ABSY), 0x3A => (M::Dec, ACC), 0x3B => (M::Tsc, IMP),
		0x3C => (M::Bit, ABSX), 0x3D => (M::And, ABSX), 0x3E => (M::Rol, ABSX), 0x3F => (M::And, ABSLX),

		0x40 => (M::Rti, IMP), 0x41 => (M::Eor, DPXI), 0x42 => (M::Wdm, I8), 0x43 => (M::Eor, SR),
		0x44 => (M::Mvp, BM), 0x45 => (M::Eor, DP), 0x46 => (M::Lsr, DP), 0x47 => (M::Eor, DPIL),
		0x48 => (M::Pha, IMP), 0x49 => (M::Eor, IMM), 0x4A => (M::Lsr, ACC), 0x4B => (M::Phk, IMP),
		0x4C => (M::Jmp, ABS), 0x4D => (M::Eor, ABS), 0x4E => (M::Lsr, ABS), 0x4F => (M::Eor, ABSL),

		0x50 => (M::Bvc, REL), 0x51 => (M::Eor, DPIY), 0x52 => (M::Eor, DPI), 0x53 => (M::Eor, SRIY),
		0x54 => (M::Mvn, BM), 0x55 => (M::Eor, DPX), 0x56 => (M::Lsr, DPX), 0x57 => (M::Eor, DPILY),
		0x58 => (M::Cli, IMP), 0x59 => (M::Eor, ABSY), 0x5A => (M::Phy, IMP), 0x5B => (M::Tcd, IMP),
		0x5C => (M::Jml, ABSL), 0x5D => (M::Eor, ABSX), 0x5E => (M::Lsr, ABSX), 0x5F => (M::Eor, ABSLX),

		0x60 => (M::Rts, IMP), 0x61 => (M::Adc, DPXI), 0x62 => (M::Per, RELL), 0x63 => (M::Adc, SR),
		0x64 => (M::Stz, DP), 0x65 => (M::Adc, DP), 0x66 => (M::Ror, DP), 0x67 => (M::Adc, DPIL),
		0x68 => (M::Pla, IMP), 0x69 => (M::Adc, IMM), 0x6A => (M::Ror, ACC), 0x6B => (M::Rtl, IMP),
		0x6C => (M::Jmp, ABSI), 0x6D => (M::Adc, ABS), 0x6E => (M::Ror, ABS), 0x6F => (M::Adc, ABSL),

		0x70 => (M::Bvs, REL), 0x71 => (M::Adc, DPIY), 0x72 => (M::Adc, DPI), 0x73 => (M::Adc, SRIY),
		0x74 => (M::Stz, DPX), 0x75 => (M::Adc, DPX), 0x76 => (M::Ror, DPX), 0x77 => (M::Adc, DPILY),
		0x78 => (M::Sei, IMP), 0x79 => (M::Adc, ABSY), 0x7A => (M::Ply, IMP), 0x7B => (M::Tdc, IMP),
		0x7C => (M::Jmp, ABSXI), 0x7D => (M::Adc, ABSX), 0x7E => (M::Ror, ABSX), 0x7F => (M::Adc, ABSLX),

		0x80 => (M::Bra, REL), 0x81 => (M::Sta, DPXI), 0x82 => (M::Brl, RELL), 0x83 => (M::Sta, SR),
		0x84 => (M::Sty, DP), 0x85 => (M::Sta, DP), 0x86 => (M::Stx, DP), 0x87 => (M::Sta, DPIL),
		0x88 => (M::Dey, IMP), 0x89 => (M::Bit, IMM), 0x8A => (M::Txa, IMP), 0x8B => (M::Phb, IMP),
		0x8C => (M::Sty, ABS), 0x8D => (M::Sta, ABS), 0x8E => (M::Stx, ABS), 0x8F => (M::Sta, ABSL),

		0x90 => (M::Bcc, REL), 0x91 => (M::Sta, DPIY), 0x92 => (M::Sta, DPI), 0x93 => (M::Sta, SRIY),
		0x94 => (M::Sty, DPX), 0x95 => (M::Sta, DPX), 0x96 => (M::Stx, DPY), 0x97 => (M::Sta, DPILY),
		0x98 => (M::Tya, IMP), 0x99 => (M::Sta, ABSY), 0x9A => (M::Txs, IMP), 0x9B => (M::Txy, IMP),
		0x9C => (M::Stz, ABS), 0x9D => (M::Sta, ABSX), 0x9E => (M::Stz, ABSX), 0x9F => (M::Sta, ABSLX),

		0xA0 => (M::Ldy, IMX), 0xA1 => (M::Lda, DPXI), 0xA2 => (M::Ldx, IMX), 0xA3 => (M::Lda, SR),
		0xA4 => (M::Ldy, DP), 0xA5 => (M::Lda, DP), 0xA6 => (M::Ldx, DP), 0xA7 => (M::Lda, DPIL),
		0xA8 => (M::Tay, IMP), 0xA9 => (M::Lda, IMM), 0xAA => (M::Tax, IMP), 0xAB => (M::Plb, IMP),
		0xAC => (M::Ldy, ABS), 0xAD => (M::Lda, ABS), 0xAE => (M::Ldx, ABS), 0xAF => (M::Lda, ABSL),

		0xB0 => (M::Bcs, REL), 0xB1 => (M::Lda, DPIY), 0xB2 => (M::Lda, DPI), 0xB3 => (M::Lda, SRIY),
		0xB4 => (M::Ldy, DPX), 0xB5 => (M::Lda, DPX), 0xB6 => (M::Ldx, DPY), 0xB7 => (M::Lda, DPILY),
		0xB8 => (M::Clv, IMP), 0xB9 => (M::Lda, ABSY), 0xBA => (M::Tsx, IMP), 0xBB => (M::Tyx, IMP),
		0xBC => (M::Ldy, ABSX), 0xBD => (M::Lda, ABSX), 0xBE => (M::Ldx, ABSY), 0xBF => (M::Lda, ABSLX),

		0xC0 => (M::Cpy, IMX), 0xC1 => (M::Cmp, DPXI), 0xC2 => (M::Rep, I8), 0xC3 => (M::Cmp, SR),
		0xC4 => (M::Cpy, DP), 0xC5 => (M::Cmp, DP), 0xC6 => (M::Dec, DP), 0xC7 => (M::Cmp, DPIL),
		0xC8 => (M::Iny, IMP), 0xC9 => (M::Cmp, IMM), 0xCA => (M::Dex, IMP), 0xCB => (M::Wai, IMP),
		0xCC => (M::Cpy, ABS), 0xCD => (M::Cmp, ABS), 0xCE => (M::Dec, ABS), 0xCF => (M::Cmp, ABSL),

		0xD0 => (M::Bne, REL), 0xD1 => (M::Cmp, DPIY), 0xD2 => (M::Cmp, DPI), 0xD3 => (M::Cmp, SRIY),
		0xD4 => (M::Pei, DPI), 0xD5 => (M::Cmp, DPX), 0xD6 => (M::Dec, DPX), 0xD7 => (M::Cmp, DPILY),
		0xD8 => (M::Cld, IMP), 0xD9 => (M::Cmp, ABSY), 0xDA => (M::Phx, IMP), 0xDB => (M::Stp, IMP),
		0xDC => (M::Jml, ABSIL), 0xDD => (M::Cmp, ABSX), 0xDE => (M::Dec, ABSX), 0xDF => (M::Cmp, ABSLX),

		0xE0 => (M::Cpx, IMX), 0xE1 => (M::Sbc, DPXI), 0xE2 => (M::Sep, I8), 0xE3 => (M::Sbc, SR),
		0xE4 => (M::Cpx, DP), 0xE5 => (M::Sbc, DP), 0xE6 => (M::Inc, DP), 0xE7 => (M::Sbc, DPIL),
		0xE8 => (M::Inx, IMP), 0xE9 => (M::Sbc, IMM), 0xEA => (M::Nop, IMP), 0xEB => (M::Xba, IMP),
		0xEC => (M::Cpx, ABS), 0xED => (M::Sbc, ABS), 0xEE => (M::Inc, ABS), 0xEF => (M::Sbc, ABSL),

		0xF0 => (M::Beq, REL), 0xF1 => (M::Sbc, DPIY), 0xF2 => (M::Sbc, DPI), 0xF3 => (M::Sbc, SRIY),
		0xF4 => (M::Pea, I16), 0xF5 => (M::Sbc, DPX), 0xF6 => (M::Inc, DPX), 0xF7 => (M::Sbc, DPILY),
		0xF8 => (M::Sed, IMP), 0xF9 => (M::Sbc, ABSY), 0xFA => (M::Plx, IMP), 0xFB => (M::Xce, IMP),
		0xFC => (M::Jsr, ABSXI), 0xFD => (M::Sbc, ABSX), 0xFE => (M::Inc, ABSX), 0xFF => (M::Sbc, ABSLX),
	};
	OpcodeInfo::new(mnemonic, mode)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::flags::Width;

	#[test]
	fn table_has_256_entries() {
		assert_eq!(OPCODE_TABLE.len(), 256);
	}

	#[test]
	fn every_byte_decodes_to_a_sized_operand() {
		for byte in 0u16..=255 {
			let info = opcode_info(byte as u8);
			let narrow = info.addressing_mode.operand_size(Width::W8, Width::W8);
			let wide = info.addressing_mode.operand_size(Width::W16, Width::W16);
			assert!(narrow <= 3);
			assert!(wide >= narrow);
		}
	}

	#[test]
	fn known_opcodes_decode_correctly() {
		assert_eq!(opcode_info(0xE2).mnemonic, Mnemonic::Sep);
		assert_eq!(opcode_info(0xC2).mnemonic, Mnemonic::Rep);
		assert_eq!(opcode_info(0xFB).mnemonic, Mnemonic::Xce);
		assert_eq!(opcode_info(0xA9).mnemonic, Mnemonic::Lda);
		assert_eq!(opcode_info(0xA9).addressing_mode, AddressingMode::ImmediateM);
		assert_eq!(opcode_info(0x10).mnemonic, Mnemonic::Bpl);
		assert_eq!(opcode_info(0x10).addressing_mode, AddressingMode::Relative8);
		assert_eq!(opcode_info(0xAD).addressing_mode, AddressingMode::Absolute);
	}

	#[test]
	fn mnemonic_name_round_trips_through_display() {
		assert_eq!(format!("{}", Mnemonic::Lda), "LDA");
		assert_eq!(Mnemonic::Lda.name(), "LDA");
	}
}
