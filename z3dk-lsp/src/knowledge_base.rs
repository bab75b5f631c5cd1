//! Static hover documentation (spec.md §4.8 "Hover").
//!
//! Two tables: a per-[`Mnemonic`] description/flags entry, and a small set
//! of well-known Zelda 3 RAM addresses worth annotating by address alone
//! (frame counter, player state, and the like) even when no project symbol
//! names them.

use std::collections::HashMap;
use std::sync::LazyLock;

use z3dk_common::address::Address;
use z3dk_core::instructions::Mnemonic;

/// One mnemonic's hover text: a short description and the processor flags
/// it touches, independent of addressing mode.
#[derive(Debug, Clone, Copy)]
pub struct MnemonicDoc {
	pub description: &'static str,
	pub flags: &'static str,
}

macro_rules! mnemonic_docs {
	($($variant:ident => $desc:literal, $flags:literal;)*) => {
		fn mnemonic_doc(mnemonic: Mnemonic) -> MnemonicDoc {
			match mnemonic {
				$(Mnemonic::$variant => MnemonicDoc { description: $desc, flags: $flags },)*
			}
		}
	};
}

mnemonic_docs! {
	Adc => "Add with carry", "NVZC";
	And => "Bitwise AND with accumulator", "NZ";
	Asl => "Arithmetic shift left", "NZC";
	Bcc => "Branch if carry clear", "none";
	Bcs => "Branch if carry set", "none";
	Beq => "Branch if equal (zero set)", "none";
	Bit => "Test bits against accumulator", "NVZ";
	Bmi => "Branch if minus (negative set)", "none";
	Bne => "Branch if not equal (zero clear)", "none";
	Bpl => "Branch if plus (negative clear)", "none";
	Bra => "Branch always", "none";
	Brk => "Software break", "DI";
	Brl => "Branch always, long", "none";
	Bvc => "Branch if overflow clear", "none";
	Bvs => "Branch if overflow set", "none";
	Clc => "Clear carry flag", "C";
	Cld => "Clear decimal mode flag", "D";
	Cli => "Clear interrupt disable flag", "I";
	Clv => "Clear overflow flag", "V";
	Cmp => "Compare accumulator", "NZC";
	Cop => "Coprocessor enable", "DI";
	Cpx => "Compare index X", "NZC";
	Cpy => "Compare index Y", "NZC";
	Dec => "Decrement memory or accumulator", "NZ";
	Dex => "Decrement index X", "NZ";
	Dey => "Decrement index Y", "NZ";
	Eor => "Bitwise exclusive-OR with accumulator", "NZ";
	Inc => "Increment memory or accumulator", "NZ";
	Inx => "Increment index X", "NZ";
	Iny => "Increment index Y", "NZ";
	Jml => "Jump, long", "none";
	Jmp => "Jump", "none";
	Jsl => "Jump to subroutine, long", "none";
	Jsr => "Jump to subroutine", "none";
	Lda => "Load accumulator", "NZ";
	Ldx => "Load index X", "NZ";
	Ldy => "Load index Y", "NZ";
	Lsr => "Logical shift right", "NZC";
	Mvn => "Block move, negative (incrementing)", "none";
	Mvp => "Block move, positive (decrementing)", "none";
	Nop => "No operation", "none";
	Ora => "Bitwise OR with accumulator", "NZ";
	Pea => "Push effective absolute address", "none";
	Pei => "Push effective indirect address", "none";
	Per => "Push effective relative address", "none";
	Pha => "Push accumulator", "none";
	Phb => "Push data bank register", "none";
	Phd => "Push direct page register", "none";
	Phk => "Push program bank register", "none";
	Php => "Push processor status", "none";
	Phx => "Push index X", "none";
	Phy => "Push index Y", "none";
	Pla => "Pull accumulator", "NZ";
	Plb => "Pull data bank register", "NZ";
	Pld => "Pull direct page register", "NZ";
	Plp => "Pull processor status", "NVMXDIZC";
	Plx => "Pull index X", "NZ";
	Ply => "Pull index Y", "NZ";
	Rep => "Reset processor status bits", "NVMXDIZC";
	Rol => "Rotate left", "NZC";
	Ror => "Rotate right", "NZC";
	Rti => "Return from interrupt", "NVMXDIZC";
	Rtl => "Return from subroutine, long", "none";
	Rts => "Return from subroutine", "none";
	Sbc => "Subtract with borrow", "NVZC";
	Sec => "Set carry flag", "C";
	Sed => "Set decimal mode flag", "D";
	Sei => "Set interrupt disable flag", "I";
	Sep => "Set processor status bits", "NVMXDIZC";
	Sta => "Store accumulator", "none";
	Stp => "Stop the processor", "none";
	Stx => "Store index X", "none";
	Sty => "Store index Y", "none";
	Stz => "Store zero", "none";
	Tax => "Transfer accumulator to index X", "NZ";
	Tay => "Transfer accumulator to index Y", "NZ";
	Tcd => "Transfer accumulator to direct page register", "NZ";
	Tcs => "Transfer accumulator to stack pointer", "none";
	Tdc => "Transfer direct page register to accumulator", "NZ";
	Trb => "Test and reset bits", "Z";
	Tsb => "Test and set bits", "Z";
	Tsc => "Transfer stack pointer to accumulator", "NZ";
	Tsx => "Transfer stack pointer to index X", "NZ";
	Txa => "Transfer index X to accumulator", "NZ";
	Txs => "Transfer index X to stack pointer", "none";
	Txy => "Transfer index X to index Y", "NZ";
	Tya => "Transfer index Y to accumulator", "NZ";
	Tyx => "Transfer index Y to index X", "NZ";
	Wai => "Wait for interrupt", "none";
	Wdm => "Reserved for future expansion", "none";
	Xba => "Exchange B and A accumulator bytes", "NZ";
	Xce => "Exchange carry and emulation flags", "MXCE";
}

/// Look up a mnemonic's hover text.
#[must_use]
pub fn mnemonic_hover(mnemonic: Mnemonic) -> MnemonicDoc {
	mnemonic_doc(mnemonic)
}

/// Well-known Zelda 3 RAM cells worth documenting by address alone.
static ZELDA_RAM_DOCS: LazyLock<HashMap<Address, &'static str>> = LazyLock::new(|| {
	HashMap::from([
		(Address::from_bank_offset(0x7E, 0x001A), "frame counter, incremented once per NMI"),
		(Address::from_bank_offset(0x7E, 0x0010), "main module index (overworld/dungeon/menu/...)"),
		(Address::from_bank_offset(0x7E, 0x0011), "submodule index within the current module"),
		(Address::from_bank_offset(0x7E, 0x0020), "game mode / active engine state"),
		(Address::from_bank_offset(0x7E, 0x0022), "overworld area index"),
		(Address::from_bank_offset(0x7E, 0x0E20), "link's X position, low byte"),
		(Address::from_bank_offset(0x7E, 0x0E22), "link's Y position, low byte"),
		(Address::from_bank_offset(0x7E, 0x0F36), "link's health, current (in eighths of a heart)"),
	])
});

/// Documentation for a RAM address, if it's one of the well-known cells
/// above. Probes both mirrors of `address` (spec.md §3 mirror relation).
#[must_use]
pub fn ram_doc(address: Address) -> Option<&'static str> {
	address.with_mirror().into_iter().find_map(|probe| ZELDA_RAM_DOCS.get(&probe).copied())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_mnemonic_has_a_description() {
		assert_eq!(mnemonic_hover(Mnemonic::Lda).description, "Load accumulator");
		assert_eq!(mnemonic_hover(Mnemonic::Xce).flags, "MXCE");
	}

	#[test]
	fn ram_doc_is_mirror_aware() {
		let canonical = Address::from_bank_offset(0x7E, 0x001A);
		assert!(ram_doc(canonical).is_some());
		assert!(ram_doc(canonical.mirror()).is_some());
	}

	#[test]
	fn unknown_address_has_no_doc() {
		assert!(ram_doc(Address::from_bank_offset(0x7E, 0x7FFF)).is_none());
	}
}
