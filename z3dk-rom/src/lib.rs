//! ROM loading for the 65816 disassembly and analysis toolchain.
//!
//! This crate owns exactly one concern: turning a file on disk into a flat
//! byte slice addressable by [`z3dk_common::address::Address`], with the
//! copier header stripped and the mapper resolved. Everything that
//! interprets those bytes (opcode decoding, symbol lookup, lint passes)
//! lives in `z3dk-core`.

#![forbid(unsafe_code)]

pub mod err;
pub mod header;

use std::path::Path;

use z3dk_common::address::{Mapper, pc_to_snes_lorom};

pub use err::Error;

/// A loaded ROM image, header-stripped and ready for LoROM addressing.
#[derive(Debug, Clone)]
pub struct Rom {
	data: Vec<u8>,
	mapper: Mapper,
}

impl Rom {
	/// Load a ROM from disk, stripping a copier header if present.
	///
	/// # Errors
	/// Returns [`Error::Io`] if the file cannot be read.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
		let raw = std::fs::read(path)?;
		Self::from_bytes(raw)
	}

	/// Build a `Rom` from raw bytes already read into memory.
	#[must_use]
	pub fn from_bytes(raw: Vec<u8>) -> Result<Self, Error> {
		let data = header::strip(&raw).to_vec();
		Ok(Self {
			data,
			mapper: Mapper::LoRom,
		})
	}

	/// The header-stripped ROM bytes.
	#[must_use]
	pub fn bytes(&self) -> &[u8] {
		&self.data
	}

	/// Total ROM size in bytes, header excluded.
	#[must_use]
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// True if the ROM contains no bytes.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// The mapping mode used to translate PC offsets to SNES addresses.
	#[must_use]
	pub fn mapper(&self) -> Mapper {
		self.mapper
	}

	/// Number of `0x8000`-byte LoROM banks covered by this ROM.
	#[must_use]
	pub fn bank_count(&self) -> usize {
		self.data.len().div_ceil(z3dk_common::address::LOROM_BANK_SIZE)
	}

	/// Byte at PC offset `pc`, if within range.
	#[must_use]
	pub fn byte_at(&self, pc: usize) -> Option<u8> {
		self.data.get(pc).copied()
	}

	/// The SNES address of the first byte of `pc`'s bank.
	#[must_use]
	pub fn snes_address(&self, pc: usize) -> z3dk_common::address::Address {
		pc_to_snes_lorom(pc)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_copier_header_on_load() {
		let mut raw = vec![0xAAu8; 512];
		raw.extend(std::iter::repeat_n(0x00u8, 0x8000));
		let rom = Rom::from_bytes(raw).unwrap();
		assert_eq!(rom.len(), 0x8000);
		assert_eq!(rom.byte_at(0), Some(0x00));
	}

	#[test]
	fn bank_count_rounds_up() {
		let rom = Rom::from_bytes(vec![0u8; 0x8000 + 1]).unwrap();
		assert_eq!(rom.bank_count(), 2);
	}
}
