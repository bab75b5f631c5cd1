//! 65816 instruction decoding: opcode table, mnemonics, and addressing modes.

pub mod addressing;
pub mod opcodes;

pub use addressing::AddressingMode;
pub use opcodes::{Mnemonic, OPCODE_TABLE, OpcodeInfo, opcode_info};
