//! 65816 disassembly, lint, and source-analysis engine for SNES romhacking.
//!
//! This crate turns a LoROM image plus optional symbol/hook metadata into
//! per-bank disassembly text, and separately lints an already-assembled
//! project for unsafe ORG collisions, unauthorized writes into hook
//! territory, and ambiguous processor-width state. It does not assemble —
//! that is the job of an external collaborator described by
//! [`assemble::AssembleResult`].

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod assemble;
pub mod config;
pub mod disasm;
pub mod error;
pub mod flags;
pub mod hooks;
pub mod instructions;
pub mod lint;
pub mod parsing;
pub mod project_graph;
pub mod sourcemap;
pub mod symbols;
pub mod utils;

pub use crate::assemble::{AssembleOptions, AssembleResult};
pub use crate::config::Config;
pub use crate::disasm::DisasmOptions;
pub use crate::error::{CoreError, CoreResult};
pub use crate::hooks::HookManifest;
pub use crate::instructions::{AddressingMode, Mnemonic, OpcodeInfo};
pub use crate::lint::LintOptions;
pub use crate::project_graph::ProjectGraph;
pub use crate::sourcemap::SourceMap;
pub use crate::symbols::LabelIndex;

/// Library version, as reported by `z3dk --version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn version_string_is_not_empty() {
		assert!(!VERSION.is_empty());
	}
}
