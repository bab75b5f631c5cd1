//! Workspace configuration (`z3dk.toml`, spec.md §6).
//!
//! Unknown keys are ignored (spec.md §9 Design notes) — this struct only
//! names the keys the engine actually consults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use z3dk_common::address::Address;

use crate::error::{CoreError, CoreResult};
use crate::lint::MemoryRange;
use crate::symbols::SymbolFormat;

/// Parsed `z3dk.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Extra include roots searched by `ResolveIncludePath`.
	pub include_paths: Vec<PathBuf>,
	/// `key` or `key=value` assembler defines.
	pub defines: Vec<String>,
	/// A single preferred analysis root.
	pub main: Option<PathBuf>,
	/// Multiple preferred analysis roots, checked alongside `main`.
	pub main_files: Vec<PathBuf>,
	/// Default include path for the assembler's standard library headers.
	pub std_includes: Option<PathBuf>,
	/// Default include path for the assembler's standard library defines.
	pub std_defines: Option<PathBuf>,
	/// Only `"lorom"` is supported; anything else is a configuration error.
	pub mapper: String,
	/// The bound ROM image, if any.
	pub rom_path: Option<PathBuf>,
	/// Virtual ROM size in bytes, used when `rom_path` is absent.
	pub rom_size: Option<usize>,
	/// Output symbol format: `"mlb"`, `"wla"`, or `"csv"`.
	pub symbols: Option<String>,
	/// Where to write the output symbol file.
	pub symbols_path: Option<PathBuf>,
	pub warn_unknown_width: bool,
	pub warn_branch_outside_bank: bool,
	pub warn_org_collision: bool,
	pub warn_unauthorized_hook: bool,
	pub warn_unused_symbols: bool,
	/// `"start-end:reason"` entries, e.g. `"7E0000-7E2000:save state"`.
	pub prohibited_memory_ranges: Vec<String>,
	pub lsp_log_enabled: bool,
	pub lsp_log_path: Option<PathBuf>,
	/// `host:port` of a running emulator's memory-read side channel, used
	/// by the language server's hover "Live Value" line.
	pub emulator_addr: Option<String>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			include_paths: Vec::new(),
			defines: Vec::new(),
			main: None,
			main_files: Vec::new(),
			std_includes: None,
			std_defines: None,
			mapper: "lorom".to_string(),
			rom_path: None,
			rom_size: None,
			symbols: None,
			symbols_path: None,
			warn_unknown_width: true,
			warn_branch_outside_bank: true,
			warn_org_collision: true,
			warn_unauthorized_hook: false,
			warn_unused_symbols: false,
			prohibited_memory_ranges: Vec::new(),
			lsp_log_enabled: false,
			lsp_log_path: None,
			emulator_addr: None,
		}
	}
}

impl Config {
	/// Load `z3dk.toml` from `path`.
	///
	/// # Errors
	/// Returns [`CoreError::Io`] if the file can't be read, or
	/// [`CoreError::Config`] if it isn't valid TOML or names an unsupported
	/// mapper.
	pub fn load(path: &std::path::Path) -> CoreResult<Self> {
		let text = std::fs::read_to_string(path)?;
		let config: Self =
			toml::from_str(&text).map_err(|err| CoreError::config(format!("invalid z3dk.toml: {err}")))?;
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> CoreResult<()> {
		if self.mapper != "lorom" {
			return Err(CoreError::config(format!(
				"unsupported mapper '{}', only 'lorom' is implemented",
				self.mapper
			)));
		}
		Ok(())
	}

	/// Parsed `defines` as `(name, value)` pairs; bare `key` entries carry
	/// `None`.
	#[must_use]
	pub fn parsed_defines(&self) -> Vec<(String, Option<String>)> {
		self.defines
			.iter()
			.map(|entry| match entry.split_once('=') {
				Some((name, value)) => (name.to_string(), Some(value.to_string())),
				None => (entry.clone(), None),
			})
			.collect()
	}

	/// Every preferred analysis root named by `main` and `main_files`.
	#[must_use]
	pub fn preferred_roots(&self) -> Vec<PathBuf> {
		self.main.iter().cloned().chain(self.main_files.iter().cloned()).collect()
	}

	/// The configured output symbol format, if `symbols` names a recognized
	/// one.
	#[must_use]
	pub fn symbol_format(&self) -> Option<SymbolFormat> {
		match self.symbols.as_deref() {
			Some("mlb") => Some(SymbolFormat::Mlb),
			Some("wla") => Some(SymbolFormat::Wla),
			Some("csv") => Some(SymbolFormat::Csv),
			_ => None,
		}
	}

	/// Parsed `prohibited_memory_ranges`, skipping any entry that doesn't
	/// match `start-end:reason`.
	#[must_use]
	pub fn parsed_memory_ranges(&self) -> Vec<MemoryRange> {
		self.prohibited_memory_ranges.iter().filter_map(|entry| parse_memory_range(entry)).collect()
	}
}

fn parse_memory_range(entry: &str) -> Option<MemoryRange> {
	let (span, reason) = entry.split_once(':')?;
	let (start, end) = span.split_once('-')?;
	let start = u32::from_str_radix(start.trim_start_matches('$'), 16).ok()?;
	let end = u32::from_str_radix(end.trim_start_matches('$'), 16).ok()?;
	Some(MemoryRange {
		start: Address::new(start),
		end: Address::new(end),
		reason: reason.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_config_uses_lorom() {
		assert_eq!(Config::default().mapper, "lorom");
	}

	#[test]
	fn parses_defines_with_and_without_values() {
		let config = Config {
			defines: vec!["DEBUG".to_string(), "VERSION=2".to_string()],
			..Config::default()
		};
		assert_eq!(config.parsed_defines(), vec![
			("DEBUG".to_string(), None),
			("VERSION".to_string(), Some("2".to_string())),
		]);
	}

	#[test]
	fn parses_memory_range_entries() {
		let config = Config {
			prohibited_memory_ranges: vec!["7E0000-7E2000:save state".to_string(), "garbage".to_string()],
			..Config::default()
		};
		let ranges = config.parsed_memory_ranges();
		assert_eq!(ranges.len(), 1);
		assert_eq!(ranges[0].start, Address::new(0x7E0000));
		assert_eq!(ranges[0].reason, "save state");
	}

	#[test]
	fn symbol_format_recognizes_three_values() {
		let mut config = Config::default();
		config.symbols = Some("wla".to_string());
		assert!(matches!(config.symbol_format(), Some(SymbolFormat::Wla)));
		config.symbols = Some("unknown".to_string());
		assert!(config.symbol_format().is_none());
	}
}
