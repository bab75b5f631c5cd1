//! Hook manifest loading (spec.md §4.3, §6).
//!
//! A hook manifest names the ROM addresses a romhack is allowed to patch —
//! the lint engine's authorized-hook pass (spec.md §4.7) and the
//! disassembler's hook-comment emission (spec.md §4.4.1) both key off it.

use std::path::Path;

use serde::Deserialize;
use z3dk_common::address::Address;

use crate::error::{CoreError, CoreResult};

/// One entry in a hook manifest. Missing JSON fields default to their
/// type's zero value (empty string / 0 / false) rather than failing the
/// whole document.
#[derive(Debug, Clone, Deserialize)]
pub struct HookEntry {
	#[serde(default)]
	pub address: HookAddress,
	#[serde(default)]
	pub size: u32,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub kind: String,
	#[serde(default)]
	pub module: String,
	#[serde(default)]
	pub abi: String,
	#[serde(default)]
	pub target: String,
	#[serde(default)]
	pub source: String,
	#[serde(default)]
	pub m: String,
	#[serde(default)]
	pub x: String,
	#[serde(default)]
	pub skip_abi: bool,
	#[serde(default)]
	pub note: String,
}

/// A hook manifest's `address` field accepts either a hex string
/// (`"0x008000"`, `"$008000"`) or a bare JSON integer.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum HookAddress {
	Hex(String),
	Int(u32),
}

impl Default for HookAddress {
	fn default() -> Self {
		Self::Int(0)
	}
}

impl HookEntry {
	/// Resolve [`HookAddress`] into a concrete [`Address`]. A hex string
	/// that fails to parse resolves to address zero rather than failing the
	/// whole manifest — manifests are historically permissive.
	#[must_use]
	pub fn resolved_address(&self) -> Address {
		match &self.address {
			HookAddress::Int(raw) => Address::new(*raw),
			HookAddress::Hex(text) => {
				let digits = text.trim_start_matches("0x").trim_start_matches('$');
				Address::new(u32::from_str_radix(digits, 16).unwrap_or(0))
			}
		}
	}
}

/// The top-level `hooks.json` document: `{ "hooks": [ ... ] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookManifest {
	#[serde(default)]
	pub hooks: Vec<HookEntry>,
}

impl HookManifest {
	/// Load and parse a hook manifest from disk.
	///
	/// # Errors
	/// Returns [`CoreError::Io`] if the file can't be read, or
	/// [`CoreError::Parse`] if the JSON is malformed.
	pub fn load(path: &Path) -> CoreResult<Self> {
		let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
			pos: None,
			source,
		})?;
		serde_json::from_str(&text).map_err(|err| {
			CoreError::parse(crate::error::SourcePos::file_only(path.to_path_buf()), err.to_string())
		})
	}

	/// All addresses named by this manifest, in file order. Multiple hooks
	/// may share an address.
	pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
		self.hooks.iter().map(HookEntry::resolved_address)
	}

	/// True if any hook in this manifest starts exactly at `address`.
	#[must_use]
	pub fn is_known(&self, address: Address) -> bool {
		self.hooks.iter().any(|hook| hook.resolved_address() == address)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_and_integer_addresses() {
		let json = r#"{"hooks":[{"address":"0x008000","name":"boot"},{"address":32768}]}"#;
		let manifest: HookManifest = serde_json::from_str(json).unwrap();
		assert_eq!(manifest.hooks.len(), 2);
		assert_eq!(manifest.hooks[0].resolved_address(), Address::new(0x008000));
		assert_eq!(manifest.hooks[1].resolved_address(), Address::new(0x008000));
	}

	#[test]
	fn missing_fields_default() {
		let json = r#"{"hooks":[{"address":"$00FFFC"}]}"#;
		let manifest: HookManifest = serde_json::from_str(json).unwrap();
		assert_eq!(manifest.hooks[0].name, "");
		assert_eq!(manifest.hooks[0].size, 0);
	}

	#[test]
	fn multiple_hooks_may_share_an_address() {
		let json = r#"{"hooks":[{"address":"0x8000"},{"address":"0x8000"}]}"#;
		let manifest: HookManifest = serde_json::from_str(json).unwrap();
		assert!(manifest.is_known(Address::new(0x008000)));
		assert_eq!(manifest.addresses().count(), 2);
	}
}
