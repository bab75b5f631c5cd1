//! Mesen label file (`.mlb`) parsing (spec.md §4.2, §6).
//!
//! `<Type>:<hex-address>:<label>[:comment]`, colon-delimited. Only a handful
//! of memory-type prefixes describe SNES addresses we can place in a
//! [`LabelIndex`]; the rest (CPU-specific register types, other consoles'
//! memory types carried over from Mesen's multi-system format) are ignored.

use z3dk_common::address::Address;

use super::table::LabelIndex;

const ACCEPTED_TYPES: [&str; 4] = ["SnesPrgRom", "PRG", "SnesWorkRam", "SnesSaveRam"];

/// Parse an MLB document into `index`, skipping blank lines, `;`/`#`
/// comments, and any line that doesn't parse cleanly.
pub fn parse_into(text: &str, index: &mut LabelIndex) {
	for line in text.lines() {
		let line = line.trim();
		if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
			continue;
		}
		let Some((kind, rest)) = line.split_once(':') else { continue };
		if !ACCEPTED_TYPES.contains(&kind) {
			continue;
		}
		let Some((hex_addr, rest)) = rest.split_once(':') else { continue };
		let label = rest.split(':').next().unwrap_or("");
		let Ok(raw) = u32::from_str_radix(hex_addr.trim_start_matches("0x"), 16) else { continue };
		index.add_label(Address::new(raw), label.trim());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_known_types() {
		let mut index = LabelIndex::new();
		parse_into("SnesPrgRom:008000:MainEntry\nSnesWorkRam:7E0010:PlayerState", &mut index);
		assert_eq!(index.lookup(Address::new(0x008000)), Some("MainEntry"));
		assert_eq!(index.lookup(Address::new(0x7E0010)), Some("PlayerState"));
	}

	#[test]
	fn ignores_unknown_types_and_comments() {
		let mut index = LabelIndex::new();
		parse_into("; a comment\n# also a comment\nCpuRegister:2000:NotWanted", &mut index);
		assert!(index.is_empty());
	}

	#[test]
	fn tolerates_trailing_comment_field() {
		let mut index = LabelIndex::new();
		parse_into("PRG:00FFFC:ResetVector:cold boot entry", &mut index);
		assert_eq!(index.lookup(Address::new(0x00FFFC)), Some("ResetVector"));
	}
}
