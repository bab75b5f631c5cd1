//! WLA-DX symbol file (`.sym`) parsing (spec.md §4.2, §6).
//!
//! Only the `[labels]` section carries address/name pairs; `[definitions]`,
//! `[breakpoints]`, and the rest are skipped entirely.

use z3dk_common::address::Address;

use super::table::LabelIndex;

/// Parse a WLA SYM document into `index`, reading only the `[labels]`
/// section (`bank:offset label` lines).
pub fn parse_into(text: &str, index: &mut LabelIndex) {
	let mut in_labels = false;
	for line in text.lines() {
		let line = line.trim();
		if line.is_empty() || line.starts_with(';') {
			continue;
		}
		if let Some(section) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
			in_labels = section.eq_ignore_ascii_case("labels");
			continue;
		}
		if !in_labels {
			continue;
		}
		let Some((addr, label)) = line.split_once(' ') else { continue };
		let Some((bank, offset)) = addr.split_once(':') else { continue };
		let (Ok(bank), Ok(offset)) =
			(u8::from_str_radix(bank, 16), u16::from_str_radix(offset, 16))
		else {
			continue;
		};
		index.add_label(Address::from_bank_offset(bank, offset), label.trim());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_only_the_labels_section() {
		let text = "[definitions]\nFOO EQU 1\n[labels]\n00:8000 MainEntry\n7e:0010 PlayerState\n";
		let mut index = LabelIndex::new();
		parse_into(text, &mut index);
		assert_eq!(index.lookup(Address::new(0x008000)), Some("MainEntry"));
		assert_eq!(index.lookup(Address::new(0x7E0010)), Some("PlayerState"));
		assert!(index.lookup(Address::new(0x000001)).is_none());
	}

	#[test]
	fn ignores_sections_after_labels() {
		let text = "[labels]\n00:8000 Start\n[breakpoints]\n00:8000\n";
		let mut index = LabelIndex::new();
		parse_into(text, &mut index);
		assert_eq!(index.len(), 1);
	}
}
