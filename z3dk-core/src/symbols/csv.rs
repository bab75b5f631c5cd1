//! CSV symbol table parsing (spec.md §4.2, §6).
//!
//! Header row required; `address,label` columns. `address` may be a bare
//! 24-bit hex value or `bank:offset`, optionally `$`-prefixed and quoted.

use z3dk_common::address::Address;

use super::table::LabelIndex;

/// Parse a CSV document into `index`, skipping the header row and any line
/// that doesn't parse cleanly.
pub fn parse_into(text: &str, index: &mut LabelIndex) {
	for line in text.lines().skip(1) {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}
		let Some((addr, label)) = line.split_once(',') else { continue };
		let Some(address) = parse_address(addr.trim()) else { continue };
		index.add_label(address, unquote(label.trim()));
	}
}

fn parse_address(field: &str) -> Option<Address> {
	let field = unquote(field);
	let field = field.strip_prefix('$').unwrap_or(field);
	if let Some((bank, offset)) = field.split_once(':') {
		let bank = u8::from_str_radix(bank, 16).ok()?;
		let offset = u16::from_str_radix(offset, 16).ok()?;
		Some(Address::from_bank_offset(bank, offset))
	} else {
		u32::from_str_radix(field, 16).ok().map(Address::new)
	}
}

fn unquote(field: &str) -> &str {
	field.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(field)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_bank_offset_rows() {
		let text = "address,label\n00:8000,MainEntry\n7e:0010,PlayerState\n";
		let mut index = LabelIndex::new();
		parse_into(text, &mut index);
		assert_eq!(index.lookup(Address::new(0x008000)), Some("MainEntry"));
	}

	#[test]
	fn reads_dollar_and_quoted_fields() {
		let text = "address,label\n\"$008000\",\"MainEntry\"\n";
		let mut index = LabelIndex::new();
		parse_into(text, &mut index);
		assert_eq!(index.lookup(Address::new(0x008000)), Some("MainEntry"));
	}

	#[test]
	fn skips_unparseable_rows() {
		let text = "address,label\nnot-an-address,Foo\n";
		let mut index = LabelIndex::new();
		parse_into(text, &mut index);
		assert!(index.is_empty());
	}
}
