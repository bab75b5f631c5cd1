//! Hover (spec.md §4.8 "Hover").

use lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};
use z3dk_common::address::Address;
use z3dk_core::instructions::Mnemonic;

use crate::capabilities::token_at;
use crate::emulator_link::EmulatorLink;
use crate::knowledge_base;
use crate::workspace::Workspace;

/// Build a hover response for `position` in `text`, if the token there is
/// one of: a known label, a 65816 mnemonic, a define, or a raw `$HEX`
/// address the knowledge base recognizes.
pub async fn hover(
	workspace: &Workspace,
	text: &str,
	position: Position,
	emulator: Option<&EmulatorLink>,
) -> Option<Hover> {
	let line = text.lines().nth(position.line as usize)?;
	let (token, start, end) = token_at(line, position.character as usize)?;

	let body = if let Some(address) = label_hover(workspace, &token) {
		address
	} else if let Some(mnemonic) = mnemonic_from_name(&token) {
		mnemonic_hover_text(mnemonic)
	} else if let Some(define) = workspace.define_map.lock().unwrap().get(&token) {
		format!("```\n!{} = {}\n```", define.name, define.value)
	} else if let Some(address) = parse_hex_token(&token) {
		hex_token_hover(workspace, address, emulator).await
	} else {
		return None;
	};

	Some(Hover {
		contents: HoverContents::Markup(MarkupContent {
			kind: MarkupKind::Markdown,
			value: body,
		}),
		range: Some(lsp_types::Range {
			start: Position::new(position.line, start as u32),
			end: Position::new(position.line, end as u32),
		}),
	})
}

fn label_hover(workspace: &Workspace, token: &str) -> Option<String> {
	let label_map = workspace.label_map.lock().unwrap();
	let (address, _) = label_map.iter().find(|(_, names)| names.contains(&token.to_string()))?;
	Some(format!("**{token}**\n\naddress: `{address}`"))
}

fn mnemonic_from_name(token: &str) -> Option<Mnemonic> {
	let upper = token.to_ascii_uppercase();
	z3dk_core::instructions::OPCODE_TABLE.iter().map(|info| info.mnemonic).find(|m| m.to_string() == upper)
}

fn mnemonic_hover_text(mnemonic: Mnemonic) -> String {
	let doc = knowledge_base::mnemonic_hover(mnemonic);
	format!("**{mnemonic}**\n\n{}\n\nflags: `{}`", doc.description, doc.flags)
}

async fn hex_token_hover(workspace: &Workspace, address: Address, emulator: Option<&EmulatorLink>) -> String {
	let mut body = format!("`{address}`");
	if let Some(label) = workspace.address_to_label.lock().unwrap().get(&address) {
		body.push_str(&format!(" — **{label}**"));
	}
	if let Some(doc) = knowledge_base::ram_doc(address) {
		body.push_str(&format!("\n\n{doc}"));
	}
	if address.is_wram() {
		if let Some(link) = emulator {
			if let Some(value) = link.read_byte(address).await {
				body.push_str(&format!("\n\nLive Value: ${value:02X}"));
			}
		}
	}
	body
}

fn parse_hex_token(token: &str) -> Option<Address> {
	let digits = token.strip_prefix('$')?;
	u32::from_str_radix(digits, 16).ok().map(Address::new)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_token() {
		assert_eq!(parse_hex_token("$7E0010"), Some(Address::new(0x7E0010)));
		assert_eq!(parse_hex_token("Oracle_Main"), None);
	}

	#[test]
	fn resolves_mnemonic_case_insensitively() {
		assert_eq!(mnemonic_from_name("lda"), Some(Mnemonic::Lda));
		assert_eq!(mnemonic_from_name("bogus"), None);
	}
}
