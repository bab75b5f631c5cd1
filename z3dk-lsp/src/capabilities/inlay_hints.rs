//! Inlay hints (spec.md §4.8 "Inlay hints"): label names after resolvable
//! `$HEX` addresses, and parameter names at macro call sites.

use std::collections::HashMap;

use lsp_types::{InlayHint, InlayHintKind, InlayHintLabel, Position};
use z3dk_common::address::Address;

use crate::workspace::Workspace;

/// Build every inlay hint for `text`: a ` :label` suffix after each `$HEX`
/// value the workspace can resolve, and `param:` prefixes at macro call
/// sites whose definition is visible in `text`.
#[must_use]
pub fn inlay_hints(workspace: &Workspace, text: &str) -> Vec<InlayHint> {
	let macros = collect_macro_params(text);
	let mut hints = Vec::new();
	for (line_number, line) in text.lines().enumerate() {
		hints.extend(hex_label_hints(workspace, line_number as u32, line));
		hints.extend(macro_param_hints(&macros, line_number as u32, line));
	}
	hints
}

fn hex_label_hints(workspace: &Workspace, line_number: u32, line: &str) -> Vec<InlayHint> {
	let address_to_label = workspace.address_to_label.lock().unwrap();
	let chars: Vec<char> = line.chars().collect();
	let mut hints = Vec::new();
	let mut i = 0usize;
	while i < chars.len() {
		if chars[i] == '$' {
			let start = i;
			let mut end = i + 1;
			while end < chars.len() && chars[end].is_ascii_hexdigit() {
				end += 1;
			}
			if end > start + 1 {
				let digits: String = chars[start + 1..end].iter().collect();
				if let Ok(raw) = u32::from_str_radix(&digits, 16) {
					let address = Address::new(raw);
					if let Some(label) = address_to_label.get(&address) {
						hints.push(InlayHint {
							position: Position::new(line_number, end as u32),
							label: InlayHintLabel::String(format!(" :{label}")),
							kind: Some(InlayHintKind::TYPE),
							text_edits: None,
							tooltip: None,
							padding_left: None,
							padding_right: None,
							data: None,
						});
					}
				}
			}
			i = end;
			continue;
		}
		i += 1;
	}
	hints
}

fn macro_param_hints(macros: &HashMap<String, Vec<String>>, line_number: u32, line: &str) -> Vec<InlayHint> {
	let mut hints = Vec::new();
	for (name, params) in macros {
		let Some(call_start) = find_call(line, name) else { continue };
		let Some(open_paren) = line[call_start..].find('(').map(|i| call_start + i) else { continue };
		let args = split_args(&line[open_paren + 1..]);
		for (index, (arg_start, _arg_text)) in args.iter().enumerate() {
			let Some(param) = params.get(index) else { break };
			hints.push(InlayHint {
				position: Position::new(line_number, (open_paren + 1 + arg_start) as u32),
				label: InlayHintLabel::String(format!("{param}: ")),
				kind: Some(InlayHintKind::PARAMETER),
				text_edits: None,
				tooltip: None,
				padding_left: None,
				padding_right: Some(true),
				data: None,
			});
		}
	}
	hints
}

/// Find `name` called as `name(...)` on `line`, respecting word
/// boundaries, i.e. not matching inside a longer identifier.
fn find_call(line: &str, name: &str) -> Option<usize> {
	let bytes = line.as_bytes();
	let needle = name.as_bytes();
	let mut from = 0;
	while let Some(rel) = line[from..].find(name) {
		let start = from + rel;
		let end = start + needle.len();
		let left_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric() && bytes[start - 1] != b'_';
		let after_ws = line[end..].trim_start();
		if left_ok && after_ws.starts_with('(') {
			return Some(start);
		}
		from = start + 1;
		if from >= line.len() {
			break;
		}
	}
	None
}

/// Split a `(`-stripped argument list into `(byte_offset, text)` pairs,
/// respecting nested parens and quoted strings so commas inside either
/// don't split an argument.
fn split_args(rest: &str) -> Vec<(usize, String)> {
	let mut args = Vec::new();
	let mut depth = 0i32;
	let mut in_string = false;
	let mut current_start = 0usize;
	let chars: Vec<char> = rest.chars().collect();
	let mut current = String::new();
	for (i, &c) in chars.iter().enumerate() {
		if in_string {
			current.push(c);
			if c == '"' {
				in_string = false;
			}
			continue;
		}
		match c {
			'"' => {
				in_string = true;
				current.push(c);
			}
			'(' => {
				depth += 1;
				current.push(c);
			}
			')' if depth > 0 => {
				depth -= 1;
				current.push(c);
			}
			')' => break,
			',' if depth == 0 => {
				args.push((current_start, current.trim().to_string()));
				current.clear();
				current_start = i + 1;
			}
			_ => current.push(c),
		}
	}
	if !current.trim().is_empty() {
		args.push((current_start, current.trim().to_string()));
	}
	args
}

/// Scan for `macro Name(p1, p2)` ... `endmacro` blocks and collect each
/// macro's parameter names.
fn collect_macro_params(text: &str) -> HashMap<String, Vec<String>> {
	let mut macros = HashMap::new();
	for line in text.lines() {
		let trimmed = z3dk_core::parsing::strip_asm_comment(line).trim();
		let Some(rest) = trimmed.strip_prefix("macro ").or_else(|| trimmed.strip_prefix("macro")) else { continue };
		let rest = rest.trim_start();
		let Some(paren) = rest.find('(') else { continue };
		let name = rest[..paren].trim().to_string();
		if name.is_empty() {
			continue;
		}
		let Some(close) = rest[paren..].find(')') else { continue };
		let params: Vec<String> = rest[paren + 1..paren + close]
			.split(',')
			.map(|p| p.trim().trim_start_matches('!').to_string())
			.filter(|p| !p.is_empty())
			.collect();
		if !params.is_empty() {
			macros.insert(name, params);
		}
	}
	macros
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_hex_address_to_label() {
		let workspace = Workspace::new(std::path::PathBuf::from("/tmp"), z3dk_core::Config::default());
		workspace.address_to_label.lock().unwrap().insert(Address::new(0x7E0010), "ModuleIndex".to_string());
		let hints = hex_label_hints(&workspace, 0, "LDA $7E0010");
		assert_eq!(hints.len(), 1);
	}

	#[test]
	fn collects_macro_parameter_names() {
		let text = "macro DrawSprite(x, y)\n  LDA #x\nendmacro\n";
		let macros = collect_macro_params(text);
		assert_eq!(macros.get("DrawSprite"), Some(&vec!["x".to_string(), "y".to_string()]));
	}

	#[test]
	fn hints_call_site_arguments() {
		let mut macros = HashMap::new();
		macros.insert("DrawSprite".to_string(), vec!["x".to_string(), "y".to_string()]);
		let hints = macro_param_hints(&macros, 0, "%DrawSprite(1, 2)");
		assert_eq!(hints.len(), 2);
	}
}
