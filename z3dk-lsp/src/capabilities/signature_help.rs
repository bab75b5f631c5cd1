//! Signature help (spec.md §4.8 "Signature help").

use lsp_types::{ParameterInformation, ParameterLabel, Position, SignatureHelp, SignatureInformation};

/// If `position` sits inside a macro call's parentheses, build a single
/// [`SignatureHelp`] from that macro's parameter list, with
/// `active_parameter` set to the count of unbalanced commas to its left.
#[must_use]
pub fn signature_help(text: &str, position: Position, macros: &std::collections::HashMap<String, Vec<String>>) -> Option<SignatureHelp> {
	let line = text.lines().nth(position.line as usize)?;
	let cursor = position.character as usize;
	let chars: Vec<char> = line.chars().collect();
	if cursor > chars.len() {
		return None;
	}

	let open_paren = find_enclosing_open_paren(&chars, cursor)?;
	let name = identifier_before(&chars, open_paren)?;
	let params = macros.get(&name)?;

	let mut active_parameter = 0u32;
	let mut depth = 0i32;
	for &c in &chars[open_paren + 1..cursor] {
		match c {
			'(' => depth += 1,
			')' => depth -= 1,
			',' if depth == 0 => active_parameter += 1,
			_ => {}
		}
	}

	let parameters: Vec<ParameterInformation> = params
		.iter()
		.map(|p| ParameterInformation {
			label: ParameterLabel::Simple(p.clone()),
			documentation: None,
		})
		.collect();

	Some(SignatureHelp {
		signatures: vec![SignatureInformation {
			label: format!("{name}({})", params.join(", ")),
			documentation: None,
			parameters: Some(parameters),
			active_parameter: Some(active_parameter),
		}],
		active_signature: Some(0),
		active_parameter: Some(active_parameter),
	})
}

/// Walk left from `cursor`, tracking paren depth, to find the `(` the
/// cursor is nested inside (if any).
fn find_enclosing_open_paren(chars: &[char], cursor: usize) -> Option<usize> {
	let mut depth = 0i32;
	let mut i = cursor;
	while i > 0 {
		i -= 1;
		match chars[i] {
			')' => depth += 1,
			'(' if depth == 0 => return Some(i),
			'(' => depth -= 1,
			_ => {}
		}
	}
	None
}

fn identifier_before(chars: &[char], paren: usize) -> Option<String> {
	let mut end = paren;
	while end > 0 && chars[end - 1].is_whitespace() {
		end -= 1;
	}
	let start_search = end;
	let mut start = start_search;
	while start > 0 && (chars[start - 1].is_ascii_alphanumeric() || chars[start - 1] == '_') {
		start -= 1;
	}
	if start == end {
		return None;
	}
	Some(chars[start..end].iter().collect::<String>().trim_start_matches('%').to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reports_active_parameter_by_comma_count() {
		let mut macros = std::collections::HashMap::new();
		macros.insert("DrawSprite".to_string(), vec!["x".to_string(), "y".to_string()]);
		let help = signature_help("%DrawSprite(1, 2)", Position::new(0, 15), &macros).unwrap();
		assert_eq!(help.active_parameter, Some(1));
	}

	#[test]
	fn no_help_outside_any_call() {
		let macros = std::collections::HashMap::new();
		assert!(signature_help("LDA #$01", Position::new(0, 3), &macros).is_none());
	}
}
