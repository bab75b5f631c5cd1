//! Capability handlers (spec.md §4.8 "Capabilities"): each one answers
//! immediately from in-memory workspace state, no assembler invocation.

pub mod commands;
pub mod completion;
pub mod definition;
pub mod document_symbols;
pub mod hover;
pub mod inlay_hints;
pub mod references;
pub mod semantic_tokens;
pub mod signature_help;
pub mod workspace_symbols;

/// Characters that make up one token: labels, defines, directives, and
/// register/mnemonic names (spec.md §4.8 "References / Rename").
pub const TOKEN_ALPHABET: fn(char) -> bool =
	|c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '!' | '@');

/// The token touching `character` (0-indexed, UTF-16-agnostic byte column)
/// in `line`, if any, as `(text, start_column, end_column)`.
#[must_use]
pub fn token_at(line: &str, character: usize) -> Option<(String, usize, usize)> {
	let bytes: Vec<char> = line.chars().collect();
	if character > bytes.len() {
		return None;
	}
	// Prefer the token the cursor sits inside; fall back to the one
	// immediately to its left, matching how most editors report a hover
	// position right after the last character of a word.
	let probe = if character < bytes.len() && TOKEN_ALPHABET(bytes[character]) {
		character
	} else if character > 0 && TOKEN_ALPHABET(bytes[character - 1]) {
		character - 1
	} else {
		return None;
	};

	let mut start = probe;
	while start > 0 && TOKEN_ALPHABET(bytes[start - 1]) {
		start -= 1;
	}
	let mut end = probe + 1;
	while end < bytes.len() && TOKEN_ALPHABET(bytes[end]) {
		end += 1;
	}

	Some((bytes[start..end].iter().collect(), start, end))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn finds_token_under_cursor() {
		let (text, start, end) = token_at("  JSL Oracle_Main", 10).unwrap();
		assert_eq!(text, "Oracle_Main");
		assert_eq!(start, 6);
		assert_eq!(end, 17);
	}

	#[test]
	fn finds_token_right_after_cursor() {
		let (text, ..) = token_at("Start ", 5).unwrap();
		assert_eq!(text, "Start");
	}

	#[test]
	fn no_token_on_blank_line() {
		assert!(token_at("   ", 1).is_none());
	}
}
