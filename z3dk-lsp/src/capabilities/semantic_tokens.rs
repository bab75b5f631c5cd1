//! Semantic tokens (spec.md §4.8 "Semantic tokens").

use lsp_types::{SemanticToken, SemanticTokenType};
use z3dk_core::instructions::OPCODE_TABLE;

/// Token type legend, in the order `server.rs` registers with the client.
/// Indices here are the `token_type` values emitted below.
pub const TOKEN_TYPES: &[SemanticTokenType] = &[
	SemanticTokenType::FUNCTION,
	SemanticTokenType::MACRO,
	SemanticTokenType::VARIABLE,
	SemanticTokenType::KEYWORD,
	SemanticTokenType::STRING,
	SemanticTokenType::NUMBER,
	SemanticTokenType::OPERATOR,
	SemanticTokenType::new("register"),
];

const FUNCTION: u32 = 0;
const MACRO: u32 = 1;
const VARIABLE: u32 = 2;
const KEYWORD: u32 = 3;
const STRING: u32 = 4;
const NUMBER: u32 = 5;
const OPERATOR: u32 = 6;
const REGISTER: u32 = 7;

const DIRECTIVES: &[&str] = &[
	"namespace", "pushns", "popns", "struct", "endstruct", "macro", "endmacro", "incsrc", "incdir", "org",
	"freespace", "db", "dw", "dl",
];
const REGISTERS: &[&str] = &["a", "x", "y", "s", "d", "p"];

struct Raw {
	line: u32,
	start: u32,
	length: u32,
	token_type: u32,
}

/// Scan `text` line by line and classify every recognizable token,
/// returning LSP's delta-encoded form in ascending `(line, column)` order.
#[must_use]
pub fn semantic_tokens(text: &str) -> Vec<SemanticToken> {
	let mut raw = Vec::new();
	for (line_number, line) in text.lines().enumerate() {
		raw.extend(classify_line(line_number as u32, line));
	}
	encode(raw)
}

fn classify_line(line_number: u32, line: &str) -> Vec<Raw> {
	let mut tokens = Vec::new();
	let chars: Vec<char> = line.chars().collect();
	let mut i = 0usize;
	let mut first_word = true;
	while i < chars.len() {
		let c = chars[i];
		if c == ';' {
			break;
		}
		if c == '"' {
			let start = i;
			i += 1;
			while i < chars.len() && chars[i] != '"' {
				if chars[i] == '\\' {
					i += 1;
				}
				i += 1;
			}
			if i < chars.len() {
				i += 1;
			}
			tokens.push(Raw { line: line_number, start: start as u32, length: (i - start) as u32, token_type: STRING });
			first_word = false;
			continue;
		}
		if c == '$' || c == '%' || c.is_ascii_digit() {
			let start = i;
			i += 1;
			while i < chars.len() && (chars[i].is_ascii_alphanumeric()) {
				i += 1;
			}
			tokens.push(Raw { line: line_number, start: start as u32, length: (i - start) as u32, token_type: NUMBER });
			first_word = false;
			continue;
		}
		if c.is_ascii_alphabetic() || c == '_' || c == '!' || c == '.' {
			let start = i;
			i += 1;
			while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '.') {
				i += 1;
			}
			let word: String = chars[start..i].iter().collect();
			let token_type = classify_word(&word, first_word);
			tokens.push(Raw { line: line_number, start: start as u32, length: (i - start) as u32, token_type });
			first_word = false;
			continue;
		}
		if matches!(c, '+' | '-' | '*' | '/' | '=' | '<' | '>' | '|' | '&' | '^' | '#') {
			tokens.push(Raw { line: line_number, start: i as u32, length: 1, token_type: OPERATOR });
		}
		i += 1;
	}
	tokens
}

fn classify_word(word: &str, first_word: bool) -> u32 {
	let lower = word.to_ascii_lowercase();
	if word.ends_with(':') || (first_word && !word.starts_with('!')) {
		return FUNCTION;
	}
	if word.starts_with('!') {
		return VARIABLE;
	}
	if DIRECTIVES.contains(&lower.as_str()) {
		return KEYWORD;
	}
	if lower == "macro" {
		return MACRO;
	}
	if REGISTERS.contains(&lower.as_str()) && word.len() == 1 {
		return REGISTER;
	}
	if OPCODE_TABLE.iter().any(|info| info.mnemonic.name().eq_ignore_ascii_case(word)) {
		return OPERATOR;
	}
	VARIABLE
}

fn encode(raw: Vec<Raw>) -> Vec<SemanticToken> {
	let mut encoded = Vec::with_capacity(raw.len());
	let mut prev_line = 0u32;
	let mut prev_start = 0u32;
	for token in raw {
		let delta_line = token.line - prev_line;
		let delta_start = if delta_line == 0 { token.start - prev_start } else { token.start };
		encoded.push(SemanticToken {
			delta_line,
			delta_start,
			length: token.length,
			token_type: token.token_type,
			token_modifiers_bitset: 0,
		});
		prev_line = token.line;
		prev_start = token.start;
	}
	encoded
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classifies_label_mnemonic_and_number() {
		let tokens = semantic_tokens("Start:\n  LDA #$01\n");
		assert!(!tokens.is_empty());
		let types: Vec<u32> = tokens.iter().map(|t| t.token_type).collect();
		assert!(types.contains(&FUNCTION));
		assert!(types.contains(&OPERATOR));
		assert!(types.contains(&NUMBER));
	}

	#[test]
	fn skips_comments() {
		let tokens = semantic_tokens("; just a comment\n");
		assert!(tokens.is_empty());
	}
}
