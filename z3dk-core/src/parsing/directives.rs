//! Directive recognition for source parsing (spec.md §4.5).
//!
//! This only classifies a single already-comment-stripped line; it does not
//! evaluate expressions or track any state across lines (that's
//! `parser::parse_file`'s job).

/// A recognized directive, or `None` for a line that holds none of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
	Namespace(String),
	PushNamespace(String),
	PopNamespace,
	Struct(String),
	EndStruct,
	Macro(String),
	EndMacro,
	Define {
		name: String,
		value: Option<String>,
	},
	IncludeSource(String),
	IncludeDir(String),
}

/// Classify `line` (already comment-stripped) as a [`Directive`], if it is
/// one.
#[must_use]
pub fn recognize(line: &str) -> Option<Directive> {
	let trimmed = line.trim();
	if trimmed.is_empty() {
		return None;
	}

	if let Some(rest) = strip_keyword(trimmed, "namespace") {
		return Some(Directive::Namespace(rest.trim().to_string()));
	}
	if let Some(rest) = strip_keyword(trimmed, "pushns") {
		return Some(Directive::PushNamespace(rest.trim().to_string()));
	}
	if strip_keyword(trimmed, "popns").is_some() {
		return Some(Directive::PopNamespace);
	}
	if let Some(rest) = strip_keyword(trimmed, "struct") {
		return Some(Directive::Struct(rest.trim().to_string()));
	}
	if strip_keyword(trimmed, "endstruct").is_some() {
		return Some(Directive::EndStruct);
	}
	if let Some(rest) = strip_keyword(trimmed, "macro") {
		return Some(Directive::Macro(rest.trim().to_string()));
	}
	if strip_keyword(trimmed, "endmacro").is_some() {
		return Some(Directive::EndMacro);
	}
	if let Some(rest) = strip_keyword(trimmed, "incsrc") {
		return Some(Directive::IncludeSource(unquote(rest.trim())));
	}
	if let Some(rest) = strip_keyword(trimmed, "include") {
		return Some(Directive::IncludeSource(unquote(rest.trim())));
	}
	if let Some(rest) = strip_keyword(trimmed, "incdir") {
		return Some(Directive::IncludeDir(unquote(rest.trim())));
	}
	if let Some(rest) = trimmed.strip_prefix('!') {
		let (name, value) = match rest.split_once('=') {
			Some((name, value)) => (name.trim(), Some(value.trim().to_string())),
			None => (rest.trim(), None),
		};
		if !name.is_empty() {
			return Some(Directive::Define {
				name: name.to_string(),
				value,
			});
		}
	}

	None
}

/// Strip `keyword` from the front of `line`, matching case-insensitively
/// (spec.md §4.5: directives are "recognized regardless of case"). The
/// returned remainder keeps `line`'s original casing.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
	let head = line.get(..keyword.len())?;
	if !head.eq_ignore_ascii_case(keyword) {
		return None;
	}
	let rest = &line[keyword.len()..];
	if rest.is_empty() || rest.starts_with(char::is_whitespace) {
		Some(rest)
	} else {
		None
	}
}

fn unquote(text: &str) -> String {
	text.trim_matches('"').to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn recognizes_namespace_push_pop() {
		assert_eq!(recognize("namespace Foo"), Some(Directive::Namespace("Foo".to_string())));
		assert_eq!(recognize("pushns Bar"), Some(Directive::PushNamespace("Bar".to_string())));
		assert_eq!(recognize("popns"), Some(Directive::PopNamespace));
	}

	#[test]
	fn recognizes_struct_and_macro_blocks() {
		assert_eq!(recognize("struct Entity"), Some(Directive::Struct("Entity".to_string())));
		assert_eq!(recognize("endstruct"), Some(Directive::EndStruct));
		assert_eq!(recognize("macro DrawSprite"), Some(Directive::Macro("DrawSprite".to_string())));
		assert_eq!(recognize("endmacro"), Some(Directive::EndMacro));
	}

	#[test]
	fn recognizes_defines_with_and_without_values() {
		assert_eq!(recognize("!DEBUG"), Some(Directive::Define {
			name: "DEBUG".to_string(),
			value: None
		}));
		assert_eq!(recognize("!VERSION = 2"), Some(Directive::Define {
			name: "VERSION".to_string(),
			value: Some("2".to_string())
		}));
	}

	#[test]
	fn recognizes_includes_with_quoted_paths() {
		assert_eq!(recognize(r#"incsrc "util.asm""#), Some(Directive::IncludeSource("util.asm".to_string())));
		assert_eq!(recognize(r#"incdir "lib""#), Some(Directive::IncludeDir("lib".to_string())));
	}

	#[test]
	fn does_not_match_a_label_that_merely_starts_with_a_keyword_prefix() {
		assert_eq!(recognize("macroblock:"), None);
		assert_eq!(recognize("LDA #$01"), None);
	}

	#[test]
	fn recognizes_directives_regardless_of_case() {
		assert_eq!(recognize("NAMESPACE Foo"), Some(Directive::Namespace("Foo".to_string())));
		assert_eq!(recognize(r#"Incsrc "x.asm""#), Some(Directive::IncludeSource("x.asm".to_string())));
		assert_eq!(recognize("EndStruct"), Some(Directive::EndStruct));
	}
}
