//! Line-by-line source file parsing (spec.md §4.5).
//!
//! Walks a comment-stripped file, tracking a namespace stack so nested
//! `namespace`/`pushns`/`popns` blocks mangle symbol names the way the
//! assembler would (`Outer_Inner_label`; `namespace off` clears the stack
//! without pushing), and collects every label, define, data declaration, and
//! struct field as a [`Symbol`], plus every `incsrc`/`incdir` as an
//! [`IncludeDirective`] for the caller to resolve and recurse into.

use std::path::{Path, PathBuf};

use crate::parsing::directives::{self, Directive};
use crate::parsing::lexer::strip_asm_comment;
use crate::parsing::tokens::{Symbol, SymbolKind};

/// One `incsrc`/`include`/`incdir` reference found while parsing a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
	pub target: String,
	pub is_dir: bool,
	pub line: usize,
}

/// Everything discovered in one source file.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
	pub symbols: Vec<Symbol>,
	pub includes: Vec<IncludeDirective>,
}

/// Parse `text` (the contents of `path`) into a [`ParsedFile`].
#[must_use]
pub fn parse_file(path: &Path, text: &str) -> ParsedFile {
	let mut result = ParsedFile::default();
	let mut namespace_stack: Vec<String> = Vec::new();
	let mut in_macro = false;
	// Mangled struct name, raw struct name, and the `.field` symbols
	// collected so far, emitted together at `endstruct`.
	let mut in_struct: Option<(String, String, Vec<(String, usize, usize)>)> = None;

	for (index, raw_line) in text.lines().enumerate() {
		let line_number = index + 1;
		let stripped = strip_asm_comment(raw_line);
		let trimmed = stripped.trim();
		if trimmed.is_empty() {
			continue;
		}

		if let Some(directive) = directives::recognize(trimmed) {
			match directive {
				Directive::Namespace(name) => {
					namespace_stack.clear();
					if !name.eq_ignore_ascii_case("off") {
						namespace_stack.push(name);
					}
				}
				Directive::PushNamespace(name) => namespace_stack.push(name),
				Directive::PopNamespace => {
					namespace_stack.pop();
				}
				Directive::Struct(name) => {
					in_struct = Some((mangle(&namespace_stack, &name), name.clone(), Vec::new()));
					result.symbols.push(Symbol {
						name: mangle(&namespace_stack, &name),
						raw_name: name,
						kind: SymbolKind::Constant,
						line: line_number,
						column: leading_width(raw_line),
						detail: None,
						origin: path.to_path_buf(),
					});
				}
				Directive::Macro(name) => {
					in_macro = true;
					result.symbols.push(Symbol {
						name: mangle(&namespace_stack, &name),
						raw_name: name,
						kind: SymbolKind::Function,
						line: line_number,
						column: leading_width(raw_line),
						detail: None,
						origin: path.to_path_buf(),
					});
				}
				Directive::EndStruct => {
					if let Some((struct_name, raw_struct_name, fields)) = in_struct.take() {
						for (field, field_line, field_column) in fields {
							result.symbols.push(Symbol {
								name: format!("{struct_name}.{field}"),
								raw_name: format!("{raw_struct_name}.{field}"),
								kind: SymbolKind::Constant,
								line: field_line,
								column: field_column,
								detail: None,
								origin: path.to_path_buf(),
							});
						}
					}
				}
				Directive::EndMacro => in_macro = false,
				Directive::Define { name, value } => {
					result.symbols.push(Symbol {
						name: mangle(&namespace_stack, &name),
						raw_name: name,
						kind: SymbolKind::Constant,
						line: line_number,
						column: leading_width(raw_line),
						detail: value,
						origin: path.to_path_buf(),
					});
				}
				Directive::IncludeSource(target) => result.includes.push(IncludeDirective {
					target,
					is_dir: false,
					line: line_number,
				}),
				Directive::IncludeDir(target) => result.includes.push(IncludeDirective {
					target,
					is_dir: true,
					line: line_number,
				}),
			}
			continue;
		}

		if in_macro {
			continue;
		}

		if let Some((_, _, fields)) = in_struct.as_mut() {
			if let Some(label) = parse_label(trimmed) {
				if let Some(field) = label.strip_prefix('.') {
					fields.push((field.to_string(), line_number, leading_width(raw_line)));
				}
			}
			continue;
		}

		if let Some(label) = parse_label(trimmed) {
			result.symbols.push(Symbol {
				name: mangle(&namespace_stack, label),
				raw_name: label.to_string(),
				kind: SymbolKind::Function,
				line: line_number,
				column: leading_width(raw_line),
				detail: None,
				origin: path.to_path_buf(),
			});
			continue;
		}

		if let Some((name, value)) = parse_data_symbol(trimmed) {
			result.symbols.push(Symbol {
				name: mangle(&namespace_stack, name),
				raw_name: name.to_string(),
				kind: SymbolKind::Data,
				line: line_number,
				column: leading_width(raw_line),
				detail: Some(value.to_string()),
				origin: path.to_path_buf(),
			});
		}
	}

	result
}

fn mangle(namespace_stack: &[String], name: &str) -> String {
	if namespace_stack.is_empty() {
		name.to_string()
	} else {
		format!("{}_{name}", namespace_stack.join("_"))
	}
}

fn leading_width(line: &str) -> usize {
	line.len() - line.trim_start().len() + 1
}

/// `name:` at the start of a line.
fn parse_label(line: &str) -> Option<&str> {
	let name = line.strip_suffix(':')?;
	crate::utils::is_valid_identifier(name).then_some(name)
}

/// `name = value` or `name db ...` / `name dw ...` / `name dl ...`.
fn parse_data_symbol(line: &str) -> Option<(&str, &str)> {
	if let Some((name, value)) = line.split_once('=') {
		let name = name.trim();
		if crate::utils::is_valid_identifier(name) {
			return Some((name, value.trim()));
		}
		return None;
	}

	let mut parts = line.splitn(2, char::is_whitespace);
	let name = parts.next()?.trim();
	let rest = parts.next().unwrap_or("").trim();
	if !crate::utils::is_valid_identifier(name) {
		return None;
	}
	let keyword = rest.split_whitespace().next()?;
	matches!(keyword, "db" | "dw" | "dl").then_some((name, rest))
}

/// Resolve an `incsrc`/`incdir` target against the including file's
/// directory and a list of extra search roots (spec.md §4.5
/// `ResolveIncludePath`), returning the first candidate that exists.
#[must_use]
pub fn resolve_include_path(including_file: &Path, target: &str, include_paths: &[PathBuf]) -> Option<PathBuf> {
	let target_path = Path::new(target);
	if target_path.is_absolute() && target_path.exists() {
		return Some(target_path.to_path_buf());
	}

	if let Some(parent) = including_file.parent() {
		let candidate = parent.join(target_path);
		if candidate.exists() {
			return Some(candidate);
		}
	}

	for root in include_paths {
		let candidate = root.join(target_path);
		if candidate.exists() {
			return Some(candidate);
		}
	}

	None
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collects_labels_and_defines() {
		let text = "!VERSION = 2\nStart:\n  LDA #$01\nEnd:\n";
		let parsed = parse_file(Path::new("main.asm"), text);
		let names: Vec<&str> = parsed.symbols.iter().map(|s| s.name.as_str()).collect();
		assert!(names.contains(&"VERSION"));
		assert!(names.contains(&"Start"));
		assert!(names.contains(&"End"));
	}

	#[test]
	fn mangles_names_inside_a_namespace() {
		let text = "namespace Overworld\nMain:\n";
		let parsed = parse_file(Path::new("main.asm"), text);
		assert_eq!(parsed.symbols[0].name, "Overworld_Main");
		assert_eq!(parsed.symbols[0].raw_name, "Main");
	}

	#[test]
	fn nested_pushns_mangles_through_both_levels() {
		let text = "namespace Outer\npushns Inner\nLabel:\npopns\n";
		let parsed = parse_file(Path::new("main.asm"), text);
		assert_eq!(parsed.symbols.last().unwrap().name, "Outer_Inner_Label");
	}

	#[test]
	fn namespace_off_disables_mangling() {
		let text = "namespace Overworld\nnamespace off\nMain:\n";
		let parsed = parse_file(Path::new("main.asm"), text);
		assert_eq!(parsed.symbols.last().unwrap().name, "Main");
	}

	#[test]
	fn struct_fields_are_mangled_as_constants_under_the_struct_name() {
		let text = "namespace Overworld\nstruct Entity\n.x:\n.y:\nendstruct\n";
		let parsed = parse_file(Path::new("main.asm"), text);
		let struct_symbol = parsed.symbols.iter().find(|s| s.raw_name == "Entity").unwrap();
		assert_eq!(struct_symbol.kind, SymbolKind::Constant);
		assert_eq!(struct_symbol.name, "Overworld_Entity");

		let x_field = parsed.symbols.iter().find(|s| s.name == "Overworld_Entity.x").unwrap();
		assert_eq!(x_field.kind, SymbolKind::Constant);
		assert_eq!(x_field.raw_name, "Entity.x");

		assert!(parsed.symbols.iter().any(|s| s.name == "Overworld_Entity.y"));
	}

	#[test]
	fn collects_data_symbols() {
		let text = "Table: db $01, $02, $03\n";
		let parsed = parse_file(Path::new("main.asm"), text);
		assert!(parsed.symbols.iter().any(|s| s.kind == SymbolKind::Data && s.name == "Table"));
	}

	#[test]
	fn macro_body_lines_are_not_collected_as_labels() {
		let text = "macro DoThing\nInnerLabel:\nendmacro\n";
		let parsed = parse_file(Path::new("main.asm"), text);
		assert!(!parsed.symbols.iter().any(|s| s.name == "InnerLabel"));
	}

	#[test]
	fn collects_include_directives() {
		let text = "incsrc \"util.asm\"\nincdir \"lib\"\n";
		let parsed = parse_file(Path::new("main.asm"), text);
		assert_eq!(parsed.includes.len(), 2);
		assert!(parsed.includes[0].target == "util.asm" && !parsed.includes[0].is_dir);
		assert!(parsed.includes[1].is_dir);
	}

	#[test]
	fn resolves_include_relative_to_including_file() {
		let dir = tempfile::tempdir().unwrap();
		let included = dir.path().join("util.asm");
		std::fs::write(&included, "").unwrap();
		let including = dir.path().join("main.asm");
		let resolved = resolve_include_path(&including, "util.asm", &[]);
		assert_eq!(resolved, Some(included));
	}
}
