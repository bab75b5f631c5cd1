//! Go-to-definition (spec.md §4.8 "Definition").

use lsp_types::{Location, Position, Range, Url};
use z3dk_core::parsing::resolve_include_path;

use crate::capabilities::token_at;
use crate::workspace::Workspace;

/// Resolve the definition of the token at `position` in `text`, belonging
/// to `document_path`.
///
/// If the cursor sits inside an `incsrc`/`incdir` quoted path, resolve and
/// jump to the included file's start. Otherwise look the token up as a
/// label and walk the source map for its first defining entry.
#[must_use]
pub fn definition(
	workspace: &Workspace,
	document_path: &std::path::Path,
	text: &str,
	position: Position,
) -> Option<Location> {
	let line = text.lines().nth(position.line as usize)?;

	if let Some(target) = include_target_under_cursor(line, position.character as usize) {
		let include_paths = workspace.config.lock().unwrap().include_paths.clone();
		let resolved = resolve_include_path(document_path, &target, &include_paths)?;
		let uri = Url::from_file_path(&resolved).ok()?;
		return Some(Location {
			uri,
			range: Range::new(Position::new(0, 0), Position::new(0, 0)),
		});
	}

	let (token, ..) = token_at(line, position.character as usize)?;
	let address = {
		let label_map = workspace.label_map.lock().unwrap();
		label_map.iter().find(|(_, names)| names.contains(&token)).map(|(address, _)| address)?
	};

	workspace.last_definition(address)
}

/// True if `character` sits inside an `incsrc "…"` / `incdir "…"` quoted
/// path on `line`.
fn include_target_under_cursor(line: &str, character: usize) -> Option<String> {
	let trimmed = line.trim_start();
	let mut words = trimmed.split_whitespace();
	let keyword = words.next()?;
	if !matches!(keyword, "incsrc" | "include" | "incdir") {
		return None;
	}
	let quote_start = line.find('"')?;
	let quote_end = line[quote_start + 1..].find('"').map(|i| quote_start + 1 + i)?;
	if character < quote_start || character > quote_end {
		return None;
	}
	Some(line[quote_start + 1..quote_end].to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn finds_include_target_inside_quotes() {
		let line = r#"incsrc "util.asm""#;
		assert_eq!(include_target_under_cursor(line, 10), Some("util.asm".to_string()));
	}

	#[test]
	fn no_include_target_outside_quotes() {
		let line = r#"incsrc "util.asm""#;
		assert_eq!(include_target_under_cursor(line, 2), None);
	}
}
