//! References and rename (spec.md §4.8 "References / Rename").

use std::collections::HashMap;

use lsp_types::{Location, Position, Range, TextEdit, Url, WorkspaceEdit};

use crate::capabilities::{token_at, TOKEN_ALPHABET};
use crate::workspace::Workspace;

/// Every occurrence of `token` in any open document, boundary-checked so a
/// search for `Foo` doesn't match inside `FooBar`.
#[must_use]
pub fn references(workspace: &Workspace, token: &str) -> Vec<Location> {
	let mut locations = Vec::new();
	for entry in &workspace.documents {
		let uri = entry.key().clone();
		for (line_number, line) in entry.value().text.lines().enumerate() {
			for (start, end) in matches_on_line(line, token) {
				locations.push(Location {
					uri: uri.clone(),
					range: Range::new(Position::new(line_number as u32, start as u32), Position::new(line_number as u32, end as u32)),
				});
			}
		}
	}
	locations
}

/// A [`WorkspaceEdit`] replacing every occurrence of `token` with
/// `new_name`, one [`TextEdit`] per match (spec.md: "a single
/// `WorkspaceEdit` with one text edit per match").
#[must_use]
pub fn rename(workspace: &Workspace, token: &str, new_name: &str) -> WorkspaceEdit {
	let mut changes: HashMap<Url, Vec<TextEdit>> = HashMap::new();
	for entry in &workspace.documents {
		let uri = entry.key().clone();
		let mut edits = Vec::new();
		for (line_number, line) in entry.value().text.lines().enumerate() {
			for (start, end) in matches_on_line(line, token) {
				edits.push(TextEdit {
					range: Range::new(Position::new(line_number as u32, start as u32), Position::new(line_number as u32, end as u32)),
					new_text: new_name.to_string(),
				});
			}
		}
		if !edits.is_empty() {
			changes.insert(uri, edits);
		}
	}
	WorkspaceEdit { changes: Some(changes), document_changes: None, change_annotations: None }
}

/// All boundary-checked byte-column ranges of `token` on `line`.
fn matches_on_line(line: &str, token: &str) -> Vec<(usize, usize)> {
	let chars: Vec<char> = line.chars().collect();
	let token_chars: Vec<char> = token.chars().collect();
	if token_chars.is_empty() || token_chars.len() > chars.len() {
		return Vec::new();
	}
	let mut matches = Vec::new();
	for start in 0..=(chars.len() - token_chars.len()) {
		let end = start + token_chars.len();
		if chars[start..end] != token_chars[..] {
			continue;
		}
		let left_ok = start == 0 || !TOKEN_ALPHABET(chars[start - 1]);
		let right_ok = end == chars.len() || !TOKEN_ALPHABET(chars[end]);
		if left_ok && right_ok {
			matches.push((start, end));
		}
	}
	matches
}

/// Find the token at `position` in `text`, for callers (the `server`
/// module's `references`/`rename` handlers) that start from a cursor
/// rather than an already-known name.
#[must_use]
pub fn token_under_cursor(text: &str, position: Position) -> Option<String> {
	let line = text.lines().nth(position.line as usize)?;
	token_at(line, position.character as usize).map(|(token, ..)| token)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::document::Document;

	#[test]
	fn finds_whole_word_matches_only() {
		let workspace = Workspace::new(std::path::PathBuf::from("/tmp"), z3dk_core::Config::default());
		let uri = Url::parse("file:///tmp/main.asm").unwrap();
		workspace.documents.insert(uri, Document::open(Url::parse("file:///tmp/main.asm").unwrap(), 1, "JSL Foo\nJSL FooBar\n".to_string()));
		let locations = references(&workspace, "Foo");
		assert_eq!(locations.len(), 1);
		assert_eq!(locations[0].range.start.line, 0);
	}

	#[test]
	fn rename_produces_one_edit_per_match() {
		let workspace = Workspace::new(std::path::PathBuf::from("/tmp"), z3dk_core::Config::default());
		let uri = Url::parse("file:///tmp/main.asm").unwrap();
		workspace.documents.insert(uri.clone(), Document::open(uri.clone(), 1, "Foo:\nJSL Foo\n".to_string()));
		let edit = rename(&workspace, "Foo", "Bar");
		let changes = edit.changes.unwrap();
		assert_eq!(changes.get(&uri).unwrap().len(), 2);
	}
}
