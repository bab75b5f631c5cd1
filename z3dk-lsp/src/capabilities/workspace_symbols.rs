//! Workspace symbols (spec.md §4.8 "Workspace symbols").

use lsp_types::{Location, Position, Range, SymbolInformation, SymbolKind as LspSymbolKind, Url};
use z3dk_core::parsing::SymbolKind;

use crate::workspace::Workspace;

/// Case-insensitive substring match for `query` across every open
/// document's symbols.
#[must_use]
#[allow(deprecated)]
pub fn workspace_symbols(workspace: &Workspace, query: &str) -> Vec<SymbolInformation> {
	let query_lower = query.to_ascii_lowercase();
	let mut results = Vec::new();
	for entry in &workspace.documents {
		let uri = entry.key().clone();
		for symbol in &entry.value().parsed.symbols {
			if !symbol.name.to_ascii_lowercase().contains(&query_lower) {
				continue;
			}
			let line = symbol.line.saturating_sub(1) as u32;
			let column = symbol.column.saturating_sub(1) as u32;
			let range = Range::new(Position::new(line, column), Position::new(line, column));
			results.push(SymbolInformation {
				name: symbol.name.clone(),
				kind: lsp_kind(symbol.kind),
				tags: None,
				deprecated: None,
				location: Location { uri: uri.clone(), range },
				container_name: None,
			});
		}
	}
	results
}

fn lsp_kind(kind: SymbolKind) -> LspSymbolKind {
	match kind {
		SymbolKind::Function => LspSymbolKind::FUNCTION,
		SymbolKind::Constant => LspSymbolKind::CONSTANT,
		SymbolKind::Data => LspSymbolKind::VARIABLE,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::document::Document;

	#[test]
	fn matches_substring_case_insensitively() {
		let workspace = Workspace::new(std::path::PathBuf::from("/tmp"), z3dk_core::Config::default());
		let uri = Url::parse("file:///tmp/main.asm").unwrap();
		workspace.documents.insert(uri.clone(), Document::open(uri, 1, "OverworldInit:\n".to_string()));
		let results = workspace_symbols(&workspace, "world");
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].name, "OverworldInit");
	}

	#[test]
	fn no_match_returns_empty() {
		let workspace = Workspace::new(std::path::PathBuf::from("/tmp"), z3dk_core::Config::default());
		assert!(workspace_symbols(&workspace, "anything").is_empty());
	}
}
