//! Document symbols (spec.md §4.8 "Document symbols").

use lsp_types::{DocumentSymbol, Position, Range, SymbolKind as LspSymbolKind};
use z3dk_core::parsing::{ParsedFile, SymbolKind};

/// Every symbol declared in `parsed`, projected to LSP's
/// [`DocumentSymbol`] shape. There's no file filtering to do here — the
/// caller already parsed exactly the document being asked about.
#[must_use]
pub fn document_symbols(parsed: &ParsedFile) -> Vec<DocumentSymbol> {
	parsed.symbols.iter().map(to_document_symbol).collect()
}

#[allow(deprecated)]
fn to_document_symbol(symbol: &z3dk_core::parsing::Symbol) -> DocumentSymbol {
	let line = symbol.line.saturating_sub(1) as u32;
	let column = symbol.column.saturating_sub(1) as u32;
	let range = Range::new(Position::new(line, column), Position::new(line, column + symbol.name.len() as u32));
	DocumentSymbol {
		name: symbol.name.clone(),
		detail: symbol.detail.clone(),
		kind: lsp_kind(symbol.kind),
		tags: None,
		deprecated: None,
		range,
		selection_range: range,
		children: None,
	}
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
	use std::path::Path;

	use super::*;

	#[test]
	fn projects_every_parsed_symbol() {
		let parsed = z3dk_core::parsing::parse_file(Path::new("main.asm"), "Start:\n!VERSION = 1\n");
		let symbols = document_symbols(&parsed);
		assert_eq!(symbols.len(), 2);
	}
}
