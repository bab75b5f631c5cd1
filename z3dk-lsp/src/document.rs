//! In-memory open-buffer state (spec.md §4.8 "Document lifecycle").

use std::time::Instant;

use lsp_types::Url;
use z3dk_core::error::Diagnostic;
use z3dk_core::parsing::ParsedFile;

/// One open text document, tracked from `didOpen` through `didClose`.
#[derive(Debug, Clone)]
pub struct Document {
	pub uri: Url,
	pub version: i32,
	pub text: String,
	pub parsed: ParsedFile,
	pub diagnostics: Vec<Diagnostic>,
	pub needs_analysis: bool,
	pub last_change: Instant,
}

impl Document {
	/// `didOpen`: build state and request the first full analysis.
	#[must_use]
	pub fn open(uri: Url, version: i32, text: String) -> Self {
		let path = uri.to_file_path().unwrap_or_default();
		let parsed = z3dk_core::parsing::parse_file(&path, &text);
		Self {
			uri,
			version,
			text,
			parsed,
			diagnostics: Vec::new(),
			needs_analysis: true,
			last_change: Instant::now(),
		}
	}

	/// `didChange`: replace the text, run the fast symbol-only reparse, and
	/// mark the document (and, by the caller propagating it to the root,
	/// its include ancestors) for full re-analysis.
	pub fn change(&mut self, version: i32, text: String) {
		let path = self.uri.to_file_path().unwrap_or_default();
		self.parsed = z3dk_core::parsing::parse_file(&path, &text);
		self.text = text;
		self.version = version;
		self.needs_analysis = true;
		self.last_change = Instant::now();
	}

	#[must_use]
	pub fn path(&self) -> std::path::PathBuf {
		self.uri.to_file_path().unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn open_document_needs_analysis() {
		let doc = Document::open(Url::parse("file:///tmp/main.asm").unwrap(), 1, "Start:\n".to_string());
		assert!(doc.needs_analysis);
		assert_eq!(doc.parsed.symbols.len(), 1);
	}

	#[test]
	fn change_reparses_and_flags_reanalysis() {
		let mut doc = Document::open(Url::parse("file:///tmp/main.asm").unwrap(), 1, String::new());
		doc.needs_analysis = false;
		doc.change(2, "Start:\nEnd:\n".to_string());
		assert!(doc.needs_analysis);
		assert_eq!(doc.version, 2);
		assert_eq!(doc.parsed.symbols.len(), 2);
	}
}
