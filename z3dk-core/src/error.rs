//! Error handling for the 65816 disassembly and analysis toolchain.
//!
//! This mirrors the error taxonomy in spec.md §7: most failures attach a
//! [`SourcePos`] and are collected rather than raised, so a pass can finish
//! and report everything wrong with a buffer in one pass.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used throughout the core crate.
pub type CoreResult<T> = Result<T, CoreError>;

/// A position in source text, used to locate parse and lint findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePos {
	pub file: PathBuf,
	pub line: usize,
	pub column: usize,
}

impl SourcePos {
	#[must_use]
	pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
		Self {
			file,
			line,
			column,
		}
	}

	#[must_use]
	pub fn file_only(file: PathBuf) -> Self {
		Self {
			file,
			line: 1,
			column: 1,
		}
	}
}

impl fmt::Display for SourcePos {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
	}
}

/// Severity of a [`Diagnostic`]: whether a batch tool should exit nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
	Error,
	Warning,
}

/// A single finding from the assembler collaborator or the lint engine.
///
/// This is data, not an error: lint passes never fail, they accumulate
/// `Diagnostic`s and keep going (spec.md §7 Propagation policy). `raw` keeps
/// the assembler's untyped original message around for pass-through display
/// without this crate having to understand every format it might produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub severity: Severity,
	pub message: String,
	pub file: Option<PathBuf>,
	pub line: Option<usize>,
	pub column: Option<usize>,
	pub raw: Option<String>,
}

impl Diagnostic {
	#[must_use]
	pub fn error(message: impl Into<String>) -> Self {
		Self {
			severity: Severity::Error,
			message: message.into(),
			file: None,
			line: None,
			column: None,
			raw: None,
		}
	}

	#[must_use]
	pub fn warning(message: impl Into<String>) -> Self {
		Self {
			severity: Severity::Warning,
			message: message.into(),
			file: None,
			line: None,
			column: None,
			raw: None,
		}
	}

	#[must_use]
	pub fn at(mut self, file: PathBuf, line: usize, column: usize) -> Self {
		self.file = Some(file);
		self.line = Some(line);
		self.column = Some(column);
		self
	}

	#[must_use]
	pub fn is_error(&self) -> bool {
		self.severity == Severity::Error
	}
}

/// Comprehensive error type for I/O, parsing, and configuration failures.
#[derive(Error, Debug)]
pub enum CoreError {
	#[error("I/O error{}: {source}", pos.as_ref().map(|p| format!(" at {p}")).unwrap_or_default())]
	Io {
		pos: Option<SourcePos>,
		#[source]
		source: std::io::Error,
	},

	#[error("parse error at {pos}: {message}")]
	Parse { pos: SourcePos, message: String },

	#[error("configuration error: {message}")]
	Config { message: String },

	#[error("{count} error diagnostics were reported")]
	LintFailed { count: usize },

	#[error("internal error: {message}")]
	Internal { message: String },
}

impl CoreError {
	#[must_use]
	pub fn parse(pos: SourcePos, message: impl Into<String>) -> Self {
		Self::Parse {
			pos,
			message: message.into(),
		}
	}

	#[must_use]
	pub fn config(message: impl Into<String>) -> Self {
		Self::Config {
			message: message.into(),
		}
	}

	#[must_use]
	pub fn internal(message: impl Into<String>) -> Self {
		Self::Internal {
			message: message.into(),
		}
	}
}

impl From<std::io::Error> for CoreError {
	fn from(source: std::io::Error) -> Self {
		Self::Io {
			pos: None,
			source,
		}
	}
}

/// Accumulates [`Diagnostic`]s across a pass without short-circuiting it.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticCollector {
	diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, diagnostic: Diagnostic) {
		self.diagnostics.push(diagnostic);
	}

	pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
		self.diagnostics.extend(diagnostics);
	}

	#[must_use]
	pub fn has_errors(&self) -> bool {
		self.diagnostics.iter().any(Diagnostic::is_error)
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<Diagnostic> {
		self.diagnostics
	}

	#[must_use]
	pub fn as_slice(&self) -> &[Diagnostic] {
		&self.diagnostics
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn source_pos_display() {
		let pos = SourcePos::new(PathBuf::from("bank_00.asm"), 42, 10);
		assert_eq!(format!("{pos}"), "bank_00.asm:42:10");
	}

	#[test]
	fn collector_tracks_errors() {
		let mut collector = DiagnosticCollector::new();
		assert!(!collector.has_errors());
		collector.push(Diagnostic::warning("unknown width"));
		assert!(!collector.has_errors());
		collector.push(Diagnostic::error("ORG collision"));
		assert!(collector.has_errors());
		assert_eq!(collector.into_vec().len(), 2);
	}
}
