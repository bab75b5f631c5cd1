//! Parse result cache keyed by `(path, mtime)` (spec.md §4.5 "Parse cache").

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::parsing::parser::ParsedFile;

/// Caches [`ParsedFile`]s so an unchanged file on disk is parsed once.
#[derive(Debug, Default)]
pub struct ParseCache {
	entries: HashMap<PathBuf, (SystemTime, ParsedFile)>,
}

impl ParseCache {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse `path` (reading `text` and `mtime` from the caller, since an LSP
	/// client's in-memory buffer may be newer than what's on disk), reusing a
	/// cached result when `mtime` hasn't advanced.
	pub fn parse(&mut self, path: &Path, text: &str, mtime: SystemTime) -> &ParsedFile {
		let needs_parse = match self.entries.get(path) {
			Some((cached_mtime, _)) => *cached_mtime < mtime,
			None => true,
		};
		if needs_parse {
			let parsed = crate::parsing::parser::parse_file(path, text);
			self.entries.insert(path.to_path_buf(), (mtime, parsed));
		}
		&self.entries[path].1
	}

	/// Drop any cached entry for `path`, forcing the next `parse` to re-run.
	pub fn invalidate(&mut self, path: &Path) {
		self.entries.remove(path);
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	#[test]
	fn reuses_cached_result_when_mtime_unchanged() {
		let mut cache = ParseCache::new();
		let t0 = SystemTime::now();
		cache.parse(Path::new("a.asm"), "Start:\n", t0);
		assert_eq!(cache.len(), 1);
		cache.parse(Path::new("a.asm"), "Start:\n", t0);
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn reparses_when_mtime_advances() {
		let mut cache = ParseCache::new();
		let t0 = SystemTime::now();
		let t1 = t0 + Duration::from_secs(1);
		let first = cache.parse(Path::new("a.asm"), "Start:\n", t0).symbols.len();
		let second = cache.parse(Path::new("a.asm"), "Start:\nEnd:\n", t1).symbols.len();
		assert_eq!(first, 1);
		assert_eq!(second, 2);
	}

	#[test]
	fn invalidate_forces_a_reparse_even_at_the_same_mtime() {
		let mut cache = ParseCache::new();
		let t0 = SystemTime::now();
		cache.parse(Path::new("a.asm"), "Start:\n", t0);
		cache.invalidate(Path::new("a.asm"));
		assert!(cache.is_empty());
	}
}
