//! Label index and the three on-disk symbol formats it is built from
//! (spec.md §4.2, §6).

pub mod csv;
pub mod mlb;
pub mod table;
pub mod wla;

use std::path::Path;

pub use table::LabelIndex;

use crate::error::{CoreError, CoreResult};

/// A symbol file format, selected by the `symbols` configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolFormat {
	Mlb,
	Wla,
	Csv,
}

/// Load `path` in `format` into `index`.
///
/// An empty `path` is not an error — it simply loads nothing. A non-empty
/// path that can't be read is an [`CoreError::Io`]; malformed lines within a
/// readable file are silently skipped (spec.md §4.2's failure policy — these
/// formats are historically permissive).
pub fn load_into(path: &Path, format: SymbolFormat, index: &mut LabelIndex) -> CoreResult<()> {
	if path.as_os_str().is_empty() {
		return Ok(());
	}
	let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
		pos: None,
		source,
	})?;
	match format {
		SymbolFormat::Mlb => mlb::parse_into(&text, index),
		SymbolFormat::Wla => wla::parse_into(&text, index),
		SymbolFormat::Csv => csv::parse_into(&text, index),
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::*;

	#[test]
	fn empty_path_is_not_an_error() {
		let mut index = LabelIndex::new();
		assert!(load_into(&PathBuf::new(), SymbolFormat::Mlb, &mut index).is_ok());
		assert!(index.is_empty());
	}

	#[test]
	fn unreadable_path_is_an_io_error() {
		let mut index = LabelIndex::new();
		let path = PathBuf::from("/nonexistent/path/labels.mlb");
		assert!(matches!(
			load_into(&path, SymbolFormat::Mlb, &mut index),
			Err(CoreError::Io { .. })
		));
	}
}
