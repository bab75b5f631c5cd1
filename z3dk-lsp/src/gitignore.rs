//! One-shot VCS ignore query (spec.md §4.8 "Git-ignore").
//!
//! Queried once at workspace load; the parser and workspace scans skip
//! anything this returns.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Ask git for every ignored path under `root`. Returns an empty set if
/// `root` isn't a git worktree or the `git` binary isn't on `PATH` — this is
/// advisory, never fatal.
pub fn ignored_paths(root: &Path) -> HashSet<PathBuf> {
	let output = std::process::Command::new("git")
		.arg("ls-files")
		.arg("--others")
		.arg("--ignored")
		.arg("--exclude-standard")
		.current_dir(root)
		.output();

	let Ok(output) = output else {
		return HashSet::new();
	};
	if !output.status.success() {
		return HashSet::new();
	}

	String::from_utf8_lossy(&output.stdout).lines().map(|line| root.join(line)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nonexistent_root_returns_empty_set() {
		let paths = ignored_paths(Path::new("/nonexistent/definitely/not/a/repo"));
		assert!(paths.is_empty());
	}
}
