//! Include-dependency graph and analysis-root selection (spec.md §4.6).
//!
//! Every time the source parser follows an `incsrc`/`include` directive it
//! registers the edge here. An include-only file (a macro library, a data
//! table) has no sensible standalone analysis — [`ProjectGraph::select_root`]
//! walks up to whichever parent the project actually builds.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Bidirectional parent/child include graph over project files.
#[derive(Debug, Clone, Default)]
pub struct ProjectGraph {
	parents: HashMap<PathBuf, Vec<PathBuf>>,
	children: HashMap<PathBuf, Vec<PathBuf>>,
}

impl ProjectGraph {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Record that `parent` includes `child`. Append-only within a
	/// workspace session (spec.md §5's shared-resource policy).
	pub fn register_dependency(&mut self, parent: &Path, child: &Path) {
		let parent = parent.to_path_buf();
		let child = child.to_path_buf();
		if !self.children.entry(parent.clone()).or_default().contains(&child) {
			self.children.get_mut(&parent).unwrap().push(child.clone());
		}
		if !self.parents.entry(child.clone()).or_default().contains(&parent) {
			self.parents.get_mut(&child).unwrap().push(parent);
		}
	}

	/// Files that directly `incsrc`/`incdir` `child` (no transitive hops).
	#[must_use]
	pub fn direct_parents(&self, child: &Path) -> Vec<PathBuf> {
		self.parents.get(child).cloned().unwrap_or_default()
	}

	/// BFS over `child -> parents` from `start`, returning every reachable
	/// ancestor (including `start` itself at distance 0) paired with its
	/// shortest distance.
	#[must_use]
	pub fn ancestor_distances(&self, start: &Path) -> HashMap<PathBuf, usize> {
		let mut distances = HashMap::new();
		let mut queue = VecDeque::new();
		distances.insert(start.to_path_buf(), 0);
		queue.push_back(start.to_path_buf());
		while let Some(current) = queue.pop_front() {
			let distance = distances[&current];
			if let Some(parents) = self.parents.get(&current) {
				for parent in parents {
					if !distances.contains_key(parent) {
						distances.insert(parent.clone(), distance + 1);
						queue.push_back(parent.clone());
					}
				}
			}
		}
		distances
	}

	/// Resolve the file that should serve as `unit`'s analysis entry point.
	///
	/// 1. If any ancestor (or `unit` itself) is in `preferred`, return the
	///    one at the smallest distance, lexicographic tie-break.
	/// 2. Otherwise return the ancestor with no parents of its own (a true
	///    root) at minimum distance, same tie-break.
	/// 3. If `unit` has no known ancestors at all, return `unit`.
	#[must_use]
	pub fn select_root(&self, unit: &Path, preferred: &HashSet<PathBuf>) -> PathBuf {
		let distances = self.ancestor_distances(unit);

		if let Some(path) = Self::best_candidate(&distances, |p| preferred.contains(p)) {
			return path;
		}

		if let Some(path) =
			Self::best_candidate(&distances, |p| self.parents.get(p).is_none_or(Vec::is_empty))
		{
			return path;
		}

		unit.to_path_buf()
	}

	fn best_candidate(
		distances: &HashMap<PathBuf, usize>,
		predicate: impl Fn(&Path) -> bool,
	) -> Option<PathBuf> {
		distances
			.iter()
			.filter(|(path, _)| predicate(path))
			.min_by(|(path_a, dist_a), (path_b, dist_b)| dist_a.cmp(dist_b).then(path_a.cmp(path_b)))
			.map(|(path, _)| path.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn p(s: &str) -> PathBuf {
		PathBuf::from(s)
	}

	#[test]
	fn select_root_returns_unit_with_no_ancestors() {
		let graph = ProjectGraph::new();
		assert_eq!(graph.select_root(&p("a.asm"), &HashSet::new()), p("a.asm"));
	}

	#[test]
	fn select_root_prefers_nearest_preferred_ancestor() {
		let mut graph = ProjectGraph::new();
		graph.register_dependency(&p("main.asm"), &p("macros.asm"));
		graph.register_dependency(&p("macros.asm"), &p("leaf.asm"));
		let preferred: HashSet<PathBuf> = [p("main.asm")].into_iter().collect();
		assert_eq!(graph.select_root(&p("leaf.asm"), &preferred), p("main.asm"));
	}

	#[test]
	fn select_root_falls_back_to_true_root() {
		let mut graph = ProjectGraph::new();
		graph.register_dependency(&p("main.asm"), &p("leaf.asm"));
		assert_eq!(graph.select_root(&p("leaf.asm"), &HashSet::new()), p("main.asm"));
	}

	#[test]
	fn ancestor_distances_includes_start_at_zero() {
		let graph = ProjectGraph::new();
		let distances = graph.ancestor_distances(&p("solo.asm"));
		assert_eq!(distances.get(&p("solo.asm")), Some(&0));
	}
}
