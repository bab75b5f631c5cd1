//! Workspace-wide state: the open-document table, the project graph, and
//! the label/define maps rebuilt wholesale after every analysis pass
//! (spec.md §4.8, §5 "Shared-resource policy").

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashmap::DashMap;
use lsp_types::Url;
use z3dk_common::address::Address;
use z3dk_core::assemble::{AssembledDefine, WrittenBlock};
use z3dk_core::parsing::{ParseCache, ParsedFile, resolve_include_path};
use z3dk_core::project_graph::ProjectGraph;
use z3dk_core::sourcemap::SourceMap;
use z3dk_core::symbols::LabelIndex;

use crate::document::Document;

/// Everything the analysis pipeline and the capability handlers read and
/// rebuild. Caches are mutated only from the single message-pump task, so a
/// plain [`Mutex`] (never contended) is enough for the pieces `DashMap`
/// doesn't already cover.
pub struct Workspace {
	pub root: PathBuf,
	pub config: Mutex<z3dk_core::Config>,
	pub documents: DashMap<Url, Document>,
	pub parse_cache: Mutex<ParseCache>,
	pub project_graph: Mutex<ProjectGraph>,
	pub ignored_paths: Mutex<HashSet<PathBuf>>,

	/// Rebuilt wholesale after every re-analysis (spec.md §5): never
	/// mutated entry-by-entry.
	pub label_map: Mutex<LabelIndex>,
	pub define_map: Mutex<HashMap<String, AssembledDefine>>,
	pub address_to_label: Mutex<HashMap<Address, String>>,

	/// The most recent analysis pass's source map, used by go-to-definition
	/// to walk from a label's address back to its defining line (spec.md
	/// §4.8 "Definition").
	pub last_source_map: Mutex<SourceMap>,

	/// The most recent analysis pass's written blocks, used by the
	/// `z3dk.getBankUsage` command (spec.md §4.8 "Commands").
	pub last_written_blocks: Mutex<Vec<WrittenBlock>>,
}

impl Workspace {
	#[must_use]
	pub fn new(root: PathBuf, config: z3dk_core::Config) -> Self {
		Self {
			root,
			config: Mutex::new(config),
			documents: DashMap::new(),
			parse_cache: Mutex::new(ParseCache::new()),
			project_graph: Mutex::new(ProjectGraph::new()),
			ignored_paths: Mutex::new(HashSet::new()),
			label_map: Mutex::new(LabelIndex::new()),
			define_map: Mutex::new(HashMap::new()),
			address_to_label: Mutex::new(HashMap::new()),
			last_source_map: Mutex::new(SourceMap::new()),
			last_written_blocks: Mutex::new(Vec::new()),
		}
	}

	/// Look up `address`'s first defining source entry in the last
	/// analysis pass and turn it into an LSP [`Location`] pointing at
	/// column 0 of that line.
	#[must_use]
	pub fn last_definition(&self, address: Address) -> Option<lsp_types::Location> {
		let source_map = self.last_source_map.lock().unwrap();
		let entry = source_map.find_entry(address)?;
		let path = source_map.file_path(entry.file_id)?;
		let uri = Url::from_file_path(path).ok()?;
		let line = (entry.line.saturating_sub(1)) as u32;
		Some(lsp_types::Location {
			uri,
			range: lsp_types::Range::new(lsp_types::Position::new(line, 0), lsp_types::Position::new(line, 0)),
		})
	}

	/// Query git once for ignored paths under the workspace root.
	pub fn load_gitignore(&self) {
		let ignored = crate::gitignore::ignored_paths(&self.root);
		*self.ignored_paths.lock().unwrap() = ignored;
	}

	#[must_use]
	pub fn is_ignored(&self, path: &Path) -> bool {
		self.ignored_paths.lock().unwrap().contains(path)
	}

	/// The preferred analysis roots named by the workspace config, as an
	/// absolute-path set for [`ProjectGraph::select_root`].
	#[must_use]
	pub fn preferred_roots(&self) -> HashSet<PathBuf> {
		self.config.lock().unwrap().preferred_roots().into_iter().collect()
	}

	/// Every symbol name known anywhere in the workspace — open documents
	/// plus the rebuilt label map — used by the missing-label suppression
	/// heuristic (spec.md §4.8 step 5).
	#[must_use]
	pub fn symbol_names(&self) -> HashSet<String> {
		let mut names: HashSet<String> =
			self.label_map.lock().unwrap().iter().flat_map(|(_, labels)| labels.iter().cloned()).collect();
		for doc in &self.documents {
			names.extend(doc.parsed.symbols.iter().flat_map(|s| [s.name.clone(), s.raw_name.clone()]));
		}
		names
	}

	/// Resolve `parsed`'s `incsrc`/`incdir` directives against the
	/// configured include paths and record each as a project-graph edge
	/// from `document_path`, so [`ProjectGraph::select_root`] and root
	/// propagation on change (spec.md §4.6, §4.8) see this file's includes.
	pub fn register_includes(&self, document_path: &Path, parsed: &ParsedFile) {
		let include_paths = self.config.lock().unwrap().include_paths.clone();
		let mut graph = self.project_graph.lock().unwrap();
		for include in &parsed.includes {
			if let Some(resolved) = resolve_include_path(document_path, &include.target, &include_paths) {
				graph.register_dependency(document_path, &resolved);
			}
		}
	}

	/// Replace the label/define/address maps wholesale (spec.md §4.8 step 7,
	/// §5's "never mutated in place").
	pub fn rebuild_maps(&self, labels: LabelIndex, defines: Vec<AssembledDefine>) {
		let mut address_to_label = HashMap::new();
		for (address, names) in labels.iter() {
			if let Some(name) = names.first() {
				address_to_label.insert(address, name.clone());
			}
		}
		*self.label_map.lock().unwrap() = labels;
		*self.define_map.lock().unwrap() =
			defines.into_iter().map(|define| (define.name.clone(), define)).collect();
		*self.address_to_label.lock().unwrap() = address_to_label;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn symbol_names_includes_open_documents() {
		let workspace = Workspace::new(PathBuf::from("/tmp"), z3dk_core::Config::default());
		let uri = Url::parse("file:///tmp/main.asm").unwrap();
		workspace.documents.insert(uri.clone(), Document::open(uri, 1, "Start:\n".to_string()));
		assert!(workspace.symbol_names().contains("Start"));
	}
}
