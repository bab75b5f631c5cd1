//! The debounced analysis pipeline (spec.md §4.8 "Analysis pipeline for a
//! document D").

use std::path::Path;

use z3dk_core::assemble::{AssembleOptions, AssembleResult, MemoryFile};
use z3dk_core::error::Diagnostic;
use z3dk_core::lint::{self, LintOptions};
use z3dk_core::symbols::LabelIndex;

use crate::assembler_client::AssemblerClient;
use crate::workspace::Workspace;

/// Re-analyze `document_path`'s project: resolve its root, invoke the
/// assembler collaborator, run the lint engine, merge diagnostics, apply
/// the two suppression heuristics, then rebuild the workspace's label and
/// define maps.
///
/// Returns every diagnostic whose source refers back to `document_path`
/// (step 2's filtering), keyed by nothing further — a single document's
/// `publishDiagnostics` payload.
pub async fn analyze(
	workspace: &Workspace,
	client: &dyn AssemblerClient,
	document_path: &Path,
) -> Vec<Diagnostic> {
	let preferred = workspace.preferred_roots();
	let root = workspace.project_graph.lock().unwrap().select_root(document_path, &preferred);

	let config = workspace.config.lock().unwrap().clone();
	let rom_data = match &config.rom_path {
		Some(path) => std::fs::read(path).unwrap_or_default(),
		None => vec![0u8; config.rom_size.unwrap_or(0)],
	};

	let memory_files: Vec<MemoryFile> = workspace
		.documents
		.iter()
		.map(|entry| MemoryFile {
			path: entry.path(),
			contents: entry.text.clone(),
		})
		.collect();

	let options = AssembleOptions {
		patch_path: root.clone(),
		rom_data,
		include_paths: config.include_paths.clone(),
		defines: config.parsed_defines(),
		std_includes_path: config.std_includes.clone(),
		std_defines_path: config.std_defines.clone(),
		memory_files,
	};

	let result = match client.assemble(&options).await {
		Ok(result) => result,
		Err(message) => {
			tracing::warn!("assembler collaborator failed for {}: {message}", root.display());
			AssembleResult::default()
		}
	};

	let known_hooks = config_hooks(&config);
	let lint_options = LintOptions {
		default_m_width: z3dk_core::flags::Width::W8,
		default_x_width: z3dk_core::flags::Width::W8,
		warn_unknown_width: config.warn_unknown_width,
		warn_branch_outside_bank: config.warn_branch_outside_bank,
		warn_org_collision: config.warn_org_collision,
		warn_unauthorized_hook: config.warn_unauthorized_hook,
		warn_unused_symbols: config.warn_unused_symbols,
		known_hooks,
		prohibited_memory_ranges: config.parsed_memory_ranges(),
		state_overrides: std::collections::HashMap::new(),
	};

	let mut diagnostics = result.diagnostics.clone();
	diagnostics.extend(lint::run(&result, &lint_options));

	let workspace_names = workspace.symbol_names();
	let document_symbols: std::collections::HashSet<String> = workspace
		.documents
		.get(&path_to_uri(document_path))
		.map(|doc| doc.parsed.symbols.iter().flat_map(|s| [s.name.clone(), s.raw_name.clone()]).collect())
		.unwrap_or_default();
	diagnostics.retain(|d| !suppress_missing_label(d, &workspace_names, &document_symbols));
	diagnostics.retain(|d| !suppress_missing_org(d, workspace, document_path));

	rebuild_label_index(workspace, &result);
	workspace.rebuild_maps(collect_labels(&result), result.defines.clone());
	*workspace.last_source_map.lock().unwrap() = result.source_map.clone();
	*workspace.last_written_blocks.lock().unwrap() = result.written_blocks.clone();

	diagnostics.into_iter().filter(|d| diagnostic_refers_to(d, document_path)).collect()
}

fn config_hooks(config: &z3dk_core::Config) -> Option<z3dk_core::hooks::HookManifest> {
	// Hook manifests aren't a `z3dk.toml` key in their own right (spec.md
	// §6 names `hooks.json` as a standalone file); the LSP resolves one
	// next to the configured ROM when present.
	let rom_path = config.rom_path.as_ref()?;
	let candidate = rom_path.with_file_name("hooks.json");
	z3dk_core::hooks::HookManifest::load(&candidate).ok()
}

fn collect_labels(result: &AssembleResult) -> LabelIndex {
	let mut labels = LabelIndex::new();
	for label in &result.labels {
		labels.add_label(label.address, label.name.clone());
	}
	labels
}

fn rebuild_label_index(workspace: &Workspace, result: &AssembleResult) {
	// Merge collaborator-reported labels with every open document's own
	// symbol table, so go-to-definition and hover work even for files the
	// assembler hasn't reached yet on this pass.
	let mut labels = collect_labels(result);
	for doc in &workspace.documents {
		for symbol in &doc.parsed.symbols {
			if let Some(entry) = result.source_map.entries.iter().find(|e| e.line == symbol.line) {
				labels.add_label(entry.address, symbol.name.clone());
			}
		}
	}
	*workspace.label_map.lock().unwrap() = labels;
}

fn diagnostic_refers_to(diagnostic: &Diagnostic, document_path: &Path) -> bool {
	match &diagnostic.file {
		Some(file) => file == document_path,
		None => true,
	}
}

/// Missing-label suppression (spec.md §4.8 step 5): drop a "wasn't found"
/// diagnostic if the named label, its `Oracle_`-stripped form, its
/// `Oracle_`-prefixed form, or its suffix after the first `_` is known
/// anywhere in the workspace or the document itself.
fn suppress_missing_label(
	diagnostic: &Diagnostic,
	workspace_names: &std::collections::HashSet<String>,
	document_names: &std::collections::HashSet<String>,
) -> bool {
	let Some(label) = extract_missing_label(&diagnostic.message) else {
		return false;
	};

	let mut candidates = vec![label.to_string()];
	if let Some(stripped) = label.strip_prefix("Oracle_") {
		candidates.push(stripped.to_string());
	} else {
		candidates.push(format!("Oracle_{label}"));
	}
	if let Some((_, suffix)) = label.split_once('_') {
		candidates.push(suffix.to_string());
	}

	candidates.iter().any(|name| workspace_names.contains(name) || document_names.contains(name))
}

fn extract_missing_label(message: &str) -> Option<&str> {
	let rest = message.strip_prefix("Label '")?;
	let (name, _) = rest.split_once('\'')?;
	Some(name)
}

/// Missing-org suppression (spec.md §4.8 step 6): drop the diagnostic if
/// `document_path` doesn't itself declare `org`/`freespace`, but some direct
/// parent includes it at a point where an `org`/`freespace` precedes the
/// `incsrc`/`incdir` line, respecting `pushpc`/`pullpc` scope.
fn suppress_missing_org(diagnostic: &Diagnostic, workspace: &Workspace, document_path: &Path) -> bool {
	if !diagnostic.message.contains("Missing org or freespace command") {
		return false;
	}
	if document_declares_org(workspace, document_path) {
		return false;
	}
	let include_paths = workspace.config.lock().unwrap().include_paths.clone();
	workspace
		.project_graph
		.lock()
		.unwrap()
		.direct_parents(document_path)
		.into_iter()
		.any(|parent| parent_org_reaches_include(workspace, &parent, document_path, &include_paths))
}

fn document_declares_org(workspace: &Workspace, path: &Path) -> bool {
	document_text(workspace, path).lines().any(|line| {
		let trimmed = z3dk_core::parsing::strip_asm_comment(line).trim();
		trimmed.starts_with("org") || trimmed.starts_with("freespace")
	})
}

fn document_text(workspace: &Workspace, path: &Path) -> String {
	match workspace.documents.get(&path_to_uri(path)) {
		Some(doc) => doc.text.clone(),
		None => std::fs::read_to_string(path).unwrap_or_default(),
	}
}

/// Whether `parent` has an `org`/`freespace` in scope at the specific
/// `incsrc`/`incdir` line that includes `document_path`, tracking
/// `pushpc`/`pullpc` nesting so a bracket that already closed before that
/// line doesn't count.
fn parent_org_reaches_include(
	workspace: &Workspace,
	parent: &Path,
	document_path: &Path,
	include_paths: &[std::path::PathBuf],
) -> bool {
	let text = document_text(workspace, parent);
	let parsed = z3dk_core::parsing::parse_file(parent, &text);
	let Some(include) = parsed.includes.iter().find(|include| {
		z3dk_core::parsing::resolve_include_path(parent, &include.target, include_paths).as_deref()
			== Some(document_path)
	}) else {
		return false;
	};

	let mut org_active = false;
	let mut saved = Vec::new();
	for (index, line) in text.lines().enumerate() {
		let line_number = index + 1;
		if line_number >= include.line {
			break;
		}
		let trimmed = z3dk_core::parsing::strip_asm_comment(line).trim().to_string();
		if trimmed.starts_with("org") || trimmed.starts_with("freespace") {
			org_active = true;
		} else if trimmed.starts_with("pushpc") {
			saved.push(org_active);
		} else if trimmed.starts_with("pullpc") {
			org_active = saved.pop().unwrap_or(org_active);
		}
	}
	org_active
}

fn path_to_uri(path: &Path) -> lsp_types::Url {
	lsp_types::Url::from_file_path(path).unwrap_or_else(|()| lsp_types::Url::parse("file:///").unwrap())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_label_name_from_message() {
		assert_eq!(extract_missing_label("Label 'Oracle_Foo' wasn't found"), Some("Oracle_Foo"));
		assert_eq!(extract_missing_label("unrelated message"), None);
	}

	#[test]
	fn suppresses_when_unprefixed_form_is_known() {
		let diagnostic = Diagnostic::warning("Label 'Oracle_Foo' wasn't found");
		let mut names = std::collections::HashSet::new();
		names.insert("Foo".to_string());
		assert!(suppress_missing_label(&diagnostic, &names, &std::collections::HashSet::new()));
	}

	fn workspace_with_parent(parent_text: &str, parent_path: &Path, child_path: &Path) -> Workspace {
		let workspace = Workspace::new(parent_path.parent().unwrap().to_path_buf(), z3dk_core::Config::default());
		let parsed = z3dk_core::parsing::parse_file(parent_path, parent_text);
		workspace.register_includes(parent_path, &parsed);
		let uri = path_to_uri(parent_path);
		workspace.documents.insert(uri.clone(), crate::document::Document::open(uri, 1, parent_text.to_string()));
		workspace
	}

	#[test]
	fn org_before_incsrc_reaches_the_included_document() {
		let dir = tempfile::tempdir().unwrap();
		let parent_path = dir.path().join("main.asm");
		let child_path = dir.path().join("child.asm");
		std::fs::write(&child_path, "").unwrap();
		let parent_text = format!("org $008000\nincsrc \"{}\"\n", child_path.display());
		let workspace = workspace_with_parent(&parent_text, &parent_path, &child_path);
		let diagnostic = Diagnostic::warning("Missing org or freespace command");
		assert!(suppress_missing_org(&diagnostic, &workspace, &child_path));
	}

	#[test]
	fn org_closed_by_pullpc_before_incsrc_does_not_reach() {
		let dir = tempfile::tempdir().unwrap();
		let parent_path = dir.path().join("main.asm");
		let child_path = dir.path().join("child.asm");
		std::fs::write(&child_path, "").unwrap();
		let parent_text =
			format!("pushpc\norg $008000\npullpc\nincsrc \"{}\"\n", child_path.display());
		let workspace = workspace_with_parent(&parent_text, &parent_path, &child_path);
		let diagnostic = Diagnostic::warning("Missing org or freespace command");
		assert!(!suppress_missing_org(&diagnostic, &workspace, &child_path));
	}
}
