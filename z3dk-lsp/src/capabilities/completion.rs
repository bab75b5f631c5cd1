//! Completion (spec.md §4.8 "Completion"). Trigger characters `!`, `.`, `@`.

use std::collections::HashSet;
use std::sync::LazyLock;

use lsp_types::{CompletionItem, CompletionItemKind};
use z3dk_core::instructions::OPCODE_TABLE;

use crate::workspace::Workspace;

const DIRECTIVES: &[&str] = &[
	"namespace", "pushns", "popns", "struct", "endstruct", "macro", "endmacro", "incsrc", "incdir", "org",
	"freespace", "db", "dw", "dl",
];

static MNEMONICS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
	let mut names: HashSet<&'static str> = OPCODE_TABLE.iter().map(|info| info.mnemonic.name()).collect();
	let mut sorted: Vec<&'static str> = names.drain().collect();
	sorted.sort_unstable();
	sorted
});

/// Case-insensitive prefix match against directives, workspace symbols,
/// local labels/defines/macros, and 65816 mnemonics.
#[must_use]
pub fn completion(workspace: &Workspace, prefix: &str) -> Vec<CompletionItem> {
	let prefix_lower = prefix.to_ascii_lowercase();
	let mut items = Vec::new();

	for directive in DIRECTIVES {
		if directive.starts_with(&prefix_lower) {
			items.push(item(directive, CompletionItemKind::KEYWORD));
		}
	}

	for mnemonic in MNEMONICS.iter() {
		if mnemonic.to_ascii_lowercase().starts_with(&prefix_lower) {
			items.push(item(mnemonic, CompletionItemKind::OPERATOR));
		}
	}

	for name in workspace.symbol_names() {
		if name.to_ascii_lowercase().starts_with(&prefix_lower) {
			items.push(item(&name, CompletionItemKind::VARIABLE));
		}
	}

	for name in workspace.define_map.lock().unwrap().keys() {
		if name.to_ascii_lowercase().starts_with(&prefix_lower) {
			items.push(item(name, CompletionItemKind::CONSTANT));
		}
	}

	items
}

fn item(label: &str, kind: CompletionItemKind) -> CompletionItem {
	CompletionItem {
		label: label.to_string(),
		kind: Some(kind),
		..Default::default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn matches_directive_prefix() {
		let workspace = Workspace::new(std::path::PathBuf::from("/tmp"), z3dk_core::Config::default());
		let items = completion(&workspace, "nam");
		assert!(items.iter().any(|i| i.label == "namespace"));
	}

	#[test]
	fn matches_mnemonic_case_insensitively() {
		let workspace = Workspace::new(std::path::PathBuf::from("/tmp"), z3dk_core::Config::default());
		let items = completion(&workspace, "LD");
		assert!(items.iter().any(|i| i.label == "LDA"));
	}
}
