//! Hook comment formatting (spec.md §4.4.1).
//!
//! `; HOOK name [kind] -> target (source) module=… abi=… m=… x=… skip_abi
//! size=N ; note` — every annotation after `name` is optional and present
//! only when the manifest entry set the corresponding field.

use crate::hooks::HookEntry;

/// Render `entry` as a single hook comment line, with a trailing newline.
#[must_use]
pub fn format(entry: &HookEntry) -> String {
	let mut parts = vec!["; HOOK".to_string(), entry.name.clone()];

	if !entry.kind.is_empty() {
		parts.push(format!("[{}]", entry.kind));
	}
	if !entry.target.is_empty() {
		parts.push(format!("-> {}", entry.target));
	}
	if !entry.source.is_empty() {
		parts.push(format!("({})", entry.source));
	}
	if !entry.module.is_empty() {
		parts.push(format!("module={}", entry.module));
	}
	if !entry.abi.is_empty() {
		parts.push(format!("abi={}", entry.abi));
	}
	if !entry.m.is_empty() {
		parts.push(format!("m={}", entry.m));
	}
	if !entry.x.is_empty() {
		parts.push(format!("x={}", entry.x));
	}
	if entry.skip_abi {
		parts.push("skip_abi".to_string());
	}
	if entry.size != 0 {
		parts.push(format!("size={}", entry.size));
	}

	let mut line = parts.join(" ");
	if !entry.note.is_empty() {
		line.push_str(" ; ");
		line.push_str(&entry.note);
	}
	line.push('\n');
	line
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base_entry() -> HookEntry {
		serde_json::from_str(r#"{"address":"0x008000","name":"MainLoopHook"}"#).unwrap()
	}

	#[test]
	fn formats_name_only() {
		let entry = base_entry();
		assert_eq!(format(&entry), "; HOOK MainLoopHook\n");
	}

	#[test]
	fn formats_every_optional_annotation() {
		let mut entry = base_entry();
		entry.kind = "jsl".to_string();
		entry.target = "$00A000".to_string();
		entry.source = "patch.asm:12".to_string();
		entry.module = "overworld".to_string();
		entry.abi = "none".to_string();
		entry.m = "16".to_string();
		entry.x = "8".to_string();
		entry.skip_abi = true;
		entry.size = 4;
		entry.note = "replaces vanilla call".to_string();

		let line = format(&entry);
		assert_eq!(
			line,
			"; HOOK MainLoopHook [jsl] -> $00A000 (patch.asm:12) module=overworld abi=none m=16 \
			 x=8 skip_abi size=4 ; replaces vanilla call\n"
		);
	}
}
