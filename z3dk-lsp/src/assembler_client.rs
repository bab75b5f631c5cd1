//! The assembler collaborator, from the LSP's side of the boundary (spec.md
//! §6 "Assembler collaborator contract", §4.8 analysis pipeline step 3).
//!
//! `z3dk-core` only defines the wire shape ([`AssembleOptions`] /
//! [`AssembleResult`]); something has to actually run the external
//! assembler process. [`AssemblerClient`] is that seam, so tests can swap in
//! a canned result without spawning a process.

use std::path::PathBuf;

use tokio::process::Command;
use z3dk_core::assemble::{AssembleOptions, AssembleResult};

/// Anything that can turn [`AssembleOptions`] into an [`AssembleResult`].
#[tower_lsp::async_trait]
pub trait AssemblerClient: Send + Sync {
	async fn assemble(&self, options: &AssembleOptions) -> Result<AssembleResult, String>;
}

/// No collaborator configured: every assemble request returns an empty,
/// unsuccessful result instead of failing the analysis pipeline outright.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAssemblerClient;

#[tower_lsp::async_trait]
impl AssemblerClient for NullAssemblerClient {
	async fn assemble(&self, _options: &AssembleOptions) -> Result<AssembleResult, String> {
		Ok(AssembleResult::default())
	}
}

/// Shells out to an external assembler binary that accepts an
/// [`AssembleOptions`]-shaped JSON document on stdin and writes an
/// [`AssembleResult`]-shaped JSON document to stdout — the process-boundary
/// realization of the collaborator contract.
#[derive(Debug, Clone)]
pub struct ExternalAssemblerClient {
	program: PathBuf,
}

impl ExternalAssemblerClient {
	#[must_use]
	pub fn new(program: PathBuf) -> Self {
		Self {
			program,
		}
	}
}

/// The JSON request shape written to the collaborator's stdin. `defines` is
/// flattened to `key[=value]` strings since that's the wire format both the
/// disassembler's config and the collaborator agree on.
#[derive(Debug, serde::Serialize)]
struct Request<'a> {
	patch_path: &'a std::path::Path,
	rom_data: &'a [u8],
	include_paths: &'a [PathBuf],
	defines: Vec<String>,
	std_includes_path: &'a Option<PathBuf>,
	std_defines_path: &'a Option<PathBuf>,
	memory_files: Vec<MemoryFileJson<'a>>,
}

#[derive(Debug, serde::Serialize)]
struct MemoryFileJson<'a> {
	path: &'a std::path::Path,
	contents: &'a str,
}

#[tower_lsp::async_trait]
impl AssemblerClient for ExternalAssemblerClient {
	async fn assemble(&self, options: &AssembleOptions) -> Result<AssembleResult, String> {
		let request = Request {
			patch_path: &options.patch_path,
			rom_data: &options.rom_data,
			include_paths: &options.include_paths,
			defines: options
				.defines
				.iter()
				.map(|(name, value)| match value {
					Some(v) => format!("{name}={v}"),
					None => name.clone(),
				})
				.collect(),
			std_includes_path: &options.std_includes_path,
			std_defines_path: &options.std_defines_path,
			memory_files: options
				.memory_files
				.iter()
				.map(|file| MemoryFileJson {
					path: &file.path,
					contents: &file.contents,
				})
				.collect(),
		};
		let payload = serde_json::to_vec(&request).map_err(|e| e.to_string())?;

		let mut child = Command::new(&self.program)
			.stdin(std::process::Stdio::piped())
			.stdout(std::process::Stdio::piped())
			.stderr(std::process::Stdio::piped())
			.spawn()
			.map_err(|e| format!("failed to spawn assembler collaborator: {e}"))?;

		{
			use tokio::io::AsyncWriteExt;
			let stdin = child.stdin.as_mut().ok_or("collaborator stdin unavailable")?;
			stdin.write_all(&payload).await.map_err(|e| e.to_string())?;
		}

		let output = child.wait_with_output().await.map_err(|e| e.to_string())?;
		if !output.status.success() {
			return Err(format!(
				"assembler collaborator exited with {}: {}",
				output.status,
				String::from_utf8_lossy(&output.stderr)
			));
		}

		serde_json::from_slice(&output.stdout).map_err(|e| format!("malformed collaborator output: {e}"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn null_client_returns_an_empty_result() {
		let client = NullAssemblerClient;
		let options = AssembleOptions {
			patch_path: PathBuf::new(),
			rom_data: Vec::new(),
			include_paths: Vec::new(),
			defines: Vec::new(),
			std_includes_path: None,
			std_defines_path: None,
			memory_files: Vec::new(),
		};
		let result = client.assemble(&options).await.unwrap();
		assert!(!result.success);
		assert!(result.labels.is_empty());
	}
}
