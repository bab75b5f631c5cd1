//! Language server core for the 65816 romhacking toolchain (spec.md §4.8).
//!
//! [`run_stdio`] is the crate's single entry point: it wires a [`Backend`]
//! up to `tower_lsp` over stdin/stdout and runs until the client shuts the
//! connection down.

pub mod analysis;
pub mod assembler_client;
pub mod capabilities;
pub mod debounce;
pub mod document;
pub mod emulator_link;
pub mod gitignore;
pub mod knowledge_base;
pub mod server;
pub mod workspace;

use tower_lsp::{LspService, Server};

pub use server::Backend;
pub use workspace::Workspace;

/// Run the language server over stdio until the client disconnects.
pub async fn run_stdio(config: z3dk_core::Config) {
	let root = std::env::current_dir().unwrap_or_default();
	let stdin = tokio::io::stdin();
	let stdout = tokio::io::stdout();

	let (service, socket) = LspService::build(move |client| Backend::new(client, root.clone(), config.clone())).finish();
	Server::new(stdin, stdout, socket).serve(service).await;
}
