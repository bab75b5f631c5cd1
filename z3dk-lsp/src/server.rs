//! The `tower_lsp::LanguageServer` implementation: wires every capability
//! module to its protocol method, and runs the debounce scheduler that
//! drives re-analysis (spec.md §4.8 "Debounce scheduler").

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lsp_types::{
	CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
	DidOpenTextDocumentParams, DocumentSymbolParams, DocumentSymbolResponse, ExecuteCommandOptions,
	ExecuteCommandParams, GotoDefinitionParams, GotoDefinitionResponse, Hover, HoverParams,
	HoverProviderCapability, InitializeParams, InitializeResult, InitializedParams, InlayHint, InlayHintParams,
	OneOf, ReferenceParams, RenameOptions, RenameParams, SemanticTokensFullOptions,
	SemanticTokensLegend, SemanticTokensOptions, SemanticTokensParams, SemanticTokensResult, ServerCapabilities,
	ServerInfo, SignatureHelp, SignatureHelpOptions, SignatureHelpParams, TextDocumentSyncCapability,
	TextDocumentSyncKind, Url, WorkDoneProgressOptions, WorkspaceEdit, WorkspaceSymbolParams,
};
use serde_json::Value;
use tower_lsp::jsonrpc::Result as RpcResult;
use tower_lsp::{Client, LanguageServer};

use crate::assembler_client::{AssemblerClient, ExternalAssemblerClient};
use crate::capabilities::{commands, completion, definition, document_symbols, hover, inlay_hints, references, semantic_tokens, signature_help, workspace_symbols};
use crate::debounce;
use crate::document::Document;
use crate::emulator_link::EmulatorLink;
use crate::workspace::Workspace;

/// One document-version worth of diagnostics, published after an
/// analysis pass completes.
pub struct Backend {
	pub client: Client,
	pub workspace: Arc<Workspace>,
	pub assembler: Arc<dyn AssemblerClient>,
	pub emulator: Option<EmulatorLink>,
}

impl Backend {
	#[must_use]
	pub fn new(client: Client, root: PathBuf, config: z3dk_core::Config) -> Self {
		let emulator = config.emulator_addr.clone().map(EmulatorLink::new);
		let workspace = Arc::new(Workspace::new(root, config));
		Self {
			client,
			workspace,
			assembler: Arc::new(ExternalAssemblerClient::new(PathBuf::from("z3dk-asm"))),
			emulator,
		}
	}

	async fn reanalyze_document(&self, path: &PathBuf) {
		reanalyze_and_publish(&self.client, &self.workspace, self.assembler.as_ref(), path).await;
	}

	fn document_text(&self, uri: &Url) -> Option<String> {
		self.workspace.documents.get(uri).map(|doc| doc.text.clone())
	}

	fn macro_params(&self, uri: &Url) -> std::collections::HashMap<String, Vec<String>> {
		let text = self.document_text(uri).unwrap_or_default();
		collect_macro_params_for_signature_help(&text)
	}

	/// Mark `uri`'s analysis root, and everything between it and the edited
	/// document in the project graph, for re-analysis (spec.md §4.8
	/// "Document lifecycle": "propagates `needs_analysis` to the document's
	/// root ... so include parents are re-analyzed").
	fn propagate_needs_analysis(&self, uri: &Url) {
		let Ok(path) = uri.to_file_path() else { return };
		let preferred = self.workspace.preferred_roots();
		let graph = self.workspace.project_graph.lock().unwrap();
		let root = graph.select_root(&path, &preferred);
		let ancestors = graph.ancestor_distances(&path);
		drop(graph);

		mark_needs_analysis(&self.workspace, &path);
		mark_needs_analysis(&self.workspace, &root);
		for ancestor in ancestors.keys() {
			mark_needs_analysis(&self.workspace, ancestor);
		}
	}

	/// Spawn the debounce scheduler as a background task: every 100ms,
	/// re-analyze any document whose last edit has gone quiet
	/// (spec.md §4.8 "Debounce scheduler") and still needs analysis.
	pub fn spawn_debounce_loop(&self) {
		let client = self.client.clone();
		let workspace = Arc::clone(&self.workspace);
		let assembler = Arc::clone(&self.assembler);
		tokio::spawn(async move {
			let mut interval = tokio::time::interval(Duration::from_millis(100));
			loop {
				interval.tick().await;
				let due: Vec<PathBuf> = workspace
					.documents
					.iter()
					.filter(|entry| entry.needs_analysis && debounce::is_quiet(entry.last_change, std::time::Instant::now()))
					.map(|entry| entry.path())
					.collect();
				for path in due {
					if let Ok(uri) = Url::from_file_path(&path) {
						if let Some(mut doc) = workspace.documents.get_mut(&uri) {
							doc.needs_analysis = false;
						}
					}
					reanalyze_and_publish(&client, &workspace, assembler.as_ref(), &path).await;
				}
			}
		});
	}
}

fn mark_needs_analysis(workspace: &Workspace, path: &std::path::Path) {
	let Ok(uri) = Url::from_file_path(path) else { return };
	if let Some(mut doc) = workspace.documents.get_mut(&uri) {
		doc.needs_analysis = true;
	}
}

async fn reanalyze_and_publish(client: &Client, workspace: &Arc<Workspace>, assembler: &dyn AssemblerClient, path: &PathBuf) {
	let diagnostics = crate::analysis::analyze(workspace, assembler, path).await;
	let Ok(uri) = Url::from_file_path(path) else { return };
	let version = workspace.documents.get(&uri).map(|doc| doc.version);
	let lsp_diagnostics = diagnostics.into_iter().map(to_lsp_diagnostic).collect();
	client.publish_diagnostics(uri, lsp_diagnostics, version).await;
}

fn to_lsp_diagnostic(diagnostic: z3dk_core::error::Diagnostic) -> lsp_types::Diagnostic {
	let line = diagnostic.line.unwrap_or(1).saturating_sub(1) as u32;
	let column = diagnostic.column.unwrap_or(1).saturating_sub(1) as u32;
	let severity = if diagnostic.is_error() { lsp_types::DiagnosticSeverity::ERROR } else { lsp_types::DiagnosticSeverity::WARNING };
	lsp_types::Diagnostic {
		range: lsp_types::Range::new(lsp_types::Position::new(line, column), lsp_types::Position::new(line, column)),
		severity: Some(severity),
		code: None,
		code_description: None,
		source: Some("z3dk".to_string()),
		message: diagnostic.message,
		related_information: None,
		tags: None,
		data: None,
	}
}

fn collect_macro_params_for_signature_help(text: &str) -> std::collections::HashMap<String, Vec<String>> {
	// Shares the macro-definition scan with inlay hints; kept private here
	// rather than exposed from `inlay_hints` since it's an implementation
	// detail of both, not a capability in its own right.
	let mut macros = std::collections::HashMap::new();
	for line in text.lines() {
		let trimmed = z3dk_core::parsing::strip_asm_comment(line).trim();
		let Some(rest) = trimmed.strip_prefix("macro ") else { continue };
		let Some(paren) = rest.find('(') else { continue };
		let name = rest[..paren].trim().to_string();
		let Some(close) = rest[paren..].find(')') else { continue };
		let params: Vec<String> =
			rest[paren + 1..paren + close].split(',').map(|p| p.trim().trim_start_matches('!').to_string()).filter(|p| !p.is_empty()).collect();
		if !name.is_empty() && !params.is_empty() {
			macros.insert(name, params);
		}
	}
	macros
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
	async fn initialize(&self, _params: InitializeParams) -> RpcResult<InitializeResult> {
		self.workspace.load_gitignore();

		Ok(InitializeResult {
			server_info: Some(ServerInfo {
				name: z3dk_common::cst::SERVER_AGENT.to_string(),
				version: Some(z3dk_common::cst::PKG_VERSION.to_string()),
			}),
			capabilities: ServerCapabilities {
				text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
				hover_provider: Some(HoverProviderCapability::Simple(true)),
				completion_provider: Some(CompletionOptions {
					trigger_characters: Some(vec!["!".to_string(), ".".to_string(), "@".to_string()]),
					..Default::default()
				}),
				definition_provider: Some(OneOf::Left(true)),
				document_symbol_provider: Some(OneOf::Left(true)),
				workspace_symbol_provider: Some(OneOf::Left(true)),
				references_provider: Some(OneOf::Left(true)),
				rename_provider: Some(OneOf::Right(RenameOptions {
					prepare_provider: Some(false),
					work_done_progress_options: WorkDoneProgressOptions::default(),
				})),
				semantic_tokens_provider: Some(lsp_types::SemanticTokensServerCapabilities::SemanticTokensOptions(SemanticTokensOptions {
					legend: SemanticTokensLegend {
						token_types: semantic_tokens::TOKEN_TYPES.to_vec(),
						token_modifiers: Vec::new(),
					},
					full: Some(SemanticTokensFullOptions::Bool(true)),
					range: Some(false),
					work_done_progress_options: WorkDoneProgressOptions::default(),
				})),
				inlay_hint_provider: Some(OneOf::Left(true)),
				signature_help_provider: Some(SignatureHelpOptions {
					trigger_characters: Some(vec!["(".to_string(), ",".to_string()]),
					retrigger_characters: None,
					work_done_progress_options: WorkDoneProgressOptions::default(),
				}),
				execute_command_provider: Some(ExecuteCommandOptions {
					commands: vec![commands::GET_BANK_USAGE.to_string()],
					work_done_progress_options: WorkDoneProgressOptions::default(),
				}),
				..Default::default()
			},
		})
	}

	async fn initialized(&self, _params: InitializedParams) {
		self.client.log_message(lsp_types::MessageType::INFO, format!("{} ready", z3dk_common::cst::SERVER_AGENT)).await;
		self.spawn_debounce_loop();
	}

	async fn shutdown(&self) -> RpcResult<()> {
		Ok(())
	}

	async fn did_open(&self, params: DidOpenTextDocumentParams) {
		let uri = params.text_document.uri;
		let text = params.text_document.text;
		let version = params.text_document.version;
		self.workspace.documents.insert(uri.clone(), Document::open(uri.clone(), version, text));
		if let Ok(path) = uri.to_file_path() {
			if let Some(doc) = self.workspace.documents.get(&uri) {
				self.workspace.register_includes(&path, &doc.parsed);
			}
			self.reanalyze_document(&path).await;
		}
	}

	async fn did_change(&self, mut params: DidChangeTextDocumentParams) {
		let uri = params.text_document.uri;
		let Some(change) = params.content_changes.pop() else { return };
		if let Some(mut doc) = self.workspace.documents.get_mut(&uri) {
			doc.change(params.text_document.version, change.text);
		}
		if let (Ok(path), Some(doc)) = (uri.to_file_path(), self.workspace.documents.get(&uri)) {
			self.workspace.register_includes(&path, &doc.parsed);
		}
		self.propagate_needs_analysis(&uri);
	}

	async fn did_close(&self, params: DidCloseTextDocumentParams) {
		let uri = params.text_document.uri;
		self.workspace.documents.remove(&uri);
		self.client.publish_diagnostics(uri, Vec::new(), None).await;
	}

	async fn hover(&self, params: HoverParams) -> RpcResult<Option<Hover>> {
		let uri = params.text_document_position_params.text_document.uri;
		let position = params.text_document_position_params.position;
		let Some(text) = self.document_text(&uri) else { return Ok(None) };
		Ok(hover::hover(&self.workspace, &text, position, self.emulator.as_ref()).await)
	}

	async fn completion(&self, params: CompletionParams) -> RpcResult<Option<CompletionResponse>> {
		let uri = params.text_document_position.text_document.uri;
		let position = params.text_document_position.position;
		let Some(text) = self.document_text(&uri) else { return Ok(None) };
		let line = text.lines().nth(position.line as usize).unwrap_or("");
		let prefix = line[..(position.character as usize).min(line.len())]
			.rsplit(|c: char| !crate::capabilities::TOKEN_ALPHABET(c))
			.next()
			.unwrap_or("");
		Ok(Some(CompletionResponse::Array(completion::completion(&self.workspace, prefix))))
	}

	async fn goto_definition(&self, params: GotoDefinitionParams) -> RpcResult<Option<GotoDefinitionResponse>> {
		let uri = params.text_document_position_params.text_document.uri;
		let position = params.text_document_position_params.position;
		let Some(path) = uri.to_file_path().ok() else { return Ok(None) };
		let Some(text) = self.document_text(&uri) else { return Ok(None) };
		Ok(definition::definition(&self.workspace, &path, &text, position).map(GotoDefinitionResponse::Scalar))
	}

	async fn document_symbol(&self, params: DocumentSymbolParams) -> RpcResult<Option<DocumentSymbolResponse>> {
		let uri = params.text_document.uri;
		let Some(doc) = self.workspace.documents.get(&uri) else { return Ok(None) };
		Ok(Some(DocumentSymbolResponse::Nested(document_symbols::document_symbols(&doc.parsed))))
	}

	async fn symbol(&self, params: WorkspaceSymbolParams) -> RpcResult<Option<Vec<lsp_types::SymbolInformation>>> {
		Ok(Some(workspace_symbols::workspace_symbols(&self.workspace, &params.query)))
	}

	async fn references(&self, params: ReferenceParams) -> RpcResult<Option<Vec<lsp_types::Location>>> {
		let uri = params.text_document_position.text_document.uri;
		let position = params.text_document_position.position;
		let Some(text) = self.document_text(&uri) else { return Ok(None) };
		let Some(token) = references::token_under_cursor(&text, position) else { return Ok(None) };
		Ok(Some(references::references(&self.workspace, &token)))
	}

	async fn rename(&self, params: RenameParams) -> RpcResult<Option<WorkspaceEdit>> {
		let uri = params.text_document_position.text_document.uri;
		let position = params.text_document_position.position;
		let Some(text) = self.document_text(&uri) else { return Ok(None) };
		let Some(token) = references::token_under_cursor(&text, position) else { return Ok(None) };
		Ok(Some(references::rename(&self.workspace, &token, &params.new_name)))
	}

	async fn semantic_tokens_full(&self, params: SemanticTokensParams) -> RpcResult<Option<SemanticTokensResult>> {
		let uri = params.text_document.uri;
		let Some(text) = self.document_text(&uri) else { return Ok(None) };
		Ok(Some(SemanticTokensResult::Tokens(lsp_types::SemanticTokens {
			result_id: None,
			data: semantic_tokens::semantic_tokens(&text),
		})))
	}

	async fn inlay_hint(&self, params: InlayHintParams) -> RpcResult<Option<Vec<InlayHint>>> {
		let uri = params.text_document.uri;
		let Some(text) = self.document_text(&uri) else { return Ok(None) };
		Ok(Some(inlay_hints::inlay_hints(&self.workspace, &text)))
	}

	async fn signature_help(&self, params: SignatureHelpParams) -> RpcResult<Option<SignatureHelp>> {
		let uri = params.text_document_position_params.text_document.uri;
		let position = params.text_document_position_params.position;
		let Some(text) = self.document_text(&uri) else { return Ok(None) };
		let macros = self.macro_params(&uri);
		Ok(signature_help::signature_help(&text, position, &macros))
	}

	async fn execute_command(&self, params: ExecuteCommandParams) -> RpcResult<Option<Value>> {
		if params.command == commands::GET_BANK_USAGE {
			let blocks = commands::get_bank_usage(&self.workspace);
			return Ok(Some(serde_json::to_value(blocks).unwrap_or(Value::Null)));
		}
		if commands::is_emulator_command(&params.command) {
			// Emulator-control commands are the client's responsibility
			// (spec.md §4.8): acknowledge without acting.
			return Ok(Some(Value::Null));
		}
		Ok(None)
	}
}

