// C3 LSP Server implementation

use std::path::PathBuf;

use c3_index::{Document, Workspace};
use c3_ir::DocumentId;
use dashmap::DashMap;
use parking_lot::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::request::{GotoDeclarationParams, GotoDeclarationResponse};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::{convert, discovery};

/// C3 Language Server
pub struct C3LanguageServer {
    client: Client,
    /// Texts of the documents the editor currently has open.
    open: DashMap<Url, String>,
    workspace: RwLock<Workspace>,
    config: RwLock<ServerConfig>,
    root: RwLock<Option<PathBuf>>,
}

impl C3LanguageServer {
    pub fn new(client: Client) -> Self {
        C3LanguageServer {
            client,
            open: DashMap::new(),
            workspace: RwLock::new(Workspace::new()),
            config: RwLock::new(ServerConfig::default()),
            root: RwLock::new(None),
        }
    }

    fn config(&self) -> ServerConfig {
        self.config.read().clone()
    }

    fn root(&self) -> Option<PathBuf> {
        self.root.read().clone()
    }

    /// Conversion runs before the write lock is taken; the lock only
    /// covers the swap.
    fn refresh(&self, uri: &Url, text: String) {
        match Document::parse(convert::document_id(uri), text) {
            Ok(document) => self.workspace.write().replace(document),
            Err(err) => error!(%uri, %err, "conversion failed, keeping previous version"),
        }
    }

    fn forget(&self, uri: &Url) {
        self.workspace.write().remove_document(&convert::document_id(uri));
    }

    /// Run `query` against the current workspace with the LSP position
    /// translated into the document's byte columns.
    fn query<T>(
        &self,
        uri: &Url,
        position: Position,
        query: impl FnOnce(&Workspace, &Document, &DocumentId, c3_ir::Position) -> Option<T>,
    ) -> Option<T> {
        let workspace = self.workspace.read();
        let id = convert::document_id(uri);
        let document = workspace.document(&id)?;
        let position = convert::position_from_lsp(document, position);
        query(&workspace, document, &id, position)
    }

    fn definition(&self, params: &TextDocumentPositionParams) -> Option<Location> {
        self.query(
            &params.text_document.uri,
            params.position,
            |workspace, _, id, position| {
                let location = workspace.resolve_definition(id, position)?;
                convert::location(workspace, &location)
            },
        )
    }

    fn hover_info(&self, params: &TextDocumentPositionParams) -> Option<Hover> {
        self.query(
            &params.text_document.uri,
            params.position,
            |workspace, document, id, position| {
                let info = workspace.resolve_hover(id, position)?;
                Some(convert::hover(document, info))
            },
        )
    }

    fn completions(&self, params: &TextDocumentPositionParams, limit: usize) -> Vec<CompletionItem> {
        self.query(
            &params.text_document.uri,
            params.position,
            |workspace, _, id, position| {
                let entries = workspace.build_completions(id, position);
                debug!(found = entries.len(), limit, "completions");
                Some(
                    entries
                        .into_iter()
                        .take(limit)
                        .map(convert::completion_item)
                        .collect(),
                )
            },
        )
        .unwrap_or_default()
    }

    fn signature(&self, params: &TextDocumentPositionParams) -> Option<SignatureHelp> {
        self.query(
            &params.text_document.uri,
            params.position,
            |workspace, _, id, position| {
                let info = workspace.resolve_signature_help(id, position)?;
                Some(convert::signature_help(info))
            },
        )
    }

    /// Register every source under the root that the editor does not
    /// have open.
    async fn index_workspace(&self) {
        let Some(root) = self.root() else {
            return;
        };
        let documents =
            match tokio::task::spawn_blocking(move || discovery::load_documents(&root)).await {
                Ok(documents) => documents,
                Err(err) => {
                    error!(%err, "workspace indexing failed");
                    return;
                }
            };

        let count = self.register_indexed(documents);
        info!(count, "workspace indexed");
        self.client
            .log_message(MessageType::INFO, format!("Indexed {count} C3 files"))
            .await;
    }

    fn register_indexed(&self, documents: Vec<Document>) -> usize {
        let fresh = documents.into_iter().filter(|document| {
            convert::uri(&document.id).map_or(true, |uri| !self.open.contains_key(&uri))
        });
        self.workspace.write().replace_all(fresh)
    }
}

/// The first workspace folder, or `rootUri` for clients that predate
/// workspace folders.
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    let folder = params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| &folder.uri);
    #[allow(deprecated)]
    let uri = folder.or(params.root_uri.as_ref());
    uri?.to_file_path().ok()
}

#[tower_lsp::async_trait]
impl LanguageServer for C3LanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let config = ServerConfig::from_options(params.initialization_options.clone());
        let root = workspace_root(&params);
        debug!(?config, ?root, "initialize");

        let signature_help_provider = config.signature_help.then(|| SignatureHelpOptions {
            trigger_characters: Some(vec!["(".to_string(), ",".to_string()]),
            ..Default::default()
        });
        *self.config.write() = config;
        *self.root.write() = root;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                definition_provider: Some(OneOf::Left(true)),
                declaration_provider: Some(DeclarationCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![".".to_string(), ":".to_string()]),
                    ..Default::default()
                }),
                signature_help_provider,
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "c3-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "C3 language server initialized")
            .await;

        if self.config().index_workspace {
            self.index_workspace().await;
        }
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;

        self.refresh(&uri, text.clone());
        self.open.insert(uri, text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let Some(change) = params.content_changes.into_iter().next() else {
            return;
        };

        self.refresh(&uri, change.text.clone());
        self.open.insert(uri, change.text);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.open.remove(&uri);

        // Indexed files fall back to what is saved on disk.
        let saved = match uri.to_file_path() {
            Ok(path) if self.config().index_workspace => tokio::fs::read_to_string(path).await.ok(),
            _ => None,
        };
        match saved {
            Some(text) => self.refresh(&uri, text),
            None => self.forget(&uri),
        }
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        Ok(self.hover_info(&params.text_document_position_params))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        Ok(self
            .definition(&params.text_document_position_params)
            .map(GotoDefinitionResponse::Scalar))
    }

    async fn goto_declaration(
        &self,
        params: GotoDeclarationParams,
    ) -> Result<Option<GotoDeclarationResponse>> {
        Ok(self
            .definition(&params.text_document_position_params)
            .map(GotoDeclarationResponse::Scalar))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let limit = self.config().completion_limit;
        let items = self.completions(&params.text_document_position, limit);
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn signature_help(&self, params: SignatureHelpParams) -> Result<Option<SignatureHelp>> {
        if !self.config().signature_help {
            return Ok(None);
        }
        Ok(self.signature(&params.text_document_position_params))
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
