//! Language server: wires a `LanguageService` to tower-lsp.
//!
//! Thin layer: keeps the document store, re-analyses on every full-text
//! change, publishes diagnostics, and forwards hover/completion queries to
//! the service. Hover-time index repairs are applied here.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionOptions, CompletionParams, CompletionResponse, Diagnostic,
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams, Hover,
    HoverContents, HoverParams, HoverProviderCapability, InitializeParams, InitializeResult,
    InitializedParams, MarkupContent, MarkupKind, MessageType, ServerCapabilities, ServerInfo,
    TextDocumentItem, TextDocumentSyncCapability, TextDocumentSyncKind, TextDocumentSyncOptions,
    Url,
};
use tower_lsp::{Client, LspService, Server};
use tracing::{debug, info};

use crate::lsp::{LanguageService, TripleService};
use crate::store::{DocumentSnapshot, DocumentStore};

/// Characters that make the client ask for completions.
pub const TRIGGER_CHARACTERS: [&str; 2] = ["i", "I"];

/// The outbound half of the connection.
#[async_trait]
pub trait LspClient: Send + Sync + 'static {
    /// Replace the diagnostics shown for `uri`.
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>);

    /// Write a line to the client's log console.
    async fn log(&self, message: String);
}

#[async_trait]
impl LspClient for Client {
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>) {
        self.publish_diagnostics(uri, diagnostics, version).await;
    }

    async fn log(&self, message: String) {
        self.log_message(MessageType::LOG, message).await;
    }
}

pub struct IesLanguageServer<C = Client, S = TripleService> {
    client: C,
    documents: RwLock<DocumentStore>,
    service: Arc<S>,
}

impl IesLanguageServer<Client, TripleService> {
    pub fn new(client: Client, service: TripleService) -> Self {
        Self::with_service(client, Arc::new(service))
    }
}

impl<C, S> IesLanguageServer<C, S>
where
    C: LspClient,
    S: LanguageService,
{
    pub fn with_service(client: C, service: Arc<S>) -> Self {
        Self {
            client,
            documents: RwLock::new(DocumentStore::new()),
            service,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Current snapshot of `uri`, if open.
    pub async fn snapshot(&self, uri: &Url) -> Option<Arc<DocumentSnapshot>> {
        self.documents.read().await.get(uri)
    }

    async fn analyze_and_store(&self, uri: Url, text: String, version: i32) {
        let snapshot = DocumentSnapshot::analyze(self.service.as_ref(), text, version);
        debug!(
            %uri,
            version,
            instances = snapshot.index.len(),
            diagnostics = snapshot.diagnostics.len(),
            "document analysed"
        );
        let diagnostics = snapshot.diagnostics.clone();
        self.documents.write().await.upsert(uri.clone(), snapshot);
        self.client.publish(uri, diagnostics, Some(version)).await;
    }
}

fn capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::FULL),
                ..Default::default()
            },
        )),
        hover_provider: Some(HoverProviderCapability::Simple(true)),
        completion_provider: Some(CompletionOptions {
            resolve_provider: Some(true),
            trigger_characters: Some(TRIGGER_CHARACTERS.iter().map(|c| c.to_string()).collect()),
            ..Default::default()
        }),
        ..ServerCapabilities::default()
    }
}

#[tower_lsp::async_trait]
impl<C, S> tower_lsp::LanguageServer for IesLanguageServer<C, S>
where
    C: LspClient,
    S: LanguageService,
{
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        #[allow(deprecated)]
        let root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .map(|folder| folder.uri.to_string())
            .or_else(|| params.root_uri.as_ref().map(Url::to_string))
            .unwrap_or_else(|| "<none>".into());
        info!(%root, "initialize received");

        Ok(InitializeResult {
            capabilities: capabilities(),
            server_info: Some(ServerInfo {
                name: "ies-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log(format!("[ies-lsp({})] started", std::process::id()))
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let TextDocumentItem {
            uri, text, version, ..
        } = params.text_document;
        info!(%uri, "document opened");
        self.analyze_and_store(uri, text, version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // Full sync: the last change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().last() {
            let doc = params.text_document;
            self.analyze_and_store(doc.uri, change.text, doc.version)
                .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        info!(%uri, "document closed");
        self.documents.write().await.remove(&uri);
        self.client.publish(uri, Vec::new(), None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let position = params.text_document_position_params.position;
        let uri = params.text_document_position_params.text_document.uri;
        let Some(snapshot) = self.snapshot(&uri).await else {
            return Ok(None);
        };

        let outcome = self
            .service
            .hover(&snapshot.text, &snapshot.index, position);

        if let Some(patch) = &outcome.patch {
            let applied = self
                .documents
                .write()
                .await
                .apply_patch(&uri, snapshot.version, patch);
            if applied {
                debug!(%uri, instance = %patch.instance, class = %patch.class, "index repaired from hover");
            }
        }

        Ok(outcome.info.map(|info| Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::PlainText,
                value: info.content,
            }),
            range: info.range,
        }))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let position = params.text_document_position.position;
        let uri = params.text_document_position.text_document.uri;
        let items = match self.snapshot(&uri).await {
            Some(snapshot) => self.service.completions(&snapshot.text, position),
            None => Vec::new(),
        };
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        Ok(self.service.resolve_completion(item))
    }
}

/// Run the server over stdin/stdout until the client disconnects.
pub async fn serve_stdio(service: TripleService) {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let (lsp_service, socket) = LspService::new(|client| IesLanguageServer::new(client, service));
    Server::new(stdin, stdout, socket).serve(lsp_service).await;
}
