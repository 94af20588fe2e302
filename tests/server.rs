//! Drives the language server through the `LanguageServer` trait with the
//! real triple service and a recording client.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ies_lsp::kb::KnowledgeBase;
use ies_lsp::lsp::TripleService;
use ies_lsp::server::{IesLanguageServer, LspClient};
use tower_lsp::lsp_types::{
    CompletionParams, CompletionResponse, Diagnostic, DidChangeTextDocumentParams,
    DidOpenTextDocumentParams, HoverContents, HoverParams, Position,
    TextDocumentContentChangeEvent, TextDocumentIdentifier, TextDocumentItem,
    TextDocumentPositionParams, Url, VersionedTextDocumentIdentifier,
};
use tower_lsp::LanguageServer;

#[derive(Default)]
struct Recorder {
    published: Mutex<Vec<Vec<Diagnostic>>>,
}

#[async_trait]
impl LspClient for Recorder {
    async fn publish(&self, _: Url, diagnostics: Vec<Diagnostic>, _: Option<i32>) {
        self.published.lock().unwrap().push(diagnostics);
    }

    async fn log(&self, _: String) {}
}

fn uri() -> Url {
    Url::parse("file:///work/people.ttl").unwrap()
}

fn server() -> IesLanguageServer<Recorder, TripleService> {
    let kb = KnowledgeBase::from_json(
        r#"[{"ies:Person": "A person", "iso3166:GB": "UK", "ies:inLocation": "Where"}]"#,
    )
    .unwrap();
    IesLanguageServer::with_service(
        Recorder::default(),
        Arc::new(TripleService::new(Arc::new(kb))),
    )
}

fn position(line: u32, character: u32) -> TextDocumentPositionParams {
    TextDocumentPositionParams {
        text_document: TextDocumentIdentifier { uri: uri() },
        position: Position::new(line, character),
    }
}

async fn hover(server: &IesLanguageServer<Recorder, TripleService>, line: u32, col: u32) -> Option<String> {
    let hover = server
        .hover(HoverParams {
            text_document_position_params: position(line, col),
            work_done_progress_params: Default::default(),
        })
        .await
        .unwrap()?;
    match hover.contents {
        HoverContents::Markup(markup) => Some(markup.value),
        other => panic!("unexpected hover contents: {other:?}"),
    }
}

async fn open(server: &IesLanguageServer<Recorder, TripleService>, text: &str) {
    server
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri(),
                language_id: "turtle".into(),
                version: 1,
                text: text.into(),
            },
        })
        .await;
}

async fn change(server: &IesLanguageServer<Recorder, TripleService>, version: i32, text: &str) {
    server
        .did_change(DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier { uri: uri(), version },
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: text.into(),
            }],
        })
        .await;
}

#[tokio::test]
async fn diagnostics_are_replaced_on_each_change() {
    let server = server();
    open(&server, "data:A a ies:Person\n").await;
    change(&server, 2, "data:A a ies:Person .\n").await;

    let published = server.client().published.lock().unwrap().clone();
    assert_eq!(published.len(), 2);
    assert_eq!(published[0].len(), 1);
    assert_eq!(published[0][0].range.start.line, 0);
    assert!(published[1].is_empty(), "got: {:?}", published[1]);
}

#[tokio::test]
async fn hover_follows_the_latest_text() {
    let server = server();
    open(&server, "data:A a ies:Person .\ndata:A ies:inLocation data:L .").await;
    assert_eq!(hover(&server, 0, 12).await.as_deref(), Some("A person"));
    assert_eq!(hover(&server, 1, 1).await.as_deref(), Some("ies:Person"));
    assert_eq!(hover(&server, 1, 10).await.as_deref(), Some("Where"));

    change(&server, 2, "data:A a ns:Other .\ndata:A ies:inLocation data:L .").await;
    assert_eq!(hover(&server, 1, 1).await.as_deref(), Some("ns:Other"));
}

#[tokio::test]
async fn completion_lists_kb_entries() {
    let server = server();
    open(&server, "data:B a i").await;
    let response = server
        .completion(CompletionParams {
            text_document_position: position(0, 10),
            work_done_progress_params: Default::default(),
            partial_result_params: Default::default(),
            context: None,
        })
        .await
        .unwrap();
    let items = match response {
        Some(CompletionResponse::Array(items)) => items,
        other => panic!("expected an item array, got: {other:?}"),
    };
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["ies:Person", "iso3166:GB", "ies:inLocation"]);

    let resolved = server.completion_resolve(items[1].clone()).await.unwrap();
    assert_eq!(resolved.detail.as_deref(), Some("UK"));
}
