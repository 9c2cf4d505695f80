use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use tower_lsp::{ClientSocket, LspService};

const LIBRARY: &str = "module app;\n\
                       struct Emu { int speed; }\n\
                       fn int add(int a, int b) { return a + b; }\n\
                       int hello;\n";

fn uri(name: &str) -> Url {
    Url::parse(&format!("file:///work/{name}")).expect("valid uri")
}

fn at(name: &str, line: u32, character: u32) -> TextDocumentPositionParams {
    TextDocumentPositionParams::new(
        TextDocumentIdentifier::new(uri(name)),
        Position::new(line, character),
    )
}

async fn start(
    options: Option<serde_json::Value>,
) -> (LspService<C3LanguageServer>, ClientSocket, InitializeResult) {
    let (service, socket) = LspService::new(C3LanguageServer::new);
    let result = service
        .inner()
        .initialize(InitializeParams {
            initialization_options: options,
            ..Default::default()
        })
        .await
        .expect("initializes");
    (service, socket, result)
}

async fn open(server: &C3LanguageServer, name: &str, text: &str) {
    server
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem::new(uri(name), "c3".to_string(), 1, text.to_string()),
        })
        .await;
}

async fn definition(server: &C3LanguageServer, params: TextDocumentPositionParams) -> Option<Location> {
    let response = server
        .goto_definition(GotoDefinitionParams {
            text_document_position_params: params,
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        })
        .await
        .expect("no protocol error");
    match response {
        Some(GotoDefinitionResponse::Scalar(location)) => Some(location),
        _ => None,
    }
}

fn range(start_line: u32, start: u32, end_line: u32, end: u32) -> Range {
    Range::new(Position::new(start_line, start), Position::new(end_line, end))
}

// === Initialization ===

#[tokio::test]
async fn test_capabilities() {
    let (_service, _socket, result) = start(None).await;
    let capabilities = result.capabilities;

    assert_eq!(
        capabilities.text_document_sync,
        Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL))
    );
    assert_eq!(capabilities.definition_provider, Some(OneOf::Left(true)));
    assert_eq!(
        capabilities
            .completion_provider
            .and_then(|c| c.trigger_characters),
        Some(vec![".".to_string(), ":".to_string()])
    );
    assert!(capabilities.signature_help_provider.is_some());
    assert_eq!(result.server_info.map(|i| i.name), Some("c3-lsp".to_string()));
}

#[tokio::test]
async fn test_signature_help_can_be_disabled() {
    let (service, _socket, result) = start(Some(json!({ "signatureHelp": false }))).await;
    assert!(result.capabilities.signature_help_provider.is_none());

    let server = service.inner();
    open(server, "main.c3", "module app;\nfn void main() { add(1, ); }\n").await;
    open(server, "lib.c3", LIBRARY).await;
    let help = server
        .signature_help(SignatureHelpParams {
            context: None,
            text_document_position_params: at("main.c3", 1, 24),
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .expect("no protocol error");
    assert_eq!(help, None);
}

#[test]
fn test_workspace_root_prefers_folders() {
    let folder = Url::parse("file:///work/project").expect("valid uri");
    let params = InitializeParams {
        workspace_folders: Some(vec![WorkspaceFolder {
            uri: folder,
            name: "project".to_string(),
        }]),
        ..Default::default()
    };
    assert_eq!(workspace_root(&params), Some(PathBuf::from("/work/project")));
    assert_eq!(workspace_root(&InitializeParams::default()), None);
}

// === Document sync ===

#[tokio::test]
async fn test_definition_across_open_documents() {
    let (service, _socket, _) = start(None).await;
    let server = service.inner();
    open(server, "main.c3", "module app;\nfn void main() { Emu emu; }\n").await;
    open(server, "lib.c3", LIBRARY).await;

    let location = definition(server, at("main.c3", 1, 18)).await.expect("resolves");
    assert_eq!(location.uri, uri("lib.c3"));
    assert_eq!(location.range, range(1, 7, 1, 10));
}

#[tokio::test]
async fn test_change_and_close_update_workspace() {
    let (service, _socket, _) =
        start(Some(json!({ "indexWorkspace": false }))).await;
    let server = service.inner();
    open(server, "main.c3", "module app;\nfn void main() { hello = 1; }\n").await;
    open(server, "lib.c3", LIBRARY).await;
    assert!(definition(server, at("main.c3", 1, 17)).await.is_some());

    server
        .did_change(DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier::new(uri("lib.c3"), 2),
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "module app;\nint goodbye;\n".to_string(),
            }],
        })
        .await;
    assert_eq!(definition(server, at("main.c3", 1, 17)).await, None);

    server
        .did_close(DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier::new(uri("main.c3")),
        })
        .await;
    assert!(server.workspace.read().document(&convert::document_id(&uri("main.c3"))).is_none());
    assert!(!server.open.contains_key(&uri("main.c3")));
}

// === Queries ===

#[tokio::test]
async fn test_hover_translates_utf16_columns() {
    let (service, _socket, _) = start(None).await;
    let server = service.inner();
    // The comment holds a two-byte character, so byte and UTF-16
    // columns differ by one after it.
    open(server, "main.c3", "module app;\nfn void main() { /* é */ hello = 1; }\n").await;
    open(server, "lib.c3", LIBRARY).await;

    let hover = server
        .hover(HoverParams {
            text_document_position_params: at("main.c3", 1, 26),
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .expect("no protocol error")
        .expect("resolves");

    let HoverContents::Markup(markup) = hover.contents else {
        panic!("expected markup");
    };
    assert_eq!(markup.value, "```c3\nint hello\n```\n\nIn module `app`");
    assert_eq!(hover.range, Some(range(1, 25, 1, 30)));
}

#[tokio::test]
async fn test_completion_respects_limit() {
    let (service, _socket, _) = start(Some(json!({ "completionLimit": 1 }))).await;
    let server = service.inner();
    open(server, "main.c3", "module app;\nfn void main() { Emu emu; emu.; }\n").await;
    open(server, "lib.c3", LIBRARY).await;

    let response = server
        .completion(CompletionParams {
            text_document_position: at("main.c3", 1, 30),
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        })
        .await
        .expect("no protocol error");
    let Some(CompletionResponse::Array(items)) = response else {
        panic!("expected a completion list");
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label, "speed");
    assert_eq!(items[0].kind, Some(CompletionItemKind::FIELD));
}

#[tokio::test]
async fn test_signature_help() {
    let (service, _socket, _) = start(None).await;
    let server = service.inner();
    open(server, "main.c3", "module app;\nfn void main() { add(1, ); }\n").await;
    open(server, "lib.c3", LIBRARY).await;

    let help = server
        .signature_help(SignatureHelpParams {
            context: None,
            text_document_position_params: at("main.c3", 1, 24),
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .expect("no protocol error")
        .expect("inside a call");
    assert_eq!(help.signatures[0].label, "app::add(int a, int b)");
    assert_eq!(help.active_parameter, Some(1));
}

#[tokio::test]
async fn test_unknown_document_answers_nothing() {
    let (service, _socket, _) = start(None).await;
    let server = service.inner();
    assert_eq!(definition(server, at("missing.c3", 0, 0)).await, None);
}
