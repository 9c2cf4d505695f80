//! Translation between LSP types and the index model.
//!
//! LSP columns count UTF-16 code units, the model counts bytes, so every
//! position goes through the owning document's line index.

use c3_index::{CompletionEntry, Document, HoverInfo, Location, SignatureInfo, Workspace};
use c3_ir::{DocumentId, Position, Range, SymbolKind};
use tower_lsp::lsp_types as lsp;

pub fn document_id(uri: &lsp::Url) -> DocumentId {
    DocumentId::new(uri.as_str())
}

pub fn uri(id: &DocumentId) -> Option<lsp::Url> {
    lsp::Url::parse(id.as_str()).ok()
}

pub fn position_from_lsp(document: &Document, position: lsp::Position) -> Position {
    document.line_index.from_utf16(
        &document.text,
        Position::new(position.line, position.character),
    )
}

pub fn position_to_lsp(document: &Document, position: Position) -> lsp::Position {
    let utf16 = document.line_index.to_utf16(&document.text, position);
    lsp::Position::new(utf16.line, utf16.column)
}

pub fn range_to_lsp(document: &Document, range: Range) -> lsp::Range {
    lsp::Range::new(
        position_to_lsp(document, range.start),
        position_to_lsp(document, range.end),
    )
}

/// `None` when the target document is gone or its id is not a URI.
pub fn location(workspace: &Workspace, location: &Location) -> Option<lsp::Location> {
    let document = workspace.document(&location.document)?;
    Some(lsp::Location::new(
        uri(&location.document)?,
        range_to_lsp(document, location.range),
    ))
}

pub fn hover(document: &Document, info: HoverInfo) -> lsp::Hover {
    lsp::Hover {
        contents: lsp::HoverContents::Markup(lsp::MarkupContent {
            kind: lsp::MarkupKind::Markdown,
            value: info.contents,
        }),
        range: Some(range_to_lsp(document, info.range)),
    }
}

pub fn completion_item(entry: CompletionEntry) -> lsp::CompletionItem {
    lsp::CompletionItem {
        label: entry.label,
        kind: Some(completion_kind(entry.kind)),
        detail: Some(entry.detail),
        ..Default::default()
    }
}

pub fn completion_kind(kind: SymbolKind) -> lsp::CompletionItemKind {
    use lsp::CompletionItemKind as K;
    match kind {
        SymbolKind::Module => K::MODULE,
        SymbolKind::Variable | SymbolKind::Parameter => K::VARIABLE,
        SymbolKind::Constant => K::CONSTANT,
        SymbolKind::Property => K::PROPERTY,
        SymbolKind::Function | SymbolKind::Macro => K::FUNCTION,
        SymbolKind::Method => K::METHOD,
        SymbolKind::Struct | SymbolKind::Union | SymbolKind::Bitstruct | SymbolKind::Def => {
            K::STRUCT
        }
        SymbolKind::StructMember => K::FIELD,
        SymbolKind::Enum | SymbolKind::Fault => K::ENUM,
        SymbolKind::Enumerator | SymbolKind::FaultConstant => K::ENUM_MEMBER,
        SymbolKind::Interface => K::INTERFACE,
        SymbolKind::GenericParameter => K::TYPE_PARAMETER,
    }
}

pub fn signature_help(info: SignatureInfo) -> lsp::SignatureHelp {
    let parameters = info
        .parameters
        .into_iter()
        .map(|label| lsp::ParameterInformation {
            label: lsp::ParameterLabel::Simple(label),
            documentation: None,
        })
        .collect();
    lsp::SignatureHelp {
        signatures: vec![lsp::SignatureInformation {
            label: info.label,
            documentation: None,
            parameters: Some(parameters),
            active_parameter: info.active_parameter,
        }],
        active_signature: Some(0),
        active_parameter: info.active_parameter,
    }
}
