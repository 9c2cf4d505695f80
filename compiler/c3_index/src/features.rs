//! Editor queries: go to definition, hover, signature help, completion.
//!
//! Every query takes a document and a byte-column position and answers
//! from the current state of the [`Workspace`].

mod completion;
mod signature;

use c3_ir::{DocumentId, Position, Range, Symbol, SymbolKind};

use crate::{Resolver, SearchParams, Workspace};

pub use completion::CompletionEntry;
pub use signature::SignatureInfo;

/// A span in some document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub document: DocumentId,
    pub range: Range,
}

/// Markdown shown on hover, and the span it applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverInfo {
    pub contents: String,
    pub range: Range,
}

impl Workspace {
    /// The declaration the identifier under `position` refers to.
    pub fn resolve_symbol(&self, document: &DocumentId, position: Position) -> Option<Symbol<'_>> {
        self.lookup(document, position).map(|(_, symbol)| symbol)
    }

    pub fn resolve_definition(&self, document: &DocumentId, position: Position) -> Option<Location> {
        let symbol = self.resolve_symbol(document, position)?;
        Some(Location {
            document: symbol.document().clone(),
            range: symbol.identifier_range(),
        })
    }

    pub fn resolve_hover(&self, document: &DocumentId, position: Position) -> Option<HoverInfo> {
        let (params, symbol) = self.lookup(document, position)?;
        let mut contents = format!("```c3\n{symbol}\n```");
        if symbol.kind() != SymbolKind::Module && !symbol.module().is_empty() {
            contents.push_str(&format!("\n\nIn module `{}`", symbol.module()));
        }
        Some(HoverInfo {
            contents,
            range: params.symbol_range,
        })
    }

    fn lookup(&self, document: &DocumentId, position: Position) -> Option<(SearchParams, Symbol<'_>)> {
        let params = SearchParams::from_position(self.document(document)?, position)?;
        let symbol = Resolver::new(self).resolve(&params)?;
        Some((params, symbol))
    }
}
