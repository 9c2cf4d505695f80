use c3_ir::{DocumentId, Position, Symbol, SymbolKind};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::search_params::{access_tokens, context, module_qualifier, prefix_start};
use crate::{Resolver, SearchParams, Workspace};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionEntry {
    pub label: String,
    pub kind: SymbolKind,
    /// Declaration signature.
    pub detail: String,
}

impl Workspace {
    /// Candidates for the identifier being typed at `position`.
    ///
    /// After `a.b.` these are the members of `a.b`; after `foo::` the
    /// module-level symbols of `foo`; otherwise everything visible, nearest
    /// scope first. Names are deduplicated, keeping the nearest.
    #[tracing::instrument(level = "debug", skip_all, fields(document = %document))]
    pub fn build_completions(&self, document: &DocumentId, position: Position) -> Vec<CompletionEntry> {
        let Some(doc) = self.document(document) else {
            return Vec::new();
        };
        let Some(offset) = doc.line_index.offset(position) else {
            return Vec::new();
        };
        let start = prefix_start(&doc.text, offset);
        let prefix = &doc.text[start..offset];
        let resolver = Resolver::new(self);
        let (module, scope_mode) = context(doc, position);

        let receivers = access_tokens(doc, start);
        let candidates: Vec<Symbol<'_>> = if let Some((head, rest)) = receivers.split_first() {
            let params = SearchParams::builder(&head.text)
                .at(head.range)
                .in_document(document.clone())
                .in_module(module)
                .scope_mode(scope_mode)
                .build();
            resolver
                .resolve(&params)
                .and_then(|receiver| {
                    resolver.walk(receiver, rest.iter().map(|t| t.text.as_str()), &params)
                })
                .map(|receiver| resolver.members(receiver))
                .unwrap_or_default()
        } else if let Some(qualifier) = module_qualifier(&doc.text, start) {
            resolver.qualified_symbols(&qualifier)
        } else {
            let params = SearchParams::builder(prefix)
                .at(c3_ir::Range::point(position))
                .in_document(document.clone())
                .in_module(module)
                .scope_mode(scope_mode)
                .build();
            resolver.visible_symbols(&params)
        };

        let mut seen = FxHashSet::default();
        let entries: Vec<_> = candidates
            .into_iter()
            .filter(|symbol| symbol.name().starts_with(prefix))
            .filter(|symbol| seen.insert(symbol.name()))
            .map(|symbol| CompletionEntry {
                label: symbol.name().to_owned(),
                kind: symbol.kind(),
                detail: symbol.to_string(),
            })
            .collect();
        debug!(prefix, count = entries.len(), "completions");
        entries
    }
}
