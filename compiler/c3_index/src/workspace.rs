//! Registry of open documents.

use c3_ir::DocumentId;
use c3_syntax::LineIndex;
use rustc_hash::FxHashMap;
use tracing::{debug, error};

use crate::convert::{apply_inherited, compute_inherited, convert_document};
use crate::{ConvertError, UnitModules};

/// One converted document together with the text it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub text: String,
    pub line_index: LineIndex,
    pub modules: UnitModules,
}

impl Document {
    /// Parse and convert `text`. Runs without touching any workspace, so
    /// callers can do the expensive part outside their lock.
    pub fn parse(id: DocumentId, text: String) -> Result<Document, ConvertError> {
        let modules = convert_document(&id, &text)?;
        Ok(Document {
            line_index: LineIndex::new(&text),
            id,
            text,
            modules,
        })
    }
}

/// Every known document, in the order it was first opened.
///
/// Lookups across documents iterate in that order, which makes the
/// resolver deterministic when a name is declared in several files.
#[derive(Debug, Default)]
pub struct Workspace {
    documents: Vec<Document>,
    index: FxHashMap<DocumentId, usize>,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    /// Re-parse a document and swap it in. On failure the previous
    /// version stays registered and `false` is returned.
    pub fn refresh_document(&mut self, id: DocumentId, text: String) -> bool {
        match Document::parse(id.clone(), text) {
            Ok(document) => {
                self.replace(document);
                true
            }
            Err(err) => {
                error!(document = %id, %err, "conversion failed, keeping previous version");
                false
            }
        }
    }

    /// Register `document`, replacing any previous version in place, then
    /// refresh inline members across the whole workspace.
    #[tracing::instrument(level = "debug", skip_all, fields(document = %document.id))]
    pub fn replace(&mut self, document: Document) {
        self.insert(document);
        self.resolve_inline_members();
        debug!(documents = self.documents.len(), "document registered");
    }

    /// Register a batch of documents with a single inline member pass.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn replace_all(&mut self, documents: impl IntoIterator<Item = Document>) -> usize {
        let mut count = 0;
        for document in documents {
            self.insert(document);
            count += 1;
        }
        self.resolve_inline_members();
        debug!(count, documents = self.documents.len(), "documents registered");
        count
    }

    pub fn remove_document(&mut self, id: &DocumentId) -> bool {
        let Some(slot) = self.index.remove(id) else {
            return false;
        };
        self.documents.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        self.resolve_inline_members();
        true
    }

    pub fn document(&self, id: &DocumentId) -> Option<&Document> {
        self.index.get(id).map(|&slot| &self.documents[slot])
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn insert(&mut self, document: Document) {
        match self.index.get(&document.id) {
            Some(&slot) => self.documents[slot] = document,
            None => {
                self.index.insert(document.id.clone(), self.documents.len());
                self.documents.push(document);
            }
        }
    }

    /// Inline struct members may embed a struct declared in another
    /// document, so they are recomputed over every module after each
    /// change.
    fn resolve_inline_members(&mut self) {
        let (locations, updates) = {
            let mut locations = Vec::new();
            let mut modules = Vec::new();
            for (doc, document) in self.documents.iter().enumerate() {
                for (index, module) in document.modules.modules().iter().enumerate() {
                    locations.push((doc, index));
                    modules.push(module);
                }
            }
            let updates = compute_inherited(&modules);
            (locations, updates)
        };
        for update in updates {
            let (doc, index) = locations[update.module];
            apply_inherited(&mut self.documents[doc].modules.modules_mut()[index], update);
        }
    }
}
