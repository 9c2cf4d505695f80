//! Lookup requests and their construction from a cursor position.

use std::ops::Range as ByteRange;

use c3_ir::{DocumentId, ModulePath, Position, Range};

use crate::Document;

/// How far into function scopes a lookup may descend.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ScopeMode {
    /// Every function scope is searched.
    #[default]
    AnyPosition,
    /// Only scopes containing the cursor, in the cursor's document.
    InScope,
    /// Module-level declarations only.
    InModuleRoot,
}

/// One `name` of an `a.b.c` chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
    pub text: String,
    pub range: Range,
}

/// A symbol lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub symbol: String,
    /// Where the name appears; its start is the cursor for scope checks.
    pub symbol_range: Range,
    /// Document to search first. `None` searches every document.
    pub doc_id: Option<DocumentId>,
    pub module_path: ModulePath,
    /// `module_path` came from an explicit `foo::` qualifier.
    pub module_specified: bool,
    /// Receivers in front of the symbol, outermost first.
    pub access_path: Vec<AccessToken>,
    pub scope_mode: ScopeMode,
    /// Keep looking in other documents of the same module, then imports.
    pub continue_on_modules: bool,
    pub excluded_docs: Vec<DocumentId>,
    /// Only type declarations match.
    pub types_only: bool,
}

impl SearchParams {
    pub fn builder(symbol: &str) -> SearchParamsBuilder {
        SearchParamsBuilder {
            params: SearchParams {
                symbol: symbol.to_owned(),
                symbol_range: Range::default(),
                doc_id: None,
                module_path: ModulePath::default(),
                module_specified: false,
                access_path: Vec::new(),
                scope_mode: ScopeMode::AnyPosition,
                continue_on_modules: true,
                excluded_docs: Vec::new(),
                types_only: false,
            },
        }
    }

    /// The lookup for the identifier under `position`, or `None` when the
    /// cursor is not on an identifier.
    pub fn from_position(document: &Document, position: Position) -> Option<SearchParams> {
        let text = document.text.as_str();
        let offset = document.line_index.offset(position)?;
        let word = word_at(text, offset)?;
        let builder = SearchParams::builder(&text[word.clone()])
            .at(byte_range(document, word.clone()))
            .in_document(document.id.clone());

        if let Some(qualifier) = module_qualifier(text, word.start) {
            return Some(
                builder
                    .qualified_by(qualifier)
                    .scope_mode(ScopeMode::InModuleRoot)
                    .build(),
            );
        }

        let (module, scope_mode) = context(document, position);
        Some(
            builder
                .in_module(module)
                .scope_mode(scope_mode)
                .access_path(access_tokens(document, word.start))
                .build(),
        )
    }

    #[inline]
    pub fn cursor(&self) -> Position {
        self.symbol_range.start
    }

    pub fn is_excluded(&self, document: &DocumentId) -> bool {
        self.excluded_docs.contains(document)
    }

    /// Same name, other documents of the same module, at module level.
    pub(crate) fn sibling_documents(&self) -> SearchParams {
        let mut next = self.clone();
        if let Some(document) = next.doc_id.take() {
            next.excluded_docs.push(document);
        }
        next.scope_mode = ScopeMode::InModuleRoot;
        next.continue_on_modules = false;
        next
    }

    /// Same name, searched at the root of every document holding `module`.
    pub(crate) fn in_imported(&self, module: &ModulePath) -> SearchParams {
        SearchParams {
            doc_id: None,
            module_path: module.clone(),
            module_specified: false,
            access_path: Vec::new(),
            scope_mode: ScopeMode::InModuleRoot,
            continue_on_modules: false,
            excluded_docs: Vec::new(),
            ..self.clone()
        }
    }

    /// A different name looked up from the same place.
    pub(crate) fn renamed(&self, symbol: &str, range: Range) -> SearchParams {
        SearchParams {
            symbol: symbol.to_owned(),
            symbol_range: range,
            access_path: Vec::new(),
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchParamsBuilder {
    params: SearchParams,
}

impl SearchParamsBuilder {
    #[must_use]
    pub fn at(mut self, range: Range) -> Self {
        self.params.symbol_range = range;
        self
    }

    #[must_use]
    pub fn in_document(mut self, document: DocumentId) -> Self {
        self.params.doc_id = Some(document);
        self
    }

    #[must_use]
    pub fn in_module(mut self, module: ModulePath) -> Self {
        self.params.module_path = module;
        self.params.module_specified = false;
        self
    }

    /// Restrict the lookup to modules named by `qualifier`.
    #[must_use]
    pub fn qualified_by(mut self, qualifier: ModulePath) -> Self {
        self.params.module_path = qualifier;
        self.params.module_specified = true;
        self
    }

    #[must_use]
    pub fn access_path(mut self, tokens: Vec<AccessToken>) -> Self {
        self.params.access_path = tokens;
        self
    }

    #[must_use]
    pub fn scope_mode(mut self, mode: ScopeMode) -> Self {
        self.params.scope_mode = mode;
        self
    }

    #[must_use]
    pub fn continue_on_modules(mut self, value: bool) -> Self {
        self.params.continue_on_modules = value;
        self
    }

    #[must_use]
    pub fn exclude(mut self, document: DocumentId) -> Self {
        self.params.excluded_docs.push(document);
        self
    }

    #[must_use]
    pub fn types_only(mut self) -> Self {
        self.params.types_only = true;
        self
    }

    pub fn build(self) -> SearchParams {
        self.params
    }
}

/// Module section at `position` and whether the cursor sits in a function.
pub(crate) fn context(document: &Document, position: Position) -> (ModulePath, ScopeMode) {
    match document.modules.module_at(position) {
        Some(module) => {
            let in_function = module
                .functions()
                .any(|f| f.base.document_range.contains(position));
            let mode = if in_function {
                ScopeMode::InScope
            } else {
                ScopeMode::InModuleRoot
            };
            (module.path.clone(), mode)
        }
        None => (ModulePath::default(), ScopeMode::InModuleRoot),
    }
}

#[inline]
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[inline]
fn is_sigil(b: u8) -> bool {
    matches!(b, b'@' | b'$' | b'#')
}

pub(crate) fn byte_range(document: &Document, range: ByteRange<usize>) -> Range {
    Range::new(
        document.line_index.position(range.start),
        document.line_index.position(range.end),
    )
}

/// Identifier touching `offset`, with its `@`, `$` or `#` prefix.
pub(crate) fn word_at(text: &str, offset: usize) -> Option<ByteRange<usize>> {
    let bytes = text.as_bytes();
    let mut offset = offset.min(bytes.len());
    if offset < bytes.len() && is_sigil(bytes[offset]) {
        offset += 1;
    }
    let mut start = offset;
    while start > 0 && is_ident_byte(bytes[start - 1]) {
        start -= 1;
    }
    let mut end = offset;
    while end < bytes.len() && is_ident_byte(bytes[end]) {
        end += 1;
    }
    if start == end || bytes[start].is_ascii_digit() {
        return None;
    }
    if start > 0 && is_sigil(bytes[start - 1]) {
        start -= 1;
    }
    Some(start..end)
}

/// Start of the identifier prefix ending at `offset`.
pub(crate) fn prefix_start(text: &str, offset: usize) -> usize {
    let bytes = text.as_bytes();
    let mut start = offset.min(bytes.len());
    while start > 0 && is_ident_byte(bytes[start - 1]) {
        start -= 1;
    }
    if start > 0 && is_sigil(bytes[start - 1]) {
        start -= 1;
    }
    start
}

/// `foo::bar::` directly in front of `start`.
pub(crate) fn module_qualifier(text: &str, start: usize) -> Option<ModulePath> {
    let bytes = text.as_bytes();
    let mut end = start;
    let mut segments = Vec::new();
    while end >= 2 && &bytes[end - 2..end] == b"::" {
        let segment_end = end - 2;
        let mut segment_start = segment_end;
        while segment_start > 0 && is_ident_byte(bytes[segment_start - 1]) {
            segment_start -= 1;
        }
        if segment_start == segment_end {
            break;
        }
        segments.push(&text[segment_start..segment_end]);
        end = segment_start;
    }
    if segments.is_empty() {
        return None;
    }
    segments.reverse();
    Some(ModulePath::from_segments(segments))
}

/// The `a.b().c[i].` receivers in front of `start`, outermost first.
/// Call and index suffixes are skipped. Anything else in the chain (a
/// literal, a parenthesised expression) yields no receivers at all.
pub(crate) fn access_chain(text: &str, start: usize) -> Vec<ByteRange<usize>> {
    let bytes = text.as_bytes();
    let mut chain = Vec::new();
    let mut i = start;
    loop {
        let mut j = skip_space_back(bytes, i);
        if j == 0 || bytes[j - 1] != b'.' || (j >= 2 && bytes[j - 2] == b'.') {
            break;
        }
        j = skip_space_back(bytes, j - 1);
        while j > 0 && matches!(bytes[j - 1], b')' | b']') {
            match matching_open(bytes, j - 1) {
                Some(open) => j = skip_space_back(bytes, open),
                None => return Vec::new(),
            }
        }
        let end = j;
        while j > 0 && is_ident_byte(bytes[j - 1]) {
            j -= 1;
        }
        if j == end || bytes[j].is_ascii_digit() {
            return Vec::new();
        }
        chain.push(j..end);
        i = j;
    }
    chain.reverse();
    chain
}

pub(crate) fn access_tokens(document: &Document, start: usize) -> Vec<AccessToken> {
    access_chain(&document.text, start)
        .into_iter()
        .map(|range| AccessToken {
            text: document.text[range.clone()].to_owned(),
            range: byte_range(document, range),
        })
        .collect()
}

fn skip_space_back(bytes: &[u8], mut i: usize) -> usize {
    while i > 0 && bytes[i - 1].is_ascii_whitespace() {
        i -= 1;
    }
    i
}

/// Index of the opener matching the closer at `close`.
fn matching_open(bytes: &[u8], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = close + 1;
    while i > 0 {
        i -= 1;
        match bytes[i] {
            b')' | b']' => depth += 1,
            b'(' | b'[' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
