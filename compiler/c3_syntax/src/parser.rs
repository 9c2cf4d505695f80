//! Tolerant recursive-descent parser.
//!
//! The parser only understands as much of C3 as the index needs:
//! declarations in full, function bodies down to local declarations and
//! nested blocks. Everything else inside a body is kept as opaque
//! [`NodeKind::Statement`] and [`NodeKind::Expression`] nodes.

mod body;
mod items;
mod types;

use crate::lexer::{ident_class, lex, IdentClass, Token, TokenKind};
use crate::tree::{Marker, TreeBuilder};
use crate::{Field, NodeKind, SyntaxTree};

/// Parse a whole document.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> SyntaxTree {
    let lexed = lex(source);
    if !lexed.errors.is_empty() {
        tracing::debug!(errors = lexed.errors.len(), "skipped unlexable input");
    }
    let mut parser = Parser::new(source, lexed.tokens);
    parser.source_file();
    parser.builder.build(source)
}

/// Parser state.
pub(crate) struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    builder: TreeBuilder,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str, tokens: Vec<Token>) -> Self {
        Parser {
            source,
            tokens,
            pos: 0,
            builder: TreeBuilder::new(source),
        }
    }

    // Cursor

    #[inline]
    fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    #[inline]
    fn kind(&self) -> Option<TokenKind> {
        self.nth_kind(0)
    }

    #[inline]
    fn kind_at(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|t| t.kind)
    }

    #[inline]
    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == Some(kind)
    }

    #[inline]
    fn nth_at(&self, n: usize, kind: TokenKind) -> bool {
        self.nth_kind(n) == Some(kind)
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn text_at(&self, index: usize) -> &'s str {
        self.tokens
            .get(index)
            .and_then(|t| self.source.get(t.start..t.end))
            .unwrap_or_default()
    }

    fn nth_text(&self, n: usize) -> &'s str {
        self.text_at(self.pos + n)
    }

    /// Consume the current token.
    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.start, token.end);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    // Tree building

    fn start(&mut self, kind: NodeKind, field: Option<Field>) -> Marker {
        self.builder.start(kind, field)
    }

    fn finish(&mut self, marker: Marker) {
        self.builder.finish(marker);
    }

    fn finish_as(&mut self, marker: Marker, kind: NodeKind) {
        self.builder.finish_as(marker, kind);
    }

    /// Wrap the current token in a leaf node and consume it.
    fn leaf(&mut self, kind: NodeKind, field: Option<Field>) {
        if let Some(token) = self.tokens.get(self.pos).copied() {
            self.builder.leaf(kind, field, token.start, token.end);
            self.pos += 1;
        }
    }

    /// Consume an identifier-like token as a name, if there is one.
    fn name(&mut self, field: Field) -> bool {
        if self.kind().is_some_and(TokenKind::is_identifier) {
            self.leaf(NodeKind::Ident, Some(field));
            true
        } else {
            false
        }
    }

    // Skipping

    /// Consume a bracketed group starting at the current opener.
    fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        while let Some(kind) = self.kind() {
            match kind {
                TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::GenericOpen => depth += 1,
                TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::GenericClose => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.bump();
            if depth == 0 {
                break;
            }
        }
    }

    /// Consume an opaque expression up to (not including) one of `stops`
    /// at nesting depth zero, or an unmatched closer.
    fn expression(&mut self, field: Option<Field>, stops: &[TokenKind]) {
        if self.kind().map_or(true, |k| stops.contains(&k) || is_closer(k)) {
            return;
        }
        let marker = self.start(NodeKind::Expression, field);
        while let Some(kind) = self.kind() {
            if stops.contains(&kind) || is_closer(kind) {
                break;
            }
            if is_opener(kind) {
                self.skip_balanced();
            } else {
                self.bump();
            }
        }
        self.finish(marker);
    }

    /// Consume tokens up to and including the `)` closing an already
    /// consumed `(`.
    fn skip_to_close_paren(&mut self) {
        while let Some(kind) = self.kind() {
            if kind == TokenKind::RParen {
                self.bump();
                return;
            }
            if is_opener(kind) {
                self.skip_balanced();
            } else {
                self.bump();
            }
        }
    }

    // Lookahead helpers

    /// If a type starts at token `index`, return the index just past it.
    ///
    /// Types are recognised by shape: an optional `path::` prefix, a
    /// built-in name, a `TypeIdent` or a compile-time type, optional
    /// generic arguments, then any `*`, `!`, `?` and `[...]` suffixes.
    fn scan_type(&self, index: usize) -> Option<usize> {
        self.scan_type_as(index, false)
    }

    /// [`Parser::scan_type`], optionally also accepting all-caps names
    /// (`S`, `T`) where the position can only hold a type.
    fn scan_type_as(&self, index: usize, caps: bool) -> Option<usize> {
        let mut i = index;
        let mut qualified = false;
        while self.kind_at(i) == Some(TokenKind::Ident)
            && self.kind_at(i + 1) == Some(TokenKind::ColonColon)
        {
            i += 2;
            qualified = true;
        }
        match self.kind_at(i)? {
            TokenKind::Ident => {
                let text = self.text_at(i);
                let is_type = (caps && ident_class(text) == IdentClass::Const)
                    || c3_ir::is_builtin_type(text)
                    || ident_class(text) == IdentClass::Type
                    || (qualified && ident_class(text) != IdentClass::Value);
                if !is_type {
                    return None;
                }
                i += 1;
            }
            TokenKind::CtIdent => {
                let text = self.text_at(i);
                i += 1;
                if self.kind_at(i) == Some(TokenKind::LParen) {
                    i = self.scan_balanced(i)?;
                } else if ident_class(&text[1..]) != IdentClass::Type {
                    return None;
                }
            }
            _ => return None,
        }
        if self.kind_at(i) == Some(TokenKind::GenericOpen) {
            i = self.scan_balanced(i)?;
        }
        loop {
            match self.kind_at(i) {
                Some(TokenKind::Star | TokenKind::Bang | TokenKind::Question) => i += 1,
                Some(TokenKind::LBracket) => i = self.scan_balanced(i)?,
                _ => return Some(i),
            }
        }
    }

    /// Index just past the group opened at `index`.
    fn scan_balanced(&self, index: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = index;
        loop {
            let kind = self.kind_at(i)?;
            if is_opener(kind) {
                depth += 1;
            } else if is_closer(kind) {
                depth = depth.saturating_sub(1);
            }
            i += 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }

    #[inline]
    fn is_type_start(&self) -> bool {
        self.scan_type(self.pos).is_some()
    }

    /// A type followed by a name: the start of a variable declaration.
    /// Only used where no expression can start, so an all-caps name
    /// followed by another name is a type too.
    fn is_typed_binding(&self) -> bool {
        self.scan_type_as(self.pos, true)
            .is_some_and(|end| self.kind_at(end) == Some(TokenKind::Ident))
    }

    // Entry point

    fn source_file(&mut self) {
        while !self.at_end() {
            let before = self.pos;
            self.item();
            if self.pos == before {
                self.bump();
            }
        }
    }
}

#[inline]
fn is_opener(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace | TokenKind::GenericOpen
    )
}

#[inline]
fn is_closer(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace | TokenKind::GenericClose
    )
}
