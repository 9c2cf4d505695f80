//! Function bodies: blocks, local declarations and opaque statements.

use super::{is_opener, Parser};
use crate::lexer::{ident_class, IdentClass, TokenKind};
use crate::{Field, NodeKind};

impl Parser<'_> {
    /// `{ statements }`
    pub(super) fn block(&mut self, field: Option<Field>) {
        crate::ensure_sufficient_stack(|| {
            let marker = self.start(NodeKind::Block, field);
            self.bump();
            while let Some(kind) = self.kind() {
                if kind == TokenKind::RBrace {
                    break;
                }
                let before = self.pos;
                self.statement();
                if self.pos == before {
                    self.bump();
                }
            }
            self.eat(TokenKind::RBrace);
            self.finish(marker);
        });
    }

    fn statement(&mut self) {
        let Some(kind) = self.kind() else {
            return;
        };
        match kind {
            TokenKind::LBrace => self.block(None),
            TokenKind::Semi => self.bump(),
            TokenKind::For => self.for_statement(),
            TokenKind::Foreach | TokenKind::ForeachR => self.foreach_statement(),
            TokenKind::Case | TokenKind::Default => self.case_label(),
            TokenKind::Var | TokenKind::Static | TokenKind::Tlocal | TokenKind::Const => {
                self.local_declaration();
            }
            _ if self.is_local_declaration() => self.local_declaration(),
            _ => self.opaque_statement(),
        }
    }

    /// A typed name followed by `=`, `;`, `,` or an attribute. `S s` is
    /// a declaration too: no expression has two identifiers in a row.
    fn is_local_declaration(&self) -> bool {
        let binds_at = |end: usize| {
            self.kind_at(end) == Some(TokenKind::Ident)
                && matches!(
                    self.kind_at(end + 1),
                    Some(TokenKind::Eq | TokenKind::Semi | TokenKind::Comma | TokenKind::AtIdent)
                )
        };
        self.scan_type(self.pos).is_some_and(binds_at)
            || (self.at(TokenKind::Ident)
                && ident_class(self.nth_text(0)) == IdentClass::Const
                && binds_at(self.pos + 1))
    }

    /// `Type a = 1, b;`, `var a = ...;`, `const [Type] A = ...;`
    fn local_declaration(&mut self) {
        let marker = self.start(NodeKind::LocalDeclaration, None);
        while matches!(self.kind(), Some(TokenKind::Static | TokenKind::Tlocal)) {
            self.leaf(NodeKind::Keyword, Some(Field::Modifier));
        }
        if self.at(TokenKind::Var) || self.at(TokenKind::Const) {
            self.leaf(NodeKind::Keyword, Some(Field::Keyword));
            if self.is_typed_binding() {
                self.type_node(Some(Field::Type));
            }
        } else if self.is_type_start() || self.is_typed_binding() {
            self.type_node(Some(Field::Type));
        }
        self.declarators();
        self.attributes();
        self.expression(None, &[TokenKind::Semi]);
        self.eat(TokenKind::Semi);
        self.finish(marker);
    }

    /// `for (init; cond; step) body`; a declaration in `init` is kept.
    fn for_statement(&mut self) {
        let marker = self.start(NodeKind::Statement, None);
        self.bump();
        if self.eat(TokenKind::LParen) {
            if self.is_local_declaration() || self.at(TokenKind::Var) {
                self.local_declaration();
            }
            self.skip_to_close_paren();
        }
        self.statement();
        self.finish(marker);
    }

    /// `foreach (&Type x, y : list) body`; every binding becomes a
    /// local declaration.
    fn foreach_statement(&mut self) {
        let marker = self.start(NodeKind::Statement, None);
        self.bump();
        if self.eat(TokenKind::LParen) {
            while let Some(kind) = self.kind() {
                if matches!(kind, TokenKind::Colon | TokenKind::RParen) {
                    break;
                }
                let before = self.pos;
                let binding = self.start(NodeKind::LocalDeclaration, None);
                if self.at(TokenKind::Amp) {
                    self.leaf(NodeKind::Keyword, Some(Field::Modifier));
                }
                if self.is_typed_binding() {
                    self.type_node(Some(Field::Type));
                }
                if self.at(TokenKind::Ident) {
                    let declarator = self.start(NodeKind::Declarator, None);
                    self.leaf(NodeKind::Ident, Some(Field::Name));
                    self.finish(declarator);
                }
                self.finish(binding);
                if !self.eat(TokenKind::Comma) && self.pos == before {
                    self.bump();
                }
            }
            self.skip_to_close_paren();
        }
        self.statement();
        self.finish(marker);
    }

    /// `case X:` / `default:`
    fn case_label(&mut self) {
        let marker = self.start(NodeKind::Statement, None);
        while let Some(kind) = self.kind() {
            if kind == TokenKind::RBrace {
                break;
            }
            self.bump();
            if kind == TokenKind::Colon {
                break;
            }
        }
        self.finish(marker);
    }

    /// Any other statement, kept opaque. A `{` at the top level of the
    /// statement opens a nested block, so locals of `if`/`while`/`switch`
    /// bodies are still seen; `{` after `=`, `,` or `(` is an initializer.
    fn opaque_statement(&mut self) {
        let marker = self.start(NodeKind::Statement, None);
        let mut depth = 0usize;
        let mut previous: Option<TokenKind> = None;
        while let Some(kind) = self.kind() {
            match kind {
                TokenKind::LBrace if depth == 0 => {
                    if matches!(
                        previous,
                        Some(TokenKind::Eq | TokenKind::Comma | TokenKind::Operator)
                    ) {
                        self.skip_balanced();
                    } else {
                        self.block(None);
                        if !matches!(self.kind(), Some(TokenKind::Else | TokenKind::While)) {
                            break;
                        }
                    }
                }
                TokenKind::LBrace => self.skip_balanced(),
                TokenKind::RBrace if depth == 0 => break,
                TokenKind::Semi if depth == 0 => {
                    self.bump();
                    break;
                }
                _ if is_opener(kind) => {
                    depth += 1;
                    self.bump();
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::GenericClose => {
                    depth = depth.saturating_sub(1);
                    self.bump();
                }
                _ => self.bump(),
            }
            previous = Some(kind);
        }
        self.finish(marker);
    }
}
