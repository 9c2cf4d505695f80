//! Types, paths, parameters, attributes and declarators.

use super::Parser;
use crate::lexer::TokenKind;
use crate::{Field, NodeKind};

impl Parser<'_> {
    /// `foo::bar::baz` as a `Path` node of `Ident` leaves.
    pub(super) fn path(&mut self, field: Field) -> bool {
        if !self.at(TokenKind::Ident) {
            return false;
        }
        let marker = self.start(NodeKind::Path, Some(field));
        self.leaf(NodeKind::Ident, None);
        while self.at(TokenKind::ColonColon) && self.nth_at(1, TokenKind::Ident) {
            self.bump();
            self.leaf(NodeKind::Ident, None);
        }
        self.finish(marker);
        true
    }

    /// A type reference. Callers check [`Parser::is_type_start`] first.
    pub(super) fn type_node(&mut self, field: Option<Field>) {
        let marker = self.start(NodeKind::Type, field);
        if self.at(TokenKind::Ident) && self.nth_at(1, TokenKind::ColonColon) {
            let path = self.start(NodeKind::Path, Some(Field::Path));
            self.leaf(NodeKind::Ident, None);
            while self.at(TokenKind::ColonColon)
                && self.nth_at(1, TokenKind::Ident)
                && self.nth_at(2, TokenKind::ColonColon)
            {
                self.bump();
                self.leaf(NodeKind::Ident, None);
            }
            self.finish(path);
            self.bump();
        }
        match self.kind() {
            Some(TokenKind::Ident) => self.leaf(NodeKind::Ident, Some(Field::Name)),
            Some(TokenKind::CtIdent) => {
                self.leaf(NodeKind::Ident, Some(Field::Name));
                if self.at(TokenKind::LParen) {
                    self.skip_balanced();
                }
            }
            _ => {}
        }
        if self.at(TokenKind::GenericOpen) {
            let generics = self.start(NodeKind::GenericArguments, Some(Field::Generics));
            self.bump();
            while let Some(kind) = self.kind() {
                if kind == TokenKind::GenericClose {
                    break;
                }
                let before = self.pos;
                if self.is_type_start() {
                    self.type_node(None);
                } else if kind == TokenKind::LParen || kind == TokenKind::LBracket {
                    self.skip_balanced();
                } else {
                    self.bump();
                }
                if self.pos == before {
                    self.bump();
                }
            }
            self.eat(TokenKind::GenericClose);
            self.finish(generics);
        }
        loop {
            match self.kind() {
                Some(TokenKind::Star) => self.leaf(NodeKind::PointerSuffix, None),
                Some(TokenKind::Bang | TokenKind::Question) => {
                    self.leaf(NodeKind::OptionalSuffix, None);
                }
                Some(TokenKind::LBracket) => {
                    let array = self.start(NodeKind::ArraySuffix, None);
                    self.skip_balanced();
                    self.finish(array);
                }
                _ => break,
            }
        }
        self.finish(marker);
    }

    /// `(a, b)` parameter list. Macro trailing-body parameters after `;`
    /// are kept in the same list.
    pub(super) fn parameters(&mut self, kind: NodeKind, field: Field) {
        let list = self.start(kind, Some(field));
        self.bump();
        while let Some(kind) = self.kind() {
            if kind == TokenKind::RParen {
                break;
            }
            let before = self.pos;
            self.parameter();
            if !self.eat(TokenKind::Comma) && !self.eat(TokenKind::Semi) && self.pos == before {
                self.bump();
            }
        }
        self.eat(TokenKind::RParen);
        self.finish(list);
    }

    fn parameter(&mut self) {
        if matches!(
            self.kind(),
            Some(TokenKind::Comma | TokenKind::Semi | TokenKind::RParen)
        ) {
            return;
        }
        let marker = self.start(NodeKind::Parameter, None);
        if self.at(TokenKind::Amp) && self.nth_text(1) == "self" {
            self.leaf(NodeKind::Keyword, Some(Field::Modifier));
            self.leaf(NodeKind::Ident, Some(Field::Name));
        } else if self.at(TokenKind::Ellipsis) {
            self.bump();
        } else {
            if self.is_type_start() || self.is_typed_binding() {
                self.type_node(Some(Field::Type));
                self.eat(TokenKind::Ellipsis);
            }
            self.name(Field::Name);
            self.eat(TokenKind::Ellipsis);
            self.attributes();
            if self.eat(TokenKind::Eq) {
                self.expression(Some(Field::Value), &[TokenKind::Comma, TokenKind::Semi]);
            }
        }
        self.finish(marker);
    }

    /// Zero or more `@attr` / `@attr(args)`.
    pub(super) fn attributes(&mut self) {
        while self.at(TokenKind::AtIdent) {
            let marker = self.start(NodeKind::Attribute, None);
            self.bump();
            if self.at(TokenKind::LParen) {
                self.skip_balanced();
            }
            self.finish(marker);
        }
    }

    /// `a = 1, b, c = 3` after a declaration's type.
    pub(super) fn declarators(&mut self) {
        while self.at(TokenKind::Ident) {
            let marker = self.start(NodeKind::Declarator, None);
            self.leaf(NodeKind::Ident, Some(Field::Name));
            self.attributes();
            if self.eat(TokenKind::Eq) {
                self.expression(Some(Field::Value), &[TokenKind::Comma, TokenKind::Semi]);
            }
            self.finish(marker);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
    }
}
