//! Top-level declarations.

use super::Parser;
use crate::lexer::TokenKind;
use crate::{Field, NodeKind};

impl Parser<'_> {
    pub(super) fn item(&mut self) {
        let Some(kind) = self.kind() else {
            return;
        };
        match kind {
            TokenKind::Module => self.module_declaration(),
            TokenKind::Import => self.import_declaration(),
            TokenKind::Fn => self.function(),
            TokenKind::Macro => self.macro_declaration(),
            TokenKind::Struct | TokenKind::Union => self.struct_declaration(None, true),
            TokenKind::Bitstruct => self.bitstruct_declaration(None, true),
            TokenKind::Enum => self.enum_declaration(),
            TokenKind::Fault => self.fault_declaration(),
            TokenKind::Interface => self.interface_declaration(),
            TokenKind::Def | TokenKind::Distinct | TokenKind::Typedef => self.define_declaration(),
            TokenKind::Const => self.const_declaration(),
            TokenKind::Extern | TokenKind::Static | TokenKind::Tlocal => {
                let mut n = 0;
                while matches!(
                    self.nth_kind(n),
                    Some(TokenKind::Extern | TokenKind::Static | TokenKind::Tlocal)
                ) {
                    n += 1;
                }
                if self.nth_at(n, TokenKind::Fn) {
                    self.function();
                } else {
                    self.global_declaration();
                }
            }
            TokenKind::Semi => self.bump(),
            _ if self.is_typed_binding() => self.global_declaration(),
            _ => self.recover(),
        }
    }

    /// Swallow a malformed top-level construct into an `Error` node.
    fn recover(&mut self) {
        let marker = self.start(NodeKind::Error, None);
        let mut consumed = false;
        while let Some(kind) = self.kind() {
            if consumed && starts_declaration(kind) {
                break;
            }
            consumed = true;
            match kind {
                TokenKind::Semi => {
                    self.bump();
                    break;
                }
                TokenKind::LBrace => {
                    self.skip_balanced();
                    break;
                }
                _ => self.bump(),
            }
        }
        self.finish(marker);
    }

    /// `module foo::bar (<Type>) @attrs;`
    fn module_declaration(&mut self) {
        let marker = self.start(NodeKind::Module, None);
        self.bump();
        let ok = self.path(Field::Path);
        if self.at(TokenKind::GenericOpen) {
            let generics = self.start(NodeKind::GenericParameters, Some(Field::Generics));
            self.bump();
            while let Some(kind) = self.kind() {
                match kind {
                    TokenKind::GenericClose | TokenKind::Semi => break,
                    TokenKind::Ident | TokenKind::CtIdent => self.leaf(NodeKind::Ident, None),
                    _ => self.bump(),
                }
            }
            self.eat(TokenKind::GenericClose);
            self.finish(generics);
        }
        self.attributes();
        self.eat(TokenKind::Semi);
        self.finish_as(marker, if ok { NodeKind::Module } else { NodeKind::Error });
    }

    /// `import foo, bar::baz @public;`
    fn import_declaration(&mut self) {
        let marker = self.start(NodeKind::Import, None);
        self.bump();
        let mut ok = self.path(Field::Path);
        while self.eat(TokenKind::Comma) {
            ok &= self.path(Field::Path);
        }
        self.attributes();
        self.eat(TokenKind::Semi);
        self.finish_as(marker, if ok { NodeKind::Import } else { NodeKind::Error });
    }

    /// `int a = 1, b;` at module level, with optional storage modifiers.
    fn global_declaration(&mut self) {
        let marker = self.start(NodeKind::GlobalDeclaration, None);
        while matches!(
            self.kind(),
            Some(TokenKind::Extern | TokenKind::Static | TokenKind::Tlocal)
        ) {
            self.leaf(NodeKind::Keyword, Some(Field::Modifier));
        }
        if !self.is_typed_binding() {
            self.finish_as(marker, NodeKind::Error);
            self.recover();
            return;
        }
        self.type_node(Some(Field::Type));
        self.declarators();
        self.attributes();
        self.eat(TokenKind::Semi);
        self.finish(marker);
    }

    /// `const [Type] NAME = value;`
    fn const_declaration(&mut self) {
        let marker = self.start(NodeKind::ConstDeclaration, None);
        self.bump();
        if self.is_typed_binding() {
            self.type_node(Some(Field::Type));
        }
        let ok = self.name(Field::Name);
        self.attributes();
        if self.eat(TokenKind::Eq) {
            self.expression(Some(Field::Value), &[TokenKind::Semi]);
        }
        self.eat(TokenKind::Semi);
        self.finish_as(marker, if ok { NodeKind::ConstDeclaration } else { NodeKind::Error });
    }

    /// `fn Ret [Owner.]name(params) @attrs { body }` or a `;`-terminated
    /// declaration.
    pub(super) fn function(&mut self) {
        let marker = self.start(NodeKind::FuncDefinition, None);
        while matches!(
            self.kind(),
            Some(TokenKind::Extern | TokenKind::Static | TokenKind::Tlocal)
        ) {
            self.leaf(NodeKind::Keyword, Some(Field::Modifier));
        }
        self.bump();
        if !self.is_type_start() {
            self.finish_as(marker, NodeKind::Error);
            self.recover();
            return;
        }
        self.type_node(Some(Field::ReturnType));
        self.receiver();
        let named = self.name(Field::Name);
        if !named || !self.at(TokenKind::LParen) {
            self.finish_as(marker, NodeKind::Error);
            self.recover();
            return;
        }
        self.parameters(NodeKind::Parameters, Field::Parameters);
        self.attributes();
        let kind = self.function_tail();
        self.finish_as(marker, kind);
    }

    /// `macro [Ret] [Owner.]@name(params) @attrs { body }`
    fn macro_declaration(&mut self) {
        let marker = self.start(NodeKind::MacroDeclaration, None);
        self.bump();
        let bare_name = self.at(TokenKind::AtIdent)
            || (self.at(TokenKind::Ident)
                && (self.nth_at(1, TokenKind::LParen) || self.nth_at(1, TokenKind::Dot)));
        if !bare_name && self.is_type_start() {
            self.type_node(Some(Field::ReturnType));
        }
        self.receiver();
        let named = self.name(Field::Name);
        if !named || !self.at(TokenKind::LParen) {
            self.finish_as(marker, NodeKind::Error);
            self.recover();
            return;
        }
        self.parameters(NodeKind::Parameters, Field::Parameters);
        self.attributes();
        self.function_tail();
        self.finish(marker);
    }

    /// `Owner.` in front of a method name.
    fn receiver(&mut self) {
        if self.at(TokenKind::Ident)
            && self.nth_at(1, TokenKind::Dot)
            && self.nth_kind(2).is_some_and(TokenKind::is_identifier)
        {
            self.leaf(NodeKind::Ident, Some(Field::Owner));
            self.bump();
        }
    }

    /// Body, `=> expr;` short form, or `;`. Returns the node kind the
    /// function ends up as.
    fn function_tail(&mut self) -> NodeKind {
        if self.at(TokenKind::LBrace) {
            self.block(Some(Field::Body));
            NodeKind::FuncDefinition
        } else if self.at(TokenKind::Operator) && self.nth_text(0) == "=>" {
            self.bump();
            self.expression(Some(Field::Body), &[TokenKind::Semi]);
            self.eat(TokenKind::Semi);
            NodeKind::FuncDefinition
        } else {
            self.eat(TokenKind::Semi);
            NodeKind::FuncDeclaration
        }
    }

    /// `struct`/`union`, at top level or nested inside another body.
    pub(super) fn struct_declaration(&mut self, field: Option<Field>, top_level: bool) {
        let marker = self.start(NodeKind::StructDeclaration, field);
        self.leaf(NodeKind::Keyword, Some(Field::Keyword));
        let named = self.name(Field::Name);
        if self.at(TokenKind::LParen) {
            self.interface_list();
        }
        self.attributes();
        if self.at(TokenKind::LBrace) {
            self.struct_body();
        } else {
            self.eat(TokenKind::Semi);
        }
        let kind = if top_level && !named {
            NodeKind::Error
        } else {
            NodeKind::StructDeclaration
        };
        self.finish_as(marker, kind);
    }

    /// `bitstruct Name : Backing { Type field : 0..3; }`
    pub(super) fn bitstruct_declaration(&mut self, field: Option<Field>, top_level: bool) {
        let marker = self.start(NodeKind::BitstructDeclaration, field);
        self.leaf(NodeKind::Keyword, Some(Field::Keyword));
        let named = self.name(Field::Name);
        if self.at(TokenKind::LParen) {
            self.interface_list();
        }
        if self.eat(TokenKind::Colon) && self.is_type_start() {
            self.type_node(Some(Field::BackingType));
        }
        self.attributes();
        if self.at(TokenKind::LBrace) {
            self.struct_body();
        } else {
            self.eat(TokenKind::Semi);
        }
        let kind = if top_level && !named {
            NodeKind::Error
        } else {
            NodeKind::BitstructDeclaration
        };
        self.finish_as(marker, kind);
    }

    fn struct_body(&mut self) {
        crate::ensure_sufficient_stack(|| {
            let body = self.start(NodeKind::StructBody, Some(Field::Body));
            self.bump();
            while let Some(kind) = self.kind() {
                if kind == TokenKind::RBrace {
                    break;
                }
                let before = self.pos;
                match kind {
                    TokenKind::Struct | TokenKind::Union => self.struct_declaration(None, false),
                    TokenKind::Bitstruct => self.bitstruct_declaration(None, false),
                    TokenKind::Semi => self.bump(),
                    TokenKind::Inline => self.struct_member(),
                    _ if self.is_type_start() || self.is_typed_binding() => self.struct_member(),
                    _ => self.skip_member(),
                }
                if self.pos == before {
                    self.bump();
                }
            }
            self.eat(TokenKind::RBrace);
            self.finish(body);
        });
    }

    /// `[inline] Type a, b [: lo..hi] @attrs;`
    fn struct_member(&mut self) {
        let marker = self.start(NodeKind::StructMember, None);
        let typed = if self.at(TokenKind::Inline) {
            self.leaf(NodeKind::Keyword, Some(Field::Modifier));
            self.scan_type_as(self.pos, true).is_some()
        } else {
            self.is_type_start() || self.is_typed_binding()
        };
        if !typed {
            self.finish_as(marker, NodeKind::Error);
            self.skip_member();
            return;
        }
        self.type_node(Some(Field::Type));
        while self.name(Field::Name) {
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if self.eat(TokenKind::Colon) {
            let range = self.start(NodeKind::BitRange, Some(Field::BitRange));
            if self.at(TokenKind::Number) {
                self.leaf(NodeKind::Number, None);
            }
            if self.eat(TokenKind::DotDot) && self.at(TokenKind::Number) {
                self.leaf(NodeKind::Number, None);
            }
            self.finish(range);
        }
        self.attributes();
        self.expression(None, &[TokenKind::Semi]);
        self.eat(TokenKind::Semi);
        self.finish(marker);
    }

    /// Skip an unrecognised member up to its `;` or the closing `}`.
    fn skip_member(&mut self) {
        let marker = self.start(NodeKind::Error, None);
        while let Some(kind) = self.kind() {
            match kind {
                TokenKind::RBrace => break,
                TokenKind::Semi => {
                    self.bump();
                    break;
                }
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => {
                    self.skip_balanced();
                }
                _ => self.bump(),
            }
        }
        self.finish(marker);
    }

    /// `(Iface, other::Iface)` after a type name.
    fn interface_list(&mut self) {
        let list = self.start(NodeKind::InterfaceList, Some(Field::Interfaces));
        self.bump();
        while let Some(kind) = self.kind() {
            match kind {
                TokenKind::RParen => break,
                _ if self.is_type_start() => self.type_node(None),
                _ => self.bump(),
            }
        }
        self.eat(TokenKind::RParen);
        self.finish(list);
    }

    /// `enum Name [(Ifaces)] [: Backing [(Type prop, ...)]] @attrs { A, B = 1 }`
    fn enum_declaration(&mut self) {
        let marker = self.start(NodeKind::EnumDeclaration, None);
        self.bump();
        let named = self.name(Field::Name);
        if self.at(TokenKind::LParen) {
            self.interface_list();
        }
        if self.eat(TokenKind::Colon) {
            if self.is_type_start() {
                self.type_node(Some(Field::BackingType));
            }
            if self.at(TokenKind::LParen) {
                self.parameters(NodeKind::EnumParameters, Field::Properties);
            }
        }
        self.attributes();
        if self.at(TokenKind::LBrace) {
            self.enum_body(NodeKind::Enumerator);
        }
        self.finish_as(marker, if named { NodeKind::EnumDeclaration } else { NodeKind::Error });
    }

    /// `fault Name { A, B }`
    fn fault_declaration(&mut self) {
        let marker = self.start(NodeKind::FaultDeclaration, None);
        self.bump();
        let named = self.name(Field::Name);
        if self.eat(TokenKind::Colon) && self.is_type_start() {
            self.type_node(Some(Field::BackingType));
        }
        self.attributes();
        if self.at(TokenKind::LBrace) {
            self.enum_body(NodeKind::FaultConstant);
        }
        self.finish_as(marker, if named { NodeKind::FaultDeclaration } else { NodeKind::Error });
    }

    fn enum_body(&mut self, member: NodeKind) {
        let body = self.start(NodeKind::EnumBody, Some(Field::Body));
        self.bump();
        while let Some(kind) = self.kind() {
            match kind {
                TokenKind::RBrace => break,
                TokenKind::Ident => {
                    let marker = self.start(member, None);
                    self.leaf(NodeKind::Ident, Some(Field::Name));
                    self.attributes();
                    if self.eat(TokenKind::Eq) {
                        self.expression(Some(Field::Value), &[TokenKind::Comma]);
                    } else if self.at(TokenKind::LParen) || self.at(TokenKind::LBrace) {
                        let value = self.start(NodeKind::Expression, Some(Field::Value));
                        self.skip_balanced();
                        self.finish(value);
                    }
                    self.finish(marker);
                }
                _ if kind == TokenKind::LParen || kind == TokenKind::LBrace => self.skip_balanced(),
                _ => self.bump(),
            }
        }
        self.eat(TokenKind::RBrace);
        self.finish(body);
    }

    /// `interface Name [: Parent] { fn ...; }`
    fn interface_declaration(&mut self) {
        let marker = self.start(NodeKind::InterfaceDeclaration, None);
        self.bump();
        let named = self.name(Field::Name);
        if self.eat(TokenKind::Colon) {
            while !self.at_end() && !self.at(TokenKind::LBrace) && !self.at(TokenKind::Semi) {
                self.bump();
            }
        }
        self.attributes();
        if self.at(TokenKind::LBrace) {
            let body = self.start(NodeKind::InterfaceBody, Some(Field::Body));
            self.bump();
            while let Some(kind) = self.kind() {
                let before = self.pos;
                match kind {
                    TokenKind::RBrace => break,
                    TokenKind::Fn => self.function(),
                    _ => self.skip_member(),
                }
                if self.pos == before {
                    self.bump();
                }
            }
            self.eat(TokenKind::RBrace);
            self.finish(body);
        }
        self.finish_as(
            marker,
            if named { NodeKind::InterfaceDeclaration } else { NodeKind::Error },
        );
    }

    /// `def Name = Type;`, `def name = expr;`, `distinct Name = Type;`
    fn define_declaration(&mut self) {
        let marker = self.start(NodeKind::DefineDeclaration, None);
        self.leaf(NodeKind::Keyword, Some(Field::Keyword));
        let named = self.name(Field::Name);
        self.attributes();
        if self.eat(TokenKind::Eq) {
            let is_type = self.scan_type(self.pos).is_some_and(|end| {
                matches!(
                    self.kind_at(end),
                    None | Some(TokenKind::Semi | TokenKind::AtIdent)
                )
            });
            if is_type {
                self.type_node(Some(Field::Type));
            } else {
                self.expression(Some(Field::Value), &[TokenKind::Semi]);
            }
        }
        self.attributes();
        self.eat(TokenKind::Semi);
        self.finish_as(marker, if named { NodeKind::DefineDeclaration } else { NodeKind::Error });
    }
}

fn starts_declaration(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Module
            | TokenKind::Import
            | TokenKind::Fn
            | TokenKind::Macro
            | TokenKind::Struct
            | TokenKind::Union
            | TokenKind::Bitstruct
            | TokenKind::Enum
            | TokenKind::Fault
            | TokenKind::Interface
            | TokenKind::Def
            | TokenKind::Distinct
            | TokenKind::Typedef
            | TokenKind::Const
    )
}
