//! The symbol tree.
//!
//! Declarations are owned by their [`Module`]; the resolver and the editor
//! features work on [`Symbol`], a borrowed view that closes over every
//! declaration category. Dispatch is always an exhaustive `match`.

mod def;
mod enums;
mod function;
mod interface;
mod module;
mod structs;
mod variable;

use std::fmt;

pub use def::{Def, GenericParameter};
pub use enums::{Enum, Enumerator, Fault, FaultConstant};
pub use function::{Function, FunctionKind};
pub use interface::Interface;
pub use module::{Declaration, Module};
pub use structs::{Struct, StructKind, StructMember};
pub use variable::{Variable, VariableKind};

use crate::{DocumentId, ModulePath, Range, TypeInfo};

/// Data shared by every declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolBase {
    pub name: String,
    /// Module the declaration belongs to.
    pub module: ModulePath,
    pub document: DocumentId,
    /// Span of the name token.
    pub identifier_range: Range,
    /// Span of the whole declaration.
    pub document_range: Range,
}

impl SymbolBase {
    pub fn new(
        name: &str,
        module: ModulePath,
        document: DocumentId,
        identifier_range: Range,
        document_range: Range,
    ) -> Self {
        SymbolBase {
            name: name.to_owned(),
            module,
            document,
            identifier_range,
            document_range,
        }
    }
}

/// Declaration category, as reported to the editor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Module,
    Variable,
    Constant,
    Parameter,
    Property,
    Function,
    Method,
    Macro,
    Struct,
    Union,
    Bitstruct,
    StructMember,
    Enum,
    Enumerator,
    Fault,
    FaultConstant,
    Interface,
    Def,
    GenericParameter,
}

/// A borrowed reference to any node of the symbol tree.
#[derive(Copy, Clone, Debug)]
pub enum Symbol<'a> {
    Module(&'a Module),
    Variable(&'a Variable),
    Function(&'a Function),
    Struct(&'a Struct),
    StructMember(&'a StructMember),
    Enum(&'a Enum),
    Enumerator(&'a Enumerator),
    Fault(&'a Fault),
    FaultConstant(&'a FaultConstant),
    Interface(&'a Interface),
    Def(&'a Def),
    GenericParameter(&'a GenericParameter),
}

impl<'a> Symbol<'a> {
    pub fn base(self) -> &'a SymbolBase {
        match self {
            Symbol::Module(s) => &s.base,
            Symbol::Variable(s) => &s.base,
            Symbol::Function(s) => &s.base,
            Symbol::Struct(s) => &s.base,
            Symbol::StructMember(s) => &s.base,
            Symbol::Enum(s) => &s.base,
            Symbol::Enumerator(s) => &s.base,
            Symbol::Fault(s) => &s.base,
            Symbol::FaultConstant(s) => &s.base,
            Symbol::Interface(s) => &s.base,
            Symbol::Def(s) => &s.base,
            Symbol::GenericParameter(s) => &s.base,
        }
    }

    #[inline]
    pub fn name(self) -> &'a str {
        &self.base().name
    }

    #[inline]
    pub fn identifier_range(self) -> Range {
        self.base().identifier_range
    }

    #[inline]
    pub fn document_range(self) -> Range {
        self.base().document_range
    }

    #[inline]
    pub fn document(self) -> &'a DocumentId {
        &self.base().document
    }

    #[inline]
    pub fn module(self) -> &'a ModulePath {
        &self.base().module
    }

    pub fn kind(self) -> SymbolKind {
        match self {
            Symbol::Module(_) => SymbolKind::Module,
            Symbol::Variable(v) => match v.kind {
                VariableKind::Global | VariableKind::Local => SymbolKind::Variable,
                VariableKind::Constant => SymbolKind::Constant,
                VariableKind::Parameter => SymbolKind::Parameter,
                VariableKind::Property => SymbolKind::Property,
            },
            Symbol::Function(f) => match f.kind {
                FunctionKind::Function => SymbolKind::Function,
                FunctionKind::Method => SymbolKind::Method,
                FunctionKind::Macro => SymbolKind::Macro,
            },
            Symbol::Struct(s) => match s.kind {
                StructKind::Normal => SymbolKind::Struct,
                StructKind::Union => SymbolKind::Union,
                StructKind::Bitstruct => SymbolKind::Bitstruct,
            },
            Symbol::StructMember(_) => SymbolKind::StructMember,
            Symbol::Enum(_) => SymbolKind::Enum,
            Symbol::Enumerator(_) => SymbolKind::Enumerator,
            Symbol::Fault(_) => SymbolKind::Fault,
            Symbol::FaultConstant(_) => SymbolKind::FaultConstant,
            Symbol::Interface(_) => SymbolKind::Interface,
            Symbol::Def(_) => SymbolKind::Def,
            Symbol::GenericParameter(_) => SymbolKind::GenericParameter,
        }
    }

    /// True if a lookup of `identifier` should stop at this symbol.
    ///
    /// Methods are bound to their type's namespace and only match their
    /// full name (`Type.method`).
    pub fn matches(self, identifier: &str) -> bool {
        match self {
            Symbol::Function(f) => match &f.type_identifier {
                Some(owner) => identifier
                    .strip_prefix(owner.as_str())
                    .and_then(|rest| rest.strip_prefix('.'))
                    .is_some_and(|name| name == f.base.name),
                None => f.base.name == identifier,
            },
            _ => self.name() == identifier,
        }
    }

    /// Children that open their own lookup scope (function bodies).
    pub fn nested_scopes(self) -> Vec<Symbol<'a>> {
        match self {
            Symbol::Module(m) => m.functions().map(Symbol::Function).collect(),
            _ => Vec::new(),
        }
    }

    /// Children that are plain members of this symbol's scope.
    pub fn children_without_scopes(self) -> Vec<Symbol<'a>> {
        match self {
            Symbol::Module(m) => m
                .generic_parameters
                .iter()
                .map(Symbol::GenericParameter)
                .chain(m.declarations.iter().filter_map(|d| match d {
                    Declaration::Function(_) => None,
                    other => Some(other.as_symbol()),
                }))
                .collect(),
            Symbol::Function(f) => f
                .parameters
                .iter()
                .chain(&f.locals)
                .map(Symbol::Variable)
                .collect(),
            Symbol::Struct(s) => s.members().map(Symbol::StructMember).collect(),
            Symbol::StructMember(m) => m.sub_members.iter().map(Symbol::StructMember).collect(),
            Symbol::Enum(e) => e.enumerators.iter().map(Symbol::Enumerator).collect(),
            Symbol::Fault(f) => f.constants.iter().map(Symbol::FaultConstant).collect(),
            Symbol::Interface(i) => i.methods.iter().map(Symbol::Function).collect(),
            Symbol::Variable(_)
            | Symbol::Enumerator(_)
            | Symbol::FaultConstant(_)
            | Symbol::Def(_)
            | Symbol::GenericParameter(_) => Vec::new(),
        }
    }

    /// Declared type of a value-like symbol; for functions, the return type.
    pub fn type_info(self) -> Option<&'a TypeInfo> {
        match self {
            Symbol::Variable(v) => v.ty.as_ref(),
            Symbol::StructMember(m) => Some(&m.ty),
            Symbol::Function(f) => f.return_type.as_ref(),
            _ => None,
        }
    }

    /// True for declarations that introduce a type name.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Symbol::Struct(_)
                | Symbol::Enum(_)
                | Symbol::Fault(_)
                | Symbol::Interface(_)
                | Symbol::Def(_)
                | Symbol::GenericParameter(_)
        )
    }
}

impl PartialEq for Symbol<'_> {
    /// Identity comparison: two views are equal when they point at the
    /// same node.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.base(), other.base())
    }
}

impl Eq for Symbol<'_> {}

/// Renders the declaration signature shown on hover.
impl fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Symbol::Module(m) => write!(f, "module {}", m.path),
            Symbol::Variable(v) => write!(f, "{v}"),
            Symbol::Function(func) => write!(f, "{func}"),
            Symbol::Struct(s) => write!(f, "{s}"),
            Symbol::StructMember(m) => write!(f, "{m}"),
            Symbol::Enum(e) => {
                write!(f, "enum {}", e.base.name)?;
                if let Some(backing) = &e.backing_type {
                    write!(f, " : {backing}")?;
                }
                Ok(())
            }
            Symbol::Enumerator(e) => write!(f, "{}.{}", e.owner, e.base.name),
            Symbol::Fault(fault) => write!(f, "fault {}", fault.base.name),
            Symbol::FaultConstant(c) => write!(f, "{}.{}", c.owner, c.base.name),
            Symbol::Interface(i) => write!(f, "interface {}", i.base.name),
            Symbol::Def(d) => write!(
                f,
                "{} {} = {}",
                if d.distinct { "distinct" } else { "def" },
                d.base.name,
                d.target
            ),
            Symbol::GenericParameter(g) => write!(f, "<{}>", g.base.name),
        }
    }
}
