use super::{Def, Enum, Fault, Function, GenericParameter, Interface, Struct, Symbol, SymbolBase, Variable};
use crate::ModulePath;

/// A module-level declaration, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    Variable(Variable),
    Function(Function),
    Struct(Struct),
    Enum(Enum),
    Fault(Fault),
    Interface(Interface),
    Def(Def),
}

impl Declaration {
    pub fn as_symbol(&self) -> Symbol<'_> {
        match self {
            Declaration::Variable(v) => Symbol::Variable(v),
            Declaration::Function(f) => Symbol::Function(f),
            Declaration::Struct(s) => Symbol::Struct(s),
            Declaration::Enum(e) => Symbol::Enum(e),
            Declaration::Fault(f) => Symbol::Fault(f),
            Declaration::Interface(i) => Symbol::Interface(i),
            Declaration::Def(d) => Symbol::Def(d),
        }
    }
}

/// One `module` section of one document.
///
/// A logical module may be declared by several documents; each
/// contributes its own `Module` value and lookups aggregate them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    pub base: SymbolBase,
    pub path: ModulePath,
    pub imports: Vec<ModulePath>,
    pub generic_parameters: Vec<GenericParameter>,
    pub declarations: Vec<Declaration>,
}

impl Module {
    pub fn new(base: SymbolBase, path: ModulePath) -> Self {
        Module {
            base,
            path,
            imports: Vec::new(),
            generic_parameters: Vec::new(),
            declarations: Vec::new(),
        }
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Function(f) => Some(f),
            _ => None,
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Variable(v) => Some(v),
            _ => None,
        })
    }

    pub fn structs(&self) -> impl Iterator<Item = &Struct> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Struct(s) => Some(s),
            _ => None,
        })
    }

    pub fn generic_parameter(&self, name: &str) -> Option<&GenericParameter> {
        self.generic_parameters.iter().find(|g| g.base.name == name)
    }

    /// Record an import once.
    pub fn add_import(&mut self, path: ModulePath) {
        if !self.imports.contains(&path) {
            self.imports.push(path);
        }
    }
}
