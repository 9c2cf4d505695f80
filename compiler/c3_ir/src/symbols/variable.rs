use std::fmt;

use super::SymbolBase;
use crate::TypeInfo;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Global,
    Local,
    Parameter,
    Constant,
    /// Associated value of an enum (`enum State : int (String desc)`).
    Property,
}

/// Globals, locals, parameters, constants and enum properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub base: SymbolBase,
    pub kind: VariableKind,
    /// `None` for inferred declarations (`var x = ...`, `const A = 1`).
    pub ty: Option<TypeInfo>,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.ty) {
            (VariableKind::Constant, Some(ty)) => write!(f, "const {ty} {}", self.base.name),
            (VariableKind::Constant, None) => write!(f, "const {}", self.base.name),
            (_, Some(ty)) => write!(f, "{ty} {}", self.base.name),
            (_, None) => write!(f, "var {}", self.base.name),
        }
    }
}
