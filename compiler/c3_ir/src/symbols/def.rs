use super::SymbolBase;
use crate::TypeInfo;

/// `def Name = ...;` and `distinct Name = ...;`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Def {
    pub base: SymbolBase,
    /// Source text of the right-hand side.
    pub target: String,
    /// Set when the right-hand side is a type.
    pub resolved_type: Option<TypeInfo>,
    pub distinct: bool,
}

/// A generic module parameter: `Type` in `module list(<Type>);`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericParameter {
    pub base: SymbolBase,
}
