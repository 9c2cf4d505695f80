use std::fmt;

use super::{SymbolBase, Variable};
use crate::TypeInfo;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Function,
    Method,
    Macro,
}

/// Functions, methods, macros and interface method prototypes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub base: SymbolBase,
    pub kind: FunctionKind,
    /// Receiver type of a method (`Emu` in `fn void Emu.init(&self)`).
    pub type_identifier: Option<String>,
    /// `None` for macros declared without a return type.
    pub return_type: Option<TypeInfo>,
    pub parameters: Vec<Variable>,
    pub locals: Vec<Variable>,
    /// False for forward and extern declarations.
    pub has_body: bool,
}

impl Function {
    /// `Type.name` for methods, the plain name otherwise.
    pub fn full_name(&self) -> String {
        match &self.type_identifier {
            Some(owner) => format!("{owner}.{}", self.base.name),
            None => self.base.name.clone(),
        }
    }

    /// Parameters rendered as `type name`, used by hover and signature help.
    pub fn parameter_labels(&self) -> Vec<String> {
        self.parameters
            .iter()
            .map(|p| match (&p.ty, p.base.name.as_str()) {
                (Some(ty), "self") if ty.pointer > 0 => "&self".to_owned(),
                (Some(_), "self") => "self".to_owned(),
                (Some(ty), name) => format!("{ty} {name}"),
                (None, name) => name.to_owned(),
            })
            .collect()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.kind == FunctionKind::Macro { "macro" } else { "fn" })?;
        if let Some(ret) = &self.return_type {
            write!(f, " {ret}")?;
        }
        write!(f, " {}({})", self.full_name(), self.parameter_labels().join(", "))
    }
}
