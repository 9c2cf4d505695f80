//! Core data model for the C3 language server.
//!
//! Everything in here is plain data: source positions, module paths,
//! type references and the symbol tree produced by the converter in
//! `c3_index`. No parsing and no resolution happens in this crate.

mod document;
mod keywords;
mod module_path;
mod position;
pub mod symbols;
mod type_info;

pub use document::DocumentId;
pub use keywords::{is_builtin_type, is_keyword};
pub use module_path::ModulePath;
pub use position::{Position, Range};
pub use symbols::{
    Declaration, Def, Enum, Enumerator, Fault, FaultConstant, Function, FunctionKind,
    GenericParameter, Interface, Module, Struct, StructKind, StructMember, Symbol, SymbolBase,
    SymbolKind, Variable, VariableKind,
};
pub use type_info::TypeInfo;
