use super::{Function, SymbolBase};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interface {
    pub base: SymbolBase,
    /// Method prototypes, without bodies.
    pub methods: Vec<Function>,
}
