use super::{SymbolBase, Variable};
use crate::TypeInfo;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enum {
    pub base: SymbolBase,
    pub backing_type: Option<TypeInfo>,
    pub enumerators: Vec<Enumerator>,
    /// Associated values declared after the backing type, in order.
    pub properties: Vec<Variable>,
}

impl Enum {
    pub fn enumerator(&self, name: &str) -> Option<&Enumerator> {
        self.enumerators.iter().find(|e| e.base.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&Variable> {
        self.properties.iter().find(|p| p.base.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enumerator {
    pub base: SymbolBase,
    /// Name of the enum declaring this value.
    pub owner: String,
    /// Source text of the explicit value, if any.
    pub value: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fault {
    pub base: SymbolBase,
    pub backing_type: Option<TypeInfo>,
    pub constants: Vec<FaultConstant>,
}

impl Fault {
    pub fn constant(&self, name: &str) -> Option<&FaultConstant> {
        self.constants.iter().find(|c| c.base.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultConstant {
    pub base: SymbolBase,
    pub owner: String,
}
