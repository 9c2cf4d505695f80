use std::fmt;

use super::SymbolBase;
use crate::TypeInfo;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StructKind {
    Normal,
    Union,
    Bitstruct,
}

/// `struct`, `union` and `bitstruct` declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Struct {
    pub base: SymbolBase,
    pub kind: StructKind,
    /// Interfaces listed after the name: `struct Foo (Printable)`.
    pub implements: Vec<String>,
    /// Underlying integer type of a bitstruct.
    pub backing_type: Option<TypeInfo>,
    /// Members in declaration order.
    pub members: Vec<StructMember>,
    /// Members adopted from `inline` members. Rebuilt by every subtyping pass.
    pub inherited: Vec<StructMember>,
}

impl Struct {
    /// Declared members followed by inherited ones.
    pub fn members(&self) -> impl Iterator<Item = &StructMember> {
        self.members.iter().chain(&self.inherited)
    }

    pub fn member(&self, name: &str) -> Option<&StructMember> {
        self.members().find(|m| m.base.name == name)
    }

    /// Members marked `inline` that still need their type's members adopted.
    pub fn inline_members(&self) -> impl Iterator<Item = &StructMember> {
        self.members.iter().filter(|m| m.is_inlined)
    }
}

impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.kind {
            StructKind::Normal => "struct",
            StructKind::Union => "union",
            StructKind::Bitstruct => "bitstruct",
        };
        write!(f, "{keyword} {}", self.base.name)?;
        if let Some(backing) = &self.backing_type {
            write!(f, " : {backing}")?;
        }
        if !self.implements.is_empty() {
            write!(f, " ({})", self.implements.join(", "))?;
        }
        Ok(())
    }
}

/// A single field. Comma-declared fields produce one member per name,
/// all sharing the same type range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructMember {
    pub base: SymbolBase,
    pub ty: TypeInfo,
    /// Inclusive `[low, high]` bit range of a bitstruct field.
    pub bit_range: Option<[u32; 2]>,
    /// `inline Other name;` embeds `Other`'s members into the parent.
    pub is_inlined: bool,
    /// Fields of a named anonymous block (`struct inner { ... }`).
    pub sub_members: Vec<StructMember>,
}

impl fmt::Display for StructMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inlined {
            f.write_str("inline ")?;
        }
        write!(f, "{} {}", self.ty, self.base.name)?;
        if let Some([low, high]) = self.bit_range {
            if low == high {
                write!(f, " : {low}")?;
            } else {
                write!(f, " : {low}..{high}")?;
            }
        }
        Ok(())
    }
}
