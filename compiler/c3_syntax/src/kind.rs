//! Node kinds and field names of the syntax tree.

/// Syntactic category of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SourceFile,
    Module,
    GenericParameters,
    Import,
    /// `foo::bar` in module, import and qualified type positions.
    Path,
    GlobalDeclaration,
    ConstDeclaration,
    FuncDefinition,
    FuncDeclaration,
    MacroDeclaration,
    Parameters,
    Parameter,
    EnumDeclaration,
    EnumParameters,
    /// Member list of enums and faults.
    EnumBody,
    Enumerator,
    FaultDeclaration,
    FaultConstant,
    /// `struct` and `union`, distinguished by the `keyword` field.
    StructDeclaration,
    BitstructDeclaration,
    StructBody,
    StructMember,
    BitRange,
    InterfaceDeclaration,
    InterfaceBody,
    InterfaceList,
    DefineDeclaration,
    Type,
    GenericArguments,
    PointerSuffix,
    OptionalSuffix,
    ArraySuffix,
    Ident,
    Number,
    Keyword,
    Attribute,
    Block,
    LocalDeclaration,
    Declarator,
    Statement,
    Expression,
    Error,
}

/// Role of a child inside its parent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Body,
    Type,
    ReturnType,
    /// Receiver type of a method.
    Owner,
    Parameters,
    Path,
    Keyword,
    Generics,
    Interfaces,
    BackingType,
    BitRange,
    Properties,
    Value,
    /// `inline` on a struct member, `&` on `&self`.
    Modifier,
}
