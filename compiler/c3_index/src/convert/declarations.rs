//! Everything but struct-like declarations.

use c3_ir::{
    Declaration, Def, Enum, Enumerator, Fault, FaultConstant, Function, FunctionKind, Interface,
    Range, TypeInfo, Variable, VariableKind,
};
use c3_syntax::{Field, NodeKind, SyntaxNode};

use super::types::type_info;
use super::{range, required, structs, Origin};
use crate::ConvertError;

pub(super) fn declaration<'t, N: SyntaxNode<'t>>(
    origin: &Origin,
    node: N,
) -> Result<Declaration, ConvertError> {
    Ok(match node.kind() {
        NodeKind::ConstDeclaration => Declaration::Variable(constant(origin, node)?),
        NodeKind::StructDeclaration | NodeKind::BitstructDeclaration => {
            Declaration::Struct(structs::structure(origin, node)?)
        }
        NodeKind::EnumDeclaration => Declaration::Enum(enumeration(origin, node)?),
        NodeKind::FaultDeclaration => Declaration::Fault(fault(origin, node)?),
        NodeKind::InterfaceDeclaration => Declaration::Interface(interface(origin, node)?),
        NodeKind::DefineDeclaration => Declaration::Def(define(origin, node)?),
        _ => Declaration::Function(function(origin, node)?),
    })
}

/// `int a = 1, b;` yields one global per declarator, all spanning the
/// whole statement.
pub(super) fn globals<'t, N: SyntaxNode<'t>>(
    origin: &Origin,
    node: N,
) -> Result<Vec<Declaration>, ConvertError> {
    let ty = type_info(required(node, Field::Type)?);
    Ok(bindings(origin, node, Some(ty), VariableKind::Global)
        .into_iter()
        .map(Declaration::Variable)
        .collect())
}

fn constant<'t, N: SyntaxNode<'t>>(origin: &Origin, node: N) -> Result<Variable, ConvertError> {
    let name = required(node, Field::Name)?;
    Ok(Variable {
        base: origin.base(name, node),
        kind: VariableKind::Constant,
        ty: node.child_by_field(Field::Type).map(type_info),
    })
}

fn bindings<'t, N: SyntaxNode<'t>>(
    origin: &Origin,
    node: N,
    ty: Option<TypeInfo>,
    kind: VariableKind,
) -> Vec<Variable> {
    node.children_of_kind(NodeKind::Declarator)
        .into_iter()
        .filter_map(|declarator| declarator.child_by_field(Field::Name))
        .map(|name| Variable {
            base: origin.base(name, node),
            kind,
            ty: ty.clone(),
        })
        .collect()
}

pub(super) fn function<'t, N: SyntaxNode<'t>>(
    origin: &Origin,
    node: N,
) -> Result<Function, ConvertError> {
    let name = required(node, Field::Name)?;
    let owner = node.child_by_field(Field::Owner).map(|o| o.text().to_owned());
    let kind = if node.kind() == NodeKind::MacroDeclaration {
        FunctionKind::Macro
    } else if owner.is_some() {
        FunctionKind::Method
    } else {
        FunctionKind::Function
    };
    let parameters = node
        .child_by_field(Field::Parameters)
        .map(|list| {
            list.children_of_kind(NodeKind::Parameter)
                .into_iter()
                .filter_map(|p| parameter(origin, p, owner.as_deref()))
                .collect()
        })
        .unwrap_or_default();

    let body = node.child_by_field(Field::Body);
    let mut locals = Vec::new();
    if let Some(body) = body {
        collect_locals(origin, body, &mut locals);
    }

    Ok(Function {
        base: origin.base(name, node),
        kind,
        type_identifier: owner,
        return_type: node.child_by_field(Field::ReturnType).map(type_info),
        parameters,
        locals,
        has_body: body.is_some(),
    })
}

/// Unnamed parameters (`int...`, bare `...`) are dropped. An untyped
/// `self` takes the method's owner type; `&self` is a pointer to it and
/// its range starts at the `&`.
fn parameter<'t, N: SyntaxNode<'t>>(origin: &Origin, node: N, owner: Option<&str>) -> Option<Variable> {
    let name = node.child_by_field(Field::Name)?;
    let by_reference = node.child_by_field(Field::Modifier).is_some();
    let ty = match node.child_by_field(Field::Type) {
        Some(ty) => Some(type_info(ty)),
        None if name.text() == "self" => owner.map(|owner| {
            let ty = TypeInfo::named(owner, range(node));
            if by_reference {
                ty.pointer_to()
            } else {
                ty
            }
        }),
        None => None,
    };
    let identifier_range = if by_reference {
        Range::new(node.start_position(), name.end_position())
    } else {
        range(name)
    };
    Some(Variable {
        base: origin.base_named(name.text(), identifier_range, range(node)),
        kind: VariableKind::Parameter,
        ty,
    })
}

/// Every local declaration anywhere in a body, in source order.
fn collect_locals<'t, N: SyntaxNode<'t>>(origin: &Origin, node: N, out: &mut Vec<Variable>) {
    c3_syntax::ensure_sufficient_stack(|| {
        for child in node.children() {
            if child.kind() == NodeKind::LocalDeclaration {
                let kind = match child.child_by_field(Field::Keyword) {
                    Some(keyword) if keyword.text() == "const" => VariableKind::Constant,
                    _ => VariableKind::Local,
                };
                let ty = child.child_by_field(Field::Type).map(type_info);
                out.extend(bindings(origin, child, ty, kind));
            } else {
                collect_locals(origin, child, out);
            }
        }
    });
}

fn enumeration<'t, N: SyntaxNode<'t>>(origin: &Origin, node: N) -> Result<Enum, ConvertError> {
    let name = required(node, Field::Name)?;
    let properties = node
        .child_by_field(Field::Properties)
        .map(|list| {
            list.children_of_kind(NodeKind::Parameter)
                .into_iter()
                .filter_map(|p| {
                    let property = p.child_by_field(Field::Name)?;
                    Some(Variable {
                        base: origin.base(property, p),
                        kind: VariableKind::Property,
                        ty: p.child_by_field(Field::Type).map(type_info),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let mut enumerators = Vec::new();
    for member in body_members(node, NodeKind::Enumerator) {
        let member_name = required(member, Field::Name)?;
        enumerators.push(Enumerator {
            base: origin.base(member_name, member),
            owner: name.text().to_owned(),
            value: member
                .child_by_field(Field::Value)
                .map(|v| v.text().trim().to_owned()),
        });
    }

    Ok(Enum {
        base: origin.base(name, node),
        backing_type: node.child_by_field(Field::BackingType).map(type_info),
        enumerators,
        properties,
    })
}

fn fault<'t, N: SyntaxNode<'t>>(origin: &Origin, node: N) -> Result<Fault, ConvertError> {
    let name = required(node, Field::Name)?;
    let mut constants = Vec::new();
    for member in body_members(node, NodeKind::FaultConstant) {
        let member_name = required(member, Field::Name)?;
        constants.push(FaultConstant {
            base: origin.base(member_name, member),
            owner: name.text().to_owned(),
        });
    }
    Ok(Fault {
        base: origin.base(name, node),
        backing_type: node.child_by_field(Field::BackingType).map(type_info),
        constants,
    })
}

fn interface<'t, N: SyntaxNode<'t>>(origin: &Origin, node: N) -> Result<Interface, ConvertError> {
    let name = required(node, Field::Name)?;
    let methods = body_members(node, NodeKind::FuncDeclaration)
        .into_iter()
        .map(|method| function(origin, method))
        .collect::<Result<_, _>>()?;
    Ok(Interface {
        base: origin.base(name, node),
        methods,
    })
}

fn define<'t, N: SyntaxNode<'t>>(origin: &Origin, node: N) -> Result<Def, ConvertError> {
    let name = required(node, Field::Name)?;
    let keyword = required(node, Field::Keyword)?;
    let (target, resolved_type) = match node.child_by_field(Field::Type) {
        Some(ty) => (ty.text().to_owned(), Some(type_info(ty))),
        None => (
            node.child_by_field(Field::Value)
                .map(|v| v.text().trim().to_owned())
                .unwrap_or_default(),
            None,
        ),
    };
    Ok(Def {
        base: origin.base(name, node),
        target,
        resolved_type,
        distinct: keyword.text() != "def",
    })
}

fn body_members<'t, N: SyntaxNode<'t>>(node: N, kind: NodeKind) -> Vec<N> {
    node.child_by_field(Field::Body)
        .map(|body| body.children_of_kind(kind))
        .unwrap_or_default()
}
