//! Structs, unions and bitstructs.

use c3_ir::{Struct, StructKind, StructMember, TypeInfo};
use c3_syntax::{Field, NodeKind, SyntaxNode};

use super::types::{parse_number, type_info};
use super::{range, required, Origin};
use crate::ConvertError;

pub(super) fn structure<'t, N: SyntaxNode<'t>>(
    origin: &Origin,
    node: N,
) -> Result<Struct, ConvertError> {
    let name = required(node, Field::Name)?;
    let kind = if node.kind() == NodeKind::BitstructDeclaration {
        StructKind::Bitstruct
    } else if node
        .child_by_field(Field::Keyword)
        .is_some_and(|k| k.text() == "union")
    {
        StructKind::Union
    } else {
        StructKind::Normal
    };
    let implements = node
        .child_by_field(Field::Interfaces)
        .map(|list| {
            list.children_of_kind(NodeKind::Type)
                .into_iter()
                .map(|ty| ty.text().to_owned())
                .collect()
        })
        .unwrap_or_default();
    let members = match node.child_by_field(Field::Body) {
        Some(body) => members(origin, body)?,
        None => Vec::new(),
    };

    Ok(Struct {
        base: origin.base(name, node),
        kind,
        implements,
        backing_type: node.child_by_field(Field::BackingType).map(type_info),
        members,
        inherited: Vec::new(),
    })
}

fn members<'t, N: SyntaxNode<'t>>(origin: &Origin, body: N) -> Result<Vec<StructMember>, ConvertError> {
    c3_syntax::ensure_sufficient_stack(|| {
        let mut out = Vec::new();
        for child in body.children() {
            match child.kind() {
                NodeKind::StructMember => out.extend(member(origin, child)?),
                NodeKind::StructDeclaration | NodeKind::BitstructDeclaration => {
                    nested(origin, child, &mut out)?;
                }
                _ => {}
            }
        }
        Ok(out)
    })
}

/// `Type a, b : 0..3;` yields one member per name, sharing the type.
/// `inline Type;` is named after its type.
fn member<'t, N: SyntaxNode<'t>>(origin: &Origin, node: N) -> Result<Vec<StructMember>, ConvertError> {
    let ty = type_info(required(node, Field::Type)?);
    let is_inlined = node.child_by_field(Field::Modifier).is_some();
    let bit_range = node.child_by_field(Field::BitRange).and_then(bit_range);

    let names = node.children_by_field(Field::Name);
    if names.is_empty() {
        return Ok(vec![StructMember {
            base: origin.base_named(&ty.name, ty.range, range(node)),
            ty,
            bit_range,
            is_inlined,
            sub_members: Vec::new(),
        }]);
    }
    Ok(names
        .into_iter()
        .map(|name| StructMember {
            base: origin.base(name, node),
            ty: ty.clone(),
            bit_range,
            is_inlined,
            sub_members: Vec::new(),
        })
        .collect())
}

/// A nested `struct`/`union`/`bitstruct` block. Anonymous blocks flatten
/// into the enclosing member list; named ones become a single member
/// holding the nested fields.
fn nested<'t, N: SyntaxNode<'t>>(
    origin: &Origin,
    node: N,
    out: &mut Vec<StructMember>,
) -> Result<(), ConvertError> {
    let sub_members = match node.child_by_field(Field::Body) {
        Some(body) => members(origin, body)?,
        None => Vec::new(),
    };
    match node.child_by_field(Field::Name) {
        Some(name) => {
            let keyword = required(node, Field::Keyword)?;
            let ty = TypeInfo {
                name: keyword.text().to_owned(),
                built_in: true,
                range: range(keyword),
                ..TypeInfo::default()
            };
            out.push(StructMember {
                base: origin.base(name, node),
                ty,
                bit_range: None,
                is_inlined: false,
                sub_members,
            });
        }
        None => out.extend(sub_members),
    }
    Ok(())
}

/// `lo..hi` or a single bit `n`.
fn bit_range<'t, N: SyntaxNode<'t>>(node: N) -> Option<[u32; 2]> {
    let numbers = node.children_of_kind(NodeKind::Number);
    let low = parse_number(numbers.first()?.text())?;
    let high = match numbers.get(1) {
        Some(n) => parse_number(n.text())?,
        None => low,
    };
    Some([low, high])
}
