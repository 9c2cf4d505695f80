use c3_ir::{is_builtin_type, ModulePath, TypeInfo};
use c3_syntax::{Field, NodeKind, SyntaxNode};

use super::range;

/// `Path` node of `Ident` leaves.
pub(crate) fn module_path<'t, N: SyntaxNode<'t>>(node: N) -> ModulePath {
    ModulePath::from_segments(
        node.children_of_kind(NodeKind::Ident)
            .into_iter()
            .map(SyntaxNode::text),
    )
}

pub(crate) fn type_info<'t, N: SyntaxNode<'t>>(node: N) -> TypeInfo {
    let name = node
        .child_by_field(Field::Name)
        .map(SyntaxNode::text)
        .unwrap_or_default();
    let module = node
        .child_by_field(Field::Path)
        .map(module_path)
        .unwrap_or_default();
    let generic_arguments = node
        .child_by_field(Field::Generics)
        .map(|args| {
            args.children_of_kind(NodeKind::Type)
                .into_iter()
                .map(type_info)
                .collect()
        })
        .unwrap_or_default();

    let mut ty = TypeInfo {
        name: name.to_owned(),
        built_in: module.is_empty() && is_builtin_type(name),
        module,
        generic_arguments,
        range: range(node),
        ..TypeInfo::default()
    };
    for suffix in node.children() {
        match suffix.kind() {
            NodeKind::PointerSuffix => ty.pointer += 1,
            NodeKind::OptionalSuffix => ty.optional = true,
            NodeKind::ArraySuffix => ty.collection = true,
            _ => {}
        }
    }
    ty
}

/// Integer literal as written in a bit range: decimal, `0x`, `0o` or `0b`.
pub(crate) fn parse_number(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(|&c| c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(octal) = lower.strip_prefix("0o") {
        u32::from_str_radix(octal, 8).ok()
    } else if let Some(binary) = lower.strip_prefix("0b") {
        u32::from_str_radix(binary, 2).ok()
    } else {
        lower.parse().ok()
    }
}
