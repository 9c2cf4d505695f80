//! Inline struct embedding.
//!
//! A struct member marked `inline` exposes the members of the struct it
//! names as if they were declared on the embedding struct. The adopted
//! members live in [`Struct::inherited`], which is rebuilt from scratch on
//! every pass so edits to the embedded struct are picked up.

use c3_ir::{Declaration, Module, ModulePath, Struct, StructMember, TypeInfo};
use tracing::trace;

pub(crate) struct InheritedMembers {
    /// Index into the module slice passed to [`compute_inherited`].
    pub module: usize,
    pub declaration: usize,
    pub members: Vec<StructMember>,
}

/// Inherited member lists for every struct in `modules` whose list is
/// about to change. One level of embedding is flattened; an inline
/// member whose struct cannot be found contributes nothing.
pub(crate) fn compute_inherited(modules: &[&Module]) -> Vec<InheritedMembers> {
    let mut updates = Vec::new();
    for (module_index, module) in modules.iter().enumerate() {
        for (declaration, decl) in module.declarations.iter().enumerate() {
            let Declaration::Struct(embedding) = decl else {
                continue;
            };
            let mut members = Vec::new();
            for inline in embedding.inline_members() {
                match find_struct(modules, &inline.ty, &module.path) {
                    Some(target) if !std::ptr::eq(target, embedding) => {
                        members.extend(target.members.iter().cloned());
                    }
                    _ => trace!(
                        owner = %embedding.base.name,
                        member = %inline.base.name,
                        "inline member type not resolved"
                    ),
                }
            }
            if members != embedding.inherited {
                updates.push(InheritedMembers {
                    module: module_index,
                    declaration,
                    members,
                });
            }
        }
    }
    updates
}

pub(crate) fn apply_inherited(module: &mut Module, update: InheritedMembers) {
    if let Some(Declaration::Struct(s)) = module.declarations.get_mut(update.declaration) {
        s.inherited = update.members;
    }
}

/// Struct named by `ty`, seen from module `from`: the same module first,
/// then any module matching the type's qualifier.
fn find_struct<'m>(modules: &[&'m Module], ty: &TypeInfo, from: &ModulePath) -> Option<&'m Struct> {
    if !ty.is_user_type() {
        return None;
    }
    let named = |module: &'m Module| module.structs().find(|s| s.base.name == ty.name);
    let local = if ty.module.is_empty() {
        modules
            .iter()
            .copied()
            .filter(|m| &m.path == from)
            .find_map(named)
    } else {
        None
    };
    local.or_else(|| {
        modules
            .iter()
            .copied()
            .filter(|m| ty.module.is_empty() || m.path.ends_with(&ty.module))
            .find_map(named)
    })
}
