//! Member access through `a.b.c` chains.

use c3_ir::{Module, Symbol, TypeInfo};
use tracing::trace;

use super::Resolver;
use crate::{ScopeMode, SearchParams};

impl<'w> Resolver<'w> {
    pub(crate) fn resolve_access_path(&self, params: &SearchParams) -> Option<Symbol<'w>> {
        let (head, rest) = params.access_path.split_first()?;
        let receiver = self.resolve(&params.renamed(&head.text, head.range))?;
        let container = self.walk(receiver, rest.iter().map(|t| t.text.as_str()), params)?;
        self.member(container, &params.symbol, params)
    }

    /// Follow `names` as successive members of `receiver`.
    pub(crate) fn walk<'n>(
        &self,
        receiver: Symbol<'w>,
        names: impl IntoIterator<Item = &'n str>,
        params: &SearchParams,
    ) -> Option<Symbol<'w>> {
        names
            .into_iter()
            .try_fold(receiver, |current, name| self.member(current, name, params))
    }

    /// Member `name` reachable through `receiver`.
    ///
    /// Structs expose their fields then their methods; enums their
    /// enumerators, associated values and methods; faults their constants
    /// and methods. An enumerator value exposes the associated values and
    /// methods of its enum.
    pub(crate) fn member(
        &self,
        receiver: Symbol<'w>,
        name: &str,
        params: &SearchParams,
    ) -> Option<Symbol<'w>> {
        let container = self.container(receiver)?;
        let found = match (receiver, container) {
            (Symbol::Enumerator(_), Symbol::Enum(e)) => e
                .property(name)
                .map(Symbol::Variable)
                .or_else(|| self.method(container, name, params)),
            (Symbol::FaultConstant(_), _) => self.method(container, name, params),
            (_, Symbol::Struct(s)) => s
                .member(name)
                .map(Symbol::StructMember)
                .or_else(|| self.method(container, name, params)),
            (_, Symbol::StructMember(m)) => m
                .sub_members
                .iter()
                .find(|sub| sub.base.name == name)
                .map(Symbol::StructMember),
            (_, Symbol::Enum(e)) => e
                .enumerator(name)
                .map(Symbol::Enumerator)
                .or_else(|| e.property(name).map(Symbol::Variable))
                .or_else(|| self.method(container, name, params)),
            (_, Symbol::Fault(f)) => f
                .constant(name)
                .map(Symbol::FaultConstant)
                .or_else(|| self.method(container, name, params)),
            (_, Symbol::Interface(i)) => i
                .methods
                .iter()
                .find(|m| m.base.name == name)
                .map(Symbol::Function),
            _ => None,
        };
        trace!(
            receiver = receiver.name(),
            member = name,
            found = found.is_some(),
            "member access"
        );
        found
    }

    /// Everything `receiver.` may be followed by.
    pub(crate) fn members(&self, receiver: Symbol<'w>) -> Vec<Symbol<'w>> {
        let Some(container) = self.container(receiver) else {
            return Vec::new();
        };
        let mut out: Vec<_> = match (receiver, container) {
            (Symbol::Enumerator(_), Symbol::Enum(e)) => {
                e.properties.iter().map(Symbol::Variable).collect()
            }
            (Symbol::FaultConstant(_), _) => Vec::new(),
            (_, Symbol::Enum(e)) => e
                .enumerators
                .iter()
                .map(Symbol::Enumerator)
                .chain(e.properties.iter().map(Symbol::Variable))
                .collect(),
            (_, other) => other.children_without_scopes(),
        };
        if !matches!(container, Symbol::StructMember(_)) {
            out.extend(self.methods_of(container));
        }
        out
    }

    /// The declaration whose members `symbol` exposes. Values map to their
    /// declared type with pointers looked through, functions to their
    /// return type, and aliases to their target.
    pub(crate) fn container(&self, symbol: Symbol<'w>) -> Option<Symbol<'w>> {
        let mut visited = Vec::new();
        self.container_of(symbol, &mut visited)
    }

    fn container_of(&self, symbol: Symbol<'w>, visited: &mut Vec<Symbol<'w>>) -> Option<Symbol<'w>> {
        if visited.contains(&symbol) {
            return None;
        }
        visited.push(symbol);
        let target = match symbol {
            Symbol::Struct(_) | Symbol::Enum(_) | Symbol::Fault(_) | Symbol::Interface(_) => {
                return Some(symbol);
            }
            Symbol::StructMember(m) if !m.sub_members.is_empty() => return Some(symbol),
            Symbol::Module(_) | Symbol::GenericParameter(_) => return None,
            Symbol::Enumerator(e) => self.resolve_type_name(&e.owner, symbol)?,
            Symbol::FaultConstant(c) => self.resolve_type_name(&c.owner, symbol)?,
            Symbol::Def(d) => self.resolve_type(d.resolved_type.as_ref()?, symbol)?,
            Symbol::Variable(_) | Symbol::StructMember(_) | Symbol::Function(_) => {
                let ty = symbol.type_info()?;
                if !ty.is_user_type() {
                    return None;
                }
                self.resolve_type(ty, symbol)?
            }
        };
        self.container_of(target, visited)
    }

    /// Type declaration named by `ty`, as seen from where `from` is declared.
    fn resolve_type(&self, ty: &TypeInfo, from: Symbol<'w>) -> Option<Symbol<'w>> {
        let builder = SearchParams::builder(&ty.name).at(ty.range).types_only();
        let params = if ty.module.is_empty() {
            builder
                .in_document(from.document().clone())
                .in_module(from.module().clone())
                .scope_mode(ScopeMode::InModuleRoot)
        } else {
            builder.qualified_by(ty.module.clone())
        };
        self.resolve(&params.build())
    }

    fn resolve_type_name(&self, name: &str, from: Symbol<'w>) -> Option<Symbol<'w>> {
        self.resolve_type(&TypeInfo::named(name, from.identifier_range()), from)
    }

    /// `Owner.name`, looked up from the cursor first and then from the
    /// owner's own module.
    fn method(&self, owner: Symbol<'w>, name: &str, params: &SearchParams) -> Option<Symbol<'w>> {
        let full_name = format!("{}.{name}", owner.name());
        let mut from_cursor = params.renamed(&full_name, params.symbol_range);
        from_cursor.scope_mode = ScopeMode::InModuleRoot;
        from_cursor.continue_on_modules = true;
        from_cursor.types_only = false;
        self.resolve(&from_cursor).or_else(|| {
            let from_owner = SearchParams::builder(&full_name)
                .in_document(owner.document().clone())
                .in_module(owner.module().clone())
                .scope_mode(ScopeMode::InModuleRoot)
                .build();
            self.resolve(&from_owner)
        })
    }

    /// Methods declared on `owner` anywhere in the workspace.
    fn methods_of(&self, owner: Symbol<'w>) -> Vec<Symbol<'w>> {
        self.workspace
            .documents()
            .flat_map(|d| d.modules.modules())
            .flat_map(Module::functions)
            .filter(|f| f.type_identifier.as_deref() == Some(owner.name()))
            .map(Symbol::Function)
            .collect()
    }
}
