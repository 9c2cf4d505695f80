//! Symbol resolution.
//!
//! A lookup runs these steps in order and stops at the first hit:
//!
//! 1. Keywords and built-in type names never resolve.
//! 2. `a.b.name`: resolve `a`, then walk members. When the walk finds
//!    nothing, the lookup carries on with the steps below.
//! 3. `foo::name`: search only modules named by the qualifier.
//! 4. Search the cursor's document (or every document holding the
//!    module), nearest scope first.
//! 5. Other documents of the same module, at module level.
//! 6. Imports of every module searched so far, transitively. Each module
//!    is visited at most once per lookup, so import cycles terminate.

mod access_path;
mod visible;

use c3_ir::{is_keyword, Module, ModulePath, Symbol};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::{ScopeMode, SearchParams, Workspace};

/// Modules already followed during one lookup.
#[derive(Clone, Debug, Default)]
pub struct TrackedModules {
    visited: FxHashSet<ModulePath>,
}

impl TrackedModules {
    pub fn new() -> Self {
        TrackedModules::default()
    }

    /// Record a visit. Returns `false` if `module` was already visited.
    pub fn track(&mut self, module: &ModulePath) -> bool {
        self.visited.insert(module.clone())
    }

    pub fn contains(&self, module: &ModulePath) -> bool {
        self.visited.contains(module)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

/// Read-only queries over a [`Workspace`].
#[derive(Copy, Clone)]
pub struct Resolver<'w> {
    workspace: &'w Workspace,
}

impl<'w> Resolver<'w> {
    pub fn new(workspace: &'w Workspace) -> Self {
        Resolver { workspace }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(symbol = %params.symbol))]
    pub fn resolve(&self, params: &SearchParams) -> Option<Symbol<'w>> {
        let mut tracked = TrackedModules::new();
        let found = self.resolve_tracked(params, &mut tracked);
        debug!(
            found = found.is_some(),
            visited_modules = tracked.len(),
            "lookup finished"
        );
        found
    }

    /// [`Resolver::resolve`] with caller-owned cycle tracking.
    pub fn resolve_tracked(
        &self,
        params: &SearchParams,
        tracked: &mut TrackedModules,
    ) -> Option<Symbol<'w>> {
        if is_keyword(&params.symbol) {
            trace!("keyword, not resolved");
            return None;
        }
        if !params.access_path.is_empty() {
            if let Some(found) = self.resolve_access_path(params) {
                return Some(found);
            }
            trace!("member lookup failed, searching scopes");
        }
        if params.module_specified {
            return self.find_in_qualified_module(params);
        }
        tracked.track(&params.module_path);
        self.find_closest(params, tracked)
    }

    fn find_closest(&self, params: &SearchParams, tracked: &mut TrackedModules) -> Option<Symbol<'w>> {
        trace!(module = %params.module_path, depth = tracked.len(), "searching");
        let documents: Vec<_> = match &params.doc_id {
            Some(id) => self.workspace.document(id).into_iter().collect(),
            None => self
                .workspace
                .documents()
                .filter(|d| !params.is_excluded(&d.id))
                .filter(|d| d.modules.has_implicit_loadable_modules(&params.module_path))
                .collect(),
        };

        let mut imports: Vec<&'w ModulePath> = Vec::new();
        for document in documents {
            for module in document.modules.get_loadable_modules(&params.module_path) {
                if let Some(found) = self.find_deep_first(Symbol::Module(module), params) {
                    return Some(found);
                }
                collect_imports(module, &mut imports);
            }
        }

        if params.continue_on_modules {
            if let Some(found) = self.find_closest(&params.sibling_documents(), tracked) {
                return Some(found);
            }
        }

        for import in imports {
            if !tracked.track(import) {
                trace!(module = %import, "already visited");
                continue;
            }
            if let Some(found) = self.find_closest(&params.in_imported(import), tracked) {
                return Some(found);
            }
        }
        None
    }

    /// Only modules whose path ends with the qualifier; no imports.
    fn find_in_qualified_module(&self, params: &SearchParams) -> Option<Symbol<'w>> {
        let mut root = params.clone();
        root.scope_mode = ScopeMode::InModuleRoot;
        self.qualified_modules(&params.module_path)
            .into_iter()
            .find_map(|module| self.find_deep_first(Symbol::Module(module), &root))
    }

    /// Modules named by a (possibly partial) qualifier, in document order.
    pub(crate) fn qualified_modules(&self, qualifier: &ModulePath) -> Vec<&'w Module> {
        self.workspace
            .documents()
            .flat_map(|d| d.modules.modules())
            .filter(|m| m.path.ends_with(qualifier))
            .collect()
    }

    /// Depth-first search below `node`.
    ///
    /// Function scopes are checked first: their own name, then (subject to
    /// the scope mode) their parameters and locals. Then the names of all
    /// other direct children, and only after that their members, so a
    /// module-level declaration wins over a struct member of the same
    /// name. Module nodes themselves never match.
    fn find_deep_first(&self, node: Symbol<'w>, params: &SearchParams) -> Option<Symbol<'w>> {
        c3_syntax::ensure_sufficient_stack(|| {
            let cursor = params.cursor();
            for scope in node.nested_scopes() {
                if accepts(scope, params) {
                    return Some(scope);
                }
                match params.scope_mode {
                    ScopeMode::InModuleRoot => continue,
                    ScopeMode::InScope
                        if params.doc_id.as_ref() != Some(scope.document())
                            || !scope.document_range().contains(cursor) =>
                    {
                        continue
                    }
                    _ => {}
                }
                if let Some(found) = self.find_deep_first(scope, params) {
                    return Some(found);
                }
            }

            let children = node.children_without_scopes();
            if let Some(found) = children.iter().copied().find(|&c| accepts(c, params)) {
                return Some(found);
            }
            for child in children {
                if let Some(found) = self.find_deep_first(child, params) {
                    return Some(found);
                }
            }

            if !matches!(node, Symbol::Module(_)) && accepts(node, params) {
                return Some(node);
            }
            None
        })
    }
}

fn accepts(symbol: Symbol<'_>, params: &SearchParams) -> bool {
    symbol.matches(&params.symbol) && (!params.types_only || symbol.is_type())
}

fn collect_imports<'w>(module: &'w Module, imports: &mut Vec<&'w ModulePath>) {
    for import in &module.imports {
        if !imports.contains(&import) {
            imports.push(import);
        }
    }
}
