//! Symbols in scope at a cursor, for completion.

use c3_ir::{Module, ModulePath, Symbol};

use super::{collect_imports, Resolver, TrackedModules};
use crate::SearchParams;

impl<'w> Resolver<'w> {
    /// Every symbol visible from the cursor, nearest first: parameters
    /// and locals of the enclosing function, then module-level symbols of
    /// the cursor's document, of other documents of the module, and of
    /// imported modules.
    pub(crate) fn visible_symbols(&self, params: &SearchParams) -> Vec<Symbol<'w>> {
        let mut out = Vec::new();
        let mut imports: Vec<&'w ModulePath> = Vec::new();
        let mut tracked = TrackedModules::new();
        tracked.track(&params.module_path);

        let current = params.doc_id.as_ref().and_then(|id| self.workspace.document(id));
        if let Some(document) = current {
            for module in document.modules.get_loadable_modules(&params.module_path) {
                for function in module
                    .functions()
                    .filter(|f| f.base.document_range.contains(params.cursor()))
                {
                    out.extend(Symbol::Function(function).children_without_scopes());
                }
                module_level(module, &mut out);
                collect_imports(module, &mut imports);
            }
        }

        for document in self
            .workspace
            .documents()
            .filter(|d| Some(&d.id) != params.doc_id.as_ref())
        {
            for module in document.modules.get_loadable_modules(&params.module_path) {
                module_level(module, &mut out);
                collect_imports(module, &mut imports);
            }
        }

        let mut next = 0;
        while next < imports.len() {
            let import = imports[next];
            next += 1;
            if !tracked.track(import) {
                continue;
            }
            for document in self.workspace.documents() {
                for module in document.modules.get_loadable_modules(import) {
                    module_level(module, &mut out);
                    collect_imports(module, &mut imports);
                }
            }
        }
        out
    }

    /// Module-level symbols of every module named by `qualifier`.
    pub(crate) fn qualified_symbols(&self, qualifier: &ModulePath) -> Vec<Symbol<'w>> {
        let mut out = Vec::new();
        for module in self.qualified_modules(qualifier) {
            module_level(module, &mut out);
        }
        out
    }
}

/// Declarations directly in `module`. Methods are only reachable through
/// their type and are left out.
fn module_level<'w>(module: &'w Module, out: &mut Vec<Symbol<'w>>) {
    let symbol = Symbol::Module(module);
    out.extend(
        symbol
            .nested_scopes()
            .into_iter()
            .filter(|s| !matches!(s, Symbol::Function(f) if f.type_identifier.is_some())),
    );
    out.extend(symbol.children_without_scopes());
}
