//! The modules contributed by one document.

use c3_ir::{DocumentId, Module, ModulePath, Position, Range, SymbolBase};

/// Every module section declared in a single document, in declaration
/// order. A path appears at most once; re-opening a module later in the
/// same file extends the existing entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitModules {
    document: DocumentId,
    modules: Vec<Module>,
}

impl UnitModules {
    pub fn new(document: DocumentId) -> Self {
        UnitModules {
            document,
            modules: Vec::new(),
        }
    }

    #[inline]
    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    /// Look up the module for `path`, creating an empty one if needed.
    pub fn get_or_create_module(&mut self, path: &ModulePath) -> &mut Module {
        let index = match self.modules.iter().position(|m| &m.path == path) {
            Some(index) => index,
            None => {
                let base = SymbolBase::new(
                    &path.to_string(),
                    path.clone(),
                    self.document.clone(),
                    Range::default(),
                    Range::default(),
                );
                self.modules.push(Module::new(base, path.clone()));
                self.modules.len() - 1
            }
        };
        &mut self.modules[index]
    }

    pub fn get(&self, path: &ModulePath) -> Option<&Module> {
        self.modules.iter().find(|m| &m.path == path)
    }

    #[inline]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[inline]
    pub fn modules_mut(&mut self) -> &mut [Module] {
        &mut self.modules
    }

    /// Modules visible from `path` without an import: `path` itself, its
    /// ancestors and its descendants, in declaration order.
    pub fn get_loadable_modules(&self, path: &ModulePath) -> Vec<&Module> {
        self.modules
            .iter()
            .filter(|m| m.path.is_implicitly_imported(path))
            .collect()
    }

    pub fn has_implicit_loadable_modules(&self, path: &ModulePath) -> bool {
        self.modules.iter().any(|m| m.path.is_implicitly_imported(path))
    }

    /// The module section a position belongs to: among sections whose
    /// range contains `pos`, the one that starts last.
    pub fn module_at(&self, pos: Position) -> Option<&Module> {
        self.modules
            .iter()
            .filter(|m| m.base.document_range.contains(pos))
            .max_by_key(|m| m.base.document_range.start)
            .or_else(|| self.modules.first())
    }
}
