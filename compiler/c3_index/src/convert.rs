//! Syntax tree to symbol tree conversion.
//!
//! The converter walks the top-level nodes of one document in order and
//! appends declarations to the module section that is open at that point.
//! Declarations before the first `module` statement go to an anonymous
//! module named after the file.

mod declarations;
mod structs;
mod subtyping;
mod types;

use c3_ir::{DocumentId, GenericParameter, ModulePath, Position, Range, SymbolBase};
use c3_syntax::{Field, NodeKind, SyntaxNode};
use tracing::{debug, trace};

use crate::{ConvertError, UnitModules};

pub(crate) use subtyping::{apply_inherited, compute_inherited};

/// Parse and convert `source`.
pub fn convert_document(document: &DocumentId, source: &str) -> Result<UnitModules, ConvertError> {
    let tree = c3_syntax::parse(source);
    convert_tree(document, tree.root())
}

/// Convert an already parsed tree.
#[tracing::instrument(level = "debug", skip_all, fields(document = %document))]
pub fn convert_tree<'t, N: SyntaxNode<'t>>(
    document: &DocumentId,
    root: N,
) -> Result<UnitModules, ConvertError> {
    let mut converter = Converter::new(document);
    for node in root.children() {
        converter.top_level(node)?;
    }
    let mut unit = converter.finish(root.end_position());

    let updates = {
        let modules: Vec<_> = unit.modules().iter().collect();
        compute_inherited(&modules)
    };
    for update in updates {
        apply_inherited(&mut unit.modules_mut()[update.module], update);
    }

    debug!(modules = unit.modules().len(), "converted document");
    Ok(unit)
}

/// Module and document that converted symbols are attributed to.
pub(crate) struct Origin {
    pub module: ModulePath,
    pub document: DocumentId,
}

impl Origin {
    /// Base for a symbol named by `name` and spanning `whole`.
    pub(crate) fn base<'t, N: SyntaxNode<'t>>(&self, name: N, whole: N) -> SymbolBase {
        self.base_named(name.text(), range(name), range(whole))
    }

    pub(crate) fn base_named(
        &self,
        name: &str,
        identifier_range: Range,
        document_range: Range,
    ) -> SymbolBase {
        SymbolBase::new(
            name,
            self.module.clone(),
            self.document.clone(),
            identifier_range,
            document_range,
        )
    }
}

struct Converter<'d> {
    document: &'d DocumentId,
    unit: UnitModules,
    current: Option<ModulePath>,
    /// End of the last top-level node seen.
    last_end: Position,
}

impl<'d> Converter<'d> {
    fn new(document: &'d DocumentId) -> Self {
        Converter {
            document,
            unit: UnitModules::new(document.clone()),
            current: None,
            last_end: Position::default(),
        }
    }

    fn top_level<'t, N: SyntaxNode<'t>>(&mut self, node: N) -> Result<(), ConvertError> {
        match node.kind() {
            NodeKind::Module => self.module(node)?,
            NodeKind::Import => {
                let origin = self.origin();
                let module = self.unit.get_or_create_module(&origin.module);
                for path in node.children_by_field(Field::Path) {
                    module.add_import(types::module_path(path));
                }
            }
            NodeKind::GlobalDeclaration => {
                let origin = self.origin();
                let globals = declarations::globals(&origin, node)?;
                self.unit
                    .get_or_create_module(&origin.module)
                    .declarations
                    .extend(globals);
            }
            NodeKind::ConstDeclaration
            | NodeKind::FuncDefinition
            | NodeKind::FuncDeclaration
            | NodeKind::MacroDeclaration
            | NodeKind::StructDeclaration
            | NodeKind::BitstructDeclaration
            | NodeKind::EnumDeclaration
            | NodeKind::FaultDeclaration
            | NodeKind::InterfaceDeclaration
            | NodeKind::DefineDeclaration => {
                let origin = self.origin();
                let declaration = declarations::declaration(&origin, node)?;
                self.unit
                    .get_or_create_module(&origin.module)
                    .declarations
                    .push(declaration);
            }
            NodeKind::Error => trace!(at = %node.start_position(), "skipping malformed declaration"),
            _ => {}
        }
        self.last_end = node.end_position();
        Ok(())
    }

    fn module<'t, N: SyntaxNode<'t>>(&mut self, node: N) -> Result<(), ConvertError> {
        let path_node = required(node, Field::Path)?;
        let path = types::module_path(path_node);
        self.close_current();

        let fresh = self.unit.get(&path).is_none();
        let document = self.document.clone();
        let module = self.unit.get_or_create_module(&path);
        if fresh {
            module.base.identifier_range = range(path_node);
            module.base.document_range = range(node);
        }
        if let Some(generics) = node.child_by_field(Field::Generics) {
            for ident in generics.children_of_kind(NodeKind::Ident) {
                if module.generic_parameter(ident.text()).is_some() {
                    continue;
                }
                module.generic_parameters.push(GenericParameter {
                    base: SymbolBase::new(
                        ident.text(),
                        path.clone(),
                        document.clone(),
                        range(ident),
                        range(ident),
                    ),
                });
            }
        }
        self.current = Some(path);
        Ok(())
    }

    /// Stretch the open module section up to the last node seen.
    fn close_current(&mut self) {
        if let Some(path) = &self.current {
            let end = self.last_end;
            let module = self.unit.get_or_create_module(path);
            if module.base.document_range.end < end {
                module.base.document_range.end = end;
            }
        }
    }

    /// The open module, creating the anonymous one on first use.
    fn origin(&mut self) -> Origin {
        let module = match &self.current {
            Some(path) => path.clone(),
            None => {
                let path = ModulePath::new(&self.document.anonymous_module_name());
                self.unit.get_or_create_module(&path);
                self.current = Some(path.clone());
                path
            }
        };
        Origin {
            module,
            document: self.document.clone(),
        }
    }

    fn finish(mut self, end: Position) -> UnitModules {
        self.last_end = end;
        self.close_current();
        self.unit
    }
}

#[inline]
pub(crate) fn range<'t, N: SyntaxNode<'t>>(node: N) -> Range {
    Range::new(node.start_position(), node.end_position())
}

/// A child the parser always produces for this node kind.
pub(crate) fn required<'t, N: SyntaxNode<'t>>(node: N, field: Field) -> Result<N, ConvertError> {
    node.child_by_field(field)
        .ok_or(ConvertError::MissingField {
            kind: node.kind(),
            field,
            at: node.start_position(),
        })
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
