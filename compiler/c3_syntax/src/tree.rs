//! Arena-backed concrete syntax tree.
//!
//! The tree only keeps named nodes; punctuation is dropped. Every node
//! records its byte span and the matching start/end [`Position`]s, and
//! may carry the [`Field`] it fills in its parent.

use std::ops::Range as ByteRange;

use c3_ir::Position;

use crate::{Field, LineIndex, NodeKind};

/// Capabilities the symbol converter needs from a syntax tree.
///
/// Any tree that can answer these questions can be indexed; this crate's
/// [`Node`] is the implementation used in practice.
pub trait SyntaxNode<'t>: Copy + Sized {
    fn kind(self) -> NodeKind;
    fn start_position(self) -> Position;
    fn end_position(self) -> Position;
    fn byte_range(self) -> ByteRange<usize>;
    fn children(self) -> Vec<Self>;
    /// First child filling `field`.
    fn child_by_field(self, field: Field) -> Option<Self>;
    /// Every child filling `field`, in order.
    fn children_by_field(self, field: Field) -> Vec<Self>;
    /// Raw source text of the node.
    fn text(self) -> &'t str;

    /// Children of the given kind, in order.
    fn children_of_kind(self, kind: NodeKind) -> Vec<Self> {
        self.children().into_iter().filter(|c| c.kind() == kind).collect()
    }
}

/// Index of a node in [`SyntaxTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

#[derive(Clone, Debug)]
struct NodeData {
    kind: NodeKind,
    field: Option<Field>,
    start: usize,
    end: usize,
    start_position: Position,
    end_position: Position,
    children: Vec<NodeId>,
}

/// A parsed document.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<NodeData>,
    root: NodeId,
    line_index: LineIndex,
}

impl SyntaxTree {
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: self.root,
        }
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0 as usize]
    }

    /// Indented dump of the tree, for tests and debugging.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        dump_node(self.root(), 0, &mut out);
        out
    }
}

fn dump_node(node: Node<'_>, depth: usize, out: &mut String) {
    use std::fmt::Write;

    let _ = write!(out, "{:indent$}{:?}", "", node.kind(), indent = depth * 2);
    if let Some(field) = node.field() {
        let _ = write!(out, " ({field:?})");
    }
    if node.children().is_empty() {
        let _ = write!(out, " {:?}", node.text());
    }
    out.push('\n');
    for child in node.children() {
        dump_node(child, depth + 1, out);
    }
}

/// Handle to a node of a [`SyntaxTree`].
#[derive(Copy, Clone)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The field this node fills in its parent.
    #[inline]
    pub fn field(self) -> Option<Field> {
        self.tree.data(self.id).field
    }

    fn wrap(self, id: NodeId) -> Node<'t> {
        Node {
            tree: self.tree,
            id,
        }
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.tree.data(self.id);
        write!(f, "{:?}@{}..{}", data.kind, data.start, data.end)
    }
}

impl<'t> SyntaxNode<'t> for Node<'t> {
    #[inline]
    fn kind(self) -> NodeKind {
        self.tree.data(self.id).kind
    }

    #[inline]
    fn start_position(self) -> Position {
        self.tree.data(self.id).start_position
    }

    #[inline]
    fn end_position(self) -> Position {
        self.tree.data(self.id).end_position
    }

    #[inline]
    fn byte_range(self) -> ByteRange<usize> {
        let data = self.tree.data(self.id);
        data.start..data.end
    }

    fn children(self) -> Vec<Self> {
        self.tree
            .data(self.id)
            .children
            .iter()
            .map(|&id| self.wrap(id))
            .collect()
    }

    fn child_by_field(self, field: Field) -> Option<Self> {
        self.tree
            .data(self.id)
            .children
            .iter()
            .copied()
            .find(|&id| self.tree.data(id).field == Some(field))
            .map(|id| self.wrap(id))
    }

    fn children_by_field(self, field: Field) -> Vec<Self> {
        self.tree
            .data(self.id)
            .children
            .iter()
            .copied()
            .filter(|&id| self.tree.data(id).field == Some(field))
            .map(|id| self.wrap(id))
            .collect()
    }

    fn text(self) -> &'t str {
        let data = self.tree.data(self.id);
        self.tree.source.get(data.start..data.end).unwrap_or_default()
    }
}

struct OpenNode {
    kind: NodeKind,
    field: Option<Field>,
    start: Option<usize>,
    end: usize,
    children: Vec<NodeId>,
}

/// Marker for a node opened with [`TreeBuilder::start`].
#[must_use]
pub(crate) struct Marker {
    depth: usize,
}

/// Bottom-up construction of a [`SyntaxTree`], driven by the parser.
pub(crate) struct TreeBuilder {
    nodes: Vec<NodeData>,
    open: Vec<OpenNode>,
    line_index: LineIndex,
}

impl TreeBuilder {
    pub(crate) fn new(source: &str) -> Self {
        let mut builder = TreeBuilder {
            nodes: Vec::new(),
            open: Vec::new(),
            line_index: LineIndex::new(source),
        };
        builder.open.push(OpenNode {
            kind: NodeKind::SourceFile,
            field: None,
            start: Some(0),
            end: 0,
            children: Vec::new(),
        });
        builder
    }

    pub(crate) fn start(&mut self, kind: NodeKind, field: Option<Field>) -> Marker {
        self.open.push(OpenNode {
            kind,
            field,
            start: None,
            end: 0,
            children: Vec::new(),
        });
        Marker {
            depth: self.open.len(),
        }
    }

    /// Record that a token spanning `start..end` belongs to every open node.
    pub(crate) fn token(&mut self, start: usize, end: usize) {
        for open in &mut self.open {
            if open.start.is_none() {
                open.start = Some(start);
            }
            open.end = open.end.max(end);
        }
    }

    /// A node made of a single token.
    pub(crate) fn leaf(&mut self, kind: NodeKind, field: Option<Field>, start: usize, end: usize) {
        let marker = self.start(kind, field);
        self.token(start, end);
        self.finish(marker);
    }

    pub(crate) fn finish(&mut self, marker: Marker) {
        let kind = self.open.get(marker.depth - 1).map(|open| open.kind);
        if let Some(kind) = kind {
            self.finish_as(marker, kind);
        }
    }

    /// Close the node opened by `marker`, overriding its kind.
    pub(crate) fn finish_as(&mut self, marker: Marker, kind: NodeKind) {
        debug_assert_eq!(self.open.len(), marker.depth, "unbalanced tree builder");
        let Some(open) = self.open.pop() else {
            return;
        };
        let start = open.start.unwrap_or_else(|| self.open.last().map_or(0, |p| p.end));
        let end = open.end.max(start);
        let id = self.push(NodeData {
            kind,
            field: open.field,
            start,
            end,
            start_position: self.line_index.position(start),
            end_position: self.line_index.position(end),
            children: open.children,
        });
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(id);
        }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(data);
        id
    }

    pub(crate) fn build(mut self, source: &str) -> SyntaxTree {
        while self.open.len() > 1 {
            let marker = Marker {
                depth: self.open.len(),
            };
            self.finish(marker);
        }
        let root = match self.open.pop() {
            Some(open) => {
                let end = source.len();
                let data = NodeData {
                    kind: NodeKind::SourceFile,
                    field: None,
                    start: 0,
                    end,
                    start_position: Position::default(),
                    end_position: self.line_index.position(end),
                    children: open.children,
                };
                self.push(data)
            }
            None => self.push(NodeData {
                kind: NodeKind::SourceFile,
                field: None,
                start: 0,
                end: 0,
                start_position: Position::default(),
                end_position: Position::default(),
                children: Vec::new(),
            }),
        };
        SyntaxTree {
            source: source.to_owned(),
            nodes: self.nodes,
            root,
            line_index: self.line_index,
        }
    }
}
