use c3_ir::Position;
use c3_syntax::{Field, NodeKind};

/// Conversion failure.
///
/// Only raised when a node the parser reported as well-formed lacks a
/// child it always has. Malformed input never gets here: it is parsed
/// into error nodes, which the converter skips.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("{kind:?} at {at} has no {field:?} child")]
    MissingField {
        kind: NodeKind,
        field: Field,
        at: Position,
    },
}
