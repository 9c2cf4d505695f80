//! Fixtures shared by the unit tests.

use c3_ir::{DocumentId, Position};

use crate::Workspace;

const CURSOR: &str = "<|>";

pub(crate) fn doc_id(name: &str) -> DocumentId {
    DocumentId::new(&format!("file:///work/{name}"))
}

/// Workspace with every `(name, source)` pair registered in order.
pub(crate) fn workspace(files: &[(&str, &str)]) -> Workspace {
    let mut workspace = Workspace::new();
    for (name, source) in files {
        assert!(
            workspace.refresh_document(doc_id(name), (*source).to_owned()),
            "{name} failed to convert"
        );
    }
    workspace
}

/// Strip the `<|>` marker from `source` and return where it was.
pub(crate) fn cursor(source: &str) -> (String, Position) {
    let offset = source.find(CURSOR).expect("source has a <|> marker");
    let before = &source[..offset];
    let line = before.matches('\n').count();
    let column = offset - before.rfind('\n').map_or(0, |nl| nl + 1);
    let text = format!("{before}{}", &source[offset + CURSOR.len()..]);
    (
        text,
        Position::new(
            u32::try_from(line).expect("line fits"),
            u32::try_from(column).expect("column fits"),
        ),
    )
}

/// Like [`workspace`], with a cursor marker in the first file.
pub(crate) fn workspace_with_cursor(files: &[(&str, &str)]) -> (Workspace, DocumentId, Position) {
    let (text, position) = cursor(files[0].1);
    let mut workspace = Workspace::new();
    assert!(workspace.refresh_document(doc_id(files[0].0), text));
    for (name, source) in &files[1..] {
        assert!(workspace.refresh_document(doc_id(name), (*source).to_owned()));
    }
    (workspace, doc_id(files[0].0), position)
}
