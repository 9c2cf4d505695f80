//! Source file discovery for workspace indexing.

use std::fs;
use std::path::{Path, PathBuf};

use c3_index::Document;
use tower_lsp::lsp_types::Url;
use tracing::{debug, error, warn};

use crate::convert::document_id;

/// Every `.c3` and `.c3i` file under `root`, sorted by path.
pub fn discover_sources(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    discover_recursive(root, &mut files);
    files.sort();
    files
}

fn discover_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') {
                continue;
            }
        }

        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if matches!(name, "target" | "build" | "node_modules") {
                    continue;
                }
            }
            discover_recursive(&path, files);
        } else if path.extension().is_some_and(|e| e == "c3" || e == "c3i") {
            files.push(path);
        }
    }
}

/// Read and convert every source under `root`. Files that cannot be read
/// or converted are logged and skipped.
#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub fn load_documents(root: &Path) -> Vec<Document> {
    let mut documents = Vec::new();
    for path in discover_sources(root) {
        let Ok(uri) = Url::from_file_path(&path) else {
            warn!(path = %path.display(), "not an absolute path");
            continue;
        };
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), %err, "unreadable source");
                continue;
            }
        };
        match Document::parse(document_id(&uri), text) {
            Ok(document) => documents.push(document),
            Err(err) => error!(path = %path.display(), %err, "conversion failed"),
        }
    }
    debug!(count = documents.len(), "sources loaded");
    documents
}
