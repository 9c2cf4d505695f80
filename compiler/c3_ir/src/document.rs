use std::fmt;
use std::sync::Arc;

/// Identity of a document: its URI string.
///
/// Symbols keep a clone of the id of the document they were declared in,
/// so the type is a cheap shared string.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(Arc<str>);

impl DocumentId {
    pub fn new(uri: &str) -> Self {
        DocumentId(Arc::from(uri))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Module name used for declarations that appear before any `module`
    /// statement: the file stem, lowercased, with every character that
    /// cannot appear in an identifier replaced by `_`.
    pub fn anonymous_module_name(&self) -> String {
        let file = self.0.rsplit(['/', '\\']).next().unwrap_or_default();
        let stem = file.split('.').next().unwrap_or_default();
        let mut name: String = stem
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }
        name
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(uri: &str) -> Self {
        DocumentId::new(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_anonymous_module_name() {
        assert_eq!(DocumentId::new("file:///src/app.c3").anonymous_module_name(), "app");
        assert_eq!(
            DocumentId::new("file:///src/My-File.v2.c3").anonymous_module_name(),
            "my_file"
        );
        assert_eq!(DocumentId::new("file:///src/2d.c3").anonymous_module_name(), "_2d");
        assert_eq!(DocumentId::new("").anonymous_module_name(), "_");
    }
}
