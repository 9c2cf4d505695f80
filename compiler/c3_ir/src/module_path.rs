//! `::`-separated module paths and the implicit visibility rule.

use std::fmt;

use smallvec::SmallVec;

/// A module path such as `std::io::file`.
///
/// Paths compare segment by segment. The empty path is used for "no
/// module" (for example an unqualified type reference).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModulePath {
    segments: SmallVec<[String; 4]>,
}

impl ModulePath {
    /// Parse a `::`-separated path. Empty segments are dropped, so a
    /// trailing `::` (as in `foo::bar::`) is accepted.
    pub fn new(path: &str) -> Self {
        ModulePath {
            segments: path
                .split("::")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ModulePath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Last segment, e.g. `file` for `std::io::file`.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The parent path, or `None` for a single-segment path.
    pub fn parent(&self) -> Option<ModulePath> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(ModulePath {
            segments: self.segments[..self.segments.len() - 1].iter().cloned().collect(),
        })
    }

    /// True if `self` is a strict ancestor of `other`.
    pub fn is_parent_of(&self, other: &ModulePath) -> bool {
        self.segments.len() < other.segments.len()
            && other.segments.starts_with(&self.segments)
    }

    /// True if `self` is a strict descendant of `other`.
    #[inline]
    pub fn is_child_of(&self, other: &ModulePath) -> bool {
        other.is_parent_of(self)
    }

    /// Implicit visibility between modules: a path sees itself, its
    /// ancestors and its descendants without an explicit import.
    ///
    /// `foo::bar` sees `foo` and `foo::bar::baz`, but not `foo::circle`.
    pub fn is_implicitly_imported(&self, other: &ModulePath) -> bool {
        self == other || self.is_parent_of(other) || self.is_child_of(other)
    }

    /// True if the trailing segments of `self` equal `suffix`.
    ///
    /// Used for partially qualified references: `bar::X` may refer to
    /// `foo::bar::X`.
    pub fn ends_with(&self, suffix: &ModulePath) -> bool {
        !suffix.is_empty() && self.segments.ends_with(&suffix.segments)
    }

    /// Append one segment.
    #[must_use]
    pub fn join(&self, segment: &str) -> ModulePath {
        let mut segments = self.segments.clone();
        segments.push(segment.to_owned());
        ModulePath { segments }
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("::")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for ModulePath {
    fn from(path: &str) -> Self {
        ModulePath::new(path)
    }
}

#[cfg(test)]
mod tests;
