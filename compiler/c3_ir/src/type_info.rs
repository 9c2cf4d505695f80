use std::fmt;

use crate::{ModulePath, Range};

/// A type as written at a declaration site.
///
/// This is a syntactic reference, not a resolved type: `raylib::Camera*!`
/// is recorded as name `Camera`, module `raylib`, one level of pointer
/// indirection and the optional marker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: String,
    /// Explicit module qualifier, empty when unqualified.
    pub module: ModulePath,
    pub built_in: bool,
    /// The `!` / `?` "may fail" marker.
    pub optional: bool,
    /// Pointer indirection depth.
    pub pointer: u32,
    /// Array or slice suffix (`[]`, `[4]`, `[*]`).
    pub collection: bool,
    pub generic_arguments: Vec<TypeInfo>,
    pub range: Range,
}

impl TypeInfo {
    /// An unqualified, non-pointer type reference.
    pub fn named(name: &str, range: Range) -> Self {
        TypeInfo {
            name: name.to_owned(),
            built_in: crate::is_builtin_type(name),
            range,
            ..TypeInfo::default()
        }
    }

    /// Same type with one more level of indirection.
    #[must_use]
    pub fn pointer_to(mut self) -> Self {
        self.pointer += 1;
        self
    }

    /// True if this is a user type that could name a declaration.
    #[inline]
    pub fn is_user_type(&self) -> bool {
        !self.built_in && !self.name.is_empty()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.module.is_empty() {
            write!(f, "{}::", self.module)?;
        }
        f.write_str(&self.name)?;
        if !self.generic_arguments.is_empty() {
            f.write_str("(<")?;
            for (i, arg) in self.generic_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">)")?;
        }
        for _ in 0..self.pointer {
            f.write_str("*")?;
        }
        if self.collection {
            f.write_str("[]")?;
        }
        if self.optional {
            f.write_str("!")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        let mut ty = TypeInfo::named("Camera", Range::default());
        ty.module = ModulePath::new("raylib");
        ty.pointer = 2;
        ty.optional = true;
        assert_eq!(ty.to_string(), "raylib::Camera**!");
        assert!(ty.is_user_type());
    }

    #[test]
    fn test_builtin_detection() {
        assert!(TypeInfo::named("int", Range::default()).built_in);
        assert!(!TypeInfo::named("String", Range::default()).built_in);
        assert!(!TypeInfo::named("int", Range::default()).is_user_type());
    }

    #[test]
    fn test_generic_display() {
        let mut ty = TypeInfo::named("List", Range::default());
        ty.generic_arguments.push(TypeInfo::named("int", Range::default()));
        ty.collection = true;
        assert_eq!(ty.to_string(), "List(<int>)[]");
    }
}
