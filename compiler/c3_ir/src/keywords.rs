//! Reserved words of C3.
//!
//! The resolver refuses to look these up: a keyword is never a user
//! declaration.

/// Built-in type names.
const BUILTIN_TYPES: &[&str] = &[
    "any", "anyfault", "bfloat16", "bool", "char", "double", "float", "float128", "float16",
    "ichar", "int", "int128", "iptr", "isz", "long", "short", "typeid", "uint", "uint128",
    "uptr", "usz", "ulong", "ushort", "void",
];

/// Statement and declaration keywords.
const KEYWORDS: &[&str] = &[
    "asm", "assert", "bitstruct", "break", "case", "catch", "const", "continue", "def",
    "default", "defer", "distinct", "do", "else", "enum", "extern", "false", "fault", "fn",
    "for", "foreach", "foreach_r", "if", "import", "inline", "interface", "macro", "module",
    "nextcase", "null", "return", "static", "struct", "switch", "tlocal", "true", "try",
    "typedef", "union", "var", "while",
];

/// True for built-in type names such as `int` or `usz`.
pub fn is_builtin_type(text: &str) -> bool {
    BUILTIN_TYPES.contains(&text)
}

/// True for every reserved word, including built-in type names.
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text) || is_builtin_type(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        for word in ["fn", "module", "struct", "int", "void", "return", "foreach_r"] {
            assert!(is_keyword(word), "{word} should be a keyword");
        }
        for word in ["hello", "Module", "self", "String", "foo_int"] {
            assert!(!is_keyword(word), "{word} should not be a keyword");
        }
    }

    #[test]
    fn test_builtin_types() {
        assert!(is_builtin_type("usz"));
        assert!(is_builtin_type("anyfault"));
        assert!(!is_builtin_type("fn"));
        assert!(!is_builtin_type("Camera"));
    }
}
