use super::*;
use crate::test_support::{doc_id, workspace_with_cursor};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn params_at(source: &str) -> SearchParams {
    let (workspace, id, position) = workspace_with_cursor(&[("main.c3", source)]);
    let document = workspace.document(&id).expect("registered");
    SearchParams::from_position(document, position).expect("cursor on an identifier")
}

fn slices<'a>(text: &'a str, ranges: &[ByteRange<usize>]) -> Vec<&'a str> {
    ranges.iter().map(|r| &text[r.clone()]).collect()
}

// === Words ===

#[test]
fn test_word_at() {
    let text = "int hello = 3; @swap(a); $Type x; 42";
    let word = |offset| word_at(text, offset).map(|r| &text[r]);

    assert_eq!(word(6), Some("hello"));
    assert_eq!(word(4), Some("hello"));
    assert_eq!(word(9), Some("hello"));
    assert_eq!(word(15), Some("@swap"));
    assert_eq!(word(18), Some("@swap"));
    assert_eq!(word(27), Some("$Type"));
    assert_eq!(word(text.len()), None);
    assert_eq!(word(10), None);
    assert_eq!(word(12), None);
}

#[test]
fn test_module_qualifier() {
    let text = "x = foo::bar::baz;";
    let start = text.find("baz").unwrap_or_default();

    assert_eq!(module_qualifier(text, start), Some(ModulePath::new("foo::bar")));
    assert_eq!(module_qualifier(text, 0), None);
}

#[test]
fn test_access_chain() {
    let chain = |text: &'static str, word: &str| {
        let start = text.rfind(word).unwrap_or_default();
        slices(text, &access_chain(text, start))
    };

    assert_eq!(chain("emu.cpu.reg", "reg"), ["emu", "cpu"]);
    assert_eq!(chain("list[i + 1].size(a, (b)).x", "x"), ["list", "size"]);
    assert_eq!(chain("emu\n    .cpu", "cpu"), ["emu"]);
    assert!(chain("(a + b).c", "c").is_empty());
    assert!(chain("for (0..end)", "end").is_empty());
    assert!(chain("x = 1.y", "y").is_empty());
    assert!(chain("plain", "plain").is_empty());
}

// === From a cursor ===

#[test]
fn test_cursor_inside_function() {
    let params = params_at("module app;\nfn void main() {\n    int a = he<|>llo;\n}\n");

    assert_eq!(params.symbol, "hello");
    assert_eq!(params.symbol_range, Range::from_coords(2, 12, 2, 17));
    assert_eq!(params.scope_mode, ScopeMode::InScope);
    assert_eq!(params.module_path, ModulePath::new("app"));
    assert_eq!(params.doc_id, Some(doc_id("main.c3")));
    assert!(!params.module_specified);
    assert!(params.continue_on_modules);
}

#[test]
fn test_cursor_at_module_root() {
    let params = params_at("module app;\nEmu e<|>mu;\n");
    assert_eq!(params.scope_mode, ScopeMode::InModuleRoot);
}

#[test]
fn test_cursor_after_qualifier() {
    let params = params_at("module app;\nfn void main() { foo::bar::ca<|>ll(); }\n");

    assert_eq!(params.symbol, "call");
    assert!(params.module_specified);
    assert_eq!(params.module_path, ModulePath::new("foo::bar"));
}

#[test]
fn test_cursor_after_access_path() {
    let params = params_at("module app;\nfn void main() { emu.cpu.re<|>g = 1; }\n");
    let path: Vec<_> = params.access_path.iter().map(|t| t.text.as_str()).collect();

    assert_eq!(params.symbol, "reg");
    assert_eq!(path, ["emu", "cpu"]);
    assert_eq!(params.access_path[0].range, Range::from_coords(1, 17, 1, 20));
}

#[test]
fn test_cursor_module_is_enclosing_section() {
    let params = params_at("module a;\nint x;\nmodule b;\nint y<|>;\n");
    assert_eq!(params.module_path, ModulePath::new("b"));
}

#[test]
fn test_builder_defaults() {
    let params = SearchParams::builder("x").build();

    assert_eq!(params.scope_mode, ScopeMode::AnyPosition);
    assert!(params.continue_on_modules);
    assert!(params.doc_id.is_none());
    assert!(!params.types_only);
}

#[test]
fn test_builder_exclusions_accumulate() {
    let params = SearchParams::builder("x")
        .exclude(doc_id("a.c3"))
        .exclude(doc_id("b.c3"))
        .build();

    assert!(params.is_excluded(&doc_id("a.c3")));
    assert!(params.is_excluded(&doc_id("b.c3")));
    assert!(!params.is_excluded(&doc_id("c.c3")));
}

#[test]
fn test_sibling_documents_excludes_current() {
    let params = SearchParams::builder("x")
        .in_document(doc_id("a.c3"))
        .scope_mode(ScopeMode::InScope)
        .build()
        .sibling_documents();

    assert!(params.doc_id.is_none());
    assert!(params.is_excluded(&doc_id("a.c3")));
    assert_eq!(params.scope_mode, ScopeMode::InModuleRoot);
    assert!(!params.continue_on_modules);
}

proptest! {
    #[test]
    fn word_at_returns_identifier_slices(text in "[a-z_ .@(),0-9]{0,40}", offset in 0usize..45) {
        if let Some(range) = word_at(&text, offset) {
            let word = &text[range];
            let body = word.trim_start_matches(['@', '$', '#']);
            prop_assert!(!body.is_empty());
            prop_assert!(body.bytes().all(is_ident_byte));
            prop_assert!(!body.as_bytes()[0].is_ascii_digit());
        }
    }
}
