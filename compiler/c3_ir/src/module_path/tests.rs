use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn path(s: &str) -> ModulePath {
    ModulePath::new(s)
}

// === Parsing and display ===

#[test]
fn test_parse_segments() {
    assert_eq!(path("std::io::file").segments(), ["std", "io", "file"]);
    assert_eq!(path("foo::bar::").segments(), ["foo", "bar"]);
    assert!(path("").is_empty());
    assert_eq!(path("std::io").to_string(), "std::io");
    assert_eq!(path("std::io").last(), Some("io"));
}

#[test]
fn test_parent_and_join() {
    assert_eq!(path("a::b::c").parent(), Some(path("a::b")));
    assert_eq!(path("a").parent(), None);
    assert_eq!(path("a::b").join("c"), path("a::b::c"));
}

// === Ancestry ===

#[test]
fn test_parent_child_relation() {
    assert!(path("foo").is_parent_of(&path("foo::bar")));
    assert!(path("foo").is_parent_of(&path("foo::bar::baz")));
    assert!(!path("foo").is_parent_of(&path("foo")));
    assert!(!path("foo").is_parent_of(&path("foobar::x")));
    assert!(path("foo::bar").is_child_of(&path("foo")));
    assert!(!path("foo").is_child_of(&path("foo::bar")));
}

#[test]
fn test_implicit_import_rule() {
    let bar = path("foo::bar");

    assert!(bar.is_implicitly_imported(&path("foo::bar")));
    assert!(bar.is_implicitly_imported(&path("foo")));
    assert!(bar.is_implicitly_imported(&path("foo::bar::baz")));
    assert!(!bar.is_implicitly_imported(&path("foo::circle")));
    assert!(!bar.is_implicitly_imported(&path("yyy")));
    assert!(!path("foo::bar::line").is_implicitly_imported(&path("foo::circle")));
}

#[test]
fn test_ends_with() {
    assert!(path("foo::bar").ends_with(&path("bar")));
    assert!(path("foo::bar").ends_with(&path("foo::bar")));
    assert!(!path("foo::bar").ends_with(&path("foo")));
    assert!(!path("foo::bar").ends_with(&path("")));
}

// === Properties ===

fn segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_]{0,5}", 1..5)
}

proptest! {
    #[test]
    fn prop_display_round_trips(segs in segments()) {
        let p = ModulePath::from_segments(segs.clone());
        prop_assert_eq!(ModulePath::new(&p.to_string()), p);
    }

    #[test]
    fn prop_implicit_import_is_symmetric(a in segments(), b in segments()) {
        let a = ModulePath::from_segments(a);
        let b = ModulePath::from_segments(b);
        prop_assert_eq!(a.is_implicitly_imported(&b), b.is_implicitly_imported(&a));
    }

    #[test]
    fn prop_prefix_is_parent(segs in segments(), extra in "[a-z]{1,4}") {
        let parent = ModulePath::from_segments(segs);
        let child = parent.join(&extra);
        prop_assert!(parent.is_parent_of(&child));
        prop_assert!(child.is_child_of(&parent));
        prop_assert!(child.is_implicitly_imported(&parent));
    }
}
