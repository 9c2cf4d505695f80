use super::*;
use c3_ir::{
    Declaration, Enum, Function, FunctionKind, Module, Struct, StructKind, VariableKind,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn convert(source: &str) -> UnitModules {
    convert_document(&DocumentId::new("file:///work/test.c3"), source)
        .expect("conversion should succeed")
}

fn module<'a>(unit: &'a UnitModules, path: &str) -> &'a Module {
    unit.get(&ModulePath::new(path))
        .unwrap_or_else(|| panic!("module {path} missing"))
}

fn function<'a>(module: &'a Module, name: &str) -> &'a Function {
    module
        .functions()
        .find(|f| f.base.name == name)
        .unwrap_or_else(|| panic!("function {name} missing"))
}

fn structure<'a>(module: &'a Module, name: &str) -> &'a Struct {
    module
        .structs()
        .find(|s| s.base.name == name)
        .unwrap_or_else(|| panic!("struct {name} missing"))
}

fn enumeration<'a>(module: &'a Module, name: &str) -> &'a Enum {
    module
        .declarations
        .iter()
        .find_map(|d| match d {
            Declaration::Enum(e) if e.base.name == name => Some(e),
            _ => None,
        })
        .unwrap_or_else(|| panic!("enum {name} missing"))
}

// === Modules ===

#[test]
fn test_global_variable_round_trip() {
    let unit = convert("module foo; int hello = 3;");
    let foo = module(&unit, "foo");

    assert_eq!(foo.base.name, "foo");
    assert_eq!(foo.base.identifier_range, Range::from_coords(0, 7, 0, 10));
    assert_eq!(foo.base.document_range, Range::from_coords(0, 0, 0, 26));

    let hello = foo.variables().next().expect("hello");
    assert_eq!(hello.base.name, "hello");
    assert_eq!(hello.kind, VariableKind::Global);
    assert_eq!(hello.ty.as_ref().map(|t| t.name.as_str()), Some("int"));
    assert_eq!(hello.base.module, ModulePath::new("foo"));
    assert_eq!(hello.base.identifier_range, Range::from_coords(0, 16, 0, 21));
    assert_eq!(hello.base.document_range, Range::from_coords(0, 12, 0, 26));
}

#[test]
fn test_comma_separated_globals() {
    let unit = convert("module foo;\nint dog, cat, elephant;\n");
    let names: Vec<_> = module(&unit, "foo")
        .variables()
        .map(|v| v.base.name.as_str())
        .collect();
    assert_eq!(names, ["dog", "cat", "elephant"]);
}

#[test]
fn test_module_generic_parameters() {
    let unit = convert("module foo(<Type>);\nType value;\n");
    let foo = module(&unit, "foo");

    assert_eq!(foo.generic_parameters.len(), 1);
    let param = &foo.generic_parameters[0];
    assert_eq!(param.base.name, "Type");
    assert_eq!(param.base.identifier_range, Range::from_coords(0, 12, 0, 16));
    assert_eq!(param.base.document_range, Range::from_coords(0, 12, 0, 16));
}

#[test]
fn test_module_ranges_end_before_next_module() {
    let unit = convert("module a;\nint x;\nmodule b;\nint y;\n");

    assert_eq!(module(&unit, "a").base.document_range, Range::from_coords(0, 0, 1, 6));
    assert_eq!(module(&unit, "b").base.document_range, Range::from_coords(2, 0, 4, 0));
}

#[test]
fn test_reopened_module_merges_declarations() {
    let unit = convert("module a;\nint x;\nmodule b;\nint y;\nmodule a;\nint z;\n");

    assert_eq!(unit.modules().len(), 2);
    let names: Vec<_> = module(&unit, "a")
        .variables()
        .map(|v| v.base.name.as_str())
        .collect();
    assert_eq!(names, ["x", "z"]);
}

#[test]
fn test_declarations_before_module_use_anonymous_module() {
    let document = DocumentId::new("file:///tmp/My-File.c3");
    let unit = convert_document(&document, "int x;\nmodule real;\nint y;\n").expect("converts");

    let names: Vec<_> = unit.modules().iter().map(|m| m.base.name.as_str()).collect();
    assert_eq!(names, ["my_file", "real"]);
    assert_eq!(module(&unit, "my_file").base.document_range.start, Position::new(0, 0));
}

#[test]
fn test_imports_are_deduplicated() {
    let unit = convert("module app;\nimport std::io, foo;\nimport foo;\n");
    let imports: Vec<_> = module(&unit, "app").imports.iter().map(ToString::to_string).collect();
    assert_eq!(imports, ["std::io", "foo"]);
}

#[test]
fn test_malformed_declaration_is_skipped() {
    let unit = convert("module app;\nstruct { int a; }\nint ok;\n");
    let app = module(&unit, "app");

    assert!(app.structs().next().is_none());
    assert_eq!(app.variables().map(|v| v.base.name.as_str()).collect::<Vec<_>>(), ["ok"]);
}

// === Functions ===

#[test]
fn test_method_parameters_and_locals() {
    let source = "module app;\n\
                  fn void Emu.init(&self, int speed) {\n\
                  \x20   int local = 1;\n\
                  \x20   foreach (i, x : list) {}\n\
                  }\n";
    let unit = convert(source);
    let init = function(module(&unit, "app"), "init");

    assert_eq!(init.kind, FunctionKind::Method);
    assert_eq!(init.type_identifier.as_deref(), Some("Emu"));
    assert_eq!(init.full_name(), "Emu.init");
    assert!(init.has_body);

    let this = &init.parameters[0];
    assert_eq!(this.base.name, "self");
    assert_eq!(this.base.identifier_range, Range::from_coords(1, 17, 1, 22));
    let this_ty = this.ty.as_ref().expect("self type");
    assert_eq!((this_ty.name.as_str(), this_ty.pointer), ("Emu", 1));

    let locals: Vec<_> = init
        .locals
        .iter()
        .map(|l| (l.base.name.as_str(), l.ty.as_ref().map(|t| t.name.as_str())))
        .collect();
    assert_eq!(locals, [("local", Some("int")), ("i", None), ("x", None)]);
}

#[test]
fn test_declaration_without_body() {
    let unit = convert("module app;\nextern fn int puts(char* s);\n");
    let puts = function(module(&unit, "app"), "puts");

    assert!(!puts.has_body);
    assert_eq!(puts.kind, FunctionKind::Function);
    let ty = puts.parameters[0].ty.as_ref().expect("typed");
    assert_eq!((ty.name.as_str(), ty.pointer), ("char", 1));
}

#[test]
fn test_macro_with_untyped_parameters() {
    let unit = convert("module app;\nmacro @swap(a, b) { var tmp = a; }\n");
    let swap = function(module(&unit, "app"), "@swap");

    assert_eq!(swap.kind, FunctionKind::Macro);
    assert_eq!(swap.parameters.iter().map(|p| p.ty.is_none()).collect::<Vec<_>>(), [true, true]);
    assert_eq!(swap.locals[0].base.name, "tmp");
}

// === Structs ===

#[test]
fn test_struct_members_share_type_range() {
    let unit = convert("module app;\nstruct Foo {\n    int a, b, c;\n}\n");
    let foo = structure(module(&unit, "app"), "Foo");

    let members: Vec<_> = foo.members.iter().map(|m| (m.base.name.as_str(), m.ty.range)).collect();
    let ty = Range::from_coords(2, 4, 2, 7);
    assert_eq!(members, [("a", ty), ("b", ty), ("c", ty)]);
    assert_eq!(foo.kind, StructKind::Normal);
}

proptest! {
    #[test]
    fn comma_declared_members_keep_their_own_names(count in 1usize..12) {
        let names: Vec<String> = (0..count).map(|i| format!("f{i}")).collect();
        let line = format!("    int {};", names.join(", "));
        let unit = convert(&format!("module app;\nstruct Foo {{\n{line}\n}}\n"));
        let foo = structure(module(&unit, "app"), "Foo");

        let expected: Vec<_> = names
            .iter()
            .map(|name| {
                let start = line.find(&format!(" {name}")).map_or(0, |at| at + 1);
                let column = |offset: usize| u32::try_from(offset).unwrap_or_default();
                (name.as_str(), Range::from_coords(2, column(start), 2, column(start + name.len())))
            })
            .collect();
        let actual: Vec<_> = foo
            .members
            .iter()
            .map(|m| (m.base.name.as_str(), m.base.identifier_range))
            .collect();
        prop_assert_eq!(actual, expected);

        let ty = Range::from_coords(2, 4, 2, 7);
        prop_assert!(foo.members.iter().all(|m| m.ty.range == ty));
    }
}

#[test]
fn test_nested_blocks_flatten_or_nest() {
    let source = "module app;\n\
                  union Value {\n\
                  \x20   inline Header;\n\
                  \x20   struct {\n\
                  \x20       int x;\n\
                  \x20       float y;\n\
                  \x20   }\n\
                  \x20   struct inner {\n\
                  \x20       int z;\n\
                  \x20   }\n\
                  }\n";
    let unit = convert(source);
    let value = structure(module(&unit, "app"), "Value");

    assert_eq!(value.kind, StructKind::Union);
    let names: Vec<_> = value.members.iter().map(|m| m.base.name.as_str()).collect();
    assert_eq!(names, ["Header", "x", "y", "inner"]);

    let header = &value.members[0];
    assert!(header.is_inlined);
    assert_eq!(header.base.identifier_range, header.ty.range);

    let inner = &value.members[3];
    assert_eq!(inner.sub_members.len(), 1);
    assert_eq!(inner.sub_members[0].base.name, "z");
}

#[test]
fn test_bitstruct_ranges() {
    let source = "module app;\n\
                  bitstruct Flags : uint {\n\
                  \x20   bool carry : 0;\n\
                  \x20   uint value : 1..0x7;\n\
                  }\n";
    let unit = convert(source);
    let flags = structure(module(&unit, "app"), "Flags");

    assert_eq!(flags.kind, StructKind::Bitstruct);
    assert_eq!(flags.backing_type.as_ref().map(|t| t.name.as_str()), Some("uint"));
    let ranges: Vec<_> = flags.members.iter().map(|m| m.bit_range).collect();
    assert_eq!(ranges, [Some([0, 0]), Some([1, 7])]);
}

#[test]
fn test_inline_members_resolved_within_document() {
    let source = "module app;\n\
                  struct Base { int a; }\n\
                  struct Derived { inline Base base; int b; }\n";
    let unit = convert(source);
    let derived = structure(module(&unit, "app"), "Derived");

    let names: Vec<_> = derived.members().map(|m| m.base.name.as_str()).collect();
    assert_eq!(names, ["base", "b", "a"]);
}

#[test]
fn test_unresolved_inline_member_adds_nothing() {
    let unit = convert("module app;\nstruct Derived { inline Missing m; }\n");
    assert!(structure(module(&unit, "app"), "Derived").inherited.is_empty());
}

#[test]
fn test_struct_interfaces() {
    let unit = convert("module app;\nstruct Circle (Shape, draw::Drawable) { float r; }\n");
    assert_eq!(structure(module(&unit, "app"), "Circle").implements, ["Shape", "draw::Drawable"]);
}

// === Enums, faults, interfaces, defines ===

#[test]
fn test_enum_properties_and_enumerators() {
    let source = "module app;\n\
                  enum Color : int (String label) {\n\
                  \x20   RED(\"red\"),\n\
                  \x20   GREEN(\"green\"),\n\
                  }\n";
    let unit = convert(source);
    let color = enumeration(module(&unit, "app"), "Color");

    assert_eq!(color.backing_type.as_ref().map(|t| t.name.as_str()), Some("int"));
    assert_eq!(color.properties[0].base.name, "label");
    assert_eq!(color.properties[0].kind, VariableKind::Property);

    let red = &color.enumerators[0];
    assert_eq!(red.base.name, "RED");
    assert_eq!(red.owner, "Color");
    assert_eq!(red.value.as_deref(), Some("(\"red\")"));
    assert_eq!(color.enumerators[1].base.name, "GREEN");
}

#[test]
fn test_fault_interface_and_defines() {
    let source = "module app;\n\
                  fault IoError { NOT_FOUND, DENIED }\n\
                  interface Shape { fn float area(); }\n\
                  def Kilo = int;\n\
                  distinct Meters = float;\n\
                  def answer = 6 * 7;\n";
    let unit = convert(source);
    let app = module(&unit, "app");

    let symbols: Vec<_> = app.declarations.iter().map(|d| d.as_symbol().to_string()).collect();
    assert_eq!(
        symbols,
        [
            "fault IoError",
            "interface Shape",
            "def Kilo = int",
            "distinct Meters = float",
            "def answer = 6 * 7",
        ]
    );

    let Declaration::Fault(fault) = &app.declarations[0] else {
        panic!("expected fault");
    };
    assert_eq!(fault.constants[1].owner, "IoError");

    let Declaration::Interface(shape) = &app.declarations[1] else {
        panic!("expected interface");
    };
    assert_eq!(shape.methods[0].base.name, "area");
    assert!(!shape.methods[0].has_body);
}

#[test]
fn test_constants() {
    let unit = convert("module app;\nconst int MAX = 10;\nconst MIN = 1;\n");
    let constants: Vec<_> = module(&unit, "app")
        .variables()
        .map(|v| (v.kind, v.ty.is_some()))
        .collect();
    assert_eq!(
        constants,
        [(VariableKind::Constant, true), (VariableKind::Constant, false)]
    );
}

// === Types ===

#[test]
fn test_type_suffixes_and_generics() {
    let unit = convert("module app;\nstd::List(<Foo*>)*[]! list;\n");
    let ty = module(&unit, "app").variables().next().and_then(|v| v.ty.clone()).expect("typed");

    assert_eq!(ty.name, "List");
    assert_eq!(ty.module, ModulePath::new("std"));
    assert_eq!(ty.pointer, 1);
    assert!(ty.collection);
    assert!(ty.optional);
    assert_eq!(ty.generic_arguments[0].name, "Foo");
    assert_eq!(ty.generic_arguments[0].pointer, 1);
    assert!(!ty.built_in);
}

#[test]
fn test_parse_number() {
    assert_eq!(types::parse_number("12"), Some(12));
    assert_eq!(types::parse_number("0x1F"), Some(31));
    assert_eq!(types::parse_number("0b101"), Some(5));
    assert_eq!(types::parse_number("1_000"), Some(1000));
    assert_eq!(types::parse_number("nope"), None);
}
