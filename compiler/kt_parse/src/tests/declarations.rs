//! File preamble and declarations.

use kt_ir::{SyntaxKind as K, TokenKind};
use pretty_assertions::assert_eq;

use super::{child_kinds, count, first, parse_clean};
use crate::parse;

#[test]
fn property_tree_dump() {
    let source = "val x = 1";
    let output = parse_clean(source);
    let expected = "\
FILE@0..9
  PACKAGE_DIRECTIVE@0..0
  IMPORT_LIST@0..0
  PROPERTY@0..9
    val@0..3 \"val\"
    WHITE_SPACE@3..4 \" \"
    IDENTIFIER@4..5 \"x\"
    WHITE_SPACE@5..6 \" \"
    =@6..7 \"=\"
    WHITE_SPACE@7..8 \" \"
    INTEGER_CONSTANT@8..9
      INTEGER_LITERAL@8..9 \"1\"
";
    assert_eq!(output.debug_tree(source), expected);
}

#[test]
fn preamble_with_package_and_imports() {
    let source = "package a.b\n\nimport c.d.*\nimport e.F as G\n\nfun main() {}\n";
    let output = parse_clean(source);
    let root = &output.root;

    assert_eq!(
        child_kinds(root),
        vec![K::PackageDirective, K::ImportList, K::Fun]
    );
    let package = first(root, K::PackageDirective);
    assert_eq!(package.text(source), "package a.b");
    assert_eq!(count(root, K::ImportDirective), 2);
    assert_eq!(count(root, K::ImportAlias), 1);
}

#[test]
fn star_import_cannot_be_renamed() {
    let output = parse("import a.* as b\n");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].message,
        "Cannot rename all imported items to one identifier"
    );
}

#[test]
fn class_with_header_and_members() {
    let source = "\
class Foo<T : Any>(val x: Int, var y: String = \"a\") : Base(x), Iface by impl, Other {
    init { }
    constructor() : this(1, \"b\")
    companion object { }
    fun f() = x
}
";
    let output = parse_clean(source);
    let class = first(&output.root, K::Class);

    assert_eq!(count(class, K::TypeParameter), 1);
    let constructor = class.child(K::PrimaryConstructor).expect("primary constructor");
    assert_eq!(count(constructor, K::ValueParameter), 2);

    let supertypes = class.child(K::SuperTypeList).expect("supertypes");
    assert_eq!(
        child_kinds(supertypes),
        vec![K::SuperTypeCallEntry, K::DelegatedSuperTypeEntry, K::SuperTypeEntry]
    );

    let body = class.child(K::ClassBody).expect("class body");
    assert_eq!(
        child_kinds(body),
        vec![K::ClassInitializer, K::SecondaryConstructor, K::ObjectDeclaration, K::Fun]
    );
    assert_eq!(count(body, K::ConstructorDelegationCall), 1);
}

#[test]
fn delegate_expression_does_not_take_the_class_body() {
    let source = "class A : B by c {\n    fun f() {}\n}\n";
    let output = parse_clean(source);
    let class = first(&output.root, K::Class);
    assert!(class.child(K::ClassBody).is_some());
    assert_eq!(count(class, K::LambdaArgument), 0);
}

#[test]
fn enum_entries_then_members() {
    let source = "enum class E { A, B; fun f() {} }";
    let output = parse_clean(source);
    let body = first(&output.root, K::ClassBody);
    assert_eq!(child_kinds(body), vec![K::EnumEntry, K::EnumEntry, K::Fun]);
}

#[test]
fn empty_enum_body() {
    let output = parse_clean("enum class E { }");
    let body = first(&output.root, K::ClassBody);
    assert!(child_kinds(body).is_empty());
}

#[test]
fn enum_entries_with_arguments_and_bodies() {
    let source = "enum class Color(val rgb: Int) {\n    RED(0xFF0000),\n    GREEN(0x00FF00) { override fun toString() = \"g\" };\n}\n";
    let output = parse_clean(source);
    assert_eq!(count(&output.root, K::EnumEntry), 2);
    assert_eq!(count(&output.root, K::InitializerList), 2);
}

#[test]
fn extension_function_with_receiver() {
    let source = "fun String.shout(times: Int): String = this\n";
    let output = parse_clean(source);
    let function = first(&output.root, K::Fun);
    let kinds = child_kinds(function);
    assert_eq!(kinds[0], K::TypeReference);
    assert!(kinds.contains(&K::ValueParameterList));
}

#[test]
fn generic_function_with_constraints() {
    let source = "fun <T> max(a: T, b: T): T where T : Comparable<T> { return a }\n";
    let output = parse_clean(source);
    let function = first(&output.root, K::Fun);
    assert!(function.child(K::TypeParameterList).is_some());
    assert!(function.child(K::TypeConstraintList).is_some());
    assert!(function.child(K::Block).is_some());
}

#[test]
fn property_with_accessors() {
    let source = "var name: String = \"\"\n    get() = field\n    private set(value) { field = value }\n";
    let output = parse_clean(source);
    let property = first(&output.root, K::Property);
    assert_eq!(property.children_of(K::PropertyAccessor).count(), 2);
}

#[test]
fn property_delegate() {
    let output = parse_clean("val lazyValue by lazy { 42 }\n");
    let delegate = first(&output.root, K::PropertyDelegate);
    assert_eq!(count(delegate, K::LambdaArgument), 1);
}

#[test]
fn type_alias_with_function_type() {
    let source = "typealias Handler<T> = suspend (T) -> Unit\n";
    let output = parse_clean(source);
    assert_eq!(count(&output.root, K::TypeAlias), 1);
    assert_eq!(count(&output.root, K::FunctionType), 1);
}

#[test]
fn nullable_and_projected_types() {
    let source = "val m: Map<in String, out List<*>>? = null\n";
    let output = parse_clean(source);
    assert_eq!(count(&output.root, K::NullableType), 1);
    assert_eq!(count(&output.root, K::TypeProjection), 3);
}

#[test]
fn doc_comment_belongs_to_declaration() {
    let source = "/** Docs. */\nfun f() {}\n";
    let output = parse_clean(source);
    let function = first(&output.root, K::Fun);
    assert!(function.text(source).starts_with("/** Docs. */"));
}

#[test]
fn hex_and_binary_initializers() {
    let source = "val x = 0xFF\nval y = 0b1010_0101L\n";
    let output = parse_clean(source);
    let constants: Vec<&str> = output
        .root
        .descendants()
        .filter(|n| n.kind() == K::IntegerConstant)
        .map(|n| n.text(source))
        .collect();
    assert_eq!(constants, vec!["0xFF", "0b1010_0101L"]);
}

#[test]
fn comment_placement_depends_on_declaration_context() {
    let local = "fun f() {\n  // note\n  val x = 1 // tail\n}";
    let output = parse_clean(local);
    let property = first(&output.root, K::Property);
    assert_eq!(property.text(local), "val x = 1 // tail");
    let block = first(&output.root, K::Block);
    let block_comments: Vec<&str> = block
        .child_tokens()
        .filter(|t| t.kind == TokenKind::EolComment)
        .map(|t| t.text(local))
        .collect();
    assert_eq!(block_comments, vec!["// note"]);

    let top_level = "// note\nfun g() {} // tail";
    let output = parse_clean(top_level);
    assert_eq!(first(&output.root, K::Fun).text(top_level), top_level);

    let member = "class A {\n  // m\n  fun h() {}\n}";
    let output = parse_clean(member);
    assert_eq!(first(&output.root, K::Fun).text(member), "// m\n  fun h() {}");
}
