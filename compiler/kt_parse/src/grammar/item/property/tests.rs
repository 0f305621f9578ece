#![allow(clippy::unwrap_used, clippy::expect_used)]

use kt_ir::SyntaxKind as K;
use pretty_assertions::assert_eq;

use crate::{parse, ParseOutput};

fn messages(output: &ParseOutput) -> Vec<&str> {
    output.errors.iter().map(|e| e.message.as_str()).collect()
}

fn count(output: &ParseOutput, kind: K) -> usize {
    output.root.descendants().filter(|n| n.kind() == kind).count()
}

#[test]
fn extension_property_with_getter() {
    let source = "val String.lastChar: Char get() = this[length - 1]";
    let output = parse(source);
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    let property = output.root.child(K::Property).unwrap();
    let receiver = property.child(K::TypeReference).unwrap();
    assert_eq!(receiver.text(source), "String");
    assert_eq!(count(&output, K::PropertyAccessor), 1);
}

#[test]
fn accessor_without_body() {
    let output = parse("var x: Int private set\n");
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    assert_eq!(count(&output, K::PropertyAccessor), 1);
}

#[test]
fn setter_then_getter() {
    let source = "var x = 0\n    set(v) { field = v }\n    get() = field\n";
    let output = parse(source);
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    assert_eq!(count(&output, K::PropertyAccessor), 2);
}

#[test]
fn local_destructuring_declaration() {
    let output = parse("fun f() {\n    val (a, b: Int) = pair\n}\n");
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    assert_eq!(count(&output, K::DestructuringDeclaration), 1);
    assert_eq!(count(&output, K::DestructuringDeclarationEntry), 2);
}

#[test]
fn top_level_destructuring_is_reported() {
    let output = parse("val (a, b) = pair\n");
    assert_eq!(
        messages(&output),
        vec!["Destructuring declarations are only allowed for local variables/values"]
    );
}

#[test]
fn destructuring_with_a_type_is_reported() {
    let output = parse("fun f() {\n    val (a, b): Pair = p\n}\n");
    assert_eq!(
        messages(&output),
        vec!["Type annotations are not allowed on destructuring declarations"]
    );
}

#[test]
fn name_on_the_next_line_starts_a_statement() {
    let output = parse("fun f() {\n    val\n    foo()\n}\n");
    assert_eq!(messages(&output), vec!["Expecting property name or receiver type"]);
    assert_eq!(count(&output, K::CallExpression), 1);
}

#[test]
fn local_property_takes_no_accessors() {
    let output = parse("fun f() {\n    val get = 1\n    get\n}\n");
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    assert_eq!(count(&output, K::PropertyAccessor), 0);
}

#[test]
fn junk_after_a_member_property() {
    let output = parse("class A {\n    val x = 1 2\n}\n");
    assert_eq!(messages(&output), vec!["Property getter or setter expected"]);
}
