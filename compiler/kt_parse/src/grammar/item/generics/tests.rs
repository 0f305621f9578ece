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
fn type_parameters_with_bounds_and_modifiers() {
    let output = parse("class A<in T, out R : Any, reified X>");
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    assert_eq!(count(&output, K::TypeParameter), 3);
    assert_eq!(count(&output, K::ModifierList), 3);
    assert_eq!(count(&output, K::TypeReference), 1);
}

#[test]
fn where_clause_with_several_constraints() {
    let output = parse("fun <T, U> f() where T : A, U : B {}");
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    assert_eq!(count(&output, K::TypeConstraint), 2);
}

#[test]
fn where_clause_needs_type_parameters() {
    let output = parse("fun f() where T : Any {}");
    assert_eq!(
        messages(&output),
        vec!["Type constraints are not allowed when no type parameters declared"]
    );
    assert_eq!(count(&output, K::TypeConstraintList), 1);
}

#[test]
fn unclosed_type_parameter_list() {
    let output = parse("class A<T");
    assert_eq!(messages(&output), vec!["Missing '>'"]);
}

#[test]
fn empty_slot_in_type_parameters() {
    let output = parse("class A<, T>");
    assert_eq!(messages(&output), vec!["Expecting type parameter declaration"]);
    assert_eq!(count(&output, K::TypeParameter), 1);
}

#[test]
fn type_parameters_after_the_name() {
    let output = parse("fun f<T>() {}");
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    assert_eq!(count(&output, K::TypeParameterList), 1);

    let output = parse("fun <T> f<U>() {}");
    assert_eq!(
        messages(&output),
        vec!["Only one type parameter list is allowed for a function"]
    );
}

#[test]
fn type_alias_bounds_are_reported() {
    let output = parse("typealias L<T> where T : Any = List<T>");
    assert_eq!(messages(&output), vec!["Type alias parameters can't have bounds"]);
    assert_eq!(count(&output, K::TypeAlias), 1);
}

#[test]
fn type_alias_without_equals() {
    let output = parse("typealias A\nclass B");
    assert_eq!(messages(&output)[0], "Expecting '='");
    assert_eq!(count(&output, K::Class), 1);
}
