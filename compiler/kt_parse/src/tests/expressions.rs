//! Expressions, statements and control flow.

use kt_ir::SyntaxKind as K;
use pretty_assertions::assert_eq;

use super::{child_kinds, count, first, parse_clean, script_statements};
use crate::SyntaxNode;

/// Statements of a script that must parse without errors.
fn clean_statements(source: &str) -> Vec<SyntaxNode> {
    let (output, statements) = script_statements(source);
    assert!(
        output.errors.is_empty(),
        "unexpected errors {:?} in\n{}",
        output.errors,
        output.debug_tree(source)
    );
    statements
}

fn single(source: &str) -> SyntaxNode {
    let mut statements = clean_statements(source);
    assert_eq!(statements.len(), 1, "expected one statement in {source:?}");
    statements.remove(0)
}

fn kinds(statements: &[SyntaxNode]) -> Vec<K> {
    statements.iter().map(SyntaxNode::kind).collect()
}

// Precedence

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expression = single("a + b * c");
    assert_eq!(expression.kind(), K::BinaryExpression);
    assert_eq!(
        child_kinds(&expression),
        vec![K::ReferenceExpression, K::OperationReference, K::BinaryExpression]
    );
}

#[test]
fn binary_operators_fold_left() {
    let expression = single("a - b - c");
    assert_eq!(
        child_kinds(&expression),
        vec![K::BinaryExpression, K::OperationReference, K::ReferenceExpression]
    );
}

#[test]
fn assignment_takes_the_whole_right_side() {
    let expression = single("x = a || b && c");
    assert_eq!(
        child_kinds(&expression),
        vec![K::ReferenceExpression, K::OperationReference, K::BinaryExpression]
    );
    let disjunction = expression.child(K::BinaryExpression).unwrap();
    assert_eq!(
        child_kinds(disjunction),
        vec![K::ReferenceExpression, K::OperationReference, K::BinaryExpression]
    );
}

#[test]
fn casts_and_type_checks_take_types() {
    let cast = single("x as String");
    assert_eq!(cast.kind(), K::BinaryWithType);
    assert!(cast.child(K::TypeReference).is_some());

    let safe_cast = single("x as? String");
    assert_eq!(safe_cast.kind(), K::BinaryWithType);

    let check = single("x !is Int");
    assert_eq!(check.kind(), K::IsExpression);
    assert!(check.child(K::TypeReference).is_some());
}

#[test]
fn elvis_and_range_operators() {
    let elvis = single("a ?: b");
    assert_eq!(elvis.kind(), K::BinaryExpression);
    let operation = elvis.child(K::OperationReference).unwrap();
    assert_eq!(operation.significant_tokens().count(), 1);

    let range = single("0..n");
    assert_eq!(range.kind(), K::BinaryExpression);
}

#[test]
fn comparison_is_not_a_type_argument_list() {
    let expression = single("a < b");
    assert_eq!(expression.kind(), K::BinaryExpression);
    assert_eq!(count(&expression, K::TypeArgumentList), 0);
}

#[test]
fn explicit_type_arguments_on_call() {
    let expression = single("listOf<Int>(1, 2)");
    assert_eq!(expression.kind(), K::CallExpression);
    assert_eq!(
        child_kinds(&expression),
        vec![K::ReferenceExpression, K::TypeArgumentList, K::ValueArgumentList]
    );
    assert_eq!(count(&expression, K::ValueArgument), 2);
}

// Prefix and postfix

#[test]
fn prefix_minus_applies_to_the_member_access() {
    let expression = single("-a.b");
    assert_eq!(expression.kind(), K::PrefixExpression);
    assert_eq!(
        child_kinds(&expression),
        vec![K::OperationReference, K::DotQualifiedExpression]
    );
}

#[test]
fn double_bang_in_prefix_position_is_two_negations() {
    let expression = single("!!x");
    assert_eq!(count(&expression, K::PrefixExpression), 2);
    assert_eq!(count(&expression, K::PostfixExpression), 0);
}

#[test]
fn postfix_chain_nests_outwards() {
    let expression = single("a.b(c)[0]!!");
    assert_eq!(expression.kind(), K::PostfixExpression);
    let access = expression.child(K::ArrayAccessExpression).unwrap();
    let qualified = access.child(K::DotQualifiedExpression).unwrap();
    assert_eq!(
        child_kinds(qualified),
        vec![K::ReferenceExpression, K::CallExpression]
    );
    assert!(access.child(K::Indices).is_some());
}

#[test]
fn safe_access() {
    let expression = single("a?.b");
    assert_eq!(expression.kind(), K::SafeAccessExpression);
}

#[test]
fn named_and_spread_arguments() {
    let expression = single("f(x = 1, *rest)");
    assert_eq!(count(&expression, K::ValueArgument), 2);
    assert_eq!(count(&expression, K::ValueArgumentName), 1);
}

#[test]
fn callable_references_and_class_literals() {
    let reference = single("String::length");
    assert_eq!(reference.kind(), K::CallableReferenceExpression);

    let unbound = single("::println");
    assert_eq!(unbound.kind(), K::CallableReferenceExpression);

    let literal = single("String::class");
    assert_eq!(literal.kind(), K::ClassLiteralExpression);
}

#[test]
fn calling_a_callable_reference_is_reserved() {
    let (output, _) = script_statements("foo::bar(1)");
    let messages: Vec<_> = output.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["This syntax is reserved for future use; to call a reference, enclose it in parentheses: (foo::bar)(args)"]
    );
}

// Lambdas

#[test]
fn trailing_lambda_argument() {
    let expression = single("run { it }");
    assert_eq!(expression.kind(), K::CallExpression);
    let argument = expression.child(K::LambdaArgument).unwrap();
    let literal = first(argument, K::FunctionLiteral);
    assert_eq!(count(literal, K::ValueParameterList), 0);
    assert!(literal.child(K::Block).is_some());
}

#[test]
fn lambda_with_two_parameters() {
    let lambda = single("{ a, b -> a + b }");
    assert_eq!(lambda.kind(), K::LambdaExpression);
    let parameters = first(&lambda, K::ValueParameterList);
    assert_eq!(parameters.children_of(K::ValueParameter).count(), 2);
    let body = first(&lambda, K::Block);
    assert_eq!(child_kinds(body), vec![K::BinaryExpression]);
}

#[test]
fn lambda_with_typed_parameter() {
    let lambda = single("{ a: Int -> a }");
    let parameter = first(&lambda, K::ValueParameter);
    assert!(parameter.child(K::TypeReference).is_some());
}

#[test]
fn parenthesized_body_is_not_a_parameter_list() {
    let lambda = single("{ (a) }");
    assert_eq!(count(&lambda, K::ValueParameterList), 0);
    let body = first(&lambda, K::Block);
    assert_eq!(child_kinds(body), vec![K::Parenthesized]);
}

#[test]
fn destructuring_lambda_parameter() {
    let lambda = single("{ (a) -> 1 }");
    let parameter = first(&lambda, K::ValueParameter);
    assert!(parameter.child(K::DestructuringDeclaration).is_some());
}

#[test]
fn lambda_without_parameters_before_arrow() {
    let lambda = single("{ -> 1 }");
    let parameters = first(&lambda, K::ValueParameterList);
    assert!(child_kinds(parameters).is_empty());
}

#[test]
fn comma_separated_names_without_arrow_keep_their_parameters() {
    let (output, statements) = script_statements("{ a, b }");
    assert_eq!(statements.len(), 1);
    assert_eq!(count(&statements[0], K::ValueParameter), 2);
    assert!(output.errors.iter().any(|e| e.message == "Expecting '->'"));
}

#[test]
fn labeled_lambda_and_jump_labels() {
    let source = "loop@ for (i in xs) { break@loop }";
    let statement = single(source);
    assert_eq!(statement.kind(), K::LabeledExpression);
    assert_eq!(count(&statement, K::LabelQualifier), 2);
    assert_eq!(count(&statement, K::Break), 1);
}

// Line breaks

#[test]
fn line_break_before_binary_operator_ends_the_statement() {
    let statements = clean_statements("a\n+ b");
    assert_eq!(
        kinds(&statements),
        vec![K::ReferenceExpression, K::PrefixExpression]
    );
}

#[test]
fn line_break_after_binary_operator_continues() {
    let statements = clean_statements("a +\nb");
    assert_eq!(kinds(&statements), vec![K::BinaryExpression]);
}

#[test]
fn member_access_may_start_a_line() {
    let statements = clean_statements("a\n    .b\n    ?.c");
    assert_eq!(kinds(&statements), vec![K::SafeAccessExpression]);
}

#[test]
fn call_parentheses_on_the_next_line_are_a_new_statement() {
    let statements = clean_statements("foo\n(1)");
    assert_eq!(
        kinds(&statements),
        vec![K::ReferenceExpression, K::Parenthesized]
    );
}

#[test]
fn return_value_on_the_next_line_is_a_new_statement() {
    let statements = clean_statements("return\n1");
    assert_eq!(kinds(&statements), vec![K::Return, K::IntegerConstant]);
    assert!(child_kinds(&statements[0]).is_empty());

    let same_line = single("return 1");
    assert_eq!(child_kinds(&same_line), vec![K::IntegerConstant]);
}

#[test]
fn newlines_inside_parentheses_are_insignificant() {
    let statements = clean_statements("(a\n+ b)");
    assert_eq!(kinds(&statements), vec![K::Parenthesized]);
    assert_eq!(count(&statements[0], K::BinaryExpression), 1);
}

// Control structures

#[test]
fn if_with_else() {
    let expression = single("if (a) b else c");
    assert_eq!(expression.kind(), K::If);
    assert_eq!(child_kinds(&expression), vec![K::Condition, K::Then, K::Else]);
}

#[test]
fn if_block_bodies_are_blocks() {
    let expression = single("if (a) { b } else { c }");
    let then = expression.child(K::Then).unwrap();
    assert_eq!(child_kinds(then), vec![K::Block]);
    assert_eq!(count(&expression, K::LambdaExpression), 0);
}

#[test]
fn when_with_every_condition_form() {
    let source = "\
when (x) {
    1, 2 -> \"a\"
    in 3..4 -> \"b\"
    is String -> \"c\"
    else -> \"d\"
}";
    let when = single(source);
    assert_eq!(when.kind(), K::When);
    assert_eq!(when.children_of(K::WhenEntry).count(), 4);
    assert_eq!(count(&when, K::WhenConditionExpression), 2);
    assert_eq!(count(&when, K::WhenConditionInRange), 1);
    assert_eq!(count(&when, K::WhenConditionIsPattern), 1);
}

#[test]
fn when_subject_may_declare_a_property() {
    let when = single("when (val y = f()) {\n    else -> y\n}");
    assert_eq!(count(&when, K::Property), 1);
}

#[test]
fn for_over_destructured_entries() {
    let source = "for ((k, v) in map) { println(k) }";
    let expression = single(source);
    assert_eq!(expression.kind(), K::For);
    assert_eq!(
        child_kinds(&expression),
        vec![K::ValueParameter, K::LoopRange, K::Body]
    );
    assert_eq!(count(&expression, K::DestructuringDeclarationEntry), 2);
}

#[test]
fn while_and_do_while() {
    let statements = clean_statements("while (a) b()\ndo { c() } while (d)");
    assert_eq!(kinds(&statements), vec![K::While, K::DoWhile]);
    assert_eq!(count(&statements[1], K::Condition), 1);
}

#[test]
fn try_catch_finally() {
    let expression = single("try { f() } catch (e: Exception) { } finally { }");
    assert_eq!(expression.kind(), K::Try);
    assert_eq!(
        child_kinds(&expression),
        vec![K::Block, K::Catch, K::Finally]
    );
}

#[test]
fn annotated_expression() {
    let expression = single("@Suppress(\"x\") foo()");
    assert_eq!(expression.kind(), K::AnnotatedExpression);
}

#[test]
fn object_literal_in_initializer() {
    let output = parse_clean("val o = object : Runnable { override fun run() {} }\n");
    let literal = first(&output.root, K::ObjectLiteral);
    let declaration = literal.child(K::ObjectDeclaration).unwrap();
    assert!(declaration.child(K::SuperTypeList).is_some());
    assert!(declaration.child(K::ClassBody).is_some());
}

#[test]
fn string_template_entries() {
    let source = r#"val s = "a $b ${c + 1}\n""#;
    let output = parse_clean(source);
    let template = first(&output.root, K::StringTemplate);
    assert_eq!(
        child_kinds(template),
        vec![
            K::LiteralStringTemplateEntry,
            K::ShortStringTemplateEntry,
            K::LiteralStringTemplateEntry,
            K::LongStringTemplateEntry,
            K::EscapeStringTemplateEntry,
        ]
    );
}

#[test]
fn this_and_super_with_qualifiers() {
    let statements = clean_statements("this@Outer.x\nsuper<Base>.f()");
    assert_eq!(
        kinds(&statements),
        vec![K::DotQualifiedExpression, K::DotQualifiedExpression]
    );
    assert_eq!(count(&statements[0], K::LabelQualifier), 1);
    assert_eq!(count(&statements[1], K::SuperExpression), 1);
}

#[test]
fn local_declarations_in_blocks() {
    let source = "fun f() {\n    val x = 1\n    fun g() = x\n    class C\n    g()\n}\n";
    let output = parse_clean(source);
    let body = first(&output.root, K::Block);
    assert_eq!(
        child_kinds(body),
        vec![K::Property, K::Fun, K::Class, K::CallExpression]
    );
}
