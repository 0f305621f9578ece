//! Any input, however broken, comes back as a complete tree.

use proptest::prelude::*;

use super::assert_lossless;
use crate::{parse, parse_with, ParseOptions};

/// Fragments that reach deep into the grammar when glued together.
fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "class ", "interface ", "object ", "enum ", "fun ", "val ", "var ", "typealias ",
        "package ", "import ", "when ", "if ", "else ", "for ", "while ", "do ", "try ",
        "catch ", "finally ", "return ", "break ", "throw ", "this", "super", "in ", "is ",
        "as ", "by ", "get", "set", "constructor", "init ", "where ", "x", "Foo", "1", "2.0",
        "'c'", "true", "null", "(", ")", "{", "}", "[", "]", "<", ">", ",", ";", ":", "::",
        ".", "?", "?.", "?:", "!!", "!", "=", "==", "->", "+", "-", "*", "..", "&&", "||",
        "@", "@Ann ", "l@", "\"", "\"$x\"", "\"${", "\n", " ", "// c\n", "/** d */",
    ])
}

fn soup() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..40).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn arbitrary_text_is_covered(source in "\\PC{0,80}") {
        let output = parse(&source);
        assert_lossless(&source, &output);
    }

    #[test]
    fn token_soup_is_covered(source in soup()) {
        let output = parse(&source);
        assert_lossless(&source, &output);
        for error in &output.errors {
            prop_assert!(error.span.end as usize <= source.len());
        }
    }

    #[test]
    fn token_soup_is_covered_as_script(source in soup()) {
        let output = parse_with(&source, ParseOptions::script());
        assert_lossless(&source, &output);
    }

    #[test]
    fn shallow_stack_parse_agrees(source in soup()) {
        let guarded = parse(&source);
        let plain = parse_with(&source, ParseOptions { max_depth_guard: false, ..ParseOptions::default() });
        prop_assert_eq!(guarded.root, plain.root);
        prop_assert_eq!(guarded.errors, plain.errors);
    }
}

#[test]
fn empty_input() {
    let output = parse("");
    assert_lossless("", &output);
    assert!(output.errors.is_empty());
}

#[test]
fn deeply_nested_parentheses() {
    let depth = 500;
    let source = format!("val x = {}1{}", "(".repeat(depth), ")".repeat(depth));
    let output = parse(&source);
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    assert_lossless(&source, &output);
}
