#![allow(clippy::unwrap_used, clippy::expect_used)]

use kt_diagnostic::emitter::ColorMode;
use pretty_assertions::assert_eq;

use super::{parse_args, ArgsError, Command, OutputFormat};

fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}

#[test]
fn parse_implies_tree() {
    let invocation = parse_args(&args("parse a.kt b.kts")).unwrap();
    assert_eq!(
        invocation.command,
        Command::Parse(vec!["a.kt".to_owned(), "b.kts".to_owned()])
    );
    assert!(invocation.options.tree);
    assert!(!invocation.options.tokens);
}

#[test]
fn check_with_every_flag() {
    let invocation = parse_args(&args(
        "check --tokens a.kt --script --format json --color=never --log-tree --tree",
    ))
    .unwrap();
    assert_eq!(invocation.command, Command::Check(vec!["a.kt".to_owned()]));
    let options = invocation.options;
    assert!(options.tokens && options.script && options.log_tree && options.tree);
    assert_eq!(options.format, OutputFormat::Json);
    assert_eq!(options.color, ColorMode::Never);
}

#[test]
fn help_needs_no_files() {
    assert_eq!(parse_args(&args("--help")).unwrap().command, Command::Help);
}

#[test]
fn argument_errors() {
    assert_eq!(parse_args(&[]), Err(ArgsError::MissingCommand));
    assert_eq!(
        parse_args(&args("lint a.kt")),
        Err(ArgsError::UnknownCommand("lint".to_owned()))
    );
    assert_eq!(
        parse_args(&args("check --fast a.kt")),
        Err(ArgsError::UnknownOption("--fast".to_owned()))
    );
    assert_eq!(
        parse_args(&args("check a.kt --format")),
        Err(ArgsError::MissingValue { option: "--format" })
    );
    assert_eq!(
        parse_args(&args("check a.kt --color=sometimes")),
        Err(ArgsError::InvalidValue {
            option: "--color",
            value: "sometimes".to_owned()
        })
    );
    assert_eq!(parse_args(&args("check --script")), Err(ArgsError::NoInputs));
}

#[test]
fn error_messages_name_the_argument() {
    let error = parse_args(&args("check --format xml a.kt")).unwrap_err();
    assert_eq!(error.to_string(), "invalid value 'xml' for '--format'");
}
