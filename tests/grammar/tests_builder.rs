//! Grammar construction errors and rule handling.

use lookahead::base::{TerminalClass, Version, VersionParseError};
use lookahead::grammar::{ChildRef, GrammarBuilder, GrammarError, PathSegment, VariantPart, Wrapping};
use rstest::rstest;

use crate::helpers::grammar_helpers::{keyword, punctuation};

#[test]
fn test_undefined_rule_is_reported_by_name() {
    let mut builder = GrammarBuilder::new();
    let (_, select) = keyword(&mut builder, "SELECT");
    let expr = builder.rule("expr").unwrap();
    builder
        .sequence(vec![select.into(), expr.into()])
        .unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(err, GrammarError::UndefinedRule("expr".into()));
    assert_eq!(err.to_string(), "rule 'expr' was referenced but never defined");
}

#[test]
fn test_rule_is_defined_once() {
    let mut builder = GrammarBuilder::new();
    let (_, select) = keyword(&mut builder, "SELECT");
    let statement = builder.rule("statement").unwrap();
    assert_eq!(builder.rule("statement").unwrap(), statement);

    builder
        .define_sequence(statement, vec![select.into()])
        .unwrap();
    let err = builder
        .define_sequence(statement, vec![select.into()])
        .unwrap_err();
    assert_eq!(err, GrammarError::Redefined(statement));
}

#[test]
fn test_empty_constructs_are_refused() {
    let mut builder = GrammarBuilder::new();

    assert!(matches!(
        builder.sequence(Vec::new()),
        Err(GrammarError::EmptySequence(_))
    ));
    assert!(matches!(
        builder.one_of(Vec::new()),
        Err(GrammarError::EmptyOneOf(_))
    ));
    assert!(matches!(
        builder.qualified_identifier(Vec::new()),
        Err(GrammarError::EmptyQualifiedIdentifier(_))
    ));
    assert!(matches!(
        builder.qualified_identifier(vec![Vec::new()]),
        Err(GrammarError::EmptyVariant { variant: 0, .. })
    ));
}

#[test]
fn test_all_optional_path_is_refused() {
    let mut builder = GrammarBuilder::new();
    let (_, dot) = punctuation(&mut builder, ".");
    let schema = builder.identifier().unwrap();

    let result = builder.qualified_path(
        vec![PathSegment {
            leaf: schema,
            optional: true,
        }],
        dot,
    );
    assert!(matches!(result, Err(GrammarError::EmptyVariant { .. })));
}

#[test]
fn test_separator_must_be_a_terminal() {
    let mut builder = GrammarBuilder::new();
    let (_, a) = keyword(&mut builder, "A");
    let (_, b) = keyword(&mut builder, "B");
    let pair = builder.sequence(vec![a.into(), b.into()]).unwrap();
    let items = builder.iteration(a, Some(pair), None).unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(err, GrammarError::separator(items, pair));
}

#[test]
fn test_wrapping_must_be_terminals() {
    let mut builder = GrammarBuilder::new();
    let (_, a) = keyword(&mut builder, "A");
    let (_, lparen) = punctuation(&mut builder, "(");
    let ident = builder.identifier().unwrap();
    let items = builder
        .iteration(a, None, Some(Wrapping::optional(lparen, ident)))
        .unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(err, GrammarError::wrapping(items, ident));
}

#[test]
fn test_variant_parts_must_be_leaves() {
    let mut builder = GrammarBuilder::new();
    let (_, a) = keyword(&mut builder, "A");
    let seq = builder.sequence(vec![ChildRef::required(a)]).unwrap();
    let qualified = builder
        .qualified_identifier(vec![vec![VariantPart::required(seq)]])
        .unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(err, GrammarError::variant_part(qualified, seq));
}

#[test]
fn test_terminal_class_conflict() {
    let mut builder = GrammarBuilder::new();
    let first = builder.keyword("JSON_TABLE").unwrap();
    assert_eq!(builder.keyword("JSON_TABLE").unwrap(), first);

    let err = builder
        .terminal("JSON_TABLE", TerminalClass::Function)
        .unwrap_err();
    assert!(matches!(
        err,
        GrammarError::TerminalClassConflict {
            existing: TerminalClass::Keyword,
            requested: TerminalClass::Function,
            ..
        }
    ));
}

#[rstest]
#[case("12", Version::new(12, 0))]
#[case("12.2", Version::new(12, 2))]
#[case("23.0", Version::new(23, 0))]
fn test_version_parse(#[case] input: &str, #[case] expected: Version) {
    assert_eq!(input.parse::<Version>().unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("twelve")]
#[case("12.2.1")]
fn test_version_parse_errors(#[case] input: &str) {
    let err: VersionParseError = input.parse::<Version>().unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_versions_are_ordered() {
    assert!(Version::new(12, 2) > Version::new(12, 1));
    assert!(Version::new(19, 0) > Version::new(12, 2));
    assert_eq!(Version::new(12, 2).to_string(), "12.2");
}
