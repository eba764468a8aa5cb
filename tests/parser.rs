use ka::{
    ast::{ComparisonOperator, Expr, Generator, UnitSignature},
    error::{Error, ParseError},
    interpreter::{Interpreter, value::number::Number},
};
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Expr {
    Interpreter::new().parse(source)
                      .unwrap_or_else(|e| panic!("failed to parse {source:?}: {e}"))
}

fn parse_error(source: &str) -> ParseError {
    match Interpreter::new().parse(source) {
        Err(Error::Parse(e)) => e,
        other => panic!("expected a parse error from {source:?}, got {other:?}"),
    }
}

fn int(n: i64) -> Expr {
    Expr::literal(n)
}

fn var(name: &str) -> Expr {
    Expr::Variable { name: name.to_string() }
}

fn units(list: &[(&str, i32)], inverted: &[(&str, i32)]) -> UnitSignature {
    let owned = |list: &[(&str, i32)]| list.iter().map(|(name, e)| ((*name).to_string(), *e)).collect();
    UnitSignature { units:    owned(list),
                    inverted: owned(inverted), }
}

#[test]
fn empty_input_is_an_empty_program() {
    assert_eq!(parse(""), Expr::Statements { statements: vec![] });
}

#[test]
fn precedence() {
    assert_eq!(parse("1 + 2 * 3"),
               Expr::call("+", vec![int(1), Expr::call("*", vec![int(2), int(3)])]));
    assert_eq!(parse("(1 + 2) * 3"),
               Expr::call("*", vec![Expr::call("+", vec![int(1), int(2)]), int(3)]));
    assert_eq!(parse("1 - 2 - 3"),
               Expr::call("-", vec![Expr::call("-", vec![int(1), int(2)]), int(3)]));
}

#[test]
fn powers_are_left_associative() {
    assert_eq!(parse("2^3^2"),
               Expr::call("^", vec![Expr::call("^", vec![int(2), int(3)]), int(2)]));
}

#[test]
fn signs_and_factorials() {
    assert_eq!(parse("-5!"), Expr::call("-", vec![Expr::call("!", vec![int(5)])]));
    assert_eq!(parse("+x"), Expr::call("+", vec![var("x")]));
    assert_eq!(parse("2 * -3"), Expr::call("*", vec![int(2), Expr::call("-", vec![int(3)])]));
}

#[test]
fn statements_and_assignment() {
    assert_eq!(parse("x = 3; 5 * x"),
               Expr::Statements { statements: vec![Expr::Assignment { name:  "x".to_string(),
                                                                      value: Box::new(int(3)), },
                                                   Expr::call("*", vec![int(5), var("x")])], });
}

#[test]
fn empty_statements_are_rejected() {
    assert_eq!(parse_error("1;;2"), ParseError::EmptyStatement { index: 2 });
    assert_eq!(parse_error("1; 2;"), ParseError::EmptyStatement { index: 3 });
    assert_eq!(parse_error(";"), ParseError::EmptyStatement { index: 0 });
}

#[test]
fn single_comparisons_are_calls() {
    assert_eq!(parse("a <= b"), Expr::call("<=", vec![var("a"), var("b")]));
    assert_eq!(parse("a != b"), Expr::call("!=", vec![var("a"), var("b")]));
}

#[test]
fn descending_chains_are_reversed() {
    assert_eq!(parse("a > b >= c"),
               Expr::Comparison { operands:  vec![var("c"), var("b"), var("a")],
                                  operators: vec![ComparisonOperator::LessEqual, ComparisonOperator::Less], });
    assert_eq!(parse("a < b <= c"),
               Expr::Comparison { operands:  vec![var("a"), var("b"), var("c")],
                                  operators: vec![ComparisonOperator::Less, ComparisonOperator::LessEqual], });
}

#[test]
fn malformed_chains() {
    assert_eq!(parse_error("a < b > c"), ParseError::MixedComparisonDirections { index: 3 });
    assert_eq!(parse_error("a == b < c"), ParseError::ChainedEquality { index: 1 });
    assert_eq!(parse_error("a < b < c < d"), ParseError::TooManyComparisons { index: 5 });
}

#[test]
fn unit_suffixes() {
    assert_eq!(parse("5 m | s"),
               Expr::Quantity { magnitude: Box::new(int(5)),
                                units:     units(&[("m", 1)], &[("s", 1)]), });
    assert_eq!(parse("2 kg m^2 | s^2"),
               Expr::Quantity { magnitude: Box::new(int(2)),
                                units:     units(&[("kg", 1), ("m", 2)], &[("s", 2)]), });
    assert_eq!(parse("1 s^-1"),
               Expr::Quantity { magnitude: Box::new(int(1)),
                                units:     units(&[("s", -1)], &[]), });
}

#[test]
fn the_sign_belongs_to_the_magnitude() {
    assert_eq!(parse("-5 m"),
               Expr::Quantity { magnitude: Box::new(Expr::call("-", vec![int(5)])),
                                units:     units(&[("m", 1)], &[]), });
    assert_eq!(parse("-5!"), Expr::call("-", vec![Expr::call("!", vec![int(5)])]));
}

#[test]
fn unit_errors() {
    assert_eq!(parse_error("5 m^1.5"), ParseError::NonIntegerUnitExponent { index: 3 });
    assert_eq!(parse_error("5 m |"), ParseError::MissingUnitAfterDivide { index: 2 });
    assert!(matches!(parse_error("5 m to"), ParseError::UnexpectedEndOfInput { .. }));
}

#[test]
fn conversions() {
    assert_eq!(parse("3 km to m"),
               Expr::Conversion { expr:   Box::new(Expr::Quantity { magnitude: Box::new(int(3)),
                                                                    units:     units(&[("km", 1)], &[]), }),
                                  target: units(&[("m", 1)], &[]), });
}

#[test]
fn unit_signatures_display_like_they_are_written() {
    assert_eq!(units(&[("kg", 1), ("m", 2)], &[("s", 2)]).to_string(), "kg m^2/s^2");
    assert_eq!(units(&[("N", 1)], &[]).to_string(), "N");
}

#[test]
fn ranges_desugar_to_calls() {
    assert_eq!(parse("1..5"), Expr::call("range", vec![int(1), int(5)]));
}

#[test]
fn calls_with_keywords() {
    assert_eq!(parse("range(1, 9, step: 2)"),
               Expr::FunctionCall { name:      "range".to_string(),
                                    arguments: vec![int(1), int(9)],
                                    keywords:  vec![("step".to_string(), int(2))], });
    assert_eq!(parse("f()"),
               Expr::FunctionCall { name:      "f".to_string(),
                                    arguments: vec![],
                                    keywords:  vec![], });
    assert_eq!(parse_error("f(x: 1, 2)"), ParseError::PositionalAfterKeyword { index: 6 });
}

#[test]
fn intervals_and_arrays() {
    assert_eq!(parse("[1, 2]"), Expr::call("interval", vec![int(1), int(2)]));
    assert_eq!(parse("{1, 2}"), Expr::ArrayLiteral { elements: vec![int(1), int(2)] });
    assert_eq!(parse("{}"), Expr::ArrayLiteral { elements: vec![] });
}

#[test]
fn comprehensions_split_generators_from_predicates() {
    assert_eq!(parse("{x : x in [1, 3], x <= 2}"),
               Expr::Comprehension { body:       Box::new(var("x")),
                                     generators: vec![Generator { name:   "x".to_string(),
                                                                  source: Expr::call("interval", vec![int(1), int(3)]), }],
                                     predicates: vec![Expr::call("<=", vec![var("x"), int(2)])], });
}

#[test]
fn literals() {
    assert_eq!(parse("\"hi\""), Expr::literal("hi"));
    assert_eq!(parse("1e-4"), Expr::literal(Number::ratio(1, 10_000).unwrap()));
    assert!(matches!(parse("#2024-01-31#"), Expr::Literal { .. }));
    assert!(matches!(parse_error("#2024-02-30#"), ParseError::Other { index: 0, .. }));
}

#[test]
fn unbalanced_brackets() {
    assert_eq!(parse_error("(1 + 2"),
               ParseError::ExpectedClosing { delimiter: ")",
                                             index:     4, });
    assert!(matches!(parse_error("1 +"), ParseError::UnexpectedEndOfInput { index: 2 }));
    assert_eq!(parse_error("1 2"),
               ParseError::UnexpectedToken { token: "2".to_string(),
                                             index: 1, });
}

#[test]
fn error_positions_are_token_indices() {
    let source = "alpha  +  * 2";
    let error = parse_error(source);
    assert_eq!(error, ParseError::UnexpectedToken { token: "*".to_string(),
                                                    index: 2, });
    assert_eq!(Error::Parse(error).offset(source), Some(10));

    let source = "(1 + 2";
    assert_eq!(Error::Parse(parse_error(source)).offset(source), Some(source.len()));
}

#[test]
fn lex_errors_keep_byte_offsets() {
    let source = "1 + $";
    let error = Interpreter::new().parse(source).unwrap_err();
    assert!(matches!(error, Error::Lex(_)));
    assert_eq!(error.offset(source), Some(4));
}
