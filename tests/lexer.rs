use ka::{
    error::LexError,
    interpreter::{
        lexer::{Token, tokenize},
        value::number::Number,
    },
};
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<Token> {
    tokenize(source).unwrap_or_else(|e| panic!("failed to tokenize {source:?}: {e}"))
                    .into_iter()
                    .map(|(token, _)| token)
                    .collect()
}

fn number(source: &str) -> Number {
    match kinds(source).as_slice() {
        [Token::Number(n)] => n.clone(),
        other => panic!("expected a single number from {source:?}, got {other:?}"),
    }
}

fn int(n: i64) -> Token {
    Token::Number(Number::from(n))
}

fn ident(name: &str) -> Token {
    Token::Identifier(name.to_string())
}

#[test]
fn whitespace_and_newlines_are_skipped() {
    assert_eq!(kinds(" 1 +\n\t2 "), vec![int(1), Token::Plus, int(2)]);
    assert!(kinds("  \n ").is_empty());
}

#[test]
fn decimal_numbers() {
    assert_eq!(number("42"), Number::from(42));
    assert_eq!(number("3.25"), Number::Float(3.25));
    assert_eq!(number(".5"), Number::Float(0.5));
    assert_eq!(number("2.0"), Number::from(2));
    assert_eq!(number("5."), Number::from(5));
}

#[test]
fn exponents_are_exact_without_a_decimal_point() {
    assert_eq!(number("100e-2"), Number::from(1));
    assert_eq!(number("1e-4"), Number::ratio(1, 10_000).unwrap());
    assert_eq!(number("3E3"), Number::from(3000));
    assert_eq!(number("2e+2"), Number::from(200));
    assert_eq!(number("1.2e-4"), Number::Float(1.2e-4));
}

#[test]
fn based_numbers() {
    assert_eq!(number("0b101"), Number::from(5));
    assert_eq!(number("0o17"), Number::from(15));
    assert_eq!(number("0x1f"), Number::from(31));
    assert_eq!(number("0d99"), Number::from(99));
}

#[test]
fn bad_digits_for_the_base() {
    assert_eq!(tokenize("0b2"), Err(LexError::BadNumber { index: 0 }));
    assert_eq!(tokenize("1 + 0o8"), Err(LexError::BadNumber { index: 4 }));
    assert_eq!(tokenize("0d1a"), Err(LexError::BadNumber { index: 0 }));
    assert_eq!(tokenize("0xg"), Err(LexError::BadNumber { index: 0 }));
}

#[test]
fn base_prefixes_need_a_digit() {
    assert_eq!(kinds("0days"), vec![int(0), ident("days")]);
    assert_eq!(kinds("0degC"), vec![int(0), ident("degC")]);
    assert_eq!(kinds("0da"), vec![int(0), ident("da")]);
    assert_eq!(kinds("0b1 0o7 0d0"), vec![int(1), int(7), int(0)]);
}

#[test]
fn ranges_split_off_the_number() {
    assert_eq!(kinds("1..5"), vec![int(1), Token::DotDot, int(5)]);
    let spans: Vec<_> = tokenize("10..20").unwrap().into_iter().map(|(_, span)| span).collect();
    assert_eq!(spans, vec![0..2, 2..4, 4..6]);
}

#[test]
fn keywords_do_not_match_inside_identifiers() {
    assert_eq!(kinds("int total in to"),
               vec![ident("int"), ident("total"), Token::In, Token::To]);
    assert_eq!(kinds("x_1 _y"), vec![ident("x_1"), ident("_y")]);
}

#[test]
fn keywords_split_off_before_digits() {
    assert_eq!(kinds("x to5"), vec![ident("x"), Token::To, int(5)]);
    assert_eq!(kinds("in2m"), vec![Token::In, int(2), ident("m")]);
    assert_eq!(kinds("to_km into"), vec![ident("to_km"), ident("into")]);
    let spans: Vec<_> = tokenize("a to10").unwrap().into_iter().map(|(_, span)| span).collect();
    assert_eq!(spans, vec![0..1, 2..4, 4..6]);
    assert_eq!(tokenize("to0b2"), Err(LexError::BadNumber { index: 2 }));
}

#[test]
fn strings_and_escapes() {
    assert_eq!(kinds(r#""hi""#), vec![Token::String("hi".to_string())]);
    assert_eq!(kinds(r#""a\"b\\c\nd\te""#),
               vec![Token::String("a\"b\\c\nd\te".to_string())]);
    assert_eq!(tokenize(r#"1 + "open"#), Err(LexError::UnclosedString { index: 4 }));
}

#[test]
fn date_literals() {
    assert_eq!(kinds("#2024-01-31 12:30#"),
               vec![Token::Date("2024-01-31 12:30".to_string())]);
    assert_eq!(tokenize("#2024-01-31"), Err(LexError::UnclosedDateLiteral { index: 0 }));
}

#[test]
fn punctuation() {
    assert_eq!(kinds("= ; ( ) + - * / % ^ ! | { } [ ] : , .."),
               vec![Token::Equals,
                    Token::Semicolon,
                    Token::LParen,
                    Token::RParen,
                    Token::Plus,
                    Token::Minus,
                    Token::Star,
                    Token::Slash,
                    Token::Percent,
                    Token::Caret,
                    Token::Bang,
                    Token::Pipe,
                    Token::LBrace,
                    Token::RBrace,
                    Token::LBracket,
                    Token::RBracket,
                    Token::Colon,
                    Token::Comma,
                    Token::DotDot]);
    assert_eq!(kinds("< <= > >= == !="),
               vec![Token::Less,
                    Token::LessEqual,
                    Token::Greater,
                    Token::GreaterEqual,
                    Token::EqualEqual,
                    Token::BangEqual]);
}

#[test]
fn unknown_characters() {
    assert_eq!(tokenize("1 $ 2"), Err(LexError::UnknownToken { index: 2 }));
    assert_eq!(tokenize("a @"), Err(LexError::UnknownToken { index: 2 }));
}
