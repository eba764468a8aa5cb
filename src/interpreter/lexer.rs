use std::ops::Range;

use logos::Logos;
use num::{BigInt, BigRational, Num, Zero};
use tracing::trace;

use crate::{error::LexError, interpreter::value::number::Number};

/// Byte range of a token in the source.
pub type Span = Range<usize>;

/// Why a token callback rejected its slice.
///
/// Converted into a [`LexError`] with the token's position by [`tokenize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LexFailure {
    #[default]
    UnknownToken,
    BadNumber,
    UnclosedString,
    UnclosedDateLiteral,
}

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexFailure)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14`, `.5`, `1e-4` or `0x1f`.
    ///
    /// `0b`, `0o` and `0d` only start a based literal when a digit follows,
    /// so `0days` is zero days. Once started, the whole alphanumeric run
    /// belongs to the literal and a digit outside the base is `BadNumber`.
    #[regex(r"[0-9]+", parse_decimal)]
    #[regex(r"[0-9]+\.[0-9]*", parse_decimal)]
    #[regex(r"\.[0-9]+", parse_decimal)]
    #[regex(r"[0-9]+(\.[0-9]*)?[eE][+-]?[0-9]+", parse_decimal)]
    #[regex(r"\.[0-9]+[eE][+-]?[0-9]+", parse_decimal)]
    #[regex(r"0[bod][0-9][0-9a-zA-Z]*", parse_based)]
    #[regex(r"0x[0-9a-zA-Z]+", parse_based)]
    Number(Number),
    /// An integer directly followed by `..`, as in `1..5`. Split into a
    /// number and [`Token::DotDot`] by [`tokenize`]; never reaches the parser.
    #[regex(r"[0-9]+\.\.", parse_range_start)]
    NumberBeforeRange(Number),
    /// Identifier tokens; variable, function or unit names such as `x`,
    /// `sqrt` or `km`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `"text"`, with escapes already decoded.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string, allow_greedy = true)]
    #[regex(r#""([^"\\]|\\.)*"#, unclosed_string, allow_greedy = true)]
    String(String),
    /// `#2024-01-31#`, holding the text between the markers.
    #[regex(r"#[^#]*#", |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    }, allow_greedy = true)]
    #[regex(r"#[^#]*", unclosed_date, allow_greedy = true)]
    Date(String),
    /// `to`
    #[token("to")]
    To,
    /// `in`
    #[token("in")]
    In,
    /// `..`
    #[token("..")]
    DotDot,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `=`
    #[token("=")]
    Equals,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `|`
    #[token("|")]
    Pipe,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
}

/// Splits `source` into tokens with their byte spans.
///
/// # Errors
/// The first [`LexError`] encountered, positioned at the start of the
/// offending token.
///
/// # Example
/// ```
/// use ka::interpreter::{lexer::{Token, tokenize}, value::number::Number};
///
/// let tokens = tokenize("1..5").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
/// assert_eq!(kinds, vec![Token::Number(Number::from(1)), Token::DotDot, Token::Number(Number::from(5))]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, LexError> {
    let mut tokens = Vec::new();
    lex_into(source, 0, &mut tokens)?;
    trace!(count = tokens.len(), "tokenized");
    Ok(tokens)
}

/// Lexes `source`, which starts `offset` bytes into the whole input, onto the
/// end of `tokens`.
fn lex_into(source: &str, offset: usize, tokens: &mut Vec<(Token, Span)>) -> Result<(), LexError> {
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let span = lexer.span().start + offset..lexer.span().end + offset;
        match token {
            Ok(Token::NumberBeforeRange(n)) => {
                let split = span.end - 2;
                tokens.push((Token::Number(n), span.start..split));
                tokens.push((Token::DotDot, split..span.end));
            },
            Ok(Token::Identifier(name)) => match leading_keyword(&name) {
                Some(keyword) => {
                    let split = span.start + 2;
                    tokens.push((keyword, span.start..split));
                    lex_into(&name[2..], split, tokens)?;
                },
                None => tokens.push((Token::Identifier(name), span)),
            },
            Ok(token) => tokens.push((token, span)),
            Err(failure) => {
                let index = span.start;
                return Err(match failure {
                               LexFailure::UnknownToken => LexError::UnknownToken { index },
                               LexFailure::BadNumber => LexError::BadNumber { index },
                               LexFailure::UnclosedString => LexError::UnclosedString { index },
                               LexFailure::UnclosedDateLiteral => LexError::UnclosedDateLiteral { index },
                           });
            },
        }
    }
    Ok(())
}

/// `to` or `in` at the front of an identifier when a digit follows it, as in
/// `to5`. A following letter or `_` keeps the whole word an identifier.
fn leading_keyword(name: &str) -> Option<Token> {
    let rest = name.get(2..)?;
    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    match name.get(..2)? {
        "to" => Some(Token::To),
        "in" => Some(Token::In),
        _ => None,
    }
}

/// `10^exponent` as an exact number.
fn power_of_ten(exponent: i64) -> Result<Number, LexFailure> {
    let magnitude = u32::try_from(exponent.unsigned_abs()).map_err(|_| LexFailure::BadNumber)?;
    let power = BigInt::from(10).pow(magnitude);
    Ok(if exponent < 0 {
           Number::Rational(BigRational::new(BigInt::from(1), power))
       } else {
           Number::Integer(power)
       })
}

/// Parses a decimal literal.
///
/// A literal without a decimal point is exact: its exponent multiplies by a
/// power of ten, so `100e-2` is `1` and `1e-4` is `1/10000`. A literal with
/// a decimal point is a float.
fn parse_decimal(lex: &logos::Lexer<Token>) -> Result<Number, LexFailure> {
    let slice = lex.slice();
    if slice.contains('.') {
        let value: f64 = slice.parse().map_err(|_| LexFailure::BadNumber)?;
        return Number::float(value).map(Number::simplify)
                                   .map_err(|_| LexFailure::BadNumber);
    }

    let (mantissa, exponent) = match slice.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().map_err(|_| LexFailure::BadNumber)?),
        None => (slice, 0),
    };
    let mantissa: BigInt = mantissa.parse().map_err(|_| LexFailure::BadNumber)?;
    if exponent == 0 || mantissa.is_zero() {
        return Ok(Number::Integer(mantissa));
    }
    Number::Integer(mantissa).mul(&power_of_ten(exponent)?)
                             .map(Number::simplify)
                             .map_err(|_| LexFailure::BadNumber)
}

/// Parses `0b`, `0o`, `0x` and `0d` literals.
fn parse_based(lex: &logos::Lexer<Token>) -> Result<Number, LexFailure> {
    let slice = lex.slice();
    let radix = match &slice[..2] {
        "0b" => 2,
        "0o" => 8,
        "0x" => 16,
        _ => 10,
    };
    BigInt::from_str_radix(&slice[2..], radix).map(Number::Integer)
                                              .map_err(|_| LexFailure::BadNumber)
}

fn parse_range_start(lex: &logos::Lexer<Token>) -> Result<Number, LexFailure> {
    let slice = lex.slice();
    slice[..slice.len() - 2].parse::<BigInt>()
                            .map(Number::Integer)
                            .map_err(|_| LexFailure::BadNumber)
}

/// Strips the quotes and decodes `\"`, `\\`, `\n` and `\t`. Any other
/// escaped character stands for itself.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let mut decoded = String::with_capacity(slice.len());
    let mut chars = slice[1..slice.len() - 1].chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('t') => decoded.push('\t'),
            Some(other) => decoded.push(other),
            None => {},
        }
    }
    decoded
}

fn unclosed_string(_: &logos::Lexer<Token>) -> Result<String, LexFailure> {
    Err(LexFailure::UnclosedString)
}

fn unclosed_date(_: &logos::Lexer<Token>) -> Result<String, LexFailure> {
    Err(LexFailure::UnclosedDateLiteral)
}
