use num::ToPrimitive;

use crate::{
    ast::UnitSignature,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, utils::TokenCursor},
        value::number::Number,
    },
};

/// An identifier that starts a unit rather than a call or a keyword
/// argument.
fn at_unit(cursor: &TokenCursor) -> bool {
    matches!(cursor.peek(), Some(Token::Identifier(_)))
    && !matches!(cursor.peek_nth(1), Some(Token::LParen | Token::Colon | Token::Equals))
}

/// Parses `^ <signed integer literal>` after a unit name, if present.
fn parse_unit_exponent(cursor: &mut TokenCursor) -> ParseResult<i32> {
    if !cursor.eat(&Token::Caret) {
        return Ok(1);
    }
    let index = cursor.index();
    let negative = if cursor.eat(&Token::Minus) {
        true
    } else {
        cursor.eat(&Token::Plus);
        false
    };
    let Some(Token::Number(Number::Integer(n))) = cursor.peek() else {
        return Err(ParseError::NonIntegerUnitExponent { index });
    };
    cursor.next();
    let exponent = n.to_i32().ok_or(ParseError::NonIntegerUnitExponent { index })?;
    Ok(if negative { -exponent } else { exponent })
}

/// Parses `name ("^" exponent)?` repeatedly.
fn parse_unit_list(cursor: &mut TokenCursor) -> ParseResult<Vec<(String, i32)>> {
    let mut units = Vec::new();
    while at_unit(cursor) {
        let Some(Token::Identifier(name)) = cursor.next() else {
            break;
        };
        units.push((name.clone(), parse_unit_exponent(cursor)?));
    }
    Ok(units)
}

/// Parses the units written directly after a term, if any.
///
/// The rule is: `unit_suffix := unit+ ("|" unit+)?`
/// where `unit := identifier ("^" signed_integer)?`.
///
/// # Errors
/// - `NonIntegerUnitExponent` for exponents such as `m^1.5`.
/// - `MissingUnitAfterDivide` when `|` is not followed by a unit.
pub fn parse_unit_suffix(cursor: &mut TokenCursor) -> ParseResult<Option<UnitSignature>> {
    let units = parse_unit_list(cursor)?;
    if units.is_empty() {
        return Ok(None);
    }

    let mut inverted = Vec::new();
    let pipe = cursor.index();
    if cursor.eat(&Token::Pipe) {
        inverted = parse_unit_list(cursor)?;
        if inverted.is_empty() {
            return Err(ParseError::MissingUnitAfterDivide { index: pipe });
        }
    }
    Ok(Some(UnitSignature { units, inverted }))
}

/// Parses the target of `to`, which must name at least one unit.
pub fn parse_unit_signature(cursor: &mut TokenCursor) -> ParseResult<UnitSignature> {
    match parse_unit_suffix(cursor)? {
        Some(signature) => Ok(signature),
        None => Err(cursor.unexpected()),
    }
}
