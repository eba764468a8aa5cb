use crate::{
    ast::{Expr, Generator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            units::parse_unit_suffix,
            utils::TokenCursor,
        },
        value::{core::Value, instant::Instant},
    },
};

/// Parses a term.
///
/// A term is a sign, an unsigned term and its postfixes. The sign applies to
/// the factorial but not to the unit, so `-40 degC` is forty degrees below
/// zero rather than the negation of `40 degC`.
///
/// Grammar:
/// ```text
///     term := ("+" | "-")? unsigned_term "!"? unit_suffix? (".." term)?
/// ```
///
/// `a..b` is sugar for `range(a, b)`.
pub fn parse_term(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let sign = match cursor.peek() {
        Some(Token::Minus) => Some("-"),
        Some(Token::Plus) => Some("+"),
        _ => None,
    };
    if sign.is_some() {
        cursor.next();
    }

    let mut term = parse_unsigned_term(cursor)?;
    if cursor.eat(&Token::Bang) {
        term = Expr::call("!", vec![term]);
    }
    if let Some(sign) = sign {
        term = Expr::call(sign, vec![term]);
    }
    if let Some(units) = parse_unit_suffix(cursor)? {
        term = Expr::Quantity { magnitude: Box::new(term),
                                units };
    }

    if cursor.eat(&Token::DotDot) {
        let end = parse_term(cursor)?;
        term = Expr::call("range", vec![term, end]);
    }
    Ok(term)
}

/// Parses a term without sign or postfixes.
///
/// Grammar:
/// ```text
///     unsigned_term := string | date | array | "[" expression "," expression "]"
///                    | "(" expression ")" | number | identifier "(" arguments ")"
///                    | identifier
/// ```
///
/// # Errors
/// - `UnexpectedToken` / `UnexpectedEndOfInput` when no term starts here.
/// - `ExpectedClosing` for unbalanced brackets.
/// - `Other` for date literals that are not valid dates.
pub fn parse_unsigned_term(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let index = cursor.index();
    let Some(token) = cursor.peek() else {
        return Err(cursor.unexpected());
    };

    match token {
        Token::Number(n) => {
            cursor.next();
            Ok(Expr::literal(n.clone()))
        },
        Token::String(text) => {
            cursor.next();
            Ok(Expr::literal(text.as_str()))
        },
        Token::Date(text) => {
            cursor.next();
            let instant = Instant::parse(text).map_err(|e| ParseError::Other { message: e.to_string(),
                                                                                 index })?;
            Ok(Expr::literal(Value::Instant(instant)))
        },
        Token::LBrace => {
            cursor.next();
            parse_array(cursor)
        },
        Token::LBracket => {
            cursor.next();
            let lo = parse_expression(cursor)?;
            if !cursor.eat(&Token::Comma) {
                return Err(cursor.unexpected());
            }
            let hi = parse_expression(cursor)?;
            cursor.expect_closing(&Token::RBracket, "]")?;
            Ok(Expr::call("interval", vec![lo, hi]))
        },
        Token::LParen => {
            cursor.next();
            let inner = parse_expression(cursor)?;
            cursor.expect_closing(&Token::RParen, ")")?;
            Ok(inner)
        },
        Token::Identifier(name) => {
            cursor.next();
            if cursor.eat(&Token::LParen) {
                let (arguments, keywords) = parse_arguments(cursor)?;
                return Ok(Expr::FunctionCall { name: name.clone(),
                                               arguments,
                                               keywords });
            }
            Ok(Expr::Variable { name: name.clone() })
        },
        _ => Err(cursor.unexpected()),
    }
}

/// `identifier ":"` starts a keyword argument.
fn at_keyword(cursor: &TokenCursor) -> bool {
    matches!(cursor.peek(), Some(Token::Identifier(_))) && cursor.peek_nth(1) == Some(&Token::Colon)
}

type Arguments = (Vec<Expr>, Vec<(String, Expr)>);

/// Parses call arguments up to and including the closing `)`.
///
/// Grammar: `arguments := (argument ("," argument)*)?` where
/// `argument := identifier ":" expression | expression`.
///
/// # Errors
/// `PositionalAfterKeyword` when a positional argument follows a keyword
/// argument.
fn parse_arguments(cursor: &mut TokenCursor) -> ParseResult<Arguments> {
    let mut arguments = Vec::new();
    let mut keywords = Vec::new();
    if cursor.eat(&Token::RParen) {
        return Ok((arguments, keywords));
    }

    loop {
        if at_keyword(cursor) {
            if let Some(Token::Identifier(name)) = cursor.next() {
                cursor.next();
                keywords.push((name.clone(), parse_expression(cursor)?));
            }
        } else {
            if !keywords.is_empty() {
                return Err(ParseError::PositionalAfterKeyword { index: cursor.index() });
            }
            arguments.push(parse_expression(cursor)?);
        }

        if cursor.eat(&Token::Comma) {
            continue;
        }
        cursor.expect_closing(&Token::RParen, ")")?;
        return Ok((arguments, keywords));
    }
}

/// Parses an array literal or a comprehension after its `{`.
///
/// Grammar:
/// ```text
///     array := "{" (expression ("," expression)*)? "}"
///            | "{" expression ":" clause ("," clause)* "}"
///     clause := identifier "in" expression | expression
/// ```
///
/// A clause of the form `x in source` is a generator; any other clause is a
/// predicate.
fn parse_array(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    if cursor.eat(&Token::RBrace) {
        return Ok(Expr::ArrayLiteral { elements: Vec::new() });
    }

    let first = parse_expression(cursor)?;
    if cursor.eat(&Token::Colon) {
        return parse_comprehension(cursor, first);
    }

    let mut elements = vec![first];
    while cursor.eat(&Token::Comma) {
        elements.push(parse_expression(cursor)?);
    }
    cursor.expect_closing(&Token::RBrace, "}")?;
    Ok(Expr::ArrayLiteral { elements })
}

fn parse_comprehension(cursor: &mut TokenCursor, body: Expr) -> ParseResult<Expr> {
    let mut generators = Vec::new();
    let mut predicates = Vec::new();

    loop {
        if let Some(Token::Identifier(name)) = cursor.peek()
           && cursor.peek_nth(1) == Some(&Token::In)
        {
            cursor.next();
            cursor.next();
            generators.push(Generator { name:   name.clone(),
                                        source: parse_expression(cursor)?, });
        } else {
            predicates.push(parse_expression(cursor)?);
        }

        if !cursor.eat(&Token::Comma) {
            break;
        }
    }
    cursor.expect_closing(&Token::RBrace, "}")?;

    Ok(Expr::Comprehension { body: Box::new(body),
                             generators,
                             predicates })
}
