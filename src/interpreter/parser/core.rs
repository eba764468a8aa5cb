use tracing::trace;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::{binary::parse_comparison, units::parse_unit_signature, utils::TokenCursor},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// Grammar: `program := (statement (";" statement)*)?`
///
/// Empty input is an empty `Statements` node. A program with a single
/// statement is returned as that statement.
///
/// # Parameters
/// - `tokens`: The output of [`tokenize`](crate::interpreter::lexer::tokenize).
/// - `source`: The text the tokens came from, for error messages.
///
/// # Errors
/// - `EmptyStatement` for `;;` or a trailing `;`.
/// - `UnexpectedToken` if a statement is followed by anything but `;`.
/// - Any error from the statements themselves.
///
/// # Example
/// ```
/// use ka::{ast::Expr, interpreter::{lexer::tokenize, parser::core::parse}};
///
/// let tokens = tokenize("x = 3; 5 * x").unwrap();
/// let Expr::Statements { statements } = parse(&tokens, "x = 3; 5 * x").unwrap() else {
///     panic!("expected statements");
/// };
/// assert_eq!(statements.len(), 2);
/// assert!(parse(&tokenize("1;").unwrap(), "1;").is_err());
/// ```
pub fn parse(tokens: &[(Token, Span)], source: &str) -> ParseResult<Expr> {
    trace!(tokens = tokens.len(), "parsing");
    let mut cursor = TokenCursor::new(tokens, source);
    let mut statements = Vec::new();

    while !cursor.is_at_end() {
        if cursor.peek() == Some(&Token::Semicolon) {
            return Err(ParseError::EmptyStatement { index: cursor.index() });
        }
        statements.push(parse_statement(&mut cursor)?);

        let separator = cursor.index();
        if cursor.eat(&Token::Semicolon) {
            if cursor.is_at_end() {
                return Err(ParseError::EmptyStatement { index: separator });
            }
        } else if !cursor.is_at_end() {
            return Err(cursor.unexpected());
        }
    }

    if statements.len() == 1 {
        return Ok(statements.remove(0));
    }
    Ok(Expr::Statements { statements })
}

/// Parses an assignment or an expression.
///
/// Grammar: `statement := identifier "=" expression | expression`
pub fn parse_statement(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    if let Some(Token::Identifier(name)) = cursor.peek()
       && cursor.peek_nth(1) == Some(&Token::Equals)
    {
        cursor.next();
        cursor.next();
        let value = parse_expression(cursor)?;
        return Ok(Expr::Assignment { name:  name.clone(),
                                     value: Box::new(value), });
    }
    parse_expression(cursor)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, comparison, and accepts a trailing conversion.
///
/// Grammar: `expression := comparison ("to" unit_signature)?`
pub fn parse_expression(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let expr = parse_comparison(cursor)?;
    if cursor.eat(&Token::To) {
        let target = parse_unit_signature(cursor)?;
        return Ok(Expr::Conversion { expr: Box::new(expr),
                                     target });
    }
    Ok(expr)
}
