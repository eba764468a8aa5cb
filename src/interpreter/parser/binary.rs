use crate::{
    ast::{ComparisonOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_term, utils::TokenCursor},
    },
};

const fn comparison_operator(token: Option<&Token>) -> Option<ComparisonOperator> {
    match token {
        Some(Token::Less) => Some(ComparisonOperator::Less),
        Some(Token::LessEqual) => Some(ComparisonOperator::LessEqual),
        Some(Token::Greater) => Some(ComparisonOperator::Greater),
        Some(Token::GreaterEqual) => Some(ComparisonOperator::GreaterEqual),
        Some(Token::EqualEqual) => Some(ComparisonOperator::Equal),
        Some(Token::BangEqual) => Some(ComparisonOperator::NotEqual),
        _ => None,
    }
}

/// Parses a comparison, possibly chained.
///
/// The rule is: `comparison := sum (comparison_operator sum){0,2}`
///
/// A single comparison becomes a call to the operator. A chain of two
/// becomes an [`Expr::Comparison`]; chains of `>`/`>=` are rewritten into
/// `<`/`<=` chains by reversing the operands.
///
/// # Errors
/// - `TooManyComparisons` for a third operator.
/// - `ChainedEquality` when `==` or `!=` is part of a chain.
/// - `MixedComparisonDirections` for chains such as `a < b > c`.
pub fn parse_comparison(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let mut operands = vec![parse_sum(cursor)?];
    let mut operators: Vec<ComparisonOperator> = Vec::new();
    let mut positions = Vec::new();

    while let Some(op) = comparison_operator(cursor.peek()) {
        let index = cursor.index();
        if operators.len() == 2 {
            return Err(ParseError::TooManyComparisons { index });
        }
        cursor.next();
        operators.push(op);
        positions.push(index);
        operands.push(parse_sum(cursor)?);
    }

    match *operators.as_slice() {
        [] => Ok(operands.remove(0)),
        [op] => Ok(Expr::call(op.symbol(), operands)),
        [first, second] => {
            if let Some(i) = operators.iter().position(|op| op.is_equality()) {
                return Err(ParseError::ChainedEquality { index: positions[i] });
            }
            if first.is_descending() != second.is_descending() {
                return Err(ParseError::MixedComparisonDirections { index: positions[1] });
            }
            let operators = if first.is_descending() {
                operands.reverse();
                vec![second.reversed(), first.reversed()]
            } else {
                vec![first, second]
            };
            Ok(Expr::Comparison { operands,
                                  operators })
        },
        _ => Err(ParseError::TooManyComparisons { index: cursor.index() }),
    }
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `sum := product (("+" | "-") product)*`
pub fn parse_sum(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let mut left = parse_product(cursor)?;
    loop {
        let op = match cursor.peek() {
            Some(Token::Plus) => "+",
            Some(Token::Minus) => "-",
            _ => break,
        };
        cursor.next();
        let right = parse_product(cursor)?;
        left = Expr::call(op, vec![left, right]);
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// The rule is: `product := factor (("*" | "/" | "%") factor)*`
pub fn parse_product(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let mut left = parse_factor(cursor)?;
    loop {
        let op = match cursor.peek() {
            Some(Token::Star) => "*",
            Some(Token::Slash) => "/",
            Some(Token::Percent) => "%",
            _ => break,
        };
        cursor.next();
        let right = parse_factor(cursor)?;
        left = Expr::call(op, vec![left, right]);
    }
    Ok(left)
}

/// Parses exponentiation. Unlike most languages, `^` is left-associative
/// here: `2^3^2` is `(2^3)^2`.
///
/// The rule is: `factor := term ("^" term)*`
pub fn parse_factor(cursor: &mut TokenCursor) -> ParseResult<Expr> {
    let mut left = parse_term(cursor)?;
    while cursor.eat(&Token::Caret) {
        let right = parse_term(cursor)?;
        left = Expr::call("^", vec![left, right]);
    }
    Ok(left)
}
