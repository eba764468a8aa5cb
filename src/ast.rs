use std::fmt;

use crate::interpreter::value::core::Value;

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Operators do not have their own nodes: the parser turns `a + b` into a
/// call of the function `+`, so that every operator goes through the
/// dispatcher. The tree is built once by the parser and never modified.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant: a number, string or date.
    Literal {
        /// The constant value, already simplified.
        value: Value,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
    },
    /// Function or operator call (e.g. `sin(x)`, or `+` for `a + b`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Positional arguments.
        arguments: Vec<Self>,
        /// Keyword arguments (`round(x, places: 2)`), in source order.
        keywords:  Vec<(String, Self)>,
    },
    /// `name = value`.
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Box<Self>,
    },
    /// `;`-separated statements. Evaluates to the value of the last one.
    Statements {
        statements: Vec<Self>,
    },
    /// A magnitude followed by units, such as `5 m/s` written `5 m | s`.
    Quantity {
        /// The magnitude expression.
        magnitude: Box<Self>,
        /// The units written after it.
        units:     UnitSignature,
    },
    /// `expr to units`.
    Conversion {
        /// The value to convert.
        expr:   Box<Self>,
        /// The requested units.
        target: UnitSignature,
    },
    /// Array literal expression, `{a, b, c}`.
    ArrayLiteral {
        /// Elements of the array.
        elements: Vec<Self>,
    },
    /// `{body : x in source, predicate, ...}`.
    Comprehension {
        /// Evaluated once per surviving binding.
        body:       Box<Self>,
        /// Generators, outermost first.
        generators: Vec<Generator>,
        /// Every predicate must hold for a binding to be kept.
        predicates: Vec<Self>,
    },
    /// A chained comparison such as `a < b <= c`.
    ///
    /// Holds one more operand than operators. Single comparisons are plain
    /// calls and never use this node.
    Comparison {
        operands:  Vec<Self>,
        operators: Vec<ComparisonOperator>,
    },
}

impl Expr {
    /// Builds a call with positional arguments only.
    ///
    /// ## Example
    /// ```
    /// use ka::ast::Expr;
    ///
    /// let call = Expr::call("-", vec![Expr::Variable { name: "x".to_string() }]);
    /// assert!(matches!(call, Expr::FunctionCall { ref name, .. } if name == "-"));
    /// ```
    #[must_use]
    pub fn call(name: &str, arguments: Vec<Self>) -> Self {
        Self::FunctionCall { name: name.to_string(),
                             arguments,
                             keywords: Vec::new() }
    }

    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal { value: value.into().simplify() }
    }
}

/// One `name in source` clause of a comprehension.
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    /// The variable bound to each element.
    pub name:   String,
    /// An array or an interval with integer ends.
    pub source: Expr,
}

/// Comparison operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

impl ComparisonOperator {
    /// The name the operator is registered under.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }

    #[must_use]
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Greater | Self::GreaterEqual)
    }

    /// The operator that gives the same answer with the operands swapped.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Less => Self::Greater,
            Self::LessEqual => Self::GreaterEqual,
            Self::Greater => Self::Less,
            Self::GreaterEqual => Self::LessEqual,
            other => other,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Units written after a magnitude or after `to`.
///
/// `kg m^2 | s^2` has `units = [("kg", 1), ("m", 2)]` and
/// `inverted = [("s", 2)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitSignature {
    pub units:    Vec<(String, i32)>,
    /// Units right of `|`, with the exponents as written.
    pub inverted: Vec<(String, i32)>,
}

impl UnitSignature {
    /// Every unit with its effective exponent: inverted units are negated.
    ///
    /// ## Example
    /// ```
    /// use ka::ast::UnitSignature;
    ///
    /// let signature = UnitSignature { units:    vec![("m".to_string(), 1)],
    ///                                 inverted: vec![("s".to_string(), 2)], };
    /// let signed: Vec<_> = signature.signed_units().collect();
    /// assert_eq!(signed, vec![("m", 1), ("s", -2)]);
    /// ```
    pub fn signed_units(&self) -> impl Iterator<Item = (&str, i32)> {
        self.units
            .iter()
            .map(|(name, exponent)| (name.as_str(), *exponent))
            .chain(self.inverted.iter().map(|(name, exponent)| (name.as_str(), -exponent)))
    }
}

fn write_units(f: &mut fmt::Formatter<'_>, units: &[(String, i32)]) -> fmt::Result {
    for (i, (name, exponent)) in units.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        f.write_str(name)?;
        if *exponent != 1 {
            write!(f, "^{exponent}")?;
        }
    }
    Ok(())
}

impl fmt::Display for UnitSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_units(f, &self.units)?;
        if !self.inverted.is_empty() {
            f.write_str("/")?;
            write_units(f, &self.inverted)?;
        }
        Ok(())
    }
}
