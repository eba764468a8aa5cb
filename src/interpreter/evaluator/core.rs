use crate::{
    ast::{ComparisonOperator, Expr, UnitSignature},
    error::RuntimeError,
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, Registry},
        evaluator::environment::Environment,
        library::quantity::{convert, make_quantity},
        units::registry::UnitRegistry,
        value::{core::Value, number::Number},
    },
};

/// Stores the runtime evaluation context.
///
/// Holds the caller's variables, the registries every call goes through and
/// the variables bound by enclosing comprehensions.
///
/// ## Usage
///
/// A `Context` lives for a single [`execute`](crate::execute) call.
/// Comprehension bindings shadow environment variables and are never written
/// to the environment.
pub struct Context<'a> {
    pub env:       &'a mut Environment,
    pub functions: &'a Registry,
    pub units:     &'a UnitRegistry,
    /// Innermost binding last.
    pub(super) bindings: Vec<(String, Value)>,
}

impl<'a> Context<'a> {
    #[must_use]
    pub const fn new(env: &'a mut Environment, functions: &'a Registry, units: &'a UnitRegistry) -> Self {
        Self { env,
               functions,
               units,
               bindings: Vec::new() }
    }

    /// Evaluates a whole program.
    ///
    /// Returns the value of the last statement, or `None` for an empty
    /// program.
    ///
    /// # Example
    /// ```
    /// use ka::{
    ///     interpreter::{
    ///         evaluator::{core::Context, environment::Environment},
    ///         lexer::tokenize,
    ///         library::standard_functions,
    ///         parser::core::parse,
    ///         units::table::standard_units,
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let (functions, units) = (standard_functions(), standard_units());
    /// let mut env = Environment::new();
    /// let source = "x = 3; 5 * x";
    /// let program = parse(&tokenize(source).unwrap(), source).unwrap();
    ///
    /// let mut context = Context::new(&mut env, &functions, &units);
    /// assert_eq!(context.eval_program(&program).unwrap(), Some(Value::from(15)));
    /// assert_eq!(env.get("x"), Some(&Value::from(3)));
    /// ```
    pub fn eval_program(&mut self, program: &Expr) -> EvalResult<Option<Value>> {
        match program {
            Expr::Statements { statements } => {
                let mut last = None;
                for statement in statements {
                    last = Some(self.eval(statement)?);
                }
                Ok(last)
            },
            other => self.eval(other).map(Some),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Every
    /// operator reaches the dispatcher as a function call.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value } => Ok(value.clone()),
            Expr::Variable { name } => self.eval_variable(name),
            Expr::FunctionCall { name,
                                 arguments,
                                 keywords, } => self.eval_function_call(name, arguments, keywords),
            Expr::Assignment { name, value } => {
                let value = self.eval(value)?;
                self.env.set(name, value.clone());
                Ok(value)
            },
            Expr::Statements { statements } => {
                let mut last = None;
                for statement in statements {
                    last = Some(self.eval(statement)?);
                }
                last.ok_or_else(|| RuntimeError::InvalidArgument { details: "an empty program has no value".to_string() }.into())
            },
            Expr::Quantity { magnitude, units } => self.eval_quantity(magnitude, units),
            Expr::Conversion { expr, target } => {
                let value = self.eval(expr)?;
                let composition = self.units.compose(target)?;
                convert(self.functions, &value, &composition)
            },
            Expr::ArrayLiteral { elements } => {
                let values = elements.iter()
                                     .map(|element| self.eval(element))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
            Expr::Comprehension { body,
                                  generators,
                                  predicates, } => {
                let mut results = Vec::new();
                self.comprehend(body, generators, predicates, &mut results)?;
                Ok(Value::from(results))
            },
            Expr::Comparison { operands, operators } => self.eval_chain(operands, operators),
        }
    }

    /// Looks a variable up, innermost comprehension binding first.
    fn eval_variable(&self, name: &str) -> EvalResult<Value> {
        if let Some((_, value)) = self.bindings.iter().rev().find(|(bound, _)| bound == name) {
            return Ok(value.clone());
        }
        self.env
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnassignedVariable { name: name.to_string() }.into())
    }

    fn eval_function_call(&mut self, name: &str, arguments: &[Expr], keywords: &[(String, Expr)]) -> EvalResult<Value> {
        let args = arguments.iter()
                            .map(|argument| self.eval(argument))
                            .collect::<EvalResult<Vec<_>>>()?;
        let mut evaluated = Keywords::new();
        for (keyword, value) in keywords {
            evaluated.push(keyword.clone(), self.eval(value)?);
        }
        self.functions.dispatch(name, &args, &evaluated)
    }

    /// Builds a quantity from a magnitude and the units written after it.
    ///
    /// Numbers are scaled into base units. Anything else, such as an array,
    /// is multiplied by one of the unit.
    fn eval_quantity(&mut self, magnitude: &Expr, units: &UnitSignature) -> EvalResult<Value> {
        let magnitude = self.eval(magnitude)?;
        let composition = self.units.compose(units)?;
        match magnitude {
            Value::Number(_) | Value::Combinatoric(_) => make_quantity(self.functions, magnitude.as_number()?, &composition),
            other => {
                if !composition.offset.is_zero() {
                    return Err(RuntimeError::IncompatibleOffsetUnit { unit: composition.label }.into());
                }
                let unit = make_quantity(self.functions, Number::one(), &composition)?;
                self.functions.call("*", &[other, unit])
            },
        }
    }

    /// `a < b <= c` holds when every adjacent pair does. Operands are
    /// evaluated once, left to right, and evaluation stops at the first
    /// comparison that fails.
    fn eval_chain(&mut self, operands: &[Expr], operators: &[ComparisonOperator]) -> EvalResult<Value> {
        let Some(first) = operands.first() else {
            return Ok(Value::Bool(true));
        };
        let mut left = self.eval(first)?;
        for (operator, operand) in operators.iter().zip(&operands[1..]) {
            let right = self.eval(operand)?;
            if !self.functions
                    .call(operator.symbol(), &[left, right.clone()])?
                    .as_bool()?
            {
                return Ok(Value::Bool(false));
            }
            left = right;
        }
        Ok(Value::Bool(true))
    }
}
