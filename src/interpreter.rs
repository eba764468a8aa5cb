use std::sync::Arc;

use crate::{
    ast::Expr,
    error::Error,
    interpreter::{
        dispatch::registry::{Registry, RegistryBuilder},
        evaluator::{core::Context, environment::Environment},
        lexer::tokenize,
        library::{register_standard, standard_functions},
        parser::core::parse,
        units::{registry::UnitRegistry, table::standard_units},
        value::core::Value,
    },
};

/// Function registration and overload resolution.
///
/// Every operator and builtin function is a set of typed overloads. The
/// dispatcher picks the most specific overload for the argument kinds,
/// validates keyword arguments and coerces numbers along the numeric tower.
pub mod dispatch;
/// Walks the tree. Variables come from the [`Environment`] or from
/// comprehension bindings; every call, operator included, goes to the
/// dispatcher; quantity literals and conversions go through the unit
/// registry.
pub mod evaluator;
/// Source text to `(Token, Span)` pairs.
///
/// Number literals are decoded exactly here, so `1e-4` reaches the parser as
/// the fraction `1/10000`.
pub mod lexer;
/// The builtin function library.
///
/// Registers arithmetic, comparisons, quantities, combinatorics, math
/// functions, arrays, intervals, instants and probability distributions.
pub mod library;
/// Recursive descent over the token slice, one function per precedence
/// level.
///
/// Operators, `a..b` and `[lo, hi]` are desugared into calls. Comparison
/// chains are checked and normalised to ascending order here, so the
/// evaluator never sees `a > b > c`.
pub mod parser;
/// Physical units and dimensional analysis.
///
/// Defines quantity vectors over the SI base dimensions, the unit table with
/// prefixes, and quantity values.
pub mod units;
/// Runtime values and the [`value::core::Type`] lattice the dispatcher
/// matches on.
///
/// Numbers live in a tower of Integer, Rational and Float and are always
/// kept in the simplest kind that holds them exactly.
pub mod value;

/// The function and unit tables, shared read-only between evaluations.
///
/// Cloning an interpreter is cheap; clones share the same tables.
#[derive(Debug, Clone)]
pub struct Interpreter {
    functions: Arc<Registry>,
    units:     Arc<UnitRegistry>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter with the standard functions and units.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registries(Arc::new(standard_functions()), Arc::new(standard_units()))
    }

    #[must_use]
    pub const fn with_registries(functions: Arc<Registry>, units: Arc<UnitRegistry>) -> Self {
        Self { functions, units }
    }

    /// The standard functions plus whatever `register` adds.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::{
    ///     Interpreter,
    ///     dispatch::registry::{EvalResult, Keywords, Registry},
    ///     evaluator::environment::Environment,
    ///     value::core::Value,
    /// };
    ///
    /// fn answer(_: &Registry, _: &[Value], _: &Keywords) -> EvalResult<Value> {
    ///     Ok(Value::from(42))
    /// }
    ///
    /// let interpreter = Interpreter::with_extra_functions(|builder| {
    ///     ka::register_functions!(builder, { "answer" () => answer });
    /// });
    /// let result = interpreter.execute("answer() + 1", &mut Environment::new()).unwrap();
    /// assert_eq!(result, Some(Value::from(43)));
    /// ```
    #[must_use]
    pub fn with_extra_functions(register: impl FnOnce(&mut RegistryBuilder)) -> Self {
        let mut builder = RegistryBuilder::new();
        register_standard(&mut builder);
        register(&mut builder);
        Self::with_registries(Arc::new(builder.build()), Arc::new(standard_units()))
    }

    #[must_use]
    pub fn functions(&self) -> &Registry {
        &self.functions
    }

    #[must_use]
    pub fn units(&self) -> &UnitRegistry {
        &self.units
    }

    /// One description per unit, in table order.
    #[must_use]
    pub fn unit_table(&self) -> Vec<String> {
        self.units
            .units()
            .filter_map(|unit| self.units.describe(&unit.symbol))
            .collect()
    }

    /// `symbol (name) = multiplier` for every prefix.
    #[must_use]
    pub fn prefix_table(&self) -> Vec<String> {
        self.units
            .prefixes()
            .map(|prefix| format!("{} ({}) = {}", prefix.symbol, prefix.name, prefix.multiplier))
            .collect()
    }

    /// Every overload as `name(signature)`, sorted by name.
    #[must_use]
    pub fn function_table(&self) -> Vec<String> {
        self.functions
            .names()
            .into_iter()
            .flat_map(|name| {
                self.functions
                    .signatures(name)
                    .into_iter()
                    .map(move |signature| format!("{name}{signature}"))
            })
            .collect()
    }

    /// What `name` means as a unit, a prefixed unit or a function.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::Interpreter;
    ///
    /// let interpreter = Interpreter::new();
    /// assert_eq!(interpreter.describe("km").unwrap(), "km: length = 1000 m");
    /// assert_eq!(interpreter.describe("round").unwrap(), "round(Number; places: Integer)");
    /// assert!(interpreter.describe("sqr").is_none());
    /// ```
    #[must_use]
    pub fn describe(&self, name: &str) -> Option<String> {
        if let Some(line) = self.units.describe(name) {
            return Some(line);
        }
        if let Ok(unit) = self.units.lookup(name) {
            let quantities = self.units.quantity_names(unit.vector).join(", ");
            return Some(format!("{name}: {quantities} = {} {}", unit.multiplier, unit.vector));
        }
        let overloads: Vec<String> = self.functions
                                         .signatures(name)
                                         .into_iter()
                                         .map(|signature| format!("{name}{signature}"))
                                         .collect();
        (!overloads.is_empty()).then(|| overloads.join("\n"))
    }

    /// Tokenizes and parses `source` without evaluating it.
    pub fn parse(&self, source: &str) -> Result<Expr, Error> {
        let tokens = tokenize(source)?;
        Ok(parse(&tokens, source)?)
    }

    /// Runs `source` against `env`.
    ///
    /// Returns the value of the last statement, or `None` for empty input.
    /// Assignments are kept in `env` even when a later statement fails.
    ///
    /// # Errors
    /// Lexing, parsing and runtime errors, and [`Error::Signal`] when the
    /// script calls `quit()`.
    pub fn execute(&self, source: &str, env: &mut Environment) -> Result<Option<Value>, Error> {
        let program = self.parse(source)?;
        let mut context = Context::new(env, &self.functions, &self.units);
        Ok(context.eval_program(&program)?)
    }
}
