use crate::{
    ast::{Expr, Generator},
    error::RuntimeError,
    interpreter::{
        dispatch::registry::EvalResult,
        evaluator::core::Context,
        value::core::Value,
    },
};

/// The values a generator walks over: array elements, or the integers of an
/// interval.
fn elements(source: Value) -> Result<Vec<Value>, RuntimeError> {
    match source {
        Value::Array(items) => Ok(items.as_ref().clone()),
        Value::Interval(interval) => Ok(interval.integers()?.into_iter().map(Value::Number).collect()),
        other => Err(RuntimeError::NotIterable { got: other.kind() }),
    }
}

impl Context<'_> {
    /// Evaluates `{body : generators, predicates}`.
    ///
    /// Generators nest left to right, so the last one varies fastest. For
    /// every complete binding whose predicates all hold, `body` is evaluated
    /// and appended to `results`.
    ///
    /// # Errors
    /// - `NotIterable` when a generator source is neither an array nor an
    ///   interval.
    /// - `ExpectedBoolean` when a predicate is not a comparison.
    ///
    /// # Example
    /// ```
    /// use ka::{execute_default, interpreter::value::core::Value};
    ///
    /// let kept = execute_default("{x : x in [1, 3], x <= 2}").unwrap().unwrap();
    /// assert_eq!(kept, Value::from(vec![Value::from(1), Value::from(2)]));
    /// ```
    pub fn comprehend(&mut self,
                      body: &Expr,
                      generators: &[Generator],
                      predicates: &[Expr],
                      results: &mut Vec<Value>)
                      -> EvalResult<()> {
        let Some((generator, rest)) = generators.split_first() else {
            for predicate in predicates {
                if !self.eval(predicate)?.as_bool()? {
                    return Ok(());
                }
            }
            results.push(self.eval(body)?);
            return Ok(());
        };

        let source = self.eval(&generator.source)?;
        for element in elements(source)? {
            self.bindings.push((generator.name.clone(), element));
            let outcome = self.comprehend(body, rest, predicates, results);
            self.bindings.pop();
            outcome?;
        }
        Ok(())
    }
}
