use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        dispatch::registry::{EvalResult, FunctionHeader, Keywords, Registry, Signature},
        value::{
            core::{Type, Value},
            number::Number,
        },
    },
};

/// Returns `true` when `signature` accepts arguments of these kinds.
fn accepts(signature: &Signature, kinds: &[Type]) -> bool {
    if kinds.len() < signature.positional.len() {
        return false;
    }
    if kinds.len() > signature.positional.len() && signature.vararg.is_none() {
        return false;
    }
    kinds.iter()
         .enumerate()
         .all(|(i, kind)| signature.parameter(i).is_some_and(|declared| kind.is_subtype_of(declared)))
}

/// `a` is at least as specific as `b` for a call with `arity` arguments.
fn at_least_as_specific(a: &Signature, b: &Signature, arity: usize) -> bool {
    (0..arity).all(|i| match (a.parameter(i), b.parameter(i)) {
                  (Some(x), Some(y)) => x.is_subtype_of(y),
                  _ => false,
              })
}

/// Picks the most specific header; ties go to the earliest registered.
fn most_specific<'a>(candidates: &[&'a FunctionHeader], arity: usize) -> Option<&'a FunctionHeader> {
    let mut best = *candidates.first()?;
    for &candidate in &candidates[1..] {
        if at_least_as_specific(&candidate.signature, &best.signature, arity)
           && !at_least_as_specific(&best.signature, &candidate.signature, arity)
        {
            best = candidate;
        }
    }
    Some(best)
}

/// Converts `value` to the declared kind where a lossless coercion exists.
///
/// Integers widen to fractions or floats, fractions widen to floats, and
/// combinatorics resolve when a plain number is expected.
fn coerce(value: &Value, declared: Type) -> Result<Value, RuntimeError> {
    match (value, declared) {
        (Value::Number(Number::Integer(i)), Type::Rational) => {
            Ok(Value::Number(Number::Rational(num::BigRational::from_integer(i.clone()))))
        },
        (Value::Number(n @ (Number::Integer(_) | Number::Rational(_))), Type::Float) => {
            Ok(Value::Number(Number::Float(n.to_f64()?)))
        },
        (Value::Combinatoric(c), Type::Number) => Ok(Value::Number(c.resolve())),
        _ => Ok(value.clone()),
    }
}

impl Registry {
    /// Calls `name` with the given arguments, choosing the best overload.
    ///
    /// 1. Look up the overloads registered under `name`.
    /// 2. Keep those whose arity matches and whose declared kinds accept
    ///    every argument; a trailing vararg absorbs extra arguments.
    /// 3. Pick the most specific survivor.
    /// 4. Validate keyword arguments against it.
    /// 5. Coerce every argument to its declared kind.
    /// 6. Invoke it and simplify the result.
    ///
    /// # Errors
    /// - `UnknownFunction` when nothing is registered under `name`.
    /// - `NoMatchingSignature` when no overload accepts the arguments.
    /// - `UnknownKeyword` / `BadKeywordType` for bad keyword arguments.
    /// - Whatever the implementation returns.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::{
    ///     dispatch::registry::Keywords,
    ///     library::standard_functions,
    ///     value::{core::Value, number::Number},
    /// };
    ///
    /// let registry = standard_functions();
    /// let sum = registry.dispatch("+", &[Value::from(1), Value::from(2)], &Keywords::new())
    ///                   .unwrap();
    /// assert_eq!(sum, Value::from(3));
    /// ```
    pub fn dispatch(&self, name: &str, args: &[Value], keywords: &Keywords) -> EvalResult<Value> {
        let headers = self.headers(name)
                          .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string() })?;

        let kinds: Vec<Type> = args.iter().map(Value::kind).collect();
        let candidates: Vec<&FunctionHeader> = headers.iter()
                                                      .filter(|header| accepts(&header.signature, &kinds))
                                                      .collect();

        let Some(header) = most_specific(&candidates, args.len()) else {
            return Err(RuntimeError::NoMatchingSignature { name:      name.to_string(),
                                                           arguments: kinds,
                                                           known:     self.signatures(name), }.into());
        };

        debug!(function = name, candidates = candidates.len(), chosen = %header.signature, "dispatch");

        let mut checked = keywords.clone();
        for (keyword, value) in checked.iter_mut() {
            let Some(expected) = header.signature.keyword_type(keyword) else {
                return Err(RuntimeError::UnknownKeyword { name:    name.to_string(),
                                                          keyword: keyword.clone(), }.into());
            };
            if !value.kind().is_subtype_of(expected) {
                return Err(RuntimeError::BadKeywordType { name: name.to_string(),
                                                          keyword: keyword.clone(),
                                                          got: value.kind(),
                                                          expected }.into());
            }
            *value = coerce(value, expected)?;
        }

        let coerced = args.iter()
                          .enumerate()
                          .map(|(i, value)| match header.signature.parameter(i) {
                              Some(declared) => coerce(value, declared),
                              None => Ok(value.clone()),
                          })
                          .collect::<Result<Vec<_>, _>>()?;

        Ok((header.implementation)(self, &coerced, &checked)?.simplify())
    }

    /// [`dispatch`](Self::dispatch) without keyword arguments.
    pub fn call(&self, name: &str, args: &[Value]) -> EvalResult<Value> {
        self.dispatch(name, args, &Keywords::new())
    }
}
