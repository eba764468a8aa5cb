use ka::{
    error::{Interrupt, RuntimeError},
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, Registry, RegistryBuilder, Signature},
        library::standard_functions,
        value::{
            core::{Type, Value},
            number::Number,
        },
    },
    register_functions,
};
use pretty_assertions::assert_eq;

fn tag(label: &'static str) -> Value {
    Value::from(label)
}

fn integers(_: &Registry, _: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(tag("integers"))
}

fn rationals(_: &Registry, _: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(tag("rationals"))
}

fn numbers(_: &Registry, _: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(tag("numbers"))
}

fn anything(_: &Registry, _: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(tag("anything"))
}

fn first_argument(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(args[0].clone())
}

fn count(_: &Registry, args: &[Value], keywords: &Keywords) -> EvalResult<Value> {
    let extra = match keywords.get("extra") {
        Some(value) => value.as_number()?,
        None => Number::zero(),
    };
    let n = i64::try_from(args.len()).unwrap_or(i64::MAX);
    Ok(Value::Number(Number::from(n).add(&extra)?))
}

fn half(_: &Registry, _: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(Value::Number(Number::ratio(4, 2)?))
}

fn registry() -> Registry {
    let mut builder = RegistryBuilder::new();
    register_functions!(builder, {
        "f" (Rational, Rational) => rationals,
        "f" (Integer, Integer) => integers,
        "g" (Number, Any) => numbers,
        "g" (Any, Number) => anything,
        "id" (Rational) => first_argument,
        "id_float" (Float) => first_argument,
        "id_number" (Number) => first_argument,
        "half" () => half,
    });
    builder.register("count", Signature::new(&[Type::Number]).vararg(Type::Integer).keyword("extra", Type::Number), count);
    builder.build()
}

fn call(name: &str, args: &[Value]) -> EvalResult<Value> {
    registry().call(name, args)
}

fn error(result: EvalResult<Value>) -> RuntimeError {
    match result {
        Err(Interrupt::Error(e)) => e,
        other => panic!("expected an error, got {other:?}"),
    }
}

#[test]
fn the_most_specific_overload_wins() {
    assert_eq!(call("f", &[Value::from(2), Value::from(3)]).unwrap(), tag("integers"));
    let third = Value::Number(Number::ratio(1, 3).unwrap());
    assert_eq!(call("f", &[third.clone(), Value::from(3)]).unwrap(), tag("rationals"));
}

#[test]
fn ties_go_to_the_earliest_registration() {
    assert_eq!(call("g", &[Value::from(1), Value::from(2)]).unwrap(), tag("numbers"));
    assert_eq!(call("g", &[Value::from("x"), Value::from(2)]).unwrap(), tag("anything"));
}

#[test]
fn arguments_are_coerced_to_the_declared_kind() {
    assert_eq!(call("id", &[Value::from(2)]).unwrap(),
               Value::Number(Number::from(2)),
               "integer widened to a fraction, then simplified back");
    assert_eq!(call("id_float", &[Value::Number(Number::ratio(1, 4).unwrap())]).unwrap(),
               Value::Number(Number::Float(0.25)));

    let functions = standard_functions();
    let five_factorial = functions.call("!", &[Value::from(5)]).unwrap();
    assert!(matches!(five_factorial, Value::Combinatoric(_)));
    let resolved = registry().call("id_number", &[five_factorial]).unwrap();
    assert_eq!(resolved, Value::from(120));
}

#[test]
fn results_are_simplified() {
    assert_eq!(call("half", &[]).unwrap(), Value::from(2));
}

#[test]
fn varargs_and_keywords() {
    let mut keywords = Keywords::new();
    keywords.push("extra".to_string(), Value::from(10));
    let result = registry().dispatch("count", &[Value::from(1), Value::from(2), Value::from(3)], &keywords);
    assert_eq!(result.unwrap(), Value::from(13));

    assert_eq!(call("count", &[Value::Number(Number::Float(0.5))]).unwrap(), Value::from(1));
    assert!(matches!(error(call("count", &[Value::from(1), Value::Number(Number::Float(0.5))])),
                     RuntimeError::NoMatchingSignature { .. }));
}

#[test]
fn keyword_errors() {
    let mut unknown = Keywords::new();
    unknown.push("bonus".to_string(), Value::from(1));
    assert_eq!(error(registry().dispatch("count", &[Value::from(1)], &unknown)),
               RuntimeError::UnknownKeyword { name:    "count".to_string(),
                                              keyword: "bonus".to_string(), });

    let mut badly_typed = Keywords::new();
    badly_typed.push("extra".to_string(), Value::from("ten"));
    assert_eq!(error(registry().dispatch("count", &[Value::from(1)], &badly_typed)),
               RuntimeError::BadKeywordType { name:     "count".to_string(),
                                              keyword:  "extra".to_string(),
                                              got:      Type::String,
                                              expected: Type::Number, });
}

#[test]
fn lookup_errors() {
    assert_eq!(error(call("nope", &[])),
               RuntimeError::UnknownFunction { name: "nope".to_string() });
    assert_eq!(error(call("f", &[Value::from(1)])),
               RuntimeError::NoMatchingSignature { name:      "f".to_string(),
                                                   arguments: vec![Type::Integer],
                                                   known:     vec!["(Rational, Rational)".to_string(),
                                                                   "(Integer, Integer)".to_string()], });
}

#[test]
fn signatures_are_printable() {
    assert_eq!(registry().signatures("count"), vec!["(Number, Integer...; extra: Number)"]);
    assert_eq!(standard_functions().signatures("round"), vec!["(Number; places: Integer)"]);
}

#[test]
fn near_misses() {
    let functions = standard_functions();
    assert_eq!(functions.close_matches("sqr"), vec!["sqrt"]);
    assert!(functions.close_matches("xyzzy").is_empty());
    assert!(functions.names().contains(&"Binomial"));
}

#[test]
fn every_operator_goes_through_dispatch() {
    let functions = standard_functions();
    for name in ["+", "-", "*", "/", "%", "^", "!", "<", "<=", ">", ">=", "==", "!="] {
        assert!(functions.contains(name), "{name} is not registered");
    }
}
