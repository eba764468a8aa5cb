use std::fs::{self};

use ka::{
    display::ValueFormatter,
    error::{Error, ParseError, RuntimeError},
    execute, execute_default,
    interpreter::{evaluator::environment::Environment, value::core::Value},
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_ka_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = execute_default(&code) {
                panic!("ka example {} in {:?} failed:\n{}\nError: {:?}",
                       i + 1,
                       path,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No ka examples found in book/src");
}

/// Every ```` ```ka ```` block, with its lines joined by `;` where needed.
///
/// Lines starting with `//` are comments for the reader.
fn extract_ka_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut lines: Vec<String> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```ka") {
            inside = true;
            lines.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(lines.join("; "));
            continue;
        }
        if inside && !trimmed.is_empty() && !trimmed.starts_with("//") {
            lines.push(trimmed.trim_end_matches(';').to_string());
        }
    }

    blocks
}

fn assert_success(src: &str) {
    if let Err(e) = execute_default(src) {
        panic!("Script failed: {e}\n{src}");
    }
}

fn assert_failure(src: &str) {
    if execute_default(src).is_ok() {
        panic!("Script succeeded but was expected to fail: {src}")
    }
}

/// Runs `src` and formats the result the way the command line does.
fn shown(src: &str) -> String {
    let value = execute_default(src).unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"))
                                    .unwrap_or_else(|| panic!("Script had no value: {src}"));
    ValueFormatter::default().format(&value)
}

fn runtime_error(src: &str) -> RuntimeError {
    match execute_default(src) {
        Err(Error::Runtime(e)) => e,
        other => panic!("expected a runtime error from {src}, got {other:?}"),
    }
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("x = 1 + 2; assert(x == 3)");
    assert_success("x = 7 * 9; assert(x == 63)");
    assert_success("x = 8 - 5; assert(x == 3)");
    assert_success("x = 10 / 2; assert(x == 5)");
    assert_eq!(shown("1+2*3-3^2"), "-2");
    assert_eq!(shown("2^3^2"), "64");
    assert_eq!(shown("7 % 3"), "1");
}

#[test]
fn assignments_persist_in_the_environment() {
    let mut env = Environment::new();
    assert_eq!(execute("x=3;5*x", &mut env).unwrap(), Some(Value::from(15)));
    assert_eq!(env.get("x"), Some(&Value::from(3)));
    assert_eq!(execute("x + 1", &mut env).unwrap(), Some(Value::from(4)));
}

#[test]
fn assignment_survives_a_later_failure() {
    let mut env = Environment::new();
    assert!(execute("y = 2; y / 0", &mut env).is_err());
    assert_eq!(env.get("y"), Some(&Value::from(2)));
}

#[test]
fn constants_can_be_overwritten() {
    assert_success("assert(3.14 < pi); assert(pi < 3.15)");
    assert_success("assert(2.71 < e); assert(e < 2.72)");
    assert_eq!(shown("pi = 3; pi * 2"), "6");
}

#[test]
fn empty_input_has_no_value() {
    assert_eq!(execute_default("").unwrap(), None);
    assert_eq!(execute_default("   \n  ").unwrap(), None);
}

#[test]
fn exact_fractions() {
    assert_eq!(shown("3/4"), "3/4 (0.75)");
    assert_eq!(shown("4/2"), "2");
    assert_eq!(shown("1/3 + 1/6"), "1/2 (0.5)");
    assert_eq!(shown("(2/3)^2"), "4/9 (0.444444)");
    assert_eq!(shown("2^-2"), "1/4 (0.25)");
    assert_eq!(shown("1e-4"), "1/10000 (0.0001)");
    assert_eq!(shown("100e-2"), "1");
}

#[test]
fn floats_and_promotion() {
    assert_eq!(shown("0.5 + 1/2"), "1");
    assert_eq!(shown("1.5 * 2"), "3");
    assert_eq!(shown("0.1 + 0.2"), "0.3");
    assert_eq!(shown("1.2e-4"), "0.00012");
    assert_eq!(shown("2^0.5"), "1.41421");
    assert_success("assert(1 == 1.0)");
}

#[test]
fn numeric_errors() {
    assert_eq!(runtime_error("1 / 0"), RuntimeError::DivisionByZero);
    assert_eq!(runtime_error("5 % 0"), RuntimeError::DivisionByZero);
    assert_eq!(runtime_error("10.5 ^ 400"), RuntimeError::NumericOverflow);
    assert_eq!(runtime_error("(-8)^0.5"), RuntimeError::NotANumber);
}

#[test]
fn unassigned_variable() {
    assert_eq!(runtime_error("y + 1"),
               RuntimeError::UnassignedVariable { name: "y".to_string() });
}

#[test]
fn builtin_functions() {
    assert_success("assert(sin(0) == 0)");
    assert_success("assert(abs(-5) == 5)");
    assert_success("x = 9; assert(sqrt(x) == 3)");
    assert_success("assert(round(3.7) == 4)");
    assert_success("assert(round(7/3, places: 2) == 233/100)");
    assert_success("assert(floor(7/2) == 3)");
    assert_success("assert(ceil(7/2) == 4)");
    assert_success("assert(max(1, 5, 3) == 5)");
    assert_success("assert(min(4, 2/3, 9) == 2/3)");
    assert_success("assert(log(100) == 2)");
    assert_success("assert(log(8, 2) == 3)");
    assert_success("assert(ln(1) == 0)");
    assert_success("assert(exp(0) == 1)");
    assert_success("assert(23.9999 < gamma(5) < 24.0001)");
}

#[test]
fn factorials_and_binomials() {
    assert_eq!(shown("5!"), "120");
    assert_eq!(shown("-4!"), "-24");
    assert_eq!(shown("C(5, 2)"), "10");
    assert_eq!(shown("choose(3, 5)"), "0");
    assert_eq!(shown("P(5, 2)"), "20");
    assert_eq!(shown("10! / 8!"), "90");
    assert_eq!(shown("C(10, 3) * C(7, 2)"), "2520");
    assert_success("assert(0.5! > 0.88); assert(0.5! < 0.89)");
    assert_success("x = C(1000, 500); assert(x > 10^299)");
}

#[test]
fn comparisons_and_chains() {
    assert_success("assert(2 < 3)");
    assert_success("assert(3 > 2)");
    assert_success("assert(2 <= 2)");
    assert_success("assert(3 >= 3)");
    assert_success("assert(2 != 3)");
    assert_success("assert(1 < 2 < 3)");
    assert_success("assert(3 >= 2 > 1)");
    assert_eq!(shown("1 < 3 < 2"), "false");
    assert_eq!(shown("\"a\" == \"a\""), "true");
    assert_eq!(shown("1 == \"1\""), "false");
}

#[test]
fn chain_errors_are_parse_errors() {
    assert!(matches!(execute_default("1 < 2 > 1"),
                     Err(Error::Parse(ParseError::MixedComparisonDirections { .. }))));
    assert!(matches!(execute_default("1 == 1 == 1"),
                     Err(Error::Parse(ParseError::ChainedEquality { .. }))));
    assert!(matches!(execute_default("1 < 2 < 3 < 4"),
                     Err(Error::Parse(ParseError::TooManyComparisons { .. }))));
}

#[test]
fn quantities() {
    assert_eq!(shown("5 m | s"), "5 m s^-1");
    assert_eq!(shown("100 degC"), "373.15 K");
    assert_eq!(shown("0degC"), "273.15 K");
    assert_success("assert(0days == 0 s)");
    assert_eq!(shown("3 km to m"), "3000 m");
    assert_eq!(shown("1 hr to min"), "60 min");
    assert_eq!(shown("2 m * 3 m"), "6 m^2");
    assert_eq!(shown("6 m / 2 m"), "3");
    assert_eq!(shown("212 degF to degC"), "100 degC");
    assert_eq!(shown("1 kg m | s^2 to N"), "1 N");
    assert_success("assert(5 meters == 5 meters)");
    assert_success("assert(3 meters == 3000 millimeters)");
    assert_success("assert(1 ft < 1 m)");
    assert_success("assert(-5 m == 0 m - 5 m)");
    assert_eq!(shown("-40 degC to degF"), "-40 degF");
    assert_success("assert(-10 degC < 0 degC)");
}

#[test]
fn quantity_errors() {
    assert!(matches!(runtime_error("5 meters + 3 seconds"),
                     RuntimeError::IncompatibleQuantities { .. }));
    assert!(matches!(runtime_error("1 kg to m"),
                     RuntimeError::IncompatibleQuantities { .. }));
    assert!(matches!(runtime_error("1 degC m"),
                     RuntimeError::IncompatibleOffsetUnit { .. }));
    assert!(matches!(runtime_error("1 kdegC"), RuntimeError::InvalidPrefix { .. }));
    assert_eq!(runtime_error("3 furlongs"),
               RuntimeError::UnknownUnit { name: "furlongs".to_string() });
}

#[test]
fn arrays() {
    assert_eq!(shown("{1, 2, 3}"), "{1, 2, 3}");
    assert_eq!(shown("{}"), "{}");
    assert_eq!(shown("1..4"), "{1, 2, 3, 4}");
    assert_eq!(shown("range(0, 1, step: 1/4)"), "{0, 1/4, 1/2, 3/4, 1}");
    assert_eq!(shown("range(3, 1, step: -1)"), "{3, 2, 1}");
    assert_eq!(shown("range(3, 1)"), "{}");
    assert_eq!(shown("{1, 2} + {10, 20}"), "{11, 22}");
    assert_eq!(shown("{1, 2, 3} * 2"), "{2, 4, 6}");
    assert_eq!(shown("1 / {2, 4}"), "{1/2, 1/4}");
    assert_eq!(shown("{\"a\", 1}"), "{\"a\", 1}");
    assert_success("assert(sum(1..100) == 5050)");
    assert_success("assert(prod(1..5) == 5!)");
    assert_success("assert(mean({1, 2, 3, 4}) == 5/2)");
    assert_success("assert(len({1, 2, 3}) == 3)");
    assert_success("assert({1, 2} == {1, 2})");
    assert_success("assert(max({3, 9, 4}) == 9)");
    assert!(matches!(runtime_error("{1, 2} + {1, 2, 3}"),
                     RuntimeError::InvalidArgument { .. }));
    assert!(matches!(runtime_error("range(1, 5, step: 0)"),
                     RuntimeError::InvalidArgument { .. }));
}

#[test]
fn float_steps_in_ranges() {
    assert_eq!(shown("range(0, 1, step: 0.5)"), "{0, 0.5, 1}");
    assert_success("assert(len(range(0, 1, step: 0.1)) == 11)");
    assert_success("assert(max(range(0, 1, step: 0.1)) == 1)");
    assert_success("assert(len(range(0, 0.3, step: 0.1)) == 4)");
    assert_success("assert(len(range(10^16, 10^16 + 2, step: 0.5)) == 5)");
    assert_success("assert(len(range(1, 0, step: 0.25)) == 0)");
    assert!(matches!(runtime_error("range(1, 10^12)"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn comprehensions() {
    assert_eq!(shown("{x : x in [1, 3], x <= 2}"), "{1, 2}");
    assert_eq!(shown("{x^2 : x in 1..5, x % 2 == 1}"), "{1, 9, 25}");
    assert_eq!(shown("{x * y : x in {1, 2}, y in {10, 20}}"), "{10, 20, 20, 40}");
    assert_eq!(shown("x = 7; {x : x in {1, 2}}; x"), "7");
    assert!(matches!(runtime_error("{x : x in 5}"), RuntimeError::NotIterable { .. }));
    assert!(matches!(runtime_error("{x : x in {1}, x}"), RuntimeError::ExpectedBoolean { .. }));
}

#[test]
fn intervals() {
    assert_eq!(shown("[1, 2] + [10, 20]"), "[11, 22]");
    assert_eq!(shown("[1, 2] - [0, 1]"), "[0, 2]");
    assert_eq!(shown("[-1, 2] * [3, 4]"), "[-4, 8]");
    assert_eq!(shown("2 * [1, 3]"), "[2, 6]");
    assert_eq!(shown("10 - [1, 3]"), "[7, 9]");
    assert_eq!(shown("width([1, 7/2])"), "5/2 (2.5)");
    assert_success("assert(contains([1, 3], 2))");
    assert_success("assert(contains([1, 3], 4) == contains([1, 3], 0))");
}

#[test]
fn strings() {
    assert_eq!(shown("\"ab\" + \"cd\""), "abcd");
    assert_eq!(shown("len(\"hello\")"), "5");
    assert_eq!(shown("\"tab\\there\""), "tab\there");
    assert!(matches!(runtime_error("\"a\" + 1"), RuntimeError::NoMatchingSignature { .. }));
}

#[test]
fn instants() {
    assert_eq!(shown("#2024-03-01# - #2024-02-29# to hr"), "24 hr");
    assert_eq!(shown("#2024-01-31# + 1 day"), "2024-02-01T00:00:00");
    assert_eq!(shown("#2024-01-31 12:30# - 30 min"), "2024-01-31T12:00:00");
    assert_eq!(shown("#2024-01-31T12:30:15#"), "2024-01-31T12:30:15");
    assert_eq!(shown("#2024-02-28 23:59:59# + 1 s"), "2024-02-29T00:00:00");
    assert_eq!(shown("#2023-12-31T23:00# + 2 hr"), "2024-01-01T01:00:00");
    assert_eq!(shown("#2024-03-01# - #2023-03-01# to day"), "366 day");
    assert!(matches!(execute_default("#2023-02-29#"), Err(Error::Parse(ParseError::Other { .. }))));
    assert!(matches!(execute_default("#2024-01-01 25:00#"), Err(Error::Parse(ParseError::Other { .. }))));
    assert_success("assert(#2020-01-01# < #2021-01-01#)");
    assert_success("assert(now() > #2020-01-01#)");
    assert!(matches!(runtime_error("#2024-01-01# + 3 m"),
                     RuntimeError::IncompatibleQuantities { .. }));
    assert!(matches!(execute_default("#2024-13-01#"), Err(Error::Parse(ParseError::Other { .. }))));
}

#[test]
fn probability() {
    assert_eq!(shown("pmf(Binomial(4, 1/2), 2)"), "3/8 (0.375)");
    assert_eq!(shown("mean(Binomial(10, 1/5))"), "2");
    assert_eq!(shown("cdf(UniformInt(1, 4), 2)"), "1/2 (0.5)");
    assert_success("x = cdf(Gaussian(0, 1), 0); assert(0.4999 < x < 0.5001)");
    assert_success("x = sample(Bernoulli(1/2)); assert(0 <= x <= 1)");
    assert_success("assert(len(sample(Poisson(3), 20)) == 20)");
    assert_success("x = sample(Uniform(2, 3)); assert(2 <= x <= 3)");
    assert!(matches!(runtime_error("Binomial(4, 2)"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(runtime_error("Geometric(0)"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(runtime_error("pmf(Gaussian(0, 1), 0)"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn assert_and_quit() {
    assert_eq!(runtime_error("assert(1 > 2)"), RuntimeError::AssertionFailed);
    assert!(matches!(execute_default("quit(); 1 / 0"), Err(Error::Signal(_))));
    assert!(matches!(runtime_error("assert(1)"), RuntimeError::NoMatchingSignature { .. }));
}

#[test]
fn syntax_errors() {
    assert_failure("1 +");
    assert_failure("(1 + 2");
    assert_failure("1;;2");
    assert_failure("1;");
    assert_failure("f(x: 1, 2)");
    assert_failure("5 m^1.5");
    assert_failure("5 m |");
    assert_failure("\"unclosed");
    assert_failure("#2024-01-01");
    assert_failure("0b2");
    assert_failure("1 $ 2");
}
