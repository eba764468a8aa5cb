use crate::interpreter::{units::quantity::Quantity, value::{core::Value, number::Number}};

/// Significant digits used when nothing else is configured.
pub const DEFAULT_PRECISION: usize = 6;

/// Renders values for people.
///
/// Exact numbers are shown in full. Floats are shown with `precision`
/// significant digits in the style of C's `%g`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormatter {
    pub precision: usize,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self { precision: DEFAULT_PRECISION }
    }
}

impl ValueFormatter {
    #[must_use]
    pub const fn new(precision: usize) -> Self {
        Self { precision }
    }

    /// Formats a result for the top level.
    ///
    /// Same as [`format_nested`](Self::format_nested), except that fractions
    /// are followed by their decimal approximation and strings are not
    /// quoted.
    ///
    /// # Example
    /// ```
    /// use ka::{display::ValueFormatter, execute_default};
    ///
    /// let formatter = ValueFormatter::default();
    /// let value = execute_default("3/4").unwrap().unwrap();
    /// assert_eq!(formatter.format(&value), "3/4 (0.75)");
    /// assert_eq!(formatter.format_nested(&value), "3/4");
    /// ```
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        match value {
            Value::Number(n) => self.format_number(n, true),
            Value::Combinatoric(c) => self.format_number(&c.resolve(), true),
            Value::String(s) => s.to_string(),
            other => self.format_nested(other),
        }
    }

    /// Formats a value inside a larger one, such as an array element.
    #[must_use]
    pub fn format_nested(&self, value: &Value) -> String {
        match value {
            Value::Number(n) => self.format_number(n, false),
            Value::Combinatoric(c) => self.format_number(&c.resolve(), false),
            Value::Bool(b) => b.to_string(),
            Value::Quantity(q) => self.format_quantity(q),
            Value::Array(items) => {
                let items: Vec<String> = items.iter().map(|item| self.format_nested(item)).collect();
                format!("{{{}}}", items.join(", "))
            },
            Value::String(s) => format!("{s:?}"),
            Value::Instant(t) => t.to_string(),
            Value::Interval(i) => format!("[{}, {}]",
                                          self.format_number(i.lo(), false),
                                          self.format_number(i.hi(), false)),
            Value::RandomVariable(x) => x.to_string(),
        }
    }

    fn format_number(&self, n: &Number, top_level: bool) -> String {
        match n {
            Number::Integer(i) => i.to_string(),
            Number::Rational(r) => {
                let exact = format!("{}/{}", r.numer(), r.denom());
                match n.to_f64() {
                    Ok(x) if top_level => format!("{exact} ({})", self.format_float(x)),
                    _ => exact,
                }
            },
            Number::Float(x) => self.format_float(*x),
        }
    }

    /// Magnitudes of quantities are always decimal: `373.15 K`, not
    /// `7463/20 K`.
    fn format_quantity(&self, q: &Quantity) -> String {
        let (magnitude, unit) = match &q.display {
            Some(display) => (&display.magnitude, display.label.clone()),
            None => (&q.magnitude, q.vector.to_string()),
        };
        let magnitude = match magnitude {
            Number::Rational(_) => magnitude.to_f64()
                                            .map_or_else(|_| magnitude.to_string(), |x| self.format_float(x)),
            other => self.format_number(other, false),
        };
        format!("{magnitude} {unit}")
    }

    /// `%g`: scientific notation for very large or very small magnitudes,
    /// fixed otherwise, trailing zeros removed.
    ///
    /// # Example
    /// ```
    /// use ka::display::ValueFormatter;
    ///
    /// let formatter = ValueFormatter::new(6);
    /// assert_eq!(formatter.format_float(0.1 + 0.2), "0.3");
    /// assert_eq!(formatter.format_float(1234567.0), "1.23457e6");
    /// assert_eq!(formatter.format_float(0.00012), "0.00012");
    /// assert_eq!(formatter.format_float(-2.5e-7), "-2.5e-7");
    /// ```
    #[must_use]
    pub fn format_float(&self, x: f64) -> String {
        if x == 0.0 {
            return "0".to_string();
        }
        let digits = self.precision.max(1);
        let scientific = format!("{:.*e}", digits - 1, x);
        let Some((mantissa, exponent)) = scientific.split_once('e') else {
            return scientific;
        };
        let Ok(exponent) = exponent.parse::<i32>() else {
            return scientific;
        };

        let limit = i32::try_from(digits).unwrap_or(i32::MAX);
        if exponent < -4 || exponent >= limit {
            return format!("{}e{exponent}", trim_zeros(mantissa));
        }
        let decimals = usize::try_from(limit - 1 - exponent).unwrap_or(0);
        trim_zeros(&format!("{x:.decimals$}")).to_string()
    }
}

/// Drops trailing zeros after a decimal point, and the point itself if
/// nothing is left after it.
fn trim_zeros(text: &str) -> &str {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.')
}
