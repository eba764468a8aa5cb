use std::rc::Rc;

use crate::interpreter::{
    units::vector::QuantityVector,
    value::{core::Value, number::Number},
};

/// How a converted quantity should be shown: the target unit as written and
/// the magnitude expressed in it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUnit {
    pub label:     String,
    pub magnitude: Number,
}

/// A number with physical dimensions.
///
/// The magnitude is always stored in SI base units, so `3 km` and
/// `3000 m` are the same quantity. A conversion with `to` only attaches a
/// [`DisplayUnit`]; arithmetic discards it.
#[derive(Debug, Clone)]
pub struct Quantity {
    pub magnitude: Number,
    pub vector:    QuantityVector,
    pub display:   Option<Rc<DisplayUnit>>,
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.vector == other.vector && self.magnitude == other.magnitude
    }
}

impl Quantity {
    #[must_use]
    pub const fn new(magnitude: Number, vector: QuantityVector) -> Self {
        Self { magnitude,
               vector,
               display: None }
    }

    /// Wraps `magnitude` as a quantity, or returns the plain number when the
    /// dimensions cancel out.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::{
    ///     units::{quantity::Quantity, vector::QuantityVector},
    ///     value::{core::Value, number::Number},
    /// };
    ///
    /// let plain = Quantity::value(Number::from(2), QuantityVector::DIMENSIONLESS);
    /// assert!(matches!(plain, Value::Number(_)));
    /// let length = Quantity::value(Number::from(2), QuantityVector::LENGTH);
    /// assert!(matches!(length, Value::Quantity(_)));
    /// ```
    #[must_use]
    pub fn value(magnitude: Number, vector: QuantityVector) -> Value {
        if vector.is_dimensionless() {
            Value::Number(magnitude.simplify())
        } else {
            Value::Quantity(Self::new(magnitude.simplify(), vector))
        }
    }

    #[must_use]
    pub fn with_display(mut self, label: String, magnitude: Number) -> Self {
        self.display = Some(Rc::new(DisplayUnit { label,
                                                  magnitude: magnitude.simplify() }));
        self
    }
}
