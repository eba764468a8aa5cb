use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::UnitSignature,
    error::RuntimeError,
    interpreter::{units::vector::QuantityVector, value::number::Number},
};

/// A named unit of measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Short form, such as `m`.
    pub symbol:     String,
    /// Long form, such as `metre`.
    pub singular:   String,
    /// Plural long form, such as `metres`.
    pub plural:     String,
    /// Extra accepted spellings, such as `meter`.
    pub aliases:    Vec<String>,
    /// Names of the physical quantities this unit measures.
    pub quantities: Vec<String>,
    pub vector:     QuantityVector,
    /// Scale relative to the SI base unit of the same vector.
    pub multiplier: Number,
    /// Zero point shift relative to the SI base unit. Zero for almost all
    /// units.
    pub offset:     Number,
}

impl Unit {
    #[must_use]
    pub fn has_offset(&self) -> bool {
        !self.offset.is_zero()
    }

    /// Every name this unit answers to.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [&self.symbol, &self.singular, &self.plural].into_iter()
                                                     .chain(self.aliases.iter())
                                                     .map(String::as_str)
    }
}

/// A decimal prefix such as `k` (`kilo`).
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub symbol:     String,
    pub name:       String,
    pub multiplier: Number,
}

/// A unit after prefix resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUnit {
    /// The name as it was written.
    pub label:      String,
    pub vector:     QuantityVector,
    pub multiplier: Number,
    pub offset:     Number,
}

/// The result of folding a whole unit signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub vector:     QuantityVector,
    pub multiplier: Number,
    pub offset:     Number,
    /// The signature as written, used to label converted quantities.
    pub label:      String,
}

/// Collects units, prefixes and quantity names before freezing them into a
/// [`UnitRegistry`].
#[derive(Debug, Default)]
pub struct UnitRegistryBuilder {
    units:      Vec<Unit>,
    prefixes:   Vec<Prefix>,
    quantities: Vec<(String, QuantityVector)>,
}

impl UnitRegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit. Later registrations of an already used name are ignored
    /// by lookup; the first unit claiming a name keeps it.
    pub fn unit(&mut self, unit: Unit) -> &mut Self {
        self.units.push(unit);
        self
    }

    pub fn prefix(&mut self, symbol: &str, name: &str, multiplier: Number) -> &mut Self {
        self.prefixes.push(Prefix { symbol: symbol.to_string(),
                                    name: name.to_string(),
                                    multiplier });
        self
    }

    /// Names a quantity vector that no unit is registered for, such as
    /// `velocity`.
    pub fn quantity(&mut self, name: &str, vector: QuantityVector) -> &mut Self {
        self.quantities.push((name.to_string(), vector));
        self
    }

    #[must_use]
    pub fn build(self) -> UnitRegistry {
        let mut by_name = HashMap::new();
        let mut quantity_names: HashMap<QuantityVector, Vec<String>> = HashMap::new();

        for (index, unit) in self.units.iter().enumerate() {
            for name in unit.names() {
                by_name.entry(name.to_string()).or_insert(index);
            }
            for quantity in &unit.quantities {
                let names = quantity_names.entry(unit.vector).or_default();
                if !names.contains(quantity) {
                    names.push(quantity.clone());
                }
            }
        }
        for (name, vector) in self.quantities {
            let names = quantity_names.entry(vector).or_default();
            if !names.contains(&name) {
                names.push(name);
            }
        }

        // Longest prefixes first so that `da` wins over `d`.
        let mut prefixes = self.prefixes;
        prefixes.sort_by_key(|p| std::cmp::Reverse(p.symbol.len()));

        UnitRegistry { units: self.units,
                       by_name,
                       prefixes,
                       quantity_names }
    }
}

/// Immutable table of units and prefixes, shared by every evaluation.
#[derive(Debug)]
pub struct UnitRegistry {
    units:          Vec<Unit>,
    by_name:        HashMap<String, usize>,
    prefixes:       Vec<Prefix>,
    quantity_names: HashMap<QuantityVector, Vec<String>>,
}

impl UnitRegistry {
    /// Finds a unit by exact name or symbol.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.by_name.get(name).map(|&index| &self.units[index])
    }

    /// Resolves a unit name, allowing a decimal prefix.
    ///
    /// An exact match always wins, so `min` is minutes and never
    /// milli-inches. Otherwise each prefix, by name and by symbol, is
    /// stripped from the front and the non-empty remainder is looked up
    /// exactly.
    ///
    /// # Errors
    /// - `UnknownUnit` when no interpretation exists.
    /// - `InvalidPrefix` when the prefixed unit has an offset.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::units::table::standard_units;
    ///
    /// let units = standard_units();
    /// let km = units.lookup("km").unwrap();
    /// assert_eq!(km.multiplier.to_string(), "1000");
    /// assert!(units.lookup("kdegC").is_err());
    /// ```
    pub fn lookup(&self, name: &str) -> Result<ResolvedUnit, RuntimeError> {
        if let Some(unit) = self.get(name) {
            return Ok(ResolvedUnit { label:      name.to_string(),
                                     vector:     unit.vector,
                                     multiplier: unit.multiplier.clone(),
                                     offset:     unit.offset.clone(), });
        }

        for prefix in &self.prefixes {
            for spelling in [&prefix.name, &prefix.symbol] {
                let Some(rest) = name.strip_prefix(spelling.as_str()) else {
                    continue;
                };
                if rest.is_empty() {
                    continue;
                }
                let Some(unit) = self.get(rest) else {
                    continue;
                };
                if unit.has_offset() {
                    return Err(RuntimeError::InvalidPrefix { prefix: spelling.clone(),
                                                             unit:   rest.to_string(), });
                }
                return Ok(ResolvedUnit { label:      name.to_string(),
                                         vector:     unit.vector,
                                         multiplier: prefix.multiplier
                                                           .mul(&unit.multiplier)?
                                                           .simplify(),
                                         offset:     Number::zero(), });
            }
        }

        Err(RuntimeError::UnknownUnit { name: name.to_string() })
    }

    /// Folds a unit signature into a single vector, multiplier and offset.
    ///
    /// Units right of `|` contribute with negated exponents.
    ///
    /// # Errors
    /// - `UnknownUnit` / `InvalidPrefix` from [`lookup`](Self::lookup).
    /// - `IncompatibleOffsetUnit` when a unit with an offset is combined with
    ///   any other unit or has an exponent other than one.
    pub fn compose(&self, signature: &UnitSignature) -> Result<Composition, RuntimeError> {
        let entries: Vec<(&str, i32)> = signature.signed_units().collect();
        let mut vector = QuantityVector::DIMENSIONLESS;
        let mut multiplier = Number::one();
        let mut offset = Number::zero();

        for &(name, exponent) in &entries {
            let unit = self.lookup(name)?;
            if !unit.offset.is_zero() {
                if entries.len() != 1 || exponent != 1 {
                    return Err(RuntimeError::IncompatibleOffsetUnit { unit: name.to_string() });
                }
                offset = unit.offset.clone();
            }
            vector = vector.mul(unit.vector.pow(exponent));
            multiplier = multiplier.mul(&unit.multiplier.pow(&Number::from(i64::from(exponent)))?)?
                                   .simplify();
        }

        debug!(signature = %signature, vector = %vector, multiplier = %multiplier, "composed units");

        Ok(Composition { vector,
                         multiplier,
                         offset,
                         label: signature.to_string() })
    }

    /// Names of the physical quantities measured by `vector`, such as
    /// `["length"]`.
    #[must_use]
    pub fn quantity_names(&self, vector: QuantityVector) -> &[String] {
        self.quantity_names.get(&vector).map_or(&[], Vec::as_slice)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &Prefix> {
        self.prefixes.iter()
    }

    /// Every name lookup accepts without a prefix.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// A one-line description of a unit, for the command line.
    #[must_use]
    pub fn describe(&self, name: &str) -> Option<String> {
        let unit = self.get(name)?;
        let mut line = format!("{} ({}, {}): {}", unit.symbol, unit.singular, unit.plural, unit.quantities.join(", "));
        if !unit.vector.is_dimensionless() {
            line.push_str(&format!(" = {} {}", unit.multiplier, unit.vector));
        }
        if unit.has_offset() {
            line.push_str(&format!(" + {}", unit.offset));
        }
        Some(line)
    }
}
