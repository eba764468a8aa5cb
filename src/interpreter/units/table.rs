use num::{BigInt, BigRational};

use crate::interpreter::{
    units::{
        registry::{Unit, UnitRegistry, UnitRegistryBuilder},
        vector::QuantityVector,
    },
    value::number::Number,
};

/// Exact fraction `n / d` for table constants. `d` is never zero here.
fn exact(n: i64, d: i64) -> Number {
    Number::Rational(BigRational::new(n.into(), d.into())).simplify()
}

/// Exact `10^exponent`.
fn pow10(exponent: i32) -> Number {
    let magnitude = BigInt::from(10).pow(exponent.unsigned_abs());
    if exponent < 0 {
        Number::Rational(BigRational::new(BigInt::from(1), magnitude))
    } else {
        Number::Integer(magnitude)
    }
}

fn vector(components: [i32; 7]) -> QuantityVector {
    QuantityVector(components)
}

impl Unit {
    /// A unit with multiplier one and no offset, pluralized with an `s`.
    fn new(symbol: &str, singular: &str, quantity: &str, vector: QuantityVector) -> Self {
        Self { symbol: symbol.to_string(),
               singular: singular.to_string(),
               plural: format!("{singular}s"),
               aliases: Vec::new(),
               quantities: vec![quantity.to_string()],
               vector,
               multiplier: Number::one(),
               offset: Number::zero() }
    }

    fn scaled(mut self, multiplier: Number) -> Self {
        self.multiplier = multiplier;
        self
    }

    fn shifted(mut self, offset: Number) -> Self {
        self.offset = offset;
        self
    }

    fn plural(mut self, plural: &str) -> Self {
        self.plural = plural.to_string();
        self
    }

    fn alias(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(ToString::to_string));
        self
    }
}

const PREFIXES: [(&str, &str, i32); 20] = [("Y", "yotta", 24),
                                           ("Z", "zetta", 21),
                                           ("E", "exa", 18),
                                           ("P", "peta", 15),
                                           ("T", "tera", 12),
                                           ("G", "giga", 9),
                                           ("M", "mega", 6),
                                           ("k", "kilo", 3),
                                           ("h", "hecto", 2),
                                           ("da", "deca", 1),
                                           ("d", "deci", -1),
                                           ("c", "centi", -2),
                                           ("m", "milli", -3),
                                           ("u", "micro", -6),
                                           ("n", "nano", -9),
                                           ("p", "pico", -12),
                                           ("f", "femto", -15),
                                           ("a", "atto", -18),
                                           ("z", "zepto", -21),
                                           ("y", "yocto", -24)];

/// Builds the unit registry every interpreter starts with: the SI base and
/// derived units, common time, imperial and temperature units, and the SI
/// prefixes.
///
/// # Example
/// ```
/// use ka::interpreter::units::table::standard_units;
///
/// let units = standard_units();
/// assert_eq!(units.lookup("feet").unwrap().multiplier.to_string(), "381/1250");
/// assert_eq!(units.quantity_names(units.lookup("N").unwrap().vector), ["force"]);
/// ```
#[must_use]
pub fn standard_units() -> UnitRegistry {
    let mass = QuantityVector::MASS;
    let length = QuantityVector::LENGTH;
    let time = QuantityVector::TIME;
    let energy = vector([1, 2, -2, 0, 0, 0, 0]);

    let mut builder = UnitRegistryBuilder::new();

    builder.unit(Unit::new("s", "second", "time", time))
           .unit(Unit::new("m", "metre", "length", length).alias(&["meter", "meters"]))
           .unit(Unit::new("g", "gram", "mass", mass).scaled(exact(1, 1000)))
           .unit(Unit::new("A", "ampere", "electric current", QuantityVector::CURRENT))
           .unit(Unit::new("K", "kelvin", "thermodynamic temperature", QuantityVector::TEMPERATURE).plural("kelvin"))
           .unit(Unit::new("mol", "mole", "amount of substance", QuantityVector::AMOUNT))
           .unit(Unit::new("cd", "candela", "luminous intensity", QuantityVector::LUMINOSITY));

    builder.unit(Unit::new("min", "minute", "time", time).scaled(Number::from(60)))
           .unit(Unit::new("hr", "hour", "time", time).scaled(Number::from(3600)))
           .unit(Unit::new("day", "day", "time", time).scaled(Number::from(86_400)))
           .unit(Unit::new("wk", "week", "time", time).scaled(Number::from(604_800)))
           .unit(Unit::new("yr", "year", "time", time).scaled(Number::from(31_557_600)));

    builder.unit(Unit::new("Hz", "hertz", "frequency", vector([0, 0, -1, 0, 0, 0, 0])).plural("hertz"))
           .unit(Unit::new("N", "newton", "force", vector([1, 1, -2, 0, 0, 0, 0])))
           .unit(Unit::new("J", "joule", "energy", energy))
           .unit(Unit::new("W", "watt", "power", vector([1, 2, -3, 0, 0, 0, 0])))
           .unit(Unit::new("Pa", "pascal", "pressure", vector([1, -1, -2, 0, 0, 0, 0])))
           .unit(Unit::new("C", "coulomb", "electric charge", vector([0, 0, 1, 1, 0, 0, 0])))
           .unit(Unit::new("V", "volt", "voltage", vector([1, 2, -3, -1, 0, 0, 0])))
           .unit(Unit::new("ohm", "ohm", "electrical resistance", vector([1, 2, -3, -2, 0, 0, 0])))
           .unit(Unit::new("L", "litre", "volume", length.pow(3)).scaled(exact(1, 1000))
                                                                 .alias(&["liter", "liters"]));

    builder.unit(Unit::new("inch", "inch", "length", length).scaled(exact(127, 5000))
                                                            .plural("inches"))
           .unit(Unit::new("ft", "foot", "length", length).scaled(exact(381, 1250))
                                                          .plural("feet"))
           .unit(Unit::new("yd", "yard", "length", length).scaled(exact(1143, 1250)))
           .unit(Unit::new("mi", "mile", "length", length).scaled(exact(201_168, 125)))
           .unit(Unit::new("lb", "pound", "mass", mass).scaled(exact(45_359_237, 100_000_000))
                                                       .alias(&["lbs"]))
           .unit(Unit::new("oz", "ounce", "mass", mass).scaled(exact(45_359_237, 1_600_000_000)))
           .unit(Unit::new("t", "tonne", "mass", mass).scaled(Number::from(1000)));

    builder.unit(Unit::new("degC", "degree Celsius", "thermodynamic temperature", QuantityVector::TEMPERATURE)
                     .plural("degrees Celsius")
                     .alias(&["celsius"])
                     .shifted(exact(27_315, 100)))
           .unit(Unit::new("degF", "degree Fahrenheit", "thermodynamic temperature", QuantityVector::TEMPERATURE)
                     .plural("degrees Fahrenheit")
                     .alias(&["fahrenheit"])
                     .scaled(exact(5, 9))
                     .shifted(exact(45_967, 180)));

    builder.unit(Unit::new("cal", "calorie", "energy", energy).scaled(exact(4184, 1000)))
           .unit(Unit::new("eV", "electronvolt", "energy", energy)
                     .scaled(Number::Rational(BigRational::new(BigInt::from(1_602_176_634_i64),
                                                               BigInt::from(10).pow(28)))));

    builder.quantity("area", length.pow(2))
           .quantity("velocity", length.div(time))
           .quantity("acceleration", length.div(time.pow(2)));

    for (symbol, name, exponent) in PREFIXES {
        builder.prefix(symbol, name, pow10(exponent));
    }

    builder.build()
}
