//! Unit definitions organized by category
//!
//! Only base forms are stored. SI and binary prefixes, long names and
//! plurals are resolved on lookup, so `km`, `kilometers` and `kilometre`
//! all come from the single `m` entry.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use quanta_core::{Dimension, Number, NumericConfig, QuantaError, Unit, DEFAULT_PRECISION};
use tracing::{debug, trace, warn};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// SI prefixes: long name, symbol, power of ten. Two-letter symbols first.
const SI_PREFIXES: [(&str, &str, i32); 21] = [
    ("deca", "da", 1),
    ("quetta", "Q", 30),
    ("ronna", "R", 27),
    ("yotta", "Y", 24),
    ("zetta", "Z", 21),
    ("exa", "E", 18),
    ("peta", "P", 15),
    ("tera", "T", 12),
    ("giga", "G", 9),
    ("mega", "M", 6),
    ("kilo", "k", 3),
    ("hecto", "h", 2),
    ("deci", "d", -1),
    ("centi", "c", -2),
    ("milli", "m", -3),
    ("micro", "u", -6),
    ("micro", "μ", -6),
    ("nano", "n", -9),
    ("pico", "p", -12),
    ("femto", "f", -15),
    ("atto", "a", -18),
];

/// IEC binary prefixes: long name, symbol, power of 1024
const BINARY_PREFIXES: [(&str, &str, u32); 6] = [
    ("kibi", "Ki", 1),
    ("mebi", "Mi", 2),
    ("gibi", "Gi", 3),
    ("tebi", "Ti", 4),
    ("pebi", "Pi", 5),
    ("exbi", "Ei", 6),
];

/// Registry of all known units
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
    prefixable: HashSet<String>,
    binary_prefixable: HashSet<String>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
            prefixable: HashSet::new(),
            binary_prefixable: HashSet::new(),
        };
        registry.register_all_units();
        debug!(
            units = registry.units.len(),
            aliases = registry.aliases.len(),
            "unit registry initialized"
        );
        registry
    }

    /// Get a registered unit by exact symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        self.aliases.get(symbol).and_then(|canonical| self.units.get(canonical))
    }

    /// Find a unit by symbol, alias, long name or plural, with optional prefix
    pub fn lookup(&self, name: &str) -> Option<Unit> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.get(name)
            .cloned()
            .or_else(|| self.by_name(name).cloned())
            .or_else(|| self.with_long_prefix(name))
            .or_else(|| self.with_short_prefix(name))
    }

    /// Resolve a unit name or fail with `UNKNOWN_UNIT`
    pub fn resolve(&self, name: &str) -> Result<Unit, QuantaError> {
        match self.lookup(name) {
            Some(unit) => {
                trace!(unit = name, symbol = %unit.symbol, "resolved unit");
                Ok(unit)
            }
            None => {
                let err = QuantaError::unknown_unit(name);
                Err(match self.suggest(name) {
                    Some(similar) => err.with_suggestion(format!("Did you mean '{}'?", similar)),
                    None => err,
                })
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Get all units in a category, sorted by symbol
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.units.values()
            .filter(|u| u.category == category)
            .collect();
        units.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    // ========== Lookup Helpers ==========

    /// Case-insensitive long names and plurals ("Hours", "inches", "bars")
    fn by_name(&self, name: &str) -> Option<&Unit> {
        let lower = name.to_lowercase();
        let singulars = [
            Some(lower.as_str()),
            lower.strip_suffix('s'),
            lower.strip_suffix("es"),
        ];
        for candidate in singulars.into_iter().flatten() {
            if let Some(unit) = self.aliases.get(candidate).and_then(|s| self.units.get(s)) {
                return Some(unit);
            }
        }
        let stripped = name.strip_suffix('s').filter(|s| s.chars().count() >= 2)?;
        self.units.get(stripped)
    }

    /// "kilowatts", "millimetres", "gibibytes"
    fn with_long_prefix(&self, name: &str) -> Option<Unit> {
        let lower = name.to_lowercase();
        for (long, short, exp) in SI_PREFIXES {
            let Some(rest) = lower.strip_prefix(long) else { continue };
            let base = self.get(rest).or_else(|| self.by_name(rest));
            if let Some(base) = base.filter(|u| self.prefixable.contains(&u.symbol)) {
                return Some(prefixed(base, short, long, &Number::from_scaled(1, exp)));
            }
        }
        for (long, short, power) in BINARY_PREFIXES {
            let Some(rest) = lower.strip_prefix(long) else { continue };
            let base = self.get(rest).or_else(|| self.by_name(rest));
            if let Some(base) = base.filter(|u| self.binary_prefixable.contains(&u.symbol)) {
                return Some(prefixed(base, short, long, &binary_scale(power)));
            }
        }
        None
    }

    /// "km", "mL", "kWh", "MiB"
    fn with_short_prefix(&self, name: &str) -> Option<Unit> {
        for (long, short, power) in BINARY_PREFIXES {
            let Some(rest) = name.strip_prefix(short) else { continue };
            if let Some(base) = self.get(rest).filter(|u| self.binary_prefixable.contains(&u.symbol)) {
                return Some(prefixed(base, short, long, &binary_scale(power)));
            }
        }
        for (long, short, exp) in SI_PREFIXES {
            let Some(rest) = name.strip_prefix(short) else { continue };
            if let Some(base) = self.get(rest).filter(|u| self.prefixable.contains(&u.symbol)) {
                return Some(prefixed(base, short, long, &Number::from_scaled(1, exp)));
            }
        }
        None
    }

    /// Closest known symbol or alias, for "did you mean" suggestions
    fn suggest(&self, name: &str) -> Option<String> {
        let query = name.to_lowercase();
        let max_distance = if query.chars().count() <= 3 { 1 } else { 2 };
        self.units.keys()
            .chain(self.aliases.keys())
            .map(|candidate| (edit_distance(&query, &candidate.to_lowercase()), candidate))
            .filter(|(distance, _)| *distance <= max_distance)
            .min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)))
            .map(|(_, candidate)| candidate.clone())
    }

    // ========== Registration ==========

    /// Register a unit under its symbol; its long name becomes an alias
    fn register(&mut self, unit: Unit) {
        let name = unit.name.to_lowercase();
        if !name.is_empty() && name != unit.symbol {
            self.aliases.entry(name).or_insert_with(|| unit.symbol.clone());
        }
        self.units.insert(unit.symbol.clone(), unit);
    }

    /// Register a unit that accepts SI prefixes
    fn register_prefixable(&mut self, unit: Unit) {
        self.prefixable.insert(unit.symbol.clone());
        self.register(unit);
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn aliases(&mut self, symbol: &str, aliases: &[&str]) {
        for alias in aliases {
            self.alias(alias, symbol);
        }
    }

    /// Register a unit built from already known units ("km/h" from km and h)
    fn compound(&mut self, name: &str, parts: &[(&str, i32)], aliases: &[&str]) {
        let config = NumericConfig::default();
        let mut unit = Unit::dimensionless();
        for (part, exp) in parts {
            let Some(base) = self.lookup(part) else {
                warn!(unit = name, part, "compound unit refers to an unknown unit");
                return;
            };
            match base.power(*exp, &config).and_then(|factor| unit.multiply(&factor)) {
                Ok(product) => unit = product,
                Err(e) => {
                    warn!(unit = name, error = %e, "cannot build compound unit");
                    return;
                }
            }
        }
        unit.name = name.to_string();
        let symbol = unit.symbol.clone();
        self.register(unit);
        self.aliases(&symbol, aliases);
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_temperature_units();
        self.register_current_units();
        self.register_amount_units();
        self.register_luminosity_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_velocity_units();
        self.register_acceleration_units();
        self.register_force_units();
        self.register_energy_units();
        self.register_power_units();
        self.register_pressure_units();
        self.register_frequency_units();
        self.register_electrical_units();
        self.register_data_units();
        self.register_angle_units();
        self.register_ratio_units();
        self.register_currency_units();
    }

    fn register_length_units(&mut self) {
        self.register_prefixable(Unit::new("m", "meter", Dimension::LENGTH, Number::from_i64(1), "length"));

        // Imperial/US
        self.register(Unit::new("in", "inch", Dimension::LENGTH, Number::from_scaled(254, -4), "length"));
        self.register(Unit::new("ft", "foot", Dimension::LENGTH, Number::from_scaled(3048, -4), "length"));
        self.register(Unit::new("yd", "yard", Dimension::LENGTH, Number::from_scaled(9144, -4), "length"));
        self.register(Unit::new("mi", "mile", Dimension::LENGTH, Number::from_scaled(1_609_344, -3), "length"));
        self.register(Unit::new("nmi", "nautical mile", Dimension::LENGTH, Number::from_i64(1852), "length"));

        // Astronomical
        self.register(Unit::new("au", "astronomical unit", Dimension::LENGTH, Number::from_i64(149_597_870_700), "length"));
        self.register(Unit::new("ly", "light year", Dimension::LENGTH, Number::from_i64(9_460_730_472_580_800), "length"));
        self.register(Unit::new("pc", "parsec", Dimension::LENGTH, Number::from_i64(30_856_775_814_913_673), "length"));
        self.register(Unit::new("Å", "angstrom", Dimension::LENGTH, Number::from_scaled(1, -10), "length"));

        self.aliases("m", &["metre"]);
        self.aliases("in", &["inches"]);
        self.aliases("ft", &["feet"]);
        self.aliases("ly", &["lightyear"]);
        self.aliases("Å", &["ångström"]);
    }

    fn register_mass_units(&mut self) {
        // The kilogram is the SI unit; prefixes attach to the gram
        self.register(Unit::new("kg", "kilogram", Dimension::MASS, Number::from_i64(1), "mass"));
        self.register_prefixable(Unit::new("g", "gram", Dimension::MASS, Number::from_ratio(1, 1000), "mass"));
        self.register(Unit::new("t", "tonne", Dimension::MASS, Number::from_i64(1000), "mass"));

        // Imperial/US
        self.register(Unit::new("lb", "pound", Dimension::MASS, Number::from_scaled(45_359_237, -8), "mass"));
        self.register(Unit::new("oz", "ounce", Dimension::MASS, Number::from_scaled(28_349_523_125, -12), "mass"));
        self.register(Unit::new("st", "stone", Dimension::MASS, Number::from_scaled(635_029_318, -8), "mass"));
        self.register(Unit::new("ton", "short ton", Dimension::MASS, Number::from_scaled(90_718_474, -5), "mass"));

        self.register(Unit::new("ct", "carat", Dimension::MASS, Number::from_scaled(2, -4), "mass"));
        self.register(Unit::new("gr", "grain", Dimension::MASS, Number::from_scaled(6_479_891, -11), "mass"));

        self.aliases("kg", &["kilo", "kilos", "kgs"]);
        self.aliases("g", &["gramme"]);
        self.aliases("t", &["metric ton"]);
        self.aliases("lb", &["lbs"]);
    }

    fn register_time_units(&mut self) {
        self.register_prefixable(Unit::new("s", "second", Dimension::TIME, Number::from_i64(1), "time"));
        self.register(Unit::new("min", "minute", Dimension::TIME, Number::from_i64(60), "time"));
        self.register(Unit::new("h", "hour", Dimension::TIME, Number::from_i64(3600), "time"));
        self.register(Unit::new("d", "day", Dimension::TIME, Number::from_i64(86_400), "time"));
        self.register(Unit::new("wk", "week", Dimension::TIME, Number::from_i64(604_800), "time"));
        self.register(Unit::new("fortnight", "fortnight", Dimension::TIME, Number::from_i64(1_209_600), "time"));

        // Calendar units: averaged Gregorian lengths for conversion, whole
        // months for date arithmetic
        self.register(Unit::new("mo", "month", Dimension::TIME, Number::from_i64(2_629_746), "time").calendar(1));
        self.register(Unit::new("yr", "year", Dimension::TIME, Number::from_i64(31_556_952), "time").calendar(12));
        self.register(Unit::new("decade", "decade", Dimension::TIME, Number::from_i64(315_569_520), "time").calendar(120));
        self.register(Unit::new("century", "century", Dimension::TIME, Number::from_i64(3_155_695_200), "time").calendar(1200));

        self.aliases("s", &["sec", "secs"]);
        self.aliases("min", &["mins"]);
        self.aliases("h", &["hr", "hrs"]);
        self.aliases("wk", &["wks"]);
        self.aliases("yr", &["yrs", "y", "annum"]);
        self.aliases("century", &["centuries"]);
    }

    fn register_temperature_units(&mut self) {
        self.register_prefixable(Unit::new("K", "kelvin", Dimension::TEMPERATURE, Number::from_i64(1), "temperature"));

        // K = C + 273.15
        self.register(Unit::with_offset(
            "°C", "celsius", Dimension::TEMPERATURE,
            Number::from_i64(1),
            Number::from_ratio(27_315, 100),
            "temperature",
        ));

        // K = (F + 459.67) * 5/9
        self.register(Unit::with_offset(
            "°F", "fahrenheit", Dimension::TEMPERATURE,
            Number::from_ratio(5, 9),
            Number::from_ratio(45_967, 180),
            "temperature",
        ));

        self.register(Unit::new("°R", "rankine", Dimension::TEMPERATURE, Number::from_ratio(5, 9), "temperature"));

        self.aliases("°C", &["degC", "centigrade", "degree celsius", "degrees celsius"]);
        self.aliases("°F", &["degF", "degree fahrenheit", "degrees fahrenheit"]);
        self.aliases("°R", &["degR"]);
    }

    fn register_current_units(&mut self) {
        self.register_prefixable(Unit::new("A", "ampere", Dimension::CURRENT, Number::from_i64(1), "current"));
        self.aliases("A", &["amp", "amps"]);
    }

    fn register_amount_units(&mut self) {
        self.register_prefixable(Unit::new("mol", "mole", Dimension::AMOUNT, Number::from_i64(1), "amount"));
    }

    fn register_luminosity_units(&mut self) {
        self.register_prefixable(Unit::new("cd", "candela", Dimension::LUMINOSITY, Number::from_i64(1), "luminosity"));
        // lm = cd·sr, and the steradian is dimensionless
        self.register(Unit::new("lm", "lumen", Dimension::LUMINOSITY, Number::from_i64(1), "luminosity"));
        self.register(Unit::new(
            "lx", "lux",
            Dimension::ILLUMINANCE,
            Number::from_i64(1),
            "illuminance",
        ));
    }

    fn register_area_units(&mut self) {
        self.compound("square meter", &[("m", 2)], &["m2", "m²", "sqm", "square metre"]);
        self.compound("square kilometer", &[("km", 2)], &["km2", "km²"]);
        self.compound("square centimeter", &[("cm", 2)], &["cm2", "cm²"]);
        self.compound("square millimeter", &[("mm", 2)], &["mm2", "mm²"]);
        self.compound("square foot", &[("ft", 2)], &["ft2", "ft²", "sqft", "sq ft", "square feet"]);
        self.compound("square inch", &[("in", 2)], &["in2", "in²"]);
        self.compound("square yard", &[("yd", 2)], &["yd2", "yd²"]);
        self.compound("square mile", &[("mi", 2)], &["mi2", "mi²"]);

        self.register(Unit::new("ha", "hectare", Dimension::AREA, Number::from_i64(10_000), "area"));
        self.register(Unit::new("ac", "acre", Dimension::AREA, Number::from_scaled(40_468_564_224, -7), "area"));
    }

    fn register_volume_units(&mut self) {
        self.compound("cubic meter", &[("m", 3)], &["m3", "m³", "cubic metre"]);
        self.compound("cubic centimeter", &[("cm", 3)], &["cm3", "cm³", "cc"]);
        self.compound("cubic foot", &[("ft", 3)], &["ft3", "ft³", "cubic feet"]);
        self.compound("cubic inch", &[("in", 3)], &["in3", "in³"]);

        self.register_prefixable(Unit::new("L", "liter", Dimension::VOLUME, Number::from_ratio(1, 1000), "volume"));
        self.aliases("L", &["l", "litre"]);

        // US customary
        self.register(Unit::new("gal", "gallon", Dimension::VOLUME, Number::from_scaled(3_785_411_784, -12), "volume"));
        self.register(Unit::new("qt", "quart", Dimension::VOLUME, Number::from_scaled(946_352_946, -12), "volume"));
        self.register(Unit::new("pt", "pint", Dimension::VOLUME, Number::from_scaled(473_176_473, -12), "volume"));
        self.register(Unit::new("cup", "cup", Dimension::VOLUME, Number::from_scaled(2_365_882_365, -13), "volume"));
        self.register(Unit::new("floz", "fluid ounce", Dimension::VOLUME, Number::from_scaled(295_735_295_625, -16), "volume"));
        self.register(Unit::new("tbsp", "tablespoon", Dimension::VOLUME, Number::from_scaled(1_478_676_478_125, -17), "volume"));
        self.register(Unit::new("tsp", "teaspoon", Dimension::VOLUME, Number::from_scaled(492_892_159_375, -17), "volume"));

        // Imperial
        self.register(Unit::new("impgal", "imperial gallon", Dimension::VOLUME, Number::from_scaled(454_609, -8), "volume"));
        self.register(Unit::new("imppt", "imperial pint", Dimension::VOLUME, Number::from_scaled(56_826_125, -11), "volume"));
    }

    fn register_velocity_units(&mut self) {
        self.compound("meter per second", &[("m", 1), ("s", -1)], &["mps"]);
        self.compound("kilometer per hour", &[("km", 1), ("h", -1)], &["kph", "kmh", "kmph"]);
        self.compound("foot per second", &[("ft", 1), ("s", -1)], &["fps"]);
        self.register(Unit::new("mph", "mile per hour", Dimension::VELOCITY, Number::from_scaled(44_704, -5), "velocity"));
        self.register(Unit::new("kn", "knot", Dimension::VELOCITY, Number::from_ratio(1852, 3600), "velocity"));
        self.aliases("kn", &["kt", "kts"]);
    }

    fn register_acceleration_units(&mut self) {
        self.compound("meter per second squared", &[("m", 1), ("s", -2)], &["m/s2", "m/s²"]);
    }

    fn register_force_units(&mut self) {
        self.register_prefixable(Unit::new("N", "newton", Dimension::FORCE, Number::from_i64(1), "force"));
        self.register(Unit::new("dyn", "dyne", Dimension::FORCE, Number::from_scaled(1, -5), "force"));
        self.register(Unit::new("lbf", "pound-force", Dimension::FORCE, Number::from_scaled(44_482_216_152_605, -13), "force"));
        self.register(Unit::new("kgf", "kilogram-force", Dimension::FORCE, Number::from_scaled(980_665, -5), "force"));
    }

    fn register_energy_units(&mut self) {
        self.register_prefixable(Unit::new("J", "joule", Dimension::ENERGY, Number::from_i64(1), "energy"));
        self.register_prefixable(Unit::new("cal", "calorie", Dimension::ENERGY, Number::from_scaled(4184, -3), "energy"));
        self.register(Unit::new("kcal", "kilocalorie", Dimension::ENERGY, Number::from_i64(4184), "energy"));
        self.register_prefixable(Unit::new("Wh", "watt-hour", Dimension::ENERGY, Number::from_i64(3600), "energy"));
        self.register_prefixable(Unit::new("eV", "electronvolt", Dimension::ENERGY, Number::from_scaled(1_602_176_634, -28), "energy"));
        self.register(Unit::new("BTU", "British thermal unit", Dimension::ENERGY, Number::from_scaled(105_505_585_262, -8), "energy"));
        self.register(Unit::new("erg", "erg", Dimension::ENERGY, Number::from_scaled(1, -7), "energy"));

        self.aliases("kcal", &["Cal", "Calorie", "Calories"]);
        self.aliases("Wh", &["watt hour"]);
        self.aliases("eV", &["electron volt"]);
        self.aliases("BTU", &["btu"]);
    }

    fn register_power_units(&mut self) {
        self.register_prefixable(Unit::new("W", "watt", Dimension::POWER, Number::from_i64(1), "power"));
        self.register(Unit::new("hp", "horsepower", Dimension::POWER, Number::from_scaled(745_699_872, -6), "power"));
    }

    fn register_pressure_units(&mut self) {
        self.register_prefixable(Unit::new("Pa", "pascal", Dimension::PRESSURE, Number::from_i64(1), "pressure"));
        self.register_prefixable(Unit::new("bar", "bar", Dimension::PRESSURE, Number::from_i64(100_000), "pressure"));
        self.register(Unit::new("atm", "atmosphere", Dimension::PRESSURE, Number::from_i64(101_325), "pressure"));
        self.register(Unit::new("psi", "pound per square inch", Dimension::PRESSURE, Number::from_scaled(6_894_757_293_168, -9), "pressure"));
        self.register(Unit::new("mmHg", "millimeter of mercury", Dimension::PRESSURE, Number::from_scaled(133_322_387_415, -9), "pressure"));
        self.register(Unit::new("torr", "torr", Dimension::PRESSURE, Number::from_ratio(101_325, 760), "pressure"));
    }

    fn register_frequency_units(&mut self) {
        self.register_prefixable(Unit::new("Hz", "hertz", Dimension::FREQUENCY, Number::from_i64(1), "frequency"));
        self.register(Unit::new("rpm", "revolution per minute", Dimension::FREQUENCY, Number::from_ratio(1, 60), "frequency"));
    }

    fn register_electrical_units(&mut self) {
        self.register_prefixable(Unit::new("V", "volt", Dimension::VOLTAGE, Number::from_i64(1), "electrical"));
        self.register_prefixable(Unit::new("Ω", "ohm", Dimension::RESISTANCE, Number::from_i64(1), "electrical"));
        self.register_prefixable(Unit::new("C", "coulomb", Dimension::CHARGE, Number::from_i64(1), "electrical"));
        self.register_prefixable(Unit::new(
            "F", "farad",
            Dimension::CAPACITANCE,
            Number::from_i64(1),
            "electrical",
        ));
        self.register_prefixable(Unit::new("Ah", "ampere-hour", Dimension::CHARGE, Number::from_i64(3600), "electrical"));
    }

    fn register_data_units(&mut self) {
        let bit = Unit::new("bit", "bit", Dimension::INFORMATION, Number::from_i64(1), "data");
        let byte = Unit::new("B", "byte", Dimension::INFORMATION, Number::from_i64(8), "data");
        for unit in [bit, byte] {
            self.binary_prefixable.insert(unit.symbol.clone());
            self.register_prefixable(unit);
        }
        self.register_prefixable(Unit::new("bps", "bit per second", Dimension::DATA_RATE, Number::from_i64(1), "data_rate"));

        self.aliases("bit", &["b"]);
        self.aliases("B", &["octet"]);
    }

    fn register_angle_units(&mut self) {
        // Angles are dimensionless; the factor converts to radians
        let pi = Number::pi(DEFAULT_PRECISION);
        self.register_prefixable(Unit::new("rad", "radian", Dimension::DIMENSIONLESS, Number::from_i64(1), "angle"));
        self.register(Unit::new("deg", "degree", Dimension::DIMENSIONLESS, pi.mul(&Number::from_ratio(1, 180)), "angle"));
        self.register(Unit::new("grad", "gradian", Dimension::DIMENSIONLESS, pi.mul(&Number::from_ratio(1, 200)), "angle"));
        self.register(Unit::new("arcmin", "arcminute", Dimension::DIMENSIONLESS, pi.mul(&Number::from_ratio(1, 10_800)), "angle"));
        self.register(Unit::new("arcsec", "arcsecond", Dimension::DIMENSIONLESS, pi.mul(&Number::from_ratio(1, 648_000)), "angle"));
        self.register(Unit::new("turn", "turn", Dimension::DIMENSIONLESS, pi.mul(&Number::from_i64(2)), "angle"));

        self.aliases("deg", &["°"]);
        self.aliases("grad", &["gon"]);
    }

    fn register_ratio_units(&mut self) {
        self.register(Unit::new("%", "percent", Dimension::DIMENSIONLESS, Number::from_ratio(1, 100), "ratio"));
        self.register(Unit::new("‰", "permille", Dimension::DIMENSIONLESS, Number::from_ratio(1, 1000), "ratio"));
        self.register(Unit::new("ppm", "part per million", Dimension::DIMENSIONLESS, Number::from_scaled(1, -6), "ratio"));

        self.aliases("%", &["pct", "per cent"]);
    }

    fn register_currency_units(&mut self) {
        // No exchange rates: a single currency and its subunit
        self.register(Unit::new("$", "dollar", Dimension::CURRENCY, Number::from_i64(1), "currency"));
        self.register(Unit::new("¢", "cent", Dimension::CURRENCY, Number::from_ratio(1, 100), "currency"));
        self.aliases("$", &["USD", "usd", "buck", "bucks"]);
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn prefixed(base: &Unit, symbol_prefix: &str, name_prefix: &str, scale: &Number) -> Unit {
    Unit::new(
        &format!("{}{}", symbol_prefix, base.symbol),
        &format!("{}{}", name_prefix, base.name),
        base.dimension,
        base.to_si_factor.mul(scale),
        &base.category,
    )
}

fn binary_scale(power: u32) -> Number {
    Number::from_i64(1_i64 << (10 * power))
}

/// Levenshtein distance over chars
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut curr = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        prev = curr;
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use quanta_core::codes;

    #[test]
    fn test_unit_registry() {
        let reg = UnitRegistry::new();

        assert!(reg.get("m").is_some());
        assert!(reg.get("kg").is_some());
        assert!(reg.get("s").is_some());

        assert_eq!(reg.lookup("meter").unwrap().symbol, "m");
        assert_eq!(reg.lookup("meters").unwrap().symbol, "m");
        assert_eq!(reg.lookup("kilogram").unwrap().symbol, "kg");

        assert!(reg.lookup("unknown_xyz").is_none());
    }

    #[test]
    fn test_plurals_and_case() {
        let reg = UnitRegistry::new();
        assert_eq!(reg.lookup("Hours").unwrap().symbol, "h");
        assert_eq!(reg.lookup("inches").unwrap().symbol, "in");
        assert_eq!(reg.lookup("feet").unwrap().symbol, "ft");
        assert_eq!(reg.lookup("bars").unwrap().symbol, "bar");
        assert_eq!(reg.lookup("centuries").unwrap().symbol, "century");
    }

    #[test]
    fn test_short_prefixes() {
        let reg = UnitRegistry::new();

        let km = reg.lookup("km").unwrap();
        assert_eq!(km.symbol, "km");
        assert_eq!(km.name, "kilometer");
        assert_eq!(km.to_si_factor, Number::from_i64(1000));
        assert!(km.to_si_factor.is_exact());

        assert_eq!(reg.lookup("mg").unwrap().to_si_factor, Number::from_scaled(1, -6));
        assert_eq!(reg.lookup("ml").unwrap().symbol, "mL");
        assert_eq!(reg.lookup("kWh").unwrap().to_si_factor, Number::from_i64(3_600_000));
        assert_eq!(reg.lookup("μs").unwrap().to_si_factor, Number::from_scaled(1, -6));

        // Registered symbols win over prefix readings
        assert_eq!(reg.lookup("min").unwrap().name, "minute");
        assert_eq!(reg.lookup("mi").unwrap().name, "mile");
        assert_eq!(reg.lookup("Pa").unwrap().name, "pascal");
    }

    #[test]
    fn test_long_prefixes() {
        let reg = UnitRegistry::new();
        let kw = reg.lookup("kilowatts").unwrap();
        assert_eq!(kw.symbol, "kW");
        assert_eq!(kw.dimension, Dimension::POWER);

        assert_eq!(reg.lookup("millimetres").unwrap().symbol, "mm");
        assert_eq!(reg.lookup("gibibytes").unwrap().to_si_factor, Number::from_i64(8 << 30));
    }

    #[test]
    fn test_binary_prefixes() {
        let reg = UnitRegistry::new();
        let mib = reg.lookup("MiB").unwrap();
        assert_eq!(mib.to_si_factor, Number::from_i64(8 * 1024 * 1024));
        assert_eq!(reg.lookup("MB").unwrap().to_si_factor, Number::from_i64(8_000_000));
        // Binary prefixes only apply to bits and bytes
        assert!(reg.lookup("Kim").is_none());
    }

    #[test]
    fn test_compound_units_are_exact() {
        let reg = UnitRegistry::new();
        let kmh = reg.lookup("kph").unwrap();
        assert_eq!(kmh.symbol, "km/h");
        assert_eq!(kmh.dimension, Dimension::VELOCITY);
        assert!(kmh.to_si_factor.is_exact());
        assert_eq!(kmh.to_si_factor, Number::from_ratio(5, 18));

        let area = reg.lookup("sqft").unwrap();
        assert_eq!(area.symbol, "ft^2");
        assert_eq!(area.category, "area");
    }

    #[test]
    fn test_temperature_conversions() {
        let reg = UnitRegistry::new();

        let c = reg.lookup("celsius").unwrap();
        let f = reg.lookup("degF").unwrap();

        let in_kelvin = c.to_si(&Number::from_i64(0));
        assert_eq!(in_kelvin, Number::from_ratio(27_315, 100));

        let boiling = c.convert_to(&Number::from_i64(100), &f).unwrap();
        assert_eq!(boiling, Number::from_i64(212));
        assert!(boiling.is_exact());
    }

    #[test]
    fn test_calendar_units() {
        let reg = UnitRegistry::new();
        assert_eq!(reg.lookup("months").unwrap().calendar_months, Some(1));
        assert_eq!(reg.lookup("years").unwrap().calendar_months, Some(12));
        assert_eq!(reg.lookup("decade").unwrap().calendar_months, Some(120));
        assert_eq!(reg.lookup("days").unwrap().calendar_months, None);
    }

    #[test]
    fn test_percent() {
        let reg = UnitRegistry::new();
        let pct = reg.lookup("percent").unwrap();
        assert_eq!(pct.symbol, "%");
        assert!(pct.is_dimensionless());
        assert_eq!(pct.to_si_factor, Number::from_ratio(1, 100));
    }

    #[test]
    fn test_resolve_unknown_suggests() {
        let reg = UnitRegistry::new();
        let err = reg.resolve("meterz").unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_UNIT);
        assert!(err.suggestion.unwrap().contains("meter"));

        let err = reg.resolve("zzzzzzzz").unwrap_err();
        assert!(err.suggestion.is_none());
    }

    #[test]
    fn test_by_category() {
        let reg = UnitRegistry::new();

        let length_units = reg.by_category("length");
        assert!(length_units.len() > 5);
        for unit in length_units {
            assert_eq!(unit.dimension, Dimension::LENGTH);
        }
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("meter", "meter"), 0);
        assert_eq!(edit_distance("metrs", "meters"), 1);
        assert_eq!(edit_distance("", "abc"), 3);
    }
}
