//! Cooking measurement conversion

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Error, Result};

/// Millilitres per unit
const VOLUME_TO_ML: &[(&str, f64)] = &[
    ("ml", 1.0),
    ("milliliter", 1.0),
    ("l", 1000.0),
    ("liter", 1000.0),
    ("cup", 236.588),
    ("tbsp", 14.787),
    ("tablespoon", 14.787),
    ("tsp", 4.929),
    ("teaspoon", 4.929),
    ("fl_oz", 29.574),
    ("fluid_ounce", 29.574),
    ("pint", 473.176),
    ("quart", 946.353),
    ("gallon", 3785.41),
];

/// Grams per unit
const WEIGHT_TO_G: &[(&str, f64)] = &[
    ("g", 1.0),
    ("gram", 1.0),
    ("kg", 1000.0),
    ("kilogram", 1000.0),
    ("oz", 28.3495),
    ("ounce", 28.3495),
    ("lb", 453.592),
    ("pound", 453.592),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    Volume,
    Weight,
    Temperature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TempScale {
    Celsius,
    Fahrenheit,
}

/// An amount with its unit as the caller wrote it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Quantity {
    pub amount: f64,
    pub unit: String,
}

/// Result of a conversion, rounded for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Conversion {
    pub original: Quantity,
    pub converted: Quantity,
    #[serde(rename = "type")]
    pub kind: ConversionKind,
}

/// Convert and round the way a cook reads it: two decimals for volume and
/// weight, whole degrees for temperature.
pub fn convert(amount: f64, from_unit: &str, to_unit: &str) -> Result<Conversion> {
    let (value, kind) = convert_value(amount, from_unit, to_unit)?;
    let rounded = match kind {
        ConversionKind::Temperature => value.round(),
        _ => round_to(value, 2),
    };

    Ok(Conversion {
        original: Quantity {
            amount,
            unit: from_unit.to_string(),
        },
        converted: Quantity {
            amount: rounded,
            unit: to_unit.to_string(),
        },
        kind,
    })
}

/// Unrounded conversion
pub fn convert_value(amount: f64, from_unit: &str, to_unit: &str) -> Result<(f64, ConversionKind)> {
    if !amount.is_finite() {
        return Err(Error::validation("amount", "must be a finite number"));
    }

    let from = normalize_unit(from_unit);
    let to = normalize_unit(to_unit);

    if let (Some(f), Some(t)) = (factor(VOLUME_TO_ML, &from), factor(VOLUME_TO_ML, &to)) {
        return Ok((amount * f / t, ConversionKind::Volume));
    }

    if let (Some(f), Some(t)) = (factor(WEIGHT_TO_G, &from), factor(WEIGHT_TO_G, &to)) {
        return Ok((amount * f / t, ConversionKind::Weight));
    }

    if let (Some(f), Some(t)) = (temp_scale(&from), temp_scale(&to)) {
        let value = match (f, t) {
            (TempScale::Celsius, TempScale::Fahrenheit) => amount * 9.0 / 5.0 + 32.0,
            (TempScale::Fahrenheit, TempScale::Celsius) => (amount - 32.0) * 5.0 / 9.0,
            _ => amount,
        };
        return Ok((value, ConversionKind::Temperature));
    }

    Err(Error::UnsupportedConversion {
        from: from_unit.to_string(),
        to: to_unit.to_string(),
    })
}

/// Unit names accepted for each kind of conversion
pub fn supported_units() -> Vec<(ConversionKind, Vec<&'static str>)> {
    vec![
        (ConversionKind::Volume, VOLUME_TO_ML.iter().map(|(u, _)| *u).collect()),
        (ConversionKind::Weight, WEIGHT_TO_G.iter().map(|(u, _)| *u).collect()),
        (ConversionKind::Temperature, vec!["celsius", "fahrenheit", "c", "f"]),
    ]
}

/// Kind of a unit, if it is known
pub fn unit_kind(unit: &str) -> Option<ConversionKind> {
    let unit = normalize_unit(unit);
    if factor(VOLUME_TO_ML, &unit).is_some() {
        Some(ConversionKind::Volume)
    } else if factor(WEIGHT_TO_G, &unit).is_some() {
        Some(ConversionKind::Weight)
    } else if temp_scale(&unit).is_some() {
        Some(ConversionKind::Temperature)
    } else {
        None
    }
}

fn normalize_unit(unit: &str) -> String {
    unit.trim().to_lowercase().replace(' ', "_").replace('°', "")
}

fn factor(table: &[(&str, f64)], unit: &str) -> Option<f64> {
    let lookup = |u: &str| table.iter().find(|(name, _)| *name == u).map(|(_, f)| *f);

    // Plurals: "cups", "grams", "pounds"
    lookup(unit).or_else(|| unit.strip_suffix('s').and_then(lookup))
}

fn temp_scale(unit: &str) -> Option<TempScale> {
    if unit == "c" || unit.contains("celsius") {
        Some(TempScale::Celsius)
    } else if unit == "f" || unit.contains("fahrenheit") {
        Some(TempScale::Fahrenheit)
    } else {
        None
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
