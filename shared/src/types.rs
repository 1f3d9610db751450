//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inclusive bounds a measurement may take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl FieldRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Numeric fields of a sample record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementField {
    AgeMonths,
    Brix,
    Sucrose,
    Purity,
    Fiber,
    Moisture,
}

impl MeasurementField {
    pub const ALL: [MeasurementField; 6] = [
        MeasurementField::AgeMonths,
        MeasurementField::Brix,
        MeasurementField::Sucrose,
        MeasurementField::Purity,
        MeasurementField::Fiber,
        MeasurementField::Moisture,
    ];

    /// Accepted range for the field
    pub fn range(&self) -> FieldRange {
        match self {
            MeasurementField::AgeMonths => FieldRange::new(Decimal::ZERO, Decimal::from(18)),
            MeasurementField::Brix => FieldRange::new(Decimal::ZERO, Decimal::from(25)),
            MeasurementField::Sucrose => FieldRange::new(Decimal::ZERO, Decimal::from(22)),
            MeasurementField::Purity => FieldRange::new(Decimal::ZERO, Decimal::ONE_HUNDRED),
            MeasurementField::Fiber => FieldRange::new(Decimal::ZERO, Decimal::from(20)),
            MeasurementField::Moisture => FieldRange::new(Decimal::ZERO, Decimal::from(85)),
        }
    }

    /// Key used on the wire and in batch file headers
    pub fn key(&self) -> &'static str {
        match self {
            MeasurementField::AgeMonths => "age",
            MeasurementField::Brix => "brix",
            MeasurementField::Sucrose => "sucrose",
            MeasurementField::Purity => "purity",
            MeasurementField::Fiber => "fiber",
            MeasurementField::Moisture => "moisture",
        }
    }
}

impl std::fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasurementField::AgeMonths => write!(f, "Cane Age (Months)"),
            MeasurementField::Brix => write!(f, "Brix %"),
            MeasurementField::Sucrose => write!(f, "Sucrose %"),
            MeasurementField::Purity => write!(f, "Purity %"),
            MeasurementField::Fiber => write!(f, "Fiber %"),
            MeasurementField::Moisture => write!(f, "Moisture %"),
        }
    }
}
