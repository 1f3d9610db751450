//! Sugarcane sample models

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::MeasurementField;

/// Cane variety catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Variety {
    #[default]
    #[serde(rename = "CO86032")]
    Co86032,
    #[serde(rename = "CO0238")]
    Co0238,
    #[serde(rename = "COJ64")]
    Coj64,
    #[serde(rename = "Local")]
    Local,
}

impl Variety {
    pub const ALL: [Variety; 4] = [
        Variety::Co86032,
        Variety::Co0238,
        Variety::Coj64,
        Variety::Local,
    ];

    /// Catalog code sent to the prediction service
    pub fn code(&self) -> &'static str {
        match self {
            Variety::Co86032 => "CO86032",
            Variety::Co0238 => "CO0238",
            Variety::Coj64 => "COJ64",
            Variety::Local => "Local",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Variety::Co86032 => "High Yield",
            Variety::Co0238 => "Early Spec",
            Variety::Coj64 => "Standard",
            Variety::Local => "Local Variety",
        }
    }
}

impl std::fmt::Display for Variety {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Variety {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Variety::ALL
            .into_iter()
            .find(|v| v.code().eq_ignore_ascii_case(s))
            .ok_or("Unknown cane variety")
    }
}

/// One sample's measured and derived fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub variety: Variety,
    pub age_months: Decimal,
    pub brix_percent: Decimal,
    pub sucrose_percent: Decimal,
    pub purity_percent: Decimal,
    pub fiber_percent: Decimal,
    pub moisture_percent: Decimal,
    /// When set, `purity_percent` is owned by [`derive_purity`]
    pub auto_purity: bool,
}

impl Default for SampleRecord {
    fn default() -> Self {
        Self {
            id: None,
            variety: Variety::default(),
            age_months: Decimal::ZERO,
            brix_percent: Decimal::ZERO,
            sucrose_percent: Decimal::ZERO,
            purity_percent: Decimal::ZERO,
            fiber_percent: Decimal::ZERO,
            moisture_percent: Decimal::ZERO,
            auto_purity: true,
        }
    }
}

/// A single operator edit to a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleEdit {
    Variety(Variety),
    Measurement(MeasurementField, Decimal),
    AutoPurity(bool),
}

impl SampleEdit {
    /// Whether the edit is an input of the purity derivation
    pub fn affects_purity(&self) -> bool {
        matches!(
            self,
            SampleEdit::AutoPurity(_)
                | SampleEdit::Measurement(MeasurementField::Brix, _)
                | SampleEdit::Measurement(MeasurementField::Sucrose, _)
        )
    }
}

impl SampleRecord {
    /// Read a numeric field
    pub fn measurement(&self, field: MeasurementField) -> Decimal {
        match field {
            MeasurementField::AgeMonths => self.age_months,
            MeasurementField::Brix => self.brix_percent,
            MeasurementField::Sucrose => self.sucrose_percent,
            MeasurementField::Purity => self.purity_percent,
            MeasurementField::Fiber => self.fiber_percent,
            MeasurementField::Moisture => self.moisture_percent,
        }
    }

    /// A sample counts as interacted once any primary measurement is nonzero.
    /// Purity and moisture are deliberately excluded.
    pub fn is_interacted(&self) -> bool {
        !self.brix_percent.is_zero()
            || !self.sucrose_percent.is_zero()
            || !self.fiber_percent.is_zero()
            || !self.age_months.is_zero()
    }

    /// Apply an edit, producing the next record.
    ///
    /// The derived purity is recomputed only when the edit touches one of its
    /// inputs. Range checks and the purity lock are the caller's concern.
    pub fn with_edit(&self, edit: SampleEdit) -> SampleRecord {
        let mut next = self.clone();
        match edit {
            SampleEdit::Variety(variety) => next.variety = variety,
            SampleEdit::AutoPurity(enabled) => next.auto_purity = enabled,
            SampleEdit::Measurement(field, value) => match field {
                MeasurementField::AgeMonths => next.age_months = value,
                MeasurementField::Brix => next.brix_percent = value,
                MeasurementField::Sucrose => next.sucrose_percent = value,
                MeasurementField::Purity => next.purity_percent = value,
                MeasurementField::Fiber => next.fiber_percent = value,
                MeasurementField::Moisture => next.moisture_percent = value,
            },
        }

        if edit.affects_purity() {
            next.purity_percent = derive_purity(
                next.sucrose_percent,
                next.brix_percent,
                next.auto_purity,
                next.purity_percent,
            );
        }
        next
    }
}

/// Round half away from zero to two decimal places
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Purity ratio derived from sucrose and brix.
///
/// Returns `current` untouched when auto-derivation is off, brix is not
/// positive, or the ratio does not fit in a `Decimal`.
pub fn derive_purity(sucrose: Decimal, brix: Decimal, auto_purity: bool, current: Decimal) -> Decimal {
    if !auto_purity || brix <= Decimal::ZERO {
        return current;
    }
    sucrose
        .checked_div(brix)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(current, round2)
}
