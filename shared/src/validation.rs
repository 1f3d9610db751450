//! Validation utilities for sugarcane samples

use rust_decimal::Decimal;

use crate::types::MeasurementField;

// ============================================================================
// Measurement Validations
// ============================================================================

/// Validate that a measurement lies within its field's range
pub fn validate_measurement(field: MeasurementField, value: Decimal) -> Result<(), &'static str> {
    let range = field.range();
    if value < range.min {
        return Err("Value is below the accepted range");
    }
    if value > range.max {
        return Err("Value is above the accepted range");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn measurement_bounds_are_inclusive() {
        assert!(validate_measurement(MeasurementField::Brix, dec("25")).is_ok());
        assert!(validate_measurement(MeasurementField::Brix, dec("0")).is_ok());
        assert!(validate_measurement(MeasurementField::Brix, dec("25.1")).is_err());
        assert!(validate_measurement(MeasurementField::AgeMonths, dec("-0.5")).is_err());
        assert!(validate_measurement(MeasurementField::Moisture, dec("85")).is_ok());
    }
}
