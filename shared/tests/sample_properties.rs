//! Property tests for purity derivation, advisory hints and batch parsing

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    derive_purity, evaluate_hints, parse_batch, MeasurementField, SampleEdit, SampleRecord,
};

fn tenths(n: u32) -> Decimal {
    Decimal::new(n as i64, 1)
}

// =============================================================================
// Purity derivation
// =============================================================================

mod purity {
    use super::*;

    proptest! {
        /// Derived purity stays within half a hundredth of the exact ratio
        #[test]
        fn prop_derived_purity_within_rounding(
            sucrose in 0u32..=220,
            brix in 1u32..=250,
        ) {
            let (sucrose, brix) = (tenths(sucrose), tenths(brix));
            let purity = derive_purity(sucrose, brix, true, Decimal::ZERO);
            let exact = sucrose / brix * Decimal::ONE_HUNDRED;
            prop_assert!((purity - exact).abs() <= Decimal::new(5, 3));
            prop_assert!(purity.scale() <= 2);
        }

        /// Zero brix leaves whatever purity was there
        #[test]
        fn prop_zero_brix_keeps_current(sucrose in 0u32..=220, current in 0u32..=1000) {
            let current = tenths(current);
            prop_assert_eq!(derive_purity(tenths(sucrose), Decimal::ZERO, true, current), current);
        }

        /// Brix too small for the ratio to fit never panics and keeps purity
        #[test]
        fn prop_tiny_brix_keeps_current(
            sucrose in 80u32..=220,
            scale in 26u32..=28,
            current in 0u32..=1000,
        ) {
            let current = tenths(current);
            let brix = Decimal::new(1, scale);
            prop_assert_eq!(derive_purity(tenths(sucrose), brix, true, current), current);
        }

        /// Edits to unrelated fields never move purity
        #[test]
        fn prop_unrelated_edit_keeps_purity(fiber in 0u32..=200, purity in 0u32..=1000) {
            let sample = SampleRecord {
                purity_percent: tenths(purity),
                ..SampleRecord::default()
            };
            let edited = sample.with_edit(SampleEdit::Measurement(MeasurementField::Fiber, tenths(fiber)));
            prop_assert_eq!(edited.purity_percent, sample.purity_percent);
        }
    }
}

// =============================================================================
// Advisory hints
// =============================================================================

mod hints {
    use super::*;

    proptest! {
        /// Same sample, same hints, in the same order
        #[test]
        fn prop_hints_are_deterministic(
            brix in 0u32..=250,
            purity in 0u32..=1000,
            fiber in 0u32..=200,
            age in 0u32..=180,
        ) {
            let sample = SampleRecord {
                brix_percent: tenths(brix),
                purity_percent: tenths(purity),
                fiber_percent: tenths(fiber),
                age_months: tenths(age),
                ..SampleRecord::default()
            };
            prop_assert_eq!(evaluate_hints(&sample), evaluate_hints(&sample.clone()));
            prop_assert!(evaluate_hints(&sample).len() <= 4);
        }
    }
}

// =============================================================================
// Batch parsing
// =============================================================================

mod batch {
    use super::*;

    proptest! {
        /// Every data row gets an id, synthetic ids follow row position
        #[test]
        fn prop_rows_without_id_are_numbered(rows in 1usize..30) {
            let mut csv = String::from("id,brix\n");
            for _ in 0..rows {
                csv.push_str(",18\n");
            }

            let samples = parse_batch(&csv).unwrap();
            prop_assert_eq!(samples.len(), rows);
            for (index, sample) in samples.iter().enumerate() {
                let expected = format!("SAMP-{:03}", index + 1);
                prop_assert_eq!(sample.id(), Some(expected.as_str()));
            }
        }
    }
}
