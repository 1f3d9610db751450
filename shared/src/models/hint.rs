//! Advisory hints computed locally from a sample

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SampleRecord;

/// Hint severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HintSeverity {
    Critical,
    Acceptable,
    Optimal,
}

/// Advisory hint about current field values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hint {
    pub text: String,
    pub severity: HintSeverity,
}

impl Hint {
    pub fn new(text: &str, severity: HintSeverity) -> Self {
        Self {
            text: text.to_string(),
            severity,
        }
    }
}

/// Text of the hint shown when no rule matches
pub const IDEAL_RANGE_TEXT: &str = "Parameters within ideal range";

/// Hint shown by callers when [`evaluate_hints`] produced nothing
pub fn ideal_range_hint() -> Hint {
    Hint::new(IDEAL_RANGE_TEXT, HintSeverity::Optimal)
}

struct HintRule {
    applies: fn(&SampleRecord) -> bool,
    text: &'static str,
    severity: HintSeverity,
}

// Order is part of the output contract.
const HINT_RULES: [HintRule; 6] = [
    HintRule {
        applies: |s| s.fiber_percent > Decimal::from(15),
        text: "High fiber may reduce sugar recovery",
        severity: HintSeverity::Critical,
    },
    HintRule {
        applies: |s| s.brix_percent < Decimal::from(14),
        text: "Low sugar content detected",
        severity: HintSeverity::Critical,
    },
    HintRule {
        applies: |s| s.brix_percent > Decimal::from(20),
        text: "Optimal sugar content detected",
        severity: HintSeverity::Optimal,
    },
    HintRule {
        applies: |s| s.purity_percent < Decimal::from(80),
        text: "Low purity detected",
        severity: HintSeverity::Critical,
    },
    HintRule {
        applies: |s| s.age_months < Decimal::from(10),
        text: "Cane might be under-matured",
        severity: HintSeverity::Acceptable,
    },
    HintRule {
        applies: |s| s.age_months > Decimal::from(16),
        text: "Cane might be over-matured",
        severity: HintSeverity::Acceptable,
    },
];

/// Evaluate every advisory rule against the sample.
///
/// Rules are independent; all matches are returned in rule order. Whether the
/// sample is interacted is not checked here.
pub fn evaluate_hints(sample: &SampleRecord) -> Vec<Hint> {
    HINT_RULES
        .iter()
        .filter(|rule| (rule.applies)(sample))
        .map(|rule| Hint::new(rule.text, rule.severity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(fiber: i64, brix: i64, purity: i64, age: i64) -> SampleRecord {
        SampleRecord {
            fiber_percent: Decimal::from(fiber),
            brix_percent: Decimal::from(brix),
            purity_percent: Decimal::from(purity),
            age_months: Decimal::from(age),
            ..SampleRecord::default()
        }
    }

    fn texts(hints: &[Hint]) -> Vec<&str> {
        hints.iter().map(|h| h.text.as_str()).collect()
    }

    #[test]
    fn poor_sample_matches_four_rules_in_order() {
        let hints = evaluate_hints(&sample(16, 10, 75, 8));
        assert_eq!(
            texts(&hints),
            vec![
                "High fiber may reduce sugar recovery",
                "Low sugar content detected",
                "Low purity detected",
                "Cane might be under-matured",
            ]
        );
        assert_eq!(hints[3].severity, HintSeverity::Acceptable);
    }

    #[test]
    fn rich_sample_only_gets_optimal_sugar() {
        let hints = evaluate_hints(&sample(5, 22, 90, 12));
        assert_eq!(hints, vec![Hint::new("Optimal sugar content detected", HintSeverity::Optimal)]);
    }

    #[test]
    fn thresholds_are_strict() {
        assert!(evaluate_hints(&sample(15, 14, 80, 10)).is_empty());
        assert!(evaluate_hints(&sample(15, 20, 80, 16)).is_empty());
    }

    #[test]
    fn over_matured_cane() {
        let hints = evaluate_hints(&sample(10, 18, 85, 17));
        assert_eq!(texts(&hints), vec!["Cane might be over-matured"]);
    }

    #[test]
    fn blank_sample_still_evaluates() {
        // Suppression of a blank form belongs to the caller
        let hints = evaluate_hints(&SampleRecord::default());
        assert_eq!(
            texts(&hints),
            vec![
                "Low sugar content detected",
                "Low purity detected",
                "Cane might be under-matured",
            ]
        );
    }

    #[test]
    fn engine_never_emits_ideal_range() {
        let hints = evaluate_hints(&sample(10, 18, 85, 12));
        assert!(hints.is_empty());
        assert_eq!(ideal_range_hint().severity, HintSeverity::Optimal);
    }
}
