//! Rule-based sugarcane quality assessment
//!
//! Classifies a juice sample from its measurements and lists the
//! parameters that fall outside processing norms.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use shared::{BatchPredictResponse, BatchResultEntry, PredictResponseBody, QualityClass, Variety};

use crate::error::{AppError, AppResult};

/// Measurements read from a prediction request
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentInput {
    /// Free-form variety code; unknown codes are accepted
    pub variety: String,
    pub brix: Decimal,
    pub sucrose: Decimal,
    pub purity: Decimal,
    pub fiber: Decimal,
    pub moisture: Decimal,
    pub age: Decimal,
}

impl Default for AssessmentInput {
    fn default() -> Self {
        Self {
            variety: Variety::default().code().to_string(),
            brix: Decimal::ZERO,
            sucrose: Decimal::ZERO,
            purity: Decimal::ZERO,
            fiber: Decimal::ZERO,
            moisture: Decimal::ZERO,
            age: Decimal::ZERO,
        }
    }
}

impl AssessmentInput {
    /// Read an input from a JSON object.
    ///
    /// Numbers may arrive as JSON numbers or numeric strings. Absent fields
    /// default to zero and an absent variety to the default variety.
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let object = body
            .as_object()
            .ok_or_else(|| AppError::ValidationError("Request body must be a JSON object".into()))?;

        let variety = match object.get("variety") {
            None | Some(Value::Null) => Variety::default().code().to_string(),
            Some(Value::String(code)) => code.clone(),
            Some(other) => other.to_string(),
        };

        Ok(Self {
            variety,
            brix: read_number(object, "brix")?,
            sucrose: read_number(object, "sucrose")?,
            purity: read_number(object, "purity")?,
            fiber: read_number(object, "fiber")?,
            moisture: read_number(object, "moisture")?,
            age: read_number(object, "age")?,
        })
    }
}

fn read_number(object: &Map<String, Value>, field: &str) -> AppResult<Decimal> {
    let invalid = || AppError::Validation {
        field: field.to_string(),
        message: format!("{} must be a number", field),
    };

    match object.get(field) {
        None => Ok(Decimal::ZERO),
        Some(Value::Number(n)) => parse_decimal(&n.to_string()).ok_or_else(invalid),
        Some(Value::String(s)) => parse_decimal(s.trim()).ok_or_else(invalid),
        Some(_) => Err(invalid()),
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

/// Outcome of assessing one sample
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub class: QualityClass,
    pub explanation: &'static str,
    pub suggestion: String,
    pub detected_issues: Vec<String>,
}

impl From<Assessment> for PredictResponseBody {
    fn from(assessment: Assessment) -> Self {
        Self {
            predicted_quality: assessment.class.to_string(),
            explanation: assessment.explanation.to_string(),
            suggestion: assessment.suggestion,
            detected_issues: assessment.detected_issues,
        }
    }
}

/// List out-of-norm parameters in a fixed order
pub fn detect_issues(input: &AssessmentInput) -> Vec<String> {
    let checks = [
        (input.sucrose < Decimal::from(14), "Low sucrose"),
        (input.brix < Decimal::from(18), "Low brix"),
        (input.purity < Decimal::from(85), "Low purity"),
        (input.fiber > Decimal::from(15), "High fiber"),
        (input.moisture > Decimal::from(75), "High moisture"),
        (input.age > Decimal::from(14), "Over-aged cane"),
    ];

    checks
        .into_iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, issue)| issue.to_string())
        .collect()
}

/// Classify a sample from sucrose, purity and fiber
pub fn classify(input: &AssessmentInput) -> QualityClass {
    if input.sucrose < Decimal::from(12)
        || input.purity < Decimal::from(75)
        || input.fiber > Decimal::from(17)
    {
        QualityClass::Poor
    } else if input.sucrose < Decimal::from(14) || input.purity < Decimal::from(82) {
        QualityClass::Average
    } else {
        QualityClass::Good
    }
}

pub fn assess(input: &AssessmentInput) -> Assessment {
    let class = classify(input);
    let detected_issues = detect_issues(input);

    let (explanation, suggestion) = match class {
        QualityClass::Poor => (
            "Cane quality is below acceptable standards.",
            format!(
                "Corrective actions required before processing. Major issues: {}",
                detected_issues.join(", ")
            ),
        ),
        QualityClass::Average => (
            "Cane quality is acceptable but not optimal.",
            "Minor improvements recommended before processing.".to_string(),
        ),
        QualityClass::Good => (
            "Cane quality is good.",
            "Safe for processing with optimal juice recovery.".to_string(),
        ),
    };

    tracing::debug!(
        variety = %input.variety,
        quality = %class,
        issues = detected_issues.len(),
        "sample assessed"
    );

    Assessment {
        class,
        explanation,
        suggestion,
        detected_issues,
    }
}

/// Assess a single request body
pub fn predict(body: &Value) -> AppResult<PredictResponseBody> {
    let input = AssessmentInput::from_json(body)?;
    Ok(assess(&input).into())
}

/// Assess every row of a batch request, keeping input order.
///
/// A row is identified by its `id`, else its `Sample_ID`, else "N/A". One
/// unreadable row fails the whole batch.
pub fn predict_batch(body: &Value) -> AppResult<BatchPredictResponse> {
    let samples = match body.get("samples") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(rows)) => rows.clone(),
        Some(_) => return Err(AppError::ValidationError("samples must be an array".into())),
    };

    let results = samples
        .iter()
        .map(|sample| {
            let input = AssessmentInput::from_json(sample)?;
            Ok(BatchResultEntry {
                sample_id: sample_id(sample),
                quality: classify(&input).to_string(),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    tracing::info!(rows = results.len(), "batch assessed");
    Ok(BatchPredictResponse { results })
}

fn sample_id(sample: &Value) -> String {
    match sample.get("id").or_else(|| sample.get("Sample_ID")) {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => "N/A".to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let input = AssessmentInput::from_json(&json!({})).unwrap();
        assert_eq!(input, AssessmentInput::default());
        assert_eq!(input.variety, "CO86032");
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let input = AssessmentInput::from_json(&json!({"brix": "19.5", "age": 12})).unwrap();
        assert_eq!(input.brix, dec("19.5"));
        assert_eq!(input.age, dec("12"));
    }

    #[test]
    fn non_numeric_value_names_the_field() {
        let err = AssessmentInput::from_json(&json!({"fiber": "high"})).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "fiber"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(AssessmentInput::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn sample_id_fallbacks() {
        assert_eq!(sample_id(&json!({"id": "A", "Sample_ID": "B"})), "A");
        assert_eq!(sample_id(&json!({"Sample_ID": "B"})), "B");
        assert_eq!(sample_id(&json!({"id": 7})), "7");
        assert_eq!(sample_id(&json!({})), "N/A");
    }
}
