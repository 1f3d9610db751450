//! WebAssembly module for the Sugarcane Quality Analysis system
//!
//! Provides client-side computation for:
//! - Purity derivation while parameters are typed
//! - Advisory hints for the live insights panel
//! - Batch file parsing and the downloadable template
//! - Quality tier classification, gauge bands and batch summaries
//! - The cane variety catalog

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shared::{
    evaluate_hints, ideal_range_hint, parse_batch, summarize_batch, BatchResultEntry, QualityClass,
    SampleRecord, Variety, SAMPLE_TEMPLATE, TEMPLATE_FILE_NAME,
};
use wasm_bindgen::prelude::*;

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn read_sample(sample_json: &str) -> Result<SampleRecord, String> {
    serde_json::from_str(sample_json).map_err(|e| format!("Invalid sample JSON: {}", e))
}

fn insights_json(sample_json: &str) -> Result<String, String> {
    let sample = read_sample(sample_json)?;
    if !sample.is_interacted() {
        return Ok("null".to_string());
    }

    let mut hints = evaluate_hints(&sample);
    if hints.is_empty() {
        hints.push(ideal_range_hint());
    }
    serde_json::to_string(&hints).map_err(|e| e.to_string())
}

fn batch_json(csv: &str) -> Result<String, String> {
    let rows = parse_batch(csv).map_err(|e| e.to_string())?;
    serde_json::to_string(&rows).map_err(|e| e.to_string())
}

fn summary_json(results_json: &str) -> Result<String, String> {
    let results: Vec<BatchResultEntry> = serde_json::from_str(results_json)
        .map_err(|e| format!("Invalid batch results JSON: {}", e))?;
    serde_json::to_string(&summarize_batch(&results)).map_err(|e| e.to_string())
}

fn catalog_json() -> String {
    let catalog: Vec<serde_json::Value> = Variety::ALL
        .into_iter()
        .map(|variety| {
            serde_json::json!({
                "code": variety.code(),
                "description": variety.description(),
            })
        })
        .collect();
    serde_json::Value::Array(catalog).to_string()
}

/// Purity as sucrose/brix, rounded to two decimals
#[wasm_bindgen]
pub fn derive_sample_purity(sucrose: f64, brix: f64, auto_purity: bool, current: f64) -> f64 {
    let purity = shared::derive_purity(
        to_decimal(sucrose),
        to_decimal(brix),
        auto_purity,
        to_decimal(current),
    );
    purity.to_f64().unwrap_or(current)
}

/// Hints for a sample as a JSON array, or `null` before any interaction
#[wasm_bindgen]
pub fn live_insights(sample_json: &str) -> Result<String, JsValue> {
    insights_json(sample_json).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn is_sample_interacted(sample_json: &str) -> Result<bool, JsValue> {
    read_sample(sample_json)
        .map(|sample| sample.is_interacted())
        .map_err(|e| JsValue::from_str(&e))
}

/// Parse an uploaded batch file into a JSON array of rows
#[wasm_bindgen]
pub fn parse_batch_file(csv: &str) -> Result<String, JsValue> {
    batch_json(csv).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn sample_template() -> String {
    SAMPLE_TEMPLATE.to_string()
}

#[wasm_bindgen]
pub fn template_file_name() -> String {
    TEMPLATE_FILE_NAME.to_string()
}

/// Classify a service quality label as Good, Average or Poor
#[wasm_bindgen]
pub fn quality_tier(label: &str) -> String {
    QualityClass::from_label(label).to_string()
}

/// Lower and upper bound of the gauge band for a quality label
#[wasm_bindgen]
pub fn quality_score_band(label: &str) -> Vec<u8> {
    let band = QualityClass::from_label(label).score_band();
    vec![*band.start(), *band.end()]
}

/// Count batch results per quality tier, as a JSON object
#[wasm_bindgen]
pub fn summarize_batch_results(results_json: &str) -> Result<String, JsValue> {
    summary_json(results_json).map_err(|e| JsValue::from_str(&e))
}

/// Variety codes and descriptions for the identity step, as a JSON array
#[wasm_bindgen]
pub fn variety_catalog() -> String {
    catalog_json()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_purity() {
        let purity = derive_sample_purity(15.0, 18.0, true, 0.0);
        assert!((purity - 83.33).abs() < 0.001);
        assert_eq!(derive_sample_purity(15.0, 0.0, true, 42.0), 42.0);
        assert_eq!(derive_sample_purity(15.0, 18.0, false, 42.0), 42.0);
    }

    #[test]
    fn test_insights_before_interaction() {
        let sample = serde_json::to_string(&SampleRecord::default()).unwrap();
        assert_eq!(insights_json(&sample).unwrap(), "null");
        assert!(!is_sample_interacted(&sample).unwrap());
    }

    #[test]
    fn test_insights_ideal_range() {
        let sample = SampleRecord {
            brix_percent: Decimal::from(18),
            sucrose_percent: Decimal::from(16),
            purity_percent: Decimal::from(89),
            age_months: Decimal::from(12),
            ..SampleRecord::default()
        };
        let json = insights_json(&serde_json::to_string(&sample).unwrap()).unwrap();
        assert!(json.contains("Parameters within ideal range"));
        assert!(json.contains("optimal"));
    }

    #[test]
    fn test_invalid_sample_json() {
        assert!(read_sample("{not json").is_err());
    }

    #[test]
    fn test_parse_template() {
        let json = batch_json(&sample_template()).unwrap();
        assert!(json.contains("TRK-001"));
        assert!(batch_json("id,brix").is_err());
    }

    #[test]
    fn test_quality_tier() {
        assert_eq!(quality_tier("POOR quality"), "Poor");
        assert_eq!(quality_tier("average"), "Average");
        assert_eq!(quality_tier("Excellent"), "Good");
        assert_eq!(template_file_name(), "sugarcane_sample.csv");
    }

    #[test]
    fn test_quality_score_band() {
        assert_eq!(quality_score_band("Good"), vec![85, 95]);
        assert_eq!(quality_score_band("average"), vec![50, 70]);
        assert_eq!(quality_score_band("Poor"), vec![20, 40]);
    }

    #[test]
    fn test_summarize_batch_results() {
        let json = summary_json(
            r#"[{"Sample_ID":"A","Quality":"Good"},{"Sample_ID":"B","Quality":"Poor"},{"Sample_ID":"C","Quality":"good"}]"#,
        )
        .unwrap();
        assert_eq!(json, r#"{"Good":2,"Poor":1}"#);
        assert!(summary_json("not json").is_err());
    }

    #[test]
    fn test_variety_catalog() {
        let catalog: serde_json::Value = serde_json::from_str(&variety_catalog()).unwrap();
        assert_eq!(catalog.as_array().unwrap().len(), 4);
        assert_eq!(catalog[0]["code"], "CO86032");
        assert_eq!(catalog[0]["description"], "High Yield");
    }
}
