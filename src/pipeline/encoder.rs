//! Feature encoding: raw health attributes → fixed-order numeric vector.
//!
//! Pure and deterministic. Categorical fallbacks are deliberately uneven:
//! an unrecognized `sex` encodes as 2, while unrecognized exposure or cough
//! values encode as -1. Both codes are part of the model input contract.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CoughFrequency, ExposureLevel, HealthInput, NumericInput, RawHealthInput};

/// Canonical field order, shared by validation and the feature vector.
pub const FEATURE_NAMES: [&str; 11] = [
    "age",
    "sex",
    "bmi",
    "smoking",
    "diabetesFamilyHistory",
    "bloodPressureSystolic",
    "bloodPressureDiastolic",
    "bloodSugar",
    "cholesterol",
    "environmentalExposure",
    "coughingFrequency",
];

const SEX_FALLBACK: f64 = 2.0;
const ORDINAL_FALLBACK: f64 = -1.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid numeric value for {0}")]
    InvalidNumber(&'static str),
}

/// Numeric input to the inference service, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    pub age: f64,
    pub sex: f64,
    pub bmi: f64,
    pub smoking: f64,
    pub diabetes_family_history: f64,
    pub blood_pressure_systolic: f64,
    pub blood_pressure_diastolic: f64,
    pub blood_sugar: f64,
    pub cholesterol: f64,
    pub environmental_exposure: f64,
    pub coughing_frequency: f64,
}

impl FeatureVector {
    /// `(name, value)` pairs in canonical order.
    pub fn entries(&self) -> [(&'static str, f64); 11] {
        let values = [
            self.age,
            self.sex,
            self.bmi,
            self.smoking,
            self.diabetes_family_history,
            self.blood_pressure_systolic,
            self.blood_pressure_diastolic,
            self.blood_sugar,
            self.cholesterol,
            self.environmental_exposure,
            self.coughing_frequency,
        ];
        std::array::from_fn(|i| (FEATURE_NAMES[i], values[i]))
    }

    fn check_finite(&self) -> Result<(), ValidationError> {
        match self.entries().into_iter().find(|(_, v)| !v.is_finite()) {
            Some((name, _)) => Err(ValidationError::InvalidNumber(name)),
            None => Ok(()),
        }
    }
}

/// Validate and encode in one step.
pub fn encode(raw: &RawHealthInput) -> Result<FeatureVector, ValidationError> {
    let input = validate(raw)?;
    encode_validated(&input)
}

/// Check that every field is present and cast numeric fields.
///
/// Reports all missing fields at once, in canonical order.
pub fn validate(raw: &RawHealthInput) -> Result<HealthInput, ValidationError> {
    let present = [
        numeric_present(&raw.age),
        text_present(&raw.sex),
        numeric_present(&raw.bmi),
        raw.smoking.is_some(),
        raw.diabetes_family_history.is_some(),
        numeric_present(&raw.blood_pressure_systolic),
        numeric_present(&raw.blood_pressure_diastolic),
        numeric_present(&raw.blood_sugar),
        numeric_present(&raw.cholesterol),
        text_present(&raw.environmental_exposure),
        text_present(&raw.coughing_frequency),
    ];

    let missing: Vec<&'static str> = FEATURE_NAMES
        .iter()
        .zip(present)
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        tracing::debug!(?missing, "Health input rejected: missing fields");
        return Err(ValidationError::MissingFields(missing));
    }

    let missing_one = |name: &'static str| ValidationError::MissingFields(vec![name]);
    Ok(HealthInput {
        age: cast(&raw.age).ok_or_else(|| missing_one("age"))?,
        sex: raw.sex.clone().ok_or_else(|| missing_one("sex"))?,
        bmi: cast(&raw.bmi).ok_or_else(|| missing_one("bmi"))?,
        smoking: raw.smoking.ok_or_else(|| missing_one("smoking"))?,
        diabetes_family_history: raw
            .diabetes_family_history
            .ok_or_else(|| missing_one("diabetesFamilyHistory"))?,
        blood_pressure_systolic: cast(&raw.blood_pressure_systolic)
            .ok_or_else(|| missing_one("bloodPressureSystolic"))?,
        blood_pressure_diastolic: cast(&raw.blood_pressure_diastolic)
            .ok_or_else(|| missing_one("bloodPressureDiastolic"))?,
        blood_sugar: cast(&raw.blood_sugar).ok_or_else(|| missing_one("bloodSugar"))?,
        cholesterol: cast(&raw.cholesterol).ok_or_else(|| missing_one("cholesterol"))?,
        environmental_exposure: raw
            .environmental_exposure
            .clone()
            .ok_or_else(|| missing_one("environmentalExposure"))?,
        coughing_frequency: raw
            .coughing_frequency
            .clone()
            .ok_or_else(|| missing_one("coughingFrequency"))?,
    })
}

/// Encode an already-validated input, rejecting non-finite values.
pub fn encode_validated(input: &HealthInput) -> Result<FeatureVector, ValidationError> {
    let vector = FeatureVector {
        age: input.age,
        sex: encode_sex(&input.sex),
        bmi: input.bmi,
        smoking: flag(input.smoking),
        diabetes_family_history: flag(input.diabetes_family_history),
        blood_pressure_systolic: input.blood_pressure_systolic,
        blood_pressure_diastolic: input.blood_pressure_diastolic,
        blood_sugar: input.blood_sugar,
        cholesterol: input.cholesterol,
        environmental_exposure: ExposureLevel::from_str(&input.environmental_exposure)
            .map(|e| f64::from(e.ordinal()))
            .unwrap_or(ORDINAL_FALLBACK),
        coughing_frequency: CoughFrequency::from_str(&input.coughing_frequency)
            .map(|c| f64::from(c.ordinal()))
            .unwrap_or(ORDINAL_FALLBACK),
    };
    vector.check_finite()?;
    Ok(vector)
}

fn encode_sex(sex: &str) -> f64 {
    match sex {
        "Male" => 1.0,
        "Female" => 0.0,
        _ => SEX_FALLBACK,
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn numeric_present(value: &Option<NumericInput>) -> bool {
    value.as_ref().is_some_and(|v| !v.is_empty_text())
}

fn text_present(value: &Option<String>) -> bool {
    value.as_ref().is_some_and(|v| !v.is_empty())
}

fn cast(value: &Option<NumericInput>) -> Option<f64> {
    value.as_ref().map(NumericInput::to_f64)
}
