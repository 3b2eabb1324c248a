use serde::{Deserialize, Serialize};

/// A numeric attribute as it arrives from a form: either a JSON number or
/// the text a user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Empty text is treated as an absent value.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, NumericInput::Text(t) if t.is_empty())
    }

    /// Numeric cast; unparseable text becomes NaN so the caller can reject it.
    pub fn to_f64(&self) -> f64 {
        match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(t) => t.trim().parse::<f64>().unwrap_or(f64::NAN),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

/// Health attributes as supplied by the caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHealthInput {
    pub age: Option<NumericInput>,
    pub sex: Option<String>,
    pub bmi: Option<NumericInput>,
    pub smoking: Option<bool>,
    pub diabetes_family_history: Option<bool>,
    pub blood_pressure_systolic: Option<NumericInput>,
    pub blood_pressure_diastolic: Option<NumericInput>,
    pub blood_sugar: Option<NumericInput>,
    pub cholesterol: Option<NumericInput>,
    pub environmental_exposure: Option<String>,
    pub coughing_frequency: Option<String>,
}

/// Health attributes with every field present and numbers cast.
///
/// Categorical values are kept verbatim; the record store decides whether
/// they belong to the allowed sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInput {
    pub age: f64,
    pub sex: String,
    pub bmi: f64,
    pub smoking: bool,
    pub diabetes_family_history: bool,
    pub blood_pressure_systolic: f64,
    pub blood_pressure_diastolic: f64,
    pub blood_sugar: f64,
    pub cholesterol: f64,
    pub environmental_exposure: String,
    pub coughing_frequency: String,
}
