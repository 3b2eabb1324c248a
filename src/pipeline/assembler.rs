//! Merge validated inputs and a risk summary into a persistable record.

use chrono::{DateTime, Utc};

use crate::models::{HealthInput, HealthRecord, RiskAssessment, RiskSummary};

/// Build the record for one submission, stamped with the current time.
pub fn assemble(user_id: &str, input: &HealthInput, summary: &RiskSummary) -> HealthRecord {
    assemble_at(user_id, input, summary, Utc::now())
}

/// [`assemble`] with an explicit creation time.
pub fn assemble_at(
    user_id: &str,
    input: &HealthInput,
    summary: &RiskSummary,
    created_at: DateTime<Utc>,
) -> HealthRecord {
    let risk_assessment = RiskAssessment::from(summary.clone());

    let unslotted: Vec<&str> = risk_assessment.unslotted_labels().collect();
    if !unslotted.is_empty() {
        tracing::debug!(labels = ?unslotted, "Storing labels outside the named disease slots");
    }

    HealthRecord {
        user_id: user_id.to_string(),
        input: input.clone(),
        risk_assessment,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiseaseSlot, RiskSummaryEntry};
    use chrono::TimeZone;

    fn input() -> HealthInput {
        HealthInput {
            age: 33.0,
            sex: "Other".into(),
            bmi: 21.0,
            smoking: false,
            diabetes_family_history: true,
            blood_pressure_systolic: 115.0,
            blood_pressure_diastolic: 72.0,
            blood_sugar: 88.0,
            cholesterol: 170.0,
            environmental_exposure: "low".into(),
            coughing_frequency: "rare".into(),
        }
    }

    fn entry(score: f64) -> RiskSummaryEntry {
        RiskSummaryEntry {
            risk_score: score,
            probability: "N/A".into(),
            last_updated: Utc::now(),
            features_used: vec![],
        }
    }

    #[test]
    fn copies_inputs_and_owner() {
        let created = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let record = assemble_at("user-7", &input(), &RiskSummary::new(), created);
        assert_eq!(record.user_id, "user-7");
        assert_eq!(record.input, input());
        assert_eq!(record.created_at, created);
        assert!(record.risk_assessment.is_empty());
    }

    #[test]
    fn matching_labels_fill_named_slots() {
        let mut summary = RiskSummary::new();
        summary.insert("diabetes".into(), entry(12.0));
        summary.insert("respiratory".into(), entry(30.0));

        let record = assemble("u", &input(), &summary);
        assert_eq!(record.risk_assessment.slot(DiseaseSlot::Diabetes).unwrap().risk_score, 12.0);
        assert_eq!(record.risk_assessment.slot(DiseaseSlot::Respiratory).unwrap().risk_score, 30.0);
        assert!(record.risk_assessment.slot(DiseaseSlot::HeartDisease).is_none());
    }

    #[test]
    fn labels_without_a_slot_are_kept() {
        let mut summary = RiskSummary::new();
        summary.insert("heart_disease".into(), entry(55.0));
        summary.insert("kidney".into(), entry(5.0));

        let record = assemble("u", &input(), &summary);
        assert_eq!(record.risk_assessment.len(), 2);
        assert_eq!(record.risk_assessment.get("heart_disease").unwrap().risk_score, 55.0);
        assert_eq!(record.risk_assessment.get("kidney").unwrap().risk_score, 5.0);
    }
}
