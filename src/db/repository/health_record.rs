use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{
    CoughFrequency, ExposureLevel, HealthInput, HealthRecord, RiskAssessment, Sex,
    StoredHealthRecord,
};

pub const AGE_RANGE: RangeInclusive<f64> = 0.0..=120.0;
pub const BMI_RANGE: RangeInclusive<f64> = 10.0..=50.0;
pub const SYSTOLIC_RANGE: RangeInclusive<f64> = 70.0..=250.0;
pub const DIASTOLIC_RANGE: RangeInclusive<f64> = 40.0..=150.0;
pub const BLOOD_SUGAR_RANGE: RangeInclusive<f64> = 30.0..=500.0;
pub const CHOLESTEROL_RANGE: RangeInclusive<f64> = 100.0..=500.0;

const SELECT_COLUMNS: &str = "id, user_id, age, sex, bmi, smoking, diabetes_family_history,
     blood_pressure_systolic, blood_pressure_diastolic, blood_sugar, cholesterol,
     environmental_exposure, coughing_frequency, risk_assessment, created_at, updated_at";

/// Persist one record, stamping `updated_at` with the write time.
///
/// The record is checked against the schema constraints first; a violation
/// writes nothing.
pub fn insert_health_record(
    conn: &Connection,
    record: &HealthRecord,
) -> Result<StoredHealthRecord, DatabaseError> {
    check_constraints(record)?;

    let id = Uuid::new_v4();
    let created_at = record.created_at.trunc_subsecs(6);
    let updated_at = Utc::now().trunc_subsecs(6);
    let risk_json = serde_json::to_string(&record.risk_assessment)?;
    let input = &record.input;

    conn.execute(
        "INSERT INTO health_records (id, user_id, age, sex, bmi, smoking, diabetes_family_history,
             blood_pressure_systolic, blood_pressure_diastolic, blood_sugar, cholesterol,
             environmental_exposure, coughing_frequency, risk_assessment, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            id.to_string(),
            record.user_id,
            input.age,
            input.sex,
            input.bmi,
            input.smoking,
            input.diabetes_family_history,
            input.blood_pressure_systolic,
            input.blood_pressure_diastolic,
            input.blood_sugar,
            input.cholesterol,
            input.environmental_exposure,
            input.coughing_frequency,
            risk_json,
            format_timestamp(&created_at),
            format_timestamp(&updated_at),
        ],
    )?;

    Ok(StoredHealthRecord {
        id,
        user_id: record.user_id.clone(),
        input: input.clone(),
        risk_assessment: record.risk_assessment.clone(),
        created_at,
        updated_at,
    })
}

/// All records owned by `user_id`, newest first.
pub fn list_health_records_for_user(
    conn: &Connection,
    user_id: &str,
) -> Result<Vec<StoredHealthRecord>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS}
         FROM health_records
         WHERE user_id = ?1
         ORDER BY created_at DESC, rowid DESC"
    ))?;
    let rows = stmt.query_map(params![user_id], row_to_health_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Number of records owned by `user_id`.
pub fn count_health_records_for_user(
    conn: &Connection,
    user_id: &str,
) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM health_records WHERE user_id = ?1",
        params![user_id],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

/// Structural invariants every stored record must satisfy.
pub fn check_constraints(record: &HealthRecord) -> Result<(), DatabaseError> {
    if record.user_id.trim().is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "userId is required".into(),
        ));
    }

    let input = &record.input;
    let ranges: [(&str, f64, &RangeInclusive<f64>); 6] = [
        ("age", input.age, &AGE_RANGE),
        ("bmi", input.bmi, &BMI_RANGE),
        ("bloodPressureSystolic", input.blood_pressure_systolic, &SYSTOLIC_RANGE),
        ("bloodPressureDiastolic", input.blood_pressure_diastolic, &DIASTOLIC_RANGE),
        ("bloodSugar", input.blood_sugar, &BLOOD_SUGAR_RANGE),
        ("cholesterol", input.cholesterol, &CHOLESTEROL_RANGE),
    ];
    for (field, value, range) in ranges {
        if !range.contains(&value) {
            return Err(DatabaseError::ConstraintViolation(format!(
                "{field} must be between {} and {}, got {value}",
                range.start(),
                range.end()
            )));
        }
    }

    Sex::from_str(&input.sex).map_err(enum_violation("sex"))?;
    ExposureLevel::from_str(&input.environmental_exposure)
        .map_err(enum_violation("environmentalExposure"))?;
    CoughFrequency::from_str(&input.coughing_frequency)
        .map_err(enum_violation("coughingFrequency"))?;

    Ok(())
}

fn enum_violation(field: &'static str) -> impl Fn(DatabaseError) -> DatabaseError {
    move |err| match err {
        DatabaseError::InvalidEnum { value, .. } => DatabaseError::ConstraintViolation(format!(
            "{field} has unsupported value '{value}'"
        )),
        other => other,
    }
}

/// Fixed-width UTC timestamp, so text order equals time order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn row_to_health_record(row: &rusqlite::Row) -> Result<StoredHealthRecord, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let risk_str: String = row.get(13)?;
    let created_str: String = row.get(14)?;
    let updated_str: String = row.get(15)?;

    let risk_assessment: RiskAssessment = serde_json::from_str(&risk_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(13, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(StoredHealthRecord {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        user_id: row.get(1)?,
        input: HealthInput {
            age: row.get(2)?,
            sex: row.get(3)?,
            bmi: row.get(4)?,
            smoking: row.get(5)?,
            diabetes_family_history: row.get(6)?,
            blood_pressure_systolic: row.get(7)?,
            blood_pressure_diastolic: row.get(8)?,
            blood_sugar: row.get(9)?,
            cholesterol: row.get(10)?,
            environmental_exposure: row.get(11)?,
            coughing_frequency: row.get(12)?,
        },
        risk_assessment,
        created_at: parse_timestamp(14, &created_str)?,
        updated_at: parse_timestamp(15, &updated_str)?,
    })
}
