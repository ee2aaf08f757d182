//! Input validation: raw operator input to a typed, range-checked record.
//!
//! Validation is exhaustive. Every field is checked and every violation is
//! collected, so a caller can fix the whole form in one round trip.

use std::fmt;

use serde::Serialize;

use super::patient::{
    ChestPainType, Field, PatientRecord, RawPatientRecord, RawValue, RestingEcg, Selection, Sex,
    StSlope, Thalassemia,
};

/// Inclusive numeric domain for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRule {
    pub field: Field,
    pub min: f64,
    pub max: f64,
    /// Field is an integer quantity; fractional input is rejected.
    pub integral: bool,
}

/// Numeric domains, one per numeric field.
pub const NUMERIC_RULES: [NumericRule; 6] = [
    NumericRule { field: Field::Age, min: 20.0, max: 100.0, integral: true },
    NumericRule { field: Field::RestingBloodPressure, min: 80.0, max: 200.0, integral: true },
    NumericRule { field: Field::Cholesterol, min: 100.0, max: 600.0, integral: true },
    NumericRule { field: Field::MaxHeartRate, min: 70.0, max: 210.0, integral: true },
    NumericRule { field: Field::StDepression, min: 0.0, max: 6.0, integral: false },
    NumericRule { field: Field::MajorVesselsColored, min: 0.0, max: 4.0, integral: true },
];

/// Look up the numeric domain for a field, if it is numeric.
#[must_use]
pub fn numeric_rule(field: Field) -> Option<&'static NumericRule> {
    NUMERIC_RULES.iter().find(|r| r.field == field)
}

/// A single field-level problem.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldViolation {
    /// Numeric value outside the declared inclusive range.
    #[error("{field}: {value} is outside [{min}, {max}]")]
    Range {
        field: Field,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value is not a member of the field's domain (unknown selection,
    /// non-numeric text, fractional integer, wrong kind of value).
    #[error("{field}: '{value}' is not a valid value")]
    Domain { field: Field, value: String },
}

impl FieldViolation {
    /// Field this violation refers to.
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Self::Range { field, .. } | Self::Domain { field, .. } => *field,
        }
    }

    fn domain(field: Field, raw: &RawValue) -> Self {
        Self::Domain {
            field,
            value: raw.display(),
        }
    }
}

/// Aggregated validation failure. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// All violations, in field order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether a given field has at least one violation.
    #[must_use]
    pub fn has_field(&self, field: Field) -> bool {
        self.violations.iter().any(|v| v.field() == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s): ", self.violations.len())?;
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A patient record that passed validation.
///
/// The only ways to obtain one are [`validate`] and `TryFrom<PatientRecord>`,
/// so the encoder can rely on every field being within its domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedRecord(PatientRecord);

impl ValidatedRecord {
    #[must_use]
    pub fn record(&self) -> &PatientRecord {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> PatientRecord {
        self.0
    }
}

impl TryFrom<PatientRecord> for ValidatedRecord {
    type Error = ValidationError;

    fn try_from(record: PatientRecord) -> Result<Self, Self::Error> {
        let numeric = [
            (Field::Age, f64::from(record.age)),
            (Field::RestingBloodPressure, f64::from(record.resting_blood_pressure)),
            (Field::Cholesterol, f64::from(record.cholesterol)),
            (Field::MaxHeartRate, f64::from(record.max_heart_rate)),
            (Field::StDepression, record.st_depression),
            (Field::MajorVesselsColored, f64::from(record.major_vessels_colored)),
        ];

        let violations: Vec<FieldViolation> = numeric
            .iter()
            .filter_map(|&(field, value)| check_number(field, value).err())
            .collect();

        if violations.is_empty() {
            Ok(Self(record))
        } else {
            Err(ValidationError { violations })
        }
    }
}

/// Validate raw input into a typed record.
///
/// # Errors
/// Returns a [`ValidationError`] listing every field that failed, in field order.
pub fn validate(raw: &RawPatientRecord) -> Result<ValidatedRecord, ValidationError> {
    let mut violations = Vec::new();

    let age = collect(&mut violations, parse_integer(raw, Field::Age));
    let sex = collect(&mut violations, parse_selection::<Sex>(raw, Field::Sex));
    let chest_pain_type = collect(
        &mut violations,
        parse_selection::<ChestPainType>(raw, Field::ChestPainType),
    );
    let resting_blood_pressure =
        collect(&mut violations, parse_integer(raw, Field::RestingBloodPressure));
    let cholesterol = collect(&mut violations, parse_integer(raw, Field::Cholesterol));
    let fasting_blood_sugar_high =
        collect(&mut violations, parse_flag(raw, Field::FastingBloodSugarHigh));
    let resting_ecg = collect(
        &mut violations,
        parse_selection::<RestingEcg>(raw, Field::RestingEcg),
    );
    let max_heart_rate = collect(&mut violations, parse_integer(raw, Field::MaxHeartRate));
    let exercise_induced_angina =
        collect(&mut violations, parse_flag(raw, Field::ExerciseInducedAngina));
    let st_depression = collect(&mut violations, parse_number(raw, Field::StDepression));
    let st_slope = collect(&mut violations, parse_selection::<StSlope>(raw, Field::StSlope));
    let major_vessels_colored =
        collect(&mut violations, parse_integer(raw, Field::MajorVesselsColored));
    let thalassemia = collect(
        &mut violations,
        parse_selection::<Thalassemia>(raw, Field::Thalassemia),
    );

    // Every `None` above pushed a violation, so the else branch is never empty.
    let (
        Some(age),
        Some(sex),
        Some(chest_pain_type),
        Some(resting_blood_pressure),
        Some(cholesterol),
        Some(fasting_blood_sugar_high),
        Some(resting_ecg),
        Some(max_heart_rate),
        Some(exercise_induced_angina),
        Some(st_depression),
        Some(st_slope),
        Some(major_vessels_colored),
        Some(thalassemia),
    ) = (
        age,
        sex,
        chest_pain_type,
        resting_blood_pressure,
        cholesterol,
        fasting_blood_sugar_high,
        resting_ecg,
        max_heart_rate,
        exercise_induced_angina,
        st_depression,
        st_slope,
        major_vessels_colored,
        thalassemia,
    )
    else {
        return Err(ValidationError { violations });
    };

    // Integer ranges were checked against u8/u16-compatible bounds already.
    Ok(ValidatedRecord(PatientRecord {
        age: age as u16,
        sex,
        chest_pain_type,
        resting_blood_pressure: resting_blood_pressure as u16,
        cholesterol: cholesterol as u16,
        fasting_blood_sugar_high,
        resting_ecg,
        max_heart_rate: max_heart_rate as u16,
        exercise_induced_angina,
        st_depression,
        st_slope,
        major_vessels_colored: major_vessels_colored as u8,
        thalassemia,
    }))
}

fn collect<T>(violations: &mut Vec<FieldViolation>, result: Result<T, FieldViolation>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            violations.push(e);
            None
        }
    }
}

fn check_number(field: Field, value: f64) -> Result<f64, FieldViolation> {
    let Some(rule) = numeric_rule(field) else {
        return Err(FieldViolation::Domain {
            field,
            value: value.to_string(),
        });
    };

    if !value.is_finite() {
        return Err(FieldViolation::Domain {
            field,
            value: value.to_string(),
        });
    }
    if rule.integral && value.fract() != 0.0 {
        return Err(FieldViolation::Domain {
            field,
            value: value.to_string(),
        });
    }
    if !(rule.min..=rule.max).contains(&value) {
        return Err(FieldViolation::Range {
            field,
            value,
            min: rule.min,
            max: rule.max,
        });
    }
    Ok(value)
}

fn parse_number(raw: &RawPatientRecord, field: Field) -> Result<f64, FieldViolation> {
    let value = raw.get(field);
    let number = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| FieldViolation::domain(field, value))?,
        RawValue::Flag(_) | RawValue::Missing => return Err(FieldViolation::domain(field, value)),
    };
    check_number(field, number)
}

fn parse_integer(raw: &RawPatientRecord, field: Field) -> Result<u32, FieldViolation> {
    // Range bounds are non-negative and well below u32::MAX.
    parse_number(raw, field).map(|n| n as u32)
}

fn parse_selection<T: Selection>(raw: &RawPatientRecord, field: Field) -> Result<T, FieldViolation> {
    let value = raw.get(field);
    match value {
        RawValue::Text(s) => T::parse(s).ok_or_else(|| FieldViolation::domain(field, value)),
        _ => Err(FieldViolation::domain(field, value)),
    }
}

fn parse_flag(raw: &RawPatientRecord, field: Field) -> Result<bool, FieldViolation> {
    let value = raw.get(field);
    match value {
        RawValue::Flag(b) => Ok(*b),
        RawValue::Text(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if s.eq_ignore_ascii_case("no") || s.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(FieldViolation::domain(field, value))
            }
        }
        RawValue::Number(_) | RawValue::Missing => Err(FieldViolation::domain(field, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_raw() -> RawPatientRecord {
        RawPatientRecord::from(&PatientRecord::sample())
    }

    #[test]
    fn test_valid_record_passes() {
        let validated = validate(&valid_raw()).expect("Should validate");
        assert_eq!(validated.record(), &PatientRecord::sample());
    }

    #[test]
    fn test_text_numbers_and_yes_no_are_accepted() {
        let mut raw = valid_raw();
        raw.age = " 45 ".into();
        raw.st_depression = "1.4".into();
        raw.fasting_blood_sugar_high = "Yes".into();
        raw.exercise_induced_angina = "no".into();

        let record = validate(&raw).expect("Should validate").into_inner();
        assert_eq!(record.age, 45);
        assert!((record.st_depression - 1.4).abs() < f64::EPSILON);
        assert!(record.fasting_blood_sugar_high);
        assert!(!record.exercise_induced_angina);
    }

    #[test]
    fn test_age_and_chest_pain_are_both_reported() {
        let mut raw = valid_raw();
        raw.age = 150.0.into();
        raw.chest_pain_type = "Unknown".into();

        let err = validate(&raw).expect_err("Must fail");
        assert_eq!(err.violations().len(), 2);
        assert_eq!(
            err.violations()[0],
            FieldViolation::Range {
                field: Field::Age,
                value: 150.0,
                min: 20.0,
                max: 100.0,
            }
        );
        assert_eq!(
            err.violations()[1],
            FieldViolation::Domain {
                field: Field::ChestPainType,
                value: "Unknown".into(),
            }
        );
    }

    #[test]
    fn test_null_and_absent_values_are_domain_violations() {
        let mut doc = serde_json::to_value(valid_raw()).expect("Should serialize");
        doc["age"] = serde_json::Value::Null;
        doc["chestPainType"] = "Unknown".into();

        let raw: RawPatientRecord = serde_json::from_value(doc.clone()).expect("Should parse");
        assert_eq!(raw.age, RawValue::Missing);
        let err = validate(&raw).expect_err("Must fail");
        assert_eq!(
            err.violations(),
            &[
                FieldViolation::Domain {
                    field: Field::Age,
                    value: "missing".into(),
                },
                FieldViolation::Domain {
                    field: Field::ChestPainType,
                    value: "Unknown".into(),
                },
            ]
        );

        let mut absent = doc;
        absent
            .as_object_mut()
            .expect("Record is an object")
            .remove("age");
        let raw: RawPatientRecord = serde_json::from_value(absent).expect("Should parse");
        let err = validate(&raw).expect_err("Must fail");
        assert_eq!(err.violations().len(), 2);
        assert!(err.has_field(Field::Age));
        assert!(err.has_field(Field::ChestPainType));
    }

    #[test]
    fn test_each_numeric_bound_is_inclusive() {
        for rule in NUMERIC_RULES {
            for edge in [rule.min, rule.max] {
                assert!(check_number(rule.field, edge).is_ok(), "{} at {edge}", rule.field);
            }

            let below = rule.min - 1.0;
            let above = rule.max + 1.0;
            for outside in [below, above] {
                match check_number(rule.field, outside) {
                    Err(FieldViolation::Range { field, .. }) => assert_eq!(field, rule.field),
                    other => panic!("expected range error for {}, got {other:?}", rule.field),
                }
            }
        }
    }

    #[test]
    fn test_every_field_names_itself_when_invalid() {
        for field in Field::ALL {
            let mut raw = valid_raw();
            let bad: RawValue = "not-a-value".into();
            match field {
                Field::Age => raw.age = bad,
                Field::Sex => raw.sex = bad,
                Field::ChestPainType => raw.chest_pain_type = bad,
                Field::RestingBloodPressure => raw.resting_blood_pressure = bad,
                Field::Cholesterol => raw.cholesterol = bad,
                Field::FastingBloodSugarHigh => raw.fasting_blood_sugar_high = bad,
                Field::RestingEcg => raw.resting_ecg = bad,
                Field::MaxHeartRate => raw.max_heart_rate = bad,
                Field::ExerciseInducedAngina => raw.exercise_induced_angina = bad,
                Field::StDepression => raw.st_depression = bad,
                Field::StSlope => raw.st_slope = bad,
                Field::MajorVesselsColored => raw.major_vessels_colored = bad,
                Field::Thalassemia => raw.thalassemia = bad,
            }

            let err = validate(&raw).expect_err("Must fail");
            assert_eq!(err.violations().len(), 1, "{field}");
            assert!(err.has_field(field));
        }
    }

    #[test]
    fn test_all_violations_collected() {
        let raw = RawPatientRecord {
            age: 10.0.into(),
            sex: "Other".into(),
            chest_pain_type: "Typical Angina".into(),
            resting_blood_pressure: 250.0.into(),
            cholesterol: "abc".into(),
            fasting_blood_sugar_high: 1.0.into(),
            resting_ecg: "Normal".into(),
            max_heart_rate: 150.0.into(),
            exercise_induced_angina: false.into(),
            st_depression: 6.5.into(),
            st_slope: "Flat".into(),
            major_vessels_colored: 5.0.into(),
            thalassemia: "Normal".into(),
        };

        let err = validate(&raw).expect_err("Must fail");
        let fields: Vec<Field> = err.violations().iter().map(FieldViolation::field).collect();
        assert_eq!(
            fields,
            vec![
                Field::Age,
                Field::Sex,
                Field::RestingBloodPressure,
                Field::Cholesterol,
                Field::FastingBloodSugarHigh,
                Field::StDepression,
                Field::MajorVesselsColored,
            ]
        );
    }

    #[test]
    fn test_fractional_integer_is_domain_error() {
        let mut raw = valid_raw();
        raw.major_vessels_colored = 1.5.into();
        let err = validate(&raw).expect_err("Must fail");
        assert!(matches!(
            err.violations()[0],
            FieldViolation::Domain { field: Field::MajorVesselsColored, .. }
        ));
    }

    #[test]
    fn test_non_finite_is_domain_error() {
        let mut raw = valid_raw();
        raw.st_depression = "NaN".into();
        let err = validate(&raw).expect_err("Must fail");
        assert!(matches!(
            err.violations()[0],
            FieldViolation::Domain { field: Field::StDepression, .. }
        ));
    }

    #[test]
    fn test_typed_record_range_check() {
        let mut record = PatientRecord::sample();
        record.age = 150;
        record.cholesterol = 90;
        let err = ValidatedRecord::try_from(record).expect_err("Must fail");
        assert!(err.has_field(Field::Age));
        assert!(err.has_field(Field::Cholesterol));
        assert_eq!(err.violations().len(), 2);

        assert!(ValidatedRecord::try_from(PatientRecord::sample()).is_ok());
    }

    #[test]
    fn test_error_display_lists_everything() {
        let mut raw = valid_raw();
        raw.age = 150.0.into();
        raw.chest_pain_type = "Unknown".into();
        let msg = validate(&raw).expect_err("Must fail").to_string();
        assert!(msg.starts_with("2 invalid field(s)"));
        assert!(msg.contains("age: 150 is outside [20, 100]"));
        assert!(msg.contains("chestPainType: 'Unknown'"));
    }
}
