//! Feature encoding: validated record to the classifier's input vector.

use serde::Serialize;

use super::patient::{Field, Selection};
use super::validation::ValidatedRecord;

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 13;

/// Feature order the classifier was trained with.
///
/// Changing this without retraining silently corrupts every prediction.
pub const FEATURE_ORDER: [Field; FEATURE_COUNT] = [
    Field::Age,
    Field::Sex,
    Field::ChestPainType,
    Field::RestingBloodPressure,
    Field::Cholesterol,
    Field::FastingBloodSugarHigh,
    Field::RestingEcg,
    Field::MaxHeartRate,
    Field::ExerciseInducedAngina,
    Field::StDepression,
    Field::StSlope,
    Field::MajorVesselsColored,
    Field::Thalassemia,
];

/// Dataset column codes in feature order, as recorded in model artifacts.
#[must_use]
pub fn feature_codes() -> [&'static str; FEATURE_COUNT] {
    FEATURE_ORDER.map(Field::dataset_code)
}

/// Ordered numeric encoding of a patient record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value for a given field.
    #[must_use]
    pub fn get(&self, field: Field) -> f64 {
        self.0[field as usize]
    }

    /// `(field, value)` pairs in feature order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, f64)> + '_ {
        FEATURE_ORDER.iter().copied().zip(self.0.iter().copied())
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Encode a validated record. Total: cannot fail.
#[must_use]
pub fn encode(validated: &ValidatedRecord) -> FeatureVector {
    let r = validated.record();
    FeatureVector([
        f64::from(r.age),
        f64::from(r.sex.code()),
        f64::from(r.chest_pain_type.code()),
        f64::from(r.resting_blood_pressure),
        f64::from(r.cholesterol),
        flag(r.fasting_blood_sugar_high),
        f64::from(r.resting_ecg.code()),
        f64::from(r.max_heart_rate),
        flag(r.exercise_induced_angina),
        r.st_depression,
        f64::from(r.st_slope.code()),
        f64::from(r.major_vessels_colored),
        f64::from(r.thalassemia.code()),
    ])
}
