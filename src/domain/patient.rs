//! Patient record types for heart disease risk prediction.
//!
//! Based on the Cleveland Heart Disease dataset (13 clinical attributes).
//!
//! Two representations exist:
//! - [`RawPatientRecord`]: field values as entered by an operator (form text,
//!   JSON numbers, yes/no selections). Nothing about it is trusted.
//! - [`PatientRecord`]: fully typed fields. Only the validator hands these
//!   onward, wrapped in a `ValidatedRecord`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The thirteen clinical fields, in feature order.
///
/// The discriminant is the field's slot in the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(usize)]
pub enum Field {
    Age,
    Sex,
    ChestPainType,
    RestingBloodPressure,
    Cholesterol,
    FastingBloodSugarHigh,
    RestingEcg,
    MaxHeartRate,
    ExerciseInducedAngina,
    StDepression,
    StSlope,
    MajorVesselsColored,
    Thalassemia,
}

impl Field {
    /// All fields, in the order the classifier was trained on.
    pub const ALL: [Field; 13] = [
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

    /// Wire name (camelCase, as used in JSON input).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Sex => "sex",
            Self::ChestPainType => "chestPainType",
            Self::RestingBloodPressure => "restingBloodPressure",
            Self::Cholesterol => "cholesterol",
            Self::FastingBloodSugarHigh => "fastingBloodSugarHigh",
            Self::RestingEcg => "restingEcg",
            Self::MaxHeartRate => "maxHeartRate",
            Self::ExerciseInducedAngina => "exerciseInducedAngina",
            Self::StDepression => "stDepression",
            Self::StSlope => "stSlope",
            Self::MajorVesselsColored => "majorVesselsColored",
            Self::Thalassemia => "thalassemia",
        }
    }

    /// Column name in the training dataset (UCI Cleveland codes).
    #[must_use]
    pub fn dataset_code(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Sex => "sex",
            Self::ChestPainType => "cp",
            Self::RestingBloodPressure => "trestbps",
            Self::Cholesterol => "chol",
            Self::FastingBloodSugarHigh => "fbs",
            Self::RestingEcg => "restecg",
            Self::MaxHeartRate => "thalach",
            Self::ExerciseInducedAngina => "exang",
            Self::StDepression => "oldpeak",
            Self::StSlope => "slope",
            Self::MajorVesselsColored => "ca",
            Self::Thalassemia => "thal",
        }
    }

    /// Human-facing label for forms and reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age (years)",
            Self::Sex => "Sex",
            Self::ChestPainType => "Chest Pain Type",
            Self::RestingBloodPressure => "Resting Blood Pressure (mm Hg)",
            Self::Cholesterol => "Cholesterol (mg/dl)",
            Self::FastingBloodSugarHigh => "Fasting Blood Sugar > 120 mg/dl?",
            Self::RestingEcg => "Resting ECG",
            Self::MaxHeartRate => "Maximum Heart Rate",
            Self::ExerciseInducedAngina => "Exercise Induced Angina?",
            Self::StDepression => "ST Depression",
            Self::StSlope => "ST Segment Slope",
            Self::MajorVesselsColored => "Major Vessels (0-4)",
            Self::Thalassemia => "Thalassemia",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A closed set of selectable options with a fixed encoding.
///
/// The discriminant of each implementing enum *is* its model encoding, so the
/// mapping is total and the compiler rejects duplicate codes.
pub trait Selection: Copy + Sized + 'static {
    /// Every option, in display order.
    const OPTIONS: &'static [Self];

    /// Display label, as shown in the entry form.
    fn label(self) -> &'static str;

    /// Identifier form (`TypicalAngina`), also accepted on input.
    fn ident(self) -> &'static str;

    /// Integer fed to the classifier.
    fn code(self) -> u8;

    /// Parse an operator-entered selection.
    ///
    /// Matches either the display label or the identifier, ignoring case and
    /// surrounding whitespace. Unknown text yields `None`; there is no default.
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::OPTIONS
            .iter()
            .copied()
            .find(|opt| opt.label().eq_ignore_ascii_case(raw) || opt.ident().eq_ignore_ascii_case(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Sex {
    Female = 0,
    Male = 1,
}

impl Selection for Sex {
    const OPTIONS: &'static [Self] = &[Self::Male, Self::Female];

    fn label(self) -> &'static str {
        self.ident()
    }

    fn ident(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChestPainType {
    TypicalAngina = 0,
    AtypicalAngina = 1,
    NonAnginalPain = 2,
    Asymptomatic = 3,
}

impl Selection for ChestPainType {
    const OPTIONS: &'static [Self] = &[
        Self::TypicalAngina,
        Self::AtypicalAngina,
        Self::NonAnginalPain,
        Self::Asymptomatic,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::TypicalAngina => "Typical Angina",
            Self::AtypicalAngina => "Atypical Angina",
            Self::NonAnginalPain => "Non-anginal Pain",
            Self::Asymptomatic => "Asymptomatic",
        }
    }

    fn ident(self) -> &'static str {
        match self {
            Self::TypicalAngina => "TypicalAngina",
            Self::AtypicalAngina => "AtypicalAngina",
            Self::NonAnginalPain => "NonAnginalPain",
            Self::Asymptomatic => "Asymptomatic",
        }
    }

    fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RestingEcg {
    Normal = 0,
    StTWaveAbnormality = 1,
    LeftVentricularHypertrophy = 2,
}

impl Selection for RestingEcg {
    const OPTIONS: &'static [Self] = &[
        Self::Normal,
        Self::StTWaveAbnormality,
        Self::LeftVentricularHypertrophy,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StTWaveAbnormality => "ST-T Wave Abnormality",
            Self::LeftVentricularHypertrophy => "Left Ventricular Hypertrophy",
        }
    }

    fn ident(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StTWaveAbnormality => "StTWaveAbnormality",
            Self::LeftVentricularHypertrophy => "LeftVentricularHypertrophy",
        }
    }

    fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum StSlope {
    Upsloping = 0,
    Flat = 1,
    Downsloping = 2,
}

impl Selection for StSlope {
    const OPTIONS: &'static [Self] = &[Self::Upsloping, Self::Flat, Self::Downsloping];

    fn label(self) -> &'static str {
        self.ident()
    }

    fn ident(self) -> &'static str {
        match self {
            Self::Upsloping => "Upsloping",
            Self::Flat => "Flat",
            Self::Downsloping => "Downsloping",
        }
    }

    fn code(self) -> u8 {
        self as u8
    }
}

/// Thalassemia test result.
///
/// Codes start at 1: the classifier was trained on the UCI `thal` column,
/// which never uses 0 for these three outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Thalassemia {
    Normal = 1,
    FixedDefect = 2,
    ReversibleDefect = 3,
}

impl Selection for Thalassemia {
    const OPTIONS: &'static [Self] = &[Self::Normal, Self::FixedDefect, Self::ReversibleDefect];

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::FixedDefect => "Fixed Defect",
            Self::ReversibleDefect => "Reversible Defect",
        }
    }

    fn ident(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::FixedDefect => "FixedDefect",
            Self::ReversibleDefect => "ReversibleDefect",
        }
    }

    fn code(self) -> u8 {
        self as u8
    }
}

/// A single raw field value as it arrives from a form or JSON document.
///
/// `Missing` covers both an explicit `null` and an absent key, so one
/// empty field is reported alongside the others instead of failing the
/// whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Flag(bool),
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawValue {
    /// Render the value for error messages.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Flag(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Missing => "missing".to_string(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Untrusted patient input: thirteen raw field values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPatientRecord {
    pub age: RawValue,
    pub sex: RawValue,
    pub chest_pain_type: RawValue,
    pub resting_blood_pressure: RawValue,
    pub cholesterol: RawValue,
    pub fasting_blood_sugar_high: RawValue,
    pub resting_ecg: RawValue,
    pub max_heart_rate: RawValue,
    pub exercise_induced_angina: RawValue,
    pub st_depression: RawValue,
    pub st_slope: RawValue,
    pub major_vessels_colored: RawValue,
    pub thalassemia: RawValue,
}

impl RawPatientRecord {
    /// Raw value for a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &RawValue {
        match field {
            Field::Age => &self.age,
            Field::Sex => &self.sex,
            Field::ChestPainType => &self.chest_pain_type,
            Field::RestingBloodPressure => &self.resting_blood_pressure,
            Field::Cholesterol => &self.cholesterol,
            Field::FastingBloodSugarHigh => &self.fasting_blood_sugar_high,
            Field::RestingEcg => &self.resting_ecg,
            Field::MaxHeartRate => &self.max_heart_rate,
            Field::ExerciseInducedAngina => &self.exercise_induced_angina,
            Field::StDepression => &self.st_depression,
            Field::StSlope => &self.st_slope,
            Field::MajorVesselsColored => &self.major_vessels_colored,
            Field::Thalassemia => &self.thalassemia,
        }
    }
}

impl From<&PatientRecord> for RawPatientRecord {
    fn from(r: &PatientRecord) -> Self {
        Self {
            age: f64::from(r.age).into(),
            sex: r.sex.label().into(),
            chest_pain_type: r.chest_pain_type.label().into(),
            resting_blood_pressure: f64::from(r.resting_blood_pressure).into(),
            cholesterol: f64::from(r.cholesterol).into(),
            fasting_blood_sugar_high: r.fasting_blood_sugar_high.into(),
            resting_ecg: r.resting_ecg.label().into(),
            max_heart_rate: f64::from(r.max_heart_rate).into(),
            exercise_induced_angina: r.exercise_induced_angina.into(),
            st_depression: r.st_depression.into(),
            st_slope: r.st_slope.label().into(),
            major_vessels_colored: f64::from(r.major_vessels_colored).into(),
            thalassemia: r.thalassemia.label().into(),
        }
    }
}

/// Fully typed patient record.
///
/// Typing alone does not guarantee clinical ranges; pass it through
/// `ValidatedRecord::try_from` before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Age in years (20-100)
    pub age: u16,
    pub sex: Sex,
    pub chest_pain_type: ChestPainType,
    /// Resting blood pressure in mm Hg (80-200)
    pub resting_blood_pressure: u16,
    /// Serum cholesterol in mg/dl (100-600)
    pub cholesterol: u16,
    /// Fasting blood sugar above 120 mg/dl
    pub fasting_blood_sugar_high: bool,
    pub resting_ecg: RestingEcg,
    /// Maximum heart rate achieved during exercise (70-210)
    pub max_heart_rate: u16,
    pub exercise_induced_angina: bool,
    /// ST depression induced by exercise relative to rest (0.0-6.0)
    pub st_depression: f64,
    pub st_slope: StSlope,
    /// Number of major vessels colored by fluoroscopy (0-4)
    pub major_vessels_colored: u8,
    pub thalassemia: Thalassemia,
}

impl PatientRecord {
    /// Typical moderate-risk patient, used for sample data in the form.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            age: 57,
            sex: Sex::Male,
            chest_pain_type: ChestPainType::Asymptomatic,
            resting_blood_pressure: 140,
            cholesterol: 241,
            fasting_blood_sugar_high: false,
            resting_ecg: RestingEcg::StTWaveAbnormality,
            max_heart_rate: 123,
            exercise_induced_angina: true,
            st_depression: 0.2,
            st_slope: StSlope::Flat,
            major_vessels_colored: 0,
            thalassemia: Thalassemia::ReversibleDefect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_accepts_label_and_ident() {
        assert_eq!(
            ChestPainType::parse("Non-anginal Pain"),
            Some(ChestPainType::NonAnginalPain)
        );
        assert_eq!(
            ChestPainType::parse("  nonanginalpain "),
            Some(ChestPainType::NonAnginalPain)
        );
        assert_eq!(
            RestingEcg::parse("ST-T Wave Abnormality"),
            Some(RestingEcg::StTWaveAbnormality)
        );
        assert_eq!(Thalassemia::parse("fixed defect"), Some(Thalassemia::FixedDefect));
        assert_eq!(Sex::parse("female"), Some(Sex::Female));
    }

    #[test]
    fn test_selection_rejects_unknown() {
        assert_eq!(ChestPainType::parse("Unknown"), None);
        assert_eq!(StSlope::parse(""), None);
        assert_eq!(Sex::parse("M"), None);
    }

    #[test]
    fn test_field_names_are_unique() {
        let mut names: Vec<_> = Field::ALL.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn test_raw_record_json_shape() {
        let json = r#"{
            "age": 63, "sex": "Male", "chestPainType": "Typical Angina",
            "restingBloodPressure": "145", "cholesterol": 233,
            "fastingBloodSugarHigh": true, "restingEcg": "Normal",
            "maxHeartRate": 150, "exerciseInducedAngina": "No",
            "stDepression": 2.3, "stSlope": "Downsloping",
            "majorVesselsColored": 0, "thalassemia": "Fixed Defect"
        }"#;
        let raw: RawPatientRecord = serde_json::from_str(json).expect("Should parse");
        assert_eq!(raw.age, RawValue::Number(63.0));
        assert_eq!(raw.resting_blood_pressure, RawValue::Text("145".into()));
        assert_eq!(raw.fasting_blood_sugar_high, RawValue::Flag(true));
        assert_eq!(raw.get(Field::Thalassemia), &RawValue::Text("Fixed Defect".into()));
    }

    #[test]
    fn test_raw_from_typed_uses_labels() {
        let raw = RawPatientRecord::from(&PatientRecord::sample());
        assert_eq!(raw.chest_pain_type, RawValue::Text("Asymptomatic".into()));
        assert_eq!(raw.thalassemia, RawValue::Text("Reversible Defect".into()));
        assert_eq!(raw.exercise_induced_angina, RawValue::Flag(true));
    }
}
