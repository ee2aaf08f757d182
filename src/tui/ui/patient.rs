//! Patient data entry form.
//!
//! Thirteen fields in three columns. Numeric fields are typed; selection
//! fields cycle through their options with ←/→. The form itself never
//! validates: it hands a `RawPatientRecord` to the validator and shows
//! every violation that comes back.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{
    ChestPainType, Field, PatientRecord, RawPatientRecord, RawValue, RestingEcg, Selection, Sex,
    StSlope, Thalassemia, ValidationError,
};
use crate::tui::styles::MedicalTheme;

const YES_NO: [&str; 2] = ["No", "Yes"];
const VESSELS: [&str; 5] = ["0", "1", "2", "3", "4"];

/// Column titles and the number of fields in each, in `fields` order.
const COLUMNS: [(&str, usize); 3] = [
    (" Personal · Heart Rate ", 4),
    (" Clinical Measurements · Vessels ", 4),
    (" Medical Tests ", 5),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Numeric(String),
    Choice {
        options: Vec<&'static str>,
        index: usize,
    },
}

impl FieldInput {
    fn choice<T: Selection>() -> Self {
        Self::Choice {
            options: T::OPTIONS.iter().map(|o| o.label()).collect(),
            index: 0,
        }
    }

    fn fixed(options: &[&'static str]) -> Self {
        Self::Choice {
            options: options.to_vec(),
            index: 0,
        }
    }

    fn numeric(default: &str) -> Self {
        Self::Numeric(default.to_string())
    }

    /// Text handed to the validator.
    fn text(&self) -> String {
        match self {
            Self::Numeric(value) => value.clone(),
            Self::Choice { options, index } => options.get(*index).copied().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub field: Field,
    pub hint: &'static str,
    pub input: FieldInput,
}

/// Patient form state
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    /// One line per violation from the last submit.
    pub errors: Vec<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        let field = |field, hint, input| FormField { field, hint, input };
        Self {
            fields: vec![
                field(Field::Age, "years (20-100)", FieldInput::numeric("50")),
                field(Field::Sex, "", FieldInput::choice::<Sex>()),
                field(Field::MaxHeartRate, "bpm during exercise (70-210)", FieldInput::numeric("150")),
                field(Field::StDepression, "induced by exercise (0.0-6.0)", FieldInput::numeric("1.0")),
                field(Field::RestingBloodPressure, "mm Hg (80-200)", FieldInput::numeric("120")),
                field(Field::Cholesterol, "mg/dl (100-600)", FieldInput::numeric("200")),
                field(Field::FastingBloodSugarHigh, "", FieldInput::fixed(&YES_NO)),
                field(Field::MajorVesselsColored, "colored by fluoroscopy", FieldInput::fixed(&VESSELS)),
                field(Field::ChestPainType, "", FieldInput::choice::<ChestPainType>()),
                field(Field::RestingEcg, "", FieldInput::choice::<RestingEcg>()),
                field(Field::ExerciseInducedAngina, "", FieldInput::fixed(&YES_NO)),
                field(Field::StSlope, "", FieldInput::choice::<StSlope>()),
                field(Field::Thalassemia, "", FieldInput::choice::<Thalassemia>()),
            ],
            selected_field: 0,
            errors: Vec::new(),
        }
    }
}

impl PatientFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Cycle the selected choice forward (`step = 1`) or backward (`step = -1`).
    pub fn cycle_choice(&mut self, step: isize) {
        if let FieldInput::Choice { options, index } = &mut self.fields[self.selected_field].input {
            let len = options.len() as isize;
            *index = (*index as isize + step).rem_euclid(len) as usize;
        }
    }

    /// Add a character to the selected numeric field.
    pub fn input_char(&mut self, c: char) {
        if let FieldInput::Numeric(value) = &mut self.fields[self.selected_field].input {
            if c.is_ascii_digit() || c == '.' || c == '-' {
                value.push(c);
            }
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        if let FieldInput::Numeric(value) = &mut self.fields[self.selected_field].input {
            value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        if let FieldInput::Numeric(value) = &mut self.fields[self.selected_field].input {
            value.clear();
        }
    }

    /// Wipe numeric buffers and reset selections.
    ///
    /// Submitting keeps the form so the operator can adjust and resubmit.
    /// Values are wiped when a new patient is started from the result
    /// screen and when the application exits.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            match &mut field.input {
                FieldInput::Numeric(value) => value.zeroize(),
                FieldInput::Choice { index, .. } => *index = 0,
            }
        }
        self.errors.clear();
        self.selected_field = 0;
    }

    /// Show every violation from a failed validation.
    pub fn show_violations(&mut self, error: &ValidationError) {
        self.errors = error.violations().iter().map(ToString::to_string).collect();
        if let Some(first) = error.violations().first() {
            if let Some(pos) = self.fields.iter().position(|f| f.field == first.field()) {
                self.selected_field = pos;
            }
        }
    }

    fn text(&self, field: Field) -> RawValue {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| RawValue::Text(f.input.text()))
            .unwrap_or_else(|| RawValue::Text(String::new()))
    }

    /// The form contents as an untrusted record.
    #[must_use]
    pub fn to_raw_record(&self) -> RawPatientRecord {
        RawPatientRecord {
            age: self.text(Field::Age),
            sex: self.text(Field::Sex),
            chest_pain_type: self.text(Field::ChestPainType),
            resting_blood_pressure: self.text(Field::RestingBloodPressure),
            cholesterol: self.text(Field::Cholesterol),
            fasting_blood_sugar_high: self.text(Field::FastingBloodSugarHigh),
            resting_ecg: self.text(Field::RestingEcg),
            max_heart_rate: self.text(Field::MaxHeartRate),
            exercise_induced_angina: self.text(Field::ExerciseInducedAngina),
            st_depression: self.text(Field::StDepression),
            st_slope: self.text(Field::StSlope),
            major_vessels_colored: self.text(Field::MajorVesselsColored),
            thalassemia: self.text(Field::Thalassemia),
        }
    }

    /// Fill every field from the sample patient.
    pub fn load_sample_data(&mut self) {
        let sample = RawPatientRecord::from(&PatientRecord::sample());
        for form_field in self.fields.iter_mut() {
            let text = match sample.get(form_field.field) {
                RawValue::Flag(true) => "Yes".to_string(),
                RawValue::Flag(false) => "No".to_string(),
                other => other.display(),
            };
            match &mut form_field.input {
                FieldInput::Numeric(value) => *value = text,
                FieldInput::Choice { options, index } => {
                    if let Some(pos) = options.iter().position(|o| o.eq_ignore_ascii_case(&text)) {
                        *index = pos;
                    }
                }
            }
        }
        self.errors.clear();
    }
}

/// Render the patient data input form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let footer_height = if state.errors.is_empty() {
        3
    } else {
        (state.errors.len() as u16 + 2).min(8)
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Min(0),                // Form
            Constraint::Length(footer_height), // Footer/errors
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Enter Patient Information", MedicalTheme::title()),
        Span::styled(
            " │ Cleveland Heart Disease Attributes",
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let mut offset = 0;
    for ((title, count), column) in COLUMNS.iter().zip(columns.iter()) {
        let end = (offset + count).min(state.fields.len());
        render_field_column(
            f,
            *column,
            title,
            &state.fields[offset..end],
            offset,
            state.selected_field,
        );
        offset = end;
    }
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    title: &str,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let block = Block::default()
        .title(Span::styled(title.to_string(), MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.field.label()), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let line = match &field.input {
            FieldInput::Numeric(value) => {
                let value_display = if value.is_empty() {
                    Span::styled(field.hint, MedicalTheme::text_muted())
                } else {
                    Span::styled(value.as_str(), MedicalTheme::text())
                };
                Line::from(vec![
                    Span::raw(" "),
                    value_display,
                    if is_selected {
                        Span::styled("▌", MedicalTheme::cursor())
                    } else {
                        Span::raw("")
                    },
                ])
            }
            FieldInput::Choice { options, index } => {
                let label = options.get(*index).copied().unwrap_or_default();
                let label_style = if is_selected {
                    MedicalTheme::selected()
                } else {
                    MedicalTheme::text()
                };
                Line::from(vec![
                    Span::styled(" ◀ ", MedicalTheme::text_muted()),
                    Span::styled(label, label_style),
                    Span::styled(" ▶ ", MedicalTheme::text_muted()),
                    Span::styled(field.hint, MedicalTheme::text_muted()),
                ])
            }
        };

        f.render_widget(Paragraph::new(line).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content: Vec<Line> = if state.errors.is_empty() {
        vec![Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Select ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Predict ", MedicalTheme::key_desc()),
            Span::styled("[S] ", MedicalTheme::key_hint()),
            Span::styled("Sample Data ", MedicalTheme::key_desc()),
            Span::styled("[A] ", MedicalTheme::key_hint()),
            Span::styled("About ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ])]
    } else {
        state
            .errors
            .iter()
            .map(|err| {
                Line::from(vec![
                    Span::styled("! ", MedicalTheme::danger()),
                    Span::styled(err.as_str(), MedicalTheme::danger()),
                ])
            })
            .collect()
    };

    let footer = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(footer, area);
}
