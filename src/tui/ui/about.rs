//! About view: model provenance and when to see a doctor.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::adapters::logistic::{LogisticModel, ALGORITHM};
use crate::tui::styles::MedicalTheme;

const WHEN_TO_SEE_A_DOCTOR: [&str; 4] = [
    "Persistent chest pain",
    "Shortness of breath",
    "Irregular heartbeat",
    "Family history of heart disease",
];

/// What the about screen shows about the loaded model.
#[derive(Debug, Clone, PartialEq)]
pub struct AboutState {
    pub algorithm: String,
    pub description: Option<String>,
    pub dataset: Option<String>,
    pub accuracy: Option<f64>,
    pub model_path: String,
    pub signed: bool,
    pub manifest_serial: Option<u64>,
    pub n_features: usize,
}

impl AboutState {
    #[must_use]
    pub fn from_model(model: &LogisticModel) -> Self {
        use crate::ports::BinaryClassifier;

        let metadata = model.metadata();
        let provenance = model.provenance();
        Self {
            algorithm: ALGORITHM.to_string(),
            description: metadata.description.clone(),
            dataset: metadata.dataset.clone(),
            accuracy: metadata.accuracy,
            model_path: provenance.path.display().to_string(),
            signed: provenance.signed,
            manifest_serial: provenance.manifest_serial,
            n_features: model.n_features(),
        }
    }
}

/// Render the about view.
pub fn render_about(f: &mut Frame, area: Rect, state: &AboutState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_model_panel(f, columns[0], state);
    render_guidance(f, columns[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled("Back", MedicalTheme::key_desc()),
    ]));
    f.render_widget(footer, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("CardioRisk", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("Heart Disease Risk Prediction", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_model_panel(f: &mut Frame, area: Rect, state: &AboutState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Length(3), Constraint::Min(0)])
        .margin(1)
        .split(area);

    let unknown = || "unknown".to_string();
    let mut items = vec![
        info_line("Algorithm", state.algorithm.clone()),
        info_line("Dataset", state.dataset.clone().unwrap_or_else(unknown)),
        info_line("Features", state.n_features.to_string()),
        info_line("Artifact", state.model_path.clone()),
        signature_line(state),
    ];
    if let Some(description) = &state.description {
        items.push(Line::from(Span::styled(
            format!("  {description}"),
            MedicalTheme::text_muted(),
        )));
    }

    let model = Paragraph::new(items).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(" Model ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(model, chunks[0]);

    let accuracy = state.accuracy.unwrap_or(0.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Reported Accuracy ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::gauge(accuracy))
        .ratio(accuracy)
        .label(match state.accuracy {
            Some(a) => format!("{:.1}%", a * 100.0),
            None => "not reported".to_string(),
        });
    f.render_widget(gauge, chunks[1]);
}

fn info_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label}: "), MedicalTheme::text_secondary()),
        Span::styled(value, MedicalTheme::text()),
    ])
}

fn signature_line(state: &AboutState) -> Line<'static> {
    let (icon, text, style) = if state.signed {
        let serial = state
            .manifest_serial
            .map(|s| format!(" (serial {s})"))
            .unwrap_or_default();
        ("OK", format!("Signature verified{serial}"), MedicalTheme::success())
    } else {
        ("!", "Unsigned model".to_string(), MedicalTheme::warning())
    };

    Line::from(vec![
        Span::styled(format!("  {icon} "), style),
        Span::styled(text, MedicalTheme::text()),
    ])
}

fn render_guidance(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .margin(1)
        .split(area);

    let doctor: Vec<Line> = WHEN_TO_SEE_A_DOCTOR
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::styled("  • ", MedicalTheme::danger()),
                Span::styled(*item, MedicalTheme::text()),
            ])
        })
        .collect();
    let doctor = Paragraph::new(doctor).block(
        Block::default()
            .title(Span::styled(" When to See a Doctor ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(doctor, chunks[0]);

    let notice = Paragraph::new(vec![Line::from(Span::styled(
        "This tool is for educational purposes only and should not replace professional medical diagnosis.",
        MedicalTheme::warning(),
    ))])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Important Notice ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(notice, chunks[1]);
}
