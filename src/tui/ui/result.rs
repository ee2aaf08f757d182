//! Analysis result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{RiskReport, RiskTier, MEDICAL_DISCLAIMER};
use crate::tui::styles::MedicalTheme;

/// Result screen state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Not started
    #[default]
    Idle,
    /// Worker is running the pipeline
    Running { progress: f64 },
    /// Completed with a report
    Complete { report: RiskReport },
    /// Inference failed
    Error { message: String },
}

/// Render the result screen
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Idle => render_progress(f, chunks[1], 0.0),
        ResultState::Running { progress } => render_progress(f, chunks[1], *progress),
        ResultState::Complete { report } => render_report(f, chunks[1], report),
        ResultState::Error { message } => render_error(f, chunks[1], message),
    }
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Analysis Results", MedicalTheme::title()),
        Span::styled(" │ Heart Disease Risk", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_progress(f: &mut Frame, area: Rect, progress: f64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(area);

    let stage_text = Paragraph::new(Line::from(Span::styled(
        "Analyzing patient data...",
        MedicalTheme::focused(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(stage_text, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::info())
        .ratio(progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);
}

fn render_report(f: &mut Frame, area: Rect, report: &RiskReport) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_risk_panel(f, columns[0], report);
    render_recommendations(f, columns[1], report);
}

fn render_risk_panel(f: &mut Frame, area: Rect, report: &RiskReport) {
    let risk_style = MedicalTheme::risk_tier(report.risk_tier);
    let block = Block::default()
        .title(Span::styled(" Prediction ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(risk_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Tier
            Constraint::Length(3), // Probability
            Constraint::Length(2), // Confidence
            Constraint::Min(0),    // Disclaimer
        ])
        .margin(1)
        .split(inner);

    let icon = match report.risk_tier {
        RiskTier::Low => "OK",
        RiskTier::High => "!",
    };
    let tier = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{icon} {}", report.recommendation.headline.to_uppercase()),
            risk_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            report.recommendation.summary,
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(tier, chunks[0]);

    let probability = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Risk Probability ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(risk_style)
        .ratio((report.risk_probability_percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.1}%", report.risk_probability_percent));
    f.render_widget(probability, chunks[1]);

    let confidence = Paragraph::new(Line::from(vec![
        Span::styled("Confidence: ", MedicalTheme::text_secondary()),
        Span::styled(
            format!("{:.1}%", report.confidence_percent),
            MedicalTheme::text(),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(confidence, chunks[2]);

    let disclaimer = Paragraph::new(Line::from(Span::styled(
        MEDICAL_DISCLAIMER,
        MedicalTheme::warning(),
    )))
    .wrap(Wrap { trim: true });
    f.render_widget(disclaimer, chunks[3]);
}

fn render_recommendations(f: &mut Frame, area: Rect, report: &RiskReport) {
    let recommendation = report.recommendation;
    let mut lines = vec![
        Line::from(Span::styled(recommendation.heading, MedicalTheme::subtitle())),
        Line::from(""),
    ];
    lines.extend(recommendation.actions.iter().map(|action| {
        Line::from(vec![
            Span::styled("  • ", MedicalTheme::risk_tier(report.risk_tier)),
            Span::styled(*action, MedicalTheme::text()),
        ])
    }));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(" Recommendations ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(p, area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", MedicalTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, MedicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Complete { .. } => Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Back to Form ", MedicalTheme::key_desc()),
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("New Patient ", MedicalTheme::key_desc()),
            Span::styled("[A] ", MedicalTheme::key_hint()),
            Span::styled("About", MedicalTheme::key_desc()),
        ]),
        ResultState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Back to Form ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ]),
        _ => Line::from(vec![Span::styled(
            "Processing...",
            MedicalTheme::text_muted(),
        )]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
