//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Background inference via the worker

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::logistic::LogisticModel;
use crate::application::RiskPipeline;
use crate::domain::validate;

use super::ui::{
    about::{render_about, AboutState},
    patient::{render_patient_form, PatientFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};
use super::worker::{InferenceProgress, InferenceWorker, InferenceWorkerHandle};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    PatientForm,
    Result,
    About,
}

/// Main application state
pub struct App {
    screen: Screen,

    /// Screen to return to from About
    previous_screen: Screen,

    should_quit: bool,

    pipeline: Arc<RiskPipeline<LogisticModel>>,

    patient_form_state: PatientFormState,

    result_state: ResultState,

    about_state: AboutState,

    pending_worker: Option<InferenceWorkerHandle>,

    /// When the pending worker was started (for the progress animation)
    started_at: Option<Instant>,
}

impl App {
    /// Create the application around a loaded pipeline.
    #[must_use]
    pub fn new(pipeline: Arc<RiskPipeline<LogisticModel>>) -> Self {
        let about_state = AboutState::from_model(pipeline.inference().classifier());
        Self {
            screen: Screen::PatientForm,
            previous_screen: Screen::PatientForm,
            should_quit: false,
            pipeline,
            patient_form_state: PatientFormState::default(),
            result_state: ResultState::default(),
            about_state,
            pending_worker: None,
            started_at: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal even if the loop failed.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        self.patient_form_state.clear_sensitive();
        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();
            self.tick_progress();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2)])
                    .split(f.area());

                match self.screen {
                    Screen::PatientForm => {
                        render_patient_form(f, chunks[0], &self.patient_form_state)
                    }
                    Screen::Result => render_result(f, chunks[0], &self.result_state),
                    Screen::About => render_about(f, chunks[0], &self.about_state),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Drain progress messages from the pending worker.
    fn poll_worker(&mut self) {
        while let Some(progress) = self.pending_worker.as_ref().and_then(|w| w.try_recv()) {
            match progress {
                InferenceProgress::Running => {}
                InferenceProgress::Complete(report) => {
                    self.result_state = ResultState::Complete { report };
                    self.finish_worker();
                }
                InferenceProgress::Error(message) => {
                    self.result_state = ResultState::Error { message };
                    self.finish_worker();
                }
            }
        }
    }

    fn finish_worker(&mut self) {
        self.pending_worker = None;
        self.started_at = None;
    }

    /// Monotonic progress that approaches 95% while the worker runs.
    fn tick_progress(&mut self) {
        let (Some(started_at), ResultState::Running { progress }) =
            (self.started_at, &self.result_state)
        else {
            return;
        };
        let elapsed = started_at.elapsed().as_secs_f64();
        let progress = (0.95 * (1.0 - (-elapsed / 0.4).exp())).max(*progress);
        self.result_state = ResultState::Running { progress };
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::PatientForm => self.handle_patient_form_key(key),
            Screen::Result => self.handle_result_key(key),
            Screen::About => self.handle_about_key(key),
        }
    }

    fn show_about(&mut self) {
        self.previous_screen = self.screen;
        self.screen = Screen::About;
    }

    fn handle_patient_form_key(&mut self, key: KeyCode) {
        let form = &mut self.patient_form_state;
        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Left => form.cycle_choice(-1),
            KeyCode::Right => form.cycle_choice(1),
            KeyCode::Char('s') | KeyCode::Char('S') => form.load_sample_data(),
            KeyCode::Char('a') | KeyCode::Char('A') => self.show_about(),
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.clear_field(),
            KeyCode::Enter => self.submit_patient_form(),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        if self.pending_worker.is_some() {
            return;
        }
        match key {
            KeyCode::Enter => self.screen = Screen::PatientForm,
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.patient_form_state.clear_sensitive();
                self.result_state = ResultState::Idle;
                self.screen = Screen::PatientForm;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => self.show_about(),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_about_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace) {
            self.screen = self.previous_screen;
        }
    }

    fn submit_patient_form(&mut self) {
        let raw = self.patient_form_state.to_raw_record();

        // Violations are shown on the form; only valid records reach the worker.
        if let Err(errors) = validate(&raw) {
            self.patient_form_state.show_violations(&errors);
            return;
        }
        self.patient_form_state.errors.clear();

        self.screen = Screen::Result;
        self.result_state = ResultState::Running { progress: 0.0 };
        self.started_at = Some(Instant::now());
        self.pending_worker = Some(InferenceWorker::spawn(Arc::clone(&self.pipeline), raw));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logistic::{ModelLoader, SignaturePolicy};
    use crate::application::InferenceAdapter;
    use crate::domain::RawValue;
    use std::path::Path;

    fn app() -> App {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("models");
        let model = ModelLoader::new(SignaturePolicy::AllowUnsigned)
            .load(&dir)
            .expect("bundled model loads");
        App::new(Arc::new(RiskPipeline::new(InferenceAdapter::new(Arc::new(model)))))
    }

    fn wait_for_worker(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.pending_worker.is_some() {
            assert!(Instant::now() < deadline, "worker did not finish");
            app.poll_worker();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_submit_keeps_form_until_new_patient() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'), KeyModifiers::NONE);
        let entered = app.patient_form_state.to_raw_record();

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Result);
        wait_for_worker(&mut app);
        assert!(matches!(app.result_state, ResultState::Complete { .. }));
        assert_eq!(app.patient_form_state.to_raw_record(), entered);

        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::PatientForm);
        assert!(matches!(app.result_state, ResultState::Idle));
        assert_eq!(app.patient_form_state.to_raw_record().age, RawValue::from(""));
    }

    #[test]
    fn test_invalid_submit_stays_on_form() {
        let mut app = app();
        app.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.screen, Screen::PatientForm);
        assert!(app.pending_worker.is_none());
        assert!(!app.patient_form_state.errors.is_empty());
    }
}
