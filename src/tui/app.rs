//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration
//! - Streamed narratives via background worker

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::narrative::HttpNarrativeClient;
use crate::adapters::sqlite::SqliteHistoryStore;
use crate::application::report::write_report;
use crate::application::{AnalysisService, AnalyzedPanel};
use crate::config::AppConfig;
use crate::domain::HISTORY_LIMIT;
use crate::ports::{NarrativeError, NarrativeProvider, NarrativeRequest};

use super::ui::{
    dashboard::{render_dashboard, DashboardState},
    form::{render_cbc_form, CbcFormState},
    narrative::{render_narrative, NarrativeState},
    render_disclaimer,
    result::{render_result, ResultState},
};
use super::worker::{NarrativeProgress, NarrativeWorker, NarrativeWorkerHandle};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    CbcForm,
    Result,
    Narrative,
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,

    analysis_service: AnalysisService<SqliteHistoryStore>,

    /// `None` when the HTTP client could not be built
    narrative: Option<Arc<dyn NarrativeProvider>>,
    narrative_model: String,
    report_dir: PathBuf,

    dashboard_state: DashboardState,
    form_state: CbcFormState,
    result_state: ResultState,
    narrative_state: NarrativeState,

    /// Pending narrative worker (if running)
    pending_worker: Option<NarrativeWorkerHandle>,
}

impl App {
    /// Create a new application instance from configuration.
    ///
    /// An unreadable history database falls back to an in-memory store so
    /// analysis stays available.
    ///
    /// # Errors
    /// Returns error if no history store at all can be created.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let (storage, history_available) = match SqliteHistoryStore::new(&config.db_path) {
            Ok(store) => (store, true),
            Err(e) => {
                tracing::warn!(
                    "Cannot open history at {}: {}; using in-memory history",
                    config.db_path.display(),
                    e
                );
                (SqliteHistoryStore::in_memory()?, false)
            }
        };
        let analysis_service = AnalysisService::new(Arc::new(storage));

        let narrative_configured = config.narrative_enabled();
        let narrative: Option<Arc<dyn NarrativeProvider>> =
            match HttpNarrativeClient::new(config.narrative.clone()) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    tracing::warn!("Narrative client unavailable: {}", e);
                    None
                }
            };

        let mut app = Self::with_dependencies(
            analysis_service,
            narrative,
            config.narrative.model.clone(),
            config.report_dir.clone(),
        );
        app.dashboard_state.history_available = history_available;
        app.dashboard_state.narrative_configured = narrative_configured && app.narrative.is_some();
        Ok(app)
    }

    /// Create application with injected dependencies (Composition Root pattern).
    pub fn with_dependencies(
        analysis_service: AnalysisService<SqliteHistoryStore>,
        narrative: Option<Arc<dyn NarrativeProvider>>,
        narrative_model: String,
        report_dir: PathBuf,
    ) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            analysis_service,
            narrative,
            narrative_model,
            report_dir,
            dashboard_state: DashboardState {
                history_available: true,
                ..DashboardState::default()
            },
            form_state: CbcFormState::default(),
            result_state: ResultState::default(),
            narrative_state: NarrativeState::default(),
            pending_worker: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.refresh_dashboard();

        let result = self.main_loop(&mut terminal);

        if let Some(worker) = self.pending_worker.take() {
            worker.cancel();
        }

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();
            self.narrative_state.tick();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                let content_area = chunks[0];
                match self.screen {
                    Screen::Dashboard => render_dashboard(f, content_area, &self.dashboard_state),
                    Screen::CbcForm => render_cbc_form(f, content_area, &self.form_state),
                    Screen::Result => render_result(f, content_area, &self.result_state),
                    Screen::Narrative => render_narrative(
                        f,
                        content_area,
                        &self.narrative_state,
                        &self.narrative_model,
                    ),
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

    /// Poll the background worker for progress updates.
    fn poll_worker(&mut self) {
        loop {
            let Some(progress) = self.pending_worker.as_ref().and_then(|w| w.try_recv()) else {
                break;
            };

            match progress {
                NarrativeProgress::Started => {}
                NarrativeProgress::Chunk(text) => self.narrative_state.append(&text),
                NarrativeProgress::Complete => {
                    self.narrative_state.finish();
                    self.pending_worker = None;
                    break;
                }
                NarrativeProgress::Error(message) => {
                    self.narrative_state.fail(message);
                    self.pending_worker = None;
                    break;
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::CbcForm => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
            Screen::Narrative => self.handle_narrative_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        self.dashboard_state.status_message = None;

        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => self.open_form(),
            KeyCode::Down => self.dashboard_state.select_next(),
            KeyCode::Up => self.dashboard_state.select_prev(),
            KeyCode::Enter => {
                if let Some(entry) = self.dashboard_state.selected_entry() {
                    self.result_state = ResultState::new(AnalyzedPanel {
                        entry: entry.clone(),
                        persisted: true,
                    });
                    self.narrative_state = NarrativeState::Idle;
                    self.screen = Screen::Result;
                }
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(id) = self.dashboard_state.selected_entry().map(|e| e.id.clone()) {
                    if let Err(e) = self.analysis_service.delete(&id) {
                        tracing::error!("Failed to delete history entry: {}", e);
                        self.dashboard_state.status_message = Some(e.to_string());
                    }
                    self.refresh_dashboard();
                }
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                match self.analysis_service.clear_history() {
                    Ok(()) => {
                        self.dashboard_state.status_message = Some("History cleared".to_string());
                    }
                    Err(e) => {
                        tracing::error!("Failed to clear history: {}", e);
                        self.dashboard_state.status_message = Some(e.to_string());
                    }
                }
                self.refresh_dashboard();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.form_state.clear_sensitive();
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up | KeyCode::BackTab => self.form_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_state.next_field(),
            KeyCode::Left | KeyCode::Right => {
                if self.form_state.selected_field == self.form_state.fields.len() {
                    self.form_state.toggle_sex();
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => self.form_state.load_next_sample(),
            KeyCode::Char(c) => self.form_state.input_char(c),
            KeyCode::Backspace => self.form_state.delete_char(),
            KeyCode::Delete => self.form_state.clear_field(),
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('r') | KeyCode::Char('R') => self.export_report(),
            KeyCode::Char('i') | KeyCode::Char('I') => {
                self.start_narrative();
                self.screen = Screen::Narrative;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if self.result_state.diet_available() {
                    self.result_state.show_diet = !self.result_state.show_diet;
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => self.open_form(),
            KeyCode::Esc => {
                self.refresh_dashboard();
                self.screen = Screen::Dashboard;
            }
            _ => {}
        }
    }

    fn handle_narrative_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                if let Some(worker) = self.pending_worker.take() {
                    worker.cancel();
                    self.narrative_state
                        .fail(NarrativeError::Cancelled.to_string());
                }
                self.screen = Screen::Result;
            }
            KeyCode::Char('i') | KeyCode::Char('I') if !self.narrative_state.is_streaming() => {
                self.start_narrative();
            }
            _ => {}
        }
    }

    fn open_form(&mut self) {
        self.form_state.clear_sensitive();
        self.screen = Screen::CbcForm;
    }

    fn submit_form(&mut self) {
        match self.form_state.to_cbc_input() {
            Ok(input) => {
                let panel = self.analysis_service.run(input);

                self.result_state = ResultState::new(panel);
                self.narrative_state = NarrativeState::Idle;
                self.screen = Screen::Result;

                // Clear plaintext buffers from the UI immediately.
                self.form_state.clear_sensitive();
                self.refresh_dashboard();
            }
            Err(e) => {
                self.form_state.error_message = Some(e.to_string());
            }
        }
    }

    fn export_report(&mut self) {
        let Some(panel) = &self.result_state.panel else {
            return;
        };

        let notice = match write_report(
            &self.report_dir,
            panel.input(),
            panel.result(),
            chrono::Utc::now(),
        ) {
            Ok(path) => format!("Report saved to {}", path.display()),
            Err(e) => {
                tracing::error!("Failed to write report: {}", e);
                format!("Report failed: {e}")
            }
        };
        self.result_state.notice = Some(notice);
    }

    fn start_narrative(&mut self) {
        if let Some(worker) = self.pending_worker.take() {
            worker.cancel();
        }

        let Some(panel) = &self.result_state.panel else {
            return;
        };
        let Some(provider) = &self.narrative else {
            self.narrative_state = NarrativeState::Error {
                text: String::new(),
                message: NarrativeError::NotConfigured("HTTP client unavailable".to_string())
                    .to_string(),
            };
            return;
        };

        let request = NarrativeRequest::new(panel.input(), panel.result());
        self.narrative_state = NarrativeState::Streaming {
            text: String::new(),
            ticks: 0,
        };
        self.pending_worker = Some(NarrativeWorker::spawn(Arc::clone(provider), request));
    }

    fn refresh_dashboard(&mut self) {
        match self.analysis_service.recent(HISTORY_LIMIT) {
            Ok(history) => self.dashboard_state.set_history(history),
            Err(e) => {
                tracing::warn!("Failed to load history: {}", e);
                self.dashboard_state.history_available = false;
                self.dashboard_state.set_history(Vec::new());
            }
        }
    }
}
