//! Dashboard view: Engine status and the rolling history.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::{HistoryEntry, HISTORY_LIMIT};
use crate::tui::styles::{MedicalTheme, LOGO};

/// Dashboard state for rendering.
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Newest first
    pub history: Vec<HistoryEntry>,
    pub selected: usize,
    pub narrative_configured: bool,
    pub history_available: bool,
    pub status_message: Option<String>,
}

impl DashboardState {
    pub fn select_next(&mut self) {
        if !self.history.is_empty() {
            self.selected = (self.selected + 1) % self.history.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.history.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.history.len() - 1);
        }
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&HistoryEntry> {
        self.history.get(self.selected)
    }

    /// Replace the history list, keeping the selection in range.
    pub fn set_history(&mut self, history: Vec<HistoryEntry>) {
        self.history = history;
        if self.selected >= self.history.len() {
            self.selected = self.history.len().saturating_sub(1);
        }
    }
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Status panels
            Constraint::Percentage(60), // History
        ])
        .split(chunks[1]);

    render_status_panels(f, columns[0], state);
    render_history(f, columns[1], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("HemoScan", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled(
            "Anemia Detection & Risk Analysis",
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

fn render_status_panels(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Logo
            Constraint::Length(7), // Engine status
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    let logo = Paragraph::new(LOGO.trim_matches('\n')).style(MedicalTheme::subtitle());
    f.render_widget(logo, chunks[0]);

    let mut status_items = vec![
        format_status_item("Rule Engine", true),
        format_status_item("History Store", state.history_available),
        format_status_item("AI Insights", state.narrative_configured),
        Line::from(vec![
            Span::styled("  Saved analyses: ", MedicalTheme::text_secondary()),
            Span::styled(
                format!("{}/{}", state.history.len(), HISTORY_LIMIT),
                MedicalTheme::text(),
            ),
        ]),
    ];
    if let Some(msg) = &state.status_message {
        status_items.push(Line::from(Span::styled(
            format!("  {msg}"),
            MedicalTheme::info(),
        )));
    }

    let status_block = Block::default()
        .title(Span::styled(" System Status ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(status_items).block(status_block), chunks[1]);

    let actions: Vec<Line> = [
        ("[N] ", "New Analysis"),
        ("[↑/↓] ", "Select Entry"),
        ("[Enter] ", "Open Entry"),
        ("[D] ", "Delete Entry"),
        ("[C] ", "Clear History"),
        ("[Q] ", "Quit"),
    ]
    .into_iter()
    .map(|(key, desc)| {
        Line::from(vec![
            Span::styled(key, MedicalTheme::key_hint()),
            Span::styled(desc, MedicalTheme::key_desc()),
        ])
    })
    .collect();

    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(actions).block(actions_block), chunks[2]);
}

fn format_status_item(label: &str, ok: bool) -> Line<'static> {
    let (icon, style) = if ok {
        ("OK ", MedicalTheme::success())
    } else {
        ("OFF", MedicalTheme::text_muted())
    };

    Line::from(vec![
        Span::styled(format!("  {icon} "), style),
        Span::styled(label.to_string(), MedicalTheme::text()),
    ])
}

fn render_history(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(Span::styled(" Analysis History ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    if state.history.is_empty() {
        let empty_msg = Paragraph::new(Line::from(vec![Span::styled(
            "No analyses yet. Press [N] to start.",
            MedicalTheme::text_muted(),
        )]))
        .block(block);
        f.render_widget(empty_msg, area);
        return;
    }

    let items: Vec<ListItem> = state
        .history
        .iter()
        .map(|entry| {
            let result = &entry.result;
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        result.classification.anemia_type.label(),
                        MedicalTheme::text(),
                    ),
                    Span::styled("  ", MedicalTheme::text()),
                    Span::styled(
                        format!("{} {}/100", result.risk_level, result.risk_score),
                        MedicalTheme::risk_level(result.risk_level),
                    ),
                ]),
                Line::from(Span::styled(
                    format!(
                        "  {} · {}, {} · Hb {} g/dL",
                        entry.created_at.format("%Y-%m-%d %H:%M"),
                        entry.input.sex,
                        entry.input.age,
                        entry.input.hemoglobin
                    ),
                    MedicalTheme::text_muted(),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(MedicalTheme::selected())
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}
