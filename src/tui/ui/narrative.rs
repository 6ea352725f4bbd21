//! AI insights view: streamed clinical narrative.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Narrative stream state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NarrativeState {
    #[default]
    Idle,
    /// Waiting for or receiving text
    Streaming { text: String, ticks: usize },
    Complete { text: String },
    /// Failed; keeps whatever text arrived first
    Error { text: String, message: String },
}

impl NarrativeState {
    pub fn append(&mut self, chunk: &str) {
        if let Self::Streaming { text, .. } = self {
            text.push_str(chunk);
        }
    }

    pub fn tick(&mut self) {
        if let Self::Streaming { ticks, .. } = self {
            *ticks = ticks.wrapping_add(1);
        }
    }

    pub fn finish(&mut self) {
        if let Self::Streaming { text, .. } = self {
            *self = Self::Complete {
                text: std::mem::take(text),
            };
        }
    }

    pub fn fail(&mut self, message: String) {
        let text = match self {
            Self::Streaming { text, .. } | Self::Complete { text } => std::mem::take(text),
            _ => String::new(),
        };
        *self = Self::Error { text, message };
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::Streaming { .. })
    }
}

/// Render the narrative view
pub fn render_narrative(f: &mut Frame, area: Rect, state: &NarrativeState, model: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Text
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("AI Clinical Insights", MedicalTheme::title()),
        Span::styled(format!(" │ {model}"), MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, chunks[0]);

    render_narrative_body(f, chunks[1], state);
    render_narrative_footer(f, chunks[2], state);
}

fn render_narrative_body(f: &mut Frame, area: Rect, state: &NarrativeState) {
    let (title, border, text, status) = match state {
        NarrativeState::Idle => (
            " Insights ",
            MedicalTheme::border(),
            "",
            Some(Line::from(Span::styled(
                "No narrative requested",
                MedicalTheme::text_muted(),
            ))),
        ),
        NarrativeState::Streaming { text, ticks } => (
            " Insights (streaming) ",
            MedicalTheme::border_focused(),
            text.as_str(),
            text.is_empty().then(|| {
                Line::from(Span::styled(
                    format!("{} Analyzing CBC data...", SPINNER[ticks / 4 % SPINNER.len()]),
                    MedicalTheme::info(),
                ))
            }),
        ),
        NarrativeState::Complete { text } => (
            " Insights ",
            MedicalTheme::border(),
            text.as_str(),
            None,
        ),
        NarrativeState::Error { text, message } => (
            " Insights (failed) ",
            MedicalTheme::danger(),
            text.as_str(),
            Some(Line::from(vec![
                Span::styled("! ", MedicalTheme::danger()),
                Span::styled(message.as_str(), MedicalTheme::danger()),
            ])),
        ),
    };

    let mut lines: Vec<Line> = text
        .lines()
        .map(|line| {
            let style = if line.starts_with('#') {
                MedicalTheme::subtitle()
            } else {
                MedicalTheme::text()
            };
            Line::from(Span::styled(line, style))
        })
        .collect();
    if let Some(status) = status {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(status);
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(title, MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(border),
    );
    let scroll = tail_scroll(&p, area);
    let p = p.scroll((scroll, 0));
    f.render_widget(p, area);
}

/// Rows to scroll so the last wrapped row of a bordered paragraph is visible.
fn tail_scroll(p: &Paragraph, area: Rect) -> u16 {
    let rows = p.line_count(area.width.saturating_sub(2));
    u16::try_from(rows.saturating_sub(usize::from(area.height))).unwrap_or(u16::MAX)
}

fn render_narrative_footer(f: &mut Frame, area: Rect, state: &NarrativeState) {
    let content = if state.is_streaming() {
        Line::from(vec![
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Cancel", MedicalTheme::key_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[I] ", MedicalTheme::key_hint()),
            Span::styled("Regenerate ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Back to Result", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content)
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        );
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_lifecycle() {
        let mut state = NarrativeState::Streaming {
            text: String::new(),
            ticks: 0,
        };
        state.append("Low ferritin ");
        state.append("confirms depletion.");
        state.finish();
        assert_eq!(
            state,
            NarrativeState::Complete {
                text: "Low ferritin confirms depletion.".to_string()
            }
        );
    }

    #[test]
    fn test_failure_keeps_partial_text() {
        let mut state = NarrativeState::Streaming {
            text: "partial".to_string(),
            ticks: 3,
        };
        state.fail("Narrative transport error: reset".to_string());
        assert_eq!(
            state,
            NarrativeState::Error {
                text: "partial".to_string(),
                message: "Narrative transport error: reset".to_string()
            }
        );
    }

    #[test]
    fn test_idle_ignores_chunks() {
        let mut state = NarrativeState::Idle;
        state.append("stray");
        state.finish();
        assert_eq!(state, NarrativeState::Idle);
    }

    #[test]
    fn test_tail_scroll_counts_wrapped_rows() {
        let block = || Block::default().borders(Borders::ALL);
        let area = Rect::new(0, 0, 12, 5);

        // One logical line wrapping to several rows inside a 10-column body.
        let long = Paragraph::new("ferritin low iron low rdw high mcv low")
            .wrap(Wrap { trim: false })
            .block(block());
        assert!(tail_scroll(&long, area) > 0);

        let short = Paragraph::new("ok").wrap(Wrap { trim: false }).block(block());
        assert_eq!(tail_scroll(&short, area), 0);
    }
}
