//! UI module: View components for the TUI.

pub mod dashboard;
pub mod form;
pub mod narrative;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: For educational and decision-support purposes only. Always consult a qualified healthcare professional.",
            MedicalTheme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Model metrics are nominal figures; classification follows fixed clinical rules.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
