//! Analysis result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::application::AnalyzedPanel;
use crate::domain::diet::diet_plan;
use crate::domain::{AnalysisResult, ModelMetrics, Severity};
use crate::tui::styles::MedicalTheme;

/// Result screen state
#[derive(Debug, Default)]
pub struct ResultState {
    pub panel: Option<AnalyzedPanel>,
    /// Show the diet plan instead of recommendations
    pub show_diet: bool,
    /// One-line notice (report path, save failure)
    pub notice: Option<String>,
}

impl ResultState {
    #[must_use]
    pub fn new(panel: AnalyzedPanel) -> Self {
        let notice = (!panel.persisted)
            .then(|| "History unavailable: this analysis was not saved".to_string());
        Self {
            panel: Some(panel),
            show_diet: false,
            notice,
        }
    }

    /// Diet plan is offered only for abnormal panels.
    #[must_use]
    pub fn diet_available(&self) -> bool {
        self.panel
            .as_ref()
            .is_some_and(|p| p.result().classification.severity != Severity::Normal)
    }
}

/// Render the analysis result
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0], state);

    match &state.panel {
        Some(panel) => render_result_content(f, chunks[1], state, panel.result()),
        None => {
            let empty = Paragraph::new(Span::styled(
                "No analysis loaded",
                MedicalTheme::text_muted(),
            ))
            .alignment(Alignment::Center);
            f.render_widget(empty, chunks[1]);
        }
    }

    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect, state: &ResultState) {
    let mut spans = vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Analysis Result", MedicalTheme::title()),
    ];
    if let Some(panel) = &state.panel {
        spans.push(Span::styled(
            format!(
                " │ {}, {} │ {}",
                panel.input().sex,
                panel.input().age,
                panel.entry.created_at.format("%Y-%m-%d %H:%M:%S")
            ),
            MedicalTheme::text_secondary(),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, area);
}

fn render_result_content(f: &mut Frame, area: Rect, state: &ResultState, result: &AnalysisResult) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Classification
            Constraint::Length(3), // Risk gauge
            Constraint::Length(6), // Model metrics
            Constraint::Min(0),    // Notice
        ])
        .split(columns[0]);

    render_classification(f, left[0], result);
    render_risk_gauge(f, left[1], result);
    render_metrics(f, left[2], &result.model_metrics);

    if let Some(notice) = &state.notice {
        let p = Paragraph::new(Span::styled(notice.as_str(), MedicalTheme::info()))
            .wrap(Wrap { trim: true });
        f.render_widget(p, left[3]);
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(14), Constraint::Min(0)])
        .split(columns[1]);

    render_parameter_table(f, right[0], result);
    if state.show_diet {
        render_diet_plan(f, right[1], result);
    } else {
        render_recommendations(f, right[1], result);
    }
}

fn render_classification(f: &mut Frame, area: Rect, result: &AnalysisResult) {
    let c = &result.classification;
    let lines = vec![
        Line::from(Span::styled(
            c.anemia_type.label(),
            MedicalTheme::subtitle(),
        )),
        Line::from(vec![
            Span::styled("Severity: ", MedicalTheme::text_secondary()),
            Span::styled(
                c.severity.to_string().to_uppercase(),
                MedicalTheme::severity(c.severity).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Confidence: ", MedicalTheme::text_secondary()),
            Span::styled(
                format!("{:.1}%", c.confidence * 100.0),
                MedicalTheme::text(),
            ),
        ]),
        Line::from(Span::styled(
            result.risk_level.description(),
            MedicalTheme::risk_level(result.risk_level),
        )),
    ];

    let block = Block::default()
        .title(Span::styled(" Classification ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_risk_gauge(f: &mut Frame, area: Rect, result: &AnalysisResult) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Risk Score ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::risk_level(result.risk_level))
        .percent(u16::from(result.risk_score))
        .label(format!("{}/100 {}", result.risk_score, result.risk_level));
    f.render_widget(gauge, area);
}

fn render_metrics(f: &mut Frame, area: Rect, m: &ModelMetrics) {
    let pct = |v: f64| format!("{:.1}%", v * 100.0);
    let rows = [
        ("Accuracy", m.svm_accuracy, m.lr_accuracy),
        ("Precision", m.svm_precision, m.lr_precision),
        ("Recall", m.svm_recall, m.lr_recall),
        ("F1", m.svm_f1, m.lr_f1),
    ]
    .into_iter()
    .map(|(name, svm, lr)| Row::new(vec![Cell::from(name), Cell::from(pct(svm)), Cell::from(pct(lr))]));

    let table = Table::new(
        rows,
        [Constraint::Length(10), Constraint::Length(8), Constraint::Length(8)],
    )
    .header(Row::new(vec!["", "SVM", "LR"]).style(MedicalTheme::text_secondary()))
    .style(MedicalTheme::text())
    .block(
        Block::default()
            .title(Span::styled(" Model Metrics ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(table, area);
}

fn render_parameter_table(f: &mut Frame, area: Rect, result: &AnalysisResult) {
    let rows = result.parameters.iter().map(|p| {
        Row::new(vec![
            Cell::from(p.name.clone()),
            Cell::from(p.value.to_string()),
            Cell::from(p.unit.clone()),
            Cell::from(format!("{} – {}", p.ref_min, p.ref_max)),
            Cell::from(Span::styled(
                p.status.to_string(),
                MedicalTheme::parameter_status(p.status),
            )),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(14),
            Constraint::Length(7),
        ],
    )
    .header(
        Row::new(vec!["Parameter", "Value", "Unit", "Reference", "Status"])
            .style(MedicalTheme::text_secondary().add_modifier(Modifier::BOLD)),
    )
    .style(MedicalTheme::text())
    .block(
        Block::default()
            .title(Span::styled(" CBC Parameters ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(table, area);
}

fn render_recommendations(f: &mut Frame, area: Rect, result: &AnalysisResult) {
    let lines: Vec<Line> = result
        .recommendations
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            Line::from(vec![
                Span::styled(format!("{}. ", i + 1), MedicalTheme::key_hint()),
                Span::styled(rec.as_str(), MedicalTheme::text()),
            ])
        })
        .collect();

    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(" Recommendations ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(p, area);
}

fn render_diet_plan(f: &mut Frame, area: Rect, result: &AnalysisResult) {
    let plan = diet_plan(result.classification.anemia_type);

    let mut lines = vec![
        Line::from(Span::styled(plan.summary, MedicalTheme::text_secondary())),
        Line::from(""),
        Line::from(Span::styled("Recommended Foods", MedicalTheme::success())),
    ];
    lines.extend(plan.foods.iter().map(|food| {
        Line::from(vec![
            Span::styled(format!("  • {}", food.name), MedicalTheme::text()),
            Span::styled(format!(": {}", food.benefit), MedicalTheme::text_muted()),
        ])
    }));
    lines.push(Line::from(Span::styled("Foods to Avoid", MedicalTheme::danger())));
    lines.extend(
        plan.avoid
            .iter()
            .map(|item| Line::from(Span::styled(format!("  • {item}"), MedicalTheme::text()))),
    );
    lines.push(Line::from(Span::styled("Sample Meal Plan", MedicalTheme::info())));
    lines.extend(plan.meals.iter().map(|meal| {
        Line::from(vec![
            Span::styled(format!("  {}: ", meal.meal), MedicalTheme::key_hint()),
            Span::styled(meal.items.join(", "), MedicalTheme::text()),
        ])
    }));
    lines.push(Line::from(Span::styled(
        format!("Tips: {}", plan.tips.join(" · ")),
        MedicalTheme::text_muted(),
    )));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(format!(" {} ", plan.title), MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(p, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let mut spans = vec![
        Span::styled("[R] ", MedicalTheme::key_hint()),
        Span::styled("Export Report ", MedicalTheme::key_desc()),
        Span::styled("[I] ", MedicalTheme::key_hint()),
        Span::styled("AI Insights ", MedicalTheme::key_desc()),
    ];
    if state.diet_available() {
        spans.push(Span::styled("[P] ", MedicalTheme::key_hint()));
        spans.push(Span::styled(
            if state.show_diet { "Recommendations " } else { "Diet Plan " },
            MedicalTheme::key_desc(),
        ));
    }
    spans.extend([
        Span::styled("[N] ", MedicalTheme::key_hint()),
        Span::styled("New Analysis ", MedicalTheme::key_desc()),
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled("Dashboard", MedicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, area);
}
