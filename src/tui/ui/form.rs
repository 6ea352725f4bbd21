//! CBC panel input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::samples::{SamplePatient, SAMPLE_PATIENTS};
use crate::domain::{CbcInput, Parameter, Sex};
use crate::tui::styles::MedicalTheme;
use crate::HemoscanError;

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub unit: &'static str,
    pub value: String,
    pub min: f64,
    pub max: f64,
}

/// Plausibility bounds per parameter, in `Parameter::ALL` order.
const CBC_BOUNDS: [(f64, f64); 11] = [
    (3.0, 20.0),   // hemoglobin
    (10.0, 60.0),  // hematocrit
    (1.0, 8.0),    // rbc
    (50.0, 120.0), // mcv
    (15.0, 40.0),  // mch
    (25.0, 40.0),  // mchc
    (10.0, 25.0),  // rdw
    (1.0, 30.0),   // wbc
    (50.0, 600.0), // platelets
    (10.0, 200.0), // iron
    (1.0, 500.0),  // ferritin
];

const AGE_MIN: f64 = 1.0;
const AGE_MAX: f64 = 120.0;

/// CBC form state.
///
/// Positions `0..11` are the CBC parameters, `11` is age and `12` the sex
/// selector.
pub struct CbcFormState {
    pub fields: Vec<FormField>,
    pub sex: Sex,
    pub selected_field: usize,
    pub error_message: Option<String>,
    /// Last loaded sample, if any
    pub loaded_sample: Option<&'static SamplePatient>,
    next_sample: usize,
}

impl Default for CbcFormState {
    fn default() -> Self {
        let mut fields: Vec<FormField> = Parameter::ALL
            .iter()
            .zip(CBC_BOUNDS)
            .map(|(p, (min, max))| FormField {
                label: p.label(),
                unit: p.unit(),
                value: String::new(),
                min,
                max,
            })
            .collect();
        fields.push(FormField {
            label: "Age",
            unit: "years",
            value: String::new(),
            min: AGE_MIN,
            max: AGE_MAX,
        });

        Self {
            fields,
            sex: Sex::Female,
            selected_field: 0,
            error_message: None,
            loaded_sample: None,
            next_sample: 0,
        }
    }
}

impl CbcFormState {
    fn positions(&self) -> usize {
        self.fields.len() + 1
    }

    fn sex_selected(&self) -> bool {
        self.selected_field == self.fields.len()
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.positions();
    }

    pub fn prev_field(&mut self) {
        self.selected_field = self
            .selected_field
            .checked_sub(1)
            .unwrap_or(self.positions() - 1);
    }

    /// Type into the current field; on the sex selector any of
    /// `m`/`f`/space switches sex.
    pub fn input_char(&mut self, c: char) {
        if self.sex_selected() {
            match c {
                'm' | 'M' => self.sex = Sex::Male,
                'f' | 'F' => self.sex = Sex::Female,
                ' ' => self.toggle_sex(),
                _ => return,
            }
            self.error_message = None;
            return;
        }

        if c.is_ascii_digit() || c == '.' {
            self.fields[self.selected_field].value.push(c);
            self.error_message = None;
        }
    }

    pub fn toggle_sex(&mut self) {
        self.sex = match self.sex {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        };
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.selected_field) {
            field.value.pop();
        }
    }

    pub fn clear_field(&mut self) {
        if let Some(field) = self.fields.get_mut(self.selected_field) {
            field.value.zeroize();
        }
    }

    /// Wipe all field buffers and reset the form.
    ///
    /// Called right after submission so plaintext lab values do not linger
    /// in UI state.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
        }
        self.error_message = None;
        self.selected_field = 0;
        self.loaded_sample = None;
    }

    /// Fill the form from the next built-in sample, cycling through all six.
    pub fn load_next_sample(&mut self) {
        let sample = &SAMPLE_PATIENTS[self.next_sample % SAMPLE_PATIENTS.len()];
        self.next_sample = (self.next_sample + 1) % SAMPLE_PATIENTS.len();
        self.load_sample(sample);
    }

    pub fn load_sample(&mut self, sample: &'static SamplePatient) {
        for (field, parameter) in self.fields.iter_mut().zip(Parameter::ALL) {
            field.value.zeroize();
            field.value = sample.data.value(parameter).to_string();
        }
        if let Some(age) = self.fields.last_mut() {
            age.value.zeroize();
            age.value = sample.data.age.to_string();
        }
        self.sex = sample.data.sex;
        self.loaded_sample = Some(sample);
        self.error_message = None;
    }

    /// Validate and convert to a CBC panel.
    ///
    /// # Errors
    /// Returns `HemoscanError::Validation` naming the first field that is
    /// empty, not a number, or outside its bounds.
    pub fn to_cbc_input(&self) -> Result<CbcInput, HemoscanError> {
        let mut values = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            let value: f64 = field
                .value
                .trim()
                .parse()
                .map_err(|_| invalid(format!("{}: Invalid number", field.label)))?;

            if !value.is_finite() || value < field.min || value > field.max {
                return Err(invalid(format!(
                    "{}: Value must be between {} and {}",
                    field.label, field.min, field.max
                )));
            }

            values.push(value);
        }

        let Some(age) = values.pop() else {
            return Err(invalid("Age: Missing"));
        };
        if age.fract() != 0.0 {
            return Err(invalid("Age: Must be a whole number"));
        }

        CbcInput::from_values(&values, self.sex, age as u32).map_err(HemoscanError::Validation)
    }
}

fn invalid(message: impl Into<String>) -> HemoscanError {
    HemoscanError::Validation(message.into())
}

/// Render the CBC input form
pub fn render_cbc_form(f: &mut Frame, area: Rect, state: &CbcFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], state);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect, state: &CbcFormState) {
    let mut spans = vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("CBC Panel Entry", MedicalTheme::title()),
        Span::styled(" │ 11 parameters + demographics", MedicalTheme::text_secondary()),
    ];
    let mut lines = Vec::with_capacity(2);
    if let Some(sample) = state.loaded_sample {
        spans.push(Span::styled(" │ Sample: ", MedicalTheme::text_muted()));
        spans.push(Span::styled(sample.name, MedicalTheme::info()));
        lines.push(Line::from(spans));
        lines.push(Line::from(vec![
            Span::styled(" ", MedicalTheme::text()),
            Span::styled(sample.condition, MedicalTheme::subtitle()),
            Span::styled(" - ", MedicalTheme::text_muted()),
            Span::styled(sample.description, MedicalTheme::text_secondary()),
        ]));
    } else {
        lines.push(Line::from(spans));
    }

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &CbcFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    // Left: first six CBC values. Right: the rest, age and sex.
    let mid = 6;
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints(column_constraints(mid))
        .split(columns[0]);
    let right_count = state.positions() - mid;
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints(column_constraints(right_count))
        .split(columns[1]);

    for (i, field) in state.fields.iter().enumerate() {
        let cell = if i < mid { left[i] } else { right[i - mid] };
        render_field(f, cell, field, i == state.selected_field);
    }

    let sex_cell = right[right_count - 1];
    render_sex_selector(f, sex_cell, state.sex, state.sex_selected());
}

fn column_constraints(rows: usize) -> Vec<Constraint> {
    (0..rows)
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect()
}

fn field_block(title: String, selected: bool) -> Block<'static> {
    let (border_style, title_style) = if selected {
        (MedicalTheme::border_focused(), MedicalTheme::focused())
    } else {
        (MedicalTheme::border(), MedicalTheme::text_secondary())
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn cursor(selected: bool) -> Span<'static> {
    if selected {
        Span::styled("▌", Style::default().fg(MedicalTheme::PRIMARY_LIGHT))
    } else {
        Span::raw("")
    }
}

fn render_field(f: &mut Frame, area: Rect, field: &FormField, selected: bool) {
    let value_display = if field.value.is_empty() {
        Span::styled(
            format!("{} ({}-{})", field.unit, field.min, field.max),
            MedicalTheme::text_muted(),
        )
    } else {
        Span::styled(
            format!("{} {}", field.value, field.unit),
            MedicalTheme::text(),
        )
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value_display,
        cursor(selected),
    ]))
    .block(field_block(format!(" {} ", field.label), selected));

    f.render_widget(content, area);
}

fn render_sex_selector(f: &mut Frame, area: Rect, sex: Sex, selected: bool) {
    let option = |label: &'static str, active: bool| {
        if active {
            Span::styled(format!("[{label}]"), MedicalTheme::focused())
        } else {
            Span::styled(format!(" {label} "), MedicalTheme::text_muted())
        }
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        option("Male", sex == Sex::Male),
        Span::raw(" "),
        option("Female", sex == Sex::Female),
        cursor(selected),
    ]))
    .block(field_block(" Sex (M/F/Space) ".to_string(), selected));

    f.render_widget(content, area);
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &CbcFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Analyze ", MedicalTheme::key_desc()),
            Span::styled("[S] ", MedicalTheme::key_hint()),
            Span::styled("Next Sample ", MedicalTheme::key_desc()),
            Span::styled("[Del] ", MedicalTheme::key_hint()),
            Span::styled("Clear Field ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Cancel", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, area);
}
