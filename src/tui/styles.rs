//! Clinical color palette and styles.
//!
//! Crimson accents on a dark slate background; semantic colors follow
//! parameter status and risk band.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{ParameterStatus, RiskLevel, Severity};

/// Clinical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    // === Primary Colors ===

    /// Crimson - Primary color
    pub const PRIMARY: Color = Color::Rgb(220, 50, 50); // #DC3232

    /// Lighter crimson for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(248, 113, 113); // #F87171

    /// Darker crimson for header bars
    pub const PRIMARY_DARK: Color = Color::Rgb(153, 27, 27); // #991B1B

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    /// Emerald - Normal / low risk
    pub const SUCCESS: Color = Color::Rgb(40, 160, 100); // #28A064

    /// Amber - Moderate risk
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Orange - High values / high risk
    pub const CAUTION: Color = Color::Rgb(200, 120, 20); // #C87814

    /// Rose - Low values / critical risk
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Blue - Info
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    // === Background Colors ===

    pub const BG_DARK: Color = Color::Rgb(15, 20, 35); // #0F1423

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(120, 130, 150); // #788296

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Style for selected list rows
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Get risk level style
    #[must_use]
    pub fn risk_level(level: RiskLevel) -> Style {
        match level {
            RiskLevel::Low => Self::success(),
            RiskLevel::Moderate => Self::warning(),
            RiskLevel::High => Style::default().fg(Self::CAUTION),
            RiskLevel::Critical => Self::danger().add_modifier(Modifier::BOLD),
        }
    }

    /// Status column style: LOW red, HIGH orange, NORMAL green.
    #[must_use]
    pub fn parameter_status(status: ParameterStatus) -> Style {
        let color = match status {
            ParameterStatus::Low => Self::DANGER,
            ParameterStatus::High => Self::CAUTION,
            ParameterStatus::Normal => Self::SUCCESS,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn severity(severity: Severity) -> Style {
        match severity {
            Severity::Normal => Self::success(),
            Severity::Mild => Self::warning(),
            Severity::Moderate => Style::default().fg(Self::CAUTION),
            Severity::Severe => Self::danger(),
        }
    }
}

/// ASCII art logo
pub const LOGO: &str = r"
╦ ╦┌─┐┌┬┐┌─┐╔═╗┌─┐┌─┐┌┐┌
╠═╣├┤ ││││ │╚═╗│  ├─┤│││
╩ ╩└─┘┴ ┴└─┘╚═╝└─┘┴ ┴┘└┘
";
