//! Colours for the dashboard.
//!
//! Each vital sign keeps one colour across cards, charts and sparklines.
//! Severity colours are reserved for readings that cross a threshold.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::HealthStatus;

/// Palette and widget styles.
///
/// [`Theme::auto_detect`] picks between [`Theme::dark`] and
/// [`Theme::light`] from the terminal background.
#[derive(Debug, Clone)]
pub struct Theme {
    pub highlight: Color,
    pub border: Color,

    // Severity
    pub healthy: Color,
    pub warning: Color,
    pub critical: Color,

    // One per vital
    pub heart: Color,
    pub oxygen: Color,
    /// Steps, calories and water share this.
    pub activity: Color,
    pub stress: Color,
    pub sleep: Color,

    /// Table header rows.
    pub header: Style,
    /// Selected list row.
    pub selected: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub border_type: BorderType,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            border: Color::Gray,
            healthy: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            heart: Color::LightRed,
            oxygen: Color::LightBlue,
            activity: Color::LightGreen,
            stress: Color::LightYellow,
            sleep: Color::LightMagenta,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Darker vital colours; the light variants wash out on white.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            border: Color::DarkGray,
            healthy: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            heart: Color::Red,
            oxygen: Color::Blue,
            activity: Color::Green,
            stress: Color::Rgb(180, 120, 0),
            sleep: Color::Magenta,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Light theme when the terminal background luma is above 0.5.
    ///
    /// Falls back to dark when the terminal does not answer the query.
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a reading's severity; critical is also bold.
    pub fn status_style(&self, status: HealthStatus) -> Style {
        match status {
            HealthStatus::Normal => Style::default().fg(self.healthy),
            HealthStatus::Warning => Style::default().fg(self.warning),
            HealthStatus::Critical => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
