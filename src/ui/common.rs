//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay,
//! plus a few small helpers the views build on.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::duration::format_elapsed;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the header bar with the overall status and headline vitals.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (Some(data), Some(status)) = (app.data.as_ref(), app.status()) else {
        let line = Line::from(vec![
            Span::styled(" VITALWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let status_style = app.theme.status_style(status);
    let metrics = &data.metrics;

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("VITALWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(status.headline(), status_style.add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        Span::styled(
            format!("♥ {}", metrics.heart_rate),
            Style::default().fg(app.theme.heart),
        ),
        Span::raw(" bpm  "),
        Span::styled(
            format!("O₂ {}", metrics.blood_oxygen),
            Style::default().fg(app.theme.oxygen),
        ),
        Span::raw("%  "),
        Span::styled(
            format!("stress {}", metrics.stress_level),
            Style::default().fg(app.theme.stress),
        ),
        Span::raw(" │ "),
        Span::styled(data.origin.label(), Style::default().add_modifier(Modifier::DIM)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn tab_title(index: usize, view: View) -> String {
    format!("{}:{}", index + 1, view.label())
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(tab_title(i, *view)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Map a click on the tab bar to a view.
///
/// Mirrors the layout of [`render_tabs`]: each title is padded by one
/// space on both sides and followed by a one-column divider.
pub fn tab_at_column(column: u16) -> Option<View> {
    let mut start = 0u16;
    for (i, view) in View::ALL.iter().enumerate() {
        let width = tab_title(i, *view).chars().count() as u16 + 2;
        if column < start + width {
            return Some(*view);
        }
        start += width + 1;
        if column < start {
            // On the divider
            return None;
        }
    }
    None
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else if let Some(updated) = app.last_update {
        // Context-sensitive controls
        let controls = match app.current_view {
            View::Care if app.filter_active => "Type to search | Enter:apply Esc:cancel",
            View::Care => "/:search c:clear ↑↓:select !:emergency ?:help q:quit",
            View::Insights => "↑↓:select r:refresh e:export ?:help q:quit",
            _ => "t:timeframe r:refresh e:export Tab:switch ?:help q:quit",
        };

        format!(
            " {} | Updated {} ago | {}",
            app.source_description(),
            format_elapsed(updated.elapsed()),
            controls,
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1-7         Jump to view"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Dashboard"),
        Line::from("  t         Cycle chart timeframe"),
        Line::from("  !         Emergency care"),
        Line::from(""),
        section(" Care"),
        Line::from("  /         Search doctors"),
        Line::from("  c         Clear search"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_area = centered(area, 42, 27);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// A centered rectangle of at most `width` x `height`, responsive to terminal size.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Bordered panel in the theme's style.
pub fn panel<'a>(app: &App, title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// Placeholder shown before the first frame arrives.
pub fn render_waiting(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.load_error {
        Some(ref err) => format!("No data: {}", err),
        None => "Waiting for the first reading...".to_string(),
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(panel(app, ""));
    frame.render_widget(paragraph, area);
}

/// Render sparkline levels (0-7) as block characters, keeping the last `width`.
pub fn sparkline(levels: &[u8], width: usize) -> String {
    if levels.is_empty() {
        return " ".repeat(width);
    }
    let skip = levels.len().saturating_sub(width);
    levels[skip..]
        .iter()
        .map(|&v| SPARKLINE_CHARS[v.min(7) as usize])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_at_column() {
        // " 1:Overview " occupies 0..12, divider at 12
        assert_eq!(tab_at_column(0), Some(View::Overview));
        assert_eq!(tab_at_column(11), Some(View::Overview));
        assert_eq!(tab_at_column(12), None);
        assert_eq!(tab_at_column(13), Some(View::Heart));
        assert_eq!(tab_at_column(500), None);
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[], 3), "   ");
        assert_eq!(sparkline(&[0, 7, 9], 8), "▁██");
        assert_eq!(sparkline(&[0, 1, 2, 3], 2), "▃▄");
    }

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 40, 20), Rect::new(30, 10, 40, 20));
        // Clamped on small terminals
        let small = Rect::new(0, 0, 30, 10);
        assert_eq!(centered(small, 40, 20), Rect::new(2, 1, 26, 8));
    }
}
