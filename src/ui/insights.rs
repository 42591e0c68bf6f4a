//! Insights view rendering.
//!
//! A table of the current insights with the selected one's full message
//! underneath.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::common::{panel, render_waiting};
use crate::app::App;
use crate::data::{HealthStatus, InsightCategory, Priority};

fn priority_style(app: &App, priority: Priority) -> Style {
    match priority {
        Priority::High => app.theme.status_style(HealthStatus::Critical),
        Priority::Medium => app.theme.status_style(HealthStatus::Warning),
        Priority::Low => Style::default().add_modifier(Modifier::DIM),
    }
}

fn category_style(app: &App, category: InsightCategory) -> Style {
    match category {
        InsightCategory::Alert => Style::default().fg(app.theme.critical),
        InsightCategory::Achievement => Style::default().fg(app.theme.healthy),
        InsightCategory::Recommendation => Style::default().fg(app.theme.highlight),
        InsightCategory::Info => Style::default(),
    }
}

/// Render the Insights view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.data.is_none() {
        render_waiting(frame, app, area);
        return;
    }
    let insights = app.insights();

    let chunks = Layout::vertical([Constraint::Min(6), Constraint::Length(6)]).split(area);

    let header = Row::new(vec!["", "Title", "Priority", "When"])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = insights
        .iter()
        .map(|insight| {
            Row::new(vec![
                Cell::from(insight.category.icon())
                    .style(category_style(app, insight.category)),
                Cell::from(insight.title.as_ref()),
                Cell::from(insight.priority.label())
                    .style(priority_style(app, insight.priority)),
                Cell::from(insight.timestamp.as_ref())
                    .style(Style::default().add_modifier(Modifier::DIM)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Fill(3),
        Constraint::Length(8),
        Constraint::Fill(1),
    ];

    let selected = app.selected_index.min(insights.len().saturating_sub(1));
    let position_info = if insights.is_empty() {
        String::new()
    } else {
        format!(" [{}/{}]", selected + 1, insights.len())
    };
    let title = format!(" Insights ({}){} ", insights.len(), position_info);

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(app, title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !insights.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(table, chunks[0], &mut state);

    let detail = match insights.get(selected) {
        Some(insight) => vec![
            Line::from(vec![
                Span::styled(
                    format!("{} ", insight.category.icon()),
                    category_style(app, insight.category),
                ),
                Span::styled(
                    insight.title.as_ref(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(insight.message.as_ref()),
        ],
        None => vec![Line::from(Span::styled(
            "No insights right now",
            Style::default().add_modifier(Modifier::DIM),
        ))],
    };
    let paragraph = Paragraph::new(detail)
        .wrap(Wrap { trim: true })
        .block(panel(app, " Details "));
    frame.render_widget(paragraph, chunks[1]);
}
