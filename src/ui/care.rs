//! Emergency-care rendering.
//!
//! The Care view lists the doctors in the current frame (filterable with
//! `/`) next to the selected doctor's contact details. The emergency
//! overlay is a modal that can pop up over any view.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::common::{centered, panel, render_waiting};
use crate::app::App;
use crate::data::{emergency_doctors, filter_doctors, Availability, Doctor, HealthStatus};

/// Doctors listed on the emergency overlay.
const OVERLAY_DOCTORS: usize = 3;

fn availability_style(app: &App, availability: Availability) -> Style {
    match availability {
        Availability::Available => app.theme.status_style(HealthStatus::Normal),
        Availability::Busy => app.theme.status_style(HealthStatus::Warning),
        Availability::EmergencyOnly => app.theme.status_style(HealthStatus::Critical),
    }
}

/// Render the Care view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        render_waiting(frame, app, area);
        return;
    };
    let doctors = app.filtered_doctors();

    let chunks =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).split(area);

    let header = Row::new(vec!["Name", "Specialty", "Distance", "Rating", "Status"])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = doctors
        .iter()
        .map(|d| {
            Row::new(vec![
                Cell::from(d.name.as_ref()),
                Cell::from(d.specialty.as_ref()),
                Cell::from(format!("{:.1} km", d.distance)),
                Cell::from(format!("★ {:.1}", d.rating)),
                Cell::from(d.availability.label())
                    .style(availability_style(app, d.availability)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(9),
        Constraint::Length(6),
        Constraint::Fill(1),
    ];

    let selected = app.selected_index.min(doctors.len().saturating_sub(1));

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };
    let position_info = if doctors.is_empty() {
        String::new()
    } else {
        format!(" [{}/{}]", selected + 1, doctors.len())
    };
    let title = format!(
        " Emergency Care ({}/{}){}{} ",
        doctors.len(),
        data.doctors.len(),
        filter_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(app, title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !doctors.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(table, chunks[0], &mut state);

    render_detail(frame, app, app.selected_doctor(), chunks[1]);
}

fn render_detail(frame: &mut Frame, app: &App, doctor: Option<&Doctor>, area: Rect) {
    let label = |text: &'static str| Span::styled(text, Style::default().add_modifier(Modifier::DIM));

    let lines = match doctor {
        Some(d) => {
            let eta = if d.estimated_time.is_empty() {
                "-"
            } else {
                d.estimated_time.as_ref()
            };
            vec![
                Line::from(Span::styled(
                    d.name.as_ref(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("{} · {}", d.specialty, d.hospital)),
                Line::from(""),
                Line::from(vec![label("Phone    "), Span::raw(d.phone.as_ref())]),
                Line::from(vec![label("Address  "), Span::raw(d.address.as_ref())]),
                Line::from(vec![
                    label("Distance "),
                    Span::raw(format!("{:.1} km ({})", d.distance, eta)),
                ]),
                Line::from(vec![
                    label("Status   "),
                    Span::styled(
                        d.availability.label(),
                        availability_style(app, d.availability),
                    ),
                ]),
            ]
        }
        None => vec![Line::from(label("No doctors match the search"))],
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel(app, " Contact "));
    frame.render_widget(paragraph, area);
}

/// Render the emergency overlay with the nearest doctors.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let directory = app
        .data
        .as_ref()
        .map(|f| f.doctors.as_slice())
        .unwrap_or_else(|| emergency_doctors());
    let nearest = filter_doctors(directory, "");

    let critical = app.theme.status_style(HealthStatus::Critical);
    let mut lines = vec![
        Line::from(Span::styled("⚠ Emergency Medical Care", critical)),
        Line::from(""),
        Line::from(vec![
            Span::raw("Life-threatening emergency? "),
            Span::styled("Call 911", critical.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Nearest doctors",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for d in nearest.iter().take(OVERLAY_DOCTORS) {
        lines.push(Line::from(vec![
            Span::raw(format!("  {} ", d.name)),
            Span::styled(
                format!("({})", d.availability.label()),
                availability_style(app, d.availability),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {} · {:.1} km · {}", d.phone, d.distance, d.estimated_time),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: open directory, Esc: dismiss",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(" Emergency ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.critical));

    let height = lines.len() as u16 + 2;
    let overlay_area = centered(area, 56, height);

    frame.render_widget(Clear, overlay_area);
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
