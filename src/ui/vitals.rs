//! Per-metric detail views.
//!
//! Each view pairs the current reading and its classification with the
//! matching series from the trend chart.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Gauge, Paragraph, Row, Table},
    Frame,
};

use super::common::{panel, render_waiting, sparkline};
use super::overview::{render_trend_chart, Series};
use crate::app::App;
use crate::data::classify::{goal_percent, sleep_is_adequate};
use crate::data::{
    sleep_log, weekly_average, HealthStatus, HeartRateZone, OxygenLevel, StressBand, TrendPoint,
    Vital,
};

/// Minimum, mean and maximum of one field over the chart points.
fn series_stats(points: &[TrendPoint], value: fn(&TrendPoint) -> u32) -> Option<(u32, u32, u32)> {
    let values: Vec<u32> = points.iter().map(value).collect();
    let min = *values.iter().min()?;
    let max = *values.iter().max()?;
    let mean = (values.iter().map(|v| f64::from(*v)).sum::<f64>() / values.len() as f64).round();
    Some((min, mean as u32, max))
}

fn stats_line(label: &str, stats: Option<(u32, u32, u32)>, unit: &str) -> Line<'static> {
    match stats {
        Some((min, mean, max)) => Line::from(format!(
            " {}: min {}{} · avg {}{} · max {}{}",
            label, min, unit, mean, unit, max, unit
        )),
        None => Line::from(format!(" {}: -", label)),
    }
}

/// Split the content area into a reading panel and a chart.
fn split(area: Rect) -> (Rect, Rect) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(42), Constraint::Percentage(58)]).split(area);
    (chunks[0], chunks[1])
}

/// Heart rate: zone table and the heart-rate series.
pub fn render_heart(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        render_waiting(frame, app, area);
        return;
    };
    let bpm = data.metrics.heart_rate;
    let zone = HeartRateZone::classify(bpm);
    let (left, right) = split(area);

    let left_chunks = Layout::vertical([Constraint::Length(6), Constraint::Min(7)]).split(left);

    let reading = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} BPM", bpm),
                Style::default().fg(app.theme.heart).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(zone.label(), app.theme.status_style(zone.severity())),
        ]),
        Line::from(format!(" {}", zone.description())),
        stats_line("Range", series_stats(&app.chart, |p| p.heart_rate), ""),
        Line::from(Span::styled(
            format!(" {}", sparkline(&app.history.sparkline(Vital::HeartRate), 30)),
            Style::default().fg(app.theme.heart),
        )),
    ];
    frame.render_widget(
        Paragraph::new(reading).block(panel(app, " Heart Rate ")),
        left_chunks[0],
    );

    let rows: Vec<Row> = HeartRateZone::ALL
        .iter()
        .map(|(z, range)| {
            let marker = if *z == zone { "▶" } else { " " };
            let row = Row::new(vec![
                Cell::from(marker),
                Cell::from(z.label()),
                Cell::from(*range),
                Cell::from(z.description()),
            ]);
            if *z == zone {
                row.style(app.theme.status_style(z.severity()).add_modifier(Modifier::BOLD))
            } else {
                row
            }
        })
        .collect();
    let header = Row::new(vec!["", "Zone", "BPM", ""]).style(app.theme.header);
    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(panel(app, " Zones "));
    frame.render_widget(table, left_chunks[1]);

    let series = [Series {
        name: "Heart rate",
        color: app.theme.heart,
        value: |p| p.heart_rate,
    }];
    let title = format!(" Heart Rate: {} ", app.timeframe.label());
    render_trend_chart(frame, app, right, title, &series, [40.0, 130.0]);
}

/// Blood oxygen: level table and the SpO2 series.
pub fn render_oxygen(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        render_waiting(frame, app, area);
        return;
    };
    let percent = data.metrics.blood_oxygen;
    let level = OxygenLevel::classify(percent);
    let (left, right) = split(area);

    let left_chunks = Layout::vertical([Constraint::Length(6), Constraint::Min(6)]).split(left);

    let reading = vec![
        Line::from(vec![
            Span::styled(
                format!(" {}%", percent),
                Style::default().fg(app.theme.oxygen).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(level.label(), app.theme.status_style(level.severity())),
        ]),
        Line::from(format!(" {}", level.description())),
        stats_line("Range", series_stats(&app.chart, |p| p.blood_oxygen), "%"),
        Line::from(Span::styled(
            format!(" {}", sparkline(&app.history.sparkline(Vital::BloodOxygen), 30)),
            Style::default().fg(app.theme.oxygen),
        )),
    ];
    frame.render_widget(
        Paragraph::new(reading).block(panel(app, " Blood Oxygen ")),
        left_chunks[0],
    );

    let rows: Vec<Row> = OxygenLevel::ALL
        .iter()
        .map(|(l, range)| {
            let row = Row::new(vec![
                Cell::from(if *l == level { "▶" } else { " " }),
                Cell::from(l.label()),
                Cell::from(*range),
                Cell::from(l.description()),
            ]);
            if *l == level {
                row.style(app.theme.status_style(l.severity()).add_modifier(Modifier::BOLD))
            } else {
                row
            }
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Fill(1),
        ],
    )
    .header(Row::new(vec!["", "Level", "SpO2", ""]).style(app.theme.header))
    .block(panel(app, " Levels "));
    frame.render_widget(table, left_chunks[1]);

    let series = [Series {
        name: "SpO2",
        color: app.theme.oxygen,
        value: |p| p.blood_oxygen,
    }];
    let title = format!(" Blood Oxygen: {} ", app.timeframe.label());
    render_trend_chart(frame, app, right, title, &series, [90.0, 100.0]);
}

/// Activity: goal gauges and the hourly steps series.
pub fn render_activity(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        render_waiting(frame, app, area);
        return;
    };
    let m = &data.metrics;
    let (left, right) = split(area);

    let left_chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(0),
    ])
    .split(left);

    let gauge = |title: &'static str, value: u32, goal: u32, unit: &str| {
        let percent = goal_percent(value, goal);
        Gauge::default()
            .block(panel(app, title))
            .gauge_style(Style::default().fg(app.theme.activity))
            .ratio((f64::from(percent) / 100.0).clamp(0.0, 1.0))
            .label(format!("{} / {} {} ({}%)", value, goal, unit, percent))
    };

    frame.render_widget(
        gauge(" Steps ", m.steps, app.goals.steps, "steps"),
        left_chunks[0],
    );
    frame.render_widget(
        gauge(" Calories ", m.calories, app.goals.calories, "kcal"),
        left_chunks[1],
    );

    let water = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ml", m.water_intake),
                Style::default().fg(app.theme.oxygen).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  ({:.1} L)", f64::from(m.water_intake) / 1000.0)),
        ]),
        Line::from(vec![
            Span::raw(" steps "),
            Span::styled(
                sparkline(&app.history.sparkline(Vital::Steps), 24),
                Style::default().fg(app.theme.activity),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(water).block(panel(app, " Water Intake ")),
        left_chunks[2],
    );

    let series = [Series {
        name: "Steps",
        color: app.theme.activity,
        value: |p| p.steps,
    }];
    let title = format!(" Steps per Hour: {} ", app.timeframe.label());
    render_trend_chart(frame, app, right, title, &series, [0.0, 700.0]);
}

/// Stress and sleep: stress band, the stress series and the sleep log.
pub fn render_stress_sleep(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        render_waiting(frame, app, area);
        return;
    };
    let m = &data.metrics;
    let band = StressBand::classify(m.stress_level);

    let rows = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);
    let (stress_area, stress_chart) = split(rows[0]);
    let (sleep_area, log_area) = split(rows[1]);

    let stress = vec![
        Line::from(vec![
            Span::styled(
                format!(" {}/100", m.stress_level),
                Style::default().fg(app.theme.stress).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(band.label(), app.theme.status_style(band.severity())),
        ]),
        stats_line("Range", series_stats(&app.chart, |p| p.stress_level), ""),
        Line::from(Span::styled(
            format!(" {}", sparkline(&app.history.sparkline(Vital::StressLevel), 30)),
            Style::default().fg(app.theme.stress),
        )),
    ];
    frame.render_widget(
        Paragraph::new(stress).block(panel(app, " Stress ")),
        stress_area,
    );

    let series = [Series {
        name: "Stress",
        color: app.theme.stress,
        value: |p| p.stress_level,
    }];
    let title = format!(" Stress: {} ", app.timeframe.label());
    render_trend_chart(frame, app, stress_chart, title, &series, [0.0, 100.0]);

    let log = sleep_log();
    let adequate = sleep_is_adequate(m.sleep_hours);
    let mut sleep = vec![
        Line::from(vec![
            Span::styled(
                format!(" {:.1} h", m.sleep_hours),
                Style::default().fg(app.theme.sleep).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            if adequate {
                Span::styled("Good sleep", app.theme.status_style(HealthStatus::Normal))
            } else {
                Span::styled("Insufficient", app.theme.status_style(HealthStatus::Warning))
            },
        ]),
        Line::from(" Target: 7 h or more"),
    ];
    if let Some((hours, quality)) = weekly_average(log) {
        sleep.push(Line::from(format!(
            " Week: {:.1} h avg, quality {}",
            hours, quality
        )));
    }
    frame.render_widget(
        Paragraph::new(sleep).block(panel(app, " Sleep ")),
        sleep_area,
    );

    let rows: Vec<Row> = log
        .iter()
        .map(|night| {
            let band = night.band();
            Row::new(vec![
                Cell::from(night.day),
                Cell::from(format!("{:.1} h", night.hours)),
                Cell::from(format!("{:.1} h", night.deep_sleep)),
                Cell::from(format!("{} {}", night.quality, band.label())),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Fill(1),
        ],
    )
    .header(Row::new(vec!["Day", "Slept", "Deep", "Quality"]).style(app.theme.header))
    .block(panel(app, " Sleep Log "));
    frame.render_widget(table, log_area);
}
