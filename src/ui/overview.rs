//! Overview rendering.
//!
//! Displays six metric cards (with history sparklines) above the trend
//! chart for the selected timeframe.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::common::{panel, render_waiting, sparkline};
use crate::app::App;
use crate::data::classify::{
    blood_oxygen_alert, goal_percent, heart_rate_alert, sleep_is_adequate, stress_alert,
};
use crate::data::{HealthStatus, StressBand, TrendDirection, TrendPoint, Vital};

/// One series on a trend chart.
pub struct Series {
    pub name: &'static str,
    pub color: Color,
    pub value: fn(&TrendPoint) -> u32,
}

/// A metric card's content.
struct Card {
    title: &'static str,
    value: String,
    unit: &'static str,
    color: Color,
    status: Option<HealthStatus>,
    trend: TrendDirection,
    note: String,
    history: Option<Vital>,
}

/// Render the Overview.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        render_waiting(frame, app, area);
        return;
    };
    let m = &data.metrics;
    let t = &app.theme;
    let thresholds = &app.thresholds;

    let vs_average = |vital: Vital, fallback: &str| match app.history.delta_vs_average(vital) {
        Some(delta) => format!("{:+} vs avg", delta),
        None => fallback.to_string(),
    };

    let cards = [
        Card {
            title: "Heart Rate",
            value: m.heart_rate.to_string(),
            unit: "BPM",
            color: t.heart,
            status: Some(heart_rate_alert(m.heart_rate, thresholds)),
            trend: TrendDirection::for_heart_rate(m.heart_rate),
            note: vs_average(Vital::HeartRate, "Normal range"),
            history: Some(Vital::HeartRate),
        },
        Card {
            title: "Blood Oxygen",
            value: m.blood_oxygen.to_string(),
            unit: "%",
            color: t.oxygen,
            status: Some(blood_oxygen_alert(m.blood_oxygen, thresholds)),
            trend: TrendDirection::for_blood_oxygen(m.blood_oxygen),
            note: if m.blood_oxygen >= 98 { "Optimal" } else { "Below optimal" }.to_string(),
            history: Some(Vital::BloodOxygen),
        },
        Card {
            title: "Daily Steps",
            value: m.steps.to_string(),
            unit: "steps",
            color: t.activity,
            status: None,
            trend: TrendDirection::for_steps(m.steps),
            note: format!("{}% of goal", goal_percent(m.steps, app.goals.steps)),
            history: Some(Vital::Steps),
        },
        Card {
            title: "Sleep",
            value: format!("{:.1}", m.sleep_hours),
            unit: "hours",
            color: t.sleep,
            status: None,
            trend: TrendDirection::for_sleep(m.sleep_hours),
            note: if sleep_is_adequate(m.sleep_hours) { "Good sleep" } else { "Insufficient" }
                .to_string(),
            history: None,
        },
        Card {
            title: "Stress Level",
            value: m.stress_level.to_string(),
            unit: "/100",
            color: t.stress,
            status: Some(stress_alert(m.stress_level, thresholds)),
            trend: TrendDirection::for_stress(m.stress_level),
            note: StressBand::classify(m.stress_level).label().to_string(),
            history: Some(Vital::StressLevel),
        },
        Card {
            title: "Calories Burned",
            value: m.calories.to_string(),
            unit: "kcal",
            color: t.activity,
            status: None,
            trend: TrendDirection::Stable,
            note: format!("{}% of goal", goal_percent(m.calories, app.goals.calories)),
            history: None,
        },
    ];

    let chunks = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Min(6),
    ])
    .split(area);

    for (row, row_cards) in cards.chunks(3).enumerate() {
        let cols = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(chunks[row]);
        for (card, col) in row_cards.iter().zip(cols.iter()) {
            render_card(frame, app, card, *col);
        }
    }

    let series = [
        Series {
            name: "Heart rate",
            color: t.heart,
            value: |p| p.heart_rate,
        },
        Series {
            name: "SpO2",
            color: t.oxygen,
            value: |p| p.blood_oxygen,
        },
        Series {
            name: "Stress",
            color: t.stress,
            value: |p| p.stress_level,
        },
    ];
    let title = format!(" Trends: {} [t:cycle] ", app.timeframe.label());
    render_trend_chart(frame, app, chunks[2], title, &series, [0.0, 130.0]);
}

fn render_card(frame: &mut Frame, app: &App, card: &Card, area: Rect) {
    let value_style = match card.status {
        Some(status) if status != HealthStatus::Normal => app.theme.status_style(status),
        _ => Style::default().fg(card.color),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(card.value.clone(), value_style.add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(card.unit, Style::default().add_modifier(Modifier::DIM)),
            Span::raw("  "),
            Span::raw(card.trend.arrow()),
        ]),
        Line::from(Span::styled(
            card.note.clone(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    if let Some(vital) = card.history {
        let width = area.width.saturating_sub(2) as usize;
        lines.push(Line::from(Span::styled(
            sparkline(&app.history.sparkline(vital), width),
            Style::default().fg(card.color),
        )));
    }

    let title = Line::from(Span::styled(
        format!(" {} ", card.title),
        Style::default().fg(card.color),
    ));
    frame.render_widget(Paragraph::new(lines).block(panel(app, title)), area);
}

/// Render a line chart of `series` over the app's current chart points.
pub fn render_trend_chart(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: String,
    series: &[Series],
    y_bounds: [f64; 2],
) {
    let points = &app.chart;
    if points.is_empty() {
        render_waiting(frame, app, area);
        return;
    }

    let data: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|s| {
            points
                .iter()
                .enumerate()
                .map(|(i, p)| (i as f64, f64::from((s.value)(p))))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = series
        .iter()
        .zip(data.iter())
        .map(|(s, d)| {
            Dataset::default()
                .name(s.name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(s.color))
                .data(d)
        })
        .collect();

    let last = points.len() - 1;
    let x_labels = vec![
        points[0].time.clone(),
        points[last / 2].time.clone(),
        points[last].time.clone(),
    ];
    let [y_min, y_max] = y_bounds;
    let y_labels = vec![
        format!("{:.0}", y_min),
        format!("{:.0}", (y_min + y_max) / 2.0),
        format!("{:.0}", y_max),
    ];
    let axis_style = Style::default().fg(app.theme.border);

    let chart = Chart::new(datasets)
        .block(panel(app, title))
        .x_axis(
            Axis::default()
                .bounds([0.0, last.max(1) as f64])
                .labels(x_labels)
                .style(axis_style),
        )
        .y_axis(Axis::default().bounds(y_bounds).labels(y_labels).style(axis_style));

    frame.render_widget(chart, area);
}
