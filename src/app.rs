//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::config::{Goals, Settings};
use crate::data::{
    filter_doctors, overall_status, Doctor, HealthStatus, History, Insight, Thresholds, Timeframe,
    TrendSeries, VitalAlert,
};
use crate::source::{DashboardFrame, DataSource, LocalFeed, RefreshTask};
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
///
/// The emergency-care prompt is shown as an overlay (controlled by
/// `App::show_care_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Metric cards, trend chart and overall status.
    Overview,
    /// Heart-rate zones and history.
    Heart,
    /// Blood-oxygen levels and history.
    Oxygen,
    /// Steps, calories and water against daily goals.
    Activity,
    /// Stress band and the sleep log.
    StressSleep,
    /// Health insights and recommendations.
    Insights,
    /// Emergency-care directory with search.
    Care,
}

impl View {
    /// All views in tab order.
    pub const ALL: [View; 7] = [
        View::Overview,
        View::Heart,
        View::Oxygen,
        View::Activity,
        View::StressSleep,
        View::Insights,
        View::Care,
    ];

    /// Position in tab order.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    /// View for a 1-based tab number, as typed on the keyboard.
    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Heart => "Heart",
            View::Oxygen => "Oxygen",
            View::Activity => "Activity",
            View::StressSleep => "Stress & Sleep",
            View::Insights => "Insights",
            View::Care => "Care",
        }
    }
}

/// JSON export of a frame with its derived status.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'a> {
    status: HealthStatus,
    timeframe: Timeframe,
    #[serde(flatten)]
    frame: &'a DashboardFrame,
}

/// Write `frame` as pretty JSON, with its overall status, to `path`.
pub fn write_export(
    frame: &DashboardFrame,
    thresholds: &Thresholds,
    timeframe: Timeframe,
    path: &Path,
) -> Result<()> {
    let metrics = &frame.metrics;
    let export = Export {
        status: overall_status(
            metrics.heart_rate,
            metrics.blood_oxygen,
            metrics.stress_level,
            thresholds,
        ),
        timeframe,
        frame,
    };

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_care_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    refresh_task: Option<RefreshTask>,
    pub data: Option<DashboardFrame>,
    pub history: History,
    pub load_error: Option<String>,
    pub last_update: Option<Instant>,
    pub thresholds: Thresholds,
    pub goals: Goals,

    // Chart
    pub timeframe: Timeframe,
    pub chart: TrendSeries,
    chart_feed: LocalFeed,

    // List selection (Insights and Care views)
    pub selected_index: usize,

    // Search/filter (Care view)
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source`.
    ///
    /// `chart_feed` draws the weekly and monthly chart series, which are
    /// always generated locally.
    pub fn new(source: Box<dyn DataSource>, chart_feed: LocalFeed, settings: &Settings) -> Self {
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            show_care_overlay: false,
            source,
            refresh_task: None,
            data: None,
            history: History::new(),
            load_error: None,
            last_update: None,
            thresholds: settings.thresholds.clone(),
            goals: settings.goals.clone(),
            timeframe: Timeframe::default(),
            chart: Vec::new(),
            chart_feed,
            selected_index: 0,
            filter_text: String::new(),
            filter_active: false,
            theme: Theme::dark(),
            status_message: None,
        }
    }

    /// Attach the background task feeding `source`; it is cancelled when
    /// the App is dropped.
    pub fn with_refresh_task(mut self, task: RefreshTask) -> Self {
        self.refresh_task = Some(task);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Overall status of the current frame.
    pub fn status(&self) -> Option<HealthStatus> {
        let metrics = &self.data.as_ref()?.metrics;
        Some(overall_status(
            metrics.heart_rate,
            metrics.blood_oxygen,
            metrics.stress_level,
            &self.thresholds,
        ))
    }

    /// Poll the data source for a new frame.
    ///
    /// Returns true if a new frame was received. Source failures are kept
    /// in `load_error` for the status bar.
    pub fn reload_data(&mut self) -> bool {
        // Check for errors from the source
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
            return false;
        }

        let Some(frame) = self.source.poll() else {
            return false;
        };

        self.history.record(&frame.metrics);
        if let Some(alert) = VitalAlert::check(&frame.metrics, &self.thresholds) {
            info!(?alert, "Vital alert raised");
            self.set_status_message(alert.message());
            if alert.suggests_care() {
                self.show_care_overlay = true;
            }
        }

        self.data = Some(frame);
        self.load_error = None;
        self.last_update = Some(Instant::now());
        self.rebuild_chart();
        self.clamp_selection();
        true
    }

    /// Ask for a frame now rather than at the next tick.
    pub fn refresh_now(&mut self) {
        if let Some(task) = &self.refresh_task {
            task.trigger();
        }
        self.reload_data();
    }

    /// Cycle the chart timeframe (daily, weekly, monthly).
    pub fn cycle_timeframe(&mut self) {
        self.timeframe = self.timeframe.next();
        self.rebuild_chart();
        self.set_status_message(format!("Timeframe: {}", self.timeframe.label()));
    }

    fn rebuild_chart(&mut self) {
        let Some(frame) = &self.data else {
            self.chart.clear();
            return;
        };
        let (clock, rng) = self.chart_feed.parts();
        self.chart = self.timeframe.series(&frame.trend, clock, rng);
    }

    /// Insights in the current frame.
    pub fn insights(&self) -> &[Insight] {
        self.data.as_ref().map(|f| f.insights.as_slice()).unwrap_or(&[])
    }

    /// Doctors matching the current filter, nearest first.
    pub fn filtered_doctors(&self) -> Vec<&Doctor> {
        let doctors = self.data.as_ref().map(|f| f.doctors.as_slice()).unwrap_or(&[]);
        filter_doctors(doctors, &self.filter_text)
    }

    /// The doctor under the cursor on the Care view.
    pub fn selected_doctor(&self) -> Option<&Doctor> {
        self.filtered_doctors().get(self.selected_index).copied()
    }

    /// Number of selectable rows on the current view.
    fn list_len(&self) -> usize {
        match self.current_view {
            View::Insights => self.insights().len(),
            View::Care => self.filtered_doctors().len(),
            _ => 0,
        }
    }

    fn clamp_selection(&mut self) {
        let max = self.list_len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max);
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.selected_index = 0;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.list_len().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_index = self.list_len().saturating_sub(1);
    }

    /// Open the emergency-care overlay.
    pub fn open_care_overlay(&mut self) {
        self.show_care_overlay = true;
    }

    /// Leave the overlay for the full Care view.
    pub fn enter_care_view(&mut self) {
        self.show_care_overlay = false;
        self.set_view(View::Care);
    }

    /// Navigate back: close overlay first, then clear the search, then go to Overview.
    pub fn go_back(&mut self) {
        if self.show_care_overlay {
            self.show_care_overlay = false;
            return;
        }
        if !self.filter_text.is_empty() {
            self.clear_filter();
            return;
        }
        if self.current_view != View::Overview {
            self.set_view(View::Overview);
        }
    }

    /// Close the care overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_care_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
        self.selected_index = 0;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.clamp_selection();
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
        self.clamp_selection();
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current frame to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref frame) = self.data else {
            anyhow::bail!("No data to export");
        };
        write_export(frame, &self.thresholds, self.timeframe, path)
    }
}
