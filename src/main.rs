use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vitalwatch::app::write_export;
use vitalwatch::config::Overrides;
use vitalwatch::data::duration::parse_interval;
use vitalwatch::ui::{self, Theme};
use vitalwatch::{
    events, App, DataSource, FallbackFeed, LocalFeed, LocalSource, RefreshTask, RemoteClient,
    Settings, SystemClock, Timeframe,
};

/// How often the TUI drains a channel-backed source.
const CHANNEL_POLL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "vitalwatch")]
#[command(about = "Terminal dashboard for simulated vital-sign monitoring")]
struct Args {
    /// Path to a TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Health backend base URL (e.g., http://localhost:5000)
    #[arg(short, long)]
    api: Option<String>,

    /// Refresh interval (e.g., "10s", "500ms")
    #[arg(short, long, value_parser = parse_interval)]
    refresh: Option<Duration>,

    /// Hours of trend history to show on the daily chart
    #[arg(long)]
    hours: Option<u32>,

    /// Seed for the simulated readings (reproducible runs)
    #[arg(long)]
    seed: Option<u64>,

    /// Log file for the interactive dashboard
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Export one frame to a JSON file and exit
    #[arg(short, long, conflicts_with = "push")]
    export: Option<PathBuf>,

    /// Upload one simulated snapshot to the backend and exit
    #[arg(long)]
    push: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    settings.apply(Overrides {
        api_url: args.api.clone(),
        refresh: args.refresh,
        trend_hours: args.hours,
        log_file: args.log_file.clone(),
    });

    let interactive = args.export.is_none() && !args.push;
    init_logging(&settings, interactive)?;

    let feed = local_feed(&settings, args.seed);

    if let Some(export_path) = args.export {
        return export_to_file(&settings, feed, &export_path);
    }

    if args.push {
        return push_snapshot(&settings, feed);
    }

    let chart_feed = local_feed(&settings, args.seed.map(|s| s.wrapping_add(1)));
    if settings.api_url.is_some() {
        run_with_api(&settings, feed, chart_feed)
    } else {
        let source = Box::new(LocalSource::from_feed(feed));
        run_tui(source, chart_feed, None, &settings, settings.refresh)
    }
}

/// Route `tracing` output to a log file for the TUI, stderr otherwise.
///
/// `RUST_LOG` overrides the default `vitalwatch=info` filter.
fn init_logging(settings: &Settings, interactive: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vitalwatch=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if interactive {
        let path = settings
            .log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("vitalwatch.log"));
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(io::stderr).init();
    }
    Ok(())
}

fn local_feed(settings: &Settings, seed: Option<u64>) -> LocalFeed {
    let clock = Arc::new(SystemClock);
    match seed {
        Some(seed) => LocalFeed::seeded(clock, settings.trend_hours, seed),
        None => LocalFeed::new(clock, settings.trend_hours),
    }
}

fn remote_client(settings: &Settings) -> Result<Option<RemoteClient>> {
    let Some(ref url) = settings.api_url else {
        return Ok(None);
    };
    let client = RemoteClient::builder()
        .endpoint(url.clone())
        .timeout(settings.api_timeout)
        .build()?;
    Ok(Some(client))
}

fn fallback_feed(settings: &Settings, feed: LocalFeed) -> Result<FallbackFeed> {
    let feed = match remote_client(settings)? {
        Some(client) => FallbackFeed::new(client, feed),
        None => FallbackFeed::offline(feed),
    };
    Ok(feed.with_location(settings.coordinates()))
}

/// Run against the backend with a background refresh task
fn run_with_api(settings: &Settings, feed: LocalFeed, chart_feed: LocalFeed) -> Result<()> {
    let feed = fallback_feed(settings, feed)?;
    info!(endpoint = %feed.describe(), "Starting with remote backend");

    // The runtime has to outlive the refresh task and the TUI loop
    let rt = Runtime::new()?;
    let _guard = rt.enter();
    let (source, task) = RefreshTask::spawn(feed, settings.refresh);

    run_tui(Box::new(source), chart_feed, Some(task), settings, CHANNEL_POLL)
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    chart_feed: LocalFeed,
    task: Option<RefreshTask>,
    settings: &Settings,
    poll_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(source, chart_feed, settings).with_theme(Theme::auto_detect());
    if let Some(task) = task {
        app = app.with_refresh_task(task);
    }
    if !app.reload_data() {
        warn!(error = ?app.load_error, "No data on first load");
    }

    let result = run_app(&mut terminal, &mut app, poll_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Dashboard closed");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    poll_interval: Duration,
) -> Result<()> {
    let mut last_poll = Instant::now();

    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    events::handle_mouse_event(app, mouse, ui::CONTENT_START_ROW);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        if last_poll.elapsed() >= poll_interval {
            app.reload_data();
            last_poll = Instant::now();
        }
    }

    Ok(())
}

/// Export a single frame to a JSON file
fn export_to_file(settings: &Settings, mut feed: LocalFeed, export_path: &Path) -> Result<()> {
    let frame = if settings.api_url.is_some() {
        let mut feed = fallback_feed(settings, feed)?;
        Runtime::new()?.block_on(feed.frame())
    } else {
        feed.frame()
    };

    write_export(&frame, &settings.thresholds, Timeframe::default(), export_path)?;
    info!(path = %export_path.display(), origin = frame.origin.label(), "Exported frame");
    println!("Exported vitals to: {}", export_path.display());
    Ok(())
}

/// Upload one generated snapshot to the backend
fn push_snapshot(settings: &Settings, mut feed: LocalFeed) -> Result<()> {
    let client = remote_client(settings)?.context("--push needs a backend URL")?;
    let snapshot = feed.snapshot();

    Runtime::new()?
        .block_on(client.push_metrics(&snapshot))
        .with_context(|| format!("Failed to push metrics to {}", client.endpoint()))?;

    println!(
        "Pushed snapshot to {}: {} BPM, {}% SpO2, stress {}",
        client.endpoint(),
        snapshot.heart_rate,
        snapshot.blood_oxygen,
        snapshot.stress_level
    );
    Ok(())
}
