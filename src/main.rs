// pingradar - Latency radar for the terminal
// Simulated (or fed) round-trip times drawn as ripples on a Braille radar

mod app;
mod radar;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::config::{load_registry, DEFAULT_FRAME_MS, DEFAULT_SEED_SAMPLES};
use app::feed::spawn_feed_reader;
use app::{event::handle_key_event, AppState, Settings};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Terminal latency radar
#[derive(Parser, Debug)]
#[command(name = "pingradar")]
#[command(author, version, about)]
#[command(after_help = "EXAMPLES:
    # Simulated radar over the built-in endpoints, sampling immediately
    pingradar --autostart

    # Reproducible run over a custom registry
    pingradar --endpoints endpoints.toml --seed 7

    # Replay measurements from a file (one \"<id> <ms|999|lost>\" per line)
    pingradar --feed pings.txt --log-file radar.log
")]
struct Cli {
    /// TOML file with [[endpoint]] tables (id, name, region, baseline_ms)
    #[arg(long, value_name = "FILE")]
    endpoints: Option<PathBuf>,

    /// Seed for the latency simulation
    #[arg(long, env = "PINGRADAR_SEED")]
    seed: Option<u64>,

    /// Frame interval in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_FRAME_MS,
          value_parser = clap::value_parser!(u64).range(8..=1000))]
    frame_ms: u64,

    /// Start sampling without waiting for the start key
    #[arg(long)]
    autostart: bool,

    /// Samples generated per endpoint before the first frame
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SEED_SAMPLES)]
    seed_samples: usize,

    /// File of external measurements to inject
    #[arg(long, value_name = "FILE")]
    feed: Option<PathBuf>,

    /// Write diagnostics to this file (filtered by RUST_LOG, default info)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Install a file-backed tracing subscriber
///
/// The terminal belongs to the UI, so nothing is logged without `--log-file`.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(())
}

fn build_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings {
        seed: cli.seed,
        frame_ms: cli.frame_ms,
        autostart: cli.autostart,
        ..Settings::default()
    };
    settings.radar.seed_samples = cli.seed_samples;

    if let Some(path) = &cli.endpoints {
        settings.endpoints = load_registry(path)
            .with_context(|| format!("failed to load endpoints from {}", path.display()))?;
    }

    Ok(settings)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    // Resolve everything that can fail before touching the terminal
    let settings = build_settings(&cli)?;
    tracing::info!(
        endpoints = settings.endpoints.len(),
        seed = ?settings.seed,
        frame_ms = settings.frame_ms,
        "starting pingradar"
    );

    let mut app = AppState::new(settings);
    if let Some(path) = &cli.feed {
        let file = File::open(path)
            .with_context(|| format!("failed to open feed {}", path.display()))?;
        app = app.with_feed(spawn_feed_reader(BufReader::new(file)));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "radar loop failed");
        println!("Error: {:?}", err);
    }
    tracing::info!(samples = app.radar.samples_recorded(), "pingradar exited");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    loop {
        app.on_tick();
        terminal.draw(|f| ui::draw(f, app))?;

        if !app.running {
            return Ok(());
        }

        if event::poll(app.refresh_config.frame_interval())? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(app, key.code);
                }
            }
        }
    }
}
