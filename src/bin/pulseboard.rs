use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::error;

use pulseboard::config::Config;
use pulseboard::tui::{App, Tab, Theme};

/// Keyboard-first terminal analytics dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable file logging at the given level (overrides RUST_LOG)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,
    /// Path to a config file (overrides default config discovery)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
    /// View to open on startup: overview, funnel, attaches or pivot
    #[arg(long = "tab", value_name = "VIEW")]
    tab: Option<String>,
    /// Color scheme: dark or light
    #[arg(long = "theme", value_name = "NAME")]
    theme: Option<String>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn main() -> Result<()> {
    // Parse CLI args
    let args = Args::parse();
    color_eyre::install()?;

    // Initialize logging to file in current working directory
    let cwd = std::env::current_dir()?;
    let log_path = cwd.join(format!("{}.log", env!("CARGO_PKG_NAME")));
    let level = match args.logging {
        Some(LogLevel::Error) => Some(tracing::Level::ERROR),
        Some(LogLevel::Warn) => Some(tracing::Level::WARN),
        Some(LogLevel::Info) => Some(tracing::Level::INFO),
        Some(LogLevel::Debug) => Some(tracing::Level::DEBUG),
        Some(LogLevel::Trace) => Some(tracing::Level::TRACE),
        None => Some(tracing::Level::WARN),
    };
    pulseboard::logging::init_with(Some(log_path), level)?;

    // Resolve config and build the app
    let config = match Config::from_path(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config, using defaults: {e}");
            Config::default()
        }
    };
    let mut app = App::new(&config);
    if let Some(theme) = args.theme.as_deref() {
        app.set_theme(Theme::by_name(theme));
    }
    if let Some(tab) = args.tab.as_deref() {
        app.set_active_tab(Tab::from_name(tab));
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // App loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    if let Err(e) = res {
        error!("Error: {e}");
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        // Poll for events
        if event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key_event) = event::read()? {
                if let Err(e) = app.handle_key_event(key_event) {
                    error!("Error handling key event: {e}");
                }
            }
        }

        // Tick update
        if let Err(e) = app.update() {
            error!("Error on tick update: {e}");
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
