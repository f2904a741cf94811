//! deckhand - terminal companion for a document-to-deck generation service
//!
//! Renders the service's conversations, generation history, uploaded
//! documents, and pipeline progress, and forwards selections back to it.

mod app;
mod conversation_row;
mod remote;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deckhand_core::{Config, StudioClient};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;
use crate::remote::Remote;

#[derive(Debug, Parser)]
#[command(name = "deckhand", version, about = "Terminal UI for the studio generation service")]
struct Args {
    /// Studio service URL (overrides the config file)
    #[arg(long)]
    server: Option<String>,

    /// Path to a config file (defaults to the XDG location)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds between background refreshes (overrides the config file)
    #[arg(long)]
    refresh: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration, then apply CLI overrides
    let mut config = match &args.config {
        Some(path) => Config::load_from(path).context("failed to load configuration")?,
        None => Config::load().context("failed to load configuration")?,
    };
    if let Some(server) = args.server {
        config.server.base_url = server;
    }
    if let Some(refresh) = args.refresh {
        config.server.refresh_secs = refresh;
    }
    config.server.validate().context("invalid configuration")?;

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        deckhand_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!(server = %config.server.base_url, "deckhand TUI starting up");

    let client = StudioClient::new(config.server.clone()).context("failed to build API client")?;
    let remote = Remote::new(client).context("failed to start async runtime")?;

    if !remote.health_check().unwrap_or(false) {
        tracing::warn!(server = %config.server.base_url, "Studio service is not reachable yet");
    }

    let mut app = App::new(remote);
    // A dead server must not keep the UI from starting; the footer reports it.
    if let Err(e) = app.refresh_all() {
        tracing::warn!(error = %e, "Initial fetch failed");
    }

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, config.server.refresh_secs);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("deckhand TUI shutting down");

    result
}

/// Run the main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_secs: u64,
) -> Result<()> {
    // Poll counter for periodic service refresh (10 ticks = ~1 second)
    let refresh_ticks = (refresh_secs.max(1) as u32) * 10;
    let mut poll_counter = 0u32;

    loop {
        poll_counter += 1;
        if poll_counter >= refresh_ticks {
            poll_counter = 0;
            if let Err(e) = app.refresh_live() {
                tracing::warn!(error = %e, "Background refresh failed");
            }
        }

        // Update animations
        app.tick_animation();

        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
