//! chatlens - Chat Log Evaluation Dashboard
//!
//! Terminal UI for uploading a chat transcript to the analysis service and
//! reviewing the returned scores, sentiment timeline, and feedback.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chatlens_core::{AnalysisClient, Config};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;

/// Command-line arguments
#[derive(Parser)]
#[command(name = "chatlens", about = "Chat log evaluation dashboard", version)]
struct Args {
    /// Chat log file to upload for analysis on startup
    file: Option<PathBuf>,

    /// Analysis service URL (overrides the config file)
    #[arg(long)]
    server: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(server) = args.server {
        config.service.server_url = server;
    }

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        chatlens_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("chatlens TUI starting up");

    let client =
        AnalysisClient::new(&config.service).context("failed to create analysis client")?;

    // The UI loop stays synchronous; uploads run on this runtime and report
    // back over a channel tagged with their request token.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let mut app = App::new(client, runtime.handle().clone());
    if let Some(file) = args.file {
        app.submit_upload(file);
    }

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("chatlens TUI shutting down");

    result
}

/// Run the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Apply any completed uploads; stale responses are discarded here.
        app.poll_responses();

        // Update animations
        app.tick();

        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events; toggles stay responsive while an upload is in flight.
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
