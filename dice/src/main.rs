//! D&D dice roller TUI application.
//!
//! Pick a die, set quantity and modifier, and roll. Results appear after a
//! short rolling animation and are kept in a history of the last ten rolls.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripts:
//!
//! ```bash
//! echo "3d6+2" | cargo run -p dice -- --headless --delay-ms 0
//! ```

mod app;
mod events;
mod headless;
mod logging;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dice_core::RollerConfig;
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

/// D&D dice roller
#[derive(Debug, Parser)]
#[command(name = "dice", version, about)]
struct Cli {
    /// Run in headless mode (line protocol on stdin/stdout, no TUI)
    #[arg(long)]
    headless: bool,

    /// Print headless results as JSON lines
    #[arg(long, requires = "headless")]
    json: bool,

    /// Delay before a roll result is shown, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Seed the dice for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides on top of the environment config.
    fn apply(&self, mut config: RollerConfig) -> RollerConfig {
        if let Some(ms) = self.delay_ms {
            config = config.with_roll_delay(Duration::from_millis(ms));
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(path) = &self.log_file {
            config = config.with_log_file(path.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.apply(RollerConfig::from_env()?);

    logging::init_tracing(cli.headless, config.log_file.as_deref())?;
    tracing::debug!(?config, "Starting dice roller");

    if cli.headless {
        return headless::run_headless(&config, cli.json).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout for animations
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if handle_event(app, ev) == EventResult::Quit {
                return Ok(());
            }
        }

        // Tick animations and pick up finished rolls
        app.tick();

        if app.should_quit {
            return Ok(());
        }
    }
}
