mod app;
mod event;
mod ui;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use alien_sweep::GameConfig;
use app::App;
use event::{Event, EventHandler};

#[derive(Parser, Debug)]
#[command(name = "alien-sweep", version, about = "Shoot down the alien formation before it lands")]
struct Cli {
    /// TOML file overriding the default tuning.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for alien sprite selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Redraw interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Write logs here. Filter with RUST_LOG (default: info).
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => {
            let config = GameConfig::default();
            config.validate()?;
            config
        }
    };

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, config = ?cli.config, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let releases = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if releases {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(config, seed, !releases);
    let result = run(&mut terminal, &mut app, cli.frame_ms);

    // Restore terminal even when the loop failed
    if releases {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App, frame_ms: u64) -> Result<()> {
    let event_handler = EventHandler::new(frame_ms);

    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .context("failed to draw frame")?;

        match event_handler.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            info!(hud = ?app.game.hud(), "quit");
            return Ok(());
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
