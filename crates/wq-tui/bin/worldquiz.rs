//! Country guessing quiz in the terminal
//!
//! Main entry point for the game.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use wq_data::{Dataset, DatasetError};
use wq_tui::{App, AudioCue, CrosstermRawMode, Silent, TerminalBell, TerminalSession, Theme};

/// Country guessing quiz in the terminal
#[derive(Parser, Debug)]
#[command(name = "worldquiz")]
#[command(author, version, about = "Worldquiz - Name every country on the map!", long_about = None)]
struct Args {
    /// Dataset file to play instead of the bundled world map
    #[arg(short = 'd', long = "dataset")]
    dataset: Option<PathBuf>,

    /// Force the light theme
    #[arg(long = "light")]
    light: bool,

    /// Do not ring the bell on a correct guess
    #[arg(long = "mute")]
    mute: bool,

    /// Log file (defaults to the user data directory)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Check the dataset and exit
    #[arg(long = "check")]
    check: bool,
}

fn main() -> io::Result<()> {
    // Parse command-line arguments before terminal setup
    let args = Args::parse();

    init_tracing(args.log_file.clone().or_else(default_log_path).as_deref());

    let dataset = load_dataset(args.dataset.as_deref()).map_err(|e| io::Error::other(e.to_string()))?;

    if args.check {
        println!("{}: {}", dataset.id, dataset.name);
        println!("{} unlocked regions", dataset.unlocked_count());
        println!("{}", dataset.integrity_report());
        return Ok(());
    }

    let theme = if args.light { Theme::light() } else { Theme::detect() };
    let audio: Box<dyn AudioCue> = if args.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::stdout())
    };
    let mut app = App::new(&dataset, theme, audio);

    // Setup terminal; dropping the session on an early return restores it
    let session = TerminalSession::enter(io::stdout(), CrosstermRawMode)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal even if the loop failed
    session.leave()?;
    terminal.show_cursor()?;

    let progress = app.progress();
    tracing::info!(%progress, "session ended");
    result
}

/// Main loop
fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
            if app.should_quit() {
                return Ok(());
            }
        }

        app.tick();
    }
}

fn load_dataset(path: Option<&Path>) -> Result<Dataset, DatasetError> {
    match path {
        Some(path) => Dataset::load_from_file(path),
        None => Dataset::bundled(),
    }
}

fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("worldquiz").join("worldquiz.log"))
}

fn init_tracing(log_path: Option<&Path>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(path) = log_path
        && let Some(file) = open_log_file(path)
    {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();
        tracing::info!(path = %path.display(), "Logging initialized");
        return;
    }

    // The TUI owns the terminal, so no log file means no logs
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file(path: &Path) -> Option<fs::File> {
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return None;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
