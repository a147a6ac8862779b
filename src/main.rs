use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use taskjar::app::App;
use taskjar::cli::{self, Cli, Commands, Config, ListFilter};
use taskjar::error::{Error, Result};
use taskjar::input;
use taskjar::jar::FileJar;
use taskjar::store::TaskStore;
use taskjar::ui::run_app;

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("taskjar: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<()> {
    let config = Config::from_cli(&args)?;
    init_logging(&config.log_path)?;

    let jar = FileJar::new(&config.jar_path);
    tracing::info!(jar = %jar.path().display(), "starting");
    match args.command {
        None => run_tui(jar),
        Some(Commands::Add { input: words }) => {
            let mut store = TaskStore::open(jar)?;
            cli::add(&mut store, &words, input::today(), &mut io::stdout().lock())
        }
        Some(Commands::List { completed, all }) => {
            let store = TaskStore::open(jar)?;
            cli::list(
                &store,
                ListFilter::from_flags(completed, all),
                &mut io::stdout().lock(),
            )
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::file(parent, e))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::file(path, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_tui(jar: FileJar) -> Result<()> {
    let mut app = App::new(jar)?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    result
}
