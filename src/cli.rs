//! Command-line front end.

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::error::{Error, Result};
use crate::jar::KeyValueStore;
use crate::store::TaskStore;
use crate::task::Task;

const APP_DIR: &str = "taskjar";

#[derive(Parser)]
#[command(name = "taskjar")]
#[command(version)]
#[command(about = "To-do list in the terminal, kept in a cookie jar file")]
pub struct Cli {
    /// Jar file holding tasks and the theme preference
    #[arg(long, global = true)]
    pub jar: Option<PathBuf>,

    /// Where to write logs (filter with RUST_LOG)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task; a trailing /DD/MM/YYYY\ token sets its date
    Add {
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,
    },
    /// Print tasks (active ones unless told otherwise)
    List {
        #[arg(long, conflicts_with = "all")]
        completed: bool,
        #[arg(long)]
        all: bool,
    },
}

/// Resolved file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub jar_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let data_dir = || {
            dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| Error::config("no data directory; pass --jar and --log-file"))
        };
        let jar_path = match &cli.jar {
            Some(path) => path.clone(),
            None => data_dir()?.join("cookies.json"),
        };
        let log_path = match &cli.log_file {
            Some(path) => path.clone(),
            None => data_dir()?.join("taskjar.log"),
        };
        Ok(Self { jar_path, log_path })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    Active,
    Completed,
    All,
}

impl ListFilter {
    pub fn from_flags(completed: bool, all: bool) -> Self {
        match (completed, all) {
            (_, true) => ListFilter::All,
            (true, false) => ListFilter::Completed,
            (false, false) => ListFilter::Active,
        }
    }

    fn keeps(self, task: &Task) -> bool {
        match self {
            ListFilter::Active => !task.completed,
            ListFilter::Completed => task.completed,
            ListFilter::All => true,
        }
    }
}

fn format_task(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!("[{mark}] {}  {}", task.text, task.date)
}

/// `taskjar add`: words are joined with single spaces before parsing.
pub fn add<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    words: &[String],
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    let raw = words.join(" ");
    let Some(parsed) = crate::input::parse_input(&raw, today) else {
        writeln!(out, "nothing to add")?;
        return Ok(());
    };
    let event = store.create(&parsed.text, &parsed.date)?;
    writeln!(out, "added {}", format_task(event.task()))?;
    Ok(())
}

/// `taskjar list`
pub fn list<S: KeyValueStore>(
    store: &TaskStore<S>,
    filter: ListFilter,
    out: &mut impl Write,
) -> Result<()> {
    for task in store.list()?.iter().filter(|t| filter.keeps(t)) {
        writeln!(out, "{}", format_task(task))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jar::MemoryJar;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()
    }

    fn words(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["taskjar", "--jar", "/tmp/j.json", "add", "walk", "dog"]).unwrap();
        assert_eq!(cli.jar, Some(PathBuf::from("/tmp/j.json")));
        assert!(matches!(cli.command, Some(Commands::Add { ref input }) if input.len() == 2));

        let cli = Cli::try_parse_from(["taskjar", "list", "--all"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { all: true, completed: false })));

        assert!(Cli::try_parse_from(["taskjar", "list", "--all", "--completed"]).is_err());
    }

    #[test]
    fn explicit_paths_skip_data_dir() {
        let cli = Cli::try_parse_from(["taskjar", "--jar", "a.json", "--log-file", "b.log"]).unwrap();
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.jar_path, PathBuf::from("a.json"));
        assert_eq!(config.log_path, PathBuf::from("b.log"));
    }

    #[test]
    fn add_then_list_prints_tasks() {
        let mut store = TaskStore::new(MemoryJar::new());
        let mut out = Vec::new();
        add(&mut store, &words("walk dog"), day(), &mut out).unwrap();
        add(&mut store, &words("pay rent /01/01/2025\\"), day(), &mut out).unwrap();
        store.toggle("walk dog", "03/05/2024").unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("added [ ] walk dog  03/05/2024"));

        let mut out = Vec::new();
        list(&store, ListFilter::Active, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[ ] pay rent  01/01/2025\n");

        let mut out = Vec::new();
        list(&store, ListFilter::All, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[ ] pay rent  01/01/2025\n[x] walk dog  03/05/2024\n"
        );
    }

    #[test]
    fn add_blank_creates_nothing() {
        let mut store = TaskStore::new(MemoryJar::new());
        let mut out = Vec::new();
        add(&mut store, &[" ".to_string()], day(), &mut out).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "nothing to add\n");
    }
}
