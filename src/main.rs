use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::fmt::MakeWriter;

use four_in_a_row::config::AppConfig;
use four_in_a_row::engine::{Engine, Event};
use four_in_a_row::error::ConfigError;
use four_in_a_row::game::{GameOutcome, MoveError};

/// Play four in a row from a list of column drops.
#[derive(Parser)]
#[command(name = "four-in-a-row", about = "Drop coins and find four in a row")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of columns
    #[arg(long)]
    columns: Option<usize>,

    /// Override number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Comma-separated columns to drop into, starting at 0. Read from stdin,
    /// one per line, when omitted.
    #[arg(long, value_delimiter = ',')]
    moves: Option<Vec<usize>>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = load_config(&cli.config, io::stderr)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(columns) = cli.columns {
        config.board.columns = columns;
    }
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    config.validate().context("invalid command line overrides")?;

    tracing_subscriber::fmt()
        .with_max_level(config.logging.level()?)
        .with_writer(io::stderr)
        .init();

    let mut engine = Engine::from_config(&config);
    let mut stdout = io::stdout().lock();

    match cli.moves {
        Some(moves) => {
            for column in moves {
                if !play(&mut engine, column, &mut stdout)? {
                    break;
                }
            }
        }
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("reading moves from stdin")?;
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let Ok(column) = line.parse() else {
                    eprintln!("not a column: {line}");
                    continue;
                };
                if !play(&mut engine, column, &mut stdout)? {
                    break;
                }
            }
        }
    }

    write_outcome(&engine, &mut stdout)?;
    Ok(())
}

/// Load the config while the global subscriber is not installed yet, so a
/// missing file is still reported.
fn load_config<W>(path: &Path, writer: W) -> Result<AppConfig, ConfigError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let startup = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(startup, || AppConfig::load_or_default(path))
}

/// Submit one drop and print the board after it lands.
///
/// Returns `false` once the game is over and input is frozen.
fn play<W: Write>(engine: &mut Engine, column: usize, out: &mut W) -> io::Result<bool> {
    match engine.submit(column) {
        Ok(()) => {}
        Err(MoveError::GameOver) => return Ok(false),
        Err(reason) => {
            eprintln!("column {column}: {reason}");
            return Ok(true);
        }
    }
    match engine.tick() {
        Event::Rejected { column, reason } => eprintln!("column {column}: {reason}"),
        _ => write!(out, "{}", engine.grid())?,
    }
    Ok(true)
}

fn write_outcome<W: Write>(engine: &Engine, out: &mut W) -> io::Result<()> {
    match engine.state().outcome() {
        Some(GameOutcome::Winner(player)) => {
            writeln!(out, "{} player is the winner!", player.name())
        }
        Some(GameOutcome::Draw) => writeln!(out, "The game was a tie!"),
        None => writeln!(out, "{} to move", engine.state().current_player().name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use four_in_a_row::game::Player;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for Captured {
        type Writer = Captured;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_cli_parses_moves() {
        let cli = Cli::parse_from(["four-in-a-row", "--moves", "3,3,4", "--rows", "5"]);
        assert_eq!(cli.moves, Some(vec![3, 3, 4]));
        assert_eq!(cli.rows, Some(5));
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["four-in-a-row"]);
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert!(cli.moves.is_none());
    }

    #[test]
    fn test_missing_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let logs = Captured::default();

        let config = load_config(&path, logs.clone()).unwrap();

        assert_eq!(config.board.columns, 7);
        let text = logs.text();
        assert!(text.contains("config file not found, using defaults"), "{text}");
        assert!(text.contains("missing.toml"), "{text}");
    }

    #[test]
    fn test_existing_config_loads_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[board]\nrows = 4\n").unwrap();
        let logs = Captured::default();

        let config = load_config(&path, logs.clone()).unwrap();

        assert_eq!(config.board.rows, 4);
        assert!(logs.text().is_empty());
    }

    #[test]
    fn test_board_printed_once_per_landed_drop() {
        let mut engine = Engine::new(2, 2, Player::Red);
        let mut out = Vec::new();

        assert!(play(&mut engine, 0, &mut out).unwrap());
        assert!(play(&mut engine, 5, &mut out).unwrap());
        write_outcome(&engine, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "..\nR.\nBlue to move\n");
    }

    #[test]
    fn test_play_stops_after_game_over() {
        let mut engine = Engine::new(4, 1, Player::Red);
        let mut out = Vec::new();
        for column in [0, 1, 2, 3] {
            // Single row: Red and Blue alternate, so nobody connects
            assert!(play(&mut engine, column, &mut out).unwrap());
        }
        assert!(!play(&mut engine, 0, &mut out).unwrap());

        write_outcome(&engine, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.ends_with("RBRB\nThe game was a tie!\n"));
    }
}
