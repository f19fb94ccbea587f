use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::calculator::Operator;
use crate::history::{HistoryStore, parse_history_file};
use crate::models::OperationRecord;
use crate::session::{EMPTY_HISTORY, Session};
use crate::utils::{format_path_with_tilde, get_data_dir, history_file_path, strip_ansi_codes};

#[derive(Parser)]
#[command(name = "badcalc")]
#[command(version = "0.1.0")]
#[command(about = "Interactive two-operand calculator with a persistent history", long_about = None)]
pub struct Cli {
    /// Directory holding history.txt [default: ~/.badcalc]
    #[arg(long, global = true, env = "BADCALC_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every operation recorded in the history file
    History {
        /// Print records as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Show statistics about the history file
    Stats,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => get_data_dir()?,
    };

    match &cli.command {
        Some(Commands::History { json }) => show_history(&data_dir, *json)?,
        Some(Commands::Stats) => show_stats(&data_dir)?,
        None => run_interactive(&data_dir)?,
    }

    Ok(())
}

fn run_interactive(data_dir: &Path) -> Result<()> {
    let store = HistoryStore::open(data_dir)?;

    let stdin = io::stdin();
    let mut session = Session::new(store, stdin.lock(), io::stdout(), io::stderr());
    session.run().context("Terminal I/O failed")?;

    Ok(())
}

/// Loads all-time history from disk, degrading to an empty list on failure
fn load_records(data_dir: &Path) -> Vec<OperationRecord> {
    let path = history_file_path(data_dir);
    if !path.exists() {
        eprintln!("Warning: history.txt not found at {}", format_path_with_tilde(&path));
        return Vec::new();
    }

    match parse_history_file(&path) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Warning: {:#}", e);
            Vec::new()
        }
    }
}

fn show_history(data_dir: &Path, json: bool) -> Result<()> {
    let records = load_records(data_dir);

    if json {
        let rendered =
            serde_json::to_string_pretty(&records).context("Failed to serialize history")?;
        println!("{}", rendered);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", EMPTY_HISTORY);
    }
    for record in &records {
        println!("{}", strip_ansi_codes(&record.to_string()));
    }

    Ok(())
}

fn show_stats(data_dir: &Path) -> Result<()> {
    let records = load_records(data_dir);

    println!("Calculator History Statistics");
    println!("=============================");
    println!("Total operations: {}", records.len());
    for op in Operator::ALL {
        let count = records.iter().filter(|r| r.operator == op).count();
        if count > 0 {
            println!("  {}: {}", operator_label(op), count);
        }
    }
    println!();
    println!("History file: {}", format_path_with_tilde(&history_file_path(data_dir)));

    if let Some(last) = records.last() {
        println!("Last operation: {}", strip_ansi_codes(&last.to_string()));
    }

    Ok(())
}

fn operator_label(op: Operator) -> &'static str {
    match op {
        Operator::Add => "Addition (+)",
        Operator::Subtract => "Subtraction (-)",
        Operator::Multiply => "Multiplication (*)",
        Operator::Divide => "Division (/)",
        Operator::Power => "Power (^)",
        Operator::Modulo => "Modulo (%)",
        Operator::Unknown => "Unknown operator",
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_data_dir_and_subcommand() {
        let cli = Cli::try_parse_from(["badcalc", "--data-dir", "/tmp/calc", "history", "--json"])
            .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/calc")));
        assert!(matches!(cli.command, Some(Commands::History { json: true })));
    }

    #[test]
    fn test_cli_no_arguments_is_interactive() {
        let cli = Cli::try_parse_from(["badcalc"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_load_records_missing_file_is_empty() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(load_records(temp.path()).is_empty());
    }
}
