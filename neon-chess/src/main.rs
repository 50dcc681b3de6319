//! Neon City Chess console client.
//!
//! Two roles in one binary:
//!
//! 1. **`play`** (default): an interactive session. The match controller keeps
//!    the client-side state and asks an out-of-process oracle for the position
//!    after every move.
//! 2. **`export`**: the oracle itself. Replays a move list from a FEN and writes
//!    the resulting position, legal moves and status texts as JSON.
//!
//! By default `play` runs this same executable's `export` subcommand as its
//! oracle; see [`config`] for overrides.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use match_state::{MatchConfig, MatchController, ObserverRegistry};
use oracle::{OracleConfig, ProcessOracle};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod console;
mod display;
mod export;

#[derive(Parser)]
#[command(name = "neon-chess", about = "Neon City Chess match console")]
struct Cli {
    /// Runs `play` when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive match on the console.
    Play(PlayArgs),
    /// Replay a move list and write the oracle payload as JSON.
    Export(ExportArgs),
}

#[derive(Args, Default, Debug)]
struct PlayArgs {
    /// Starting position (defaults to `NEON_CHESS_START_FEN` or the standard setup).
    #[arg(long)]
    fen: Option<String>,

    /// Oracle executable (defaults to `NEON_CHESS_ORACLE_EXE` or `neon-chess export`).
    #[arg(long)]
    oracle_exe: Option<PathBuf>,

    /// Leading argument for the oracle executable. Repeatable.
    #[arg(long = "oracle-arg", allow_hyphen_values = true)]
    oracle_args: Vec<String>,

    /// Working directory for the oracle process.
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// Directory for oracle output files.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Starting position; the standard setup when omitted.
    #[arg(long, default_value = chess::STARTING_FEN)]
    fen: String,

    /// Comma-separated UCI moves, e.g. `e2e4,e7e5`.
    #[arg(long, default_value = "")]
    moves: String,

    #[arg(long)]
    output: PathBuf,
}

/// Resolve the path to a sibling binary distributed alongside this executable.
///
/// Falls back to `name` itself (a `PATH` lookup) when no such file exists next
/// to the running executable.
fn resolve_sibling_binary(name: &str) -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(name);
            if candidate.exists() {
                return candidate;
            }
        }
    }

    PathBuf::from(name)
}

/// Build the oracle settings from flags, then environment, then defaults.
fn oracle_config(args: &PlayArgs) -> OracleConfig {
    let output_dir = args.output_dir.clone().unwrap_or_else(config::get_output_dir);
    let mut oracle = match args.oracle_exe.clone().or_else(config::get_oracle_exe) {
        Some(exe) => OracleConfig::new(exe, output_dir).with_args(args.oracle_args.iter().cloned()),
        None => {
            let own = format!("{}{}", env!("CARGO_BIN_NAME"), std::env::consts::EXE_SUFFIX);
            OracleConfig::new(resolve_sibling_binary(&own), output_dir).with_args(["export"])
        }
    };
    if let Some(dir) = args.working_dir.clone().or_else(config::get_working_dir) {
        oracle = oracle.with_working_dir(dir);
    }
    oracle
}

async fn play(args: PlayArgs) -> anyhow::Result<()> {
    let log_dir = config::get_log_dir();
    std::fs::create_dir_all(&log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&log_dir, "neon-chess");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let oracle_config = oracle_config(&args);
    let starting_fen = args.fen.unwrap_or_else(config::get_start_fen);
    tracing::info!("Neon City Chess starting up");
    tracing::debug!("Oracle: {:?}", oracle_config);

    println!("Neon City Chess");
    println!("Oracle: {}", oracle_config.executable.display());
    println!("Debug logs: {}/neon-chess.YYYY-MM-DD", log_dir.display());
    println!("Type `help` for commands.");

    let mut controller = MatchController::new(
        ProcessOracle::new(oracle_config),
        MatchConfig::with_starting_fen(starting_fen),
        ObserverRegistry::new(),
    );
    let _board = controller.observers().subscribe(display::board_printer());
    let _turns = controller.observers().subscribe(display::turn_watcher());
    if let Err(e) = controller.start().await {
        println!("Could not reach the oracle: {}", e);
        println!("Use `refresh` to try again.");
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    console::Console::new(controller)
        .run(stdin)
        .await
        .context("Console input failed")?;

    tracing::info!("Neon City Chess shutting down");
    Ok(())
}

fn export(args: ExportArgs) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let written = export::export_state(&args.fen, &args.moves, &args.output)?;
    println!("Wrote state to {}", written.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Export(args)) => export(args),
        Some(Commands::Play(args)) => play(args).await,
        None => play(PlayArgs::default()).await,
    }
}
