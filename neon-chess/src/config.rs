//! Runtime configuration for Neon City Chess.
//!
//! Every tunable has a compile-time default and can be overridden through a
//! dedicated environment variable. Command-line flags override both.

use std::path::PathBuf;

/// Default directory for the interactive session's daily log files.
const DEFAULT_LOG_DIR: &str = "logs";

/// Directory name under the system temp dir for oracle output files.
const DEFAULT_OUTPUT_SUBDIR: &str = "neon-chess";

/// Get the oracle executable override.
///
/// Priority:
/// 1. `NEON_CHESS_ORACLE_EXE` env variable if set
/// 2. `None`, meaning this binary's own `export` subcommand is used
pub fn get_oracle_exe() -> Option<PathBuf> {
    non_empty_var("NEON_CHESS_ORACLE_EXE").map(PathBuf::from)
}

/// Get the working directory the oracle runs in.
///
/// Priority:
/// 1. `NEON_CHESS_WORKING_DIR` env variable if set
/// 2. `None`, the oracle inherits the current directory
pub fn get_working_dir() -> Option<PathBuf> {
    non_empty_var("NEON_CHESS_WORKING_DIR").map(PathBuf::from)
}

/// Get the directory oracle output files are written to.
///
/// Priority:
/// 1. `NEON_CHESS_OUTPUT_DIR` env variable if set
/// 2. `<temp dir>/neon-chess` as fallback
pub fn get_output_dir() -> PathBuf {
    non_empty_var("NEON_CHESS_OUTPUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_OUTPUT_SUBDIR))
}

/// Get the directory for log files.
///
/// Priority:
/// 1. `NEON_CHESS_LOG_DIR` env variable if set
/// 2. `logs` relative to the current directory
pub fn get_log_dir() -> PathBuf {
    non_empty_var("NEON_CHESS_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

/// Get the position matches start from.
///
/// Priority:
/// 1. `NEON_CHESS_START_FEN` env variable if set
/// 2. The standard initial position
pub fn get_start_fen() -> String {
    non_empty_var("NEON_CHESS_START_FEN").unwrap_or_else(|| chess::STARTING_FEN.to_string())
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
