//! The `export` subcommand: the oracle executable the interactive session
//! talks to by default.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chess_common::split_moves;
use oracle::{LocalOracle, OracleRequest};

/// Replay `moves` from `fen` and write the resulting payload to `output`.
///
/// Returns the absolute path written.
pub fn export_state(fen: &str, moves: &str, output: &Path) -> anyhow::Result<PathBuf> {
    let moves = split_moves(moves).context("Invalid move list")?;
    let request = OracleRequest::new(fen, moves);
    let payload = LocalOracle::new().evaluate_now(&request)?;
    let json = payload.to_json_pretty()?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;

    let written = std::fs::canonicalize(output).unwrap_or_else(|_| output.to_path_buf());
    tracing::info!(
        "Exported {} legal moves for {} to {}",
        payload.legal_moves_uci.len(),
        payload.turn,
        written.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_export_writes_payload_and_parents() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("a").join("b").join("state.json");

        let written = export_state(chess::STARTING_FEN, "e2e4,e7e5", &out).unwrap();

        assert!(written.is_absolute());
        let value: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["turn"], "white");
        assert_eq!(value["is_game_over"], false);
        assert_eq!(value["selected_square"], Value::Null);
        assert!(value["legal_moves_uci"]
            .as_array()
            .unwrap()
            .contains(&Value::from("g1f3")));
    }

    #[test]
    fn test_export_rejects_illegal_move() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("state.json");

        let err = export_state(chess::STARTING_FEN, "e2e4,e2e4", &out).unwrap_err();

        assert!(err.to_string().contains("Illegal move at index 2"));
        assert!(!out.exists());
    }

    #[test]
    fn test_export_rejects_bad_fen() {
        let temp = tempfile::tempdir().unwrap();
        let err = export_state("not a fen", "", &temp.path().join("s.json")).unwrap_err();
        assert!(err.to_string().contains("rejected"));
    }
}
