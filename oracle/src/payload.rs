//! JSON document exchanged with the oracle.

use chess::{Game, PieceColor};
use chess_common::{Square, UciMove};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OracleError;

/// Side to move as reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    /// Capitalized name, as used in status texts ("White to move").
    pub fn title(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

impl From<PieceColor> for Side {
    fn from(c: PieceColor) -> Self {
        match c {
            PieceColor::White => Self::White,
            PieceColor::Black => Self::Black,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed oracle response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OraclePayload {
    pub fen: String,
    pub turn: Side,
    pub selected_square: Option<Square>,
    pub legal_targets: Vec<Square>,
    pub is_game_over: bool,
    pub status_text: String,
    pub score_text: String,
    pub legal_moves_uci: Vec<UciMove>,
}

/// Wire shape. Required fields fail the parse when absent; list items are
/// kept as raw values so one bad entry does not sink the whole response.
#[derive(Deserialize)]
struct RawPayload {
    fen: String,
    turn: Side,
    is_game_over: bool,
    status_text: String,
    score_text: String,
    #[serde(default)]
    selected_square: Option<Value>,
    #[serde(default)]
    legal_targets: Option<Value>,
    #[serde(default)]
    legal_moves_uci: Option<Value>,
}

impl OraclePayload {
    /// Parse a response document.
    pub fn from_json(json: &str) -> Result<Self, OracleError> {
        let raw: RawPayload = serde_json::from_str(json)?;

        let selected_square = match raw.selected_square {
            Some(Value::String(s)) if !s.is_empty() => match Square::parse_exact(&s) {
                Ok(sq) => Some(sq),
                Err(e) => {
                    tracing::warn!("Ignoring selected_square from oracle: {}", e);
                    None
                }
            },
            _ => None,
        };

        let legal_targets = collect_valid(raw.legal_targets, "legal_targets", |s| {
            Square::parse_exact(s).map_err(|e| e.to_string())
        });
        let legal_moves_uci = collect_valid(raw.legal_moves_uci, "legal_moves_uci", |s| {
            s.parse::<UciMove>().map_err(|e| e.to_string())
        });

        Ok(Self {
            fen: raw.fen,
            turn: raw.turn,
            selected_square,
            legal_targets,
            is_game_over: raw.is_game_over,
            status_text: raw.status_text,
            score_text: raw.score_text,
            legal_moves_uci,
        })
    }

    /// Pretty JSON in the same shape [`OraclePayload::from_json`] accepts.
    pub fn to_json_pretty(&self) -> Result<String, OracleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Describe a replayed game. No square is selected.
    pub fn from_game(game: &Game) -> Self {
        Self {
            fen: game.to_fen(),
            turn: game.side_to_move().into(),
            selected_square: None,
            legal_targets: Vec::new(),
            is_game_over: game.is_game_over(),
            status_text: game.status_text(),
            score_text: game.score_text(),
            legal_moves_uci: game.legal_moves_uci(),
        }
    }
}

fn collect_valid<T>(
    items: Option<Value>,
    field: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Vec<T> {
    let items = match items {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            tracing::warn!("Ignoring {}: expected an array, got {}", field, other);
            Vec::new()
        }
    };
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => match parse(&s) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Skipping malformed {} entry: {}", field, e);
                    None
                }
            },
            other => {
                tracing::warn!("Skipping non-string {} entry: {}", field, other);
                None
            }
        })
        .collect()
}
