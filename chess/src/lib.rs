//! Reference move-legality authority for Neon City Chess.
//!
//! Wraps cozy-chess to replay a move list from a starting FEN and report
//! the resulting position, legal moves, outcome and display texts.

pub mod board_display;
pub mod fen;
pub mod game;
pub mod scoring;
pub mod types;
pub mod uci;

pub use board_display::{DisplayBoard, DisplayBoardError};
pub use fen::{FenError, STARTING_FEN};
pub use game::{DrawReason, Game, GameError, Outcome};
pub use scoring::MaterialScore;
pub use types::{PieceColor, PieceKind};
pub use uci::{to_cozy_move, to_uci_move};
