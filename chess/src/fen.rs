use cozy_chess::Board;

/// Standard initial position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string into a Board
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let trimmed = fen.trim();
    if trimmed.split_whitespace().next().is_none() {
        return Err(FenError::Empty);
    }

    trimmed
        .parse()
        .map_err(|e| FenError::InvalidFormat(format!("{}: {:?}", trimmed, e)))
}

/// Format a Board as a FEN string
pub fn format_fen(board: &Board) -> String {
    // Non-alternate Display uses KQkq castling notation
    board.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("FEN string is empty")]
    Empty,
    #[error("Invalid FEN format: {0}")]
    InvalidFormat(String),
}
