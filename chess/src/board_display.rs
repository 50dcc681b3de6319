//! Lightweight board representation for rendering from FEN.

use chess_common::Square;

use crate::types::{PieceColor, PieceKind};

/// An 8x8 board for display purposes only.
#[derive(Debug, Clone, Default)]
pub struct DisplayBoard {
    squares: [[Option<(PieceKind, PieceColor)>; 8]; 8],
}

impl DisplayBoard {
    /// Parse the board placement from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, DisplayBoardError> {
        let placement = fen
            .split_whitespace()
            .next()
            .ok_or(DisplayBoardError::InvalidFen)?;

        let mut squares = [[None; 8]; 8];
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(DisplayBoardError::InvalidFen);
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if file > 7 {
                    return Err(DisplayBoardError::InvalidFen);
                }
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let color = if c.is_uppercase() {
                        PieceColor::White
                    } else {
                        PieceColor::Black
                    };
                    let kind = PieceKind::from_char(c).ok_or(DisplayBoardError::InvalidPiece(c))?;
                    squares[rank][file] = Some((kind, color));
                    file += 1;
                }
            }
        }

        Ok(DisplayBoard { squares })
    }

    pub fn piece_at(&self, square: Square) -> Option<(PieceKind, PieceColor)> {
        self.squares[square.rank() as usize][square.file() as usize]
    }

    /// Render as text, rank 8 at the top. The selected square is bracketed
    /// and empty target squares show `*` (occupied targets show `x`).
    pub fn render(&self, selected: Option<Square>, targets: &[Square]) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            out.push((b'1' + rank) as char);
            out.push(' ');
            for file in 0..8u8 {
                let Some(square) = Square::new(file, rank) else {
                    continue;
                };
                let glyph = match self.piece_at(square) {
                    Some((kind, PieceColor::White)) => kind.to_char_upper(),
                    Some((kind, PieceColor::Black)) => kind.to_char_lower(),
                    None => '.',
                };
                let is_target = targets.contains(&square);
                let cell = if selected == Some(square) {
                    format!("[{}]", glyph)
                } else if is_target && glyph == '.' {
                    " * ".to_string()
                } else if is_target {
                    format!("x{} ", glyph)
                } else {
                    format!(" {} ", glyph)
                };
                out.push_str(&cell);
            }
            out.push('\n');
        }
        out.push_str("   a  b  c  d  e  f  g  h\n");
        out
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayBoardError {
    #[error("Invalid FEN string")]
    InvalidFen,
    #[error("Invalid piece character: {0}")]
    InvalidPiece(char),
}
