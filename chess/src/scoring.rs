//! Material count shown next to the turn line.

use cozy_chess::Board;

use crate::types::{PieceColor, PieceKind};

/// Material each side starts with (8 + 2*3 + 2*3 + 2*5 + 9).
pub const STARTING_MATERIAL: i32 = 39;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialScore {
    pub white_material: i32,
    pub black_material: i32,
    /// Material white has taken from black.
    pub white_captured: i32,
    /// Material black has taken from white.
    pub black_captured: i32,
    /// Positive when white is ahead.
    pub advantage: i32,
}

impl MaterialScore {
    pub fn of(board: &Board) -> Self {
        let white = material_for(board, PieceColor::White);
        let black = material_for(board, PieceColor::Black);
        Self {
            white_material: white,
            black_material: black,
            white_captured: (STARTING_MATERIAL - black).max(0),
            black_captured: (STARTING_MATERIAL - white).max(0),
            advantage: white - black,
        }
    }

    /// e.g. "Mat W:39 B:36 | Caps W:3 B:0 | White +3"
    pub fn score_text(&self) -> String {
        let eval = match self.advantage {
            a if a > 0 => format!("White +{}", a),
            a if a < 0 => format!("Black +{}", -a),
            _ => "Even".to_string(),
        };
        format!(
            "Mat W:{} B:{} | Caps W:{} B:{} | {}",
            self.white_material,
            self.black_material,
            self.white_captured,
            self.black_captured,
            eval
        )
    }
}

fn material_for(board: &Board, color: PieceColor) -> i32 {
    PieceKind::ALL
        .iter()
        .map(|&kind| {
            let count = board.colored_pieces(color.into(), kind.into()).len() as i32;
            count * kind.value()
        })
        .sum()
}
