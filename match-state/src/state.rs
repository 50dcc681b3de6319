use chess_common::{Square, UciMove};
use oracle::{OraclePayload, Side};

/// Complete, immutable snapshot of the match as the client sees it.
///
/// A new snapshot replaces the old one on every observable change; fields are
/// never updated one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    fen: String,
    turn: Side,
    selected_square: Option<Square>,
    legal_targets: Vec<Square>,
    is_game_over: bool,
    status_text: String,
    score_text: String,
    legal_moves_uci: Vec<UciMove>,
}

/// Selection layer of the interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Idle,
    Selected(Square),
}

impl MatchState {
    /// State before the first refresh: the configured position, white to
    /// move, nothing legal yet.
    pub fn initial(starting_fen: &str) -> Self {
        Self {
            fen: starting_fen.to_string(),
            turn: Side::White,
            selected_square: None,
            legal_targets: Vec::new(),
            is_game_over: false,
            status_text: String::new(),
            score_text: String::new(),
            legal_moves_uci: Vec::new(),
        }
    }

    /// Build from an oracle response.
    ///
    /// Any selection in the payload is dropped: selection only ever comes
    /// from an explicit `select_square` on the new state.
    pub fn from_payload(payload: OraclePayload) -> Self {
        if payload.selected_square.is_some() || !payload.legal_targets.is_empty() {
            tracing::debug!(
                "Discarding oracle selection {:?} ({} targets)",
                payload.selected_square,
                payload.legal_targets.len()
            );
        }
        Self {
            fen: payload.fen,
            turn: payload.turn,
            selected_square: None,
            legal_targets: Vec::new(),
            is_game_over: payload.is_game_over,
            status_text: payload.status_text,
            score_text: payload.score_text,
            legal_moves_uci: payload.legal_moves_uci,
        }
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn selected_square(&self) -> Option<Square> {
        self.selected_square
    }

    /// Sorted, no duplicates. Empty whenever nothing is selected.
    pub fn legal_targets(&self) -> &[Square] {
        &self.legal_targets
    }

    /// Advisory only; interaction is not blocked once the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    pub fn legal_moves_uci(&self) -> &[UciMove] {
        &self.legal_moves_uci
    }

    pub fn phase(&self) -> SelectionPhase {
        match self.selected_square {
            Some(square) => SelectionPhase::Selected(square),
            None => SelectionPhase::Idle,
        }
    }

    /// Destinations of every legal move starting on `from`, sorted ascending
    /// and deduplicated (promotion variants collapse to one target).
    pub fn targets_from(&self, from: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = self
            .legal_moves_uci
            .iter()
            .filter(|mv| mv.from == from)
            .map(|mv| mv.to)
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    /// Copy of this snapshot with `square` selected, or with the selection
    /// cleared when `square` has no legal targets.
    pub(crate) fn reselect(&self, square: Square) -> Self {
        let targets = self.targets_from(square);
        Self {
            selected_square: (!targets.is_empty()).then_some(square),
            legal_targets: targets,
            ..self.clone()
        }
    }
}
