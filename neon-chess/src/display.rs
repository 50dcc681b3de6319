//! Console observers: the board printer and the turn watcher.

use std::sync::Arc;

use chess::DisplayBoard;
use match_state::{MatchState, Side};

/// Board, status and score for one snapshot.
pub fn render_state(state: &MatchState) -> String {
    let board = match DisplayBoard::from_fen(state.fen()) {
        Ok(board) => board.render(state.selected_square(), state.legal_targets()),
        Err(e) => format!("(cannot draw {}: {})\n", state.fen(), e),
    };
    let mut out = board;
    if !state.status_text().is_empty() {
        out.push_str(state.status_text());
        out.push('\n');
    }
    if !state.score_text().is_empty() {
        out.push_str(state.score_text());
        out.push('\n');
    }
    if let Some(square) = state.selected_square() {
        let targets: Vec<String> = state.legal_targets().iter().map(ToString::to_string).collect();
        out.push_str(&format!("Selected {}: {}\n", square, targets.join(" ")));
    }
    out
}

pub fn board_printer() -> impl FnMut(&Arc<MatchState>) + Send {
    |state: &Arc<MatchState>| println!("\n{}", render_state(state))
}

/// Tracks side-to-move and game-over changes across snapshots.
#[derive(Debug, Default)]
pub struct TurnWatcher {
    turn: Option<Side>,
    game_over: bool,
}

impl TurnWatcher {
    /// Announcement for `state`, if anything changed since the last one.
    pub fn observe(&mut self, state: &MatchState) -> Option<String> {
        if state.is_game_over() {
            if self.game_over {
                return None;
            }
            self.game_over = true;
            self.turn = Some(state.turn());
            return Some(format!("Game over: {}", state.status_text()));
        }
        self.game_over = false;
        if self.turn == Some(state.turn()) {
            return None;
        }
        self.turn = Some(state.turn());
        Some(format!("{} to play", state.turn().as_str().to_uppercase()))
    }
}

pub fn turn_watcher() -> impl FnMut(&Arc<MatchState>) + Send {
    let mut watcher = TurnWatcher::default();
    move |state: &Arc<MatchState>| {
        if let Some(line) = watcher.observe(state) {
            println!(">> {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle::{MockOracle, OraclePayload};

    fn state(payload: OraclePayload) -> MatchState {
        MatchState::from_payload(payload)
    }

    #[test]
    fn test_render_state_includes_texts() {
        let s = state(MockOracle::payload(chess::STARTING_FEN, Side::White, &["e2e4"]));
        let out = render_state(&s);
        assert!(out.contains("White to move"));
        assert!(out.contains("Even"));
        assert!(out.starts_with("8 "));
    }

    #[test]
    fn test_render_state_survives_bad_fen() {
        let s = MatchState::initial("garbage");
        assert!(render_state(&s).contains("cannot draw garbage"));
    }

    #[test]
    fn test_turn_watcher_reports_changes_only() {
        let mut watcher = TurnWatcher::default();
        let white = state(MockOracle::payload(chess::STARTING_FEN, Side::White, &[]));
        let black = state(MockOracle::payload(chess::STARTING_FEN, Side::Black, &[]));

        assert_eq!(watcher.observe(&white).as_deref(), Some("WHITE to play"));
        assert_eq!(watcher.observe(&white), None);
        assert_eq!(watcher.observe(&black).as_deref(), Some("BLACK to play"));
    }

    #[test]
    fn test_turn_watcher_announces_game_over_once() {
        let mut watcher = TurnWatcher::default();
        let mut payload = MockOracle::payload(chess::STARTING_FEN, Side::Black, &[]);
        payload.is_game_over = true;
        payload.status_text = "Checkmate | White wins".into();
        let over = state(payload);

        assert_eq!(
            watcher.observe(&over).as_deref(),
            Some("Game over: Checkmate | White wins")
        );
        assert_eq!(watcher.observe(&over), None);
    }
}
