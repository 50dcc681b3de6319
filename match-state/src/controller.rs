use std::sync::Arc;

use chess_common::{Promotion, Square, UciMove};
use oracle::{Oracle, OracleError, OracleRequest};

use crate::config::MatchConfig;
use crate::error::MoveError;
use crate::history::MoveHistory;
use crate::observers::ObserverRegistry;
use crate::state::MatchState;

/// Owns the client-side view of a match and the history that reproduces it.
///
/// Every operation takes `&mut self`, so interactions are serialized by the
/// borrow checker: nothing can observe the controller while a refresh is
/// outstanding.
pub struct MatchController<O> {
    oracle: O,
    config: MatchConfig,
    state: Arc<MatchState>,
    history: MoveHistory,
    observers: ObserverRegistry,
}

impl<O: Oracle> MatchController<O> {
    pub fn new(oracle: O, config: MatchConfig, observers: ObserverRegistry) -> Self {
        let state = Arc::new(MatchState::initial(&config.starting_fen));
        Self {
            oracle,
            config,
            state,
            history: MoveHistory::default(),
            observers,
        }
    }

    pub fn state(&self) -> &Arc<MatchState> {
        &self.state
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }

    /// Initial refresh. A failure leaves the default state in place.
    pub async fn start(&mut self) -> Result<(), OracleError> {
        tracing::info!("Starting match from {}", self.config.starting_fen);
        self.refresh().await.inspect_err(|e| {
            tracing::warn!("Initial refresh failed: {}", e);
        })
    }

    /// Ask the oracle for the position after the full history and replace the
    /// snapshot with its answer. On failure nothing changes.
    #[tracing::instrument(level = "debug", skip(self), fields(moves = self.history.len()))]
    pub async fn refresh(&mut self) -> Result<(), OracleError> {
        let request = OracleRequest::new(
            self.config.starting_fen.clone(),
            self.history.as_slice().to_vec(),
        );
        let payload = self.oracle.evaluate(&request).await?;
        self.replace_state(MatchState::from_payload(payload));
        Ok(())
    }

    /// Clear the history and refresh. The history stays empty even when the
    /// refresh fails.
    pub async fn reset_match(&mut self) -> Result<(), OracleError> {
        tracing::info!("Resetting match ({} moves discarded)", self.history.len());
        self.history.clear();
        self.refresh().await.inspect_err(|e| {
            tracing::warn!("Refresh after reset failed: {}", e);
        })
    }

    /// Select `raw` and compute its legal targets.
    ///
    /// Returns `false` without touching state when `raw` is not a square.
    /// A square with no legal moves clears the selection, still notifies, and
    /// returns `false`.
    pub fn select_square(&mut self, raw: &str) -> bool {
        let square: Square = match raw.parse() {
            Ok(sq) => sq,
            Err(e) => {
                tracing::debug!("Rejected selection {:?}: {}", raw, e);
                return false;
            }
        };

        let next = self.state.reselect(square);
        let selected = next.selected_square().is_some();
        tracing::debug!(
            "Selected {} -> {} targets",
            square,
            next.legal_targets().len()
        );
        self.replace_state(next);
        selected
    }

    /// Move the selected piece to `raw`.
    ///
    /// The move is appended to the history before the refresh and popped
    /// again if the refresh fails, so a failed call leaves the history as it
    /// was.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn try_move_selected_to(&mut self, raw: &str) -> Result<(), MoveError> {
        let from = self.state.selected_square().ok_or(MoveError::NoSelection)?;
        let to: Square = raw.parse()?;

        let mv = pick_move(self.state.legal_moves_uci(), from, to)
            .ok_or(MoveError::IllegalMove { from, to })?;

        self.history.push(mv);
        if let Err(e) = self.refresh().await {
            self.history.pop();
            tracing::warn!("Rolled back {} after failed refresh: {}", mv, e);
            return Err(e.into());
        }
        tracing::info!("Applied {} ({} moves)", mv, self.history.len());
        Ok(())
    }

    fn replace_state(&mut self, next: MatchState) {
        self.state = Arc::new(next);
        self.observers.notify(&self.state);
    }
}

/// Legal move from `from` to `to`, preferring a queen promotion when several
/// promotion pieces share the destination. Otherwise the first match wins.
pub fn pick_move(legal: &[UciMove], from: Square, to: Square) -> Option<UciMove> {
    let mut candidates = legal.iter().filter(|mv| mv.connects(from, to));
    let first = candidates.next().copied()?;
    if first.promotion == Some(Promotion::Queen) {
        return Some(first);
    }
    candidates
        .find(|mv| mv.promotion == Some(Promotion::Queen))
        .copied()
        .or(Some(first))
}
