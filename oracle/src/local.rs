//! In-process oracle backed by the `chess` crate.

use async_trait::async_trait;
use chess::Game;

use crate::{Oracle, OracleError, OraclePayload, OracleRequest};

/// Evaluates requests without spawning anything. Produces the same payload
/// the `export` command writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOracle;

impl LocalOracle {
    pub fn new() -> Self {
        Self
    }

    /// Replay the request and describe the resulting position.
    pub fn evaluate_now(&self, request: &OracleRequest) -> Result<OraclePayload, OracleError> {
        let game = Game::replay(&request.starting_fen, &request.moves)
            .map_err(|e| OracleError::Rejected(e.to_string()))?;
        Ok(OraclePayload::from_game(&game))
    }
}

#[async_trait]
impl Oracle for LocalOracle {
    async fn evaluate(&self, request: &OracleRequest) -> Result<OraclePayload, OracleError> {
        self.evaluate_now(request)
    }
}
