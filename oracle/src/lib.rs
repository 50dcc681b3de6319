//! Move-legality oracle client.
//!
//! The match controller never decides legality itself. It sends the starting
//! position and the full move history to an [`Oracle`] and receives an
//! [`OraclePayload`] describing the resulting position.

pub mod error;
pub mod local;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod payload;
pub mod process;

pub use error::{OracleError, OracleErrorKind};
pub use local::LocalOracle;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockOracle;
pub use payload::{OraclePayload, Side};
pub use process::{OracleConfig, ProcessOracle};

use async_trait::async_trait;
use chess_common::{join_moves, UciMove};

/// What the oracle is asked to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    pub starting_fen: String,
    /// Every applied move, in order, from the starting position.
    pub moves: Vec<UciMove>,
}

impl OracleRequest {
    pub fn new(starting_fen: impl Into<String>, moves: Vec<UciMove>) -> Self {
        Self {
            starting_fen: starting_fen.into(),
            moves,
        }
    }

    /// Comma-joined move list, no spaces ("e2e4,e7e5").
    pub fn moves_csv(&self) -> String {
        join_moves(&self.moves)
    }
}

/// External authority on position and legal moves.
///
/// One call is one blocking round-trip; implementations do not retry.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn evaluate(&self, request: &OracleRequest) -> Result<OraclePayload, OracleError>;
}
