use chess_common::{Square, SquareError};
use oracle::{OracleError, OracleErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    #[error("Target square is invalid: {0}")]
    InvalidSquare(#[from] SquareError),
    #[error("No selected square")]
    NoSelection,
    #[error("Illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Flat classification of every failure the controller reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchErrorKind {
    InvalidSquare,
    NoSelection,
    IllegalMove,
    OracleExecution,
    OraclePayload,
}

impl MoveError {
    pub fn kind(&self) -> MatchErrorKind {
        match self {
            Self::InvalidSquare(_) => MatchErrorKind::InvalidSquare,
            Self::NoSelection => MatchErrorKind::NoSelection,
            Self::IllegalMove { .. } => MatchErrorKind::IllegalMove,
            Self::Oracle(e) => MatchErrorKind::from(e),
        }
    }
}

impl From<&OracleError> for MatchErrorKind {
    fn from(e: &OracleError) -> Self {
        match e.kind() {
            OracleErrorKind::Execution => Self::OracleExecution,
            OracleErrorKind::Payload => Self::OraclePayload,
        }
    }
}
