/// Settings fixed for the lifetime of a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Position every refresh replays the history from.
    pub starting_fen: String,
}

impl MatchConfig {
    pub fn with_starting_fen(starting_fen: impl Into<String>) -> Self {
        Self {
            starting_fen: starting_fen.into(),
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::with_starting_fen(chess::STARTING_FEN)
    }
}
