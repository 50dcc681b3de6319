//! Client-side match state for Neon City Chess.
//!
//! [`MatchController`] owns the authoritative view of the match: the last
//! oracle snapshot, the current selection and the move history. Renderers,
//! camera and lighting react to it through the [`ObserverRegistry`].

mod config;
mod controller;
mod error;
mod history;
mod observers;
mod state;

pub use config::MatchConfig;
pub use controller::{pick_move, MatchController};
pub use error::{MatchErrorKind, MoveError};
pub use history::MoveHistory;
pub use observers::{MatchObserver, ObserverRegistry, Subscription};
pub use state::{MatchState, SelectionPhase};

pub use chess_common::{Square, UciMove};
pub use oracle::{Oracle, OracleError, Side};
