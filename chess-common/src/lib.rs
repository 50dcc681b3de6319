//! Common coordinate and move-string types for Neon City Chess
//!
//! This crate provides the square and UCI move-string types used at every
//! boundary of the match controller, the oracle adapter and the console client.

pub mod square;
pub mod uci;

// Re-export commonly used items
pub use square::{Square, SquareError};
pub use uci::{join_moves, split_moves, Promotion, UciMove, UciMoveError};
