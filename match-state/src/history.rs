use std::fmt;

use chess_common::{join_moves, UciMove};

/// Moves applied since the starting position, oldest first.
///
/// Only the controller appends or removes entries; everyone else reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<UciMove>,
}

impl MoveHistory {
    pub fn as_slice(&self) -> &[UciMove] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn last(&self) -> Option<UciMove> {
        self.moves.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UciMove> {
        self.moves.iter()
    }

    pub(crate) fn push(&mut self, mv: UciMove) {
        self.moves.push(mv);
    }

    pub(crate) fn pop(&mut self) -> Option<UciMove> {
        self.moves.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.moves.clear();
    }
}

impl fmt::Display for MoveHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_moves(&self.moves))
    }
}
