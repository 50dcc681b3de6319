//! Board square coordinates ("a1".."h8").

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A square on the board, file `a`-`h` and rank `1`-`8`.
///
/// Ordering is file-major, which matches the lexicographic order of the
/// rendered coordinates ("a8" < "b1" < "e3" < "e4").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SquareError {
    #[error("Invalid square '{0}': expected two characters")]
    InvalidLength(String),
    #[error("Invalid square '{0}': file must be a-h")]
    InvalidFile(String),
    #[error("Invalid square '{0}': rank must be 1-8")]
    InvalidRank(String),
}

impl Square {
    /// Build a square from zero-based file and rank indices.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    /// Zero-based file index (a = 0).
    pub fn file(self) -> u8 {
        self.file
    }

    /// Zero-based rank index (rank 1 = 0).
    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }

    /// Trim and lowercase raw user input before validation.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Parse a coordinate that is already normalized. Used when scanning
    /// move strings, which are never case-folded.
    pub fn parse_exact(s: &str) -> Result<Self, SquareError> {
        let bytes = s.as_bytes();
        if s.chars().count() != 2 || bytes.len() != 2 {
            return Err(SquareError::InvalidLength(s.to_string()));
        }
        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) {
            return Err(SquareError::InvalidFile(s.to_string()));
        }
        if !(b'1'..=b'8').contains(&rank) {
            return Err(SquareError::InvalidRank(s.to_string()));
        }
        Ok(Self {
            file: file - b'a',
            rank: rank - b'1',
        })
    }
}

impl FromStr for Square {
    type Err = SquareError;

    /// Normalizes (trim + lowercase) and validates.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_exact(&Self::normalize(s))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Square> for cozy_chess::Square {
    fn from(sq: Square) -> Self {
        cozy_chess::Square::new(
            cozy_chess::File::index(sq.file as usize),
            cozy_chess::Rank::index(sq.rank as usize),
        )
    }
}

impl From<cozy_chess::Square> for Square {
    fn from(sq: cozy_chess::Square) -> Self {
        Self {
            file: sq.file() as u8,
            rank: sq.rank() as u8,
        }
    }
}
