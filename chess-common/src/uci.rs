//! UCI move strings ("e2e4", "e7e8q") and move-list helpers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::square::{Square, SquareError};

/// Piece a pawn can promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub fn to_char(self) -> char {
        match self {
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'q' => Some(Self::Queen),
            'r' => Some(Self::Rook),
            'b' => Some(Self::Bishop),
            'n' => Some(Self::Knight),
            _ => None,
        }
    }
}

impl From<Promotion> for cozy_chess::Piece {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

impl TryFrom<cozy_chess::Piece> for Promotion {
    type Error = UciMoveError;

    fn try_from(p: cozy_chess::Piece) -> Result<Self, Self::Error> {
        match p {
            cozy_chess::Piece::Queen => Ok(Self::Queen),
            cozy_chess::Piece::Rook => Ok(Self::Rook),
            cozy_chess::Piece::Bishop => Ok(Self::Bishop),
            cozy_chess::Piece::Knight => Ok(Self::Knight),
            other => Err(UciMoveError::InvalidPromotion(format!("{:?}", other))),
        }
    }
}

/// A move in "from-square + to-square [+ promotion-letter]" form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UciMoveError {
    #[error("Invalid move '{0}': expected 4 or 5 characters")]
    InvalidLength(String),
    #[error("Invalid move square: {0}")]
    InvalidSquare(#[from] SquareError),
    #[error("Invalid promotion: {0}")]
    InvalidPromotion(String),
}

impl UciMove {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, promotion: Promotion) -> Self {
        self.promotion = Some(promotion);
        self
    }

    /// True when this move goes from `from` to `to`, whatever the promotion.
    pub fn connects(&self, from: Square, to: Square) -> bool {
        self.from == from && self.to == to
    }
}

impl FromStr for UciMove {
    type Err = UciMoveError;

    /// Move strings are matched case-sensitively; no normalization happens here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(UciMoveError::InvalidLength(s.to_string()));
        }
        let from = Square::parse_exact(&s[0..2])?;
        let to = Square::parse_exact(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => Some(
                Promotion::from_char(c).ok_or_else(|| UciMoveError::InvalidPromotion(s.to_string()))?,
            ),
        };
        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

impl Serialize for UciMove {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UciMove {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Join moves into the comma-separated, space-free list the oracle expects.
pub fn join_moves(moves: &[UciMove]) -> String {
    moves
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Split a comma-separated move list. Blank tokens are skipped, so an empty
/// string yields an empty list.
pub fn split_moves(raw: &str) -> Result<Vec<UciMove>, UciMoveError> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}
