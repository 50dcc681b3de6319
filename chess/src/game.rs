use chess_common::UciMove;
use cozy_chess::{Board, Move, Piece};

use crate::scoring::MaterialScore;
use crate::types::PieceColor;
use crate::uci::{to_cozy_move, to_uci_move};

/// Halfmove clock at which the seventy-five-move rule ends the game.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of one position that end the game by repetition.
const FIVEFOLD: usize = 5;

/// A position replayed from a starting FEN, with enough history to detect
/// repetitions.
#[derive(Debug, Clone)]
pub struct Game {
    position: Board,
    start_fen: String,
    played: Vec<UciMove>,
    /// Position hashes, starting position first, one per ply after it.
    hashes: Vec<u64>,
    /// Plies since the last capture or pawn move. Tracked here because
    /// cozy-chess caps its own clock at the fifty-move threshold.
    halfmove_clock: u32,
}

/// How the game stands after the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Checkmate { winner: PieceColor },
    Stalemate,
    Draw(DrawReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl Game {
    /// Create a game from a FEN string
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let position = crate::fen::parse_fen(fen)?;
        let hashes = vec![position.hash()];
        let halfmove_clock = fen
            .split_whitespace()
            .nth(4)
            .and_then(|field| field.parse().ok())
            .unwrap_or(0);
        Ok(Self {
            position,
            start_fen: fen.trim().to_string(),
            played: Vec::new(),
            hashes,
            halfmove_clock,
        })
    }

    /// Replay `moves` in order on top of `fen`.
    ///
    /// The first illegal move aborts the replay; its 1-based index is reported.
    #[tracing::instrument(level = "debug", skip(moves), fields(moves = moves.len()))]
    pub fn replay(fen: &str, moves: &[UciMove]) -> Result<Self, GameError> {
        let mut game = Self::from_fen(fen)?;
        for (idx, mv) in moves.iter().enumerate() {
            game.play(*mv).map_err(|e| match e {
                GameError::IllegalMove { mv, fen, .. } => GameError::IllegalMove {
                    index: idx + 1,
                    mv,
                    fen,
                },
                other => other,
            })?;
        }
        Ok(game)
    }

    /// Get the current board position
    pub fn position(&self) -> &Board {
        &self.position
    }

    pub fn start_fen(&self) -> &str {
        &self.start_fen
    }

    /// Moves played since the starting position.
    pub fn played(&self) -> &[UciMove] {
        &self.played
    }

    /// Play one move given in standard UCI form.
    pub fn play(&mut self, mv: UciMove) -> Result<(), GameError> {
        let legal = self.cozy_legal_moves();
        let cozy = to_cozy_move(&self.position, mv, &legal);
        if !legal.contains(&cozy) {
            return Err(GameError::IllegalMove {
                index: self.played.len() + 1,
                mv,
                fen: self.to_fen(),
            });
        }

        let mover = self.position.side_to_move();
        let resets_clock = self.position.piece_on(cozy.from) == Some(Piece::Pawn)
            || self.position.colors(!mover).has(cozy.to);

        self.position.play_unchecked(cozy);
        self.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        self.played.push(mv);
        self.hashes.push(self.position.hash());
        Ok(())
    }

    /// All legal moves in standard UCI form, sorted by their string form.
    pub fn legal_moves_uci(&self) -> Vec<UciMove> {
        let mut moves: Vec<UciMove> = self
            .cozy_legal_moves()
            .into_iter()
            .map(|mv| to_uci_move(&self.position, mv))
            .collect();
        moves.sort_by_cached_key(ToString::to_string);
        moves
    }

    /// Get the side to move
    pub fn side_to_move(&self) -> PieceColor {
        self.position.side_to_move().into()
    }

    pub fn is_check(&self) -> bool {
        !self.position.checkers().is_empty()
    }

    pub fn outcome(&self) -> Outcome {
        let has_moves = self.position.generate_moves(|_| true);
        if !has_moves {
            if self.is_check() {
                return Outcome::Checkmate {
                    winner: self.side_to_move().opponent(),
                };
            }
            return Outcome::Stalemate;
        }
        if insufficient_material(&self.position) {
            return Outcome::Draw(DrawReason::InsufficientMaterial);
        }
        if self.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES {
            return Outcome::Draw(DrawReason::SeventyFiveMoves);
        }
        if self.repetitions() >= FIVEFOLD {
            return Outcome::Draw(DrawReason::FivefoldRepetition);
        }
        Outcome::Ongoing
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome() != Outcome::Ongoing
    }

    /// Turn line shown to players, e.g. "White to move (Check)".
    pub fn status_text(&self) -> String {
        match self.outcome() {
            Outcome::Checkmate { winner } => format!("Checkmate | {} wins", winner.title()),
            Outcome::Stalemate => "Stalemate".to_string(),
            Outcome::Draw(_) => "Draw".to_string(),
            Outcome::Ongoing => {
                let turn = self.side_to_move().title();
                if self.is_check() {
                    format!("{} to move (Check)", turn)
                } else {
                    format!("{} to move", turn)
                }
            }
        }
    }

    pub fn score_text(&self) -> String {
        MaterialScore::of(&self.position).score_text()
    }

    /// Export position to FEN string
    pub fn to_fen(&self) -> String {
        crate::fen::format_fen(&self.position)
    }

    fn repetitions(&self) -> usize {
        let current = self.position.hash();
        self.hashes.iter().filter(|&&h| h == current).count()
    }

    fn cozy_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.position.generate_moves(|mvs| {
            moves.extend(mvs);
            false
        });
        moves
    }
}

impl Default for Game {
    fn default() -> Self {
        let position = Board::default();
        let hashes = vec![position.hash()];
        Self {
            position,
            start_fen: crate::fen::STARTING_FEN.to_string(),
            played: Vec::new(),
            hashes,
            halfmove_clock: 0,
        }
    }
}

/// Neither side can mate: bare kings, a single minor piece, or bishops that
/// all stand on one square color.
fn insufficient_material(board: &Board) -> bool {
    let heavy = board.pieces(Piece::Pawn) | board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
    if !heavy.is_empty() {
        return false;
    }

    let knights = board.pieces(Piece::Knight);
    let bishops = board.pieces(Piece::Bishop);
    if knights.len() + bishops.len() <= 1 {
        return true;
    }
    if !knights.is_empty() {
        return false;
    }

    let mut shades = bishops
        .into_iter()
        .map(|sq| (sq.file() as u8 + sq.rank() as u8) % 2);
    let first = shades.next();
    shades.all(|shade| Some(shade) == first)
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Illegal move at index {index}: {mv} on position {fen}")]
    IllegalMove {
        index: usize,
        mv: UciMove,
        fen: String,
    },
    #[error("Invalid FEN value: {0}")]
    FenError(#[from] crate::fen::FenError),
}
