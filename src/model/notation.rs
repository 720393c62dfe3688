//! # Algebraic notation of moves.
//!
//! A move is written as the piece letter (none for pawns), the file
//! letters of other pieces that could also reach the destination, an `x`
//! when the destination is occupied, the destination label in lowercase
//! and the letter of the promoted kind, if any: `Nde3`, `xg6`, `f11Q`.
//!
//! Disambiguation scans the origin's file first and then its rank for
//! other pieces of the same kind, of either side, whose movement points at
//! the destination as seen by the mover. Whether their path is clear is
//! not considered. The *origin's* file letter is written once for every
//! such piece, so two of them give a doubled letter, as in `Ndde3`.

use std::fmt::Display;

use crate::model::{
    BoardState, Coord, PieceKind,
    direction::heading,
    topology::{file_cells, rank_cells},
};

/// The parts of a move's notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgMove {
    pub kind: PieceKind,
    pub origin: Coord,
    pub disambiguation: String,
    pub capture: bool,
    pub destination: Coord,
    pub promotion: Option<PieceKind>,
}

impl AlgMove {
    /// Describe moving the piece on `origin` to `destination`, as seen on
    /// the board before the move. `None` if `origin` is empty.
    pub fn describe(
        board: &BoardState,
        origin: Coord,
        destination: Coord,
        promotion: Option<PieceKind>,
    ) -> Option<Self> {
        let piece = board.piece_at(origin)?;

        let mut disambiguation = String::new();
        let letter = origin.file().letter().to_ascii_lowercase();
        let rivals = file_cells(origin.file()).chain(rank_cells(origin.rank()));

        for at in rivals.filter(|at| *at != origin) {
            let Some(rival) = board.piece_at(at) else {
                continue;
            };
            if rival.kind() != piece.kind() {
                continue;
            }
            let reaches = heading(at, destination, piece.side(), rival.movement())
                .is_some_and(|h| rival.movement().permits(h));
            if reaches {
                disambiguation.push(letter);
            }
        }

        Some(Self {
            kind: piece.kind(),
            origin,
            disambiguation,
            capture: board.is_occupied(destination),
            destination,
            promotion,
        })
    }
}

/// Short form, `{:#}` for the long form with the full origin, as in `Nd1-e3`.
impl Display for AlgMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.letter())?;
        if f.alternate() {
            let sep = if self.capture { "x" } else { "-" };
            write!(f, "{:#}{}", self.origin, sep)?;
        } else {
            write!(f, "{}", self.disambiguation)?;
            if self.capture {
                write!(f, "x")?;
            }
        }
        write!(f, "{:#}", self.destination)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind)?;
        }
        Ok(())
    }
}

/// Short notation of a move on the board before it is played. Just the
/// destination if `origin` is empty.
pub fn format(
    board: &BoardState,
    origin: Coord,
    destination: Coord,
    promotion: Option<PieceKind>,
) -> String {
    match AlgMove::describe(board, origin, destination, promotion) {
        Some(alg) => alg.to_string(),
        None => format!("{destination:#}"),
    }
}
