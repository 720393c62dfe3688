//! # Modeling the game of hexagonal chess.
//!
//! This module contains enums naming the values of the game,
//! as well as the board, the move generator and the turn engine
//! in its sub-modules.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum::{EnumIs, FromRepr, VariantArray};

pub mod board;
pub mod direction;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod piece;
pub mod player;
pub mod setup;
pub mod topology;

pub use board::{BoardState, Cell, CellSet};
pub use direction::{Capability, Direction, DirectionSet, Heading};
pub use game::{GameState, Move};
pub use piece::Piece;
pub use player::{Player, PlayerId};
pub use setup::Setup;
pub use topology::{Coord, File};

/// Representation of the color of a player or chessman.
///
/// The discriminants are used for indexing arrays of the
/// form `[<white value>, <black value>]`.
#[allow(non_camel_case_types)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, VariantArray, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Side {
    WHITE = 0,
    BLACK = 1,
}

impl Side {
    /// Opposing side.
    #[inline]
    pub fn opp(self) -> Self {
        match self {
            Self::WHITE => Self::BLACK,
            Self::BLACK => Self::WHITE,
        }
    }

    /// Associated array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WHITE => write!(f, "white"),
            Self::BLACK => write!(f, "black"),
        }
    }
}

/// Representation of the kinds of chessmen.
///
/// The discriminants are one more than the array index, leaving
/// zero free, in the same order as the usual piece values.
#[allow(non_camel_case_types)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, VariantArray, FromRepr,
    Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    PAWN = 1,
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
    KING = 6,
}

impl PieceKind {
    /// Use as an array index: equal to one less than the discriminant value.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize - 1
    }

    /// Prefix of this kind in algebraic notation. Pawns have none.
    pub fn letter(self) -> &'static str {
        ["", "N", "B", "R", "Q", "K"][self.ix()]
    }

    /// Whether a pawn may promote to this kind.
    pub fn is_promotion(self) -> bool {
        !matches!(self, Self::PAWN | Self::KING)
    }
}

/// Uppercase letter, or lowercase with `{:#}`.
impl Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arr = if f.alternate() {
            ["p", "n", "b", "r", "q", "k"]
        } else {
            ["P", "N", "B", "R", "Q", "K"]
        };
        write!(f, "{}", arr[self.ix()])
    }
}

/// The three shades of the board.
///
/// Every row of the canonical layout has a single shade, cycling
/// dark, medium, light from the black pole.
#[allow(non_camel_case_types)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray, FromRepr, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CellColor {
    DARK = 0,
    MEDIUM = 1,
    LIGHT = 2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_alternate() {
        for side in Side::VARIANTS {
            assert_ne!(side.opp(), *side);
            assert_eq!(side.opp().opp(), *side);
        }
        assert_eq!(Side::WHITE.to_string(), "white");
    }

    #[test]
    fn piece_letters() {
        let letters: String = PieceKind::VARIANTS.iter().map(|k| k.letter()).collect();
        assert_eq!(letters, "NBRQK");
        assert_eq!(format!("{}{:#}", PieceKind::KNIGHT, PieceKind::KNIGHT), "Nn");
        assert!(PieceKind::QUEEN.is_promotion());
        assert!(!PieceKind::KING.is_promotion());
        assert!(!PieceKind::PAWN.is_promotion());
    }
}
