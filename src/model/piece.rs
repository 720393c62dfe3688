//! Chessmen and what they are capable of.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::model::{Capability, Coord, DirectionSet, PieceKind, Side};

impl PieceKind {
    /// Directions this kind moves in.
    pub fn movement(self) -> Capability {
        use PieceKind::*;
        match self {
            PAWN => Capability::Sliding(DirectionSet::FORWARD),
            KNIGHT => Capability::KnightLeap,
            BISHOP => Capability::Sliding(DirectionSet::VERTICES),
            ROOK => Capability::Sliding(DirectionSet::SIDES),
            QUEEN | KING => Capability::Sliding(DirectionSet::ALL),
        }
    }

    /// Directions this kind captures in. Only pawns differ from [`PieceKind::movement`].
    pub fn attack(self) -> Capability {
        match self {
            PieceKind::PAWN => Capability::Sliding(DirectionSet::FORWARD_DIAGONALS),
            other => other.movement(),
        }
    }

    /// How many cells this kind may slide at most, `None` for unbounded.
    ///
    /// The pawn's advance depends on where it stands, see
    /// [`crate::model::movegen::pawn_advances`].
    pub fn reach(self) -> Option<u8> {
        match self {
            PieceKind::KING | PieceKind::PAWN => Some(1),
            _ => None,
        }
    }
}

/// A chessman on the board.
///
/// The coordinate is a copy of where the board keeps the piece, updated by
/// the board when it moves the piece. The board is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    id: u8,
    side: Side,
    kind: PieceKind,
    movement: Capability,
    attack: Capability,
    coord: Coord,
}

impl Piece {
    /// A piece with the presets of its kind. The id is conventionally the
    /// id of the cell it starts on.
    pub fn new(id: u8, side: Side, kind: PieceKind, coord: Coord) -> Self {
        Self {
            id,
            side,
            kind,
            movement: kind.movement(),
            attack: kind.attack(),
            coord,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn movement(&self) -> Capability {
        self.movement
    }

    pub fn attack(&self) -> Capability {
        self.attack
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.side != other.side
    }

    /// Replace kind and capabilities in place, keeping id and side.
    pub(crate) fn promote(&mut self, kind: PieceKind) {
        self.kind = kind;
        self.movement = kind.movement();
        self.attack = kind.attack();
    }

    pub(crate) fn relocate(&mut self, coord: Coord) {
        self.coord = coord;
    }
}

/// Uppercase letter for white, lowercase for black.
impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.side {
            Side::WHITE => write!(f, "{}", self.kind),
            Side::BLACK => write!(f, "{:#}", self.kind),
        }
    }
}
