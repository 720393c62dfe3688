//! # Directions of movement.
//!
//! Directions are relative to the moving side and can be read as the
//! hours of a clock with forward at twelve. Even hours pass through the
//! sides of a cell, odd hours through its vertices ("diagonals").
//!
//! Every direction has a fixed step in file and rank space for each side,
//! see [`Direction::step`]. The lattice is not symmetric under a simple
//! sign flip, so black's table is not the negation of white's, but both
//! tables step along the same twelve lines.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};
use strum::{FromRepr, VariantArray};

use crate::model::{Coord, Side};

#[allow(non_camel_case_types)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr, VariantArray, Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum Direction {
    FORWARD = 0,
    DIAGONAL_FORWARD_RIGHT = 1,
    FORWARD_RIGHT = 2,
    DIAGONAL_RIGHT = 3,
    BACKWARD_RIGHT = 4,
    DIAGONAL_BACKWARD_RIGHT = 5,
    BACKWARD = 6,
    DIAGONAL_BACKWARD_LEFT = 7,
    BACKWARD_LEFT = 8,
    DIAGONAL_LEFT = 9,
    FORWARD_LEFT = 10,
    DIAGONAL_FORWARD_LEFT = 11,
}

/// `(file delta, rank delta)` per side, in clock order.
#[rustfmt::skip]
const STEPS: [[(i8, i8); 12]; 2] = [
    [(0, 1), (1, 1), (1, 0), (2, -1), (1, -1), (1, -2),
     (0, -1), (-1, -2), (-1, -1), (-2, -1), (-1, 0), (-1, 1)],
    [(0, -1), (-1, -2), (-1, -1), (-2, -1), (-1, 0), (-1, 1),
     (0, 1), (1, 1), (1, 0), (2, -1), (1, -1), (1, -2)],
];

impl Direction {
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Position on the clock face, forward being twelve.
    pub fn hour(self) -> u8 {
        if self == Self::FORWARD { 12 } else { self as u8 }
    }

    /// Whether this direction passes through a vertex rather than a side.
    pub fn is_vertex(self) -> bool {
        self as u8 & 1 == 1
    }

    /// Single step in this direction for the given side.
    #[inline]
    pub fn step(self, side: Side) -> (i8, i8) {
        STEPS[side.ix()][self.ix()]
    }

    #[inline]
    pub fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// A set of directions as a bitmask indexed by [`Direction`] discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DirectionSet(u16);

impl DirectionSet {
    pub const EMPTY: Self = Self(0);
    /// The six directions through the sides of a cell.
    pub const SIDES: Self = Self(0b0101_0101_0101);
    /// The six directions through the vertices of a cell.
    pub const VERTICES: Self = Self(0b1010_1010_1010);
    pub const ALL: Self = Self(0b1111_1111_1111);
    pub const FORWARD: Self = Self(1 << Direction::FORWARD as u16);
    /// The two forward diagonals a pawn captures along.
    pub const FORWARD_DIAGONALS: Self = Self(
        1 << Direction::DIAGONAL_FORWARD_RIGHT as u16 | 1 << Direction::DIAGONAL_FORWARD_LEFT as u16,
    );

    #[inline]
    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn with(self, dir: Direction) -> Self {
        Self(self.0 | dir.bit())
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in clock order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::VARIANTS
            .iter()
            .copied()
            .filter(move |d| self.contains(*d))
    }
}

impl BitOr for DirectionSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

/// How a piece gets from one cell to another.
///
/// Knights do not move along lines, so their capability is a separate
/// variant rather than a reserved bit among the directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Sliding(DirectionSet),
    KnightLeap,
}

impl Capability {
    /// Whether a move with the given heading is within this capability.
    pub fn permits(self, heading: Heading) -> bool {
        match (self, heading) {
            (Self::Sliding(dirs), Heading::Ray(dir)) => dirs.contains(dir),
            (Self::KnightLeap, Heading::Leap) => true,
            _ => false,
        }
    }

    /// Sliding directions, empty for the knight.
    pub fn directions(self) -> DirectionSet {
        match self {
            Self::Sliding(dirs) => dirs,
            Self::KnightLeap => DirectionSet::EMPTY,
        }
    }
}

/// The geometric relation between two cells, see [`heading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Ray(Direction),
    Leap,
}

/// File and rank offsets of the eight knight leaps.
pub const KNIGHT_LEAPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Heading of a move from `from` to `to` by a piece of `side` with the
/// given movement capability.
///
/// For a knight this is [`Heading::Leap`] if the offset is one of
/// [`KNIGHT_LEAPS`]. Otherwise it is the direction whose step for `side`
/// is repeated a whole number of times to cover the offset, if any.
/// Whether the cells in between are empty is not considered.
pub fn heading(from: Coord, to: Coord, side: Side, movement: Capability) -> Option<Heading> {
    let df = to.file().ix() as i16 - from.file().ix() as i16;
    let dr = to.rank() as i16 - from.rank() as i16;

    if (df, dr) == (0, 0) {
        return None;
    }

    if movement == Capability::KnightLeap {
        let leap = KNIGHT_LEAPS.contains(&(df as i8, dr as i8));
        return leap.then_some(Heading::Leap);
    }

    Direction::VARIANTS
        .iter()
        .copied()
        .find(|d| {
            let (sf, sr) = d.step(side);
            let (sf, sr) = (sf as i16, sr as i16);
            let times = if sf != 0 { df / sf } else { dr / sr };
            times >= 1 && sf * times == df && sr * times == dr
        })
        .map(Heading::Ray)
}
