//! # The board-centric representation of a position.
//!
//! A [`BoardState`] is a separate slot for each of the 91 cells, indexed by
//! cell id, each slot exclusively owning the piece standing on it. It is
//! the authoritative record of where pieces are.
//!
//! Sets of cells, like the pawn starting cells of a side, are kept as
//! [`CellSet`] bit masks: 91 cells fit in a `u128`.

use std::{fmt::Display, ops::Index};

use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::{
    error::{Error, OutOfRange, Result},
    model::{
        CellColor, Coord, File, Piece, PieceKind, Setup, Side,
        topology::{self, ROW_LENGTHS},
    },
};

/// A set of cells as a bit mask over cell ids. Serialized as a list of labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Coord>", from = "Vec<Coord>")]
#[repr(transparent)]
pub struct CellSet(u128);

impl CellSet {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub fn contains(self, coord: Coord) -> bool {
        self.0 & 1u128 << coord.id() != 0
    }

    pub fn insert(&mut self, coord: Coord) {
        self.0 |= 1u128 << coord.id();
    }

    pub fn remove(&mut self, coord: Coord) {
        self.0 &= !(1u128 << coord.id());
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Coord> {
        topology::layout().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Coord> for CellSet {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        let mut res = Self::EMPTY;
        for coord in iter {
            res.insert(coord);
        }
        res
    }
}

impl From<CellSet> for Vec<Coord> {
    fn from(value: CellSet) -> Self {
        value.iter().collect()
    }
}

impl From<Vec<Coord>> for CellSet {
    fn from(value: Vec<Coord>) -> Self {
        value.into_iter().collect()
    }
}

/// One slot of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coord: Coord,
    color: CellColor,
    occupant: Option<Piece>,
}

impl Cell {
    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn id(&self) -> usize {
        self.coord.id()
    }

    pub fn color(&self) -> CellColor {
        self.color
    }

    pub fn occupant(&self) -> Option<&Piece> {
        self.occupant.as_ref()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    cells: Vec<Cell>,
    double_step: [CellSet; 2],
}

impl BoardState {
    /// A board without pieces and without pawn starting cells.
    pub fn empty() -> Self {
        let cells = topology::layout()
            .map(|coord| Cell {
                coord,
                color: coord.color(),
                occupant: None,
            })
            .collect();

        Self {
            cells,
            double_step: [CellSet::EMPTY; 2],
        }
    }

    /// Glinski's starting position.
    pub fn standard() -> Result<Self> {
        Self::from_setup(&Setup::glinski()?)
    }

    /// Place the pieces of a setup. Fails if two pieces share a cell.
    pub fn from_setup(setup: &Setup) -> Result<Self> {
        let mut board = Self::empty();

        for side in Side::VARIANTS.iter().copied() {
            let army = setup.army(side);
            board.double_step[side.ix()] = army.double_step.iter().copied().collect();

            for (&kind, cells) in &army.pieces {
                for &at in cells {
                    if board.place(side, kind, at).is_some() {
                        return Err(Error::OccupiedCell(at));
                    }
                }
            }
        }

        Ok(board)
    }

    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[coord.id()]
    }

    /// Case-insensitive lookup by label.
    pub fn get(&self, label: &str) -> Result<&Cell> {
        Ok(self.cell(label.parse::<Coord>()?))
    }

    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.cells[coord.id()].occupant.as_ref()
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.cells[coord.id()].occupant.is_some()
    }

    /// All cells in canonical order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells of the given file letter, in canonical order.
    pub fn file(&self, letter: char) -> Result<Vec<&Cell>> {
        let file = File::from_letter(letter).ok_or(OutOfRange::File(letter))?;
        Ok(self.cells().filter(|c| c.coord.file() == file).collect())
    }

    /// Cells of the given rank, in canonical order.
    pub fn rank(&self, rank: i32) -> Result<Vec<&Cell>> {
        let coords = topology::cells_on_rank(rank)?;
        Ok(coords.into_iter().map(|c| self.cell(c)).collect())
    }

    pub fn color(&self, color: CellColor) -> Vec<&Cell> {
        self.cells().filter(|c| c.color == color).collect()
    }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.cells()
            .filter_map(|c| c.occupant.as_ref())
            .filter(move |p| p.side() == side)
    }

    /// Cells from which pawns of `side` may advance two cells.
    pub fn double_step_cells(&self, side: Side) -> CellSet {
        self.double_step[side.ix()]
    }

    pub fn set_double_step_cells(&mut self, side: Side, cells: CellSet) {
        self.double_step[side.ix()] = cells;
    }

    /// Put a new piece on a cell, returning the piece it displaces.
    /// The new piece takes the id of the cell.
    pub fn place(&mut self, side: Side, kind: PieceKind, at: Coord) -> Option<Piece> {
        let piece = Piece::new(at.id() as u8, side, kind, at);
        self.cells[at.id()].occupant.replace(piece)
    }

    /// Take the piece off a cell.
    pub fn remove(&mut self, at: Coord) -> Option<Piece> {
        self.cells[at.id()].occupant.take()
    }

    /// Put an existing piece on a cell, keeping its coordinate in sync,
    /// and return the piece it displaces.
    pub(crate) fn put(&mut self, at: Coord, mut piece: Piece) -> Option<Piece> {
        piece.relocate(at);
        self.cells[at.id()].occupant.replace(piece)
    }
}

impl Index<Coord> for BoardState {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        self.cell(index)
    }
}

/// One line per row of the layout, black at the top, `.` for empty cells.
impl Display for BoardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut cells = self.cells.iter();
        for len in ROW_LENGTHS {
            write!(f, "{:indent$}", "", indent = (6 - len) * 2)?;
            for (i, cell) in cells.by_ref().take(len).enumerate() {
                if i > 0 {
                    write!(f, "   ")?;
                }
                match &cell.occupant {
                    Some(piece) => write!(f, "{}", piece)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
