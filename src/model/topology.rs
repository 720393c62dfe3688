//! # The shape of the board.
//!
//! The board is a hexagon of 91 hexagonal cells. Cells are addressed by
//! a file letter `A` ... `L`, skipping `J`, and a rank counted from 1 at
//! the white edge of the file. The center file `F` has eleven ranks and
//! the outermost files `A` and `L` have six.
//!
//! Cell ids follow the canonical layout [`LAYOUT`]: row by row from the
//! single cell at the black pole (`F11`) to the single cell at the white
//! pole (`F1`), each row left to right. Notation and any front end agree
//! on cell identity through this exact order, so it is written out by
//! hand rather than computed.
//!
//! Stepping treats the eleven files as the contiguous range `0..=10`, so
//! one file to the right of `I` is `K`.

use std::{fmt::Display, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{FromRepr, VariantArray};

use crate::{
    error::OutOfRange,
    model::{CellColor, Side},
};

/// The files, with discriminants as contiguous indices.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr, VariantArray, Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
    K = 9,
    L = 10,
}

const FILE_LETTERS: [char; 11] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L'];

const RANKS_PER_FILE: [u8; 11] = [6, 7, 8, 9, 10, 11, 10, 9, 8, 7, 6];

impl File {
    /// Use this file as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// File at a contiguous index, if any.
    pub fn from_ix(ix: i16) -> Option<Self> {
        u8::try_from(ix).ok().and_then(Self::from_repr)
    }

    /// Case-insensitive lookup of a file letter. `J` is not a file.
    pub fn from_letter(letter: char) -> Option<Self> {
        let letter = letter.to_ascii_uppercase();
        FILE_LETTERS
            .iter()
            .position(|&l| l == letter)
            .and_then(|ix| Self::from_repr(ix as u8))
    }

    /// Uppercase letter of this file.
    pub fn letter(self) -> char {
        FILE_LETTERS[self.ix()]
    }

    /// Number of ranks on this file.
    pub fn ranks(self) -> u8 {
        RANKS_PER_FILE[self.ix()]
    }
}

macro_rules! cells {
    ($($file:ident $rank:literal)*) => {
        [$((File::$file, $rank)),*]
    };
}

/// The canonical layout. The index of a cell in this table is its id.
#[rustfmt::skip]
pub const LAYOUT: [(File, u8); 91] = cells![
                        F 11
                    E 10    G 10
                D 9     F 10    H 9
            C 8     E 9     G 9     I 8
        B 7     D 8     F 9     H 8     K 7
    A 6     C 7     E 8     G 8     I 7     L 6
        B 6     D 7     F 8     H 7     K 6
    A 5     C 6     E 7     G 7     I 6     L 5
        B 5     D 6     F 7     H 6     K 5
    A 4     C 5     E 6     G 6     I 5     L 4
        B 4     D 5     F 6     H 5     K 4
    A 3     C 4     E 5     G 5     I 4     L 3
        B 3     D 4     F 5     H 4     K 3
    A 2     C 3     E 4     G 4     I 3     L 2
        B 2     D 3     F 4     H 3     K 2
    A 1     C 2     E 3     G 3     I 2     L 1
        B 1     D 2     F 3     H 2     K 1
            C 1     E 2     G 2     I 1
                D 1     F 2     H 1
                    E 1     G 1
                        F 1
];

/// Number of cells in each row of [`LAYOUT`].
pub const ROW_LENGTHS: [usize; 21] = [1, 2, 3, 4, 5, 6, 5, 6, 5, 6, 5, 6, 5, 6, 5, 6, 5, 4, 3, 2, 1];

/// Number of cells on the board.
pub const CELL_COUNT: usize = LAYOUT.len();

struct Tables {
    rows: [u8; CELL_COUNT],
    grid: [[Option<Coord>; 11]; 11],
}

impl Tables {
    fn build() -> Self {
        let mut rows = [0u8; CELL_COUNT];
        let mut id = 0;
        for (row, &len) in ROW_LENGTHS.iter().enumerate() {
            for _ in 0..len {
                rows[id] = row as u8;
                id += 1;
            }
        }

        let mut grid = [[None; 11]; 11];
        for (id, &(file, rank)) in LAYOUT.iter().enumerate() {
            grid[file.ix()][rank as usize - 1] = Some(Coord(id as u8));
        }

        Self { rows, grid }
    }
}

static TABLES: LazyLock<Tables> = LazyLock::new(Tables::build);

static LABEL: LazyLock<Regex> = LazyLock::new(label_regex);

fn label_regex() -> Regex {
    Regex::new(r"^([A-Za-z])([1-9][0-9]?)$").expect("coordinate pattern is valid")
}

/// A cell of the board, represented by its id in [`LAYOUT`].
///
/// Every value of this type is one of the 91 cells; labels are
/// checked when parsed. Serialized as its canonical label.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
#[repr(transparent)]
pub struct Coord(u8);

impl Coord {
    /// The cell at the given file and rank, if there is one.
    pub fn new(file: File, rank: u8) -> Option<Self> {
        if rank == 0 || rank > file.ranks() {
            None
        } else {
            TABLES.grid[file.ix()][rank as usize - 1]
        }
    }

    /// The cell with the given id.
    pub fn from_id(id: usize) -> Option<Self> {
        (id < CELL_COUNT).then_some(Self(id as u8))
    }

    /// Stable id of this cell, its position in [`LAYOUT`].
    #[inline]
    pub fn id(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn file(self) -> File {
        LAYOUT[self.id()].0
    }

    #[inline]
    pub fn rank(self) -> u8 {
        LAYOUT[self.id()].1
    }

    /// Row of the canonical layout, 0 being the black pole.
    pub fn row(self) -> usize {
        TABLES.rows[self.id()] as usize
    }

    pub fn color(self) -> CellColor {
        color_of(self.row())
    }

    /// Shift by a number of files and ranks. `None` if that leaves the board.
    pub fn step(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = File::from_ix(self.file().ix() as i16 + file_delta as i16)?;
        let rank = u8::try_from(self.rank() as i16 + rank_delta as i16).ok()?;
        Self::new(file, rank)
    }

    /// Whether this is the last cell of its file in the direction `side` advances.
    pub fn is_far_edge(self, side: Side) -> bool {
        match side {
            Side::WHITE => self.rank() == self.file().ranks(),
            Side::BLACK => self.rank() == 1,
        }
    }
}

/// Uppercase label, or lowercase with `{:#}`.
impl Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = self.file().letter();
        if f.alternate() {
            write!(f, "{}{}", letter.to_ascii_lowercase(), self.rank())
        } else {
            write!(f, "{}{}", letter, self.rank())
        }
    }
}

impl std::fmt::Debug for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// Case-insensitive. The rank is everything after the file letter,
/// so `F1` and `F11` are told apart.
impl FromStr for Coord {
    type Err = OutOfRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OutOfRange::Cell(s.to_uppercase());
        let caps = LABEL.captures(s).ok_or_else(invalid)?;
        let file = caps[1]
            .chars()
            .next()
            .and_then(File::from_letter)
            .ok_or_else(invalid)?;
        let rank = caps[2].parse::<u8>().map_err(|_| invalid())?;
        Self::new(file, rank).ok_or_else(invalid)
    }
}

impl From<Coord> for String {
    fn from(value: Coord) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Coord {
    type Error = OutOfRange;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// All cells in canonical order.
pub fn layout() -> impl ExactSizeIterator<Item = Coord> {
    (0..CELL_COUNT as u8).map(Coord)
}

/// Id of the cell with the given label.
pub fn id_of(label: &str) -> Result<usize, OutOfRange> {
    label.parse::<Coord>().map(Coord::id)
}

/// Whether a raw label names a cell of the board.
pub fn is_on_board(label: &str) -> bool {
    label.parse::<Coord>().is_ok()
}

/// Shift a cell by files and ranks, see [`Coord::step`].
pub fn step(coord: Coord, file_delta: i8, rank_delta: i8) -> Option<Coord> {
    coord.step(file_delta, rank_delta)
}

/// Cells of a file in canonical order.
pub fn cells_on_file(letter: char) -> Result<Vec<Coord>, OutOfRange> {
    let file = File::from_letter(letter).ok_or(OutOfRange::File(letter))?;
    Ok(file_cells(file).collect())
}

/// Cells of a rank in canonical order.
pub fn cells_on_rank(rank: i32) -> Result<Vec<Coord>, OutOfRange> {
    let rank = u8::try_from(rank)
        .ok()
        .filter(|r| (1..=11).contains(r))
        .ok_or(OutOfRange::Rank(rank))?;
    Ok(rank_cells(rank).collect())
}

pub(crate) fn file_cells(file: File) -> impl Iterator<Item = Coord> {
    layout().filter(move |c| c.file() == file)
}

pub(crate) fn rank_cells(rank: u8) -> impl Iterator<Item = Coord> {
    layout().filter(move |c| c.rank() == rank)
}

/// Shade of a row of the canonical layout.
pub fn color_of(row: usize) -> CellColor {
    match row % 3 {
        0 => CellColor::DARK,
        1 => CellColor::MEDIUM,
        _ => CellColor::LIGHT,
    }
}

/// Valid ranks of every file, e.g. `A(1-6), B(1-7), ...`.
pub fn rank_spans() -> String {
    File::VARIANTS
        .iter()
        .map(|f| format!("{}(1-{})", f.letter(), f.ranks()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn layout_is_exhaustive() {
        assert_eq!(CELL_COUNT, 91);
        assert_eq!(ROW_LENGTHS.iter().sum::<usize>(), 91);

        let cells: HashSet<_> = LAYOUT.iter().copied().collect();
        assert_eq!(cells.len(), 91);

        for file in File::VARIANTS {
            for rank in 1..=file.ranks() {
                assert!(cells.contains(&(*file, rank)), "{}{}", file.letter(), rank);
            }
        }
    }

    #[test]
    fn ids_are_a_bijection() {
        for (ix, coord) in layout().enumerate() {
            assert_eq!(coord.id(), ix);
            assert_eq!(id_of(&coord.to_string()), Ok(ix));
            assert_eq!(Coord::from_id(ix), Some(coord));
        }
        assert_eq!(Coord::from_id(91), None);
        assert_eq!(id_of("F11"), Ok(0));
        assert_eq!(id_of("F1"), Ok(90));
        assert_eq!(id_of("F011"), Err(OutOfRange::Cell("F011".to_string())));
    }

    #[test]
    fn labels_parse_case_insensitively() {
        let coord: Coord = "f11".parse().unwrap();
        assert_eq!(coord.to_string(), "F11");
        assert_eq!(format!("{:#}", coord), "f11");
        assert_eq!("F1".parse::<Coord>().unwrap().rank(), 1);
        assert_eq!("F10".parse::<Coord>().unwrap().rank(), 10);
    }

    #[test]
    fn off_board_labels_are_rejected() {
        for label in [
            "M1", "J5", "F12", "A0", "A7", "L7", "", "F", "5F", "F-1", "F999", "F05", "F011", "A00",
        ] {
            assert!(!is_on_board(label), "{label}");
        }
        for label in ["A1", "a6", "L6", "F11", "k7"] {
            assert!(is_on_board(label), "{label}");
        }
    }

    #[test]
    fn out_of_range_lists_the_spans() {
        let err = id_of("j5").unwrap_err();
        assert_eq!(err, OutOfRange::Cell("J5".to_string()));
        let msg = err.to_string();
        assert!(msg.contains("A(1-6)"));
        assert!(msg.contains("F(1-11)"));
        assert!(msg.contains("L(1-6)"));
        assert!(msg.contains("J5"));
    }

    #[test]
    fn files_and_ranks() {
        assert_eq!(cells_on_file('F').unwrap().len(), 11);
        assert_eq!(cells_on_file('a').unwrap().len(), 6);
        assert_eq!(cells_on_file('K').unwrap().len(), 7);
        assert_eq!(cells_on_file('J'), Err(OutOfRange::File('J')));
        assert_eq!(cells_on_file('M'), Err(OutOfRange::File('M')));

        let first = cells_on_rank(1).unwrap();
        assert_eq!(first.len(), 11);
        let files: HashSet<_> = first.iter().map(|c| c.file()).collect();
        assert_eq!(files.len(), 11);

        assert_eq!(cells_on_rank(11).unwrap(), vec!["F11".parse().unwrap()]);
        assert_eq!(cells_on_rank(0), Err(OutOfRange::Rank(0)));
        assert_eq!(cells_on_rank(12), Err(OutOfRange::Rank(12)));
    }

    #[test]
    fn colors_partition_the_board() {
        let mut counts = [0; 3];
        for coord in layout() {
            counts[coord.color() as usize] += 1;
            assert_eq!(coord.color(), color_of(coord.row() + 3));
        }
        assert_eq!(counts, [30, 31, 30]);
        assert_eq!(color_of(0), CellColor::DARK);
        assert_eq!(color_of(1), CellColor::MEDIUM);
        assert_eq!(color_of(2), CellColor::LIGHT);
    }

    #[test]
    fn rows_follow_the_layout() {
        let f11: Coord = "F11".parse().unwrap();
        let f1: Coord = "F1".parse().unwrap();
        assert_eq!(f11.row(), 0);
        assert_eq!(f1.row(), 20);
        assert_eq!("A6".parse::<Coord>().unwrap().row(), 5);
        assert_eq!("L1".parse::<Coord>().unwrap().row(), 15);
    }

    #[test]
    fn stepping() {
        let c = |s: &str| s.parse::<Coord>().unwrap();
        assert_eq!(step(c("F6"), 1, 0), Some(c("G6")));
        assert_eq!(step(c("I5"), 1, 0), Some(c("K5")));
        assert_eq!(step(c("K5"), -1, 0), Some(c("I5")));
        assert_eq!(step(c("A1"), -1, 0), None);
        assert_eq!(step(c("F11"), 0, 1), None);
        assert_eq!(step(c("A6"), 1, 1), Some(c("B7")));
        assert_eq!(step(c("B7"), 0, 1), None);
        assert_eq!(step(c("F1"), 0, -1), None);
    }

    #[test]
    fn far_edges() {
        let c = |s: &str| s.parse::<Coord>().unwrap();
        assert!(c("F11").is_far_edge(Side::WHITE));
        assert!(c("A6").is_far_edge(Side::WHITE));
        assert!(!c("A5").is_far_edge(Side::WHITE));
        assert!(c("K1").is_far_edge(Side::BLACK));
        assert!(!c("K1").is_far_edge(Side::WHITE));
    }
}
