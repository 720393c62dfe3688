use crate::{
    model::{Coord, PieceKind, PlayerId, Side, topology::rank_spans},
    session::GameId,
};

/// A coordinate, file letter or rank number that is not part of the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutOfRange {
    #[error("invalid cell notation, valid cells are: {spans}. {0} was provided instead", spans = rank_spans())]
    Cell(String),
    #[error("invalid file character {0:?}, it should be between A and L, and not J")]
    File(char),
    #[error("invalid rank number {0}, it should be between 1 and 11")]
    Rank(i32),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),

    #[error("cell {0} does not contain a piece")]
    EmptyOrigin(Coord),

    #[error("pieces on {origin} and {destination} are of the same side")]
    FriendlyCapture { origin: Coord, destination: Coord },

    #[error("{0} is not the side to move")]
    OutOfTurn(Side),

    #[error("illegal move {notation}")]
    IllegalMove { notation: String },

    #[error("a pawn cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    #[error("the game has already finished")]
    GameFinished,

    #[error("setup places more than one piece on {0}")]
    OccupiedCell(Coord),

    #[error("invalid setup: {0}")]
    Setup(#[from] toml::de::Error),

    #[error("no game with id {0}")]
    GameNotFound(GameId),

    #[error("no player with id {0}")]
    PlayerNotFound(PlayerId),
}

pub type Result<T> = std::result::Result<T, Error>;
