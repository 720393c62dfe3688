//! # Turn sequencing.
//!
//! A [`GameState`] owns a board, whose turn it is and the history of
//! moves played. [`GameState::play_turn`] validates a move completely
//! before touching the board, so a rejected move leaves the game as it
//! was.
//!
//! There is no check, checkmate or stalemate detection. A game ends when
//! [`GameState::finish`] is called, which runs the completion callback a
//! host registered with [`GameState::with_on_finish`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    model::{
        BoardState, Coord, Heading, Piece, PieceKind, Player, PlayerId, Setup, Side,
        direction::heading, movegen, notation,
    },
};

/// A move that has been played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    origin: Coord,
    destination: Coord,
    /// The moving piece as it was before the move.
    piece: Piece,
    /// The moving piece as it stands on the destination.
    after: Piece,
    captured: Option<Piece>,
    promotion: Option<PieceKind>,
    notation: String,
}

impl Move {
    pub fn new(
        origin: Coord,
        destination: Coord,
        piece: Piece,
        captured: Option<Piece>,
        promotion: Option<PieceKind>,
        notation: String,
    ) -> Self {
        let mut after = piece;
        after.relocate(destination);
        if let Some(kind) = promotion {
            after.promote(kind);
        }
        Self {
            origin,
            destination,
            piece,
            after,
            captured,
            promotion,
            notation,
        }
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn destination(&self) -> Coord {
        self.destination
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn after(&self) -> &Piece {
        &self.after
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn captured(&self) -> Option<&Piece> {
        self.captured.as_ref()
    }

    pub fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }
}

pub type OnFinish = Arc<dyn Fn() + Send + Sync>;

#[derive(Serialize)]
pub struct GameState {
    board: BoardState,
    turn: Side,
    players: Option<(Player, Player)>,
    history: Vec<Move>,
    finished: bool,
    #[serde(skip)]
    on_finish: Option<OnFinish>,
}

impl GameState {
    /// A game from Glinski's starting position, white to move.
    pub fn new() -> Result<Self> {
        Self::from_setup(&Setup::glinski()?)
    }

    pub fn from_setup(setup: &Setup) -> Result<Self> {
        Ok(Self::from_board(BoardState::from_setup(setup)?))
    }

    pub fn from_board(board: BoardState) -> Self {
        Self {
            board,
            turn: Side::WHITE,
            players: None,
            history: Vec::new(),
            finished: false,
            on_finish: None,
        }
    }

    /// Register the callback run once when the game finishes.
    pub fn with_on_finish(mut self, on_finish: OnFinish) -> Self {
        self.on_finish = Some(on_finish);
        self
    }

    /// A copy of the game without its completion callback, see [`Clone`].
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn players(&self) -> Option<&(Player, Player)> {
        self.players.as_ref()
    }

    /// Seat a white and a black player, replacing any seated before.
    pub fn add_players(&mut self, white: Player, black: Player) {
        log::debug!("seating {} as white and {} as black", white.id(), black.id());
        self.players = Some((white, black));
    }

    /// The side a player represents in this game, if any.
    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        let (white, black) = self.players.as_ref()?;
        if white.id() == player {
            Some(Side::WHITE)
        } else if black.id() == player {
            Some(Side::BLACK)
        } else {
            None
        }
    }

    /// Where the piece on `origin` may move, see [`movegen::destinations`].
    pub fn destinations(&self, origin: Coord) -> Vec<Coord> {
        movegen::destinations(&self.board, origin, self.last_move())
    }

    /// Notation of moving from `origin` to `destination` in the current position.
    pub fn notation(&self, origin: Coord, destination: Coord) -> String {
        notation::format(&self.board, origin, destination, None)
    }

    /// Move the piece on `origin` to `destination`, promoting pawns to a queen.
    pub fn play_turn(&mut self, origin: Coord, destination: Coord) -> Result<&Move> {
        self.play_turn_promoting(origin, destination, None)
    }

    /// Move the piece on `origin` to `destination`. A pawn reaching the far
    /// edge of its file becomes `promotion`, or a queen if that is `None`.
    /// The promotion is ignored for any other move.
    pub fn play_turn_promoting(
        &mut self,
        origin: Coord,
        destination: Coord,
        promotion: Option<PieceKind>,
    ) -> Result<&Move> {
        if self.finished {
            return Err(Error::GameFinished);
        }

        let piece = *self.board.piece_at(origin).ok_or(Error::EmptyOrigin(origin))?;
        let side = piece.side();

        if let Some(target) = self.board.piece_at(destination) {
            if target.side() == side {
                return Err(Error::FriendlyCapture {
                    origin,
                    destination,
                });
            }
        }

        if side != self.turn {
            return Err(Error::OutOfTurn(side));
        }

        let last = self.history.last();
        let dir = heading(origin, destination, side, piece.movement())
            .filter(|h| piece.movement().permits(*h) || piece.attack().permits(*h));
        let reachable = movegen::destinations(&self.board, origin, last).contains(&destination);

        if dir.is_none() || !reachable {
            let notation = notation::format(&self.board, origin, destination, None);
            log::debug!("rejected {notation} for {side}");
            return Err(Error::IllegalMove { notation });
        }

        let promotion = if piece.kind() == PieceKind::PAWN && destination.is_far_edge(side) {
            let kind = promotion.unwrap_or(PieceKind::QUEEN);
            if !kind.is_promotion() {
                return Err(Error::InvalidPromotion(kind));
            }
            Some(kind)
        } else {
            None
        };

        let en_passant = match dir {
            Some(Heading::Ray(d))
                if piece.kind() == PieceKind::PAWN
                    && piece.attack().directions().contains(d)
                    && !self.board.is_occupied(destination) =>
            {
                movegen::en_passant_victim(side, destination, last)
            }
            _ => None,
        };

        let notation = notation::format(&self.board, origin, destination, promotion);

        let mv = Move::new(origin, destination, piece, None, promotion, notation);
        let captured = self.board.remove(en_passant.unwrap_or(destination));
        self.board.remove(origin);
        self.board.put(destination, *mv.after());
        self.turn = self.turn.opp();

        log::debug!("{side} played {}", mv.notation());
        if let Some(victim) = en_passant {
            log::trace!("captured en passant on {victim}");
        }

        let ix = self.history.len();
        self.history.push(Move { captured, ..mv });
        Ok(&self.history[ix])
    }

    /// End the game. Runs the completion callback the first time.
    /// Returns whether the game was still running.
    pub fn finish(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        log::info!("game finished after {} moves", self.history.len());
        if let Some(on_finish) = self.on_finish.take() {
            on_finish();
        }
        true
    }
}

/// Copies leave the completion callback behind: only the game a host
/// registered may signal its completion.
impl Clone for GameState {
    fn clone(&self) -> Self {
        Self {
            board: self.board.clone(),
            turn: self.turn,
            players: self.players.clone(),
            history: self.history.clone(),
            finished: self.finished,
            on_finish: None,
        }
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("turn", &self.turn)
            .field("players", &self.players)
            .field("history", &self.history)
            .field("finished", &self.finished)
            .field("on_finish", &self.on_finish.is_some())
            .finish_non_exhaustive()
    }
}
