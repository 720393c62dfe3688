//! # Destination generation.
//!
//! Everything here is a pure function of the board and the last move
//! played; the board is never mutated. Sliders cast a ray per permitted
//! direction, knights leap, and pawns combine a blocked advance with
//! diagonal captures and en passant.
//!
//! Destinations are pushed into a caller-provided buffer in the order
//! the directions are tried, clock-wise from forward.

use crate::model::{
    BoardState, Capability, Coord, Direction, Move, Piece, PieceKind, Side,
    direction::KNIGHT_LEAPS,
};

/// Legal destinations of the piece on `from`, empty if there is none.
///
/// `last` is the most recent move of the game, needed for en passant.
pub fn destinations(board: &BoardState, from: Coord, last: Option<&Move>) -> Vec<Coord> {
    let mut res = Vec::with_capacity(32);
    destinations_into(board, from, last, &mut res);
    res
}

pub fn destinations_into(
    board: &BoardState,
    from: Coord,
    last: Option<&Move>,
    buffer: &mut Vec<Coord>,
) {
    let Some(piece) = board.piece_at(from) else {
        return;
    };

    match (piece.kind(), piece.movement()) {
        (PieceKind::PAWN, _) => {
            pawn_advances(board, piece, buffer);
            pawn_captures(board, piece, last, buffer);
        }
        (_, Capability::KnightLeap) => knight_leaps(board, piece, buffer),
        (kind, Capability::Sliding(dirs)) => {
            for dir in dirs.iter() {
                ray(board, from, piece.side(), dir, true, kind.reach(), buffer);
            }
        }
    }
}

/// Walk from `from` (exclusive) in `dir` as seen by `side`.
///
/// The walk ends before leaving the board, after `max` cells, or at the
/// first occupied cell. That cell is pushed only if `captures` is set and
/// it holds a piece of the other side.
pub fn ray(
    board: &BoardState,
    from: Coord,
    side: Side,
    dir: Direction,
    captures: bool,
    max: Option<u8>,
    buffer: &mut Vec<Coord>,
) {
    let (df, dr) = dir.step(side);
    let mut at = from;
    let mut steps = 0u8;

    while max.is_none_or(|m| steps < m) {
        let Some(next) = at.step(df, dr) else {
            break;
        };
        steps += 1;

        match board.piece_at(next) {
            None => buffer.push(next),
            Some(occupant) => {
                if captures && occupant.side() != side {
                    buffer.push(next);
                }
                break;
            }
        }
        at = next;
    }
}

/// The on-board leaps of a knight, minus cells held by its own side.
pub fn knight_leaps(board: &BoardState, knight: &Piece, buffer: &mut Vec<Coord>) {
    for (df, dr) in KNIGHT_LEAPS {
        let Some(to) = knight.coord().step(df, dr) else {
            continue;
        };
        match board.piece_at(to) {
            Some(occupant) if occupant.side() == knight.side() => {}
            _ => buffer.push(to),
        }
    }
}

/// Forward steps without capturing, two from a double step cell.
pub fn pawn_advances(board: &BoardState, pawn: &Piece, buffer: &mut Vec<Coord>) {
    let side = pawn.side();
    let reach = if board.double_step_cells(side).contains(pawn.coord()) {
        2
    } else {
        1
    };
    ray(board, pawn.coord(), side, Direction::FORWARD, false, Some(reach), buffer);
}

/// Forward diagonals holding an enemy piece, or passed by an enemy pawn's
/// double step on the last move.
pub fn pawn_captures(
    board: &BoardState,
    pawn: &Piece,
    last: Option<&Move>,
    buffer: &mut Vec<Coord>,
) {
    let side = pawn.side();
    for dir in pawn.attack().directions().iter() {
        let (df, dr) = dir.step(side);
        let Some(target) = pawn.coord().step(df, dr) else {
            continue;
        };

        let hit = match board.piece_at(target) {
            Some(occupant) => occupant.side() != side,
            None => en_passant_victim(side, target, last).is_some(),
        };
        if hit {
            buffer.push(target);
        }
    }
}

/// Where the pawn captured en passant on `target` stands, if a pawn of
/// `side` moving to `target` would capture one.
///
/// That is the case when the last move was an enemy pawn stepping from
/// one cell ahead of `target` to one cell behind it, as seen by `side`.
pub fn en_passant_victim(side: Side, target: Coord, last: Option<&Move>) -> Option<Coord> {
    let last = last?;
    if last.piece().kind() != PieceKind::PAWN || last.piece().side() == side {
        return None;
    }

    let (df, dr) = Direction::FORWARD.step(side);
    let ahead = target.step(df, dr)?;
    let behind = target.step(-df, -dr)?;

    (last.origin() == ahead && last.destination() == behind).then_some(behind)
}
