//! # Hexagonal chess.
//!
//! Rules engine for Glinski's hexagonal chess: the 91-cell board,
//! movement by direction sets, ray casting, pawn double steps and en
//! passant, turn sequencing and algebraic notation.
//!
//! The [`model`] module holds the engine proper. The [`session`] module
//! holds the registries of games and players that a host application
//! shares between its connections.

pub mod error;
pub mod model;
pub mod session;

pub use error::{Error, OutOfRange, Result};
