//! Starting positions.
//!
//! A setup is a TOML document with one table per side:
//!
//! ```toml
//! [white]
//! double_step = ["B1", "C2"]
//!
//! [white.pieces]
//! king = ["G1"]
//! pawn = ["B1", "C2"]
//! ```
//!
//! Glinski's position is embedded in the library, see [`Setup::glinski`].

use include_flate::flate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    model::{Coord, PieceKind, Side},
};

flate!(static GLINSKI: str from "setup/glinski.toml");

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Setup {
    #[serde(default)]
    pub white: Army,
    #[serde(default)]
    pub black: Army,
}

/// Pieces and pawn starting cells of one side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Army {
    /// Cells from which a pawn may advance two cells.
    #[serde(default)]
    pub double_step: Vec<Coord>,
    #[serde(default)]
    pub pieces: IndexMap<PieceKind, Vec<Coord>>,
}

impl Setup {
    pub fn glinski() -> Result<Self> {
        Self::from_toml(&*GLINSKI)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let setup: Self = toml::from_str(text)?;
        log::debug!(
            "loaded setup with {} white and {} black pieces",
            setup.white.count(),
            setup.black.count()
        );
        Ok(setup)
    }

    pub fn army(&self, side: Side) -> &Army {
        match side {
            Side::WHITE => &self.white,
            Side::BLACK => &self.black,
        }
    }
}

impl Army {
    pub fn count(&self) -> usize {
        self.pieces.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::*;
    use crate::error::Error;

    #[test]
    fn glinski() {
        let setup = Setup::glinski().unwrap();
        for side in Side::VARIANTS {
            let army = setup.army(*side);
            assert_eq!(army.count(), 18);
            assert_eq!(army.pieces[&PieceKind::PAWN], army.double_step);
            assert_eq!(army.pieces[&PieceKind::BISHOP].len(), 3);
            assert_eq!(army.pieces[&PieceKind::KING].len(), 1);
        }
        assert_eq!(setup.black.pieces[&PieceKind::KING], vec!["G10".parse().unwrap()]);
    }

    #[test]
    fn partial_setup() {
        let setup = Setup::from_toml(
            r#"
            [white.pieces]
            rook = ["f6"]
            "#,
        )
        .unwrap();
        assert_eq!(setup.white.count(), 1);
        assert!(setup.white.double_step.is_empty());
        assert_eq!(setup.black, Army::default());
    }

    #[test]
    fn bad_labels_are_rejected() {
        let res = Setup::from_toml(
            r#"
            [white.pieces]
            rook = ["J6"]
            "#,
        );
        assert!(matches!(res, Err(Error::Setup(_))));

        let res = Setup::from_toml(
            r#"
            [black.pieces]
            wizard = ["F6"]
            "#,
        );
        assert!(matches!(res, Err(Error::Setup(_))));
    }
}
