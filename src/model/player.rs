//! Participants of a game.

use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// Opaque random identity of a player, displayed as hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A player is its id; the username is only a label and may change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    username: String,
}

impl Player {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: PlayerId::random(),
            username: username.into(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn rename(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_the_id() {
        let alice = Player::new("alice");
        let mut renamed = alice.clone();
        renamed.rename("bob");
        assert_eq!(alice, renamed);
        assert_eq!(renamed.username(), "bob");
        assert_ne!(alice, Player::new("alice"));
        assert_eq!(alice.id().to_string().len(), 16);
    }
}
