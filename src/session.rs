//! # Registries shared between the connections of a host.
//!
//! [`Games`] keeps every running game behind its own mutex, so turns in
//! different games never wait on each other. The registry map is only
//! locked long enough to look up or insert a handle and is never held
//! while a game is locked. A finished game removes itself from the
//! registry through its completion callback.
//!
//! [`Players`] maps player ids to their current usernames.

use std::{
    fmt::Display,
    sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    model::{BoardState, Coord, GameState, Player, PlayerId, Setup, Side},
};

/// Opaque random identity of a game, displayed as hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(u64);

impl GameId {
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

pub type GameHandle = Arc<Mutex<GameState>>;

type GameMap = IndexMap<GameId, GameHandle>;

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock(game: &Mutex<GameState>) -> MutexGuard<'_, GameState> {
    game.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Running games by id. Clones share the same registry.
#[derive(Debug, Clone)]
pub struct Games {
    prototype: BoardState,
    games: Arc<RwLock<GameMap>>,
}

impl Games {
    /// A registry whose games start from Glinski's position.
    pub fn new() -> Result<Self> {
        Ok(Self::from_board(BoardState::standard()?))
    }

    pub fn with_setup(setup: &Setup) -> Result<Self> {
        Ok(Self::from_board(BoardState::from_setup(setup)?))
    }

    fn from_board(prototype: BoardState) -> Self {
        Self {
            prototype,
            games: Arc::default(),
        }
    }

    /// Start a game and return its id.
    pub fn create_new(&self) -> GameId {
        let mut games = write(&self.games);

        let mut id = GameId::random();
        while games.contains_key(&id) {
            id = GameId::random();
        }

        let registry = Arc::downgrade(&self.games);
        let game = GameState::from_board(self.prototype.clone()).with_on_finish(Arc::new(
            move || {
                if let Some(registry) = registry.upgrade() {
                    write(&registry).shift_remove(&id);
                    log::info!("game {id} removed");
                }
            },
        ));

        games.insert(id, Arc::new(Mutex::new(game)));
        log::info!("game {id} created");
        id
    }

    pub fn get(&self, id: GameId) -> Result<GameHandle> {
        read(&self.games)
            .get(&id)
            .cloned()
            .ok_or(Error::GameNotFound(id))
    }

    pub fn len(&self) -> usize {
        read(&self.games).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.games).is_empty()
    }

    pub fn ids(&self) -> Vec<GameId> {
        read(&self.games).keys().copied().collect()
    }

    /// Play a turn given cell labels and return a snapshot of the game after it.
    pub fn play_turn(&self, id: GameId, origin: &str, destination: &str) -> Result<GameState> {
        let origin: Coord = origin.parse()?;
        let destination: Coord = destination.parse()?;
        let handle = self.get(id)?;
        let mut game = lock(&handle);
        game.play_turn(origin, destination)?;
        Ok(game.snapshot())
    }

    pub fn add_players(&self, id: GameId, white: Player, black: Player) -> Result<()> {
        let handle = self.get(id)?;
        lock(&handle).add_players(white, black);
        Ok(())
    }

    /// The game with the side `player` plays in it, if they are seated.
    pub fn game_for(&self, player: PlayerId, id: GameId) -> Result<(GameHandle, Option<Side>)> {
        let handle = self.get(id)?;
        let side = lock(&handle).side_of(player);
        Ok((handle, side))
    }

    /// Finish a game, removing it from the registry.
    pub fn finish(&self, id: GameId) -> Result<()> {
        let handle = self.get(id)?;
        lock(&handle).finish();
        Ok(())
    }
}

/// Known players by id.
#[derive(Debug, Clone, Default)]
pub struct Players {
    players: Arc<RwLock<IndexMap<PlayerId, Player>>>,
}

impl Players {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_new(&self, username: impl Into<String>) -> PlayerId {
        let mut players = write(&self.players);
        let mut player = Player::new(username);
        while players.contains_key(&player.id()) {
            player = Player::new(player.username());
        }
        let id = player.id();
        log::debug!("player {id} joined as {}", player.username());
        players.insert(id, player);
        id
    }

    pub fn rename(&self, id: PlayerId, username: impl Into<String>) -> Result<()> {
        let mut players = write(&self.players);
        let player = players.get_mut(&id).ok_or(Error::PlayerNotFound(id))?;
        player.rename(username);
        Ok(())
    }

    pub fn get(&self, id: PlayerId) -> Result<Player> {
        read(&self.players)
            .get(&id)
            .cloned()
            .ok_or(Error::PlayerNotFound(id))
    }

    pub fn len(&self) -> usize {
        read(&self.players).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.players).is_empty()
    }
}
