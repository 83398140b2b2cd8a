//! Snapshot persistence and history.
//!
//! The engine never touches storage itself. Drivers save the latest snapshot
//! into a single slot after each transition and keep an undo history of
//! serialized snapshots.

pub mod history;
pub mod json_file;
pub mod memory;

pub use history::History;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::game::state::Game;
use crate::game::types::GameStatus;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot (de)serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A single save slot.
pub trait SnapshotStore {
    fn save(&mut self, game: &Game) -> Result<(), StoreError>;

    /// The last saved snapshot. Unreadable data counts as no save.
    fn load(&self) -> Result<Option<Game>, StoreError>;

    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Snapshots are saved once the game has left setup.
pub fn should_persist(game: &Game) -> bool {
    game.status != GameStatus::Setup
}

/// Parse a saved snapshot, treating corrupt data as absent.
pub(crate) fn decode_snapshot(raw: &str) -> Option<Game> {
    match serde_json::from_str(raw) {
        Ok(game) => Some(game),
        Err(e) => {
            log::warn!("[Store] ignoring unreadable snapshot: {}", e);
            None
        }
    }
}
