use crate::game::state::Game;
use crate::store::{SnapshotStore, StoreError, decode_snapshot};

/// In-memory save slot holding the serialized snapshot, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw text into the slot, e.g. to simulate a damaged save.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Some(raw.into()),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, game: &Game) -> Result<(), StoreError> {
        self.slot = Some(serde_json::to_string(game)?);
        Ok(())
    }

    fn load(&self) -> Result<Option<Game>, StoreError> {
        Ok(self.slot.as_deref().and_then(decode_snapshot))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.slot = None;
        Ok(())
    }
}
