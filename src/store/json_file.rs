//! Single-slot JSON file store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::game::state::Game;
use crate::store::{SnapshotStore, StoreError, decode_snapshot};

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    /// Write to a temporary sibling and rename, so a crash never leaves half a file.
    fn save(&mut self, game: &Game) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(game)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!("[Store] saved game {} to {}", game.id, self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<Game>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(decode_snapshot(&raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::setup::{SetupConfig, build_game};
    use crate::game::types::PieceColor;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stackboard_{}_{}.json", name, uuid::Uuid::new_v4()))
    }

    fn sample_game() -> Game {
        let config = SetupConfig::default()
            .with_player("Ana", PieceColor::Red, Some(PieceColor::Green))
            .with_player("Bo", PieceColor::Blue, Some(PieceColor::Yellow));
        build_game(&config).expect("valid setup")
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut store = JsonFileStore::new(&path);
        let game = sample_game();
        store.save(&game).expect("save");
        let loaded = store.load().expect("load").expect("a saved game");
        assert_eq!(loaded, game);
        store.clear().expect("clear");
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn test_missing_file_is_no_save() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn test_corrupt_file_is_no_save() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").expect("write");
        let mut store = JsonFileStore::new(&path);
        assert!(store.load().expect("load").is_none());
        store.clear().expect("clear");
    }
}
