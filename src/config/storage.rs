/// Persistence and history configuration.
use std::path::PathBuf;

/// File used for the single save slot when no override is set.
pub const DEFAULT_SAVE_PATH: &str = "stackboard-save.json";

/// Environment variable overriding the save slot path.
pub const SAVE_PATH_ENV: &str = "STACKBOARD_SAVE_PATH";

/// Number of snapshots kept for undo.
pub const HISTORY_LIMIT: usize = 50;

/// Read `STACKBOARD_SAVE_PATH` (default `stackboard-save.json`).
pub fn save_path() -> PathBuf {
    std::env::var(SAVE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SAVE_PATH))
}
