/// Main configuration module.
///
/// Re-exports submodules for game rules and storage configuration.
pub mod game;
pub mod storage;
