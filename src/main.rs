//! Terminal driver for the score keeper.
//!
//! Resumes the saved game if there is one, otherwise waits for a `setup` command.

use stackboard::config::storage::save_path;
use stackboard::game::demo::game_loop::run_game_loop;

fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    run_game_loop(save_path())
}
