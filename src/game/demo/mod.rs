// Terminal front end used by the binary. Parses typed commands and drives
// the engine, the save slot and the undo history.
pub mod game_loop;
