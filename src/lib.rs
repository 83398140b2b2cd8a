//! Score keeper for a stacking board game.
//!
//! Players stack pieces on a 5x5 board of graduated levels and score by
//! completing lines and building tall stacks. This crate records the board,
//! turns, dice and scores; the physical board stays on the table.
//!
//! - [`game`]: data model, rules and the state engine.
//! - [`store`]: save slot and undo history for drivers.
//! - [`config`]: rule constants and storage settings.

pub mod config;
pub mod game;
pub mod store;
