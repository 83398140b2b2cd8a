pub mod types;
pub mod state;
pub mod setup;
pub mod dice;
pub mod engine;

pub mod entities;
pub mod grid;
pub mod systems;
pub mod demo;


pub use engine::{Action, Rejection, apply, try_apply};
pub use state::Game;
