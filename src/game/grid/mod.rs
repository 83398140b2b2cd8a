//! Board model and placement rules.

pub mod board;
pub mod placement;

pub use board::*;
pub use placement::*;
