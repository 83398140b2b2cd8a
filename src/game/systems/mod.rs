pub mod render;
pub mod round;
pub mod scoring;

pub use render::*;
pub use round::*;
pub use scoring::*;
