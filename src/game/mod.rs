//! Game module - player physics and the per-tick session

mod player;
mod session;

pub use player::*;
pub use session::*;
