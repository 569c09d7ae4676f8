//! Traffic simulation
//!
//! Cars live in the bucket of the segment they occupy. Each tick every car
//! is advanced exactly once, then relocated:
//! - `ai` decides the lateral steering delta (avoidance and lane keeping)
//! - `simulator` spawns cars and runs the staged per-tick update

mod ai;
mod simulator;

pub use simulator::*;
