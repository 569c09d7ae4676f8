//! View module - projection and painting
//!
//! Turns the world into draw calls on a `Canvas`:
//! - `camera` projects the visible window of segments
//! - `road` paints road bands near to far with hill occlusion
//! - `sprite` paints traffic, scenery and the player far to near
//! - `background` scrolls and paints the parallax bands

mod camera;
mod road;
mod sprite;
mod background;

pub use road::*;
pub use background::*;
