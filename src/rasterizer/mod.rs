//! Software rasterizer for the pseudo-3D road
//!
//! Features:
//! - RGBA framebuffer, painter's algorithm only (no depth buffer)
//! - Scanline trapezoid fills for road bands
//! - Alpha-blended rectangle fills for fog
//! - Nearest-neighbour atlas blits with horizontal mirroring

mod math;
mod types;
mod render;
mod canvas;

pub use math::*;
pub use types::*;
pub use render::*;
pub use canvas::*;

/// Default framebuffer dimensions
pub const WIDTH: usize = 640;
pub const HEIGHT: usize = 480;
