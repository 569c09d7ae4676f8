//! Parallax background bands
//!
//! Each layer is a horizontally wrapping strip. Its scroll offset advances
//! with the curvature under the player, so the layers only move in bends.

use crate::config::LayerSpeeds;
use crate::rasterizer::{wrap, Atlas, Canvas, Rect};
use crate::world::sprites::{BACKGROUND_HILLS, BACKGROUND_SKY, BACKGROUND_TREES};

/// Scroll offsets of the three layers, each in [0, 1)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Parallax {
    pub sky: f32,
    pub hills: f32,
    pub trees: f32,
}

impl Parallax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `position_delta` world units travelled over a segment of
    /// curvature `curve`
    pub fn update(&mut self, curve: f32, position_delta: f32, segment_length: f32, speeds: &LayerSpeeds) {
        let sweep = curve * position_delta / segment_length;
        self.sky = wrap(self.sky + speeds.sky * sweep, 1.0);
        self.hills = wrap(self.hills + speeds.hills * sweep, 1.0);
        self.trees = wrap(self.trees + speeds.trees * sweep, 1.0);
    }
}

/// Draw one layer scrolled by `rotation`, split into two blits at the seam
pub fn render_background<C: Canvas>(canvas: &mut C, layer: Rect, rotation: f32, y_offset: f32) {
    let (width, height) = canvas.size();
    let stretch = width as f32 / layer.w;

    let seam = layer.w * rotation;
    let head = Rect::new(layer.x + seam, layer.y, layer.w - seam, layer.h);
    let head_w = head.w * stretch;
    canvas.blit(Atlas::Backgrounds, head, Rect::new(0.0, y_offset, head_w + 1.0, height as f32), false);

    if seam > 0.0 {
        let tail = Rect::new(layer.x, layer.y, seam, layer.h);
        let dst = Rect::new(head_w - 1.0, y_offset, tail.w * stretch + 1.0, height as f32);
        canvas.blit(Atlas::Backgrounds, tail, dst, false);
    }
}

/// Sky, hills, then trees, each lifted by its own share of the player's elevation
pub fn render_backgrounds<C: Canvas>(
    canvas: &mut C,
    parallax: &Parallax,
    speeds: &LayerSpeeds,
    player_y: f32,
    resolution: f32,
) {
    render_background(canvas, BACKGROUND_SKY, parallax.sky, resolution * speeds.sky * player_y);
    render_background(canvas, BACKGROUND_HILLS, parallax.hills, resolution * speeds.hills * player_y);
    render_background(canvas, BACKGROUND_TREES, parallax.trees, resolution * speeds.trees * player_y);
}
