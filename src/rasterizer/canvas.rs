//! Draw primitive consumed by the road renderer
//!
//! The renderer only ever needs three operations: fill a horizontal-edged
//! trapezoid, alpha-fill a rectangle, and blit a sub-rectangle of an atlas.
//! `SoftwareCanvas` implements them over the framebuffer.

use super::math::interpolate;
use super::render::Framebuffer;
use super::types::{Atlas, Color, Rect, Texture};

/// Quad with horizontal top and bottom edges (top_y < bottom_y on screen)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trapezoid {
    pub top_y: f32,
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_y: f32,
    pub bottom_left: f32,
    pub bottom_right: f32,
}

impl Trapezoid {
    /// Band spanning [x1 - w1, x1 + w1] at y1 (bottom) and [x2 - w2, x2 + w2] at y2 (top)
    pub fn band(x1: f32, y1: f32, w1: f32, x2: f32, y2: f32, w2: f32) -> Self {
        Self {
            top_y: y2,
            top_left: x2 - w2,
            top_right: x2 + w2,
            bottom_y: y1,
            bottom_left: x1 - w1,
            bottom_right: x1 + w1,
        }
    }

    /// Cut everything at or below `clip_y`. None when nothing is left.
    pub fn clip_bottom(self, clip_y: f32) -> Option<Self> {
        if self.top_y >= clip_y {
            return None;
        }
        if self.bottom_y <= clip_y {
            return Some(self);
        }
        let t = (clip_y - self.top_y) / (self.bottom_y - self.top_y);
        Some(Self {
            bottom_y: clip_y,
            bottom_left: interpolate(self.top_left, self.bottom_left, t),
            bottom_right: interpolate(self.top_right, self.bottom_right, t),
            ..self
        })
    }
}

/// Draw primitive injected into the renderer
pub trait Canvas {
    /// Drawable size in pixels
    fn size(&self) -> (usize, usize);
    fn fill_trapezoid(&mut self, quad: &Trapezoid, color: Color);
    /// Alpha-blended rectangle fill
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Copy `src` of an atlas into `dst`, optionally mirrored horizontally
    fn blit(&mut self, atlas: Atlas, src: Rect, dst: Rect, flip: bool);
}

/// Canvas backed by the software framebuffer and the two decoded atlases
pub struct SoftwareCanvas<'a> {
    pub fb: &'a mut Framebuffer,
    pub sprites: &'a Texture,
    pub backgrounds: &'a Texture,
}

impl<'a> SoftwareCanvas<'a> {
    pub fn new(fb: &'a mut Framebuffer, sprites: &'a Texture, backgrounds: &'a Texture) -> Self {
        Self { fb, sprites, backgrounds }
    }
}

impl Canvas for SoftwareCanvas<'_> {
    fn size(&self) -> (usize, usize) {
        (self.fb.width, self.fb.height)
    }

    fn fill_trapezoid(&mut self, quad: &Trapezoid, color: Color) {
        let height = quad.bottom_y - quad.top_y;
        if height <= 0.0 {
            return;
        }
        let y0 = quad.top_y.round() as i32;
        let y1 = quad.bottom_y.round() as i32;
        for y in y0..y1 {
            let t = ((y as f32 + 0.5 - quad.top_y) / height).clamp(0.0, 1.0);
            let left = interpolate(quad.top_left, quad.bottom_left, t);
            let right = interpolate(quad.top_right, quad.bottom_right, t);
            self.fb.fill_span(y, left.round() as i32, right.round() as i32, color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x0 = rect.x.round() as i32;
        let x1 = rect.right().round() as i32;
        for y in rect.y.round() as i32..rect.bottom().round() as i32 {
            self.fb.fill_span(y, x0, x1, color);
        }
    }

    fn blit(&mut self, atlas: Atlas, src: Rect, dst: Rect, flip: bool) {
        if dst.w <= 0.0 || dst.h <= 0.0 || src.w <= 0.0 || src.h <= 0.0 {
            return;
        }
        let texture = match atlas {
            Atlas::Sprites => self.sprites,
            Atlas::Backgrounds => self.backgrounds,
        };

        let x0 = (dst.x.round() as i32).max(0);
        let x1 = (dst.right().round() as i32).min(self.fb.width as i32);
        let y0 = (dst.y.round() as i32).max(0);
        let y1 = (dst.bottom().round() as i32).min(self.fb.height as i32);

        for y in y0..y1 {
            let v = (y as f32 + 0.5 - dst.y) / dst.h;
            let sy = (src.y + v * src.h).floor().max(0.0) as usize;
            for x in x0..x1 {
                let mut u = (x as f32 + 0.5 - dst.x) / dst.w;
                if flip {
                    u = 1.0 - u;
                }
                let sx = (src.x + u * src.w).floor().max(0.0) as usize;
                let color = texture.get_pixel(sx, sy);
                self.fb.blend_pixel(x as usize, y as usize, color);
            }
        }
    }
}

/// Canvas that records every call, for renderer tests
#[cfg(test)]
#[derive(Default)]
pub struct RecordingCanvas {
    pub width: usize,
    pub height: usize,
    pub trapezoids: Vec<(Trapezoid, Color)>,
    pub rects: Vec<(Rect, Color)>,
    pub blits: Vec<(Atlas, Rect, Rect, bool)>,
}

#[cfg(test)]
impl RecordingCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, ..Default::default() }
    }
}

#[cfg(test)]
impl Canvas for RecordingCanvas {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn fill_trapezoid(&mut self, quad: &Trapezoid, color: Color) {
        self.trapezoids.push((*quad, color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.rects.push((rect, color));
    }

    fn blit(&mut self, atlas: Atlas, src: Rect, dst: Rect, flip: bool) {
        self.blits.push((atlas, src, dst, flip));
    }
}
