//! Framebuffer for software rendering
//! No depth buffer: callers paint back to front.

use super::types::Color;

/// RGBA pixel buffer, 4 bytes per pixel
pub struct Framebuffer {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Color::with_alpha(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            )
        } else {
            Color::BLACK
        }
    }

    /// Composite a color over the existing pixel
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Color) {
        match color.a {
            0 => {}
            255 => self.set_pixel(x, y, color),
            _ => {
                let dst = self.get_pixel(x, y);
                self.set_pixel(x, y, color.blend_over(dst));
            }
        }
    }

    /// Fill pixels [x0, x1) on row y, clamped to the buffer
    pub fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let start = x0.max(0);
        let end = x1.min(self.width as i32);
        for x in start..end {
            self.blend_pixel(x as usize, y as usize, color);
        }
    }
}
