//! Vector math and easing curves for the road projection

use std::ops::Sub;

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// Linear interpolation between a and b
pub fn interpolate(a: f32, b: f32, percent: f32) -> f32 {
    a + (b - a) * percent
}

/// Cosine ease: flat tangent at both ends
pub fn ease_in_out(a: f32, b: f32, percent: f32) -> f32 {
    a + (b - a) * (0.5 - (percent * std::f32::consts::PI).cos() / 2.0)
}

/// Fraction `i / n`, zero for an empty phase
pub fn phase_fraction(i: usize, n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }
    i as f32 / n as f32
}

/// How far `n` is through its current block of `total` (0.0..1.0)
pub fn percent_remaining(n: f32, total: f32) -> f32 {
    n.rem_euclid(total) / total
}

/// Exponential fog factor: 1.0 at the camera, falling toward 0.0
pub fn exponential_fog(distance: f32, density: f32) -> f32 {
    1.0 / (distance * distance * density).exp()
}

/// Wrap a value into [0, max)
pub fn wrap(value: f32, max: f32) -> f32 {
    let wrapped = value.rem_euclid(max);
    // rem_euclid can round up to `max` for tiny negative inputs
    if wrapped >= max { 0.0 } else { wrapped }
}

/// 1D overlap of two centred boxes, widths scaled by `percent`
pub fn overlap(x1: f32, w1: f32, x2: f32, w2: f32, percent: f32) -> bool {
    let half = percent / 2.0;
    let min1 = x1 - w1 * half;
    let max1 = x1 + w1 * half;
    let min2 = x2 - w2 * half;
    let max2 = x2 + w2 * half;
    !(max1 < min2 || min1 > max2)
}
