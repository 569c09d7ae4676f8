//! World module - segmented pseudo-3D road
//!
//! The track is a looping ring of fixed-length segments:
//! - Built from a list of shape directives (straights, curves, hills)
//! - Decorated with roadside sprites
//! - Populated with traffic cars bucketed by segment

mod segment;
mod track;
mod scenery;
mod level;
pub mod sprites;

pub use segment::*;
pub use track::*;
pub use scenery::*;
pub use level::*;

/// The looping course and everything placed on it
#[derive(Debug, Clone)]
pub struct World {
    pub segments: Vec<Segment>,
    pub segment_length: f32,
    /// `segments.len() * segment_length`
    pub track_length: f32,
}

impl World {
    pub fn new(segments: Vec<Segment>, segment_length: f32) -> Self {
        let track_length = segments.len() as f32 * segment_length;
        Self {
            segments,
            segment_length,
            track_length,
        }
    }

    /// Index of the segment containing world Z, wrapping in both directions
    pub fn segment_index(&self, z: f32) -> usize {
        let n = self.segments.len().max(1) as i64;
        ((z / self.segment_length).floor() as i64).rem_euclid(n) as usize
    }

    pub fn find_segment(&self, z: f32) -> &Segment {
        &self.segments[self.segment_index(z)]
    }

    /// Index `offset` segments ahead of `base`, wrapping around the loop
    pub fn offset_index(&self, base: usize, offset: usize) -> usize {
        (base + offset) % self.segments.len().max(1)
    }

    pub fn car_count(&self) -> usize {
        self.segments.iter().map(|s| s.cars.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_world(n: usize) -> World {
        let mut builder = TrackBuilder::new(200.0, 3);
        builder.add_road(0, n, 0, 0.0, 0.0);
        builder.build()
    }

    #[test]
    fn test_segment_lookup_wraps() {
        let world = flat_world(10);
        assert_eq!(world.track_length, 2000.0);
        assert_eq!(world.segment_index(0.0), 0);
        assert_eq!(world.segment_index(199.9), 0);
        assert_eq!(world.segment_index(200.0), 1);
        assert_eq!(world.segment_index(1999.0), 9);
        assert_eq!(world.segment_index(-1.0), 9);
        assert_eq!(world.find_segment(450.0).index, 2);
    }

    #[test]
    fn test_lookup_stable_across_laps() {
        let world = flat_world(10);
        for z in [0.0, 150.0, 800.0, 1999.0] {
            let expected = world.segment_index(z);
            for k in -3..=3 {
                let shifted = z + k as f32 * world.track_length;
                assert_eq!(world.segment_index(shifted), expected, "z {} lap {}", z, k);
            }
        }
    }

    #[test]
    fn test_offset_index() {
        let world = flat_world(10);
        assert_eq!(world.offset_index(8, 1), 9);
        assert_eq!(world.offset_index(8, 2), 0);
        assert_eq!(world.offset_index(8, 25), 3);
    }
}
