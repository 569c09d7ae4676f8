//! Segment, sprite and car types
//!
//! Pure data structures with minimal behavior.
//! Projection and rendering logic lives in the view module.

use crate::rasterizer::{Color, Rect, Vec3};

/// Start/finish banding
pub const START_MARKER: [usize; 2] = [2, 3];

/// Screen-space projection of one segment edge
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Half-width of the road at this edge, in pixels
    pub w: f32,
}

/// One edge of a segment through the projection pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SegmentPoint {
    pub world: Vec3,
    pub camera: Vec3,
    pub screen: ScreenPoint,
}

impl SegmentPoint {
    fn at(y: f32, z: f32) -> Self {
        Self {
            world: Vec3::new(0.0, y, z),
            ..Default::default()
        }
    }
}

/// Band colors for a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentColors {
    pub road: Color,
    pub grass: Color,
    pub rumble: Color,
    pub lane: Color,
    /// Whether lane dividers are painted on this segment
    pub lane_markers: bool,
}

impl SegmentColors {
    pub const LIGHT: SegmentColors = SegmentColors {
        road: Color::new(0x6B, 0x6B, 0x6B),
        grass: Color::new(0x10, 0xAA, 0x10),
        rumble: Color::new(0xDD, 0xDD, 0xDD),
        lane: Color::new(0xCC, 0xCC, 0xCC),
        lane_markers: true,
    };

    pub const DARK: SegmentColors = SegmentColors {
        road: Color::new(0x69, 0x69, 0x69),
        grass: Color::new(0x00, 0x9A, 0x00),
        rumble: Color::new(0xBB, 0x00, 0x00),
        lane: Color::new(0xCC, 0xCC, 0xCC),
        lane_markers: false,
    };

    pub const START: SegmentColors = SegmentColors {
        road: Color::WHITE,
        grass: Color::WHITE,
        rumble: Color::WHITE,
        lane: Color::WHITE,
        lane_markers: true,
    };

    /// Palette for the segment at `index`
    pub fn for_index(index: usize, rumble_length: usize) -> Self {
        if START_MARKER.contains(&index) {
            Self::START
        } else if (index / rumble_length.max(1)) % 2 == 1 {
            Self::LIGHT
        } else {
            Self::DARK
        }
    }
}

/// Static roadside decoration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub source: Rect,
    /// Lateral offset in road half-widths; negative is left of the road
    pub offset: f32,
}

/// Traffic vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Car {
    pub id: usize,
    pub source: Rect,
    /// Lateral offset in road half-widths
    pub offset: f32,
    /// Absolute world-space Z, in [0, track_length)
    pub z: f32,
    pub speed: f32,
    /// Set once the car has been updated this tick
    pub moved: bool,
}

/// One fixed-length slice of road
#[derive(Debug, Clone)]
pub struct Segment {
    pub index: usize,
    pub curve: f32,
    /// Near edge
    pub p1: SegmentPoint,
    /// Far edge
    pub p2: SegmentPoint,
    pub colors: SegmentColors,

    // Per-frame projection state
    /// Index is behind the camera's base segment because the window wrapped
    pub looped: bool,
    /// Passed the camera-depth filter this frame
    pub in_front: bool,
    pub fog: f32,
    /// Occlusion ceiling when this segment was visited by the road pass
    pub clip: f32,

    pub sprites: Vec<Sprite>,
    pub cars: Vec<Car>,
}

impl Segment {
    pub fn new(
        index: usize,
        curve: f32,
        near_y: f32,
        far_y: f32,
        segment_length: f32,
        rumble_length: usize,
    ) -> Self {
        Self {
            index,
            curve,
            p1: SegmentPoint::at(near_y, index as f32 * segment_length),
            p2: SegmentPoint::at(far_y, (index + 1) as f32 * segment_length),
            colors: SegmentColors::for_index(index, rumble_length),
            looped: false,
            in_front: false,
            fog: 1.0,
            clip: 0.0,
            sprites: Vec::new(),
            cars: Vec::new(),
        }
    }

    /// Elevation change across the segment (positive is uphill)
    pub fn rise(&self) -> f32 {
        self.p2.world.y - self.p1.world.y
    }
}
