//! Track builder
//!
//! A course is a list of `TrackShape` directives. Each directive expands to
//! one or more `add_road` calls, and every call appends an enter/hold/leave
//! run of segments with eased curvature and one continuous eased elevation
//! change.

use serde::{Serialize, Deserialize};
use crate::rasterizer::{ease_in_out, phase_fraction};
use super::segment::Segment;
use super::World;

/// Phase length preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Length {
    None,
    Short,
    Medium,
    Long,
    Segments(usize),
}

impl Length {
    pub fn segments(self) -> usize {
        match self {
            Length::None => 0,
            Length::Short => 25,
            Length::Medium => 50,
            Length::Long => 100,
            Length::Segments(n) => n,
        }
    }
}

/// Hill height preset, in segment lengths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HillSize {
    None,
    Low,
    Medium,
    High,
}

impl HillSize {
    pub fn height(self) -> f32 {
        match self {
            HillSize::None => 0.0,
            HillSize::Low => 20.0,
            HillSize::Medium => 40.0,
            HillSize::High => 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Slope {
    Flat,
    Up(HillSize),
    Down(HillSize),
}

impl Slope {
    /// Signed elevation change in segment lengths
    pub fn delta(self) -> f32 {
        match self {
            Slope::Flat => 0.0,
            Slope::Up(size) => size.height(),
            Slope::Down(size) => -size.height(),
        }
    }
}

/// Curvature preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CurveSize {
    None,
    Easy,
    Medium,
    Hard,
}

impl CurveSize {
    pub fn amount(self) -> f32 {
        match self {
            CurveSize::None => 0.0,
            CurveSize::Easy => 2.0,
            CurveSize::Medium => 4.0,
            CurveSize::Hard => 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Turn {
    Straight,
    Left(CurveSize),
    Right(CurveSize),
}

impl Turn {
    /// Signed curvature; positive bends right
    pub fn curve(self) -> f32 {
        match self {
            Turn::Straight => 0.0,
            Turn::Left(size) => -size.amount(),
            Turn::Right(size) => size.amount(),
        }
    }
}

/// One course-building directive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrackShape {
    Straight { length: Length },
    Hill { length: Length, slope: Slope },
    Curve { length: Length, turn: Turn, slope: Slope },
    LowRollingHills { length: Length, slope: Slope },
    SCurves,
    Bumps,
    /// Eases back down to elevation 0 so the loop closes
    DownhillToEnd { length: Length },
}

const BUMPS: [f32; 8] = [5.0, -2.0, -5.0, 8.0, 5.0, -7.0, 5.0, -2.0];

/// Appends segments one directive at a time
pub struct TrackBuilder {
    segment_length: f32,
    rumble_length: usize,
    segments: Vec<Segment>,
}

impl TrackBuilder {
    pub fn new(segment_length: f32, rumble_length: usize) -> Self {
        Self {
            segment_length,
            rumble_length,
            segments: Vec::new(),
        }
    }

    /// Far-edge elevation of the last segment (0 for an empty track)
    pub fn last_y(&self) -> f32 {
        self.segments.last().map(|s| s.p2.world.y).unwrap_or(0.0)
    }

    fn add_segment(&mut self, curve: f32, y: f32) {
        let index = self.segments.len();
        let near_y = self.last_y();
        self.segments.push(Segment::new(
            index,
            curve,
            near_y,
            y,
            self.segment_length,
            self.rumble_length,
        ));
    }

    /// Append `enter + hold + leave` segments easing into and out of `curve`,
    /// while elevation eases by `delta_y` segment lengths over the whole run.
    pub fn add_road(&mut self, enter: usize, hold: usize, leave: usize, curve: f32, delta_y: f32) {
        let end_y = self.last_y() + delta_y * self.segment_length;
        self.add_road_to(enter, hold, leave, curve, end_y);
    }

    /// Same as `add_road`, with the final elevation given absolutely
    fn add_road_to(&mut self, enter: usize, hold: usize, leave: usize, curve: f32, end_y: f32) {
        let start_y = self.last_y();
        let total = enter + hold + leave;
        let height_at = |k: usize| {
            if k + 1 == total {
                end_y
            } else {
                ease_in_out(start_y, end_y, phase_fraction(k + 1, total))
            }
        };

        for i in 0..enter {
            let f = phase_fraction(i, enter);
            self.add_segment(ease_in_out(0.0, curve, f * f), height_at(i));
        }
        for i in 0..hold {
            self.add_segment(curve, height_at(enter + i));
        }
        for i in 0..leave {
            let f = phase_fraction(i, leave);
            self.add_segment(ease_in_out(curve, 0.0, f), height_at(enter + hold + i));
        }
    }

    pub fn add_shape(&mut self, shape: &TrackShape) {
        match *shape {
            TrackShape::Straight { length } => {
                let n = length.segments();
                self.add_road(n, n, n, 0.0, 0.0);
            }
            TrackShape::Hill { length, slope } => {
                let n = length.segments();
                self.add_road(n, n, n, 0.0, slope.delta());
            }
            TrackShape::Curve { length, turn, slope } => {
                let n = length.segments();
                self.add_road(n, n, n, turn.curve(), slope.delta());
            }
            TrackShape::LowRollingHills { length, slope } => {
                let n = length.segments();
                let h = slope.delta();
                let easy = CurveSize::Easy.amount();
                self.add_road(n, n, n, 0.0, h / 2.0);
                self.add_road(n, n, n, 0.0, -h);
                self.add_road(n, n, n, easy, h);
                self.add_road(n, n, n, 0.0, 0.0);
                self.add_road(n, n, n, -easy, h / 2.0);
                self.add_road(n, n, n, 0.0, 0.0);
            }
            TrackShape::SCurves => {
                let n = Length::Medium.segments();
                let easy = CurveSize::Easy.amount();
                let medium = CurveSize::Medium.amount();
                self.add_road(n, n, n, -easy, HillSize::None.height());
                self.add_road(n, n, n, medium, HillSize::Medium.height());
                self.add_road(n, n, n, easy, -HillSize::Low.height());
                self.add_road(n, n, n, -easy, HillSize::Medium.height());
                self.add_road(n, n, n, -medium, -HillSize::Medium.height());
            }
            TrackShape::Bumps => {
                for dy in BUMPS {
                    self.add_road(10, 10, 10, 0.0, dy);
                }
            }
            TrackShape::DownhillToEnd { length } => {
                let n = length.segments();
                self.add_road_to(n, n, n, -CurveSize::Easy.amount(), 0.0);
            }
        }
    }

    /// Finish the course. An empty course gets a single flat segment so
    /// segment lookup always has something to wrap onto.
    pub fn build(mut self) -> World {
        if self.segments.is_empty() {
            tracing::warn!("Track has no segments, adding a single flat segment");
            self.add_segment(0.0, 0.0);
        }
        World::new(self.segments, self.segment_length)
    }
}

/// Build a world from a list of directives
pub fn build_track(shapes: &[TrackShape], segment_length: f32, rumble_length: usize) -> World {
    let mut builder = TrackBuilder::new(segment_length, rumble_length);
    for shape in shapes {
        builder.add_shape(shape);
    }
    let world = builder.build();
    tracing::info!(
        "Built track: {} segments, length {}",
        world.segments.len(),
        world.track_length
    );
    world
}

/// The built-in course
pub fn default_track() -> Vec<TrackShape> {
    use TrackShape::*;
    vec![
        Straight { length: Length::Short },
        LowRollingHills { length: Length::Short, slope: Slope::Up(HillSize::Low) },
        SCurves,
        Curve { length: Length::Medium, turn: Turn::Right(CurveSize::Medium), slope: Slope::Up(HillSize::Low) },
        Bumps,
        LowRollingHills { length: Length::Short, slope: Slope::Up(HillSize::Low) },
        Curve { length: Length::Segments(200), turn: Turn::Right(CurveSize::Medium), slope: Slope::Up(HillSize::Medium) },
        Straight { length: Length::Medium },
        Hill { length: Length::Medium, slope: Slope::Up(HillSize::High) },
        SCurves,
        Curve { length: Length::Long, turn: Turn::Left(CurveSize::Medium), slope: Slope::Flat },
        Hill { length: Length::Long, slope: Slope::Up(HillSize::High) },
        Curve { length: Length::Long, turn: Turn::Right(CurveSize::Medium), slope: Slope::Down(HillSize::Low) },
        Bumps,
        Hill { length: Length::Long, slope: Slope::Down(HillSize::Medium) },
        Straight { length: Length::Medium },
        SCurves,
        DownhillToEnd { length: Length::Segments(200) },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_world() -> World {
        build_track(&default_track(), 200.0, 3)
    }

    #[test]
    fn test_elevation_is_continuous() {
        let world = default_world();
        for pair in world.segments.windows(2) {
            assert_eq!(pair[0].p2.world.y, pair[1].p1.world.y);
        }
        assert_eq!(world.segments[0].p1.world.y, 0.0);
    }

    #[test]
    fn test_downhill_closes_loop() {
        let world = default_world();
        let last = world.segments.last().unwrap();
        assert!(last.p2.world.y.abs() < 0.01, "last elevation {}", last.p2.world.y);
    }

    #[test]
    fn test_indices_and_track_length() {
        let world = default_world();
        for (i, seg) in world.segments.iter().enumerate() {
            assert_eq!(seg.index, i);
        }
        assert_eq!(world.track_length, world.segments.len() as f32 * 200.0);
    }

    #[test]
    fn test_curve_phases() {
        let mut builder = TrackBuilder::new(200.0, 3);
        builder.add_road(10, 5, 10, 4.0, 0.0);
        let world = builder.build();
        let curves: Vec<f32> = world.segments.iter().map(|s| s.curve).collect();

        assert_eq!(curves.len(), 25);
        assert_eq!(curves[0], 0.0);
        for pair in curves[..10].windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert!(curves[9] < 4.0);
        assert!(curves[10..15].iter().all(|&c| c == 4.0));
        assert_eq!(curves[15], 4.0);
        for pair in curves[15..].windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        assert!(curves[24] > 0.0);
    }

    #[test]
    fn test_zero_length_phases_are_skipped() {
        let mut builder = TrackBuilder::new(200.0, 3);
        builder.add_road(0, 4, 0, 2.0, 3.0);
        builder.add_road(0, 0, 0, 2.0, 3.0);
        let world = builder.build();

        assert_eq!(world.segments.len(), 4);
        for seg in &world.segments {
            assert_eq!(seg.curve, 2.0);
            assert!(seg.p1.world.y.is_finite() && seg.p2.world.y.is_finite());
        }
        assert!((world.segments[3].p2.world.y - 600.0).abs() < 0.01);
    }

    #[test]
    fn test_hill_reaches_target_height() {
        let world = build_track(
            &[TrackShape::Hill { length: Length::Short, slope: Slope::Up(HillSize::Medium) }],
            200.0,
            3,
        );
        let last = world.segments.last().unwrap();
        assert!((last.p2.world.y - 40.0 * 200.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_track_gets_one_segment() {
        let world = build_track(&[TrackShape::Straight { length: Length::None }], 200.0, 3);
        assert_eq!(world.segments.len(), 1);
        assert_eq!(world.track_length, 200.0);
    }

    #[test]
    fn test_shapes_round_trip_through_ron() {
        let shapes = default_track();
        let s = ron::to_string(&shapes).unwrap();
        let parsed: Vec<TrackShape> = ron::from_str(&s).unwrap();
        assert_eq!(parsed, shapes);
    }
}
