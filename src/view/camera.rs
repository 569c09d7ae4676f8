//! Camera projection
//!
//! Maps the next `draw_distance` segments from world space to camera space
//! and then to screen pixels. Results are written into each segment's
//! per-frame fields.

use crate::config::RoadConfig;
use crate::game::PlayerView;
use crate::rasterizer::{exponential_fog, interpolate, percent_remaining, Vec3};
use crate::world::{SegmentPoint, World};

/// Per-frame summary of where the camera sits on the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedFrame {
    /// Segment under the camera
    pub base_index: usize,
    /// Segment under the player car (`player_z` ahead of the camera)
    pub player_index: usize,
    pub player_percent: f32,
    /// Road elevation under the player car
    pub player_y: f32,
    /// Number of segments projected, starting at `base_index`
    pub window: usize,
    pub width: f32,
    pub height: f32,
}

/// Camera-space position of the eye for one segment edge
struct Eye {
    x: f32,
    y: f32,
    z: f32,
}

fn project_point(point: &mut SegmentPoint, eye: &Eye, camera_depth: f32, road_width: f32, width: f32, height: f32) {
    point.camera = point.world - Vec3::new(eye.x, eye.y, eye.z);
    if point.camera.z <= camera_depth {
        point.screen = Default::default();
        return;
    }
    let scale = camera_depth / point.camera.z;
    point.screen.x = (width / 2.0 + scale * point.camera.x * width / 2.0).round();
    point.screen.y = (height / 2.0 - scale * point.camera.y * height / 2.0).round();
    point.screen.w = (scale * road_width * width / 2.0).round();
}

/// Perspective scale of a point that passed the depth filter
pub fn depth_scale(point: &SegmentPoint, camera_depth: f32) -> f32 {
    camera_depth / point.camera.z
}

/// Project the visible window of segments for a camera at `player.position`
pub fn project(world: &mut World, player: &PlayerView, config: &RoadConfig, screen: (usize, usize)) -> ProjectedFrame {
    let width = screen.0 as f32;
    let height = screen.1 as f32;
    let camera_depth = config.camera_depth();
    let player_z = config.player_z();
    let segment_length = world.segment_length;
    let track_length = world.track_length;

    let base_index = world.segment_index(player.position);
    let base_percent = percent_remaining(player.position, segment_length);
    let player_index = world.segment_index(player.position + player_z);
    let player_percent = percent_remaining(player.position + player_z, segment_length);
    let player_segment = &world.segments[player_index];
    let player_y = interpolate(player_segment.p1.world.y, player_segment.p2.world.y, player_percent);

    // A short track is projected at most once per segment
    let window = config.draw_distance.min(world.segments.len());

    let eye_x = player.x * config.road_width;
    let eye_y = player_y + config.camera_height;
    let mut x = 0.0;
    let mut dx = -(world.segments[base_index].curve * base_percent);

    for i in 0..window {
        let index = world.offset_index(base_index, i);
        let segment = &mut world.segments[index];

        segment.looped = segment.index < base_index;
        segment.fog = exponential_fog(i as f32 / config.draw_distance as f32, config.fog_density);
        segment.clip = height;

        let eye_z = player.position - if segment.looped { track_length } else { 0.0 };
        let near = Eye { x: eye_x - x, y: eye_y, z: eye_z };
        let far = Eye { x: eye_x - x - dx, y: eye_y, z: eye_z };
        project_point(&mut segment.p1, &near, camera_depth, config.road_width, width, height);
        project_point(&mut segment.p2, &far, camera_depth, config.road_width, width, height);
        segment.in_front = segment.p1.camera.z > camera_depth;

        x += dx;
        dx += segment.curve;
    }

    ProjectedFrame {
        base_index,
        player_index,
        player_percent,
        player_y,
        window,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::wrap;
    use crate::world::{build_track, default_track, Length, ScreenPoint, TrackShape};

    const SCREEN: (usize, usize) = (640, 480);

    fn player_at(position: f32) -> PlayerView {
        PlayerView { position, ..Default::default() }
    }

    #[test]
    fn test_straight_track_has_no_sweep() {
        let config = RoadConfig::default();
        let mut world = build_track(&[TrackShape::Straight { length: Length::Long }], 200.0, 3);
        let frame = project(&mut world, &player_at(1234.0), &config, SCREEN);

        assert_eq!(frame.window, config.draw_distance);
        let mut checked = 0;
        for i in 0..frame.window {
            let seg = &world.segments[world.offset_index(frame.base_index, i)];
            assert_eq!(seg.p1.camera.x, 0.0);
            assert_eq!(seg.p2.camera.x, 0.0);
            if seg.in_front {
                assert_eq!(seg.p1.screen.x, 320.0);
                assert_eq!(seg.p2.screen.x, 320.0);
                checked += 1;
            }
        }
        assert!(checked > 200);
    }

    #[test]
    fn test_segments_behind_camera_are_filtered() {
        let config = RoadConfig::default();
        let mut world = build_track(&default_track(), 200.0, 3);
        let position = world.track_length - 100.0;
        let frame = project(&mut world, &player_at(position), &config, SCREEN);

        let camera_depth = config.camera_depth();
        let base = &world.segments[frame.base_index];
        assert!(!base.in_front);
        assert_eq!(base.p1.screen, ScreenPoint::default());

        let mut looped = 0;
        for i in 0..frame.window {
            let seg = &world.segments[world.offset_index(frame.base_index, i)];
            assert_eq!(seg.in_front, seg.p1.camera.z > camera_depth);
            if seg.looped {
                looped += 1;
                assert!(seg.p1.camera.z > 0.0, "looped segment {} behind camera", seg.index);
            }
        }
        assert_eq!(looped, frame.window - 1);
    }

    #[test]
    fn test_full_lap_is_identical() {
        let config = RoadConfig::default();
        let mut world = build_track(&default_track(), 200.0, 3);
        let start = project(&mut world, &player_at(0.0), &config, SCREEN);
        let first = world.segments[0].clone();

        let steps = (world.track_length / 100.0) as usize;
        let mut position = 0.0;
        for _ in 0..steps {
            position = wrap(position + 100.0, world.track_length);
        }
        assert_eq!(position, 0.0);

        let again = project(&mut world, &player_at(position), &config, SCREEN);
        assert_eq!(again, start);
        assert_eq!(world.segments[0].p1, first.p1);
        assert_eq!(world.segments[0].p2, first.p2);
        assert_eq!(world.segments[0].fog, first.fog);
    }

    #[test]
    fn test_fog_thickens_with_distance() {
        let config = RoadConfig::default();
        let mut world = build_track(&default_track(), 200.0, 3);
        let frame = project(&mut world, &player_at(0.0), &config, SCREEN);

        assert_eq!(world.segments[frame.base_index].fog, 1.0);
        let fogs: Vec<f32> = (0..frame.window)
            .map(|i| world.segments[world.offset_index(frame.base_index, i)].fog)
            .collect();
        for pair in fogs.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn test_short_track_window_is_bounded() {
        let config = RoadConfig::default();
        let mut world = build_track(&[TrackShape::Straight { length: Length::Segments(10) }], 200.0, 3);
        let frame = project(&mut world, &player_at(0.0), &config, SCREEN);
        assert_eq!(frame.window, 30);
    }
}
