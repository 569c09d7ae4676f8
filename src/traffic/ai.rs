//! Lateral steering heuristic for traffic cars

use crate::config::RoadConfig;
use crate::game::PlayerView;
use crate::rasterizer::{overlap, wrap};
use crate::world::sprites::PLAYER_STRAIGHT;
use crate::world::{Car, Segment, World};

/// Segments scanned ahead of a car for threats
pub const LOOKAHEAD: usize = 40;

/// Box tolerance used when looking for something to steer around
const AVOID_TOLERANCE: f32 = 1.2;

/// Drift past this and the car eases back toward the road
const LANE_EDGE: f32 = 0.9;
const LANE_CORRECTION: f32 = 0.1;

/// Sign of the steer away from an obstacle at `obstacle_x`.
/// Obstacles well off-centre push the car toward the middle.
fn steer_away(obstacle_x: f32, car_x: f32) -> f32 {
    if obstacle_x > 0.5 {
        -1.0
    } else if obstacle_x < -0.5 {
        1.0
    } else if car_x > obstacle_x {
        1.0
    } else {
        -1.0
    }
}

/// Perspective scale of a segment's near edge seen from a camera at `position`.
///
/// Taken from positions rather than last frame's projection, so it holds for
/// segments that were never on screen. Edges closer than the projection's
/// near plane are held at the near plane.
fn lookahead_scale(world: &World, segment: &Segment, position: f32, camera_depth: f32) -> f32 {
    let dz = wrap(segment.p1.world.z - position, world.track_length);
    camera_depth / dz.max(camera_depth)
}

/// Lateral offset delta for `car`, which sits in bucket `car_index`.
///
/// Reads the world as it was at the start of the tick. Only something slower
/// than the car is ever a threat, so of two cars on a collision course only
/// the faster one steers.
pub fn update_car_offset(
    world: &World,
    car: &Car,
    car_index: usize,
    player: &PlayerView,
    config: &RoadConfig,
) -> f32 {
    let player_index = world.segment_index(player.position + config.player_z());
    if car_index as i64 - player_index as i64 > config.draw_distance as i64 {
        return 0.0;
    }

    let max_speed = config.max_speed();
    let camera_depth = config.camera_depth();

    for i in 1..LOOKAHEAD {
        let segment = &world.segments[world.offset_index(car_index, i)];
        let reach = 1.0 / i as f32;
        // Boxes are compared at the size they would be drawn on this segment
        let scale = lookahead_scale(world, segment, player.position, camera_depth);
        let car_w = car.source.w * scale;
        let player_w = PLAYER_STRAIGHT.w * scale;

        if segment.index == player_index
            && car.speed > player.speed
            && overlap(player.x, player_w, car.offset, car_w, AVOID_TOLERANCE)
        {
            return steer_away(player.x, car.offset) * reach * (car.speed - player.speed) / max_speed;
        }

        for other in &segment.cars {
            if car.speed > other.speed
                && overlap(car.offset, car_w, other.offset, other.source.w * scale, AVOID_TOLERANCE)
            {
                return steer_away(other.offset, car.offset) * reach * (car.speed - other.speed) / max_speed;
            }
        }
    }

    if car.offset < -LANE_EDGE {
        LANE_CORRECTION
    } else if car.offset > LANE_EDGE {
        -LANE_CORRECTION
    } else {
        0.0
    }
}
