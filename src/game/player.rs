//! Player car physics
//!
//! Throttle, steering, centrifugal drift and the two collision responses
//! (roadside scenery and slower traffic). Traffic and rendering only ever see
//! the player through a `PlayerView` snapshot.

use crate::config::RoadConfig;
use crate::rasterizer::{overlap, wrap};
use crate::world::sprites::{world_width, PLAYER_STRAIGHT};
use crate::world::World;

/// Tolerance for clipping a roadside sprite
const SCENERY_TOLERANCE: f32 = 1.0;
/// Tolerance for rear-ending a slower car
const TRAFFIC_TOLERANCE: f32 = 0.8;
/// Lateral clamp, in road half-widths
const MAX_X: f32 = 3.0;

/// Keyboard state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub accelerate: bool,
    pub brake: bool,
}

impl Controls {
    /// Net steering intent; holding both directions cancels out
    pub fn steer(&self) -> Steer {
        match (self.left, self.right) {
            (true, false) => Steer::Left,
            (false, true) => Steer::Right,
            _ => Steer::Straight,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Steer {
    Left,
    #[default]
    Straight,
    Right,
}

/// Read-only player snapshot handed to traffic and the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerView {
    /// Camera position along the track, in [0, track_length)
    pub position: f32,
    /// Lateral offset in road half-widths
    pub x: f32,
    pub speed: f32,
    pub steer: Steer,
}

impl PlayerView {
    pub fn off_road(&self) -> bool {
        self.x < -1.0 || self.x > 1.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Player {
    pub position: f32,
    pub x: f32,
    pub speed: f32,
    pub steer: Steer,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            position: self.position,
            x: self.x,
            speed: self.speed,
            steer: self.steer,
        }
    }

    pub fn off_road(&self) -> bool {
        self.view().off_road()
    }

    /// Advance one tick. Returns the distance travelled before any collision
    /// snap, which drives the parallax scroll.
    pub fn update(&mut self, controls: &Controls, world: &World, config: &RoadConfig) -> f32 {
        let dt = config.dt();
        let max_speed = config.max_speed();
        let player_z = config.player_z();

        let start = self.position;
        let travelled = dt * self.speed;
        self.position = wrap(self.position + travelled, world.track_length);
        self.steer = controls.steer();

        if controls.accelerate {
            self.speed += config.accel * dt;
        }
        if controls.brake {
            self.speed += config.braking * dt;
        }
        if !controls.accelerate && !controls.brake {
            self.speed += config.decel * dt;
        }

        let steer_step = dt * 2.0 * self.speed / max_speed;
        if controls.left {
            self.x -= steer_step;
        }
        if controls.right {
            self.x += steer_step;
        }

        self.speed = self.speed.clamp(0.0, max_speed);
        self.x = self.x.clamp(-MAX_X, MAX_X);

        let speed_percent = self.speed / max_speed;
        let curve = world.find_segment(self.position + player_z).curve;
        self.x -= dt * 2.0 * speed_percent * speed_percent * curve * config.centrifugal;

        let crossed = crossed_segments(world, start + player_z, self.position + player_z);

        if self.off_road() {
            if self.speed > config.off_road_limit() {
                self.speed += config.off_road_decel() * dt;
            }
            self.collide_with_scenery(world, &crossed, config);
        }
        self.collide_with_traffic(world, &crossed, config);

        travelled
    }

    fn collide_with_scenery(&mut self, world: &World, crossed: &[usize], config: &RoadConfig) {
        let player_w = world_width(&PLAYER_STRAIGHT);
        for &index in crossed {
            let segment = &world.segments[index];
            let hit = segment.sprites.iter().any(|sprite| {
                let w = world_width(&sprite.source);
                let side = if sprite.offset > 0.0 { 1.0 } else { -1.0 };
                overlap(self.x, player_w, sprite.offset + w / 2.0 * side, w, SCENERY_TOLERANCE)
            });
            if hit {
                tracing::trace!("Hit scenery on segment {}", index);
                self.speed = config.max_speed() / 5.0;
                self.position = wrap(segment.p1.world.z - config.player_z(), world.track_length);
                return;
            }
        }
    }

    fn collide_with_traffic(&mut self, world: &World, crossed: &[usize], config: &RoadConfig) {
        let player_w = world_width(&PLAYER_STRAIGHT);
        for &index in crossed {
            for car in &world.segments[index].cars {
                if self.speed > car.speed
                    && overlap(self.x, player_w, car.offset, world_width(&car.source), TRAFFIC_TOLERANCE)
                {
                    tracing::trace!("Rear-ended car {} on segment {}", car.id, index);
                    self.speed = car.speed * (car.speed / self.speed);
                    self.position = wrap(car.z - config.player_z(), world.track_length);
                    return;
                }
            }
        }
    }
}

/// Segment indices from the one containing `from` up to the one containing
/// `to`, walking forward around the loop
fn crossed_segments(world: &World, from: f32, to: f32) -> Vec<usize> {
    let first = world.segment_index(from);
    let last = world.segment_index(to);
    let mut indices = vec![first];
    let mut index = first;
    while index != last && indices.len() < world.segments.len() {
        index = world.offset_index(index, 1);
        indices.push(index);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::sprites::{CAR01, PALM_TREE};
    use crate::world::{Car, Sprite, TrackBuilder};

    fn flat_world(n: usize, curve: f32) -> World {
        let mut builder = TrackBuilder::new(200.0, 3);
        builder.add_road(0, n, 0, curve, 0.0);
        builder.build()
    }

    #[test]
    fn test_throttle_and_clamps() {
        let world = flat_world(50, 0.0);
        let config = RoadConfig::default();
        let mut player = Player::new();

        let accelerate = Controls { accelerate: true, ..Default::default() };
        player.update(&accelerate, &world, &config);
        assert!((player.speed - 40.0).abs() < 0.01);

        player.speed = config.max_speed();
        player.update(&accelerate, &world, &config);
        assert_eq!(player.speed, config.max_speed());

        let brake = Controls { brake: true, ..Default::default() };
        player.speed = 100.0;
        player.update(&brake, &world, &config);
        assert_eq!(player.speed, 0.0);

        player.speed = config.max_speed();
        player.x = 2.99;
        let right = Controls { right: true, ..Default::default() };
        for _ in 0..10 {
            player.update(&right, &world, &config);
        }
        assert!(player.x <= 3.0);
    }

    #[test]
    fn test_position_wraps() {
        let world = flat_world(10, 0.0);
        let config = RoadConfig::default();
        let mut player = Player { position: world.track_length - 50.0, speed: 6000.0, ..Default::default() };
        let travelled = player.update(&Controls::default(), &world, &config);
        assert!((travelled - 100.0).abs() < 0.01);
        assert!((player.position - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_centrifugal_pushes_outward() {
        let world = flat_world(50, 4.0);
        let config = RoadConfig::default();
        let mut player = Player { speed: config.max_speed(), ..Default::default() };
        player.update(&Controls { accelerate: true, ..Default::default() }, &world, &config);
        assert!(player.x < 0.0);

        let straight = flat_world(50, 0.0);
        let mut player = Player { speed: config.max_speed(), ..Default::default() };
        player.update(&Controls { accelerate: true, ..Default::default() }, &straight, &config);
        assert_eq!(player.x, 0.0);
    }

    #[test]
    fn test_off_road_slows_down() {
        let world = flat_world(50, 0.0);
        let config = RoadConfig::default();
        let mut player = Player { x: 2.0, speed: config.max_speed(), ..Default::default() };
        player.update(&Controls { accelerate: true, ..Default::default() }, &world, &config);
        assert!(player.speed < config.max_speed() - 50.0);

        // Below the off-road limit only normal physics apply
        let mut slow = Player { x: 2.0, speed: 1000.0, ..Default::default() };
        slow.update(&Controls { accelerate: true, ..Default::default() }, &world, &config);
        assert!((slow.speed - 1040.0).abs() < 0.01);
    }

    #[test]
    fn test_scenery_collision_snaps_back() {
        let mut world = flat_world(50, 0.0);
        let config = RoadConfig::default();
        world.segments[5].sprites.push(Sprite { source: PALM_TREE, offset: 1.2 });

        let mut player = Player { x: 1.5, speed: config.max_speed(), ..Default::default() };
        player.update(&Controls::default(), &world, &config);

        assert_eq!(player.speed, config.max_speed() / 5.0);
        let expected = wrap(world.segments[5].p1.world.z - config.player_z(), world.track_length);
        assert!((player.position - expected).abs() < 0.01);
    }

    #[test]
    fn test_rear_ending_slower_car() {
        let mut world = flat_world(50, 0.0);
        let config = RoadConfig::default();
        let car = Car { id: 0, source: CAR01, offset: 0.0, z: 1050.0, speed: 3000.0, moved: false };
        world.segments[5].cars.push(car);

        let mut player = Player { speed: config.max_speed(), ..Default::default() };
        player.update(&Controls::default(), &world, &config);

        assert!(player.speed < car.speed);
        assert!((player.position - (car.z - config.player_z())).abs() < 0.01);
    }

    #[test]
    fn test_faster_car_is_not_hit() {
        let mut world = flat_world(50, 0.0);
        let config = RoadConfig::default();
        world.segments[5].cars.push(Car { id: 0, source: CAR01, offset: 0.0, z: 1050.0, speed: 11000.0, moved: false });

        let mut player = Player { speed: 6000.0, ..Default::default() };
        player.update(&Controls::default(), &world, &config);
        assert!((player.speed - 5960.0).abs() < 0.01);
    }

    #[test]
    fn test_steer_intent() {
        assert_eq!(Controls { left: true, ..Default::default() }.steer(), Steer::Left);
        assert_eq!(Controls { right: true, ..Default::default() }.steer(), Steer::Right);
        assert_eq!(Controls { left: true, right: true, ..Default::default() }.steer(), Steer::Straight);
    }
}
