//! Game session
//!
//! Owns the world, the player, the parallax state and the RNG, and runs one
//! tick in a fixed order: player physics, traffic, parallax. Rendering is a
//! separate call so the caller can tick several times per displayed frame.

use rand::{rngs::StdRng, SeedableRng};
use crate::config::RoadConfig;
use crate::rasterizer::Canvas;
use crate::traffic::{reset_cars, update_cars};
use crate::view::{render_frame, FrameReport, Parallax};
use crate::world::{build_track, reset_sprites, TrackDef, World};
use super::player::{Controls, Player};

pub struct Session {
    pub config: RoadConfig,
    pub track: TrackDef,
    pub world: World,
    pub player: Player,
    pub parallax: Parallax,
    seed: u64,
    rng: StdRng,
}

impl Session {
    /// Build a session; the seed comes from the config, or is drawn at random
    pub fn new(config: RoadConfig, track: TrackDef) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let world = build_track(&track.shapes, config.segment_length, config.rumble_length);
        let mut session = Self {
            config,
            track,
            world,
            player: Player::new(),
            parallax: Parallax::new(),
            seed,
            rng: StdRng::seed_from_u64(seed),
        };
        session.populate();
        session
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn populate(&mut self) {
        reset_sprites(&mut self.world, &mut self.rng);
        reset_cars(&mut self.world, &self.config, &mut self.rng);
        tracing::info!("Session '{}' ready (seed {})", self.track.name, self.seed);
    }

    /// Rebuild the course and start over from the same seed
    pub fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.world = build_track(&self.track.shapes, self.config.segment_length, self.config.rumble_length);
        self.player = Player::new();
        self.parallax = Parallax::new();
        self.populate();
    }

    /// Advance the simulation by one fixed step
    pub fn tick(&mut self, controls: &Controls) {
        let travelled = self.player.update(controls, &self.world, &self.config);
        let view = self.player.view();

        update_cars(&mut self.world, &view, &self.config);

        let curve = self.world.find_segment(view.position + self.config.player_z()).curve;
        self.parallax.update(curve, travelled, self.world.segment_length, &self.config.parallax);
    }

    /// Paint the current state
    pub fn render<C: Canvas>(&mut self, canvas: &mut C) -> FrameReport {
        let view = self.player.view();
        render_frame(canvas, &mut self.world, &view, &self.parallax, &self.config, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::RecordingCanvas;
    use crate::world::{Car, TrackShape, Length, sprites::PLAYER_STRAIGHT};

    fn session(seed: u64) -> Session {
        let config = RoadConfig { seed: Some(seed), ..Default::default() };
        Session::new(config, TrackDef::default())
    }

    fn snapshot(session: &Session) -> (f32, f32, f32, Vec<Car>) {
        let mut cars: Vec<Car> = session.world.segments.iter().flat_map(|s| s.cars.iter().copied()).collect();
        cars.sort_by_key(|car| car.id);
        (session.player.position, session.player.x, session.player.speed, cars)
    }

    #[test]
    fn test_same_seed_same_run() {
        let controls = Controls { accelerate: true, right: true, ..Default::default() };
        let mut a = session(77);
        let mut b = session(77);
        for _ in 0..120 {
            a.tick(&controls);
            b.tick(&controls);
        }
        assert_eq!(snapshot(&a), snapshot(&b));
        assert_eq!(a.parallax, b.parallax);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut s = session(3);
        let start = snapshot(&s);
        let sprites_before: usize = s.world.segments.iter().map(|seg| seg.sprites.len()).sum();
        for _ in 0..60 {
            s.tick(&Controls { accelerate: true, ..Default::default() });
        }
        assert_ne!(snapshot(&s), start);

        s.reset();
        assert_eq!(snapshot(&s), start);
        let sprites_after: usize = s.world.segments.iter().map(|seg| seg.sprites.len()).sum();
        assert_eq!(sprites_after, sprites_before);
    }

    #[test]
    fn test_tick_moves_player_and_traffic() {
        let mut s = session(8);
        let total = s.config.total_cars;
        s.tick(&Controls { accelerate: true, ..Default::default() });
        s.tick(&Controls { accelerate: true, ..Default::default() });

        assert!(s.player.position > 0.0);
        assert_eq!(s.world.car_count(), total);
        assert!(s.world.segments.iter().flat_map(|seg| &seg.cars).all(|car| car.moved));
    }

    #[test]
    fn test_parallax_follows_curves() {
        let track = TrackDef {
            name: "Bend".to_string(),
            shapes: vec![TrackShape::Curve {
                length: Length::Long,
                turn: crate::world::Turn::Right(crate::world::CurveSize::Hard),
                slope: crate::world::Slope::Flat,
            }],
        };
        let config = RoadConfig { seed: Some(1), total_cars: 0, ..Default::default() };
        let mut s = Session::new(config, track);
        for _ in 0..300 {
            s.tick(&Controls { accelerate: true, ..Default::default() });
        }
        assert!(s.parallax.sky > 0.0);
        assert!(s.parallax.trees != s.parallax.sky);
    }

    #[test]
    fn test_render_reports_player_sprite() {
        let mut s = session(5);
        let mut canvas = RecordingCanvas::new(s.config.width, s.config.height);
        let report = s.render(&mut canvas);
        assert_eq!(report.player_sprite, PLAYER_STRAIGHT);
        assert!(!report.painted.is_empty());
    }
}
