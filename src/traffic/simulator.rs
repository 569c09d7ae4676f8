//! Traffic spawning and the per-tick update

use rand::Rng;
use crate::config::RoadConfig;
use crate::game::PlayerView;
use crate::rasterizer::wrap;
use crate::world::sprites::{CARS, SEMI_TYPE};
use crate::world::{Car, World};
use super::ai::update_car_offset;

/// Replace all traffic with `config.total_cars` freshly placed cars
pub fn reset_cars<R: Rng>(world: &mut World, config: &RoadConfig, rng: &mut R) {
    for segment in &mut world.segments {
        segment.cars.clear();
    }

    let max_speed = config.max_speed();
    for id in 0..config.total_cars {
        let car_type = rng.gen_range(0..CARS.len());
        let offset = rng.gen::<f32>() * (rng.gen_range(0..=18) as f32 - 9.0) / 10.0;
        let z = wrap(rng.gen::<f32>() * world.track_length, world.track_length);
        // Semis cruise in a narrower, slower band
        let spread = if car_type == SEMI_TYPE { 4.0 } else { 2.0 };
        let speed = max_speed / 4.0 + rng.gen::<f32>() * max_speed / spread;

        let index = world.segment_index(z);
        world.segments[index].cars.push(Car {
            id,
            source: CARS[car_type],
            offset,
            z,
            speed,
            moved: false,
        });
    }

    tracing::info!("Spawned {} cars", world.car_count());
}

/// Advance every car exactly once and move it into its new bucket.
///
/// Decisions are made against the world as it stood at the start of the
/// tick: buckets are scanned in ascending order, each car's update is staged,
/// and only then are the buckets rewritten.
pub fn update_cars(world: &mut World, player: &PlayerView, config: &RoadConfig) {
    for segment in &mut world.segments {
        for car in &mut segment.cars {
            car.moved = false;
        }
    }

    let dt = config.dt();
    let mut staged: Vec<(usize, Car)> = Vec::with_capacity(world.car_count());
    for (index, segment) in world.segments.iter().enumerate() {
        for car in segment.cars.iter().filter(|car| !car.moved) {
            let mut next = *car;
            next.offset += update_car_offset(world, car, index, player, config);
            next.z = wrap(car.z + dt * car.speed, world.track_length);
            next.moved = true;
            staged.push((world.segment_index(next.z), next));
        }
    }

    for segment in &mut world.segments {
        segment.cars.retain(|car| car.moved);
    }
    for (destination, car) in staged {
        world.segments[destination].cars.push(car);
    }
}
