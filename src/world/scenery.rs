//! Roadside scenery placement
//!
//! Layout rules are fixed; only offsets, plant choice and jitter come from
//! the seeded generator, so a seed reproduces the same roadside.

use rand::Rng;
use crate::rasterizer::Rect;
use super::sprites::{
    BILLBOARD01, BILLBOARD02, BILLBOARD03, BILLBOARD04, BILLBOARD05, BILLBOARD06,
    BILLBOARD07, BILLBOARD08, BILLBOARD09, BILLBOARDS, COLUMN, PALM_TREE, PLANTS, TREE1, TREE2,
};
use super::segment::Sprite;
use super::World;

/// Place a sprite on a segment; out-of-range segments are ignored
pub fn add_sprite(world: &mut World, segment: usize, source: Rect, offset: f32) {
    if let Some(seg) = world.segments.get_mut(segment) {
        seg.sprites.push(Sprite { source, offset });
    }
}

/// Random side: -1.0 or 1.0
fn random_side<R: Rng>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) { 1.0 } else { -1.0 }
}

/// Populate the roadside for a freshly built track
pub fn reset_sprites<R: Rng>(world: &mut World, rng: &mut R) {
    let count = world.segments.len();

    let billboards = [
        BILLBOARD07, BILLBOARD06, BILLBOARD08, BILLBOARD09, BILLBOARD01,
        BILLBOARD02, BILLBOARD03, BILLBOARD04, BILLBOARD05,
    ];
    for (i, billboard) in billboards.iter().enumerate() {
        add_sprite(world, 20 * (i + 1), *billboard, -1.0);
    }

    add_sprite(world, 240, BILLBOARD07, -1.2);
    add_sprite(world, 240, BILLBOARD06, 1.2);
    if count >= 25 {
        add_sprite(world, count - 25, BILLBOARD07, -1.2);
        add_sprite(world, count - 25, BILLBOARD06, 1.2);
    }

    // Palm-lined opening stretch, spacing widens as it goes
    let mut n = 10;
    while n < 200 {
        add_sprite(world, n, PALM_TREE, 0.5 + rng.gen::<f32>() * 0.5);
        add_sprite(world, n, PALM_TREE, 1.0 + rng.gen::<f32>() * 2.0);
        n += 4 + n / 100;
    }

    for n in (250..1000).step_by(5) {
        add_sprite(world, n, COLUMN, 1.1);
        add_sprite(world, n + rng.gen_range(0..=5), TREE1, -1.0 - rng.gen::<f32>() * 2.0);
        add_sprite(world, n + rng.gen_range(0..=5), TREE2, -1.0 - rng.gen::<f32>() * 2.0);
    }

    for n in (200..count).step_by(3) {
        let plant = PLANTS[rng.gen_range(0..PLANTS.len())];
        let side = random_side(rng);
        add_sprite(world, n, plant, side * (2.0 + rng.gen::<f32>() * 5.0));
    }

    if count > 50 {
        for n in (1000..count - 50).step_by(100) {
            let side = random_side(rng);
            let billboard = BILLBOARDS[rng.gen_range(0..BILLBOARDS.len())];
            add_sprite(world, n + rng.gen_range(0..=50), billboard, side);
            for _ in 0..20 {
                let plant = PLANTS[rng.gen_range(0..PLANTS.len())];
                add_sprite(world, n + rng.gen_range(0..=50), plant, side * (1.5 + rng.gen::<f32>()));
            }
        }
    }

    tracing::debug!(
        "Placed {} sprites",
        world.segments.iter().map(|s| s.sprites.len()).sum::<usize>()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use crate::world::{build_track, default_track};

    fn sprite_layout(seed: u64) -> Vec<Vec<Sprite>> {
        let mut world = build_track(&default_track(), 200.0, 3);
        let mut rng = StdRng::seed_from_u64(seed);
        reset_sprites(&mut world, &mut rng);
        world.segments.iter().map(|s| s.sprites.clone()).collect()
    }

    #[test]
    fn test_same_seed_same_layout() {
        assert_eq!(sprite_layout(42), sprite_layout(42));
        assert_ne!(sprite_layout(42), sprite_layout(43));
    }

    #[test]
    fn test_fixed_billboards() {
        let layout = sprite_layout(1);
        assert!(layout[20].contains(&Sprite { source: BILLBOARD07, offset: -1.0 }));
        assert!(layout[180].contains(&Sprite { source: BILLBOARD05, offset: -1.0 }));
        assert!(layout[240].contains(&Sprite { source: BILLBOARD06, offset: 1.2 }));
        let end = layout.len() - 25;
        assert!(layout[end].contains(&Sprite { source: BILLBOARD07, offset: -1.2 }));
    }

    #[test]
    fn test_offset_bounds() {
        let layout = sprite_layout(9);
        for sprites in &layout[10..200] {
            for s in sprites.iter().filter(|s| s.source == PALM_TREE) {
                assert!(s.offset >= 0.5 && s.offset <= 3.0);
            }
        }
        for sprites in &layout[250..1000] {
            for s in sprites.iter().filter(|s| s.source == TREE1 || s.source == TREE2) {
                assert!(s.offset <= -1.0 && s.offset >= -3.0);
            }
        }
    }

    #[test]
    fn test_short_track_drops_out_of_range() {
        let mut world = build_track(&[crate::world::TrackShape::Straight {
            length: crate::world::Length::Short,
        }], 200.0, 3);
        let mut rng = StdRng::seed_from_u64(3);
        reset_sprites(&mut world, &mut rng);
        assert_eq!(world.segments.len(), 75);
        assert!(world.segments[20].sprites.len() >= 1);
    }
}
