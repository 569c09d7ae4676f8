//! Billboard sprites: scenery, traffic and the player car
//!
//! Sprites are scaled by the perspective scale of the point they stand on
//! and anchored by fractional offsets (-0.5, -1.0 is bottom-centre). A clip
//! line cuts off the part of a sprite hidden behind a nearer hill crest.

use rand::Rng;
use crate::config::RoadConfig;
use crate::game::{PlayerView, Steer};
use crate::rasterizer::{interpolate, percent_remaining, Atlas, Canvas, Rect};
use crate::world::sprites::{
    PLAYER_LEFT, PLAYER_RIGHT, PLAYER_STRAIGHT, PLAYER_UPHILL_LEFT, PLAYER_UPHILL_RIGHT,
    PLAYER_UPHILL_STRAIGHT, SPRITE_SCALE,
};
use crate::world::World;
use super::camera::{depth_scale, ProjectedFrame};

/// Where a sprite lands on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePlacement {
    /// Perspective scale at the sprite's foot
    pub scale: f32,
    pub x: f32,
    pub y: f32,
    /// Anchor, as fractions of the destination size
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Blit one atlas sprite. Returns false when the clip line hides it completely.
pub fn render_sprite<C: Canvas>(
    canvas: &mut C,
    road_width: f32,
    source: Rect,
    placement: SpritePlacement,
    clip: Option<f32>,
    flip: bool,
) -> bool {
    let (width, _) = canvas.size();
    let factor = placement.scale * width as f32 / 2.0 * SPRITE_SCALE * road_width;
    let w = source.w * factor;
    let h = source.h * factor;
    let mut dst = Rect::new(placement.x + w * placement.offset_x, placement.y + h * placement.offset_y, w, h);

    let clip_h = clip.map_or(0.0, |clip_y| (dst.bottom() - clip_y).max(0.0));
    if clip_h >= dst.h {
        return false;
    }

    let mut src = source;
    src.h -= src.h * clip_h / dst.h;
    dst.h -= clip_h;
    canvas.blit(Atlas::Sprites, src, dst, flip);
    true
}

/// Player car variant for a steering intent and the slope underfoot
pub fn select_player_sprite(steer: Steer, uphill: bool) -> Rect {
    match (steer, uphill) {
        (Steer::Left, true) => PLAYER_UPHILL_LEFT,
        (Steer::Left, false) => PLAYER_LEFT,
        (Steer::Right, true) => PLAYER_UPHILL_RIGHT,
        (Steer::Right, false) => PLAYER_RIGHT,
        (Steer::Straight, true) => PLAYER_UPHILL_STRAIGHT,
        (Steer::Straight, false) => PLAYER_STRAIGHT,
    }
}

/// Vertical jitter of the player car, in pixels
pub fn player_bounce<R: Rng>(rng: &mut R, speed_percent: f32, resolution: f32, off_road: bool) -> f32 {
    let jitter = (rng.gen_range(0..=20) as f32 - 10.0) / 10.0;
    let bounce = 1.5 * rng.gen::<f32>() * speed_percent * resolution * jitter;
    if off_road { bounce * 5.0 } else { bounce }
}

/// Draw the player car at the bottom centre of the screen. Returns the
/// sprite rectangle chosen.
pub fn render_player<C: Canvas, R: Rng>(
    canvas: &mut C,
    player: &PlayerView,
    rise: f32,
    config: &RoadConfig,
    rng: &mut R,
) -> Rect {
    let (width, height) = canvas.size();
    let source = select_player_sprite(player.steer, rise > 0.0);
    let bounce = player_bounce(rng, player.speed / config.max_speed(), config.resolution(), player.off_road());
    let placement = SpritePlacement {
        scale: config.camera_depth() / config.player_z(),
        x: width as f32 / 2.0,
        y: height as f32 + bounce,
        offset_x: -0.5,
        offset_y: -1.0,
    };
    render_sprite(canvas, config.road_width, source, placement, None, false);
    source
}

/// Far-to-near pass over the projected window: traffic, then scenery, then
/// the player car on its own segment. Returns the player sprite rectangle.
pub fn render_sprites<C: Canvas, R: Rng>(
    canvas: &mut C,
    world: &World,
    frame: &ProjectedFrame,
    player: &PlayerView,
    config: &RoadConfig,
    rng: &mut R,
) -> Rect {
    let camera_depth = config.camera_depth();
    let half_width = frame.width / 2.0;
    let player_rise = world.segments[frame.player_index].rise();
    let mut player_sprite = select_player_sprite(player.steer, player_rise > 0.0);

    for i in (1..frame.window).rev() {
        let segment = &world.segments[world.offset_index(frame.base_index, i)];

        if segment.in_front {
            let near_scale = depth_scale(&segment.p1, camera_depth);
            let far_scale = depth_scale(&segment.p2, camera_depth);

            for car in &segment.cars {
                let percent = percent_remaining(car.z, world.segment_length);
                let scale = interpolate(near_scale, far_scale, percent);
                let placement = SpritePlacement {
                    scale,
                    x: interpolate(segment.p1.screen.x, segment.p2.screen.x, percent)
                        + scale * car.offset * config.road_width * half_width,
                    y: interpolate(segment.p1.screen.y, segment.p2.screen.y, percent),
                    offset_x: -0.5,
                    offset_y: -1.0,
                };
                let flip = car.offset >= player.x;
                render_sprite(canvas, config.road_width, car.source, placement, Some(segment.clip), flip);
            }

            for sprite in &segment.sprites {
                let placement = SpritePlacement {
                    scale: near_scale,
                    x: segment.p1.screen.x + near_scale * sprite.offset * config.road_width * half_width,
                    y: segment.p1.screen.y,
                    offset_x: if sprite.offset < 0.0 { -1.0 } else { 0.0 },
                    offset_y: -1.0,
                };
                render_sprite(canvas, config.road_width, sprite.source, placement, Some(segment.clip), false);
            }
        }

        if segment.index == frame.player_index {
            player_sprite = render_player(canvas, player, player_rise, config, rng);
        }
    }

    player_sprite
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use crate::rasterizer::RecordingCanvas;
    use crate::world::sprites::{CAR01, PALM_TREE};

    fn at_foot(scale: f32) -> SpritePlacement {
        SpritePlacement { scale, x: 100.0, y: 300.0, offset_x: -0.5, offset_y: -1.0 }
    }

    #[test]
    fn test_sprite_anchor_and_size() {
        let mut canvas = RecordingCanvas::new(640, 480);
        let scale = 0.001;
        assert!(render_sprite(&mut canvas, 2000.0, CAR01, at_foot(scale), None, true));

        let (atlas, src, dst, flip) = canvas.blits[0];
        let factor = scale * 320.0 * SPRITE_SCALE * 2000.0;
        assert_eq!(atlas, Atlas::Sprites);
        assert_eq!(src, CAR01);
        assert!(flip);
        assert!((dst.w - CAR01.w * factor).abs() < 1e-3);
        assert!((dst.h - CAR01.h * factor).abs() < 1e-3);
        assert!((dst.x + dst.w / 2.0 - 100.0).abs() < 1e-3);
        assert!((dst.bottom() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_clip_shrinks_source_and_destination() {
        let mut canvas = RecordingCanvas::new(640, 480);
        let placement = at_foot(0.002);
        render_sprite(&mut canvas, 2000.0, PALM_TREE, placement, None, false);
        let (_, _, full, _) = canvas.blits[0];

        // Hide the bottom quarter
        let clip_y = full.bottom() - full.h / 4.0;
        assert!(render_sprite(&mut canvas, 2000.0, PALM_TREE, placement, Some(clip_y), false));
        let (_, src, dst, _) = canvas.blits[1];

        assert!((dst.h - full.h * 0.75).abs() < 1e-3);
        assert!((src.h - PALM_TREE.h * 0.75).abs() < 1e-3);
        assert_eq!(src.y, PALM_TREE.y);
        assert_eq!(dst.y, full.y);
        assert_eq!(dst.w, full.w);
    }

    #[test]
    fn test_fully_clipped_sprite_is_skipped() {
        let mut canvas = RecordingCanvas::new(640, 480);
        let placement = at_foot(0.002);
        assert!(!render_sprite(&mut canvas, 2000.0, PALM_TREE, placement, Some(0.0), false));
        assert!(canvas.blits.is_empty());
    }

    #[test]
    fn test_player_sprite_selection() {
        assert_eq!(select_player_sprite(Steer::Straight, false), PLAYER_STRAIGHT);
        assert_eq!(select_player_sprite(Steer::Straight, true), PLAYER_UPHILL_STRAIGHT);
        assert_eq!(select_player_sprite(Steer::Left, false), PLAYER_LEFT);
        assert_eq!(select_player_sprite(Steer::Left, true), PLAYER_UPHILL_LEFT);
        assert_eq!(select_player_sprite(Steer::Right, false), PLAYER_RIGHT);
        assert_eq!(select_player_sprite(Steer::Right, true), PLAYER_UPHILL_RIGHT);
    }

    #[test]
    fn test_bounce_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            assert_eq!(player_bounce(&mut rng, 0.0, 1.0, true), 0.0);
            let on_road = player_bounce(&mut rng, 1.0, 1.0, false);
            assert!(on_road.abs() <= 1.5);
            let off_road = player_bounce(&mut rng, 1.0, 1.0, true);
            assert!(off_road.abs() <= 7.5);
        }
    }

    #[test]
    fn test_player_drawn_at_bottom_centre() {
        let mut canvas = RecordingCanvas::new(640, 480);
        let config = RoadConfig::default();
        let player = PlayerView { steer: Steer::Right, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(1);

        let chosen = render_player(&mut canvas, &player, 5.0, &config, &mut rng);
        assert_eq!(chosen, PLAYER_UPHILL_RIGHT);
        let (_, src, dst, flip) = canvas.blits[0];
        assert_eq!(src, PLAYER_UPHILL_RIGHT);
        assert!(!flip);
        assert!((dst.x + dst.w / 2.0 - 320.0).abs() < 1e-3);
        assert!((dst.bottom() - 480.0).abs() < 1e-3);
    }
}
