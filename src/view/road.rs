//! Road pass and full-frame rendering
//!
//! The road is painted near to far. `maxy` tracks the highest screen row
//! painted so far; anything behind a crest is clipped against it, so no
//! depth buffer is needed.

use rand::Rng;
use crate::config::RoadConfig;
use crate::game::PlayerView;
use crate::rasterizer::{Canvas, Color, Rect, Trapezoid};
use crate::world::{Segment, World};
use super::background::{render_backgrounds, Parallax};
use super::camera::{project, ProjectedFrame};
use super::sprite::render_sprites;

pub const SKY_COLOR: Color = Color::new(0x72, 0xD7, 0xEE);
pub const FOG_COLOR: Color = Color::new(0x00, 0x51, 0x08);

/// What one frame drew
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: ProjectedFrame,
    /// Segments whose road bands were painted, nearest first
    pub painted: Vec<usize>,
    /// Player car variant, for sizing the HUD
    pub player_sprite: Rect,
}

fn fill_clipped<C: Canvas>(canvas: &mut C, quad: Trapezoid, clip_y: f32, color: Color) {
    if let Some(quad) = quad.clip_bottom(clip_y) {
        canvas.fill_trapezoid(&quad, color);
    }
}

/// Paint grass, rumble strips, road, lane markers and fog for one segment,
/// clipped at `clip_y`
pub fn render_segment<C: Canvas>(canvas: &mut C, segment: &Segment, lanes: usize, clip_y: f32) {
    let (width, _) = canvas.size();
    let width = width as f32;
    let (x1, y1, w1) = (segment.p1.screen.x, segment.p1.screen.y, segment.p1.screen.w);
    let (x2, y2, w2) = (segment.p2.screen.x, segment.p2.screen.y, segment.p2.screen.w);
    let colors = &segment.colors;

    let rumble1 = w1 / (2 * lanes).max(6) as f32;
    let rumble2 = w2 / (2 * lanes).max(6) as f32;
    let marker1 = w1 / (8 * lanes).max(32) as f32;
    let marker2 = w2 / (8 * lanes).max(32) as f32;

    let half = width / 2.0;
    fill_clipped(canvas, Trapezoid::band(half, y1, half, half, y2, half), clip_y, colors.grass);

    let left = Trapezoid::band(
        x1 - w1 - rumble1 / 2.0, y1, rumble1 / 2.0,
        x2 - w2 - rumble2 / 2.0, y2, rumble2 / 2.0,
    );
    let right = Trapezoid::band(
        x1 + w1 + rumble1 / 2.0, y1, rumble1 / 2.0,
        x2 + w2 + rumble2 / 2.0, y2, rumble2 / 2.0,
    );
    fill_clipped(canvas, left, clip_y, colors.rumble);
    fill_clipped(canvas, right, clip_y, colors.rumble);

    fill_clipped(canvas, Trapezoid::band(x1, y1, w1, x2, y2, w2), clip_y, colors.road);

    if colors.lane_markers {
        let lane_w1 = w1 * 2.0 / lanes as f32;
        let lane_w2 = w2 * 2.0 / lanes as f32;
        let mut lane_x1 = x1 - w1 + lane_w1;
        let mut lane_x2 = x2 - w2 + lane_w2;
        for _ in 1..lanes {
            let marker = Trapezoid::band(lane_x1, y1, marker1 / 2.0, lane_x2, y2, marker2 / 2.0);
            fill_clipped(canvas, marker, clip_y, colors.lane);
            lane_x1 += lane_w1;
            lane_x2 += lane_w2;
        }
    }

    if segment.fog < 1.0 {
        let bottom = y1.min(clip_y);
        if bottom > y2 {
            let alpha = (255.0 * (1.0 - segment.fog)) as u8;
            canvas.fill_rect(Rect::new(0.0, y2, width, bottom - y2), FOG_COLOR.alpha(alpha));
        }
    }
}

/// Near-to-far road pass. Records each segment's clip line and returns the
/// indices actually painted.
pub fn render_road<C: Canvas>(canvas: &mut C, world: &mut World, frame: &ProjectedFrame, config: &RoadConfig) -> Vec<usize> {
    let mut maxy = frame.height;
    let mut painted = Vec::new();

    for i in 0..frame.window {
        let index = world.offset_index(frame.base_index, i);
        let segment = &mut world.segments[index];
        segment.clip = maxy;

        if !segment.in_front
            || segment.p2.screen.y >= segment.p1.screen.y
            || segment.p2.screen.y >= maxy
        {
            continue;
        }

        render_segment(canvas, segment, config.lanes, maxy);
        painted.push(index);
        maxy = maxy.min(segment.p1.screen.y);
    }

    painted
}

/// Project and paint one complete frame: sky, parallax bands, road, then
/// sprites far to near
pub fn render_frame<C: Canvas, R: Rng>(
    canvas: &mut C,
    world: &mut World,
    player: &PlayerView,
    parallax: &Parallax,
    config: &RoadConfig,
    rng: &mut R,
) -> FrameReport {
    let (width, height) = canvas.size();
    let frame = project(world, player, config, (width, height));

    canvas.fill_rect(Rect::new(0.0, 0.0, width as f32, height as f32), SKY_COLOR);
    render_backgrounds(canvas, parallax, &config.parallax, frame.player_y, config.resolution());

    let painted = render_road(canvas, world, &frame, config);
    let player_sprite = render_sprites(canvas, world, &frame, player, config, rng);

    FrameReport {
        frame,
        painted,
        player_sprite,
    }
}
