//! Pseudo Road: Outrun-style pseudo-3D road renderer
//!
//! A software-rendered racing road with autonomous traffic:
//! - Segment-based track with eased curves and hills
//! - Painter's algorithm with hill-crest occlusion, no depth buffer
//! - Exponential distance fog and parallax background bands
//! - Traffic that steers around slower cars and the player

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod rasterizer;
mod world;
mod traffic;
mod view;
mod game;

use std::path::{Path, PathBuf};
use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;
use config::{load_config, save_config, ConfigError, RoadConfig};
use game::{Controls, Session};
use rasterizer::{Color, Framebuffer, SoftwareCanvas, Texture, HEIGHT, WIDTH};
use world::{load_track, save_track, TrackDef};

const DEFAULT_CONFIG: &str = "assets/road.ron";
const DEFAULT_TRACK: &str = "assets/track.ron";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Pseudo Road v{}", VERSION),
        window_width: WIDTH as i32 * 2,
        window_height: HEIGHT as i32 * 2,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// A missing config file is not an error; a broken one is
fn load_startup_config(path: &Path) -> Result<RoadConfig, ConfigError> {
    if !path.exists() {
        tracing::warn!("Config {} not found, using defaults", path.display());
        return Ok(RoadConfig::default());
    }
    let config = load_config(path)?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

fn load_atlas(path: &Path) -> Result<Texture, ConfigError> {
    let texture = Texture::from_file(path).map_err(|source| ConfigError::Atlas {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Loaded atlas {} ({}x{})", path.display(), texture.width, texture.height);
    Ok(texture)
}

/// Write the default config and course next to each other
fn write_defaults(config_path: &Path) -> Result<(), ConfigError> {
    let track_path = config_path
        .parent()
        .map(|dir| dir.join("track.ron"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TRACK));
    let config = RoadConfig {
        track_path: Some(track_path.clone()),
        ..Default::default()
    };
    save_config(&config, config_path)?;
    save_track(&TrackDef::default(), &track_path)?;
    tracing::info!("Wrote {} and {}", config_path.display(), track_path.display());
    Ok(())
}

/// Everything that must succeed before the first tick
fn startup(config_path: &Path) -> Result<(RoadConfig, TrackDef, Texture, Texture), ConfigError> {
    let config = load_startup_config(config_path)?;
    let track = match &config.track_path {
        Some(path) => {
            let track = load_track(path)?;
            tracing::info!("Loaded course '{}' from {}", track.name, path.display());
            track
        }
        None => TrackDef::default(),
    };
    let sprites = load_atlas(&config.sprites_path)?;
    let backgrounds = load_atlas(&config.backgrounds_path)?;
    Ok((config, track, sprites, backgrounds))
}

fn poll_controls() -> Controls {
    Controls {
        left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
        right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        accelerate: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
        brake: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let write = args.first().is_some_and(|arg| arg == "--write-defaults");
    if write {
        args.remove(0);
    }
    let config_path = args
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    if write {
        if let Err(e) = write_defaults(&config_path) {
            tracing::error!("Failed to write defaults: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let (config, track, sprites, backgrounds) = match startup(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let mut fb = Framebuffer::new(config.width, config.height);
    let dt = config.dt();
    let mut session = Session::new(config, track);
    let mut accumulator = 0.0f32;

    tracing::info!("=== Pseudo Road v{} ===", VERSION);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::R) {
            session.reset();
            tracing::info!("Reset (seed {})", session.seed());
        }

        // Fixed-step simulation; cap the catch-up after a stall
        let controls = poll_controls();
        accumulator += get_frame_time().min(0.25);
        while accumulator >= dt {
            session.tick(&controls);
            accumulator -= dt;
        }

        fb.clear(Color::BLACK);
        let report = {
            let mut canvas = SoftwareCanvas::new(&mut fb, &sprites, &backgrounds);
            session.render(&mut canvas)
        };

        // Convert framebuffer to texture and letterbox it into the window
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);

        let scale = (screen_width() / fb.width as f32).min(screen_height() / fb.height as f32);
        let draw_w = fb.width as f32 * scale;
        let draw_h = fb.height as f32 * scale;
        let draw_x = (screen_width() - draw_w) / 2.0;
        let draw_y = (screen_height() - draw_h) / 2.0;

        clear_background(BLACK);
        draw_texture_ex(
            &texture,
            draw_x,
            draw_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        // Speed readout, sized off the player car
        let font_size = (report.player_sprite.h * scale).max(16.0);
        draw_text(
            &format!("{:.0}", session.player.speed / 60.0),
            draw_x + report.player_sprite.w * scale / 2.0,
            draw_y + font_size * 1.5,
            font_size,
            WHITE,
        );

        next_frame().await;
    }
}
