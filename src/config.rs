//! Road tunables
//!
//! Uses RON (Rusty Object Notation) for human-readable config files.
//! Every field has a default, so a config file only lists what it overrides.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Error type for config, track and atlas loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("Failed to load atlas {path}: {source}")]
    Atlas {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Parallax scroll rates per background layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpeeds {
    pub sky: f32,
    pub hills: f32,
    pub trees: f32,
}

impl Default for LayerSpeeds {
    fn default() -> Self {
        Self {
            sky: 0.001,
            hills: 0.002,
            trees: 0.003,
        }
    }
}

/// All fixed tunables, supplied once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    /// Framebuffer width in pixels
    pub width: usize,
    /// Framebuffer height in pixels
    pub height: usize,
    /// Simulation ticks per second
    pub fps: f32,
    /// Number of segments projected and drawn each frame
    pub draw_distance: usize,
    /// Half the road's width in world units
    pub road_width: f32,
    pub lanes: usize,
    /// Exponential fog density
    pub fog_density: f32,
    pub segment_length: f32,
    /// Segments per rumble-strip color band
    pub rumble_length: usize,
    pub camera_height: f32,
    /// Field of view in degrees
    pub field_of_view: f32,
    pub total_cars: usize,
    /// How hard curves push the player outward
    pub centrifugal: f32,
    pub accel: f32,
    pub decel: f32,
    pub braking: f32,
    pub parallax: LayerSpeeds,
    /// RNG seed for scenery and traffic; random when absent
    pub seed: Option<u64>,
    pub sprites_path: PathBuf,
    pub backgrounds_path: PathBuf,
    /// RON course file; the built-in course when absent
    pub track_path: Option<PathBuf>,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            width: crate::rasterizer::WIDTH,
            height: crate::rasterizer::HEIGHT,
            fps: 60.0,
            draw_distance: 300,
            road_width: 2000.0,
            lanes: 3,
            fog_density: 5.0,
            segment_length: 200.0,
            rumble_length: 3,
            camera_height: 1000.0,
            field_of_view: 100.0,
            total_cars: 200,
            centrifugal: 0.3,
            accel: 2400.0,
            decel: -2400.0,
            braking: -12000.0,
            parallax: LayerSpeeds::default(),
            seed: None,
            sprites_path: PathBuf::from("assets/sprites.png"),
            backgrounds_path: PathBuf::from("assets/background.png"),
            track_path: None,
        }
    }
}

impl RoadConfig {
    /// Seconds per tick
    pub fn dt(&self) -> f32 {
        1.0 / self.fps
    }

    /// Distance from camera to projection plane
    pub fn camera_depth(&self) -> f32 {
        1.0 / (self.field_of_view.to_radians() / 2.0).tan()
    }

    /// Player's distance in front of the camera
    pub fn player_z(&self) -> f32 {
        self.camera_height * self.camera_depth()
    }

    /// Top speed: one segment per tick, so collision checks never skip a segment
    pub fn max_speed(&self) -> f32 {
        self.segment_length / self.dt()
    }

    /// Below this speed off-road deceleration stops applying
    pub fn off_road_limit(&self) -> f32 {
        self.max_speed() / 4.0
    }

    pub fn off_road_decel(&self) -> f32 {
        -self.max_speed() / 2.0
    }

    /// Vertical scaling relative to a 480-line display
    pub fn resolution(&self) -> f32 {
        self.height as f32 / 480.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "framebuffer size {}x{} is empty",
                self.width, self.height
            )));
        }
        // Frames are uploaded as textures with u16 dimensions
        if self.width > u16::MAX as usize || self.height > u16::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "framebuffer size {}x{} exceeds {}",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        if self.fps <= 0.0 {
            return Err(ConfigError::Invalid(format!("fps must be positive, got {}", self.fps)));
        }
        if self.draw_distance == 0 {
            return Err(ConfigError::Invalid("draw_distance must be at least 1".to_string()));
        }
        if self.segment_length <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "segment_length must be positive, got {}",
                self.segment_length
            )));
        }
        if self.rumble_length == 0 {
            return Err(ConfigError::Invalid("rumble_length must be at least 1".to_string()));
        }
        if self.lanes == 0 {
            return Err(ConfigError::Invalid("lanes must be at least 1".to_string()));
        }
        if !(self.field_of_view > 0.0 && self.field_of_view < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "field_of_view must be in (0, 180), got {}",
                self.field_of_view
            )));
        }
        // The player car is painted by the sprite pass, which skips the
        // camera's own segment and stops at the draw distance
        let player_z = self.player_z();
        let max_player_z = (self.draw_distance - 1) as f32 * self.segment_length;
        if player_z < self.segment_length || player_z > max_player_z {
            return Err(ConfigError::Invalid(format!(
                "camera_height * camera_depth = {} must lie in [{}, {}]",
                player_z, self.segment_length, max_player_z
            )));
        }
        Ok(())
    }
}

/// Load and validate a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RoadConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load and validate a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<RoadConfig, ConfigError> {
    let config: RoadConfig = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &RoadConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}
