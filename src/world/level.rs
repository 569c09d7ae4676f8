//! Course loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable course files.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::config::ConfigError;
use super::{default_track, TrackShape};

/// A named list of track directives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDef {
    pub name: String,
    pub shapes: Vec<TrackShape>,
}

impl Default for TrackDef {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            shapes: default_track(),
        }
    }
}

/// Load a course from a RON file
pub fn load_track<P: AsRef<Path>>(path: P) -> Result<TrackDef, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_track_from_str(&contents)
}

/// Save a course to a RON file
pub fn save_track<P: AsRef<Path>>(track: &TrackDef, path: P) -> Result<(), ConfigError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(track, config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load a course from a RON string (for embedded courses or testing)
pub fn load_track_from_str(s: &str) -> Result<TrackDef, ConfigError> {
    let track: TrackDef = ron::from_str(s)?;
    if track.shapes.is_empty() {
        tracing::warn!("Course '{}' has no shapes", track.name);
    }
    Ok(track)
}
