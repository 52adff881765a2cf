use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/swipestack/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("swipestack").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise behaves like [`Config::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Reads, parses and validates the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Distances, durations and velocities are positive
    /// - Commit progress lies strictly between 0 and 1
    /// - Sections are non-empty, unique, and include the default section
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.gesture;
        positive("gesture.move_threshold_px", g.move_threshold_px)?;
        positive("gesture.tap_max_velocity", g.tap_max_velocity)?;
        positive("gesture.swipe_min_distance_px", g.swipe_min_distance_px)?;
        nonzero("gesture.tap_window_ms", g.tap_window_ms)?;
        nonzero("gesture.long_press_ms", g.long_press_ms)?;
        if g.axis_dominance < 1.0 {
            return Err(invalid(format!(
                "gesture.axis_dominance must be at least 1.0, got {}",
                g.axis_dominance
            )));
        }
        if g.tap_max_velocity < 2.0 * g.move_threshold_px {
            return Err(invalid(format!(
                "gesture.tap_max_velocity must be at least twice gesture.move_threshold_px, got {}",
                g.tap_max_velocity
            )));
        }
        if g.swipe_min_distance_px < g.move_threshold_px {
            return Err(invalid(
                "gesture.swipe_min_distance_px must not be below gesture.move_threshold_px"
                    .to_string(),
            ));
        }

        let s = &self.swipe_back;
        positive("swipe_back.commit_distance_px", s.commit_distance_px)?;
        positive("swipe_back.fling_velocity", s.fling_velocity)?;
        if !(s.commit_progress > 0.0 && s.commit_progress < 1.0) {
            return Err(invalid(format!(
                "swipe_back.commit_progress must be between 0 and 1, got {}",
                s.commit_progress
            )));
        }
        unit_interval("swipe_back.underlay_max_shade", s.underlay_max_shade)?;

        let sheet = &self.sheet;
        positive("sheet.dismiss_distance_px", sheet.dismiss_distance_px)?;
        unit_interval("sheet.backdrop_max_opacity", sheet.backdrop_max_opacity)?;

        let nav = &self.navigation;
        if nav.sections.is_empty() {
            return Err(invalid(
                "At least one navigation section must be configured".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for section in &nav.sections {
            if !seen.insert(section.as_str()) {
                return Err(invalid(format!("Duplicate navigation section '{}'", section)));
            }
        }
        if !seen.contains(nav.default_section.as_str()) {
            return Err(invalid(format!(
                "Default section '{}' not found in configured sections",
                nav.default_section
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError { message }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be positive, got {}", name, value)))
    }
}

fn nonzero(name: &str, value: u64) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be greater than zero", name)))
    }
}

fn unit_interval(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{} must be within 0..=1, got {}", name, value)))
    }
}
