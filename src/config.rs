use std::path::Path;

use serde::{Deserialize, Serialize};

// Parameters for a show. Read once at startup, never changed at runtime.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShowParams {
    pub window_width: f32,
    pub window_height: f32,
    pub fullscreen: bool,
    pub show_stats: bool,
    pub soundtrack: Option<String>,
    pub background_top: [u8; 3],
    pub background_bottom: [u8; 3],

    #[serde(default)]
    pub burst: BurstParams,

    #[serde(default)]
    pub particle: ParticleParams,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct BurstParams {
    pub particles_per_burst: usize,
    pub ambient_interval_ms: u64,
    /// Ambient bursts land in the top `ambient_height_fraction` of the
    /// surface.
    pub ambient_height_fraction: f32,
}

impl Default for BurstParams {
    fn default() -> Self {
        BurstParams {
            particles_per_burst: 50,
            ambient_interval_ms: 1200,
            ambient_height_fraction: 0.5,
        }
    }
}

/// Half-open ranges each new particle samples from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ParticleParams {
    pub min_radius: f32,
    pub max_radius: f32,
    pub max_speed: f32,
    pub min_decay: f64,
    pub max_decay: f64,
}

impl Default for ParticleParams {
    fn default() -> Self {
        ParticleParams {
            min_radius: 2.0,
            max_radius: 6.0,
            max_speed: 3.0,
            min_decay: 0.01,
            max_decay: 0.03,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ShowParams {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let params: ShowParams = std::fs::read_to_string(path)?.parse()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        let p = &self.particle;
        let finite = [p.min_radius, p.max_radius, p.max_speed].iter().all(|v| v.is_finite())
            && p.min_decay.is_finite()
            && p.max_decay.is_finite()
            && self.window_width.is_finite()
            && self.window_height.is_finite()
            && self.burst.ambient_height_fraction.is_finite();
        if !finite {
            return invalid("numeric values must be finite");
        }
        if !(p.min_radius >= 0.0 && p.min_radius < p.max_radius) {
            return invalid("particle radius range must be non-negative and non-empty");
        }
        if !(p.max_speed > 0.0) {
            return invalid("particle max_speed must be positive");
        }
        if !(p.min_decay > 0.0 && p.min_decay < p.max_decay) {
            return invalid("particle decay range must be positive and non-empty");
        }
        let b = &self.burst;
        if b.ambient_interval_ms == 0 {
            return invalid("ambient_interval_ms must be greater than zero");
        }
        if !(b.ambient_height_fraction > 0.0 && b.ambient_height_fraction <= 1.0) {
            return invalid("ambient_height_fraction must be in (0, 1]");
        }
        if !(self.window_width > 0.0 && self.window_height > 0.0) {
            return invalid("window size must be positive");
        }
        Ok(())
    }
}

impl std::str::FromStr for ShowParams {
    type Err = ConfigError;
    fn from_str(serialized: &str) -> Result<Self, Self::Err> {
        let params: ShowParams = toml::from_str(serialized)?;
        params.validate()?;
        Ok(params)
    }
}

impl Default for ShowParams {
    fn default() -> Self {
        ShowParams {
            window_width: 1280.0,
            window_height: 720.0,
            fullscreen: false,
            show_stats: false,
            soundtrack: None,
            background_top: [0x00, 0x1d, 0x3d],
            background_bottom: [0x00, 0x35, 0x66],
            burst: BurstParams::default(),
            particle: ParticleParams::default(),
        }
    }
}

/// Loads `path`, falling back to defaults when it is missing or invalid.
pub fn load_or_default(path: impl AsRef<Path>) -> ShowParams {
    let path = path.as_ref();
    match ShowParams::load(path) {
        Ok(params) => params,
        Err(e) => {
            log::error!("Failed to load config file({}): {}", path.display(), e);
            ShowParams::default()
        }
    }
}
