// config.rs

use bevy::prelude::*;
use serde::Deserialize;
use std::time::Duration;

const GREETING_JSON: &str = include_str!("../assets/greeting.json");

/// Environment switch that forces reduced motion (native builds only)
const REDUCED_MOTION_ENV: &str = "GREETING_REDUCED_MOTION";

/// Top-level tunables for the greeting surface
#[derive(Resource, Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GreetingConfig {
    pub placement: PlacementConfig,
    pub surface: SurfaceConfig,
    pub motion: MotionConfig,
}

/// Safe-position search and initial placement constants
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Inset from every container edge
    pub padding: f32,
    /// Extra slack when testing overlap with the accept control
    pub avoidance_margin: f32,
    /// Random draws before giving up and using the fallback
    pub retry_budget: u32,
    /// Fixed minimum travel from the previous center (px)
    pub min_distance: f32,
    /// Distance floor as a fraction of container width
    pub min_distance_fraction: f32,
    /// Full width of the fallback jitter box
    pub fallback_jitter: [f32; 2],
    /// Inset used by the deterministic initial placement
    pub initial_padding: f32,
    /// Gap below the accept control in the narrow layout
    pub narrow_gap: f32,
    /// Fractional anchor of the container in the wide layout
    pub wide_anchor: [f32; 2],
    pub settle_ms: u64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            padding: 10.0,
            avoidance_margin: 18.0,
            retry_budget: 18,
            min_distance: 64.0,
            min_distance_fraction: 0.18,
            fallback_jitter: [80.0, 40.0],
            initial_padding: 12.0,
            narrow_gap: 12.0,
            wide_anchor: [0.72, 0.55],
            settle_ms: 260,
        }
    }
}

impl PlacementConfig {
    /// Minimum travel between consecutive centers for a container this wide
    pub fn min_travel(&self, container_width: f32) -> f32 {
        self.min_distance
            .min(container_width * self.min_distance_fraction)
    }

    pub fn settle_window(&self, reduced_motion: bool) -> Duration {
        if reduced_motion {
            Duration::ZERO
        } else {
            Duration::from_millis(self.settle_ms)
        }
    }
}

/// Static text and control sizing for the surface
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    pub headline: String,
    pub accept_label: String,
    pub evade_label: String,
    pub result_line: String,
    pub accept_size: [f32; 2],
    pub evade_size: [f32; 2],
    /// Height reserved above the arena for the headline
    pub headline_band: f32,
    /// Viewport width at or below which the narrow layout applies
    pub narrow_breakpoint: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            headline: "Ти будеш моєю валентинкою?".to_string(),
            accept_label: "Так".to_string(),
            evade_label: "Ні".to_string(),
            result_line: "Мені зараз дуже тепло.".to_string(),
            accept_size: [140.0, 56.0],
            evade_size: [120.0, 52.0],
            headline_band: 180.0,
            narrow_breakpoint: 540.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    pub reduced_motion: bool,
    pub heart_count: usize,
    pub result_fade_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            heart_count: 18,
            result_fade_ms: 380,
        }
    }
}

impl GreetingConfig {
    /// Load the embedded configuration
    pub fn load() -> Result<Self, String> {
        let mut config = Self::from_json(GREETING_JSON)?;
        if reduced_motion_forced() {
            config.motion.reduced_motion = true;
        }
        Ok(config)
    }

    fn from_json(json: &str) -> Result<Self, String> {
        let config: GreetingConfig =
            serde_json::from_str(json).map_err(|e| format!("Invalid greeting config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        let p = &self.placement;
        if p.padding < 0.0 || p.avoidance_margin < 0.0 || p.initial_padding < 0.0 {
            return Err("Paddings and margins must be non-negative".to_string());
        }
        if !(0.0..=1.0).contains(&p.wide_anchor[0]) || !(0.0..=1.0).contains(&p.wide_anchor[1]) {
            return Err(format!(
                "Wide anchor {:?} must lie within the container (0..=1)",
                p.wide_anchor
            ));
        }
        let s = &self.surface;
        if s.accept_size.iter().chain(&s.evade_size).any(|v| *v <= 0.0) {
            return Err("Control sizes must be positive".to_string());
        }
        Ok(())
    }

    pub fn reduced_motion(&self) -> bool {
        self.motion.reduced_motion
    }

    pub fn result_fade(&self) -> Duration {
        if self.motion.reduced_motion {
            Duration::ZERO
        } else {
            Duration::from_millis(self.motion.result_fade_ms)
        }
    }
}

/// Where the active configuration came from
#[derive(Resource, Debug, Clone)]
pub enum ConfigSource {
    Embedded,
    /// Embedded config was rejected; running on defaults
    Defaults(String),
}

/// Load the configuration, falling back to defaults on error
pub fn load_or_default() -> (GreetingConfig, ConfigSource) {
    match GreetingConfig::load() {
        Ok(config) => (config, ConfigSource::Embedded),
        Err(err) => {
            let mut config = GreetingConfig::default();
            config.motion.reduced_motion = reduced_motion_forced();
            (config, ConfigSource::Defaults(err))
        }
    }
}

/// System: Log the configuration once logging is up
pub fn report_config(config: Res<GreetingConfig>, source: Res<ConfigSource>) {
    match source.as_ref() {
        ConfigSource::Embedded => info!(
            "Greeting config loaded: {} retries, {}px avoidance margin, {} hearts",
            config.placement.retry_budget,
            config.placement.avoidance_margin,
            config.motion.heart_count
        ),
        ConfigSource::Defaults(err) => warn!("{} - using built-in defaults", err),
    }
}

fn reduced_motion_forced() -> bool {
    std::env::var(REDUCED_MOTION_ENV)
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
