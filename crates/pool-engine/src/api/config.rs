use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Table and pocket geometry, in table units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Playing-field width (ball centres travel in `[r, width - r]`).
    pub width: f64,
    /// Playing-field height.
    pub height: f64,
    /// Radius of every ball.
    pub ball_radius: f64,
    /// Corner pocket mouth: wall response is suppressed inside this disk.
    pub corner_entrance_radius: f64,
    /// Corner pocket capture disk.
    pub corner_target_radius: f64,
    /// How far the corner capture disk sits outside the field corner, per axis.
    pub corner_target_offset: f64,
    /// Side pocket mouth radius.
    pub side_entrance_radius: f64,
    /// Side pocket capture disk radius.
    pub side_target_radius: f64,
    /// How far the side capture disk sits outside the rail.
    pub side_target_offset: f64,
    /// Multiplier on the capture radius.
    pub pocket_tolerance: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            ball_radius: 10.0,
            corner_entrance_radius: 28.0,
            corner_target_radius: 16.0,
            corner_target_offset: 4.0,
            side_entrance_radius: 24.0,
            side_target_radius: 14.0,
            side_target_offset: 6.0,
            pocket_tolerance: 1.0,
        }
    }
}

/// Simulation constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Velocity retained per 60 Hz frame (felt friction).
    pub friction: f64,
    /// Velocity retained along the normal on a cushion bounce.
    pub wall_restitution: f64,
    /// Restitution for ball-ball impacts.
    pub ball_restitution: f64,
    /// Below this speed (units/s) a ball snaps to rest.
    pub stop_speed: f64,
    /// Sub-steps per `PhysicsEngine::update` call.
    pub substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: 0.985,
            wall_restitution: 0.9,
            ball_restitution: 0.95,
            stop_speed: 2.0,
            substeps: 4,
        }
    }
}

/// Arcade reward constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Points for each object ball pocketed.
    pub ball_bonus: u32,
    /// Seconds added to the clock for each object ball pocketed.
    pub time_bonus: f64,
    /// Points taken away when the cue ball is pocketed.
    pub cue_penalty: u32,
    /// Points for clearing every object ball.
    pub rack_bonus: u32,
    /// Starting clock in seconds.
    pub start_time: f64,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            ball_bonus: 100,
            time_bonus: 5.0,
            cue_penalty: 50,
            rack_bonus: 1000,
            start_time: 120.0,
        }
    }
}

/// Top-level configuration for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub table: TableConfig,
    pub physics: PhysicsConfig,
    pub arcade: ArcadeConfig,
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f64,
    /// Cap on the cue ball's launch speed (units/s).
    pub max_shot_speed: f64,
    /// How far the shot predictor looks along the aim line.
    pub max_ray_length: f64,
    /// Seed for the arcade re-rack shuffle.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            table: TableConfig::default(),
            physics: PhysicsConfig::default(),
            arcade: ArcadeConfig::default(),
            fixed_dt: 1.0 / 60.0,
            max_shot_speed: 2000.0,
            max_ray_length: 1000.0,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every constant is in a range the simulation can use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.table;
        let p = &self.physics;
        if !(t.width > 0.0 && t.height > 0.0) {
            return Err(ConfigError::Invalid("table size must be positive"));
        }
        if !(t.ball_radius > 0.0) || t.ball_radius * 2.0 >= t.width.min(t.height) {
            return Err(ConfigError::Invalid("ball radius must be positive and fit the table"));
        }
        if !(t.corner_target_radius > 0.0 && t.side_target_radius > 0.0) {
            return Err(ConfigError::Invalid("pocket target radius must be positive"));
        }
        if t.corner_entrance_radius < t.corner_target_radius
            || t.side_entrance_radius < t.side_target_radius
        {
            return Err(ConfigError::Invalid(
                "pocket entrance must be at least as wide as its target",
            ));
        }
        if !(t.pocket_tolerance > 0.0) {
            return Err(ConfigError::Invalid("pocket tolerance must be positive"));
        }
        if !(p.friction > 0.0 && p.friction < 1.0) {
            return Err(ConfigError::Invalid("friction must be in (0, 1)"));
        }
        if !(p.wall_restitution > 0.0 && p.wall_restitution <= 1.0)
            || !(p.ball_restitution > 0.0 && p.ball_restitution <= 1.0)
        {
            return Err(ConfigError::Invalid("restitution must be in (0, 1]"));
        }
        if !(p.stop_speed >= 0.0) {
            return Err(ConfigError::Invalid("stop speed must not be negative"));
        }
        if p.substeps == 0 {
            return Err(ConfigError::Invalid("substeps must be at least 1"));
        }
        if !(self.fixed_dt > 0.0) {
            return Err(ConfigError::Invalid("fixed_dt must be positive"));
        }
        if !(self.max_shot_speed > 0.0 && self.max_ray_length > 0.0) {
            return Err(ConfigError::Invalid("shot speed and ray length caps must be positive"));
        }
        Ok(())
    }
}
