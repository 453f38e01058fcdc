//! Velocity command generator configuration.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Sampling ranges of the velocity command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityRanges {
    /// Forward velocity (m/s).
    pub lin_vel_x: (f64, f64),
    /// Lateral velocity (m/s).
    pub lin_vel_y: (f64, f64),
    /// Yaw rate (rad/s), unused when heading commands are active.
    pub ang_vel_z: (f64, f64),
    /// Target heading (rad).
    pub heading: Option<(f64, f64)>,
}

/// Uniformly sampled base velocity command.
///
/// # Example
///
/// ```
/// use locomotion_types::VelocityCommandConfig;
///
/// let command = VelocityCommandConfig::locomotion().with_resampling_time(5.0, 8.0);
/// assert_eq!(command.resampling_time_range, (5.0, 8.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityCommandConfig {
    /// Robot the command applies to.
    pub asset_name: String,
    /// Time between resamples (s).
    pub resampling_time_range: (f64, f64),
    /// Fraction of environments commanded to stand still.
    pub rel_standing_envs: f64,
    /// Fraction of environments following a heading command.
    pub rel_heading_envs: f64,
    /// Derive the yaw rate from a heading target.
    pub heading_command: bool,
    /// Gain turning heading error into yaw rate.
    pub heading_control_stiffness: f64,
    /// Draw command arrows.
    pub debug_vis: bool,
    /// Sampling ranges.
    pub ranges: VelocityRanges,
}

impl VelocityCommandConfig {
    /// Unit-range velocity commands with heading control, resampled every 10 s.
    #[must_use]
    pub fn locomotion() -> Self {
        Self {
            asset_name: "robot".to_owned(),
            resampling_time_range: (10.0, 10.0),
            rel_standing_envs: 0.02,
            rel_heading_envs: 1.0,
            heading_command: true,
            heading_control_stiffness: 0.5,
            debug_vis: true,
            ranges: VelocityRanges {
                lin_vel_x: (-1.0, 1.0),
                lin_vel_y: (-1.0, 1.0),
                ang_vel_z: (-1.0, 1.0),
                heading: Some((-PI, PI)),
            },
        }
    }

    /// Set the resampling time range.
    #[must_use]
    pub fn with_resampling_time(mut self, min: f64, max: f64) -> Self {
        self.resampling_time_range = (min, max);
        self
    }
}

/// Command generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// Base velocity command.
    pub base_velocity: VelocityCommandConfig,
}
