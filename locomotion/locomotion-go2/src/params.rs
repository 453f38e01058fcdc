//! Flat parameter set of the custom Go2 task.

use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::task::CUSTOM_GO2_TASK;

/// Every knob of the custom Go2 task.
///
/// Ranges are given as `_min`/`_max` pairs. Values are trusted: nothing here
/// checks that a minimum is below its maximum or that an index names a real
/// joint.
///
/// # Example
///
/// ```
/// use locomotion_go2::CustomEnvParams;
///
/// let params = CustomEnvParams::from_json_str(
///     r#"{ "terrain_roughness_cm": 4.0, "eval_mode": true, "motor_Kp": 30.0 }"#,
/// )?;
/// assert_eq!(params.terrain_roughness_cm, 4.0);
/// assert_eq!(params.motor_kp, 30.0);
/// assert!(!params.display_mode);
/// # Ok::<(), locomotion_go2::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CustomEnvParams {
    /// Task id to register.
    pub task: String,

    /// Height noise of random rough terrain (cm). Zero or less disables it.
    pub terrain_roughness_cm: f64,
    /// Pyramid slope angle (deg). Positive climbs, negative descends.
    pub terrain_slope_degrees: f64,
    /// Give the policy a height scan of the terrain.
    pub height_scan: bool,
    /// Let the robot's links collide with each other.
    pub activate_self_collisions: bool,

    /// Lower bound of the mass added to the base (kg).
    pub base_mass_min: f64,
    /// Upper bound of the mass added to the base (kg).
    pub base_mass_max: f64,
    /// Lower bound of the foot friction multiplier.
    pub friction_mult_min: f64,
    /// Upper bound of the foot friction multiplier.
    pub friction_mult_max: f64,

    /// Lower bound of the per-episode motor strength multiplier.
    pub motor_strength_mult_min: f64,
    /// Upper bound of the per-episode motor strength multiplier.
    pub motor_strength_mult_max: f64,
    /// Joint indices subject to simulated motor faults.
    pub motor_fault_indices: BTreeSet<usize>,
    /// PD stiffness of the leg motors.
    #[serde(alias = "motor_Kp")]
    pub motor_kp: f64,
    /// PD damping of the leg motors.
    #[serde(alias = "motor_Kd")]
    pub motor_kd: f64,

    /// Extra action scale of hip joints.
    pub hip_scale_mult: f64,
    /// Joint indices eligible for a random action multiplier.
    pub action_mult_indices: BTreeSet<usize>,
    /// Lower bound of the action multiplier.
    pub action_mult_min: f64,
    /// Upper bound of the action multiplier.
    pub action_mult_max: f64,
    /// Number of eligible joints receiving a multiplier each episode.
    pub action_mult_count: usize,
    /// Lower bound of the per-episode joint bias (rad).
    pub joint_bias_min: f64,
    /// Upper bound of the per-episode joint bias (rad).
    pub joint_bias_max: f64,
    /// Hard clamp of joint targets (rad).
    pub joint_pos_clamp: (f64, f64),

    /// Magnitude of the adversarial push (m/s).
    pub adversary_magnitude: f64,

    /// Lower bound of the forward velocity command (m/s).
    pub target_x_vel_min: f64,
    /// Upper bound of the forward velocity command (m/s).
    pub target_x_vel_max: f64,
    /// Lower bound of the lateral velocity command (m/s).
    pub target_y_vel_min: f64,
    /// Upper bound of the lateral velocity command (m/s).
    pub target_y_vel_max: f64,
    /// Lower bound of the heading command (rad).
    pub target_heading_min: f64,
    /// Upper bound of the heading command (rad).
    pub target_heading_max: f64,
    /// Fraction of environments commanded to stand still.
    pub rel_standing_envs: f64,
    /// Lower bound of the time between command resamples (s).
    pub resample_time_min: f64,
    /// Upper bound of the time between command resamples (s).
    pub resample_time_max: f64,

    /// Lower bound of the yaw at reset (rad).
    pub start_yaw_min: f64,
    /// Upper bound of the yaw at reset (rad).
    pub start_yaw_max: f64,

    /// Turn off observation noise.
    pub disable_obs_noise: bool,
    /// In evaluation, also terminate on hip, thigh and head contacts.
    pub terminate_contacts: bool,
    /// Keep only tracking rewards and skip training-only resets.
    pub eval_mode: bool,

    /// Configure the scene for recording.
    pub display_mode: bool,
    /// Camera framing: `world`, `zoom` or `follow`.
    pub display_type: String,
    /// Recording height in pixels; the width follows a 16:9 frame.
    pub display_resolution: u32,
}

impl Default for CustomEnvParams {
    fn default() -> Self {
        Self {
            task: CUSTOM_GO2_TASK.to_owned(),
            terrain_roughness_cm: 0.0,
            terrain_slope_degrees: 0.0,
            height_scan: false,
            activate_self_collisions: false,
            base_mass_min: -1.0,
            base_mass_max: 3.0,
            friction_mult_min: 1.0,
            friction_mult_max: 1.0,
            motor_strength_mult_min: 1.0,
            motor_strength_mult_max: 1.0,
            motor_fault_indices: BTreeSet::new(),
            motor_kp: 25.0,
            motor_kd: 0.5,
            hip_scale_mult: 1.0,
            action_mult_indices: BTreeSet::new(),
            action_mult_min: 1.0,
            action_mult_max: 1.0,
            action_mult_count: 0,
            joint_bias_min: 0.0,
            joint_bias_max: 0.0,
            joint_pos_clamp: (-100.0, 100.0),
            adversary_magnitude: 0.0,
            target_x_vel_min: -1.0,
            target_x_vel_max: 1.0,
            target_y_vel_min: -1.0,
            target_y_vel_max: 1.0,
            target_heading_min: -PI,
            target_heading_max: PI,
            rel_standing_envs: 0.02,
            resample_time_min: 10.0,
            resample_time_max: 10.0,
            start_yaw_min: -PI,
            start_yaw_max: PI,
            disable_obs_noise: false,
            terminate_contacts: false,
            eval_mode: false,
            display_mode: false,
            display_type: "follow".to_owned(),
            display_resolution: 720,
        }
    }
}

impl CustomEnvParams {
    /// Parse parameters from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid parameter
    /// object.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read parameters from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it cannot be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Set the task id.
    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    /// Set the terrain roughness (cm) and slope (deg).
    #[must_use]
    pub fn with_terrain(mut self, roughness_cm: f64, slope_degrees: f64) -> Self {
        self.terrain_roughness_cm = roughness_cm;
        self.terrain_slope_degrees = slope_degrees;
        self
    }

    /// Enable evaluation mode.
    #[must_use]
    pub fn evaluation(mut self, terminate_contacts: bool) -> Self {
        self.eval_mode = true;
        self.terminate_contacts = terminate_contacts;
        self
    }

    /// Enable display mode with a camera framing and pixel height.
    #[must_use]
    pub fn display(mut self, display_type: impl Into<String>, resolution: u32) -> Self {
        self.display_mode = true;
        self.display_type = display_type.into();
        self.display_resolution = resolution;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_custom_task() {
        let params = CustomEnvParams::default();
        assert_eq!(params.task, CUSTOM_GO2_TASK);
        assert!(!params.eval_mode);
        assert_eq!(params.display_resolution, 720);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params = CustomEnvParams::from_json_str(
            r#"{ "motor_fault_indices": [3, 1, 3], "joint_pos_clamp": [-1.5, 1.5] }"#,
        )
        .unwrap();
        assert_eq!(params.motor_fault_indices, BTreeSet::from([1, 3]));
        assert_eq!(params.joint_pos_clamp, (-1.5, 1.5));
        assert_eq!(params.motor_kp, 25.0);
    }

    #[test]
    fn test_gain_aliases() {
        let params =
            CustomEnvParams::from_json_str(r#"{ "motor_Kp": 40.0, "motor_kd": 1.0 }"#).unwrap();
        assert_eq!(params.motor_kp, 40.0);
        assert_eq!(params.motor_kd, 1.0);
    }

    #[test]
    fn test_invalid_json() {
        let err = CustomEnvParams::from_json_str(r#"{ "eval_mode": "yes" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = CustomEnvParams::from_path("/nonexistent/params.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_builders() {
        let params = CustomEnvParams::default()
            .with_task("other")
            .with_terrain(5.0, -10.0)
            .evaluation(true)
            .display("zoom", 1080);
        assert_eq!(params.task, "other");
        assert_eq!(params.terrain_slope_degrees, -10.0);
        assert!(params.eval_mode && params.terminate_contacts);
        assert!(params.display_mode);
        assert_eq!(params.display_type, "zoom");
    }
}
