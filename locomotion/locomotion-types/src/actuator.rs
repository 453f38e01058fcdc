//! Actuator group configuration.
//!
//! Actuator groups bind joint-name patterns to a motor model. Only the
//! parameters live here; torque computation belongs to the simulator.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// DC motor with a linear torque-speed saturation curve and a PD position
/// controller.
///
/// # Example
///
/// ```
/// use locomotion_types::DcMotorConfig;
///
/// let motor = DcMotorConfig::go2_legs().with_gains(30.0, 0.8);
/// assert_eq!(motor.stiffness, 30.0);
/// assert_eq!(motor.effort_limit, 23.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcMotorConfig {
    /// Regex patterns of the joints driven by this group.
    pub joint_names_expr: Vec<String>,
    /// Maximum continuous torque (Nm).
    pub effort_limit: f64,
    /// Stall torque of the motor (Nm).
    pub saturation_effort: f64,
    /// Maximum joint velocity (rad/s).
    pub velocity_limit: f64,
    /// Proportional gain of the PD controller.
    pub stiffness: f64,
    /// Derivative gain of the PD controller.
    pub damping: f64,
    /// Joint friction.
    pub friction: f64,
}

impl DcMotorConfig {
    /// Hip, thigh and calf motors of the Unitree Go2.
    #[must_use]
    pub fn go2_legs() -> Self {
        Self {
            joint_names_expr: vec![
                ".*_hip_joint".to_owned(),
                ".*_thigh_joint".to_owned(),
                ".*_calf_joint".to_owned(),
            ],
            effort_limit: 23.5,
            saturation_effort: 23.5,
            velocity_limit: 30.0,
            stiffness: 25.0,
            damping: 0.5,
            friction: 0.0,
        }
    }

    /// Set the PD gains.
    #[must_use]
    pub fn with_gains(mut self, stiffness: f64, damping: f64) -> Self {
        self.stiffness = stiffness;
        self.damping = damping;
        self
    }
}

/// DC motor whose torque is scaled by a per-episode random multiplier, with
/// a set of joints that can be made to fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledDcMotorConfig {
    /// Underlying motor parameters.
    pub motor: DcMotorConfig,
    /// Range of the per-episode strength multiplier.
    pub strength_mult_range: (f64, f64),
    /// Joint indices that may suffer simulated faults.
    pub fault_joint_indices: BTreeSet<usize>,
}

/// Motor model of one actuator group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ActuatorConfig {
    /// Plain DC motor.
    DcMotor(DcMotorConfig),
    /// DC motor with randomized strength and faults.
    ScaledDcMotor(ScaledDcMotorConfig),
}

impl ActuatorConfig {
    /// Motor parameters shared by every model.
    #[must_use]
    pub const fn motor(&self) -> &DcMotorConfig {
        match self {
            Self::DcMotor(motor) => motor,
            Self::ScaledDcMotor(scaled) => &scaled.motor,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_go2_legs_cover_all_joints() {
        let motor = DcMotorConfig::go2_legs();
        assert_eq!(motor.joint_names_expr.len(), 3);
        assert!(motor.joint_names_expr.iter().any(|e| e.contains("calf")));
    }

    #[test]
    fn test_scaled_motor_exposes_motor() {
        let scaled = ActuatorConfig::ScaledDcMotor(ScaledDcMotorConfig {
            motor: DcMotorConfig::go2_legs().with_gains(40.0, 1.0),
            strength_mult_range: (0.9, 1.1),
            fault_joint_indices: BTreeSet::from([2, 5]),
        });
        assert_eq!(scaled.motor().stiffness, 40.0);
        assert_eq!(scaled.motor().damping, 1.0);
    }
}
