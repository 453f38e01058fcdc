//! Event hooks: domain randomization and resets.
//!
//! Each [`EventTerm`] names a hook, the phase it fires in, and its bound
//! parameters. Parameters are typed per hook instead of being a free-form map.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::scene::SceneEntity;
use crate::term::TermSet;

/// Simulation phase an event fires in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventMode {
    /// Once, when the simulation starts.
    Startup,
    /// Whenever an environment resets.
    Reset,
    /// Repeatedly, after a delay sampled from `range_s` seconds.
    Interval {
        /// Delay range (s). `(0, 0)` fires every step.
        range_s: (f64, f64),
    },
}

/// How a sampled mass value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassOperation {
    /// Add to the default mass.
    Add,
    /// Multiply the default mass.
    Scale,
    /// Replace the default mass.
    Abs,
}

/// Per-axis sampling ranges for a root pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseRange {
    /// Position offset along x (m).
    pub x: (f64, f64),
    /// Position offset along y (m).
    pub y: (f64, f64),
    /// Yaw angle (rad).
    pub yaw: (f64, f64),
}

/// Per-axis sampling ranges for a root twist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwistRange {
    /// Linear velocity along x (m/s).
    pub x: (f64, f64),
    /// Linear velocity along y (m/s).
    pub y: (f64, f64),
    /// Linear velocity along z (m/s).
    pub z: (f64, f64),
    /// Angular velocity around x (rad/s).
    pub roll: (f64, f64),
    /// Angular velocity around y (rad/s).
    pub pitch: (f64, f64),
    /// Angular velocity around z (rad/s).
    pub yaw: (f64, f64),
}

impl TwistRange {
    /// Zero twist on every axis.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            x: (0.0, 0.0),
            y: (0.0, 0.0),
            z: (0.0, 0.0),
            roll: (0.0, 0.0),
            pitch: (0.0, 0.0),
            yaw: (0.0, 0.0),
        }
    }
}

/// Hook invoked by an event, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fn", rename_all = "snake_case")]
pub enum EventFn {
    /// Sample contact material coefficients for an asset's bodies.
    RandomizeRigidBodyMaterial {
        /// Bodies to randomize.
        asset: SceneEntity,
        /// Static friction range.
        static_friction_range: (f64, f64),
        /// Dynamic friction range.
        dynamic_friction_range: (f64, f64),
        /// Restitution range.
        restitution_range: (f64, f64),
        /// Number of discrete materials to draw from.
        num_buckets: usize,
    },
    /// Scale default friction by a sampled multiplier, quantized into buckets.
    RandomizeFriction {
        /// Bodies to randomize.
        asset: SceneEntity,
        /// Friction multiplier range.
        friction_mult_range: (f64, f64),
        /// Static friction before scaling.
        static_friction_default: f64,
        /// Dynamic friction before scaling.
        dynamic_friction_default: f64,
        /// Restitution of every bucket.
        restitution_default: f64,
        /// Number of discrete friction values.
        num_buckets: usize,
    },
    /// Sample body masses.
    RandomizeRigidBodyMass {
        /// Bodies to randomize.
        asset: SceneEntity,
        /// Sampling range of the mass value (kg or factor).
        mass_distribution_params: (f64, f64),
        /// How the sampled value is applied.
        operation: MassOperation,
    },
    /// Apply a constant external wrench sampled on reset.
    ApplyExternalForceTorque {
        /// Bodies to push.
        asset: SceneEntity,
        /// Force range (N).
        force_range: (f64, f64),
        /// Torque range (Nm).
        torque_range: (f64, f64),
    },
    /// Reset the root state to a uniformly sampled pose and twist.
    ResetRootStateUniform {
        /// Pose ranges relative to the environment origin.
        pose_range: PoseRange,
        /// Twist ranges.
        velocity_range: TwistRange,
    },
    /// Reset joints to their defaults scaled by a sampled factor.
    ResetJointsByScale {
        /// Position scale range.
        position_range: (f64, f64),
        /// Velocity scale range.
        velocity_range: (f64, f64),
    },
    /// Reset joints either to a standing pose or to a perturbed default,
    /// choosing by a uniform draw against `stand_range`.
    ResetJointsTrain {
        /// Range of the standing probability draw.
        stand_range: (f64, f64),
        /// Position perturbation range (rad).
        position_delta_range: (f64, f64),
    },
    /// Set the root velocity to a sampled value.
    PushBySettingVelocity {
        /// Twist ranges.
        velocity_range: TwistRange,
    },
    /// Adversarial velocity perturbation of bounded magnitude.
    AdversarialPushBySettingVelocity {
        /// Maximum velocity change (m/s).
        magnitude: f64,
    },
}

/// One event term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTerm {
    /// Hook and parameters.
    pub func: EventFn,
    /// Firing phase.
    pub mode: EventMode,
}

impl EventTerm {
    /// Create an event term.
    #[must_use]
    pub const fn new(func: EventFn, mode: EventMode) -> Self {
        Self { func, mode }
    }
}

/// Event table.
pub type EventsConfig = TermSet<EventTerm>;

/// Randomization and reset events of the Go2 rough task.
///
/// The base material is fixed, the base gets -1 to 3 kg of extra mass, the
/// robot resets anywhere within half a meter with any heading, and there are
/// no random pushes.
#[must_use]
pub fn go2_rough_events() -> EventsConfig {
    let mut events: EventsConfig = [
        (
            "physics_material",
            EventTerm::new(
                EventFn::RandomizeRigidBodyMaterial {
                    asset: SceneEntity::new("robot").with_bodies(".*"),
                    static_friction_range: (0.8, 0.8),
                    dynamic_friction_range: (0.6, 0.6),
                    restitution_range: (0.0, 0.0),
                    num_buckets: 64,
                },
                EventMode::Startup,
            ),
        ),
        (
            "add_base_mass",
            EventTerm::new(
                EventFn::RandomizeRigidBodyMass {
                    asset: SceneEntity::new("robot").with_bodies("base"),
                    mass_distribution_params: (-1.0, 3.0),
                    operation: MassOperation::Add,
                },
                EventMode::Startup,
            ),
        ),
        (
            "base_external_force_torque",
            EventTerm::new(
                EventFn::ApplyExternalForceTorque {
                    asset: SceneEntity::new("robot").with_bodies("base"),
                    force_range: (0.0, 0.0),
                    torque_range: (0.0, 0.0),
                },
                EventMode::Reset,
            ),
        ),
        (
            "reset_base",
            EventTerm::new(
                EventFn::ResetRootStateUniform {
                    pose_range: PoseRange {
                        x: (-0.5, 0.5),
                        y: (-0.5, 0.5),
                        yaw: (-PI, PI),
                    },
                    velocity_range: TwistRange::zero(),
                },
                EventMode::Reset,
            ),
        ),
        (
            "reset_robot_joints",
            EventTerm::new(
                EventFn::ResetJointsByScale {
                    position_range: (1.0, 1.0),
                    velocity_range: (0.0, 0.0),
                },
                EventMode::Reset,
            ),
        ),
    ]
    .into_iter()
    .collect();

    events.remove("push_robot");
    events
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_go2_events() {
        let events = go2_rough_events();
        assert_eq!(events.active_count(), 5);
        assert!(events.has_slot("push_robot"));
        assert!(!events.contains("push_robot"));

        let mass = events.get("add_base_mass").unwrap();
        assert_eq!(mass.mode, EventMode::Startup);
        match &mass.func {
            EventFn::RandomizeRigidBodyMass {
                mass_distribution_params,
                operation,
                ..
            } => {
                assert_eq!(*mass_distribution_params, (-1.0, 3.0));
                assert_eq!(*operation, MassOperation::Add);
            }
            other => panic!("unexpected hook {other:?}"),
        }
    }

    #[test]
    fn test_interval_mode_serde() {
        let mode = EventMode::Interval { range_s: (0.0, 0.0) };
        let json = serde_json::to_value(mode).unwrap();
        assert_eq!(json["kind"], "interval");
        let back: EventMode = serde_json::from_value(json).unwrap();
        assert_eq!(back, mode);
    }
}
