//! Observation group configuration.

use serde::{Deserialize, Serialize};

use crate::scene::SceneEntity;
use crate::term::TermSet;

/// Additive noise sampled uniformly from `[n_min, n_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformNoise {
    /// Lower bound.
    pub n_min: f64,
    /// Upper bound.
    pub n_max: f64,
}

impl UniformNoise {
    /// Symmetric noise in `[-magnitude, magnitude]`.
    #[must_use]
    pub const fn symmetric(magnitude: f64) -> Self {
        Self {
            n_min: -magnitude,
            n_max: magnitude,
        }
    }
}

/// Quantity an observation term reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fn", rename_all = "snake_case")]
pub enum ObservationFn {
    /// Base linear velocity in the base frame.
    BaseLinVel,
    /// Base angular velocity in the base frame.
    BaseAngVel,
    /// Gravity direction in the base frame.
    ProjectedGravity,
    /// Current command of a command term.
    GeneratedCommands {
        /// Command term name.
        command_name: String,
    },
    /// Joint positions relative to their defaults.
    JointPosRel,
    /// Joint velocities relative to their defaults.
    JointVelRel,
    /// Last applied action.
    LastAction,
    /// Terrain heights around the base.
    HeightScan {
        /// Height scanner to read.
        sensor: SceneEntity,
    },
}

/// One observation term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationTerm {
    /// Observed quantity.
    pub func: ObservationFn,
    /// Corruption noise, applied when the group enables corruption.
    pub noise: Option<UniformNoise>,
    /// Output clip range.
    pub clip: Option<(f64, f64)>,
}

impl ObservationTerm {
    /// Term without noise or clipping.
    #[must_use]
    pub const fn new(func: ObservationFn) -> Self {
        Self {
            func,
            noise: None,
            clip: None,
        }
    }

    /// Add symmetric uniform noise.
    #[must_use]
    pub fn with_noise(mut self, magnitude: f64) -> Self {
        self.noise = Some(UniformNoise::symmetric(magnitude));
        self
    }

    /// Clip the output.
    #[must_use]
    pub fn with_clip(mut self, min: f64, max: f64) -> Self {
        self.clip = Some((min, max));
        self
    }
}

/// Observations fed to the policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyObservations {
    /// Terms keyed by name.
    pub terms: TermSet<ObservationTerm>,
    /// Apply each term's noise.
    pub enable_corruption: bool,
    /// Concatenate terms into one vector.
    pub concatenate_terms: bool,
}

impl PolicyObservations {
    /// Proprioception, command, last action and height scan, all corrupted.
    #[must_use]
    pub fn locomotion() -> Self {
        let terms = [
            (
                "base_lin_vel",
                ObservationTerm::new(ObservationFn::BaseLinVel).with_noise(0.1),
            ),
            (
                "base_ang_vel",
                ObservationTerm::new(ObservationFn::BaseAngVel).with_noise(0.2),
            ),
            (
                "projected_gravity",
                ObservationTerm::new(ObservationFn::ProjectedGravity).with_noise(0.05),
            ),
            (
                "velocity_commands",
                ObservationTerm::new(ObservationFn::GeneratedCommands {
                    command_name: "base_velocity".to_owned(),
                }),
            ),
            (
                "joint_pos",
                ObservationTerm::new(ObservationFn::JointPosRel).with_noise(0.01),
            ),
            (
                "joint_vel",
                ObservationTerm::new(ObservationFn::JointVelRel).with_noise(1.5),
            ),
            ("actions", ObservationTerm::new(ObservationFn::LastAction)),
            (
                "height_scan",
                ObservationTerm::new(ObservationFn::HeightScan {
                    sensor: SceneEntity::new("height_scanner"),
                })
                .with_noise(0.1)
                .with_clip(-1.0, 1.0),
            ),
        ]
        .into_iter()
        .collect();

        Self {
            terms,
            enable_corruption: true,
            concatenate_terms: true,
        }
    }
}

/// Observation groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationsConfig {
    /// Policy group.
    pub policy: PolicyObservations,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_locomotion_terms() {
        let policy = PolicyObservations::locomotion();
        assert_eq!(policy.terms.active_count(), 8);
        assert!(policy.enable_corruption);

        let scan = policy.terms.get("height_scan").unwrap();
        assert_eq!(scan.clip, Some((-1.0, 1.0)));
        assert_eq!(scan.noise, Some(UniformNoise::symmetric(0.1)));
    }

    #[test]
    fn test_actions_term_is_noiseless() {
        let policy = PolicyObservations::locomotion();
        assert!(policy.terms.get("actions").unwrap().noise.is_none());
    }
}
