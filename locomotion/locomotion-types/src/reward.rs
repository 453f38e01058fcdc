//! Reward terms.
//!
//! The total reward is the weighted sum of the active terms. Removing a term
//! (an empty slot in the [`RewardSet`]) drops it from the sum.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::scene::SceneEntity;
use crate::term::TermSet;

/// Prefix shared by the velocity and heading tracking rewards.
pub const TRACKING_PREFIX: &str = "track";

/// Reward function with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fn", rename_all = "snake_case")]
pub enum RewardFn {
    /// Exponential kernel on planar velocity tracking error.
    TrackLinVelXyExp {
        /// Kernel width.
        std: f64,
        /// Command term to track.
        command_name: String,
    },
    /// Exponential kernel on yaw rate tracking error.
    TrackAngVelZExp {
        /// Kernel width.
        std: f64,
        /// Command term to track.
        command_name: String,
    },
    /// Squared vertical base velocity.
    LinVelZL2,
    /// Squared roll and pitch rates.
    AngVelXyL2,
    /// Squared tilt of the base.
    FlatOrientationL2,
    /// Squared joint torques.
    JointTorquesL2,
    /// Squared joint accelerations.
    JointAccL2,
    /// Squared change of the action between steps.
    ActionRateL2,
    /// Reward for long steps, paid at touchdown.
    FeetAirTime {
        /// Foot contact sensor.
        sensor: SceneEntity,
        /// Command term; no reward while it is zero.
        command_name: String,
        /// Air time that earns zero reward (s).
        threshold: f64,
    },
    /// Joint positions beyond the soft limits.
    JointPosLimits,
    /// Squared deviation of base height from a target.
    BaseHeightL2 {
        /// Target base height (m).
        target_height: f64,
    },
    /// Count of bodies with contact force above a threshold.
    UndesiredContacts {
        /// Contact sensor and bodies to watch.
        sensor: SceneEntity,
        /// Force threshold (N).
        threshold: f64,
    },
}

/// One weighted reward term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardTerm {
    /// Reward function.
    pub func: RewardFn,
    /// Weight in the sum.
    pub weight: f64,
}

impl RewardTerm {
    /// Create a reward term.
    #[must_use]
    pub const fn new(func: RewardFn, weight: f64) -> Self {
        Self { func, weight }
    }
}

/// Reward table.
///
/// # Example
///
/// ```
/// use locomotion_types::{RewardFn, RewardSet, RewardTerm};
///
/// let mut rewards = RewardSet::default();
/// rewards.insert("lin_vel_z_l2", RewardTerm::new(RewardFn::LinVelZL2, -2.0));
/// rewards.insert("action_rate_l2", RewardTerm::new(RewardFn::ActionRateL2, -0.01));
///
/// let total = rewards.weighted_sum([("lin_vel_z_l2", 0.5), ("action_rate_l2", 10.0)]);
/// assert!((total + 1.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardSet(TermSet<RewardTerm>);

impl RewardSet {
    /// Create a reward set from a term table.
    #[must_use]
    pub const fn new(terms: TermSet<RewardTerm>) -> Self {
        Self(terms)
    }

    /// Set the weight of an active term. Returns `false` if no such term is
    /// active.
    pub fn set_weight(&mut self, name: &str, weight: f64) -> bool {
        match self.0.get_mut(name) {
            Some(term) => {
                term.weight = weight;
                true
            }
            None => false,
        }
    }

    /// Weight of an active term.
    #[must_use]
    pub fn weight(&self, name: &str) -> Option<f64> {
        self.0.get(name).map(|term| term.weight)
    }

    /// Weighted sum of per-term values.
    ///
    /// Values for names without an active term are ignored.
    #[must_use]
    pub fn weighted_sum<'a>(&self, values: impl IntoIterator<Item = (&'a str, f64)>) -> f64 {
        values
            .into_iter()
            .filter_map(|(name, value)| self.weight(name).map(|weight| weight * value))
            .sum()
    }

    /// Copy keeping only the tracking rewards.
    #[must_use]
    pub fn tracking_only(&self) -> Self {
        Self(self.0.retain_prefix(TRACKING_PREFIX))
    }
}

impl Deref for RewardSet {
    type Target = TermSet<RewardTerm>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RewardSet {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Reward table of the Go2 rough task.
#[must_use]
pub fn go2_rough_rewards() -> RewardSet {
    let mut terms: TermSet<RewardTerm> = [
        (
            "track_lin_vel_xy_exp",
            RewardTerm::new(
                RewardFn::TrackLinVelXyExp {
                    std: 0.5,
                    command_name: "base_velocity".to_owned(),
                },
                1.5,
            ),
        ),
        (
            "track_ang_vel_z_exp",
            RewardTerm::new(
                RewardFn::TrackAngVelZExp {
                    std: 0.5,
                    command_name: "base_velocity".to_owned(),
                },
                0.75,
            ),
        ),
        ("lin_vel_z_l2", RewardTerm::new(RewardFn::LinVelZL2, -2.0)),
        ("ang_vel_xy_l2", RewardTerm::new(RewardFn::AngVelXyL2, -0.05)),
        ("dof_torques_l2", RewardTerm::new(RewardFn::JointTorquesL2, -0.0002)),
        ("dof_acc_l2", RewardTerm::new(RewardFn::JointAccL2, -2.5e-7)),
        ("action_rate_l2", RewardTerm::new(RewardFn::ActionRateL2, -0.01)),
        (
            "feet_air_time",
            RewardTerm::new(
                RewardFn::FeetAirTime {
                    sensor: SceneEntity::new("contact_forces").with_bodies(".*_foot"),
                    command_name: "base_velocity".to_owned(),
                    threshold: 0.5,
                },
                0.01,
            ),
        ),
        (
            "flat_orientation_l2",
            RewardTerm::new(RewardFn::FlatOrientationL2, 0.0),
        ),
        ("dof_pos_limits", RewardTerm::new(RewardFn::JointPosLimits, 0.0)),
    ]
    .into_iter()
    .collect();

    terms.remove("undesired_contacts");
    RewardSet::new(terms)
}
