//! Action term configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Joint position targets computed as `offset + scale * action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointPositionActionConfig {
    /// Robot the action drives.
    pub asset_name: String,
    /// Joint-name patterns the action covers.
    pub joint_names: Vec<String>,
    /// Action scale.
    pub scale: f64,
    /// Use the default joint positions as offset.
    pub use_default_offset: bool,
}

impl JointPositionActionConfig {
    /// Every joint of `asset_name`, offset from its default position.
    #[must_use]
    pub fn all_joints(asset_name: impl Into<String>, scale: f64) -> Self {
        Self {
            asset_name: asset_name.into(),
            joint_names: vec![".*".to_owned()],
            scale,
            use_default_offset: true,
        }
    }
}

/// Joint position action that is shifted, scaled and clamped before being
/// applied.
///
/// Hip joints get an extra scale multiplier. Each episode, `action_mult_count`
/// joints picked from `action_mult_indices` get a random multiplier from
/// `action_mult_range`, every joint gets a bias from `joint_bias_range`, and
/// the resulting target is clamped to `joint_pos_clamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftScaleClampActionConfig {
    /// Plain joint position parameters.
    pub base: JointPositionActionConfig,
    /// Extra scale applied to hip joints.
    pub hip_scale_mult: f64,
    /// Joint indices eligible for a random multiplier.
    pub action_mult_indices: BTreeSet<usize>,
    /// Range of the random multiplier.
    pub action_mult_range: (f64, f64),
    /// Number of eligible joints that receive a multiplier.
    pub action_mult_count: usize,
    /// Range of the per-episode joint bias (rad).
    pub joint_bias_range: (f64, f64),
    /// Hard clamp on the joint target (rad).
    pub joint_pos_clamp: (f64, f64),
}

/// Action term producing joint targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JointActionConfig {
    /// Plain joint position action.
    JointPosition(JointPositionActionConfig),
    /// Shifted, scaled and clamped joint position action.
    ShiftScaleClamp(ShiftScaleClampActionConfig),
}

impl JointActionConfig {
    /// Plain joint position parameters shared by every kind.
    #[must_use]
    pub const fn base(&self) -> &JointPositionActionConfig {
        match self {
            Self::JointPosition(base) => base,
            Self::ShiftScaleClamp(action) => &action.base,
        }
    }
}

/// Action manager configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionsConfig {
    /// Joint position term.
    pub joint_pos: JointActionConfig,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_base_accessor() {
        let plain = JointActionConfig::JointPosition(JointPositionActionConfig::all_joints(
            "robot", 0.25,
        ));
        assert_eq!(plain.base().scale, 0.25);

        let clamped = JointActionConfig::ShiftScaleClamp(ShiftScaleClampActionConfig {
            base: JointPositionActionConfig::all_joints("robot", 0.5),
            hip_scale_mult: 0.5,
            action_mult_indices: BTreeSet::new(),
            action_mult_range: (1.0, 1.0),
            action_mult_count: 0,
            joint_bias_range: (0.0, 0.0),
            joint_pos_clamp: (-3.0, 3.0),
        });
        assert_eq!(clamped.base().scale, 0.5);
        assert_eq!(clamped.base().joint_names, vec![".*".to_owned()]);
    }
}
