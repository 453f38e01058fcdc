//! Complete environment configuration.

use serde::{Deserialize, Serialize};

use crate::action::{ActionsConfig, JointActionConfig, JointPositionActionConfig};
use crate::command::{CommandsConfig, VelocityCommandConfig};
use crate::event::{EventsConfig, go2_rough_events};
use crate::observation::{ObservationsConfig, PolicyObservations};
use crate::reward::{RewardSet, go2_rough_rewards};
use crate::scene::SceneConfig;
use crate::terrain::RigidBodyMaterial;
use crate::termination::{CurriculumConfig, TerminationsConfig, go2_rough_terminations};
use crate::viewer::ViewerConfig;

/// Physics stepping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSettings {
    /// Physics timestep (s).
    pub dt: f64,
    /// Physics steps between renders.
    pub render_interval: usize,
    /// Default contact material.
    pub physics_material: RigidBodyMaterial,
}

/// A manager-based locomotion environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Scene.
    pub scene: SceneConfig,
    /// Action terms.
    pub actions: ActionsConfig,
    /// Observation groups.
    pub observations: ObservationsConfig,
    /// Events.
    pub events: EventsConfig,
    /// Command generators.
    pub commands: CommandsConfig,
    /// Rewards.
    pub rewards: RewardSet,
    /// Terminations.
    pub terminations: TerminationsConfig,
    /// Curriculum.
    pub curriculum: CurriculumConfig,
    /// Viewport camera.
    pub viewer: ViewerConfig,
    /// Physics steps per policy step.
    pub decimation: usize,
    /// Episode length (s).
    pub episode_length_s: f64,
    /// Physics settings.
    pub sim: SimSettings,
}

impl EnvConfig {
    /// Velocity tracking for the Unitree Go2 on rough terrain.
    ///
    /// # Example
    ///
    /// ```
    /// use locomotion_types::EnvConfig;
    ///
    /// let env = EnvConfig::go2_rough();
    /// assert_eq!(env.scene.num_envs, 4096);
    /// assert!((env.step_dt() - 0.02).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn go2_rough() -> Self {
        let scene = SceneConfig::go2_rough();
        let physics_material = scene.terrain.physics_material;

        let mut env = Self {
            scene,
            actions: ActionsConfig {
                joint_pos: JointActionConfig::JointPosition(
                    JointPositionActionConfig::all_joints("robot", 0.25),
                ),
            },
            observations: ObservationsConfig {
                policy: PolicyObservations::locomotion(),
            },
            events: go2_rough_events(),
            commands: CommandsConfig {
                base_velocity: VelocityCommandConfig::locomotion(),
            },
            rewards: go2_rough_rewards(),
            terminations: go2_rough_terminations(),
            curriculum: CurriculumConfig::default(),
            viewer: ViewerConfig::default(),
            decimation: 4,
            episode_length_s: 20.0,
            sim: SimSettings {
                dt: 0.005,
                render_interval: 4,
                physics_material,
            },
        };
        env.sync_derived();
        env
    }

    /// Recompute settings derived from other fields.
    ///
    /// The height scanner updates once per policy step and the contact
    /// sensor once per physics step. The terrain generator arranges tiles by
    /// difficulty only when a terrain-level curriculum is present.
    pub fn sync_derived(&mut self) {
        let step_dt = self.step_dt();
        if let Some(scanner) = self.scene.height_scanner.as_mut() {
            scanner.update_period = step_dt;
        }
        self.scene.contact_forces.update_period = self.sim.dt;

        let curriculum = self.curriculum.terrain_levels.is_some();
        if let Some(generator) = self.scene.terrain.generator.as_mut() {
            generator.curriculum = curriculum;
        }
    }

    /// Duration of one policy step (s).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn step_dt(&self) -> f64 {
        self.sim.dt * self.decimation as f64
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_go2_rough_derived_settings() {
        let env = EnvConfig::go2_rough();
        let scanner = env.scene.height_scanner.as_ref().unwrap();
        assert_relative_eq!(scanner.update_period, 0.02);
        assert_relative_eq!(env.scene.contact_forces.update_period, 0.005);
        assert!(env.scene.terrain.generator.as_ref().unwrap().curriculum);
        assert_relative_eq!(env.episode_length_s, 20.0);
    }

    #[test]
    fn test_sync_without_curriculum() {
        let mut env = EnvConfig::go2_rough();
        env.curriculum.terrain_levels = None;
        env.sync_derived();
        assert!(!env.scene.terrain.generator.as_ref().unwrap().curriculum);
    }

    #[test]
    fn test_go2_action_scale() {
        let env = EnvConfig::go2_rough();
        assert_eq!(env.actions.joint_pos.base().scale, 0.25);
        assert!(env.actions.joint_pos.base().use_default_offset);
    }

    #[test]
    fn test_serde_round_trip() {
        let env = EnvConfig::go2_rough();
        let json = serde_json::to_string(&env).unwrap();
        let back: EnvConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);
    }
}
