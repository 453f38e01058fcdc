//! Builds the custom Go2 task from a parameter set.
//!
//! The environment starts from [`EnvConfig::go2_rough`] and is edited in a
//! fixed order of stages; the runner starts from [`RunnerConfig::go2_rough`].
//! Registration happens only after both configurations are complete, so a
//! failed build leaves the registry untouched.

use locomotion_registry::{TaskEntry, TaskRegistry};
use locomotion_types::{
    ActuatorConfig, DcMotorConfig, EnvConfig, EventFn, EventMode, EventTerm, JointActionConfig,
    JointPositionActionConfig, RewardFn, RewardTerm, RunnerConfig, ScaledDcMotorConfig,
    SceneEntity, ShiftScaleClampActionConfig, TerminationFn, TerrainGeneratorConfig,
    VisualMaterial,
};
use tracing::{debug, info};

use crate::Result;
use crate::error::ConfigError;
use crate::params::CustomEnvParams;
use crate::selection::{TerrainKind, ViewerMode};
use crate::task::CustomTask;

/// Body pattern of the base-contact termination in evaluation.
pub const EVAL_CONTACT_BODIES: &str = "base|.*hip|.*thigh|Head_upper|Head_lower";

const ACTUATOR_GROUP: &str = "base_legs";
const ACTION_SCALE: f64 = 0.25;
const GENERATOR_TILE_SIZE: f64 = 50.0;
const GENERATOR_GRID: usize = 4;

/// Build the PPO runner configuration.
///
/// The runner does not depend on the parameters.
#[must_use]
pub fn build_runner_config(_params: &CustomEnvParams) -> RunnerConfig {
    RunnerConfig::go2_rough()
        .with_iterations(10_000, 5_000)
        .with_experiment("unitree_go2_custom")
        .with_project("gram")
}

/// Build the environment configuration.
///
/// # Errors
///
/// Returns [`ConfigError::UnrecognizedTask`] if `params.task` is not a known
/// custom task, and [`ConfigError::MissingTerm`] if the base configuration
/// lacks a term that has to be edited.
pub fn build_env_config(params: &CustomEnvParams) -> Result<EnvConfig> {
    let task: CustomTask = params.task.parse()?;

    let mut env = EnvConfig::go2_rough();

    apply_scene(&mut env, params);
    apply_display(&mut env, params);
    apply_actions(&mut env, params);
    apply_events(&mut env, params)?;
    apply_commands(&mut env, params);
    apply_observations(&mut env, params);
    apply_rewards(&mut env, task)?;
    if params.eval_mode {
        apply_evaluation(&mut env, params)?;
    }

    Ok(env)
}

/// Build both configurations and register them under `params.task`.
///
/// # Errors
///
/// Propagates build errors; nothing is registered in that case.
pub fn register_custom_env(registry: &mut TaskRegistry, params: &CustomEnvParams) -> Result<()> {
    let task: CustomTask = params.task.parse()?;
    let runner = build_runner_config(params);
    let env = build_env_config(params)?;

    info!(
        task = %task,
        eval_mode = params.eval_mode,
        display_mode = params.display_mode,
        "Built custom Go2 task"
    );

    registry.register(TaskEntry::new(task.id(), env, runner).without_env_checker());
    Ok(())
}

fn apply_scene(env: &mut EnvConfig, params: &CustomEnvParams) {
    if params.activate_self_collisions {
        env.scene
            .robot
            .spawn
            .articulation_props
            .enabled_self_collisions = true;
    }

    let kind = TerrainKind::select(
        params.terrain_roughness_cm,
        params.terrain_slope_degrees,
        params.display_mode,
    );
    debug!(terrain = ?kind, "Selected terrain");

    let terrain = &mut env.scene.terrain;
    if kind.uses_generator() {
        let mut generator = terrain
            .generator
            .take()
            .unwrap_or_else(TerrainGeneratorConfig::rough)
            .with_size(GENERATOR_TILE_SIZE, GENERATOR_TILE_SIZE)
            .with_grid(GENERATOR_GRID, GENERATOR_GRID);
        if let Some((key, sub)) = kind.sub_terrain() {
            generator = generator.with_single_sub_terrain(key, sub);
        }
        terrain.set_generator(generator);
    } else {
        terrain.set_plane();
    }

    env.curriculum.terrain_levels = None;
    if let Some(generator) = env.scene.terrain.generator.as_mut() {
        generator.curriculum = false;
    }

    if !params.height_scan {
        env.scene.height_scanner = None;
        env.observations.policy.terms.remove("height_scan");
    }

    let motor = DcMotorConfig::go2_legs().with_gains(params.motor_kp, params.motor_kd);
    env.scene.robot.actuators.insert(
        ACTUATOR_GROUP.to_owned(),
        ActuatorConfig::ScaledDcMotor(ScaledDcMotorConfig {
            motor,
            strength_mult_range: (params.motor_strength_mult_min, params.motor_strength_mult_max),
            fault_joint_indices: params.motor_fault_indices.clone(),
        }),
    );
    debug!(
        kp = params.motor_kp,
        kd = params.motor_kd,
        faults = params.motor_fault_indices.len(),
        "Installed scaled DC motor"
    );
}

fn apply_display(env: &mut EnvConfig, params: &CustomEnvParams) {
    if !params.display_mode {
        return;
    }

    env.scene.terrain.visual_material = VisualMaterial::preview_surface(0.08, 0.08, 0.08);

    let mode = ViewerMode::select(params.display_mode, &params.display_type);
    let viewer = std::mem::take(&mut env.viewer).with_height_16_9(params.display_resolution);
    env.viewer = mode.apply(viewer);
    debug!(resolution = ?env.viewer.resolution, mode = ?mode, "Configured display");
}

fn apply_actions(env: &mut EnvConfig, params: &CustomEnvParams) {
    env.actions.joint_pos = JointActionConfig::ShiftScaleClamp(ShiftScaleClampActionConfig {
        base: JointPositionActionConfig::all_joints("robot", ACTION_SCALE),
        hip_scale_mult: params.hip_scale_mult,
        action_mult_indices: params.action_mult_indices.clone(),
        action_mult_range: (params.action_mult_min, params.action_mult_max),
        action_mult_count: params.action_mult_count,
        joint_bias_range: (params.joint_bias_min, params.joint_bias_max),
        joint_pos_clamp: params.joint_pos_clamp,
    });
}

fn apply_events(env: &mut EnvConfig, params: &CustomEnvParams) -> Result<()> {
    let events = &mut env.events;

    events.insert(
        "adversary_push",
        EventTerm::new(
            EventFn::AdversarialPushBySettingVelocity {
                magnitude: params.adversary_magnitude,
            },
            EventMode::Interval { range_s: (0.0, 0.0) },
        ),
    );

    match events.get_mut("add_base_mass").map(|term| &mut term.func) {
        Some(EventFn::RandomizeRigidBodyMass {
            mass_distribution_params,
            ..
        }) => *mass_distribution_params = (params.base_mass_min, params.base_mass_max),
        _ => return Err(ConfigError::missing_term("events", "add_base_mass")),
    }

    events.insert(
        "physics_material",
        EventTerm::new(
            EventFn::RandomizeFriction {
                asset: SceneEntity::new("robot").with_bodies(".*foot"),
                friction_mult_range: (params.friction_mult_min, params.friction_mult_max),
                static_friction_default: 0.8,
                dynamic_friction_default: 0.6,
                restitution_default: 0.0,
                num_buckets: 64,
            },
            EventMode::Startup,
        ),
    );

    match events.get_mut("reset_base").map(|term| &mut term.func) {
        Some(EventFn::ResetRootStateUniform { pose_range, .. }) => {
            pose_range.yaw = (params.start_yaw_min, params.start_yaw_max);
        }
        _ => return Err(ConfigError::missing_term("events", "reset_base")),
    }

    if !params.eval_mode {
        events.insert(
            "reset_robot_joints",
            EventTerm::new(
                EventFn::ResetJointsTrain {
                    stand_range: (0.0, 1.0),
                    position_delta_range: (-0.10, 0.10),
                },
                EventMode::Reset,
            ),
        );
    }

    debug!(active = events.active_count(), "Configured events");
    Ok(())
}

fn apply_commands(env: &mut EnvConfig, params: &CustomEnvParams) {
    let command = &mut env.commands.base_velocity;
    command.resampling_time_range = (params.resample_time_min, params.resample_time_max);
    command.ranges.heading = Some((params.target_heading_min, params.target_heading_max));
    command.rel_standing_envs = params.rel_standing_envs;
    command.ranges.lin_vel_x = (params.target_x_vel_min, params.target_x_vel_max);
    command.ranges.lin_vel_y = (params.target_y_vel_min, params.target_y_vel_max);
}

fn apply_observations(env: &mut EnvConfig, params: &CustomEnvParams) {
    let policy = &mut env.observations.policy;
    policy.terms.remove("base_lin_vel");
    if params.disable_obs_noise {
        policy.enable_corruption = false;
    }
}

fn apply_rewards(env: &mut EnvConfig, task: CustomTask) -> Result<()> {
    let weights: &[(&str, f64)] = match task {
        CustomTask::UnitreeGo2Velocity => &[
            ("track_lin_vel_xy_exp", 1.0),
            ("track_ang_vel_z_exp", 0.5),
            ("lin_vel_z_l2", -2.0),
            ("ang_vel_xy_l2", -0.05),
            ("flat_orientation_l2", -0.1),
            ("dof_torques_l2", -1e-5),
            ("dof_acc_l2", -2.5e-7),
            ("action_rate_l2", -0.01),
            ("feet_air_time", 1.0),
            ("dof_pos_limits", -10.0),
        ],
    };

    let rewards = &mut env.rewards;
    for &(name, weight) in weights {
        if !rewards.set_weight(name, weight) {
            return Err(ConfigError::missing_term("rewards", name));
        }
    }

    rewards.insert(
        "base_height_l2",
        RewardTerm::new(RewardFn::BaseHeightL2 { target_height: 0.34 }, -30.0),
    );
    rewards.insert(
        "undesired_contacts",
        RewardTerm::new(
            RewardFn::UndesiredContacts {
                sensor: SceneEntity::new("contact_forces").with_bodies(".*thigh|.*calf|.*hip"),
                threshold: 1.0,
            },
            -1.0,
        ),
    );

    debug!(active = rewards.active_count(), "Configured rewards");
    Ok(())
}

fn apply_evaluation(env: &mut EnvConfig, params: &CustomEnvParams) -> Result<()> {
    env.rewards = env.rewards.tracking_only();

    if params.terminate_contacts {
        match env
            .terminations
            .get_mut("base_contact")
            .map(|term| &mut term.func)
        {
            Some(TerminationFn::IllegalContact { sensor, .. }) => {
                sensor.body_names = Some(EVAL_CONTACT_BODIES.to_owned());
            }
            _ => return Err(ConfigError::missing_term("terminations", "base_contact")),
        }
    }

    debug!(
        rewards = env.rewards.active_count(),
        terminate_contacts = params.terminate_contacts,
        "Configured evaluation"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_overrides() {
        let runner = build_runner_config(&CustomEnvParams::default());
        assert_eq!(runner.max_iterations, 10_000);
        assert_eq!(runner.save_interval, 5_000);
        assert_eq!(runner.experiment_name, "unitree_go2_custom");
        assert_eq!(runner.neptune_project, "gram");
        assert_eq!(runner.wandb_project, "gram");
        assert_eq!(runner.num_steps_per_env, 24);
    }

    #[test]
    fn test_curriculum_always_off() {
        let env = build_env_config(&CustomEnvParams::default().with_terrain(2.0, 0.0)).unwrap();
        assert!(env.curriculum.terrain_levels.is_none());
        assert!(!env.scene.terrain.generator.unwrap().curriculum);
    }

    #[test]
    fn test_terrain_switches_between_plane_and_generator() {
        let env = build_env_config(&CustomEnvParams::default()).unwrap();
        assert!(env.scene.terrain.is_plane());
        assert!(env.scene.terrain.generator.is_none());

        let env = build_env_config(&CustomEnvParams::default().display("world", 720)).unwrap();
        assert!(!env.scene.terrain.is_plane());
        let generator = env.scene.terrain.generator.unwrap();
        assert_eq!(generator.num_tiles(), 16);
        assert_eq!(generator.sub_terrains.len(), 1);
    }

    #[test]
    fn test_missing_mass_term() {
        let mut env = EnvConfig::go2_rough();
        env.events.remove("add_base_mass");
        let err = apply_events(&mut env, &CustomEnvParams::default()).unwrap_err();
        assert_eq!(err, ConfigError::missing_term("events", "add_base_mass"));
    }

    #[test]
    fn test_missing_reward_term() {
        let mut env = EnvConfig::go2_rough();
        env.rewards.remove("dof_pos_limits");
        let err = apply_rewards(&mut env, CustomTask::UnitreeGo2Velocity).unwrap_err();
        assert_eq!(err, ConfigError::missing_term("rewards", "dof_pos_limits"));
    }

    #[test]
    fn test_base_contact_of_wrong_kind() {
        let mut env = EnvConfig::go2_rough();
        env.terminations.get_mut("base_contact").unwrap().func = TerminationFn::TimeOut;
        let params = CustomEnvParams::default().evaluation(true);
        let err = apply_evaluation(&mut env, &params).unwrap_err();
        assert_eq!(err, ConfigError::missing_term("terminations", "base_contact"));
    }

    #[test]
    fn test_display_keeps_resolution_for_unknown_type() {
        let params = CustomEnvParams::default().display("orbit", 1080);
        let env = build_env_config(&params).unwrap();
        assert_eq!(env.viewer.resolution, (1920, 1080));
        assert_eq!(env.viewer.eye, (7.5, 7.5, 7.5));
    }
}
