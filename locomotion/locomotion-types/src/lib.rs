//! Configuration tree for manager-based legged locomotion environments.
//!
//! This crate describes a training environment as plain data:
//!
//! - [`SceneConfig`] - Terrain, robot, actuators and sensors
//! - [`ActionsConfig`] - How policy outputs become joint targets
//! - [`ObservationsConfig`] - What the policy sees
//! - [`EventsConfig`] - Domain randomization and reset hooks
//! - [`CommandsConfig`] - Velocity command sampling
//! - [`RewardSet`] - Weighted reward terms
//! - [`TerminationsConfig`] - Episode termination conditions
//! - [`ViewerConfig`] - Viewport camera
//! - [`RunnerConfig`] - PPO training runner
//!
//! # Design Philosophy
//!
//! These types are **pure data**. Simulation, terrain meshing and policy
//! optimization belong to whatever consumes them. Named term tables
//! ([`TermSet`]) keep removed terms as empty slots, so "this term is off"
//! is an explicit, inspectable state.
//!
//! # Example
//!
//! ```
//! use locomotion_types::{EnvConfig, RunnerConfig};
//!
//! let mut env = EnvConfig::go2_rough();
//! env.scene.height_scanner = None;
//! env.observations.policy.terms.remove("height_scan");
//!
//! assert!(!env.observations.policy.terms.contains("height_scan"));
//! assert_eq!(RunnerConfig::go2_rough().max_iterations, 1500);
//! ```

#![doc(html_root_url = "https://docs.rs/locomotion-types/0.7.0")]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn, // Builders take owned Strings
    clippy::module_name_repetitions,
)]

mod action;
mod actuator;
mod command;
mod env;
mod event;
mod observation;
mod reward;
mod runner;
mod scene;
mod term;
mod termination;
mod terrain;
mod viewer;

pub use action::{
    ActionsConfig, JointActionConfig, JointPositionActionConfig, ShiftScaleClampActionConfig,
};
pub use actuator::{ActuatorConfig, DcMotorConfig, ScaledDcMotorConfig};
pub use command::{CommandsConfig, VelocityCommandConfig, VelocityRanges};
pub use env::{EnvConfig, SimSettings};
pub use event::{
    EventFn, EventMode, EventTerm, EventsConfig, MassOperation, PoseRange, TwistRange,
    go2_rough_events,
};
pub use observation::{
    ObservationFn, ObservationTerm, ObservationsConfig, PolicyObservations, UniformNoise,
};
pub use reward::{RewardFn, RewardSet, RewardTerm, TRACKING_PREFIX, go2_rough_rewards};
pub use runner::{
    Activation, LearningRateSchedule, LoggerKind, PolicyConfig, PpoConfig, RunnerConfig,
};
pub use scene::{
    ArticulationConfig, ArticulationProps, ContactSensorConfig, GridPattern, InitialState,
    RayCasterConfig, SceneConfig, SceneEntity, SpawnConfig,
};
pub use term::TermSet;
pub use termination::{
    CurriculumConfig, CurriculumFn, TerminationFn, TerminationTerm, TerminationsConfig,
    go2_rough_terminations,
};
pub use terrain::{
    CombineMode, RigidBodyMaterial, SubTerrainConfig, TerrainGeneratorConfig,
    TerrainImporterConfig, TerrainType, VisualMaterial,
};
pub use viewer::{OriginType, ViewerConfig};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        ActuatorConfig, EnvConfig, EventFn, EventMode, EventTerm, JointActionConfig, OriginType,
        RewardFn, RewardSet, RewardTerm, RunnerConfig, SceneEntity, SubTerrainConfig, TermSet,
        TerrainType, ViewerConfig,
    };
}
