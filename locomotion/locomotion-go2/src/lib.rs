//! Configurable velocity-tracking task for the Unitree Go2.
//!
//! Turns a flat [`CustomEnvParams`] set into an environment and a runner
//! configuration and registers them as one task:
//!
//! - Terrain: flat plane, random rough, incline or decline pyramids
//! - Robustness: randomized mass, friction, motor strength, motor faults,
//!   action multipliers, joint bias and adversarial pushes
//! - Evaluation: tracking-only rewards and stricter contact terminations
//! - Display: recording resolution and camera framing
//!
//! # Example
//!
//! ```
//! use locomotion_go2::{CUSTOM_GO2_TASK, CustomEnvParams, register_custom_env};
//! use locomotion_registry::TaskRegistry;
//!
//! let mut registry = TaskRegistry::new();
//! let params = CustomEnvParams::default().with_terrain(4.0, 0.0);
//! register_custom_env(&mut registry, &params)?;
//!
//! let (env, runner) = registry.make(CUSTOM_GO2_TASK).unwrap();
//! assert_eq!(env.rewards.weight("base_height_l2"), Some(-30.0));
//! assert_eq!(runner.max_iterations, 10_000);
//! # Ok::<(), locomotion_go2::ConfigError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/locomotion-go2/0.7.0")]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod error;
mod params;
mod selection;
mod task;

pub use builder::{
    EVAL_CONTACT_BODIES, build_env_config, build_runner_config, register_custom_env,
};
pub use error::ConfigError;
pub use params::CustomEnvParams;
pub use selection::{DECLINE_KEY, INCLINE_KEY, RANDOM_ROUGH_KEY, TerrainKind, ViewerMode};
pub use task::{CUSTOM_GO2_TASK, CustomTask};

/// Result type for task building.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        CUSTOM_GO2_TASK, ConfigError, CustomEnvParams, CustomTask, TerrainKind, ViewerMode,
        build_env_config, build_runner_config, register_custom_env,
    };
}
