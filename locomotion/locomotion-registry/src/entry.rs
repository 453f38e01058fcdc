//! Registered task entries.

use locomotion_types::{EnvConfig, RunnerConfig};
use serde::{Deserialize, Serialize};

/// Entry point of manager-based reinforcement-learning environments.
pub const MANAGER_BASED_RL_ENV: &str = "locomotion:ManagerBasedRlEnv";

/// A task as stored in a [`TaskRegistry`](crate::TaskRegistry).
///
/// # Example
///
/// ```
/// use locomotion_registry::TaskEntry;
/// use locomotion_types::{EnvConfig, RunnerConfig};
///
/// let entry = TaskEntry::new("Go2-Rough-v0", EnvConfig::go2_rough(), RunnerConfig::go2_rough())
///     .without_env_checker();
/// assert!(entry.disable_env_checker);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEntry {
    /// Task identifier.
    pub id: String,
    /// Environment class that consumes the configuration.
    pub entry_point: String,
    /// Skip the environment API compatibility checks when constructing.
    pub disable_env_checker: bool,
    /// Environment configuration.
    pub env_config: EnvConfig,
    /// Training runner configuration.
    pub runner_config: RunnerConfig,
}

impl TaskEntry {
    /// Create an entry for a manager-based RL environment.
    #[must_use]
    pub fn new(id: impl Into<String>, env_config: EnvConfig, runner_config: RunnerConfig) -> Self {
        Self {
            id: id.into(),
            entry_point: MANAGER_BASED_RL_ENV.to_owned(),
            disable_env_checker: false,
            env_config,
            runner_config,
        }
    }

    /// Disable the environment checker.
    #[must_use]
    pub fn without_env_checker(mut self) -> Self {
        self.disable_env_checker = true;
        self
    }
}
