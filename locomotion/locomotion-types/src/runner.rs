//! On-policy PPO runner configuration.

use serde::{Deserialize, Serialize};

/// Where training metrics are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggerKind {
    /// Local tensorboard event files.
    Tensorboard,
    /// Neptune project `neptune_project`.
    Neptune,
    /// Weights & Biases project `wandb_project`.
    Wandb,
}

/// Hidden-layer activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Exponential linear unit.
    Elu,
    /// Rectified linear unit.
    Relu,
    /// Hyperbolic tangent.
    Tanh,
}

/// Learning-rate schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningRateSchedule {
    /// Constant learning rate.
    Fixed,
    /// Adapted to keep the KL divergence near `desired_kl`.
    Adaptive,
}

/// Actor-critic network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Initial standard deviation of the action distribution.
    pub init_noise_std: f64,
    /// Actor hidden layer sizes.
    pub actor_hidden_dims: Vec<usize>,
    /// Critic hidden layer sizes.
    pub critic_hidden_dims: Vec<usize>,
    /// Hidden-layer activation.
    pub activation: Activation,
}

/// PPO hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpoConfig {
    /// Value loss coefficient.
    pub value_loss_coef: f64,
    /// Clip the value loss like the surrogate.
    pub use_clipped_value_loss: bool,
    /// Surrogate clip parameter.
    pub clip_param: f64,
    /// Entropy bonus coefficient.
    pub entropy_coef: f64,
    /// Epochs per update.
    pub num_learning_epochs: usize,
    /// Mini-batches per epoch.
    pub num_mini_batches: usize,
    /// Learning rate.
    pub learning_rate: f64,
    /// Learning-rate schedule.
    pub schedule: LearningRateSchedule,
    /// Discount factor.
    pub gamma: f64,
    /// GAE lambda.
    pub lam: f64,
    /// Target KL divergence of the adaptive schedule.
    pub desired_kl: f64,
    /// Gradient norm clip.
    pub max_grad_norm: f64,
}

/// Training runner.
///
/// # Example
///
/// ```
/// use locomotion_types::RunnerConfig;
///
/// let runner = RunnerConfig::go2_rough()
///     .with_iterations(10_000, 5_000)
///     .with_experiment("go2_custom");
/// assert_eq!(runner.max_iterations, 10_000);
/// assert_eq!(runner.experiment_name, "go2_custom");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Random seed.
    pub seed: u64,
    /// Training device.
    pub device: String,
    /// Rollout steps per environment per iteration.
    pub num_steps_per_env: usize,
    /// Training iterations.
    pub max_iterations: usize,
    /// Iterations between checkpoints.
    pub save_interval: usize,
    /// Log directory name.
    pub experiment_name: String,
    /// Suffix of the run directory.
    pub run_name: String,
    /// Normalize observations with running statistics.
    pub empirical_normalization: bool,
    /// Metrics sink.
    pub logger: LoggerKind,
    /// Neptune project name.
    pub neptune_project: String,
    /// Weights & Biases project name.
    pub wandb_project: String,
    /// Resume from a checkpoint.
    pub resume: bool,
    /// Run directory pattern to resume from.
    pub load_run: String,
    /// Checkpoint file pattern to resume from.
    pub load_checkpoint: String,
    /// Network.
    pub policy: PolicyConfig,
    /// Algorithm.
    pub algorithm: PpoConfig,
}

impl RunnerConfig {
    /// PPO runner of the Go2 rough task.
    #[must_use]
    pub fn go2_rough() -> Self {
        Self {
            seed: 42,
            device: "cuda:0".to_owned(),
            num_steps_per_env: 24,
            max_iterations: 1500,
            save_interval: 50,
            experiment_name: "unitree_go2_rough".to_owned(),
            run_name: String::new(),
            empirical_normalization: false,
            logger: LoggerKind::Tensorboard,
            neptune_project: "isaaclab".to_owned(),
            wandb_project: "isaaclab".to_owned(),
            resume: false,
            load_run: ".*".to_owned(),
            load_checkpoint: "model_.*.pt".to_owned(),
            policy: PolicyConfig {
                init_noise_std: 1.0,
                actor_hidden_dims: vec![512, 256, 128],
                critic_hidden_dims: vec![512, 256, 128],
                activation: Activation::Elu,
            },
            algorithm: PpoConfig {
                value_loss_coef: 1.0,
                use_clipped_value_loss: true,
                clip_param: 0.2,
                entropy_coef: 0.01,
                num_learning_epochs: 5,
                num_mini_batches: 4,
                learning_rate: 1.0e-3,
                schedule: LearningRateSchedule::Adaptive,
                gamma: 0.99,
                lam: 0.95,
                desired_kl: 0.01,
                max_grad_norm: 1.0,
            },
        }
    }

    /// Set the iteration count and checkpoint interval.
    #[must_use]
    pub fn with_iterations(mut self, max_iterations: usize, save_interval: usize) -> Self {
        self.max_iterations = max_iterations;
        self.save_interval = save_interval;
        self
    }

    /// Set the experiment name.
    #[must_use]
    pub fn with_experiment(mut self, name: impl Into<String>) -> Self {
        self.experiment_name = name.into();
        self
    }

    /// Set both remote logger project names.
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        let project = project.into();
        self.neptune_project.clone_from(&project);
        self.wandb_project = project;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_go2_rough_runner() {
        let runner = RunnerConfig::go2_rough();
        assert_eq!(runner.max_iterations, 1500);
        assert_eq!(runner.save_interval, 50);
        assert_eq!(runner.policy.actor_hidden_dims, vec![512, 256, 128]);
    }

    #[test]
    fn test_with_project_sets_both() {
        let runner = RunnerConfig::go2_rough().with_project("gram");
        assert_eq!(runner.neptune_project, "gram");
        assert_eq!(runner.wandb_project, "gram");
    }
}
