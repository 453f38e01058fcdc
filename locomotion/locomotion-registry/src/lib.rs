//! Injectable registry of locomotion training tasks.
//!
//! A task is an id bound to an environment configuration, a training runner
//! configuration, and the entry point that consumes them:
//!
//! - [`TaskEntry`] - One registered task
//! - [`TaskRegistry`] - Owned map from id to entry
//! - [`RegistryError`] - Lookup failures
//!
//! There is no process-wide registry. Callers create a [`TaskRegistry`] and
//! hand it to the code that registers tasks, which keeps tests isolated.
//!
//! # Example
//!
//! ```
//! use locomotion_registry::{MANAGER_BASED_RL_ENV, TaskEntry, TaskRegistry};
//! use locomotion_types::{EnvConfig, RunnerConfig};
//!
//! let mut registry = TaskRegistry::new();
//! registry.register(TaskEntry::new("Go2-Rough-v0", EnvConfig::go2_rough(), RunnerConfig::go2_rough()));
//!
//! let entry = registry.get("Go2-Rough-v0").unwrap();
//! assert_eq!(entry.entry_point, MANAGER_BASED_RL_ENV);
//! ```

#![doc(html_root_url = "https://docs.rs/locomotion-registry/0.7.0")]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod entry;
mod error;
mod registry;

pub use entry::{MANAGER_BASED_RL_ENV, TaskEntry};
pub use error::RegistryError;
pub use registry::TaskRegistry;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
