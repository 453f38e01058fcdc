//! Task registry.

use hashbrown::HashMap;
use locomotion_types::{EnvConfig, RunnerConfig};
use tracing::{debug, info, warn};

use crate::entry::TaskEntry;
use crate::error::RegistryError;

/// Map from task id to its configuration pair.
///
/// The registry is an ordinary value: callers own it and pass it to whatever
/// registers or constructs tasks, so separate registries never interfere.
///
/// # Example
///
/// ```
/// use locomotion_registry::{TaskEntry, TaskRegistry};
/// use locomotion_types::{EnvConfig, RunnerConfig};
///
/// let mut registry = TaskRegistry::new();
/// registry.register(TaskEntry::new(
///     "Go2-Rough-v0",
///     EnvConfig::go2_rough(),
///     RunnerConfig::go2_rough(),
/// ));
///
/// let (env, runner) = registry.make("Go2-Rough-v0")?;
/// assert_eq!(env.scene.num_envs, 4096);
/// assert_eq!(runner.max_iterations, 1500);
/// # Ok::<(), locomotion_registry::RegistryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    entries: HashMap<String, TaskEntry>,
}

impl TaskRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task, replacing any task with the same id.
    ///
    /// Returns the replaced entry.
    pub fn register(&mut self, entry: TaskEntry) -> Option<TaskEntry> {
        info!(
            id = %entry.id,
            entry_point = %entry.entry_point,
            disable_env_checker = entry.disable_env_checker,
            "Registering task"
        );

        let previous = self.entries.insert(entry.id.clone(), entry);
        if let Some(previous) = &previous {
            warn!(id = %previous.id, "Overriding previously registered task");
        }
        previous
    }

    /// Look up a registered task.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TaskEntry> {
        self.entries.get(id)
    }

    /// Fresh copies of a task's environment and runner configurations.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownTask`] if `id` is not registered.
    pub fn make(&self, id: &str) -> crate::Result<(EnvConfig, RunnerConfig)> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| RegistryError::unknown_task(id))?;
        debug!(id, "Constructing task configuration");
        Ok((entry.env_config.clone(), entry.runner_config.clone()))
    }

    /// Whether a task is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Unregister a task.
    pub fn remove(&mut self, id: &str) -> Option<TaskEntry> {
        self.entries.remove(id)
    }

    /// Registered ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no task is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn entry(id: &str) -> TaskEntry {
        TaskEntry::new(id, EnvConfig::go2_rough(), RunnerConfig::go2_rough())
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = TaskRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.register(entry("a")).is_none());
        assert!(registry.contains("a"));
        assert_eq!(registry.get("a").unwrap().id, "a");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = TaskRegistry::new();
        registry.register(entry("a"));

        let mut replacement = entry("a");
        replacement.runner_config.max_iterations = 7;
        let previous = registry.register(replacement).unwrap();

        assert_eq!(previous.runner_config.max_iterations, 1500);
        assert_eq!(registry.get("a").unwrap().runner_config.max_iterations, 7);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_make_unknown() {
        let registry = TaskRegistry::new();
        let err = registry.make("missing").unwrap_err();
        assert_eq!(err, RegistryError::unknown_task("missing"));
    }

    #[test]
    fn test_make_returns_copies() {
        let mut registry = TaskRegistry::new();
        registry.register(entry("a"));

        let (mut env, _) = registry.make("a").unwrap();
        env.scene.num_envs = 1;

        let (env_again, _) = registry.make("a").unwrap();
        assert_eq!(env_again.scene.num_envs, 4096);
    }

    #[test]
    fn test_ids_sorted_and_remove() {
        let mut registry = TaskRegistry::new();
        registry.register(entry("b"));
        registry.register(entry("a"));
        assert_eq!(registry.ids(), vec!["a", "b"]);

        assert!(registry.remove("a").is_some());
        assert_eq!(registry.ids(), vec!["b"]);
        assert!(registry.remove("a").is_none());
    }
}
