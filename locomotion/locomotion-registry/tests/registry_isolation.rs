//! Registries are independent values.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use locomotion_registry::{TaskEntry, TaskRegistry};
use locomotion_types::{EnvConfig, RunnerConfig};

fn go2_entry(id: &str) -> TaskEntry {
    TaskEntry::new(id, EnvConfig::go2_rough(), RunnerConfig::go2_rough()).without_env_checker()
}

#[test]
fn separate_registries_do_not_share_tasks() {
    let mut first = TaskRegistry::new();
    let second = TaskRegistry::new();

    first.register(go2_entry("Go2-Rough-v0"));

    assert!(first.contains("Go2-Rough-v0"));
    assert!(!second.contains("Go2-Rough-v0"));
    assert!(second.make("Go2-Rough-v0").is_err());
}

#[test]
fn cloned_registry_is_a_snapshot() {
    let mut registry = TaskRegistry::new();
    registry.register(go2_entry("Go2-Rough-v0"));

    let snapshot = registry.clone();
    registry.remove("Go2-Rough-v0");

    assert!(registry.is_empty());
    assert_eq!(snapshot.ids(), vec!["Go2-Rough-v0"]);
}

#[test]
fn entry_serializes_with_configs() {
    let entry = go2_entry("Go2-Rough-v0");
    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json["id"], "Go2-Rough-v0");
    assert_eq!(json["disable_env_checker"], true);
    assert_eq!(json["runner_config"]["experiment_name"], "unitree_go2_rough");
    assert_eq!(json["env_config"]["scene"]["num_envs"], 4096);
}
