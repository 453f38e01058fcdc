//! Task identifiers the builder accepts.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Id of the custom Go2 velocity-tracking task.
pub const CUSTOM_GO2_TASK: &str = "Isaac-Velocity-Custom-Unitree-Go2-v0";

/// A recognized custom task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomTask {
    /// Velocity tracking for the Unitree Go2 with retuned reward weights.
    UnitreeGo2Velocity,
}

impl CustomTask {
    /// Registry id of the task.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::UnitreeGo2Velocity => CUSTOM_GO2_TASK,
        }
    }
}

impl FromStr for CustomTask {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CUSTOM_GO2_TASK => Ok(Self::UnitreeGo2Velocity),
            other => Err(ConfigError::unrecognized_task(other)),
        }
    }
}

impl fmt::Display for CustomTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known() {
        let task: CustomTask = CUSTOM_GO2_TASK.parse().unwrap();
        assert_eq!(task, CustomTask::UnitreeGo2Velocity);
        assert_eq!(task.to_string(), CUSTOM_GO2_TASK);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Isaac-Velocity-Rough-Unitree-Go2-v0"
            .parse::<CustomTask>()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::unrecognized_task("Isaac-Velocity-Rough-Unitree-Go2-v0")
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(
            CUSTOM_GO2_TASK
                .to_lowercase()
                .parse::<CustomTask>()
                .is_err()
        );
    }
}
