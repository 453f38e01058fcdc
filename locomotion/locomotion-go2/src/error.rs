//! Error types for building the custom Go2 task.

use thiserror::Error;

/// Errors that can occur while loading parameters or building the task.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested task id is not one this builder knows.
    #[error("custom task {task} not defined")]
    UnrecognizedTask {
        /// The offending task id.
        task: String,
    },

    /// A base term the builder edits is missing or has an unexpected hook.
    #[error("{section} term '{name}' is missing or has an unexpected kind")]
    MissingTerm {
        /// Term table, e.g. `rewards`.
        section: &'static str,
        /// Term name.
        name: String,
    },

    /// Reading a parameter file failed.
    #[error("IO error: {0}")]
    Io(String),

    /// A parameter file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Create an unrecognized task error.
    #[must_use]
    pub fn unrecognized_task(task: impl Into<String>) -> Self {
        Self::UnrecognizedTask { task: task.into() }
    }

    /// Create a missing term error.
    #[must_use]
    pub fn missing_term(section: &'static str, name: impl Into<String>) -> Self {
        Self::MissingTerm {
            section,
            name: name.into(),
        }
    }

    /// Check if this is an unrecognized task error.
    #[must_use]
    pub fn is_unrecognized_task(&self) -> bool {
        matches!(self, Self::UnrecognizedTask { .. })
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::unrecognized_task("Isaac-Velocity-Flat-Anymal-C-v0");
        assert_eq!(
            err.to_string(),
            "custom task Isaac-Velocity-Flat-Anymal-C-v0 not defined"
        );

        let err = ConfigError::missing_term("rewards", "feet_air_time");
        assert!(err.to_string().contains("rewards term 'feet_air_time'"));
    }

    #[test]
    fn test_error_predicates() {
        assert!(ConfigError::unrecognized_task("x").is_unrecognized_task());
        assert!(!ConfigError::missing_term("events", "reset_base").is_unrecognized_task());
    }

    #[test]
    fn test_from_serde_json() {
        let err: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
