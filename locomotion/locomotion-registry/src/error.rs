//! Error types for task registry operations.

use thiserror::Error;

/// Errors that can occur when looking up registered tasks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No task is registered under this id.
    #[error("unknown task id: {id}")]
    UnknownTask {
        /// The requested id.
        id: String,
    },
}

impl RegistryError {
    /// Create an unknown task error.
    #[must_use]
    pub fn unknown_task(id: impl Into<String>) -> Self {
        Self::UnknownTask { id: id.into() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RegistryError::unknown_task("Go2-v9");
        assert_eq!(err.to_string(), "unknown task id: Go2-v9");
    }
}
