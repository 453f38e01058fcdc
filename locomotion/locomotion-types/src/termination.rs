//! Termination and curriculum terms.

use serde::{Deserialize, Serialize};

use crate::scene::SceneEntity;
use crate::term::TermSet;

/// Termination condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fn", rename_all = "snake_case")]
pub enum TerminationFn {
    /// Episode length reached.
    TimeOut,
    /// Contact force on a watched body above a threshold.
    IllegalContact {
        /// Contact sensor and bodies to watch.
        sensor: SceneEntity,
        /// Force threshold (N).
        threshold: f64,
    },
}

/// One termination term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminationTerm {
    /// Condition.
    pub func: TerminationFn,
    /// Whether this is a truncation rather than a failure.
    pub time_out: bool,
}

/// Termination table.
pub type TerminationsConfig = TermSet<TerminationTerm>;

/// Time-out plus base contact with the ground.
#[must_use]
pub fn go2_rough_terminations() -> TerminationsConfig {
    [
        (
            "time_out",
            TerminationTerm {
                func: TerminationFn::TimeOut,
                time_out: true,
            },
        ),
        (
            "base_contact",
            TerminationTerm {
                func: TerminationFn::IllegalContact {
                    sensor: SceneEntity::new("contact_forces").with_bodies("base"),
                    threshold: 1.0,
                },
                time_out: false,
            },
        ),
    ]
    .into_iter()
    .collect()
}

/// Curriculum function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurriculumFn {
    /// Move robots to harder terrain rows when they walk far enough.
    TerrainLevelsVel,
}

/// Curriculum terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumConfig {
    /// Terrain difficulty curriculum.
    pub terrain_levels: Option<CurriculumFn>,
}

impl Default for CurriculumConfig {
    fn default() -> Self {
        Self {
            terrain_levels: Some(CurriculumFn::TerrainLevelsVel),
        }
    }
}
