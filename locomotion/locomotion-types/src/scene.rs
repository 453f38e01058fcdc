//! Scene configuration: ground, robot and sensors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::actuator::{ActuatorConfig, DcMotorConfig};
use crate::terrain::TerrainImporterConfig;

/// Selects an entity of the scene, optionally narrowed to some of its bodies
/// or joints by regex.
///
/// # Example
///
/// ```
/// use locomotion_types::SceneEntity;
///
/// let feet = SceneEntity::new("robot").with_bodies(".*foot");
/// assert_eq!(feet.body_names.as_deref(), Some(".*foot"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEntity {
    /// Name of the scene entity.
    pub name: String,
    /// Body-name pattern, all bodies when unset.
    pub body_names: Option<String>,
    /// Joint-name pattern, all joints when unset.
    pub joint_names: Option<String>,
}

impl SceneEntity {
    /// Select a whole entity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body_names: None,
            joint_names: None,
        }
    }

    /// Narrow the selection to bodies matching a pattern.
    #[must_use]
    pub fn with_bodies(mut self, pattern: impl Into<String>) -> Self {
        self.body_names = Some(pattern.into());
        self
    }

    /// Narrow the selection to joints matching a pattern.
    #[must_use]
    pub fn with_joints(mut self, pattern: impl Into<String>) -> Self {
        self.joint_names = Some(pattern.into());
        self
    }
}

/// Physics properties of an articulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticulationProps {
    /// Whether links of the same articulation collide with each other.
    pub enabled_self_collisions: bool,
    /// Position iterations of the articulation solver.
    pub solver_position_iteration_count: u32,
    /// Velocity iterations of the articulation solver.
    pub solver_velocity_iteration_count: u32,
}

/// Asset spawned for an articulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Robot description file.
    pub usd_path: String,
    /// Whether the base is fixed to the world.
    pub fix_root_link: bool,
    /// Articulation physics properties.
    pub articulation_props: ArticulationProps,
}

/// Default state an articulation resets to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    /// Root position (m).
    pub pos: (f64, f64, f64),
    /// Default joint positions keyed by joint-name pattern (rad).
    pub joint_pos: BTreeMap<String, f64>,
    /// Default joint velocities keyed by joint-name pattern (rad/s).
    pub joint_vel: BTreeMap<String, f64>,
}

/// An articulated robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticulationConfig {
    /// Scene path pattern of the robot prims.
    pub prim_path: String,
    /// Asset to spawn.
    pub spawn: SpawnConfig,
    /// Default state.
    pub init_state: InitialState,
    /// Fraction of the joint range used as soft limits.
    pub soft_joint_pos_limit_factor: f64,
    /// Actuator groups keyed by name.
    pub actuators: BTreeMap<String, ActuatorConfig>,
}

impl ArticulationConfig {
    /// Unitree Go2 quadruped standing on its legs.
    #[must_use]
    pub fn unitree_go2() -> Self {
        let joint_pos = BTreeMap::from([
            (".*L_hip_joint".to_owned(), 0.1),
            (".*R_hip_joint".to_owned(), -0.1),
            ("F[L,R]_thigh_joint".to_owned(), 0.8),
            ("R[L,R]_thigh_joint".to_owned(), 1.0),
            (".*_calf_joint".to_owned(), -1.5),
        ]);

        Self {
            prim_path: "{ENV_REGEX_NS}/Robot".to_owned(),
            spawn: SpawnConfig {
                usd_path: "Robots/Unitree/Go2/go2.usd".to_owned(),
                fix_root_link: false,
                articulation_props: ArticulationProps {
                    enabled_self_collisions: false,
                    solver_position_iteration_count: 4,
                    solver_velocity_iteration_count: 0,
                },
            },
            init_state: InitialState {
                pos: (0.0, 0.0, 0.4),
                joint_pos,
                joint_vel: BTreeMap::from([(".*".to_owned(), 0.0)]),
            },
            soft_joint_pos_limit_factor: 0.9,
            actuators: BTreeMap::from([(
                "base_legs".to_owned(),
                ActuatorConfig::DcMotor(DcMotorConfig::go2_legs()),
            )]),
        }
    }
}

/// Ray pattern of a height scanner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPattern {
    /// Spacing between rays (m).
    pub resolution: f64,
    /// Extent of the grid (m).
    pub size: (f64, f64),
}

/// Downward ray caster measuring terrain heights around the robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayCasterConfig {
    /// Scene path of the prim the scanner is attached to.
    pub prim_path: String,
    /// Vertical offset of the ray origins (m).
    pub offset_z: f64,
    /// Follow only the yaw of the parent prim.
    pub attach_yaw_only: bool,
    /// Ray grid.
    pub pattern: GridPattern,
    /// Meshes the rays hit.
    pub mesh_prim_paths: Vec<String>,
    /// Sensor update period (s).
    pub update_period: f64,
    /// Draw the rays.
    pub debug_vis: bool,
}

impl RayCasterConfig {
    /// 1.6 m x 1.0 m grid at 10 cm resolution attached to `prim_path`.
    #[must_use]
    pub fn height_scanner(prim_path: impl Into<String>) -> Self {
        Self {
            prim_path: prim_path.into(),
            offset_z: 20.0,
            attach_yaw_only: true,
            pattern: GridPattern {
                resolution: 0.1,
                size: (1.6, 1.0),
            },
            mesh_prim_paths: vec!["/World/ground".to_owned()],
            update_period: 0.0,
            debug_vis: false,
        }
    }
}

/// Contact force sensor on every body of an articulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSensorConfig {
    /// Scene path pattern of the sensed bodies.
    pub prim_path: String,
    /// Number of past force samples kept.
    pub history_length: usize,
    /// Track air and contact time of each body.
    pub track_air_time: bool,
    /// Sensor update period (s).
    pub update_period: f64,
}

/// The interactive scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Number of parallel environments.
    pub num_envs: usize,
    /// Spacing between environment origins (m).
    pub env_spacing: f64,
    /// Ground.
    pub terrain: TerrainImporterConfig,
    /// Robot.
    pub robot: ArticulationConfig,
    /// Height scanner, absent for blind policies.
    pub height_scanner: Option<RayCasterConfig>,
    /// Contact sensor named `contact_forces`.
    pub contact_forces: ContactSensorConfig,
}

impl SceneConfig {
    /// Go2 on generated rough terrain with a height scanner under its base.
    #[must_use]
    pub fn go2_rough() -> Self {
        Self {
            num_envs: 4096,
            env_spacing: 2.5,
            terrain: TerrainImporterConfig::rough(),
            robot: ArticulationConfig::unitree_go2(),
            height_scanner: Some(RayCasterConfig::height_scanner(
                "{ENV_REGEX_NS}/Robot/base",
            )),
            contact_forces: ContactSensorConfig {
                prim_path: "{ENV_REGEX_NS}/Robot/.*".to_owned(),
                history_length: 3,
                track_air_time: true,
                update_period: 0.0,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_go2_defaults() {
        let robot = ArticulationConfig::unitree_go2();
        assert!(!robot.spawn.articulation_props.enabled_self_collisions);
        assert_eq!(robot.init_state.joint_pos[".*_calf_joint"], -1.5);
        assert!(robot.actuators.contains_key("base_legs"));
    }

    #[test]
    fn test_scene_has_scanner() {
        let scene = SceneConfig::go2_rough();
        let scanner = scene.height_scanner.unwrap();
        assert!(scanner.prim_path.ends_with("/base"));
        assert_eq!(scanner.pattern.size, (1.6, 1.0));
    }

    #[test]
    fn test_scene_entity_builder() {
        let entity = SceneEntity::new("contact_forces")
            .with_bodies("base")
            .with_joints(".*");
        assert_eq!(entity.name, "contact_forces");
        assert_eq!(entity.body_names.as_deref(), Some("base"));
        assert_eq!(entity.joint_names.as_deref(), Some(".*"));
    }
}
