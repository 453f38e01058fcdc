//! Terrain configuration.
//!
//! A terrain is either an infinite flat plane or a grid of generated
//! heightfield tiles. The generator only describes the tiles; meshing is done
//! by the simulator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the ground is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    /// Infinite flat ground plane.
    Plane,
    /// Tiles produced by a [`TerrainGeneratorConfig`].
    Generator,
}

/// Contact material of a rigid surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyMaterial {
    /// Static friction coefficient.
    pub static_friction: f64,
    /// Dynamic friction coefficient.
    pub dynamic_friction: f64,
    /// Restitution coefficient.
    pub restitution: f64,
    /// How friction coefficients of two touching materials are combined.
    pub friction_combine_mode: CombineMode,
    /// How restitution coefficients of two touching materials are combined.
    pub restitution_combine_mode: CombineMode,
}

impl Default for RigidBodyMaterial {
    fn default() -> Self {
        Self {
            static_friction: 1.0,
            dynamic_friction: 1.0,
            restitution: 0.0,
            friction_combine_mode: CombineMode::Multiply,
            restitution_combine_mode: CombineMode::Multiply,
        }
    }
}

/// Material coefficient combination rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    /// Mean of both coefficients.
    Average,
    /// Smaller coefficient.
    Min,
    /// Product of both coefficients.
    Multiply,
    /// Larger coefficient.
    Max,
}

/// Visual material applied to the ground mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualMaterial {
    /// Textured material loaded from an MDL file.
    Mdl {
        /// Path to the material definition.
        path: String,
        /// Whether to project UVW coordinates.
        project_uvw: bool,
        /// Texture tiling scale.
        texture_scale: (f64, f64),
    },
    /// Untextured surface with a flat color.
    PreviewSurface {
        /// RGB color in `[0, 1]`.
        diffuse_color: (f64, f64, f64),
    },
}

impl VisualMaterial {
    /// Flat-colored surface.
    #[must_use]
    pub const fn preview_surface(r: f64, g: f64, b: f64) -> Self {
        Self::PreviewSurface {
            diffuse_color: (r, g, b),
        }
    }

    /// Marble tile texture used by the rough locomotion tasks.
    #[must_use]
    pub fn marble_tiles() -> Self {
        Self::Mdl {
            path: "Materials/TilesMarbleSpiderWhiteBrickBondHoned.mdl".to_owned(),
            project_uvw: true,
            texture_scale: (0.25, 0.25),
        }
    }
}

/// One kind of generated tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubTerrainConfig {
    /// Mesh pyramid stairs, optionally inverted into a pit.
    PyramidStairs {
        /// Share of tiles using this sub-terrain.
        proportion: f64,
        /// Step height range (m), interpolated over difficulty.
        step_height_range: (f64, f64),
        /// Step tread width (m).
        step_width: f64,
        /// Flat platform width at the center (m).
        platform_width: f64,
        /// Border width around the tile (m).
        border_width: f64,
        /// Build descending stairs instead of ascending ones.
        inverted: bool,
    },
    /// Grid of randomly-raised boxes.
    RandomGrid {
        /// Share of tiles using this sub-terrain.
        proportion: f64,
        /// Width of each grid cell (m).
        grid_width: f64,
        /// Cell height range (m), interpolated over difficulty.
        grid_height_range: (f64, f64),
        /// Flat platform width at the center (m).
        platform_width: f64,
    },
    /// Heightfield with uniformly sampled noise.
    HfRandomUniform {
        /// Share of tiles using this sub-terrain.
        proportion: f64,
        /// Height noise range (m).
        noise_range: (f64, f64),
        /// Quantization step of sampled heights (m).
        noise_step: f64,
        /// Spacing of sampled points before upsampling (m).
        downsampled_scale: f64,
        /// Border width around the tile (m).
        border_width: f64,
    },
    /// Heightfield pyramid with sloped faces.
    HfPyramidSloped {
        /// Share of tiles using this sub-terrain.
        proportion: f64,
        /// Slope range (rise over run), interpolated over difficulty.
        slope_range: (f64, f64),
        /// Flat platform width at the center (m).
        platform_width: f64,
        /// Border width around the tile (m).
        border_width: f64,
        /// Build a pit (slopes going down from the border) instead of a hill.
        inverted: bool,
    },
}

impl SubTerrainConfig {
    /// Share of tiles using this sub-terrain.
    #[must_use]
    pub const fn proportion(&self) -> f64 {
        match self {
            Self::PyramidStairs { proportion, .. }
            | Self::RandomGrid { proportion, .. }
            | Self::HfRandomUniform { proportion, .. }
            | Self::HfPyramidSloped { proportion, .. } => *proportion,
        }
    }
}

/// Procedural terrain grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainGeneratorConfig {
    /// Size of one tile (m).
    pub size: (f64, f64),
    /// Flat border around the whole grid (m).
    pub border_width: f64,
    /// Number of tile rows (difficulty levels).
    pub num_rows: usize,
    /// Number of tile columns.
    pub num_cols: usize,
    /// Heightfield horizontal resolution (m).
    pub horizontal_scale: f64,
    /// Heightfield vertical resolution (m).
    pub vertical_scale: f64,
    /// Slopes steeper than this are turned into vertical walls.
    pub slope_threshold: Option<f64>,
    /// Whether rows are arranged by increasing difficulty.
    pub curriculum: bool,
    /// Reuse previously generated meshes.
    pub use_cache: bool,
    /// Tile kinds keyed by name.
    pub sub_terrains: BTreeMap<String, SubTerrainConfig>,
}

impl TerrainGeneratorConfig {
    /// Mixed rough terrain used to train blind and perceptive locomotion.
    #[must_use]
    pub fn rough() -> Self {
        let sub_terrains = BTreeMap::from([
            (
                "pyramid_stairs".to_owned(),
                SubTerrainConfig::PyramidStairs {
                    proportion: 0.2,
                    step_height_range: (0.05, 0.23),
                    step_width: 0.3,
                    platform_width: 3.0,
                    border_width: 1.0,
                    inverted: false,
                },
            ),
            (
                "pyramid_stairs_inv".to_owned(),
                SubTerrainConfig::PyramidStairs {
                    proportion: 0.2,
                    step_height_range: (0.05, 0.23),
                    step_width: 0.3,
                    platform_width: 3.0,
                    border_width: 1.0,
                    inverted: true,
                },
            ),
            (
                "boxes".to_owned(),
                SubTerrainConfig::RandomGrid {
                    proportion: 0.2,
                    grid_width: 0.45,
                    grid_height_range: (0.05, 0.2),
                    platform_width: 2.0,
                },
            ),
            (
                "random_rough".to_owned(),
                SubTerrainConfig::HfRandomUniform {
                    proportion: 0.2,
                    noise_range: (0.02, 0.10),
                    noise_step: 0.02,
                    downsampled_scale: 0.1,
                    border_width: 0.25,
                },
            ),
            (
                "hf_pyramid_slope".to_owned(),
                SubTerrainConfig::HfPyramidSloped {
                    proportion: 0.1,
                    slope_range: (0.0, 0.4),
                    platform_width: 2.0,
                    border_width: 0.25,
                    inverted: false,
                },
            ),
            (
                "hf_pyramid_slope_inv".to_owned(),
                SubTerrainConfig::HfPyramidSloped {
                    proportion: 0.1,
                    slope_range: (0.0, 0.4),
                    platform_width: 2.0,
                    border_width: 0.25,
                    inverted: true,
                },
            ),
        ]);

        Self {
            size: (8.0, 8.0),
            border_width: 20.0,
            num_rows: 10,
            num_cols: 20,
            horizontal_scale: 0.1,
            vertical_scale: 0.005,
            slope_threshold: Some(0.75),
            curriculum: true,
            use_cache: false,
            sub_terrains,
        }
    }

    /// Set the tile size.
    #[must_use]
    pub fn with_size(mut self, width: f64, length: f64) -> Self {
        self.size = (width, length);
        self
    }

    /// Set the grid dimensions.
    #[must_use]
    pub fn with_grid(mut self, num_rows: usize, num_cols: usize) -> Self {
        self.num_rows = num_rows;
        self.num_cols = num_cols;
        self
    }

    /// Replace every sub-terrain with a single one.
    #[must_use]
    pub fn with_single_sub_terrain(mut self, name: impl Into<String>, sub: SubTerrainConfig) -> Self {
        self.sub_terrains = BTreeMap::from([(name.into(), sub)]);
        self
    }

    /// Sum of sub-terrain proportions.
    #[must_use]
    pub fn total_proportion(&self) -> f64 {
        self.sub_terrains.values().map(SubTerrainConfig::proportion).sum()
    }

    /// Total number of tiles.
    #[must_use]
    pub const fn num_tiles(&self) -> usize {
        self.num_rows * self.num_cols
    }
}

/// Ground of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainImporterConfig {
    /// Scene path of the ground prim.
    pub prim_path: String,
    /// Plane or generated terrain.
    pub terrain_type: TerrainType,
    /// Generator, present only for [`TerrainType::Generator`].
    pub generator: Option<TerrainGeneratorConfig>,
    /// Highest difficulty row robots may spawn on initially.
    pub max_init_terrain_level: Option<usize>,
    /// Ground contact material.
    pub physics_material: RigidBodyMaterial,
    /// Ground appearance.
    pub visual_material: VisualMaterial,
}

impl TerrainImporterConfig {
    /// Generated rough terrain.
    #[must_use]
    pub fn rough() -> Self {
        Self {
            prim_path: "/World/ground".to_owned(),
            terrain_type: TerrainType::Generator,
            generator: Some(TerrainGeneratorConfig::rough()),
            max_init_terrain_level: Some(5),
            physics_material: RigidBodyMaterial::default(),
            visual_material: VisualMaterial::marble_tiles(),
        }
    }

    /// Switch to an infinite flat plane and drop the generator.
    pub fn set_plane(&mut self) {
        self.terrain_type = TerrainType::Plane;
        self.generator = None;
    }

    /// Switch to generated tiles.
    pub fn set_generator(&mut self, generator: TerrainGeneratorConfig) {
        self.terrain_type = TerrainType::Generator;
        self.generator = Some(generator);
    }

    /// Whether the ground is a flat plane.
    #[must_use]
    pub const fn is_plane(&self) -> bool {
        matches!(self.terrain_type, TerrainType::Plane)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rough_proportions_sum_to_one() {
        let generator = TerrainGeneratorConfig::rough();
        assert_relative_eq!(generator.total_proportion(), 1.0, epsilon = 1e-12);
        assert_eq!(generator.num_tiles(), 200);
        assert!(generator.curriculum);
    }

    #[test]
    fn test_single_sub_terrain() {
        let generator = TerrainGeneratorConfig::rough()
            .with_size(50.0, 50.0)
            .with_grid(4, 4)
            .with_single_sub_terrain(
                "flat",
                SubTerrainConfig::HfRandomUniform {
                    proportion: 1.0,
                    noise_range: (0.0, 0.0),
                    noise_step: 0.01,
                    downsampled_scale: 0.25,
                    border_width: 0.1,
                },
            );

        assert_eq!(generator.sub_terrains.len(), 1);
        assert!(generator.sub_terrains.contains_key("flat"));
        assert_eq!(generator.size, (50.0, 50.0));
        assert_eq!(generator.num_tiles(), 16);
    }

    #[test]
    fn test_switch_plane_and_generator() {
        let mut terrain = TerrainImporterConfig::rough();
        terrain.set_plane();
        assert!(terrain.is_plane());
        assert!(terrain.generator.is_none());

        terrain.set_generator(TerrainGeneratorConfig::rough().with_grid(4, 4));
        assert!(!terrain.is_plane());
        assert_eq!(terrain.generator.unwrap().num_tiles(), 16);
    }

    #[test]
    fn test_visual_material_serde_tag() {
        let json = serde_json::to_value(VisualMaterial::preview_surface(0.1, 0.2, 0.3)).unwrap();
        assert_eq!(json["kind"], "preview_surface");
    }
}
