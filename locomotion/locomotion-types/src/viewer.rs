//! Viewport camera configuration.

use serde::{Deserialize, Serialize};

/// Frame the camera eye and target are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginType {
    /// World origin.
    World,
    /// Origin of environment `env_index`.
    Env,
    /// Root of asset `asset_name` in environment `env_index`; the camera
    /// follows it.
    AssetRoot,
}

/// Viewport camera.
///
/// # Example
///
/// ```
/// use locomotion_types::{OriginType, ViewerConfig};
///
/// let viewer = ViewerConfig::default().following("robot", (-5.0, 2.0, 1.5));
/// assert_eq!(viewer.origin_type, OriginType::AssetRoot);
/// assert_eq!(viewer.asset_name.as_deref(), Some("robot"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Camera position relative to the origin (m).
    pub eye: (f64, f64, f64),
    /// Camera target relative to the origin (m).
    pub lookat: (f64, f64, f64),
    /// Render resolution (width, height) in pixels.
    pub resolution: (u32, u32),
    /// Camera origin frame.
    pub origin_type: OriginType,
    /// Environment the origin refers to.
    pub env_index: usize,
    /// Asset followed with [`OriginType::AssetRoot`].
    pub asset_name: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            eye: (7.5, 7.5, 7.5),
            lookat: (0.0, 0.0, 0.0),
            resolution: (1280, 720),
            origin_type: OriginType::World,
            env_index: 0,
            asset_name: None,
        }
    }
}

impl ViewerConfig {
    /// Set the resolution to a 16:9 frame of the given pixel height.
    ///
    /// The width is truncated toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_height_16_9(mut self, height: u32) -> Self {
        let width = (f64::from(height) * (1280.0 / 720.0)) as u32;
        self.resolution = (width, height);
        self
    }

    /// Fix the camera in the world frame.
    #[must_use]
    pub fn world_fixed(mut self) -> Self {
        self.origin_type = OriginType::World;
        self
    }

    /// Follow an asset's root from the given eye offset.
    #[must_use]
    pub fn following(mut self, asset_name: impl Into<String>, eye: (f64, f64, f64)) -> Self {
        self.origin_type = OriginType::AssetRoot;
        self.asset_name = Some(asset_name.into());
        self.eye = eye;
        self
    }
}
