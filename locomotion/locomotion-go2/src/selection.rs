//! Terrain and camera selection from task parameters.
//!
//! Both selections are pure functions of the parameters, so the builder only
//! has to apply the chosen variant.

use locomotion_types::{SubTerrainConfig, ViewerConfig};
use tracing::warn;

/// Sub-terrain key used for noise heightfields.
pub const RANDOM_ROUGH_KEY: &str = "random_rough";
/// Sub-terrain key used for climbing pyramids.
pub const INCLINE_KEY: &str = "hf_pyramid_incline";
/// Sub-terrain key used for descending pyramids.
pub const DECLINE_KEY: &str = "hf_pyramid_decline";

const NOISE_STEP: f64 = 0.01;
const DOWNSAMPLED_SCALE: f64 = 0.25;
const TILE_BORDER_WIDTH: f64 = 0.10;
const PLATFORM_WIDTH: f64 = 2.0;

/// The single ground variant of a task.
///
/// # Example
///
/// ```
/// use locomotion_go2::TerrainKind;
///
/// // Roughness wins over slope.
/// let kind = TerrainKind::select(5.0, 10.0, false);
/// assert!(matches!(kind, TerrainKind::RandomRough { .. }));
///
/// assert_eq!(TerrainKind::select(0.0, 0.0, false), TerrainKind::Plane);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerrainKind {
    /// Infinite flat plane without a generator.
    Plane,
    /// Uniform noise heightfield.
    RandomRough {
        /// Upper bound of the height noise (m).
        max_noise_m: f64,
    },
    /// Pyramid to climb out of.
    Incline {
        /// Rise over run.
        slope: f64,
    },
    /// Pyramid to walk down from.
    Decline {
        /// Rise over run.
        slope: f64,
    },
    /// Noise-free heightfield for recordings.
    DisplayFlat,
}

impl TerrainKind {
    /// Pick the ground variant.
    ///
    /// Positive roughness beats a positive slope, which beats a negative
    /// slope, which beats display mode. A slope that is neither positive nor
    /// negative (zero or NaN) selects nothing, so a NaN slope without
    /// roughness or display mode yields a plane rather than keeping the
    /// base generator's mixed tiles.
    #[must_use]
    pub fn select(roughness_cm: f64, slope_degrees: f64, display_mode: bool) -> Self {
        if roughness_cm > 0.0 {
            Self::RandomRough {
                max_noise_m: roughness_cm * 0.01,
            }
        } else if slope_degrees > 0.0 {
            Self::Incline {
                slope: slope_from_degrees(slope_degrees),
            }
        } else if slope_degrees < 0.0 {
            Self::Decline {
                slope: slope_from_degrees(slope_degrees),
            }
        } else if display_mode {
            Self::DisplayFlat
        } else {
            Self::Plane
        }
    }

    /// Whether this variant uses the terrain generator.
    #[must_use]
    pub const fn uses_generator(&self) -> bool {
        !matches!(self, Self::Plane)
    }

    /// Generator key and tile description, or `None` for a plane.
    #[must_use]
    pub fn sub_terrain(&self) -> Option<(&'static str, SubTerrainConfig)> {
        match *self {
            Self::Plane => None,
            Self::RandomRough { max_noise_m } => {
                Some((RANDOM_ROUGH_KEY, random_uniform(max_noise_m)))
            }
            Self::DisplayFlat => Some((RANDOM_ROUGH_KEY, random_uniform(0.0))),
            Self::Incline { slope } => Some((INCLINE_KEY, pyramid(slope, true))),
            Self::Decline { slope } => Some((DECLINE_KEY, pyramid(slope, false))),
        }
    }
}

/// Rise over run of a slope angle, ignoring its sign.
fn slope_from_degrees(degrees: f64) -> f64 {
    (degrees / 180.0 * std::f64::consts::PI).tan().abs()
}

fn random_uniform(max_noise_m: f64) -> SubTerrainConfig {
    SubTerrainConfig::HfRandomUniform {
        proportion: 1.0,
        noise_range: (0.0, max_noise_m),
        noise_step: NOISE_STEP,
        downsampled_scale: DOWNSAMPLED_SCALE,
        border_width: TILE_BORDER_WIDTH,
    }
}

// An inverted pyramid is a pit, so robots spawned at its center climb out.
fn pyramid(slope: f64, inverted: bool) -> SubTerrainConfig {
    SubTerrainConfig::HfPyramidSloped {
        proportion: 1.0,
        slope_range: (slope, slope),
        platform_width: PLATFORM_WIDTH,
        border_width: TILE_BORDER_WIDTH,
        inverted,
    }
}

/// Camera framing of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerMode {
    /// Not recording; the camera is left alone.
    Disabled,
    /// Fixed in the world frame.
    World,
    /// Close up on the robot.
    Zoom,
    /// Trailing behind the robot.
    Follow,
    /// Recording with an unknown framing; only the resolution changes.
    Unchanged {
        /// The framing that was asked for.
        display_type: String,
    },
}

impl ViewerMode {
    /// Pick the framing from the display parameters.
    #[must_use]
    pub fn select(display_mode: bool, display_type: &str) -> Self {
        if !display_mode {
            return Self::Disabled;
        }
        match display_type {
            "world" => Self::World,
            "zoom" => Self::Zoom,
            "follow" => Self::Follow,
            other => Self::Unchanged {
                display_type: other.to_owned(),
            },
        }
    }

    /// Apply the framing to a viewer.
    #[must_use]
    pub fn apply(&self, viewer: ViewerConfig) -> ViewerConfig {
        match self {
            Self::Disabled => viewer,
            Self::World => viewer.world_fixed(),
            Self::Zoom => viewer.following("robot", (2.0, 2.0, 2.0)),
            Self::Follow => viewer.following("robot", (-5.0, 2.0, 1.5)),
            Self::Unchanged { display_type } => {
                warn!(display_type = %display_type, "Unknown display type, camera left unchanged");
                viewer
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use locomotion_types::OriginType;

    #[test]
    fn test_roughness_beats_slope() {
        match TerrainKind::select(5.0, 10.0, true) {
            TerrainKind::RandomRough { max_noise_m } => assert_relative_eq!(max_noise_m, 0.05),
            other => panic!("unexpected terrain {other:?}"),
        }
    }

    #[test]
    fn test_slope_sign_selects_direction() {
        let slope = 10.0_f64.to_radians().tan();
        match TerrainKind::select(0.0, 10.0, false) {
            TerrainKind::Incline { slope: s } => assert_relative_eq!(s, slope, epsilon = 1e-12),
            other => panic!("unexpected terrain {other:?}"),
        }
        match TerrainKind::select(-1.0, -10.0, false) {
            TerrainKind::Decline { slope: s } => assert_relative_eq!(s, slope, epsilon = 1e-12),
            other => panic!("unexpected terrain {other:?}"),
        }
    }

    #[test]
    fn test_display_flat_and_plane() {
        assert_eq!(TerrainKind::select(0.0, 0.0, true), TerrainKind::DisplayFlat);
        assert_eq!(TerrainKind::select(-3.0, 0.0, false), TerrainKind::Plane);
        assert_eq!(TerrainKind::select(0.0, f64::NAN, false), TerrainKind::Plane);
        assert!(!TerrainKind::Plane.uses_generator());
        assert!(TerrainKind::Plane.sub_terrain().is_none());
    }

    #[test]
    fn test_sub_terrain_shapes() {
        let (key, sub) = TerrainKind::DisplayFlat.sub_terrain().unwrap();
        assert_eq!(key, RANDOM_ROUGH_KEY);
        match sub {
            SubTerrainConfig::HfRandomUniform {
                noise_range,
                noise_step,
                downsampled_scale,
                border_width,
                ..
            } => {
                assert_eq!(noise_range, (0.0, 0.0));
                assert_eq!(noise_step, 0.01);
                assert_eq!(downsampled_scale, 0.25);
                assert_eq!(border_width, 0.10);
            }
            other => panic!("unexpected sub-terrain {other:?}"),
        }

        let (key, sub) = TerrainKind::Incline { slope: 0.3 }.sub_terrain().unwrap();
        assert_eq!(key, INCLINE_KEY);
        assert!(matches!(
            sub,
            SubTerrainConfig::HfPyramidSloped { inverted: true, slope_range, .. }
                if slope_range == (0.3, 0.3)
        ));

        let (key, sub) = TerrainKind::Decline { slope: 0.3 }.sub_terrain().unwrap();
        assert_eq!(key, DECLINE_KEY);
        assert!(matches!(
            sub,
            SubTerrainConfig::HfPyramidSloped { inverted: false, platform_width, .. }
                if platform_width == 2.0
        ));
    }

    #[test]
    fn test_viewer_modes() {
        assert_eq!(ViewerMode::select(false, "zoom"), ViewerMode::Disabled);

        let zoom = ViewerMode::select(true, "zoom").apply(ViewerConfig::default());
        assert_eq!(zoom.origin_type, OriginType::AssetRoot);
        assert_eq!(zoom.eye, (2.0, 2.0, 2.0));

        let follow = ViewerMode::select(true, "follow").apply(ViewerConfig::default());
        assert_eq!(follow.asset_name.as_deref(), Some("robot"));
        assert_eq!(follow.eye, (-5.0, 2.0, 1.5));

        let world = ViewerMode::select(true, "world").apply(ViewerConfig::default());
        assert_eq!(world.origin_type, OriginType::World);
    }

    #[test]
    fn test_unknown_display_type_is_explicit() {
        let mode = ViewerMode::select(true, "orbit");
        assert_eq!(
            mode,
            ViewerMode::Unchanged {
                display_type: "orbit".to_owned()
            }
        );
        assert_eq!(mode.apply(ViewerConfig::default()), ViewerConfig::default());
    }
}
