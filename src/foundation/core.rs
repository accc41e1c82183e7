use crate::foundation::error::{CurtainError, CurtainResult};

pub use kurbo::Vec2;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
/// Milliseconds on the session clock. Used for both instants and durations.
pub struct Millis(pub u64);

impl Millis {
    /// Session start.
    pub const ZERO: Self = Self(0);

    /// Instant `by` after `self`, saturating at `u64::MAX`.
    pub fn after(self, by: Millis) -> Self {
        Self(self.0.saturating_add(by.0))
    }

    /// Elapsed time from `earlier` to `self`, or zero if `earlier` is later.
    pub fn since(self, earlier: Millis) -> Self {
        Self(self.0.saturating_sub(earlier.0))
    }

    /// Seconds as a float.
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Coarse device class, decided once per session.
pub enum DeviceClass {
    /// Narrow or portrait viewport.
    Mobile,
    /// Everything else.
    Desktop,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Browser viewport in CSS pixels, sampled at mount.
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Viewport {
    /// Validated constructor.
    pub fn new(width: f64, height: f64) -> CurtainResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(CurtainError::validation(
                "Viewport dimensions must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Width over height.
    pub fn aspect(self) -> f64 {
        self.width / self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visible extent of the object plane in scene units.
pub struct SceneViewport {
    /// Visible width in scene units.
    pub width: f64,
    /// Visible height in scene units.
    pub height: f64,
}

impl SceneViewport {
    /// Extent seen by a perspective camera `distance` units away from the
    /// object plane with a vertical field of view of `fov_deg`.
    pub fn from_camera(viewport: Viewport, distance: f64, fov_deg: f64) -> Self {
        let height = 2.0 * distance * (fov_deg.to_radians() / 2.0).tan();
        Self {
            width: height * viewport.aspect(),
            height,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Three-component vector for scene transforms.
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// All zeros.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Component-wise constructor.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Position, Euler rotation (radians) and scale of the scene object.
pub struct Pose {
    /// Translation in scene units.
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(1.0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
