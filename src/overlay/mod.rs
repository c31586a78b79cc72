//! Overlay identity and rotation state.
//!
//! Overlays are editable text boxes owned by the editing surface; this core
//! tracks their identity (for the bounds snapshot store) and the page
//! rotation epoch their geometry was captured under.

pub mod rotation;
pub mod snapshots;

pub use rotation::{rotate_unit_point, RatioRect, Viewport};
pub use snapshots::{BoundsSnapshot, BoundsSnapshotStore};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one overlay.
///
/// Overlay entities live in the editing surface; metadata kept on this side
/// (bounds snapshots) is keyed by id and destroyed explicitly, never tied to
/// object lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(Uuid);

impl OverlayId {
    /// Mint a fresh id.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Page rotation as a number of quarter turns, always in `[0, 3]`.
///
/// Any raw degree value normalizes through
/// `((round(deg / 90) % 4) + 4) % 4`, so `-90.0` and `270.0` are the same
/// rotation. Serialized as degrees, which is what the editing surface
/// speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Rotation(u8);

impl Rotation {
    /// The unrotated state.
    pub const NONE: Rotation = Rotation(0);

    /// Normalize a signed step count into `[0, 3]`.
    pub fn from_steps(steps: i32) -> Self {
        Self(steps.rem_euclid(4) as u8)
    }

    /// Normalize a degree value (any sign, any magnitude, need not be a
    /// multiple of 90) into quarter turns.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_retouch::overlay::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(90.0).steps(), 1);
    /// assert_eq!(Rotation::from_degrees(-90.0).steps(), 3);
    /// assert_eq!(Rotation::from_degrees(450.0).steps(), 1);
    /// assert_eq!(Rotation::from_degrees(85.0).steps(), 1);
    /// ```
    pub fn from_degrees(degrees: f32) -> Self {
        Self::from_steps((degrees / 90.0).round() as i32)
    }

    /// Quarter turns, in `[0, 3]`.
    pub fn steps(self) -> u8 {
        self.0
    }

    /// The rotation in degrees: 0, 90, 180, or 270.
    pub fn degrees(self) -> f32 {
        self.0 as f32 * 90.0
    }

    /// The rotation to apply to geometry captured at `earlier` so it lands
    /// in this rotation's frame: `(self − earlier) mod 4`.
    pub fn delta_since(self, earlier: Rotation) -> Rotation {
        Self::from_steps(self.0 as i32 - earlier.0 as i32)
    }

    /// The inverse rotation: applying both is the identity.
    pub fn inverse(self) -> Rotation {
        Self::from_steps(-(self.0 as i32))
    }
}

impl From<f32> for Rotation {
    fn from(degrees: f32) -> Self {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for f32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}
