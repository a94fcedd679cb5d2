// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Landmark value type.
//!
//! A [`Landmark`] is a single named 3D point reported by a detector. The same type is used
//! for image-normalized points (x, y in `[0, 1]`, z relative depth) and world-metric points
//! (meters). The two spaces only meet through an [`Offset`] during wrist re-anchoring.

use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// A 3D keypoint with an optional visibility score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
    /// Likelihood in `[0, 1]` that the point is present and not occluded.
    /// Only pose landmarks carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    /// Create a landmark without a visibility score.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
        }
    }

    /// Create a landmark carrying a visibility score.
    #[must_use]
    pub const fn with_visibility(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: Some(visibility),
        }
    }

    /// Coordinates as an `[x, y, z]` array.
    #[must_use]
    pub const fn xyz(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Check whether this landmark passes a visibility gate.
    ///
    /// A missing or NaN visibility never passes.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Minimum visibility required.
    ///
    /// # Returns
    ///
    /// * `true` if `visibility >= threshold`.
    #[must_use]
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility.is_some_and(|v| v >= threshold)
    }
}

/// Translation between two landmarks, component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    /// X delta.
    pub dx: f32,
    /// Y delta.
    pub dy: f32,
    /// Z delta.
    pub dz: f32,
}

impl Offset {
    /// Euclidean length of the translation.
    #[must_use]
    pub fn norm(&self) -> f32 {
        self.dz
            .mul_add(self.dz, self.dx.mul_add(self.dx, self.dy * self.dy))
            .sqrt()
    }
}

impl Sub for Landmark {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Offset {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
            dz: self.z - rhs.z,
        }
    }
}

impl Sub<Offset> for Landmark {
    type Output = Self;

    fn sub(self, rhs: Offset) -> Self {
        Self {
            x: self.x - rhs.dx,
            y: self.y - rhs.dy,
            z: self.z - rhs.dz,
            visibility: self.visibility,
        }
    }
}
