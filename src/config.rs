// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Fusion configuration.
//!
//! This module defines the [`FusionConfig`] struct, which controls the visibility gate,
//! the frame mirroring convention, how duplicate handedness labels are handled, and which
//! sides the engine is allowed to fuse.

use crate::error::{FusionError, Result};
use crate::handedness::DuplicateHandPolicy;
use crate::side::{Side, SideSelection};

/// Default visibility gate for shoulder and elbow.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// Configuration for skeleton fusion.
///
/// Uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use hand_arm_fusion::{FusionConfig, SideSelection};
/// use hand_arm_fusion::handedness::DuplicateHandPolicy;
///
/// let config = FusionConfig::new()
///     .with_visibility_threshold(0.6)
///     .with_mirrored(true)
///     .with_duplicate_policy(DuplicateHandPolicy::KeepFirst)
///     .with_sides(SideSelection::Right);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FusionConfig {
    /// Minimum image-space visibility for shoulder and elbow (0.0 to 1.0).
    /// A side whose shoulder or elbow falls below it produces no result.
    pub visibility_threshold: f32,
    /// Whether detections come from a horizontally mirrored (selfie) frame.
    /// The pipeline mirrors raw frames itself when this is set.
    pub mirrored: bool,
    /// What to do when the hand detector reports two hands with the same label.
    pub duplicate_policy: DuplicateHandPolicy,
    /// Sides the engine may fuse. Requests outside it fail with
    /// [`FusionError::UnsupportedSide`].
    pub sides: SideSelection,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            mirrored: true,
            duplicate_policy: DuplicateHandPolicy::KeepLast,
            sides: SideSelection::Both,
        }
    }
}

impl FusionConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shoulder/elbow visibility threshold.
    ///
    /// # Arguments
    ///
    /// * `threshold` - The minimum visibility score (0.0 to 1.0).
    ///
    /// # Returns
    ///
    /// * The modified `FusionConfig`.
    #[must_use]
    pub const fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    /// Declare whether detections were produced on a mirrored frame.
    ///
    /// # Arguments
    ///
    /// * `mirrored` - `true` for the selfie convention the hand detector expects.
    ///
    /// # Returns
    ///
    /// * The modified `FusionConfig`.
    #[must_use]
    pub const fn with_mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }

    /// Set the duplicate handedness policy.
    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicateHandPolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Restrict the sides the engine will fuse.
    ///
    /// # Arguments
    ///
    /// * `sides` - Enabled sides.
    ///
    /// # Returns
    ///
    /// * The modified `FusionConfig`.
    #[must_use]
    pub const fn with_sides(mut self, sides: SideSelection) -> Self {
        self.sides = sides;
        self
    }

    /// Returns whether `side` may be fused.
    #[must_use]
    pub const fn is_side_enabled(&self, side: Side) -> bool {
        self.sides.includes(side)
    }

    /// Check the configuration for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::ConfigError`] if the visibility threshold is not in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(FusionError::ConfigError(format!(
                "visibility threshold must be in [0, 1], got {}",
                self.visibility_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = FusionConfig::default();
        assert!((config.visibility_threshold - 0.5).abs() < f32::EPSILON);
        assert!(config.mirrored);
        assert_eq!(config.duplicate_policy, DuplicateHandPolicy::KeepLast);
        assert!(config.is_side_enabled(Side::Left));
        assert!(config.is_side_enabled(Side::Right));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = FusionConfig::new()
            .with_visibility_threshold(0.7)
            .with_mirrored(false)
            .with_duplicate_policy(DuplicateHandPolicy::RejectFrame)
            .with_sides(SideSelection::Right);

        assert!((config.visibility_threshold - 0.7).abs() < f32::EPSILON);
        assert!(!config.mirrored);
        assert_eq!(config.duplicate_policy, DuplicateHandPolicy::RejectFrame);
        assert!(config.is_side_enabled(Side::Right));
        assert!(!config.is_side_enabled(Side::Left));
    }

    #[test]
    fn test_config_validate_threshold() {
        assert!(FusionConfig::new().with_visibility_threshold(1.5).validate().is_err());
        assert!(FusionConfig::new().with_visibility_threshold(-0.1).validate().is_err());
        assert!(FusionConfig::new().with_visibility_threshold(f32::NAN).validate().is_err());
        assert!(FusionConfig::new().with_visibility_threshold(0.0).validate().is_ok());
    }
}
