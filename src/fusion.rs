// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton fusion engine.
//!
//! Stitches a hand skeleton onto the arm of a body-pose skeleton. The hand detector and the
//! pose detector each report a wrist; the fused skeleton keeps the pose detector's wrist and
//! moves the whole hand by the difference between the two, so the hand lands in the pose
//! detector's world frame.
//!
//! Only translation is reconciled. Both detectors are assumed to share axis orientation and
//! scale.

use crate::config::FusionConfig;
use crate::detection::{FrameDetections, PoseDetection};
use crate::error::{FusionError, Result};
use crate::handedness::{ResolvedHands, resolve_hands};
use crate::landmark::{Landmark, Offset};
use crate::results::{ArmHandSlots, FusedSkeleton, FusionOutput};
use crate::side::{Side, SideSelection};
use crate::skeleton::{ARM_SLOTS, ArmJoint, WRIST, pose_index};

/// Fuses pose and hand detections into per-side arm+hand skeletons.
///
/// Holds only configuration; every call is independent of the previous one.
///
/// # Example
///
/// ```no_run
/// use hand_arm_fusion::{FrameDetections, FusionConfig, SideSelection, SkeletonFusion};
///
/// # fn main() -> hand_arm_fusion::Result<()> {
/// let fusion = SkeletonFusion::new(FusionConfig::default())?;
/// let frame = FrameDetections::default();
/// let output = fusion.fuse_frame(&frame, SideSelection::Right)?;
/// assert!(output.right.is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SkeletonFusion {
    config: FusionConfig,
}

impl SkeletonFusion {
    /// Create a fusion engine.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::ConfigError`] if the configuration is invalid.
    pub fn new(config: FusionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Resolve handedness for a frame and fuse the selected side(s).
    ///
    /// # Errors
    ///
    /// See [`SkeletonFusion::fuse`] and [`resolve_hands`].
    pub fn fuse_frame(
        &self,
        frame: &FrameDetections,
        selection: SideSelection,
    ) -> Result<FusionOutput> {
        let hands = resolve_hands(&frame.hands, &self.config)?;
        self.fuse(frame.pose.as_ref(), &hands, selection)
    }

    /// Fuse the selected side(s).
    ///
    /// # Arguments
    ///
    /// * `pose` - The body, if the pose detector found one.
    /// * `hands` - Hands resolved by physical side.
    /// * `selection` - Side(s) to fuse.
    ///
    /// # Returns
    ///
    /// * A [`FusionOutput`]; a side that could not be fused this frame is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::UnsupportedSide`] if the selection includes a side not enabled
    /// in the configuration, or [`FusionError::MalformedDetectorOutput`] for inconsistent
    /// detector output.
    pub fn fuse(
        &self,
        pose: Option<&PoseDetection>,
        hands: &ResolvedHands,
        selection: SideSelection,
    ) -> Result<FusionOutput> {
        let mut output = FusionOutput::empty(selection);
        match selection {
            SideSelection::Left => output.left = self.fuse_side(pose, hands, Side::Left)?,
            SideSelection::Right => output.right = self.fuse_side(pose, hands, Side::Right)?,
            SideSelection::Both => {
                output.left = self.fuse_side(pose, hands, Side::Left)?;
                output.right = self.fuse_side(pose, hands, Side::Right)?;
            }
        }
        Ok(output)
    }

    /// Fuse one side.
    ///
    /// Returns `Ok(None)` when there is no body, no hand on `side`, or the image-space
    /// shoulder or elbow is below the visibility threshold. A returned skeleton is never
    /// partially filled.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::UnsupportedSide`] if `side` is not enabled, or
    /// [`FusionError::MalformedDetectorOutput`] if a landmark lookup falls outside the
    /// detector's landmark sets.
    pub fn fuse_side(
        &self,
        pose: Option<&PoseDetection>,
        hands: &ResolvedHands,
        side: Side,
    ) -> Result<Option<FusedSkeleton>> {
        if !self.config.is_side_enabled(side) {
            return Err(FusionError::UnsupportedSide(side));
        }
        let Some(pose) = pose else {
            return Ok(None);
        };
        if hands.is_empty() {
            return Ok(None);
        }
        let Some(hand) = hands.get(side) else {
            return Ok(None);
        };

        let mirrored = self.config.mirrored;
        let arm_image = |joint| lookup(pose.image(), pose_index(side, joint, mirrored), "pose image");
        let arm_world = |joint| lookup(pose.world(), pose_index(side, joint, mirrored), "pose world");

        let shoulder_image = arm_image(ArmJoint::Shoulder)?;
        let elbow_image = arm_image(ArmJoint::Elbow)?;
        let threshold = self.config.visibility_threshold;
        if !shoulder_image.is_visible(threshold) || !elbow_image.is_visible(threshold) {
            return Ok(None);
        }

        let hand_image = hand.image();
        let hand_world = hand.world();
        let shoulder_world = arm_world(ArmJoint::Shoulder)?;
        let elbow_world = arm_world(ArmJoint::Elbow)?;
        let pose_wrist = arm_world(ArmJoint::Wrist)?;
        let offset = anchor_offset(lookup(hand_world, WRIST, "hand world")?, pose_wrist);

        let image = build_slots(shoulder_image, elbow_image, |i| {
            lookup(hand_image, i, "hand image")
        })?;
        let world = build_slots(shoulder_world, elbow_world, |i| {
            if i == WRIST {
                Ok(pose_wrist)
            } else {
                lookup(hand_world, i, "hand world").map(|p| p - offset)
            }
        })?;

        Ok(Some(FusedSkeleton::new(side, world, image)))
    }
}

/// Translation from the pose detector's frame to the hand detector's frame, measured at
/// the wrist both detectors report.
///
/// Subtracting it from a hand-frame point expresses that point in the pose frame.
#[must_use]
pub fn anchor_offset(hand_wrist: Landmark, pose_wrist: Landmark) -> Offset {
    hand_wrist - pose_wrist
}

fn lookup(landmarks: &[Landmark], index: usize, what: &str) -> Result<Landmark> {
    landmarks.get(index).copied().ok_or_else(|| {
        FusionError::MalformedDetectorOutput(format!(
            "{what} landmark {index} missing from set of {}",
            landmarks.len()
        ))
    })
}

/// Assemble the 23 slots: shoulder, elbow, then hand joints by hand index.
fn build_slots(
    shoulder: Landmark,
    elbow: Landmark,
    hand_joint: impl Fn(usize) -> Result<Landmark>,
) -> Result<ArmHandSlots> {
    let mut failure = None;
    let slots = std::array::from_fn(|slot| match slot {
        0 => Some(shoulder),
        1 => Some(elbow),
        _ => match hand_joint(slot - ARM_SLOTS) {
            Ok(p) => Some(p),
            Err(e) => {
                if failure.is_none() {
                    failure = Some(e);
                }
                None
            }
        },
    });
    failure.map_or(Ok(slots), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::HandDetection;
    use crate::handedness::Handedness;
    use crate::skeleton::{ARM_HAND_LANDMARK_COUNT, INDEX_FINGER_TIP, POSE_LEFT_ELBOW};

    fn pose(visibility: f32) -> PoseDetection {
        let image = (0..33)
            .map(|i| Landmark::with_visibility(0.01 * i as f32, 0.5, 0.0, visibility))
            .collect();
        let world = (0..33)
            .map(|i| Landmark::with_visibility(0.1 * i as f32, 0.2, 0.3, visibility))
            .collect();
        PoseDetection::new(image, world).unwrap()
    }

    fn right_hand() -> ResolvedHands {
        let image = (0..21).map(|i| Landmark::new(0.6, 0.01 * i as f32, 0.0)).collect();
        let world = (0..21).map(|i| Landmark::new(0.02 * i as f32, 1.0, 2.0)).collect();
        let hand = HandDetection::new(Handedness::Right, image, world).unwrap();
        resolve_hands(&[hand], &FusionConfig::default()).unwrap()
    }

    fn engine() -> SkeletonFusion {
        SkeletonFusion::new(FusionConfig::default()).unwrap()
    }

    #[test]
    fn test_fuse_right_complete() {
        let pose = pose(0.9);
        let fused = engine()
            .fuse_side(Some(&pose), &right_hand(), Side::Right)
            .unwrap()
            .unwrap();
        assert_eq!(fused.side(), Side::Right);
        assert!(fused.is_complete());
        assert_eq!(fused.world().len(), ARM_HAND_LANDMARK_COUNT);
    }

    #[test]
    fn test_world_wrist_is_pose_wrist() {
        let pose = pose(0.9);
        let fused = engine()
            .fuse_side(Some(&pose), &right_hand(), Side::Right)
            .unwrap()
            .unwrap();
        // Mirrored frame: physical right is the pose model's left wrist (15)
        assert_eq!(fused.world_joint(ArmJoint::Wrist), Some(pose.world()[15]));
    }

    #[test]
    fn test_image_wrist_is_hand_wrist() {
        let pose = pose(0.9);
        let hands = right_hand();
        let fused = engine()
            .fuse_side(Some(&pose), &hands, Side::Right)
            .unwrap()
            .unwrap();
        assert_eq!(fused.image_hand(WRIST), Some(hands.right_hand_image().unwrap()[WRIST]));
    }

    #[test]
    fn test_hand_joints_translated() {
        let pose = pose(0.9);
        let hands = right_hand();
        let fused = engine()
            .fuse_side(Some(&pose), &hands, Side::Right)
            .unwrap()
            .unwrap();
        let raw = hands.right_hand_world().unwrap();
        let offset = anchor_offset(raw[WRIST], pose.world()[15]);
        assert_eq!(fused.world_hand(INDEX_FINGER_TIP), Some(raw[INDEX_FINGER_TIP] - offset));
    }

    #[test]
    fn test_low_visibility_rejects_side() {
        let pose = pose(0.3);
        let result = engine().fuse_side(Some(&pose), &right_hand(), Side::Right).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_only_elbow_low_rejects_side() {
        let mut image = pose(0.9).image().to_vec();
        image[POSE_LEFT_ELBOW].visibility = Some(0.2);
        let pose = PoseDetection::new(image, pose(0.9).world().to_vec()).unwrap();
        let result = engine().fuse_side(Some(&pose), &right_hand(), Side::Right).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_pose_or_hand() {
        let pose = pose(0.9);
        assert!(engine().fuse_side(None, &right_hand(), Side::Right).unwrap().is_none());
        assert!(engine()
            .fuse_side(Some(&pose), &ResolvedHands::default(), Side::Right)
            .unwrap()
            .is_none());
        assert!(engine().fuse_side(Some(&pose), &right_hand(), Side::Left).unwrap().is_none());
    }

    #[test]
    fn test_disabled_side_is_error() {
        let engine =
            SkeletonFusion::new(FusionConfig::new().with_sides(SideSelection::Right)).unwrap();
        let err = engine.fuse_side(None, &right_hand(), Side::Left).unwrap_err();
        assert!(err.is_unsupported_side());
    }

    #[test]
    fn test_fuse_both() {
        let pose = pose(0.9);
        let output = engine().fuse(Some(&pose), &right_hand(), SideSelection::Both).unwrap();
        assert!(output.left.is_none());
        assert!(output.right.is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FusionConfig::new().with_visibility_threshold(2.0);
        assert!(matches!(
            SkeletonFusion::new(config),
            Err(FusionError::ConfigError(_))
        ));
    }

    #[test]
    fn test_build_slots_reports_missing_joint() {
        let p = Landmark::new(0.0, 0.0, 0.0);
        let result = build_slots(p, p, |i| lookup(&[p; 5], i, "hand world"));
        assert!(matches!(result, Err(FusionError::MalformedDetectorOutput(_))));
    }
}
