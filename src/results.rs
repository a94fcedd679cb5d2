// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Fusion output types.

use serde::{Deserialize, Serialize};

use crate::landmark::Landmark;
use crate::side::{Side, SideSelection};
use crate::skeleton::{ARM_HAND_LANDMARK_COUNT, ArmJoint, hand_slot};

/// Fixed 23-slot arm+hand landmark sequence in canonical order.
pub type ArmHandSlots = [Option<Landmark>; ARM_HAND_LANDMARK_COUNT];

/// Timing information for one processed frame, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    /// Time spent converting and mirroring the frame.
    pub preprocess: Option<f64>,
    /// Time spent in both detectors.
    pub detect: Option<f64>,
    /// Time spent resolving handedness and fusing.
    pub fuse: Option<f64>,
}

impl Speed {
    /// Create a new Speed instance with all timings.
    #[must_use]
    pub const fn new(preprocess: f64, detect: f64, fuse: f64) -> Self {
        Self {
            preprocess: Some(preprocess),
            detect: Some(detect),
            fuse: Some(fuse),
        }
    }

    /// Sum of all recorded stages.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.preprocess.unwrap_or(0.0) + self.detect.unwrap_or(0.0) + self.fuse.unwrap_or(0.0)
    }
}

/// One side's fused arm+hand skeleton.
///
/// Holds two parallel 23-slot sequences: world-metric (pose detector frame) and
/// image-normalized. Built once by the fusion engine and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedSkeleton {
    side: Side,
    world: ArmHandSlots,
    image: ArmHandSlots,
}

impl FusedSkeleton {
    pub(crate) const fn new(side: Side, world: ArmHandSlots, image: ArmHandSlots) -> Self {
        Self { side, world, image }
    }

    /// Side this skeleton belongs to.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// World-space slots.
    #[must_use]
    pub const fn world(&self) -> &ArmHandSlots {
        &self.world
    }

    /// Image-space slots.
    #[must_use]
    pub const fn image(&self) -> &ArmHandSlots {
        &self.image
    }

    /// World-space landmark of an arm joint.
    #[must_use]
    pub const fn world_joint(&self, joint: ArmJoint) -> Option<Landmark> {
        self.world[joint.slot()]
    }

    /// World-space landmark of a hand joint, by hand landmark index.
    #[must_use]
    pub fn world_hand(&self, hand_index: usize) -> Option<Landmark> {
        self.world.get(hand_slot(hand_index)).copied().flatten()
    }

    /// Image-space landmark of a hand joint, by hand landmark index.
    #[must_use]
    pub fn image_hand(&self, hand_index: usize) -> Option<Landmark> {
        self.image.get(hand_slot(hand_index)).copied().flatten()
    }

    /// Returns `true` if every slot in both spaces is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.world.iter().chain(self.image.iter()).all(Option::is_some)
    }
}

/// Result of fusing one frame for a [`SideSelection`].
///
/// Sides outside the selection are always `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionOutput {
    /// What was requested.
    pub selection: SideSelection,
    /// Left arm+hand, if fused.
    pub left: Option<FusedSkeleton>,
    /// Right arm+hand, if fused.
    pub right: Option<FusedSkeleton>,
}

impl FusionOutput {
    /// An output with no fused side.
    #[must_use]
    pub const fn empty(selection: SideSelection) -> Self {
        Self {
            selection,
            left: None,
            right: None,
        }
    }

    /// The fused skeleton for `side`, if any.
    #[must_use]
    pub const fn get(&self, side: Side) -> Option<&FusedSkeleton> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    /// Returns `true` if no side was fused.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of fused sides.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    /// World-space slots of both arms: left 23, then right 23.
    #[must_use]
    pub fn combined_world(&self) -> Vec<Option<Landmark>> {
        self.combined(FusedSkeleton::world)
    }

    /// Image-space slots of both arms: left 23, then right 23.
    #[must_use]
    pub fn combined_image(&self) -> Vec<Option<Landmark>> {
        self.combined(FusedSkeleton::image)
    }

    fn combined(&self, slots: fn(&FusedSkeleton) -> &ArmHandSlots) -> Vec<Option<Landmark>> {
        Side::ALL
            .iter()
            .flat_map(|&side| match self.get(side) {
                Some(skeleton) => slots(skeleton).to_vec(),
                None => vec![None; ARM_HAND_LANDMARK_COUNT],
            })
            .collect()
    }
}
