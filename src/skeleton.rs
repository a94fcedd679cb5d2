// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Landmark index and naming tables.
//!
//! Pose indices follow the 33-point `MediaPipe` Pose layout and hand indices the 21-point
//! `MediaPipe` Hands layout. The fused skeleton uses a 23-slot per-side layout: shoulder,
//! elbow, then the 21 hand joints starting at the wrist.

use crate::side::Side;

/// Number of landmarks produced by the pose detector.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Number of landmarks produced by the hand detector per hand.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Number of slots in a fused single-side arm+hand skeleton.
pub const ARM_HAND_LANDMARK_COUNT: usize = 23;

/// Number of arm slots preceding the hand joints in the fused layout.
pub const ARM_SLOTS: usize = ARM_HAND_LANDMARK_COUNT - HAND_LANDMARK_COUNT;

// Pose indices as labelled by the pose model (anatomical sides of an unmirrored frame)
pub const POSE_LEFT_SHOULDER: usize = 11;
pub const POSE_RIGHT_SHOULDER: usize = 12;
pub const POSE_LEFT_ELBOW: usize = 13;
pub const POSE_RIGHT_ELBOW: usize = 14;
pub const POSE_LEFT_WRIST: usize = 15;
pub const POSE_RIGHT_WRIST: usize = 16;

// Hand indices
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_MCP: usize = 5;
pub const INDEX_FINGER_PIP: usize = 6;
pub const INDEX_FINGER_DIP: usize = 7;
pub const INDEX_FINGER_TIP: usize = 8;
pub const MIDDLE_FINGER_MCP: usize = 9;
pub const MIDDLE_FINGER_PIP: usize = 10;
pub const MIDDLE_FINGER_DIP: usize = 11;
pub const MIDDLE_FINGER_TIP: usize = 12;
pub const RING_FINGER_MCP: usize = 13;
pub const RING_FINGER_PIP: usize = 14;
pub const RING_FINGER_DIP: usize = 15;
pub const RING_FINGER_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Hand landmark names in detector order.
pub const HAND_LANDMARK_NAMES: [&str; HAND_LANDMARK_COUNT] = [
    "wrist",
    "thumb_cmc",
    "thumb_mcp",
    "thumb_ip",
    "thumb_tip",
    "index_finger_mcp",
    "index_finger_pip",
    "index_finger_dip",
    "index_finger_tip",
    "middle_finger_mcp",
    "middle_finger_pip",
    "middle_finger_dip",
    "middle_finger_tip",
    "ring_finger_mcp",
    "ring_finger_pip",
    "ring_finger_dip",
    "ring_finger_tip",
    "pinky_mcp",
    "pinky_pip",
    "pinky_dip",
    "pinky_tip",
];

/// Fused arm+hand slot names in canonical order.
pub const ARM_HAND_LANDMARK_NAMES: [&str; ARM_HAND_LANDMARK_COUNT] = [
    "shoulder",
    "elbow",
    "wrist",
    "thumb_cmc",
    "thumb_mcp",
    "thumb_ip",
    "thumb_tip",
    "index_finger_mcp",
    "index_finger_pip",
    "index_finger_dip",
    "index_finger_tip",
    "middle_finger_mcp",
    "middle_finger_pip",
    "middle_finger_dip",
    "middle_finger_tip",
    "ring_finger_mcp",
    "ring_finger_pip",
    "ring_finger_dip",
    "ring_finger_tip",
    "pinky_mcp",
    "pinky_pip",
    "pinky_dip",
    "pinky_tip",
];

/// Arm joints the pose detector contributes to the fused skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmJoint {
    /// Shoulder, fused slot 0.
    Shoulder,
    /// Elbow, fused slot 1.
    Elbow,
    /// Wrist, fused slot 2, shared with the hand detector.
    Wrist,
}

impl ArmJoint {
    /// Joint name without side prefix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shoulder => "shoulder",
            Self::Elbow => "elbow",
            Self::Wrist => "wrist",
        }
    }

    /// Slot of this joint in the fused layout.
    #[must_use]
    pub const fn slot(&self) -> usize {
        match self {
            Self::Shoulder => 0,
            Self::Elbow => 1,
            Self::Wrist => 2,
        }
    }
}

/// Pose landmark index for a physical side and arm joint.
///
/// The pose model labels sides anatomically. On a mirrored (selfie) frame its `left_*`
/// landmarks therefore sit on the subject's physical right, so the lookup swaps sides.
///
/// # Arguments
///
/// * `side` - Physical side of the subject.
/// * `joint` - Arm joint.
/// * `mirrored` - Whether detection ran on a horizontally mirrored frame.
///
/// # Returns
///
/// * Index into a 33-point pose landmark set.
#[must_use]
pub const fn pose_index(side: Side, joint: ArmJoint, mirrored: bool) -> usize {
    let labelled = if mirrored { side.opposite() } else { side };
    match (labelled, joint) {
        (Side::Left, ArmJoint::Shoulder) => POSE_LEFT_SHOULDER,
        (Side::Right, ArmJoint::Shoulder) => POSE_RIGHT_SHOULDER,
        (Side::Left, ArmJoint::Elbow) => POSE_LEFT_ELBOW,
        (Side::Right, ArmJoint::Elbow) => POSE_RIGHT_ELBOW,
        (Side::Left, ArmJoint::Wrist) => POSE_LEFT_WRIST,
        (Side::Right, ArmJoint::Wrist) => POSE_RIGHT_WRIST,
    }
}

/// Fused-layout slot of a hand landmark index.
#[must_use]
pub const fn hand_slot(hand_index: usize) -> usize {
    ARM_SLOTS + hand_index
}

/// Fully qualified name of a fused slot, e.g. `right_index_finger_tip`.
#[must_use]
pub fn slot_name(side: Side, slot: usize) -> Option<String> {
    ARM_HAND_LANDMARK_NAMES
        .get(slot)
        .map(|name| format!("{}_{name}", side.as_str()))
}
