// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Detector output model.
//!
//! Upstream pose and hand detectors are external collaborators. This module defines the
//! shape of what they hand to the fusion engine and rejects structurally inconsistent
//! output at construction time, so the engine can index landmark sets without checks
//! failing later in the frame.

use serde::{Deserialize, Serialize};

use crate::error::{FusionError, Result};
use crate::handedness::Handedness;
use crate::landmark::Landmark;
use crate::skeleton::{HAND_LANDMARK_COUNT, POSE_LANDMARK_COUNT};

/// One body found by the pose detector.
///
/// Both sets hold exactly [`POSE_LANDMARK_COUNT`] points in pose-model order, each with a
/// visibility score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLandmarkPair")]
pub struct PoseDetection {
    image: Vec<Landmark>,
    world: Vec<Landmark>,
}

impl PoseDetection {
    /// Create a pose detection from image-space and world-space landmark sets.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::MalformedDetectorOutput`] if either set does not hold
    /// exactly 33 landmarks.
    pub fn new(image: Vec<Landmark>, world: Vec<Landmark>) -> Result<Self> {
        check_len("pose image", &image, POSE_LANDMARK_COUNT)?;
        check_len("pose world", &world, POSE_LANDMARK_COUNT)?;
        Ok(Self { image, world })
    }

    /// Image-normalized landmarks.
    #[must_use]
    pub fn image(&self) -> &[Landmark] {
        &self.image
    }

    /// World-metric landmarks.
    #[must_use]
    pub fn world(&self) -> &[Landmark] {
        &self.world
    }
}

/// One hand found by the hand detector.
///
/// Both sets hold exactly [`HAND_LANDMARK_COUNT`] points in hand-model order. Hand
/// landmarks carry no visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHandDetection")]
pub struct HandDetection {
    #[serde(rename = "label")]
    handedness: Handedness,
    image: Vec<Landmark>,
    world: Vec<Landmark>,
}

impl HandDetection {
    /// Create a hand detection.
    ///
    /// # Arguments
    ///
    /// * `handedness` - Label reported by the detector (mirrored-frame convention).
    /// * `image` - Image-normalized landmarks.
    /// * `world` - World-metric landmarks.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::MalformedDetectorOutput`] if either set does not hold
    /// exactly 21 landmarks.
    pub fn new(handedness: Handedness, image: Vec<Landmark>, world: Vec<Landmark>) -> Result<Self> {
        check_len("hand image", &image, HAND_LANDMARK_COUNT)?;
        check_len("hand world", &world, HAND_LANDMARK_COUNT)?;
        Ok(Self {
            handedness,
            image,
            world,
        })
    }

    /// Label reported by the detector.
    #[must_use]
    pub const fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Image-normalized landmarks.
    #[must_use]
    pub fn image(&self) -> &[Landmark] {
        &self.image
    }

    /// World-metric landmarks.
    #[must_use]
    pub fn world(&self) -> &[Landmark] {
        &self.world
    }
}

/// Everything both detectors reported for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameDetections {
    /// The body, if the pose detector found one.
    #[serde(default)]
    pub pose: Option<PoseDetection>,
    /// Zero to two hands in detector order.
    #[serde(default)]
    pub hands: Vec<HandDetection>,
}

impl FrameDetections {
    /// Create frame detections.
    #[must_use]
    pub const fn new(pose: Option<PoseDetection>, hands: Vec<HandDetection>) -> Self {
        Self { pose, hands }
    }
}

fn check_len(what: &str, landmarks: &[Landmark], expected: usize) -> Result<()> {
    if landmarks.len() == expected {
        Ok(())
    } else {
        Err(FusionError::MalformedDetectorOutput(format!(
            "{what} landmarks: expected {expected}, got {}",
            landmarks.len()
        )))
    }
}

#[derive(Deserialize)]
struct RawLandmarkPair {
    image: Vec<Landmark>,
    world: Vec<Landmark>,
}

impl TryFrom<RawLandmarkPair> for PoseDetection {
    type Error = FusionError;

    fn try_from(raw: RawLandmarkPair) -> Result<Self> {
        Self::new(raw.image, raw.world)
    }
}

#[derive(Deserialize)]
struct RawHandDetection {
    label: String,
    image: Vec<Landmark>,
    world: Vec<Landmark>,
}

impl TryFrom<RawHandDetection> for HandDetection {
    type Error = FusionError;

    fn try_from(raw: RawHandDetection) -> Result<Self> {
        let handedness = raw.label.parse::<Handedness>()?;
        Self::new(handedness, raw.image, raw.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Landmark> {
        vec![Landmark::with_visibility(0.5, 0.5, 0.0, 1.0); n]
    }

    #[test]
    fn test_pose_detection_length_check() {
        assert!(PoseDetection::new(points(33), points(33)).is_ok());
        let err = PoseDetection::new(points(33), points(32)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed detector output: pose world landmarks: expected 33, got 32"
        );
    }

    #[test]
    fn test_hand_detection_length_check() {
        assert!(HandDetection::new(Handedness::Right, points(21), points(21)).is_ok());
        assert!(matches!(
            HandDetection::new(Handedness::Left, points(20), points(21)),
            Err(FusionError::MalformedDetectorOutput(_))
        ));
    }

    #[test]
    fn test_deserialize_hand_validates() {
        let json = serde_json::json!({
            "label": "Right",
            "image": points(21),
            "world": points(21),
        });
        let hand: HandDetection = serde_json::from_value(json).unwrap();
        assert_eq!(hand.handedness(), Handedness::Right);

        let short = serde_json::json!({
            "label": "Right",
            "image": points(3),
            "world": points(21),
        });
        assert!(serde_json::from_value::<HandDetection>(short).is_err());

        let unknown = serde_json::json!({
            "label": "Middle",
            "image": points(21),
            "world": points(21),
        });
        assert!(serde_json::from_value::<HandDetection>(unknown).is_err());
    }

    #[test]
    fn test_frame_defaults() {
        let frame: FrameDetections = serde_json::from_str("{}").unwrap();
        assert!(frame.pose.is_none());
        assert!(frame.hands.is_empty());
    }

    #[test]
    fn test_hand_serializes_label() {
        let hand = HandDetection::new(Handedness::Left, points(21), points(21)).unwrap();
        let value = serde_json::to_value(&hand).unwrap();
        assert_eq!(value["label"], "Left");
    }
}
