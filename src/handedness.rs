// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Handedness resolution.
//!
//! The hand detector reports up to two hands, each tagged "Left" or "Right" under the
//! mirrored-frame convention. [`resolve_hands`] partitions them into per-side slots keyed by
//! the subject's physical side.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::FusionConfig;
use crate::detection::HandDetection;
use crate::error::{FusionError, Result};
use crate::landmark::Landmark;
use crate::side::Side;
use crate::warn;

/// Maximum number of hands the hand detector is run with.
pub const MAX_HANDS: usize = 2;

/// Handedness label reported by the hand detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    /// Labelled "Left".
    Left,
    /// Labelled "Right".
    Right,
}

impl Handedness {
    /// Label text as the detector reports it.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }

    /// Physical side this label refers to.
    ///
    /// Labels are only correct for mirrored frames; otherwise they are swapped.
    #[must_use]
    pub const fn side(&self, mirrored: bool) -> Side {
        let side = match self {
            Self::Left => Side::Left,
            Self::Right => Side::Right,
        };
        if mirrored { side } else { side.opposite() }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Handedness {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(FusionError::MalformedDetectorOutput(format!(
                "unknown handedness label '{s}'"
            ))),
        }
    }
}

/// How to resolve two hands reported with the same label in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DuplicateHandPolicy {
    /// Keep the first hand in detector order.
    KeepFirst,
    /// Keep the last hand in detector order.
    #[default]
    KeepLast,
    /// Drop all hands for the frame.
    RejectFrame,
}

impl fmt::Display for DuplicateHandPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::KeepFirst => "first",
            Self::KeepLast => "last",
            Self::RejectFrame => "reject",
        };
        write!(f, "{s}")
    }
}

impl FromStr for DuplicateHandPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" | "keep-first" => Ok(Self::KeepFirst),
            "last" | "keep-last" => Ok(Self::KeepLast),
            "reject" | "reject-frame" => Ok(Self::RejectFrame),
            _ => Err(format!(
                "invalid duplicate hand policy '{s}', expected one of: first, last, reject"
            )),
        }
    }
}

/// Hands partitioned by physical side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedHands {
    left: Option<HandDetection>,
    right: Option<HandDetection>,
}

impl ResolvedHands {
    /// The hand on `side`, if detected.
    #[must_use]
    pub const fn get(&self, side: Side) -> Option<&HandDetection> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    /// Returns `true` when no hand was resolved on either side.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// World-space landmarks of the left hand.
    #[must_use]
    pub fn left_hand_world(&self) -> Option<&[Landmark]> {
        self.left.as_ref().map(HandDetection::world)
    }

    /// World-space landmarks of the right hand.
    #[must_use]
    pub fn right_hand_world(&self) -> Option<&[Landmark]> {
        self.right.as_ref().map(HandDetection::world)
    }

    /// Image-space landmarks of the left hand.
    #[must_use]
    pub fn left_hand_image(&self) -> Option<&[Landmark]> {
        self.left.as_ref().map(HandDetection::image)
    }

    /// Image-space landmarks of the right hand.
    #[must_use]
    pub fn right_hand_image(&self) -> Option<&[Landmark]> {
        self.right.as_ref().map(HandDetection::image)
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<HandDetection> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Partition hand detector output by physical side.
///
/// # Arguments
///
/// * `hands` - Hands in the order the detector returned them.
/// * `config` - Supplies the mirroring convention and duplicate-label policy.
///
/// # Returns
///
/// * The resolved per-side hands.
///
/// # Errors
///
/// Returns [`FusionError::MalformedDetectorOutput`] if more than two hands are reported.
pub fn resolve_hands(hands: &[HandDetection], config: &FusionConfig) -> Result<ResolvedHands> {
    if hands.len() > MAX_HANDS {
        return Err(FusionError::MalformedDetectorOutput(format!(
            "expected at most {MAX_HANDS} hands, got {}",
            hands.len()
        )));
    }

    let mut resolved = ResolvedHands::default();
    for hand in hands {
        let side = hand.handedness().side(config.mirrored);
        let slot = resolved.slot_mut(side);
        if slot.is_some() {
            warn!(
                "Hand detector reported two '{}' hands, applying duplicate policy '{}'",
                hand.handedness(),
                config.duplicate_policy
            );
            match config.duplicate_policy {
                DuplicateHandPolicy::KeepFirst => continue,
                DuplicateHandPolicy::KeepLast => {}
                DuplicateHandPolicy::RejectFrame => return Ok(ResolvedHands::default()),
            }
        }
        *slot = Some(hand.clone());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(label: Handedness, x: f32) -> HandDetection {
        let points = vec![Landmark::new(x, 0.0, 0.0); 21];
        HandDetection::new(label, points.clone(), points).unwrap()
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!("Left".parse::<Handedness>().unwrap(), Handedness::Left);
        assert_eq!("right".parse::<Handedness>().unwrap(), Handedness::Right);
        assert!("Unknown".parse::<Handedness>().is_err());
    }

    #[test]
    fn test_label_side_depends_on_mirroring() {
        assert_eq!(Handedness::Right.side(true), Side::Right);
        assert_eq!(Handedness::Right.side(false), Side::Left);
    }

    #[test]
    fn test_resolve_partitions_by_label() {
        let hands = [hand(Handedness::Right, 1.0), hand(Handedness::Left, 2.0)];
        let resolved = resolve_hands(&hands, &FusionConfig::default()).unwrap();
        assert!((resolved.right_hand_world().unwrap()[0].x - 1.0).abs() < f32::EPSILON);
        assert!((resolved.left_hand_image().unwrap()[0].x - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_resolve_unmirrored_swaps() {
        let hands = [hand(Handedness::Right, 1.0)];
        let config = FusionConfig::new().with_mirrored(false);
        let resolved = resolve_hands(&hands, &config).unwrap();
        assert!(resolved.right_hand_world().is_none());
        assert!(resolved.get(Side::Left).is_some());
    }

    #[test]
    fn test_resolve_empty() {
        let resolved = resolve_hands(&[], &FusionConfig::default()).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_duplicate_keep_last() {
        let hands = [hand(Handedness::Right, 1.0), hand(Handedness::Right, 2.0)];
        let resolved = resolve_hands(&hands, &FusionConfig::default()).unwrap();
        assert!((resolved.right_hand_world().unwrap()[0].x - 2.0).abs() < f32::EPSILON);
        assert!(resolved.left_hand_world().is_none());
    }

    #[test]
    fn test_duplicate_keep_first() {
        let hands = [hand(Handedness::Right, 1.0), hand(Handedness::Right, 2.0)];
        let config = FusionConfig::new().with_duplicate_policy(DuplicateHandPolicy::KeepFirst);
        let resolved = resolve_hands(&hands, &config).unwrap();
        assert!((resolved.right_hand_world().unwrap()[0].x - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_duplicate_reject_frame() {
        let hands = [hand(Handedness::Left, 1.0), hand(Handedness::Left, 2.0)];
        let config = FusionConfig::new().with_duplicate_policy(DuplicateHandPolicy::RejectFrame);
        assert!(resolve_hands(&hands, &config).unwrap().is_empty());
    }

    #[test]
    fn test_too_many_hands() {
        let hands = [
            hand(Handedness::Left, 1.0),
            hand(Handedness::Right, 2.0),
            hand(Handedness::Right, 3.0),
        ];
        assert!(matches!(
            resolve_hands(&hands, &FusionConfig::default()),
            Err(FusionError::MalformedDetectorOutput(_))
        ));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "first".parse::<DuplicateHandPolicy>().unwrap(),
            DuplicateHandPolicy::KeepFirst
        );
        assert_eq!(
            "reject-frame".parse::<DuplicateHandPolicy>().unwrap(),
            DuplicateHandPolicy::RejectFrame
        );
        assert!("middle".parse::<DuplicateHandPolicy>().is_err());
    }
}
