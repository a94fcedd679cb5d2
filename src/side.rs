// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Body side definitions.
//!
//! [`Side`] names one physical half of the body. [`SideSelection`] is what a caller asks the
//! fusion engine for: one side or both.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One physical side of the subject's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The subject's left arm and hand.
    Left,
    /// The subject's right arm and hand.
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];

    /// Returns the lowercase name, also the pose landmark name prefix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Returns the other side.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side(s) to fuse for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideSelection {
    /// Left arm and hand only.
    Left,
    /// Right arm and hand only.
    Right,
    /// Both arms, fused independently.
    Both,
}

impl SideSelection {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Both => "both",
        }
    }

    /// Returns the sides covered by this selection, left first.
    #[must_use]
    pub const fn sides(&self) -> &'static [Side] {
        match self {
            Self::Left => &[Side::Left],
            Self::Right => &[Side::Right],
            Self::Both => &[Side::Left, Side::Right],
        }
    }

    /// Returns whether this selection covers `side`.
    #[must_use]
    pub const fn includes(&self, side: Side) -> bool {
        matches!(
            (self, side),
            (Self::Both, _) | (Self::Left, Side::Left) | (Self::Right, Side::Right)
        )
    }
}

impl From<Side> for SideSelection {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Self::Left,
            Side::Right => Self::Right,
        }
    }
}

impl fmt::Display for SideSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SideSelection {
    type Err = SideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "l" | "left_side" => Ok(Self::Left),
            "right" | "r" | "right_side" => Ok(Self::Right),
            "both" | "both_side" | "both_sides" => Ok(Self::Both),
            _ => Err(SideParseError(s.to_string())),
        }
    }
}

impl FromStr for Side {
    type Err = SideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<SideSelection>() {
            Ok(SideSelection::Left) => Ok(Self::Left),
            Ok(SideSelection::Right) => Ok(Self::Right),
            _ => Err(SideParseError(s.to_string())),
        }
    }
}

impl Default for SideSelection {
    fn default() -> Self {
        Self::Right
    }
}

/// Error returned when parsing an invalid side string.
#[derive(Debug, Clone)]
pub struct SideParseError(String);

impl fmt::Display for SideParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid side '{}', expected one of: left, right, both",
            self.0
        )
    }
}

impl std::error::Error for SideParseError {}
