// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Hand + Arm Skeleton Fusion
//!
//! Fuses the output of two independent keypoint detectors, a body-pose detector and a hand
//! detector, into a single arm+hand skeleton per side of the body, expressed in the pose
//! detector's coordinate frame.
//!
//! ## Features
//!
//! - **Handedness matching** - Hands are assigned to the subject's physical side, with an
//!   explicit policy for two hands reported under the same label
//! - **Visibility gating** - A side is only fused when its shoulder and elbow are visible
//! - **Wrist re-anchoring** - The hand skeleton is translated so its wrist coincides with
//!   the pose detector's wrist
//! - **Detector agnostic** - Plug any pose and hand model in through [`PoseDetector`] and
//!   [`HandDetector`]
//! - **Recordings** - Fuse JSON-lines recordings of detector output from the CLI
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use hand_arm_fusion::{FusionConfig, SideSelection, SkeletonFusion};
//! use hand_arm_fusion::io::read_frames;
//!
//! fn main() -> hand_arm_fusion::Result<()> {
//!     let fusion = SkeletonFusion::new(FusionConfig::default())?;
//!
//!     for frame in read_frames("recording.jsonl")? {
//!         let output = fusion.fuse_frame(&frame, SideSelection::Right)?;
//!         if let Some(right) = output.right {
//!             println!("right arm: {:?}", right.world()[0]);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Fuse the right arm of every frame
//! hand-arm-fusion fuse --input recording.jsonl
//!
//! # Both arms, saved as JSON lines
//! hand-arm-fusion fuse -i recording.jsonl -o runs/fused.jsonl --side both
//! ```
//!
//! ## Skeleton Layout
//!
//! Each fused side holds 23 slots in a fixed order: shoulder, elbow, wrist, then the
//! thumb, index, middle, ring and pinky joints, each from knuckle to tip. See [`skeleton`].
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`fusion`] | Core [`SkeletonFusion`] engine |
//! | [`handedness`] | Per-side hand partitioning ([`resolve_hands`]) |
//! | [`detection`] | Detector output types ([`PoseDetection`], [`HandDetection`]) |
//! | [`results`] | Output types ([`FusedSkeleton`], [`FusionOutput`], [`Speed`]) |
//! | [`pipeline`] | Detect-then-fuse per frame ([`FusionPipeline`]) |
//! | [`config`] | [`FusionConfig`] |
//! | [`skeleton`] | Landmark index and name tables |
//! | [`io`] | Recording reader and result writer |
//! | [`error`] | Error types ([`FusionError`], [`Result`]) |

// Modules
pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod fusion;
pub mod handedness;
pub mod io;
pub mod landmark;
pub mod pipeline;
pub mod preprocessing;
pub mod results;
pub mod side;
pub mod skeleton;

// Re-export main types for convenience
pub use config::FusionConfig;
pub use detection::{FrameDetections, HandDetection, PoseDetection};
pub use error::{FusionError, Result};
pub use fusion::SkeletonFusion;
pub use handedness::{Handedness, ResolvedHands, resolve_hands};
pub use landmark::{Landmark, Offset};
pub use pipeline::{FusionPipeline, HandDetector, PoseDetector};
pub use results::{FusedSkeleton, FusionOutput, Speed};
pub use side::{Side, SideSelection};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "hand-arm-fusion");
    }
}
