// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-frame detect-then-fuse pipeline.
//!
//! The pose and hand models are external. Callers plug them in through [`PoseDetector`] and
//! [`HandDetector`]; the pipeline mirrors the frame once, runs both detectors on the same
//! buffer, and fuses their output.

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, RgbImage};

use crate::config::FusionConfig;
use crate::detection::{FrameDetections, HandDetection, PoseDetection};
use crate::error::{FusionError, Result};
use crate::fusion::SkeletonFusion;
use crate::preprocessing::prepare_frame;
use crate::results::{FusionOutput, Speed};
use crate::side::SideSelection;

/// A body-pose landmark model.
pub trait PoseDetector {
    /// Detect a single body in an RGB frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the model fails; finding no body is `Ok(None)`.
    fn detect(&mut self, frame: &RgbImage) -> Result<Option<PoseDetection>>;
}

/// A hand landmark model.
pub trait HandDetector {
    /// Detect up to two hands in an RGB frame, labelled under the mirrored convention.
    ///
    /// # Errors
    ///
    /// Returns an error if the model fails; finding no hand is an empty vector.
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<HandDetection>>;
}

/// Everything produced for one frame.
#[derive(Debug, Clone)]
pub struct FrameResult {
    /// What the detectors reported.
    pub detections: FrameDetections,
    /// Fused skeleton(s).
    pub output: FusionOutput,
    /// Per-stage timing.
    pub speed: Speed,
}

/// Runs both detectors and the fusion engine on frames, one at a time.
pub struct FusionPipeline<P, H> {
    pose: P,
    hands: H,
    fusion: SkeletonFusion,
}

impl<P: PoseDetector, H: HandDetector> FusionPipeline<P, H> {
    /// Create a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::ConfigError`] if the configuration is invalid.
    pub fn new(pose: P, hands: H, config: FusionConfig) -> Result<Self> {
        Ok(Self {
            pose,
            hands,
            fusion: SkeletonFusion::new(config)?,
        })
    }

    /// The fusion engine used by this pipeline.
    #[must_use]
    pub const fn fusion(&self) -> &SkeletonFusion {
        &self.fusion
    }

    /// Load an image from disk and process it.
    ///
    /// # Errors
    ///
    /// Returns an error if the image can't be loaded, or see [`FusionPipeline::process`].
    pub fn process_path<Q: AsRef<Path>>(
        &mut self,
        path: Q,
        selection: SideSelection,
    ) -> Result<FrameResult> {
        let path = path.as_ref();
        let frame = image::open(path).map_err(|e| {
            FusionError::ImageError(format!("Failed to load image {}: {e}", path.display()))
        })?;
        self.process(&frame, selection)
    }

    /// Process one raw frame.
    ///
    /// The frame is mirrored when the configuration says detections use the mirrored
    /// convention. Hands are detected first, then the body; the order does not affect
    /// the result.
    ///
    /// # Errors
    ///
    /// Propagates detector failures and the errors of [`SkeletonFusion::fuse_frame`].
    pub fn process(&mut self, frame: &DynamicImage, selection: SideSelection) -> Result<FrameResult> {
        let start_preprocess = Instant::now();
        let rgb = prepare_frame(frame, self.fusion.config().mirrored);
        let preprocess_time = start_preprocess.elapsed().as_secs_f64() * 1000.0;

        let start_detect = Instant::now();
        let hands = self.hands.detect(&rgb)?;
        let pose = self.pose.detect(&rgb)?;
        let detect_time = start_detect.elapsed().as_secs_f64() * 1000.0;

        let start_fuse = Instant::now();
        let detections = FrameDetections::new(pose, hands);
        let output = self.fusion.fuse_frame(&detections, selection)?;
        let fuse_time = start_fuse.elapsed().as_secs_f64() * 1000.0;

        Ok(FrameResult {
            detections,
            output,
            speed: Speed::new(preprocess_time, detect_time, fuse_time),
        })
    }
}
