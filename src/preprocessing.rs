// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Frame preprocessing before detection.
//!
//! The hand detector's handedness labels are only meaningful on a horizontally mirrored
//! (selfie) frame, so raw frames are mirrored exactly once here and the same buffer is
//! handed to both detectors.

use image::{DynamicImage, RgbImage, imageops};

/// Convert a frame to RGB8 and optionally mirror it horizontally.
///
/// # Arguments
///
/// * `frame` - Raw frame in any pixel format.
/// * `mirror` - Whether to flip left-right.
///
/// # Returns
///
/// * The RGB frame the detectors should see.
#[must_use]
pub fn prepare_frame(frame: &DynamicImage, mirror: bool) -> RgbImage {
    let mut rgb = frame.to_rgb8();
    if mirror {
        imageops::flip_horizontal_in_place(&mut rgb);
    }
    rgb
}
