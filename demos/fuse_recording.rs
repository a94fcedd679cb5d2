// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Example script demonstrating how to fuse a recording from the library.
//!
//! This example covers:
//! 1. Reading a JSON-lines recording of pose and hand detector output.
//! 2. Fusing both arms of every frame and saving the result.

use std::path::Path;

use hand_arm_fusion::io::{FrameReader, FusedFrame, ResultWriter};
use hand_arm_fusion::skeleton::{ArmJoint, INDEX_FINGER_TIP};
use hand_arm_fusion::{FusionConfig, Result, SideSelection, SkeletonFusion};

fn main() -> Result<()> {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "recording.jsonl".to_string());
    if !Path::new(&input).exists() {
        println!("Skipping: recording '{input}' not found.");
        return Ok(());
    }

    // 1. Build the fusion engine (selfie-view frames, default visibility gate)
    let fusion = SkeletonFusion::new(FusionConfig::default())?;
    let mut writer = ResultWriter::create("runs/fused.jsonl")?;

    // 2. Fuse both sides of each frame
    for item in FrameReader::open(&input)? {
        let (frame, detections) = item?;
        let output = fusion.fuse_frame(&detections, SideSelection::Both)?;

        for skeleton in [output.left.as_ref(), output.right.as_ref()]
            .into_iter()
            .flatten()
        {
            if let (Some(wrist), Some(tip)) = (
                skeleton.world_joint(ArmJoint::Wrist),
                skeleton.world_hand(INDEX_FINGER_TIP),
            ) {
                let reach = (tip - wrist).norm();
                println!("frame {frame}: {} wrist->index tip {reach:.3}m", skeleton.side());
            }
        }

        writer.write(&FusedFrame { frame, output })?;
    }

    let written = writer.written();
    writer.finish()?;
    println!("\nDone! {written} frames saved to runs/fused.jsonl");
    Ok(())
}
