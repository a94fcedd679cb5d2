// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;
use std::time::Instant;

use crate::cli::args::FuseArgs;
use crate::cli::logging::set_verbose;
use crate::io::{FrameReader, FusedFrame, ResultWriter};
use crate::{FusionConfig, SkeletonFusion, VERSION};
use crate::{error, section, success, verbose, warn};

/// Per-run counters printed in the summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FuseSummary {
    /// Frames read from the recording.
    pub frames: usize,
    /// Frames with at least one fused side.
    pub fused: usize,
    /// Frames with no fused side.
    pub skipped: usize,
}

/// Fuse every frame of a recording.
///
/// Frames that cannot be fused (no body, no hand, low visibility) are counted and written
/// with empty sides. Hard faults abort the run.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the recording cannot be read or
/// parsed, a frame holds malformed detector output, or the output cannot be written.
pub fn fuse_recording(args: &FuseArgs) -> crate::Result<FuseSummary> {
    let config = FusionConfig::new()
        .with_visibility_threshold(args.visibility)
        .with_mirrored(args.mirrored)
        .with_duplicate_policy(args.duplicate_hands);
    let fusion = SkeletonFusion::new(config)?;

    let mut writer = args.output.as_ref().map(ResultWriter::create).transpose()?;
    let mut summary = FuseSummary::default();

    for item in FrameReader::open(&args.input)? {
        let (frame_idx, detections) = item?;
        let output = fusion.fuse_frame(&detections, args.side)?;

        summary.frames += 1;
        if output.is_empty() {
            summary.skipped += 1;
            verbose!("frame {frame_idx}: no {} arm+hand", args.side);
        } else {
            summary.fused += 1;
            verbose!(
                "frame {frame_idx}: fused {}",
                [output.left.as_ref(), output.right.as_ref()]
                    .into_iter()
                    .flatten()
                    .map(|s| s.side().as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        if let Some(w) = writer.as_mut() {
            w.write(&FusedFrame {
                frame: frame_idx,
                output,
            })?;
        }
    }

    if let Some(w) = writer {
        w.finish()?;
    }
    Ok(summary)
}

/// Run the `fuse` command.
pub fn run_fusion(args: &FuseArgs) {
    set_verbose(args.verbose);
    section!("hand-arm-fusion {VERSION}");
    verbose!(
        "input={} side={} visibility={} mirrored={} duplicate-hands={}",
        args.input.display(),
        args.side,
        args.visibility,
        args.mirrored,
        args.duplicate_hands
    );
    if args.output.is_none() {
        warn!("'output' argument is missing. Fused frames will not be saved.");
    }

    let start = Instant::now();
    let summary = match fuse_recording(args) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;

    let frames_word = if summary.frames == 1 { "frame" } else { "frames" };
    success!(
        "{} {frames_word} processed in {elapsed:.1}ms: {} fused, {} without a usable {} side",
        summary.frames,
        summary.fused,
        summary.skipped,
        args.side
    );
    if let Some(out) = &args.output {
        verbose!("Results saved to {}", out.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side::SideSelection;
    use crate::handedness::DuplicateHandPolicy;
    use std::path::PathBuf;

    fn args(input: PathBuf, output: Option<PathBuf>) -> FuseArgs {
        FuseArgs {
            input,
            output,
            side: SideSelection::Right,
            visibility: 0.5,
            mirrored: true,
            duplicate_hands: DuplicateHandPolicy::KeepLast,
            verbose: false,
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hand_arm_fusion_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_fuse_recording_counts_frames() {
        let input = temp_path("counts.jsonl");
        std::fs::write(&input, "{}\n{\"hands\": []}\n").unwrap();
        let output = temp_path("counts_out.jsonl");

        let summary = fuse_recording(&args(input.clone(), Some(output.clone()))).unwrap();
        assert_eq!(
            summary,
            FuseSummary {
                frames: 2,
                fused: 0,
                skipped: 2
            }
        );
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 2);

        std::fs::remove_file(input).ok();
        std::fs::remove_file(output).ok();
    }

    #[test]
    fn test_fuse_recording_invalid_threshold() {
        let mut bad = args(temp_path("unused.jsonl"), None);
        bad.visibility = 3.0;
        assert!(matches!(
            fuse_recording(&bad),
            Err(crate::FusionError::ConfigError(_))
        ));
    }
}
