// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::handedness::DuplicateHandPolicy;
use crate::side::SideSelection;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Fuse Options:
    --input, -i <INPUT>           JSON-lines recording of pose and hand detector output
    --output, -o <OUTPUT>         Write fused frames as JSON lines
    --side <SIDE>                 Side to fuse (left, right, both) [default: right]
    --visibility <VISIBILITY>     Shoulder/elbow visibility threshold [default: 0.5]
    --mirrored <BOOL>             Detections come from mirrored (selfie) frames [default: true]
    --duplicate-hands <POLICY>    Two hands with one label: first, last, reject [default: last]
    --verbose <BOOL>              Show verbose output

Examples:
    hand-arm-fusion fuse --input recording.jsonl
    hand-arm-fusion fuse -i recording.jsonl -o runs/fused.jsonl --side both
    hand-arm-fusion fuse -i recording.jsonl --visibility 0.7 --duplicate-hands reject
    hand-arm-fusion fuse -i webcam.jsonl --mirrored false --verbose false"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fuse pose and hand detections from a recording into arm+hand skeletons
    Fuse(FuseArgs),
}

/// Arguments for the fuse command.
#[derive(Args, Debug)]
pub struct FuseArgs {
    /// JSON-lines recording of detector output
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file for fused frames (JSON lines)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Side to fuse (left, right, both)
    #[arg(long, default_value = "right")]
    pub side: SideSelection,

    /// Shoulder/elbow visibility threshold
    #[arg(long, default_value_t = 0.5)]
    pub visibility: f32,

    /// Detections come from horizontally mirrored (selfie) frames
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub mirrored: bool,

    /// Policy for two hands reported with the same label (first, last, reject)
    #[arg(long, default_value = "last")]
    pub duplicate_hands: DuplicateHandPolicy,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}
