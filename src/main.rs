// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use hand_arm_fusion::cli::args::{Cli, Commands};
use hand_arm_fusion::cli::fuse::run_fusion;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Fuse(args) => run_fusion(args),
    }
}
