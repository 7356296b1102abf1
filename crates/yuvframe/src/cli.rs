use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "yuvframe", about = "Decode a video into owned YUV 4:2:0 frames")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a video file and report every frame copied out of the decoder.
    Inspect {
        /// Path to the input video file (MP4, etc.).
        #[arg(short, long)]
        input: PathBuf,

        /// Inspect every Nth frame.
        #[arg(short, long, default_value_t = 1)]
        sample_rate: u32,

        /// Stop after this many inspected frames.
        #[arg(short, long)]
        max_frames: Option<u32>,

        /// Directory to save each frame's luma plane as a PNG.
        #[arg(long)]
        luma_dir: Option<PathBuf>,
    },
}
