mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use yuvframe_core::pipeline::{self, InspectConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Inspect {
            input,
            sample_rate,
            max_frames,
            luma_dir,
        } => {
            info!(?input, sample_rate, ?max_frames, ?luma_dir, "starting inspection");

            let config = InspectConfig {
                sample_rate,
                max_frames,
                luma_dir,
            };

            let summaries = pipeline::run_inspect(&input, &config).context("inspect failed")?;

            if summaries.is_empty() {
                warn!("video contained no frames");
            }

            let total_bytes: usize = summaries
                .iter()
                .map(|s| s.plane_lens.iter().sum::<usize>())
                .sum();
            info!(
                frame_count = summaries.len(),
                total_bytes,
                "inspection complete"
            );

            Ok(())
        }
    }
}
