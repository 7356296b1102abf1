use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::debug::LumaExporter;
use crate::plane::PlaneKind;
use crate::video::decoder::VideoDecoder;
use crate::video::frame::DecodedFrame;

/// Parameters for the inspect pipeline.
pub struct InspectConfig {
    /// Inspect every Nth decoded frame (1 = every frame).
    pub sample_rate: u32,
    /// Maximum number of frames to inspect, or None for the entire video.
    pub max_frames: Option<u32>,
    /// Directory to write luma planes as PNG, or None to skip.
    pub luma_dir: Option<PathBuf>,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            sample_rate: 1,
            max_frames: None,
            luma_dir: None,
        }
    }
}

/// What was copied out of one decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub frame_number: u32,
    pub timestamp_seconds: f64,
    pub description: String,
    pub strides: [u32; 3],
    pub plane_lens: [usize; 3],
}

pub fn summarize(frame: &DecodedFrame) -> FrameSummary {
    let picture = &frame.picture;
    FrameSummary {
        frame_number: frame.frame_number,
        timestamp_seconds: frame.timestamp_seconds,
        description: picture.to_string(),
        strides: PlaneKind::ALL.map(|kind| picture.stride(kind)),
        plane_lens: PlaneKind::ALL.map(|kind| picture.plane(kind).len()),
    }
}

/// Decode a video file and summarize the frames it yields.
pub fn run_inspect(input: &Path, config: &InspectConfig) -> Result<Vec<FrameSummary>> {
    if !input.exists() {
        bail!("input video does not exist: {}", input.display());
    }
    if config.sample_rate < 1 {
        bail!("sample_rate must be >= 1, got {}", config.sample_rate);
    }

    info!(
        ?input,
        max_frames = ?config.max_frames,
        sample_rate = config.sample_rate,
        "inspect starting"
    );

    let mut decoder = VideoDecoder::open(input).context("failed to open video")?;
    let exporter = config
        .luma_dir
        .as_deref()
        .map(LumaExporter::new)
        .transpose()?;

    let summaries = collect_summaries(&mut decoder, config, exporter.as_ref())?;
    if summaries.is_empty() {
        warn!(?input, "no frames decoded");
    }
    info!(frame_count = summaries.len(), "inspect complete");

    Ok(summaries)
}

fn collect_summaries(
    decoder: &mut VideoDecoder,
    config: &InspectConfig,
    exporter: Option<&LumaExporter>,
) -> Result<Vec<FrameSummary>> {
    let mut results = Vec::new();

    loop {
        if let Some(max) = config.max_frames {
            if results.len() >= max as usize {
                break;
            }
        }

        let Some(frame) = decoder.next_frame()? else {
            break;
        };

        if !is_sampled(frame.frame_number, config.sample_rate) {
            continue;
        }

        let summary = summarize(&frame);
        info!(
            frame_number = summary.frame_number,
            timestamp_seconds = summary.timestamp_seconds,
            frame = %summary.description,
            "inspected frame"
        );

        if let Some(exporter) = exporter {
            exporter
                .save_frame(&frame)
                .context("failed to save luma plane")?;
        }

        results.push(summary);
    }

    Ok(results)
}

fn is_sampled(frame_number: u32, sample_rate: u32) -> bool {
    frame_number % sample_rate == 0
}
