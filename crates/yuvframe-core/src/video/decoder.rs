use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use anyhow::{bail, Context, Result};
use tracing::{debug, error, info, warn};

use super::frame::DecodedFrame;
use super::layout::Yuv420Layout;
use crate::frame::FrameBuffer;

/// Video metadata obtained by probing with ffprobe.
struct ProbeResult {
    width: u32,
    height: u32,
    fps: f64,
}

fn probe(path: &Path) -> Result<ProbeResult> {
    info!(?path, "probing video metadata with ffprobe");

    let output = Command::new("ffprobe")
        .args([
            "-v", "error",
            "-select_streams", "v:0",
            "-show_entries", "stream=width,height,r_frame_rate",
            "-of", "csv=p=0",
        ])
        .arg(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .context("failed to run ffprobe — is ffmpeg installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!(%stderr, ?path, "ffprobe failed");
        bail!("ffprobe failed: {stderr}");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_probe_output(&stdout)
}

/// Parse ffprobe's `width,height,num/den` line.
fn parse_probe_output(stdout: &str) -> Result<ProbeResult> {
    let parts: Vec<&str> = stdout.trim().split(',').collect();
    if parts.len() < 3 {
        error!(%stdout, "unexpected ffprobe output format, expected width,height,fps");
        bail!("unexpected ffprobe output: {stdout}");
    }

    let width: u32 = parts[0].parse().context("failed to parse width")?;
    let height: u32 = parts[1].parse().context("failed to parse height")?;

    let fps = if let Some((num, den)) = parts[2].split_once('/') {
        let num: f64 = num.parse().context("failed to parse fps numerator")?;
        let den: f64 = den.parse().context("failed to parse fps denominator")?;
        if den > 0.0 { num / den } else { 0.0 }
    } else {
        parts[2].parse().context("failed to parse fps")?
    };

    if fps <= 0.0 {
        warn!(fps, "video has non-positive fps, timestamps will be 0.0");
    }

    info!(width, height, fps, "probe completed");
    Ok(ProbeResult { width, height, fps })
}

/// Decodes video frames by piping raw `yuv420p` data from the ffmpeg CLI.
///
/// Every frame is read into the same scratch buffer, which is overwritten by
/// the next read. Frames leave the decoder as owned [`FrameBuffer`] copies.
pub struct VideoDecoder {
    child: Child,
    layout: Yuv420Layout,
    fps: f64,
    frame_count: u32,
    scratch: Vec<u8>,
}

impl VideoDecoder {
    /// Open a video file for decoding.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("video file does not exist: {}", path.display());
        }

        let info = probe(path)?;
        if info.width == 0 || info.height == 0 {
            bail!("invalid video dimensions: {}x{}", info.width, info.height);
        }

        info!(?path, "spawning ffmpeg decoder process");

        let child = Command::new("ffmpeg")
            .args(["-i"])
            .arg(path)
            .args([
                "-f", "rawvideo",
                "-pix_fmt", "yuv420p",
                "-v", "error",
                "pipe:1",
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to spawn ffmpeg — is ffmpeg installed?")?;

        let layout = Yuv420Layout::new(info.width, info.height);
        let frame_bytes = layout.frame_len();

        info!(
            width = info.width,
            height = info.height,
            fps = info.fps,
            frame_bytes,
            "video decoder opened"
        );

        Ok(Self {
            child,
            layout,
            fps: info.fps,
            frame_count: 0,
            scratch: vec![0u8; frame_bytes],
        })
    }

    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Read the next frame from the ffmpeg pipe, or `None` if the video is finished.
    pub fn next_frame(&mut self) -> Result<Option<DecodedFrame>> {
        let stdout = self
            .child
            .stdout
            .as_mut()
            .context("ffmpeg stdout not available")?;

        let frame_bytes = self.scratch.len();
        let mut read = 0;

        while read < frame_bytes {
            match stdout.read(&mut self.scratch[read..]) {
                Ok(0) => {
                    if read == 0 {
                        info!(total_frames = self.frame_count, "video stream ended");
                        return Ok(None);
                    }
                    error!(
                        read_bytes = read,
                        expected_bytes = frame_bytes,
                        frame = self.frame_count,
                        "ffmpeg stream ended mid-frame"
                    );
                    bail!("ffmpeg stream ended mid-frame (read {read}/{frame_bytes} bytes)");
                }
                Ok(n) => read += n,
                Err(e) => {
                    error!(frame = self.frame_count, %e, "failed to read from ffmpeg pipe");
                    return Err(e).context("failed to read from ffmpeg pipe");
                }
            }
        }

        let picture = FrameBuffer::from_decoded_picture(&self.layout.view(&self.scratch))
            .with_context(|| format!("failed to copy frame {}", self.frame_count))?;

        let frame_number = self.frame_count;
        let timestamp_seconds = if self.fps > 0.0 {
            frame_number as f64 / self.fps
        } else {
            0.0
        };
        self.frame_count += 1;

        debug!(frame_number, timestamp_seconds, %picture, "decoded frame");

        Ok(Some(DecodedFrame {
            picture,
            frame_number,
            timestamp_seconds,
        }))
    }
}

impl Drop for VideoDecoder {
    fn drop(&mut self) {
        info!(total_frames = self.frame_count, "closing video decoder");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
