use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use image::GrayImage;
use tracing::debug;

use crate::frame::FrameBuffer;
use crate::video::frame::DecodedFrame;

/// Build a grayscale image from the luma plane, dropping stride padding.
///
/// Returns `None` when the plane cannot hold `width` pixels per row, which
/// only happens for frames that were never populated or were cleared.
pub fn luma_image(frame: &FrameBuffer) -> Option<GrayImage> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let stride = frame.y_stride() as usize;
    if width == 0 || height == 0 {
        return Some(GrayImage::new(frame.width(), frame.height()));
    }
    if width > stride || frame.y_data().len() < stride * height {
        return None;
    }

    let mut pixels = Vec::with_capacity(width * height);
    for row in frame.y_data().chunks_exact(stride).take(height) {
        pixels.extend_from_slice(&row[..width]);
    }
    GrayImage::from_raw(frame.width(), frame.height(), pixels)
}

/// Writes the luma plane of decoded frames as PNG files.
pub struct LumaExporter {
    dir: PathBuf,
}

impl LumaExporter {
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn save_frame(&self, frame: &DecodedFrame) -> Result<PathBuf> {
        let picture = &frame.picture;
        if picture.width() == 0 || picture.height() == 0 {
            bail!("frame {} has no pixels to export", frame.frame_number);
        }
        let Some(img) = luma_image(picture) else {
            bail!("frame {} has an inconsistent luma plane: {picture:?}", frame.frame_number);
        };

        let path = self.dir.join(format!("frame_{:08}.png", frame.frame_number));
        img.save(&path)
            .with_context(|| format!("failed to save luma plane to {}", path.display()))?;

        debug!(?path, "saved luma plane");
        Ok(path)
    }
}
