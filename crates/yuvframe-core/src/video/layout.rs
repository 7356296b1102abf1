use crate::picture::{PictureView, SourcePlane};

/// Plane layout of a packed `yuv420p` frame as ffmpeg writes it to a pipe:
/// Y rows of `width` bytes, then U and V rows of `ceil(width / 2)` bytes,
/// with `ceil(height / 2)` chroma rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Yuv420Layout {
    pub width: u32,
    pub height: u32,
    pub chroma_stride: u32,
    pub chroma_rows: u32,
}

impl Yuv420Layout {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            chroma_stride: width.div_ceil(2),
            chroma_rows: height.div_ceil(2),
        }
    }

    pub fn luma_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn chroma_len(&self) -> usize {
        self.chroma_stride as usize * self.chroma_rows as usize
    }

    /// Total bytes of one frame on the pipe.
    pub fn frame_len(&self) -> usize {
        self.luma_len() + 2 * self.chroma_len()
    }

    /// Borrow the three planes of a packed frame.
    pub fn view<'a>(&self, buf: &'a [u8]) -> PictureView<'a> {
        assert!(
            buf.len() >= self.frame_len(),
            "buffer holds {} bytes, frame needs {}",
            buf.len(),
            self.frame_len()
        );
        let (y, rest) = buf.split_at(self.luma_len());
        let (u, rest) = rest.split_at(self.chroma_len());
        let v = &rest[..self.chroma_len()];

        PictureView::new(
            self.width,
            self.height,
            SourcePlane::new(y, self.width),
            SourcePlane::new(u, self.chroma_stride),
            SourcePlane::new(v, self.chroma_stride),
        )
    }
}
