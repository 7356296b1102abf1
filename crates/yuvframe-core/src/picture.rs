//! Borrowed snapshot of a picture still owned by the decoder.
//!
//! A [`PictureView`] is only valid while the decoder keeps its buffers
//! untouched, which in practice means for the duration of one call. The
//! lifetime parameter keeps it from being stored past that point.

use std::slice;

use crate::error::{FrameError, FrameResult};
use crate::plane::PlaneKind;

/// One plane of a decoded picture, borrowed from the decoder.
#[derive(Debug, Clone, Copy)]
pub struct SourcePlane<'a> {
    /// Row-major bytes, at least `rows * stride` long.
    pub data: &'a [u8],
    /// Bytes from the start of one row to the start of the next.
    pub stride: u32,
}

impl<'a> SourcePlane<'a> {
    pub fn new(data: &'a [u8], stride: u32) -> Self {
        Self { data, stride }
    }
}

/// Read-only view of a decoded YUV 4:2:0 picture.
#[derive(Debug, Clone, Copy)]
pub struct PictureView<'a> {
    width: u32,
    height: u32,
    planes: [SourcePlane<'a>; 3],
}

impl<'a> PictureView<'a> {
    pub fn new(
        width: u32,
        height: u32,
        y: SourcePlane<'a>,
        u: SourcePlane<'a>,
        v: SourcePlane<'a>,
    ) -> Self {
        Self {
            width,
            height,
            planes: [y, u, v],
        }
    }

    /// Build a view over planes exposed as raw pointers and signed line
    /// sizes, the shape native decoders hand out.
    ///
    /// Negative dimensions or strides are rejected. A null pointer is only
    /// accepted for a plane whose byte length is zero.
    ///
    /// # Safety
    ///
    /// Every non-null pointer in `data` must be valid for reads of
    /// `rows * linesize` bytes for the plane it describes, and that memory
    /// must not be written or freed during `'a`.
    pub unsafe fn from_raw_parts(
        width: i32,
        height: i32,
        data: [*const u8; 3],
        linesize: [i32; 3],
    ) -> FrameResult<Self> {
        let width = u32::try_from(width)
            .map_err(|_| FrameError::invalid_geometry(format!("negative width {width}")))?;
        let height = u32::try_from(height)
            .map_err(|_| FrameError::invalid_geometry(format!("negative height {height}")))?;

        let mut planes = [SourcePlane::new(&[], 0); 3];
        for kind in PlaneKind::ALL {
            let i = kind.index();
            let stride = u32::try_from(linesize[i]).map_err(|_| {
                FrameError::invalid_geometry(format!(
                    "negative stride {} for the {kind} plane",
                    linesize[i]
                ))
            })?;
            let len = kind
                .byte_len(height, stride)
                .ok_or(FrameError::SizeOverflow {
                    plane: kind,
                    rows: kind.rows(height),
                    stride,
                })?;

            let bytes: &'a [u8] = if len == 0 {
                &[]
            } else if data[i].is_null() {
                return Err(FrameError::invalid_geometry(format!(
                    "null {kind} plane with {len} bytes expected"
                )));
            } else {
                // SAFETY: non-null and valid for `len` reads during 'a per the
                // caller contract.
                unsafe { slice::from_raw_parts(data[i], len) }
            };
            planes[i] = SourcePlane::new(bytes, stride);
        }

        Ok(Self {
            width,
            height,
            planes,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn plane(&self, kind: PlaneKind) -> SourcePlane<'a> {
        self.planes[kind.index()]
    }
}
