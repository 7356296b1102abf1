use std::fmt;

use tracing::{error, warn};

use crate::error::{FrameError, FrameResult};

/// Identifies one of the three planes of a 4:2:0 picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneKind {
    Y,
    U,
    V,
}

impl PlaneKind {
    /// All planes in storage order.
    pub const ALL: [PlaneKind; 3] = [PlaneKind::Y, PlaneKind::U, PlaneKind::V];

    pub fn index(self) -> usize {
        match self {
            PlaneKind::Y => 0,
            PlaneKind::U => 1,
            PlaneKind::V => 2,
        }
    }

    /// Rows this plane holds for a picture `height` luma rows tall.
    /// Chroma planes carry half the vertical resolution, rounded down.
    pub fn rows(self, height: u32) -> u32 {
        match self {
            PlaneKind::Y => height,
            PlaneKind::U | PlaneKind::V => height / 2,
        }
    }

    /// Byte length of this plane, or `None` if it does not fit in `usize`.
    pub fn byte_len(self, height: u32, stride: u32) -> Option<usize> {
        usize::try_from(self.rows(height))
            .ok()?
            .checked_mul(usize::try_from(stride).ok()?)
    }
}

impl fmt::Display for PlaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaneKind::Y => write!(f, "Y"),
            PlaneKind::U => write!(f, "U"),
            PlaneKind::V => write!(f, "V"),
        }
    }
}

/// Owned bytes of a single plane. Never borrows from the decoder.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PlaneBuffer {
    data: Box<[u8]>,
}

impl PlaneBuffer {
    /// An empty plane. Does not allocate.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Deep-copy the first `len` bytes of `src` into a new buffer.
    pub(crate) fn copy_from(plane: PlaneKind, src: &[u8], len: usize) -> FrameResult<Self> {
        if src.len() < len {
            warn!(%plane, needed = len, available = src.len(), "source plane too short");
            return Err(FrameError::Copy {
                plane,
                needed: len,
                available: src.len(),
            });
        }

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|source| {
            error!(%plane, len, %source, "plane allocation failed");
            FrameError::Allocation { plane, len, source }
        })?;
        data.extend_from_slice(&src[..len]);

        Ok(Self {
            data: data.into_boxed_slice(),
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Give up the buffer as a plain vector, e.g. to edit the pixels.
    pub fn into_vec(self) -> Vec<u8> {
        self.data.into_vec()
    }
}

impl AsRef<[u8]> for PlaneBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for PlaneBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaneBuffer")
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chroma_rows_are_halved() {
        assert_eq!(PlaneKind::Y.rows(1080), 1080);
        assert_eq!(PlaneKind::U.rows(1080), 540);
        assert_eq!(PlaneKind::V.rows(7), 3);
        assert_eq!(PlaneKind::U.rows(0), 0);
    }

    #[test]
    fn byte_len_uses_rows_and_stride() {
        assert_eq!(PlaneKind::Y.byte_len(2, 4), Some(8));
        assert_eq!(PlaneKind::U.byte_len(2, 2), Some(2));
        assert_eq!(PlaneKind::V.byte_len(0, 64), Some(0));
    }

    #[test]
    fn copy_takes_only_the_requested_prefix() {
        let src = [1u8, 2, 3, 4, 5];
        let plane = PlaneBuffer::copy_from(PlaneKind::Y, &src, 3).unwrap();
        assert_eq!(plane.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn copy_rejects_short_source() {
        let err = PlaneBuffer::copy_from(PlaneKind::U, &[1, 2], 4).unwrap_err();
        match err {
            FrameError::Copy {
                plane,
                needed,
                available,
            } => {
                assert_eq!(plane, PlaneKind::U);
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn debug_prints_length_not_bytes() {
        let plane = PlaneBuffer::copy_from(PlaneKind::V, &[0xAB; 16], 16).unwrap();
        assert_eq!(format!("{plane:?}"), "PlaneBuffer { len: 16 }");
    }
}
