use std::fmt;
use std::mem;

use tracing::debug;

use crate::error::{FrameError, FrameResult};
use crate::picture::PictureView;
use crate::plane::{PlaneBuffer, PlaneKind};

/// A planar YUV 4:2:0 picture whose pixel data is owned outright.
///
/// Built empty by [`FrameBuffer::new`] and filled once by
/// [`FrameBuffer::from_decoded_picture`]. The public API is read-only, so a
/// populated frame can be shared freely between readers.
#[derive(Clone, Default)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    strides: [u32; 3],
    planes: [PlaneBuffer; 3],
}

impl FrameBuffer {
    /// An empty frame: zero dimensions, zero strides, three empty planes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-copy a decoder-owned picture into a new frame.
    ///
    /// Rows copied per plane are `height` for Y and `height / 2` for U and V,
    /// each `stride` bytes long. Either all three planes are copied or the
    /// call fails and nothing is returned.
    pub fn from_decoded_picture(source: &PictureView<'_>) -> FrameResult<Self> {
        let mut frame = Self::new();
        let height = source.height();

        let mut copied: [PlaneBuffer; 3] = Default::default();
        for kind in PlaneKind::ALL {
            let plane = source.plane(kind);
            let len = kind
                .byte_len(height, plane.stride)
                .ok_or(FrameError::SizeOverflow {
                    plane: kind,
                    rows: kind.rows(height),
                    stride: plane.stride,
                })?;
            copied[kind.index()] = PlaneBuffer::copy_from(kind, plane.data, len)?;
            debug!(plane = %kind, stride = plane.stride, len, "copied plane");
        }

        frame.width = source.width();
        frame.height = height;
        frame.strides = PlaneKind::ALL.map(|kind| source.plane(kind).stride);
        frame.planes = copied;

        debug!(width = frame.width, height = frame.height, "frame populated");
        Ok(frame)
    }

    /// Luma width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Luma height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self, kind: PlaneKind) -> u32 {
        self.strides[kind.index()]
    }

    pub fn plane(&self, kind: PlaneKind) -> &PlaneBuffer {
        &self.planes[kind.index()]
    }

    pub fn y_stride(&self) -> u32 {
        self.stride(PlaneKind::Y)
    }

    /// Raw Y bytes, `height` rows.
    pub fn y_data(&self) -> &[u8] {
        self.plane(PlaneKind::Y).as_slice()
    }

    pub fn u_stride(&self) -> u32 {
        self.stride(PlaneKind::U)
    }

    /// Raw U bytes, `height / 2` rows.
    pub fn u_data(&self) -> &[u8] {
        self.plane(PlaneKind::U).as_slice()
    }

    pub fn v_stride(&self) -> u32 {
        self.stride(PlaneKind::V)
    }

    /// Raw V bytes, `height / 2` rows.
    pub fn v_data(&self) -> &[u8] {
        self.plane(PlaneKind::V).as_slice()
    }

    /// Consume the frame and hand back its planes in Y, U, V order.
    pub fn into_planes(self) -> [PlaneBuffer; 3] {
        self.planes
    }

    /// Swap every plane for an empty one and return the old buffers.
    pub(crate) fn take_planes(&mut self) -> [PlaneBuffer; 3] {
        mem::take(&mut self.planes)
    }
}

impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "YUVFrame{{{}x{} pixels}}", self.width, self.height)
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("y_stride", &self.y_stride())
            .field("y_len", &self.y_data().len())
            .field("u_stride", &self.u_stride())
            .field("u_len", &self.u_data().len())
            .field("v_stride", &self.v_stride())
            .field("v_len", &self.v_data().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use tracing_test::traced_test;

    use super::*;
    use crate::picture::SourcePlane;

    const Y: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
    const U: [u8; 2] = [9, 10];
    const V: [u8; 2] = [11, 12];

    fn small_view() -> PictureView<'static> {
        PictureView::new(
            4,
            2,
            SourcePlane::new(&Y, 4),
            SourcePlane::new(&U, 2),
            SourcePlane::new(&V, 2),
        )
    }

    #[test]
    fn new_frame_is_empty() {
        let frame = FrameBuffer::new();
        assert_eq!(frame.width(), 0);
        assert_eq!(frame.height(), 0);
        for kind in PlaneKind::ALL {
            assert_eq!(frame.stride(kind), 0);
            assert!(frame.plane(kind).is_empty());
        }
    }

    #[test]
    fn populates_small_picture_exactly() {
        let frame = FrameBuffer::from_decoded_picture(&small_view()).unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.y_stride(), 4);
        assert_eq!(frame.u_stride(), 2);
        assert_eq!(frame.v_stride(), 2);
        assert_eq!(frame.y_data(), &Y);
        assert_eq!(frame.u_data(), &U);
        assert_eq!(frame.v_data(), &V);
        assert!(frame.to_string().contains("4x2"));
    }

    #[test]
    fn display_matches_summary_format() {
        let frame = FrameBuffer::from_decoded_picture(&small_view()).unwrap();
        assert_eq!(frame.to_string(), "YUVFrame{4x2 pixels}");
        assert_eq!(FrameBuffer::new().to_string(), "YUVFrame{0x0 pixels}");
    }

    #[test]
    fn plane_lengths_follow_stride_and_rows() {
        // Padded strides, as decoders produce for alignment.
        let (width, height, y_stride, c_stride) = (6u32, 6u32, 16u32, 8u32);
        let y = vec![0x10; (height * y_stride) as usize];
        let u = vec![0x80; (height / 2 * c_stride) as usize];
        let v = vec![0x90; (height / 2 * c_stride) as usize];
        let view = PictureView::new(
            width,
            height,
            SourcePlane::new(&y, y_stride),
            SourcePlane::new(&u, c_stride),
            SourcePlane::new(&v, c_stride),
        );

        let frame = FrameBuffer::from_decoded_picture(&view).unwrap();
        assert_eq!(frame.y_data().len(), (height * y_stride) as usize);
        assert_eq!(frame.u_data().len(), (height / 2 * c_stride) as usize);
        assert_eq!(frame.v_data().len(), (height / 2 * c_stride) as usize);
    }

    #[test]
    fn odd_height_drops_last_chroma_row() {
        let y = [0u8; 12];
        let c = [1u8, 2, 3, 4];
        let view = PictureView::new(
            4,
            3,
            SourcePlane::new(&y, 4),
            SourcePlane::new(&c, 2),
            SourcePlane::new(&c, 2),
        );
        let frame = FrameBuffer::from_decoded_picture(&view).unwrap();
        assert_eq!(frame.y_data().len(), 12);
        assert_eq!(frame.u_data(), &[1, 2]);
        assert_eq!(frame.v_data(), &[1, 2]);
    }

    #[test]
    fn zero_height_yields_empty_planes() {
        let view = PictureView::new(
            640,
            0,
            SourcePlane::new(&[], 640),
            SourcePlane::new(&[], 320),
            SourcePlane::new(&[], 320),
        );
        let frame = FrameBuffer::from_decoded_picture(&view).unwrap();
        assert_eq!(frame.width(), 640);
        assert_eq!(frame.y_stride(), 640);
        for kind in PlaneKind::ALL {
            assert!(frame.plane(kind).is_empty());
        }
    }

    #[test]
    fn source_mutation_does_not_leak_into_frame() {
        let mut y = Y.to_vec();
        let mut u = U.to_vec();
        let mut v = V.to_vec();

        let frame = {
            let view = PictureView::new(
                4,
                2,
                SourcePlane::new(&y, 4),
                SourcePlane::new(&u, 2),
                SourcePlane::new(&v, 2),
            );
            FrameBuffer::from_decoded_picture(&view).unwrap()
        };

        // The decoder reuses its buffers for the next picture.
        y.fill(0);
        u.fill(0);
        v.fill(0);

        assert_eq!(frame.y_data(), &Y);
        assert_eq!(frame.u_data(), &U);
        assert_eq!(frame.v_data(), &V);
    }

    #[test]
    fn frames_from_same_source_are_independent() {
        let view = small_view();
        let first = FrameBuffer::from_decoded_picture(&view).unwrap();
        let second = FrameBuffer::from_decoded_picture(&view).unwrap();

        let [mut y, _, _] = first.into_planes().map(PlaneBuffer::into_vec);
        y.iter_mut().for_each(|b| *b = 0xFF);

        assert_eq!(second.y_data(), &Y);
    }

    #[test]
    #[traced_test]
    fn short_chroma_plane_fails_whole_frame() {
        let y = Y;
        let u = [9u8];
        let view = PictureView::new(
            4,
            2,
            SourcePlane::new(&y, 4),
            SourcePlane::new(&u, 2),
            SourcePlane::new(&V, 2),
        );

        let err = FrameBuffer::from_decoded_picture(&view).unwrap_err();
        assert!(
            matches!(
                err,
                FrameError::Copy {
                    plane: PlaneKind::U,
                    needed: 2,
                    available: 1
                }
            ),
            "got {err}"
        );
        assert!(logs_contain("source plane too short"));
    }

    #[test]
    fn debug_reports_lengths() {
        let frame = FrameBuffer::from_decoded_picture(&small_view()).unwrap();
        let dbg = format!("{frame:?}");
        assert!(dbg.contains("y_len: 8"), "{dbg}");
        assert!(dbg.contains("v_len: 2"), "{dbg}");
    }

    #[test]
    fn populated_frame_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FrameBuffer>();

        let frame = Arc::new(FrameBuffer::from_decoded_picture(&small_view()).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let frame = Arc::clone(&frame);
                thread::spawn(move || frame.y_data().iter().map(|&b| b as u32).sum::<u32>())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 36);
        }
    }
}
