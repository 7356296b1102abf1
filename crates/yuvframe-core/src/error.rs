use std::collections::TryReserveError;

use crate::plane::PlaneKind;

/// Convenience result type for frame construction.
pub type FrameResult<T> = Result<T, FrameError>;

/// Failures while building a [`FrameBuffer`](crate::frame::FrameBuffer).
///
/// Any of these aborts construction as a whole: the partially built frame is
/// dropped before the error reaches the caller.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    /// The owned copy of a plane could not be allocated.
    #[error("failed to allocate {len} bytes for the {plane} plane")]
    Allocation {
        plane: PlaneKind,
        len: usize,
        #[source]
        source: TryReserveError,
    },

    /// The source plane is shorter than `rows * stride`.
    #[error("{plane} plane holds {available} bytes but {needed} are required")]
    Copy {
        plane: PlaneKind,
        needed: usize,
        available: usize,
    },

    /// `rows * stride` does not fit in memory on this target.
    #[error("{plane} plane size overflows: {rows} rows of {stride} bytes")]
    SizeOverflow {
        plane: PlaneKind,
        rows: u32,
        stride: u32,
    },

    /// Negative dimensions, negative strides or a missing plane pointer.
    #[error("invalid picture geometry: {0}")]
    InvalidGeometry(String),
}

impl FrameError {
    /// Build a [`FrameError::InvalidGeometry`] value.
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }
}
