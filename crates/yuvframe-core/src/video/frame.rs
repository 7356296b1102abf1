use crate::frame::FrameBuffer;

/// A single decoded video frame with metadata.
pub struct DecodedFrame {
    /// Owned copy of the frame's planes.
    pub picture: FrameBuffer,
    /// Absolute frame number from the start of the source (0-based).
    pub frame_number: u32,
    /// Elapsed seconds from the start of the source.
    pub timestamp_seconds: f64,
}
