//! Owned copies of decoded planar YUV 4:2:0 pictures.
//!
//! A decoder lends out a [`PictureView`] that is only valid for one call;
//! [`FrameBuffer::from_decoded_picture`] copies it into storage the frame
//! owns outright, so nothing points back into decoder memory afterwards.

pub mod debug;
pub mod error;
pub mod frame;
pub mod gc;
pub mod picture;
pub mod pipeline;
pub mod plane;
pub mod video;

pub use error::{FrameError, FrameResult};
pub use frame::FrameBuffer;
pub use gc::GcParticipant;
pub use picture::{PictureView, SourcePlane};
pub use plane::{PlaneBuffer, PlaneKind};
