//! Collector hooks for hosts that manage objects with a traverse / clear /
//! destroy protocol.
//!
//! A [`FrameBuffer`] owns its planes outright and cannot take part in a
//! reference cycle, so none of these hooks is needed for memory safety in
//! Rust itself. They let an embedding host treat the frame like any other
//! container it collects.

use tracing::debug;

use crate::frame::FrameBuffer;
use crate::plane::{PlaneBuffer, PlaneKind};

pub trait GcParticipant {
    /// Report every owned buffer to `visit`. Stops at, and returns, the first
    /// error the visitor produces.
    fn traverse<E, F>(&self, visit: F) -> Result<(), E>
    where
        F: FnMut(PlaneKind, &PlaneBuffer) -> Result<(), E>;

    /// Drop owned buffers while keeping the object itself alive. Calling it
    /// again is a no-op.
    fn clear(&mut self);

    /// Clear, then release the object.
    fn destroy(self)
    where
        Self: Sized;
}

impl GcParticipant for FrameBuffer {
    fn traverse<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(PlaneKind, &PlaneBuffer) -> Result<(), E>,
    {
        for kind in PlaneKind::ALL {
            visit(kind, self.plane(kind))?;
        }
        Ok(())
    }

    // Dimensions and strides are left as they were.
    fn clear(&mut self) {
        let released: usize = self.take_planes().iter().map(PlaneBuffer::len).sum();
        debug!(released, "cleared frame planes");
    }

    fn destroy(mut self) {
        self.clear();
        debug!(width = self.width(), height = self.height(), "destroying frame");
    }
}
