use crate::error::Result;
use crate::frame::Frame;

/// Source of captured frames, owned by the render loop for its whole run
pub trait CaptureDevice: Send {
    /// Block until the next frame is available. An error means the device is gone.
    fn read_frame(&mut self) -> Result<Frame>;

    /// Native frame size, before any transform
    fn frame_size(&self) -> (u32, u32);

    /// Stop capturing and free the device. Further reads fail.
    fn release(&mut self);

    fn name(&self) -> &str {
        "camera"
    }
}

impl<C: CaptureDevice + ?Sized> CaptureDevice for Box<C> {
    fn read_frame(&mut self) -> Result<Frame> {
        (**self).read_frame()
    }

    fn frame_size(&self) -> (u32, u32) {
        (**self).frame_size()
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
