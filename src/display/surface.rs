use super::Canvas;
use crate::error::Result;

/// Full-screen output the render loop draws into and presents once per frame
pub trait DisplaySurface: Send {
    fn canvas_mut(&mut self) -> &mut Canvas;

    fn size(&self) -> (u32, u32);

    /// Push the canvas to the screen
    fn present(&mut self) -> Result<()>;

    /// Tear the surface down. Presents after close fail.
    fn close(&mut self);

    fn name(&self) -> &str {
        "display"
    }
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn canvas_mut(&mut self) -> &mut Canvas {
        (**self).canvas_mut()
    }

    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn present(&mut self) -> Result<()> {
        (**self).present()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
