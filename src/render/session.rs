use crate::camera::CaptureDevice;
use crate::display::DisplaySurface;
use tracing::{debug, info};

/// Owns the capture device and display surface for one run.
///
/// `finish` releases the camera and closes the surface exactly once; dropping an
/// unfinished session finishes it, so every exit path (including unwinding) cleans up.
pub struct Session<C: CaptureDevice, S: DisplaySurface> {
    camera: C,
    surface: S,
    finished: bool,
}

impl<C: CaptureDevice, S: DisplaySurface> Session<C, S> {
    pub fn new(camera: C, surface: S) -> Self {
        debug!(
            "Session opened: {} camera, {} surface",
            camera.name(),
            surface.name()
        );
        Self {
            camera,
            surface,
            finished: false,
        }
    }

    pub fn camera(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn surface(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface.size()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        self.camera.release();
        self.surface.close();
        info!("Capture device released and display surface closed");
    }
}

impl<C: CaptureDevice, S: DisplaySurface> Drop for Session<C, S> {
    fn drop(&mut self) {
        self.finish();
    }
}
