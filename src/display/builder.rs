use super::{DisplaySurface, HeadlessSurface};
use crate::config::{DisplayBackend, DisplayConfig};
use crate::error::Result;
use tracing::debug;

/// Surface size: the configured resolution, otherwise the size of the frames shown
pub fn surface_size(config: &DisplayConfig, frame_size: (u32, u32)) -> (u32, u32) {
    config.resolution.unwrap_or(frame_size)
}

/// Create the configured surface
pub fn open_display_surface(
    config: &DisplayConfig,
    frame_size: (u32, u32),
    fps: u32,
) -> Result<Box<dyn DisplaySurface>> {
    let size = surface_size(config, frame_size);
    debug!("Display surface {:?} at {}x{}", config.backend, size.0, size.1);

    match config.backend {
        DisplayBackend::Headless => Ok(Box::new(HeadlessSurface::new(size.0, size.1))),
        DisplayBackend::Framebuffer => open_framebuffer(config, size, fps),
    }
}

#[cfg(all(target_os = "linux", feature = "display"))]
fn open_framebuffer(
    config: &DisplayConfig,
    size: (u32, u32),
    fps: u32,
) -> Result<Box<dyn DisplaySurface>> {
    Ok(Box::new(super::FramebufferSurface::open(config, size, fps)?))
}

#[cfg(not(all(target_os = "linux", feature = "display")))]
fn open_framebuffer(
    config: &DisplayConfig,
    _size: (u32, u32),
    _fps: u32,
) -> Result<Box<dyn DisplaySurface>> {
    Err(crate::error::DisplayError::Surface {
        details: format!(
            "framebuffer {} requires Linux and the display feature",
            config.framebuffer_device
        ),
    }
    .into())
}
