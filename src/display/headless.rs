use super::{Canvas, DisplaySurface};
use crate::error::{DisplayError, Result};
use image::RgbImage;
use tracing::{debug, info};

/// In-memory surface: presents are counted and the last one is kept
#[derive(Debug)]
pub struct HeadlessSurface {
    canvas: Canvas,
    presented: u64,
    last_presented: Option<RgbImage>,
    closed: bool,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        info!("Headless display surface {}x{}", width, height);
        Self {
            canvas: Canvas::new(width, height),
            presented: 0,
            last_presented: None,
            closed: false,
        }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn last_presented(&self) -> Option<&RgbImage> {
        self.last_presented.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl DisplaySurface for HeadlessSurface {
    fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn size(&self) -> (u32, u32) {
        self.canvas.size()
    }

    fn present(&mut self) -> Result<()> {
        if self.closed {
            return Err(DisplayError::Present {
                details: "surface is closed".to_string(),
            }
            .into());
        }

        self.presented += 1;
        self.last_presented = Some(self.canvas.image().clone());
        Ok(())
    }

    fn close(&mut self) {
        if !self.closed {
            debug!("Headless surface closed after {} presents", self.presented);
            self.closed = true;
        }
    }

    fn name(&self) -> &str {
        "headless"
    }
}
