use super::CaptureDevice;
use crate::error::{CameraError, Result};
use crate::filter::hsv::{hsv_to_rgb, HUE_RANGE};
use crate::frame::{ChannelOrder, Frame};
use tracing::{debug, info, trace};

/// Hardware-free capture device producing a moving hue sweep in BGR
#[derive(Debug)]
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    frame_counter: u64,
    fail_after: Option<u64>,
    released: bool,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        info!("Synthetic camera: {}x{} test pattern", width, height);
        Self {
            width,
            height,
            frame_counter: 0,
            fail_after: None,
            released: false,
        }
    }

    /// Fail every read after `frames` successful ones, like a camera being unplugged
    pub fn fail_after(mut self, frames: u64) -> Self {
        self.fail_after = Some(frames);
        self
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_counter
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Pattern for frame `id`: hue varies across the width and scrolls with `id`,
    /// saturation falls off down the height, value is constant
    pub fn pattern(width: u32, height: u32, id: u64) -> Frame {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        let shift = (id % HUE_RANGE as u64) as u32;

        for y in 0..height {
            let saturation = 255 - (y * 255 / height.max(1)) as u8;
            for x in 0..width {
                let hue = ((x * HUE_RANGE as u32 / width.max(1) + shift) % HUE_RANGE as u32) as u8;
                let (r, g, b) = hsv_to_rgb(hue, saturation, 230);
                data.extend_from_slice(&[b, g, r]);
            }
        }

        Frame::new(id, width, height, ChannelOrder::Bgr, data)
    }
}

impl CaptureDevice for SyntheticCamera {
    fn read_frame(&mut self) -> Result<Frame> {
        if self.released {
            return Err(CameraError::Read {
                details: "synthetic camera already released".to_string(),
            }
            .into());
        }

        if let Some(limit) = self.fail_after {
            if self.frame_counter >= limit {
                return Err(CameraError::Read {
                    details: format!("synthetic camera stopped after {} frames", limit),
                }
                .into());
            }
        }

        let frame = Self::pattern(self.width, self.height, self.frame_counter);
        trace!("Generated synthetic frame {}", frame.id);
        self.frame_counter += 1;

        Ok(frame)
    }

    fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn release(&mut self) {
        if !self.released {
            debug!("Synthetic camera released after {} frames", self.frame_counter);
            self.released = true;
        }
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
