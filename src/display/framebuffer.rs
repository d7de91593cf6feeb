use super::{Canvas, DisplaySurface};
use crate::config::DisplayConfig;
use crate::error::{DisplayError, Result};
use gstreamer::prelude::*;
use gstreamer::Pipeline;
use gstreamer_app::AppSrc;
use tracing::{debug, error, info};

/// Linux framebuffer output: RGB canvases pushed through GStreamer into fbdevsink
pub struct FramebufferSurface {
    canvas: Canvas,
    device: String,
    pipeline: Pipeline,
    appsrc: AppSrc,
    closed: bool,
}

impl FramebufferSurface {
    pub fn open(config: &DisplayConfig, size: (u32, u32), fps: u32) -> Result<Self> {
        let (width, height) = size;
        info!(
            "Initializing GStreamer framebuffer surface {} ({}x{})",
            config.framebuffer_device, width, height
        );

        gstreamer::init().map_err(|e| DisplayError::Surface {
            details: format!("Failed to initialize GStreamer: {}", e),
        })?;

        let pipeline_desc = format!(
            "appsrc name=src is-live=true format=time do-timestamp=true \
             caps=video/x-raw,format=RGB,width={},height={},framerate={}/1 ! \
             queue max-size-buffers=1 leaky=downstream ! \
             videoconvert ! \
             fbdevsink device={} sync=false max-lateness=-1 async=false",
            width, height, fps, config.framebuffer_device
        );

        info!("Creating GStreamer display pipeline: {}", pipeline_desc);

        let pipeline = gstreamer::parse::launch(&pipeline_desc)
            .map_err(|e| DisplayError::Surface {
                details: format!("Failed to create display pipeline: {}", e),
            })?
            .downcast::<Pipeline>()
            .map_err(|_| DisplayError::Surface {
                details: "Failed to downcast to Pipeline".to_string(),
            })?;

        let appsrc = pipeline
            .by_name("src")
            .ok_or_else(|| DisplayError::Surface {
                details: "Failed to get appsrc element".to_string(),
            })?
            .downcast::<AppSrc>()
            .map_err(|_| DisplayError::Surface {
                details: "Failed to downcast to AppSrc".to_string(),
            })?;

        appsrc.set_property("block", false);

        if let Err(e) = pipeline.set_state(gstreamer::State::Playing) {
            let _ = pipeline.set_state(gstreamer::State::Null);
            return Err(DisplayError::Surface {
                details: format!("Failed to start display pipeline: {}", e),
            }
            .into());
        }

        info!("GStreamer display pipeline initialized successfully");

        Ok(Self {
            canvas: Canvas::new(width, height),
            device: config.framebuffer_device.clone(),
            pipeline,
            appsrc,
            closed: false,
        })
    }
}

impl DisplaySurface for FramebufferSurface {
    fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn size(&self) -> (u32, u32) {
        self.canvas.size()
    }

    fn present(&mut self) -> Result<()> {
        if self.closed {
            return Err(DisplayError::Present {
                details: format!("{} is closed", self.device),
            }
            .into());
        }

        let buffer = gstreamer::Buffer::from_mut_slice(self.canvas.as_raw().to_vec());
        self.appsrc
            .push_buffer(buffer)
            .map_err(|e| DisplayError::Present {
                details: format!("Failed to push frame to {}: {:?}", self.device, e),
            })?;

        Ok(())
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let _ = self.appsrc.end_of_stream();
        match self.pipeline.set_state(gstreamer::State::Null) {
            Ok(_) => info!("Display pipeline on {} stopped", self.device),
            Err(e) => error!("Failed to stop display pipeline: {}", e),
        }
    }

    fn name(&self) -> &str {
        "framebuffer"
    }
}

impl Drop for FramebufferSurface {
    fn drop(&mut self) {
        if !self.closed {
            debug!("Framebuffer surface dropped without close, stopping pipeline");
            self.close();
        }
    }
}
