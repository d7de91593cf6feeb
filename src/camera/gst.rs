use super::CaptureDevice;
use crate::config::CameraConfig;
use crate::error::{CameraError, Result};
use crate::frame::{ChannelOrder, Frame};
use gstreamer::prelude::*;
use gstreamer::{ClockTime, MessageView, Pipeline};
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use tracing::{debug, error, info, trace, warn};

/// V4L2 camera read through a GStreamer pipeline that hands out packed BGR frames
pub struct GstCaptureDevice {
    index: u32,
    resolution: (u32, u32),
    read_timeout: ClockTime,
    pipeline: Pipeline,
    appsink: AppSink,
    frame_counter: u64,
    released: bool,
}

impl GstCaptureDevice {
    /// Build and start the capture pipeline for `/dev/video{index}`
    pub fn open(config: &CameraConfig) -> Result<Self> {
        info!(
            "Initializing GStreamer camera interface for device {} ({}x{} @ {}fps)",
            config.index, config.resolution.0, config.resolution.1, config.fps
        );

        gstreamer::init().map_err(|e| CameraError::DeviceOpen {
            index: config.index,
            details: format!("Failed to initialize GStreamer: {}", e),
        })?;

        let pipeline_desc = Self::pipeline_description(config);
        info!("Creating GStreamer pipeline: {}", pipeline_desc);

        let pipeline = gstreamer::parse::launch(&pipeline_desc)
            .map_err(|e| CameraError::Pipeline {
                details: format!("Failed to create pipeline: {}", e),
            })?
            .downcast::<Pipeline>()
            .map_err(|_| CameraError::Pipeline {
                details: "Failed to downcast to Pipeline".to_string(),
            })?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| CameraError::Pipeline {
                details: "Failed to get appsink element".to_string(),
            })?
            .downcast::<AppSink>()
            .map_err(|_| CameraError::Pipeline {
                details: "Failed to downcast to AppSink".to_string(),
            })?;

        if let Err(e) = pipeline.set_state(gstreamer::State::Playing) {
            let _ = pipeline.set_state(gstreamer::State::Null);
            return Err(CameraError::DeviceOpen {
                index: config.index,
                details: format!("Failed to start pipeline: {}", e),
            }
            .into());
        }

        if let Some(details) = Self::pending_error(&pipeline) {
            let _ = pipeline.set_state(gstreamer::State::Null);
            return Err(CameraError::DeviceOpen {
                index: config.index,
                details,
            }
            .into());
        }

        info!("GStreamer camera pipeline started");

        Ok(Self {
            index: config.index,
            resolution: config.resolution,
            read_timeout: ClockTime::from_mseconds(config.read_timeout_ms),
            pipeline,
            appsink,
            frame_counter: 0,
            released: false,
        })
    }

    fn pipeline_description(config: &CameraConfig) -> String {
        let (width, height) = config.resolution;
        format!(
            "v4l2src device=/dev/video{} ! \
             videoconvert ! \
             videoscale ! \
             video/x-raw,format=BGR,width={},height={},framerate={}/1 ! \
             appsink name=sink sync=false max-buffers=1 drop=true \
             enable-last-sample=false emit-signals=false",
            config.index, width, height, config.fps
        )
    }

    /// First error message waiting on the pipeline bus, if any
    fn pending_error(pipeline: &Pipeline) -> Option<String> {
        let bus = pipeline.bus()?;
        let message = bus.pop_filtered(&[gstreamer::MessageType::Error])?;
        match message.view() {
            MessageView::Error(err) => Some(format!(
                "{} ({})",
                err.error(),
                err.debug().map(|d| d.to_string()).unwrap_or_default()
            )),
            _ => None,
        }
    }

    fn sample_to_frame(&mut self, sample: gstreamer::Sample) -> Result<Frame> {
        let buffer = sample.buffer().ok_or_else(|| CameraError::Read {
            details: "No buffer in sample".to_string(),
        })?;

        let caps = sample.caps().ok_or_else(|| CameraError::Read {
            details: "No caps in sample".to_string(),
        })?;

        let video_info = VideoInfo::from_caps(caps).map_err(|e| CameraError::Read {
            details: format!("Failed to get video info: {}", e),
        })?;

        let width = video_info.width();
        let height = video_info.height();
        let stride = video_info.stride()[0] as usize;
        let row_bytes = width as usize * 3;

        let map = buffer.map_readable().map_err(|e| CameraError::Read {
            details: format!("Failed to map buffer: {}", e),
        })?;
        let src = map.as_slice();

        if height == 0
            || stride < row_bytes
            || src.len() < stride * (height as usize - 1) + row_bytes
        {
            return Err(CameraError::Read {
                details: format!(
                    "Buffer too small for {}x{} BGR (stride {}, {} bytes)",
                    width,
                    height,
                    stride,
                    src.len()
                ),
            }
            .into());
        }

        // Rows may be padded; keep only the pixels
        let mut data = Vec::with_capacity(row_bytes * height as usize);
        for row in 0..height as usize {
            let start = row * stride;
            data.extend_from_slice(&src[start..start + row_bytes]);
        }

        let frame = Frame::new(self.frame_counter, width, height, ChannelOrder::Bgr, data);
        self.frame_counter += 1;

        trace!("Captured BGR frame {} ({}x{})", frame.id, width, height);
        Ok(frame)
    }
}

impl CaptureDevice for GstCaptureDevice {
    fn read_frame(&mut self) -> Result<Frame> {
        if self.released {
            return Err(CameraError::Read {
                details: format!("camera {} already released", self.index),
            }
            .into());
        }

        match self.appsink.try_pull_sample(self.read_timeout) {
            Some(sample) => self.sample_to_frame(sample),
            None => {
                let details = if self.appsink.is_eos() {
                    "end of stream".to_string()
                } else if let Some(err) = Self::pending_error(&self.pipeline) {
                    err
                } else {
                    format!("no frame within {} ms", self.read_timeout.mseconds())
                };
                warn!("Camera {} read failed: {}", self.index, details);
                Err(CameraError::Read { details }.into())
            }
        }
    }

    fn frame_size(&self) -> (u32, u32) {
        self.resolution
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        match self.pipeline.set_state(gstreamer::State::Null) {
            Ok(_) => info!(
                "Camera {} released after {} frames",
                self.index, self.frame_counter
            ),
            Err(e) => error!("Failed to stop camera pipeline: {}", e),
        }
    }

    fn name(&self) -> &str {
        "v4l2"
    }
}

impl Drop for GstCaptureDevice {
    fn drop(&mut self) {
        if !self.released {
            debug!("Camera dropped without release, stopping pipeline");
            self.release();
        }
    }
}
