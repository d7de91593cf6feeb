use super::{CaptureDevice, SyntheticCamera};
use crate::config::{CameraConfig, CameraSource};
use crate::error::Result;
use tracing::info;

/// Open the configured capture device. Failure here is fatal at startup.
pub fn open_capture_device(config: &CameraConfig) -> Result<Box<dyn CaptureDevice>> {
    match config.source {
        CameraSource::Synthetic => {
            let (width, height) = config.resolution;
            Ok(Box::new(SyntheticCamera::new(width, height)))
        }
        CameraSource::V4l2 => open_v4l2(config),
    }
}

#[cfg(all(target_os = "linux", feature = "camera"))]
fn open_v4l2(config: &CameraConfig) -> Result<Box<dyn CaptureDevice>> {
    let device = super::GstCaptureDevice::open(config)?;
    info!("Camera {} opened", config.index);
    Ok(Box::new(device))
}

#[cfg(not(all(target_os = "linux", feature = "camera")))]
fn open_v4l2(config: &CameraConfig) -> Result<Box<dyn CaptureDevice>> {
    info!("V4L2 capture requested but camera support is not compiled in");
    Err(crate::error::CameraError::DeviceOpen {
        index: config.index,
        details: "camera support requires Linux and the camera feature".to_string(),
    }
    .into())
}
