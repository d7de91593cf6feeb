mod builder;
mod interface;
mod synthetic;
#[cfg(test)]
mod tests;

#[cfg(all(target_os = "linux", feature = "camera"))]
mod gst;

pub use builder::open_capture_device;
pub use interface::CaptureDevice;
pub use synthetic::SyntheticCamera;

#[cfg(all(target_os = "linux", feature = "camera"))]
pub use gst::GstCaptureDevice;
