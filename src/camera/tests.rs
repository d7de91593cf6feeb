use super::*;
use crate::config::{CameraSource, DogvisionConfig};
use crate::error::{CameraError, DogvisionError};
use crate::filter::hsv::rgb_to_hsv;
use crate::frame::ChannelOrder;

#[test]
fn test_synthetic_frames_are_well_formed() {
    let mut camera = SyntheticCamera::new(32, 24);
    assert_eq!(camera.frame_size(), (32, 24));

    for expected_id in 0..3 {
        let frame = camera.read_frame().unwrap();
        assert_eq!(frame.id, expected_id);
        assert_eq!((frame.width, frame.height), (32, 24));
        assert_eq!(frame.order, ChannelOrder::Bgr);
        assert!(frame.validate_size());
    }
    assert_eq!(camera.frame_count(), 3);
}

#[test]
fn test_synthetic_pattern_sweeps_hue() {
    let frame = SyntheticCamera::pattern(180, 2, 0);

    let hue_at = |x| {
        let [b, g, r] = frame.pixel(x, 0);
        rgb_to_hsv(r, g, b)[0] as i32
    };

    // Top row is fully saturated, so hue survives the round trip closely
    assert!((hue_at(0) - 0).abs() <= 1);
    assert!((hue_at(60) - 60).abs() <= 1);
    assert!((hue_at(120) - 120).abs() <= 1);

    let scrolled = SyntheticCamera::pattern(180, 2, 30);
    assert_eq!(scrolled.pixel(0, 0), frame.pixel(30, 0));
}

#[test]
fn test_synthetic_failure_after_limit() {
    let mut camera = SyntheticCamera::new(4, 4).fail_after(2);

    assert!(camera.read_frame().is_ok());
    assert!(camera.read_frame().is_ok());

    match camera.read_frame() {
        Err(DogvisionError::Camera(CameraError::Read { details })) => {
            assert!(details.contains("2 frames"));
        }
        other => panic!("expected read error, got {:?}", other.map(|f| f.id)),
    }
}

#[test]
fn test_released_camera_refuses_reads() {
    let mut camera = SyntheticCamera::new(4, 4);
    camera.release();
    assert!(camera.is_released());
    assert!(camera.read_frame().is_err());

    // Idempotent
    camera.release();
    assert!(camera.is_released());
}

#[test]
fn test_open_synthetic_from_config() {
    let mut config = DogvisionConfig::default();
    config.camera.source = CameraSource::Synthetic;
    config.camera.resolution = (16, 8);

    let mut device = open_capture_device(&config.camera).unwrap();
    assert_eq!(device.name(), "synthetic");
    assert_eq!(device.frame_size(), (16, 8));
    assert!(device.read_frame().is_ok());
    device.release();
}

#[cfg(not(all(target_os = "linux", feature = "camera")))]
#[test]
fn test_v4l2_unavailable_without_feature() {
    let config = DogvisionConfig::default();
    assert!(matches!(
        open_capture_device(&config.camera),
        Err(DogvisionError::Camera(CameraError::DeviceOpen { index: 0, .. }))
    ));
}
