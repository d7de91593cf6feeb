use super::hsv::rgb_to_hsv;
use super::*;
use crate::config::FilterConfig;
use crate::frame::{ChannelOrder, Frame};

fn saturation_of(frame: &Frame, x: u32, y: u32) -> u8 {
    let [b, g, r] = frame.pixel(x, y);
    rgb_to_hsv(r, g, b)[1]
}

#[test]
fn test_band_classification_boundaries() {
    let params = FilterParameters::default();

    assert_eq!(params.classify(0), BandKind::RedGreen);
    assert_eq!(params.classify(19), BandKind::RedGreen);
    assert_eq!(params.classify(20), BandKind::Yellow);
    assert_eq!(params.classify(40), BandKind::Yellow);
    assert_eq!(params.classify(41), BandKind::RedGreen);
    assert_eq!(params.classify(99), BandKind::RedGreen);
    assert_eq!(params.classify(100), BandKind::Blue);
    assert_eq!(params.classify(140), BandKind::Blue);
    assert_eq!(params.classify(141), BandKind::Other);
    assert_eq!(params.classify(179), BandKind::Other);

    // Wraps modulo the hue range
    assert_eq!(params.classify(200), BandKind::Yellow);
    assert_eq!(params.classify(250), BandKind::RedGreen);
}

#[test]
fn test_blue_and_yellow_boost_is_capped() {
    let filter = ColorFilter::default();

    for hue in (100..=140).chain(20..=40) {
        for s in 0..=255u8 {
            let expected = (s as f32 * 1.5).min(255.0) as u8;
            assert_eq!(filter.adjust_hsv([hue, s, 200]), [hue, expected, 200]);
        }
    }
}

#[test]
fn test_red_green_is_nearly_desaturated() {
    let filter = ColorFilter::default();

    for hue in (0..20).chain(41..100) {
        for s in 0..=255u8 {
            let [h, out, v] = filter.adjust_hsv([hue, s, 77]);
            assert_eq!((h, v), (hue, 77));
            assert_eq!(out, (s as f32 * 0.1) as u8);
        }
    }

    assert_eq!(filter.adjust_hsv([60, 200, 10]), [60, 20, 10]);
}

#[test]
fn test_other_band_is_optional() {
    let four = ColorFilter::new(FilterParameters::from_preset(BandPreset::FourBand));
    let three = ColorFilter::new(FilterParameters::from_preset(BandPreset::ThreeBand));

    assert_eq!(four.adjust_hsv([160, 200, 50]), [160, 100, 50]);
    assert_eq!(three.adjust_hsv([160, 200, 50]), [160, 200, 50]);
}

#[test]
fn test_two_band_preset_halves_everything_else() {
    let filter = ColorFilter::new(FilterParameters::from_preset(BandPreset::TwoBand));

    assert_eq!(filter.adjust_hsv([60, 200, 50]), [60, 100, 50]);
    assert_eq!(filter.adjust_hsv([170, 200, 50]), [170, 100, 50]);
    assert_eq!(filter.adjust_hsv([120, 100, 50]), [120, 150, 50]);
}

#[test]
fn test_known_pixels_end_to_end() {
    // BGR: pure-blue band at saturation 200, green at saturation 200
    let mut frame = Frame::filled(2, 2, ChannelOrder::Bgr, [0, 0, 0]);
    frame.set_pixel(0, 0, [255, 55, 55]);
    frame.set_pixel(1, 0, [55, 255, 55]);
    frame.set_pixel(0, 1, [128, 128, 128]);

    assert_eq!(saturation_of(&frame, 0, 0), 200);
    assert_eq!(saturation_of(&frame, 1, 0), 200);

    let filtered = ColorFilter::default().apply(&frame);

    assert_eq!(saturation_of(&filtered, 0, 0), 255);
    assert_eq!(filtered.pixel(0, 0), [255, 0, 0]);

    assert_eq!(saturation_of(&filtered, 1, 0), 20);
    assert_eq!(filtered.pixel(1, 0), [235, 255, 235]);

    assert_eq!(filtered.pixel(0, 1), [128, 128, 128]);
    assert_eq!(filtered.pixel(1, 1), [0, 0, 0]);
}

#[test]
fn test_same_result_in_either_channel_order() {
    let mut bgr = Frame::filled(2, 1, ChannelOrder::Bgr, [0, 0, 0]);
    bgr.set_pixel(0, 0, [255, 55, 55]);
    bgr.set_pixel(1, 0, [20, 200, 90]);

    let filter = ColorFilter::default();
    let via_bgr = filter.apply(&bgr).to_order(ChannelOrder::Rgb);
    let via_rgb = filter.apply(&bgr.to_order(ChannelOrder::Rgb));

    assert_eq!(via_bgr, via_rgb);
}

#[test]
fn test_gray_frame_is_unchanged() {
    let filter = ColorFilter::default();

    for level in [0u8, 33, 128, 255] {
        let frame = Frame::filled(4, 3, ChannelOrder::Bgr, [level; 3]);
        assert_eq!(filter.apply(&frame), frame);
    }
}

#[test]
fn test_apply_preserves_dimensions_and_order() {
    let frame = Frame::filled(7, 5, ChannelOrder::Rgb, [10, 200, 30]);
    let filtered = ColorFilter::default().apply(&frame);

    assert_eq!((filtered.width, filtered.height), (7, 5));
    assert_eq!(filtered.order, ChannelOrder::Rgb);
    assert!(filtered.validate_size());
}

#[test]
fn test_blur_sigma_derived_from_kernel() {
    let blur = PreBlur::new(11);
    assert_eq!(blur.kernel_size(), 11);
    assert!((blur.sigma() - 2.0).abs() < 1e-6);

    let weights = blur.weights();
    assert_eq!(weights.len(), 11);
    let sum: f32 = weights.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5);
    assert!((weights[0] - weights[10]).abs() < 1e-7);
    assert!(weights[5] > weights[4]);
}

#[test]
fn test_blur_keeps_flat_frames_flat() {
    let frame = Frame::filled(16, 12, ChannelOrder::Bgr, [100, 150, 200]);
    let blurred = PreBlur::new(11).apply(&frame);

    assert_eq!((blurred.width, blurred.height), (16, 12));
    assert_eq!(blurred.data, frame.data);
}

#[test]
fn test_gray_frames_unchanged_with_blur_enabled() {
    let filter = ColorFilter::default().with_blur(PreBlur::new(11));

    for level in 0..=255u8 {
        let frame = Frame::filled(16, 12, ChannelOrder::Bgr, [level; 3]);
        let filtered = filter.apply(&frame);
        assert_eq!(filtered.data, frame.data, "gray level {} changed", level);
    }
}

#[test]
fn test_blur_is_a_toggleable_pre_step() {
    let mut frame = Frame::filled(21, 21, ChannelOrder::Bgr, [0, 0, 0]);
    frame.set_pixel(10, 10, [255, 255, 255]);

    let mut filter = ColorFilter::default().with_blur(PreBlur::new(11));
    assert!(filter.blur_enabled());

    let blurred = filter.apply(&frame);
    assert!(blurred.pixel(10, 10)[0] < 255);
    assert!(blurred.pixel(11, 10)[0] > 0);

    filter.set_blur_enabled(false);
    let sharp = filter.apply(&frame);
    assert_eq!(sharp.pixel(10, 10), [255, 255, 255]);
    assert_eq!(sharp.pixel(11, 10), [0, 0, 0]);
}

#[test]
fn test_from_config() {
    let config = FilterConfig {
        bands: BandPreset::ThreeBand,
        blur: true,
        blur_kernel: 7,
    };

    let filter = ColorFilter::from_config(&config);
    assert!(filter.blur_enabled());
    assert_eq!(filter.parameters().other, None);
    assert!((filter.parameters().red_green - 0.1).abs() < f32::EPSILON);
}
