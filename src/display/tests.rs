use super::*;
use crate::compositor::{Region, SplitAxis, SplitBoundary};
use crate::config::{DisplayConfig, DividerStyle, DogvisionConfig, OverlayConfig};
use crate::error::{DisplayError, DogvisionError};
use crate::frame::{ChannelOrder, Frame};
use crate::mode::{Mode, ModeSet};
use image::Rgb;
use std::time::Duration;

fn test_overlay_config() -> OverlayConfig {
    DogvisionConfig::default().overlay
}

#[test]
fn test_blit_converts_bgr_to_rgb() {
    let mut canvas = Canvas::new(4, 4);
    let frame = Frame::filled(2, 2, ChannelOrder::Bgr, [255, 0, 10]);

    canvas.blit(&frame, (1, 1));

    assert_eq!(canvas.pixel(1, 1), [10, 0, 255]);
    assert_eq!(canvas.pixel(2, 2), [10, 0, 255]);
    assert_eq!(canvas.pixel(0, 0), [0, 0, 0]);
    assert_eq!(canvas.pixel(3, 3), [0, 0, 0]);
}

#[test]
fn test_blit_clips_to_canvas() {
    let mut canvas = Canvas::new(3, 3);
    let frame = Frame::filled(4, 4, ChannelOrder::Rgb, [1, 2, 3]);

    canvas.blit(&frame, (-2, 1));

    assert_eq!(canvas.pixel(0, 1), [1, 2, 3]);
    assert_eq!(canvas.pixel(1, 2), [1, 2, 3]);
    assert_eq!(canvas.pixel(2, 2), [0, 0, 0]);
    assert_eq!(canvas.pixel(0, 0), [0, 0, 0]);
}

#[test]
fn test_thick_lines_are_centred() {
    let mut canvas = Canvas::new(10, 10);
    canvas.draw_line(WHITE, (0, 4), (9, 4), 3);

    for y in 0..10 {
        let expected = if (3..=5).contains(&y) { [255, 255, 255] } else { [0, 0, 0] };
        assert_eq!(canvas.pixel(7, y), expected, "row {}", y);
    }

    let mut canvas = Canvas::new(10, 10);
    canvas.draw_line(Rgb([9, 9, 9]), (2, 0), (2, 9), 1);
    assert_eq!(canvas.pixel(2, 5), [9, 9, 9]);
    assert_eq!(canvas.pixel(1, 5), [0, 0, 0]);
    assert_eq!(canvas.pixel(3, 5), [0, 0, 0]);
}

#[test]
fn test_clear() {
    let mut canvas = Canvas::new(2, 2);
    canvas.clear(Rgb([5, 6, 7]));
    assert!(canvas.as_raw().chunks_exact(3).all(|px| px == [5, 6, 7]));
}

#[test]
fn test_scale_rgb24_nearest_neighbour() {
    // 2x1: red, blue
    let data = [255, 0, 0, 0, 0, 255];
    let scaled = DisplayConverter::scale_rgb24(&data, 2, 1, 4, 2).unwrap();

    assert_eq!(scaled.len(), 4 * 2 * 3);
    assert_eq!(&scaled[0..3], &[255, 0, 0]);
    assert_eq!(&scaled[3..6], &[255, 0, 0]);
    assert_eq!(&scaled[6..9], &[0, 0, 255]);
    assert_eq!(&scaled[12..15], &[255, 0, 0]);

    let down = DisplayConverter::scale_rgb24(&scaled, 4, 2, 2, 1).unwrap();
    assert_eq!(down, data.to_vec());
}

#[test]
fn test_scale_rejects_bad_input() {
    assert!(matches!(
        DisplayConverter::scale_rgb24(&[0; 5], 2, 1, 4, 4),
        Err(DogvisionError::Display(DisplayError::FormatConversion { .. }))
    ));
    assert!(DisplayConverter::scale_rgb24(&[], 0, 0, 4, 4).is_err());
}

#[test]
fn test_fit_frame_keeps_metadata() {
    let mut frame = Frame::filled(3, 2, ChannelOrder::Bgr, [1, 2, 3]);
    frame.id = 11;

    let fitted = DisplayConverter::fit_frame(&frame, (6, 4)).unwrap();
    assert_eq!((fitted.width, fitted.height), (6, 4));
    assert_eq!(fitted.id, 11);
    assert_eq!(fitted.order, ChannelOrder::Bgr);
    assert!(fitted.validate_size());

    assert_eq!(DisplayConverter::fit_frame(&frame, (3, 2)).unwrap(), frame);
}

#[test]
fn test_display_order_conversion() {
    let frame = Frame::filled(1, 1, ChannelOrder::Bgr, [1, 2, 3]);
    let rgb = DisplayConverter::to_display_order(&frame, ChannelOrder::Rgb).unwrap();
    assert_eq!(rgb.pixel(0, 0), [3, 2, 1]);

    let broken = Frame::new(0, 2, 2, ChannelOrder::Bgr, vec![0; 3]);
    assert!(DisplayConverter::to_display_order(&broken, ChannelOrder::Rgb).is_err());
}

#[test]
fn test_scale_coordinate() {
    assert_eq!(DisplayConverter::scale_coordinate(240, 480, 800), 400);
    assert_eq!(DisplayConverter::scale_coordinate(5, 0, 800), 0);
}

#[test]
fn test_headless_surface_lifecycle() {
    let mut surface = HeadlessSurface::new(4, 3);
    assert_eq!(surface.size(), (4, 3));

    surface.canvas_mut().clear(WHITE);
    surface.present().unwrap();
    assert_eq!(surface.presented(), 1);
    assert_eq!(surface.last_presented().unwrap().get_pixel(0, 0).0, [255, 255, 255]);

    surface.close();
    assert!(surface.is_closed());
    assert!(surface.present().is_err());
    assert_eq!(surface.presented(), 1);
}

#[test]
fn test_open_headless_surface() {
    let mut config = DisplayConfig {
        backend: crate::config::DisplayBackend::Headless,
        ..DogvisionConfig::default().display
    };

    let surface = open_display_surface(&config, (480, 640), 30).unwrap();
    assert_eq!(surface.size(), (480, 640));
    assert_eq!(surface.name(), "headless");

    config.resolution = Some((800, 480));
    assert_eq!(surface_size(&config, (480, 640)), (800, 480));
}

#[test]
fn test_status_text_styles() {
    let three = StatusStyle::for_modes(ModeSet::Three);
    assert_eq!(three.text(Mode::Split), "Mode: Split View");
    assert_eq!(three.text(Mode::HumanOnly), "Mode: Human Vision");

    let two = StatusStyle::for_modes(ModeSet::Two { dog: Mode::DogOnly });
    assert_eq!(two.text(Mode::DogOnly), "Dog Filter: ON");
    assert_eq!(two.text(Mode::HumanOnly), "Dog Filter: OFF");
}

#[test]
fn test_missing_font_disables_text_only() {
    let mut config = test_overlay_config();
    config.font_path = "/nonexistent/font.ttf".to_string();

    let overlay = OverlayRenderer::from_config(&config, ModeSet::Three);
    assert!(!overlay.has_text());

    assert!(matches!(
        load_font("/nonexistent/font.ttf"),
        Err(DogvisionError::Display(DisplayError::Font { .. }))
    ));

    // Divider still drawn
    let mut canvas = Canvas::new(10, 10);
    let boundary = SplitBoundary {
        axis: SplitAxis::Rows,
        index: 5,
    };
    overlay.draw(&mut canvas, Mode::Split, Some(boundary), &[]);
    assert_eq!(canvas.pixel(4, 5), [255, 255, 255]);
}

#[test]
fn test_outlined_divider_layers() {
    let overlay = OverlayRenderer::without_text(DividerStyle::Outlined);
    let mut canvas = Canvas::new(10, 10);
    canvas.clear(Rgb([100, 100, 100]));

    let boundary = SplitBoundary {
        axis: SplitAxis::Rows,
        index: 5,
    };
    overlay.draw(&mut canvas, Mode::Split, Some(boundary), &[]);

    let column: Vec<[u8; 3]> = (0..10).map(|y| canvas.pixel(3, y)).collect();
    assert_eq!(column[2], [100, 100, 100]);
    assert_eq!(column[3], [0, 0, 0]);
    assert_eq!(column[4], [0, 0, 0]);
    assert_eq!(column[5], [255, 255, 255]);
    assert_eq!(column[6], [0, 0, 0]);
    assert_eq!(column[7], [0, 0, 0]);
    assert_eq!(column[8], [100, 100, 100]);
}

#[test]
fn test_solid_divider_on_columns() {
    let overlay = OverlayRenderer::without_text(DividerStyle::Solid);
    let mut canvas = Canvas::new(8, 4);

    let boundary = SplitBoundary {
        axis: SplitAxis::Columns,
        index: 3,
    };
    overlay.draw(&mut canvas, Mode::Split, Some(boundary), &[]);

    for y in 0..4 {
        assert_eq!(canvas.pixel(3, y), [255, 255, 255]);
        assert_eq!(canvas.pixel(2, y), [0, 0, 0]);
        assert_eq!(canvas.pixel(4, y), [0, 0, 0]);
    }
}

#[test]
fn test_no_divider_without_boundary() {
    let overlay = OverlayRenderer::without_text(DividerStyle::Outlined);
    let mut canvas = Canvas::new(6, 6);
    let regions = [Region {
        x: 0,
        y: 0,
        width: 6,
        height: 6,
        filtered: true,
    }];

    overlay.draw(&mut canvas, Mode::DogOnly, None, &regions);
    assert!(canvas.as_raw().iter().all(|b| *b == 0));
}

#[test]
fn test_render_stats() {
    let mut stats = RenderStats::default();
    assert_eq!(stats.average_frame_time(), Duration::ZERO);

    stats.record_frame_render(Duration::from_millis(10));
    stats.record_frame_render(Duration::from_millis(30));
    stats.record_render_error();
    stats.record_mode_change();
    stats.record_input_event();

    assert_eq!(stats.frames_rendered, 2);
    assert_eq!(stats.average_frame_time(), Duration::from_millis(20));
    assert!((stats.render_success_rate() - 2.0 / 3.0).abs() < 1e-9);
    assert!(stats.last_frame_time.is_some());

    stats.reset();
    assert_eq!(stats.frames_rendered, 0);
}
