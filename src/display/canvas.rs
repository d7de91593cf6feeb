use crate::frame::{ChannelOrder, Frame};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use rusttype::{Font, Scale};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// RGB drawing target backing a display surface
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Packed RGB bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }

    pub fn clear(&mut self, color: Rgb<u8>) {
        for px in self.image.pixels_mut() {
            *px = color;
        }
    }

    /// Copy `frame` with its top-left corner at `position`, clipped to the canvas.
    /// BGR frames are swapped to RGB on the way in.
    pub fn blit(&mut self, frame: &Frame, position: (i32, i32)) {
        let (width, height) = self.size();
        let (ox, oy) = position;

        for fy in 0..frame.height {
            let cy = oy + fy as i32;
            if cy < 0 || cy >= height as i32 {
                continue;
            }
            for fx in 0..frame.width {
                let cx = ox + fx as i32;
                if cx < 0 || cx >= width as i32 {
                    continue;
                }
                let [a, b, c] = frame.pixel(fx, fy);
                let rgb = match frame.order {
                    ChannelOrder::Rgb => [a, b, c],
                    ChannelOrder::Bgr => [c, b, a],
                };
                self.image.put_pixel(cx as u32, cy as u32, Rgb(rgb));
            }
        }
    }

    /// Line from `from` to `to`. Axis-aligned lines are `thickness` pixels wide,
    /// centred on the segment; other lines are drawn one pixel wide.
    pub fn draw_line(&mut self, color: Rgb<u8>, from: (i32, i32), to: (i32, i32), thickness: u32) {
        let thickness = thickness.max(1) as i32;
        let before = (thickness - 1) / 2;

        if from.1 == to.1 {
            let x0 = from.0.min(to.0);
            let length = (from.0 - to.0).unsigned_abs() + 1;
            let rect = Rect::at(x0, from.1 - before).of_size(length, thickness as u32);
            draw_filled_rect_mut(&mut self.image, rect, color);
        } else if from.0 == to.0 {
            let y0 = from.1.min(to.1);
            let length = (from.1 - to.1).unsigned_abs() + 1;
            let rect = Rect::at(from.0 - before, y0).of_size(thickness as u32, length);
            draw_filled_rect_mut(&mut self.image, rect, color);
        } else {
            draw_line_segment_mut(
                &mut self.image,
                (from.0 as f32, from.1 as f32),
                (to.0 as f32, to.1 as f32),
                color,
            );
        }
    }

    /// Draw `text` with its top-left corner at `position`
    pub fn draw_text(
        &mut self,
        font: &Font<'_>,
        scale: Scale,
        position: (i32, i32),
        color: Rgb<u8>,
        text: &str,
    ) {
        draw_text_mut(&mut self.image, color, position.0, position.1, scale, font, text);
    }

    /// Pixel width and height `text` occupies
    pub fn text_size(font: &Font<'_>, scale: Scale, text: &str) -> (i32, i32) {
        text_size(scale, font, text)
    }
}
