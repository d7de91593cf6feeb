use image::{ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Byte order of the three colour samples of every pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOrder {
    /// Blue, green, red - what the capture pipeline produces
    Bgr,
    /// Red, green, blue - what the display pipeline consumes
    Rgb,
}

impl ChannelOrder {
    /// Number of bytes per pixel (both orders are packed 24-bit)
    pub fn bytes_per_pixel(&self) -> usize {
        3
    }
}

/// Quarter-turn applied to every captured frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    /// No rotation
    None,
    /// Rotate 90 degrees clockwise
    Clockwise,
    /// Rotate 90 degrees counter-clockwise (270 clockwise)
    CounterClockwise,
}

impl RotationDirection {
    /// Get rotation angle in clockwise degrees
    pub fn degrees(&self) -> u16 {
        match self {
            RotationDirection::None => 0,
            RotationDirection::Clockwise => 90,
            RotationDirection::CounterClockwise => 270,
        }
    }

    /// Rotation that undoes this one
    pub fn inverse(&self) -> Self {
        match self {
            RotationDirection::None => RotationDirection::None,
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }

    /// Whether width and height trade places
    pub fn swaps_dimensions(&self) -> bool {
        !matches!(self, RotationDirection::None)
    }
}

/// Mirror flip applied after rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxes {
    None,
    /// Mirror left/right
    Horizontal,
    /// Mirror top/bottom
    Vertical,
    /// Mirror both axes (equivalent to a half turn)
    Both,
}

/// One captured frame: packed 8-bit three-channel pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Sequence number assigned by the capture device
    pub id: u64,
    /// Timestamp when frame was captured
    pub timestamp: SystemTime,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Channel order of `data`
    pub order: ChannelOrder,
    /// Raw pixel bytes, `width * height * 3` long
    pub data: Vec<u8>,
}

impl Frame {
    /// Create a new frame from raw pixel bytes
    pub fn new(id: u64, width: u32, height: u32, order: ChannelOrder, data: Vec<u8>) -> Self {
        Self {
            id,
            timestamp: SystemTime::now(),
            width,
            height,
            order,
            data,
        }
    }

    /// Create a frame where every pixel has the same value
    pub fn filled(width: u32, height: u32, order: ChannelOrder, pixel: [u8; 3]) -> Self {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self::new(0, width, height, order, data)
    }

    /// Expected buffer length for the frame dimensions
    pub fn expected_size(&self) -> usize {
        self.width as usize * self.height as usize * self.order.bytes_per_pixel()
    }

    /// Validate frame data size against expected size
    pub fn validate_size(&self) -> bool {
        self.data.len() == self.expected_size()
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width as usize * 3
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride() + x as usize * 3
    }

    /// Read the pixel at (x, y) in the frame's own channel order
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Overwrite the pixel at (x, y) in the frame's own channel order
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [u8; 3]) {
        let i = self.offset(x, y);
        self.data[i..i + 3].copy_from_slice(&pixel);
    }

    /// Return a copy whose bytes are in `order`, swapping the first and third channel if needed
    pub fn to_order(&self, order: ChannelOrder) -> Frame {
        let mut converted = self.clone();
        if self.order != order {
            for px in converted.data.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
            converted.order = order;
        }
        converted
    }

    /// Same metadata, different pixels and dimensions
    pub fn with_pixels(&self, width: u32, height: u32, data: Vec<u8>) -> Frame {
        Frame {
            id: self.id,
            timestamp: self.timestamp,
            width,
            height,
            order: self.order,
            data,
        }
    }

    /// Move the pixels into an `image` buffer. The buffer is labelled RGB but keeps the
    /// frame's byte order; callers track the real order through `self.order`.
    pub fn into_image(self) -> (RgbImage, FrameMeta) {
        let meta = FrameMeta {
            id: self.id,
            timestamp: self.timestamp,
            order: self.order,
        };
        let image = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(self.width, self.height, self.data)
            .unwrap_or_else(|| ImageBuffer::new(self.width, self.height));
        (image, meta)
    }

    /// Rebuild a frame from an `image` buffer produced by `into_image`
    pub fn from_image(image: RgbImage, meta: FrameMeta) -> Frame {
        let (width, height) = image.dimensions();
        Frame {
            id: meta.id,
            timestamp: meta.timestamp,
            width,
            height,
            order: meta.order,
            data: image.into_raw(),
        }
    }
}

/// Frame metadata carried across an `image` round trip
#[derive(Debug, Clone, Copy)]
pub struct FrameMeta {
    pub id: u64,
    pub timestamp: SystemTime,
    pub order: ChannelOrder,
}
