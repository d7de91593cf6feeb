use crate::error::{DisplayError, Result};
use crate::frame::{ChannelOrder, Frame};
use tracing::trace;

/// Display format conversion utilities
pub struct DisplayConverter;

impl DisplayConverter {
    /// Reorder channels for a surface that expects `order`
    pub fn to_display_order(frame: &Frame, order: ChannelOrder) -> Result<Frame> {
        if !frame.validate_size() {
            return Err(DisplayError::FormatConversion {
                details: format!(
                    "Invalid frame data size: expected {}, got {}",
                    frame.expected_size(),
                    frame.data.len()
                ),
            }
            .into());
        }

        Ok(frame.to_order(order))
    }

    /// Scale packed 24-bit data to the target resolution using nearest neighbour
    pub fn scale_rgb24(
        data: &[u8],
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    ) -> Result<Vec<u8>> {
        let expected_size = src_width as usize * src_height as usize * 3;
        if data.len() != expected_size {
            return Err(DisplayError::FormatConversion {
                details: format!(
                    "Invalid RGB24 data size: expected {}, got {}",
                    expected_size,
                    data.len()
                ),
            }
            .into());
        }

        if src_width == 0 || src_height == 0 {
            return Err(DisplayError::FormatConversion {
                details: format!("Cannot scale an empty {}x{} image", src_width, src_height),
            }
            .into());
        }

        if (src_width, src_height) == (dst_width, dst_height) {
            return Ok(data.to_vec());
        }

        let mut scaled_data = Vec::with_capacity(dst_width as usize * dst_height as usize * 3);

        let x_ratio = src_width as f32 / dst_width as f32;
        let y_ratio = src_height as f32 / dst_height as f32;

        for dst_y in 0..dst_height {
            let src_y = (((dst_y as f32) * y_ratio) as u32).min(src_height - 1);
            for dst_x in 0..dst_width {
                let src_x = (((dst_x as f32) * x_ratio) as u32).min(src_width - 1);

                let src_index = (src_y as usize * src_width as usize + src_x as usize) * 3;
                scaled_data.extend_from_slice(&data[src_index..src_index + 3]);
            }
        }

        Ok(scaled_data)
    }

    /// Stretch `frame` to exactly `size`, keeping its metadata
    pub fn fit_frame(frame: &Frame, size: (u32, u32)) -> Result<Frame> {
        if (frame.width, frame.height) == size {
            return Ok(frame.clone());
        }

        trace!(
            "Scaling frame {} from {}x{} to {}x{}",
            frame.id,
            frame.width,
            frame.height,
            size.0,
            size.1
        );

        let data = Self::scale_rgb24(&frame.data, frame.width, frame.height, size.0, size.1)?;
        Ok(frame.with_pixels(size.0, size.1, data))
    }

    /// Map a coordinate along one axis from frame space to surface space
    pub fn scale_coordinate(value: u32, src_extent: u32, dst_extent: u32) -> u32 {
        if src_extent == 0 {
            return 0;
        }
        (value as u64 * dst_extent as u64 / src_extent as u64) as u32
    }
}
