use crate::frame::Frame;
use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::filter::separable_filter_equal;

type RgbF32Image = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Square Gaussian blur applied before the colour transform to soften detail
#[derive(Debug, Clone, PartialEq)]
pub struct PreBlur {
    kernel_size: u32,
    sigma: f32,
    weights: Vec<f32>,
}

impl PreBlur {
    /// Build a blur with sigma derived from the kernel size
    pub fn new(kernel_size: u32) -> Self {
        Self::with_sigma(kernel_size, 0.0)
    }

    /// Build a blur; a non-positive `sigma` is derived from the kernel size
    /// as `0.3 * ((k - 1) / 2 - 1) + 0.8`
    pub fn with_sigma(kernel_size: u32, sigma: f32) -> Self {
        let kernel_size = kernel_size.max(1) | 1;
        let sigma = if sigma > 0.0 {
            sigma
        } else {
            0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
        };

        Self {
            kernel_size,
            sigma,
            weights: gaussian_weights(kernel_size, sigma),
        }
    }

    pub fn kernel_size(&self) -> u32 {
        self.kernel_size
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Blur every channel; dimensions and channel order are preserved.
    ///
    /// Both passes run in `f32` and the result is rounded once, so a uniform
    /// frame comes back unchanged.
    pub fn apply(&self, frame: &Frame) -> Frame {
        if frame.width == 0 || frame.height == 0 {
            return frame.clone();
        }

        let (image, meta) = frame.clone().into_image();
        let widened: RgbF32Image = ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let [r, g, b] = image.get_pixel(x, y).0;
            Rgb([r as f32, g as f32, b as f32])
        });

        let blurred = separable_filter_equal(&widened, &self.weights);

        let narrowed = RgbImage::from_fn(image.width(), image.height(), |x, y| {
            let [r, g, b] = blurred.get_pixel(x, y).0;
            Rgb([round_channel(r), round_channel(g), round_channel(b)])
        });
        Frame::from_image(narrowed, meta)
    }
}

fn round_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Normalised one-dimensional Gaussian kernel
fn gaussian_weights(size: u32, sigma: f32) -> Vec<f32> {
    let center = (size / 2) as f32;
    let denom = 2.0 * sigma * sigma;

    let raw: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / denom).exp()
        })
        .collect();

    let sum: f32 = raw.iter().sum();
    raw.into_iter().map(|w| w / sum).collect()
}
