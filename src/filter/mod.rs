//! Dichromatic ("dog") vision colour filter.
//!
//! Pixels are taken to 8-bit HSV (hue 0..180), their saturation is scaled by the
//! multiplier of the hue band they fall in, and they are converted back. Hue and
//! value are left alone. An optional Gaussian pre-blur softens the image first.

mod bands;
mod blur;
mod color_filter;
pub mod hsv;
#[cfg(test)]
mod tests;

pub use bands::{BandKind, BandPreset, FilterParameters};
pub use blur::PreBlur;
pub use color_filter::ColorFilter;
