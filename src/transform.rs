use crate::config::TransformConfig;
use crate::frame::{FlipAxes, Frame, RotationDirection};
use image::imageops;
use tracing::debug;

/// Fixed geometric normalisation of captured frames: a quarter-turn, then a mirror flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTransformer {
    rotation: RotationDirection,
    flip: FlipAxes,
}

impl FrameTransformer {
    pub fn new(rotation: RotationDirection, flip: FlipAxes) -> Self {
        Self { rotation, flip }
    }

    pub fn from_config(config: &TransformConfig) -> Self {
        debug!(
            "Frame transform: rotate {} degrees, flip {:?}",
            config.rotation.degrees(),
            config.flip
        );
        Self::new(config.rotation, config.flip)
    }

    /// Transformer that leaves frames untouched
    pub fn identity() -> Self {
        Self::new(RotationDirection::None, FlipAxes::None)
    }

    pub fn rotation(&self) -> RotationDirection {
        self.rotation
    }

    pub fn flip(&self) -> FlipAxes {
        self.flip
    }

    /// Transformer that undoes this one (un-flip, then rotate back)
    pub fn inverse(&self) -> InverseTransformer {
        InverseTransformer {
            rotation: self.rotation.inverse(),
            flip: self.flip,
        }
    }

    /// Dimensions of a `width` x `height` frame after the transform
    pub fn output_size(&self, width: u32, height: u32) -> (u32, u32) {
        if self.rotation.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }

    pub fn apply(&self, frame: &Frame) -> Frame {
        if self.rotation == RotationDirection::None && self.flip == FlipAxes::None {
            return frame.clone();
        }

        let (image, meta) = frame.clone().into_image();
        let rotated = rotate(image, self.rotation);
        Frame::from_image(mirror(rotated, self.flip), meta)
    }
}

impl Default for FrameTransformer {
    fn default() -> Self {
        Self::new(RotationDirection::Clockwise, FlipAxes::Horizontal)
    }
}

/// Reverse of a `FrameTransformer`: the flip is applied first, then the opposite rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InverseTransformer {
    rotation: RotationDirection,
    flip: FlipAxes,
}

impl InverseTransformer {
    pub fn apply(&self, frame: &Frame) -> Frame {
        let (image, meta) = frame.clone().into_image();
        let unflipped = mirror(image, self.flip);
        Frame::from_image(rotate(unflipped, self.rotation), meta)
    }
}

fn rotate(image: image::RgbImage, rotation: RotationDirection) -> image::RgbImage {
    match rotation {
        RotationDirection::None => image,
        RotationDirection::Clockwise => imageops::rotate90(&image),
        RotationDirection::CounterClockwise => imageops::rotate270(&image),
    }
}

fn mirror(mut image: image::RgbImage, flip: FlipAxes) -> image::RgbImage {
    match flip {
        FlipAxes::None => {}
        FlipAxes::Horizontal => imageops::flip_horizontal_in_place(&mut image),
        FlipAxes::Vertical => imageops::flip_vertical_in_place(&mut image),
        FlipAxes::Both => imageops::rotate180_in_place(&mut image),
    }
    image
}
