use super::hsv::{hsv_to_rgb, rgb_to_hsv};
use super::{FilterParameters, PreBlur};
use crate::config::FilterConfig;
use crate::frame::{ChannelOrder, Frame};
use tracing::debug;

/// Pure frame-to-frame dog vision filter
#[derive(Debug, Clone)]
pub struct ColorFilter {
    params: FilterParameters,
    blur: PreBlur,
    blur_enabled: bool,
}

impl ColorFilter {
    pub fn new(params: FilterParameters) -> Self {
        Self {
            params,
            blur: PreBlur::new(11),
            blur_enabled: false,
        }
    }

    /// Enable the pre-blur step with the given blur
    pub fn with_blur(mut self, blur: PreBlur) -> Self {
        self.blur = blur;
        self.blur_enabled = true;
        self
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        let mut filter = Self::new(FilterParameters::from_preset(config.bands));
        filter.blur = PreBlur::new(config.blur_kernel);
        filter.blur_enabled = config.blur;

        debug!(
            "Colour filter: {:?}, blur {} (kernel {}, sigma {:.2})",
            config.bands,
            if filter.blur_enabled { "on" } else { "off" },
            filter.blur.kernel_size(),
            filter.blur.sigma()
        );

        filter
    }

    pub fn parameters(&self) -> &FilterParameters {
        &self.params
    }

    pub fn blur_enabled(&self) -> bool {
        self.blur_enabled
    }

    pub fn set_blur_enabled(&mut self, enabled: bool) {
        self.blur_enabled = enabled;
    }

    /// Apply the band table to one HSV triple; hue and value pass through
    pub fn adjust_hsv(&self, hsv: [u8; 3]) -> [u8; 3] {
        let [h, s, v] = hsv;
        [h, self.params.scale_saturation(h, s), v]
    }

    /// Filter a whole frame. Output has the input's dimensions and channel order.
    pub fn apply(&self, frame: &Frame) -> Frame {
        let source = if self.blur_enabled {
            self.blur.apply(frame)
        } else {
            frame.clone()
        };

        let mut output = source;
        let order = output.order;
        for px in output.data.chunks_exact_mut(3) {
            let (r, g, b) = match order {
                ChannelOrder::Rgb => (px[0], px[1], px[2]),
                ChannelOrder::Bgr => (px[2], px[1], px[0]),
            };

            let [h, s, v] = self.adjust_hsv(rgb_to_hsv(r, g, b));
            let (r, g, b) = hsv_to_rgb(h, s, v);

            match order {
                ChannelOrder::Rgb => px.copy_from_slice(&[r, g, b]),
                ChannelOrder::Bgr => px.copy_from_slice(&[b, g, r]),
            }
        }

        output
    }
}

impl Default for ColorFilter {
    fn default() -> Self {
        Self::new(FilterParameters::default())
    }
}
