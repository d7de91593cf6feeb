use super::hsv::HUE_RANGE;
use serde::{Deserialize, Serialize};

/// Hue band a pixel is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandKind {
    /// Hue 100..=140
    Blue,
    /// Hue 20..=40
    Yellow,
    /// Hue below 20 or strictly between 40 and 100
    RedGreen,
    /// Everything else (above 140)
    Other,
}

/// Named saturation tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPreset {
    /// Blue/yellow boosted, every other hue halved
    TwoBand,
    /// Blue/yellow boosted, red-green nearly removed, other hues untouched
    ThreeBand,
    /// Three-band table plus other hues halved
    FourBand,
}

/// Fixed filter constants. Immutable once the filter is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParameters {
    pub blue: (u8, u8),
    pub yellow: (u8, u8),
    /// Multiplier for blue and yellow, result capped at 255
    pub boost: f32,
    pub red_green: f32,
    /// `None` leaves pixels in the other band unchanged
    pub other: Option<f32>,
}

impl FilterParameters {
    pub fn from_preset(preset: BandPreset) -> Self {
        let base = Self {
            blue: (100, 140),
            yellow: (20, 40),
            boost: 1.5,
            red_green: 0.1,
            other: None,
        };

        match preset {
            BandPreset::TwoBand => Self {
                red_green: 0.5,
                other: Some(0.5),
                ..base
            },
            BandPreset::ThreeBand => base,
            BandPreset::FourBand => Self {
                other: Some(0.5),
                ..base
            },
        }
    }

    /// Band for an 8-bit hue; hues past the range wrap around
    pub fn classify(&self, hue: u8) -> BandKind {
        let h = (hue as u16 % HUE_RANGE) as u8;

        if (self.blue.0..=self.blue.1).contains(&h) {
            BandKind::Blue
        } else if (self.yellow.0..=self.yellow.1).contains(&h) {
            BandKind::Yellow
        } else if h < self.yellow.0 || (h > self.yellow.1 && h < self.blue.0) {
            BandKind::RedGreen
        } else {
            BandKind::Other
        }
    }

    /// Saturation multiplier for a band, `None` when the band is passed through
    pub fn multiplier(&self, band: BandKind) -> Option<f32> {
        match band {
            BandKind::Blue | BandKind::Yellow => Some(self.boost),
            BandKind::RedGreen => Some(self.red_green),
            BandKind::Other => self.other,
        }
    }

    /// Scaled saturation, computed wide and clamped before truncating to 8 bits
    pub fn scale_saturation(&self, hue: u8, saturation: u8) -> u8 {
        match self.multiplier(self.classify(hue)) {
            Some(factor) => (saturation as f32 * factor).clamp(0.0, 255.0) as u8,
            None => saturation,
        }
    }
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self::from_preset(BandPreset::FourBand)
    }
}
