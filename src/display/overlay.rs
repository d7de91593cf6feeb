use super::canvas::{BLACK, WHITE};
use super::Canvas;
use crate::compositor::{Region, SplitAxis, SplitBoundary};
use crate::config::{DividerStyle, OverlayConfig, OverlayPosition};
use crate::error::{DisplayError, Result};
use crate::mode::{Mode, ModeSet};
use rusttype::{Font, Scale};
use std::fs;
use tracing::{debug, info, warn};

const MARGIN: i32 = 10;
const OUTLINE_OFFSET: i32 = 2;

/// Offsets of the dark copies drawn behind outlined text
const OUTLINE_OFFSETS: [(i32, i32); 8] = [
    (-OUTLINE_OFFSET, -OUTLINE_OFFSET),
    (0, -OUTLINE_OFFSET),
    (OUTLINE_OFFSET, -OUTLINE_OFFSET),
    (-OUTLINE_OFFSET, 0),
    (OUTLINE_OFFSET, 0),
    (-OUTLINE_OFFSET, OUTLINE_OFFSET),
    (0, OUTLINE_OFFSET),
    (OUTLINE_OFFSET, OUTLINE_OFFSET),
];

/// Wording of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    /// "Mode: Split View"
    ModeLabel,
    /// "Dog Filter: ON" / "Dog Filter: OFF"
    FilterToggle,
}

impl StatusStyle {
    pub fn for_modes(modes: ModeSet) -> Self {
        match modes {
            ModeSet::Three => StatusStyle::ModeLabel,
            ModeSet::Two { .. } => StatusStyle::FilterToggle,
        }
    }

    pub fn text(&self, mode: Mode) -> String {
        match self {
            StatusStyle::ModeLabel => format!("Mode: {}", mode.label()),
            StatusStyle::FilterToggle => format!(
                "Dog Filter: {}",
                if mode == Mode::HumanOnly { "OFF" } else { "ON" }
            ),
        }
    }
}

/// Load a TrueType font from disk
pub fn load_font(path: &str) -> Result<Font<'static>> {
    let font_data = fs::read(path).map_err(|e| DisplayError::Font {
        path: path.to_string(),
        details: format!("Failed to read font file: {}", e),
    })?;

    Font::try_from_vec(font_data).ok_or_else(|| {
        DisplayError::Font {
            path: path.to_string(),
            details: "Failed to parse font file".to_string(),
        }
        .into()
    })
}

/// Draws the status text, region captions and split divider over a presented frame
pub struct OverlayRenderer {
    enabled: bool,
    font: Option<Font<'static>>,
    scale: Scale,
    position: OverlayPosition,
    outline: bool,
    region_labels: bool,
    divider: DividerStyle,
    divider_thickness: u32,
    style: StatusStyle,
}

impl OverlayRenderer {
    /// Build from config. A font that cannot be loaded disables text but keeps the divider.
    pub fn from_config(config: &OverlayConfig, modes: ModeSet) -> Self {
        let font = if config.enabled {
            match load_font(&config.font_path) {
                Ok(font) => {
                    info!("Overlay font loaded from {}", config.font_path);
                    Some(font)
                }
                Err(e) => {
                    warn!("Overlay text disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            enabled: config.enabled,
            font,
            scale: Scale::uniform(config.font_size),
            position: config.position,
            outline: config.outline,
            region_labels: config.region_labels,
            divider: config.divider,
            divider_thickness: config.divider_thickness,
            style: StatusStyle::for_modes(modes),
        }
    }

    /// Renderer that draws no text, only the divider
    pub fn without_text(divider: DividerStyle) -> Self {
        Self {
            enabled: false,
            font: None,
            scale: Scale::uniform(36.0),
            position: OverlayPosition::TopLeft,
            outline: true,
            region_labels: false,
            divider,
            divider_thickness: 1,
            style: StatusStyle::ModeLabel,
        }
    }

    pub fn with_font(mut self, font: Font<'static>, size: f32) -> Self {
        self.font = Some(font);
        self.scale = Scale::uniform(size);
        self.enabled = true;
        self
    }

    pub fn with_region_labels(mut self, enabled: bool) -> Self {
        self.region_labels = enabled;
        self
    }

    pub fn with_position(mut self, position: OverlayPosition) -> Self {
        self.position = position;
        self
    }

    pub fn has_text(&self) -> bool {
        self.enabled && self.font.is_some()
    }

    pub fn status_text(&self, mode: Mode) -> String {
        self.style.text(mode)
    }

    /// Draw everything for `mode`. `boundary` and `regions` are in canvas coordinates.
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        mode: Mode,
        boundary: Option<SplitBoundary>,
        regions: &[Region],
    ) {
        if let Some(boundary) = boundary {
            self.draw_divider(canvas, boundary);
        }

        let Some(font) = self.font.as_ref().filter(|_| self.enabled) else {
            return;
        };

        let captions = self.region_labels && mode == Mode::Split && regions.len() == 2;
        if captions {
            for region in regions {
                let label = if region.filtered {
                    Mode::DogOnly.label()
                } else {
                    Mode::HumanOnly.label()
                };
                let at = (region.x as i32 + MARGIN, region.y as i32 + MARGIN);
                self.draw_text(canvas, font, at, label);
            }
        } else {
            let text = self.status_text(mode);
            let at = self.anchor(canvas, font, &text);
            self.draw_text(canvas, font, at, &text);
        }
    }

    fn anchor(&self, canvas: &Canvas, font: &Font<'_>, text: &str) -> (i32, i32) {
        match self.position {
            OverlayPosition::TopLeft => (MARGIN, MARGIN),
            OverlayPosition::TopRight => {
                let (text_width, _) = Canvas::text_size(font, self.scale, text);
                let width = canvas.size().0 as i32;
                ((width - text_width - MARGIN).max(0), MARGIN)
            }
        }
    }

    fn draw_text(&self, canvas: &mut Canvas, font: &Font<'_>, at: (i32, i32), text: &str) {
        if self.outline {
            for (dx, dy) in OUTLINE_OFFSETS {
                canvas.draw_text(font, self.scale, (at.0 + dx, at.1 + dy), BLACK, text);
            }
        }
        canvas.draw_text(font, self.scale, at, WHITE, text);
    }

    fn draw_divider(&self, canvas: &mut Canvas, boundary: SplitBoundary) {
        let (width, height) = canvas.size();
        let index = boundary.index as i32;

        let line = |offset: i32| -> ((i32, i32), (i32, i32)) {
            match boundary.axis {
                SplitAxis::Rows => ((0, index + offset), (width as i32 - 1, index + offset)),
                SplitAxis::Columns => ((index + offset, 0), (index + offset, height as i32 - 1)),
            }
        };

        match self.divider {
            DividerStyle::Off => {}
            DividerStyle::Solid => {
                let (a, b) = line(0);
                canvas.draw_line(WHITE, a, b, self.divider_thickness);
            }
            DividerStyle::Outlined => {
                for offset in [-1, 1] {
                    let (a, b) = line(offset);
                    canvas.draw_line(BLACK, a, b, 3);
                }
                let (a, b) = line(0);
                canvas.draw_line(WHITE, a, b, 1);
            }
        }

        debug!("Divider {:?} at {:?} {}", self.divider, boundary.axis, boundary.index);
    }
}
