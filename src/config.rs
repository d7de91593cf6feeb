use crate::filter::BandPreset;
use crate::frame::{FlipAxes, RotationDirection};
use crate::mode::{Mode, ModeSet, PointerPolicy};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DogvisionConfig {
    pub camera: CameraConfig,
    pub transform: TransformConfig,
    pub split: SplitConfig,
    pub filter: FilterConfig,
    pub input: InputConfig,
    pub display: DisplayConfig,
    pub overlay: OverlayConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CameraSource {
    /// V4L2 device through GStreamer
    V4l2,
    /// Generated hue-sweep test pattern, no hardware required
    Synthetic,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CameraConfig {
    /// Where frames come from
    #[serde(default = "default_camera_source")]
    pub source: CameraSource,

    /// Camera device index (e.g., 0 for /dev/video0)
    #[serde(default = "default_camera_index")]
    pub index: u32,

    /// Requested capture resolution (width, height)
    #[serde(default = "default_camera_resolution")]
    pub resolution: (u32, u32),

    /// Requested capture frames per second
    #[serde(default = "default_camera_fps")]
    pub fps: u32,

    /// How long a single frame read may block before it counts as a failure
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransformConfig {
    /// Quarter-turn applied to every captured frame
    #[serde(default = "default_rotation")]
    pub rotation: RotationDirection,

    /// Mirror applied after the rotation
    #[serde(default = "default_flip")]
    pub flip: FlipAxes,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SplitAxis {
    /// Cut across the height; regions are stacked top to bottom
    Rows,
    /// Cut across the width; regions sit side by side
    Columns,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilteredSide {
    /// Top or left region
    First,
    /// Bottom or right region
    Second,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SplitConfig {
    /// Axis the frame is cut along in split mode
    #[serde(default = "default_split_axis")]
    pub axis: SplitAxis,

    /// Position of the cut as a fraction of the split dimension
    #[serde(default = "default_split_fraction")]
    pub fraction: f64,

    /// Region that receives the colour filter
    #[serde(default = "default_filtered_side")]
    pub filtered_side: FilteredSide,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilterConfig {
    /// Hue band table
    #[serde(default = "default_band_preset")]
    pub bands: BandPreset,

    /// Gaussian pre-blur to simulate reduced acuity
    #[serde(default = "default_blur")]
    pub blur: bool,

    /// Pre-blur kernel size in pixels (odd)
    #[serde(default = "default_blur_kernel")]
    pub blur_kernel: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModeSetKind {
    /// Human, dog and split modes
    Three,
    /// Dog vision on/off
    Two,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PointerPolicyKind {
    /// Every tap advances to the next mode
    Cycle,
    /// Left half of the screen selects `left_mode`, right half `right_mode`
    Halves,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InputConfig {
    /// Which modes are reachable
    #[serde(default = "default_mode_set")]
    pub modes: ModeSetKind,

    /// Mode that stands for "dog vision on" in the two-mode form
    #[serde(default = "default_dog_mode")]
    pub dog_mode: Mode,

    /// Mode active at startup
    #[serde(default = "default_initial_mode")]
    pub initial_mode: Mode,

    /// How pointer/touch presses change the mode
    #[serde(default = "default_pointer_policy")]
    pub pointer_policy: PointerPolicyKind,

    /// Mode selected by a press on the left half (halves policy)
    #[serde(default = "default_left_mode")]
    pub left_mode: Mode,

    /// Mode selected by a press on the right half (halves policy)
    #[serde(default = "default_right_mode")]
    pub right_mode: Mode,

    /// Read key presses from the controlling terminal
    #[serde(default = "default_keyboard")]
    pub keyboard: bool,

    /// Read touch presses from an evdev device
    #[serde(default = "default_touch")]
    pub touch: bool,

    /// Touch input device path
    #[serde(default = "default_touch_device")]
    pub touch_device: String,

    /// Background listener that reads mode digits from line-buffered stdin
    #[serde(default = "default_stdin_listener")]
    pub stdin_listener: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DisplayBackend {
    /// GStreamer fbdevsink
    Framebuffer,
    /// Render into memory only
    Headless,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Output backend
    #[serde(default = "default_display_backend")]
    pub backend: DisplayBackend,

    /// Framebuffer device path
    #[serde(default = "default_framebuffer_device")]
    pub framebuffer_device: String,

    /// Surface resolution; defaults to the transformed frame size
    #[serde(default)]
    pub resolution: Option<(u32, u32)>,

    /// Stretch frames to the surface size
    #[serde(default = "default_scale_to_fit")]
    pub scale_to_fit: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPosition {
    TopLeft,
    TopRight,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DividerStyle {
    Off,
    /// Single white line
    Solid,
    /// White line flanked by two black lines
    Outlined,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Draw the status text
    #[serde(default = "default_overlay_enabled")]
    pub enabled: bool,

    /// Path to TrueType font file for overlay text
    #[serde(default = "default_font_path")]
    pub font_path: String,

    /// Font size for overlay text
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Corner the status text is anchored to
    #[serde(default = "default_overlay_position")]
    pub position: OverlayPosition,

    /// Draw offset black copies behind the text
    #[serde(default = "default_outline")]
    pub outline: bool,

    /// Caption each region in split mode
    #[serde(default = "default_region_labels")]
    pub region_labels: bool,

    /// Line drawn on the split boundary
    #[serde(default = "default_divider")]
    pub divider: DividerStyle,

    /// Thickness of the solid divider
    #[serde(default = "default_divider_thickness")]
    pub divider_thickness: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RenderConfig {
    /// Frame pacing target
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,

    /// Log loop statistics every N frames (0 disables periodic logging)
    #[serde(default = "default_stats_interval")]
    pub stats_interval_frames: u64,
}

impl InputConfig {
    pub fn mode_set(&self) -> ModeSet {
        match self.modes {
            ModeSetKind::Three => ModeSet::Three,
            ModeSetKind::Two => ModeSet::Two { dog: self.dog_mode },
        }
    }

    pub fn pointer_policy(&self) -> PointerPolicy {
        match self.pointer_policy {
            PointerPolicyKind::Cycle => PointerPolicy::Cycle,
            PointerPolicyKind::Halves => PointerPolicy::Halves {
                left: self.left_mode,
                right: self.right_mode,
            },
        }
    }
}

impl DogvisionConfig {
    /// Load configuration from default sources (file + environment variables)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("dogvision.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            .set_default("camera.source", "v4l2")?
            .set_default("camera.index", default_camera_index())?
            .set_default(
                "camera.resolution",
                vec![default_camera_resolution().0, default_camera_resolution().1],
            )?
            .set_default("camera.fps", default_camera_fps())?
            .set_default("camera.read_timeout_ms", default_read_timeout_ms())?
            .set_default("transform.rotation", "clockwise")?
            .set_default("transform.flip", "horizontal")?
            .set_default("split.axis", "rows")?
            .set_default("split.fraction", default_split_fraction())?
            .set_default("split.filtered_side", "second")?
            .set_default("filter.bands", "four_band")?
            .set_default("filter.blur", default_blur())?
            .set_default("filter.blur_kernel", default_blur_kernel())?
            .set_default("input.modes", "three")?
            .set_default("input.dog_mode", "dog_only")?
            .set_default("input.initial_mode", "split")?
            .set_default("input.pointer_policy", "cycle")?
            .set_default("input.left_mode", "human_only")?
            .set_default("input.right_mode", "dog_only")?
            .set_default("input.keyboard", default_keyboard())?
            .set_default("input.touch", default_touch())?
            .set_default("input.touch_device", default_touch_device())?
            .set_default("input.stdin_listener", default_stdin_listener())?
            .set_default("display.backend", "framebuffer")?
            .set_default("display.framebuffer_device", default_framebuffer_device())?
            .set_default("display.scale_to_fit", default_scale_to_fit())?
            .set_default("overlay.enabled", default_overlay_enabled())?
            .set_default("overlay.font_path", default_font_path())?
            .set_default("overlay.font_size", default_font_size() as f64)?
            .set_default("overlay.position", "top_left")?
            .set_default("overlay.outline", default_outline())?
            .set_default("overlay.region_labels", default_region_labels())?
            .set_default("overlay.divider", "outlined")?
            .set_default("overlay.divider_thickness", default_divider_thickness())?
            .set_default("render.target_fps", default_target_fps())?
            .set_default("render.stats_interval_frames", default_stats_interval())?
            // Add configuration file (optional)
            .add_source(File::with_name(&path_str).required(false))
            // DOGVISION_CAMERA__INDEX=1 overrides camera.index
            .add_source(
                Environment::with_prefix("DOGVISION")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: DogvisionConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.camera.resolution.0 == 0 || self.camera.resolution.1 == 0 {
            return Err(ConfigError::Message(
                "Camera resolution must be greater than 0".to_string(),
            ));
        }

        if self.camera.fps == 0 {
            return Err(ConfigError::Message(
                "Camera fps must be greater than 0".to_string(),
            ));
        }

        if !(self.split.fraction > 0.0 && self.split.fraction < 1.0) {
            return Err(ConfigError::Message(format!(
                "Split fraction must lie strictly between 0 and 1, got {}",
                self.split.fraction
            )));
        }

        if self.filter.blur_kernel < 3 || self.filter.blur_kernel % 2 == 0 {
            return Err(ConfigError::Message(format!(
                "Blur kernel must be an odd size of at least 3, got {}",
                self.filter.blur_kernel
            )));
        }

        let modes = self.input.mode_set();
        if !modes.contains(self.input.initial_mode) {
            return Err(ConfigError::Message(format!(
                "Initial mode {:?} is not reachable with the {:?} mode set",
                self.input.initial_mode, self.input.modes
            )));
        }

        if let PointerPolicy::Halves { left, right } = self.input.pointer_policy() {
            if !modes.contains(left) || !modes.contains(right) {
                return Err(ConfigError::Message(format!(
                    "Halves policy modes {:?}/{:?} are not reachable with the {:?} mode set",
                    left, right, self.input.modes
                )));
            }
        }

        if self.input.modes == ModeSetKind::Two && self.input.dog_mode == Mode::HumanOnly {
            return Err(ConfigError::Message(
                "dog_mode cannot be human_only".to_string(),
            ));
        }

        if self.input.keyboard && self.input.stdin_listener {
            return Err(ConfigError::Message(
                "Keyboard input and the stdin listener both read the terminal; enable only one"
                    .to_string(),
            ));
        }

        if let Some((w, h)) = self.display.resolution {
            if w == 0 || h == 0 {
                return Err(ConfigError::Message(
                    "Display resolution must be greater than 0".to_string(),
                ));
            }
        }

        if self.overlay.font_size <= 0.0 {
            return Err(ConfigError::Message(
                "Overlay font size must be greater than 0".to_string(),
            ));
        }

        if self.overlay.divider_thickness == 0 {
            return Err(ConfigError::Message(
                "Divider thickness must be greater than 0".to_string(),
            ));
        }

        if self.render.target_fps == 0 {
            return Err(ConfigError::Message(
                "Render target fps must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for DogvisionConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                source: default_camera_source(),
                index: default_camera_index(),
                resolution: default_camera_resolution(),
                fps: default_camera_fps(),
                read_timeout_ms: default_read_timeout_ms(),
            },
            transform: TransformConfig {
                rotation: default_rotation(),
                flip: default_flip(),
            },
            split: SplitConfig {
                axis: default_split_axis(),
                fraction: default_split_fraction(),
                filtered_side: default_filtered_side(),
            },
            filter: FilterConfig {
                bands: default_band_preset(),
                blur: default_blur(),
                blur_kernel: default_blur_kernel(),
            },
            input: InputConfig {
                modes: default_mode_set(),
                dog_mode: default_dog_mode(),
                initial_mode: default_initial_mode(),
                pointer_policy: default_pointer_policy(),
                left_mode: default_left_mode(),
                right_mode: default_right_mode(),
                keyboard: default_keyboard(),
                touch: default_touch(),
                touch_device: default_touch_device(),
                stdin_listener: default_stdin_listener(),
            },
            display: DisplayConfig {
                backend: default_display_backend(),
                framebuffer_device: default_framebuffer_device(),
                resolution: None,
                scale_to_fit: default_scale_to_fit(),
            },
            overlay: OverlayConfig {
                enabled: default_overlay_enabled(),
                font_path: default_font_path(),
                font_size: default_font_size(),
                position: default_overlay_position(),
                outline: default_outline(),
                region_labels: default_region_labels(),
                divider: default_divider(),
                divider_thickness: default_divider_thickness(),
            },
            render: RenderConfig {
                target_fps: default_target_fps(),
                stats_interval_frames: default_stats_interval(),
            },
        }
    }
}

// Default value functions
fn default_camera_source() -> CameraSource {
    CameraSource::V4l2
}
fn default_camera_index() -> u32 {
    0
}
fn default_camera_resolution() -> (u32, u32) {
    (640, 480)
}
fn default_camera_fps() -> u32 {
    30
}
fn default_read_timeout_ms() -> u64 {
    2000
}

fn default_rotation() -> RotationDirection {
    RotationDirection::Clockwise
}
fn default_flip() -> FlipAxes {
    FlipAxes::Horizontal
}

fn default_split_axis() -> SplitAxis {
    SplitAxis::Rows
}
fn default_split_fraction() -> f64 {
    0.5
}
fn default_filtered_side() -> FilteredSide {
    FilteredSide::Second
}

fn default_band_preset() -> BandPreset {
    BandPreset::FourBand
}
fn default_blur() -> bool {
    false
}
fn default_blur_kernel() -> u32 {
    11
}

fn default_mode_set() -> ModeSetKind {
    ModeSetKind::Three
}
fn default_dog_mode() -> Mode {
    Mode::DogOnly
}
fn default_initial_mode() -> Mode {
    Mode::Split
}
fn default_pointer_policy() -> PointerPolicyKind {
    PointerPolicyKind::Cycle
}
fn default_left_mode() -> Mode {
    Mode::HumanOnly
}
fn default_right_mode() -> Mode {
    Mode::DogOnly
}
fn default_keyboard() -> bool {
    true
}
fn default_touch() -> bool {
    false
}
fn default_touch_device() -> String {
    "/dev/input/event0".to_string()
}
fn default_stdin_listener() -> bool {
    false
}

fn default_display_backend() -> DisplayBackend {
    DisplayBackend::Framebuffer
}
fn default_framebuffer_device() -> String {
    "/dev/fb0".to_string()
}
fn default_scale_to_fit() -> bool {
    true
}

fn default_overlay_enabled() -> bool {
    true
}
fn default_font_path() -> String {
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string()
}
fn default_font_size() -> f32 {
    36.0
}
fn default_overlay_position() -> OverlayPosition {
    OverlayPosition::TopLeft
}
fn default_outline() -> bool {
    true
}
fn default_region_labels() -> bool {
    false
}
fn default_divider() -> DividerStyle {
    DividerStyle::Outlined
}
fn default_divider_thickness() -> u32 {
    1
}

fn default_target_fps() -> u32 {
    30
}
fn default_stats_interval() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DogvisionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.input.initial_mode, Mode::Split);
        assert_eq!(config.render.target_fps, 30);
        assert_eq!(config.filter.blur_kernel, 11);
    }

    #[test]
    fn test_config_validation() {
        let mut config = DogvisionConfig::default();
        config.camera.resolution = (0, 0);
        assert!(config.validate().is_err());

        config.camera.resolution = (640, 480);
        assert!(config.validate().is_ok());

        config.split.fraction = 1.0;
        assert!(config.validate().is_err());
        config.split.fraction = 0.4;
        assert!(config.validate().is_ok());

        config.filter.blur_kernel = 10;
        assert!(config.validate().is_err());
        config.filter.blur_kernel = 11;

        config.render.target_fps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_keyboard_and_stdin_are_exclusive() {
        let mut config = DogvisionConfig::default();
        config.input.keyboard = true;
        config.input.stdin_listener = true;
        assert!(config.validate().is_err());

        config.input.keyboard = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_two_mode_set_rejects_split_initial_mode_unless_it_is_the_dog_mode() {
        let mut config = DogvisionConfig::default();
        config.input.modes = ModeSetKind::Two;
        config.input.dog_mode = Mode::DogOnly;
        config.input.initial_mode = Mode::Split;
        assert!(config.validate().is_err());

        config.input.dog_mode = Mode::Split;
        assert!(config.validate().is_ok());
        assert_eq!(config.input.mode_set(), ModeSet::Two { dog: Mode::Split });
    }

    #[test]
    fn test_halves_policy_mapping() {
        let mut config = DogvisionConfig::default();
        config.input.pointer_policy = PointerPolicyKind::Halves;

        assert_eq!(
            config.input.pointer_policy(),
            PointerPolicy::Halves {
                left: Mode::HumanOnly,
                right: Mode::DogOnly,
            }
        );
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[camera]
source = "synthetic"
resolution = [320, 240]

[transform]
rotation = "counter_clockwise"
flip = "both"

[split]
axis = "columns"
fraction = 0.4

[input]
pointer_policy = "halves"
keyboard = false

[display]
backend = "headless"
resolution = [480, 320]
"#
        )
        .unwrap();

        let config = DogvisionConfig::load_from_file(file.path()).unwrap();

        assert_eq!(config.camera.source, CameraSource::Synthetic);
        assert_eq!(config.camera.resolution, (320, 240));
        assert_eq!(config.transform.rotation, RotationDirection::CounterClockwise);
        assert_eq!(config.transform.flip, FlipAxes::Both);
        assert_eq!(config.split.axis, SplitAxis::Columns);
        assert!((config.split.fraction - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.input.pointer_policy, PointerPolicyKind::Halves);
        assert_eq!(config.display.backend, DisplayBackend::Headless);
        assert_eq!(config.display.resolution, Some((480, 320)));

        // Untouched sections keep their defaults
        assert_eq!(config.camera.fps, 30);
        assert_eq!(config.filter.bands, BandPreset::FourBand);
        assert_eq!(config.overlay.divider, DividerStyle::Outlined);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_serializes_to_toml() {
        let text = toml::to_string_pretty(&DogvisionConfig::default()).unwrap();
        assert!(text.contains("[camera]"));
        assert!(text.contains("initial_mode = \"split\""));
        assert!(text.contains("rotation = \"clockwise\""));
    }
}
