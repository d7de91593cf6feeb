pub mod app;
pub mod camera;
pub mod compositor;
pub mod config;
pub mod display;
pub mod error;
pub mod filter;
pub mod frame;
pub mod input;
pub mod mode;
pub mod render;
pub mod transform;

pub use app::{Components, DogvisionApp, ShutdownReason};
pub use camera::{open_capture_device, CaptureDevice, SyntheticCamera};
pub use compositor::{FilteredSide, Region, RegionCompositor, SplitAxis, SplitBoundary};
pub use config::DogvisionConfig;
pub use display::{
    open_display_surface, DisplaySurface, HeadlessSurface, OverlayRenderer, RenderStats,
};
pub use error::{DogvisionError, Result};
pub use filter::{BandPreset, ColorFilter, FilterParameters, PreBlur};
pub use frame::{ChannelOrder, FlipAxes, Frame, FrameMeta, RotationDirection};
pub use input::{CompositeEventSource, EventSource, ScriptedEventSource};
pub use mode::{InputEvent, Mode, ModeController, ModeMailbox, ModeSet, PointerPolicy, Transition};
pub use render::{FramePacer, LoopExit, LoopSummary, RenderLoop, Session, SleepPacer};
pub use transform::{FrameTransformer, InverseTransformer};
