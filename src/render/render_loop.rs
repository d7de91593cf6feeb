use super::{FramePacer, Session};
use crate::camera::CaptureDevice;
use crate::compositor::{Region, RegionCompositor, SplitAxis, SplitBoundary};
use crate::config::DogvisionConfig;
use crate::display::{DisplayConverter, DisplaySurface, OverlayRenderer, RenderStats, BLACK};
use crate::frame::{ChannelOrder, Frame};
use crate::input::EventSource;
use crate::mode::{Mode, ModeController, Transition};
use crate::transform::FrameTransformer;
use std::time::Instant;
use tracing::{error, info, trace, warn};

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Quit event or shutdown signal
    Quit,
    /// Capture device stopped delivering frames
    CaptureFailed,
}

impl LoopExit {
    pub fn exit_code(&self) -> i32 {
        match self {
            LoopExit::Quit => 0,
            LoopExit::CaptureFailed => 1,
        }
    }
}

/// Result of a finished run
#[derive(Debug, Clone)]
pub struct LoopSummary {
    pub exit: LoopExit,
    pub final_mode: Mode,
    pub stats: RenderStats,
}

/// Per-frame processing shared by every iteration
pub struct FramePipeline {
    pub transformer: FrameTransformer,
    pub compositor: RegionCompositor,
    pub overlay: OverlayRenderer,
    /// Stretch frames to the surface instead of drawing them at the top-left corner
    pub scale_to_fit: bool,
}

impl FramePipeline {
    pub fn from_config(config: &DogvisionConfig) -> Self {
        Self {
            transformer: FrameTransformer::from_config(&config.transform),
            compositor: RegionCompositor::from_config(&config.split, &config.filter),
            overlay: OverlayRenderer::from_config(&config.overlay, config.input.mode_set()),
            scale_to_fit: config.display.scale_to_fit,
        }
    }
}

/// Capture, filter and present frames until quit or capture failure
pub struct RenderLoop<C, S, E, P>
where
    C: CaptureDevice,
    S: DisplaySurface,
    E: EventSource,
    P: FramePacer,
{
    session: Session<C, S>,
    events: E,
    pacer: P,
    pipeline: FramePipeline,
    controller: ModeController,
    stats: RenderStats,
    stats_interval: u64,
}

impl<C, S, E, P> RenderLoop<C, S, E, P>
where
    C: CaptureDevice,
    S: DisplaySurface,
    E: EventSource,
    P: FramePacer,
{
    pub fn new(
        camera: C,
        surface: S,
        events: E,
        pacer: P,
        pipeline: FramePipeline,
        mut controller: ModeController,
    ) -> Self {
        let session = Session::new(camera, surface);
        controller.set_display_size(session.surface_size());

        Self {
            session,
            events,
            pacer,
            pipeline,
            controller,
            stats: RenderStats::default(),
            stats_interval: 0,
        }
    }

    /// Log statistics every `frames` frames (0 disables)
    pub fn with_stats_interval(mut self, frames: u64) -> Self {
        self.stats_interval = frames;
        self
    }

    pub fn controller(&self) -> &ModeController {
        &self.controller
    }

    /// Run to completion. The camera and surface are released on return or unwind.
    pub fn run(mut self) -> LoopSummary {
        info!(
            "Render loop started in {} mode on a {}x{} surface",
            self.controller.mode(),
            self.session.surface_size().0,
            self.session.surface_size().1
        );

        let exit = loop {
            if let Some(exit) = self.iterate() {
                break exit;
            }
        };

        self.session.finish();
        self.stats.log_summary("Render loop finished");
        info!("Render loop exited: {:?}", exit);

        LoopSummary {
            exit,
            final_mode: self.controller.mode(),
            stats: self.stats.clone(),
        }
    }

    /// One pass of the pipeline. `Some` ends the loop.
    fn iterate(&mut self) -> Option<LoopExit> {
        let started = Instant::now();

        let frame = match self.session.camera().read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                error!("Frame capture failed, stopping: {}", e);
                return Some(LoopExit::CaptureFailed);
            }
        };

        let transformed = self.pipeline.transformer.apply(&frame);
        let mode = self.controller.current();
        let composed = self.pipeline.compositor.apply(&transformed, mode);

        match self.draw(&composed, mode) {
            Ok(()) => {
                self.stats.record_frame_render(started.elapsed());
                let interval = self.stats_interval;
                if interval > 0 && self.stats.frames_rendered % interval == 0 {
                    self.stats.log_summary("Render stats");
                }
            }
            Err(e) => {
                warn!("Failed to render frame {}: {}", composed.id, e);
                self.stats.record_render_error();
            }
        }

        for event in self.events.poll_events() {
            self.stats.record_input_event();
            match self.controller.handle(&event) {
                Transition::Quit => return Some(LoopExit::Quit),
                Transition::Changed { .. } => self.stats.record_mode_change(),
                Transition::Unchanged(_) | Transition::Ignored => {}
            }
        }

        self.pacer.tick();
        None
    }

    /// Convert, blit, overlay and present one composed frame
    fn draw(&mut self, composed: &Frame, mode: Mode) -> crate::error::Result<()> {
        let display_frame = DisplayConverter::to_display_order(composed, ChannelOrder::Rgb)?;
        let canvas_size = self.session.surface_size();
        let frame_size = (display_frame.width, display_frame.height);

        let placed = if self.pipeline.scale_to_fit {
            DisplayConverter::fit_frame(&display_frame, canvas_size)?
        } else {
            display_frame
        };
        let placed_size = (placed.width, placed.height);

        let boundary = self
            .pipeline
            .compositor
            .boundary(frame_size.0, frame_size.1, mode)
            .map(|b| scale_boundary(b, frame_size, placed_size));
        let regions: Vec<Region> = self
            .pipeline
            .compositor
            .regions(frame_size.0, frame_size.1, mode)
            .into_iter()
            .map(|r| scale_region(r, frame_size, placed_size))
            .collect();

        let surface = self.session.surface();
        let canvas = surface.canvas_mut();
        if placed_size != canvas_size {
            canvas.clear(BLACK);
        }
        canvas.blit(&placed, (0, 0));
        self.pipeline.overlay.draw(canvas, mode, boundary, &regions);

        trace!("Presenting frame {} in {} mode", placed.id, mode);
        surface.present()
    }
}

fn scale_boundary(boundary: SplitBoundary, from: (u32, u32), to: (u32, u32)) -> SplitBoundary {
    let index = match boundary.axis {
        SplitAxis::Rows => DisplayConverter::scale_coordinate(boundary.index, from.1, to.1),
        SplitAxis::Columns => DisplayConverter::scale_coordinate(boundary.index, from.0, to.0),
    };
    SplitBoundary { index, ..boundary }
}

fn scale_region(region: Region, from: (u32, u32), to: (u32, u32)) -> Region {
    if from == to {
        return region;
    }

    let x = DisplayConverter::scale_coordinate(region.x, from.0, to.0);
    let y = DisplayConverter::scale_coordinate(region.y, from.1, to.1);
    let right = DisplayConverter::scale_coordinate(region.x + region.width, from.0, to.0);
    let bottom = DisplayConverter::scale_coordinate(region.y + region.height, from.1, to.1);

    Region {
        x,
        y,
        width: right - x,
        height: bottom - y,
        filtered: region.filtered,
    }
}
