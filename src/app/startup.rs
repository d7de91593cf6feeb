use super::DogvisionApp;
use crate::camera::{open_capture_device, CaptureDevice};
use crate::display::{open_display_surface, DisplaySurface};
use crate::error::Result;
use crate::input::{spawn_stdin_listener, CompositeEventSource, KeyboardEventSource, TouchListener};
use crate::mode::ModeController;
use crate::render::{FramePipeline, RenderLoop, Session, SleepPacer};
use tracing::{error, info, warn};

/// Everything the render loop owns for one run
pub struct Components {
    pub camera: Box<dyn CaptureDevice>,
    pub surface: Box<dyn DisplaySurface>,
    pub events: CompositeEventSource,
    pub controller: ModeController,
    pub pipeline: FramePipeline,
    pub pacer: SleepPacer,
}

impl Components {
    pub fn into_render_loop(
        self,
        stats_interval: u64,
    ) -> RenderLoop<
        Box<dyn CaptureDevice>,
        Box<dyn DisplaySurface>,
        CompositeEventSource,
        SleepPacer,
    > {
        RenderLoop::new(
            self.camera,
            self.surface,
            self.events,
            self.pacer,
            self.pipeline,
            self.controller,
        )
        .with_stats_interval(stats_interval)
    }

    /// Release the camera and close the surface without rendering
    pub fn close(self) {
        Session::new(self.camera, self.surface).finish();
    }
}

impl DogvisionApp {
    /// Open the camera, display surface and input sources.
    ///
    /// Camera and display failures are fatal; an unavailable touch device only disables touch.
    pub fn open_components(&self) -> Result<Components> {
        info!("Opening dog vision components");

        let mut camera = open_capture_device(&self.config.camera).map_err(|e| {
            error!("Failed to open capture device: {}", e);
            e
        })?;

        let pipeline = FramePipeline::from_config(&self.config);
        let (width, height) = camera.frame_size();
        let frame_size = pipeline.transformer.output_size(width, height);

        let surface = match open_display_surface(
            &self.config.display,
            frame_size,
            self.config.render.target_fps,
        ) {
            Ok(surface) => surface,
            Err(e) => {
                error!("Failed to open display surface: {}", e);
                camera.release();
                return Err(e);
            }
        };

        let events = match self.open_event_sources(surface.size()) {
            Ok(events) => events,
            Err(e) => {
                error!("Failed to open input sources: {}", e);
                Session::new(camera, surface).finish();
                return Err(e);
            }
        };

        let controller = ModeController::from_config(&self.config.input, surface.size())
            .with_mailbox(self.mailbox.clone());

        info!(
            "Components ready: {} camera {}x{}, {} surface {}x{}, {} input sources",
            camera.name(),
            width,
            height,
            surface.name(),
            surface.size().0,
            surface.size().1,
            events.len()
        );

        Ok(Components {
            camera,
            surface,
            events,
            controller,
            pipeline,
            pacer: SleepPacer::new(self.config.render.target_fps),
        })
    }

    fn open_event_sources(&self, display_size: (u32, u32)) -> Result<CompositeEventSource> {
        let input = &self.config.input;
        let mut events = CompositeEventSource::new().with_shutdown(self.cancellation_token.clone());

        if input.keyboard {
            events.push(Box::new(KeyboardEventSource::new()?));
        }

        if input.touch {
            match TouchListener::spawn(&input.touch_device, display_size) {
                Ok(source) => events.push(Box::new(source)),
                Err(e) => warn!("Touch input unavailable, continuing without it: {}", e),
            }
        }

        if input.stdin_listener {
            match spawn_stdin_listener(self.mailbox.clone(), input.mode_set()) {
                // Never joined; the thread is abandoned at exit
                Ok(_handle) => {}
                Err(e) => warn!("Failed to start stdin mode listener: {}", e),
            }
        }

        Ok(events)
    }

    /// Open and immediately release every component
    pub fn dry_run(&self) -> Result<()> {
        let components = self.open_components()?;
        components.close();
        info!("Dry run complete - all components opened and released");
        Ok(())
    }
}
