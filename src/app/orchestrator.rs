use crate::config::DogvisionConfig;
use crate::error::Result;
use crate::mode::ModeMailbox;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Top-level coordinator: opens the camera, display and input sources from
/// configuration and drives the render loop until quit, signal or capture failure
pub struct DogvisionApp {
    pub(super) config: DogvisionConfig,
    pub(super) mailbox: ModeMailbox,
    pub(super) cancellation_token: CancellationToken,
}

impl DogvisionApp {
    /// Validate the configuration and prepare the shared handles. No device is opened yet.
    pub fn new(config: DogvisionConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "Application configured: {:?} camera, {:?} display",
            config.camera.source, config.display.backend
        );
        info!(
            "Dog vision initialised in {} mode ({} target fps)",
            config.input.initial_mode, config.render.target_fps
        );

        Ok(Self {
            config,
            mailbox: ModeMailbox::new(),
            cancellation_token: CancellationToken::new(),
        })
    }

    pub fn config(&self) -> &DogvisionConfig {
        &self.config
    }

    /// Mailbox for mode requests from outside the render thread
    pub fn mailbox(&self) -> ModeMailbox {
        self.mailbox.clone()
    }

    /// Cancelling this token stops the render loop at the end of its current iteration
    pub fn shutdown_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }
}
