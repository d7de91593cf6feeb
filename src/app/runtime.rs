use super::{DogvisionApp, ShutdownReason};
use crate::error::{DogvisionError, Result};
use crate::render::LoopSummary;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

impl DogvisionApp {
    /// Open the components and run the render loop on a blocking thread until it exits
    pub async fn run(&self) -> Result<LoopSummary> {
        info!("Dog vision is running");

        let components = self.open_components()?;
        let render_loop = components.into_render_loop(self.config.render.stats_interval_frames);

        self.setup_signal_handlers();

        let result = tokio::task::spawn_blocking(move || render_loop.run()).await;

        // Stop the signal handler tasks
        self.cancellation_token.cancel();

        let summary = result.map_err(|e| {
            if e.is_panic() {
                error!("Render loop panicked");
                DogvisionError::component("render", "render loop panicked")
            } else {
                DogvisionError::system(format!("Render task failed: {}", e))
            }
        })?;

        info!(
            "Shutdown complete: {:?}, final mode {}",
            ShutdownReason::from(summary.exit),
            summary.final_mode
        );
        Ok(summary)
    }

    /// Cancel the shutdown token on SIGINT or SIGTERM
    fn setup_signal_handlers(&self) {
        // Handle SIGTERM (systemd stop) - Unix only
        #[cfg(unix)]
        {
            let token = self.cancellation_token.clone();
            tokio::spawn(async move {
                let sigterm = signal::unix::signal(signal::unix::SignalKind::terminate());
                let mut sigterm = match sigterm {
                    Ok(sigterm) => sigterm,
                    Err(e) => {
                        error!("Failed to register SIGTERM handler: {}", e);
                        return;
                    }
                };

                tokio::select! {
                    Some(()) = sigterm.recv() => {
                        request_shutdown(&token, ShutdownReason::Signal("SIGTERM".to_string()));
                    }
                    _ = token.cancelled() => {}
                }
            });
        }

        // Handle SIGINT (Ctrl+C) - Cross-platform
        let token = self.cancellation_token.clone();
        tokio::spawn(async move {
            tokio::select! {
                Ok(()) = signal::ctrl_c() => {
                    request_shutdown(&token, ShutdownReason::Signal("SIGINT".to_string()));
                }
                _ = token.cancelled() => {}
            }
        });
    }
}

fn request_shutdown(token: &CancellationToken, reason: ShutdownReason) {
    info!("Shutdown requested: {:?}", reason);
    token.cancel();
}
