use super::EventSource;
use crate::mode::InputEvent;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Merges several sources and turns a shutdown signal into a `Quit` event
pub struct CompositeEventSource {
    sources: Vec<Box<dyn EventSource>>,
    shutdown: Option<CancellationToken>,
    quit_sent: bool,
}

impl CompositeEventSource {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            shutdown: None,
            quit_sent: false,
        }
    }

    pub fn with_source(mut self, source: Box<dyn EventSource>) -> Self {
        self.push(source);
        self
    }

    pub fn push(&mut self, source: Box<dyn EventSource>) {
        debug!("Adding input source: {}", source.name());
        self.sources.push(source);
    }

    /// Emit `Quit` once the token is cancelled
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for CompositeEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CompositeEventSource {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = self
            .sources
            .iter_mut()
            .flat_map(|source| source.poll_events())
            .collect();

        let cancelled = self
            .shutdown
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled);
        if cancelled && !self.quit_sent {
            info!("Shutdown signal received, requesting quit");
            self.quit_sent = true;
            events.push(InputEvent::Quit);
        }

        events
    }

    fn name(&self) -> &str {
        "composite"
    }
}
