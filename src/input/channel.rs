use super::EventSource;
use crate::mode::InputEvent;
use crossbeam::channel::{unbounded, Receiver, Sender, TryRecvError};
use tracing::debug;

/// Events pushed by a background thread, drained without blocking
#[derive(Debug)]
pub struct ChannelEventSource {
    name: String,
    receiver: Receiver<InputEvent>,
    disconnected: bool,
}

impl ChannelEventSource {
    pub fn new(name: impl Into<String>, receiver: Receiver<InputEvent>) -> Self {
        Self {
            name: name.into(),
            receiver,
            disconnected: false,
        }
    }

    /// Source plus the sender a producer thread feeds
    pub fn pair(name: impl Into<String>) -> (Sender<InputEvent>, Self) {
        let (sender, receiver) = unbounded();
        (sender, Self::new(name, receiver))
    }

    /// Whether every producer has gone away
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl EventSource for ChannelEventSource {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        debug!("{} event producer disconnected", self.name);
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
        events
    }

    fn name(&self) -> &str {
        &self.name
    }
}
