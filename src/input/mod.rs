//! Input event sources polled by the render loop.
//!
//! Every source is non-blocking: `poll_events` returns whatever is pending, in
//! arrival order, and an empty vector when nothing is.

mod channel;
mod composite;
mod keyboard;
mod scripted;
mod stdin;
mod touch;

pub use channel::ChannelEventSource;
pub use composite::CompositeEventSource;
pub use keyboard::{map_key_event, KeyboardEventSource};
pub use scripted::ScriptedEventSource;
pub use stdin::{listen_for_modes, parse_mode_line, spawn_stdin_listener};
pub use touch::{AxisRange, TouchCalibration, TouchListener, TouchTracker};

use crate::mode::InputEvent;

/// Non-blocking source of input events
pub trait EventSource: Send {
    /// Drain all pending events, oldest first
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Short name for logs
    fn name(&self) -> &str {
        "input"
    }
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        (**self).poll_events()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
