use super::EventSource;
use crate::error::{InputError, Result};
use crate::mode::InputEvent;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Translate a terminal key press into an input event
pub fn map_key_event(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char(c) => Some(InputEvent::KeyPress(c)),
        _ => None,
    }
}

/// Key presses from the controlling terminal, read in raw mode
pub struct KeyboardEventSource {
    raw_mode: bool,
}

impl KeyboardEventSource {
    /// Put the terminal in raw mode; restored when the source is dropped
    pub fn new() -> Result<Self> {
        enable_raw_mode().map_err(|e| {
            InputError::Terminal(format!("Failed to enable raw mode for keyboard input: {}", e))
        })?;
        info!("Keyboard input active - 1/2/3 select a mode, q or Esc quits");

        Ok(Self { raw_mode: true })
    }
}

impl EventSource for KeyboardEventSource {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => {
                        if let Some(mapped) = map_key_event(&key) {
                            debug!("Key pressed: {:?}", key.code);
                            events.push(mapped);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Error reading keyboard event: {}", e);
                        break;
                    }
                },
                Ok(false) => break,
                Err(e) => {
                    warn!("Error polling for keyboard events: {}", e);
                    break;
                }
            }
        }

        events
    }

    fn name(&self) -> &str {
        "keyboard"
    }
}

impl Drop for KeyboardEventSource {
    fn drop(&mut self) {
        if self.raw_mode {
            if let Err(e) = disable_raw_mode() {
                error!("Failed to disable raw mode: {}", e);
            } else {
                debug!("Raw mode disabled");
            }
            self.raw_mode = false;
        }
    }
}
