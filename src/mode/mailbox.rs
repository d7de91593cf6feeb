use super::Mode;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const EMPTY: u8 = 0;

/// Single-slot cell through which a background listener hands a mode to the render loop.
///
/// The slot holds one `Mode` tag; writers overwrite, the controller takes. Reads and
/// writes are single atomic operations, so a half-written mode is never observed.
#[derive(Debug, Clone, Default)]
pub struct ModeMailbox {
    slot: Arc<AtomicU8>,
}

impl ModeMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a mode; replaces any request not yet taken
    pub fn post(&self, mode: Mode) {
        self.slot.store(mode.to_tag(), Ordering::Release);
    }

    /// Take the pending request, leaving the slot empty
    pub fn take(&self) -> Option<Mode> {
        Mode::from_tag(self.slot.swap(EMPTY, Ordering::AcqRel))
    }

    pub fn is_empty(&self) -> bool {
        self.slot.load(Ordering::Acquire) == EMPTY
    }
}
