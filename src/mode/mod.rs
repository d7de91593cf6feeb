mod controller;
mod mailbox;
mod types;

pub use controller::{ModeController, ModeSet, PointerPolicy, Transition};
pub use mailbox::ModeMailbox;
pub use types::{InputEvent, Mode};
