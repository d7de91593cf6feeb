use super::{InputEvent, Mode, ModeMailbox};
use crate::config::InputConfig;
use tracing::{debug, info};

/// Modes reachable by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSet {
    /// Human, dog and split, keys 1/2/3
    Three,
    /// On/off form: key 1 is human, key 2 is `dog`
    Two { dog: Mode },
}

impl ModeSet {
    pub fn contains(&self, mode: Mode) -> bool {
        match self {
            ModeSet::Three => true,
            ModeSet::Two { dog } => mode == Mode::HumanOnly || mode == *dog,
        }
    }

    /// Mode selected by a key, if the key selects one in this set
    pub fn key_mode(&self, key: char) -> Option<Mode> {
        match (self, key) {
            (ModeSet::Three, key) => Mode::from_digit(key),
            (ModeSet::Two { .. }, '1') => Some(Mode::HumanOnly),
            (ModeSet::Two { dog }, '2') => Some(*dog),
            (ModeSet::Two { .. }, _) => None,
        }
    }

    /// Successor in the tap cycle
    pub fn next(&self, mode: Mode) -> Mode {
        match self {
            ModeSet::Three => mode.next(),
            ModeSet::Two { dog } => {
                if mode == Mode::HumanOnly {
                    *dog
                } else {
                    Mode::HumanOnly
                }
            }
        }
    }
}

/// How a pointer press changes the mode. One policy per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPolicy {
    /// Any press advances to the next mode
    Cycle,
    /// Presses left of the horizontal midpoint select `left`, others `right`
    Halves { left: Mode, right: Mode },
}

/// Outcome of handing one event to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed { from: Mode, to: Mode },
    /// Event selected the mode already active
    Unchanged(Mode),
    /// Event not recognised, out of range, or arrived after quit
    Ignored,
    Quit,
}

/// Owns the active display mode and moves it in response to input
#[derive(Debug)]
pub struct ModeController {
    mode: Mode,
    modes: ModeSet,
    policy: PointerPolicy,
    display_size: (u32, u32),
    terminated: bool,
    mailbox: Option<ModeMailbox>,
}

impl ModeController {
    pub fn new(
        initial: Mode,
        modes: ModeSet,
        policy: PointerPolicy,
        display_size: (u32, u32),
    ) -> Self {
        let mode = if modes.contains(initial) {
            initial
        } else {
            Mode::HumanOnly
        };

        Self {
            mode,
            modes,
            policy,
            display_size,
            terminated: false,
            mailbox: None,
        }
    }

    pub fn from_config(config: &InputConfig, display_size: (u32, u32)) -> Self {
        Self::new(
            config.initial_mode,
            config.mode_set(),
            config.pointer_policy(),
            display_size,
        )
    }

    /// Accept mode requests from a background listener
    pub fn with_mailbox(mut self, mailbox: ModeMailbox) -> Self {
        self.mailbox = Some(mailbox);
        self
    }

    /// Active mode after applying any pending background request
    pub fn current(&mut self) -> Mode {
        if self.terminated {
            return self.mode;
        }

        if let Some(requested) = self.mailbox.as_ref().and_then(ModeMailbox::take) {
            if self.modes.contains(requested) {
                self.set_mode(requested);
            } else {
                debug!("Ignoring background request for unreachable mode {:?}", requested);
            }
        }

        self.mode
    }

    /// Active mode without draining the mailbox
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mode_set(&self) -> ModeSet {
        self.modes
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Update the area pointer coordinates refer to
    pub fn set_display_size(&mut self, size: (u32, u32)) {
        self.display_size = size;
    }

    /// Apply one input event
    pub fn handle(&mut self, event: &InputEvent) -> Transition {
        if self.terminated {
            return Transition::Ignored;
        }

        match *event {
            InputEvent::Quit => self.quit(),
            InputEvent::KeyPress(key) if key.eq_ignore_ascii_case(&'q') => self.quit(),
            InputEvent::KeyPress(key) => match self.modes.key_mode(key) {
                Some(mode) => self.set_mode(mode),
                None => {
                    debug!("Ignoring key {:?}", key);
                    Transition::Ignored
                }
            },
            InputEvent::PointerDown { x, y } => {
                let (width, height) = self.display_size;
                let in_range = x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height;
                if !in_range {
                    debug!(
                        "Ignoring pointer press at ({}, {}) outside {}x{}",
                        x, y, width, height
                    );
                    return Transition::Ignored;
                }

                let target = match self.policy {
                    PointerPolicy::Cycle => self.modes.next(self.mode),
                    PointerPolicy::Halves { left, right } => {
                        if (x as u32) < width / 2 {
                            left
                        } else {
                            right
                        }
                    }
                };
                self.set_mode(target)
            }
        }
    }

    fn quit(&mut self) -> Transition {
        info!("Quit requested");
        self.terminated = true;
        Transition::Quit
    }

    fn set_mode(&mut self, mode: Mode) -> Transition {
        let from = self.mode;
        if from == mode {
            return Transition::Unchanged(mode);
        }

        self.mode = mode;
        info!("Display mode changed: {} -> {}", from, mode);
        Transition::Changed { from, to: mode }
    }
}
