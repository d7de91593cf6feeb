use serde::{Deserialize, Serialize};

/// What the screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Unfiltered camera image
    HumanOnly,
    /// Whole frame filtered
    DogOnly,
    /// One region filtered, the other untouched
    Split,
}

impl Mode {
    /// Next mode in the tap cycle: human -> dog -> split -> human
    pub fn next(self) -> Mode {
        match self {
            Mode::HumanOnly => Mode::DogOnly,
            Mode::DogOnly => Mode::Split,
            Mode::Split => Mode::HumanOnly,
        }
    }

    /// Label shown in the status overlay
    pub fn label(self) -> &'static str {
        match self {
            Mode::HumanOnly => "Human Vision",
            Mode::DogOnly => "Dog Vision",
            Mode::Split => "Split View",
        }
    }

    pub(crate) fn to_tag(self) -> u8 {
        match self {
            Mode::HumanOnly => 1,
            Mode::DogOnly => 2,
            Mode::Split => 3,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Mode> {
        match tag {
            1 => Some(Mode::HumanOnly),
            2 => Some(Mode::DogOnly),
            3 => Some(Mode::Split),
            _ => None,
        }
    }

    /// Mode selected by a digit key, independent of the active mode set
    pub fn from_digit(key: char) -> Option<Mode> {
        match key {
            '1' => Some(Mode::HumanOnly),
            '2' => Some(Mode::DogOnly),
            '3' => Some(Mode::Split),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Discrete input consumed once by the mode controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close, Ctrl+C, SIGTERM
    Quit,
    KeyPress(char),
    /// Press position in display coordinates
    PointerDown { x: i32, y: i32 },
}
