use crate::render::LoopExit;

/// Why the application stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    Signal(String),
    UserRequest,
    CaptureFailed,
}

impl From<LoopExit> for ShutdownReason {
    fn from(exit: LoopExit) -> Self {
        match exit {
            LoopExit::Quit => ShutdownReason::UserRequest,
            LoopExit::CaptureFailed => ShutdownReason::CaptureFailed,
        }
    }
}
