mod pacer;
mod render_loop;
mod session;

pub use pacer::{FramePacer, SleepPacer};
pub use render_loop::{FramePipeline, LoopExit, LoopSummary, RenderLoop};
pub use session::Session;
