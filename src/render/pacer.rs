use std::thread;
use std::time::{Duration, Instant};
use tracing::trace;

/// Holds the loop to a target iteration rate
pub trait FramePacer: Send {
    /// Called once at the end of every iteration
    fn tick(&mut self);
}

impl<P: FramePacer + ?Sized> FramePacer for Box<P> {
    fn tick(&mut self) {
        (**self).tick()
    }
}

/// Sleeps away whatever is left of the frame budget since the previous tick
#[derive(Debug)]
pub struct SleepPacer {
    budget: Duration,
    last_tick: Option<Instant>,
    overruns: u64,
}

impl SleepPacer {
    pub fn new(target_fps: u32) -> Self {
        let budget = Duration::from_secs(1) / target_fps.max(1);
        Self {
            budget,
            last_tick: None,
            overruns: 0,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Iterations that took longer than the budget
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Time still to wait when `elapsed` of the budget is used up
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }
}

impl FramePacer for SleepPacer {
    fn tick(&mut self) {
        if let Some(last) = self.last_tick {
            let remaining = self.remaining(last.elapsed());
            if remaining.is_zero() {
                self.overruns += 1;
                trace!("Frame overran its {:?} budget", self.budget);
            } else {
                thread::sleep(remaining);
            }
        }
        self.last_tick = Some(Instant::now());
    }
}
