use std::time::{Duration, SystemTime};
use tracing::info;

/// Render loop statistics
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    pub frames_rendered: u64,
    pub render_errors: u64,
    pub input_events: u64,
    pub mode_changes: u64,
    pub total_frame_time: Duration,
    pub last_frame_time: Option<SystemTime>,
}

impl RenderStats {
    pub fn record_frame_render(&mut self, elapsed: Duration) {
        self.frames_rendered += 1;
        self.total_frame_time += elapsed;
        self.last_frame_time = Some(SystemTime::now());
    }

    pub fn record_render_error(&mut self) {
        self.render_errors += 1;
        self.last_frame_time = Some(SystemTime::now());
    }

    pub fn record_input_event(&mut self) {
        self.input_events += 1;
    }

    pub fn record_mode_change(&mut self) {
        self.mode_changes += 1;
    }

    /// Mean time spent on one frame, excluding the pacing sleep
    pub fn average_frame_time(&self) -> Duration {
        if self.frames_rendered == 0 {
            Duration::ZERO
        } else {
            self.total_frame_time / self.frames_rendered as u32
        }
    }

    pub fn render_success_rate(&self) -> f64 {
        let attempts = self.frames_rendered + self.render_errors;
        if attempts == 0 {
            0.0
        } else {
            self.frames_rendered as f64 / attempts as f64
        }
    }

    pub fn log_summary(&self, label: &str) {
        info!(
            "{}: {} frames, {} render errors, {} input events, {} mode changes, \
             avg frame time {:.1} ms",
            label,
            self.frames_rendered,
            self.render_errors,
            self.input_events,
            self.mode_changes,
            self.average_frame_time().as_secs_f64() * 1000.0
        );
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
