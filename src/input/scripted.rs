use super::EventSource;
use crate::mode::InputEvent;
use std::collections::VecDeque;

/// Replays pre-recorded batches, one batch per poll
#[derive(Debug, Clone, Default)]
pub struct ScriptedEventSource {
    batches: VecDeque<Vec<InputEvent>>,
    polls: usize,
}

impl ScriptedEventSource {
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<InputEvent>>,
    {
        Self {
            batches: batches.into_iter().collect(),
            polls: 0,
        }
    }

    /// `idle` empty polls followed by a single `Quit`
    pub fn quit_after(idle: usize) -> Self {
        let mut batches = vec![Vec::new(); idle];
        batches.push(vec![InputEvent::Quit]);
        Self::new(batches)
    }

    /// Number of times the source has been polled
    pub fn polls(&self) -> usize {
        self.polls
    }

    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl EventSource for ScriptedEventSource {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.polls += 1;
        self.batches.pop_front().unwrap_or_default()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
