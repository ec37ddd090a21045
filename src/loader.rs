// Timed loader messages shown while the scene starts up.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderStep {
    Show(&'static str),
    Hide,
}

#[derive(Clone, Copy, Debug)]
pub struct LoaderSequence {
    messages: &'static [&'static str],
    step_ms: u32,
}

impl LoaderSequence {
    pub const fn new(messages: &'static [&'static str], step_ms: u32) -> Self {
        Self { messages, step_ms }
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }

    /// Time after which the loader is hidden.
    pub fn total_ms(&self) -> u32 {
        self.step_ms * self.messages.len() as u32
    }

    /// What to show after `tick` intervals; tick 0 is the initial message.
    pub fn step(&self, tick: usize) -> LoaderStep {
        match self.messages.get(tick) {
            Some(m) => LoaderStep::Show(*m),
            None => LoaderStep::Hide,
        }
    }

    pub fn at_elapsed(&self, elapsed_ms: f64) -> LoaderStep {
        if self.step_ms == 0 || elapsed_ms.is_nan() || elapsed_ms < 0.0 {
            return self.step(0);
        }
        self.step((elapsed_ms / self.step_ms as f64).floor() as usize)
    }
}
