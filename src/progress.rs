// src/progress.rs
/// Step reporting for a sync run. Frontends (GUI/CLI) implement this to
/// surface status to users.
pub trait Progress {
    /// Called once with the number of steps the run will take.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one step completes.
    fn step_done(&mut self, _step: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects every message; handy for tests and the CLI's verbose mode.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub total: usize,
    pub messages: Vec<String>,
    pub done: Vec<usize>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn log(&mut self, msg: &str) { self.messages.push(msg.to_string()); }
    fn step_done(&mut self, step: usize) { self.done.push(step); }
    fn finish(&mut self) { self.finished = true; }
}
