//! Progress reporting for the acquisition pipeline.
//!
//! Components never write to the console themselves; they report through an
//! injected sink so callers decide how (and whether) progress is shown.

pub trait ProgressSink: Send + Sync {
    /// A major pipeline step has started.
    fn step(&self, message: &str);

    /// Supplementary detail about the current step.
    fn detail(&self, message: &str);
}

/// Sink that discards everything. Used in tests and by embedding callers
/// that do not want console output.
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn step(&self, _message: &str) {}
    fn detail(&self, _message: &str) {}
}
