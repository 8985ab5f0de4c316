//! ProgressReporter port
//!
//! Receives progress while definitions are compiled. Calls come from the
//! orchestrating thread only, in job completion order.

/// Trait for receiving rebuild progress
///
/// Implementations can be:
/// - ConsoleProgress: progress bar on stderr
/// - NoopProgress: silent operation
pub trait ProgressReporter {
    /// A batch of `total` units of work is starting
    fn start(&mut self, label: &str, total: u64);

    /// `n` more units are done
    fn advance(&mut self, n: u64);

    /// Attach a message without disturbing the progress display
    fn annotate(&mut self, message: &str);

    /// The batch is over
    fn finish(&mut self) {}
}

/// No-op reporter for silent operation
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn start(&mut self, _label: &str, _total: u64) {}

    fn advance(&mut self, _n: u64) {}

    fn annotate(&mut self, _message: &str) {}
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingProgress;
    use super::*;

    #[test]
    fn recording_reporter_captures_calls() {
        let mut progress = RecordingProgress::default();
        progress.start("Compiling", 3);
        progress.advance(1);
        progress.annotate("Compiled png.ksy");
        progress.advance(2);
        progress.finish();

        assert_eq!(progress.total, 3);
        assert_eq!(progress.advanced, 3);
        assert_eq!(progress.messages, vec!["Compiled png.ksy"]);
        assert!(progress.finished);
    }

    #[test]
    fn noop_reporter_is_silent() {
        let mut progress = NoopProgress;
        progress.start("Compiling", 10);
        progress.advance(10);
        progress.annotate("ignored");
        progress.finish();
    }
}
