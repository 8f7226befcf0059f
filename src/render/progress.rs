/// Receives `(percent, status)` progress events while a document is written.
///
/// Reporting is purely observational; implementations must not fail.
pub trait ProgressReporter {
    fn report(&mut self, percent: u8, status: &str);
}

/// Writes progress through the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&mut self, percent: u8, status: &str) {
        log::debug!("[{:>3}%] {}", percent, status);
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _percent: u8, _status: &str) {}
}

impl<F> ProgressReporter for F
where
    F: FnMut(u8, &str),
{
    fn report(&mut self, percent: u8, status: &str) {
        self(percent, status)
    }
}

/// Percentage of `done` out of `total`, rounded down and capped at 99 so
/// that 100 is reserved for completion.
pub(crate) fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 99;
    }
    ((done * 100) / total).min(99) as u8
}
