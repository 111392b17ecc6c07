use tracing::debug;

/// Prints the periodic `Sent N requests...` line unless `--quiet` is set.
pub(crate) struct ProgressReporter {
    quiet: bool,
    total: u64,
}

impl ProgressReporter {
    pub(crate) const fn new(quiet: bool, total: u64) -> Self {
        Self { quiet, total }
    }

    pub(crate) fn report(&self, sent: u64) {
        debug!("Progress: {}/{}", sent, self.total);
        if let Some(line) = self.line(sent) {
            println!("{}", line);
        }
    }

    pub(crate) fn line(&self, sent: u64) -> Option<String> {
        if self.quiet {
            return None;
        }
        Some(format!("Sent {} requests...", sent))
    }
}
