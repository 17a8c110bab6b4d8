//! Per-item progress reporting for batch conversions

use std::fmt;

/// Which item of a batch is being processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress<'a> {
    /// 1-based position in the batch
    pub index: usize,
    pub total: usize,
    pub file_name: &'a str,
}

impl fmt::Display for Progress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/{}): {}", self.index, self.total, self.file_name)
    }
}

pub trait ProgressReporter {
    fn report(&mut self, progress: Progress<'_>);
}

impl<F: FnMut(Progress<'_>)> ProgressReporter for F {
    fn report(&mut self, progress: Progress<'_>) {
        self(progress)
    }
}

/// Reports progress through the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&mut self, progress: Progress<'_>) {
        tracing::info!("Processing {}", progress);
    }
}

/// Discards progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _progress: Progress<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let progress = Progress {
            index: 2,
            total: 5,
            file_name: "あ.png",
        };
        assert_eq!(progress.to_string(), "(2/5): あ.png");
    }

    #[test]
    fn test_closures_are_reporters() {
        let mut seen = Vec::new();
        {
            let mut reporter = |progress: Progress<'_>| seen.push(progress.index);
            reporter.report(Progress {
                index: 1,
                total: 1,
                file_name: "A.png",
            });
        }
        assert_eq!(seen, vec![1]);
    }
}
