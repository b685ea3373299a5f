// file: src/pipeline/progress.rs
// description: progress bar for the synchronization and repair passes
// reference: uses indicatif for progress bars

use indicatif::{ProgressBar, ProgressStyle};
use std::borrow::Cow;

pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    pub fn new(total: usize, colored: bool) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(progress_style(colored));
        Self { bar }
    }

    /// Tracks position without drawing anything.
    pub fn hidden(total: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total as u64);
        Self { bar }
    }

    pub fn set_length(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    pub fn set_message(&self, message: impl Into<Cow<'static, str>>) {
        self.bar.set_message(message);
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self, message: &'static str) {
        self.bar.finish_with_message(message);
    }
}

fn progress_style(colored: bool) -> ProgressStyle {
    let (template, chars) = if colored {
        (
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            "█▓▒░",
        )
    } else {
        ("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}", "=>-")
    };

    ProgressStyle::default_bar()
        .template(template)
        .map(|style| style.progress_chars(chars))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
