// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for pipeline execution
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub lines_read: usize,
    pub records_parsed: usize,
    pub lines_skipped: usize,
    pub missing_timestamps: usize,
    pub external_lookups: usize,
    pub failed_lookups: usize,
    pub cache_hits: usize,
    pub organizations: usize,
    pub duration_secs: f64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_success_rate(&self) -> f64 {
        if self.lines_read == 0 {
            return 0.0;
        }
        (self.records_parsed as f64 / self.lines_read as f64) * 100.0
    }

    pub fn lines_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.lines_read as f64 / self.duration_secs
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_lines: usize) -> Self {
        Self::with_color(total_lines, true)
    }

    pub fn with_color(total_lines: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();
        Self::build(&multi_progress, total_lines, colored)
    }

    /// Tracker that counts but never draws.
    pub fn hidden(total_lines: usize) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        Self::build(&multi_progress, total_lines, false)
    }

    fn build(multi_progress: &MultiProgress, total_lines: usize, colored: bool) -> Self {
        let main_bar = create_progress_bar(multi_progress, total_lines as u64, colored);
        let detail_bar = create_detail_bar(multi_progress);

        Self {
            main_bar,
            detail_bar,
            start_time: Instant::now(),
        }
    }

    pub fn inc_lines_read(&self) {
        self.main_bar.inc(1);
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.detail_bar.set_message(message.into());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Scoring complete");
        self.detail_bar.finish_and_clear();
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} lines {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}
