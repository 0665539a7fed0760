use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tally_core::{ScanProgress, format_count};

/// Braille spinner characters
const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Terminal progress display fed by scan messages.
///
/// Bounded bar when the backend pre-computed a directory total, open-ended
/// spinner otherwise.
pub struct Renderer {
    bar: Option<ProgressBar>,
}

impl Renderer {
    pub fn new() -> Self {
        Self { bar: None }
    }

    pub fn start(&mut self, dir_total: Option<u64>) {
        let bar = match dir_total {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} dirs {msg}",
                        )
                        .expect("Invalid progress template")
                        .tick_chars(TICK_CHARS)
                        .progress_chars("=>-"),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} [{elapsed_precise}] {msg}")
                        .expect("Invalid progress template")
                        .tick_chars(TICK_CHARS),
                );
                bar
            }
        };
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    pub fn update(&self, progress: &ScanProgress) {
        let Some(bar) = &self.bar else { return };

        bar.set_position(progress.dirs_visited);

        let mut msg = format!(
            "{} dirs | {} files | {} matched",
            format_count(progress.dirs_visited),
            format_count(progress.files_seen),
            format_count(progress.files_matched),
        );
        if progress.dirs_skipped > 0 {
            msg.push_str(&format!(" | {} skipped", format_count(progress.dirs_skipped)));
        }
        bar.set_message(msg);
    }

    pub fn warn_skip(&self, path: &str, reason: &str) {
        match &self.bar {
            Some(bar) => bar.println(format!("warning: skipped {path}: {reason}")),
            None => eprintln!("warning: skipped {path}: {reason}"),
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
