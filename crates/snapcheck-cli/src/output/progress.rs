//! Progress bar adapter using indicatif.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use snapcheck_core::{ProgressEvent, ProgressSink, ValidityPolicy, ValidityReport};

/// Progress bar adapter for CLI output.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
    quiet: bool,
    policy: ValidityPolicy,
}

impl ProgressBar {
    /// Creates a new progress bar.
    ///
    /// # Arguments
    ///
    /// * `total` - Total number of items, if known
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show progress bar; otherwise show per-item status
    #[must_use]
    pub fn new(total: Option<u64>, quiet: bool, show_bar: bool) -> Self {
        if quiet {
            return Self {
                bar: None,
                quiet: true,
                policy: ValidityPolicy::default(),
            };
        }

        let bar = show_bar.then(|| {
            let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);
            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            ) {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar
        });

        Self {
            bar,
            quiet,
            policy: ValidityPolicy::default(),
        }
    }

    /// Sets the policy the verdicts were fused under, so per-item lines
    /// only name the flags that made an image invalid.
    #[must_use]
    pub fn with_policy(mut self, policy: ValidityPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Flags that made an invalid report invalid.
fn invalid_reasons(report: &ValidityReport, policy: ValidityPolicy) -> Vec<&'static str> {
    let mut reasons = Vec::new();
    if report.blurred() && policy.blur_affects_validity {
        reasons.push("blurred");
    }
    if report.rotated() {
        reasons.push("rotated");
    }
    if report.cropped() {
        reasons.push("cropped");
    }
    reasons
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        match event {
            ProgressEvent::Started { path, index, total } => {
                if let Some(bar) = &self.bar {
                    if let Some(t) = total {
                        bar.set_length(t as u64);
                    }
                    bar.set_position(index as u64);
                    bar.set_message(path);
                }
            }
            ProgressEvent::Completed { record } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                } else if let Some(error) = &record.error {
                    eprintln!("{}: {} ({})", record.path, error.kind, error.message);
                } else if let Some(report) = record.report.filter(|r| !r.valid) {
                    let reasons = invalid_reasons(&report, self.policy);
                    eprintln!("{}: invalid ({})", record.path, reasons.join(", "));
                }
            }
            ProgressEvent::Skipped { path, reason } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                }
                eprintln!("WARN: Skipping {path}: {reason}");
            }
            ProgressEvent::Finished { processed, skipped } => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(format!(
                        "Done: {processed} processed, {skipped} skipped"
                    ));
                }
            }
        }
    }
}
