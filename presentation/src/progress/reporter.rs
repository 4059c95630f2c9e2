//! Progress reporting for an orchestration run

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mixalture_application::ProgressNotifier;
use mixalture_domain::{OrchestrationOutcome, ProviderId, Stage};
use std::sync::Mutex;
use std::time::Duration;

/// Shows a spinner for the provider call in flight
pub struct ProgressReporter {
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage, provider: ProviderId) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(stage.display_name());
        pb.set_message(format!("asking {} provider...", provider));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut current) = self.current.lock()
            && let Some(previous) = current.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_stage_complete(&self, stage: Stage, provider: ProviderId, success: bool) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };
        if let Some(pb) = current.take() {
            let status = if success {
                format!("{} {} ({})", "v".green(), stage.display_name(), provider)
            } else {
                format!("{} {} ({} unavailable)", "x".red(), stage.display_name(), provider)
            };
            pb.set_prefix("");
            pb.finish_with_message(status);
        }
    }

    fn on_finished(&self, outcome: &OrchestrationOutcome) {
        if outcome.is_partial() {
            eprintln!(
                "{} answered without every stage ({})",
                "!".yellow(),
                outcome.resolution()
            );
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage, provider: ProviderId) {
        eprintln!("{} {} ({})", "->".cyan(), stage.display_name().bold(), provider);
    }

    fn on_stage_complete(&self, _stage: Stage, provider: ProviderId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), provider);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), provider);
        }
    }
}
