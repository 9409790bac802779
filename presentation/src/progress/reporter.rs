//! Progress rendering for Council runs
//!
//! Both renderers implement [`ProgressNotifier`] and can also drain a
//! [`ProgressChannel`](council_application::ProgressChannel) receiver on a
//! task of their own via [`drain`].

use colored::Colorize;
use council_application::ProgressNotifier;
use council_domain::{LoopState, ProgressEvent, ProgressKind};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

/// Forward every event from `receiver` to `notifier` until the sender side
/// is dropped.
pub async fn drain<N: ProgressNotifier>(notifier: N, mut receiver: mpsc::Receiver<ProgressEvent>) {
    while let Some(event) = receiver.recv().await {
        notifier.notify(event);
    }
}

/// Reports progress with indicatif bars: one bar per critique round and a
/// spinner for the synthesis and scoring stages.
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
    stage_spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
            stage_spinner: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_round(&self, iteration: usize, critics: usize) {
        let pb = self.multi.add(ProgressBar::new(critics as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(format!("Iteration {}", iteration));
        pb.set_message("Critics deliberating...");
        if let Ok(mut slot) = self.round_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn tick_round(&self, message: String) {
        if let Ok(slot) = self.round_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(message);
            pb.inc(1);
        }
    }

    fn finish_round(&self) {
        if let Ok(mut slot) = self.round_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message("critiques in".green().to_string());
        }
    }

    fn start_stage(&self, label: &str) {
        self.finish_stage(None);
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(label.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut slot) = self.stage_spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn finish_stage(&self, message: Option<String>) {
        if let Ok(mut slot) = self.stage_spinner.lock()
            && let Some(pb) = slot.take()
        {
            match message {
                Some(message) => pb.finish_with_message(message),
                None => pb.finish_and_clear(),
            }
        }
    }

    fn println(&self, line: String) {
        let _ = self.multi.println(line);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn notify(&self, event: ProgressEvent) {
        match event.kind {
            ProgressKind::RoundStarted { critics } => self.start_round(event.iteration, critics),
            ProgressKind::CritiqueReceived => {
                let who = event
                    .critique
                    .as_ref()
                    .map(|c| c.label())
                    .unwrap_or_default();
                self.tick_round(format!("{} {}", "v".green(), who));
            }
            ProgressKind::CritiqueFailed => {
                self.tick_round(format!("{} {}", "x".red(), event.message));
            }
            ProgressKind::FallbackUsed => {
                self.println(format!("  {} {}", "!".yellow(), event.message));
            }
            ProgressKind::StateChanged(LoopState::Synthesizing) => {
                self.finish_round();
                self.start_stage("Synthesizing");
            }
            ProgressKind::Synthesized => {
                self.finish_stage(Some("hardened concept ready".green().to_string()));
            }
            ProgressKind::StateChanged(LoopState::Scoring) => self.start_stage("Scoring"),
            ProgressKind::Scored => {
                let score = event.score.unwrap_or_default();
                self.finish_stage(Some(format!("score {}", score_colored(score))));
            }
            ProgressKind::StateChanged(state) if state.is_terminal() => {
                self.finish_round();
                self.finish_stage(None);
                self.println(format!("{} {}", "->".cyan(), terminal_label(state)));
            }
            ProgressKind::StateChanged(_) => {}
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn notify(&self, event: ProgressEvent) {
        match event.kind {
            ProgressKind::RoundStarted { critics } => {
                println!(
                    "{} {} ({} critics)",
                    "->".cyan(),
                    format!("Iteration {}", event.iteration).bold(),
                    critics
                );
            }
            ProgressKind::CritiqueReceived => {
                if let Some(critique) = &event.critique {
                    println!("  {} {}", "v".green(), critique.label());
                }
            }
            ProgressKind::CritiqueFailed => println!("  {} {}", "x".red(), event.message),
            ProgressKind::FallbackUsed => println!("  {} {}", "!".yellow(), event.message),
            ProgressKind::Synthesized => println!("  {} synthesized", "v".green()),
            ProgressKind::Scored => {
                println!("  score {}", score_colored(event.score.unwrap_or_default()));
            }
            ProgressKind::StateChanged(state) if state.is_terminal() => {
                println!("{} {}\n", "->".cyan(), terminal_label(state));
            }
            ProgressKind::StateChanged(_) => {}
        }
    }
}

fn score_colored(score: f64) -> String {
    let text = format!("{:.0}", score);
    if score >= 80.0 {
        text.green().bold().to_string()
    } else if score >= 50.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

fn terminal_label(state: LoopState) -> String {
    match state {
        LoopState::Converged => "Converged".green().bold().to_string(),
        LoopState::Exhausted => "Iteration budget exhausted".yellow().to_string(),
        LoopState::Cancelled => "Cancelled".yellow().to_string(),
        LoopState::Failed => "Failed".red().bold().to_string(),
        other => other.to_string(),
    }
}
