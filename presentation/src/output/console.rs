//! Console renderer for UI events.
//!
//! Drains the orchestrator's bounded event channel and prints a readable
//! transcript: colored message lines, a spinner while a backend is
//! thinking, progress updates on the spinner message.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use vox_application::ports::ui_event::UiEvent;
use vox_domain::PRODUCT_NAME;

/// Renders [`UiEvent`]s to the console.
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    /// Spawn a task that renders events until the channel closes.
    pub fn spawn(mut events: mpsc::Receiver<UiEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut spinner: Option<ProgressBar> = None;
            while let Some(event) = events.recv().await {
                Self::render(&mut spinner, event);
            }
            if let Some(spinner) = spinner.take() {
                spinner.finish_and_clear();
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn render(spinner: &mut Option<ProgressBar>, event: UiEvent) {
        match event {
            UiEvent::ModeActivated => {
                println!("{}", "Assistant mode active. Ask away.".bold());
            }
            UiEvent::ModeDeactivated => {
                println!("{}", "Assistant mode off.".dimmed());
            }
            UiEvent::Queued { position, .. } => {
                println!("{}", format!("Waiting in queue (#{position})").yellow());
            }
            UiEvent::Processing { remaining, .. } => {
                println!(
                    "{}",
                    format!("Processing next request... ({remaining} still waiting)").yellow()
                );
            }
            UiEvent::Thinking => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(Self::spinner_style());
                bar.set_message("Thinking...");
                bar.enable_steady_tick(Duration::from_millis(120));
                *spinner = Some(bar);
            }
            UiEvent::ThinkingDone => {
                if let Some(bar) = spinner.take() {
                    bar.finish_and_clear();
                }
            }
            UiEvent::Progress { elapsed, status } => {
                if let Some(bar) = spinner.as_ref() {
                    bar.set_message(format!("{status} ({}s)", elapsed.as_secs()));
                }
            }
            UiEvent::UserMessage { content } => {
                println!("{} {}", "You:".cyan().bold(), content);
            }
            UiEvent::AssistantMessage { content, elapsed } => {
                println!("{} {}", format!("{PRODUCT_NAME}:").green().bold(), content);
                println!("{}", format!("  ({:.1}s)", elapsed.as_secs_f64()).dimmed());
            }
            UiEvent::SwitchingProvider { .. } => {
                println!(
                    "{}",
                    "Switching to an alternate answer engine...".yellow()
                );
            }
            UiEvent::Error { message } => {
                eprintln!("{} {}", "Error:".red().bold(), message);
            }
            UiEvent::SessionReset => {
                println!("{}", "Conversation cleared.".dimmed());
            }
        }
    }
}
