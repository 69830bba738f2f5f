use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner on stderr for the request currently in flight.
pub fn stage_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(TICKS)
            .template("{spinner} {msg} [{elapsed}]")
            .expect("invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Leave a one-line mark for the finished request, then let the report take over.
pub fn finish_spinner(pb: &ProgressBar, success: bool) {
    let mark = if success { "✓" } else { "✗" };
    let message = pb.message().trim_end_matches("...").to_string();
    pb.finish_with_message(format!("{mark} {message}"));
}
