use colored::*;
use indicatif::ProgressStyle;
use invsweep_core::sweep::SweepProgress;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Single overwriting status line showing `completed/total` and the last host.
pub struct SweepProgressBar {
    span: Span,
}

impl SweepProgressBar {
    /// In quiet mode the bar is backed by a disabled span and draws nothing.
    pub fn start(total: usize, quiet: bool) -> Self {
        if quiet {
            return Self { span: Span::none() };
        }

        let span: Span = info_span!("sweep");
        span.pb_set_style(&style());
        span.pb_set_length(total as u64);
        span.pb_set_message("waiting for the first host...");
        Self { span }
    }

    /// Span the sweep future should be instrumented with.
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    pub fn update(&self, progress: &SweepProgress) {
        self.span.pb_set_position(progress.completed as u64);
        self.span.pb_set_message(&format!(
            "Queried {}/{} - last IP: {}",
            progress.completed.to_string().green().bold(),
            progress.total,
            progress.last_address.color(colors::IPV4_ADDR)
        ));
    }
}

fn style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} [{bar:30.green/bright_black}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICK_STRINGS)
        .progress_chars("█▓░")
}
