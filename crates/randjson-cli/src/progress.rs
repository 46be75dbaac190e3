use indicatif::{ProgressBar, ProgressStyle};

use randjson_generate::{ProgressEvent, ProgressObserver};

const BAR_TEMPLATE: &str = "{elapsed_precise} [{bar:40}] {percent:>3}%";

/// Write events per bar tick, so that writing takes a small share of the bar.
pub fn magnification(data_count: u64) -> u64 {
    if data_count == 0 {
        return 1;
    }
    let count = data_count as f64;
    let raw = (count.ln() * 0.5 + count * 0.000_000_7).ceil();
    (raw as u64).max(1)
}

/// Bar length: one tick per generated value plus the sampled write ticks.
pub fn total_ticks(data_count: u64) -> u64 {
    data_count + data_count / magnification(data_count) + 1
}

/// Create the terminal bar for a run, or a hidden one when disabled.
pub fn progress_bar(data_count: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total_ticks(data_count));
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("-- ");
    bar.set_style(style);
    bar
}

/// Log a received interrupt without drawing over the bar line.
pub fn report_interrupt(bar: &ProgressBar) {
    bar.suspend(|| tracing::warn!(event = "interrupt_received"));
}

/// Drives a progress bar from generator and writer events.
pub struct BarObserver {
    bar: ProgressBar,
    magnification: u64,
    written: u64,
}

impl BarObserver {
    pub fn new(bar: ProgressBar, data_count: u64) -> Self {
        Self {
            bar,
            magnification: magnification(data_count),
            written: 0,
        }
    }
}

impl ProgressObserver for BarObserver {
    fn notify(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Generated { .. } => self.bar.inc(1),
            ProgressEvent::Written { .. } => {
                if self.written % self.magnification == 0 {
                    self.bar.inc(1);
                }
                self.written += 1;
            }
        }
    }
}
