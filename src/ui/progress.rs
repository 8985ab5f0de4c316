//! Console progress for compilation batches
//!
//! On a terminal the bar is redrawn in place on stderr and annotations are
//! printed above it. Otherwise only annotations are written, one per line.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::domain::ports::ProgressReporter;

use super::terminal::{detect_capabilities, TerminalCapabilities};

const CLEAR_LINE: &str = "\r\x1b[2K";

#[derive(Debug, Clone)]
pub struct ProgressBar {
    total: u64,
    current: u64,
    width: u16,
    message: String,
    started: Instant,
}

impl ProgressBar {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            current: 0,
            width: 20,
            message: String::new(),
            started: Instant::now(),
        }
    }

    pub fn with_message(total: u64, message: impl Into<String>) -> Self {
        let mut bar = Self::new(total);
        bar.message = message.into();
        bar
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width.max(1);
    }

    pub fn inc(&mut self, delta: u64) {
        self.current = self.current.saturating_add(delta);
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }

    pub fn eta(&self) -> Option<Duration> {
        if self.total == 0 || self.current == 0 {
            return None;
        }
        if self.current >= self.total {
            return Some(Duration::from_secs(0));
        }

        let elapsed_secs = self.started.elapsed().as_secs_f64();
        if elapsed_secs <= 0.0 {
            return None;
        }

        let rate = self.current as f64 / elapsed_secs;
        let secs = (self.total - self.current) as f64 / rate;
        if !secs.is_finite() || secs.is_sign_negative() {
            return None;
        }
        Some(Duration::from_secs_f64(secs))
    }

    pub fn render(&self, supports_unicode: bool) -> String {
        let (filled, empty) = self.bar_segments();
        let bar = if supports_unicode {
            format!("{}{}", "━".repeat(filled), "─".repeat(empty))
        } else {
            format!("{}{}", "=".repeat(filled), "-".repeat(empty))
        };

        let pct = if self.total == 0 {
            0
        } else {
            self.current.min(self.total).saturating_mul(100) / self.total
        };

        let mut out = String::new();
        if !self.message.is_empty() {
            out.push_str(&self.message);
            out.push(' ');
        }
        out.push_str(&bar);
        out.push_str(&format!("  {}/{} ({}%)", self.current, self.total, pct));
        if !self.is_complete() {
            if let Some(eta) = self.eta() {
                out.push_str(&format!("  ETA: {}", format_duration_compact(eta)));
            }
        }
        out
    }

    fn bar_segments(&self) -> (usize, usize) {
        let width = self.width.max(1) as usize;
        if self.total == 0 {
            return (0, width);
        }

        let ratio = self.current.min(self.total) as f64 / self.total as f64;
        let filled = (ratio * width as f64).round().clamp(0.0, width as f64) as usize;
        (filled, width.saturating_sub(filled))
    }
}

fn format_duration_compact(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m", mins);
    }
    format!("{}h", mins / 60)
}

/// [`ProgressReporter`] that writes to a console stream
///
/// Write errors on the stream are ignored.
pub struct ConsoleProgress<W: Write> {
    out: W,
    caps: TerminalCapabilities,
    bar: Option<ProgressBar>,
}

impl ConsoleProgress<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr(), detect_capabilities())
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W, caps: TerminalCapabilities) -> Self {
        Self {
            out,
            caps,
            bar: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self) {
        if !self.caps.is_live() {
            return;
        }
        if let Some(bar) = &self.bar {
            let line = bar.render(self.caps.supports_unicode);
            let _ = write!(self.out, "{CLEAR_LINE}{line}");
            let _ = self.out.flush();
        }
    }
}

impl<W: Write> ProgressReporter for ConsoleProgress<W> {
    fn start(&mut self, label: &str, total: u64) {
        self.bar = Some(ProgressBar::with_message(total, label));
        self.draw();
    }

    fn advance(&mut self, n: u64) {
        if let Some(bar) = self.bar.as_mut() {
            bar.inc(n);
        }
        self.draw();
    }

    fn annotate(&mut self, message: &str) {
        if self.caps.is_live() && self.bar.is_some() {
            let _ = write!(self.out, "{CLEAR_LINE}");
        }
        let _ = writeln!(self.out, "{message}");
        self.draw();
    }

    fn finish(&mut self) {
        if self.caps.is_live() && self.bar.is_some() {
            let _ = writeln!(self.out);
        }
        self.bar = None;
        let _ = self.out.flush();
    }
}
