//! Terminal colour support

use owo_colors::{OwoColorize, colors::css};

/// Detects whether coloured output should be enabled on the given stream
fn supports_color(stream: supports_color::Stream) -> bool {
    supports_color::on(stream).is_some()
}

/// Extension trait for colorizing output
///
/// `warning` targets stderr, where diagnostics are written; the rest target
/// stdout.
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color(supports_color::Stream::Stdout) {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color(supports_color::Stream::Stderr) {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color(supports_color::Stream::Stdout) {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}
