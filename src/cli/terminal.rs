//! Terminal capability detection and utilities

use owo_colors::{OwoColorize, colors::css};
use roster::domain::heatmap::Intensity;

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
    /// Shade by heatmap intensity
    fn heat(&self, intensity: Intensity) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn info(&self) -> String {
        if supports_color() {
            self.fg::<css::LightBlue>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }

    fn heat(&self, intensity: Intensity) -> String {
        if !supports_color() {
            return self.to_string();
        }
        match intensity {
            Intensity::Empty => self.dimmed().to_string(),
            Intensity::Low => self.fg::<css::SlateGray>().to_string(),
            Intensity::Moderate => self.fg::<css::SteelBlue>().to_string(),
            Intensity::Medium => self.fg::<css::MediumSeaGreen>().to_string(),
            Intensity::High => self.fg::<css::LimeGreen>().to_string(),
            Intensity::Peak => self.fg::<css::Lime>().bold().to_string(),
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

    fn info(&self) -> String {
        self.as_str().info()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }

    fn heat(&self, intensity: Intensity) -> String {
        self.as_str().heat(intensity)
    }
}
