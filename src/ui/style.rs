//! Consistent styling utilities for console output.
//!
//! Provides color and formatting helpers using owo-colors. Colors are
//! dropped entirely when `NO_COLOR` is set.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::output;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    fn paint<T: Display>(text: T, styled: impl FnOnce(&T) -> String) -> String {
        if output::is_no_color() {
            text.to_string()
        } else {
            styled(&text)
        }
    }

    /// Style for headers (e.g., the startup banner)
    pub fn header<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.bold().cyan().to_string())
    }

    /// Style for labels/keys (e.g., "file", "language")
    pub fn label<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.dimmed().to_string())
    }

    /// Style for primary values (e.g., language names, file paths)
    pub fn value<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.cyan().to_string())
    }

    /// Style for success messages
    pub fn success<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.green().to_string())
    }

    /// Style for error messages
    pub fn error<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.red().bold().to_string())
    }

    /// Style for in-progress messages
    pub fn warning<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.yellow().to_string())
    }

    /// Style for hints/help text
    pub fn hint<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.dimmed().italic().to_string())
    }
}
