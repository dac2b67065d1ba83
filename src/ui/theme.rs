//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::AlertStatus;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for buy-side prices and triggers.
    pub buy: Color,
    /// Color for sell-side prices and triggers.
    pub sell: Color,
    /// Color for triggers that are armed.
    pub active: Color,
    /// Color for triggers waiting out a cooldown.
    pub cooldown: Color,
    /// Color for triggers that have fired and stay off.
    pub inactive: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            buy: Color::Green,
            sell: Color::Red,
            active: Color::Green,
            cooldown: Color::Yellow,
            inactive: Color::DarkGray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            buy: Color::Green,
            sell: Color::Red,
            active: Color::Green,
            cooldown: Color::Yellow,
            inactive: Color::Gray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a trigger status
    pub fn status_style(&self, status: &AlertStatus) -> Style {
        match status {
            AlertStatus::Active => Style::default().fg(self.active),
            AlertStatus::Cooldown(_) => Style::default().fg(self.cooldown),
            AlertStatus::Inactive => Style::default().fg(self.inactive),
        }
    }
}

/// Theme selection from config or the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
    /// Detect from the terminal background.
    #[default]
    Auto,
}

impl ThemeMode {
    /// Resolve to a concrete theme.
    ///
    /// Auto detection queries the terminal, so call this before entering
    /// raw mode.
    pub fn resolve(self) -> Theme {
        match self {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
            ThemeMode::Auto => Theme::auto_detect(),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            "auto" => Ok(ThemeMode::Auto),
            other => anyhow::bail!("unknown theme: {} (expected dark, light, or auto)", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_theme_mode_parses_case_insensitively() {
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!("Light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert_eq!("AUTO".parse::<ThemeMode>().unwrap(), ThemeMode::Auto);
        assert!("solarized".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_status_styles_are_distinct() {
        let theme = Theme::dark();
        let active = theme.status_style(&AlertStatus::Active);
        let cooldown = theme.status_style(&AlertStatus::Cooldown(Duration::seconds(10)));
        let inactive = theme.status_style(&AlertStatus::Inactive);
        assert_ne!(active, cooldown);
        assert_ne!(cooldown, inactive);
    }
}
