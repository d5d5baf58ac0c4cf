//! Bar Theme - colors for the visualizer
//!
//! Space violet bars, amber for the step in flight, green once sorted.

use ratatui::style::{Color, Modifier, Style};

use crate::controller::ControllerState;

/// Visualizer color palette
pub struct BarTheme {
    pub space_violet: Color,
    pub amber_gold: Color,
    pub cyan_teal: Color,
    pub star_white: Color,

    pub success_green: Color,
    pub warning_orange: Color,
    pub error_red: Color,
}

impl Default for BarTheme {
    fn default() -> Self {
        Self {
            space_violet: Color::Rgb(138, 43, 226), // #8A2BE2
            amber_gold: Color::Rgb(255, 191, 0),    // #FFBF00
            cyan_teal: Color::Rgb(0, 255, 255),     // #00FFFF
            star_white: Color::Rgb(230, 237, 243),  // #E6EDF3

            success_green: Color::Rgb(63, 185, 80), // #3FB950
            warning_orange: Color::Rgb(210, 153, 34), // #D29922
            error_red: Color::Rgb(248, 81, 73),     // #F85149
        }
    }
}

impl BarTheme {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Bars
    // ─────────────────────────────────────────────────────────────────────

    /// Resting bar
    pub fn bar(&self) -> Style {
        Style::default().fg(self.space_violet)
    }

    /// Bar touched by the most recent step
    pub fn active_bar(&self) -> Style {
        Style::default()
            .fg(self.amber_gold)
            .add_modifier(Modifier::BOLD)
    }

    /// Bars after a completed run
    pub fn sorted_bar(&self) -> Style {
        Style::default().fg(self.success_green)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Text
    // ─────────────────────────────────────────────────────────────────────

    pub fn text(&self) -> Style {
        Style::default().fg(self.star_white)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(Color::Rgb(128, 128, 128))
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.space_violet)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.amber_gold)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.cyan_teal)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning_orange)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error_red)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.space_violet)
    }

    /// Header style for the controller state
    pub fn state_style(&self, state: ControllerState) -> Style {
        match state {
            ControllerState::Running => Style::default().fg(self.success_green),
            ControllerState::Idle => self.dimmed(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Symbols
// ─────────────────────────────────────────────────────────────────────────────

pub mod symbols {
    /// Partial block glyphs indexed by eighths filled (0..=8)
    pub const EIGHTHS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

    pub const RUN: &str = "▶";
    pub const IDLE: &str = "◼";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = BarTheme::new();
        assert_eq!(theme.space_violet, Color::Rgb(138, 43, 226));
        assert_eq!(theme.bar().fg, Some(theme.space_violet));
        assert_eq!(theme.active_bar().fg, Some(theme.amber_gold));
        assert_eq!(theme.sorted_bar().fg, Some(theme.success_green));
    }

    #[test]
    fn test_state_styles_differ() {
        let theme = BarTheme::new();
        assert_ne!(
            theme.state_style(ControllerState::Running),
            theme.state_style(ControllerState::Idle)
        );
    }

    #[test]
    fn test_eighths_table() {
        assert_eq!(symbols::EIGHTHS[0], " ");
        assert_eq!(symbols::EIGHTHS[8], "█");
    }
}
