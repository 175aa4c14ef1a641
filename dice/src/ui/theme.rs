//! Color theme and styling for the dice roller TUI

use dice_core::{DieType, RollOutcome};
use ratatui::style::{Color, Modifier, Style};

/// Dice roller color theme
#[derive(Debug, Clone)]
pub struct DiceTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Roll result colors
    pub crit_success: Color,
    pub crit_failure: Color,
    pub total: Color,
    pub modifier: Color,

    // Text colors
    pub system_text: Color,
    pub rolling_text: Color,
}

impl Default for DiceTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            crit_success: Color::Yellow,
            crit_failure: Color::Red,
            total: Color::LightGreen,
            modifier: Color::LightYellow,

            system_text: Color::DarkGray,
            rolling_text: Color::LightMagenta,
        }
    }
}

impl DiceTheme {
    /// Signature color of each die
    pub fn die_color(&self, die: DieType) -> Color {
        match die {
            DieType::D4 => Color::Rgb(0xff, 0x6b, 0x6b),
            DieType::D6 => Color::Rgb(0x4e, 0xcd, 0xc4),
            DieType::D8 => Color::Rgb(0x45, 0xb7, 0xd1),
            DieType::D10 => Color::Rgb(0x96, 0xce, 0xb4),
            DieType::D12 => Color::Rgb(0xfe, 0xca, 0x57),
            DieType::D20 => Color::Rgb(0xff, 0x9f, 0xf3),
            DieType::D100 => Color::Rgb(0x54, 0xa0, 0xff),
        }
    }

    /// Die button style; the selected die is drawn filled
    pub fn die_style(&self, die: DieType, selected: bool) -> Style {
        let color = self.die_color(die);
        if selected {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    }

    /// Get style for a roll total
    pub fn roll_result_style(&self, outcome: &RollOutcome) -> Style {
        if outcome.natural_20() {
            Style::default()
                .fg(self.crit_success)
                .add_modifier(Modifier::BOLD)
        } else if outcome.natural_1() {
            Style::default()
                .fg(self.crit_failure)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.total)
        }
    }

    pub fn modifier_style(&self) -> Style {
        Style::default().fg(self.modifier)
    }

    /// Get style for system messages
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    pub fn rolling_style(&self) -> Style {
        Style::default()
            .fg(self.rolling_text)
            .add_modifier(Modifier::BOLD)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get title style
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .add_modifier(Modifier::BOLD)
    }
}
