//! Animated dice roll display widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use dice_core::RollOutcome;

use crate::ui::theme::DiceTheme;

/// Animation state for dice roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceAnimationState {
    Rolling { frame: u8 },
    Complete,
}

/// Widget for displaying the current roll with animation
pub struct DiceRollWidget<'a> {
    outcome: Option<&'a RollOutcome>,
    pending_label: Option<&'a str>,
    animation_state: DiceAnimationState,
    theme: &'a DiceTheme,
}

impl<'a> DiceRollWidget<'a> {
    pub fn new(theme: &'a DiceTheme) -> Self {
        Self {
            outcome: None,
            pending_label: None,
            animation_state: DiceAnimationState::Complete,
            theme,
        }
    }

    pub fn outcome(mut self, outcome: Option<&'a RollOutcome>) -> Self {
        self.outcome = outcome;
        self
    }

    /// What is being rolled, shown under the spinner
    pub fn pending_label(mut self, label: &'a str) -> Self {
        self.pending_label = Some(label);
        self
    }

    pub fn animation_state(mut self, state: DiceAnimationState) -> Self {
        self.animation_state = state;
        self
    }

    fn result_lines(&self, outcome: &RollOutcome) -> Vec<Line<'a>> {
        let style = self.theme.roll_result_style(outcome);
        let mut lines = Vec::new();

        if outcome.natural_20() {
            lines.push(Line::from(Span::styled("  .--===--.", style)));
            lines.push(Line::from(Span::styled(" / NAT 20! \\", style)));
            lines.push(Line::from(Span::styled("|  CRITICAL |", style)));
            lines.push(Line::from(Span::styled("  '---==---'", style)));
        } else if outcome.natural_1() {
            lines.push(Line::from(Span::styled("  .-------.", style)));
            lines.push(Line::from(Span::styled(" / NAT  1  \\", style)));
            lines.push(Line::from(Span::styled("|  FUMBLE!  |", style)));
            lines.push(Line::from(Span::styled("  '-------'", style)));
        } else {
            lines.push(Line::from("╭───────╮"));
            lines.push(Line::from(Span::styled(
                format!("│ {:^5} │", outcome.total),
                style.add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from("╰───────╯"));
        }
        lines.push(Line::from(""));

        // Individual dice, colored like the die
        let die_style = Style::default()
            .fg(self.theme.die_color(outcome.die))
            .add_modifier(Modifier::BOLD);
        let mut dice_spans: Vec<Span> = Vec::new();
        for (i, value) in outcome.results.iter().enumerate() {
            if i > 0 {
                dice_spans.push(Span::raw(" "));
            }
            dice_spans.push(Span::styled(format!("[{value}]"), die_style));
        }
        if outcome.modifier != 0 {
            dice_spans.push(Span::styled(
                format!(" {:+}", outcome.modifier),
                self.theme.modifier_style(),
            ));
        }
        lines.push(Line::from(dice_spans));
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled(
            outcome.formula(),
            Style::default().add_modifier(Modifier::DIM),
        )));
        lines.push(Line::from(Span::styled(
            outcome.label(),
            self.theme.system_style(),
        )));
        lines
    }
}

impl Widget for DiceRollWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Roll ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = vec![Line::from("")];

        match self.animation_state {
            DiceAnimationState::Rolling { frame } => {
                let spin_chars = ['|', '/', '-', '\\'];
                let spin = spin_chars[(frame as usize) % 4];

                lines.push(Line::from("╭───╮"));
                lines.push(Line::from(format!("│ {spin} │")));
                lines.push(Line::from("╰───╯"));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Rolling...",
                    self.theme.rolling_style(),
                )));
                if let Some(label) = self.pending_label {
                    lines.push(Line::from(Span::styled(label, self.theme.system_style())));
                }
            }
            DiceAnimationState::Complete => match self.outcome {
                Some(outcome) => lines.extend(self.result_lines(outcome)),
                None => {
                    lines.push(Line::from(Span::styled(
                        "No roll yet",
                        self.theme.system_style(),
                    )));
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "Press Enter to roll",
                        self.theme.system_style(),
                    )));
                }
            },
        }

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        paragraph.render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_core::DieType;

    fn render_to_string(widget: DiceRollWidget<'_>) -> String {
        let area = Rect::new(0, 0, 40, 14);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_rolling_shows_spinner() {
        let theme = DiceTheme::default();
        let text = render_to_string(
            DiceRollWidget::new(&theme)
                .animation_state(DiceAnimationState::Rolling { frame: 1 })
                .pending_label("3d6+2"),
        );
        assert!(text.contains("Rolling..."));
        assert!(text.contains("3d6+2"));
    }

    #[test]
    fn test_complete_shows_formula() {
        let theme = DiceTheme::default();
        let outcome = RollOutcome::from_results(DieType::D6, vec![2, 5], 1, None);
        let text = render_to_string(DiceRollWidget::new(&theme).outcome(Some(&outcome)));
        assert!(text.contains("[2 + 5] + 1 = 8"));
    }
}
