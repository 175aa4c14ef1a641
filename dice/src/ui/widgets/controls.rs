//! Roll controls panel

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use dice_core::{AdvantageMode, DieType, RollControls};

use crate::ui::theme::DiceTheme;

/// Widget showing die selection, quantity, modifier and mode
pub struct ControlsWidget<'a> {
    controls: &'a RollControls,
    modifier_input: Option<&'a str>,
    disabled: bool,
    theme: &'a DiceTheme,
}

impl<'a> ControlsWidget<'a> {
    pub fn new(controls: &'a RollControls, theme: &'a DiceTheme) -> Self {
        Self {
            controls,
            modifier_input: None,
            disabled: false,
            theme,
        }
    }

    /// Dim everything while a roll is in flight
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Show the typed-modifier prompt in place of the modifier value
    pub fn modifier_input(mut self, input: Option<&'a str>) -> Self {
        self.modifier_input = input;
        self
    }

    fn modifier_spans(&self) -> Vec<Span<'a>> {
        match self.modifier_input {
            Some(input) => vec![
                Span::styled(
                    format!("{input}_"),
                    self.theme.modifier_style().add_modifier(Modifier::UNDERLINED),
                ),
                Span::styled("   (Enter/Esc)", self.theme.system_style()),
            ],
            None => vec![
                Span::styled(
                    format!("{:+}", self.controls.modifier()),
                    self.theme.modifier_style(),
                ),
                Span::styled("   (+/-, m)", self.theme.system_style()),
            ],
        }
    }

    fn toggle_span(&self, label: &'a str, active: bool) -> Span<'a> {
        if active {
            Span::styled(
                format!("[x] {label}"),
                Style::default().add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw(format!("[ ] {label}"))
        }
    }
}

impl Widget for ControlsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Controls ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(!self.disabled));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut dice_row: Vec<Span> = vec![Span::raw("Die:  ")];
        for die in DieType::ALL {
            let selected = die == self.controls.selected_die();
            dice_row.push(Span::styled(
                format!(" {die} "),
                self.theme.die_style(die, selected),
            ));
        }

        let mode = self.controls.mode();
        let mut lines = vec![
            Line::from(dice_row),
            Line::from(vec![
                Span::raw("Qty:  "),
                Span::styled(
                    self.controls.quantity().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled("   (↑/↓)", self.theme.system_style()),
            ]),
            Line::from(
                std::iter::once(Span::raw("Mod:  "))
                    .chain(self.modifier_spans())
                    .collect::<Vec<_>>(),
            ),
            Line::from(vec![
                self.toggle_span("Advantage", mode == Some(AdvantageMode::Advantage)),
                Span::raw("  "),
                self.toggle_span("Disadvantage", mode == Some(AdvantageMode::Disadvantage)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::raw("Roll: "),
                Span::styled(self.controls.formula(), self.theme.title_style()),
            ]),
        ];

        if self.disabled {
            for line in &mut lines {
                line.style = line.style.add_modifier(Modifier::DIM);
            }
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
