//! Roll history list widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

use dice_core::RollHistory;

use crate::ui::theme::DiceTheme;

/// Widget listing past rolls, newest first
pub struct HistoryWidget<'a> {
    history: &'a RollHistory,
    theme: &'a DiceTheme,
}

impl<'a> HistoryWidget<'a> {
    pub fn new(history: &'a RollHistory, theme: &'a DiceTheme) -> Self {
        Self { history, theme }
    }
}

impl Widget for HistoryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" History ({}) ", self.history.len()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        if self.history.is_empty() {
            let items = vec![ListItem::new(Span::styled(
                "No rolls yet",
                self.theme.system_style(),
            ))];
            List::new(items).block(block).render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .history
            .iter()
            .map(|outcome| {
                let time = outcome.created_at.format("%H:%M:%S").to_string();
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{time} "), self.theme.system_style()),
                    Span::styled(
                        format!("{:<18}", outcome.label()),
                        Style::default().fg(self.theme.die_color(outcome.die)),
                    ),
                    Span::raw(format!("{:<24}", outcome.dice_display())),
                    Span::styled(
                        format!("= {}", outcome.total),
                        self.theme
                            .roll_result_style(outcome)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]))
            })
            .collect();

        List::new(items).block(block).render(area, buf);
    }
}
