//! Status bar and hotkey bar widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::ui::theme::DiceTheme;

/// Status bar showing the roll state and the latest message
pub struct StatusBarWidget<'a> {
    rolling: bool,
    history_len: usize,
    theme: &'a DiceTheme,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(rolling: bool, history_len: usize, theme: &'a DiceTheme) -> Self {
        Self {
            rolling,
            history_len,
            theme,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = if self.rolling {
            Span::styled("-- ROLLING --", self.theme.rolling_style())
        } else {
            Span::styled(
                "-- READY --",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )
        };

        let mut spans = vec![
            state,
            Span::raw(" | "),
            Span::styled(
                format!("History: {}", self.history_len),
                self.theme.system_style(),
            ),
        ];

        if let Some(msg) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(msg, Style::default().add_modifier(Modifier::DIM)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar widget
pub struct HotkeyBarWidget<'a> {
    rolling: bool,
    theme: &'a DiceTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(rolling: bool, theme: &'a DiceTheme) -> Self {
        Self { rolling, theme }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // (label, available while rolling)
        let hotkeys = [
            ("Enter:roll", false),
            ("←/→:die", false),
            ("↑/↓:qty", false),
            ("+/-:mod", false),
            ("m:type mod", false),
            ("a/d:adv/dis", false),
            ("1-7:quick", false),
            ("r:reset", false),
            ("c:clear", false),
            ("?:help", true),
            ("q:quit", true),
        ];

        let mut spans = Vec::new();
        for (i, (label, always)) in hotkeys.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if self.rolling && !always {
                self.theme.system_style()
            } else {
                Style::default().fg(self.theme.foreground)
            };
            spans.push(Span::styled(*label, style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
