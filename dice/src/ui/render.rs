//! Render orchestration for the dice roller TUI

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{
    ControlsWidget, DiceAnimationState, DiceRollWidget, HistoryWidget, HotkeyBarWidget,
    StatusBarWidget,
};

/// Overlay types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);
    let rolling = app.session.is_rolling();

    render_title_bar(frame, app, layout.title_area);

    // Dice panel
    let animation_state = if rolling {
        DiceAnimationState::Rolling {
            frame: app.animation_frame,
        }
    } else {
        DiceAnimationState::Complete
    };
    let mut dice_widget = DiceRollWidget::new(&app.theme)
        .outcome(app.session.current())
        .animation_state(animation_state);
    if let Some(label) = app.rolling_label() {
        dice_widget = dice_widget.pending_label(label);
    }
    frame.render_widget(dice_widget, layout.dice_area);

    let controls_widget = ControlsWidget::new(&app.controls, &app.theme)
        .modifier_input(app.modifier_input())
        .disabled(rolling);
    frame.render_widget(controls_widget, layout.controls_area);

    let history_widget = HistoryWidget::new(app.session.history(), &app.theme);
    frame.render_widget(history_widget, layout.history_area);

    let status_widget = StatusBarWidget::new(rolling, app.session.history().len(), &app.theme)
        .message(app.status_message());
    frame.render_widget(status_widget, layout.status_bar);

    frame.render_widget(HotkeyBarWidget::new(rolling, &app.theme), layout.hotkey_bar);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(Span::styled(" 🎲 D&D Dice Roller ", app.theme.title_style()));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render overlay
fn render_overlay(frame: &mut Frame, app: &App, overlay: Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(52, 25, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let heading = Style::default().add_modifier(Modifier::UNDERLINED);
    let help_text = vec![
        Line::from(Span::styled(
            " D&D Dice Roller - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Rolling:", heading)),
        Line::from("  Enter/Space    Roll with the current settings"),
        Line::from("  1-7            Quick roll d4 d6 d8 d10 d12 d20 d100"),
        Line::from(""),
        Line::from(Span::styled("Settings:", heading)),
        Line::from("  ←/→ or h/l     Select die"),
        Line::from("  ↑/↓ or k/j     Change quantity"),
        Line::from("  +/-            Change modifier"),
        Line::from("  m              Type a modifier (Enter applies)"),
        Line::from("  a / d          Toggle advantage / disadvantage"),
        Line::from("  r              Reset quantity, modifier and mode"),
        Line::from(""),
        Line::from(Span::styled("Other:", heading)),
        Line::from("  c              Clear history"),
        Line::from("  ?/F1           Toggle this help"),
        Line::from("  q/Ctrl+C       Quit"),
        Line::from(""),
        Line::from("Advantage and disadvantage roll 2d20 and add both."),
        Line::from(""),
        Line::from(Span::styled("Press Esc or q to close", app.theme.system_style())),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
