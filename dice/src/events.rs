//! Event handling for the dice roller TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use dice_core::DieType;

use crate::app::App;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    if app.modifier_input().is_some() {
        return handle_modifier_input(app, key);
    }

    match key.code {
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,
        _ if app.session.is_rolling() => {
            app.set_status("Rolling... please wait");
            EventResult::NeedsRedraw
        }
        _ => handle_control_key(app, key),
    }
}

/// Handle keys that change the roll form or start a roll
fn handle_control_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        // Rolling
        KeyCode::Enter | KeyCode::Char(' ') => app.roll(),
        KeyCode::Char(c @ '1'..='7') => {
            let index = c as usize - '1' as usize;
            app.quick_roll(DieType::ALL[index]);
        }

        // Die selection
        KeyCode::Left | KeyCode::Char('h') => app.controls.previous_die(),
        KeyCode::Right | KeyCode::Char('l') => app.controls.next_die(),

        // Quantity
        KeyCode::Up | KeyCode::Char('k') => app.controls.increment_quantity(),
        KeyCode::Down | KeyCode::Char('j') => app.controls.decrement_quantity(),

        // Modifier
        KeyCode::Char('+') | KeyCode::Char('=') => app.controls.increment_modifier(),
        KeyCode::Char('-') | KeyCode::Char('_') => app.controls.decrement_modifier(),
        KeyCode::Char('m') => app.begin_modifier_entry(),

        // Advantage / disadvantage
        KeyCode::Char('a') => app.controls.toggle_advantage(),
        KeyCode::Char('d') => app.controls.toggle_disadvantage(),

        KeyCode::Char('r') => app.reset_controls(),
        KeyCode::Char('c') => app.clear_history(),

        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle keys while the modifier prompt is open
fn handle_modifier_input(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter => app.commit_modifier_entry(),
        KeyCode::Esc => app.cancel_modifier_entry(),
        KeyCode::Backspace => app.modifier_backspace(),
        KeyCode::Char(c) => app.type_modifier_char(c),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle key when overlay is open
fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1) => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
