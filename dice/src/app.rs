//! Main application state and logic

use dice_core::{DieType, RollControls, RollRequest, RollSession, RollerConfig};

use crate::ui::theme::DiceTheme;
use crate::ui::Overlay;

/// Main application state
pub struct App {
    // Roll state (history, current result, rolling flag)
    pub session: RollSession,

    // Roll form
    pub controls: RollControls,
    modifier_input: Option<String>,

    // UI state
    pub theme: DiceTheme,
    overlay: Option<Overlay>,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,

    // Animation
    pub animation_frame: u8,
    rolling_label: Option<String>,
}

impl App {
    pub fn new(config: &RollerConfig) -> Self {
        Self {
            session: RollSession::new(config),
            controls: RollControls::new(config.default_die),
            modifier_input: None,
            theme: DiceTheme::default(),
            overlay: None,
            status_message: None,
            should_quit: false,
            animation_frame: 0,
            rolling_label: None,
        }
    }

    /// Roll with the current control settings
    pub fn roll(&mut self) {
        let request = self.controls.request();
        self.start_roll(request);
    }

    /// Roll a single die with no modifier
    pub fn quick_roll(&mut self, die: DieType) {
        self.start_roll(RollControls::quick_request(die));
    }

    fn start_roll(&mut self, request: RollRequest) {
        let label = request.label();
        match self.session.request(request) {
            Ok(_) => {
                self.set_status(format!("Rolling {label}..."));
                self.rolling_label = Some(label);
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Clear the roll history (refused while a roll is in flight)
    pub fn clear_history(&mut self) {
        if self.session.is_rolling() {
            self.set_status("Wait for the roll to finish");
            return;
        }
        self.session.clear_history();
        self.set_status("History cleared");
    }

    /// Reset quantity, modifier and mode
    pub fn reset_controls(&mut self) {
        self.controls.reset();
        self.set_status("Controls reset");
    }

    /// Open the typed-modifier prompt
    pub fn begin_modifier_entry(&mut self) {
        self.modifier_input = Some(String::new());
    }

    /// Type into the modifier prompt. Digits anywhere, a sign only first.
    pub fn type_modifier_char(&mut self, c: char) {
        if let Some(ref mut input) = self.modifier_input {
            let sign_ok = input.is_empty() && (c == '+' || c == '-');
            if c.is_ascii_digit() || sign_ok {
                input.push(c);
            }
        }
    }

    pub fn modifier_backspace(&mut self) {
        if let Some(ref mut input) = self.modifier_input {
            input.pop();
        }
    }

    /// Apply the typed modifier; unparsable text becomes 0
    pub fn commit_modifier_entry(&mut self) {
        if let Some(input) = self.modifier_input.take() {
            self.controls.set_modifier_text(&input);
            self.set_status(format!("Modifier set to {:+}", self.controls.modifier()));
        }
    }

    pub fn cancel_modifier_entry(&mut self) {
        self.modifier_input = None;
    }

    /// Tick for animations and deferred results
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);

        if let Some(outcome) = self.session.try_publish() {
            let message = if outcome.natural_20() {
                format!("Rolled {} = {} (natural 20!)", outcome.label(), outcome.total)
            } else if outcome.natural_1() {
                format!("Rolled {} = {} (natural 1)", outcome.label(), outcome.total)
            } else {
                format!("Rolled {} = {}", outcome.label(), outcome.total)
            };
            self.rolling_label = None;
            self.set_status(message);
        }
    }

    /// Cancel anything in flight before exit
    pub fn shutdown(&mut self) {
        if self.session.cancel() {
            tracing::info!("Discarded in-flight roll on exit");
        }
        self.rolling_label = None;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    /// Close any open overlay
    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    // =========================================================================
    // Getters for private fields
    // =========================================================================

    /// Get the current overlay
    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    /// Check if an overlay is open
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Get the current status message
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Text typed so far, while the modifier prompt is open
    pub fn modifier_input(&self) -> Option<&str> {
        self.modifier_input.as_deref()
    }

    /// Notation of the roll in flight, if any
    pub fn rolling_label(&self) -> Option<&str> {
        self.rolling_label.as_deref()
    }
}
