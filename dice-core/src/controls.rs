//! Roll form state: die selection, quantity, modifier and the
//! advantage/disadvantage toggles.
//!
//! All validation of user input happens here, before a request reaches
//! the engine.

use crate::dice::{AdvantageMode, DiceSpec, DieType, RollRequest, MAX_QUANTITY};

/// Current settings of the roll controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollControls {
    selected: DieType,
    quantity: u32,
    modifier: i32,
    mode: Option<AdvantageMode>,
}

impl Default for RollControls {
    fn default() -> Self {
        Self::new(DieType::D20)
    }
}

impl RollControls {
    pub fn new(default_die: DieType) -> Self {
        Self {
            selected: default_die,
            quantity: 1,
            modifier: 0,
            mode: None,
        }
    }

    pub fn selected_die(&self) -> DieType {
        self.selected
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    pub fn mode(&self) -> Option<AdvantageMode> {
        self.mode
    }

    pub fn next_die(&mut self) {
        self.selected = self.selected.next();
    }

    pub fn previous_die(&mut self) {
        self.selected = self.selected.previous();
    }

    pub fn increment_quantity(&mut self) {
        self.quantity = (self.quantity + 1).min(MAX_QUANTITY);
    }

    pub fn decrement_quantity(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    pub fn increment_modifier(&mut self) {
        self.modifier = self.modifier.saturating_add(1);
    }

    pub fn decrement_modifier(&mut self) {
        self.modifier = self.modifier.saturating_sub(1);
    }

    pub fn set_modifier(&mut self, modifier: i32) {
        self.modifier = modifier;
    }

    /// Set the modifier from typed text; anything unparsable becomes 0.
    pub fn set_modifier_text(&mut self, text: &str) {
        self.set_modifier(text.trim().parse().unwrap_or(0));
    }

    /// Toggle advantage. Turning it on turns disadvantage off.
    pub fn toggle_advantage(&mut self) {
        self.mode = match self.mode {
            Some(AdvantageMode::Advantage) => None,
            _ => Some(AdvantageMode::Advantage),
        };
    }

    /// Toggle disadvantage. Turning it on turns advantage off.
    pub fn toggle_disadvantage(&mut self) {
        self.mode = match self.mode {
            Some(AdvantageMode::Disadvantage) => None,
            _ => Some(AdvantageMode::Disadvantage),
        };
    }

    /// Back to one die, no modifier, no advantage. The selected die stays.
    pub fn reset(&mut self) {
        self.quantity = 1;
        self.modifier = 0;
        self.mode = None;
    }

    /// Build the request for the main roll button.
    pub fn request(&self) -> RollRequest {
        match self.mode {
            Some(mode) => RollRequest::WithAdvantage {
                mode,
                modifier: self.modifier,
            },
            None => RollRequest::Standard(DiceSpec::new(self.selected, self.quantity, self.modifier)),
        }
    }

    /// A quick roll of one die with no modifier, ignoring the form.
    pub fn quick_request(die: DieType) -> RollRequest {
        RollRequest::Standard(DiceSpec::single(die))
    }

    /// Preview of what the roll button will throw.
    pub fn formula(&self) -> String {
        self.request().label()
    }
}
