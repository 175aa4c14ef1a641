//! TUI widgets for the dice roller

pub mod controls;
pub mod dice_roll;
pub mod history;
pub mod status_bar;

pub use controls::ControlsWidget;
pub use dice_roll::{DiceAnimationState, DiceRollWidget};
pub use history::HistoryWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
