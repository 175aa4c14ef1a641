//! D&D dice rolling engine.
//!
//! This crate provides:
//! - Dice value types and `XdY+Z` notation
//! - A roll engine over any `rand::Rng`
//! - A bounded, newest-first roll history
//! - Roll controls that validate user input before it reaches the engine
//! - A roll session that publishes each outcome after a rolling delay
//!
//! # Quick Start
//!
//! ```ignore
//! use dice_core::{DiceSpec, RollRequest, RollSession, RollerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = RollSession::new(&RollerConfig::from_env()?);
//!
//!     session.request(RollRequest::Standard(DiceSpec::parse("3d6+2")?))?;
//!     if let Some(outcome) = session.wait_for_publish().await {
//!         println!("{outcome}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controls;
pub mod dice;
pub mod engine;
pub mod history;
pub mod session;

// Primary public API
pub use config::{ConfigError, RollerConfig, DEFAULT_ROLL_DELAY};
pub use controls::RollControls;
pub use dice::{AdvantageMode, DiceError, DiceSpec, DieType, RollOutcome, RollRequest, MAX_QUANTITY};
pub use engine::RollEngine;
pub use history::{append_to_history, clear_history, RollHistory, HISTORY_CAPACITY};
pub use session::{RollSession, RollTicket, SessionError};
