//! Roll evaluation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dice::{AdvantageMode, DiceSpec, DieType, RollOutcome, RollRequest, MAX_QUANTITY};

/// Evaluates dice specs against an owned random source.
///
/// The engine never fails. Quantities outside `1..=MAX_QUANTITY` (possible
/// through the public fields or deserialization) are clamped when drawing.
#[derive(Debug, Clone)]
pub struct RollEngine<R = StdRng> {
    rng: R,
}

impl RollEngine<StdRng> {
    /// Engine seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic engine (useful for testing and replays).
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RollEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RollEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Roll `quantity` dice of the spec's type and add the modifier.
    pub fn evaluate(&mut self, spec: &DiceSpec) -> RollOutcome {
        let results = self.draw(spec.die, spec.quantity);
        RollOutcome::from_results(spec.die, results, spec.modifier, None)
    }

    /// Roll two d20s and sum both.
    ///
    /// No keep-highest or keep-lowest is applied for either mode: the
    /// total is `r1 + r2 + modifier`, and the mode is only recorded.
    pub fn evaluate_with_advantage(&mut self, modifier: i32, mode: AdvantageMode) -> RollOutcome {
        let results = self.draw(DieType::D20, 2);
        RollOutcome::from_results(DieType::D20, results, modifier, Some(mode))
    }

    pub fn resolve(&mut self, request: &RollRequest) -> RollOutcome {
        match *request {
            RollRequest::Standard(spec) => self.evaluate(&spec),
            RollRequest::WithAdvantage { mode, modifier } => {
                self.evaluate_with_advantage(modifier, mode)
            }
        }
    }

    fn draw(&mut self, die: DieType, count: u32) -> Vec<u32> {
        (0..count.clamp(1, MAX_QUANTITY))
            .map(|_| self.rng.gen_range(1..=die.sides()))
            .collect()
    }
}

/// Convenience function to roll a spec with the thread-local RNG.
pub fn evaluate(spec: &DiceSpec) -> RollOutcome {
    RollEngine::with_rng(rand::thread_rng()).evaluate(spec)
}

/// Convenience function for the two-d20 roll.
pub fn evaluate_with_advantage(modifier: i32, mode: AdvantageMode) -> RollOutcome {
    RollEngine::with_rng(rand::thread_rng()).evaluate_with_advantage(modifier, mode)
}
