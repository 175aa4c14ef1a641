//! Dice value types.
//!
//! Supports the standard D&D die set, `XdY+Z` notation for a single die
//! type, and the two-d20 advantage/disadvantage roll.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Largest number of dice a single roll may request.
pub const MAX_QUANTITY: u32 = 100;

/// Error type for dice parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    #[error("Invalid die size: {0}")]
    InvalidDieSize(u32),
    #[error("Invalid dice quantity: {0} (expected 1..={max})", max = MAX_QUANTITY)]
    InvalidQuantity(i64),
}

/// Standard D&D die types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum DieType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieType {
    /// Every supported die, smallest first.
    pub const ALL: [DieType; 7] = [
        DieType::D4,
        DieType::D6,
        DieType::D8,
        DieType::D10,
        DieType::D12,
        DieType::D20,
        DieType::D100,
    ];

    pub fn sides(&self) -> u32 {
        match self {
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
            DieType::D100 => 100,
        }
    }

    pub fn from_sides(sides: u32) -> Option<DieType> {
        match sides {
            4 => Some(DieType::D4),
            6 => Some(DieType::D6),
            8 => Some(DieType::D8),
            10 => Some(DieType::D10),
            12 => Some(DieType::D12),
            20 => Some(DieType::D20),
            100 => Some(DieType::D100),
            _ => None,
        }
    }

    /// Position of this die in [`DieType::ALL`].
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or(0)
    }

    /// The next larger die, wrapping from d100 back to d4.
    pub fn next(self) -> DieType {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The next smaller die, wrapping from d4 to d100.
    pub fn previous(self) -> DieType {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl From<DieType> for u32 {
    fn from(die: DieType) -> u32 {
        die.sides()
    }
}

impl TryFrom<u32> for DieType {
    type Error = DiceError;

    fn try_from(sides: u32) -> Result<Self, Self::Error> {
        DieType::from_sides(sides).ok_or(DiceError::InvalidDieSize(sides))
    }
}

impl FromStr for DieType {
    type Err = DiceError;

    /// Accepts `20` as well as `d20` / `D20`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let digits = s.strip_prefix('d').unwrap_or(&s);
        let sides: u32 = digits
            .parse()
            .map_err(|_| DiceError::InvalidNotation(s.clone()))?;
        DieType::try_from(sides)
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// A requested roll: how many of which die, plus a flat modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSpec {
    pub die: DieType,
    pub quantity: u32,
    pub modifier: i32,
}

impl DiceSpec {
    /// Build a spec, clamping quantity into `1..=MAX_QUANTITY`.
    pub fn new(die: DieType, quantity: u32, modifier: i32) -> Self {
        Self {
            die,
            quantity: quantity.clamp(1, MAX_QUANTITY),
            modifier,
        }
    }

    /// One die with no modifier.
    pub fn single(die: DieType) -> Self {
        Self::new(die, 1, 0)
    }

    /// Validate raw input from outside the crate.
    pub fn try_new(sides: u32, quantity: i64, modifier: i32) -> Result<Self, DiceError> {
        let die = DieType::try_from(sides)?;
        if quantity < 1 || quantity > i64::from(MAX_QUANTITY) {
            return Err(DiceError::InvalidQuantity(quantity));
        }
        Ok(Self {
            die,
            quantity: quantity as u32,
            modifier,
        })
    }

    /// Parse `[N]dS[(+|-)M]`, e.g. `d20`, `3d6+2`, `2d8 - 1`.
    pub fn parse(notation: &str) -> Result<Self, DiceError> {
        let cleaned: String = notation
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if cleaned.is_empty() {
            return Err(DiceError::InvalidNotation(notation.to_string()));
        }
        let invalid = || DiceError::InvalidNotation(cleaned.clone());

        let d_pos = cleaned.find('d').ok_or_else(invalid)?;
        let count_str = &cleaned[..d_pos];
        let rest = &cleaned[d_pos + 1..];

        let quantity = if count_str.is_empty() {
            1
        } else {
            parse_digits(count_str).ok_or_else(invalid)?
        };

        let (sides_str, modifier) = match rest.find(|c: char| c == '+' || c == '-') {
            Some(pos) => {
                let magnitude = parse_digits(&rest[pos + 1..]).ok_or_else(invalid)?;
                let signed = if rest[pos..].starts_with('-') {
                    -magnitude
                } else {
                    magnitude
                };
                let modifier = i32::try_from(signed).map_err(|_| invalid())?;
                (&rest[..pos], modifier)
            }
            None => (rest, 0),
        };

        let sides = parse_digits(sides_str)
            .and_then(|sides| u32::try_from(sides).ok())
            .ok_or_else(invalid)?;
        Self::try_new(sides, quantity, modifier)
    }
}

/// Unsigned decimal digits only; `str::parse` alone would also take a sign.
fn parse_digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl FromStr for DiceSpec {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiceSpec::parse(s)
    }
}

impl fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quantity, self.die)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// Advantage state for the two-d20 roll.
///
/// Both modes sum the two dice; the mode only labels the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvantageMode {
    Advantage,
    Disadvantage,
}

impl AdvantageMode {
    pub fn label(&self) -> &'static str {
        match self {
            AdvantageMode::Advantage => "advantage",
            AdvantageMode::Disadvantage => "disadvantage",
        }
    }
}

impl fmt::Display for AdvantageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the caller asked the engine to roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollRequest {
    Standard(DiceSpec),
    WithAdvantage { mode: AdvantageMode, modifier: i32 },
}

impl RollRequest {
    pub fn mode(&self) -> Option<AdvantageMode> {
        match *self {
            RollRequest::Standard(_) => None,
            RollRequest::WithAdvantage { mode, .. } => Some(mode),
        }
    }

    /// Notation for what will be thrown, e.g. `3d6+2` or
    /// `2d20 (advantage) + 2`.
    pub fn label(&self) -> String {
        match *self {
            RollRequest::Standard(spec) => spec.to_string(),
            RollRequest::WithAdvantage { mode, modifier } => {
                format!("2d20 ({mode}){}", signed_suffix(modifier))
            }
        }
    }
}

impl From<DiceSpec> for RollRequest {
    fn from(spec: DiceSpec) -> Self {
        RollRequest::Standard(spec)
    }
}

/// Complete result of one roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub id: Uuid,
    #[serde(rename = "die_sides")]
    pub die: DieType,
    pub results: Vec<u32>,
    pub modifier: i32,
    pub total: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<AdvantageMode>,
    pub created_at: DateTime<Utc>,
}

impl RollOutcome {
    /// Assemble an outcome from drawn values; the total is derived here
    /// so it always equals the dice sum plus the modifier.
    pub fn from_results(
        die: DieType,
        results: Vec<u32>,
        modifier: i32,
        mode: Option<AdvantageMode>,
    ) -> Self {
        let dice_sum: i64 = results.iter().map(|&r| i64::from(r)).sum();
        Self {
            id: Uuid::new_v4(),
            die,
            total: dice_sum + i64::from(modifier),
            results,
            modifier,
            mode,
            created_at: Utc::now(),
        }
    }

    pub fn quantity(&self) -> usize {
        self.results.len()
    }

    pub fn dice_sum(&self) -> i64 {
        self.results.iter().map(|&r| i64::from(r)).sum()
    }

    /// Short description of what was rolled, e.g. `3d6+2` or
    /// `2d20 (advantage) + 2`.
    pub fn label(&self) -> String {
        match self.mode {
            Some(mode) => format!(
                "{}{} ({mode}){}",
                self.quantity(),
                self.die,
                signed_suffix(self.modifier)
            ),
            None => {
                let mut label = format!("{}{}", self.quantity(), self.die);
                match self.modifier {
                    0 => {}
                    m if m > 0 => label.push_str(&format!("+{m}")),
                    m => label.push_str(&m.to_string()),
                }
                label
            }
        }
    }

    /// Format the individual dice results for display.
    pub fn dice_display(&self) -> String {
        let dice = self
            .results
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(" + ");
        format!("[{dice}]{}", signed_suffix(self.modifier))
    }

    /// Breakdown with the total, e.g. `[3 + 4] + 2 = 9`.
    pub fn formula(&self) -> String {
        format!("{} = {}", self.dice_display(), self.total)
    }

    /// A single plain d20 that came up 20.
    pub fn natural_20(&self) -> bool {
        self.single_d20() == Some(20)
    }

    /// A single plain d20 that came up 1.
    pub fn natural_1(&self) -> bool {
        self.single_d20() == Some(1)
    }

    fn single_d20(&self) -> Option<u32> {
        if self.die == DieType::D20 && self.mode.is_none() && self.results.len() == 1 {
            self.results.first().copied()
        } else {
            None
        }
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.formula())
    }
}

/// ` + 3`, ` - 3`, or nothing for zero.
pub(crate) fn signed_suffix(modifier: i32) -> String {
    match modifier {
        0 => String::new(),
        m if m > 0 => format!(" + {m}"),
        m => format!(" - {}", m.unsigned_abs()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let spec = DiceSpec::parse("1d20").unwrap();
        assert_eq!(spec.die, DieType::D20);
        assert_eq!(spec.quantity, 1);
        assert_eq!(spec.modifier, 0);
    }

    #[test]
    fn test_parse_implicit_count() {
        let spec = DiceSpec::parse("D8").unwrap();
        assert_eq!(spec, DiceSpec::new(DieType::D8, 1, 0));
    }

    #[test]
    fn test_parse_with_modifier() {
        assert_eq!(DiceSpec::parse("3d6+2").unwrap().modifier, 2);
        assert_eq!(DiceSpec::parse("2d8 - 1").unwrap().modifier, -1);
        assert_eq!(DiceSpec::parse("4d100").unwrap().die, DieType::D100);
    }

    #[test]
    fn test_parse_rejects_double_sign() {
        for notation in ["1d6--3", "1d6+-3", "1d6-+3", "+2d6", "-2d6", "d+6"] {
            assert!(
                matches!(DiceSpec::parse(notation), Err(DiceError::InvalidNotation(_))),
                "{notation} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_modifier_overflow() {
        for notation in ["1d6--2147483648", "1d6+2147483648", "1d6-99999999999999999999"] {
            assert!(
                matches!(DiceSpec::parse(notation), Err(DiceError::InvalidNotation(_))),
                "{notation} should be rejected"
            );
        }
        assert_eq!(DiceSpec::parse("1d6-2147483648").unwrap().modifier, i32::MIN);
        assert_eq!(DiceSpec::parse("1d6+2147483647").unwrap().modifier, i32::MAX);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            DiceSpec::parse("1d7"),
            Err(DiceError::InvalidDieSize(7))
        ));
        assert!(matches!(
            DiceSpec::parse("0d6"),
            Err(DiceError::InvalidQuantity(0))
        ));
        assert!(matches!(
            DiceSpec::parse("101d6"),
            Err(DiceError::InvalidQuantity(101))
        ));
        assert!(matches!(
            DiceSpec::parse("fireball"),
            Err(DiceError::InvalidNotation(_))
        ));
        assert!(DiceSpec::parse("").is_err());
        assert!(DiceSpec::parse("2d6+").is_err());
    }

    #[test]
    fn test_new_clamps_quantity() {
        assert_eq!(DiceSpec::new(DieType::D6, 0, 0).quantity, 1);
        assert_eq!(DiceSpec::new(DieType::D6, 500, 0).quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_spec_display() {
        assert_eq!(DiceSpec::new(DieType::D6, 3, 2).to_string(), "3d6+2");
        assert_eq!(DiceSpec::new(DieType::D8, 2, -1).to_string(), "2d8-1");
        assert_eq!(DiceSpec::single(DieType::D20).to_string(), "1d20");
    }

    #[test]
    fn test_die_cycling() {
        assert_eq!(DieType::D4.next(), DieType::D6);
        assert_eq!(DieType::D100.next(), DieType::D4);
        assert_eq!(DieType::D4.previous(), DieType::D100);
        assert_eq!("d12".parse::<DieType>().unwrap(), DieType::D12);
        assert_eq!("100".parse::<DieType>().unwrap(), DieType::D100);
    }

    #[test]
    fn test_advantage_request_label() {
        let request = RollRequest::WithAdvantage {
            mode: AdvantageMode::Disadvantage,
            modifier: 3,
        };
        assert_eq!(request.mode(), Some(AdvantageMode::Disadvantage));
        assert_eq!(request.label(), "2d20 (disadvantage) + 3");
    }

    #[test]
    fn test_outcome_display() {
        let outcome = RollOutcome::from_results(DieType::D6, vec![3, 4, 1], 2, None);
        assert_eq!(outcome.total, 10);
        assert_eq!(outcome.label(), "3d6+2");
        assert_eq!(outcome.formula(), "[3 + 4 + 1] + 2 = 10");

        let outcome = RollOutcome::from_results(DieType::D20, vec![12, 5], -1, Some(AdvantageMode::Advantage));
        assert_eq!(outcome.label(), "2d20 (advantage) - 1");
        assert_eq!(outcome.formula(), "[12 + 5] - 1 = 16");
    }

    #[test]
    fn test_natural_results() {
        let crit = RollOutcome::from_results(DieType::D20, vec![20], 0, None);
        assert!(crit.natural_20());
        let fumble = RollOutcome::from_results(DieType::D20, vec![1], 4, None);
        assert!(fumble.natural_1());

        // Two-d20 rolls are summed, so neither die counts as a natural result.
        let adv = RollOutcome::from_results(DieType::D20, vec![20, 3], 0, Some(AdvantageMode::Advantage));
        assert!(!adv.natural_20());
    }

    #[test]
    fn test_outcome_serializes_die_as_sides() {
        let outcome = RollOutcome::from_results(DieType::D12, vec![7], 0, None);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["die_sides"], 12);
        assert!(json.get("mode").is_none());
    }
}
