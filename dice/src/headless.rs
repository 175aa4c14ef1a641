//! Headless mode for the dice roller.
//!
//! A line-oriented protocol on stdin/stdout for scripting and automated
//! testing. Rolls honour the same publication delay as the TUI.

use std::io::{self, BufRead, Write};

use dice_core::{AdvantageMode, DiceError, DiceSpec, RollOutcome, RollRequest, RollSession, RollerConfig};
use thiserror::Error;

/// Errors from parsing a headless input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Unknown command: #{0}. Type #help for help.")]
    UnknownCommand(String),
}

/// One line of headless input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessCommand {
    Roll(RollRequest),
    History,
    Clear,
    Help,
    Quit,
}

impl HeadlessCommand {
    /// Parse a non-empty, trimmed input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        if let Some(command) = line.strip_prefix('#') {
            let mut parts = command.split_whitespace();
            let name = parts.next().unwrap_or_default().to_lowercase();
            let argument = parts.next();
            return match name.as_str() {
                "adv" | "advantage" => Ok(Self::advantage(AdvantageMode::Advantage, argument)?),
                "dis" | "disadvantage" => {
                    Ok(Self::advantage(AdvantageMode::Disadvantage, argument)?)
                }
                "history" => Ok(HeadlessCommand::History),
                "clear" => Ok(HeadlessCommand::Clear),
                "help" => Ok(HeadlessCommand::Help),
                "quit" | "exit" => Ok(HeadlessCommand::Quit),
                _ => Err(CommandError::UnknownCommand(name)),
            };
        }

        let notation = line.strip_prefix("roll ").unwrap_or(line);
        let spec = DiceSpec::parse(notation)?;
        Ok(HeadlessCommand::Roll(RollRequest::Standard(spec)))
    }

    fn advantage(mode: AdvantageMode, argument: Option<&str>) -> Result<Self, CommandError> {
        let modifier = match argument {
            Some(text) => text
                .parse()
                .map_err(|_| CommandError::InvalidModifier(text.to_string()))?,
            None => 0,
        };
        Ok(HeadlessCommand::Roll(RollRequest::WithAdvantage { mode, modifier }))
    }
}

/// Render one outcome as a `[ROLL]` line or a JSON object.
pub fn format_outcome(outcome: &RollOutcome, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string(outcome)?);
    }
    let mut line = format!("[ROLL] {outcome}");
    if outcome.natural_20() {
        line.push_str(" (natural 20!)");
    } else if outcome.natural_1() {
        line.push_str(" (natural 1)");
    }
    Ok(line)
}

fn print_help() {
    println!("[HELP]");
    println!("  <notation>          - Roll dice, e.g. 3d6+2, d20, 2d8-1");
    println!("  roll <notation>     - Same as above");
    println!("  #adv [modifier]     - Roll 2d20 with advantage");
    println!("  #dis [modifier]     - Roll 2d20 with disadvantage");
    println!("  #history            - Show recent rolls, newest first");
    println!("  #clear              - Clear the history");
    println!("  #help               - Show this help");
    println!("  #quit               - Exit");
}

/// Run the roller in headless mode until `#quit` or end of input.
pub async fn run_headless(config: &RollerConfig, json: bool) -> anyhow::Result<()> {
    let mut session = RollSession::new(config);

    if !json {
        println!("=== D&D Dice Roller (headless) ===");
        println!("Roll delay: {} ms", session.roll_delay().as_millis());
        print_help();
        println!();
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match HeadlessCommand::parse(line) {
            Ok(command) => command,
            Err(e) => {
                println!("[ERROR] {e}");
                stdout.flush().ok();
                continue;
            }
        };

        match command {
            HeadlessCommand::Roll(request) => {
                if let Err(e) = session.request(request) {
                    println!("[ERROR] {e}");
                } else if let Some(outcome) = session.wait_for_publish().await {
                    println!("{}", format_outcome(outcome, json)?);
                }
            }
            HeadlessCommand::History => {
                if json {
                    println!("{}", serde_json::to_string(session.history())?);
                } else if session.history().is_empty() {
                    println!("[HISTORY] No rolls yet");
                } else {
                    println!("[HISTORY]");
                    for outcome in session.history() {
                        println!(
                            "  {} {outcome}",
                            outcome.created_at.format("%H:%M:%S")
                        );
                    }
                }
            }
            HeadlessCommand::Clear => {
                session.clear_history();
                if !json {
                    println!("[CLEARED] History cleared");
                }
            }
            HeadlessCommand::Help => print_help(),
            HeadlessCommand::Quit => {
                if !json {
                    println!("Goodbye!");
                }
                break;
            }
        }
        stdout.flush().ok();
    }

    session.cancel();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_core::DieType;

    #[test]
    fn test_parse_notation() {
        assert_eq!(
            HeadlessCommand::parse("3d6+2"),
            Ok(HeadlessCommand::Roll(RollRequest::Standard(DiceSpec::new(
                DieType::D6,
                3,
                2
            ))))
        );
        assert_eq!(
            HeadlessCommand::parse("roll d20"),
            Ok(HeadlessCommand::Roll(RollRequest::Standard(DiceSpec::single(
                DieType::D20
            ))))
        );
    }

    #[test]
    fn test_parse_advantage() {
        assert_eq!(
            HeadlessCommand::parse("#adv +2"),
            Ok(HeadlessCommand::Roll(RollRequest::WithAdvantage {
                mode: AdvantageMode::Advantage,
                modifier: 2
            }))
        );
        assert_eq!(
            HeadlessCommand::parse("#dis"),
            Ok(HeadlessCommand::Roll(RollRequest::WithAdvantage {
                mode: AdvantageMode::Disadvantage,
                modifier: 0
            }))
        );
        assert!(matches!(
            HeadlessCommand::parse("#adv lots"),
            Err(CommandError::InvalidModifier(_))
        ));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(HeadlessCommand::parse("#history"), Ok(HeadlessCommand::History));
        assert_eq!(HeadlessCommand::parse("#clear"), Ok(HeadlessCommand::Clear));
        assert_eq!(HeadlessCommand::parse("#HELP"), Ok(HeadlessCommand::Help));
        assert_eq!(HeadlessCommand::parse("#exit"), Ok(HeadlessCommand::Quit));
        assert_eq!(
            HeadlessCommand::parse("#save"),
            Err(CommandError::UnknownCommand("save".to_string()))
        );
    }

    #[test]
    fn test_parse_bad_notation() {
        assert!(matches!(
            HeadlessCommand::parse("3d7"),
            Err(CommandError::Dice(DiceError::InvalidDieSize(7)))
        ));
        assert!(matches!(
            HeadlessCommand::parse("fireball"),
            Err(CommandError::Dice(DiceError::InvalidNotation(_)))
        ));
        for line in ["1d6--2147483648", "roll 1d6+-3", "1d6--3"] {
            assert!(matches!(
                HeadlessCommand::parse(line),
                Err(CommandError::Dice(DiceError::InvalidNotation(_)))
            ));
        }
    }

    #[test]
    fn test_format_outcome() {
        let outcome = RollOutcome::from_results(DieType::D6, vec![3, 4, 1], 2, None);
        assert_eq!(
            format_outcome(&outcome, false).unwrap(),
            "[ROLL] 3d6+2: [3 + 4 + 1] + 2 = 10"
        );

        let nat = RollOutcome::from_results(DieType::D20, vec![20], 0, None);
        assert!(format_outcome(&nat, false).unwrap().ends_with("(natural 20!)"));

        let json = format_outcome(&outcome, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["die_sides"], 6);
        assert_eq!(value["total"], 10);
    }
}
