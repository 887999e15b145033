use std::io::{self, BufRead, Write};

use colored::Colorize;
use tracing::debug;

use crate::config::{SessionConfig, TournamentConfig};
use crate::display::report_view;
use crate::report::{HandReport, HandState};
use crate::tokens::token_value;
use crate::units::Amount;

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

struct QuitSession;

fn prompt(message: &str, default: Option<&str>, reader: &mut dyn BufRead, writer: &mut dyn Write) -> String {
    if let Some(d) = default {
        write!(writer, "{} [{}]: ", message, d).ok();
    } else {
        write!(writer, "{}: ", message).ok();
    }
    writer.flush().ok();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => "q".to_string(),
        Ok(_) => {
            let trimmed = line.trim().to_string();
            if trimmed.is_empty() {
                default.unwrap_or("").to_string()
            } else {
                trimmed
            }
        }
        Err(_) => "q".to_string(),
    }
}

fn prompt_yn(message: &str, default: &str, reader: &mut dyn BufRead, writer: &mut dyn Write) -> Option<bool> {
    let answer = prompt(&format!("{} (y/n)", message), Some(default), reader, writer);
    if answer.to_lowercase() == "q" {
        return None;
    }
    Some(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

/// Parse a typed amount, ignoring currency signs and digit separators.
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '€' | '$' | '_' | ' '))
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// `t5`, `T5` or `tier5` select a token tier.
pub fn parse_tier(text: &str) -> Option<u32> {
    let lower = text.trim().to_lowercase();
    let digits = lower
        .strip_prefix("tier")
        .or_else(|| lower.strip_prefix('t'))?;
    digits.trim().parse().ok()
}

fn prompt_amount(
    message: &str,
    default: f64,
    positive: bool,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<f64, QuitSession> {
    loop {
        let answer = prompt(message, Some(&format_default(default)), reader, writer);
        if answer.eq_ignore_ascii_case("q") {
            return Err(QuitSession);
        }
        match parse_amount(&answer) {
            Some(v) if !positive || v > 0.0 => return Ok(v),
            _ => {
                let hint = if positive { "a positive number" } else { "a number >= 0" };
                writeln!(writer, "  {} Enter {}.", "Invalid number.".red(), hint).ok();
            }
        }
    }
}

fn prompt_token(
    default: f64,
    buy_in: f64,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<f64, QuitSession> {
    loop {
        let answer = prompt(
            "  Villain token avg value (or tier, e.g. t5)",
            Some(&format_default(default)),
            reader,
            writer,
        );
        if answer.eq_ignore_ascii_case("q") {
            return Err(QuitSession);
        }
        if let Some(tier) = parse_tier(&answer) {
            match token_value(tier, buy_in) {
                Ok(v) => {
                    writeln!(writer, "  Tier {} token: {:.2}", tier, v).ok();
                    return Ok(v);
                }
                Err(e) => {
                    writeln!(writer, "  {}", e.to_string().red()).ok();
                    continue;
                }
            }
        }
        match parse_amount(&answer) {
            Some(v) => return Ok(v),
            None => {
                writeln!(writer, "  {} Enter a value or a tier.", "Invalid number.".red()).ok();
            }
        }
    }
}

fn format_default(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

pub fn session_command(config: &SessionConfig) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();
    run_interactive_session(config, &mut reader, &mut writer);
}

pub fn run_interactive_session(config: &SessionConfig, reader: &mut dyn BufRead, writer: &mut dyn Write) {
    writeln!(writer).ok();
    writeln!(writer, "{}", "Space KO session \u{2014} bounty-aware hand advisor".cyan().bold()).ok();
    writeln!(writer, "Type {} at any prompt to quit. Press enter to keep a default.\n", "'q'".bold()).ok();

    let mut config = *config;
    match setup_tournament(&config.tournament, reader, writer) {
        Ok(tournament) => config.tournament = tournament,
        Err(QuitSession) => {
            writeln!(writer, "\n{}\n", "Good luck at the tables.".cyan().bold()).ok();
            return;
        }
    }

    let mut hand = HandState::default();
    loop {
        match play_one_hand(&config, &hand, reader, writer) {
            Ok(entered) => hand = entered,
            Err(QuitSession) => {
                writeln!(writer, "\n{}\n", "Good luck at the tables.".cyan().bold()).ok();
                return;
            }
        }

        match prompt_yn("\nAnother hand?", "y", reader, writer) {
            Some(true) => continue,
            _ => {
                writeln!(writer, "\n{}\n", "Good luck at the tables.".cyan().bold()).ok();
                return;
            }
        }
    }
}

fn setup_tournament(
    defaults: &TournamentConfig,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<TournamentConfig, QuitSession> {
    writeln!(writer, "  {}", "Tournament setup".bold()).ok();
    let buy_in = prompt_amount("  Buy-in", defaults.buy_in, true, reader, writer)?;
    let starting_stack = prompt_amount("  Starting stack (chips)", defaults.starting_stack, true, reader, writer)?;
    let tournament = TournamentConfig::new(buy_in, starting_stack);
    debug!(?tournament, "tournament setup");
    Ok(tournament)
}

/// Prompts for one hand and prints its report. Returns what was entered so
/// the next hand can offer it as defaults.
fn play_one_hand(
    config: &SessionConfig,
    previous: &HandState,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<HandState, QuitSession> {
    writeln!(writer, "\n  {}", "New hand".bold()).ok();
    let big_blind = prompt_amount("  Current big blind (chips)", previous.current_big_blind, false, reader, writer)?;
    let token = prompt_token(previous.opponent_token_value, config.tournament.buy_in, reader, writer)?;
    let pot = prompt_amount("  Pot before bet (BB)", previous.pot_before_bet.value, false, reader, writer)?;
    let call = prompt_amount("  Amount to call (BB)", previous.amount_to_call.value, false, reader, writer)?;
    let flop_pot = prompt_amount("  Pot on flop (BB)", previous.pot_on_flop.value, false, reader, writer)?;
    let stack = prompt_amount("  Effective stack (BB)", previous.effective_stack.value, false, reader, writer)?;

    let hand = HandState {
        current_big_blind: big_blind,
        opponent_token_value: token,
        pot_before_bet: Amount::bb(pot),
        amount_to_call: Amount::bb(call),
        pot_on_flop: Amount::bb(flop_pot),
        effective_stack: Amount::bb(stack),
        facing_shove: false,
    };
    let report = HandReport::compute(config, &hand);
    write!(writer, "{}", report_view(&report)).ok();
    Ok(hand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("5"), Some(5.0));
        assert_eq!(parse_amount(" 12.5€ "), Some(12.5));
        assert_eq!(parse_amount("20_000"), Some(20_000.0));
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_parse_tier() {
        assert_eq!(parse_tier("t5"), Some(5));
        assert_eq!(parse_tier("Tier 12"), Some(12));
        assert_eq!(parse_tier("5"), None);
        assert_eq!(parse_tier("tx"), None);
    }

    #[test]
    fn test_format_default() {
        assert_eq!(format_default(200.0), "200");
        assert_eq!(format_default(2.5), "2.5");
    }
}
