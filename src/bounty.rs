//! Bounty token value expressed in chips and big blinds.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::{BandThresholds, SessionConfig};
use crate::units::{non_negative, safe_div};

/// Immediate cash value of a token in big blinds.
///
/// Zero when either the blind or the chip value is zero.
pub fn convert_bounty(
    buy_in: f64,
    starting_stack: f64,
    current_big_blind: f64,
    token_value: f64,
    cash_share: f64,
) -> f64 {
    let chip_value = safe_div(non_negative(buy_in), non_negative(starting_stack));
    bounty_bb_at(chip_value, current_big_blind, token_value, cash_share)
}

fn bounty_bb_at(chip_value: f64, current_big_blind: f64, token_value: f64, cash_share: f64) -> f64 {
    let one_bb = non_negative(current_big_blind) * chip_value;
    if one_bb == 0.0 {
        debug!(current_big_blind, chip_value, "big blind has no currency value, bounty is 0 BB");
        return 0.0;
    }
    safe_div(non_negative(token_value) * clamp_share(cash_share), one_bb)
}

fn clamp_share(share: f64) -> f64 {
    non_negative(share).min(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BountyImpact {
    Low,
    Medium,
    High,
}

impl BountyImpact {
    pub fn classify(bounty_bb: f64, thresholds: &BandThresholds) -> Self {
        let [medium_from, high_above] = thresholds.bounty_impact;
        if bounty_bb < medium_from {
            BountyImpact::Low
        } else if bounty_bb <= high_above {
            BountyImpact::Medium
        } else {
            BountyImpact::High
        }
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            BountyImpact::Low => "Bounty is minor. Play close to standard ranges.",
            BountyImpact::Medium => "Significant factor. Start widening calling ranges.",
            BountyImpact::High => "Major distortion. Defend and shove aggressively.",
        }
    }
}

impl fmt::Display for BountyImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BountyImpact::Low => write!(f, "low impact"),
            BountyImpact::Medium => write!(f, "medium impact"),
            BountyImpact::High => write!(f, "high impact"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenRating {
    LowValue,
    Typical,
    HighValue,
}

impl fmt::Display for TokenRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenRating::LowValue => write!(f, "low value, play standard"),
            TokenRating::Typical => write!(f, "typical"),
            TokenRating::HighValue => write!(f, "high value, adjust strategy"),
        }
    }
}

/// How a token compares to the bounty every player starts with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TokenAssessment {
    pub multiplier: f64,
    pub rating: TokenRating,
}

pub fn rate_token(token_value: f64, starting_bounty: f64, thresholds: &BandThresholds) -> TokenAssessment {
    let multiplier = safe_div(non_negative(token_value), non_negative(starting_bounty));
    let [low_below, high_above] = thresholds.token_rating;
    let rating = if multiplier > high_above {
        TokenRating::HighValue
    } else if multiplier < low_below {
        TokenRating::LowValue
    } else {
        TokenRating::Typical
    };
    TokenAssessment { multiplier, rating }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BountyConversion {
    /// Currency per chip.
    pub chip_value: f64,
    /// Currency value of one big blind at the current level.
    pub one_bb_value: f64,
    pub token_value: f64,
    /// Paid out immediately when the player is eliminated.
    pub cash_value: f64,
    /// Carried onto the winner's own token.
    pub future_token_value: f64,
    pub bounty_chips: f64,
    /// Cash component in big blinds; this is what goes into the pot.
    pub bounty_bb: f64,
    /// Whole token in big blinds.
    pub total_bounty_bb: f64,
    pub impact: BountyImpact,
    pub assessment: TokenAssessment,
}

impl BountyConversion {
    pub fn compute(config: &SessionConfig, current_big_blind: f64, token_value: f64) -> Self {
        let chip_value = config.chip_value();
        let share = clamp_share(config.rules.cash_share);
        let token_value = non_negative(token_value);
        let cash_value = token_value * share;
        let bounty_bb = bounty_bb_at(chip_value, current_big_blind, token_value, share);
        let total_bounty_bb = bounty_bb_at(chip_value, current_big_blind, token_value, 1.0);
        let starting_bounty = config.tournament.starting_bounty(&config.rules);

        BountyConversion {
            chip_value,
            one_bb_value: non_negative(current_big_blind) * chip_value,
            token_value,
            cash_value,
            future_token_value: token_value - cash_value,
            bounty_chips: safe_div(cash_value, chip_value),
            bounty_bb,
            total_bounty_bb,
            impact: BountyImpact::classify(bounty_bb, &config.thresholds),
            assessment: rate_token(token_value, starting_bounty, &config.thresholds),
        }
    }
}

impl fmt::Display for BountyConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounty {:.2} BB ({})", self.bounty_bb, self.impact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_blind() {
        assert_eq!(convert_bounty(10.0, 20_000.0, 0.0, 5.0, 0.5), 0.0);
    }

    #[test]
    fn test_zero_stack() {
        assert_eq!(convert_bounty(10.0, 0.0, 200.0, 5.0, 0.5), 0.0);
    }

    #[test]
    fn test_cash_share_is_clamped() {
        let full = convert_bounty(10.0, 20_000.0, 200.0, 5.0, 1.0);
        assert_eq!(convert_bounty(10.0, 20_000.0, 200.0, 5.0, 3.0), full);
        assert_eq!(convert_bounty(10.0, 20_000.0, 200.0, 5.0, -1.0), 0.0);
    }

    #[test]
    fn test_impact_boundaries() {
        let th = BandThresholds::default();
        assert_eq!(BountyImpact::classify(2.99, &th), BountyImpact::Low);
        assert_eq!(BountyImpact::classify(3.0, &th), BountyImpact::Medium);
        assert_eq!(BountyImpact::classify(8.0, &th), BountyImpact::Medium);
        assert_eq!(BountyImpact::classify(8.01, &th), BountyImpact::High);
    }
}
