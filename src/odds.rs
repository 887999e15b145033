//! Required equity to call, with and without the bounty in the pot.
//!
//! All amounts are in big blinds. Percentages are 0-100.

use std::fmt;

use serde::Serialize;

use crate::config::{BandThresholds, DEFAULT_THRESHOLDS};
use crate::units::{non_negative, safe_div};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountBand {
    Minor,
    Noticeable,
    Significant,
}

impl DiscountBand {
    pub fn classify(discount: f64, thresholds: &BandThresholds) -> Self {
        let [noticeable_from, significant_above] = thresholds.discount;
        if discount < noticeable_from {
            DiscountBand::Minor
        } else if discount <= significant_above {
            DiscountBand::Noticeable
        } else {
            DiscountBand::Significant
        }
    }
}

impl fmt::Display for DiscountBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountBand::Minor => write!(f, "minor"),
            DiscountBand::Noticeable => write!(f, "noticeable"),
            DiscountBand::Significant => write!(f, "significant"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquityRequirement {
    pub standard_pct: f64,
    pub bounty_adjusted_pct: f64,
    /// Percentage points saved by the bounty.
    pub discount: f64,
    pub band: DiscountBand,
}

impl EquityRequirement {
    fn from_parts(call: f64, total: f64, bounty_bb: f64, thresholds: &BandThresholds) -> Self {
        let standard_pct = 100.0 * safe_div(call, total);
        let bounty_adjusted_pct = 100.0 * safe_div(call, total + bounty_bb);
        let discount = non_negative(standard_pct - bounty_adjusted_pct);
        EquityRequirement {
            standard_pct,
            bounty_adjusted_pct,
            discount,
            band: DiscountBand::classify(discount, thresholds),
        }
    }
}

impl fmt::Display for EquityRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "need {:.1}% (standard {:.1}%, {} discount)",
            self.bounty_adjusted_pct, self.standard_pct, self.band
        )
    }
}

/// `pot_before` already contains the bet being faced.
pub fn required_equity(pot_before: f64, amount_to_call: f64, bounty_bb: f64) -> EquityRequirement {
    required_equity_with(pot_before, amount_to_call, bounty_bb, &DEFAULT_THRESHOLDS)
}

pub fn required_equity_with(
    pot_before: f64,
    amount_to_call: f64,
    bounty_bb: f64,
    thresholds: &BandThresholds,
) -> EquityRequirement {
    let call = non_negative(amount_to_call);
    let total = non_negative(pot_before) + call;
    EquityRequirement::from_parts(call, total, non_negative(bounty_bb), thresholds)
}

/// Facing a shove that is not yet counted in `pot_before_shove`: the final pot
/// holds the shove and the call.
pub fn all_in_required_equity(
    pot_before_shove: f64,
    amount_to_call: f64,
    bounty_bb: f64,
) -> EquityRequirement {
    all_in_required_equity_with(pot_before_shove, amount_to_call, bounty_bb, &DEFAULT_THRESHOLDS)
}

pub fn all_in_required_equity_with(
    pot_before_shove: f64,
    amount_to_call: f64,
    bounty_bb: f64,
    thresholds: &BandThresholds,
) -> EquityRequirement {
    let call = non_negative(amount_to_call);
    let total = non_negative(pot_before_shove) + call + call;
    EquityRequirement::from_parts(call, total, non_negative(bounty_bb), thresholds)
}

/// EV of calling with `equity` (0-1) when winning also collects the bounty.
pub fn call_ev(equity: f64, pot_before: f64, amount_to_call: f64, bounty_bb: f64) -> f64 {
    let equity = non_negative(equity).min(1.0);
    let win_amount = non_negative(pot_before) + non_negative(bounty_bb);
    equity * win_amount - (1.0 - equity) * non_negative(amount_to_call)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallAdvice {
    AnyTwo,
    ExtremelyWide,
    Wide,
    Standard,
}

impl CallAdvice {
    pub fn classify(adjusted_pct: f64, thresholds: &BandThresholds) -> Self {
        let [any_two, extremely_wide, wide] = thresholds.call_advice;
        if adjusted_pct < any_two {
            CallAdvice::AnyTwo
        } else if adjusted_pct < extremely_wide {
            CallAdvice::ExtremelyWide
        } else if adjusted_pct < wide {
            CallAdvice::Wide
        } else {
            CallAdvice::Standard
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CallAdvice::AnyTwo => "Call with any two cards.",
            CallAdvice::ExtremelyWide => {
                "Call extremely wide: any broadway, any pair, any suited, any ace."
            }
            CallAdvice::Wide => "Call wide: gappers, K-high, all aces.",
            CallAdvice::Standard => "Standard calling range applies.",
        }
    }
}

impl fmt::Display for CallAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallAdvice::AnyTwo => write!(f, "ANY TWO"),
            CallAdvice::ExtremelyWide => write!(f, "EXTREMELY WIDE"),
            CallAdvice::Wide => write!(f, "WIDE"),
            CallAdvice::Standard => write!(f, "STANDARD"),
        }
    }
}

/// Heads-up effective stack: the shorter of the two.
pub fn effective_stack(hero: f64, villain: f64) -> f64 {
    non_negative(hero).min(non_negative(villain))
}
