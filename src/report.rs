//! Everything derived for one hand, recomputed from scratch each time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bounty::BountyConversion;
use crate::config::SessionConfig;
use crate::error::KoResult;
use crate::geometric::{geometric_sizing, GeometricSizing, RIVER_ALL_IN, TURN_ALL_IN};
use crate::odds::{
    all_in_required_equity_with, required_equity_with, CallAdvice, EquityRequirement,
};
use crate::spr::{spr_and_band_with, SprResult};
use crate::units::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandState {
    /// Current big blind in chips.
    pub current_big_blind: f64,
    /// Average token value of the player faced, in currency.
    pub opponent_token_value: f64,
    pub pot_before_bet: Amount,
    pub amount_to_call: Amount,
    pub pot_on_flop: Amount,
    pub effective_stack: Amount,
    /// The bet faced is a shove not yet counted in `pot_before_bet`.
    pub facing_shove: bool,
}

impl Default for HandState {
    fn default() -> Self {
        HandState {
            current_big_blind: 200.0,
            opponent_token_value: 5.0,
            pot_before_bet: Amount::bb(10.0),
            amount_to_call: Amount::bb(5.0),
            pot_on_flop: Amount::bb(6.0),
            effective_stack: Amount::bb(100.0),
            facing_shove: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandReport {
    pub bounty: BountyConversion,
    pub pot_before_bb: f64,
    pub amount_to_call_bb: f64,
    pub pot_on_flop_bb: f64,
    pub effective_stack_bb: f64,
    pub equity: EquityRequirement,
    pub call_advice: CallAdvice,
    pub spr: SprResult,
    pub turn: GeometricSizing,
    pub river: GeometricSizing,
}

impl HandReport {
    pub fn compute(config: &SessionConfig, hand: &HandState) -> Self {
        let bb = hand.current_big_blind;
        let bounty = BountyConversion::compute(config, bb, hand.opponent_token_value);

        let pot_before_bb = hand.pot_before_bet.in_big_blinds(bb).0;
        let amount_to_call_bb = hand.amount_to_call.in_big_blinds(bb).0;
        let pot_on_flop_bb = hand.pot_on_flop.in_big_blinds(bb).0;
        let effective_stack_bb = hand.effective_stack.in_big_blinds(bb).0;

        let th = &config.thresholds;
        let equity = if hand.facing_shove {
            all_in_required_equity_with(pot_before_bb, amount_to_call_bb, bounty.bounty_bb, th)
        } else {
            required_equity_with(pot_before_bb, amount_to_call_bb, bounty.bounty_bb, th)
        };
        let call_advice = CallAdvice::classify(equity.bounty_adjusted_pct, th);
        let spr = spr_and_band_with(effective_stack_bb, pot_on_flop_bb, th);
        let turn = geometric_sizing(effective_stack_bb, pot_on_flop_bb, TURN_ALL_IN);
        let river = geometric_sizing(effective_stack_bb, pot_on_flop_bb, RIVER_ALL_IN);

        debug!(
            bounty_bb = bounty.bounty_bb,
            adjusted_pct = equity.bounty_adjusted_pct,
            spr = spr.ratio,
            "hand report computed"
        );

        HandReport {
            bounty,
            pot_before_bb,
            amount_to_call_bb,
            pot_on_flop_bb,
            effective_stack_bb,
            equity,
            call_advice,
            spr,
            turn,
            river,
        }
    }

    pub fn to_json(&self) -> KoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
