//! End-to-end checks of the decision engine against hand-worked spots.

use approx::assert_relative_eq;

use spaceko_cli::bounty::{convert_bounty, BountyImpact};
use spaceko_cli::config::{SessionConfig, TournamentConfig};
use spaceko_cli::geometric::{geometric_fraction, geometric_sizing, polynomial_fraction};
use spaceko_cli::odds::{required_equity, CallAdvice};
use spaceko_cli::report::{HandReport, HandState};
use spaceko_cli::spr::{spr_and_band, SprBand};
use spaceko_cli::units::Amount;

// =========================================================================
// Reference spots
// =========================================================================

#[test]
fn audit_bounty_reference() {
    let config = SessionConfig {
        tournament: TournamentConfig::new(10.0, 20_000.0),
        ..SessionConfig::default()
    };
    assert_relative_eq!(config.chip_value(), 0.0005, epsilon = 1e-12);
    assert_relative_eq!(200.0 * config.chip_value(), 0.1, epsilon = 1e-12);
    assert_relative_eq!(convert_bounty(10.0, 20_000.0, 200.0, 5.0, 0.5), 25.0, epsilon = 1e-9);
}

#[test]
fn audit_equity_reference() {
    let req = required_equity(10.0, 5.0, 25.0);
    assert!((req.standard_pct - 33.33).abs() < 0.01);
    assert!((req.bounty_adjusted_pct - 12.5).abs() < 1e-9);
}

#[test]
fn audit_geometric_reference() {
    let r = geometric_fraction(100.0, 10.0, 2);
    let root = (-2.0 + 84.0_f64.sqrt()) / 4.0;
    assert_relative_eq!(r, root, epsilon = 1e-12);
    assert_relative_eq!(polynomial_fraction(10.0, 2), root, max_relative = 1e-9);
}

#[test]
fn audit_geometric_empty_stack() {
    for streets in [2, 3] {
        assert_eq!(geometric_fraction(0.0, 10.0, streets), 0.0);
        assert_eq!(polynomial_fraction(0.0, streets), 0.0);
        assert_eq!(geometric_sizing(0.0, 10.0, streets).first_bet, 0.0);
    }
}

#[test]
fn audit_degenerate_inputs() {
    assert_eq!(spr_and_band(100.0, 0.0).ratio, 0.0);
    assert_eq!(convert_bounty(10.0, 20_000.0, 0.0, 5.0, 0.5), 0.0);
}

// =========================================================================
// Hand report
// =========================================================================

#[test]
fn audit_default_report() {
    let report = HandReport::compute(&SessionConfig::default(), &HandState::default());
    assert_relative_eq!(report.bounty.bounty_bb, 25.0, epsilon = 1e-9);
    assert_eq!(report.bounty.impact, BountyImpact::High);
    assert_relative_eq!(report.equity.bounty_adjusted_pct, 12.5, epsilon = 1e-9);
    assert_eq!(report.call_advice, CallAdvice::AnyTwo);
    assert_relative_eq!(report.spr.ratio, 100.0 / 6.0, epsilon = 1e-9);
    assert_eq!(report.spr.band, SprBand::VeryHigh);
    assert_eq!(report.turn.streets, 2);
    assert_eq!(report.river.streets, 3);
    assert!(report.river.fraction < report.turn.fraction);
}

#[test]
fn audit_report_recomputes_from_inputs() {
    let config = SessionConfig::default();
    let hand = HandState::default();
    let first = HandReport::compute(&config, &hand);
    let second = HandReport::compute(&config, &hand);
    assert_eq!(first, second);
}

#[test]
fn audit_report_chip_inputs_convert_at_boundary() {
    let config = SessionConfig::default();
    let in_bb = HandState::default();
    let in_chips = HandState {
        pot_before_bet: Amount::chips(2_000.0),
        amount_to_call: Amount::chips(1_000.0),
        pot_on_flop: Amount::chips(1_200.0),
        effective_stack: Amount::chips(20_000.0),
        ..HandState::default()
    };
    let a = HandReport::compute(&config, &in_bb);
    let b = HandReport::compute(&config, &in_chips);
    assert_relative_eq!(a.pot_before_bb, b.pot_before_bb, epsilon = 1e-9);
    assert_relative_eq!(a.equity.bounty_adjusted_pct, b.equity.bounty_adjusted_pct, epsilon = 1e-9);
    assert_relative_eq!(a.spr.ratio, b.spr.ratio, epsilon = 1e-9);
    assert_relative_eq!(a.turn.fraction, b.turn.fraction, epsilon = 1e-12);
}

#[test]
fn audit_report_shove_spot() {
    let hand = HandState {
        pot_before_bet: Amount::bb(2.5),
        amount_to_call: Amount::bb(15.0),
        facing_shove: true,
        ..HandState::default()
    };
    let report = HandReport::compute(&SessionConfig::default(), &hand);
    assert_relative_eq!(report.equity.standard_pct, 1500.0 / 32.5, epsilon = 1e-9);
    assert_relative_eq!(report.equity.bounty_adjusted_pct, 1500.0 / 57.5, epsilon = 1e-9);
    assert_eq!(report.call_advice, CallAdvice::Wide);
}

#[test]
fn audit_report_empty_hand() {
    let hand = HandState {
        current_big_blind: 0.0,
        opponent_token_value: 0.0,
        pot_before_bet: Amount::bb(0.0),
        amount_to_call: Amount::bb(0.0),
        pot_on_flop: Amount::bb(0.0),
        effective_stack: Amount::bb(0.0),
        facing_shove: false,
    };
    let report = HandReport::compute(&SessionConfig::default(), &hand);
    assert_eq!(report.bounty.bounty_bb, 0.0);
    assert_eq!(report.equity.standard_pct, 0.0);
    assert_eq!(report.spr.ratio, 0.0);
    assert_eq!(report.turn.fraction, 0.0);
    assert_eq!(report.river.fraction, 0.0);
}

#[test]
fn audit_report_json() {
    let report = HandReport::compute(&SessionConfig::default(), &HandState::default());
    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!((value["bounty"]["bounty_bb"].as_f64().unwrap() - 25.0).abs() < 1e-9);
    assert_eq!(value["spr"]["band"], "very_high");
    assert_eq!(value["call_advice"], "any_two");
    assert_eq!(value["turn"]["schedule"].as_array().unwrap().len(), 2);
}
