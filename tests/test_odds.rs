use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use spaceko_cli::config::BandThresholds;
use spaceko_cli::odds::*;

#[test]
fn test_required_equity_reference_spot() {
    let req = required_equity(10.0, 5.0, 25.0);
    assert_relative_eq!(req.standard_pct, 100.0 / 3.0, epsilon = 1e-9);
    assert_relative_eq!(req.bounty_adjusted_pct, 12.5, epsilon = 1e-9);
    assert_relative_eq!(req.discount, 100.0 / 3.0 - 12.5, epsilon = 1e-9);
    assert_eq!(req.band, DiscountBand::Significant);
}

#[test]
fn test_no_bounty_means_no_discount() {
    let req = required_equity(10.0, 5.0, 0.0);
    assert_eq!(req.standard_pct, req.bounty_adjusted_pct);
    assert_eq!(req.discount, 0.0);
    assert_eq!(req.band, DiscountBand::Minor);
}

#[test]
fn test_adjusted_never_exceeds_standard() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5_000 {
        let pot = rng.gen_range(0.0..500.0);
        let call = rng.gen_range(0.0..300.0);
        let bounty = rng.gen_range(0.0..100.0);
        let req = required_equity(pot, call, bounty);
        assert!(
            req.bounty_adjusted_pct <= req.standard_pct,
            "pot={} call={} bounty={}: {:?}",
            pot, call, bounty, req
        );
        if bounty > 0.0 && call > 0.0 {
            assert!(req.bounty_adjusted_pct < req.standard_pct);
        }
    }
}

#[test]
fn test_adjusted_decreases_as_bounty_grows() {
    let mut last = f64::INFINITY;
    for i in 0..50 {
        let req = required_equity(8.0, 4.0, i as f64);
        assert!(req.bounty_adjusted_pct < last);
        last = req.bounty_adjusted_pct;
    }
}

#[test]
fn test_zero_pot_and_call() {
    let req = required_equity(0.0, 0.0, 0.0);
    assert_eq!(req.standard_pct, 0.0);
    assert_eq!(req.bounty_adjusted_pct, 0.0);
    assert!(!req.standard_pct.is_nan());
}

#[test]
fn test_negative_bounty_treated_as_zero() {
    let with_negative = required_equity(10.0, 5.0, -20.0);
    let without = required_equity(10.0, 5.0, 0.0);
    assert_eq!(with_negative, without);
}

#[test]
fn test_all_in_variant() {
    // 2.5 BB in the middle, villain shoves 15: call / (pot + shove + call)
    let req = all_in_required_equity(2.5, 15.0, 0.0);
    assert_relative_eq!(req.standard_pct, 1500.0 / 32.5, epsilon = 1e-9);
    let with_bounty = all_in_required_equity(2.5, 15.0, 12.5);
    assert_relative_eq!(with_bounty.bounty_adjusted_pct, 1500.0 / 45.0, epsilon = 1e-9);
}

#[test]
fn test_discount_bands() {
    let th = BandThresholds::default();
    assert_eq!(DiscountBand::classify(2.9, &th), DiscountBand::Minor);
    assert_eq!(DiscountBand::classify(3.0, &th), DiscountBand::Noticeable);
    assert_eq!(DiscountBand::classify(7.0, &th), DiscountBand::Noticeable);
    assert_eq!(DiscountBand::classify(7.1, &th), DiscountBand::Significant);
}

#[test]
fn test_call_ev_break_even() {
    for &(pot, call, bounty) in &[(10.0, 5.0, 25.0), (20.0, 10.0, 0.0), (3.0, 12.0, 4.5)] {
        let req = required_equity(pot, call, bounty);
        let ev = call_ev(req.bounty_adjusted_pct / 100.0, pot, call, bounty);
        assert!(ev.abs() < 1e-9, "EV at break-even should be 0, got {}", ev);
    }
}

#[test]
fn test_call_ev_bounty_adds_value() {
    let plain = call_ev(0.3, 10.0, 5.0, 0.0);
    let bounty = call_ev(0.3, 10.0, 5.0, 10.0);
    assert_relative_eq!(bounty - plain, 3.0, epsilon = 1e-9);
}

#[test]
fn test_effective_stack() {
    assert_eq!(effective_stack(18_000.0, 15_000.0), 15_000.0);
    assert_eq!(effective_stack(40.0, 100.0), 40.0);
    assert_eq!(effective_stack(-5.0, 100.0), 0.0);
}

#[test]
fn test_display() {
    let req = required_equity(10.0, 5.0, 25.0);
    assert_eq!(req.to_string(), "need 12.5% (standard 33.3%, significant discount)");
}
