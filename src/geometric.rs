//! Geometric bet sizing: one pot fraction, bet and called on every remaining
//! street, that gets the effective stack in exactly on the target street.
//!
//! After `n` bet-call streets at fraction `r` the pot has grown by `(1 + 2r)^n`,
//! so the target is `pot * (1 + 2r)^n = pot + 2 * stack`.

use serde::Serialize;
use tracing::debug;

use crate::units::{non_negative, safe_div};

/// Flop and turn bets, all-in on the turn.
pub const TURN_ALL_IN: u32 = 2;
/// Flop, turn and river bets, all-in on the river.
pub const RIVER_ALL_IN: u32 = 3;

/// Longest per-street schedule built. Longer lines still get a fraction.
pub const MAX_STREETS: u32 = 12;

const MAX_ITERATIONS: usize = 200;
const TOLERANCE: f64 = 1e-12;
/// Highest degree the root is polished against the expanded polynomial.
const MAX_POLISH_DEGREE: u32 = 64;
const POLISH_LIMIT: f64 = 1e-9;

/// Closed form. Zero for an empty pot, an empty stack or no streets.
pub fn geometric_fraction(effective_stack: f64, pot_on_flop: f64, streets: u32) -> f64 {
    let stack = non_negative(effective_stack);
    let pot = non_negative(pot_on_flop);
    if pot == 0.0 || stack == 0.0 || streets == 0 {
        debug!(stack, pot, streets, "no geometric sizing for degenerate spot");
        return 0.0;
    }
    let ratio = safe_div(stack, pot);
    let r = ((1.0 + 2.0 * ratio).powf(1.0 / streets as f64) - 1.0) / 2.0;
    non_negative(r)
}

/// Coefficients of `((1 + 2r)^n - 1) / 2 - ratio`, highest degree first.
///
/// `n = 2` gives `2r^2 + 2r - ratio`, `n = 3` gives `4r^3 + 6r^2 + 3r - ratio`.
pub fn geometric_polynomial(streets: u32, ratio: f64) -> Vec<f64> {
    let n = streets as usize;
    let mut by_degree = vec![0.0; n + 1];
    let mut binomial = 1.0;
    let mut power_of_two = 1.0;
    for (k, coeff) in by_degree.iter_mut().enumerate() {
        *coeff = binomial * power_of_two / 2.0;
        binomial = binomial * (n - k) as f64 / (k + 1) as f64;
        power_of_two *= 2.0;
    }
    by_degree[0] = -ratio;
    by_degree.reverse();
    by_degree
}

/// Value and first derivative by Horner's rule.
fn horner(coeffs: &[f64], x: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut slope = 0.0;
    for &c in coeffs {
        slope = slope * x + value;
        value = value * x + c;
    }
    (value, slope)
}

/// Positive root of the sizing polynomial for `ratio = stack / pot`.
///
/// Solved as `n * ln(1 + 2r) = ln(1 + 2 * ratio)`, which has the same positive
/// root and stays well scaled for huge ratios and long lines. The residual is
/// concave and increasing, so Newton from zero climbs monotonically; steps
/// that leave the bracket fall back to bisection in `ln(1 + 2r)`. Zero when
/// there is no positive root or the iteration does not converge.
pub fn polynomial_fraction(ratio: f64, streets: u32) -> f64 {
    let ratio = non_negative(ratio);
    if ratio == 0.0 || streets == 0 {
        return 0.0;
    }
    let n = streets as f64;
    let target = (2.0 * ratio).ln_1p();
    if !target.is_finite() {
        debug!(ratio, streets, "ratio too large for a sizing root");
        return 0.0;
    }
    let residual = |r: f64| n * (2.0 * r).ln_1p() - target;

    // (1 + 2r)^n >= 1 + 2nr, so the root is at most ratio / n.
    let (mut lo, mut hi) = (0.0_f64, ratio / n);
    let mut x = lo;

    for _ in 0..MAX_ITERATIONS {
        let g = residual(x);
        if g == 0.0 {
            return polish(x, ratio, streets);
        }
        if g < 0.0 {
            lo = x;
        } else {
            hi = x;
        }
        if hi - lo <= TOLERANCE * hi {
            return polish(x, ratio, streets);
        }
        let newton = x - g * (1.0 + 2.0 * x) / (2.0 * n);
        let next = if newton > lo && newton < hi {
            newton
        } else {
            log_midpoint(lo, hi)
        };
        if (next - x).abs() <= TOLERANCE * next.abs() {
            return polish(non_negative(next), ratio, streets);
        }
        x = next;
    }
    debug!(ratio, streets, "sizing root did not converge");
    0.0
}

/// Midpoint of `[lo, hi]` measured in `ln(1 + 2r)`.
fn log_midpoint(lo: f64, hi: f64) -> f64 {
    let mid = 0.5 * ((2.0 * lo).ln_1p() + (2.0 * hi).ln_1p());
    mid.exp_m1() / 2.0
}

/// One Newton step on the expanded polynomial, kept only when it is a small
/// correction. Skipped for degrees whose coefficients would overflow.
fn polish(root: f64, ratio: f64, streets: u32) -> f64 {
    if streets > MAX_POLISH_DEGREE {
        return root;
    }
    let coeffs = geometric_polynomial(streets, ratio);
    let (p, dp) = horner(&coeffs, root);
    if !p.is_finite() || !dp.is_finite() || dp <= 0.0 {
        return root;
    }
    let step = p / dp;
    if step.abs() <= POLISH_LIMIT * root {
        non_negative(root - step)
    } else {
        root
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetBet {
    pub street: String,
    pub pot_before: f64,
    pub bet: f64,
    pub stack_after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometricSizing {
    pub streets: u32,
    /// Bet as a fraction of the pot on every street.
    pub fraction: f64,
    pub pct_of_pot: f64,
    /// First bet in the same unit as the pot.
    pub first_bet: f64,
    pub schedule: Vec<StreetBet>,
}

impl GeometricSizing {
    pub fn is_valid(&self) -> bool {
        self.fraction > 0.0
    }

    pub fn target(&self) -> String {
        format!("all-in by the {}", street_name(self.streets.saturating_sub(1) as usize))
    }
}

pub fn street_name(index: usize) -> String {
    match index {
        0 => "flop".to_string(),
        1 => "turn".to_string(),
        2 => "river".to_string(),
        n => format!("street {}", n + 1),
    }
}

/// Sizing record for one line. The schedule is left empty past
/// [`MAX_STREETS`] streets.
pub fn geometric_sizing(effective_stack: f64, pot_on_flop: f64, streets: u32) -> GeometricSizing {
    let fraction = geometric_fraction(effective_stack, pot_on_flop, streets);
    let pot = non_negative(pot_on_flop);
    let mut schedule = Vec::new();

    if fraction > 0.0 && streets <= MAX_STREETS {
        let mut pot_before = pot;
        let mut stack = non_negative(effective_stack);
        for i in 0..streets as usize {
            let bet = (fraction * pot_before).min(stack);
            stack = non_negative(stack - bet);
            schedule.push(StreetBet {
                street: street_name(i),
                pot_before,
                bet,
                stack_after: stack,
            });
            pot_before += 2.0 * bet;
        }
    }

    GeometricSizing {
        streets,
        fraction,
        pct_of_pot: fraction * 100.0,
        first_bet: fraction * pot,
        schedule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polynomial_one_street() {
        assert_eq!(geometric_polynomial(1, 3.0), vec![1.0, -3.0]);
    }

    #[test]
    fn test_horner() {
        // 2x^2 + 2x - 10 at x = 2
        let (v, d) = horner(&[2.0, 2.0, -10.0], 2.0);
        assert!((v - 2.0).abs() < 1e-12);
        assert!((d - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_midpoint_inside_bracket() {
        let mid = log_midpoint(0.0, 10.0);
        assert!(mid > 0.0 && mid < 10.0);
        // ln(1 + 2r) halfway between 0 and ln(21)
        assert!((mid - (21.0_f64.sqrt() - 1.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_polish_skips_high_degree() {
        assert_eq!(polish(0.25, 5.0, MAX_POLISH_DEGREE + 1), 0.25);
    }

    #[test]
    fn test_street_names() {
        assert_eq!(street_name(0), "flop");
        assert_eq!(street_name(2), "river");
        assert_eq!(street_name(3), "street 4");
    }
}
