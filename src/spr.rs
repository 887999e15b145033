use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::{BandThresholds, DEFAULT_THRESHOLDS};
use crate::units::{non_negative, safe_div};

/// Commitment bands, most committed first. Ordering follows SPR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SprBand {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl SprBand {
    pub const ALL: [SprBand; 5] = [
        SprBand::VeryLow,
        SprBand::Low,
        SprBand::Medium,
        SprBand::High,
        SprBand::VeryHigh,
    ];

    pub fn classify(ratio: f64, thresholds: &BandThresholds) -> Self {
        let ratio = non_negative(ratio);
        // Cut points ascend, so the first one above the ratio picks the band.
        thresholds
            .spr
            .iter()
            .position(|&upper| ratio < upper)
            .map(|i| SprBand::ALL[i])
            .unwrap_or(SprBand::VeryHigh)
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            SprBand::VeryLow => "Commit with any pair or better. All-in pressure is standard.",
            SprBand::Low => "Commit with top pair or better.",
            SprBand::Medium => "Play cautiously. Two pair+ for stacking off.",
            SprBand::High => "Deep play. Room to bluff and to fold one pair.",
            SprBand::VeryHigh => "Maximum flexibility. Stack off only with the nuts.",
        }
    }
}

impl fmt::Display for SprBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SprBand::VeryLow => write!(f, "very low"),
            SprBand::Low => write!(f, "low"),
            SprBand::Medium => write!(f, "medium"),
            SprBand::High => write!(f, "high"),
            SprBand::VeryHigh => write!(f, "very high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SprResult {
    pub ratio: f64,
    pub band: SprBand,
    pub guidance: &'static str,
}

impl fmt::Display for SprResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SPR {:.1} ({})", self.ratio, self.band)
    }
}

/// Zero when the pot is zero.
pub fn spr_ratio(effective_stack: f64, pot_on_flop: f64) -> f64 {
    let pot = non_negative(pot_on_flop);
    if pot == 0.0 {
        debug!(effective_stack, "empty flop pot, SPR reported as 0");
        return 0.0;
    }
    safe_div(non_negative(effective_stack), pot)
}

pub fn spr_and_band(effective_stack: f64, pot_on_flop: f64) -> SprResult {
    spr_and_band_with(effective_stack, pot_on_flop, &DEFAULT_THRESHOLDS)
}

pub fn spr_and_band_with(
    effective_stack: f64,
    pot_on_flop: f64,
    thresholds: &BandThresholds,
) -> SprResult {
    let ratio = spr_ratio(effective_stack, pot_on_flop);
    let band = SprBand::classify(ratio, thresholds);
    SprResult {
        ratio,
        band,
        guidance: band.guidance(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        let th = BandThresholds::default();
        assert_eq!(SprBand::classify(0.0, &th), SprBand::VeryLow);
        assert_eq!(SprBand::classify(2.0, &th), SprBand::Low);
        assert_eq!(SprBand::classify(6.99, &th), SprBand::Medium);
        assert_eq!(SprBand::classify(7.0, &th), SprBand::High);
        assert_eq!(SprBand::classify(13.0, &th), SprBand::VeryHigh);
        assert_eq!(SprBand::classify(1e9, &th), SprBand::VeryHigh);
    }
}
