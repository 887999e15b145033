//! Tournament setup, format rules and the band threshold table.
//!
//! Everything here is set once per tournament. A `SessionConfig` can be loaded
//! from JSON; missing fields take their defaults.

use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{KoError, KoResult};
use crate::units::safe_div;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Entry fee in currency.
    pub buy_in: f64,
    /// Chips each player starts with.
    pub starting_stack: f64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            buy_in: 10.0,
            starting_stack: 20_000.0,
        }
    }
}

impl TournamentConfig {
    pub fn new(buy_in: f64, starting_stack: f64) -> Self {
        TournamentConfig {
            buy_in,
            starting_stack,
        }
    }

    /// Currency value of one chip under the given rules.
    pub fn chip_value(&self, rules: &FormatRules) -> f64 {
        safe_div(rules.chip_value_basis.value_pool(self.buy_in), self.starting_stack)
    }

    /// Token value a player starts the tournament with.
    pub fn starting_bounty(&self, rules: &FormatRules) -> f64 {
        self.buy_in * rules.starting_bounty_fraction
    }

    pub fn validate(&self) -> KoResult<()> {
        if !(self.buy_in.is_finite() && self.buy_in > 0.0) {
            return Err(KoError::InvalidValue(format!(
                "Buy-in must be positive, got {}",
                self.buy_in
            )));
        }
        if !(self.starting_stack.is_finite() && self.starting_stack > 0.0) {
            return Err(KoError::InvalidValue(format!(
                "Starting stack must be positive, got {}",
                self.starting_stack
            )));
        }
        Ok(())
    }
}

/// Which part of the buy-in backs the chips in play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChipValueBasis {
    /// The whole buy-in.
    #[default]
    FullBuyIn,
    /// Only the regular prize pool share of the buy-in.
    PrizePool { fraction: f64 },
}

impl ChipValueBasis {
    pub fn value_pool(&self, buy_in: f64) -> f64 {
        match *self {
            ChipValueBasis::FullBuyIn => buy_in,
            ChipValueBasis::PrizePool { fraction } => buy_in * fraction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatRules {
    /// Share of a won token's average value paid out immediately.
    pub cash_share: f64,
    pub chip_value_basis: ChipValueBasis,
    /// Share of the buy-in that seeds each player's token.
    pub starting_bounty_fraction: f64,
}

impl Default for FormatRules {
    fn default() -> Self {
        FormatRules {
            cash_share: 0.5,
            chip_value_basis: ChipValueBasis::FullBuyIn,
            starting_bounty_fraction: 0.5,
        }
    }
}

impl FormatRules {
    pub fn validate(&self) -> KoResult<()> {
        if !unit_interval(self.cash_share) {
            return Err(KoError::InvalidValue(format!(
                "Cash share must be within 0-1, got {}",
                self.cash_share
            )));
        }
        if let ChipValueBasis::PrizePool { fraction } = self.chip_value_basis {
            if !(unit_interval(fraction) && fraction > 0.0) {
                return Err(KoError::InvalidValue(format!(
                    "Prize pool fraction must be within (0, 1], got {}",
                    fraction
                )));
            }
        }
        if !unit_interval(self.starting_bounty_fraction) {
            return Err(KoError::InvalidValue(format!(
                "Starting bounty fraction must be within 0-1, got {}",
                self.starting_bounty_fraction
            )));
        }
        Ok(())
    }
}

fn unit_interval(x: f64) -> bool {
    (0.0..=1.0).contains(&x)
}

/// Cut points for every qualitative band, defined once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandThresholds {
    /// Bounty in BB: below `[0]` low, above `[1]` high.
    pub bounty_impact: [f64; 2],
    /// Equity discount in points: below `[0]` minor, above `[1]` significant.
    pub discount: [f64; 2],
    /// SPR upper bounds for very-low, low, medium and high.
    pub spr: [f64; 4],
    /// Adjusted equity %: upper bounds for any-two, extremely-wide and wide.
    pub call_advice: [f64; 3],
    /// Token value / starting bounty: below `[0]` low, above `[1]` high.
    pub token_rating: [f64; 2],
}

pub const DEFAULT_THRESHOLDS: BandThresholds = BandThresholds {
    bounty_impact: [3.0, 8.0],
    discount: [3.0, 7.0],
    spr: [2.0, 4.0, 7.0, 13.0],
    call_advice: [15.0, 25.0, 35.0],
    token_rating: [0.7, 1.5],
};

impl Default for BandThresholds {
    fn default() -> Self {
        DEFAULT_THRESHOLDS
    }
}

impl BandThresholds {
    pub fn validate(&self) -> KoResult<()> {
        let tables: [(&str, &[f64]); 5] = [
            ("bounty_impact", &self.bounty_impact),
            ("discount", &self.discount),
            ("spr", &self.spr),
            ("call_advice", &self.call_advice),
            ("token_rating", &self.token_rating),
        ];
        for (name, cuts) in tables {
            if !is_ascending(cuts) {
                return Err(KoError::InvalidValue(format!(
                    "Thresholds for {} must be non-negative and strictly ascending: {:?}",
                    name, cuts
                )));
            }
        }
        Ok(())
    }
}

fn is_ascending(cuts: &[f64]) -> bool {
    cuts.iter().all(|c| c.is_finite() && *c >= 0.0)
        && cuts.iter().tuple_windows().all(|(a, b)| a < b)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    pub tournament: TournamentConfig,
    pub rules: FormatRules,
    pub thresholds: BandThresholds,
}

impl SessionConfig {
    pub fn from_json(json: &str) -> KoResult<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> KoResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| KoError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        debug!(path = %path.display(), ?config, "loaded session config");
        Ok(config)
    }

    pub fn validate(&self) -> KoResult<()> {
        self.tournament.validate()?;
        self.rules.validate()?;
        self.thresholds.validate()
    }

    pub fn chip_value(&self) -> f64 {
        self.tournament.chip_value(&self.rules)
    }
}
