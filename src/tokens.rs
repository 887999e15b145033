use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{KoError, KoResult};

static TOKEN_TIERS_JSON: &str = include_str!("../data/token_tiers.json");

#[derive(Deserialize, Debug)]
struct TierEntry {
    tier: u32,
    multiplier: Option<f64>,
    fixed_min: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct TierFile {
    tiers: Vec<TierEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierValue {
    /// Average value as a multiple of the buy-in.
    Multiplier(f64),
    /// Absolute floor in currency, independent of the buy-in.
    FixedMinimum(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TokenTier {
    pub tier: u32,
    pub value: TierValue,
}

impl TokenTier {
    pub fn expected_value(&self, buy_in: f64) -> f64 {
        match self.value {
            TierValue::Multiplier(m) => buy_in * m,
            TierValue::FixedMinimum(floor) => floor,
        }
    }

    pub fn is_fixed_minimum(&self) -> bool {
        matches!(self.value, TierValue::FixedMinimum(_))
    }
}

impl fmt::Display for TokenTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            TierValue::Multiplier(m) => write!(f, "Tier {} ({}x buy-in)", self.tier, m),
            TierValue::FixedMinimum(floor) => write!(f, "Tier {} (min {:.0})", self.tier, floor),
        }
    }
}

static TIERS: Lazy<Vec<TokenTier>> = Lazy::new(|| {
    let file: TierFile =
        serde_json::from_str(TOKEN_TIERS_JSON).expect("Failed to parse token tier table");
    let mut tiers: Vec<TokenTier> = file
        .tiers
        .into_iter()
        .filter_map(|entry| {
            let value = match (entry.multiplier, entry.fixed_min) {
                (Some(m), _) => TierValue::Multiplier(m),
                (None, Some(floor)) => TierValue::FixedMinimum(floor),
                (None, None) => return None,
            };
            Some(TokenTier {
                tier: entry.tier,
                value,
            })
        })
        .collect();
    tiers.sort_by_key(|t| t.tier);
    tiers
});

pub fn token_tiers() -> &'static [TokenTier] {
    &TIERS
}

pub fn max_tier() -> u32 {
    TIERS.last().map(|t| t.tier).unwrap_or(0)
}

/// Out-of-range tiers are rejected rather than clamped.
pub fn lookup_tier(tier: u32) -> KoResult<&'static TokenTier> {
    TIERS
        .iter()
        .find(|t| t.tier == tier)
        .ok_or_else(|| KoError::InvalidTier {
            tier,
            max: max_tier(),
        })
}

pub fn token_value(tier: u32, buy_in: f64) -> KoResult<f64> {
    Ok(lookup_tier(tier)?.expected_value(buy_in))
}
