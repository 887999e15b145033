//! Chip and big-blind quantities.
//!
//! Pot odds, SPR and geometric sizing work in big blinds. Anything entered in
//! chips is converted here, once, at the boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Clamp to a finite, non-negative value. NaN and negatives become zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Divide, falling back to zero when the denominator is zero or the result is
/// not finite.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let q = numerator / denominator;
    if q.is_finite() {
        q
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[default]
    BigBlinds,
    Chips,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::BigBlinds => write!(f, "BB"),
            Unit::Chips => write!(f, "chips"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Chips(pub f64);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct BigBlinds(pub f64);

impl Chips {
    /// Zero when the blind is zero.
    pub fn to_big_blinds(self, big_blind: f64) -> BigBlinds {
        BigBlinds(safe_div(non_negative(self.0), non_negative(big_blind)))
    }
}

impl fmt::Display for BigBlinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} BB", self.0)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} chips", self.0)
    }
}

/// A pot or stack quantity tagged with the unit it was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub value: f64,
    #[serde(default)]
    pub unit: Unit,
}

impl Amount {
    pub fn bb(value: f64) -> Self {
        Amount {
            value,
            unit: Unit::BigBlinds,
        }
    }

    pub fn chips(value: f64) -> Self {
        Amount {
            value,
            unit: Unit::Chips,
        }
    }

    pub fn in_big_blinds(&self, big_blind: f64) -> BigBlinds {
        match self.unit {
            Unit::BigBlinds => BigBlinds(non_negative(self.value)),
            Unit::Chips => Chips(self.value).to_big_blinds(big_blind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_clamps() {
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(f64::INFINITY), 0.0);
        assert_eq!(non_negative(2.5), 2.5);
    }

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(5.0, 0.0), 0.0);
        assert_eq!(safe_div(5.0, 2.0), 2.5);
    }

    #[test]
    fn test_chips_to_bb() {
        assert_eq!(Chips(1000.0).to_big_blinds(200.0), BigBlinds(5.0));
        assert_eq!(Chips(1000.0).to_big_blinds(0.0), BigBlinds(0.0));
    }

    #[test]
    fn test_amount_in_bb() {
        assert_eq!(Amount::bb(12.0).in_big_blinds(400.0), BigBlinds(12.0));
        assert_eq!(Amount::chips(1200.0).in_big_blinds(400.0), BigBlinds(3.0));
    }
}
