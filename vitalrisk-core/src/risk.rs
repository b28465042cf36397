//! Risk tier classification
//!
//! Global invariants enforced:
//! - Tier boundaries are contiguous and exhaustive over [0, 100]
//! - Probability vectors are a fixed lookup keyed by tier, never computed

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk tier classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,    // < 35
    Medium, // 35-65
    High,   // >= 65
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }

    /// Display-only confidence proxy for this tier
    pub fn probabilities(&self) -> TierProbabilities {
        match self {
            RiskTier::Low => LOW_PROBABILITIES,
            RiskTier::Medium => MEDIUM_PROBABILITIES,
            RiskTier::High => HIGH_PROBABILITIES,
        }
    }

    /// Medium and High both call for a clinic visit
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskTier::Medium | RiskTier::High)
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability mass per tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierProbabilities {
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Medium")]
    pub medium: f64,
    #[serde(rename = "High")]
    pub high: f64,
}

impl TierProbabilities {
    pub fn get(&self, tier: RiskTier) -> f64 {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Medium => self.medium,
            RiskTier::High => self.high,
        }
    }

    pub fn sum(&self) -> f64 {
        self.low + self.medium + self.high
    }
}

const LOW_PROBABILITIES: TierProbabilities = TierProbabilities {
    low: 0.75,
    medium: 0.20,
    high: 0.05,
};

const MEDIUM_PROBABILITIES: TierProbabilities = TierProbabilities {
    low: 0.25,
    medium: 0.60,
    high: 0.15,
};

const HIGH_PROBABILITIES: TierProbabilities = TierProbabilities {
    low: 0.10,
    medium: 0.25,
    high: 0.65,
};

/// Configurable tier cut-offs (inclusive lower bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierThresholds {
    pub medium: u8,
    pub high: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        TierThresholds {
            medium: 35,
            high: 65,
        }
    }
}

/// Assign a tier with default thresholds
pub fn assign_risk_tier(score: u8) -> RiskTier {
    assign_risk_tier_with_thresholds(score, &TierThresholds::default())
}

/// Assign a tier with custom thresholds
pub fn assign_risk_tier_with_thresholds(score: u8, thresholds: &TierThresholds) -> RiskTier {
    if score < thresholds.medium {
        RiskTier::Low
    } else if score < thresholds.high {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(assign_risk_tier(0), RiskTier::Low);
        assert_eq!(assign_risk_tier(34), RiskTier::Low);
        assert_eq!(assign_risk_tier(35), RiskTier::Medium);
        assert_eq!(assign_risk_tier(64), RiskTier::Medium);
        assert_eq!(assign_risk_tier(65), RiskTier::High);
        assert_eq!(assign_risk_tier(100), RiskTier::High);
    }

    #[test]
    fn test_every_score_has_one_tier() {
        let mut previous = RiskTier::Low;
        for score in 0..=100u8 {
            let tier = assign_risk_tier(score);
            assert!(tier >= previous, "tiers must not step down at {}", score);
            previous = tier;
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = TierThresholds {
            medium: 20,
            high: 50,
        };
        assert_eq!(assign_risk_tier_with_thresholds(19, &thresholds), RiskTier::Low);
        assert_eq!(assign_risk_tier_with_thresholds(20, &thresholds), RiskTier::Medium);
        assert_eq!(assign_risk_tier_with_thresholds(50, &thresholds), RiskTier::High);
    }

    #[test]
    fn test_probability_vectors_sum_to_one() {
        for tier in [RiskTier::Low, RiskTier::Medium, RiskTier::High] {
            let probs = tier.probabilities();
            assert!((probs.sum() - 1.0).abs() < 1e-9, "{} sums to {}", tier, probs.sum());
        }
    }

    #[test]
    fn test_assigned_tier_has_largest_probability() {
        for tier in [RiskTier::Low, RiskTier::Medium, RiskTier::High] {
            let probs = tier.probabilities();
            let own = probs.get(tier);
            for other in [RiskTier::Low, RiskTier::Medium, RiskTier::High] {
                assert!(own >= probs.get(other));
            }
        }
    }

    #[test]
    fn test_probabilities_serialize_with_tier_names() {
        let json = serde_json::to_string(&RiskTier::Medium.probabilities()).unwrap();
        assert_eq!(json, r#"{"Low":0.25,"Medium":0.6,"High":0.15}"#);
    }
}
