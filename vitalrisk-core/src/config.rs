//! Configuration file support for vitalrisk
//!
//! Loads deployment-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.vitalriskrc.json` in the working directory
//! 3. `vitalrisk.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.
//! The scoring table is not configurable.

use crate::assessment::EngineConfig;
use crate::recommend::MAX_RECOMMENDATIONS;
use crate::risk::TierThresholds;
use crate::scoring::MAX_SCORE;
use crate::validate::{
    Bounds, ValidationLimits, DEFAULT_AGE, DEFAULT_DIASTOLIC_BP, DEFAULT_FASTING_GLUCOSE,
    DEFAULT_HEIGHT_CM, DEFAULT_PULSE_RATE, DEFAULT_SYSTOLIC_BP, DEFAULT_WEIGHT_KG,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// vitalrisk configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VitalriskConfig {
    /// Custom tier cut-offs
    #[serde(default)]
    pub thresholds: Option<ThresholdConfig>,

    /// Custom accepted input ranges
    #[serde(default)]
    pub limits: Option<LimitsConfig>,

    /// Maximum number of recommendations per patient, 1 to 6 (default: 6)
    #[serde(default)]
    pub max_recommendations: Option<usize>,

    /// Only reject non-physical input, ignore the ranges (default: false)
    #[serde(default)]
    pub skip_range_checks: Option<bool>,
}

/// Custom tier cut-offs (inclusive lower bounds)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Score at which Medium starts (default: 35)
    pub medium: Option<u8>,
    /// Score at which High starts (default: 65)
    pub high: Option<u8>,
}

/// One accepted range; a missing end keeps the default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Accepted ranges per measurement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    pub age: Option<RangeConfig>,
    pub height_cm: Option<RangeConfig>,
    pub weight_kg: Option<RangeConfig>,
    pub systolic_bp: Option<RangeConfig>,
    pub diastolic_bp: Option<RangeConfig>,
    pub pulse_rate: Option<RangeConfig>,
    pub fasting_glucose: Option<RangeConfig>,
}

/// Resolved configuration with defaults merged in
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Tier cut-offs
    pub medium_threshold: u8,
    pub high_threshold: u8,
    /// Recommendation cap
    pub max_recommendations: usize,
    /// Input validation
    pub limits: ValidationLimits,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

fn merge_range(default: Bounds, range: Option<&RangeConfig>) -> Bounds {
    match range {
        Some(r) => Bounds::new(r.min.unwrap_or(default.min), r.max.unwrap_or(default.max)),
        None => default,
    }
}

impl LimitsConfig {
    fn entries(&self) -> [(&'static str, Bounds, Option<&RangeConfig>); 7] {
        [
            ("age", DEFAULT_AGE, self.age.as_ref()),
            ("height_cm", DEFAULT_HEIGHT_CM, self.height_cm.as_ref()),
            ("weight_kg", DEFAULT_WEIGHT_KG, self.weight_kg.as_ref()),
            ("systolic_bp", DEFAULT_SYSTOLIC_BP, self.systolic_bp.as_ref()),
            ("diastolic_bp", DEFAULT_DIASTOLIC_BP, self.diastolic_bp.as_ref()),
            ("pulse_rate", DEFAULT_PULSE_RATE, self.pulse_rate.as_ref()),
            (
                "fasting_glucose",
                DEFAULT_FASTING_GLUCOSE,
                self.fasting_glucose.as_ref(),
            ),
        ]
    }

    fn resolve(&self) -> ValidationLimits {
        ValidationLimits {
            age: Some(merge_range(DEFAULT_AGE, self.age.as_ref())),
            height_cm: Some(merge_range(DEFAULT_HEIGHT_CM, self.height_cm.as_ref())),
            weight_kg: Some(merge_range(DEFAULT_WEIGHT_KG, self.weight_kg.as_ref())),
            systolic_bp: Some(merge_range(DEFAULT_SYSTOLIC_BP, self.systolic_bp.as_ref())),
            diastolic_bp: Some(merge_range(
                DEFAULT_DIASTOLIC_BP,
                self.diastolic_bp.as_ref(),
            )),
            pulse_rate: Some(merge_range(DEFAULT_PULSE_RATE, self.pulse_rate.as_ref())),
            fasting_glucose: Some(merge_range(
                DEFAULT_FASTING_GLUCOSE,
                self.fasting_glucose.as_ref(),
            )),
        }
    }
}

impl VitalriskConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        // Validate thresholds are positive, ordered and inside the score range
        if let Some(ref t) = self.thresholds {
            let defaults = TierThresholds::default();
            let medium = t.medium.unwrap_or(defaults.medium);
            let high = t.high.unwrap_or(defaults.high);

            if medium == 0 {
                anyhow::bail!("thresholds.medium must be positive (got {})", medium);
            }
            if medium >= high {
                anyhow::bail!(
                    "thresholds.medium ({}) must be less than thresholds.high ({})",
                    medium,
                    high
                );
            }
            if high as u32 > MAX_SCORE {
                anyhow::bail!(
                    "thresholds.high must be at most {} (got {})",
                    MAX_SCORE,
                    high
                );
            }
        }

        if let Some(cap) = self.max_recommendations {
            if cap == 0 || cap > MAX_RECOMMENDATIONS {
                anyhow::bail!(
                    "max_recommendations must be between 1 and {} (got {})",
                    MAX_RECOMMENDATIONS,
                    cap
                );
            }
        }

        // Validate ranges are non-negative and ordered
        if let Some(ref limits) = self.limits {
            for (name, default, range) in limits.entries() {
                let bounds = merge_range(default, range);
                if bounds.min < 0.0 {
                    anyhow::bail!("limits.{}.min must be non-negative (got {})", name, bounds.min);
                }
                if bounds.min >= bounds.max {
                    anyhow::bail!(
                        "limits.{}.min ({}) must be less than limits.{}.max ({})",
                        name,
                        bounds.min,
                        name,
                        bounds.max
                    );
                }
            }
        }

        Ok(())
    }

    /// Resolve config into the form used by the engine
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let defaults = TierThresholds::default();
        let (medium, high) = match &self.thresholds {
            Some(t) => (
                t.medium.unwrap_or(defaults.medium),
                t.high.unwrap_or(defaults.high),
            ),
            None => (defaults.medium, defaults.high),
        };

        let limits = if self.skip_range_checks.unwrap_or(false) {
            ValidationLimits::physical()
        } else {
            self.limits.clone().unwrap_or_default().resolve()
        };

        Ok(ResolvedConfig {
            medium_threshold: medium,
            high_threshold: high,
            max_recommendations: self.max_recommendations.unwrap_or(MAX_RECOMMENDATIONS),
            limits,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Engine settings carried by this config
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            thresholds: TierThresholds {
                medium: self.medium_threshold,
                high: self.high_threshold,
            },
            max_recommendations: self.max_recommendations,
        }
    }

    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        VitalriskConfig::default().resolve()
    }
}

/// Discover and load a config file from a directory
///
/// Search order:
/// 1. `.vitalriskrc.json`
/// 2. `vitalrisk.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(VitalriskConfig, PathBuf)>> {
    for name in [".vitalriskrc.json", "vitalrisk.config.json"] {
        let path = dir.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<VitalriskConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: VitalriskConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in `dir`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(dir: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(dir)? {
            Some((config, path)) => (config, Some(path)),
            None => (VitalriskConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
