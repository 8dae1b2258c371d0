//! Configuration types for Acuity

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{TriageError, UrgencyLevel, UrgencyLevelInfo};

/// Vital-sign thresholds. Values outside these bounds trigger a safety rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VitalThresholds {
    /// Saturation strictly below this is low
    pub oxygen_saturation_min: f64,

    /// Systolic strictly above this is abnormal
    pub systolic_high: u32,

    /// Systolic strictly below this is abnormal
    pub systolic_low: u32,

    pub heart_rate_high: u32,
    pub heart_rate_low: u32,

    /// Degrees Celsius
    pub temperature_high: f64,
    pub temperature_low: f64,

    /// Pain at or above this is severe
    pub pain_severe_threshold: u8,
}

impl Default for VitalThresholds {
    fn default() -> Self {
        Self {
            oxygen_saturation_min: 92.0,
            systolic_high: 140,
            systolic_low: 90,
            heart_rate_high: 100,
            heart_rate_low: 60,
            temperature_high: 38.0,
            temperature_low: 36.0,
            pain_severe_threshold: 8,
        }
    }
}

impl VitalThresholds {
    /// Check bounds are coherent
    pub fn validate(&self) -> crate::Result<()> {
        if !(0.0..=100.0).contains(&self.oxygen_saturation_min) {
            return Err(TriageError::Config(format!(
                "oxygenSaturationMin must be within 0-100, got {}",
                self.oxygen_saturation_min
            )));
        }
        if self.systolic_low >= self.systolic_high {
            return Err(TriageError::Config(format!(
                "systolicLow ({}) must be below systolicHigh ({})",
                self.systolic_low, self.systolic_high
            )));
        }
        if self.heart_rate_low >= self.heart_rate_high {
            return Err(TriageError::Config(format!(
                "heartRateLow ({}) must be below heartRateHigh ({})",
                self.heart_rate_low, self.heart_rate_high
            )));
        }
        if !(self.temperature_low < self.temperature_high) {
            return Err(TriageError::Config(format!(
                "temperatureLow ({}) must be below temperatureHigh ({})",
                self.temperature_low, self.temperature_high
            )));
        }
        if self.pain_severe_threshold > 10 {
            return Err(TriageError::Config(format!(
                "painSevereThreshold must be within 0-10, got {}",
                self.pain_severe_threshold
            )));
        }
        Ok(())
    }
}

/// Tunable triage configuration: thresholds and the level/SLA table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageConfig {
    #[serde(default)]
    pub thresholds: VitalThresholds,

    #[serde(default = "UrgencyLevelInfo::defaults")]
    pub levels: Vec<UrgencyLevelInfo>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            thresholds: VitalThresholds::default(),
            levels: UrgencyLevelInfo::defaults(),
        }
    }
}

impl TriageConfig {
    /// Parse and validate configuration from JSON
    pub fn from_json_str(s: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from YAML
    pub fn from_yaml_str(s: &str) -> crate::Result<Self> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file; `.yaml`/`.yml` are YAML, anything else JSON
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if is_yaml_path(path) {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Validate thresholds and the level table
    pub fn validate(&self) -> crate::Result<()> {
        self.thresholds.validate()?;
        validate_level_table(&self.levels)
    }
}

/// Check that a level table covers levels 1-5 exactly once each
pub fn validate_level_table(levels: &[UrgencyLevelInfo]) -> crate::Result<()> {
    if levels.len() != UrgencyLevel::ALL.len() {
        return Err(TriageError::Config(format!(
            "level table must define exactly 5 levels, got {}",
            levels.len()
        )));
    }
    for level in UrgencyLevel::ALL {
        let count = levels.iter().filter(|info| info.level == level).count();
        if count != 1 {
            return Err(TriageError::Config(format!(
                "level {} must appear exactly once in the level table, found {}",
                level, count
            )));
        }
    }
    if let Some(info) = levels.iter().find(|info| info.name.trim().is_empty()) {
        return Err(TriageError::Config(format!("level {} has an empty name", info.level)));
    }
    Ok(())
}

/// Check whether a path names a YAML document
pub fn is_yaml_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
